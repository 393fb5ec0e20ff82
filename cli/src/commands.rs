//! Subcommand implementations. Each returns the text to print on stdout.

use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::io::Read;
use std::path::Path;

use klay_tx::crypto::hash_to_hex;
use klay_tx::transaction::{decode_raw, SignerRole, Transaction, TX_TYPES};

/// Reads a file, or stdin when `path` is `-`.
fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn load_transaction(path: &Path) -> Result<Transaction> {
    let text = read_input(path)?;
    let value: Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    let tx = Transaction::from_json(&value)
        .with_context(|| format!("invalid transaction in {}", path.display()))?;
    tracing::debug!(tx_type = %tx.tx_type(), "loaded transaction");
    Ok(tx)
}

/// `decode`: raw hex to a pretty-printed field map.
pub fn decode(raw: &str) -> Result<String> {
    let tx = decode_raw(raw).context("failed to decode raw transaction")?;
    let mut fields = tx.to_fields();
    fields.insert(
        "transactionHash".into(),
        json!(hash_to_hex(&tx.transaction_hash()?)),
    );
    fields.insert(
        "senderTxHash".into(),
        json!(hash_to_hex(&tx.sender_tx_hash()?)),
    );
    Ok(serde_json::to_string_pretty(&Value::Object(fields))?)
}

/// `encode`: field-map file to raw hex.
pub fn encode(input: &Path) -> Result<String> {
    let tx = load_transaction(input)?;
    tx.raw_transaction()
        .context("transaction is not ready for encoding")
}

/// `sig-hash`: field-map file to the signable bytes and their hash.
pub fn sig_hash(input: &Path, role: SignerRole) -> Result<String> {
    let tx = load_transaction(input)?;
    let encoded = tx
        .rlp_encoding_for_signature(role)
        .with_context(|| format!("cannot build the {role} signable form"))?;
    let hash = tx.signing_hash(role)?;
    let out = json!({
        "role": role.to_string(),
        "rlpEncoding": format!("0x{}", hex::encode(encoded)),
        "hash": hash_to_hex(&hash),
    });
    Ok(serde_json::to_string_pretty(&out)?)
}

/// `types`: one `tag  name  alias` line per known variant.
pub fn types() -> String {
    TX_TYPES
        .iter()
        .map(|row| format!("{:#04x}  {:<48}  {}", row.tag, row.name, row.alias))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CANCEL: &str = r#"{
        "type": "TxTypeFeeDelegatedCancel",
        "nonce": "0x1",
        "gasPrice": "0x19",
        "gas": "0x5208",
        "from": "0xa94f5374fce5edbc8e2a8697c15331677e6ebf0b",
        "chainId": "0x3e9"
    }"#;

    fn write_json(text: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn encode_then_decode() {
        let file = write_json(CANCEL);
        let raw = encode(file.path()).unwrap();
        assert!(raw.starts_with("0x39"));

        let printed = decode(&raw).unwrap();
        let value: Value = serde_json::from_str(&printed).unwrap();
        assert_eq!(value["type"], "TxTypeFeeDelegatedCancel");
        assert_eq!(value["nonce"], "0x1");
        assert!(value["transactionHash"].as_str().unwrap().starts_with("0x"));
    }

    #[test]
    fn sig_hash_for_sender() {
        let file = write_json(CANCEL);
        let printed = sig_hash(file.path(), SignerRole::Sender).unwrap();
        let value: Value = serde_json::from_str(&printed).unwrap();
        assert_eq!(value["role"], "sender");
        assert_eq!(value["hash"].as_str().unwrap().len(), 66);
    }

    #[test]
    fn sig_hash_fee_payer_needs_fee_payer() {
        let file = write_json(CANCEL);
        let err = sig_hash(file.path(), SignerRole::FeePayer).unwrap_err();
        assert!(format!("{err:#}").contains("feePayer"), "{err:#}");
    }

    #[test]
    fn bad_json_is_reported_with_path() {
        let file = write_json("{ not json");
        let err = encode(file.path()).unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));
    }

    #[test]
    fn missing_file() {
        assert!(encode(Path::new("/nonexistent/tx.json")).is_err());
    }

    #[test]
    fn types_lists_every_variant() {
        let listing = types();
        assert_eq!(listing.lines().count(), TX_TYPES.len());
        assert!(listing.contains("0x29  TxTypeFeeDelegatedSmartContractDeploy"));
    }
}
