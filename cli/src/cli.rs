//! # CLI Interface
//!
//! Defines the command-line argument structure for `klaytx` using `clap`
//! derive. Four subcommands: `decode`, `encode`, `sig-hash` and `types`.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use klay_tx::transaction::SignerRole;

use crate::logging::LogFormat;

/// Inspect Klaytn typed transactions.
///
/// Decodes raw transactions into their field map, encodes field maps into
/// raw transactions, and prints the bytes and hash a signer signs over.
/// Never touches private keys.
#[derive(Parser, Debug)]
#[command(
    name = "klaytx",
    about = "Klaytn typed transaction inspector",
    version,
    propagate_version = true
)]
pub struct KlaytxCli {
    /// Log output format. Logs go to stderr.
    #[arg(
        long,
        global = true,
        value_enum,
        env = "KLAYTX_LOG_FORMAT",
        default_value_t = LogFormat::Pretty
    )]
    pub log_format: LogFormat,

    /// Default log level when `RUST_LOG` is not set.
    #[arg(long, global = true, env = "KLAYTX_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode a raw transaction and print its fields as JSON.
    Decode(DecodeArgs),
    /// Encode a JSON field map into a raw transaction.
    Encode(EncodeArgs),
    /// Print the signable form and its Keccak-256 hash.
    SigHash(SigHashArgs),
    /// List every known transaction type and its tag.
    Types,
}

/// Arguments for the `decode` subcommand.
#[derive(Parser, Debug)]
pub struct DecodeArgs {
    /// Hex-encoded raw transaction, with or without `0x`.
    pub raw: String,
}

/// Arguments for the `encode` subcommand.
#[derive(Parser, Debug)]
pub struct EncodeArgs {
    /// JSON file holding the field map (including `type`). `-` reads stdin.
    pub input: PathBuf,
}

/// Arguments for the `sig-hash` subcommand.
#[derive(Parser, Debug)]
pub struct SigHashArgs {
    /// JSON file holding the field map (including `type` and `chainId`).
    /// `-` reads stdin.
    pub input: PathBuf,

    /// Whose signable form to print.
    #[arg(long, value_enum, default_value_t = Role::Sender)]
    pub role: Role,
}

/// Signer role as a CLI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Role {
    Sender,
    FeePayer,
}

impl From<Role> for SignerRole {
    fn from(role: Role) -> Self {
        match role {
            Role::Sender => SignerRole::Sender,
            Role::FeePayer => SignerRole::FeePayer,
        }
    }
}
