// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # klaytx
//!
//! Entry point for the `klaytx` binary. Parses CLI arguments, initializes
//! logging, runs one subcommand and prints its result on stdout.
//!
//! - `decode`   raw hex to JSON field map
//! - `encode`   JSON field map to raw hex
//! - `sig-hash` signable form and hash for a role
//! - `types`    the transaction type table

mod cli;
mod commands;
mod logging;

use anyhow::Result;
use clap::Parser;

use cli::{Commands, KlaytxCli};

fn main() -> Result<()> {
    let cli = KlaytxCli::parse();
    logging::init_logging(
        &logging::default_directives(&cli.log_level),
        cli.log_format,
    );

    let output = match cli.command {
        Commands::Decode(args) => commands::decode(&args.raw)?,
        Commands::Encode(args) => commands::encode(&args.input)?,
        Commands::SigHash(args) => commands::sig_hash(&args.input, args.role.into())?,
        Commands::Types => commands::types(),
    };
    println!("{output}");
    Ok(())
}
