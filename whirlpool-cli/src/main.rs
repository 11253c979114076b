//! Whirlpool CLI
//!
//! Prints the Whirlpool digest of a line read from stdin, or of files.

mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{hash_files, hash_line, HexCase};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// =============================================================================
// CLI DEFINITION
// =============================================================================

#[derive(Parser)]
#[command(name = "whirlpool")]
#[command(about = "Compute Whirlpool (512-bit) digests", long_about = None)]
#[command(version)]
struct Cli {
    /// Files to hash (if none, one line is read from stdin)
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Print the digest in lowercase hex
    #[arg(short, long)]
    lowercase: bool,

    /// Log debug information to stderr
    #[arg(short, long)]
    verbose: bool,
}

// =============================================================================
// ENTRY POINT
// =============================================================================

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let case = if cli.lowercase {
        HexCase::Lower
    } else {
        HexCase::Upper
    };

    if cli.files.is_empty() {
        let stdin = io::stdin();
        let digest = hash_line(&mut stdin.lock(), case)?;
        println!("{}", digest);
    } else {
        hash_files(&cli.files, case)?;
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .try_init();
}
