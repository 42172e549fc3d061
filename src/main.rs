//! Shipcheck - Release-readiness audit CLI
//!
//! Scans a source tree for risky code patterns, import cycles, and
//! missing operational basics, then scores deployment readiness.

use anyhow::Result;
use clap::Parser;
use shipcheck::cli;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    // RUST_LOG wins over the --log-level flag when set.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    cli::run(args)
}
