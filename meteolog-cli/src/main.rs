//! Binary crate for the `meteolog` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Wiring config, store, provider and exporter together
//! - Human-friendly output

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
