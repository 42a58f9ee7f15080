//! Oshocks CLI

use clap::Parser;

mod cli;

#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    _ = dotenvy::dotenv();

    let cli = cli::Cli::parse();

    cli::logging::init(&cli.logging)?;

    cli.run().await
}
