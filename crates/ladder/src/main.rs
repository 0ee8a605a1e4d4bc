//! Ladder CLI binary.

use anyhow::Result;
use ladder::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the ladder CLI.
///
/// Runs on tokio's `current_thread` runtime; every command is a short
/// sequence of file reads followed by pure computation.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Controlled via RUST_LOG, e.g. RUST_LOG=ladder=debug,ladder_jsonl=trace
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ladder=info,ladder_jsonl=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting ladder CLI");

    let cli = Cli::parse_args();
    cli.execute().await?;

    tracing::debug!("Ladder CLI completed successfully");
    Ok(())
}
