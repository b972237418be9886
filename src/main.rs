//! Bankruptcy Explorer - Main Entry Point
//!
//! Serves the explorer web page by default; `sample` and `info` work on a
//! predictions CSV directly from the terminal.

use bankruptcy_explorer::cli::{cmd_info, cmd_sample, cmd_serve, Cli, Commands};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bankruptcy_explorer=info,tower_http=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve { port, host, base_dir, seed }) => {
            cmd_serve(host, port, base_dir, seed).await?;
        }
        Some(Commands::Sample { data, exclude, seed }) => {
            cmd_sample(data, exclude, seed)?;
        }
        Some(Commands::Info { data }) => {
            cmd_info(data)?;
        }
        None => {
            cmd_serve(None, None, None, None).await?;
        }
    }

    Ok(())
}
