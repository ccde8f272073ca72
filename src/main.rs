use anyhow::Result;
use clap::Parser;
use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

use file_console::cli::{Cli, Commands};
use file_console::config::ClientConfig;

mod commands;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::load_from_cli(&cli)?;

    match &cli.command {
        Commands::Upload { file_path } => {
            commands::upload::upload_file(file_path, &config, cli.verbose).await?
        }
        Commands::Download { file_name, output } => {
            commands::download::download_file(file_name, output.as_deref(), &config, cli.verbose)
                .await?
        }
        Commands::Delete { file_name } => {
            commands::delete::delete_file(file_name, &config, cli.verbose).await?
        }
    }

    Ok(())
}
