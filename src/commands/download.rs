use anyhow::Result;
use std::{env, fs, path::Path};

use file_console::{config::ClientConfig, transport::WebClient, utils::format_size};

pub async fn download_file(
    file_name: &str,
    output_path: Option<&str>,
    config: &ClientConfig,
    verbose: bool,
) -> Result<()> {
    let client = WebClient::new(&config.base_url)?;

    // Determine output path
    let output_path = match output_path {
        Some(p) => Path::new(p).to_path_buf(),
        None => env::current_dir()?.join(file_name),
    };

    if verbose {
        println!("📥 Downloading {} -> {}", file_name, output_path.display());
    }

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
            if verbose {
                println!("  Created directory {}", parent.display());
            }
        }
    }

    let written = client.download(file_name, &output_path, verbose).await?;

    if verbose {
        println!("✅ Download completed ({})", format_size(written));
        println!("  Saved to: {}", output_path.display());
    }

    Ok(())
}
