use std::{fs, path::Path, sync::Arc};

use anyhow::Result;
use file_console::{
    config::ClientConfig,
    page::FileSelection,
    progress::{TerminalProgress, UploadProgressController},
    transport::WebClient,
    utils::format_size,
};
use tracing::info;

use super::form_for;

const UPLOAD_PAGE: &[&str] = &[""];

pub async fn upload_file(file_path: &str, config: &ClientConfig, verbose: bool) -> Result<()> {
    if verbose {
        println!("📤 Uploading file: {}", file_path);
    }

    let path = Path::new(file_path);
    if !path.exists() {
        anyhow::bail!("File does not exist: {}", file_path);
    }
    if verbose {
        println!("  File size: {}", format_size(fs::metadata(path)?.len()));
    }

    let client = WebClient::new(&config.base_url)?;
    let form = form_for(&client, config, UPLOAD_PAGE).await?;

    let progress = Arc::new(TerminalProgress::new());
    let controller = UploadProgressController::new(
        progress.clone(),
        FileSelection::new(vec![path.to_path_buf()]),
    );
    controller.handle_submit();

    let receipt = client.upload(&form, path).await;
    progress.finish("done");
    let receipt = receipt?;
    info!(status = receipt.status, url = %receipt.final_url, "upload answered");

    if !receipt.accepted() {
        anyhow::bail!(
            "Upload of {} was not accepted (landed on {})",
            file_path,
            receipt.final_url
        );
    }

    println!("✅ Upload successful");
    Ok(())
}
