use std::sync::Arc;

use anyhow::{bail, Result};
use file_console::{
    config::ClientConfig,
    deletion::{DeleteController, DeleteOutcome},
    prompt::TerminalPrompt,
    refresh::ReloadPage,
    transport::WebClient,
};

use super::form_for;

const LISTING_PAGE: &[&str] = &["uploads"];

pub async fn delete_file(file_name: &str, config: &ClientConfig, verbose: bool) -> Result<()> {
    let client = WebClient::new(&config.base_url)?;
    if verbose {
        println!("🗑️ Deleting file: {}", file_name);
    }

    let form = form_for(&client, config, LISTING_PAGE).await?;
    let controller = DeleteController::new(
        Arc::new(TerminalPrompt::new(config.assume_yes)),
        Arc::new(client.clone()),
        Arc::new(ReloadPage::new(client, LISTING_PAGE)),
    );

    match controller.request_delete(file_name, &form).await? {
        DeleteOutcome::Declined => println!("Deletion cancelled"),
        DeleteOutcome::Deleted => println!("✅ Deleted file: {}", file_name),
        DeleteOutcome::Rejected(message) => bail!("Server refused to delete {}: {}", file_name, message),
        DeleteOutcome::Failed => bail!("Could not delete {}", file_name),
    }

    Ok(())
}
