pub mod delete;
pub mod download;
pub mod upload;

use anyhow::Result;
use file_console::{config::ClientConfig, page::Form, page::CSRF_FIELD, transport::WebClient};
use tracing::debug;

/// Form for `page`: the configured token when one is set, otherwise the
/// inputs rendered into the page itself.
pub async fn form_for(client: &WebClient, config: &ClientConfig, page: &[&str]) -> Result<Form> {
    if let Some(token) = &config.csrf_token {
        debug!("using configured CSRF token");
        return Ok(Form::new().with_field(CSRF_FIELD, token.clone()));
    }
    Ok(client.load_form(page).await?)
}
