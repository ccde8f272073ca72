//! Confirmed, token-authenticated deletion of a stored file.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, info};

use crate::error::{PreconditionError, TransportError};
use crate::page::{Form, CSRF_FIELD};
use crate::prompt::UserPrompt;
use crate::refresh::PageRefresh;
use crate::transport::HttpClient;

pub const CONFIRM_PROMPT: &str = "Are you sure you want to delete this file?";
pub const CSRF_HEADER: &str = "X-CSRFToken";
const DELETE_ENDPOINT: &str = "delete";
const FAILURE_MESSAGE: &str = "Error deleting file";

/// How a single `request_delete` call ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user answered no; nothing was sent.
    Declined,
    /// The server confirmed the deletion and the view was refreshed.
    Deleted,
    /// The server answered but reported failure with this message.
    Rejected(String),
    /// No usable answer arrived.
    Failed,
}

/// Decoded delete response. Fields are looked up by key, so a body that
/// is JSON but not an object simply has no `success` or `error`.
#[derive(Debug)]
struct DeleteResponse(Value);

impl DeleteResponse {
    fn parse(body: &[u8]) -> Result<Self, TransportError> {
        let value: Value =
            serde_json::from_slice(body).map_err(|e| TransportError::InvalidBody(e.to_string()))?;
        // Field access on a null body has nothing to read from.
        if value.is_null() {
            return Err(TransportError::InvalidBody("response body is null".to_string()));
        }
        Ok(Self(value))
    }

    fn succeeded(&self) -> bool {
        self.0.get("success").map(is_truthy).unwrap_or(false)
    }

    fn error_message(&self) -> String {
        match self.0.get("error") {
            None => "undefined".to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

/// Truthiness of a decoded JSON value as a browser script would judge it.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub struct DeleteController {
    prompt: Arc<dyn UserPrompt>,
    http: Arc<dyn HttpClient>,
    refresh: Arc<dyn PageRefresh>,
}

impl DeleteController {
    pub fn new(
        prompt: Arc<dyn UserPrompt>,
        http: Arc<dyn HttpClient>,
        refresh: Arc<dyn PageRefresh>,
    ) -> Self {
        Self {
            prompt,
            http,
            refresh,
        }
    }

    /// Asks for confirmation, then deletes `resource_id` using the CSRF
    /// token currently held by `form`.
    ///
    /// Every user-facing path returns `Ok`. `Err` is reserved for calls
    /// that break the integration contract: an empty identifier or a form
    /// without a `csrf_token` field.
    pub async fn request_delete(
        &self,
        resource_id: &str,
        form: &Form,
    ) -> Result<DeleteOutcome, PreconditionError> {
        if resource_id.is_empty() {
            return Err(PreconditionError::EmptyResourceId);
        }

        if !self.prompt.confirm(CONFIRM_PROMPT) {
            debug!(%resource_id, "deletion declined");
            return Ok(DeleteOutcome::Declined);
        }

        let token = form
            .field(CSRF_FIELD)
            .ok_or(PreconditionError::MissingField(CSRF_FIELD))?;

        match self.send(resource_id, token).await {
            Ok(response) if response.succeeded() => {
                info!(%resource_id, "file deleted");
                self.refresh.refresh().await;
                Ok(DeleteOutcome::Deleted)
            }
            Ok(response) => {
                let message = response.error_message();
                info!(%resource_id, error = %message, "server refused deletion");
                self.prompt.notify(&format!("{}: {}", FAILURE_MESSAGE, message));
                Ok(DeleteOutcome::Rejected(message))
            }
            Err(e) => {
                error!(%resource_id, error = %e, "delete request failed");
                self.prompt.notify(FAILURE_MESSAGE);
                Ok(DeleteOutcome::Failed)
            }
        }
    }

    async fn send(&self, resource_id: &str, token: &str) -> Result<DeleteResponse, TransportError> {
        let response = self
            .http
            .delete(&[DELETE_ENDPOINT, resource_id], &[(CSRF_HEADER, token)])
            .await?;
        debug!(status = response.status, "delete response received");
        DeleteResponse::parse(&response.body)
    }
}

#[cfg(test)]
#[path = "tests/deletion_tests.rs"]
mod tests;
