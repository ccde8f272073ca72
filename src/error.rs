use thiserror::Error;

/// Failures below the application layer: the request never produced a
/// usable JSON body.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("Response body is not valid JSON: {0}")]
    InvalidBody(String),
}

/// Integration bugs in how a controller was invoked. These never reach the
/// user as a message.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PreconditionError {
    #[error("resource identifier must not be empty")]
    EmptyResourceId,
    #[error("form has no `{0}` field")]
    MissingField(&'static str),
}
