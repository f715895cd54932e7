use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{key} was expected to be {expected}, but was received: {received}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        received: &'static str,
    },

    #[error("Missing or invalid API key")]
    InvalidApiKey,

    #[error("Failed to parse response")]
    InvalidResponse,

    #[error("Failed to send request")]
    Request,

    #[error("HTTP error {0}")]
    Status(StatusCode),

    #[error("Flickr error {code}: {message}")]
    RemoteApi { code: i64, message: String },
}
