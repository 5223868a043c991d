pub use crate::http::Client;
pub use crate::responses::*;

pub mod http;
pub mod responses;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid id")]
    InvalidId { id: String },
    #[error("Invalid API key: {0}")]
    InvalidApiKey(#[from] reqwest::header::InvalidHeaderValue),
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("JSON serialization/deserialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// Message carried by the normalized error mapping.
    ///
    /// A non-2xx reply reports its raw body, even when empty. A transport
    /// failure reports the transport error's own text without the wrapper
    /// prefix. Every other failure reports its own description.
    pub fn message(&self) -> String {
        match self {
            ClientError::Http { body, .. } => body.clone(),
            ClientError::Reqwest(err) => err.to_string(),
            other => other.to_string(),
        }
    }

    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse::new(self.message())
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
