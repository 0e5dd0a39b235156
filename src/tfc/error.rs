use crate::error::{ErrorCode, OpsError};

#[derive(Debug, thiserror::Error)]
pub enum TfcError {
    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("API token contains characters not allowed in an HTTP header")]
    InvalidToken,

    #[error("Invalid API URL '{0}'")]
    InvalidUrl(String),

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{method} {url} returned {status}: {body}")]
    Status {
        method: &'static str,
        url: String,
        status: u16,
        body: String,
    },

    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode payload for '{subject}': {source}")]
    Encode {
        subject: String,
        #[source]
        source: serde_json::Error,
    },
}

impl TfcError {
    /// HTTP status of a non-success response
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<TfcError> for OpsError {
    fn from(err: TfcError) -> Self {
        OpsError::api_with_code(ErrorCode::API_GENERIC, err.to_string()).with_source(err)
    }
}
