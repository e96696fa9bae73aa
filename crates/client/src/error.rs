use tourism_core::error::CoreError;

/// Errors from the backend client layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("Backend error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The backend answered 2xx but the body did not match the expected shape.
    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Input rejected before any request was sent.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The configured backend URL cannot be used.
    #[error("Invalid backend URL '{0}'")]
    InvalidBaseUrl(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// Backend status code, when the failure came from a backend reply.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}
