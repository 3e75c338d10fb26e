use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the service client
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a usable response.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("service error {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Server {
        status: StatusCode,
        detail: Option<String>,
    },
}

impl ApiError {
    /// Human-readable message reported by the service, when one was present.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Server { detail, .. } => detail.as_deref(),
            ApiError::Network(_) => None,
        }
    }
}
