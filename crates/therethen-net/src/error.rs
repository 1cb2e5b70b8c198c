use thiserror::Error;

/// Failure taxonomy shared by every API operation.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The configured base address plus route did not form a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidEndpoint(String),

    /// Transport-level failure (DNS, timeout, connection reset, ...).
    /// Safe to retry at a higher layer.
    #[error("Network error: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    /// The server rejected the request, or its response could not be
    /// decoded. Carries a human-readable message.
    #[error("Server error: {0}")]
    ServerFailure(String),
}

impl ApiError {
    /// Whether this is the backend's "not logged in" rejection.
    pub fn is_authentication_required(&self) -> bool {
        matches!(self, ApiError::ServerFailure(msg) if msg.contains("Authentication required"))
    }
}

/// Errors returned by [`StreamClient::connect`](crate::StreamClient::connect).
/// Sends and receives never raise; they log.
#[derive(Error, Debug)]
pub enum StreamError {
    #[error("Invalid stream address: {0}")]
    InvalidAddress(String),

    #[error("Stream connect failed: {0}")]
    Connect(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("Stream already connected")]
    AlreadyConnected,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ApiError>;
