//! Common error types and handling for Curio

/// Common result type
pub type Result<T> = std::result::Result<T, Error>;

/// Failure talking to a remote collaborator (the Curio API or the image store).
///
/// Carries rendered messages rather than the underlying client error so that
/// it can be cloned, compared, and replayed by mocks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Local resource unavailable: {0}")]
    LocalResource(String),
}

impl TransportError {
    /// HTTP status for `Status` errors
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            TransportError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            TransportError::Status {
                status: status.as_u16(),
                body: err.to_string(),
            }
        } else {
            TransportError::Request(err.to_string())
        }
    }
}

/// Common error type returned by Curio operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Unexpected error: {0}")]
    Unexpected(#[from] anyhow::Error),
}

impl Error {
    /// Get the error code surfaced to the UI layer
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Transport(_) => "TRANSPORT_ERROR",
            Error::Validation(_) => "VALIDATION_ERROR",
            Error::Configuration(_) => "CONFIGURATION_ERROR",
            Error::Unexpected(_) => "UNEXPECTED_ERROR",
        }
    }

    /// The transport failure behind this error, if any
    pub fn as_transport(&self) -> Option<&TransportError> {
        match self {
            Error::Transport(e) => Some(e),
            _ => None,
        }
    }
}
