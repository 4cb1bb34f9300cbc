use crate::error::app_error::ErrorKind;
use thiserror::Error;

/// Failures between building a request and holding a decoded response body.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },
    #[error("The request timed out")]
    Timeout,
    #[error("Connection lost: {message}")]
    ConnectionLost { message: String },
    #[error("Invalid credentials")]
    Unauthorized,
    #[error("Client error ({0})")]
    ClientError(u16),
    #[error("Server error ({0})")]
    ServerError(u16),
    #[error("Unexpected response status ({0})")]
    UnexpectedStatus(u16),
    #[error("Failed to process the response: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("Unknown error: {message}")]
    Unknown { message: String },
}

impl NetworkError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest { message: message.into() }
    }

    pub fn connection_lost(message: impl Into<String>) -> Self {
        Self::ConnectionLost { message: message.into() }
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::Unknown { message: message.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            NetworkError::InvalidRequest { .. } | NetworkError::Timeout | NetworkError::ConnectionLost { .. } | NetworkError::Unknown { .. } => {
                ErrorKind::Transport
            }
            NetworkError::Unauthorized | NetworkError::ClientError(_) | NetworkError::ServerError(_) | NetworkError::UnexpectedStatus(_) => {
                ErrorKind::HttpStatus
            }
            NetworkError::Decode(_) => ErrorKind::Decode,
        }
    }

    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            NetworkError::Unauthorized => Some(401),
            NetworkError::ClientError(status) | NetworkError::ServerError(status) | NetworkError::UnexpectedStatus(status) => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for NetworkError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            NetworkError::invalid_request(e.to_string())
        } else if e.is_timeout() {
            NetworkError::Timeout
        } else if e.is_connect() || e.is_request() || e.is_body() {
            NetworkError::connection_lost(e.to_string())
        } else {
            NetworkError::unknown(e.to_string())
        }
    }
}

impl From<serde_json::Error> for NetworkError {
    fn from(e: serde_json::Error) -> Self {
        NetworkError::Decode(e)
    }
}
