use crate::error::network::NetworkError;
use crate::error::validation::ValidationError;
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

/// Coarse classification used by the flows to pick how a failure is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Rejected locally, nothing was sent.
    Validation,
    /// URL, timeout, connectivity or unclassified transport failure.
    Transport,
    /// The server answered with a non-2xx status.
    HttpStatus,
    /// A 2xx body that did not match the expected schema.
    Decode,
    /// A 2xx body whose payload reports a logical failure.
    Business,
    /// The flow itself refused or abandoned the submission.
    Flow,
    Internal,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Network(#[from] NetworkError),
    #[error("{0}")]
    ValidationFailed(String),
    #[error("The server did not return a session token")]
    MissingToken,
    #[error("A request is already in progress")]
    Busy,
    #[error("The request was cancelled")]
    Cancelled,
    #[error("Internal error")]
    Storage { message: String },
    #[error("{message}: {source}")]
    ConfigurationError {
        message: String,
        #[source]
        source: figment::Error,
    },
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ValidationErrors),
}

impl AppError {
    pub fn storage(message: impl Into<String>, source: impl std::fmt::Display) -> Self {
        Self::Storage {
            message: format!("{}: {}", message.into(), source),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_) => ErrorKind::Validation,
            AppError::Network(e) => e.kind(),
            AppError::ValidationFailed(_) | AppError::MissingToken => ErrorKind::Business,
            AppError::Busy | AppError::Cancelled => ErrorKind::Flow,
            AppError::Storage { .. } | AppError::ConfigurationError { .. } | AppError::InvalidConfiguration(_) => ErrorKind::Internal,
        }
    }

    /// Short heading shown above the message when a flow fails.
    pub fn title(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Validation => "Invalid data",
            ErrorKind::Transport | ErrorKind::HttpStatus | ErrorKind::Decode => "Connection error",
            _ => "Error",
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Network(NetworkError::Unauthorized))
    }
}

impl From<figment::Error> for AppError {
    fn from(e: figment::Error) -> Self {
        AppError::ConfigurationError {
            message: "Failed to read configuration".to_string(),
            source: e,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Network(e.into())
    }
}
