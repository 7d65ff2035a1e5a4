//! Error type shared by the backend and identity clients.

use thiserror::Error;

/// Everything that can go wrong talking to the backend or the identity provider.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, CORS, offline...).
    #[error("Network error: {0}")]
    Transport(String),

    /// The backend rejected the bearer token. The session has been ended.
    #[error("Your session has expired, please log in again")]
    Unauthorized { status: u16 },

    /// Any other non-2xx response.
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Decode(String),

    /// The identity provider refused the credentials or the operation.
    #[error("{0}")]
    Identity(String),

    #[error("{0}")]
    Invalid(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { status } | Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
