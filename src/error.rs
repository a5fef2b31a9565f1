use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn backend<S: Into<String>>(status: u16, msg: S) -> Self {
        Self::Backend {
            status,
            message: msg.into(),
        }
    }

    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_pii_safe(&self) -> bool {
        match self {
            Self::Network(_) | Self::Backend { .. } | Self::Serialization(_) | Self::Io(_) => false,
            Self::Validation(_) | Self::NotFound(_) | Self::Config(_) => true,
        }
    }

    /// Text fit for the status line.
    pub fn to_safe_string(&self) -> String {
        match self {
            Self::Validation(err) => err.to_string(),
            Self::Network(_) => "Network request failed".to_string(),
            Self::Backend { status, .. } => format!("Server rejected the request ({})", status),
            Self::Serialization(_) => "Unexpected response from server".to_string(),
            Self::Io(_) => "Operation failed".to_string(),
            _ => self.to_string(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
