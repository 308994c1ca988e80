//! API error types

use iterselect_core::EngineError;
use thiserror::Error;

/// API-level errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// Engine error
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[cfg(feature = "serde")]
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl ApiError {
    /// The underlying engine error, if this is one
    pub fn engine_error(&self) -> Option<&EngineError> {
        match self {
            ApiError::Engine(err) => Some(err),
            _ => None,
        }
    }
}

/// Result type for API operations
pub type Result<T> = std::result::Result<T, ApiError>;
