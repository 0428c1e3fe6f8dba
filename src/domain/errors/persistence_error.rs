//! Settings persistence errors.

use thiserror::Error;

/// Failure to persist client settings.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum PersistenceError {
    #[error("settings location unavailable")]
    Unavailable,

    #[error("failed to write settings: {message}")]
    Write { message: String },

    #[error("failed to encode settings: {message}")]
    Encode { message: String },
}

impl PersistenceError {
    /// Creates write error.
    #[must_use]
    pub fn write(message: impl Into<String>) -> Self {
        Self::Write {
            message: message.into(),
        }
    }

    /// Creates encode error.
    #[must_use]
    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode {
            message: message.into(),
        }
    }
}
