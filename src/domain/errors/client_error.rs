//! Fatal run loop errors and the errors views may raise.

use std::io;

use thiserror::Error;

/// Error raised by a view while handling input, updating, or rendering.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ViewError {
    #[error("render failed: {message}")]
    Render { message: String },

    #[error("event handling failed: {message}")]
    Event { message: String },

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl ViewError {
    /// Creates render error.
    #[must_use]
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
        }
    }

    /// Creates event error.
    #[must_use]
    pub fn event(message: impl Into<String>) -> Self {
        Self::Event {
            message: message.into(),
        }
    }
}

/// Error that terminates the run loop.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ClientError {
    #[error("view error: {0}")]
    View(#[from] ViewError),

    #[error("input polling failed: {0}")]
    Input(#[source] io::Error),

    #[error("display error: {0}")]
    Display(#[source] io::Error),
}

/// Lookup of credentials before any connection attempt.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum CredentialsError {
    /// `connect` has never been called.
    #[error("no credentials: connect has not been called")]
    NeverConnected,
}
