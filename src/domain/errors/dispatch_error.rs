//! Errors raised while applying deferred requests.

use thiserror::Error;

use crate::domain::view_kind::ViewKind;

/// Dispatch error variants.
///
/// Dispatch errors are never fatal: the offending queue item is logged and
/// skipped.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum DispatchError {
    #[error("no callable registered under '{name}'")]
    UnknownCallable { name: String },

    #[error("no constructor registered for view '{kind}'")]
    UnregisteredView { kind: ViewKind },

    #[error("invalid argument for '{callable}': {reason}")]
    InvalidArgument { callable: String, reason: String },

    #[error("'{callable}' failed: {message}")]
    CallFailed { callable: String, message: String },
}

impl DispatchError {
    /// Creates unknown callable error.
    #[must_use]
    pub fn unknown_callable(name: impl Into<String>) -> Self {
        Self::UnknownCallable { name: name.into() }
    }

    /// Creates invalid argument error.
    #[must_use]
    pub fn invalid_argument(callable: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            callable: callable.into(),
            reason: reason.into(),
        }
    }

    /// Creates call failure error.
    #[must_use]
    pub fn call_failed(callable: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CallFailed {
            callable: callable.into(),
            message: message.into(),
        }
    }
}
