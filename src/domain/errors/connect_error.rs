//! Connection failure types.

use std::io;

use thiserror::Error;

/// Discriminant of a connection failure, used to match recovery handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectFailureKind {
    /// Parameters rejected before any I/O.
    InvalidInput,
    /// Remote host actively refused the connection.
    Refused,
    /// Host name could not be resolved.
    DnsLookup,
    /// No answer within the connect timeout.
    Timeout,
    /// Any other transport failure.
    Transport,
}

/// Connection failure variants.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum ConnectError {
    #[error("invalid connection parameters: {reason}")]
    InvalidInput { reason: String },

    #[error("connection refused by {host}:{port}: {message}")]
    Refused {
        host: String,
        port: u16,
        message: String,
    },

    #[error("DNS lookup failed for {host}: {message}")]
    DnsLookup { host: String, message: String },

    #[error("timed out connecting to {host}:{port}")]
    Timeout { host: String, port: u16 },

    #[error("transport error: {message}")]
    Transport { message: String },
}

impl ConnectError {
    /// Creates invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates DNS lookup error.
    #[must_use]
    pub fn dns_lookup(host: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DnsLookup {
            host: host.into(),
            message: message.into(),
        }
    }

    /// Creates transport error.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Classifies an I/O error raised while connecting to `host:port`.
    #[must_use]
    pub fn from_io(host: &str, port: u16, error: &io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::ConnectionRefused => Self::Refused {
                host: host.to_string(),
                port,
                message: error.to_string(),
            },
            io::ErrorKind::TimedOut => Self::Timeout {
                host: host.to_string(),
                port,
            },
            _ => Self::transport(format!("{host}:{port}: {error}")),
        }
    }

    /// Returns the failure discriminant.
    #[must_use]
    pub const fn kind(&self) -> ConnectFailureKind {
        match self {
            Self::InvalidInput { .. } => ConnectFailureKind::InvalidInput,
            Self::Refused { .. } => ConnectFailureKind::Refused,
            Self::DnsLookup { .. } => ConnectFailureKind::DnsLookup,
            Self::Timeout { .. } => ConnectFailureKind::Timeout,
            Self::Transport { .. } => ConnectFailureKind::Transport,
        }
    }
}
