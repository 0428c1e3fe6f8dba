//! Domain error types.

mod client_error;
mod connect_error;
mod dispatch_error;
mod persistence_error;

pub use client_error::{ClientError, CredentialsError, ViewError};
pub use connect_error::{ConnectError, ConnectFailureKind};
pub use dispatch_error::DispatchError;
pub use persistence_error::PersistenceError;
