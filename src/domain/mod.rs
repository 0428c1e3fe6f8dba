//! Domain layer with core client types and port definitions.

/// Login identity and digests.
pub mod credentials;
/// Error types.
pub mod errors;
/// Event queue items.
pub mod events;
/// Port definitions.
pub mod ports;
/// Screen identifiers.
pub mod view_kind;

pub use credentials::{Credentials, LoginCredentials, PasswordDigest};
pub use errors::{ClientError, ConnectError, DispatchError, ViewError};
pub use events::{CallArgs, ClientEvent, FunctionCallRequest, ViewTransitionRequest};
pub use view_kind::ViewKind;
