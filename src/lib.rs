//! Cards Against Humanity Online - terminal client runtime.
//!
//! A fixed-rate run loop sharing one thread with asynchronous network I/O,
//! a view state machine, a deferred call queue for cross-context requests,
//! and connection establishment with typed failure recovery.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing the queue, call registry and connection services.
pub mod application;
/// Domain layer containing events, credentials, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing views, the run loop and terminal I/O.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "cah-client";
