//! Application services.

pub mod call_registry;
pub mod connection_manager;
pub mod deferred_queue;
pub mod recovery;
pub mod scheduler;

pub use call_registry::{CallRegistry, CallResult, callables};
pub use connection_manager::{AttemptHandle, ConnectionAttempt, ConnectionManager, DEFAULT_PORT};
pub use deferred_queue::{DeferredCallQueue, EventQueue};
pub use recovery::{DnsLookupHandler, Recovery, RecoveryChain, RecoveryHandler, RefusedHandler};
pub use scheduler::Scheduler;
