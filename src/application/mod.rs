//! Application layer with the services that sequence client state changes.

/// Application services.
pub mod services;

pub use services::{
    CallRegistry, ConnectionManager, DeferredCallQueue, EventQueue, RecoveryChain, Scheduler,
};
