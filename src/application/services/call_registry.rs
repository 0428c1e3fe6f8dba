//! Startup-time registry of callables reachable through function call requests.

use std::collections::HashMap;

use tracing::warn;

use crate::domain::errors::DispatchError;
use crate::domain::events::{CallArgs, FunctionCallRequest};

/// Names of the callables every client registers.
pub mod callables {
    /// `(host, port, username, password)`: start a connection attempt.
    pub const CONNECT: &str = "connect";
    /// `(message)`: show an error on the active view.
    pub const ERROR_MESSAGE: &str = "error_message";
    /// `(message)`: show a status line on the active view.
    pub const STATUS_MESSAGE: &str = "status_message";
    /// `(host, port)`: a connection attempt succeeded.
    pub const CONNECTION_ESTABLISHED: &str = "connection_established";
    /// `(reason, peer = "host:port")`: an established connection closed.
    pub const CONNECTION_LOST: &str = "connection_lost";
    /// Named `connection_lost` argument identifying the server.
    pub const PEER_ARG: &str = "peer";
    /// Stop the client.
    pub const QUIT: &str = "quit";
}

/// Outcome of a registered callable.
pub type CallResult = Result<(), DispatchError>;

type Callable<C> = Box<dyn Fn(&mut C, &CallArgs) -> CallResult>;

/// Maps stable names to callables operating on a tick-time context `C`.
pub struct CallRegistry<C> {
    callables: HashMap<String, Callable<C>>,
}

impl<C> CallRegistry<C> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            callables: HashMap::new(),
        }
    }

    /// Registers `callable` under `name`, replacing any previous entry.
    pub fn register<F>(&mut self, name: impl Into<String>, callable: F) -> &mut Self
    where
        F: Fn(&mut C, &CallArgs) -> CallResult + 'static,
    {
        let name = name.into();
        if self.callables.insert(name.clone(), Box::new(callable)).is_some() {
            warn!(callable = %name, "Replacing registered callable");
        }
        self
    }

    /// Returns whether `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.callables.contains_key(name)
    }

    /// Returns registered names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.callables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Invokes the callable named by `request`.
    ///
    /// # Errors
    /// Returns `UnknownCallable` if the name is not registered, or whatever
    /// the callable itself returns.
    pub fn invoke(&self, context: &mut C, request: &FunctionCallRequest) -> CallResult {
        let callable = self
            .callables
            .get(&request.callable)
            .ok_or_else(|| DispatchError::unknown_callable(&request.callable))?;
        callable(context, &request.args)
    }
}

impl<C> Default for CallRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn push_arg(log: &mut Vec<String>, args: &CallArgs) -> CallResult {
        log.push(args.str_at("push", 0)?.to_string());
        Ok(())
    }

    #[test]
    fn test_invoke_registered_callable() {
        let mut registry = CallRegistry::<Vec<String>>::new();
        registry.register("push", push_arg);

        let mut log = Vec::new();
        let request = FunctionCallRequest::new("push", CallArgs::positional(["a"]));
        registry.invoke(&mut log, &request).unwrap();

        assert_eq!(log, vec!["a".to_string()]);
    }

    #[test]
    fn test_unknown_callable_is_dispatch_error() {
        let registry = CallRegistry::<Vec<String>>::new();
        let mut log = Vec::new();
        let request = FunctionCallRequest::new("__import__('os').system", CallArgs::new());

        let err = registry.invoke(&mut log, &request).unwrap_err();
        assert!(matches!(err, DispatchError::UnknownCallable { .. }));
        assert!(log.is_empty());
    }

    #[test]
    fn test_argument_errors_surface_from_callable() {
        let mut registry = CallRegistry::<Vec<String>>::new();
        registry.register("push", push_arg);

        let mut log = Vec::new();
        let request = FunctionCallRequest::new("push", CallArgs::positional([json!(1)]));
        let err = registry.invoke(&mut log, &request).unwrap_err();

        assert!(matches!(err, DispatchError::InvalidArgument { .. }));
    }

    #[test]
    fn test_register_replaces_and_lists_names() {
        let mut registry = CallRegistry::<Vec<String>>::new();
        registry
            .register("b", |log: &mut Vec<String>, _| {
                log.push("old".into());
                Ok(())
            })
            .register("a", |_, _| Ok(()))
            .register("b", |log: &mut Vec<String>, _| {
                log.push("new".into());
                Ok(())
            });

        assert_eq!(registry.names(), vec!["a", "b"]);

        let mut log = Vec::new();
        registry
            .invoke(&mut log, &FunctionCallRequest::new("b", CallArgs::new()))
            .unwrap();
        assert_eq!(log, vec!["new".to_string()]);
    }
}
