//! Events carried by the client's event queue.
//!
//! Terminal input and deferred requests share one ordered queue, so a view
//! change requested before a key press is always applied before that key
//! reaches a view.

use std::collections::BTreeMap;

use crossterm::event::Event;
use serde_json::Value;

use crate::domain::errors::DispatchError;
use crate::domain::view_kind::ViewKind;

/// Request to replace the active view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewTransitionRequest {
    /// View to construct and install.
    pub target: ViewKind,
}

impl ViewTransitionRequest {
    /// Creates a transition request.
    #[must_use]
    pub const fn new(target: ViewKind) -> Self {
        Self { target }
    }
}

/// Arguments passed to a registered callable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArgs {
    /// Ordered positional arguments.
    pub positional: Vec<Value>,
    /// Named arguments.
    pub named: BTreeMap<String, Value>,
}

impl CallArgs {
    /// Creates empty arguments.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates arguments from positional values.
    #[must_use]
    pub fn positional<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            positional: values.into_iter().map(Into::into).collect(),
            named: BTreeMap::new(),
        }
    }

    /// Adds a named argument.
    #[must_use]
    pub fn with_named(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.named.insert(name.into(), value.into());
        self
    }

    /// Returns the positional string at `index`.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if the argument is missing or not a string.
    pub fn str_at(&self, callable: &str, index: usize) -> Result<&str, DispatchError> {
        self.positional
            .get(index)
            .and_then(Value::as_str)
            .ok_or_else(|| {
                DispatchError::invalid_argument(callable, format!("expected string at position {index}"))
            })
    }

    /// Returns the positional port number at `index`.
    ///
    /// Accepts both numbers and numeric strings, since ports typed into a
    /// form arrive as text.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if the argument is missing or out of range.
    pub fn port_at(&self, callable: &str, index: usize) -> Result<u16, DispatchError> {
        let invalid =
            || DispatchError::invalid_argument(callable, format!("expected port at position {index}"));

        match self.positional.get(index) {
            Some(Value::Number(n)) => n
                .as_u64()
                .and_then(|n| u16::try_from(n).ok())
                .ok_or_else(invalid),
            Some(Value::String(s)) => s.trim().parse::<u16>().map_err(|_| invalid()),
            _ => Err(invalid()),
        }
    }

    /// Returns the named string argument, if present.
    #[must_use]
    pub fn named_str(&self, name: &str) -> Option<&str> {
        self.named.get(name).and_then(Value::as_str)
    }
}

/// Request to invoke a registered callable during the next tick.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCallRequest {
    /// Registry key of the callable.
    pub callable: String,
    /// Call arguments.
    pub args: CallArgs,
}

impl FunctionCallRequest {
    /// Creates a call request.
    #[must_use]
    pub fn new(callable: impl Into<String>, args: CallArgs) -> Self {
        Self {
            callable: callable.into(),
            args,
        }
    }
}

/// Item in the client's event queue.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    /// Stop signal; aborts the current batch.
    Quit,
    /// Deferred view transition.
    ViewChange(ViewTransitionRequest),
    /// Deferred function call.
    FunctionCall(FunctionCallRequest),
    /// Terminal input for the active view.
    Input(Event),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test]
    fn test_positional_strings() {
        let args = CallArgs::positional(["localhost", "alice"]);
        assert_eq!(args.str_at("connect", 0).unwrap(), "localhost");
        assert_eq!(args.str_at("connect", 1).unwrap(), "alice");
        assert!(args.str_at("connect", 2).is_err());
    }

    #[test_case(json!(11337), Some(11337) ; "number")]
    #[test_case(json!("8080"), Some(8080) ; "numeric string")]
    #[test_case(json!(70000), None ; "out of range")]
    #[test_case(json!("http"), None ; "not a number")]
    #[test_case(json!(null), None ; "null")]
    fn test_port_at(value: Value, expected: Option<u16>) {
        let args = CallArgs::positional([value]);
        assert_eq!(args.port_at("connect", 0).ok(), expected);
    }

    #[test]
    fn test_named_arguments() {
        let args = CallArgs::new().with_named("reason", "timeout");
        assert_eq!(args.named_str("reason"), Some("timeout"));
        assert_eq!(args.named_str("missing"), None);
    }
}
