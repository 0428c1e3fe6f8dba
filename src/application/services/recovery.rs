//! Ordered recovery handlers for failed connection attempts.

use std::sync::Arc;

use tracing::{debug, error};

use crate::application::services::call_registry::callables;
use crate::application::services::deferred_queue::DeferredCallQueue;
use crate::domain::errors::ConnectError;
use crate::domain::events::CallArgs;
use crate::domain::ports::TranslatorPort;

/// Whether a handler dealt with a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Failure handled; later handlers are skipped.
    Handled,
    /// Not this handler's failure kind.
    Pass,
}

/// Handler tried against a connection failure.
///
/// Handlers run on the network path, so any effect on client state must go
/// through the queue.
pub trait RecoveryHandler: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Attempts to handle `failure`.
    fn recover(&self, failure: &ConnectError, queue: &DeferredCallQueue) -> Recovery;
}

/// Reports refused connections on the active view.
#[derive(Debug, Default, Clone, Copy)]
pub struct RefusedHandler;

impl RecoveryHandler for RefusedHandler {
    fn name(&self) -> &'static str {
        "connection-refused"
    }

    fn recover(&self, failure: &ConnectError, queue: &DeferredCallQueue) -> Recovery {
        if !matches!(failure, ConnectError::Refused { .. }) {
            return Recovery::Pass;
        }
        queue.request_call(
            callables::ERROR_MESSAGE,
            CallArgs::positional([failure.to_string()]),
        );
        Recovery::Handled
    }
}

/// Reports unresolvable server names on the active view.
pub struct DnsLookupHandler {
    translator: Arc<dyn TranslatorPort>,
}

impl DnsLookupHandler {
    /// Message template; `{failure}` is replaced with the failure text.
    pub const TEMPLATE: &'static str = "Unable to look up IP address for server name: {failure}";

    /// Creates handler.
    #[must_use]
    pub fn new(translator: Arc<dyn TranslatorPort>) -> Self {
        Self { translator }
    }
}

impl RecoveryHandler for DnsLookupHandler {
    fn name(&self) -> &'static str {
        "dns-lookup"
    }

    fn recover(&self, failure: &ConnectError, queue: &DeferredCallQueue) -> Recovery {
        if !matches!(failure, ConnectError::DnsLookup { .. }) {
            return Recovery::Pass;
        }
        let message = self
            .translator
            .translate(Self::TEMPLATE)
            .replace("{failure}", &failure.to_string());
        queue.request_call(callables::ERROR_MESSAGE, CallArgs::positional([message]));
        Recovery::Handled
    }
}

/// Handlers tried in order until one applies.
///
/// Failures no handler claims are logged and the client carries on.
#[derive(Default)]
pub struct RecoveryChain {
    handlers: Vec<Box<dyn RecoveryHandler>>,
}

impl RecoveryChain {
    /// Creates an empty chain; every failure falls through to the log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Refused connections, then DNS failures.
    #[must_use]
    pub fn standard(translator: Arc<dyn TranslatorPort>) -> Self {
        Self::new()
            .with_handler(RefusedHandler)
            .with_handler(DnsLookupHandler::new(translator))
    }

    /// Appends a handler.
    #[must_use]
    pub fn with_handler(mut self, handler: impl RecoveryHandler + 'static) -> Self {
        self.handlers.push(Box::new(handler));
        self
    }

    /// Returns the number of handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns whether the chain has no handlers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Runs the chain against `failure`.
    ///
    /// Returns the name of the handler that applied, or `None` when the
    /// failure was only logged.
    pub fn recover(&self, failure: &ConnectError, queue: &DeferredCallQueue) -> Option<&'static str> {
        for handler in &self.handlers {
            if handler.recover(failure, queue) == Recovery::Handled {
                debug!(handler = handler.name(), error = %failure, "Connection failure handled");
                return Some(handler.name());
            }
        }

        error!(kind = ?failure.kind(), error = %failure, "Unhandled connection failure");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::deferred_queue;
    use crate::domain::events::{ClientEvent, FunctionCallRequest};
    use crate::domain::ports::mocks::MockTranslator;
    use std::io;

    fn error_messages(events: Vec<ClientEvent>) -> Vec<String> {
        events
            .into_iter()
            .filter_map(|event| match event {
                ClientEvent::FunctionCall(FunctionCallRequest { callable, args })
                    if callable == callables::ERROR_MESSAGE =>
                {
                    args.str_at(&callable, 0).ok().map(str::to_string)
                }
                _ => None,
            })
            .collect()
    }

    fn chain() -> RecoveryChain {
        RecoveryChain::standard(Arc::new(MockTranslator::new()))
    }

    #[test]
    fn test_refused_yields_one_error_message() {
        let (queue, mut events) = deferred_queue::channel();
        let failure = ConnectError::from_io(
            "localhost",
            11337,
            &io::Error::from(io::ErrorKind::ConnectionRefused),
        );

        assert_eq!(chain().recover(&failure, &queue), Some("connection-refused"));

        let messages = error_messages(events.drain());
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("refused"));
    }

    #[test]
    fn test_dns_failure_message_contains_host() {
        let (queue, mut events) = deferred_queue::channel();
        let failure = ConnectError::dns_lookup("cards.invalid", "name does not resolve");

        assert_eq!(chain().recover(&failure, &queue), Some("dns-lookup"));

        let messages = error_messages(events.drain());
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("cards.invalid"));
        assert!(messages[0].starts_with("Unable to look up IP address"));
    }

    #[test]
    fn test_dns_template_is_translated() {
        let translator = MockTranslator::new().with_entry(
            DnsLookupHandler::TEMPLATE,
            "Adresse für {failure} nicht gefunden",
        );
        let chain = RecoveryChain::standard(Arc::new(translator));
        let (queue, mut events) = deferred_queue::channel();

        chain.recover(&ConnectError::dns_lookup("nowhere", "nxdomain"), &queue);

        let messages = error_messages(events.drain());
        assert!(messages[0].starts_with("Adresse für DNS lookup failed for nowhere"));
    }

    #[test]
    fn test_other_failures_fall_through_silently() {
        let (queue, mut events) = deferred_queue::channel();
        let failure = ConnectError::transport("connection reset");

        assert_eq!(chain().recover(&failure, &queue), None);
        assert!(events.drain().is_empty());
    }

    #[test]
    fn test_first_matching_handler_wins() {
        struct CatchAll;
        impl RecoveryHandler for CatchAll {
            fn name(&self) -> &'static str {
                "catch-all"
            }
            fn recover(&self, _: &ConnectError, _: &DeferredCallQueue) -> Recovery {
                Recovery::Handled
            }
        }

        let chain = RecoveryChain::new()
            .with_handler(CatchAll)
            .with_handler(RefusedHandler);
        let (queue, mut events) = deferred_queue::channel();
        let failure = ConnectError::from_io("h", 1, &io::Error::from(io::ErrorKind::ConnectionRefused));

        assert_eq!(chain.recover(&failure, &queue), Some("catch-all"));
        assert!(events.drain().is_empty());
        assert_eq!(chain.len(), 2);
    }
}
