//! Cross-context queue for deferred view changes and function calls.
//!
//! Network tasks and views never touch shared client state directly. They
//! enqueue requests through a [`DeferredCallQueue`] handle and the run loop
//! applies them, in order, during its next tick.

use crossterm::event::Event;
use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::domain::events::{CallArgs, ClientEvent, FunctionCallRequest, ViewTransitionRequest};
use crate::domain::view_kind::ViewKind;

/// Creates a connected request handle and drain side.
#[must_use]
pub fn channel() -> (DeferredCallQueue, EventQueue) {
    let (tx, rx) = mpsc::unbounded_channel();
    (DeferredCallQueue { tx }, EventQueue { rx })
}

/// Cloneable handle for enqueueing requests from any context.
#[derive(Debug, Clone)]
pub struct DeferredCallQueue {
    tx: mpsc::UnboundedSender<ClientEvent>,
}

impl DeferredCallQueue {
    /// Requests a switch to `target` during the next tick.
    pub fn request_view_change(&self, target: ViewKind) {
        self.post(ClientEvent::ViewChange(ViewTransitionRequest::new(target)));
    }

    /// Requests a call of the registered callable `callable`.
    pub fn request_call(&self, callable: impl Into<String>, args: CallArgs) {
        self.post(ClientEvent::FunctionCall(FunctionCallRequest::new(
            callable, args,
        )));
    }

    /// Requests the run loop to stop.
    pub fn request_stop(&self) {
        self.post(ClientEvent::Quit);
    }

    /// Enqueues terminal input for the active view.
    pub fn post_input(&self, event: Event) {
        self.post(ClientEvent::Input(event));
    }

    /// Enqueues an event. Returns `false` once the run loop has stopped.
    pub fn post(&self, event: ClientEvent) -> bool {
        trace!(?event, "Queueing event");
        match self.tx.send(event) {
            Ok(()) => true,
            Err(mpsc::error::SendError(event)) => {
                debug!(?event, "Event queue closed, dropping request");
                false
            }
        }
    }

    /// Returns whether the drain side has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Drain side of the queue, owned by the run loop.
#[derive(Debug)]
pub struct EventQueue {
    rx: mpsc::UnboundedReceiver<ClientEvent>,
}

impl EventQueue {
    /// Takes every event queued so far, in enqueue order.
    ///
    /// Events posted while the returned batch is being processed wait for the
    /// next drain.
    pub fn drain(&mut self) -> Vec<ClientEvent> {
        let mut batch = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            batch.push(event);
        }
        batch
    }

    /// Stops accepting events and discards everything still queued.
    ///
    /// Returns the number of discarded events.
    pub fn close(&mut self) -> usize {
        self.rx.close();
        let mut discarded = 0;
        while self.rx.try_recv().is_ok() {
            discarded += 1;
        }
        discarded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_requests_are_not_executed_inline() {
        let (queue, mut events) = channel();
        queue.request_view_change(ViewKind::Login);

        let batch = events.drain();
        assert_eq!(batch.len(), 1);
        assert!(events.drain().is_empty());
    }

    #[test]
    fn test_drain_preserves_enqueue_order_across_handles() {
        let (queue, mut events) = channel();
        let network_side = queue.clone();

        queue.request_call("first", CallArgs::new());
        network_side.request_view_change(ViewKind::Message);
        queue.request_call("third", CallArgs::positional([json!(3)]));

        let batch = events.drain();
        assert_eq!(
            batch,
            vec![
                ClientEvent::FunctionCall(FunctionCallRequest::new("first", CallArgs::new())),
                ClientEvent::ViewChange(ViewTransitionRequest::new(ViewKind::Message)),
                ClientEvent::FunctionCall(FunctionCallRequest::new(
                    "third",
                    CallArgs::positional([json!(3)])
                )),
            ]
        );
    }

    #[test]
    fn test_requests_posted_before_first_drain_are_buffered() {
        let (queue, mut events) = channel();
        for i in 0..100 {
            queue.request_call(format!("call-{i}"), CallArgs::new());
        }
        assert_eq!(events.drain().len(), 100);
    }

    #[test]
    fn test_close_discards_pending_and_rejects_new_requests() {
        let (queue, mut events) = channel();
        queue.request_stop();
        queue.request_view_change(ViewKind::Login);

        assert_eq!(events.close(), 2);
        assert!(queue.is_closed());
        assert!(!queue.post(ClientEvent::Quit));
        assert!(events.drain().is_empty());
    }
}
