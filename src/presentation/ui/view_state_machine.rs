//! Owner of the single active view.

use crossterm::event::Event;
use tracing::{debug, trace, warn};

use super::view::{View, ViewContext, ViewRegistry};
use crate::domain::errors::{DispatchError, ViewError};
use crate::domain::events::ViewTransitionRequest;
use crate::domain::view_kind::ViewKind;
use crate::presentation::display::Display;

/// Observable state of the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Before the first transition.
    NoView,
    /// A view of this kind is active.
    HasView(ViewKind),
}

/// Applies transitions and routes input to the active view.
pub struct ViewStateMachine {
    registry: ViewRegistry,
    context: ViewContext,
    active: Option<Box<dyn View>>,
}

impl ViewStateMachine {
    /// Creates machine with no active view.
    #[must_use]
    pub fn new(registry: ViewRegistry, context: ViewContext) -> Self {
        Self {
            registry,
            context,
            active: None,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> ViewState {
        self.active_kind()
            .map_or(ViewState::NoView, ViewState::HasView)
    }

    /// Returns the kind of the active view.
    #[must_use]
    pub fn active_kind(&self) -> Option<ViewKind> {
        self.active.as_ref().map(|view| view.kind())
    }

    /// Replaces the active view with a new view of the requested kind.
    ///
    /// The old view is left before the new one is constructed.
    ///
    /// # Errors
    /// Returns `UnregisteredView` if no constructor exists for the kind; the
    /// active view is kept in that case.
    pub fn apply(&mut self, request: ViewTransitionRequest) -> Result<(), DispatchError> {
        let target = request.target;
        if !self.registry.contains(target) {
            return Err(DispatchError::UnregisteredView { kind: target });
        }

        if let Some(mut old) = self.active.take() {
            debug!(from = %old.kind(), to = %target, "Leaving view");
            old.leave();
        }

        self.active = self.registry.construct(target, &self.context);
        debug!(view = %target, "View installed");
        Ok(())
    }

    /// Forwards `event` to the active view; dropped when there is none.
    ///
    /// # Errors
    /// Returns the view's error.
    pub fn dispatch(&mut self, event: &Event) -> Result<(), ViewError> {
        match self.active.as_mut() {
            Some(view) => view.handle_event(event),
            None => {
                trace!(?event, "No active view, dropping event");
                Ok(())
            }
        }
    }

    /// Updates the active view.
    ///
    /// # Errors
    /// Returns the view's error.
    pub fn update(&mut self) -> Result<(), ViewError> {
        self.active.as_mut().map_or(Ok(()), |view| view.update())
    }

    /// Draws the active view onto `display`.
    ///
    /// # Errors
    /// Returns the view's or the display's error.
    pub fn render(&mut self, display: &mut dyn Display) -> Result<(), ViewError> {
        match self.active.as_deref_mut() {
            Some(view) => display.draw(view),
            None => Ok(()),
        }
    }

    /// Shows an error on the active view.
    pub fn error_message(&mut self, message: &str) {
        match self.active.as_mut() {
            Some(view) => view.error_message(message),
            None => warn!(%message, "Error message with no active view"),
        }
    }

    /// Shows a status line on the active view.
    pub fn status_message(&mut self, message: &str) {
        match self.active.as_mut() {
            Some(view) => view.status_message(message),
            None => debug!(%message, "Status message with no active view"),
        }
    }
}
