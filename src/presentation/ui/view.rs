//! Screen abstraction and the startup registry of screen constructors.

use std::collections::HashMap;
use std::sync::Arc;

use crossterm::event::Event;
use ratatui::Frame;
use ratatui::layout::Rect;
use tracing::warn;

use crate::application::services::DeferredCallQueue;
use crate::domain::errors::ViewError;
use crate::domain::ports::{AudioPort, ConfiguratorPort, TranslatorPort};
use crate::domain::view_kind::ViewKind;

/// Active screen of the client.
pub trait View {
    /// Kind this view was constructed for.
    fn kind(&self) -> ViewKind;

    /// Called once before the view is replaced.
    fn leave(&mut self) {}

    /// Handles one terminal event.
    ///
    /// # Errors
    /// Returns error if the view cannot process the event.
    fn handle_event(&mut self, event: &Event) -> Result<(), ViewError>;

    /// Advances per-tick state.
    ///
    /// # Errors
    /// Returns error if the view cannot update.
    fn update(&mut self) -> Result<(), ViewError> {
        Ok(())
    }

    /// Draws the view into `area`.
    ///
    /// # Errors
    /// Returns error if rendering fails.
    fn render(&mut self, frame: &mut Frame, area: Rect) -> Result<(), ViewError>;

    /// Shows an error to the user.
    fn error_message(&mut self, message: &str);

    /// Shows a status line.
    fn status_message(&mut self, _message: &str) {}
}

/// Collaborators handed to view constructors.
#[derive(Clone)]
pub struct ViewContext {
    /// Deferred request handle.
    pub queue: DeferredCallQueue,
    /// Text translation.
    pub translator: Arc<dyn TranslatorPort>,
    /// Sound cues.
    pub audio: Arc<dyn AudioPort>,
    /// Persisted settings.
    pub settings: Arc<dyn ConfiguratorPort>,
    /// Screen-reader friendly output.
    pub accessibility: bool,
}

type ViewConstructor = Box<dyn Fn(&ViewContext) -> Box<dyn View>>;

/// Maps view kinds to constructors; populated once at startup.
#[derive(Default)]
pub struct ViewRegistry {
    constructors: HashMap<ViewKind, ViewConstructor>,
}

impl ViewRegistry {
    /// Creates empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the constructor for `kind`.
    #[must_use]
    pub fn with<F>(mut self, kind: ViewKind, constructor: F) -> Self
    where
        F: Fn(&ViewContext) -> Box<dyn View> + 'static,
    {
        if self.constructors.insert(kind, Box::new(constructor)).is_some() {
            warn!(%kind, "Replacing view constructor");
        }
        self
    }

    /// Returns whether `kind` can be constructed.
    #[must_use]
    pub fn contains(&self, kind: ViewKind) -> bool {
        self.constructors.contains_key(&kind)
    }

    /// Constructs a view of `kind`.
    #[must_use]
    pub fn construct(&self, kind: ViewKind, context: &ViewContext) -> Option<Box<dyn View>> {
        self.constructors.get(&kind).map(|constructor| constructor(context))
    }
}
