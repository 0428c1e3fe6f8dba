//! Terminal input.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Source of pending terminal events.
pub trait InputSource {
    /// Returns the events available right now without blocking.
    ///
    /// # Errors
    /// Returns IO error if polling fails.
    fn poll_batch(&mut self) -> io::Result<Vec<Event>>;
}

/// Non-blocking crossterm poller.
pub struct TerminalInput {
    max_batch: usize,
}

impl TerminalInput {
    const DEFAULT_MAX_BATCH: usize = 64;

    /// Creates poller with the default batch bound.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_batch: Self::DEFAULT_MAX_BATCH,
        }
    }

    /// Creates poller reading at most `max_batch` events per tick.
    #[must_use]
    pub fn with_max_batch(max_batch: usize) -> Self {
        Self {
            max_batch: max_batch.max(1),
        }
    }
}

impl Default for TerminalInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for TerminalInput {
    fn poll_batch(&mut self) -> io::Result<Vec<Event>> {
        let mut batch = Vec::new();
        while batch.len() < self.max_batch && event::poll(Duration::ZERO)? {
            batch.push(event::read()?);
        }
        Ok(batch)
    }
}

/// Key classification helpers.
pub struct EventHandler;

impl EventHandler {
    /// Checks if key is the stop signal (Ctrl+C or Ctrl+Q).
    #[must_use]
    pub fn is_quit_event(key: &KeyEvent) -> bool {
        key.kind != KeyEventKind::Release
            && key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c' | 'q'))
    }

    /// Checks if key is a submit event.
    #[must_use]
    pub fn is_submit_event(key: &KeyEvent) -> bool {
        matches!(
            key,
            KeyEvent {
                code: KeyCode::Enter,
                ..
            }
        )
    }

    /// Returns the key of a press or repeat event.
    #[must_use]
    pub fn pressed_key(event: &Event) -> Option<&KeyEvent> {
        match event {
            Event::Key(key) if !matches!(key.kind, KeyEventKind::Release) => Some(key),
            _ => None,
        }
    }
}
