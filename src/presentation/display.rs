//! Drawing surface for the active view.

use std::io::{self, Stdout};

use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend, TestBackend};
use ratatui::layout::{Rect, Size};
use ratatui::widgets::Clear;
use tracing::debug;

use crate::domain::errors::ViewError;
use crate::presentation::ui::View;

/// Surface the run loop renders onto.
pub trait Display {
    /// Returns the drawable size.
    fn size(&self) -> Size;

    /// Clears the surface and renders `view`.
    ///
    /// # Errors
    /// Returns error if the view or the backend fails.
    fn draw(&mut self, view: &mut dyn View) -> Result<(), ViewError>;

    /// Releases the surface. Later draws are no-ops.
    fn release(&mut self);
}

/// Ratatui terminal limited to a requested size.
pub struct TerminalDisplay<B: Backend> {
    terminal: Option<Terminal<B>>,
    size: Size,
    restore_on_release: bool,
}

impl TerminalDisplay<CrosstermBackend<Stdout>> {
    /// Takes over the terminal.
    ///
    /// The requested size is clamped to the real terminal size.
    ///
    /// # Errors
    /// Returns IO error if the terminal cannot be initialised.
    pub fn init(width: u16, height: u16) -> io::Result<Self> {
        let terminal = ratatui::try_init()?;
        let available = terminal.size()?;
        let size = Size::new(width.min(available.width), height.min(available.height));
        debug!(width = size.width, height = size.height, "Terminal display ready");

        Ok(Self {
            terminal: Some(terminal),
            size,
            restore_on_release: true,
        })
    }
}

impl TerminalDisplay<TestBackend> {
    /// Off-screen display of `width` x `height` cells.
    ///
    /// # Errors
    /// Returns IO error if the backend cannot be created.
    pub fn headless(width: u16, height: u16) -> io::Result<Self> {
        let terminal = Terminal::new(TestBackend::new(width, height))
            .map_err(|e| io::Error::other(e.to_string()))?;

        Ok(Self {
            terminal: Some(terminal),
            size: Size::new(width, height),
            restore_on_release: false,
        })
    }
}

impl<B: Backend> TerminalDisplay<B> {
    /// Returns the backend until the display is released.
    #[must_use]
    pub fn backend(&self) -> Option<&B> {
        self.terminal.as_ref().map(Terminal::backend)
    }

    /// Returns whether the display has been released.
    #[must_use]
    pub const fn is_released(&self) -> bool {
        self.terminal.is_none()
    }
}

impl<B: Backend> Display for TerminalDisplay<B> {
    fn size(&self) -> Size {
        self.size
    }

    fn draw(&mut self, view: &mut dyn View) -> Result<(), ViewError> {
        let Some(terminal) = self.terminal.as_mut() else {
            return Ok(());
        };

        let size = self.size;
        let mut outcome = Ok(());
        terminal
            .draw(|frame| {
                let full = frame.area();
                frame.render_widget(Clear, full);
                let area = Rect::new(
                    full.x,
                    full.y,
                    size.width.min(full.width),
                    size.height.min(full.height),
                );
                outcome = view.render(frame, area);
            })
            .map_err(|e| ViewError::render(e.to_string()))?;
        outcome
    }

    fn release(&mut self) {
        if self.terminal.take().is_some() && self.restore_on_release {
            ratatui::restore();
            debug!("Terminal restored");
        }
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::domain::view_kind::ViewKind;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Display that records draws without rendering; clones share the record.
    #[derive(Clone, Default)]
    pub struct RecordingDisplay {
        drawn: Arc<Mutex<Vec<ViewKind>>>,
        releases: Arc<AtomicUsize>,
    }

    impl RecordingDisplay {
        /// Returns the kinds drawn, in order.
        pub fn drawn(&self) -> Vec<ViewKind> {
            self.drawn.lock().clone()
        }

        /// Returns how many times `release` was called.
        pub fn release_count(&self) -> usize {
            self.releases.load(Ordering::SeqCst)
        }
    }

    impl Display for RecordingDisplay {
        fn size(&self) -> Size {
            Size::new(80, 24)
        }

        fn draw(&mut self, view: &mut dyn View) -> Result<(), ViewError> {
            self.drawn.lock().push(view.kind());
            Ok(())
        }

        fn release(&mut self) {
            self.releases.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::view_kind::ViewKind;
    use crossterm::event::Event;
    use ratatui::Frame;
    use ratatui::widgets::Paragraph;

    struct Banner {
        area: Option<Rect>,
        fail: bool,
    }

    impl View for Banner {
        fn kind(&self) -> ViewKind {
            ViewKind::Message
        }

        fn handle_event(&mut self, _event: &Event) -> Result<(), ViewError> {
            Ok(())
        }

        fn render(&mut self, frame: &mut Frame, area: Rect) -> Result<(), ViewError> {
            self.area = Some(area);
            if self.fail {
                return Err(ViewError::render("broken"));
            }
            frame.render_widget(Paragraph::new("hello"), area);
            Ok(())
        }

        fn error_message(&mut self, _message: &str) {}
    }

    #[test]
    fn test_headless_draw_renders_view() {
        let mut display = TerminalDisplay::headless(20, 3).unwrap();
        let mut view = Banner { area: None, fail: false };

        display.draw(&mut view).unwrap();

        assert_eq!(view.area, Some(Rect::new(0, 0, 20, 3)));
        let buffer = display.backend().unwrap().buffer();
        assert_eq!(buffer[(0, 0)].symbol(), "h");
    }

    #[test]
    fn test_view_render_error_is_returned() {
        let mut display = TerminalDisplay::headless(10, 2).unwrap();
        let mut view = Banner { area: None, fail: true };

        assert!(matches!(display.draw(&mut view), Err(ViewError::Render { .. })));
    }

    #[test]
    fn test_release_is_idempotent_and_stops_drawing() {
        let mut display = TerminalDisplay::headless(10, 2).unwrap();
        display.release();
        display.release();

        let mut view = Banner { area: None, fail: false };
        display.draw(&mut view).unwrap();

        assert!(display.is_released());
        assert!(view.area.is_none());
    }
}
