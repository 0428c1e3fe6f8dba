//! Full-screen notice.

use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::view::{View, ViewContext};
use crate::domain::errors::ViewError;
use crate::domain::view_kind::ViewKind;
use crate::presentation::events::EventHandler;

/// Shows one message; Enter returns to the login view.
pub struct MessageView {
    context: ViewContext,
    message: String,
    is_error: bool,
}

impl MessageView {
    /// Creates view with an empty message.
    #[must_use]
    pub fn new(context: &ViewContext) -> Self {
        Self {
            context: context.clone(),
            message: String::new(),
            is_error: false,
        }
    }

    /// Returns the displayed message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl View for MessageView {
    fn kind(&self) -> ViewKind {
        ViewKind::Message
    }

    fn handle_event(&mut self, event: &Event) -> Result<(), ViewError> {
        let Some(key) = EventHandler::pressed_key(event) else {
            return Ok(());
        };
        if EventHandler::is_submit_event(key) {
            self.context.queue.request_view_change(ViewKind::Login);
        } else if key.code == KeyCode::Esc {
            self.context.queue.request_stop();
        }
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) -> Result<(), ViewError> {
        let [_, center, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(7),
            Constraint::Fill(1),
        ])
        .areas(area);

        let t = |text: &str| self.context.translator.translate(text);
        let color = if self.is_error { Color::Red } else { Color::Cyan };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(format!(" {} ", t("Enter: Back | Esc: Quit")));

        let paragraph = Paragraph::new(self.message.as_str())
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, center);
        Ok(())
    }

    fn error_message(&mut self, message: &str) {
        self.message = message.to_string();
        self.is_error = true;
    }

    fn status_message(&mut self, message: &str) {
        self.message = message.to_string();
        self.is_error = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::{EventQueue, deferred_queue};
    use crate::domain::events::{ClientEvent, ViewTransitionRequest};
    use crate::domain::ports::mocks::{MockAudio, MockConfigurator, MockTranslator};
    use crate::presentation::display::{Display, TerminalDisplay};
    use crate::presentation::events::mock::key;
    use std::sync::Arc;

    fn view() -> (MessageView, EventQueue) {
        let (queue, events) = deferred_queue::channel();
        let context = ViewContext {
            queue,
            translator: Arc::new(MockTranslator::new()),
            audio: Arc::new(MockAudio::new()),
            settings: Arc::new(MockConfigurator::new()),
            accessibility: false,
        };
        (MessageView::new(&context), events)
    }

    #[test]
    fn test_enter_returns_to_login() {
        let (mut view, mut events) = view();

        view.handle_event(&key(KeyCode::Enter)).unwrap();

        assert_eq!(
            events.drain(),
            vec![ClientEvent::ViewChange(ViewTransitionRequest::new(ViewKind::Login))]
        );
    }

    #[test]
    fn test_latest_message_wins() {
        let (mut view, _events) = view();
        view.error_message("Connection lost");
        view.status_message("Reconnecting");

        assert_eq!(view.message(), "Reconnecting");
    }

    #[test]
    fn test_render_shows_message() {
        let (mut view, _events) = view();
        view.error_message("server went away");
        let mut display = TerminalDisplay::headless(40, 9).unwrap();

        display.draw(&mut view).unwrap();

        let text: String = display
            .backend()
            .unwrap()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("server went away"));
    }
}
