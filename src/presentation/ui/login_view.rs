//! Login view.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::view::{View, ViewContext};
use crate::application::services::{DEFAULT_PORT, callables};
use crate::domain::errors::ViewError;
use crate::domain::events::CallArgs;
use crate::domain::ports::{Sound, keys};
use crate::domain::view_kind::ViewKind;
use crate::presentation::events::EventHandler;
use crate::presentation::widgets::TextInput;

/// Login form state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginState {
    /// Editing fields.
    Input,
    /// Connect request sent.
    Connecting,
    /// Showing an error until the next key.
    Error,
}

const SERVER: usize = 0;
const PORT: usize = 1;
const USER: usize = 2;
const PASSWORD: usize = 3;

/// Server and account entry.
pub struct LoginView {
    context: ViewContext,
    fields: [TextInput; 4],
    focus: usize,
    state: LoginState,
    message: Option<String>,
}

impl LoginView {
    /// Creates the view, pre-filled from the remembered settings.
    #[must_use]
    pub fn new(context: &ViewContext) -> Self {
        let t = |text: &str| context.translator.translate(text);
        let settings = &context.settings;

        let mut server = TextInput::new(t("Server")).placeholder("localhost");
        let mut port = TextInput::new(t("Port"));
        let mut user = TextInput::new(t("User name"));
        let password = TextInput::new(t("Password")).password();

        server.set_value(settings.get(keys::SERVER_NAME).unwrap_or_default());
        port.set_value(
            settings
                .get(keys::SERVER_PORT)
                .unwrap_or_else(|| DEFAULT_PORT.to_string()),
        );
        user.set_value(settings.get(keys::LOGIN_NAME).unwrap_or_default());

        let mut view = Self {
            context: context.clone(),
            fields: [server, port, user, password],
            focus: SERVER,
            state: LoginState::Input,
            message: None,
        };
        let first_empty = view
            .fields
            .iter()
            .position(|field| field.value().is_empty())
            .unwrap_or(SERVER);
        view.set_focus(first_empty);
        view
    }

    /// Returns current state.
    #[must_use]
    pub const fn state(&self) -> LoginState {
        self.state
    }

    /// Returns the focused field index.
    #[must_use]
    pub const fn focus(&self) -> usize {
        self.focus
    }

    /// Returns the value of the field at `index`.
    #[must_use]
    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map_or("", TextInput::value)
    }

    fn set_focus(&mut self, index: usize) {
        self.fields[self.focus].set_focused(false);
        self.focus = index % self.fields.len();
        self.fields[self.focus].set_focused(true);

        if self.context.accessibility {
            let label = self.fields[self.focus].label().to_string();
            self.message = Some(label);
        }
    }

    fn submit(&mut self) {
        self.state = LoginState::Connecting;
        self.message = None;
        self.context.audio.play(Sound::ButtonDown);
        self.context.queue.request_call(
            callables::CONNECT,
            CallArgs::positional([
                self.value(SERVER).trim(),
                self.value(PORT).trim(),
                self.value(USER),
                self.value(PASSWORD),
            ]),
        );
    }

    /// Editing a field re-enables submit after an attempt that never reported back.
    fn resume_editing(&mut self) {
        if self.state == LoginState::Connecting {
            self.state = LoginState::Input;
            self.message = None;
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) {
        if self.state == LoginState::Error {
            self.state = LoginState::Input;
            self.message = None;
        }

        if EventHandler::is_submit_event(key) {
            if self.state != LoginState::Connecting {
                self.submit();
            }
            return;
        }

        match key.code {
            KeyCode::Esc => self.context.queue.request_stop(),
            KeyCode::Tab | KeyCode::Down => {
                self.context.audio.play(Sound::Cursor);
                self.set_focus(self.focus + 1);
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.context.audio.play(Sound::Cursor);
                self.set_focus(self.focus + self.fields.len() - 1);
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.resume_editing();
                self.fields[self.focus].input_char(c);
                self.context.audio.play(Sound::Tap);
            }
            KeyCode::Backspace => {
                self.resume_editing();
                if self.fields[self.focus].backspace() {
                    self.context.audio.play(Sound::TapDelete);
                }
            }
            KeyCode::Delete => {
                self.resume_editing();
                if self.fields[self.focus].delete() {
                    self.context.audio.play(Sound::TapDelete);
                }
            }
            KeyCode::Left => self.fields[self.focus].move_left(),
            KeyCode::Right => self.fields[self.focus].move_right(),
            KeyCode::Home => self.fields[self.focus].move_start(),
            KeyCode::End => self.fields[self.focus].move_end(),
            _ => {}
        }
    }

    fn status_line(&self) -> Line<'static> {
        let t = |text: &str| self.context.translator.translate(text);

        match (self.state, self.message.clone()) {
            (LoginState::Error, message) => Line::from(Span::styled(
                message.unwrap_or_else(|| t("Unknown error")),
                Style::default().fg(Color::Red),
            )),
            (LoginState::Connecting, Some(message)) => Line::from(Span::styled(
                message,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            )),
            (_, Some(message)) => Line::from(Span::raw(message)),
            (_, None) => Line::from(vec![
                Span::styled(t("Enter: Connect"), Style::default().fg(Color::DarkGray)),
                Span::raw(" | "),
                Span::styled(t("Tab: Next field"), Style::default().fg(Color::DarkGray)),
                Span::raw(" | "),
                Span::styled(t("Esc: Quit"), Style::default().fg(Color::DarkGray)),
            ]),
        }
    }
}

impl View for LoginView {
    fn kind(&self) -> ViewKind {
        ViewKind::Login
    }

    fn leave(&mut self) {
        self.context.audio.play(Sound::SurfaceSwitch);
    }

    fn handle_event(&mut self, event: &Event) -> Result<(), ViewError> {
        if let Some(key) = EventHandler::pressed_key(event) {
            self.handle_key(key);
        }
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) -> Result<(), ViewError> {
        let vertical = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(18),
            Constraint::Fill(1),
        ]);
        let [_, center, _] = vertical.areas(area);

        let horizontal = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Min(50),
            Constraint::Fill(1),
        ]);
        let [_, content_area, _] = horizontal.areas(center);

        frame.render_widget(Clear, content_area);

        let title = format!(" {} ", self.context.translator.translate("Cards Against Humanity"));
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(title);

        let inner = block.inner(content_area);
        frame.render_widget(block, content_area);

        let [server, port, user, password, _, status] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        for (field, field_area) in self.fields.iter().zip([server, port, user, password]) {
            frame.render_widget(field, field_area);
        }
        frame.render_widget(Paragraph::new(self.status_line()), status);
        Ok(())
    }

    fn error_message(&mut self, message: &str) {
        self.state = LoginState::Error;
        self.message = Some(message.to_string());
    }

    fn status_message(&mut self, message: &str) {
        if self.state == LoginState::Error {
            self.state = LoginState::Input;
        }
        self.message = Some(message.to_string());
    }
}
