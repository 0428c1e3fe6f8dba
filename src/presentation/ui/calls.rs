//! Callables every client registers at startup.

use std::sync::Arc;

use tracing::{info, warn};

use super::view_state_machine::ViewStateMachine;
use crate::application::services::{
    CallRegistry, CallResult, ConnectionManager, DeferredCallQueue, callables,
};
use crate::domain::errors::{ConnectError, DispatchError};
use crate::domain::events::{CallArgs, ViewTransitionRequest};
use crate::domain::ports::{AudioPort, ConfiguratorPort, Sound, TranslatorPort, keys};
use crate::domain::view_kind::ViewKind;

/// State owned by the tick and handed to callables.
pub struct ClientState {
    /// Active view.
    pub views: ViewStateMachine,
    /// Connection attempts and credentials.
    pub connection: ConnectionManager,
    /// Persisted settings.
    pub settings: Arc<dyn ConfiguratorPort>,
    /// Text translation.
    pub translator: Arc<dyn TranslatorPort>,
    /// Sound cues.
    pub audio: Arc<dyn AudioPort>,
    /// Deferred request handle.
    pub queue: DeferredCallQueue,
    quit_requested: bool,
}

impl ClientState {
    /// Creates state.
    #[must_use]
    pub fn new(
        views: ViewStateMachine,
        connection: ConnectionManager,
        settings: Arc<dyn ConfiguratorPort>,
        translator: Arc<dyn TranslatorPort>,
        audio: Arc<dyn AudioPort>,
        queue: DeferredCallQueue,
    ) -> Self {
        Self {
            views,
            connection,
            settings,
            translator,
            audio,
            queue,
            quit_requested: false,
        }
    }

    /// Asks the run loop to stop after the current callable.
    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    /// Returns and clears a pending quit request.
    pub fn take_quit_request(&mut self) -> bool {
        std::mem::take(&mut self.quit_requested)
    }

    fn translate(&self, text: &str) -> String {
        self.translator.translate(text)
    }
}

/// Registry holding every built-in callable.
#[must_use]
pub fn builtin_registry() -> CallRegistry<ClientState> {
    let mut registry = CallRegistry::new();
    registry
        .register(callables::CONNECT, connect)
        .register(callables::ERROR_MESSAGE, error_message)
        .register(callables::STATUS_MESSAGE, status_message)
        .register(callables::CONNECTION_ESTABLISHED, connection_established)
        .register(callables::CONNECTION_LOST, connection_lost)
        .register(callables::QUIT, |state: &mut ClientState, _: &CallArgs| {
            state.request_quit();
            Ok(())
        });
    registry
}

fn connect(state: &mut ClientState, args: &CallArgs) -> CallResult {
    let name = callables::CONNECT;
    let host = args.str_at(name, 0)?;
    let port = args.port_at(name, 1)?;
    let username = args.str_at(name, 2)?;
    let password = args.str_at(name, 3)?;

    match state.connection.connect(host, port, username, password) {
        Ok(handle) => {
            let attempt = handle.attempt();
            state.settings.set(keys::SERVER_NAME, &attempt.host);
            state.settings.set(keys::SERVER_PORT, &attempt.port.to_string());
            state.settings.set(keys::LOGIN_NAME, username);

            let status = state
                .translate("Connecting to {server}...")
                .replace("{server}", &format!("{}:{}", attempt.host, attempt.port));
            state.views.status_message(&status);
            Ok(())
        }
        Err(e @ ConnectError::InvalidInput { .. }) => {
            state.audio.play(Sound::Error);
            state.views.error_message(&e.to_string());
            Ok(())
        }
        Err(e) => Err(DispatchError::call_failed(name, e.to_string())),
    }
}

fn error_message(state: &mut ClientState, args: &CallArgs) -> CallResult {
    let message = args.str_at(callables::ERROR_MESSAGE, 0)?;
    state.audio.play(Sound::Error);
    state.views.error_message(message);
    Ok(())
}

fn status_message(state: &mut ClientState, args: &CallArgs) -> CallResult {
    let message = args.str_at(callables::STATUS_MESSAGE, 0)?;
    state.views.status_message(message);
    Ok(())
}

fn connection_established(state: &mut ClientState, args: &CallArgs) -> CallResult {
    let name = callables::CONNECTION_ESTABLISHED;
    let host = args.str_at(name, 0)?;
    let port = args.port_at(name, 1)?;

    match state.connection.get_credentials() {
        Ok(login) => info!(host, port, user = %login.username, "Connected"),
        Err(e) => warn!(host, port, error = %e, "Connected without credentials"),
    }

    state.audio.play(Sound::Connect);
    let status = state
        .translate("Connected to {server}")
        .replace("{server}", &format!("{host}:{port}"));
    state.views.status_message(&status);
    Ok(())
}

fn connection_lost(state: &mut ClientState, args: &CallArgs) -> CallResult {
    let reason = args.str_at(callables::CONNECTION_LOST, 0)?;
    let peer = args.named_str(callables::PEER_ARG).unwrap_or("server");
    info!(%reason, peer, "Connection lost");

    state
        .views
        .apply(ViewTransitionRequest::new(ViewKind::Message))?;
    let message = state
        .translate("Connection lost: {reason}")
        .replace("{reason}", reason);
    state.views.error_message(&message);
    Ok(())
}
