//! Fixed-rate tick sharing the runtime with network tasks.

use std::time::Duration;

use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, error, info, warn};

use super::calls::ClientState;
use crate::application::services::{CallRegistry, EventQueue, Scheduler};
use crate::domain::errors::ClientError;
use crate::domain::events::ClientEvent;
use crate::domain::ports::Sound;
use crate::presentation::display::Display;
use crate::presentation::events::{EventHandler, InputSource};

/// Default ticks per second.
pub const DEFAULT_TICK_RATE_HZ: u32 = 30;

/// Everything the run loop owns.
pub struct RunLoopParts {
    /// Tick-owned client state.
    pub state: ClientState,
    /// Startup callables.
    pub calls: CallRegistry<ClientState>,
    /// Drain side of the deferred queue.
    pub events: EventQueue,
    /// Terminal input.
    pub input: Box<dyn InputSource>,
    /// Render target.
    pub display: Box<dyn Display>,
    /// Runtime running network tasks; halted on stop.
    pub scheduler: Scheduler,
    /// Ticks per second.
    pub tick_rate_hz: u32,
}

/// Drives input, deferred requests, update and render once per tick.
pub struct RunLoop {
    state: ClientState,
    calls: CallRegistry<ClientState>,
    events: EventQueue,
    input: Box<dyn InputSource>,
    display: Box<dyn Display>,
    scheduler: Scheduler,
    tick_rate_hz: u32,
    running: bool,
    stopped: bool,
}

impl RunLoop {
    /// Creates loop; nothing runs until [`RunLoop::run`].
    #[must_use]
    pub fn new(parts: RunLoopParts) -> Self {
        Self {
            state: parts.state,
            calls: parts.calls,
            events: parts.events,
            input: parts.input,
            display: parts.display,
            scheduler: parts.scheduler,
            tick_rate_hz: parts.tick_rate_hz.max(1),
            running: false,
            stopped: false,
        }
    }

    /// Returns whether the loop is ticking.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Returns the tick rate.
    #[must_use]
    pub const fn tick_rate_hz(&self) -> u32 {
        self.tick_rate_hz
    }

    /// Returns the client state.
    #[must_use]
    pub const fn state(&self) -> &ClientState {
        &self.state
    }

    /// Plays the start sound and ticks until stopped.
    ///
    /// # Errors
    /// Returns the first fatal error, after tearing down.
    pub async fn run(&mut self) -> Result<(), ClientError> {
        if self.stopped {
            return Ok(());
        }

        self.running = true;
        self.state.audio.play(Sound::Start);
        let size = self.display.size();
        info!(
            tick_rate_hz = self.tick_rate_hz,
            width = size.width,
            height = size.height,
            "Run loop started"
        );

        let mut ticker = interval(Duration::from_secs(1) / self.tick_rate_hz);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        while self.running {
            ticker.tick().await;
            if let Err(e) = self.tick() {
                error!(error = %e, "Fatal error in run loop");
                self.stop();
                return Err(e);
            }
        }

        Ok(())
    }

    /// Runs one tick.
    ///
    /// # Errors
    /// Returns error if input polling, a view, or the display fails.
    pub fn tick(&mut self) -> Result<(), ClientError> {
        for event in self.input.poll_batch().map_err(ClientError::Input)? {
            match EventHandler::pressed_key(&event) {
                Some(key) if EventHandler::is_quit_event(key) => self.state.queue.request_stop(),
                _ => self.state.queue.post_input(event),
            }
        }

        for event in self.events.drain() {
            match event {
                ClientEvent::Quit => {
                    self.stop();
                    return Ok(());
                }
                ClientEvent::ViewChange(request) => {
                    if let Err(e) = self.state.views.apply(request) {
                        warn!(error = %e, "View change rejected");
                    }
                }
                ClientEvent::FunctionCall(request) => {
                    if let Err(e) = self.calls.invoke(&mut self.state, &request) {
                        warn!(callable = %request.callable, error = %e, "Deferred call failed");
                    }
                    if self.state.take_quit_request() {
                        self.stop();
                        return Ok(());
                    }
                }
                ClientEvent::Input(input) => self.state.views.dispatch(&input)?,
            }
        }

        self.state.views.update()?;
        self.state.views.render(self.display.as_mut())?;
        Ok(())
    }

    /// Stops ticking, halts network tasks and releases every collaborator.
    ///
    /// Requests still queued are discarded. Calling `stop` again is a no-op.
    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        self.running = false;

        self.state.audio.release();
        self.display.release();
        self.scheduler.shutdown();
        if let Err(e) = self.state.settings.save() {
            warn!(error = %e, "Failed to save client settings");
        }
        self.state.translator.close();

        let discarded = self.events.close();
        if discarded > 0 {
            debug!(discarded, "Discarded queued requests");
        }
        info!("Run loop stopped");
    }
}
