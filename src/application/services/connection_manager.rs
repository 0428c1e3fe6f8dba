//! Asynchronous connection establishment and credential bookkeeping.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

use crate::application::services::call_registry::callables;
use crate::application::services::deferred_queue::DeferredCallQueue;
use crate::application::services::recovery::RecoveryChain;
use crate::application::services::scheduler::Scheduler;
use crate::domain::credentials::{Credentials, LoginCredentials};
use crate::domain::errors::{ConnectError, CredentialsError};
use crate::domain::events::CallArgs;
use crate::domain::ports::{Connector, ProtocolFactory};

/// Port the game server listens on unless told otherwise.
pub const DEFAULT_PORT: u16 = 11337;

/// Record of one connection attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionAttempt {
    /// Attempt identifier, used to correlate log lines.
    pub id: Uuid,
    /// Requested host.
    pub host: String,
    /// Requested port.
    pub port: u16,
}

/// Running connection attempt.
#[derive(Debug)]
pub struct AttemptHandle {
    attempt: ConnectionAttempt,
    task: JoinHandle<()>,
}

impl AttemptHandle {
    /// Returns the attempt record.
    #[must_use]
    pub const fn attempt(&self) -> &ConnectionAttempt {
        &self.attempt
    }

    /// Waits until the attempt has connected or been handed to recovery.
    ///
    /// Returns `false` if the task panicked or was cancelled.
    pub async fn finished(self) -> bool {
        self.task.await.is_ok()
    }
}

/// Starts connection attempts and routes their outcome.
///
/// Results never touch client state directly: a success hands the socket to
/// the protocol factory and queues `connection_established`, a failure goes
/// through the recovery chain.
pub struct ConnectionManager {
    scheduler: Scheduler,
    connector: Arc<dyn Connector>,
    protocol: Arc<dyn ProtocolFactory>,
    recovery: Arc<RecoveryChain>,
    queue: DeferredCallQueue,
    credentials: Option<Credentials>,
    last_attempt: Option<ConnectionAttempt>,
}

impl ConnectionManager {
    /// Creates manager.
    #[must_use]
    pub fn new(
        scheduler: Scheduler,
        connector: Arc<dyn Connector>,
        protocol: Arc<dyn ProtocolFactory>,
        recovery: RecoveryChain,
        queue: DeferredCallQueue,
    ) -> Self {
        Self {
            scheduler,
            connector,
            protocol,
            recovery: Arc::new(recovery),
            queue,
            credentials: None,
            last_attempt: None,
        }
    }

    /// Stores the credentials and starts connecting to `host:port`.
    ///
    /// # Errors
    /// Returns `InvalidInput` when a parameter is empty or the port is zero.
    /// Nothing is spawned and the stored credentials are kept in that case.
    pub fn connect(
        &mut self,
        host: &str,
        port: u16,
        username: &str,
        password: &str,
    ) -> Result<AttemptHandle, ConnectError> {
        let host = host.trim();
        validate(host, port, username, password)?;

        self.credentials = Some(Credentials::new(username, password));

        let attempt = ConnectionAttempt {
            id: Uuid::new_v4(),
            host: host.to_string(),
            port,
        };
        info!(attempt = %attempt.id, host = %attempt.host, port, "Connecting");
        self.last_attempt = Some(attempt.clone());

        let connector = Arc::clone(&self.connector);
        let protocol = Arc::clone(&self.protocol);
        let recovery = Arc::clone(&self.recovery);
        let queue = self.queue.clone();
        let record = attempt.clone();

        let task = self.scheduler.spawn(async move {
            match connector.connect(&record.host, record.port).await {
                Ok(stream) => {
                    debug!(attempt = %record.id, "Connection established");
                    protocol.attach(stream, &record.host, record.port);
                    queue.request_call(
                        callables::CONNECTION_ESTABLISHED,
                        CallArgs::positional([
                            serde_json::Value::from(record.host.clone()),
                            serde_json::Value::from(record.port),
                        ]),
                    );
                }
                Err(failure) => {
                    debug!(attempt = %record.id, error = %failure, "Connection attempt failed");
                    recovery.recover(&failure, &queue);
                }
            }
        });

        Ok(AttemptHandle { attempt, task })
    }

    /// Returns the username and password digest of the last `connect` call.
    ///
    /// # Errors
    /// Returns `NeverConnected` before the first successful `connect` call.
    pub fn get_credentials(&self) -> Result<LoginCredentials, CredentialsError> {
        self.credentials
            .as_ref()
            .map(Credentials::login)
            .ok_or(CredentialsError::NeverConnected)
    }

    /// Returns the most recent attempt.
    #[must_use]
    pub const fn last_attempt(&self) -> Option<&ConnectionAttempt> {
        self.last_attempt.as_ref()
    }
}

fn validate(host: &str, port: u16, username: &str, password: &str) -> Result<(), ConnectError> {
    if host.is_empty() {
        return Err(ConnectError::invalid_input("server name is empty"));
    }
    if port == 0 {
        return Err(ConnectError::invalid_input("port must be between 1 and 65535"));
    }
    if username.is_empty() {
        return Err(ConnectError::invalid_input("user name is empty"));
    }
    if password.is_empty() {
        return Err(ConnectError::invalid_input("password is empty"));
    }
    Ok(())
}
