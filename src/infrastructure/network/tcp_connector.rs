//! Outbound TCP connector with failure classification.

use std::io;
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::{TcpStream, lookup_host};
use tokio::time::timeout;
use tracing::{debug, trace};

use crate::domain::errors::ConnectError;
use crate::domain::ports::Connector;

/// Upper bound on name resolution plus connect.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// [`Connector`] over `tokio::net`.
///
/// Resolution failures are reported as DNS lookup errors; each resolved
/// address is tried in turn and the last failure is returned.
#[derive(Debug, Clone)]
pub struct TcpConnector {
    timeout: Duration,
}

impl TcpConnector {
    /// Creates connector with the default timeout.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timeout: CONNECT_TIMEOUT,
        }
    }

    /// Overrides the connect timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn connect_internal(host: &str, port: u16) -> Result<TcpStream, ConnectError> {
        let addrs = lookup_host((host, port))
            .await
            .map_err(|e| ConnectError::dns_lookup(host, e.to_string()))?;

        let mut last_error = None;
        for addr in addrs {
            trace!(%addr, "Trying address");
            match TcpStream::connect(addr).await {
                Ok(stream) => {
                    debug!(%addr, "TCP connection open");
                    return Ok(stream);
                }
                Err(e) => last_error = Some(e),
            }
        }

        Err(match last_error {
            Some(e) => ConnectError::from_io(host, port, &e),
            None => ConnectError::dns_lookup(host, "no addresses found"),
        })
    }
}

impl Default for TcpConnector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Connector for TcpConnector {
    async fn connect(&self, host: &str, port: u16) -> Result<TcpStream, ConnectError> {
        timeout(self.timeout, Self::connect_internal(host, port))
            .await
            .map_err(|_| ConnectError::from_io(host, port, &io::Error::from(io::ErrorKind::TimedOut)))?
    }
}
