//! Outbound connection ports.

use async_trait::async_trait;
use tokio::net::TcpStream;

use crate::domain::errors::ConnectError;

/// Opens TCP connections and classifies failures.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Resolves `host` and connects to `port`.
    async fn connect(&self, host: &str, port: u16) -> Result<TcpStream, ConnectError>;
}

/// Receives sockets once a connection is established.
///
/// Implementations speak the application protocol; the runtime only hands
/// the socket over.
#[cfg_attr(test, mockall::automock)]
pub trait ProtocolFactory: Send + Sync {
    /// Takes ownership of the connected socket.
    fn attach(&self, stream: TcpStream, host: &str, port: u16);
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::net::SocketAddr;

    /// Connector with a fixed outcome.
    pub enum MockConnector {
        /// Fails every attempt with this error.
        Fail(ConnectError),
        /// Connects to this local address regardless of the requested host.
        Redirect(SocketAddr),
    }

    #[async_trait]
    impl Connector for MockConnector {
        async fn connect(&self, host: &str, port: u16) -> Result<TcpStream, ConnectError> {
            match self {
                Self::Fail(error) => Err(error.clone()),
                Self::Redirect(addr) => TcpStream::connect(addr)
                    .await
                    .map_err(|e| ConnectError::from_io(host, port, &e)),
            }
        }
    }
}
