//! TCP transport adapters.

mod passive_protocol;
mod tcp_connector;

pub use passive_protocol::PassiveProtocol;
pub use tcp_connector::{CONNECT_TIMEOUT, TcpConnector};
