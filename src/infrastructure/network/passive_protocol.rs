//! Protocol factory that holds the connection open.

use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;
use tracing::{debug, trace};

use crate::application::services::{DeferredCallQueue, Scheduler, callables};
use crate::domain::events::CallArgs;
use crate::domain::ports::ProtocolFactory;

const READ_BUFFER: usize = 4096;

/// [`ProtocolFactory`] that keeps the socket open and reports when it closes.
///
/// Incoming bytes are read and discarded. On EOF or a read error a
/// `connection_lost` call is queued with the reason.
#[derive(Debug, Clone)]
pub struct PassiveProtocol {
    scheduler: Scheduler,
    queue: DeferredCallQueue,
}

impl PassiveProtocol {
    /// Creates factory.
    #[must_use]
    pub const fn new(scheduler: Scheduler, queue: DeferredCallQueue) -> Self {
        Self { scheduler, queue }
    }
}

impl ProtocolFactory for PassiveProtocol {
    fn attach(&self, mut stream: TcpStream, host: &str, port: u16) {
        let queue = self.queue.clone();
        let peer = format!("{host}:{port}");

        self.scheduler.spawn(async move {
            let mut buffer = [0u8; READ_BUFFER];
            let reason = loop {
                match stream.read(&mut buffer).await {
                    Ok(0) => break "connection closed by server".to_string(),
                    Ok(n) => trace!(%peer, bytes = n, "Received data"),
                    Err(e) => break e.to_string(),
                }
            };
            debug!(%peer, %reason, "Connection lost");
            queue.request_call(
                callables::CONNECTION_LOST,
                CallArgs::positional([reason]).with_named(callables::PEER_ARG, peer),
            );
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::deferred_queue;
    use crate::domain::events::{ClientEvent, FunctionCallRequest};
    use std::time::Duration;
    use tokio::io::AsyncWriteExt;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_server_close_queues_connection_lost() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let client = TcpStream::connect(addr).await.unwrap();
        let (mut server, _) = listener.accept().await.unwrap();

        let (queue, mut events) = deferred_queue::channel();
        let protocol = PassiveProtocol::new(Scheduler::try_current().unwrap(), queue);
        protocol.attach(client, "localhost", addr.port());

        server.write_all(b"hello").await.unwrap();
        drop(server);

        let mut received = Vec::new();
        for _ in 0..100 {
            received.extend(events.drain());
            if !received.is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        assert_eq!(
            received,
            vec![ClientEvent::FunctionCall(FunctionCallRequest::new(
                callables::CONNECTION_LOST,
                CallArgs::positional(["connection closed by server"])
                    .with_named(callables::PEER_ARG, format!("localhost:{}", addr.port())),
            ))]
        );
    }
}
