//! # Storefront Server
//!
//! TCP listener and accept loop. Each accepted connection gets its own
//! session task; the server itself holds no state beyond the listener.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::info;

use crate::error::{StoreError, StoreResult};
use crate::session;
use crate::store::StoreHandle;

/// The storefront TCP server.
pub struct Server {
    listener: TcpListener,
    outbox_capacity: usize,
}

impl Server {
    /// Binds the listening socket. Failure here is the one fatal startup
    /// condition: the caller is expected to abort the process.
    pub async fn bind(addr: &str, outbox_capacity: usize) -> StoreResult<Server> {
        let listener = TcpListener::bind(addr).await.map_err(|source| StoreError::Bind {
            addr: addr.to_string(),
            source,
        })?;
        info!(%addr, "storefront listening");
        Ok(Server {
            listener,
            outbox_capacity,
        })
    }

    /// The actually-bound address (useful with port 0).
    pub fn local_addr(&self) -> StoreResult<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Runs the accept loop indefinitely, one session task per connection.
    pub async fn run(self, store: StoreHandle) -> StoreResult<()> {
        loop {
            let (stream, addr) = self.listener.accept().await?;
            info!(%addr, "accepted connection");
            tokio::spawn(session::handle_connection(
                stream,
                addr,
                store.clone(),
                self.outbox_capacity,
            ));
        }
    }
}

// =============================================================================
// Integration Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{Request, Response, StatusCode};
    use crate::store::{Store, StoreSettings};

    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
    use tokio::net::TcpStream;
    use tokio::time::{timeout, Duration};

    /// Boots a full store + server on an ephemeral port.
    async fn boot() -> SocketAddr {
        let (store, handle) = Store::new(StoreSettings::default());
        tokio::spawn(store.run());

        let server = Server::bind("127.0.0.1:0", 32).await.unwrap();
        let addr = server.local_addr().unwrap();
        tokio::spawn(server.run(handle));
        addr
    }

    struct TestClient {
        reader: BufReader<tokio::net::tcp::OwnedReadHalf>,
        writer: tokio::net::tcp::OwnedWriteHalf,
    }

    impl TestClient {
        async fn connect(addr: SocketAddr) -> TestClient {
            let stream = TcpStream::connect(addr).await.unwrap();
            let (read_half, writer) = stream.into_split();
            TestClient {
                reader: BufReader::new(read_half),
                writer,
            }
        }

        async fn send(&mut self, request: Request) {
            let mut line = request.to_json().unwrap();
            line.push('\n');
            self.writer.write_all(line.as_bytes()).await.unwrap();
        }

        async fn recv(&mut self) -> Response {
            let mut line = String::new();
            timeout(Duration::from_secs(2), self.reader.read_line(&mut line))
                .await
                .expect("timed out waiting for response")
                .expect("read failed");
            Response::from_json(line.trim()).unwrap()
        }
    }

    #[tokio::test]
    async fn test_two_clients_over_tcp() {
        let addr = boot().await;
        let mut alice = TestClient::connect(addr).await;
        let mut bob = TestClient::connect(addr).await;

        // A session's own join completes before its read loop starts, but
        // bob's join still races alice's first command across connections.
        tokio::time::sleep(Duration::from_millis(100)).await;

        alice.send(Request::create("cart1")).await;
        let created = alice.recv().await;
        assert_eq!(created.status, StatusCode::Created);
        assert_eq!(created.message, "created basket 'cart1'");
        assert_eq!(bob.recv().await.message, "created basket 'cart1'");

        bob.send(Request::add("cart1", "pokeball")).await;
        assert_eq!(
            alice.recv().await.message,
            "added a pokeball to basket 'cart1'"
        );
        assert_eq!(
            bob.recv().await.message,
            "added a pokeball to basket 'cart1'"
        );

        alice.send(Request::checkout("cart1")).await;
        assert_eq!(
            alice.recv().await.message,
            "checkout basket 'cart1' total $2.00"
        );
        assert_eq!(
            bob.recv().await.message,
            "checkout basket 'cart1' total $2.00"
        );
    }

    #[tokio::test]
    async fn test_malformed_line_does_not_kill_session() {
        let addr = boot().await;
        let mut client = TestClient::connect(addr).await;

        // Unknown verb fails decode server-side; nothing comes back.
        client
            .writer
            .write_all(b"{\"verb\":\"teleport\",\"basketId\":\"cart1\"}\nnot json at all\n")
            .await
            .unwrap();

        // The session is still alive and processes the next valid command.
        client.send(Request::create("cart1")).await;
        let res = client.recv().await;
        assert_eq!(res.status, StatusCode::Created);
    }

    #[tokio::test]
    async fn test_arbitrary_basket_ids_accepted() {
        // Ids are opaque client-supplied strings: empty and long ids create
        // baskets like any other.
        let addr = boot().await;
        let mut client = TestClient::connect(addr).await;

        let long_id = "x".repeat(200);
        client.send(Request::create(&long_id)).await;
        let res = client.recv().await;
        assert_eq!(res.status, StatusCode::Created);
        assert_eq!(res.message, format!("created basket '{}'", long_id));

        client.send(Request::create("")).await;
        let res = client.recv().await;
        assert_eq!(res.status, StatusCode::Created);
        assert_eq!(res.message, "created basket ''");
    }

    #[tokio::test]
    async fn test_disconnected_client_stops_receiving() {
        let addr = boot().await;
        let mut alice = TestClient::connect(addr).await;
        let bob = TestClient::connect(addr).await;
        tokio::time::sleep(Duration::from_millis(100)).await;

        drop(bob); // disconnect -> leave

        tokio::time::sleep(Duration::from_millis(100)).await;
        alice.send(Request::create("cart1")).await;
        assert_eq!(alice.recv().await.status, StatusCode::Created);
        // Nothing to assert for bob beyond the store not wedging: the
        // broadcast path already ran against a pruned membership set.
    }
}
