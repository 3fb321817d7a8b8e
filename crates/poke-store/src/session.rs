//! # Client Session
//!
//! Per-connection handler: decodes newline-delimited JSON requests into
//! orders, and drains the client's outbox back onto the socket.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Session Lifecycle                                │
//! │                                                                         │
//! │  accept ──► join(store) ──► spawn writer task                           │
//! │                 │              │  outbox rx ──► socket write half       │
//! │                 ▼              │                                        │
//! │            read loop           │  (ends when the store drops the        │
//! │         line ─► Request ─► Order ─► take_order     outbox sender)       │
//! │                 │                                                       │
//! │  EOF / error ──► leave(store) ──► outbox closes ──► writer ends         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Malformed lines are logged and skipped; the rest of the session keeps
//! working. Disconnect always drives `leave` exactly once.

use std::net::SocketAddr;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::protocol::{Request, Response};
use crate::store::{ClientId, Order, StoreHandle};

/// Handles one accepted connection until EOF or error.
pub async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    store: StoreHandle,
    outbox_capacity: usize,
) {
    let client = ClientId::new();
    let (outbox_tx, outbox_rx) = mpsc::channel(outbox_capacity);

    if let Err(err) = store.join(client, outbox_tx).await {
        warn!(client = %client, %addr, error = %err, "join failed, closing connection");
        return;
    }
    info!(client = %client, %addr, "client connected");

    let (read_half, write_half) = stream.into_split();
    let writer = tokio::spawn(write_responses(client, write_half, outbox_rx));

    let mut lines = BufReader::new(read_half).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let request = match Request::from_json(line) {
                    Ok(request) => request,
                    Err(err) => {
                        // Unknown verbs land here too: the verb enum is
                        // closed, so they fail decode and are logged only.
                        warn!(client = %client, error = %err, "malformed request line");
                        continue;
                    }
                };

                match store.take_order(Order { client, request }).await {
                    Ok(()) => {}
                    Err(err @ StoreError::SubmitTimeout(_)) => {
                        // Order lost, session survives; the client may retry.
                        warn!(client = %client, error = %err, "order submission timed out");
                    }
                    Err(err) => {
                        warn!(client = %client, error = %err, "store unavailable, closing session");
                        break;
                    }
                }
            }
            Ok(None) => {
                info!(client = %client, "client disconnected");
                break;
            }
            Err(err) => {
                warn!(client = %client, error = %err, "read error, closing session");
                break;
            }
        }
    }

    // Leave removes the store-side outbox sender; the channel closes and the
    // writer task drains out.
    if let Err(err) = store.leave(client).await {
        debug!(client = %client, error = %err, "leave failed (store already gone)");
    }
    let _ = writer.await;
}

/// Writer task: serializes responses onto the socket, one JSON line each.
async fn write_responses(
    client: ClientId,
    mut write_half: OwnedWriteHalf,
    mut outbox_rx: mpsc::Receiver<Response>,
) {
    while let Some(response) = outbox_rx.recv().await {
        let json = match response.to_json() {
            Ok(json) => json,
            Err(err) => {
                warn!(client = %client, error = %err, "failed to encode response");
                continue;
            }
        };
        if write_half.write_all(json.as_bytes()).await.is_err()
            || write_half.write_all(b"\n").await.is_err()
        {
            debug!(client = %client, "write failed, stopping writer");
            break;
        }
    }
}
