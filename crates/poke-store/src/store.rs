//! # Store Actor
//!
//! The single-writer coordinator for all shared state: the basket map and the
//! connected-client set live inside one tokio task and nowhere else.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Store Actor                                     │
//! │                                                                         │
//! │   session A ──┐                                                         │
//! │   session B ──┼─► StoreHandle ──► join / leave / order mailboxes        │
//! │   session C ──┘      (bounded, deadline on every send)                  │
//! │                              │                                          │
//! │                              ▼                                          │
//! │                    ┌──────────────────┐    one message per iteration    │
//! │                    │  select! loop    │    exclusive owner of:          │
//! │                    │  (single task)   │      clients: ClientId→outbox   │
//! │                    └────────┬─────────┘      baskets: id→Basket         │
//! │                             │                                           │
//! │             dispatch ───────┘                                           │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │   try_send to each client outbox (full queue = drop + count,            │
//! │   never a stall for the actor or the other clients)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No locks exist because exactly one task ever reads or writes the maps.
//! Join and leave are acked: the handle returns only after the actor applied
//! the membership change, so an order submitted after a completed `join`
//! always dispatches against a set that contains the joining client.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;
use tracing::{debug, info, warn};
use uuid::Uuid;

use poke_core::{Basket, CheckoutSystem, ItemKind, PercentOff, PriceList, QuantityPromo};

use crate::dispatch::{dispatch, Scope};
use crate::error::{StoreError, StoreResult};
use crate::protocol::{Request, Response};

// =============================================================================
// Client Identity
// =============================================================================

/// Opaque identifier for one connected session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId(Uuid);

impl ClientId {
    /// Generates a fresh identifier for a newly accepted connection.
    pub fn new() -> Self {
        ClientId(Uuid::new_v4())
    }
}

impl Default for ClientId {
    fn default() -> Self {
        ClientId::new()
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// =============================================================================
// Order
// =============================================================================

/// One decoded client command bound to its originating session.
///
/// Transient: constructed per incoming request, consumed once by the
/// dispatcher, then discarded.
#[derive(Debug, Clone)]
pub struct Order {
    /// The session that issued the command.
    pub client: ClientId,

    /// The decoded command itself.
    pub request: Request,
}

/// Membership registration: a client id plus its outbound response queue.
///
/// Carries an ack channel the handle awaits, so the caller observes the
/// membership insert, not just the enqueue.
#[derive(Debug)]
struct Join {
    client: ClientId,
    outbox: mpsc::Sender<Response>,
    applied: oneshot::Sender<()>,
}

/// Membership removal, acked the same way as [`Join`].
#[derive(Debug)]
struct Leave {
    client: ClientId,
    applied: oneshot::Sender<()>,
}

/// Per-client delivery state held by the actor.
///
/// The sender is the only store-side handle on the connection; dropping it
/// (on leave) is the teardown signal that ends the session's writer task.
struct ClientOutbox {
    sender: mpsc::Sender<Response>,
    /// Broadcasts discarded because this client's queue was full.
    dropped: u64,
}

// =============================================================================
// Store Handle
// =============================================================================

/// Message-passing API onto the store actor.
///
/// Cloned into every session. Each operation is a bounded send with a
/// deadline: a wedged actor surfaces as [`StoreError::SubmitTimeout`] instead
/// of an indefinite stall.
#[derive(Clone)]
pub struct StoreHandle {
    join_tx: mpsc::Sender<Join>,
    leave_tx: mpsc::Sender<Leave>,
    order_tx: mpsc::Sender<Order>,
    submit_timeout: Duration,
}

impl StoreHandle {
    /// Adds a client to the membership set.
    ///
    /// Returns only after the actor has applied the insert, so any order the
    /// caller submits afterwards dispatches against a membership set that
    /// already contains this client. No response is generated.
    pub async fn join(&self, client: ClientId, outbox: mpsc::Sender<Response>) -> StoreResult<()> {
        let (applied_tx, applied_rx) = oneshot::channel();
        self.submit(
            &self.join_tx,
            Join {
                client,
                outbox,
                applied: applied_tx,
            },
        )
        .await?;
        self.await_applied(applied_rx).await
    }

    /// Removes a client from the membership set and releases its outbox.
    /// Acked like [`StoreHandle::join`]: returns once the removal happened.
    pub async fn leave(&self, client: ClientId) -> StoreResult<()> {
        let (applied_tx, applied_rx) = oneshot::channel();
        self.submit(
            &self.leave_tx,
            Leave {
                client,
                applied: applied_tx,
            },
        )
        .await?;
        self.await_applied(applied_rx).await
    }

    /// Enqueues an order for dispatch.
    pub async fn take_order(&self, order: Order) -> StoreResult<()> {
        self.submit(&self.order_tx, order).await
    }

    async fn submit<T>(&self, tx: &mpsc::Sender<T>, msg: T) -> StoreResult<()> {
        match timeout(self.submit_timeout, tx.send(msg)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(_)) => Err(StoreError::MailboxClosed),
            Err(_) => Err(StoreError::SubmitTimeout(self.submit_timeout)),
        }
    }

    async fn await_applied(&self, applied_rx: oneshot::Receiver<()>) -> StoreResult<()> {
        match timeout(self.submit_timeout, applied_rx).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(_)) => Err(StoreError::MailboxClosed),
            Err(_) => Err(StoreError::SubmitTimeout(self.submit_timeout)),
        }
    }
}

// =============================================================================
// Store Settings
// =============================================================================

/// Actor tuning knobs, extracted from [`StoreConfig`](crate::config::StoreConfig).
#[derive(Debug, Clone)]
pub struct StoreSettings {
    pub mailbox_capacity: usize,
    pub submit_timeout: Duration,
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            mailbox_capacity: crate::config::DEFAULT_MAILBOX_CAPACITY,
            submit_timeout: Duration::from_millis(crate::config::DEFAULT_SUBMIT_TIMEOUT_MS),
        }
    }
}

impl From<&crate::config::StoreConfig> for StoreSettings {
    fn from(config: &crate::config::StoreConfig) -> Self {
        StoreSettings {
            mailbox_capacity: config.mailbox_capacity,
            submit_timeout: config.submit_timeout(),
        }
    }
}

// =============================================================================
// Store
// =============================================================================

/// The store actor. Owns all mutable shared state exclusively.
pub struct Store {
    clients: HashMap<ClientId, ClientOutbox>,
    baskets: HashMap<String, Basket>,
    checkout: CheckoutSystem,

    join_rx: mpsc::Receiver<Join>,
    leave_rx: mpsc::Receiver<Leave>,
    order_rx: mpsc::Receiver<Order>,
}

impl Store {
    /// Creates the store with the standard discount registration and returns
    /// it alongside its handle.
    ///
    /// The registration is fixed at construction: every 3rd repel is free,
    /// rare candy is 19% off. Rules are never added or removed afterwards.
    pub fn new(settings: StoreSettings) -> (Store, StoreHandle) {
        let mut checkout = CheckoutSystem::new(PriceList::standard());
        checkout.register(QuantityPromo::new(ItemKind::Repel, 3));
        checkout.register(PercentOff::new(ItemKind::RareCandy, 1900));

        Store::with_checkout(settings, checkout)
    }

    /// Creates the store with a caller-supplied checkout system.
    pub fn with_checkout(
        settings: StoreSettings,
        checkout: CheckoutSystem,
    ) -> (Store, StoreHandle) {
        let (join_tx, join_rx) = mpsc::channel(settings.mailbox_capacity);
        let (leave_tx, leave_rx) = mpsc::channel(settings.mailbox_capacity);
        let (order_tx, order_rx) = mpsc::channel(settings.mailbox_capacity);

        let store = Store {
            clients: HashMap::new(),
            baskets: HashMap::new(),
            checkout,
            join_rx,
            leave_rx,
            order_rx,
        };

        let handle = StoreHandle {
            join_tx,
            leave_tx,
            order_tx,
            submit_timeout: settings.submit_timeout,
        };

        (store, handle)
    }

    /// Runs the actor loop: one message per iteration, forever.
    ///
    /// The loop only ends when every [`StoreHandle`] has been dropped and the
    /// mailboxes drain, which is how tests (and graceful shutdown) stop it.
    pub async fn run(mut self) {
        info!("store actor started");
        loop {
            tokio::select! {
                join = self.join_rx.recv() => match join {
                    Some(join) => self.handle_join(join),
                    None => break,
                },
                leave = self.leave_rx.recv() => match leave {
                    Some(leave) => self.handle_leave(leave),
                    None => break,
                },
                order = self.order_rx.recv() => match order {
                    Some(order) => self.handle_order(order),
                    None => break,
                },
            }
        }
        info!("store actor stopped");
    }

    fn handle_join(&mut self, join: Join) {
        debug!(client = %join.client, "client joined");
        self.clients.insert(
            join.client,
            ClientOutbox {
                sender: join.outbox,
                dropped: 0,
            },
        );
        // Ack after the insert; a caller that already timed out is gone.
        let _ = join.applied.send(());
    }

    fn handle_leave(&mut self, leave: Leave) {
        // Removing the entry drops the outbox sender, which closes the
        // session's response channel and ends its writer task.
        if let Some(outbox) = self.clients.remove(&leave.client) {
            debug!(client = %leave.client, dropped = outbox.dropped, "client left");
        }
        let _ = leave.applied.send(());
    }

    fn handle_order(&mut self, order: Order) {
        debug!(
            client = %order.client,
            verb = ?order.request.verb,
            basket_id = %order.request.basket_id,
            "dispatching order"
        );

        let deliveries = dispatch(&mut self.baskets, &self.checkout, &order);

        for delivery in deliveries {
            match delivery.scope {
                Scope::Requester => self.notify_client(order.client, delivery.response),
                Scope::Everyone => self.broadcast(delivery.response),
            }
        }
    }

    /// Delivers a response to every currently-joined client, requester
    /// included. Non-blocking per client: a full queue drops the message and
    /// bumps that client's counter, so one slow client cannot stall the rest.
    fn broadcast(&mut self, response: Response) {
        for (client, outbox) in self.clients.iter_mut() {
            match outbox.sender.try_send(response.clone()) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    outbox.dropped += 1;
                    warn!(
                        client = %client,
                        dropped = outbox.dropped,
                        "client outbox full, dropping broadcast"
                    );
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    // Connection already torn down; leave will reap the entry.
                    debug!(client = %client, "client outbox closed");
                }
            }
        }
    }

    fn notify_client(&mut self, client: ClientId, response: Response) {
        if let Some(outbox) = self.clients.get_mut(&client) {
            match outbox.sender.try_send(response) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    outbox.dropped += 1;
                    warn!(client = %client, "client outbox full, dropping response");
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    debug!(client = %client, "client outbox closed");
                }
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
