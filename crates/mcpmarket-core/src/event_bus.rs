//! Marketplace event distribution
//!
//! [`McpAppService`](crate::application::McpAppService) publishes a
//! [`DomainEvent`] after every change it persists. Consumers such as search
//! indexers, owner notifications and audit logs subscribe independently and
//! each get their own copy.
//!
//! ```text
//! McpAppService ──emit──▶ broadcast channel ──▶ search index refresh
//!                                           ├──▶ owner notifications
//!                                           └──▶ audit log
//! ```
//!
//! ```ignore
//! let bus = EventBus::new();
//! let service = McpAppService::new(repo, bus.sender());
//! let mut downloads = bus.subscribe().only("mcp-1");
//! ```

use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tracing::{debug, warn};

use crate::domain::DomainEvent;

const DEFAULT_CAPACITY: usize = 256;

/// Broadcast hub for [`DomainEvent`]s. Clones share one channel.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Events beyond `capacity` that a slow subscriber has not read are
    /// dropped for that subscriber.
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn sender(&self) -> EventSender {
        EventSender {
            tx: self.tx.clone(),
        }
    }

    /// Receive every event emitted from now on
    pub fn subscribe(&self) -> EventReceiver {
        EventReceiver {
            rx: self.tx.subscribe(),
            mcp_id: None,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Emitting half handed to services
#[derive(Clone)]
pub struct EventSender {
    tx: broadcast::Sender<DomainEvent>,
}

impl EventSender {
    /// Publish an event. Returns how many subscribers got it; having none
    /// is not an error.
    pub fn emit(&self, event: DomainEvent) -> usize {
        let event_type = event.type_name();
        let mcp_id = event.mcp_id().to_string();

        let delivered = self.tx.send(event).unwrap_or(0);
        debug!(
            event_type,
            mcp_id = %mcp_id,
            receivers = delivered,
            "[EventBus] Emitted event"
        );
        delivered
    }

    pub fn has_subscribers(&self) -> bool {
        self.tx.receiver_count() > 0
    }
}

/// Receiving half, optionally narrowed to a single MCP
pub struct EventReceiver {
    rx: broadcast::Receiver<DomainEvent>,
    mcp_id: Option<String>,
}

impl EventReceiver {
    /// Narrow this receiver to events about one MCP
    pub fn only(mut self, mcp_id: impl Into<String>) -> Self {
        self.mcp_id = Some(mcp_id.into());
        self
    }

    fn wants(&self, event: &DomainEvent) -> bool {
        self.mcp_id.as_deref().map_or(true, |id| event.mcp_id() == id)
    }

    /// Next matching event, or `None` once every sender is gone.
    /// A lagging receiver skips what it missed and keeps going.
    pub async fn recv(&mut self) -> Option<DomainEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) if self.wants(&event) => return Some(event),
                Ok(_) => continue,
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "[EventBus] Subscriber lagged, events dropped");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Next matching event already queued, without waiting
    pub fn try_recv(&mut self) -> Option<DomainEvent> {
        loop {
            match self.rx.try_recv() {
                Ok(event) if self.wants(&event) => return Some(event),
                Ok(_) => continue,
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "[EventBus] Subscriber lagged, events dropped");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return None,
            }
        }
    }
}

pub type SharedEventBus = Arc<EventBus>;

pub fn create_shared_event_bus() -> SharedEventBus {
    Arc::new(EventBus::new())
}
