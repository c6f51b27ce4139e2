//! Connection set and broadcast fan-out.

use std::sync::atomic::{AtomicUsize, Ordering};

use dashmap::DashMap;
use tracing::{debug, warn};

use game_api::GameEvent;

use crate::connection::outbound::OutboundQueue;
use crate::connection::ConnectionId;

/// Tracks every live connection's delivery queue.
///
/// Registration and removal happen from connection tasks; broadcasts happen
/// from the event-forwarding task. The map is concurrent, so none of them
/// coordinate.
pub struct ConnectionManager {
    connections: DashMap<ConnectionId, OutboundQueue>,
    next_id: AtomicUsize,
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
            next_id: AtomicUsize::new(1),
        }
    }

    /// Registers a connection's queue and assigns it an id.
    pub fn add_connection(&self, queue: OutboundQueue) -> ConnectionId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.connections.insert(id, queue);
        id
    }

    /// Removes a connection. Safe to call more than once; the second and
    /// later calls are no-ops and return false.
    pub fn remove_connection(&self, id: ConnectionId) -> bool {
        self.connections.remove(&id).is_some()
    }

    /// Enqueues a message for one connection. Returns false if the
    /// connection is gone or its writer has stopped.
    pub fn send_to_connection(&self, id: ConnectionId, text: String) -> bool {
        match self.connections.get(&id) {
            Some(queue) => queue.enqueue(text),
            None => false,
        }
    }

    /// Serializes `event` once and enqueues it on every open connection.
    ///
    /// Connections whose queue has closed are skipped silently; delivery
    /// itself is asynchronous. Returns the number of connections the event
    /// was enqueued for.
    pub fn broadcast_event(&self, event: &GameEvent) -> usize {
        let payload = match serde_json::to_string(event) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Failed to serialize event {}: {}", event.name(), e);
                return 0;
            }
        };

        let mut delivered = 0;
        for entry in self.connections.iter() {
            if entry.value().enqueue(payload.clone()) {
                delivered += 1;
            } else {
                debug!("Skipping closed connection {} during broadcast", entry.key());
            }
        }
        delivered
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}
