//! Connection management for operator clients.
//!
//! This module handles the lifecycle of client connections: identifier
//! assignment, the per-connection outbound delivery queue, and broadcast
//! fan-out across the connection set.

pub mod manager;
pub mod outbound;

pub use manager::ConnectionManager;
pub use outbound::{OutboundQueue, WireSink};

/// Type alias for connection identifiers.
///
/// Connection IDs are used to uniquely identify client connections
/// throughout their lifecycle on the server.
pub type ConnectionId = usize;
