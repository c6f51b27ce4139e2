//! # Remote-Control Server
//!
//! A WebSocket remote-control (RCON) server that sits between a running game
//! server and external operator clients. Clients authenticate with a shared
//! secret at connection time, then issue named JSON commands and receive
//! both correlated replies and unsolicited game-event broadcasts over the
//! same connection.
//!
//! ## Architecture Overview
//!
//! * **Listener** ([`server`]) - TCP accept loop, WebSocket upgrade with
//!   `x-password` header authentication, per-connection receive loop.
//! * **Dispatch** ([`dispatch`]) - Two-phase frame handling: parse the
//!   `{command, identifier}` envelope, look the name up case-insensitively
//!   in a fixed registry, then parse the full frame into the command's typed
//!   request. Every failure becomes an error envelope; the connection stays
//!   open.
//! * **Commands** ([`commands`]) - The closed set of built-in operator
//!   commands, executing against the [`game_api::GameApi`] capability.
//! * **Delivery** ([`connection`]) - One outbound queue per connection with
//!   a single writer task owning the socket sink, so all outbound messages
//!   for a connection are delivered strictly in enqueue order.
//!
//! ## Message Flow
//!
//! 1. Client sends `{"command": "kick", "identifier": 7, "steamID": "...", ...}`
//! 2. The dispatcher resolves the command and runs it against the game
//! 3. The reply (with `identifier` echoed) is appended to that client's queue
//! 4. Game events are fanned out to every connected client, without an
//!    identifier

pub mod commands;
pub mod config;
pub mod connection;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod messaging;
pub mod server;
pub mod shutdown;

pub use config::{load_config, Args, Config};
pub use error::RconError;
pub use server::RconServer;
