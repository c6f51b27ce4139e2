//! Core remote-control server implementation.
//!
//! This module contains the main `RconServer` struct: the TCP accept loop,
//! the WebSocket upgrade with header authentication, the per-connection
//! receive loop, and the task that forwards game events to every connected
//! client.
//!
//! # Message Flow
//!
//! 1. Client connects with an `x-password` header; a mismatch is rejected
//!    with HTTP 401 before the upgrade completes.
//! 2. Each text frame is handed to the dispatcher, which returns exactly one
//!    reply string; the reply is appended to the connection's outbound queue.
//! 3. Game events are serialized once and fanned out to every live queue.
//!
//! All outbound traffic for a connection flows through its single writer
//! task, so replies and broadcasts interleave but individually stay in
//! enqueue order.

use std::net::SocketAddr;
use std::sync::Arc;

use futures::StreamExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::broadcast;
use tokio_tungstenite::accept_hdr_async;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::tungstenite::http::StatusCode;
use tokio_tungstenite::tungstenite::{self, Message};
use tracing::{debug, error, info, warn};

use game_api::GameApi;

use crate::commands::builtin_commands;
use crate::connection::outbound::WebSocketSink;
use crate::connection::{ConnectionManager, OutboundQueue};
use crate::dispatch::{dispatch, CommandRegistry};
use crate::error::RconError;
use crate::messaging::ErrorEnvelope;

// WebSocket close codes used by the receive loop.
const CLOSE_NORMAL: u16 = 1000;
const CLOSE_UNSUPPORTED_DATA: u16 = 1003;

/// The remote-control server.
///
/// Owns the command registry, the connection set, and a handle to the game
/// capability. One instance fronts one game server.
pub struct RconServer {
    listen_addr: String,
    password: Arc<str>,
    max_command_bytes: usize,
    game: Arc<dyn GameApi>,
    registry: Arc<CommandRegistry>,
    connections: Arc<ConnectionManager>,
    shutdown_sender: broadcast::Sender<()>,
}

impl RconServer {
    pub fn new(
        listen_addr: String,
        password: String,
        max_command_bytes: usize,
        game: Arc<dyn GameApi>,
    ) -> Self {
        let (shutdown_sender, _) = broadcast::channel(1);
        Self {
            listen_addr,
            password: password.into(),
            max_command_bytes,
            game,
            registry: Arc::new(builtin_commands()),
            connections: Arc::new(ConnectionManager::new()),
            shutdown_sender,
        }
    }

    /// Binds the configured address and runs until shutdown.
    pub async fn start(&self) -> Result<(), RconError> {
        let listener = TcpListener::bind(&self.listen_addr)
            .await
            .map_err(|e| RconError::Network(format!("Bind failed on {}: {e}", self.listen_addr)))?;
        self.run(listener).await
    }

    /// Runs the accept loop and event forwarding on an already-bound
    /// listener. Returns once a shutdown signal is received; the bound
    /// address is released on return.
    pub async fn run(&self, listener: TcpListener) -> Result<(), RconError> {
        let local_addr = listener.local_addr()?;
        info!("🚀 Remote-control server listening on {}", local_addr);

        // Forward game events to every connected client.
        let forwarder = {
            let connections = self.connections.clone();
            let mut events = self.game.subscribe_events();
            let mut shutdown = self.shutdown_sender.subscribe();
            tokio::spawn(async move {
                loop {
                    tokio::select! {
                        event = events.recv() => match event {
                            Ok(event) => {
                                let delivered = connections.broadcast_event(&event);
                                debug!("📨 Broadcast {} to {} connection(s)", event.name(), delivered);
                            }
                            Err(broadcast::error::RecvError::Lagged(missed)) => {
                                warn!("Event forwarder lagged, {} event(s) dropped", missed);
                            }
                            Err(broadcast::error::RecvError::Closed) => break,
                        },
                        _ = shutdown.recv() => break,
                    }
                }
            })
        };

        let mut shutdown_receiver = self.shutdown_sender.subscribe();
        let accept_loop = async {
            loop {
                match listener.accept().await {
                    Ok((stream, addr)) => {
                        let password = self.password.clone();
                        let max_command_bytes = self.max_command_bytes;
                        let game = self.game.clone();
                        let registry = self.registry.clone();
                        let connections = self.connections.clone();

                        tokio::spawn(async move {
                            if let Err(e) = handle_connection(
                                stream,
                                addr,
                                password,
                                max_command_bytes,
                                game,
                                registry,
                                connections,
                            )
                            .await
                            {
                                debug!("Connection error from {}: {}", addr, e);
                            }
                        });
                    }
                    Err(e) => {
                        error!("Failed to accept connection: {}", e);
                        break;
                    }
                }
            }
        };

        tokio::select! {
            _ = accept_loop => {}
            _ = shutdown_receiver.recv() => {
                info!("Shutdown signal received");
            }
        }

        forwarder.abort();
        info!("🛑 Remote-control server stopped");
        Ok(())
    }

    /// Signals the accept loop to stop. In-flight connections finish on
    /// their own tasks.
    pub fn shutdown(&self) {
        let _ = self.shutdown_sender.send(());
    }

    pub fn connection_count(&self) -> usize {
        self.connections.connection_count()
    }
}

/// Compares the presented password against the expected one without
/// short-circuiting on the first differing byte.
fn password_matches(presented: &str, expected: &str) -> bool {
    let presented = presented.as_bytes();
    let expected = expected.as_bytes();
    if presented.len() != expected.len() {
        return false;
    }
    presented
        .iter()
        .zip(expected)
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    password: Arc<str>,
    max_command_bytes: usize,
    game: Arc<dyn GameApi>,
    registry: Arc<CommandRegistry>,
    connections: Arc<ConnectionManager>,
) -> Result<(), RconError> {
    let auth = |req: &Request, resp: Response| -> Result<Response, ErrorResponse> {
        let presented = req
            .headers()
            .get("x-password")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if password_matches(presented, &password) {
            Ok(resp)
        } else {
            let mut rejection = ErrorResponse::new(Some("Unauthorized".to_string()));
            *rejection.status_mut() = StatusCode::UNAUTHORIZED;
            Err(rejection)
        }
    };

    let ws_stream = match accept_hdr_async(stream, auth).await {
        Ok(ws) => ws,
        Err(tungstenite::Error::Http(response))
            if response.status() == StatusCode::UNAUTHORIZED =>
        {
            info!("🔒 Rejected connection from {}: bad or missing password", addr);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let (sink, mut inbound) = ws_stream.split();
    let queue = OutboundQueue::spawn(WebSocketSink::new(sink));
    let connection_id = connections.add_connection(queue.clone());
    info!("✅ Client {} connected (connection {})", addr, connection_id);

    while let Some(frame) = inbound.next().await {
        match frame {
            Ok(Message::Text(text)) => {
                if text.len() > max_command_bytes {
                    let reply = ErrorEnvelope::new(
                        format!("Command exceeds maximum size of {max_command_bytes} bytes"),
                        None,
                    )
                    .to_json();
                    if !queue.enqueue(reply) {
                        break;
                    }
                    continue;
                }
                let reply = dispatch(&registry, game.as_ref(), text.as_bytes());
                if !queue.enqueue(reply) {
                    break;
                }
            }
            Ok(Message::Close(_)) => {
                queue.close(CLOSE_NORMAL, "");
                break;
            }
            Ok(Message::Binary(_)) => {
                queue.close(CLOSE_UNSUPPORTED_DATA, "Only text frames are supported.");
                break;
            }
            Ok(Message::Ping(_)) | Ok(Message::Pong(_)) | Ok(Message::Frame(_)) => {}
            Err(e) => {
                warn!("Connection {} transport error: {}", connection_id, e);
                break;
            }
        }
    }

    connections.remove_connection(connection_id);
    info!("👋 Client {} disconnected (connection {})", addr, connection_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_comparison() {
        assert!(password_matches("hunter2", "hunter2"));
        assert!(!password_matches("hunter2", "hunter3"));
        assert!(!password_matches("", "hunter2"));
        assert!(!password_matches("hunter2", ""));
        assert!(password_matches("", ""));
    }
}
