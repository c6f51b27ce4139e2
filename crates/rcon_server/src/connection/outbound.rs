//! Per-connection outbound delivery.
//!
//! Every connection owns one `OutboundQueue`: an unbounded channel feeding a
//! single writer task that owns the socket's sink half. Producers (the
//! dispatcher, the broadcast fan-out) enqueue without blocking from any
//! task; the writer drains strictly in FIFO order with at most one write in
//! flight. All per-connection delivery state lives here, owned by the
//! connection itself.
//!
//! The writer is generic over [`WireSink`] so delivery behavior is testable
//! without a real socket.

use async_trait::async_trait;
use futures::stream::SplitSink;
use futures::SinkExt;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::WebSocketStream;
use tracing::debug;

use crate::error::RconError;

/// The write half of a connection, as the delivery queue sees it.
#[async_trait]
pub trait WireSink: Send {
    async fn send_text(&mut self, text: String) -> Result<(), RconError>;
    async fn close(&mut self, code: u16, reason: &str) -> Result<(), RconError>;
}

/// [`WireSink`] over a real WebSocket sink half.
pub struct WebSocketSink(SplitSink<WebSocketStream<TcpStream>, Message>);

impl WebSocketSink {
    pub fn new(sink: SplitSink<WebSocketStream<TcpStream>, Message>) -> Self {
        Self(sink)
    }
}

#[async_trait]
impl WireSink for WebSocketSink {
    async fn send_text(&mut self, text: String) -> Result<(), RconError> {
        self.0.send(Message::Text(text.into())).await?;
        Ok(())
    }

    async fn close(&mut self, code: u16, reason: &str) -> Result<(), RconError> {
        self.0
            .send(Message::Close(Some(CloseFrame {
                code: CloseCode::from(code),
                reason: reason.to_string().into(),
            })))
            .await?;
        Ok(())
    }
}

enum OutboundItem {
    Text(String),
    Close { code: u16, reason: String },
}

/// Handle to a connection's delivery queue. Cheap to clone; dropping every
/// handle ends the writer task once the queue drains.
#[derive(Clone)]
pub struct OutboundQueue {
    tx: mpsc::UnboundedSender<OutboundItem>,
}

impl OutboundQueue {
    /// Spawns the writer task for `sink` and returns the queue handle.
    pub fn spawn<S: WireSink + 'static>(mut sink: S) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            while let Some(item) = rx.recv().await {
                match item {
                    OutboundItem::Text(text) => {
                        if let Err(e) = sink.send_text(text).await {
                            debug!("Outbound write failed, stopping writer: {}", e);
                            break;
                        }
                    }
                    OutboundItem::Close { code, reason } => {
                        if let Err(e) = sink.close(code, &reason).await {
                            debug!("Close frame write failed: {}", e);
                        }
                        break;
                    }
                }
            }
            // rx dropped here: later enqueues report a closed queue
        });

        Self { tx }
    }

    /// Appends a text message. Returns false if the writer has stopped.
    pub fn enqueue(&self, text: String) -> bool {
        self.tx.send(OutboundItem::Text(text)).is_ok()
    }

    /// Appends a close frame behind everything already queued and stops the
    /// writer once it is sent.
    pub fn close(&self, code: u16, reason: &str) {
        let _ = self.tx.send(OutboundItem::Close {
            code,
            reason: reason.to_string(),
        });
    }

    pub fn is_open(&self) -> bool {
        !self.tx.is_closed()
    }
}
