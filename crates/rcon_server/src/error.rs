use thiserror::Error;

/// Engine-level error type.
#[derive(Debug, Error)]
pub enum RconError {
    /// Transport failures: bind, accept, upgrade, frame I/O.
    #[error("Network error: {0}")]
    Network(String),

    /// Anything that indicates a bug or unusable runtime state.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<std::io::Error> for RconError {
    fn from(err: std::io::Error) -> Self {
        RconError::Network(err.to_string())
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for RconError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        RconError::Network(err.to_string())
    }
}
