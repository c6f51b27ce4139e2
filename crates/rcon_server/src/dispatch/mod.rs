//! Command dispatch
//!
//! Turns a raw inbound frame into exactly one outbound reply string.
//! Dispatch is two-phase: the `{command, identifier}` envelope is parsed
//! first, the matched command then re-parses the full frame into its own
//! request type. Every failure mode (unknown name, malformed payload,
//! rejected action) produces an error envelope for the issuing client and
//! leaves the connection open.

pub mod registry;

pub use registry::{CommandDescriptor, CommandRegistry};

use thiserror::Error;
use tracing::warn;

use game_api::{GameApi, GameError};

use crate::messaging::{CommandEnvelope, ErrorEnvelope};

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Invalid payload for '{command}': {source}")]
    Payload {
        command: &'static str,
        source: serde_json::Error,
    },

    #[error("{0}")]
    Game(#[from] GameError),

    #[error("Failed to encode reply: {0}")]
    Encode(serde_json::Error),
}

/// Handles one inbound frame, returning the reply to enqueue.
pub fn dispatch(registry: &CommandRegistry, game: &dyn GameApi, raw: &[u8]) -> String {
    let envelope = CommandEnvelope::parse(raw);
    let name = envelope.command.as_deref().unwrap_or_default();

    let Some(descriptor) = registry.lookup(name) else {
        return ErrorEnvelope::invalid_command(name, envelope.identifier).to_json();
    };

    match descriptor.invoke(game, raw, envelope.identifier) {
        Ok(reply) => reply,
        Err(err) => {
            warn!("Command '{}' failed: {}", name, err);
            ErrorEnvelope::new(err.to_string(), envelope.identifier).to_json()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::builtin_commands;
    use game_api::{InMemoryGame, MapSize, ServerState};

    fn test_game() -> InMemoryGame {
        InMemoryGame::new(ServerState {
            server_name: "t".to_string(),
            map_name: "m".to_string(),
            map_size: MapSize::Small,
            game_mode: "CONQ".to_string(),
            is_day: true,
            max_players: 16,
        })
    }

    #[test]
    fn unknown_command_yields_exact_error_envelope() {
        let registry = builtin_commands();
        let game = test_game();
        let reply = dispatch(&registry, &game, br#"{"command":"frobnicate"}"#);
        assert_eq!(
            reply,
            r#"{"type":"error","message":"Invalid command: frobnicate"}"#
        );
    }

    #[test]
    fn missing_command_field_reports_empty_name() {
        let registry = builtin_commands();
        let game = test_game();
        let reply = dispatch(&registry, &game, br#"{"identifier":3}"#);
        let value: serde_json::Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(value["type"], "error");
        assert_eq!(value["message"], "Invalid command: ");
        assert_eq!(value["identifier"], 3);
    }

    #[test]
    fn malformed_json_is_treated_as_invalid_command() {
        let registry = builtin_commands();
        let game = test_game();
        let reply = dispatch(&registry, &game, b"{{{{");
        assert_eq!(reply, r#"{"type":"error","message":"Invalid command: "}"#);
    }

    #[test]
    fn malformed_payload_is_recoverable_and_echoes_identifier() {
        let registry = builtin_commands();
        let game = test_game();
        // kick requires steamID and reason
        let reply = dispatch(&registry, &game, br#"{"command":"kick","identifier":8}"#);
        let value: serde_json::Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(value["type"], "error");
        assert_eq!(value["identifier"], 8);
    }

    #[test]
    fn domain_error_becomes_error_envelope() {
        let registry = builtin_commands();
        let game = test_game();
        let reply = dispatch(
            &registry,
            &game,
            br#"{"command":"kill","identifier":1,"steamID":"42"}"#,
        );
        let value: serde_json::Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(value["type"], "error");
        assert_eq!(value["message"], "player 42 is not on the server");
        assert_eq!(value["identifier"], 1);
    }

    #[test]
    fn command_name_matching_ignores_case() {
        let registry = builtin_commands();
        let game = test_game();
        let reply = dispatch(&registry, &game, br#"{"command":"PiNg","identifier":2}"#);
        let value: serde_json::Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(value["command"], "ping");
        assert_eq!(value["message"], "pong");
        assert_eq!(value["identifier"], 2);
    }
}
