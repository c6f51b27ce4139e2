//! Read-only queries: `ping`, `playerlist`, `state`.

use serde::{Deserialize, Serialize};

use game_api::{current_timestamp, PlayerInfo, ServerState};

use crate::dispatch::{CommandDescriptor, CommandRegistry};

#[derive(Debug, Deserialize)]
struct NoArgs {}

#[derive(Debug, Serialize)]
struct PingReply {
    message: &'static str,
    timestamp: u64,
}

#[derive(Debug, Serialize)]
struct PlayerListReply {
    players: Vec<PlayerInfo>,
}

#[derive(Debug, Serialize)]
struct StateReply {
    #[serde(flatten)]
    state: ServerState,
    players: Vec<PlayerInfo>,
}

pub fn register(registry: &mut CommandRegistry) {
    registry.register(CommandDescriptor::new("ping", |_game, _req: NoArgs| {
        Ok(PingReply {
            message: "pong",
            timestamp: current_timestamp(),
        })
    }));

    registry.register(CommandDescriptor::new(
        "playerlist",
        |game, _req: NoArgs| {
            Ok(PlayerListReply {
                players: game.players(),
            })
        },
    ));

    registry.register(CommandDescriptor::new("state", |game, _req: NoArgs| {
        Ok(StateReply {
            state: game.server_state(),
            players: game.players(),
        })
    }));
}
