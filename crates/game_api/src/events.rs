//! Unsolicited game notifications.
//!
//! Each variant serializes as a flat JSON object whose `type` field carries
//! the event name, e.g. `{"type":"OnPlayerDied","steamID":"..."}`. Events are
//! pushed to every connected operator client and never carry a request
//! identifier.

use serde::{Deserialize, Serialize};

use crate::types::{ChatChannel, GameRole, GameState, PlayerInfo, Position, Squad, Team};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum GameEvent {
    OnPlayerConnected {
        player: PlayerInfo,
    },
    OnPlayerDisconnected {
        player: PlayerInfo,
    },
    OnPlayerTypedMessage {
        #[serde(rename = "steamID")]
        steam_id: String,
        channel: ChatChannel,
        team: Team,
        message: String,
    },
    OnPlayerChangedRole {
        #[serde(rename = "steamID")]
        steam_id: String,
        role: GameRole,
    },
    OnPlayerJoinedSquad {
        #[serde(rename = "steamID")]
        steam_id: String,
        squad: Squad,
        team: Team,
        as_leader: bool,
    },
    OnSquadLeaderChanged {
        #[serde(rename = "steamID")]
        steam_id: String,
        squad: Squad,
        team: Team,
    },
    OnPlayerLeftSquad {
        #[serde(rename = "steamID")]
        steam_id: String,
        squad: Squad,
    },
    OnPlayerChangeTeam {
        #[serde(rename = "steamID")]
        steam_id: String,
        team: Team,
    },
    OnSquadPointsChanged {
        squad: Squad,
        new_points: i32,
    },
    OnPlayerSpawned {
        #[serde(rename = "steamID")]
        steam_id: String,
    },
    OnPlayerDied {
        #[serde(rename = "steamID")]
        steam_id: String,
    },
    OnPlayerGivenUp {
        #[serde(rename = "steamID")]
        steam_id: String,
    },
    OnAPlayerDownedAnotherPlayer {
        #[serde(rename = "killerSteamID")]
        killer_steam_id: String,
        killer_position: Position,
        #[serde(rename = "victimSteamID")]
        victim_steam_id: String,
        victim_position: Position,
        killer_tool: String,
        body_part: String,
        source_of_damage: String,
    },
    OnAPlayerRevivedAnotherPlayer {
        #[serde(rename = "fromSteamID")]
        from_steam_id: String,
        #[serde(rename = "toSteamID")]
        to_steam_id: String,
    },
    OnPlayerReported {
        #[serde(rename = "fromSteamID")]
        from_steam_id: String,
        #[serde(rename = "toSteamID")]
        to_steam_id: String,
        reason: String,
        additional: String,
    },
    OnGameStateChanged {
        old_state: GameState,
        new_state: GameState,
    },
    OnRoundStarted,
    OnRoundEnded,
}

impl GameEvent {
    /// The wire name carried in the `type` field.
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::OnPlayerConnected { .. } => "OnPlayerConnected",
            GameEvent::OnPlayerDisconnected { .. } => "OnPlayerDisconnected",
            GameEvent::OnPlayerTypedMessage { .. } => "OnPlayerTypedMessage",
            GameEvent::OnPlayerChangedRole { .. } => "OnPlayerChangedRole",
            GameEvent::OnPlayerJoinedSquad { .. } => "OnPlayerJoinedSquad",
            GameEvent::OnSquadLeaderChanged { .. } => "OnSquadLeaderChanged",
            GameEvent::OnPlayerLeftSquad { .. } => "OnPlayerLeftSquad",
            GameEvent::OnPlayerChangeTeam { .. } => "OnPlayerChangeTeam",
            GameEvent::OnSquadPointsChanged { .. } => "OnSquadPointsChanged",
            GameEvent::OnPlayerSpawned { .. } => "OnPlayerSpawned",
            GameEvent::OnPlayerDied { .. } => "OnPlayerDied",
            GameEvent::OnPlayerGivenUp { .. } => "OnPlayerGivenUp",
            GameEvent::OnAPlayerDownedAnotherPlayer { .. } => "OnAPlayerDownedAnotherPlayer",
            GameEvent::OnAPlayerRevivedAnotherPlayer { .. } => "OnAPlayerRevivedAnotherPlayer",
            GameEvent::OnPlayerReported { .. } => "OnPlayerReported",
            GameEvent::OnGameStateChanged { .. } => "OnGameStateChanged",
            GameEvent::OnRoundStarted => "OnRoundStarted",
            GameEvent::OnRoundEnded => "OnRoundEnded",
        }
    }
}
