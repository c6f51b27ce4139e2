//! Domain types shared between the game capability and the wire protocol.
//!
//! Serialization matches the established remote-control protocol: camelCase
//! keys, `steamID` spelling, positions as `[x, y, z]` float triples, teams
//! and squads as raw integers, roles and states as their names.

use serde::{Deserialize, Serialize};

/// A team slot. `0` and `1` are the two playing teams, `-1` is unassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Team(pub i32);

impl Team {
    pub const A: Team = Team(0);
    pub const B: Team = Team(1);
    pub const NONE: Team = Team(-1);
}

/// A squad slot within a team. `0` means "no squad".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Squad(pub u8);

impl Squad {
    pub const NONE: Squad = Squad(0);

    pub fn is_some(&self) -> bool {
        self.0 != 0
    }
}

/// Player class. Travels by name on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameRole {
    Assault,
    Medic,
    Support,
    Engineer,
    Recon,
    Leader,
}

impl std::str::FromStr for GameRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Assault" => Ok(GameRole::Assault),
            "Medic" => Ok(GameRole::Medic),
            "Support" => Ok(GameRole::Support),
            "Engineer" => Ok(GameRole::Engineer),
            "Recon" => Ok(GameRole::Recon),
            "Leader" => Ok(GameRole::Leader),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Round lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    WaitingForPlayers,
    CountingDown,
    Playing,
    EndingGame,
}

/// Chat channel a message was typed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatChannel {
    AllChat,
    TeamChat,
    SquadChat,
}

/// Map size bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MapSize {
    #[serde(rename = "8v8")]
    Small,
    #[serde(rename = "16v16")]
    Medium,
    #[serde(rename = "32v32")]
    Big,
    #[serde(rename = "64v64")]
    Ultra,
    #[serde(rename = "127v127")]
    Tiny,
}

/// World-space position, serialized as `[x, y, z]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Serialize for Position {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.x, self.y, self.z].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let [x, y, z] = <[f32; 3]>::deserialize(deserializer)?;
        Ok(Position { x, y, z })
    }
}

/// Wire snapshot of a single player.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerInfo {
    pub in_vehicle: bool,
    pub name: String,
    pub ip: String,
    pub role: GameRole,
    pub team: Team,
    pub squad: Squad,
    #[serde(rename = "steamID")]
    pub steam_id: String,
    pub position: Position,
    pub is_dead: bool,
    pub in_squad: bool,
    pub ping_ms: u32,
    pub is_squad_leader: bool,
    pub hp: f32,
}

/// Wire snapshot of server-wide state, as reported by the `state` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerState {
    pub server_name: String,
    pub map_name: String,
    pub map_size: MapSize,
    pub game_mode: String,
    pub is_day: bool,
    pub max_players: u32,
}
