//! # Game API - Capability Surface for Remote Control
//!
//! This crate defines the boundary between the RCON engine and the game
//! server it controls. The engine never talks to the game directly; it only
//! sees the [`GameApi`] trait, which exposes the roster query, the per-player
//! and server-wide action verbs, and an event-subscription surface.
//!
//! ## Architecture
//!
//! * **[`GameApi`]** - The capability trait. All methods are synchronous and
//!   fast (game-state mutations are in-memory); anything that can fail
//!   returns a [`GameError`] which the engine translates into an error
//!   envelope for the offending client.
//! * **[`GameEvent`]** - Unsolicited notifications (player connected, died,
//!   round started, ...) delivered through a `tokio::sync::broadcast`
//!   channel. Each event maps 1:1 to a message pushed to every connected
//!   RCON client.
//! * **[`InMemoryGame`]** - A thread-safe in-memory implementation of the
//!   full capability surface, used by the standalone binary and by tests.
//!
//! The event surface is explicit subscription, not inheritance: consumers
//! call [`GameApi::subscribe_events`] and receive a broadcast receiver,
//! instead of overriding lifecycle methods on a base class.

pub mod events;
pub mod memory;
pub mod types;

pub use events::GameEvent;
pub use memory::InMemoryGame;
pub use types::{
    ChatChannel, GameRole, GameState, MapSize, PlayerInfo, Position, ServerState, Squad, Team,
};

use thiserror::Error;
use tokio::sync::broadcast;

/// Errors surfaced by the game capability.
///
/// These are domain errors, not transport errors: the engine reports them to
/// the client that issued the command and keeps the connection open.
#[derive(Debug, Clone, Error)]
pub enum GameError {
    /// The targeted player is not on the server.
    #[error("player {0} is not on the server")]
    PlayerNotFound(u64),

    /// A request argument was structurally valid JSON but semantically
    /// unusable (bad steam id, unknown role name, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The game refused the action in its current state.
    #[error("rejected: {0}")]
    Rejected(String),
}

/// The set of game-server operations and queries the RCON engine invokes
/// but does not implement.
///
/// Implementations must be safe to call from concurrent tasks; every method
/// is expected to complete quickly without suspending.
pub trait GameApi: Send + Sync {
    /// Returns a snapshot of the server-wide state (name, map, mode, ...).
    fn server_state(&self) -> ServerState;

    /// Returns a snapshot of the current player roster.
    fn players(&self) -> Vec<PlayerInfo>;

    // Per-player action verbs.
    fn kick(&self, steam_id: u64, reason: &str) -> Result<(), GameError>;
    fn message_player(
        &self,
        steam_id: u64,
        message: &str,
        fade_out_time: f32,
    ) -> Result<(), GameError>;
    fn kill(&self, steam_id: u64) -> Result<(), GameError>;
    fn warn_player(&self, steam_id: u64, message: &str) -> Result<(), GameError>;
    fn set_role(&self, steam_id: u64, role: GameRole) -> Result<(), GameError>;
    fn set_hp(&self, steam_id: u64, hp: f32) -> Result<(), GameError>;
    fn give_damage(&self, steam_id: u64, damage: f32) -> Result<(), GameError>;
    fn heal(&self, steam_id: u64, amount: f32) -> Result<(), GameError>;
    fn change_team(&self, steam_id: u64, team: Team) -> Result<(), GameError>;
    fn teleport(&self, steam_id: u64, position: Position) -> Result<(), GameError>;

    // Squad verbs.
    fn join_squad(&self, steam_id: u64, squad: Squad) -> Result<(), GameError>;
    fn kick_from_squad(&self, steam_id: u64) -> Result<(), GameError>;
    fn disband_player_squad(&self, steam_id: u64) -> Result<(), GameError>;
    fn promote_squad_leader(&self, steam_id: u64) -> Result<(), GameError>;
    fn set_squad_points(&self, team: Team, squad: Squad, points: i32) -> Result<(), GameError>;

    // Server-wide action verbs.
    fn announce_short(&self, message: &str) -> Result<(), GameError>;
    fn announce_long(&self, message: &str) -> Result<(), GameError>;
    fn ui_log_on_server(&self, message: &str, lifetime: f32) -> Result<(), GameError>;
    fn say_to_all_chat(&self, message: &str) -> Result<(), GameError>;
    fn say_to_chat(&self, message: &str, steam_id: u64) -> Result<(), GameError>;
    fn set_new_password(&self, password: &str) -> Result<(), GameError>;
    fn set_ping_limit(&self, limit: u32) -> Result<(), GameError>;
    fn set_loading_screen_text(&self, text: &str) -> Result<(), GameError>;
    fn set_rules_screen_text(&self, text: &str) -> Result<(), GameError>;
    fn force_start_game(&self) -> Result<(), GameError>;
    fn force_end_game(&self) -> Result<(), GameError>;
    fn stop_server(&self) -> Result<(), GameError>;
    fn close_server(&self) -> Result<(), GameError>;
    fn kick_all_players(&self) -> Result<(), GameError>;

    /// Subscribes to the game's event stream.
    ///
    /// Every subscriber receives every event emitted after the call; slow
    /// subscribers may observe `Lagged` and should continue receiving.
    fn subscribe_events(&self) -> broadcast::Receiver<GameEvent>;
}

/// Current unix timestamp in milliseconds.
pub fn current_timestamp() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
