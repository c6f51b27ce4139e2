//! In-memory reference implementation of [`GameApi`].
//!
//! Backs the standalone binary and the test suites with a real, mutable game
//! world: a roster keyed by steam id, server-wide settings, and an event
//! channel that mutating verbs publish to. All state sits behind a single
//! mutex; every method takes the lock briefly and never suspends while
//! holding it.

use std::collections::HashMap;
use std::sync::Mutex;

use tokio::sync::broadcast;

use crate::events::GameEvent;
use crate::types::{GameRole, GameState, PlayerInfo, Position, ServerState, Squad, Team};
use crate::{GameApi, GameError};

const EVENT_CHANNEL_CAPACITY: usize = 256;
const MAX_HP: f32 = 100.0;

#[derive(Debug)]
struct World {
    server: ServerState,
    game_state: GameState,
    players: HashMap<u64, PlayerInfo>,
    squad_points: HashMap<(Team, Squad), i32>,
    ping_limit: u32,
    join_password: String,
    loading_screen_text: String,
    rules_screen_text: String,
    running: bool,
    accepting_players: bool,
}

/// Thread-safe in-memory game world.
pub struct InMemoryGame {
    world: Mutex<World>,
    events: broadcast::Sender<GameEvent>,
}

impl InMemoryGame {
    pub fn new(server: ServerState) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            world: Mutex::new(World {
                server,
                game_state: GameState::WaitingForPlayers,
                players: HashMap::new(),
                squad_points: HashMap::new(),
                ping_limit: 0,
                join_password: String::new(),
                loading_screen_text: String::new(),
                rules_screen_text: String::new(),
                running: true,
                accepting_players: true,
            }),
            events,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, World> {
        // A poisoned lock only means another thread panicked mid-update;
        // the roster itself is still usable.
        self.world.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn emit(&self, event: GameEvent) {
        // No subscribers is fine; events are fire-and-forget.
        let _ = self.events.send(event);
    }

    /// Adds a player to the roster and announces the connection.
    pub fn add_player(&self, steam_id: u64, info: PlayerInfo) {
        self.lock().players.insert(steam_id, info.clone());
        self.emit(GameEvent::OnPlayerConnected { player: info });
    }

    /// Snapshot of a single player, if present.
    pub fn player(&self, steam_id: u64) -> Option<PlayerInfo> {
        self.lock().players.get(&steam_id).cloned()
    }

    pub fn is_running(&self) -> bool {
        self.lock().running
    }

    pub fn ping_limit(&self) -> u32 {
        self.lock().ping_limit
    }

    fn with_player<T>(
        &self,
        steam_id: u64,
        f: impl FnOnce(&mut World, &mut PlayerInfo) -> T,
    ) -> Result<T, GameError> {
        let mut world = self.lock();
        let mut player = world
            .players
            .remove(&steam_id)
            .ok_or(GameError::PlayerNotFound(steam_id))?;
        let out = f(&mut world, &mut player);
        world.players.insert(steam_id, player);
        Ok(out)
    }

    fn apply_damage(&self, steam_id: u64, new_hp: f32) -> Result<(), GameError> {
        let died = self.with_player(steam_id, |_, player| {
            player.hp = new_hp.min(MAX_HP);
            if player.hp <= 0.0 && !player.is_dead {
                player.hp = 0.0;
                player.is_dead = true;
                true
            } else {
                false
            }
        })?;
        if died {
            self.emit(GameEvent::OnPlayerDied {
                steam_id: steam_id.to_string(),
            });
        }
        Ok(())
    }
}

impl GameApi for InMemoryGame {
    fn server_state(&self) -> ServerState {
        self.lock().server.clone()
    }

    fn players(&self) -> Vec<PlayerInfo> {
        self.lock().players.values().cloned().collect()
    }

    fn kick(&self, steam_id: u64, _reason: &str) -> Result<(), GameError> {
        let player = self
            .lock()
            .players
            .remove(&steam_id)
            .ok_or(GameError::PlayerNotFound(steam_id))?;
        self.emit(GameEvent::OnPlayerDisconnected { player });
        Ok(())
    }

    fn message_player(
        &self,
        steam_id: u64,
        _message: &str,
        _fade_out_time: f32,
    ) -> Result<(), GameError> {
        self.with_player(steam_id, |_, _| ())
    }

    fn kill(&self, steam_id: u64) -> Result<(), GameError> {
        self.apply_damage(steam_id, 0.0)
    }

    fn warn_player(&self, steam_id: u64, _message: &str) -> Result<(), GameError> {
        self.with_player(steam_id, |_, _| ())
    }

    fn set_role(&self, steam_id: u64, role: GameRole) -> Result<(), GameError> {
        self.with_player(steam_id, |_, player| player.role = role)?;
        self.emit(GameEvent::OnPlayerChangedRole {
            steam_id: steam_id.to_string(),
            role,
        });
        Ok(())
    }

    fn set_hp(&self, steam_id: u64, hp: f32) -> Result<(), GameError> {
        self.apply_damage(steam_id, hp)
    }

    fn give_damage(&self, steam_id: u64, damage: f32) -> Result<(), GameError> {
        let hp = self.with_player(steam_id, |_, player| player.hp)?;
        self.apply_damage(steam_id, hp - damage)
    }

    fn heal(&self, steam_id: u64, amount: f32) -> Result<(), GameError> {
        let hp = self.with_player(steam_id, |_, player| player.hp)?;
        self.with_player(steam_id, |_, player| {
            player.hp = (hp + amount).min(MAX_HP);
        })
    }

    fn change_team(&self, steam_id: u64, team: Team) -> Result<(), GameError> {
        self.with_player(steam_id, |_, player| {
            player.team = team;
            player.squad = Squad::NONE;
            player.in_squad = false;
            player.is_squad_leader = false;
        })?;
        self.emit(GameEvent::OnPlayerChangeTeam {
            steam_id: steam_id.to_string(),
            team,
        });
        Ok(())
    }

    fn teleport(&self, steam_id: u64, position: Position) -> Result<(), GameError> {
        self.with_player(steam_id, |_, player| player.position = position)
    }

    fn join_squad(&self, steam_id: u64, squad: Squad) -> Result<(), GameError> {
        let (team, as_leader) = self.with_player(steam_id, |world, player| {
            let has_leader = world.players.values().any(|p| {
                p.team == player.team && p.squad == squad && p.in_squad && p.is_squad_leader
            });
            player.squad = squad;
            player.in_squad = squad.is_some();
            player.is_squad_leader = squad.is_some() && !has_leader;
            (player.team, player.is_squad_leader)
        })?;
        if squad.is_some() {
            self.emit(GameEvent::OnPlayerJoinedSquad {
                steam_id: steam_id.to_string(),
                squad,
                team,
                as_leader,
            });
        }
        Ok(())
    }

    fn kick_from_squad(&self, steam_id: u64) -> Result<(), GameError> {
        let old_squad = self.with_player(steam_id, |_, player| {
            let old = player.squad;
            player.squad = Squad::NONE;
            player.in_squad = false;
            player.is_squad_leader = false;
            old
        })?;
        if old_squad.is_some() {
            self.emit(GameEvent::OnPlayerLeftSquad {
                steam_id: steam_id.to_string(),
                squad: old_squad,
            });
        }
        Ok(())
    }

    fn disband_player_squad(&self, steam_id: u64) -> Result<(), GameError> {
        let (team, squad) = self.with_player(steam_id, |_, player| (player.team, player.squad))?;
        if !squad.is_some() {
            return Ok(());
        }
        let removed: Vec<u64> = {
            let mut world = self.lock();
            let members: Vec<u64> = world
                .players
                .iter()
                .filter(|(_, p)| p.team == team && p.squad == squad && p.in_squad)
                .map(|(id, _)| *id)
                .collect();
            for id in &members {
                if let Some(p) = world.players.get_mut(id) {
                    p.squad = Squad::NONE;
                    p.in_squad = false;
                    p.is_squad_leader = false;
                }
            }
            members
        };
        for id in removed {
            self.emit(GameEvent::OnPlayerLeftSquad {
                steam_id: id.to_string(),
                squad,
            });
        }
        Ok(())
    }

    fn promote_squad_leader(&self, steam_id: u64) -> Result<(), GameError> {
        let (team, squad) = self.with_player(steam_id, |_, player| (player.team, player.squad))?;
        if !squad.is_some() {
            return Err(GameError::Rejected(format!(
                "player {steam_id} is not in a squad"
            )));
        }
        {
            let mut world = self.lock();
            for (id, p) in world.players.iter_mut() {
                if p.team == team && p.squad == squad && p.in_squad {
                    p.is_squad_leader = *id == steam_id;
                }
            }
        }
        self.emit(GameEvent::OnSquadLeaderChanged {
            steam_id: steam_id.to_string(),
            squad,
            team,
        });
        Ok(())
    }

    fn set_squad_points(&self, team: Team, squad: Squad, points: i32) -> Result<(), GameError> {
        self.lock().squad_points.insert((team, squad), points);
        self.emit(GameEvent::OnSquadPointsChanged {
            squad,
            new_points: points,
        });
        Ok(())
    }

    fn announce_short(&self, _message: &str) -> Result<(), GameError> {
        Ok(())
    }

    fn announce_long(&self, _message: &str) -> Result<(), GameError> {
        Ok(())
    }

    fn ui_log_on_server(&self, _message: &str, _lifetime: f32) -> Result<(), GameError> {
        Ok(())
    }

    fn say_to_all_chat(&self, _message: &str) -> Result<(), GameError> {
        Ok(())
    }

    fn say_to_chat(&self, _message: &str, steam_id: u64) -> Result<(), GameError> {
        self.with_player(steam_id, |_, _| ())
    }

    fn set_new_password(&self, password: &str) -> Result<(), GameError> {
        self.lock().join_password = password.to_string();
        Ok(())
    }

    fn set_ping_limit(&self, limit: u32) -> Result<(), GameError> {
        self.lock().ping_limit = limit;
        Ok(())
    }

    fn set_loading_screen_text(&self, text: &str) -> Result<(), GameError> {
        self.lock().loading_screen_text = text.to_string();
        Ok(())
    }

    fn set_rules_screen_text(&self, text: &str) -> Result<(), GameError> {
        self.lock().rules_screen_text = text.to_string();
        Ok(())
    }

    fn force_start_game(&self) -> Result<(), GameError> {
        let old = {
            let mut world = self.lock();
            let old = world.game_state;
            world.game_state = GameState::Playing;
            old
        };
        if old != GameState::Playing {
            self.emit(GameEvent::OnGameStateChanged {
                old_state: old,
                new_state: GameState::Playing,
            });
            self.emit(GameEvent::OnRoundStarted);
        }
        Ok(())
    }

    fn force_end_game(&self) -> Result<(), GameError> {
        let old = {
            let mut world = self.lock();
            let old = world.game_state;
            world.game_state = GameState::EndingGame;
            old
        };
        if old != GameState::EndingGame {
            self.emit(GameEvent::OnGameStateChanged {
                old_state: old,
                new_state: GameState::EndingGame,
            });
            self.emit(GameEvent::OnRoundEnded);
        }
        Ok(())
    }

    fn stop_server(&self) -> Result<(), GameError> {
        self.lock().running = false;
        Ok(())
    }

    fn close_server(&self) -> Result<(), GameError> {
        self.lock().accepting_players = false;
        Ok(())
    }

    fn kick_all_players(&self) -> Result<(), GameError> {
        let drained: Vec<PlayerInfo> = self.lock().players.drain().map(|(_, p)| p).collect();
        for player in drained {
            self.emit(GameEvent::OnPlayerDisconnected { player });
        }
        Ok(())
    }

    fn subscribe_events(&self) -> broadcast::Receiver<GameEvent> {
        self.events.subscribe()
    }
}
