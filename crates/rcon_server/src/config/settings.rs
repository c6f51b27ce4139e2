//! Configuration settings structures
//!
//! This module defines all the configuration structures used by the server:
//! game-server identity, remote-control listener settings, and logging
//! options.

use serde::{Deserialize, Serialize};

/// Main configuration structure
///
/// This is the root configuration object that contains all server settings.
/// It can be serialized to/from TOML format for configuration files.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Config {
    /// Identity of the game server being controlled
    pub game: GameSettings,
    /// Remote-control listener settings
    pub rcon: RconSettings,
    /// Optional logging configuration
    pub logging: Option<LoggingSettings>,
}

/// Game-server identity settings
///
/// Describes the game server this process fronts. The in-memory world is
/// seeded from these values.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GameSettings {
    /// Display name reported by the `state` command
    pub server_name: String,

    /// Port the game server itself listens on
    ///
    /// When no explicit remote-control port is configured, the listener
    /// binds to this port plus one.
    pub port: u16,

    /// Current map name
    pub map: String,

    /// Current game mode identifier
    pub game_mode: String,

    /// Maximum number of concurrent players
    pub max_players: u32,
}

/// Remote-control listener settings
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct RconSettings {
    /// IP address to bind the listener to
    pub listen_ip: String,

    /// Port to bind the listener to
    ///
    /// Defaults to the game port plus one when absent.
    pub port: Option<u16>,

    /// Shared secret clients must present in the `x-password` header
    ///
    /// When absent (and not supplied on the command line), a random
    /// password is generated at startup and logged.
    pub password: Option<String>,

    /// Upper bound on a single command frame, in bytes
    ///
    /// Larger frames are answered with an error and discarded without
    /// closing the connection.
    #[serde(default = "default_max_command_bytes")]
    pub max_command_bytes: usize,
}

fn default_max_command_bytes() -> usize {
    4096
}

/// Logging system configuration
///
/// Controls how the server outputs log messages and diagnostic information.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LoggingSettings {
    /// Logging level filter
    ///
    /// Valid values: "trace", "debug", "info", "warn", "error"
    pub level: String,

    /// Enable JSON-formatted log output
    ///
    /// When true, logs are output in structured JSON format,
    /// useful for log aggregation systems.
    pub json_format: bool,
}

impl Config {
    /// Effective listener address: configured port, or game port + 1.
    pub fn rcon_addr(&self) -> String {
        let port = self.rcon.port.unwrap_or(self.game.port + 1);
        format!("{}:{}", self.rcon.listen_ip, port)
    }
}

impl Default for Config {
    /// Create a default configuration suitable for development
    fn default() -> Self {
        Self {
            game: GameSettings {
                server_name: "Game Server".to_string(),
                port: 29294,
                map: "Valley".to_string(),
                game_mode: "CONQ".to_string(),
                max_players: 64,
            },
            rcon: RconSettings {
                listen_ip: "0.0.0.0".to_string(),
                port: None,
                password: None,
                max_command_bytes: default_max_command_bytes(),
            },
            logging: Some(LoggingSettings {
                level: "info".to_string(),
                json_format: false,
            }),
        }
    }
}
