//! Configuration module for the remote-control server
//!
//! This module handles command-line arguments, configuration file parsing,
//! and provides default settings for the server.

pub mod args;
pub mod settings;

pub use args::Args;
pub use settings::{Config, GameSettings, LoggingSettings, RconSettings};

use anyhow::Result;
use tracing::{info, warn};

/// Load configuration from file or create default configuration
///
/// Attempts to load configuration from the specified file. If the file
/// doesn't exist, it creates a default configuration file and returns the
/// default settings.
///
/// # Arguments
/// * `args` - Command line arguments containing the config file path
///
/// # Returns
/// * `Result<Config>` - The loaded or default configuration
///
/// # Errors
/// * Returns error if file I/O operations fail
/// * Returns error if TOML parsing fails
pub async fn load_config(args: &Args) -> Result<Config> {
    if args.config.exists() {
        let config_str = tokio::fs::read_to_string(&args.config).await?;
        match toml::de::from_str::<Config>(&config_str) {
            Ok(config) => Ok(config),
            Err(e) => {
                warn!("Failed to parse config file {}: {}", args.config.display(), e);
                Err(e.into())
            }
        }
    } else {
        warn!("Configuration file not found: {}, using defaults", args.config.display());

        // Create default config file
        let default_config = Config::default();
        let config_str = toml::to_string_pretty(&default_config)?;
        tokio::fs::write(&args.config, config_str).await?;
        info!("Created default configuration file: {}", args.config.display());

        Ok(default_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_load_config_default() {
        let temp_file = NamedTempFile::new().unwrap();
        let args = Args {
            config: temp_file.path().to_path_buf(),
            ..Default::default()
        };

        // Delete the file to test default creation
        drop(temp_file);

        let config = load_config(&args).await.unwrap();
        assert_eq!(config.rcon.listen_ip, "0.0.0.0");
        assert!(config.rcon.port.is_none());
    }

    #[tokio::test]
    async fn test_load_config_existing() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let config_content = r#"
[game]
server_name = "My Server"
port = 29294
map = "Valley"
game_mode = "CONQ"
max_players = 64

[rcon]
listen_ip = "127.0.0.1"
port = 31337
password = "hunter2"
max_command_bytes = 8192

[logging]
level = "info"
json_format = false
        "#;

        temp_file.write_all(config_content.as_bytes()).unwrap();

        let args = Args {
            config: temp_file.path().to_path_buf(),
            ..Default::default()
        };

        let config = load_config(&args).await.unwrap();
        assert_eq!(config.rcon.listen_ip, "127.0.0.1");
        assert_eq!(config.rcon.port, Some(31337));
        assert_eq!(config.rcon.password.as_deref(), Some("hunter2"));
        assert_eq!(config.rcon.max_command_bytes, 8192);
        assert_eq!(config.rcon_addr(), "127.0.0.1:31337");
    }
}
