//! Remote-control server - main entry point
//!
//! Loads configuration, seeds the in-memory game world, and runs the
//! WebSocket remote-control listener with graceful shutdown handling.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, warn};
use uuid::Uuid;

use game_api::{GameApi, InMemoryGame, MapSize, ServerState};
use rcon_server::config::{self, Args, Config};
use rcon_server::logging;
use rcon_server::server::RconServer;
use rcon_server::shutdown;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Parse command-line arguments
    let args = Args::parse();

    // Initialize logging system
    if let Err(e) = logging::setup_logging(&args) {
        eprintln!("Failed to initialize logging: {e}");
        return Err(anyhow::anyhow!("Failed to initialize logging: {e}"));
    }

    info!("Starting remote-control server");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = config::load_config(&args)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load config: {e}"))?;
    info!("Configuration loaded from: {}", args.config.display());

    let listen_addr = args
        .listen
        .clone()
        .unwrap_or_else(|| config.rcon_addr());
    let password = resolve_password(&args, &config);

    let game: Arc<dyn GameApi> = Arc::new(InMemoryGame::new(ServerState {
        server_name: config.game.server_name.clone(),
        map_name: config.game.map.clone(),
        map_size: MapSize::Big,
        game_mode: config.game.game_mode.clone(),
        is_day: true,
        max_players: config.game.max_players,
    }));

    let server = RconServer::new(
        listen_addr.clone(),
        password,
        config.rcon.max_command_bytes,
        game,
    );

    info!("Server configuration:");
    info!("  Listen address: {}", listen_addr);
    info!("  Game server: {} ({})", config.game.server_name, config.game.game_mode);
    info!("  Max command size: {} bytes", config.rcon.max_command_bytes);

    // Setup shutdown handler
    let shutdown_receiver = shutdown::setup_shutdown_handler().await;

    // Run the server and wait for shutdown
    tokio::select! {
        result = server.start() => {
            match result {
                Ok(_) => info!("Server stopped normally"),
                Err(e) => {
                    error!("Server error: {}", e);
                    return Err(e.into());
                }
            }
        }
        _ = shutdown_receiver => {
            info!("Shutdown signal received");
            server.shutdown();
        }
    }

    Ok(())
}

/// Determine the shared secret: CLI override, then config file, then a
/// generated one-off password (logged so operators can still connect).
fn resolve_password(args: &Args, config: &Config) -> String {
    args.password
        .clone()
        .or_else(|| config.rcon.password.clone())
        .unwrap_or_else(|| {
            let generated = Uuid::new_v4().to_string();
            warn!(
                "No password configured. Please set a secure password. Using: {}",
                generated
            );
            generated
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_resolution_precedence() {
        let mut config = Config::default();
        config.rcon.password = Some("from-config".to_string());

        let cli = Args {
            password: Some("from-cli".to_string()),
            ..Default::default()
        };
        assert_eq!(resolve_password(&cli, &config), "from-cli");

        let no_cli = Args::default();
        assert_eq!(resolve_password(&no_cli, &config), "from-config");
    }

    #[test]
    fn test_generated_password_is_unique() {
        let config = Config::default();
        let args = Args::default();
        let a = resolve_password(&args, &config);
        let b = resolve_password(&args, &config);
        assert_ne!(a, b);
        assert!(!a.is_empty());
    }
}
