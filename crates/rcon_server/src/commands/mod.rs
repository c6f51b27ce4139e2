//! Built-in command set
//!
//! The full, fixed set of operator commands. The set is closed by design:
//! clients cannot register commands, and nothing is discovered at runtime.
//! Commands are grouped by what they touch: read-only queries ([`info`]),
//! server-wide verbs ([`server`]), per-player verbs ([`player`]), and squad
//! verbs ([`squad`]).

pub mod info;
pub mod player;
pub mod server;
pub mod squad;

use game_api::GameError;

use crate::dispatch::CommandRegistry;

/// Builds the registry holding every built-in command.
pub fn builtin_commands() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    info::register(&mut registry);
    server::register(&mut registry);
    player::register(&mut registry);
    squad::register(&mut registry);
    registry
}

/// Steam ids travel as decimal strings on the wire.
pub(crate) fn parse_steam_id(raw: &str) -> Result<u64, GameError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| GameError::InvalidArgument(format!("invalid steamID: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_COMMANDS: &[&str] = &[
        "ping",
        "playerlist",
        "state",
        "kick",
        "messageplayer",
        "setnewpassword",
        "setpinglimit",
        "announceshort",
        "announcelong",
        "uilogonserver",
        "forcestartgame",
        "forceendgame",
        "saytoallchat",
        "saytochat",
        "setloadingscreentext",
        "setrulesscreentext",
        "stopserver",
        "closeserver",
        "kickallplayers",
        "kill",
        "changeteam",
        "kickfromsquad",
        "joinsquad",
        "disbandplayersquad",
        "promotesquadleader",
        "teleport",
        "warnplayer",
        "setroleto",
        "sethp",
        "givedamage",
        "heal",
        "setsquadpointsof",
    ];

    #[test]
    fn every_builtin_command_resolves() {
        let registry = builtin_commands();
        for name in ALL_COMMANDS {
            assert!(registry.lookup(name).is_some(), "missing command: {name}");
        }
        assert_eq!(registry.len(), ALL_COMMANDS.len());
    }

    #[test]
    fn steam_id_parsing() {
        assert_eq!(parse_steam_id("76561198000000001").unwrap(), 76561198000000001);
        assert_eq!(parse_steam_id(" 42 ").unwrap(), 42);
        assert!(parse_steam_id("not-a-number").is_err());
        assert!(parse_steam_id("-1").is_err());
    }
}
