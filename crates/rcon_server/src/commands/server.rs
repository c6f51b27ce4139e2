//! Server-wide verbs: announcements, chat, settings, lifecycle.

use serde::Deserialize;

use crate::commands::parse_steam_id;
use crate::dispatch::{CommandDescriptor, CommandRegistry};
use crate::messaging::Empty;

#[derive(Debug, Deserialize)]
struct NoArgs {}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetNewPassword {
    new_password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetPingLimit {
    new_ping: u32,
}

#[derive(Debug, Deserialize)]
struct MessageOnly {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UiLogOnServer {
    message: String,
    message_lifetime: f32,
}

#[derive(Debug, Deserialize)]
struct SayToChat {
    message: String,
    #[serde(rename = "steamID")]
    steam_id: String,
}

pub fn register(registry: &mut CommandRegistry) {
    registry.register(CommandDescriptor::new(
        "setnewpassword",
        |game, req: SetNewPassword| {
            game.set_new_password(&req.new_password)?;
            Ok(Empty {})
        },
    ));

    registry.register(CommandDescriptor::new(
        "setpinglimit",
        |game, req: SetPingLimit| {
            game.set_ping_limit(req.new_ping)?;
            Ok(Empty {})
        },
    ));

    registry.register(CommandDescriptor::new(
        "announceshort",
        |game, req: MessageOnly| {
            game.announce_short(&req.message)?;
            Ok(Empty {})
        },
    ));

    registry.register(CommandDescriptor::new(
        "announcelong",
        |game, req: MessageOnly| {
            game.announce_long(&req.message)?;
            Ok(Empty {})
        },
    ));

    registry.register(CommandDescriptor::new(
        "uilogonserver",
        |game, req: UiLogOnServer| {
            game.ui_log_on_server(&req.message, req.message_lifetime)?;
            Ok(Empty {})
        },
    ));

    registry.register(CommandDescriptor::new(
        "forcestartgame",
        |game, _req: NoArgs| {
            game.force_start_game()?;
            Ok(Empty {})
        },
    ));

    registry.register(CommandDescriptor::new(
        "forceendgame",
        |game, _req: NoArgs| {
            game.force_end_game()?;
            Ok(Empty {})
        },
    ));

    registry.register(CommandDescriptor::new(
        "saytoallchat",
        |game, req: MessageOnly| {
            game.say_to_all_chat(&req.message)?;
            Ok(Empty {})
        },
    ));

    registry.register(CommandDescriptor::new(
        "saytochat",
        |game, req: SayToChat| {
            game.say_to_chat(&req.message, parse_steam_id(&req.steam_id)?)?;
            Ok(Empty {})
        },
    ));

    registry.register(CommandDescriptor::new(
        "setloadingscreentext",
        |game, req: MessageOnly| {
            game.set_loading_screen_text(&req.message)?;
            Ok(Empty {})
        },
    ));

    registry.register(CommandDescriptor::new(
        "setrulesscreentext",
        |game, req: MessageOnly| {
            game.set_rules_screen_text(&req.message)?;
            Ok(Empty {})
        },
    ));

    registry.register(CommandDescriptor::new(
        "stopserver",
        |game, _req: NoArgs| {
            game.stop_server()?;
            Ok(Empty {})
        },
    ));

    registry.register(CommandDescriptor::new(
        "closeserver",
        |game, _req: NoArgs| {
            game.close_server()?;
            Ok(Empty {})
        },
    ));

    registry.register(CommandDescriptor::new(
        "kickallplayers",
        |game, _req: NoArgs| {
            game.kick_all_players()?;
            Ok(Empty {})
        },
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::dispatch;
    use game_api::{GameApi, InMemoryGame, MapSize, ServerState};

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

    fn registry() -> CommandRegistry {
        let mut r = CommandRegistry::new();
        register(&mut r);
        r
    }

    #[test]
    fn setpinglimit_applies_and_acknowledges() {
        let game = test_game();
        let reply = dispatch(
            &registry(),
            &game,
            br#"{"command":"setpinglimit","identifier":1,"newPing":120}"#,
        );
        let value: serde_json::Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(value["command"], "setpinglimit");
        assert_eq!(value["identifier"], 1);
        assert_eq!(game.ping_limit(), 120);
    }

    #[test]
    fn stopserver_marks_world_stopped() {
        let game = test_game();
        dispatch(&registry(), &game, br#"{"command":"stopserver"}"#);
        assert!(!game.is_running());
    }

    #[test]
    fn saytochat_rejects_bad_steam_id() {
        let game = test_game();
        let reply = dispatch(
            &registry(),
            &game,
            br#"{"command":"saytochat","message":"hi","steamID":"abc"}"#,
        );
        let value: serde_json::Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(value["type"], "error");
    }

    #[test]
    fn forcestartgame_emits_round_start() {
        let game = test_game();
        let mut events = game.subscribe_events();
        dispatch(&registry(), &game, br#"{"command":"forcestartgame"}"#);
        assert!(matches!(
            events.try_recv().unwrap(),
            game_api::GameEvent::OnGameStateChanged { .. }
        ));
    }
}
