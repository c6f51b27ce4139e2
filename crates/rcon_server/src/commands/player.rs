//! Per-player verbs: kick, messaging, health, role, team, teleport.

use serde::Deserialize;

use game_api::{GameError, GameRole, Position, Team};

use crate::commands::parse_steam_id;
use crate::dispatch::{CommandDescriptor, CommandRegistry};
use crate::messaging::Empty;

#[derive(Debug, Deserialize)]
struct Kick {
    #[serde(rename = "steamID")]
    steam_id: String,
    reason: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessagePlayer {
    #[serde(rename = "steamID")]
    steam_id: String,
    message: String,
    fade_out_time: f32,
}

#[derive(Debug, Deserialize)]
struct SteamIdOnly {
    #[serde(rename = "steamID")]
    steam_id: String,
}

#[derive(Debug, Deserialize)]
struct ChangeTeam {
    #[serde(rename = "steamID")]
    steam_id: String,
    team: i32,
}

#[derive(Debug, Deserialize)]
struct Teleport {
    #[serde(rename = "steamID")]
    steam_id: String,
    x: f32,
    y: f32,
    z: f32,
}

#[derive(Debug, Deserialize)]
struct WarnPlayer {
    #[serde(rename = "steamID")]
    steam_id: String,
    message: String,
}

#[derive(Debug, Deserialize)]
struct SetRoleTo {
    #[serde(rename = "steamID")]
    steam_id: String,
    role: String,
}

#[derive(Debug, Deserialize)]
struct SetHp {
    #[serde(rename = "steamID")]
    steam_id: String,
    hp: f32,
}

#[derive(Debug, Deserialize)]
struct GiveDamage {
    #[serde(rename = "steamID")]
    steam_id: String,
    damage: f32,
}

#[derive(Debug, Deserialize)]
struct Heal {
    #[serde(rename = "steamID")]
    steam_id: String,
    heal: f32,
}

pub fn register(registry: &mut CommandRegistry) {
    registry.register(CommandDescriptor::new("kick", |game, req: Kick| {
        game.kick(parse_steam_id(&req.steam_id)?, &req.reason)?;
        Ok(Empty {})
    }));

    registry.register(CommandDescriptor::new(
        "messageplayer",
        |game, req: MessagePlayer| {
            game.message_player(
                parse_steam_id(&req.steam_id)?,
                &req.message,
                req.fade_out_time,
            )?;
            Ok(Empty {})
        },
    ));

    registry.register(CommandDescriptor::new("kill", |game, req: SteamIdOnly| {
        game.kill(parse_steam_id(&req.steam_id)?)?;
        Ok(Empty {})
    }));

    registry.register(CommandDescriptor::new(
        "changeteam",
        |game, req: ChangeTeam| {
            game.change_team(parse_steam_id(&req.steam_id)?, Team(req.team))?;
            Ok(Empty {})
        },
    ));

    registry.register(CommandDescriptor::new("teleport", |game, req: Teleport| {
        game.teleport(
            parse_steam_id(&req.steam_id)?,
            Position {
                x: req.x,
                y: req.y,
                z: req.z,
            },
        )?;
        Ok(Empty {})
    }));

    registry.register(CommandDescriptor::new(
        "warnplayer",
        |game, req: WarnPlayer| {
            game.warn_player(parse_steam_id(&req.steam_id)?, &req.message)?;
            Ok(Empty {})
        },
    ));

    registry.register(CommandDescriptor::new(
        "setroleto",
        |game, req: SetRoleTo| {
            let role: GameRole = req
                .role
                .parse()
                .map_err(GameError::InvalidArgument)?;
            game.set_role(parse_steam_id(&req.steam_id)?, role)?;
            Ok(Empty {})
        },
    ));

    registry.register(CommandDescriptor::new("sethp", |game, req: SetHp| {
        game.set_hp(parse_steam_id(&req.steam_id)?, req.hp)?;
        Ok(Empty {})
    }));

    registry.register(CommandDescriptor::new(
        "givedamage",
        |game, req: GiveDamage| {
            game.give_damage(parse_steam_id(&req.steam_id)?, req.damage)?;
            Ok(Empty {})
        },
    ));

    registry.register(CommandDescriptor::new("heal", |game, req: Heal| {
        game.heal(parse_steam_id(&req.steam_id)?, req.heal)?;
        Ok(Empty {})
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::dispatch;
    use game_api::{InMemoryGame, MapSize, PlayerInfo, ServerState, Squad};

    fn test_game() -> InMemoryGame {
        let game = InMemoryGame::new(ServerState {
            server_name: "t".to_string(),
            map_name: "m".to_string(),
            map_size: MapSize::Small,
            game_mode: "CONQ".to_string(),
            is_day: true,
            max_players: 16,
        });
        game.add_player(
            7,
            PlayerInfo {
                in_vehicle: false,
                name: "Alice".to_string(),
                ip: "127.0.0.1".to_string(),
                role: GameRole::Assault,
                team: Team::A,
                squad: Squad::NONE,
                steam_id: "7".to_string(),
                position: Position::default(),
                is_dead: false,
                in_squad: false,
                ping_ms: 20,
                is_squad_leader: false,
                hp: 100.0,
            },
        );
        game
    }

    fn registry() -> CommandRegistry {
        let mut r = CommandRegistry::new();
        register(&mut r);
        r
    }

    #[test]
    fn kick_removes_player() {
        let game = test_game();
        let reply = dispatch(
            &registry(),
            &game,
            br#"{"command":"kick","identifier":1,"steamID":"7","reason":"afk"}"#,
        );
        let value: serde_json::Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(value["command"], "kick");
        assert_eq!(value["identifier"], 1);
        assert!(game.player(7).is_none());
    }

    #[test]
    fn setroleto_rejects_unknown_role() {
        let game = test_game();
        let reply = dispatch(
            &registry(),
            &game,
            br#"{"command":"setroleto","steamID":"7","role":"Pilot"}"#,
        );
        let value: serde_json::Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(value["type"], "error");
        assert_eq!(game.player(7).unwrap().role, GameRole::Assault);
    }

    #[test]
    fn setroleto_applies_named_role() {
        let game = test_game();
        dispatch(
            &registry(),
            &game,
            br#"{"command":"setroleto","steamID":"7","role":"Recon"}"#,
        );
        assert_eq!(game.player(7).unwrap().role, GameRole::Recon);
    }

    #[test]
    fn teleport_moves_player() {
        let game = test_game();
        dispatch(
            &registry(),
            &game,
            br#"{"command":"teleport","steamID":"7","x":1.5,"y":2.0,"z":-3.0}"#,
        );
        let pos = game.player(7).unwrap().position;
        assert_eq!((pos.x, pos.y, pos.z), (1.5, 2.0, -3.0));
    }

    #[test]
    fn sethp_to_zero_kills() {
        let game = test_game();
        dispatch(
            &registry(),
            &game,
            br#"{"command":"sethp","steamID":"7","hp":0.0}"#,
        );
        assert!(game.player(7).unwrap().is_dead);
    }

    #[test]
    fn changeteam_uses_numeric_team() {
        let game = test_game();
        dispatch(
            &registry(),
            &game,
            br#"{"command":"changeteam","steamID":"7","team":1}"#,
        );
        assert_eq!(game.player(7).unwrap().team, Team::B);
    }
}
