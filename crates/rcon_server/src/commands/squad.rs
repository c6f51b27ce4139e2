//! Squad verbs: membership, leadership, points.

use serde::Deserialize;

use game_api::{Squad, Team};

use crate::commands::parse_steam_id;
use crate::dispatch::{CommandDescriptor, CommandRegistry};
use crate::messaging::Empty;

#[derive(Debug, Deserialize)]
struct SteamIdOnly {
    #[serde(rename = "steamID")]
    steam_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JoinSquad {
    #[serde(rename = "steamID")]
    steam_id: String,
    target_squad: u8,
}

#[derive(Debug, Deserialize)]
struct SetSquadPointsOf {
    team: i32,
    squad: u8,
    points: i32,
}

pub fn register(registry: &mut CommandRegistry) {
    registry.register(CommandDescriptor::new(
        "kickfromsquad",
        |game, req: SteamIdOnly| {
            game.kick_from_squad(parse_steam_id(&req.steam_id)?)?;
            Ok(Empty {})
        },
    ));

    registry.register(CommandDescriptor::new(
        "joinsquad",
        |game, req: JoinSquad| {
            game.join_squad(parse_steam_id(&req.steam_id)?, Squad(req.target_squad))?;
            Ok(Empty {})
        },
    ));

    registry.register(CommandDescriptor::new(
        "disbandplayersquad",
        |game, req: SteamIdOnly| {
            game.disband_player_squad(parse_steam_id(&req.steam_id)?)?;
            Ok(Empty {})
        },
    ));

    registry.register(CommandDescriptor::new(
        "promotesquadleader",
        |game, req: SteamIdOnly| {
            game.promote_squad_leader(parse_steam_id(&req.steam_id)?)?;
            Ok(Empty {})
        },
    ));

    registry.register(CommandDescriptor::new(
        "setsquadpointsof",
        |game, req: SetSquadPointsOf| {
            game.set_squad_points(Team(req.team), Squad(req.squad), req.points)?;
            Ok(Empty {})
        },
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::dispatch;
    use game_api::{
        GameApi, GameEvent, GameRole, InMemoryGame, MapSize, PlayerInfo, Position, ServerState,
    };

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
    fn joinsquad_then_kickfromsquad() {
        let game = test_game();
        dispatch(
            &registry(),
            &game,
            br#"{"command":"joinsquad","steamID":"7","targetSquad":3}"#,
        );
        assert!(game.player(7).unwrap().in_squad);

        dispatch(
            &registry(),
            &game,
            br#"{"command":"kickfromsquad","steamID":"7"}"#,
        );
        assert!(!game.player(7).unwrap().in_squad);
    }

    #[test]
    fn setsquadpointsof_emits_points_event() {
        let game = test_game();
        let mut events = game.subscribe_events();
        let reply = dispatch(
            &registry(),
            &game,
            br#"{"command":"setsquadpointsof","identifier":2,"team":0,"squad":5,"points":400}"#,
        );
        let value: serde_json::Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(value["command"], "setsquadpointsof");
        assert_eq!(value["identifier"], 2);
        assert!(matches!(
            events.try_recv().unwrap(),
            GameEvent::OnSquadPointsChanged {
                squad: Squad(5),
                new_points: 400,
            }
        ));
    }

    #[test]
    fn promotesquadleader_outside_squad_errors() {
        let game = test_game();
        let reply = dispatch(
            &registry(),
            &game,
            br#"{"command":"promotesquadleader","steamID":"7"}"#,
        );
        let value: serde_json::Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(value["type"], "error");
    }
}
