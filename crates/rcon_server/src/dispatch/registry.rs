//! Command registry
//!
//! A fixed table of named command handlers. Each handler is a boxed closure
//! built from a typed `(request, execute)` pair, so the lookup table stays
//! homogeneous while individual commands keep strongly typed requests and
//! responses. Names are stored lowercase and looked up case-insensitively;
//! the first registration of a name wins.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use game_api::{GameApi, GameError};

use crate::dispatch::DispatchError;
use crate::messaging::Reply;

type Handler =
    Box<dyn Fn(&dyn GameApi, &[u8], Option<u32>) -> Result<String, DispatchError> + Send + Sync>;

/// A named command: parse the full frame into the request type, run the
/// typed executor against the capability, serialize the reply.
pub struct CommandDescriptor {
    name: &'static str,
    handler: Handler,
}

impl CommandDescriptor {
    pub fn new<Req, Res, F>(name: &'static str, execute: F) -> Self
    where
        Req: DeserializeOwned,
        Res: Serialize,
        F: Fn(&dyn GameApi, Req) -> Result<Res, GameError> + Send + Sync + 'static,
    {
        let handler: Handler = Box::new(move |game, raw, identifier| {
            let request: Req = serde_json::from_slice(raw)
                .map_err(|source| DispatchError::Payload { command: name, source })?;
            let body = execute(game, request)?;
            let reply = Reply {
                command: name,
                identifier,
                body,
            };
            serde_json::to_string(&reply).map_err(DispatchError::Encode)
        });
        Self { name, handler }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn invoke(
        &self,
        game: &dyn GameApi,
        raw: &[u8],
        identifier: Option<u32>,
    ) -> Result<String, DispatchError> {
        (self.handler)(game, raw, identifier)
    }
}

/// Case-insensitive command lookup table.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, CommandDescriptor>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a command. The first registration of a name wins; later
    /// registrations of the same name are dropped.
    pub fn register(&mut self, descriptor: CommandDescriptor) {
        self.commands
            .entry(descriptor.name().to_ascii_lowercase())
            .or_insert(descriptor);
    }

    pub fn lookup(&self, name: &str) -> Option<&CommandDescriptor> {
        self.commands.get(&name.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messaging::Empty;
    use game_api::{InMemoryGame, MapSize, ServerState};
    use serde::Deserialize;

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

    #[derive(Deserialize)]
    struct NoArgs {}

    fn noop(name: &'static str) -> CommandDescriptor {
        CommandDescriptor::new(name, |_game, _req: NoArgs| Ok(Empty {}))
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let mut registry = CommandRegistry::new();
        registry.register(noop("kick"));

        assert!(registry.lookup("kick").is_some());
        assert!(registry.lookup("KICK").is_some());
        assert!(registry.lookup("KiCk").is_some());
        assert!(registry.lookup("kicked").is_none());
    }

    #[test]
    fn first_registration_wins() {
        let mut registry = CommandRegistry::new();
        registry.register(CommandDescriptor::new("ping", |_g, _r: NoArgs| {
            Ok(serde_json::json!({"which": "first"}))
        }));
        registry.register(CommandDescriptor::new("PING", |_g, _r: NoArgs| {
            Ok(serde_json::json!({"which": "second"}))
        }));
        assert_eq!(registry.len(), 1);

        let game = test_game();
        let reply = registry
            .lookup("ping")
            .unwrap()
            .invoke(&game, b"{}", None)
            .unwrap();
        assert!(reply.contains("first"));
    }

    #[test]
    fn invoke_echoes_identifier() {
        let registry = {
            let mut r = CommandRegistry::new();
            r.register(noop("ping"));
            r
        };
        let game = test_game();
        let reply = registry
            .lookup("ping")
            .unwrap()
            .invoke(&game, b"{}", Some(17))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(value["identifier"], 17);
        assert_eq!(value["command"], "ping");
    }
}
