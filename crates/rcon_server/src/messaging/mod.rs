//! Wire message framing
//!
//! Every client frame is a JSON object. Inbound frames carry a `command`
//! name and an optional `identifier`; the identifier is opaque to the server
//! and echoed back verbatim so clients can correlate replies. Outbound
//! frames are either command replies, error envelopes, or broadcast events
//! (events never carry an identifier).

use serde::{Deserialize, Serialize};

/// The envelope half of an inbound frame, deserialized before the command
/// name is known. Unknown fields (the command payload) are ignored at this
/// stage.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandEnvelope {
    pub command: Option<String>,
    pub identifier: Option<u32>,
}

impl CommandEnvelope {
    /// Parses just the envelope, tolerating any payload fields. Malformed
    /// JSON yields an empty envelope, which downstream reports as an
    /// invalid command.
    pub fn parse(raw: &[u8]) -> Self {
        serde_json::from_slice(raw).unwrap_or_default()
    }
}

/// A successful command reply: the command name, the echoed identifier,
/// and the command-specific body flattened alongside them.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply<T: Serialize> {
    pub command: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<u32>,
    #[serde(flatten)]
    pub body: T,
}

/// Body for commands that acknowledge without returning data.
#[derive(Debug, Serialize)]
pub struct Empty {}

/// The error envelope: `{"type":"error","message":"..."}`, with the
/// identifier echoed when the offending frame carried one.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<u32>,
}

impl ErrorEnvelope {
    pub fn new(message: String, identifier: Option<u32>) -> Self {
        Self {
            kind: "error",
            message,
            identifier,
        }
    }

    pub fn invalid_command(name: &str, identifier: Option<u32>) -> Self {
        Self::new(format!("Invalid command: {name}"), identifier)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"type":"error","message":"serialization failure"}"#.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_ignores_payload_fields() {
        let env = CommandEnvelope::parse(
            br#"{"command":"kick","identifier":9,"steamID":"1","reason":"x"}"#,
        );
        assert_eq!(env.command.as_deref(), Some("kick"));
        assert_eq!(env.identifier, Some(9));
    }

    #[test]
    fn envelope_tolerates_garbage() {
        let env = CommandEnvelope::parse(b"not json at all");
        assert!(env.command.is_none());
        assert!(env.identifier.is_none());
    }

    #[test]
    fn reply_flattens_body_and_skips_absent_identifier() {
        #[derive(Serialize)]
        struct Body {
            message: &'static str,
        }

        let reply = Reply {
            command: "ping",
            identifier: None,
            body: Body { message: "pong" },
        };
        let value: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&reply).unwrap()).unwrap();
        assert_eq!(value["command"], "ping");
        assert_eq!(value["message"], "pong");
        assert!(value.get("identifier").is_none());
    }

    #[test]
    fn error_envelope_exact_shape() {
        let json = ErrorEnvelope::invalid_command("frobnicate", None).to_json();
        assert_eq!(json, r#"{"type":"error","message":"Invalid command: frobnicate"}"#);

        let with_id = ErrorEnvelope::invalid_command("", Some(4)).to_json();
        assert_eq!(
            with_id,
            r#"{"type":"error","message":"Invalid command: ","identifier":4}"#
        );
    }
}
