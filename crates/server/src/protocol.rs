//! Wire message types for the WebSocket protocol.
//!
//! Clients send JSON-serialized [`ClientMessage`]s; the server pushes
//! [`ServerMessage`]s (defined in the engine, since they are the room's
//! observable output). Both use an internal `type` tag in snake_case.
//!
//! Unparseable client text is logged and dropped; it never reaches the room.

use serde::{Deserialize, Serialize};
use types::{Amount, ItemId};

pub use engine::events::ServerMessage;

/// A message from a connected client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Ask to join the room with a display name.
    Join { name: String },
    /// Nominate an item for the next round (current nominator only).
    Nominate { item_id: ItemId },
    /// Submit a hidden bid on the open round.
    Bid { amount: Amount },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_parses() {
        let msg: ClientMessage = serde_json::from_str(r#"{"type":"join","name":"alice"}"#).unwrap();
        assert_eq!(msg, ClientMessage::Join { name: "alice".into() });
    }

    #[test]
    fn test_nominate_parses() {
        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"nominate","item_id":3}"#).unwrap();
        assert_eq!(msg, ClientMessage::Nominate { item_id: ItemId(3) });
    }

    #[test]
    fn test_bid_parses() {
        let msg: ClientMessage = serde_json::from_str(r#"{"type":"bid","amount":25}"#).unwrap();
        assert_eq!(msg, ClientMessage::Bid { amount: 25 });
    }

    #[test]
    fn test_unknown_type_rejected() {
        let res: Result<ClientMessage, _> = serde_json::from_str(r#"{"type":"hack"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn test_client_message_round_trip() {
        let msgs = [
            ClientMessage::Join { name: "bob".into() },
            ClientMessage::Nominate { item_id: ItemId(9) },
            ClientMessage::Bid { amount: 1 },
        ];
        for msg in msgs {
            let json = serde_json::to_string(&msg).unwrap();
            let back: ClientMessage = serde_json::from_str(&json).unwrap();
            assert_eq!(back, msg);
        }
    }
}
