//! Messages exchanged between the two sessions.

use serde::{Deserialize, Serialize};

use super::error::NetError;
use crate::board::{GameConfig, Move, PieceRecord, ProtocolError};

/// One message on the wire, tagged by `"event"`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum NetEvent {
    /// Game setup, sent once by the host right after the connection opens.
    /// `config.user_color` is the color the receiving side plays.
    Initialize { config: GameConfig },
    /// A move together with the mover as it stood before moving.
    Move { mv: Move, piece: PieceRecord },
}

impl NetEvent {
    /// Serialize into a frame payload.
    pub fn to_payload(&self) -> Result<Vec<u8>, NetError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Parse a frame payload.
    pub fn from_payload(payload: &[u8]) -> Result<Self, ProtocolError> {
        serde_json::from_slice(payload).map_err(|err| ProtocolError::Malformed {
            reason: err.to_string(),
        })
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            NetEvent::Initialize { .. } => "initialize",
            NetEvent::Move { .. } => "move",
        }
    }
}
