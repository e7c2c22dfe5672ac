//! JSON request/response messages for ConnectPy clients.
//!
//! Every request names the acting player. Every response carries a status
//! code and either the game snapshot or an error message.

use connect_core::GameSnapshot;
use serde::{Deserialize, Serialize};

use crate::room::RoomError;

/// Success
pub const STATUS_OK: u16 = 200;
/// Malformed request or illegal move
pub const STATUS_BAD_REQUEST: u16 = 400;
/// Player has not joined
pub const STATUS_FORBIDDEN: u16 = 403;
/// Player name already taken
pub const STATUS_CONFLICT: u16 = 409;
/// Move attempted out of turn
pub const STATUS_NOT_YOUR_TURN: u16 = 420;
/// Game already has two players
pub const STATUS_UNAVAILABLE: u16 = 503;

/// Messages sent from client to server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ClientRequest {
    /// Join the game; the second join starts it
    Join { player_id: String },

    /// Fetch the current state
    Status { player_id: String },

    /// Drop a disc into a zero-based column
    Move { player_id: String, column: i64 },

    /// End the game for everyone
    Close { player_id: String },
}

impl ClientRequest {
    /// The player making the request
    pub fn player_id(&self) -> &str {
        match self {
            ClientRequest::Join { player_id }
            | ClientRequest::Status { player_id }
            | ClientRequest::Move { player_id, .. }
            | ClientRequest::Close { player_id } => player_id,
        }
    }
}

/// Message sent from server to client.
#[derive(Debug, Clone, Serialize)]
pub struct ServerResponse {
    pub status: u16,
    pub body: ResponseBody,
}

/// Response payload
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    /// Full game state
    State(GameSnapshot),
    /// Why the request was rejected
    Error { error: String },
}

impl ServerResponse {
    pub fn ok(snapshot: GameSnapshot) -> Self {
        Self {
            status: STATUS_OK,
            body: ResponseBody::State(snapshot),
        }
    }

    pub fn error(err: &RoomError) -> Self {
        Self {
            status: err.status_code(),
            body: ResponseBody::Error {
                error: err.to_string(),
            },
        }
    }

    pub fn from_result(result: Result<GameSnapshot, RoomError>) -> Self {
        match result {
            Ok(snapshot) => Self::ok(snapshot),
            Err(e) => Self::error(&e),
        }
    }
}
