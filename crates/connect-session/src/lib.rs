//! ConnectPy session layer.
//!
//! Everything that sits between players and the engine: the request and
//! response messages, the room that owns a game and applies the join, turn
//! and inactivity rules, configuration loading and the terminal client.

pub mod config;
pub mod protocol;
pub mod room;
pub mod terminal;

pub use config::{AppConfig, ClientConfig, ConfigError};
pub use protocol::{ClientRequest, ResponseBody, ServerResponse};
pub use room::{GameRoom, RoomError};
