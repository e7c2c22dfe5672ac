//! ConnectPy - a two-player drop-disc connect game engine
//!
//! This crate provides the core game logic for ConnectPy, including:
//! - The board grid and disc dropping
//! - Player registration and round-robin turn order
//! - Win detection along rows, columns and both diagonals
//! - A serializable snapshot of the full game state
//!
//! # Architecture
//!
//! The engine is pure in-memory logic with no I/O and no internal locking.
//! Callers (a server, a terminal client, the WebAssembly bindings) own an
//! engine instance and serialize access to it themselves.
//!
//! # Modules
//!
//! - [`grid`]: Cell matrix and the axis/window helpers used for win detection
//! - [`player`]: Join-ordered player registry
//! - [`config`]: Board dimensions and win length
//! - [`engine`]: Game state machine
//! - [`snapshot`]: Wire projection of the game state

pub mod config;
pub mod engine;
pub mod grid;
pub mod player;
pub mod snapshot;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use config::{ConfigError, GameConfig};
pub use engine::{GameEngine, GameError, Position};
pub use grid::{Grid, Indicator, EMPTY};
pub use player::{Player, PlayerRegistry, MAX_PLAYERS};
pub use snapshot::GameSnapshot;
