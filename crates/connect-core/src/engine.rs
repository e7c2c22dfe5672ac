//! Core game state machine.
//!
//! This module contains the `GameEngine` struct, which owns the state of a
//! single game and enforces every rule: registration, turn order, disc drops
//! and win detection around the last drop.

use crate::config::{ConfigError, GameConfig};
use crate::grid::{self, Grid, Indicator};
use crate::player::PlayerRegistry;
use crate::snapshot::GameSnapshot;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when operating on a game
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("Player {0} already joined")]
    AlreadyJoined(String),

    #[error("Maximum players reached")]
    GameFull,

    #[error("Calling start_game before all players have connected")]
    PlayersNotReady,

    #[error("Player ID {0} not joined")]
    PlayerInvalid(String),

    #[error("Column out of bounds")]
    ColumnOutOfBounds,

    #[error("Column full")]
    FullColumn,
}

/// Coordinates `(row, column)` of a placed disc
pub type Position = (usize, usize);

/// The complete state of one game
#[derive(Debug, Clone)]
pub struct GameEngine {
    config: GameConfig,
    players: PlayerRegistry,
    /// Identifiers in turn order, fixed when the game starts
    turn_order: Vec<String>,
    /// Index into `turn_order` of the player `next_player` yields
    turn_cursor: usize,
    current_turn: Option<String>,
    winner: Option<String>,
    last_drop: Option<Position>,
    closed: Option<String>,
    started: bool,
    grid: Grid,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::with_config(GameConfig::default())
    }
}

impl GameEngine {
    /// Create an engine, rejecting non-positive dimensions
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    fn with_config(config: GameConfig) -> Self {
        Self {
            config,
            players: PlayerRegistry::new(),
            turn_order: Vec::new(),
            turn_cursor: 0,
            current_turn: None,
            winner: None,
            last_drop: None,
            closed: None,
            started: false,
            grid: Grid::default(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn players(&self) -> &PlayerRegistry {
        &self.players
    }

    /// Identifier of the player allowed to move
    pub fn current_turn(&self) -> Option<&str> {
        self.current_turn.as_deref()
    }

    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    pub fn last_drop(&self) -> Option<Position> {
        self.last_drop
    }

    /// Identifier of the player who closed the game
    pub fn closed(&self) -> Option<&str> {
        self.closed.as_deref()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.is_some()
    }

    pub fn started(&self) -> bool {
        self.started
    }

    /// Check if enough players have joined
    pub fn players_ready(&self) -> bool {
        self.players.is_full()
    }

    /// Register a player and assign it the next indicator
    pub fn add_player(&mut self, player_id: &str) -> Result<(), GameError> {
        self.players.register(player_id).map(|_| ())
    }

    /// Get the indicator for a registered player
    pub fn player_indicator(&self, player_id: &str) -> Result<Indicator, GameError> {
        self.players
            .indicator_of(player_id)
            .ok_or_else(|| GameError::PlayerInvalid(player_id.to_string()))
    }

    /// Check if it is `player_id`'s turn
    pub fn is_turn(&self, player_id: &str) -> bool {
        self.current_turn.as_deref() == Some(player_id)
    }

    /// Clear the board and fix the turn order from join order.
    ///
    /// The first player to join moves first.
    pub fn start_game(&mut self) -> Result<(), GameError> {
        if !self.players_ready() {
            return Err(GameError::PlayersNotReady);
        }

        self.reset_game();
        self.turn_order = self.players.ids().map(str::to_string).collect();
        self.turn_cursor = 0;
        self.current_turn = self.next_player();
        self.started = true;
        Ok(())
    }

    /// Clear the board, last drop and winner for a new round.
    ///
    /// Players and turn order are kept.
    pub fn reset_game(&mut self) {
        self.grid = Grid::new(self.config.rows, self.config.columns);
        self.last_drop = None;
        self.winner = None;
    }

    /// Advance the turn order and return the player it yields.
    ///
    /// Returns `None` until the game has been started.
    pub fn next_player(&mut self) -> Option<String> {
        let next = self.turn_order.get(self.turn_cursor)?.clone();
        self.turn_cursor = (self.turn_cursor + 1) % self.turn_order.len();
        Some(next)
    }

    /// Drop a disc for `player_id` into `column`.
    ///
    /// Returns `true` if the move wins. The turn passes to the next player
    /// whether or not the move wins. Turn ownership is not checked here; see
    /// [`GameEngine::is_turn`]. On error nothing changes.
    ///
    /// Columns are zero-based; negative indices are not accepted and callers
    /// holding a signed column report them as `ColumnOutOfBounds`.
    pub fn drop_disc(&mut self, player_id: &str, column: usize) -> Result<bool, GameError> {
        let indicator = self.player_indicator(player_id)?;
        let row = self.grid.drop_disc(column, indicator)?;

        self.current_turn = self.next_player();
        self.last_drop = Some((row, column));

        let won = self.is_winner(indicator, (row, column));
        if won {
            self.winner = Some(player_id.to_string());
        }
        Ok(won)
    }

    /// Check if `axis` contains a winning run of `indicator`
    pub fn axis_has_winner(&self, indicator: Indicator, axis: &[Indicator]) -> bool {
        grid::axis_has_winner(indicator, axis, self.config.win_length)
    }

    /// Check for a winning run of `indicator` through `position` on any of the
    /// four axes.
    pub fn is_winner(&self, indicator: Indicator, position: Position) -> bool {
        let (row, column) = position;
        let n = self.config.win_length;

        let horizontal = self
            .grid
            .row(row)
            .map(|cells| grid::surrounding_slice(cells, column, n).to_vec())
            .unwrap_or_default();
        let vertical = grid::surrounding_slice(&self.grid.column(column), row, n).to_vec();
        let diag_main = grid::surrounding_diag(&self.grid, row, column, n, false);
        let diag_flip = grid::surrounding_diag(&self.grid, row, column, n, true);

        [horizontal, vertical, diag_main, diag_flip]
            .iter()
            .any(|axis| self.axis_has_winner(indicator, axis))
    }

    /// Mark the game as closed by `player_id`.
    ///
    /// A closed engine is finished with; start a new session with a new engine.
    pub fn close(&mut self, player_id: &str) {
        self.closed = Some(player_id.to_string());
    }

    /// Read-only projection of the full state
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            grid: self.grid.clone(),
            turn: self.current_turn.clone(),
            players: self.players.clone(),
            winner: self.winner.clone(),
            started: self.started,
            last_drop: self.last_drop,
            rows: self.config.rows,
            columns: self.config.columns,
            closed: self.closed.clone(),
        }
    }
}
