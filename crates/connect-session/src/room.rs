//! Game room management.
//!
//! A `GameRoom` owns the single engine a session plays on and applies the
//! rules around it: who may join, whose turn it is, resetting after a win
//! and closing idle games. It is driven through `&mut self`; whoever shares a
//! room between callers must serialize access to it.

use connect_core::{ConfigError, GameConfig, GameEngine, GameError, GameSnapshot};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::protocol::{
    ClientRequest, ServerResponse, STATUS_BAD_REQUEST, STATUS_CONFLICT, STATUS_FORBIDDEN,
    STATUS_NOT_YOUR_TURN, STATUS_UNAVAILABLE,
};

#[derive(Debug, Error)]
pub enum RoomError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error("Not your turn")]
    NotYourTurn,

    #[error("Game in progress")]
    GameInProgress,

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl RoomError {
    /// Status code reported to the client
    pub fn status_code(&self) -> u16 {
        match self {
            RoomError::Game(GameError::PlayerInvalid(_)) => STATUS_FORBIDDEN,
            RoomError::Game(GameError::AlreadyJoined(_)) => STATUS_CONFLICT,
            RoomError::Game(GameError::GameFull | GameError::PlayersNotReady) => {
                STATUS_UNAVAILABLE
            }
            RoomError::Game(GameError::ColumnOutOfBounds | GameError::FullColumn) => {
                STATUS_BAD_REQUEST
            }
            RoomError::NotYourTurn => STATUS_NOT_YOUR_TURN,
            RoomError::GameInProgress => STATUS_UNAVAILABLE,
            RoomError::BadRequest(_) => STATUS_BAD_REQUEST,
        }
    }
}

/// A room hosting one game at a time.
pub struct GameRoom {
    /// Unstarted engine cloned whenever a closed game is replaced
    blank: GameEngine,
    engine: GameEngine,
    /// Close the game when the player to move stays idle this long
    idle_timeout: Option<Duration>,
    last_activity: Instant,
}

impl GameRoom {
    pub fn new(config: GameConfig, idle_timeout: Option<Duration>) -> Result<Self, ConfigError> {
        let blank = GameEngine::new(config)?;
        Ok(Self {
            engine: blank.clone(),
            blank,
            idle_timeout,
            last_activity: Instant::now(),
        })
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.engine.snapshot()
    }

    /// Dispatch a typed request
    pub fn handle(&mut self, request: ClientRequest) -> Result<GameSnapshot, RoomError> {
        match request {
            ClientRequest::Join { player_id } => self.join(&player_id),
            ClientRequest::Status { player_id } => self.status(&player_id),
            ClientRequest::Move { player_id, column } => self.make_move(&player_id, column),
            ClientRequest::Close { player_id } => self.close(&player_id),
        }
    }

    /// Parse a JSON request and answer it
    pub fn handle_json(&mut self, text: &str) -> ServerResponse {
        let result = serde_json::from_str::<ClientRequest>(text)
            .map_err(|e| RoomError::BadRequest(e.to_string()))
            .and_then(|request| self.handle(request));

        let response = ServerResponse::from_result(result);
        debug!(status = response.status, "Handled request");
        response
    }

    /// Join the game, starting it once both players are in.
    ///
    /// Joining a closed game starts a fresh session.
    pub fn join(&mut self, player_id: &str) -> Result<GameSnapshot, RoomError> {
        if self.engine.is_closed() {
            info!("Previous game closed, starting a new session");
            self.engine = self.blank.clone();
        }
        if self.engine.started() && self.engine.players_ready() {
            return Err(RoomError::GameInProgress);
        }

        self.engine.add_player(player_id)?;
        info!(player_id, "Player joined");

        if self.engine.players_ready() {
            self.engine.start_game()?;
            self.last_activity = Instant::now();
            info!(first = ?self.engine.current_turn(), "Game started");
        }
        Ok(self.engine.snapshot())
    }

    /// Current state, for a joined player
    pub fn status(&self, player_id: &str) -> Result<GameSnapshot, RoomError> {
        self.engine.player_indicator(player_id)?;
        Ok(self.engine.snapshot())
    }

    /// Drop a disc for `player_id`.
    ///
    /// A winning move returns the state showing the winner; the board is then
    /// cleared for the next round.
    pub fn make_move(&mut self, player_id: &str, column: i64) -> Result<GameSnapshot, RoomError> {
        self.engine.player_indicator(player_id)?;
        if !self.engine.is_turn(player_id) {
            return Err(RoomError::NotYourTurn);
        }

        let column = usize::try_from(column).map_err(|_| GameError::ColumnOutOfBounds)?;
        let won = self.engine.drop_disc(player_id, column)?;
        self.last_activity = Instant::now();

        let snapshot = self.engine.snapshot();
        if won {
            info!(winner = player_id, "Round won, resetting board");
            self.engine.reset_game();
        }
        Ok(snapshot)
    }

    /// Close the game on behalf of a joined player
    pub fn close(&mut self, player_id: &str) -> Result<GameSnapshot, RoomError> {
        self.engine.player_indicator(player_id)?;
        self.engine.close(player_id);
        info!(player_id, "Game closed");
        Ok(self.engine.snapshot())
    }

    /// Close the game if the player to move has been idle past the timeout.
    ///
    /// Returns the player the game was closed for.
    pub fn close_if_idle(&mut self, now: Instant) -> Option<String> {
        let timeout = self.idle_timeout?;
        if !self.engine.started() || self.engine.is_closed() {
            return None;
        }
        if now.saturating_duration_since(self.last_activity) < timeout {
            return None;
        }

        let player = self.engine.current_turn()?.to_string();
        warn!(player_id = %player, "Closing game due to inactivity");
        self.engine.close(&player);
        Some(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::STATUS_OK;

    fn room() -> GameRoom {
        GameRoom::new(GameConfig::default(), None).unwrap()
    }

    fn started_room() -> GameRoom {
        let mut room = room();
        room.join("a").unwrap();
        room.join("b").unwrap();
        room
    }

    #[test]
    fn test_second_join_starts_game() {
        let mut room = room();
        let first = room.join("a").unwrap();
        assert!(!first.started);
        assert_eq!(first.opponent_of("a"), None);

        let second = room.join("b").unwrap();
        assert!(second.started);
        assert_eq!(second.turn.as_deref(), Some("a"));
        assert_eq!(second.opponent_of("a"), Some("b"));
    }

    #[test]
    fn test_join_already_joined() {
        let mut room = room();
        room.join("a").unwrap();
        let err = room.join("a").unwrap_err();
        assert_eq!(err.status_code(), STATUS_CONFLICT);
    }

    #[test]
    fn test_join_game_started() {
        let mut room = started_room();
        let err = room.join("c").unwrap_err();
        assert!(matches!(err, RoomError::GameInProgress));
        assert_eq!(err.status_code(), STATUS_UNAVAILABLE);
    }

    #[test]
    fn test_join_after_close_starts_new_session() {
        let mut room = started_room();
        room.make_move("a", 0).unwrap();
        room.close("b").unwrap();

        let snapshot = room.join("c").unwrap();
        assert_eq!(snapshot.closed, None);
        assert!(!snapshot.started);
        assert_eq!(snapshot.players.ids().collect::<Vec<_>>(), vec!["c"]);
    }

    #[test]
    fn test_not_joined_is_forbidden() {
        let mut room = started_room();
        for request in [
            ClientRequest::Status { player_id: "x".into() },
            ClientRequest::Move { player_id: "x".into(), column: 1 },
            ClientRequest::Close { player_id: "x".into() },
        ] {
            let err = room.handle(request).unwrap_err();
            assert_eq!(err.status_code(), STATUS_FORBIDDEN);
        }
        assert!(!room.engine().is_closed());
    }

    #[test]
    fn test_move_not_your_turn() {
        let mut room = started_room();
        let err = room.make_move("b", 1).unwrap_err();
        assert_eq!(err.status_code(), STATUS_NOT_YOUR_TURN);
        assert!(room.engine().grid().is_clear());
    }

    #[test]
    fn test_move_invalid() {
        let mut room = started_room();
        let err = room.make_move("a", 9).unwrap_err();
        assert_eq!(err.status_code(), STATUS_BAD_REQUEST);
        let err = room.make_move("a", -1).unwrap_err();
        assert!(matches!(err, RoomError::Game(GameError::ColumnOutOfBounds)));

        for _ in 0..3 {
            room.make_move("a", 2).unwrap();
            room.make_move("b", 2).unwrap();
        }
        let err = room.make_move("a", 2).unwrap_err();
        assert!(matches!(err, RoomError::Game(GameError::FullColumn)));
        assert!(room.engine().is_turn("a"));
    }

    #[test]
    fn test_move_ok() {
        let mut room = started_room();
        let snapshot = room.make_move("a", 4).unwrap();
        assert_eq!(snapshot.turn.as_deref(), Some("b"));
        assert_eq!(snapshot.last_drop, Some((5, 4)));
        assert_eq!(snapshot.winner, None);
    }

    #[test]
    fn test_winning_move_resets_board() {
        let mut room = started_room();
        for column in 0..4 {
            room.make_move("a", column).unwrap();
            room.make_move("b", column).unwrap();
        }
        let snapshot = room.make_move("a", 4).unwrap();
        assert_eq!(snapshot.winner.as_deref(), Some("a"));
        assert_eq!(snapshot.grid.occupied(), 9);

        // The room has already moved on to the next round
        assert!(room.engine().grid().is_clear());
        assert_eq!(room.engine().winner(), None);
        assert!(room.engine().is_turn("b"));
    }

    #[test]
    fn test_close_ok() {
        let mut room = started_room();
        let snapshot = room.close("b").unwrap();
        assert_eq!(snapshot.closed.as_deref(), Some("b"));
    }

    #[test]
    fn test_handle_json() {
        let mut room = room();
        let response = room.handle_json(r#"{"action": "join", "player_id": "a"}"#);
        assert_eq!(response.status, STATUS_OK);

        let response = room.handle_json(r#"{"action": "join"}"#);
        assert_eq!(response.status, STATUS_BAD_REQUEST);

        let response = room.handle_json("not json");
        assert_eq!(response.status, STATUS_BAD_REQUEST);

        room.handle_json(r#"{"action": "join", "player_id": "b"}"#);
        let response = room.handle_json(r#"{"action": "move", "player_id": "a", "column": 0}"#);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["status"], 200);
        assert_eq!(value["body"]["turn"], "b");
        assert_eq!(value["body"]["game"][5][0], 1);
    }

    #[test]
    fn test_close_if_idle() {
        let mut room = GameRoom::new(GameConfig::default(), Some(Duration::from_secs(30))).unwrap();
        assert_eq!(room.close_if_idle(Instant::now()), None);

        room.join("a").unwrap();
        room.join("b").unwrap();
        let start = room.last_activity;
        assert_eq!(room.close_if_idle(start + Duration::from_secs(29)), None);
        assert_eq!(
            room.close_if_idle(start + Duration::from_secs(30)).as_deref(),
            Some("a")
        );
        assert_eq!(room.engine().closed(), Some("a"));

        // Already closed
        assert_eq!(room.close_if_idle(start + Duration::from_secs(60)), None);
    }

    #[test]
    fn test_close_if_idle_without_timeout() {
        let mut room = started_room();
        assert_eq!(room.close_if_idle(Instant::now() + Duration::from_secs(3600)), None);
    }
}
