//! Serializable view of a game for clients.
//!
//! The JSON field names are the wire contract clients rely on: `game` holds
//! the grid, `last_drop` is `[row, column]` and unset values are `null`.

use crate::engine::Position;
use crate::grid::Grid;
use crate::player::PlayerRegistry;
use serde::Serialize;

/// Read-only projection of a `GameEngine`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    #[serde(rename = "game")]
    pub grid: Grid,
    pub turn: Option<String>,
    pub players: PlayerRegistry,
    pub winner: Option<String>,
    pub started: bool,
    pub last_drop: Option<Position>,
    pub rows: usize,
    pub columns: usize,
    pub closed: Option<String>,
}

impl GameSnapshot {
    /// Serialize to a JSON string
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// The other player in the game, if one has joined
    pub fn opponent_of(&self, player_id: &str) -> Option<&str> {
        self.players.opponent_of(player_id)
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::GameEngine;
    use serde_json::json;

    #[test]
    fn test_unstarted_snapshot_shape() {
        let game = GameEngine::default();
        let value = serde_json::to_value(game.snapshot()).unwrap();
        assert_eq!(
            value,
            json!({
                "game": [],
                "turn": null,
                "players": {},
                "winner": null,
                "started": false,
                "last_drop": null,
                "rows": 6,
                "columns": 9,
                "closed": null
            })
        );
    }

    #[test]
    fn test_snapshot_after_drop() {
        let mut game = GameEngine::default();
        game.add_player("a").unwrap();
        game.add_player("b").unwrap();
        game.start_game().unwrap();
        game.drop_disc("a", 2).unwrap();

        let value = serde_json::to_value(game.snapshot()).unwrap();
        assert_eq!(value["turn"], json!("b"));
        assert_eq!(value["players"], json!({"a": 1, "b": 2}));
        assert_eq!(value["last_drop"], json!([5, 2]));
        assert_eq!(value["started"], json!(true));
        assert_eq!(value["game"][5], json!([0, 0, 1, 0, 0, 0, 0, 0, 0]));
        assert_eq!(value["game"].as_array().map(Vec::len), Some(6));
    }

    #[test]
    fn test_to_json_keeps_join_order() {
        let mut game = GameEngine::default();
        game.add_player("zed").unwrap();
        game.add_player("amy").unwrap();
        let text = game.snapshot().to_json().unwrap();
        assert!(text.contains(r#""players":{"zed":1,"amy":2}"#));
    }
}
