//! Player registration.
//!
//! Players are identified by caller-supplied strings and receive an
//! indicator (1, then 2) in the order they join.

use crate::engine::GameError;
use crate::grid::Indicator;
use serde::ser::{Serialize, Serializer};

/// Maximum number of players in a game
pub const MAX_PLAYERS: usize = 2;

/// A registered player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Caller-supplied identifier
    pub id: String,
    /// Indicator marking this player's discs on the grid
    pub indicator: Indicator,
}

/// Join-ordered registry of at most `MAX_PLAYERS` players.
///
/// Serializes as a map from identifier to indicator, in join order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerRegistry {
    players: Vec<Player>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered players
    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Check if no more players can join
    pub fn is_full(&self) -> bool {
        self.players.len() >= MAX_PLAYERS
    }

    pub fn contains(&self, id: &str) -> bool {
        self.players.iter().any(|p| p.id == id)
    }

    /// Register `id` with the next indicator
    pub fn register(&mut self, id: &str) -> Result<Indicator, GameError> {
        if self.is_full() {
            return Err(GameError::GameFull);
        }
        if self.contains(id) {
            return Err(GameError::AlreadyJoined(id.to_string()));
        }

        let indicator = self.players.len() as Indicator + 1;
        self.players.push(Player {
            id: id.to_string(),
            indicator,
        });
        Ok(indicator)
    }

    /// Get the indicator assigned to `id`
    pub fn indicator_of(&self, id: &str) -> Option<Indicator> {
        self.players
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.indicator)
    }

    /// The other registered player, if any
    pub fn opponent_of(&self, id: &str) -> Option<&str> {
        self.players
            .iter()
            .find(|p| p.id != id)
            .map(|p| p.id.as_str())
    }

    /// Identifiers in join order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.players.iter().map(|p| p.id.as_str())
    }
}

impl Serialize for PlayerRegistry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.players.iter().map(|p| (&p.id, p.indicator)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicators_follow_join_order() {
        let mut registry = PlayerRegistry::new();
        assert_eq!(registry.register("zed"), Ok(1));
        assert_eq!(registry.register("amy"), Ok(2));

        assert_eq!(registry.indicator_of("zed"), Some(1));
        assert_eq!(registry.indicator_of("amy"), Some(2));
        assert_eq!(registry.ids().collect::<Vec<_>>(), vec!["zed", "amy"]);
    }

    #[test]
    fn test_register_rejects_duplicates_and_third_player() {
        let mut registry = PlayerRegistry::new();
        registry.register("a").unwrap();
        assert_eq!(
            registry.register("a"),
            Err(GameError::AlreadyJoined("a".to_string()))
        );
        registry.register("b").unwrap();
        assert!(registry.is_full());

        // Full takes precedence, even for a known id
        assert_eq!(registry.register("a"), Err(GameError::GameFull));
        assert_eq!(registry.register("c"), Err(GameError::GameFull));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_opponent() {
        let mut registry = PlayerRegistry::new();
        registry.register("a").unwrap();
        assert_eq!(registry.opponent_of("a"), None);
        registry.register("b").unwrap();
        assert_eq!(registry.opponent_of("a"), Some("b"));
        assert_eq!(registry.opponent_of("b"), Some("a"));
    }

    #[test]
    fn test_serializes_in_join_order() {
        let mut registry = PlayerRegistry::new();
        registry.register("zed").unwrap();
        registry.register("amy").unwrap();
        let json = serde_json::to_string(&registry).unwrap();
        assert_eq!(json, r#"{"zed":1,"amy":2}"#);
    }
}
