//! Engine configuration.
//!
//! Hosts build an `EngineConfig` once at startup (or load it from JSON)
//! and pass it to match setup, the submission guard and bots.

use serde::{Deserialize, Serialize};

use super::error::Result;
use crate::cards::CardMapping;

/// Bounded wait used by bots whose hand is empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitPolicy {
    /// Reload attempts before giving up on the hand.
    pub attempts: u32,

    /// Pause between attempts, in milliseconds.
    pub interval_ms: u64,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            attempts: 5,
            interval_ms: 1_000,
        }
    }
}

impl WaitPolicy {
    #[must_use]
    pub fn interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.interval_ms)
    }
}

/// Engine configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Field rows in a new match.
    pub rows: usize,

    /// Slots per field row in a new match.
    pub slots: usize,

    /// Hit points (and max hit points) every player starts with.
    pub starting_hp: i64,

    /// Cards dealt to each player in the opening turn.
    pub opening_draw: usize,

    /// Cards a bot draws when it picks the draw option.
    pub bot_draw: usize,

    /// Rows (from the top of the grid) a bot may place cards into.
    pub bot_rows: usize,

    /// Stat mapping for libraries built with `CardLibrary::for_config`.
    pub card_mapping: CardMapping,

    /// How long a bot waits for cards to reach its empty hand.
    pub hand_wait: WaitPolicy,

    /// Reject submitted events from players who do not hold the turn.
    pub enforce_turn: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rows: 6,
            slots: 3,
            starting_hp: 5_000,
            opening_draw: 3,
            bot_draw: 3,
            bot_rows: 3,
            card_mapping: CardMapping::default(),
            hand_wait: WaitPolicy::default(),
            enforce_turn: false,
        }
    }
}

impl EngineConfig {
    /// Load a config from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the field grid shape.
    #[must_use]
    pub fn with_grid(mut self, rows: usize, slots: usize) -> Self {
        self.rows = rows;
        self.slots = slots;
        self
    }

    #[must_use]
    pub fn with_starting_hp(mut self, hp: i64) -> Self {
        self.starting_hp = hp;
        self
    }

    #[must_use]
    pub fn with_opening_draw(mut self, count: usize) -> Self {
        self.opening_draw = count;
        self
    }

    #[must_use]
    pub fn with_bot_draw(mut self, count: usize) -> Self {
        self.bot_draw = count;
        self
    }

    #[must_use]
    pub fn with_bot_rows(mut self, rows: usize) -> Self {
        self.bot_rows = rows;
        self
    }

    #[must_use]
    pub fn with_card_mapping(mut self, mapping: CardMapping) -> Self {
        self.card_mapping = mapping;
        self
    }

    #[must_use]
    pub fn with_hand_wait(mut self, attempts: u32, interval_ms: u64) -> Self {
        self.hand_wait = WaitPolicy {
            attempts,
            interval_ms,
        };
        self
    }

    #[must_use]
    pub fn with_enforce_turn(mut self, enforce: bool) -> Self {
        self.enforce_turn = enforce;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!((config.rows, config.slots), (6, 3));
        assert_eq!(config.starting_hp, 5_000);
        assert_eq!(config.bot_draw, 3);
        assert_eq!(config.hand_wait.attempts, 5);
        assert!(!config.enforce_turn);
    }

    #[test]
    fn test_builder_pattern() {
        let config = EngineConfig::default()
            .with_grid(2, 2)
            .with_starting_hp(30)
            .with_hand_wait(2, 0)
            .with_enforce_turn(true);

        assert_eq!((config.rows, config.slots), (2, 2));
        assert_eq!(config.starting_hp, 30);
        assert_eq!(config.hand_wait.interval(), std::time::Duration::ZERO);
        assert!(config.enforce_turn);
    }

    #[test]
    fn test_from_json_partial() {
        let config = EngineConfig::from_json(r#"{"starting_hp": 40, "card_mapping": {"atk": "power"}}"#)
            .unwrap();

        assert_eq!(config.starting_hp, 40);
        assert_eq!(config.rows, 6);
        assert_eq!(config.card_mapping.key_for("atk"), Some("power"));
        assert_eq!(config.card_mapping.key_for("def"), None);
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(EngineConfig::from_json("{not json").is_err());
    }
}
