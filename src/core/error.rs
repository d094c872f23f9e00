//! Engine error taxonomy.
//!
//! Every failure the engine can report surfaces as an `EngineError`.
//! A short draw (deck exhausted before the requested count) is not an
//! error; see `DrawReport`.

use thiserror::Error;

use super::player::PlayerId;
use crate::cards::{CardId, Stat};

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug)]
pub enum EngineError {
    /// Action by a non-participant, on a finished match, or out of turn
    /// where the caller asked for turn enforcement.
    #[error("Protocol violation: {0}")]
    ProtocolViolation(String),

    #[error("Match cannot get {0}")]
    UnknownCapability(String),

    /// A field-targeted effect expected a value the resolved card does not carry.
    #[error("Cannot apply {effect} on {card} - {expected} <> {actual}")]
    DataIntegrity {
        effect: String,
        card: Stat,
        expected: Stat,
        actual: Stat,
    },

    /// Every player was defeated at once; no winner can be chosen.
    #[error("All players defeated, outcome cannot be resolved")]
    UnresolvableOutcome,

    #[error("Unknown player: {0}")]
    UnknownPlayer(PlayerId),

    #[error("Unknown card: {0}")]
    UnknownCard(CardId),

    #[error("Card {card} has no numeric {stat}")]
    NonNumericStat { card: CardId, stat: String },

    #[error("Card rotation is locked")]
    RotationLocked,

    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    #[error("Invalid match document: {0}")]
    InvalidDocument(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Operation cancelled")]
    Cancelled,
}

impl EngineError {
    pub(crate) fn protocol(reason: impl Into<String>) -> Self {
        EngineError::ProtocolViolation(reason.into())
    }

    /// Errors caused by the request rather than by engine or storage state.
    pub fn is_caller_fault(&self) -> bool {
        match self {
            EngineError::ProtocolViolation(_) => true,
            EngineError::UnknownCapability(_) => true,
            EngineError::DataIntegrity { .. } => true,
            EngineError::InvalidTarget(_) => true,
            EngineError::RotationLocked => true,
            EngineError::UnknownPlayer(_) => true,
            EngineError::UnknownCard(_) => false,
            EngineError::NonNumericStat { .. } => false,
            EngineError::UnresolvableOutcome => false,
            EngineError::InvalidDocument(_) => false,
            EngineError::Serialization(_) => false,
            EngineError::Cancelled => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_capability_message() {
        let err = EngineError::UnknownCapability("can_fly".to_string());
        assert_eq!(err.to_string(), "Match cannot get can_fly");
        assert!(err.is_caller_fault());
    }

    #[test]
    fn test_data_integrity_message() {
        let err = EngineError::DataIntegrity {
            effect: "v1_prevent_rotation_continuous".to_string(),
            card: Stat::from("Golem"),
            expected: Stat::from("Beast"),
            actual: Stat::from("Construct"),
        };
        assert_eq!(
            err.to_string(),
            "Cannot apply v1_prevent_rotation_continuous on Golem - Beast <> Construct"
        );
    }

    #[test]
    fn test_outcome_not_caller_fault() {
        assert!(!EngineError::UnresolvableOutcome.is_caller_fault());
    }
}
