//! Effect targets.
//!
//! Targets travel as strings: `f-<row>-<slot>` addresses a field slot,
//! anything else names a player.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::EngineError;
use crate::core::player::PlayerId;

/// A parsed effect target.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TargetRef {
    Player(PlayerId),
    Field { row: usize, slot: usize },
}

impl TargetRef {
    const FIELD_PREFIX: &'static str = "f-";

    #[must_use]
    pub fn field(row: usize, slot: usize) -> Self {
        TargetRef::Field { row, slot }
    }

    /// Whether `raw` uses the field notation, without validating it.
    #[must_use]
    pub fn is_field_notation(raw: &str) -> bool {
        raw.starts_with(Self::FIELD_PREFIX)
    }
}

impl FromStr for TargetRef {
    type Err = EngineError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let Some(position) = raw.strip_prefix(Self::FIELD_PREFIX) else {
            if raw.is_empty() {
                return Err(EngineError::InvalidTarget(raw.to_string()));
            }
            return Ok(TargetRef::Player(PlayerId::new(raw)));
        };

        let invalid = || EngineError::InvalidTarget(raw.to_string());
        let (row, slot) = position.split_once('-').ok_or_else(invalid)?;
        Ok(TargetRef::Field {
            row: row.parse().map_err(|_| invalid())?,
            slot: slot.parse().map_err(|_| invalid())?,
        })
    }
}

impl TryFrom<String> for TargetRef {
    type Error = EngineError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl From<TargetRef> for String {
    fn from(target: TargetRef) -> Self {
        target.to_string()
    }
}

impl std::fmt::Display for TargetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetRef::Player(id) => write!(f, "{}", id),
            TargetRef::Field { row, slot } => write!(f, "f-{}-{}", row, slot),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field() {
        assert_eq!("f-0-2".parse::<TargetRef>().unwrap(), TargetRef::field(0, 2));
        assert_eq!(TargetRef::field(4, 1).to_string(), "f-4-1");
    }

    #[test]
    fn test_parse_player() {
        assert_eq!(
            "bot1".parse::<TargetRef>().unwrap(),
            TargetRef::Player(PlayerId::new("bot1"))
        );
    }

    #[test]
    fn test_parse_malformed_field() {
        for raw in ["f-", "f-1", "f-a-2", "f-1-2-3", "f--1-0", ""] {
            assert!(
                matches!(raw.parse::<TargetRef>(), Err(EngineError::InvalidTarget(_))),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&TargetRef::field(1, 0)).unwrap();
        assert_eq!(json, "\"f-1-0\"");
        let back: TargetRef = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TargetRef::field(1, 0));
    }
}
