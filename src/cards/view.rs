//! Card view: stat resolution over arbitrary card schemas.
//!
//! Card authors lay out their documents however they like. A `CardMapping`
//! tells the engine which document field carries each canonical stat
//! (`atk`, `def`, `type`, ...), so effect code only ever asks for stats by
//! their canonical name.
//!
//! ## Lookup Precedence
//!
//! 1. Mapped stat: read the mapped field key (null if absent).
//! 2. Private fallback: read `_<stat>` if present in the raw data.
//! 3. Otherwise null.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use super::attributes::{CardRecord, Stat};
use crate::core::error::{EngineError, Result};

const ROTATION: &str = "_rotation";
const ROTATION_LOCKED: &str = "_rotation_locked";

/// Mapping from canonical stat name to document field key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardMapping {
    stats: OrdMap<String, String>,
}

impl CardMapping {
    /// Create an empty mapping (every lookup falls through to private fields).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            stats: OrdMap::new(),
        }
    }

    /// Map a stat to a field key (builder pattern).
    #[must_use]
    pub fn with(mut self, stat: impl Into<String>, key: impl Into<String>) -> Self {
        self.stats.insert(stat.into(), key.into());
        self
    }

    /// Field key for a stat, if mapped.
    #[must_use]
    pub fn key_for(&self, stat: &str) -> Option<&str> {
        self.stats.get(stat).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }
}

/// The card editor's layout: lettered value columns.
impl Default for CardMapping {
    fn default() -> Self {
        Self::empty()
            .with("name", "A_value")
            .with("type", "B_value")
            .with("class", "C_value")
            .with("atk", "E_value")
            .with("def", "F_value")
    }
}

/// A raw card record seen through a stat mapping.
///
/// Views are values: `rotate` returns a new view and leaves the
/// original untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct Card {
    data: CardRecord,
    mapping: CardMapping,
}

impl Card {
    #[must_use]
    pub fn new(data: CardRecord, mapping: CardMapping) -> Self {
        Self { data, mapping }
    }

    /// Resolve a canonical stat.
    #[must_use]
    pub fn get(&self, stat: &str) -> Stat {
        if let Some(key) = self.mapping.key_for(stat) {
            return self.data.get(key).cloned().unwrap_or_default();
        }

        self.data
            .get(&format!("_{}", stat))
            .cloned()
            .unwrap_or_default()
    }

    /// Accumulated rotation in degrees.
    #[must_use]
    pub fn rotation(&self) -> i64 {
        self.data
            .get(ROTATION)
            .and_then(Stat::as_number)
            .map_or(0, |v| v as i64)
    }

    /// Rotate the card (attack/defense stance).
    ///
    /// Rotation is additive and never normalized.
    pub fn rotate(&self, degrees: i64) -> Result<Card> {
        if self.data.get(ROTATION_LOCKED).is_some_and(Stat::is_truthy) {
            return Err(EngineError::RotationLocked);
        }

        let rotation = self.rotation() + degrees;
        Ok(Card {
            data: self.data.update(ROTATION.to_string(), Stat::Int(rotation)),
            mapping: self.mapping.clone(),
        })
    }

    /// The underlying record.
    #[must_use]
    pub fn data(&self) -> &CardRecord {
        &self.data
    }

    #[must_use]
    pub fn mapping(&self) -> &CardMapping {
        &self.mapping
    }

    /// Consume the view and return the record.
    #[must_use]
    pub fn into_data(self) -> CardRecord {
        self.data
    }
}
