//! Events: the append-only facts recorded in each turn.
//!
//! An event is an `(actor, attribute, value)` triple. The attribute is
//! either one of the game actions the engine understands (`draw`,
//! `end_turn`, `life`) or a free-text narrative line describing an effect.
//!
//! Events are stored as three-element arrays: `["p1", "draw", 3]`.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::cards::Stat;

/// What an event records.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Attribute {
    /// Cards drawn; value is the requested count.
    Draw,
    /// The actor closed their turn.
    EndTurn,
    /// Hit point change; value is the signed delta.
    Life,
    /// Free-text effect description.
    Narrative(String),
}

impl Attribute {
    pub const DRAW: &'static str = "draw";
    pub const END_TURN: &'static str = "end_turn";
    pub const LIFE: &'static str = "life";

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Attribute::Draw => Self::DRAW,
            Attribute::EndTurn => Self::END_TURN,
            Attribute::Life => Self::LIFE,
            Attribute::Narrative(text) => text,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }
}

impl From<String> for Attribute {
    fn from(s: String) -> Self {
        match s.as_str() {
            Self::DRAW => Attribute::Draw,
            Self::END_TURN => Attribute::EndTurn,
            Self::LIFE => Attribute::Life,
            _ => Attribute::Narrative(s),
        }
    }
}

impl From<&str> for Attribute {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<Attribute> for String {
    fn from(attribute: Attribute) -> Self {
        match attribute {
            Attribute::Narrative(text) => text,
            other => other.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded `(actor, attribute, value)` fact.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event(pub PlayerId, pub Attribute, pub Stat);

impl Event {
    pub fn new(actor: PlayerId, attribute: impl Into<Attribute>, value: impl Into<Stat>) -> Self {
        Self(actor, attribute.into(), value.into())
    }

    #[must_use]
    pub fn actor(&self) -> &PlayerId {
        &self.0
    }

    #[must_use]
    pub fn attribute(&self) -> &Attribute {
        &self.1
    }

    #[must_use]
    pub fn value(&self) -> &Stat {
        &self.2
    }

    /// True if `actor` recorded an event with `attribute`.
    #[must_use]
    pub fn is(&self, actor: &PlayerId, attribute: &Attribute) -> bool {
        self.0 == *actor && self.1 == *attribute
    }
}

/// Events recorded within one turn, in order.
pub type TurnLog = Vector<Event>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_from_string() {
        assert_eq!(Attribute::from("draw"), Attribute::Draw);
        assert_eq!(Attribute::from("end_turn"), Attribute::EndTurn);
        assert_eq!(Attribute::from("life"), Attribute::Life);
        assert_eq!(
            Attribute::from("bot plays card x"),
            Attribute::Narrative("bot plays card x".to_string())
        );
    }

    #[test]
    fn test_event_array_shape() {
        let event = Event::new(PlayerId::new("p1"), Attribute::Draw, 3i64);
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"["p1","draw",3]"#);

        let back: Event = serde_json::from_str(r#"["p2","end_turn",null]"#).unwrap();
        assert_eq!(back.actor(), &PlayerId::new("p2"));
        assert_eq!(back.attribute(), &Attribute::EndTurn);
        assert!(back.value().is_null());
    }

    #[test]
    fn test_event_is() {
        let event = Event::new(PlayerId::new("p1"), Attribute::Draw, Stat::Null);
        assert!(event.is(&PlayerId::new("p1"), &Attribute::Draw));
        assert!(!event.is(&PlayerId::new("p2"), &Attribute::Draw));
        assert!(!event.is(&PlayerId::new("p1"), &Attribute::EndTurn));
    }
}
