//! Capability evaluation: named predicates gating legal actions.
//!
//! Capabilities are derived from the match state alone. Callers consult
//! them before recording an event; `record` itself never checks.
//!
//! ## Turn Parity
//!
//! Even turn indices belong to the opener, odd ones to the other player.
//! No other ordering authority exists.

use std::str::FromStr;

use crate::core::error::EngineError;
use crate::core::event::Attribute;
use crate::core::state::Match;

/// What a capability query addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    Player,
    Field,
}

/// Registered capability predicates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    CanDraw,
    CanPlay,
    CanRespond,
    IsTurn,
}

impl Capability {
    pub const ALL: [Capability; 4] = [
        Capability::CanDraw,
        Capability::CanPlay,
        Capability::CanRespond,
        Capability::IsTurn,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Capability::CanDraw => "can_draw",
            Capability::CanPlay => "can_play",
            Capability::CanRespond => "can_respond",
            Capability::IsTurn => "is_turn",
        }
    }
}

impl FromStr for Capability {
    type Err = EngineError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Capability::ALL
            .into_iter()
            .find(|capability| capability.as_str() == name)
            .ok_or_else(|| EngineError::UnknownCapability(name.to_string()))
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Match {
    /// Evaluate a capability for a target.
    #[must_use]
    pub fn get(&self, capability: Capability, target: Target, id: &str) -> bool {
        match capability {
            Capability::CanDraw => self.can_draw(target, id),
            Capability::CanPlay => self.can_play(target, id),
            Capability::CanRespond => self.can_respond(target, id),
            Capability::IsTurn => self.is_turn(target, id),
        }
    }

    /// Whether `id` holds the turn at the cursor.
    ///
    /// Field targets are not tracked per turn and always answer false.
    #[must_use]
    pub fn is_turn(&self, target: Target, id: &str) -> bool {
        match target {
            Target::Player => (self.cursor.turn % 2 == 0) == (self.opener == *id),
            Target::Field => false,
        }
    }

    /// One draw per player per turn, and only on their own turn.
    #[must_use]
    pub fn can_draw(&self, target: Target, id: &str) -> bool {
        match target {
            Target::Player => {
                let drawn = self
                    .open_events()
                    .any(|event| event.actor() == id && *event.attribute() == Attribute::Draw);
                !drawn && self.is_turn(target, id)
            }
            Target::Field => false,
        }
    }

    #[must_use]
    pub fn can_play(&self, target: Target, id: &str) -> bool {
        self.is_turn(target, id)
    }

    /// Presence of a response queue, not its length.
    #[must_use]
    pub fn can_respond(&self, _target: Target, id: &str) -> bool {
        self.responses.contains_key(id)
    }
}
