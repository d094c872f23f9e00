//! In-process interface for the surrounding application.
//!
//! Thin free functions over the `Match` transitions, named for what the
//! application does with them. None of them perform I/O.

use super::capability::{Capability, Target};
use crate::cards::Stat;
use crate::core::error::Result;
use crate::core::event::Attribute;
use crate::core::player::PlayerId;
use crate::core::state::Match;

/// Record an event in the open turn (no legality checks).
#[must_use]
pub fn apply(
    state: &Match,
    actor: PlayerId,
    attribute: impl Into<Attribute>,
    value: impl Into<Stat>,
) -> Match {
    state.record(actor, attribute, value)
}

/// Evaluate a capability by name.
pub fn query(state: &Match, capability: &str, target: Target, id: &str) -> Result<bool> {
    let capability: Capability = capability.parse()?;
    Ok(state.get(capability, target, id))
}

/// Open the next turn.
#[must_use]
pub fn advance_turn(state: &Match, actor: &PlayerId) -> Match {
    state.end_turn(actor)
}

/// Draw up to `count` cards for `player`.
pub fn draw(state: &Match, player: &PlayerId, count: usize) -> Result<Match> {
    state.draw(player, count)
}

/// Settle the match if a player has been defeated. Idempotent.
pub fn finalize(state: &Match) -> Result<Match> {
    state.end()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::EngineError;
    use crate::core::player::{Deck, Player, PlayerMap};

    fn state() -> Match {
        let players: PlayerMap<Player> = vec![
            (PlayerId::new("p1"), Player::new("One", 20, Deck::default())),
            (PlayerId::new("p2"), Player::new("Two", 20, Deck::default())),
        ]
        .into_iter()
        .collect();
        Match::new("m1", Match::empty_fields(1, 1), PlayerId::new("p1"), players).unwrap()
    }

    #[test]
    fn test_query_by_name() {
        let s = state();
        assert!(query(&s, "is_turn", Target::Player, "p1").unwrap());
        assert!(!query(&s, "is_turn", Target::Player, "p2").unwrap());
        assert!(!query(&s, "is_turn", Target::Field, "f-0-0").unwrap());
    }

    #[test]
    fn test_query_unknown_name() {
        let result = query(&state(), "can_teleport", Target::Player, "p1");
        assert!(matches!(result, Err(EngineError::UnknownCapability(_))));
    }

    #[test]
    fn test_apply_and_advance() {
        let s = apply(&state(), PlayerId::new("p1"), "summons", Stat::Null);
        let s = advance_turn(&s, &PlayerId::new("p1"));
        assert_eq!(s.turns.len(), 2);
        assert!(query(&s, "can_play", Target::Player, "p2").unwrap());
    }
}
