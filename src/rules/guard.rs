//! Guarded event submission for human players.
//!
//! The transitions record whatever they are given. Requests coming from
//! a client go through `submit`, which checks who is acting and whether
//! the match still accepts events before recording anything.

use tracing::debug;

use super::capability::Target;
use crate::cards::Stat;
use crate::core::config::EngineConfig;
use crate::core::error::{EngineError, Result};
use crate::core::event::Attribute;
use crate::core::player::PlayerId;
use crate::core::state::Match;

/// Record an event submitted by `identity`.
///
/// - `$me` as actor stands for `identity`
/// - the actor must be `identity`, and `identity` a participant
/// - finished matches accept nothing
/// - with `enforce_turn`, only the turn holder may act, and draws are
///   limited to one per turn
///
/// `draw` performs the draw (the value is the count), `end_turn` records
/// the event and opens the next turn, anything else is recorded as is.
pub fn submit(
    state: &Match,
    config: &EngineConfig,
    identity: &PlayerId,
    actor: PlayerId,
    attribute: Attribute,
    value: Stat,
) -> Result<Match> {
    if actor.as_str().is_empty() && attribute.is_empty() {
        return Err(EngineError::protocol(
            "event actor and attribute cannot both be empty",
        ));
    }

    let actor = if actor.is_me() { identity.clone() } else { actor };
    if actor != *identity {
        return Err(EngineError::protocol(format!(
            "{} cannot act as {}",
            identity, actor
        )));
    }
    if !state.players.contains(identity) {
        return Err(EngineError::protocol(format!(
            "{} is not a participant of match {}",
            identity, state.id
        )));
    }
    if state.is_finished() {
        return Err(EngineError::protocol(format!("match {} is finished", state.id)));
    }
    if config.enforce_turn && !state.can_play(Target::Player, identity.as_str()) {
        return Err(EngineError::protocol(format!("not {}'s turn", identity)));
    }

    debug!(match_id = %state.id, %actor, %attribute, "event submitted");

    match attribute {
        Attribute::Draw => {
            if config.enforce_turn && !state.can_draw(Target::Player, identity.as_str()) {
                return Err(EngineError::protocol(format!(
                    "{} already drew this turn",
                    identity
                )));
            }
            let count = value
                .as_number()
                .filter(|n| *n >= 0.0 && n.fract() == 0.0)
                .ok_or_else(|| EngineError::protocol(format!("invalid draw count {}", value)))?;
            state.draw(&actor, count as usize)
        }
        Attribute::EndTurn => Ok(state
            .record(actor.clone(), Attribute::EndTurn, value)
            .end_turn(&actor)),
        other => Ok(state.record(actor, other, value)),
    }
}
