//! Effect resolution - dispatching a played card's effect to its applier.

use super::effect::Effect;
use crate::cards::{CardId, CardLibrary};
use crate::core::error::Result;
use crate::core::player::PlayerId;
use crate::core::state::Match;

/// Applies `Effect`s to a match.
///
/// Card stats are resolved through the library and its mapping.
pub struct EffectResolver<'a> {
    library: &'a CardLibrary,
}

impl<'a> EffectResolver<'a> {
    #[must_use]
    pub fn new(library: &'a CardLibrary) -> Self {
        Self { library }
    }

    /// Apply the effect of `card_id`, played by `played_by`.
    pub fn resolve(
        &self,
        state: &Match,
        effect: &Effect,
        card_id: &CardId,
        played_by: &PlayerId,
    ) -> Result<Match> {
        match effect {
            Effect::Barrage(barrage) => state.v1_barrage(self.library, card_id, played_by, barrage),
            Effect::Buff { stat, amt } => Ok(state.v1_buff(card_id, played_by, *stat, *amt)),
            Effect::Debuff { stat, amt } => Ok(state.v1_debuff(card_id, played_by, *stat, *amt)),
            Effect::DebuffAttacking { stat, amt } => {
                Ok(state.v1_debuff_attacking(card_id, played_by, *stat, *amt))
            }
            Effect::PreventRotationContinuous {
                target,
                target_attribute,
                target_value,
            } => state.v1_prevent_rotation_continuous(
                self.library.mapping(),
                card_id,
                played_by,
                target,
                target_attribute.as_deref(),
                target_value.as_ref(),
            ),
            Effect::PreventRotationNTimes {
                num_of_turns,
                target,
            } => Ok(state.v1_prevent_rotation_n_times(card_id, played_by, *num_of_turns, target)),
        }
    }

    /// Apply effects in order, stopping at the first failure.
    pub fn resolve_all<'e>(
        &self,
        state: &Match,
        effects: impl IntoIterator<Item = &'e Effect>,
        card_id: &CardId,
        played_by: &PlayerId,
    ) -> Result<Match> {
        effects.into_iter().try_fold(state.clone(), |current, effect| {
            self.resolve(&current, effect, card_id, played_by)
        })
    }
}
