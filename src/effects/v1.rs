//! Version 1 effect appliers.
//!
//! Each applier turns a played card's effect into events on the open
//! turn. They follow the transition contract: `&Match` in, new `Match` out.

use tracing::debug;

use super::effect::{Barrage, StatKind};
use super::targeting::TargetRef;
use crate::cards::{Card, CardId, CardLibrary, CardMapping, Stat};
use crate::core::error::{EngineError, Result};
use crate::core::player::PlayerId;
use crate::core::state::Match;

/// Percentage of a numeric stat, rounded to whole hit points.
fn stat_damage(card: &Card, card_id: &CardId, stat: &str, perc: f64) -> Result<i64> {
    let value = card
        .get(stat)
        .as_number()
        .ok_or_else(|| EngineError::NonNumericStat {
            card: card_id.clone(),
            stat: stat.to_string(),
        })?;
    Ok((perc * value).round() as i64)
}

impl Match {
    /// Damage the opponent and the caster by percentages of the played
    /// card's stats, each as a negative `life` event.
    pub fn v1_barrage(
        &self,
        library: &CardLibrary,
        card_id: &CardId,
        played_by: &PlayerId,
        barrage: &Barrage,
    ) -> Result<Match> {
        self.player(played_by)?;
        let opponent = self
            .opponent_of(played_by)
            .cloned()
            .ok_or_else(|| EngineError::protocol(format!("{} has no opponent", played_by)))?;

        let card = library.view(card_id)?;
        let op_damage = stat_damage(&card, card_id, &barrage.op_dmg_key, barrage.op_perc)?;
        let pl_damage = stat_damage(&card, card_id, &barrage.pl_dmg_key, barrage.pl_perc)?;

        debug!(match_id = %self.id, %card_id, %opponent, op_damage, pl_damage, "barrage");

        self.adjust_life(&opponent, op_damage.saturating_neg())?
            .adjust_life(played_by, pl_damage.saturating_neg())
    }

    /// Record a buff narrative. The target is fixed at `f-0-2` for now.
    #[must_use]
    pub fn v1_buff(&self, card_id: &CardId, played_by: &PlayerId, stat: StatKind, amt: i64) -> Match {
        let direction = if amt > 0 { "increasing" } else { "decreasing" };
        self.record(
            played_by.clone(),
            format!(
                "player activates buff {} on f-0-2, {} target's {} by {}",
                card_id, direction, stat, amt
            ),
            Stat::Null,
        )
    }

    /// Leaves the match unchanged.
    #[must_use]
    pub fn v1_debuff(&self, card_id: &CardId, played_by: &PlayerId, stat: StatKind, amt: i64) -> Match {
        debug!(match_id = %self.id, %card_id, %played_by, %stat, amt, "v1_debuff has no effect");
        self.clone()
    }

    /// Leaves the match unchanged.
    #[must_use]
    pub fn v1_debuff_attacking(
        &self,
        card_id: &CardId,
        played_by: &PlayerId,
        stat: StatKind,
        amt: i64,
    ) -> Match {
        debug!(match_id = %self.id, %card_id, %played_by, %stat, amt, "v1_debuff_attacking has no effect");
        self.clone()
    }

    /// Record a continuous rotation-prevention effect on `target`.
    ///
    /// With `target_attribute` set and a field target, the card in that
    /// slot is resolved through `mapping` and must carry `target_value`
    /// (null when absent) for the attribute.
    pub fn v1_prevent_rotation_continuous(
        &self,
        mapping: &CardMapping,
        card_id: &CardId,
        played_by: &PlayerId,
        target: &str,
        target_attribute: Option<&str>,
        target_value: Option<&Stat>,
    ) -> Result<Match> {
        if let Some(attribute) = target_attribute {
            if TargetRef::is_field_notation(target) {
                let TargetRef::Field { row, slot } = target.parse::<TargetRef>()? else {
                    return Err(EngineError::InvalidTarget(target.to_string()));
                };
                let record = self
                    .slot(row, slot)
                    .cloned()
                    .ok_or_else(|| EngineError::InvalidTarget(format!("no card at {}", target)))?;

                let card = Card::new(record, mapping.clone());
                let expected = target_value.cloned().unwrap_or_default();
                let actual = card.get(attribute);
                if !expected.same_value(&actual) {
                    return Err(EngineError::DataIntegrity {
                        effect: "v1_prevent_rotation_continuous".to_string(),
                        card: card.get("name"),
                        expected,
                        actual,
                    });
                }
            }
        }

        Ok(self.record(
            played_by.clone(),
            format!(
                "player applies continuous effect {} on {}, preventing rotation",
                card_id, target
            ),
            Stat::Null,
        ))
    }

    /// Record an N-turn rotation-prevention effect.
    ///
    /// The target is not carried into the recorded event.
    #[must_use]
    pub fn v1_prevent_rotation_n_times(
        &self,
        card_id: &CardId,
        played_by: &PlayerId,
        num_of_turns: u32,
        target: &str,
    ) -> Match {
        debug!(match_id = %self.id, %card_id, target, "target dropped from n-turn effect");
        self.record(
            played_by.clone(),
            format!(
                "player applies {}-turn effect {} on None, preventing rotation",
                num_of_turns, card_id
            ),
            Stat::Null,
        )
    }
}
