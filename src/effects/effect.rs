//! Effect definitions.
//!
//! Card documents name an effect and its parameters; `Effect` is the
//! typed form. Each variant maps to one versioned applier on `Match`.

use serde::{Deserialize, Serialize};

use crate::cards::Stat;

/// Stat a buff or debuff adjusts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatKind {
    Atk,
    Def,
}

impl StatKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StatKind::Atk => "atk",
            StatKind::Def => "def",
        }
    }
}

impl std::fmt::Display for StatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Percentages of card stats dealt to the opponent and to the caster.
///
/// The damage keys are stat names resolved through the card view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Barrage {
    pub op_perc: f64,
    pub op_dmg_key: String,
    pub pl_perc: f64,
    pub pl_dmg_key: String,
}

/// A played card's effect with its parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect")]
pub enum Effect {
    /// Damage the opponent and the caster by percentages of card stats.
    #[serde(rename = "v1_barrage")]
    Barrage(Barrage),

    #[serde(rename = "v1_buff")]
    Buff { stat: StatKind, amt: i64 },

    /// Not implemented: applying it leaves the match unchanged.
    #[serde(rename = "v1_debuff")]
    Debuff { stat: StatKind, amt: i64 },

    /// Not implemented: applying it leaves the match unchanged.
    #[serde(rename = "v1_debuff_attacking")]
    DebuffAttacking { stat: StatKind, amt: i64 },

    /// Prevent rotation of the target for as long as the card stays.
    ///
    /// With `target_attribute` on a field target, the slot's card must
    /// carry `target_value` for that stat.
    #[serde(rename = "v1_prevent_rotation_continuous")]
    PreventRotationContinuous {
        target: String,
        #[serde(default)]
        target_attribute: Option<String>,
        #[serde(default)]
        target_value: Option<Stat>,
    },

    /// Prevent rotation for a number of turns.
    #[serde(rename = "v1_prevent_rotation_N_times")]
    PreventRotationNTimes { num_of_turns: u32, target: String },
}

impl Effect {
    /// The applier name as stored in card documents.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Effect::Barrage(_) => "v1_barrage",
            Effect::Buff { .. } => "v1_buff",
            Effect::Debuff { .. } => "v1_debuff",
            Effect::DebuffAttacking { .. } => "v1_debuff_attacking",
            Effect::PreventRotationContinuous { .. } => "v1_prevent_rotation_continuous",
            Effect::PreventRotationNTimes { .. } => "v1_prevent_rotation_N_times",
        }
    }
}
