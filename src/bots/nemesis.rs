//! Nemesis: the built-in opponent.
//!
//! On its turn the bot picks uniformly between drawing (when it may) and
//! playing a random hand card to a random empty slot, applies the pick,
//! and closes the turn. With nothing to pick it just closes the turn.
//!
//! An empty hand with room on the field means the opening draw has not
//! reached the bot yet. `act` reports `Outcome::Waiting` instead of
//! blocking; `act_polling` retries a bounded number of times.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, info, warn};

use crate::cards::{CardId, Stat};
use crate::core::config::EngineConfig;
use crate::core::error::{EngineError, Result};
use crate::core::event::Attribute;
use crate::core::player::PlayerId;
use crate::core::rng::GameRng;
use crate::core::state::Match;
use crate::effects::TargetRef;
use crate::rules::Target;

/// A move the bot can make before ending its turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BotMove {
    /// Draw this many cards.
    Draw(usize),
    /// Play a hand card to a field slot.
    Play { card: CardId, row: usize, slot: usize },
}

impl std::fmt::Display for BotMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BotMove::Draw(count) => write!(f, "draw {}", count),
            BotMove::Play { card, row, slot } => write!(
                f,
                "bot plays card {} to field position {}",
                card,
                TargetRef::field(*row, *slot)
            ),
        }
    }
}

/// What the bot did with the state it was given.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Not the bot's turn; state unchanged.
    Abstained,
    /// Applied a move and ended the turn.
    Acted(BotMove),
    /// Nothing to do; ended the turn.
    Passed,
    /// Hand is empty; state unchanged, try again after the hand is dealt.
    Waiting,
}

impl Outcome {
    /// Whether a substantive move was taken.
    #[must_use]
    pub fn acted(&self) -> bool {
        matches!(self, Outcome::Acted(_))
    }
}

/// Where `act_polling` gets fresh match state from.
pub trait MatchSource {
    fn reload(&mut self) -> Result<Match>;
}

impl<F> MatchSource for F
where
    F: FnMut() -> Result<Match>,
{
    fn reload(&mut self) -> Result<Match> {
        self()
    }
}

/// Bot player.
#[derive(Clone, Debug)]
pub struct Nemesis {
    id: PlayerId,
    config: EngineConfig,
}

impl Nemesis {
    pub fn new(id: impl Into<PlayerId>, config: EngineConfig) -> Self {
        Self {
            id: id.into(),
            config,
        }
    }

    #[must_use]
    pub fn id(&self) -> &PlayerId {
        &self.id
    }

    /// Take the bot's turn on `state`, if it holds the turn.
    pub fn act(&self, state: &Match, rng: &mut GameRng) -> Result<(Match, Outcome)> {
        self.decide(state, rng, true)
    }

    /// `act`, reloading the match while the bot waits for its hand.
    ///
    /// Reloads at most `hand_wait.attempts` times, pausing `interval_ms`
    /// between them. `cancel` is checked before every reload. Once the
    /// attempts run out the bot decides without the play option.
    pub fn act_polling<S>(
        &self,
        source: &mut S,
        rng: &mut GameRng,
        cancel: &AtomicBool,
    ) -> Result<(Match, Outcome)>
    where
        S: MatchSource + ?Sized,
    {
        let policy = self.config.hand_wait;
        let attempts = policy.attempts.max(1);

        let mut state = Self::reload(source, cancel)?;
        for attempt in 1..=attempts {
            let (next, outcome) = self.act(&state, rng)?;
            if outcome != Outcome::Waiting {
                return Ok((next, outcome));
            }
            if attempt == attempts {
                break;
            }

            debug!(bot = %self.id, attempt, "waiting for hand draw");
            std::thread::sleep(policy.interval());
            state = Self::reload(source, cancel)?;
        }

        warn!(bot = %self.id, attempts, "hand still empty, deciding without play");
        self.decide(&state, rng, false)
    }

    fn reload<S: MatchSource + ?Sized>(source: &mut S, cancel: &AtomicBool) -> Result<Match> {
        if cancel.load(Ordering::Relaxed) {
            return Err(EngineError::Cancelled);
        }
        source.reload()
    }

    fn decide(&self, state: &Match, rng: &mut GameRng, allow_play: bool) -> Result<(Match, Outcome)> {
        let me = self.id.as_str();
        if !state.is_turn(Target::Player, me) {
            debug!(bot = %self.id, match_id = %state.id, "not my turn");
            return Ok((state.clone(), Outcome::Abstained));
        }
        if state.can_respond(Target::Player, me) {
            debug!(bot = %self.id, "pending responses are not handled by bots");
        }

        let seat = state.player(&self.id)?;
        let mut options: SmallVec<[BotMove; 2]> = SmallVec::new();

        if state.can_draw(Target::Player, me) {
            options.push(BotMove::Draw(self.config.bot_draw));
        }

        let empty = state.empty_slots(self.config.bot_rows);
        if allow_play && !empty.is_empty() {
            if seat.hand.is_empty() {
                debug!(bot = %self.id, match_id = %state.id, "hand empty, waiting");
                return Ok((state.clone(), Outcome::Waiting));
            }

            let hand: Vec<&CardId> = seat.hand.iter().collect();
            let card = rng.choose(&hand).map(|card| (*card).clone());
            let position = rng.choose(&empty).copied();
            if let (Some(card), Some((row, slot))) = (card, position) {
                options.push(BotMove::Play { card, row, slot });
            }
        }

        let Some(chosen) = rng.choose(&options).cloned() else {
            info!(bot = %self.id, match_id = %state.id, "passing turn");
            return Ok((self.close_turn(state), Outcome::Passed));
        };

        info!(bot = %self.id, match_id = %state.id, choice = %chosen, "bot move");
        let next = self.perform(state, &chosen)?;
        Ok((self.close_turn(&next), Outcome::Acted(chosen)))
    }

    fn perform(&self, state: &Match, chosen: &BotMove) -> Result<Match> {
        match chosen {
            BotMove::Draw(count) => state.draw(&self.id, *count),
            BotMove::Play { .. } => Ok(state.record(self.id.clone(), chosen.to_string(), Stat::Null)),
        }
    }

    fn close_turn(&self, state: &Match) -> Match {
        state
            .record(self.id.clone(), Attribute::EndTurn, Stat::Null)
            .end_turn(&self.id)
    }
}
