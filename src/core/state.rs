//! Match state: the immutable snapshot of one game.
//!
//! ## Match
//!
//! - Players (hit points, deck, hand, pot metadata) in document order
//! - Field grid of optional card placements
//! - Turn log: one append-only event list per turn, last one open
//! - Cursor: (turn index, event index)
//! - Pending forced responses and reserved future events
//!
//! Uses `im` persistent data structures, so cloning is O(1) and every
//! transition returns a new `Match` sharing structure with the old one.
//! Transitions live in `rules::transitions`.

use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};

use super::error::{EngineError, Result};
use super::event::{Event, TurnLog};
use super::player::{Player, PlayerId, PlayerMap};
use crate::cards::CardRecord;

/// One field slot: empty, or holding a placed card's record.
pub type Slot = Option<CardRecord>;

/// Position within the turn log: `(turn index, event index)`.
///
/// Stored as a two-element array.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[usize; 2]", into = "[usize; 2]")]
pub struct Cursor {
    pub turn: usize,
    pub event: usize,
}

impl Cursor {
    #[must_use]
    pub const fn new(turn: usize, event: usize) -> Self {
        Self { turn, event }
    }
}

impl From<[usize; 2]> for Cursor {
    fn from([turn, event]: [usize; 2]) -> Self {
        Self { turn, event }
    }
}

impl From<Cursor> for [usize; 2] {
    fn from(cursor: Cursor) -> Self {
        [cursor.turn, cursor.event]
    }
}

/// Immutable snapshot of one match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// Match identifier.
    pub id: String,

    /// Play area: rows of slots.
    pub fields: Vector<Vector<Slot>>,

    /// Player with the first turn.
    pub opener: PlayerId,

    /// Creation time (epoch seconds).
    #[serde(default)]
    pub created: Option<i64>,

    /// Completion time (epoch seconds); set together with `winner`.
    #[serde(default)]
    pub finished: Option<i64>,

    /// Match winner. Once set the match is terminal.
    #[serde(default)]
    pub winner: Option<PlayerId>,

    /// Player data in document order.
    pub players: PlayerMap<Player>,

    /// Pending forced-response options per player.
    #[serde(default)]
    pub responses: OrdMap<PlayerId, Vector<String>>,

    /// Events reserved for later turns. Carried, not yet consumed.
    #[serde(default)]
    pub futures: OrdMap<String, Vector<Event>>,

    /// Turn and event evaluated at the moment.
    #[serde(default)]
    pub cursor: Cursor,

    /// Turns in order; the last one is open.
    pub turns: Vector<TurnLog>,
}

impl Match {
    /// Create a match with the given players and an empty opening turn.
    ///
    /// `opener` must be one of `players`.
    pub fn new(
        id: impl Into<String>,
        fields: Vector<Vector<Slot>>,
        opener: PlayerId,
        players: PlayerMap<Player>,
    ) -> Result<Self> {
        let state = Self {
            id: id.into(),
            fields,
            opener,
            created: None,
            finished: None,
            winner: None,
            players,
            responses: OrdMap::new(),
            futures: OrdMap::new(),
            cursor: Cursor::default(),
            turns: im::vector![Vector::new()],
        };
        state.validate()?;
        Ok(state)
    }

    /// Empty grid of `rows` × `slots`.
    #[must_use]
    pub fn empty_fields(rows: usize, slots: usize) -> Vector<Vector<Slot>> {
        (0..rows)
            .map(|_| (0..slots).map(|_| None).collect())
            .collect()
    }

    /// Check the structural invariants a stored document must satisfy.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| -> Result<()> { Err(EngineError::InvalidDocument(reason)) };

        if self.turns.is_empty() {
            return invalid("turns is empty".to_string());
        }
        if self.players.len() < 2 {
            return invalid(format!("{} players, at least 2 required", self.players.len()));
        }
        if !self.players.contains(&self.opener) {
            return invalid(format!("opener {} is not a player", self.opener));
        }
        if self.cursor.turn >= self.turns.len() {
            return invalid(format!(
                "cursor turn {} out of range for {} turns",
                self.cursor.turn,
                self.turns.len()
            ));
        }
        if self.winner.is_some() != self.finished.is_some() {
            return invalid("winner and finished must be set together".to_string());
        }
        if let Some(winner) = &self.winner {
            if !self.players.contains(winner) {
                return invalid(format!("winner {} is not a player", winner));
            }
        }
        Ok(())
    }

    /// The open turn (last entry of `turns`).
    #[must_use]
    pub fn open_turn(&self) -> Option<&TurnLog> {
        self.turns.back()
    }

    /// Events recorded so far in the open turn.
    pub fn open_events(&self) -> impl Iterator<Item = &Event> {
        self.turns.back().into_iter().flat_map(|turn| turn.iter())
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.winner.is_some()
    }

    pub fn player(&self, id: &PlayerId) -> Result<&Player> {
        self.players
            .get(id)
            .ok_or_else(|| EngineError::UnknownPlayer(id.clone()))
    }

    /// First player other than `id`, in document order.
    #[must_use]
    pub fn opponent_of(&self, id: &PlayerId) -> Option<&PlayerId> {
        self.players.keys().find(|key| *key != id)
    }

    /// The card placed at `(row, slot)`, if any.
    #[must_use]
    pub fn slot(&self, row: usize, slot: usize) -> Option<&CardRecord> {
        self.fields.get(row)?.get(slot)?.as_ref()
    }

    /// Empty `(row, slot)` positions within the first `rows` rows.
    #[must_use]
    pub fn empty_slots(&self, rows: usize) -> Vec<(usize, usize)> {
        self.fields
            .iter()
            .take(rows)
            .enumerate()
            .flat_map(|(row, slots)| {
                slots
                    .iter()
                    .enumerate()
                    .filter(|(_, placed)| placed.is_none())
                    .map(move |(slot, _)| (row, slot))
            })
            .collect()
    }
}
