//! New match creation.
//!
//! ```
//! use cardcraft_engine::cards::CardId;
//! use cardcraft_engine::core::{Deck, EngineConfig, GameRng, MatchBuilder};
//!
//! let deck = || Deck::new((0..10).map(|i| CardId::new(format!("c{}", i))));
//! let state = MatchBuilder::new("m1")
//!     .with_config(EngineConfig::default().with_opening_draw(3))
//!     .created_at(1_700_000_000)
//!     .seat("bot1", "BOT1", deck())
//!     .seat("alice", "Alice", deck())
//!     .build(&mut GameRng::new(42))
//!     .unwrap();
//!
//! assert_eq!(state.turns[0].len(), 2);
//! assert!(state.players.values().all(|p| p.hand.len() == 3));
//! ```

use std::collections::HashSet;

use tracing::info;

use super::config::EngineConfig;
use super::error::{EngineError, Result};
use super::player::{Deck, Player, PlayerId, PlayerMap, Pot};
use super::rng::GameRng;
use super::state::Match;

/// A participant joining a new match.
#[derive(Clone, Debug)]
pub struct Seat {
    pub id: PlayerId,
    pub name: String,
    pub deck: Deck,
    pub pot: Pot,
}

/// Builder for a new match.
#[derive(Clone, Debug)]
pub struct MatchBuilder {
    id: String,
    created: Option<i64>,
    config: EngineConfig,
    seats: Vec<Seat>,
}

impl MatchBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            created: None,
            config: EngineConfig::default(),
            seats: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Creation timestamp; defaults to now.
    #[must_use]
    pub fn created_at(mut self, timestamp: i64) -> Self {
        self.created = Some(timestamp);
        self
    }

    #[must_use]
    pub fn seat(self, id: impl Into<PlayerId>, name: impl Into<String>, deck: Deck) -> Self {
        self.seat_with_pot(id, name, deck, Pot::default())
    }

    #[must_use]
    pub fn seat_with_pot(
        mut self,
        id: impl Into<PlayerId>,
        name: impl Into<String>,
        deck: Deck,
        pot: Pot,
    ) -> Self {
        self.seats.push(Seat {
            id: id.into(),
            name: name.into(),
            deck,
            pot,
        });
        self
    }

    /// Build the match: shuffled decks, random opener, opening draws.
    ///
    /// Turn 0 holds one draw per player, opener first.
    pub fn build(self, rng: &mut GameRng) -> Result<Match> {
        let mut seen = HashSet::new();
        if let Some(duplicate) = self.seats.iter().find(|seat| !seen.insert(&seat.id)) {
            return Err(EngineError::InvalidDocument(format!(
                "player {} seated twice",
                duplicate.id
            )));
        }
        if self.seats.len() < 2 {
            return Err(EngineError::InvalidDocument(format!(
                "{} players, at least 2 required",
                self.seats.len()
            )));
        }

        let opener = self.seats[rng.gen_range_usize(0..self.seats.len())].id.clone();

        let players: PlayerMap<Player> = self
            .seats
            .iter()
            .map(|seat| {
                let deck = Deck {
                    cards: rng.shuffled(&seat.deck.cards),
                    meta: seat.deck.meta.clone(),
                };
                let player = Player::new(seat.name.clone(), self.config.starting_hp, deck)
                    .with_pot(seat.pot.clone());
                (seat.id.clone(), player)
            })
            .collect();

        let mut state = Match::new(
            self.id,
            Match::empty_fields(self.config.rows, self.config.slots),
            opener.clone(),
            players,
        )?;
        state.created = Some(self.created.unwrap_or_else(|| chrono::Utc::now().timestamp()));

        if self.config.opening_draw > 0 {
            let order: Vec<PlayerId> = std::iter::once(opener.clone())
                .chain(state.players.keys().filter(|id| **id != opener).cloned())
                .collect();
            for id in &order {
                state = state.draw(id, self.config.opening_draw)?;
            }
        }

        info!(match_id = %state.id, %opener, players = state.players.len(), "match created");
        Ok(state)
    }
}
