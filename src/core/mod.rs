//! Core engine types: players, events, match state, RNG, configuration, setup.
//!
//! Transitions and capability predicates on `Match` live in `rules`;
//! this module only defines the data and its invariants.

pub mod config;
pub mod error;
pub mod event;
pub mod player;
pub mod rng;
pub mod setup;
pub mod state;

pub use config::{EngineConfig, WaitPolicy};
pub use error::{EngineError, Result};
pub use event::{Attribute, Event, TurnLog};
pub use player::{Deck, Player, PlayerId, PlayerMap, Pot};
pub use rng::GameRng;
pub use setup::{MatchBuilder, Seat};
pub use state::{Cursor, Match, Slot};
