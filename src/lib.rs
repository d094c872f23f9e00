//! # cardcraft-engine
//!
//! Turn-based match engine for a two-player collectible card game.
//!
//! ## Design Principles
//!
//! 1. **Immutable States**: Every transition takes a `&Match` and returns a
//!    new `Match`. O(1) cloning via `im-rs` persistent structures.
//!
//! 2. **Event Sourced**: Each turn is an append-only list of
//!    `(actor, attribute, value)` events; the last turn is open.
//!
//! 3. **Derived Legality**: Whose turn it is, who may draw or play, all
//!    follow from the state (turn parity relative to the opener). Recording
//!    never checks; callers consult capabilities or go through
//!    `rules::submit`.
//!
//! 4. **No I/O**: The host application loads and stores match documents
//!    (`storage`) and owns concurrency control.
//!
//! ## Modules
//!
//! - `core`: Players, events, match state, configuration, RNG, setup
//! - `cards`: Card stats, views over card documents, card library
//! - `rules`: Capabilities, transitions, the host interface, guarded submission
//! - `effects`: Versioned card effect appliers
//! - `bots`: The Nemesis bot player
//! - `storage`: Match document conversion
//!
//! ```
//! use cardcraft_engine::{rules, Match, PlayerId, Target};
//! use cardcraft_engine::core::{Deck, Player, PlayerMap};
//!
//! let players: PlayerMap<Player> = vec![
//!     (PlayerId::new("p1"), Player::new("One", 20, Deck::default())),
//!     (PlayerId::new("p2"), Player::new("Two", 20, Deck::default())),
//! ]
//! .into_iter()
//! .collect();
//! let state = Match::new("m1", Match::empty_fields(6, 3), PlayerId::new("p1"), players).unwrap();
//!
//! let next = rules::advance_turn(&state, &PlayerId::new("p1"));
//! assert!(rules::query(&next, "is_turn", Target::Player, "p2").unwrap());
//! ```

pub mod bots;
pub mod cards;
pub mod core;
pub mod effects;
pub mod rules;
pub mod storage;

// Re-export commonly used types
pub use crate::core::{
    Attribute, Cursor, EngineConfig, EngineError, Event, GameRng, Match, MatchBuilder, PlayerId,
    Result, TurnLog,
};

pub use crate::cards::{Card, CardId, CardLibrary, CardMapping, CardRecord, Stat};

pub use crate::rules::{Capability, DrawReport, Target};

pub use crate::effects::{Effect, EffectResolver, TargetRef};

pub use crate::bots::{BotMove, MatchSource, Nemesis, Outcome};

pub use crate::storage::{from_storage, to_storage};
