//! Card effects.
//!
//! - `Effect`: typed form of a card's effect entry
//! - `TargetRef`: player or field-slot target parsed from `f-<row>-<slot>`
//! - `v1`: the versioned appliers, as methods on `Match`
//! - `EffectResolver`: dispatches an `Effect` to its applier
//!
//! Appliers only append events (and adjust hit points for damage). They
//! never check whose turn it is.

mod effect;
mod resolver;
mod targeting;
mod v1;

pub use effect::{Barrage, Effect, StatKind};
pub use resolver::EffectResolver;
pub use targeting::TargetRef;
