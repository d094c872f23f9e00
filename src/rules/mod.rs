//! Match rules: capabilities, transitions, and guarded submission.
//!
//! - `capability`: named predicates (`is_turn`, `can_draw`, ...) over a match
//! - `transitions`: `record`, `end_turn`, `draw`, `adjust_life`, `end`
//! - `engine`: free-function interface for the host application
//! - `guard`: identity and turn checks for client-submitted events

pub mod capability;
pub mod engine;
pub mod guard;
pub mod transitions;

pub use capability::{Capability, Target};
pub use engine::{advance_turn, apply, draw, finalize, query};
pub use guard::submit;
pub use transitions::DrawReport;
