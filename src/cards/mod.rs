//! Card system: scalar stats, card views, and the card library.
//!
//! ## Key Types
//!
//! - `Stat`: Scalar value held by a card field or carried by an event
//! - `CardRecord`: Raw card document (field key to `Stat`)
//! - `CardMapping`: Canonical stat name to document field key
//! - `Card`: A record viewed through a mapping
//! - `CardLibrary`: Card documents keyed by `CardId`

pub mod attributes;
pub mod library;
pub mod view;

pub use attributes::{CardRecord, Stat};
pub use library::{CardId, CardLibrary};
pub use view::{Card, CardMapping};
