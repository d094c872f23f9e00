//! Computer-controlled players.

mod nemesis;

pub use nemesis::{BotMove, MatchSource, Nemesis, Outcome};
