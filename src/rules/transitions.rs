//! State transitions.
//!
//! Every transition consumes `&Match` and returns a new `Match`; nothing
//! is mutated in place. Legality is the caller's concern: consult the
//! capability predicates (or go through `rules::guard`) first.

use tracing::{debug, info, warn};

use crate::cards::Stat;
use crate::core::error::{EngineError, Result};
use crate::core::event::{Attribute, Event, TurnLog};
use crate::core::player::PlayerId;
use crate::core::state::{Cursor, Match};
use crate::rules::capability::Target;

/// Outcome of a draw: how many cards were asked for and how many moved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawReport {
    pub requested: usize,
    pub drawn: usize,
}

impl DrawReport {
    /// The deck ran out before the requested count.
    #[must_use]
    pub fn is_short(&self) -> bool {
        self.drawn < self.requested
    }
}

impl Match {
    /// Append an event to the open turn.
    ///
    /// Always succeeds: out-of-turn or otherwise illegal events are
    /// recorded as given.
    #[must_use]
    pub fn record(
        &self,
        actor: PlayerId,
        attribute: impl Into<Attribute>,
        value: impl Into<Stat>,
    ) -> Match {
        let mut next = self.clone();
        let event = Event::new(actor, attribute, value);

        match next.turns.back_mut() {
            Some(turn) => turn.push_back(event),
            None => next.turns.push_back(im::vector![event]),
        }
        let turn = next.turns.len() - 1;
        next.cursor = Cursor::new(turn, next.turns[turn].len());
        next
    }

    /// Open the next turn.
    ///
    /// Does not check that `actor` holds the current turn.
    #[must_use]
    pub fn end_turn(&self, actor: &PlayerId) -> Match {
        if !self.can_play(Target::Player, actor.as_str()) {
            debug!(match_id = %self.id, %actor, "turn closed by player not holding it");
        }

        let mut next = self.clone();
        next.turns.push_back(TurnLog::new());
        next.cursor = Cursor::new(next.turns.len() - 1, 0);
        debug!(match_id = %next.id, turn = next.cursor.turn, "turn opened");
        next
    }

    /// Move up to `count` cards from the tail of the deck to the hand.
    ///
    /// Records `(player, draw, count)` in the open turn.
    pub fn draw(&self, player: &PlayerId, count: usize) -> Result<Match> {
        self.draw_report(player, count).map(|(next, _)| next)
    }

    /// `draw`, also reporting how many cards actually moved.
    pub fn draw_report(&self, player: &PlayerId, count: usize) -> Result<(Match, DrawReport)> {
        let mut seat = self.player(player)?.clone();

        let mut drawn = 0;
        while drawn < count {
            match seat.deck.cards.pop_back() {
                Some(card) => seat.hand.push_back(card),
                None => break,
            }
            drawn += 1;
        }

        let report = DrawReport {
            requested: count,
            drawn,
        };
        if report.is_short() {
            warn!(match_id = %self.id, %player, requested = count, drawn, "deck exhausted during draw");
        }

        let mut next = self.clone();
        next.players = next.players.update(player.clone(), seat);
        Ok((next.record(player.clone(), Attribute::Draw, count), report))
    }

    /// Apply a hit point delta and record it as a `life` event.
    ///
    /// Hit points saturate at the `i64` bounds.
    pub fn adjust_life(&self, player: &PlayerId, delta: i64) -> Result<Match> {
        let mut seat = self.player(player)?.clone();
        seat.hp = seat.hp.saturating_add(delta);

        let mut next = self.clone();
        next.players = next.players.update(player.clone(), seat);
        Ok(next.record(player.clone(), Attribute::Life, delta))
    }

    /// Detect match completion, stamping the current time.
    pub fn end(&self) -> Result<Match> {
        self.end_at(chrono::Utc::now().timestamp())
    }

    /// Detect match completion.
    ///
    /// With no defeated player the state is returned unchanged. Otherwise
    /// the first surviving player in document order wins. A finished
    /// match is returned unchanged.
    pub fn end_at(&self, now: i64) -> Result<Match> {
        if self.is_finished() {
            return Ok(self.clone());
        }

        if !self.players.values().any(|p| p.is_defeated()) {
            return Ok(self.clone());
        }

        let winner = self
            .players
            .iter()
            .find(|(_, p)| !p.is_defeated())
            .map(|(id, _)| id.clone())
            .ok_or(EngineError::UnresolvableOutcome)?;

        info!(match_id = %self.id, %winner, "match finished");

        let mut next = self.clone();
        next.winner = Some(winner);
        next.finished = Some(now);
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;
    use crate::core::player::{Deck, Player, PlayerMap};

    fn state(deck: &[&str]) -> Match {
        let players: PlayerMap<Player> = vec![
            (
                PlayerId::new("p1"),
                Player::new("One", 20, Deck::new(deck.iter().map(|c| CardId::new(*c)))),
            ),
            (PlayerId::new("p2"), Player::new("Two", 20, Deck::default())),
        ]
        .into_iter()
        .collect();
        Match::new("m1", Match::empty_fields(2, 3), PlayerId::new("p1"), players).unwrap()
    }

    #[test]
    fn test_record_appends_to_open_turn() {
        let s0 = state(&[]);
        let s1 = s0.record(PlayerId::new("p1"), "casts a spell", Stat::Null);

        assert_eq!(s0.open_events().count(), 0);
        assert_eq!(s1.open_events().count(), 1);
        assert_eq!(s1.cursor, Cursor::new(0, 1));
    }

    #[test]
    fn test_record_does_not_check_turn() {
        let s = state(&[]).record(PlayerId::new("p2"), Attribute::Draw, 3i64);
        assert_eq!(s.open_events().count(), 1);
    }

    #[test]
    fn test_end_turn_opens_turn() {
        let s = state(&[]).end_turn(&PlayerId::new("p1"));
        assert_eq!(s.turns.len(), 2);
        assert_eq!(s.cursor, Cursor::new(1, 0));
        assert_eq!(s.open_events().count(), 0);
    }

    #[test]
    fn test_draw_moves_from_tail() {
        let (s, report) = state(&["a", "b", "c"])
            .draw_report(&PlayerId::new("p1"), 2)
            .unwrap();
        let p1 = s.player(&PlayerId::new("p1")).unwrap();

        assert_eq!(report, DrawReport { requested: 2, drawn: 2 });
        assert_eq!(p1.hand.iter().map(CardId::as_str).collect::<Vec<_>>(), vec!["c", "b"]);
        assert_eq!(p1.deck.len(), 1);
    }

    #[test]
    fn test_draw_short_deck() {
        let (s, report) = state(&["a"]).draw_report(&PlayerId::new("p1"), 3).unwrap();
        assert!(report.is_short());
        assert_eq!(s.player(&PlayerId::new("p1")).unwrap().hand.len(), 1);
    }

    #[test]
    fn test_draw_unknown_player() {
        let result = state(&[]).draw(&PlayerId::new("ghost"), 1);
        assert!(matches!(result, Err(EngineError::UnknownPlayer(_))));
    }

    #[test]
    fn test_adjust_life() {
        let s = state(&[]).adjust_life(&PlayerId::new("p2"), -7).unwrap();
        assert_eq!(s.player(&PlayerId::new("p2")).unwrap().hp, 13);
        assert_eq!(
            s.open_events().last(),
            Some(&Event::new(PlayerId::new("p2"), Attribute::Life, -7i64))
        );
    }

    #[test]
    fn test_adjust_life_saturates() {
        let p2 = PlayerId::new("p2");
        let s = state(&[])
            .adjust_life(&p2, i64::MIN)
            .unwrap()
            .adjust_life(&p2, i64::MIN)
            .unwrap();
        assert_eq!(s.player(&p2).unwrap().hp, i64::MIN);
    }

    #[test]
    fn test_end_without_defeat() {
        let s = state(&[]);
        assert_eq!(s.end_at(100).unwrap(), s);
    }

    #[test]
    fn test_end_all_defeated() {
        let s = state(&[])
            .adjust_life(&PlayerId::new("p1"), -20)
            .unwrap()
            .adjust_life(&PlayerId::new("p2"), -25)
            .unwrap();
        assert!(matches!(s.end_at(1), Err(EngineError::UnresolvableOutcome)));
    }
}
