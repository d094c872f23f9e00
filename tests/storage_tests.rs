//! Storage document tests: shape, round trips and validation.
//!
//! Also plays a short human-versus-bot match through the submission
//! guard, reloading from the stored document between requests the way
//! the host does.

use cardcraft_engine::bots::{Nemesis, Outcome};
use cardcraft_engine::cards::{CardId, Stat};
use cardcraft_engine::core::{Deck, EngineConfig, GameRng, MatchBuilder, Pot};
use cardcraft_engine::rules::{self, Target};
use cardcraft_engine::storage::{from_json_str, from_storage, to_json_string, to_storage};
use cardcraft_engine::{Attribute, EngineError, Match, PlayerId};
use serde_json::json;

fn deck(owner: &str) -> Deck {
    let mut deck = Deck::new((0..12).map(|i| CardId::new(format!("{}-{}", owner, i))));
    deck.meta.insert("owner".to_string(), json!(owner));
    deck
}

fn new_match(seed: u64) -> Match {
    MatchBuilder::new("battle")
        .created_at(1_700_000_000)
        .seat_with_pot("bot1", "BOT1", deck("bot"), Pot::new(0, None))
        .seat_with_pot(
            "alice",
            "Alice",
            deck("alice"),
            Pot::new(2_000_000, Some("sig".to_string())),
        )
        .build(&mut GameRng::new(seed))
        .unwrap()
}

// =============================================================================
// Document shape
// =============================================================================

/// Stored documents use the array forms for cursor and events.
#[test]
fn test_document_shape() {
    let state = new_match(1);
    let doc = to_storage(&state).unwrap();

    assert_eq!(doc["id"], "battle");
    assert_eq!(doc["fields"].as_array().unwrap().len(), 6);
    assert_eq!(doc["fields"][0], json!([null, null, null]));
    assert_eq!(doc["cursor"], json!([0, 2]));
    assert_eq!(doc["turns"][0][0], json!([state.opener.as_str(), "draw", 3]));
    assert_eq!(doc["players"]["alice"]["pot"]["lamports"], 2_000_000);
    assert_eq!(doc["players"]["alice"]["deck"]["owner"], "alice");
    assert!(doc["winner"].is_null());
    assert!(doc["finished"].is_null());
}

/// Players keep their document order through storage.
#[test]
fn test_player_order() {
    let doc = to_storage(&new_match(2)).unwrap();
    let keys: Vec<_> = doc["players"].as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["bot1", "alice"]);
}

/// Round trips are lossless, through values and through strings.
#[test]
fn test_round_trip() {
    let state = rules::apply(&new_match(3), PlayerId::new("alice"), "waves", Stat::Float(0.5));
    assert_eq!(from_storage(to_storage(&state).unwrap()).unwrap(), state);
    assert_eq!(from_json_str(&to_json_string(&state).unwrap()).unwrap(), state);
}

/// The store's own key is dropped on load.
#[test]
fn test_store_id_ignored() {
    let mut doc = to_storage(&new_match(4)).unwrap();
    doc["_id"] = json!("65f0c0ffee");
    let state = from_storage(doc).unwrap();
    assert!(to_storage(&state).unwrap().get("_id").is_none());
}

// =============================================================================
// Validation
// =============================================================================

/// Documents breaking the match invariants are rejected.
#[test]
fn test_invalid_documents() {
    let valid = to_storage(&new_match(5)).unwrap();

    let mut no_turns = valid.clone();
    no_turns["turns"] = json!([]);

    let mut foreign_opener = valid.clone();
    foreign_opener["opener"] = json!("mallory");

    let mut half_finished = valid.clone();
    half_finished["winner"] = json!("alice");

    let mut foreign_winner = valid.clone();
    foreign_winner["winner"] = json!("mallory");
    foreign_winner["finished"] = json!(1_700_000_100);

    for doc in [no_turns, foreign_opener, half_finished, foreign_winner] {
        assert!(matches!(from_storage(doc), Err(EngineError::InvalidDocument(_))));
    }
}

/// Event arrays must have three entries.
#[test]
fn test_malformed_event() {
    let mut doc = to_storage(&new_match(6)).unwrap();
    doc["turns"][0][0] = json!(["alice", "draw"]);
    assert!(matches!(from_storage(doc), Err(EngineError::Serialization(_))));
}

// =============================================================================
// Request cycle
// =============================================================================

/// Human and bot alternate through stored documents until the bot's
/// turn comes around again.
#[test]
fn test_request_cycle() {
    let config = EngineConfig::default();
    let alice = PlayerId::new("alice");
    let nemesis = Nemesis::new("bot1", config.clone());
    let mut rng = GameRng::new(21);
    let mut doc = to_storage(&new_match(7)).unwrap();

    for _ in 0..4 {
        let state = from_storage(doc).unwrap();
        let next = if state.is_turn(Target::Player, "alice") {
            let played = rules::submit(
                &state,
                &config,
                &alice,
                PlayerId::new("$me"),
                Attribute::from("player casts a spell"),
                Stat::Null,
            )
            .unwrap();
            rules::submit(&played, &config, &alice, alice.clone(), Attribute::EndTurn, Stat::Null)
                .unwrap()
        } else {
            let (next, outcome) = nemesis.act(&state, &mut rng).unwrap();
            assert!(matches!(outcome, Outcome::Acted(_)));
            next
        };
        doc = to_storage(&next).unwrap();
    }

    let state = from_storage(doc).unwrap();
    assert_eq!(state.turns.len(), 5);
    assert!(state.is_turn(Target::Player, state.opener.as_str()));
    assert!(rules::finalize(&state).unwrap().winner.is_none());
}
