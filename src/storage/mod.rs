//! Match document conversion.
//!
//! The engine owns no persistence. The host loads a match document,
//! hands it to `from_storage`, runs transitions, and writes back what
//! `to_storage` returns. Concurrent writers must be serialized by the host.
//!
//! Document shape:
//!
//! ```json
//! {
//!   "id": "m1",
//!   "fields": [[null, null, null]],
//!   "opener": "p1",
//!   "created": 1700000000, "finished": null, "winner": null,
//!   "players": {"p1": {"pot": {}, "hp": 5000, "hpmax": 5000, "name": "..",
//!                      "deck": {"cards": []}, "hand": []}},
//!   "responses": {}, "futures": {},
//!   "cursor": [0, 0],
//!   "turns": [[["p1", "draw", 3]]]
//! }
//! ```

use serde_json::Value;
use tracing::debug;

use crate::core::error::Result;
use crate::core::state::Match;

/// Store-assigned key; not part of the match state.
const STORE_ID: &str = "_id";

/// Convert a match into its stored document.
pub fn to_storage(state: &Match) -> Result<Value> {
    Ok(serde_json::to_value(state)?)
}

/// Rebuild a match from a stored document and check its invariants.
pub fn from_storage(mut document: Value) -> Result<Match> {
    if let Some(fields) = document.as_object_mut() {
        fields.remove(STORE_ID);
    }

    let state: Match = serde_json::from_value(document)?;
    state.validate()?;
    debug!(match_id = %state.id, turns = state.turns.len(), "match loaded");
    Ok(state)
}

/// `to_storage`, as a JSON string.
pub fn to_json_string(state: &Match) -> Result<String> {
    Ok(serde_json::to_string(state)?)
}

/// `from_storage`, from a JSON string.
pub fn from_json_str(json: &str) -> Result<Match> {
    from_storage(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::EngineError;
    use serde_json::json;

    fn document() -> Value {
        json!({
            "_id": "abc123",
            "id": "m1",
            "fields": [[null, {"A_value": "Golem", "E_value": 4}], [null, null]],
            "opener": "p2",
            "created": 1700000000,
            "finished": null,
            "winner": null,
            "players": {
                "p1": {"pot": {"lamports": 0, "txsig": null}, "hp": 10, "hpmax": 10,
                       "name": "One", "deck": {"cards": ["a"]}, "hand": ["b"]},
                "p2": {"pot": {"lamports": 0, "txsig": null}, "hp": 10, "hpmax": 10,
                       "name": "Two", "deck": {"cards": []}, "hand": []}
            },
            "responses": {},
            "futures": {},
            "cursor": [1, 0],
            "turns": [[["p2", "draw", 3], ["p2", "end_turn", null]], []]
        })
    }

    #[test]
    fn test_load_drops_store_id() {
        let state = from_storage(document()).unwrap();
        assert_eq!(state.id, "m1");
        assert_eq!(state.turns.len(), 2);
        assert!(to_storage(&state).unwrap().get("_id").is_none());
    }

    #[test]
    fn test_round_trip() {
        let state = from_storage(document()).unwrap();
        let again = from_storage(to_storage(&state).unwrap()).unwrap();
        assert_eq!(state, again);
    }

    #[test]
    fn test_player_order_survives() {
        let state = from_json_str(&to_json_string(&from_storage(document()).unwrap()).unwrap())
            .unwrap();
        let keys: Vec<_> = state.players.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["p1", "p2"]);
    }

    #[test]
    fn test_cursor_out_of_range() {
        let mut doc = document();
        doc["cursor"] = json!([5, 0]);
        assert!(matches!(from_storage(doc), Err(EngineError::InvalidDocument(_))));
    }

    #[test]
    fn test_malformed_document() {
        let result = from_storage(json!({"id": "m1"}));
        assert!(matches!(result, Err(EngineError::Serialization(_))));
    }
}
