//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Opaque player key as stored in the match document (an account key, or
//! `bot1`, `bot2`, ... for bots).
//!
//! ## PlayerMap
//!
//! Insertion-ordered per-player storage. Document order matters: match
//! completion picks the first surviving player in this order.

use im::Vector;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::cards::CardId;

/// Player identifier.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// Actor placeholder resolved to the caller's identity on submission.
    pub const ME: &'static str = "$me";

    /// Create a new player ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_me(&self) -> bool {
        self.0 == Self::ME
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl std::borrow::Borrow<str> for PlayerId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for PlayerId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

/// Wager metadata. Owned by the payment layer; the engine only carries it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pot {
    #[serde(default)]
    pub lamports: u64,
    #[serde(default)]
    pub txsig: Option<String>,
    /// Anything else the payment layer stores (payout signatures etc.).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Pot {
    #[must_use]
    pub fn new(lamports: u64, txsig: Option<String>) -> Self {
        Self {
            lamports,
            txsig,
            extra: serde_json::Map::new(),
        }
    }
}

/// A player's deck. Cards are drawn from the tail of `cards`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    pub cards: Vector<CardId>,
    /// Deck document fields the engine does not read (id, owner, name).
    #[serde(flatten)]
    pub meta: serde_json::Map<String, serde_json::Value>,
}

impl Deck {
    pub fn new(cards: impl IntoIterator<Item = CardId>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
            meta: serde_json::Map::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Per-player match state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    #[serde(default)]
    pub pot: Pot,
    pub hp: i64,
    pub hpmax: i64,
    pub name: String,
    #[serde(default)]
    pub deck: Deck,
    #[serde(default)]
    pub hand: Vector<CardId>,
}

impl Player {
    /// Create a player at full health with an empty hand.
    pub fn new(name: impl Into<String>, hp: i64, deck: Deck) -> Self {
        Self {
            pot: Pot::default(),
            hp,
            hpmax: hp,
            name: name.into(),
            deck,
            hand: Vector::new(),
        }
    }

    /// Set pot metadata (builder pattern).
    #[must_use]
    pub fn with_pot(mut self, pot: Pot) -> Self {
        self.pot = pot;
        self
    }

    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.hp <= 0
    }
}

/// Insertion-ordered map from `PlayerId` to per-player data.
///
/// Backed by an `im::Vector`, so clones share structure. Player counts
/// are tiny, so lookups scan.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerMap<T: Clone> {
    entries: Vector<(PlayerId, T)>,
}

impl<T: Clone> Default for PlayerMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> PlayerMap<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vector::new(),
        }
    }

    /// Number of players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, player: &PlayerId) -> Option<&T> {
        self.entries
            .iter()
            .find(|(id, _)| id == player)
            .map(|(_, value)| value)
    }

    #[must_use]
    pub fn contains(&self, player: &PlayerId) -> bool {
        self.get(player).is_some()
    }

    /// Return a map with `player` set to `value`.
    ///
    /// Existing players keep their position; new players go last.
    #[must_use]
    pub fn update(&self, player: PlayerId, value: T) -> Self {
        let mut entries = self.entries.clone();
        match entries.iter().position(|(id, _)| *id == player) {
            Some(index) => {
                entries.set(index, (player, value));
            }
            None => entries.push_back((player, value)),
        }
        Self { entries }
    }

    /// Iterate over (PlayerId, &T) pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&PlayerId, &T)> {
        self.entries.iter().map(|(id, value)| (id, value))
    }

    /// Iterate over player IDs in document order.
    pub fn keys(&self) -> impl Iterator<Item = &PlayerId> {
        self.entries.iter().map(|(id, _)| id)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, value)| value)
    }
}

impl<T: Clone> FromIterator<(PlayerId, T)> for PlayerMap<T> {
    fn from_iter<I: IntoIterator<Item = (PlayerId, T)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |map, (id, value)| map.update(id, value))
    }
}

impl<T: Clone + Serialize> Serialize for PlayerMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, value) in &self.entries {
            map.serialize_entry(id, value)?;
        }
        map.end()
    }
}

impl<'de, T: Clone + Deserialize<'de>> Deserialize<'de> for PlayerMap<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PlayerMapVisitor<T>(std::marker::PhantomData<T>);

        impl<'de, T: Clone + Deserialize<'de>> Visitor<'de> for PlayerMapVisitor<T> {
            type Value = PlayerMap<T>;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "a map of player id to player data")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vector::new();
                while let Some((id, value)) = access.next_entry::<PlayerId, T>()? {
                    if entries.iter().any(|(seen, _): &(PlayerId, T)| *seen == id) {
                        return Err(serde::de::Error::custom(format!("duplicate player {}", id)));
                    }
                    entries.push_back((id, value));
                }
                Ok(PlayerMap { entries })
            }
        }

        deserializer.deserialize_map(PlayerMapVisitor(std::marker::PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        let p = PlayerId::new("bot1");
        assert_eq!(p.as_str(), "bot1");
        assert_eq!(format!("{}", p), "bot1");
        assert!(!p.is_me());
        assert!(PlayerId::new("$me").is_me());
    }

    #[test]
    fn test_player_map_keeps_order() {
        let map: PlayerMap<i32> = vec![
            (PlayerId::new("zed"), 1),
            (PlayerId::new("amy"), 2),
            (PlayerId::new("kim"), 3),
        ]
        .into_iter()
        .collect();

        let keys: Vec<_> = map.keys().map(PlayerId::as_str).collect();
        assert_eq!(keys, vec!["zed", "amy", "kim"]);
    }

    #[test]
    fn test_player_map_update_is_persistent() {
        let map: PlayerMap<i32> = vec![(PlayerId::new("a"), 1)].into_iter().collect();
        let changed = map.update(PlayerId::new("a"), 5);

        assert_eq!(map.get(&PlayerId::new("a")), Some(&1));
        assert_eq!(changed.get(&PlayerId::new("a")), Some(&5));
        assert_eq!(changed.len(), 1);
    }

    #[test]
    fn test_player_map_serialization_order() {
        let json = r#"{"p2":2,"p1":1}"#;
        let map: PlayerMap<i32> = serde_json::from_str(json).unwrap();

        assert_eq!(map.keys().next(), Some(&PlayerId::new("p2")));
        assert_eq!(serde_json::to_string(&map).unwrap(), json);
    }

    #[test]
    fn test_player_map_duplicate_rejected() {
        let result: Result<PlayerMap<i32>, _> = serde_json::from_str(r#"{"p1":1,"p1":2}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_player_document() {
        let json = r#"{
            "pot": {"lamports": 100, "txsig": null, "payoutsig": "abc"},
            "hp": 5000, "hpmax": 5000, "name": "BOT1",
            "deck": {"id": "d1", "owner": "x", "cards": ["c1", "c2"]},
            "hand": []
        }"#;
        let player: Player = serde_json::from_str(json).unwrap();

        assert_eq!(player.pot.lamports, 100);
        assert_eq!(player.pot.extra["payoutsig"], "abc");
        assert_eq!(player.deck.len(), 2);
        assert_eq!(player.deck.meta["id"], "d1");
        assert!(!player.is_defeated());
    }
}
