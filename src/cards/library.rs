//! Card library: card documents keyed by id.
//!
//! The persistence layer loads card documents and hands them to the
//! engine through a `CardLibrary`. Effects look cards up here and read
//! their stats through a `Card` view.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::attributes::{CardRecord, Stat};
use super::view::{Card, CardMapping};
use crate::core::config::EngineConfig;
use crate::core::error::{EngineError, Result};

/// Identifier of a card document.
///
/// Decks and hands hold these; the library maps them to documents.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    /// Create a new card ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Card documents available to the engine for one request.
///
/// ## Example
///
/// ```
/// use cardcraft_engine::cards::{CardId, CardLibrary, CardMapping, CardRecord, Stat};
///
/// let mut library = CardLibrary::new(CardMapping::default());
///
/// let mut golem = CardRecord::new();
/// golem.insert("A_value".to_string(), Stat::from("Golem"));
/// golem.insert("E_value".to_string(), Stat::Int(40));
/// library.insert(CardId::new("c-1"), golem);
///
/// let card = library.view(&CardId::new("c-1")).unwrap();
/// assert_eq!(card.get("atk"), Stat::Int(40));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardLibrary {
    cards: FxHashMap<CardId, CardRecord>,
    mapping: CardMapping,
}

impl CardLibrary {
    /// Create an empty library that resolves stats through `mapping`.
    #[must_use]
    pub fn new(mapping: CardMapping) -> Self {
        Self {
            cards: FxHashMap::default(),
            mapping,
        }
    }

    /// Create an empty library using the configured stat mapping.
    #[must_use]
    pub fn for_config(config: &EngineConfig) -> Self {
        Self::new(config.card_mapping.clone())
    }

    /// Build a library from card documents carrying a text `id` field.
    pub fn from_documents(
        mapping: CardMapping,
        documents: impl IntoIterator<Item = CardRecord>,
    ) -> Result<Self> {
        let mut library = Self::new(mapping);
        for document in documents {
            let id = match document.get("id") {
                Some(Stat::Text(id)) => CardId::new(id.clone()),
                other => {
                    return Err(EngineError::InvalidDocument(format!(
                        "card document without text id: {:?}",
                        other
                    )))
                }
            };
            library.insert(id, document);
        }
        Ok(library)
    }

    /// Add or replace a card document. Returns the replaced document.
    pub fn insert(&mut self, id: CardId, record: CardRecord) -> Option<CardRecord> {
        self.cards.insert(id, record)
    }

    /// Get a raw card document by ID.
    #[must_use]
    pub fn get(&self, id: &CardId) -> Option<&CardRecord> {
        self.cards.get(id)
    }

    /// View a card through the library's mapping.
    pub fn view(&self, id: &CardId) -> Result<Card> {
        self.get(id)
            .map(|record| Card::new(record.clone(), self.mapping.clone()))
            .ok_or_else(|| EngineError::UnknownCard(id.clone()))
    }

    #[must_use]
    pub fn mapping(&self) -> &CardMapping {
        &self.mapping
    }

    #[must_use]
    pub fn contains(&self, id: &CardId) -> bool {
        self.cards.contains_key(id)
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
