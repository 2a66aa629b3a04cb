//! Loaded set and card collections.
//!
//! The `Catalog` keeps records in the order they appeared in the catalog
//! files. Collections are `im::Vector`s, so handing a snapshot to a UI or
//! another task is an O(1) clone.

use im::Vector;

use super::definition::{CardRecord, SetRecord};
use crate::error::QueryError;
use crate::query::{filter_cards, CardFilter, CardQuery};
use crate::schema::SchemaConfig;

/// Sets and cards of one game.
///
/// ## Example
///
/// ```
/// use rust_cgs::cards::{Catalog, CardRecord, SetRecord};
///
/// let mut catalog = Catalog::new();
/// catalog.push_set(SetRecord::new("M10", "Magic 2010"));
/// catalog.push_card(CardRecord::new("1", "Lightning Bolt", "M10"));
///
/// assert_eq!(catalog.set("M10").unwrap().name, "Magic 2010");
/// assert_eq!(catalog.cards_in_set("M10").count(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    sets: Vector<SetRecord>,
    cards: Vector<CardRecord>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from already-parsed records.
    pub fn from_parts(sets: impl IntoIterator<Item = SetRecord>, cards: impl IntoIterator<Item = CardRecord>) -> Self {
        Self {
            sets: sets.into_iter().collect(),
            cards: cards.into_iter().collect(),
        }
    }

    /// Append a set. Repeated codes are kept as separate entries.
    pub fn push_set(&mut self, set: SetRecord) {
        self.sets.push_back(set);
    }

    /// Append a card.
    pub fn push_card(&mut self, card: CardRecord) {
        self.cards.push_back(card);
    }

    #[must_use]
    pub fn sets(&self) -> &Vector<SetRecord> {
        &self.sets
    }

    #[must_use]
    pub fn cards(&self) -> &Vector<CardRecord> {
        &self.cards
    }

    /// First set with the given code.
    #[must_use]
    pub fn set(&self, code: &str) -> Option<&SetRecord> {
        self.sets.iter().find(|s| s.code == code)
    }

    /// First card with the given id.
    #[must_use]
    pub fn card(&self, id: &str) -> Option<&CardRecord> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// Cards whose set code equals `code` exactly.
    pub fn cards_in_set<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a CardRecord> + 'a {
        self.cards.iter().filter(move |c| c.set_code == code)
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// No sets and no cards?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty() && self.sets.is_empty()
    }

    /// Filter the cards with `query`. See [`filter_cards`].
    pub fn filter<'a>(
        &'a self,
        schema: &SchemaConfig,
        query: &CardQuery,
    ) -> Result<CardFilter<im::vector::Iter<'a, CardRecord>>, QueryError> {
        filter_cards(&self.cards, schema, query)
    }
}
