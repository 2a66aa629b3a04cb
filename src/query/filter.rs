//! Card filtering by id, name, set code and schema-defined properties.
//!
//! Every term is a case-insensitive substring test. An empty term matches
//! everything; a card must satisfy all terms to be yielded.

use std::fmt;

use smallvec::SmallVec;

use crate::cards::CardRecord;
use crate::error::QueryError;
use crate::schema::SchemaConfig;

/// Search terms for [`filter_cards`].
///
/// ## Example
///
/// ```
/// use rust_cgs::query::CardQuery;
///
/// let query = CardQuery::new()
///     .with_name("dragon")
///     .with_property("type", "creature");
///
/// assert_eq!(query.property_terms().len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardQuery {
    id: String,
    name: String,
    set_code: String,
    properties: SmallVec<[(String, String); 4]>,
}

impl CardQuery {
    /// Query that matches every card.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from optional terms; `None` means "match everything".
    pub fn from_terms<K, V>(
        id: Option<&str>,
        name: Option<&str>,
        set_code: Option<&str>,
        properties: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            id: id.unwrap_or_default().to_string(),
            name: name.unwrap_or_default().to_string(),
            set_code: set_code.unwrap_or_default().to_string(),
            properties: properties
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, term: impl Into<String>) -> Self {
        self.id = term.into();
        self
    }

    #[must_use]
    pub fn with_name(mut self, term: impl Into<String>) -> Self {
        self.name = term.into();
        self
    }

    #[must_use]
    pub fn with_set_code(mut self, term: impl Into<String>) -> Self {
        self.set_code = term.into();
        self
    }

    /// Require property `name` to contain `term`.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, term: impl Into<String>) -> Self {
        self.properties.push((name.into(), term.into()));
        self
    }

    #[must_use]
    pub fn property_terms(&self) -> &[(String, String)] {
        &self.properties
    }
}

/// Lower-cased terms, computed once per filter call.
#[derive(Clone, Debug)]
struct Terms {
    id: String,
    name: String,
    set_code: String,
    properties: SmallVec<[(String, String); 4]>,
}

impl Terms {
    fn matches(&self, card: &CardRecord) -> bool {
        contains_ignore_case(&card.id, &self.id)
            && contains_ignore_case(&card.name, &self.name)
            && contains_ignore_case(&card.set_code, &self.set_code)
            && self.properties.iter().all(|(name, term)| {
                card.property(name)
                    .is_some_and(|value| value.contains_lowercase(term))
            })
    }
}

fn contains_ignore_case(haystack: &str, lowercase_needle: &str) -> bool {
    lowercase_needle.is_empty() || haystack.to_lowercase().contains(lowercase_needle)
}

/// Lazy iterator over the cards that match a query.
///
/// Yields cards in input order and never touches the source collection.
#[derive(Clone)]
pub struct CardFilter<I> {
    cards: I,
    terms: Terms,
}

// Source iterators such as `im::vector::Iter` are not `Debug`.
impl<I> fmt::Debug for CardFilter<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardFilter")
            .field("terms", &self.terms)
            .finish_non_exhaustive()
    }
}

impl<'a, I> Iterator for CardFilter<I>
where
    I: Iterator<Item = &'a CardRecord>,
{
    type Item = &'a CardRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let terms = &self.terms;
        self.cards.find(|card| terms.matches(card))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.cards.size_hint().1)
    }
}

/// Filter `cards` against `query`.
///
/// Property terms must name properties declared in `schema`; an unknown
/// name fails with [`QueryError::PropertyNotFound`] before any card is
/// examined, so "no match" and "bad query" stay distinguishable.
///
/// ```
/// use rust_cgs::cards::CardRecord;
/// use rust_cgs::query::{filter_cards, CardQuery};
/// use rust_cgs::schema::SchemaConfig;
///
/// let cards = vec![CardRecord::new("1", "Dragon", "M10")];
/// let schema = SchemaConfig::default();
///
/// let found: Vec<_> = filter_cards(&cards, &schema, &CardQuery::new().with_name("DRAG"))
///     .unwrap()
///     .collect();
/// assert_eq!(found.len(), 1);
/// ```
pub fn filter_cards<'a, C>(
    cards: C,
    schema: &SchemaConfig,
    query: &CardQuery,
) -> Result<CardFilter<C::IntoIter>, QueryError>
where
    C: IntoIterator<Item = &'a CardRecord>,
{
    if let Some((name, _)) = query
        .properties
        .iter()
        .find(|(name, _)| !schema.has_property(name))
    {
        return Err(QueryError::PropertyNotFound(name.clone()));
    }

    let terms = Terms {
        id: query.id.to_lowercase(),
        name: query.name.to_lowercase(),
        set_code: query.set_code.to_lowercase(),
        properties: query
            .properties
            .iter()
            .map(|(name, term)| (name.clone(), term.to_lowercase()))
            .collect(),
    };

    Ok(CardFilter {
        cards: cards.into_iter(),
        terms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::PropertyDef;
    use proptest::prelude::*;

    fn schema() -> SchemaConfig {
        SchemaConfig::default()
            .with_property(PropertyDef::new("cost"))
            .with_property(PropertyDef::new("type"))
    }

    fn card(id: &str, name: &str, set: &str, cost: Option<&str>, kind: &str) -> CardRecord {
        let schema = schema();
        CardRecord::new(id, name, set)
            .with_property(schema.card_properties[0].clone(), cost)
            .with_property(schema.card_properties[1].clone(), Some(kind))
    }

    fn cards() -> Vec<CardRecord> {
        vec![
            card("1", "Fireball", "M10", Some("3"), "Spell"),
            card("2", "Dragon", "M10", Some("6"), "Creature"),
            card("3", "Dragon Egg", "ROE", None, "Creature"),
        ]
    }

    fn ids<'a>(found: impl Iterator<Item = &'a CardRecord>) -> Vec<&'a str> {
        found.map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_empty_query_matches_all() {
        let cards = cards();
        let found = filter_cards(&cards, &schema(), &CardQuery::new()).unwrap();
        assert_eq!(ids(found), ["1", "2", "3"]);
    }

    #[test]
    fn test_name_is_case_insensitive_substring() {
        let cards = vec![card("1", "Dragon", "M10", None, "Creature")];
        let schema = schema();

        for term in ["drag", "DRAGON", "agO"] {
            let found = filter_cards(&cards, &schema, &CardQuery::new().with_name(term)).unwrap();
            assert_eq!(found.count(), 1, "term {term:?} should match");
        }
        let found = filter_cards(&cards, &schema, &CardQuery::new().with_name("dragons!")).unwrap();
        assert_eq!(found.count(), 0);
    }

    #[test]
    fn test_all_terms_must_hold() {
        let cards = cards();
        let query = CardQuery::new().with_name("dragon").with_set_code("m10");
        let found = filter_cards(&cards, &schema(), &query).unwrap();
        assert_eq!(ids(found), ["2"]);

        let query = CardQuery::new().with_id("1").with_name("dragon");
        assert_eq!(filter_cards(&cards, &schema(), &query).unwrap().count(), 0);
    }

    #[test]
    fn test_property_terms() {
        let cards = cards();
        let schema = schema();

        let query = CardQuery::new().with_property("type", "spe");
        assert_eq!(ids(filter_cards(&cards, &schema, &query).unwrap()), ["1"]);

        let query = CardQuery::new()
            .with_property("type", "CREATURE")
            .with_property("cost", "6");
        assert_eq!(ids(filter_cards(&cards, &schema, &query).unwrap()), ["2"]);
    }

    #[test]
    fn test_absent_property_value_matches_only_empty_term() {
        let cards = cards();
        let schema = schema();

        let query = CardQuery::new().with_property("cost", "");
        assert_eq!(filter_cards(&cards, &schema, &query).unwrap().count(), 3);

        let query = CardQuery::new().with_name("egg").with_property("cost", "3");
        assert_eq!(filter_cards(&cards, &schema, &query).unwrap().count(), 0);
    }

    #[test]
    fn test_undeclared_property_is_an_error() {
        let cards = cards();
        let query = CardQuery::new().with_property("rarity", "rare");
        let err = filter_cards(&cards, &schema(), &query).unwrap_err();
        assert_eq!(err, QueryError::PropertyNotFound("rarity".to_string()));
    }

    #[test]
    fn test_undeclared_property_fails_even_on_empty_input() {
        let cards: Vec<CardRecord> = Vec::new();
        let query = CardQuery::new().with_property("rarity", "");
        assert!(filter_cards(&cards, &schema(), &query).is_err());
    }

    #[test]
    fn test_filter_is_lazy_and_restartable() {
        let cards = cards();
        let schema = schema();
        let query = CardQuery::new().with_name("dragon");

        let mut first = filter_cards(&cards, &schema, &query).unwrap();
        assert_eq!(first.next().map(|c| c.id.as_str()), Some("2"));

        let again = filter_cards(&cards, &schema, &query).unwrap();
        assert_eq!(ids(again), ["2", "3"]);
        assert_eq!(cards.len(), 3);
    }

    #[test]
    fn test_from_terms() {
        let cards = cards();
        let query = CardQuery::from_terms(None, Some("fire"), None, [("type", "spell")]);
        assert_eq!(ids(filter_cards(&cards, &schema(), &query).unwrap()), ["1"]);

        let none: [(String, String); 0] = [];
        let query = CardQuery::from_terms(None, None, None, none);
        assert_eq!(query, CardQuery::new());
    }

    proptest! {
        #[test]
        fn prop_name_match_ignores_case(name in "[a-zA-Z]{1,12}", start in 0usize..12, len in 0usize..12) {
            let start = start.min(name.len());
            let end = (start + len).min(name.len());
            let term = &name[start..end];

            let cards = vec![CardRecord::new("1", name.clone(), "S")];
            let schema = SchemaConfig::default();

            for variant in [term.to_uppercase(), term.to_lowercase()] {
                let query = CardQuery::new().with_name(variant);
                prop_assert_eq!(filter_cards(&cards, &schema, &query).unwrap().count(), 1);
            }
        }
    }
}
