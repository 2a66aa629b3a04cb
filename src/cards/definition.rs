//! Parsed catalog entities: cards and sets.
//!
//! Both are built once by the loader and never changed afterwards. A
//! reload throws the old records away instead of patching them.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::attributes::{Properties, PropertyValue};
use crate::schema::{PropertyDef, SchemaConfig, DEFAULT_SET};

/// One card from the card catalog.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use rust_cgs::cards::CardRecord;
/// use rust_cgs::schema::PropertyDef;
///
/// let card = CardRecord::new("1", "Fireball", "M10")
///     .with_property(Arc::new(PropertyDef::new("cost")), Some("3"));
///
/// assert_eq!(card.value("cost"), Some("3"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    /// Card identifier, never empty for loaded cards.
    pub id: String,

    /// Card name (may be empty).
    pub name: String,

    /// Set code, or `DEFAULT_SET` when the record had none.
    pub set_code: String,

    /// One value per declared property.
    pub properties: Properties,
}

impl CardRecord {
    /// Create a card with no properties.
    pub fn new(id: impl Into<String>, name: impl Into<String>, set_code: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            set_code: set_code.into(),
            properties: Properties::default(),
        }
    }

    /// Add a property value (builder pattern).
    ///
    /// A second value under the same name replaces the first.
    #[must_use]
    pub fn with_property<S: Into<String>>(mut self, def: Arc<PropertyDef>, value: Option<S>) -> Self {
        self.properties
            .insert(def.name.clone(), PropertyValue::new(def, value.map(Into::into)));
        self
    }

    /// Get a property value by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    /// Get the stored text of a property.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        self.property(name).and_then(PropertyValue::as_text)
    }

    /// Value of the game's primary property for this card.
    #[must_use]
    pub fn primary_value(&self, schema: &SchemaConfig) -> Option<&str> {
        schema
            .primary_property()
            .and_then(|def| self.value(&def.name))
    }

    /// Was this card loaded without a set?
    #[must_use]
    pub fn has_default_set(&self) -> bool {
        self.set_code == DEFAULT_SET
    }
}

/// One set from the set catalog.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SetRecord {
    pub code: String,
    pub name: String,
}

impl SetRecord {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for SetRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_builder() {
        let cost = Arc::new(PropertyDef::new("cost"));
        let flavor = Arc::new(PropertyDef::new("flavor"));
        let card = CardRecord::new("1", "Test Card", "M10")
            .with_property(cost, Some("3"))
            .with_property(flavor, None::<String>);

        assert_eq!(card.id, "1");
        assert_eq!(card.value("cost"), Some("3"));
        assert_eq!(card.value("flavor"), None);
        assert!(card.property("flavor").is_some());
        assert!(card.property("power").is_none());
        assert!(!card.has_default_set());
    }

    #[test]
    fn test_primary_value() {
        let rules = PropertyDef::new("rules");
        let mut schema = SchemaConfig::default().with_property(rules);
        schema.card_primary_property = Some("rules".to_string());

        let card = CardRecord::new("1", "Bolt", DEFAULT_SET)
            .with_property(schema.card_properties[0].clone(), Some("Deal 3 damage."));

        assert_eq!(card.primary_value(&schema), Some("Deal 3 damage."));
        assert!(card.has_default_set());
    }

    #[test]
    fn test_set_display() {
        let set = SetRecord::new("M10", "Magic 2010");
        assert_eq!(set.to_string(), "Magic 2010 (M10)");
    }

    #[test]
    fn test_card_serialization() {
        let card = CardRecord::new("1", "Test", "S1")
            .with_property(Arc::new(PropertyDef::new("cost")), Some("2"));

        let json = serde_json::to_string(&card).unwrap();
        let deserialized: CardRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(card, deserialized);
    }
}
