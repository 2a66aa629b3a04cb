//! Game definition loaded from `<name>.json`.
//!
//! `SchemaConfig` starts from documented defaults and is then overlaid
//! with whatever fields the config file provides. Fields the file omits
//! (or sets to `null`) keep their current value, so a config written for
//! an older version of a game still loads.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::property::PropertyDef;
use crate::cards::CardRecord;
use crate::error::SchemaError;

/// Set code given to cards whose record has no set.
pub const DEFAULT_SET: &str = "_CGSDEFAULT_";
/// Copies of one card allowed in a deck.
pub const DEFAULT_COPIES_OF_CARD_PER_DECK: u32 = 4;
/// Cards per stack when a deck is laid out.
pub const DEFAULT_DECK_CARD_STACK_COUNT: u32 = 15;
pub const DEFAULT_DECK_FILE_TYPE: &str = "txt";
pub const DEFAULT_IMAGE_FILE_TYPE: &str = "png";
/// `{0}` is replaced with the card id.
pub const DEFAULT_CARD_IMAGE_FILE_NAME_FORMAT: &str = "{0}";

/// Complete definition of one card game.
///
/// URLs are optional; an empty string is treated the same as a missing
/// URL. The identifier fields name the keys used to find the id, name and
/// set of a raw catalog record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchemaConfig {
    pub all_cards_url: Option<String>,
    pub all_sets_url: Option<String>,

    /// Re-fetch every URL-backed file on each load, even when cached.
    pub auto_update: bool,
    /// Where the config file itself is fetched from.
    pub auto_update_url: Option<String>,

    pub background_image_file_type: String,
    pub background_image_url: Option<String>,
    pub card_back_image_file_type: String,
    pub card_back_image_url: Option<String>,

    pub card_id_identifier: String,
    pub card_name_identifier: String,
    pub card_set_identifier: String,

    /// Card image file name, with `{0}` = id, `{1}` = name, `{2}` = set code.
    pub card_image_file_name_format: String,
    pub card_image_file_type: String,
    pub card_image_url_base: Option<String>,

    /// Property shown first when a card is summarized.
    pub card_primary_property: Option<String>,
    /// Ordered property schema.
    pub card_properties: Vec<Arc<PropertyDef>>,

    pub copies_of_card_per_deck: u32,
    pub deck_card_stack_count: u32,
    pub deck_file_type: String,

    pub set_code_identifier: String,
    pub set_name_identifier: String,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            all_cards_url: None,
            all_sets_url: None,
            auto_update: false,
            auto_update_url: None,
            background_image_file_type: DEFAULT_IMAGE_FILE_TYPE.to_string(),
            background_image_url: None,
            card_back_image_file_type: DEFAULT_IMAGE_FILE_TYPE.to_string(),
            card_back_image_url: None,
            card_id_identifier: "id".to_string(),
            card_name_identifier: "name".to_string(),
            card_set_identifier: "set".to_string(),
            card_image_file_name_format: DEFAULT_CARD_IMAGE_FILE_NAME_FORMAT.to_string(),
            card_image_file_type: DEFAULT_IMAGE_FILE_TYPE.to_string(),
            card_image_url_base: None,
            card_primary_property: None,
            card_properties: Vec::new(),
            copies_of_card_per_deck: DEFAULT_COPIES_OF_CARD_PER_DECK,
            deck_card_stack_count: DEFAULT_DECK_CARD_STACK_COUNT,
            deck_file_type: DEFAULT_DECK_FILE_TYPE.to_string(),
            set_code_identifier: "code".to_string(),
            set_name_identifier: "name".to_string(),
        }
    }
}

impl SchemaConfig {
    /// Set the URL the config is fetched from.
    #[must_use]
    pub fn with_auto_update_url(mut self, url: impl Into<String>) -> Self {
        self.auto_update_url = Some(url.into());
        self
    }

    /// Append a property definition.
    #[must_use]
    pub fn with_property(mut self, def: PropertyDef) -> Self {
        self.card_properties.push(Arc::new(def));
        self
    }

    /// Overlay the fields of a JSON config document onto this config.
    ///
    /// Keys are matched case-insensitively, so `AllCardsURL` sets
    /// `all_cards_url`. Fails if the text is not a JSON object or a field
    /// has the wrong shape; `self` is left untouched in that case.
    pub fn overlay_json(&mut self, text: &str) -> Result<(), serde_json::Error> {
        let Value::Object(patch) = serde_json::from_str::<Value>(text)? else {
            return Err(serde::de::Error::custom("game config must be a JSON object"));
        };

        let mut merged = match serde_json::to_value(&*self)? {
            Value::Object(fields) => fields,
            _ => Map::new(),
        };
        for (key, value) in patch {
            if value.is_null() {
                continue;
            }
            let key = canonical_key(merged.keys().map(String::as_str), key);
            let value = match (key.as_str(), value) {
                ("cardProperties", Value::Array(defs)) => {
                    Value::Array(defs.into_iter().map(canonical_property).collect())
                }
                (_, value) => value,
            };
            merged.insert(key, value);
        }

        *self = serde_json::from_value(Value::Object(merged))?;
        Ok(())
    }

    /// Check that every property has a unique, non-empty name.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut seen = rustc_hash::FxHashSet::default();
        for (index, def) in self.card_properties.iter().enumerate() {
            if def.name.is_empty() {
                return Err(SchemaError::EmptyPropertyName(index));
            }
            if !seen.insert(def.name.as_str()) {
                return Err(SchemaError::DuplicateProperty(def.name.clone()));
            }
        }
        Ok(())
    }

    /// Look up a property definition by name.
    ///
    /// With duplicate names the last declaration wins, matching the
    /// per-card property store.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Arc<PropertyDef>> {
        self.card_properties.iter().rev().find(|def| def.name == name)
    }

    /// Is `name` a declared property?
    #[must_use]
    pub fn has_property(&self, name: &str) -> bool {
        self.property(name).is_some()
    }

    /// The declared primary property, if it names a known property.
    #[must_use]
    pub fn primary_property(&self) -> Option<&Arc<PropertyDef>> {
        self.card_primary_property
            .as_deref()
            .and_then(|name| self.property(name))
    }

    #[must_use]
    pub fn config_url(&self) -> Option<&str> {
        non_empty(&self.auto_update_url)
    }

    #[must_use]
    pub fn sets_url(&self) -> Option<&str> {
        non_empty(&self.all_sets_url)
    }

    #[must_use]
    pub fn cards_url(&self) -> Option<&str> {
        non_empty(&self.all_cards_url)
    }

    #[must_use]
    pub fn background_url(&self) -> Option<&str> {
        non_empty(&self.background_image_url)
    }

    #[must_use]
    pub fn card_back_url(&self) -> Option<&str> {
        non_empty(&self.card_back_image_url)
    }

    /// Card image file name (without extension) for `card`.
    #[must_use]
    pub fn card_image_file_name(&self, card: &CardRecord) -> String {
        self.card_image_file_name_format
            .replace("{0}", &card.id)
            .replace("{1}", &card.name)
            .replace("{2}", &card.set_code)
    }

    /// Remote location of a card's image, if the game publishes one.
    #[must_use]
    pub fn card_image_url(&self, card: &CardRecord) -> Option<String> {
        let base = non_empty(&self.card_image_url_base)?;
        Some(format!(
            "{}/{}.{}",
            base.trim_end_matches('/'),
            self.card_image_file_name(card),
            self.card_image_file_type
        ))
    }
}

const PROPERTY_DEF_KEYS: [&str; 4] = ["name", "display", "type", "empty"];

/// The known key equal to `key` ignoring ASCII case, or `key` itself.
fn canonical_key<'k>(known: impl IntoIterator<Item = &'k str>, key: String) -> String {
    known
        .into_iter()
        .find(|k| k.eq_ignore_ascii_case(&key))
        .map_or(key, str::to_string)
}

fn canonical_property(def: Value) -> Value {
    match def {
        Value::Object(fields) => Value::Object(
            fields
                .into_iter()
                .map(|(key, value)| (canonical_key(PROPERTY_DEF_KEYS, key), value))
                .collect(),
        ),
        other => other,
    }
}

fn non_empty(url: &Option<String>) -> Option<&str> {
    url.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::PropertyKind;

    #[test]
    fn test_defaults() {
        let config = SchemaConfig::default();
        assert_eq!(config.card_id_identifier, "id");
        assert_eq!(config.card_name_identifier, "name");
        assert_eq!(config.card_set_identifier, "set");
        assert_eq!(config.set_code_identifier, "code");
        assert_eq!(config.set_name_identifier, "name");
        assert_eq!(config.copies_of_card_per_deck, 4);
        assert_eq!(config.deck_card_stack_count, 15);
        assert_eq!(config.background_image_file_type, "png");
        assert_eq!(config.deck_file_type, "txt");
        assert!(!config.auto_update);
    }

    #[test]
    fn test_overlay_keeps_unset_fields() {
        let mut config = SchemaConfig::default().with_auto_update_url("https://example.com/game.json");
        config
            .overlay_json(
                r#"{
                    "cardIdIdentifier": "uuid",
                    "copiesOfCardPerDeck": 1,
                    "allCardsUrl": "https://example.com/cards.json",
                    "cardProperties": [{"name": "cost", "type": "Integer"}, {"name": "type"}]
                }"#,
            )
            .unwrap();

        assert_eq!(config.card_id_identifier, "uuid");
        assert_eq!(config.card_name_identifier, "name");
        assert_eq!(config.copies_of_card_per_deck, 1);
        assert_eq!(config.deck_card_stack_count, 15);
        assert_eq!(config.cards_url(), Some("https://example.com/cards.json"));
        assert_eq!(config.config_url(), Some("https://example.com/game.json"));
        assert_eq!(config.card_properties.len(), 2);
        assert_eq!(config.card_properties[0].kind, PropertyKind::Integer);
    }

    #[test]
    fn test_overlay_null_keeps_value() {
        let mut config = SchemaConfig::default();
        config.overlay_json(r#"{"cardIdIdentifier": null}"#).unwrap();
        assert_eq!(config.card_id_identifier, "id");
    }

    #[test]
    fn test_overlay_rejects_bad_documents() {
        let mut config = SchemaConfig::default();
        assert!(config.overlay_json("[1, 2]").is_err());
        assert!(config.overlay_json("{ not json").is_err());
        assert!(config.overlay_json(r#"{"copiesOfCardPerDeck": "four"}"#).is_err());
        assert_eq!(config, SchemaConfig::default());
    }

    #[test]
    fn test_overlay_keys_ignore_case() {
        let mut config = SchemaConfig::default();
        config
            .overlay_json(
                r#"{
                    "AllCardsURL": "https://example.com/cards.json",
                    "CardIdIdentifier": "uuid",
                    "CopiesOfCardPerDeck": 2,
                    "CardImageURLBase": "https://example.com/img",
                    "cardProperties": [{"Name": "cost", "Type": "Integer", "Display": "Cost"}]
                }"#,
            )
            .unwrap();

        assert_eq!(config.cards_url(), Some("https://example.com/cards.json"));
        assert_eq!(config.card_id_identifier, "uuid");
        assert_eq!(config.copies_of_card_per_deck, 2);
        assert_eq!(config.card_image_url_base.as_deref(), Some("https://example.com/img"));
        assert_eq!(config.card_properties[0].name, "cost");
        assert_eq!(config.card_properties[0].kind, PropertyKind::Integer);
        assert_eq!(config.card_properties[0].display_name(), "Cost");
    }

    #[test]
    fn test_empty_url_is_absent() {
        let mut config = SchemaConfig::default();
        config.overlay_json(r#"{"allSetsUrl": ""}"#).unwrap();
        assert_eq!(config.sets_url(), None);
    }

    #[test]
    fn test_validate() {
        let config = SchemaConfig::default()
            .with_property(PropertyDef::new("cost"))
            .with_property(PropertyDef::new("type"));
        assert_eq!(config.validate(), Ok(()));

        let dup = config.clone().with_property(PropertyDef::new("cost"));
        assert_eq!(dup.validate(), Err(SchemaError::DuplicateProperty("cost".to_string())));

        let empty = SchemaConfig::default().with_property(PropertyDef::new(""));
        assert_eq!(empty.validate(), Err(SchemaError::EmptyPropertyName(0)));
    }

    #[test]
    fn test_duplicate_property_last_wins() {
        let config = SchemaConfig::default()
            .with_property(PropertyDef::new("cost").with_display("First"))
            .with_property(PropertyDef::new("cost").with_display("Second"));
        assert_eq!(config.property("cost").unwrap().display, "Second");
    }

    #[test]
    fn test_primary_property() {
        let mut config = SchemaConfig::default().with_property(PropertyDef::new("rules"));
        assert!(config.primary_property().is_none());

        config.card_primary_property = Some("rules".to_string());
        assert_eq!(config.primary_property().unwrap().name, "rules");

        config.card_primary_property = Some("flavor".to_string());
        assert!(config.primary_property().is_none());
    }

    #[test]
    fn test_card_image_naming() {
        let mut config = SchemaConfig::default();
        let card = CardRecord::new("42", "Fireball", "M10");
        assert_eq!(config.card_image_file_name(&card), "42");
        assert_eq!(config.card_image_url(&card), None);

        config.card_image_file_name_format = "{2}_{0}".to_string();
        config.card_image_url_base = Some("https://img.example.com/cards/".to_string());
        config.card_image_file_type = "jpg".to_string();
        assert_eq!(
            config.card_image_url(&card).as_deref(),
            Some("https://img.example.com/cards/M10_42.jpg")
        );
    }
}
