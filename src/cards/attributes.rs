//! Per-card property value store.
//!
//! Which properties a card has is decided by the game's schema, not by
//! this crate, so values are kept in a map keyed by property name.
//! Every value is stored as text; the `PropertyKind` on the definition
//! travels along as metadata and is never used to convert the value.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::schema::PropertyDef;

/// A card's value for one declared property.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyValue {
    /// Definition this value was read against (shared with the schema).
    pub def: Arc<PropertyDef>,

    /// Raw text, or `None` when the record had no such field.
    pub value: Option<String>,
}

impl PropertyValue {
    /// Create a value for a definition.
    pub fn new(def: Arc<PropertyDef>, value: Option<String>) -> Self {
        Self { def, value }
    }

    /// Property name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.def.name
    }

    /// Stored text, if any.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Did the record lack this property?
    #[must_use]
    pub fn is_absent(&self) -> bool {
        self.value.is_none()
    }

    /// Text to show: the stored value, or the definition's empty text.
    #[must_use]
    pub fn display_text(&self) -> &str {
        match self.value.as_deref() {
            Some(text) if !text.is_empty() => text,
            _ => &self.def.empty,
        }
    }

    /// Case-insensitive substring test. `needle` must already be lowercase.
    ///
    /// An absent value is treated as empty text.
    #[must_use]
    pub fn contains_lowercase(&self, needle: &str) -> bool {
        match self.value.as_deref() {
            Some(text) => text.to_lowercase().contains(needle),
            None => needle.is_empty(),
        }
    }
}

/// Property values of one card, keyed by property name.
pub type Properties = FxHashMap<String, PropertyValue>;
