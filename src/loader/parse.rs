//! Catalog parsing: raw JSON records into `SetRecord`s and `CardRecord`s.
//!
//! Field names are resolved at runtime through the schema's identifiers.
//! Any scalar is accepted as text (`3` reads as `"3"`); arrays and objects
//! are kept as compact JSON text. Records that lack the required fields
//! are dropped, not reported.

use serde_json::{Map, Value};

use crate::cards::{CardRecord, Properties, PropertyValue, SetRecord};
use crate::schema::{SchemaConfig, DEFAULT_SET};

/// Text of field `key`, or `None` when missing or `null`.
#[must_use]
pub fn field_text(record: &Map<String, Value>, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other @ (Value::Array(_) | Value::Object(_)) => Some(other.to_string()),
    }
}

/// Build a set from a raw record; `None` unless code and name are both non-empty.
#[must_use]
pub fn set_from_record(record: &Value, schema: &SchemaConfig) -> Option<SetRecord> {
    let record = record.as_object()?;
    let code = field_text(record, &schema.set_code_identifier).filter(|s| !s.is_empty())?;
    let name = field_text(record, &schema.set_name_identifier).filter(|s| !s.is_empty())?;
    Some(SetRecord::new(code, name))
}

/// Build a card from a raw record; `None` unless the id is non-empty.
///
/// Every declared property gets an entry, absent fields included.
#[must_use]
pub fn card_from_record(record: &Value, schema: &SchemaConfig) -> Option<CardRecord> {
    let record = record.as_object()?;
    let id = field_text(record, &schema.card_id_identifier).filter(|s| !s.is_empty())?;
    let name = field_text(record, &schema.card_name_identifier).unwrap_or_default();
    let set_code = field_text(record, &schema.card_set_identifier)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_SET.to_string());

    let mut properties = Properties::default();
    properties.reserve(schema.card_properties.len());
    for def in &schema.card_properties {
        let value = field_text(record, &def.name);
        properties.insert(def.name.clone(), PropertyValue::new(def.clone(), value));
    }

    Some(CardRecord {
        id,
        name,
        set_code,
        properties,
    })
}

/// Parse a set catalog document.
pub fn parse_sets(text: &str, schema: &SchemaConfig) -> Result<Vec<SetRecord>, serde_json::Error> {
    let records: Vec<Value> = serde_json::from_str(text)?;
    let total = records.len();
    let sets: Vec<_> = records
        .iter()
        .filter_map(|record| set_from_record(record, schema))
        .collect();
    log_dropped("set", total, sets.len());
    Ok(sets)
}

/// Parse a card catalog document.
pub fn parse_cards(text: &str, schema: &SchemaConfig) -> Result<Vec<CardRecord>, serde_json::Error> {
    let records: Vec<Value> = serde_json::from_str(text)?;
    let total = records.len();
    let cards: Vec<_> = records
        .iter()
        .filter_map(|record| card_from_record(record, schema))
        .collect();
    log_dropped("card", total, cards.len());
    Ok(cards)
}

fn log_dropped(kind: &str, total: usize, kept: usize) {
    if kept < total {
        tracing::debug!(kind, dropped = total - kept, kept, "dropped incomplete catalog records");
    }
}
