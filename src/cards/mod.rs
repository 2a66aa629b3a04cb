//! Card data model: records, property values, and the loaded catalog.
//!
//! ## Key Types
//!
//! - `CardRecord`: id, name, set code and schema-defined properties
//! - `SetRecord`: set code and name
//! - `PropertyValue`: a card's text value for one `PropertyDef`
//! - `Catalog`: the ordered set and card collections of one game

pub mod attributes;
pub mod catalog;
pub mod definition;

pub use attributes::{Properties, PropertyValue};
pub use catalog::Catalog;
pub use definition::{CardRecord, SetRecord};
