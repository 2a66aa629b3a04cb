//! Game schema: property definitions, the game config, and file layout.
//!
//! ## Key Types
//!
//! - `PropertyDef`: one declared card property (name, label, kind, empty text)
//! - `PropertyKind`: declared value kind, metadata only
//! - `SchemaConfig`: the whole game definition parsed from `<name>.json`
//! - `GamePaths`: where the config, catalogs, images and decks live

pub mod config;
pub mod paths;
pub mod property;

pub use config::{
    SchemaConfig, DEFAULT_CARD_IMAGE_FILE_NAME_FORMAT, DEFAULT_COPIES_OF_CARD_PER_DECK,
    DEFAULT_DECK_CARD_STACK_COUNT, DEFAULT_DECK_FILE_TYPE, DEFAULT_IMAGE_FILE_TYPE, DEFAULT_SET,
};
pub use paths::GamePaths;
pub use property::{PropertyDef, PropertyKind};
