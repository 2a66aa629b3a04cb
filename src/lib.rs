//! # rust-cgs
//!
//! Data-driven card game definitions: load a game's schema, fetch or reuse
//! its set and card catalogs, and query the cards.
//!
//! ## Design Principles
//!
//! 1. **Schema From Data**: No hardcoded card properties. Each game's
//!    config declares them, and cards carry a name-keyed value store.
//!
//! 2. **Cache First**: Files are fetched only when a URL is configured and
//!    either auto-update is on or nothing is cached yet.
//!
//! 3. **Stage-Specific Failure**: A bad config or catalog stops the load;
//!    a missing image never does.
//!
//! ## Modules
//!
//! - `schema`: Property definitions, game config, file layout
//! - `cards`: Card and set records, property values, the catalog
//! - `loader`: Fetch/image collaborators, catalog parsing, load pipeline
//! - `query`: Case-insensitive card filtering
//! - `error`: Error types

pub mod cards;
pub mod error;
pub mod loader;
pub mod query;
pub mod schema;

// Re-export commonly used types
pub use crate::schema::{GamePaths, PropertyDef, PropertyKind, SchemaConfig, DEFAULT_SET};

pub use crate::cards::{CardRecord, Catalog, Properties, PropertyValue, SetRecord};

pub use crate::loader::{
    CachedImageLoader, CatalogLoader, Fetcher, HttpFetcher, ImageFormat, ImageHandle, ImageLoader,
    LoadState,
};

pub use crate::query::{filter_cards, CardFilter, CardQuery};

pub use crate::error::{FetchError, ImageError, LoadError, QueryError, SchemaError};
