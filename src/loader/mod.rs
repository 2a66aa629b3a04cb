//! Game loading: fetch-or-cache, parse, and the staged pipeline.
//!
//! ## Key Types
//!
//! - `CatalogLoader`: runs config → catalogs → images for one game
//! - `LoadState`: where a loader is in that sequence
//! - `Fetcher`: URL-to-file collaborator (`HttpFetcher` for HTTP)
//! - `ImageLoader`: cached-file-or-URL image collaborator

pub mod fetch;
pub mod image;
pub mod parse;
pub mod pipeline;

pub use fetch::{Fetcher, HttpFetcher};
pub use image::{CachedImageLoader, ImageFormat, ImageHandle, ImageLoader};
pub use parse::{card_from_record, parse_cards, parse_sets, set_from_record};
pub use pipeline::{CatalogLoader, LoadState};
