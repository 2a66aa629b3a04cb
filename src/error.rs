//! Error types.
//!
//! Each concern gets its own enum so callers can tell a failed load
//! apart from a malformed query:
//!
//! - `FetchError`: the URL-to-file collaborator failed
//! - `ImageError`: an image could not be acquired (never fatal)
//! - `SchemaError`: the property list breaks the name invariants
//! - `LoadError`: the pipeline stopped (config or catalog stage)
//! - `QueryError`: a filter referenced something the schema lacks

use std::path::PathBuf;

use thiserror::Error;

/// Failure to retrieve a URL into a local file.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent or the body could not be read.
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },

    /// The server answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Writing the downloaded body failed.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure to acquire a background or card-back image.
#[derive(Debug, Error)]
pub enum ImageError {
    /// No cached file and no URL to fetch it from.
    #[error("image file {0} does not exist")]
    Missing(PathBuf),

    /// The fallback fetch failed.
    #[error("image fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// The file exists but is not a usable image.
    #[error("image file {path} could not be decoded: {reason}")]
    Decode { path: PathBuf, reason: String },

    /// The cached file could not be read.
    #[error("failed to read image {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Violations of the property-name invariants.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A property definition at this position has no name.
    #[error("card property #{0} has an empty name")]
    EmptyPropertyName(usize),

    /// Two property definitions share a name.
    #[error("card property `{0}` is declared more than once")]
    DuplicateProperty(String),
}

/// Fatal pipeline errors.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The config file had to be fetched and the fetch failed.
    #[error("failed to fetch game config: {0}")]
    ConfigFetch(#[source] FetchError),

    /// The config file could not be read.
    #[error("failed to read game config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not a valid game definition.
    #[error("failed to parse game config {path}: {reason}")]
    ConfigParse { path: PathBuf, reason: String },

    /// A catalog file could not be read or is not a JSON array.
    #[error("failed to load card game data from {path}: {reason}")]
    CatalogParse { path: PathBuf, reason: String },

    /// `load` was called on a loader that already ran.
    #[error("catalog loader has already been started")]
    AlreadyStarted,
}

/// Query-time errors.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum QueryError {
    /// A property term names a property the schema does not declare.
    #[error("card property `{0}` is not declared by this game")]
    PropertyNotFound(String),
}
