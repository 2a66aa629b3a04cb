//! The staged load pipeline.
//!
//! ```text
//! NotStarted -> LoadingConfig -> LoadingCatalogs -> LoadingImages -> Loaded
//!                     |                 |
//!                     +---> Failed <----+
//! ```
//!
//! Each stage applies the same cache-or-fetch rule to its files: fetch
//! only when a URL is configured and either auto-update is on or the file
//! is not cached yet. The stages differ in how they treat failure:
//!
//! - config: any fetch, read or parse failure is fatal
//! - catalogs: fetch failures fall back to the cached file (or to no
//!   records); read and parse failures are fatal
//! - images: every failure is logged and the image left empty
//!
//! Catalogs are parsed into fresh collections and committed only when
//! both files succeed, so a failed load never leaves half a catalog.

use std::path::Path;

use tracing::{debug, error, info, warn};

use super::fetch::Fetcher;
use super::image::{CachedImageLoader, ImageHandle, ImageLoader};
use super::parse::{parse_cards, parse_sets};
use crate::cards::{CardRecord, Catalog, SetRecord};
use crate::error::{LoadError, QueryError};
use crate::query::{filter_cards, CardFilter, CardQuery};
use crate::schema::{GamePaths, SchemaConfig};

/// Progress of a `CatalogLoader`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    NotStarted,
    LoadingConfig,
    LoadingCatalogs,
    LoadingImages,
    Loaded,
    /// Terminal failure with a human-readable message.
    Failed(String),
}

impl LoadState {
    /// Has the load finished, successfully or not?
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, LoadState::Loaded | LoadState::Failed(_))
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Loads one card game: config, then catalogs, then images.
///
/// A loader runs once. To reload, or to retry after a failure, build a
/// new loader; the old one keeps whatever it reached.
///
/// ## Example
///
/// ```no_run
/// use rust_cgs::loader::{CatalogLoader, HttpFetcher};
/// use rust_cgs::query::CardQuery;
/// use rust_cgs::schema::GamePaths;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let paths = GamePaths::new("games", "Standard");
/// let mut loader = CatalogLoader::new(paths, HttpFetcher::new())
///     .with_config_url("https://example.com/Standard.json");
///
/// loader.load().await?;
/// for card in loader.filter_cards(&CardQuery::new().with_name("dragon"))? {
///     println!("{} ({})", card.name, card.set_code);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CatalogLoader<F, I> {
    paths: GamePaths,
    config: SchemaConfig,
    state: LoadState,
    catalog: Catalog,
    background_image: Option<ImageHandle>,
    card_back_image: Option<ImageHandle>,
    fetcher: F,
    images: I,
}

impl<F> CatalogLoader<F, CachedImageLoader<F>>
where
    F: Fetcher + Clone,
{
    /// Loader whose images are fetched with the same `Fetcher`.
    pub fn new(paths: GamePaths, fetcher: F) -> Self {
        let images = CachedImageLoader::new(fetcher.clone());
        Self::with_image_loader(paths, fetcher, images)
    }
}

impl<F, I> CatalogLoader<F, I>
where
    F: Fetcher,
    I: ImageLoader,
{
    /// Loader with a custom image loader.
    pub fn with_image_loader(paths: GamePaths, fetcher: F, images: I) -> Self {
        Self {
            paths,
            config: SchemaConfig::default(),
            state: LoadState::NotStarted,
            catalog: Catalog::new(),
            background_image: None,
            card_back_image: None,
            fetcher,
            images,
        }
    }

    /// URL the game config is fetched from.
    #[must_use]
    pub fn with_config_url(mut self, url: impl Into<String>) -> Self {
        self.config.auto_update_url = Some(url.into());
        self
    }

    /// Starting config that the config file is overlaid onto.
    #[must_use]
    pub fn with_config(mut self, config: SchemaConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.paths.name()
    }

    #[must_use]
    pub fn paths(&self) -> &GamePaths {
        &self.paths
    }

    /// The game definition. Final once the config stage has passed.
    #[must_use]
    pub fn config(&self) -> &SchemaConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.state == LoadState::Loaded
    }

    /// Message of a failed load.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.state.error()
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn sets(&self) -> &im::Vector<SetRecord> {
        self.catalog.sets()
    }

    #[must_use]
    pub fn cards(&self) -> &im::Vector<CardRecord> {
        self.catalog.cards()
    }

    #[must_use]
    pub fn background_image(&self) -> Option<&ImageHandle> {
        self.background_image.as_ref()
    }

    #[must_use]
    pub fn card_back_image(&self) -> Option<&ImageHandle> {
        self.card_back_image.as_ref()
    }

    /// Filter the loaded cards. See [`filter_cards`].
    pub fn filter_cards<'a>(
        &'a self,
        query: &CardQuery,
    ) -> Result<CardFilter<im::vector::Iter<'a, CardRecord>>, QueryError> {
        filter_cards(self.catalog.cards(), &self.config, query)
    }

    /// Run the pipeline to completion.
    ///
    /// On failure the error is returned and also kept as
    /// `LoadState::Failed`. Calling this a second time returns
    /// `LoadError::AlreadyStarted` and changes nothing.
    pub async fn load(&mut self) -> Result<(), LoadError> {
        if self.state != LoadState::NotStarted {
            return Err(LoadError::AlreadyStarted);
        }

        match self.run().await {
            Ok(()) => Ok(()),
            Err(err) => {
                error!(game = self.name(), "failed to load card game: {err}");
                self.state = LoadState::Failed(err.to_string());
                Err(err)
            }
        }
    }

    async fn run(&mut self) -> Result<(), LoadError> {
        self.state = LoadState::LoadingConfig;
        info!(game = self.name(), "loading config");
        self.load_config().await?;

        self.state = LoadState::LoadingCatalogs;
        info!(game = self.name(), "loading sets and cards");
        self.catalog = self.load_catalogs().await?;

        self.state = LoadState::LoadingImages;
        self.load_images().await;

        self.state = LoadState::Loaded;
        info!(
            game = self.name(),
            sets = self.catalog.sets().len(),
            cards = self.catalog.cards().len(),
            "finished loading"
        );
        Ok(())
    }

    async fn load_config(&mut self) -> Result<(), LoadError> {
        let path = self.paths.config_file();

        if let Some(url) = self.config.config_url() {
            if needs_fetch(self.config.auto_update, &path).await {
                self.fetcher
                    .fetch(url, &path)
                    .await
                    .map_err(LoadError::ConfigFetch)?;
            }
        }

        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| LoadError::ConfigRead {
                path: path.clone(),
                source,
            })?;
        self.config
            .overlay_json(&text)
            .map_err(|e| LoadError::ConfigParse {
                path,
                reason: e.to_string(),
            })?;

        if let Err(err) = self.config.validate() {
            warn!(game = self.name(), "card property schema is inconsistent: {err}");
        }
        Ok(())
    }

    async fn load_catalogs(&self) -> Result<Catalog, LoadError> {
        let sets_path = self.paths.sets_file();
        self.refresh(self.config.sets_url(), &sets_path, "set catalog").await;
        let cards_path = self.paths.cards_file();
        self.refresh(self.config.cards_url(), &cards_path, "card catalog").await;

        let sets = match read_catalog(&sets_path).await? {
            Some(text) => parse_sets(&text, &self.config).map_err(|e| catalog_error(&sets_path, e))?,
            None => Vec::new(),
        };
        let cards = match read_catalog(&cards_path).await? {
            Some(text) => parse_cards(&text, &self.config).map_err(|e| catalog_error(&cards_path, e))?,
            None => Vec::new(),
        };

        Ok(Catalog::from_parts(sets, cards))
    }

    /// Fetch a catalog file if the cache rule asks for it. Never fatal.
    async fn refresh(&self, url: Option<&str>, path: &Path, what: &str) {
        let Some(url) = url else {
            return;
        };
        if !needs_fetch(self.config.auto_update, path).await {
            return;
        }
        if let Err(err) = self.fetcher.fetch(url, path).await {
            warn!(game = self.name(), "failed to fetch {what}, using cached copy if any: {err}");
        }
    }

    async fn load_images(&mut self) {
        info!(game = self.name(), "loading background image");
        let path = self.paths.background_image(&self.config);
        let background = self.acquire_image(&path, self.config.background_url()).await;
        self.background_image = background;

        info!(game = self.name(), "loading card back image");
        let path = self.paths.card_back_image(&self.config);
        let card_back = self.acquire_image(&path, self.config.card_back_url()).await;
        self.card_back_image = card_back;
    }

    async fn acquire_image(&self, path: &Path, url: Option<&str>) -> Option<ImageHandle> {
        match self.images.load_image(path, url).await {
            Ok(image) => Some(image),
            Err(err) => {
                warn!(game = self.name(), "image unavailable, using default: {err}");
                None
            }
        }
    }
}

/// Cache-or-fetch rule for a file that has a URL.
async fn needs_fetch(auto_update: bool, path: &Path) -> bool {
    auto_update || !file_exists(path).await
}

async fn file_exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}

/// Read a catalog file; a missing file is not an error.
async fn read_catalog(path: &Path) -> Result<Option<String>, LoadError> {
    if !file_exists(path).await {
        debug!(path = %path.display(), "catalog file does not exist, skipping");
        return Ok(None);
    }
    tokio::fs::read_to_string(path)
        .await
        .map(Some)
        .map_err(|e| catalog_error(path, e))
}

fn catalog_error(path: &Path, reason: impl std::fmt::Display) -> LoadError {
    LoadError::CatalogParse {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}
