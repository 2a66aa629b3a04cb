//! Background and card-back image acquisition.
//!
//! Turning an image into pixels belongs to the host's renderer. This
//! module resolves the cached file (fetching it when it is missing),
//! checks that it looks like an image, and hands back the encoded bytes.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;

use super::fetch::Fetcher;
use crate::error::ImageError;

/// Container format recognized from the file header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
    WebP,
}

impl ImageFormat {
    /// Detect the format from magic bytes.
    #[must_use]
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [0x89, b'P', b'N', b'G', ..] => Some(ImageFormat::Png),
            [0xFF, 0xD8, 0xFF, ..] => Some(ImageFormat::Jpeg),
            [b'G', b'I', b'F', b'8', ..] => Some(ImageFormat::Gif),
            [b'B', b'M', ..] => Some(ImageFormat::Bmp),
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some(ImageFormat::WebP),
            _ => None,
        }
    }
}

/// An acquired image, still encoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageHandle {
    path: PathBuf,
    format: ImageFormat,
    bytes: Arc<[u8]>,
}

impl ImageHandle {
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Loads an image from a cached path, with an optional URL fallback.
#[async_trait]
pub trait ImageLoader: Send + Sync {
    async fn load_image(&self, path: &Path, url: Option<&str>) -> Result<ImageHandle, ImageError>;
}

/// Reads images from disk, fetching missing files through a `Fetcher`.
#[derive(Clone, Debug)]
pub struct CachedImageLoader<F> {
    fetcher: F,
}

impl<F: Fetcher> CachedImageLoader<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl<F: Fetcher> ImageLoader for CachedImageLoader<F> {
    async fn load_image(&self, path: &Path, url: Option<&str>) -> Result<ImageHandle, ImageError> {
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            let url = url.ok_or_else(|| ImageError::Missing(path.to_path_buf()))?;
            self.fetcher.fetch(url, path).await?;
        }

        let bytes = tokio::fs::read(path).await.map_err(|source| ImageError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let format = ImageFormat::sniff(&bytes).ok_or_else(|| ImageError::Decode {
            path: path.to_path_buf(),
            reason: if bytes.is_empty() {
                "file is empty".to_string()
            } else {
                "unrecognized image format".to_string()
            },
        })?;

        Ok(ImageHandle {
            path: path.to_path_buf(),
            format,
            bytes: bytes.into(),
        })
    }
}
