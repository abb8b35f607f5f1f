//! Illustration loading: the only suspension point of a render.
//!
//! A source string is either an `http://`/`https://` URL, fetched with
//! reqwest, or a path relative to the illustrations directory (with the
//! embedded set as fallback). The bytes are decoded to RGBA8 by the
//! `image` crate on a blocking thread.

use hires_filter::{SourceImage, StylizeError};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::assets::AssetLoader;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Any failure to obtain or decode a source image.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Failed to load image {src}: {reason}")]
pub struct ImageLoadError {
    pub src: String,
    pub reason: String,
}

impl ImageLoadError {
    pub fn new(src: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            reason: reason.into(),
        }
    }
}

/// A decoded image, owned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl LoadedImage {
    /// Borrow as a pipeline source view.
    pub fn as_source(&self) -> Result<SourceImage<'_>, StylizeError> {
        SourceImage::new(self.width, self.height, &self.rgba)
    }
}

/// Decode encoded image bytes (PNG, JPEG, GIF, ...) to RGBA8.
pub fn decode_image(src: &str, bytes: &[u8]) -> Result<LoadedImage, ImageLoadError> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| ImageLoadError::new(src, format!("decode failed: {e}")))?;
    let rgba = decoded.into_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(ImageLoadError::new(src, "image has no pixels"));
    }
    tracing::debug!(src, width, height, "Decoded image");
    Ok(LoadedImage {
        width,
        height,
        rgba: rgba.into_raw(),
    })
}

fn is_remote(src: &str) -> bool {
    src.starts_with("http://") || src.starts_with("https://")
}

/// Resolves image sources to decoded pixels.
pub struct ImageLoader {
    client: reqwest::Client,
    assets: Arc<AssetLoader>,
}

impl ImageLoader {
    pub fn new(assets: Arc<AssetLoader>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(concat!("valkyrie/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, assets })
    }

    /// Fetch the raw bytes for `src`.
    pub async fn fetch(&self, src: &str) -> Result<Vec<u8>, ImageLoadError> {
        let src = src.trim();
        if src.is_empty() {
            return Err(ImageLoadError::new(src, "empty image source"));
        }

        if is_remote(src) {
            tracing::debug!(url = %src, "Fetching remote image");
            let response = self
                .client
                .get(src)
                .send()
                .await
                .map_err(|e| ImageLoadError::new(src, format!("request failed: {e}")))?;
            let status = response.status();
            if !status.is_success() {
                return Err(ImageLoadError::new(src, format!("HTTP {status}")));
            }
            let bytes = response
                .bytes()
                .await
                .map_err(|e| ImageLoadError::new(src, format!("reading body failed: {e}")))?;
            Ok(bytes.to_vec())
        } else {
            self.assets
                .read_illustration(Path::new(src))
                .map(|data| data.into_owned())
                .map_err(|e| ImageLoadError::new(src, e.to_string()))
        }
    }

    /// Fetch and decode `src`.
    pub async fn load(&self, src: &str) -> Result<LoadedImage, ImageLoadError> {
        let bytes = self.fetch(src).await?;
        let owned_src = src.to_string();
        tokio::task::spawn_blocking(move || decode_image(&owned_src, &bytes))
            .await
            .map_err(|e| ImageLoadError::new(src, format!("decode task failed: {e}")))?
    }
}
