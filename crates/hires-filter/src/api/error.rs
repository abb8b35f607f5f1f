//! Unified error type for the hires-filter public API.
//!
//! [`StylizeError`] covers everything that can go wrong before the
//! pipeline runs. The passes themselves are infallible.

use thiserror::Error;

use crate::palette::{PaletteError, ParseColorError};

/// Unified error type for the hires-filter public API.
///
/// # Example
///
/// ```
/// use hires_filter::{Palette, StylizeError};
///
/// fn theme_palette() -> Result<Palette, StylizeError> {
///     let palette = Palette::from_hex("#000000", "#a855f7")?;
///     Ok(palette)
/// }
/// # theme_palette().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StylizeError {
    /// Source image has a zero dimension
    #[error("source image must have positive dimensions, got {width}x{height}")]
    EmptySource { width: u32, height: u32 },

    /// RGBA byte length does not match `width * height * 4`
    #[error("pixel data length {actual} does not match {width}x{height} RGBA ({expected} bytes)")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// Palette validation error
    #[error("palette error: {0}")]
    Palette(#[from] PaletteError),
}

impl From<ParseColorError> for StylizeError {
    fn from(err: ParseColorError) -> Self {
        StylizeError::Palette(PaletteError::ParseColor(err))
    }
}
