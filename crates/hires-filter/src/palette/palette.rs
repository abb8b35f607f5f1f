//! Two-color palette.

use super::error::PaletteError;
use crate::color::Rgb;

/// An ordered pair of colors: the background and the single foreground.
///
/// Every pixel leaving the quantization pass is one of these two colors.
/// The pairing pass treats "not background" as "lit", so the order matters.
///
/// # Example
///
/// ```
/// use hires_filter::{Palette, Rgb};
///
/// let palette = Palette::new(Rgb::BLACK, Rgb::new(168, 85, 247)).unwrap();
/// assert_eq!(palette.background(), Rgb::BLACK);
/// assert!(palette.is_background(Rgb::new(0, 0, 0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Palette {
    background: Rgb,
    foreground: Rgb,
}

impl Palette {
    /// Create a palette from a background and a foreground color.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::IdenticalColors`] when both colors are equal:
    /// with a single color the pairing pass could not tell lit pixels from
    /// background ones.
    pub fn new(background: Rgb, foreground: Rgb) -> Result<Self, PaletteError> {
        if background == foreground {
            return Err(PaletteError::IdenticalColors(background));
        }
        Ok(Self {
            background,
            foreground,
        })
    }

    /// Create a palette from two hex strings (`#rrggbb` or `#rgb`).
    ///
    /// ```
    /// use hires_filter::{Palette, Rgb};
    ///
    /// let palette = Palette::from_hex("#ffffff", "#00ff41").unwrap();
    /// assert_eq!(palette.foreground(), Rgb::new(0, 255, 65));
    /// ```
    pub fn from_hex(background: &str, foreground: &str) -> Result<Self, PaletteError> {
        Self::new(background.parse()?, foreground.parse()?)
    }

    #[inline]
    pub fn background(&self) -> Rgb {
        self.background
    }

    #[inline]
    pub fn foreground(&self) -> Rgb {
        self.foreground
    }

    /// Whether `color` is byte-identical to the background.
    #[inline]
    pub fn is_background(&self, color: Rgb) -> bool {
        color == self.background
    }

    /// Map a source color to the palette by luminance threshold.
    ///
    /// Luminance below 128 picks the background, anything else the
    /// foreground.
    #[inline]
    pub fn classify(&self, color: Rgb) -> Rgb {
        if color.is_dark() {
            self.background
        } else {
            self.foreground
        }
    }

    /// Whether each palette color classifies to itself.
    ///
    /// True for a dark background with a light foreground. Quantization is
    /// idempotent exactly for these palettes.
    pub fn is_threshold_consistent(&self) -> bool {
        self.background.is_dark() && !self.foreground.is_dark()
    }
}
