//! Stylizer builder -- the primary entry point for the crate.
//!
//! [`Stylizer`] runs the complete pipeline: resample, quantize, pair,
//! flatten.

use tracing::debug;

use crate::output::PixelBuffer;
use crate::palette::Palette;
use crate::preprocess::{resample_nearest, SourceImage};
use crate::stylize::{flatten_blocks, pair_horizontal, quantize};
use crate::{HIRES_HEIGHT, HIRES_WIDTH};

/// High-level pipeline builder.
///
/// # Design
///
/// - Constructor requires a [`Palette`] (no invalid states)
/// - Configuration methods consume and return `self`
/// - [`stylize()`](Self::stylize) takes `&self` so one stylizer can process
///   any number of images
///
/// # Example
///
/// ```
/// use hires_filter::{Palette, Rgb, SourceImage, Stylizer};
///
/// let palette = Palette::new(Rgb::BLACK, Rgb::new(168, 85, 247)).unwrap();
/// let stylizer = Stylizer::new(palette);
///
/// let white = vec![255u8; 4 * 3 * 4];
/// let source = SourceImage::new(4, 3, &white).unwrap();
/// let frame = stylizer.stylize(&source);
///
/// assert_eq!(frame.as_bytes().len(), 800 * 1200 * 4);
/// assert_eq!(frame.count_rgb(Rgb::new(168, 85, 247)), 800 * 1200);
/// ```
#[derive(Debug, Clone)]
pub struct Stylizer {
    palette: Palette,
    width: u32,
    height: u32,
    pairing: bool,
    dithering: bool,
}

impl Stylizer {
    /// Create a stylizer targeting 800x1200 with every pass enabled.
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            width: HIRES_WIDTH,
            height: HIRES_HEIGHT,
            pairing: true,
            dithering: true,
        }
    }

    /// Set the output resolution.
    #[inline]
    pub fn resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Enable or disable the horizontal pairing pass.
    #[inline]
    pub fn pairing(mut self, enabled: bool) -> Self {
        self.pairing = enabled;
        self
    }

    /// Enable or disable the 2x2 block flattening pass.
    #[inline]
    pub fn dithering(mut self, enabled: bool) -> Self {
        self.dithering = enabled;
        self
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Output `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Run the pipeline on `source`, returning a fresh buffer.
    ///
    /// 1. Resample to the target resolution (nearest neighbor)
    /// 2. Quantize to the palette by luminance
    /// 3. Pair horizontally (if enabled)
    /// 4. Flatten 2x2 blocks (if enabled)
    pub fn stylize(&self, source: &SourceImage<'_>) -> PixelBuffer {
        let mut buffer = resample_nearest(source, self.width, self.height);

        quantize(&mut buffer, &self.palette);
        if self.pairing {
            pair_horizontal(&mut buffer, &self.palette);
        }
        if self.dithering {
            flatten_blocks(&mut buffer);
        }

        debug!(
            width = self.width,
            height = self.height,
            background = %self.palette.background(),
            foreground = %self.palette.foreground(),
            lit = buffer.count_rgb(self.palette.foreground()),
            "Stylized frame"
        );
        buffer
    }
}
