//! Read-only view over decoded source pixels.

use crate::api::StylizeError;
use crate::color::Rgb;

/// A borrowed, decoded RGBA raster of arbitrary positive dimensions.
///
/// The filter never mutates its input; every pass works on a fresh
/// [`PixelBuffer`](crate::PixelBuffer) produced by the resample stage.
///
/// ```
/// use hires_filter::SourceImage;
///
/// let rgba = vec![255u8; 3 * 2 * 4];
/// let source = SourceImage::new(3, 2, &rgba).unwrap();
/// assert_eq!(source.width(), 3);
/// assert_eq!(source.pixel(2, 1), [255, 255, 255, 255]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SourceImage<'a> {
    width: u32,
    height: u32,
    data: &'a [u8],
}

impl<'a> SourceImage<'a> {
    /// Wrap interleaved RGBA bytes.
    ///
    /// # Errors
    ///
    /// - [`StylizeError::EmptySource`] if either dimension is zero
    /// - [`StylizeError::BufferSize`] if `data.len() != width * height * 4`
    pub fn new(width: u32, height: u32, data: &'a [u8]) -> Result<Self, StylizeError> {
        if width == 0 || height == 0 {
            return Err(StylizeError::EmptySource { width, height });
        }
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(StylizeError::BufferSize {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes, row-major.
    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    /// RGBA value at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }

    /// RGB part of the pixel at `(x, y)`.
    #[inline]
    pub fn rgb(&self, x: u32, y: u32) -> Rgb {
        let [r, g, b, _] = self.pixel(x, y);
        Rgb::new(r, g, b)
    }
}
