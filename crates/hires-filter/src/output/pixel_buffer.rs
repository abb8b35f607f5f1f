//! RGBA pixel buffer produced and mutated by the pipeline.

use crate::api::StylizeError;
use crate::color::Rgb;
use crate::preprocess::{resample_nearest, SourceImage};

/// A fixed-size, row-major RGBA buffer.
///
/// Invariant: `as_bytes().len() == width * height * 4` for the whole
/// lifetime of the buffer. Passes mutate it in place; the buffer is never
/// resized.
///
/// # Example
///
/// ```
/// use hires_filter::{PixelBuffer, Rgb};
///
/// let mut buffer = PixelBuffer::new(4, 2);
/// buffer.set_rgb(3, 1, Rgb::WHITE);
///
/// assert_eq!(buffer.as_bytes().len(), 4 * 2 * 4);
/// assert_eq!(buffer.rgb(3, 1), Rgb::WHITE);
/// assert_eq!(buffer.pixel(3, 1)[3], 0); // alpha untouched
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a zeroed (transparent black) buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Create a buffer where every pixel is `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let data = rgba
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Self {
            width,
            height,
            data,
        }
    }

    /// Take ownership of existing RGBA bytes.
    ///
    /// # Errors
    ///
    /// Returns [`StylizeError::BufferSize`] if the length does not match
    /// the dimensions.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, StylizeError> {
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

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Mutable access to the bytes. The length cannot change through a slice.
    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the buffer, returning the RGBA bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// RGBA value at `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.offset(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// RGB part of the pixel at `(x, y)`.
    #[inline]
    pub fn rgb(&self, x: u32, y: u32) -> Rgb {
        let i = self.offset(x, y);
        Rgb::new(self.data[i], self.data[i + 1], self.data[i + 2])
    }

    /// Overwrite the RGB part of the pixel at `(x, y)`, keeping its alpha.
    #[inline]
    pub fn set_rgb(&mut self, x: u32, y: u32, color: Rgb) {
        let i = self.offset(x, y);
        self.data[i..i + 3].copy_from_slice(&color.to_bytes());
    }

    /// Number of pixels whose RGB equals `color`.
    pub fn count_rgb(&self, color: Rgb) -> usize {
        let bytes = color.to_bytes();
        self.data
            .chunks_exact(4)
            .filter(|px| px[..3] == bytes)
            .count()
    }

    /// Borrow the buffer as a read-only source image.
    ///
    /// Returns `None` for an empty buffer, which is not a valid source.
    pub fn as_source(&self) -> Option<SourceImage<'_>> {
        SourceImage::new(self.width, self.height, &self.data).ok()
    }

    /// Downsample for on-screen display without smoothing.
    ///
    /// The display surface shows the hi-res buffer at a much smaller size
    /// with pixelated scaling; this produces that view.
    ///
    /// ```
    /// use hires_filter::{PixelBuffer, PREVIEW_HEIGHT, PREVIEW_WIDTH};
    ///
    /// let frame = PixelBuffer::filled(800, 1200, [0, 255, 65, 255]);
    /// let preview = frame.preview(PREVIEW_WIDTH, PREVIEW_HEIGHT);
    /// assert_eq!(preview.width(), 200);
    /// assert_eq!(preview.height(), 150);
    /// ```
    pub fn preview(&self, width: u32, height: u32) -> PixelBuffer {
        match self.as_source() {
            Some(source) => resample_nearest(&source, width, height),
            None => PixelBuffer::new(width, height),
        }
    }
}
