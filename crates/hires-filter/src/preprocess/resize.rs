//! Nearest-neighbor resampling.
//!
//! No interpolation: every output pixel is a copy of exactly one source
//! pixel, so hard edges stay hard the way low-resolution hardware draws
//! them.

use tracing::debug;

use super::SourceImage;
use crate::output::PixelBuffer;

/// Map a destination coordinate to the source pixel whose area contains
/// the destination pixel's center.
#[inline]
fn nearest(dst: u32, dst_len: u32, src_len: u32) -> usize {
    let center = (2 * dst as u64 + 1) * src_len as u64;
    let idx = center / (2 * dst_len as u64);
    (idx as usize).min(src_len as usize - 1)
}

/// Resample `source` to `width x height` with nearest-neighbor sampling.
///
/// Alpha is copied along with color. The output always has exactly
/// `width * height * 4` bytes, independent of the source size.
///
/// ```
/// use hires_filter::{resample_nearest, SourceImage};
///
/// let rgba = vec![200u8; 3 * 5 * 4];
/// let source = SourceImage::new(3, 5, &rgba).unwrap();
/// let out = resample_nearest(&source, 8, 12);
/// assert_eq!(out.as_bytes().len(), 8 * 12 * 4);
/// ```
pub fn resample_nearest(source: &SourceImage<'_>, width: u32, height: u32) -> PixelBuffer {
    debug!(
        src_width = source.width(),
        src_height = source.height(),
        width,
        height,
        "Resampling (nearest neighbor)"
    );

    let mut out = PixelBuffer::new(width, height);
    if width == 0 || height == 0 {
        return out;
    }

    let src = source.as_bytes();
    let src_stride = source.width() as usize * 4;
    let x_map: Vec<usize> = (0..width)
        .map(|x| nearest(x, width, source.width()) * 4)
        .collect();

    let dst_stride = width as usize * 4;
    for (y, row) in out
        .as_bytes_mut()
        .chunks_exact_mut(dst_stride)
        .enumerate()
    {
        let sy = nearest(y as u32, height, source.height());
        let src_row = &src[sy * src_stride..(sy + 1) * src_stride];
        for (dst_px, &sx) in row.chunks_exact_mut(4).zip(&x_map) {
            dst_px.copy_from_slice(&src_row[sx..sx + 4]);
        }
    }

    out
}
