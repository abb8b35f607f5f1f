//! Horizontal pixel pairing ("color artifacting").
//!
//! Hi-res composite video could not show a lone lit pixel in isolation: it
//! bled into its neighbour. This pass reproduces that by making each
//! horizontal pair of pixels share one color.

use crate::output::PixelBuffer;
use crate::palette::Palette;

/// Propagate lit pixels across horizontal pairs `(0,1), (2,3), ...`.
///
/// For each pair, if either pixel differs from the palette background,
/// both take the color of the first non-background pixel (the left one
/// when both are lit). Pairs that are all background are left alone, as is
/// the last pixel of a row with odd width. Alpha is never touched.
///
/// Must run after [`quantize`](super::quantize): "not background" only
/// means "foreground" once the buffer holds palette colors alone.
pub fn pair_horizontal(buffer: &mut PixelBuffer, palette: &Palette) {
    let width = buffer.width() as usize;
    if width < 2 {
        return;
    }

    let background = palette.background().to_bytes();
    let stride = width * 4;

    for row in buffer.as_bytes_mut().chunks_exact_mut(stride) {
        // chunks_exact leaves an odd trailing pixel out of every pair
        for pair in row.chunks_exact_mut(8) {
            let (left, right) = pair.split_at_mut(4);
            if left[..3] != background {
                right[..3].copy_from_slice(&left[..3]);
            } else if right[..3] != background {
                left[..3].copy_from_slice(&right[..3]);
            }
        }
    }
}
