//! Luminance-threshold quantization to the two-color palette.

use crate::color::Rgb;
use crate::output::PixelBuffer;
use crate::palette::Palette;

/// Replace every pixel's RGB with the palette color picked by
/// [`Palette::classify`]. Alpha is left as is.
///
/// Pixels are independent of each other. Running the pass again on its own
/// output changes nothing as long as the palette is
/// [threshold-consistent](Palette::is_threshold_consistent); with a light
/// background the second run would promote background pixels to
/// foreground, since the threshold rule always wins.
pub fn quantize(buffer: &mut PixelBuffer, palette: &Palette) {
    let background = palette.background().to_bytes();
    let foreground = palette.foreground().to_bytes();

    for px in buffer.as_bytes_mut().chunks_exact_mut(4) {
        let color = Rgb::new(px[0], px[1], px[2]);
        let target = if color.is_dark() {
            &background
        } else {
            &foreground
        };
        px[..3].copy_from_slice(target);
    }
}
