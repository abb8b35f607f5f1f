//! 2x2 majority-vote block flattening.

use crate::color::Rgb;
use crate::output::PixelBuffer;

/// Most frequent color among a block's pixels in scan order.
///
/// Ties go to the color that appeared first in the scan: a later color
/// only wins with a strictly higher count.
fn majority(scan: [Rgb; 4]) -> Rgb {
    let mut tally: [(Rgb, u8); 4] = [(Rgb::default(), 0); 4];
    let mut distinct = 0;

    for color in scan {
        match tally[..distinct].iter_mut().find(|(c, _)| *c == color) {
            Some((_, count)) => *count += 1,
            None => {
                tally[distinct] = (color, 1);
                distinct += 1;
            }
        }
    }

    let mut best = tally[0];
    for &entry in &tally[1..distinct] {
        if entry.1 > best.1 {
            best = entry;
        }
    }
    best.0
}

/// Flatten every full 2x2 block to its majority color.
///
/// Blocks start at even coordinates and never overlap. Pixels in a
/// trailing odd row or column belong to no full block and are left
/// unprocessed. Within a block the scan order is top-left, top-right,
/// bottom-left, bottom-right, which decides 2-2 ties. Alpha is untouched.
pub fn flatten_blocks(buffer: &mut PixelBuffer) {
    let (width, height) = (buffer.width(), buffer.height());
    if width < 2 || height < 2 {
        return;
    }

    for y in (0..height - 1).step_by(2) {
        for x in (0..width - 1).step_by(2) {
            let winner = majority([
                buffer.rgb(x, y),
                buffer.rgb(x + 1, y),
                buffer.rgb(x, y + 1),
                buffer.rgb(x + 1, y + 1),
            ]);
            buffer.set_rgb(x, y, winner);
            buffer.set_rgb(x + 1, y, winner);
            buffer.set_rgb(x, y + 1, winner);
            buffer.set_rgb(x + 1, y + 1, winner);
        }
    }
}
