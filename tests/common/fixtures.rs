//! Test fixtures and constants.

use std::io::Cursor;

/// Palette colors as RGB triples
pub mod colors {
    pub const BLACK: [u8; 3] = [0, 0, 0];
    pub const WHITE: [u8; 3] = [255, 255, 255];
    pub const VIOLET: [u8; 3] = [168, 85, 247];
    pub const APPLE: [u8; 3] = [0, 255, 65];
}

/// Illustrations shipped with the embedded assets
pub mod illustrations {
    pub const OFFICE: &str = "office.png";
    pub const ARENA: &str = "arena.png";
}

/// Encode a solid-color PNG
pub fn solid_png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    encode(image::RgbaImage::from_pixel(width, height, image::Rgba(rgba)))
}

/// Encode a PNG whose left half is white and right half black
pub fn split_png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_fn(width, height, |x, _| {
        if x < width / 2 {
            image::Rgba([255, 255, 255, 255])
        } else {
            image::Rgba([0, 0, 0, 255])
        }
    });
    encode(img)
}

fn encode(img: image::RgbaImage) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .expect("Failed to encode fixture PNG");
    out.into_inner()
}
