#![allow(clippy::module_inception)]

//! hires-filter: monochrome "hi-res" stylization for illustrations
//!
//! This library turns an arbitrary decoded image into a two-color frame
//! that looks like it came off an early-80s home computer: low resolution,
//! hard edges, color fringes two pixels wide and a coarse blocky texture.
//!
//! # Quick Start
//!
//! ```
//! use hires_filter::{Palette, Rgb, SourceImage, Stylizer};
//!
//! let palette = Palette::new(Rgb::BLACK, Rgb::new(168, 85, 247)).unwrap();
//! let stylizer = Stylizer::new(palette);
//!
//! let rgba = vec![0u8; 640 * 480 * 4];
//! let source = SourceImage::new(640, 480, &rgba).unwrap();
//! let frame = stylizer.stylize(&source);
//!
//! assert_eq!(frame.width(), hires_filter::HIRES_WIDTH);
//! assert_eq!(frame.height(), hires_filter::HIRES_HEIGHT);
//! ```
//!
//! # Pipeline
//!
//! ```text
//! SourceImage (any size, RGBA)
//!     |
//!     v
//! resample_nearest        800x1200, no interpolation
//!     |
//!     v
//! quantize                L = 0.299r + 0.587g + 0.114b
//!     |                   L < 128 -> background, else foreground
//!     v
//! pair_horizontal         pairs (0,1) (2,3) ...: any lit pixel lights both
//!     |
//!     v
//! flatten_blocks          2x2 majority vote, ties to first scanned
//!     |
//!     v
//! PixelBuffer             handed to the display surface
//! ```
//!
//! Alpha is carried through resampling and never modified afterwards.
//! Luminance is compared in exact integer thousandths, so a value of
//! exactly 128 always counts as foreground.
//!
//! The stages run strictly in sequence on one exclusively owned buffer.
//! Only the resample input can be invalid (see [`StylizeError`]); the
//! passes themselves cannot fail.

pub mod api;
pub mod color;
pub mod output;
pub mod palette;
pub mod preprocess;
pub mod stylize;


pub use api::{StylizeError, Stylizer};
pub use color::Rgb;
pub use output::PixelBuffer;
pub use palette::{Palette, PaletteError, ParseColorError};
pub use preprocess::{resample_nearest, SourceImage};
pub use stylize::{flatten_blocks, pair_horizontal, quantize};

/// Width of the stylized frame in pixels.
pub const HIRES_WIDTH: u32 = 800;

/// Height of the stylized frame in pixels.
pub const HIRES_HEIGHT: u32 = 1200;

/// Width of the on-screen preview.
pub const PREVIEW_WIDTH: u32 = 200;

/// Height of the on-screen preview.
pub const PREVIEW_HEIGHT: u32 = 150;
