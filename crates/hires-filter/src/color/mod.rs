//! Color type used by the filter.
//!
//! Everything in this crate works on 8-bit sRGB bytes. There is no
//! linear-light or perceptual color space: the only color math is the
//! luminance threshold, which uses the classic Rec. 601 weights.

mod rgb;

pub use rgb::Rgb;
