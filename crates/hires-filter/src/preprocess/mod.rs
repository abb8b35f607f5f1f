//! Source image handling ahead of the stylization passes.
//!
//! The source is wrapped in a validated [`SourceImage`] view and then
//! resampled to the target resolution with [`resample_nearest`]. Decoding
//! image files is left to the caller.

mod resize;
mod source;

pub use resize::resample_nearest;
pub use source::SourceImage;
