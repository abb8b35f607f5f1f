//! Output types for the stylization pipeline.
//!
//! [`PixelBuffer`] is both the working buffer the passes mutate and the
//! final frame handed to a rendering surface. It stays plain interleaved
//! RGBA so it can be copied straight into a canvas or a PNG encoder.

mod pixel_buffer;

pub use pixel_buffer::PixelBuffer;
