//! The three in-place passes applied after resampling.
//!
//! | Pass | Function | Depends on |
//! |------|----------|------------|
//! | Quantize | [`quantize`] | resampled buffer |
//! | Pair | [`pair_horizontal`] | quantized buffer (exactly two colors) |
//! | Flatten | [`flatten_blocks`] | paired buffer |
//!
//! Each pass reads the previous pass's complete output, so they run
//! strictly one after another on a single buffer. None of them can fail.

mod blocks;
mod pairing;
mod quantize;

pub use blocks::flatten_blocks;
pub use pairing::pair_horizontal;
pub use quantize::quantize;
