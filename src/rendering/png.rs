//! PNG encoding for stylized frames.

use hires_filter::{PixelBuffer, PREVIEW_HEIGHT, PREVIEW_WIDTH};
use std::io::Cursor;

use crate::error::RenderError;

/// Which size of a frame to encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameSize {
    /// The full 800x1200 buffer
    #[default]
    Full,
    /// The 200x150 on-screen view, nearest-neighbor scaled
    Preview,
}

impl FrameSize {
    pub fn from_preview_flag(preview: bool) -> Self {
        if preview {
            FrameSize::Preview
        } else {
            FrameSize::Full
        }
    }
}

/// Encode a frame at the requested size.
pub fn encode_frame(frame: &PixelBuffer, size: FrameSize) -> Result<Vec<u8>, RenderError> {
    match size {
        FrameSize::Full => encode_png(frame),
        FrameSize::Preview => encode_png(&frame.preview(PREVIEW_WIDTH, PREVIEW_HEIGHT)),
    }
}

/// Encode an RGBA buffer as PNG.
///
/// The image is written with fast settings and then re-compressed by
/// oxipng, which also reduces the two-color frame to an indexed image.
/// If optimization fails the plain encoding is returned.
pub fn encode_png(frame: &PixelBuffer) -> Result<Vec<u8>, RenderError> {
    if frame.width() == 0 || frame.height() == 0 {
        return Err(RenderError::PngEncode(format!(
            "cannot encode empty {}x{} frame",
            frame.width(),
            frame.height()
        )));
    }

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, frame.width(), frame.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        encoder.set_filter(png::FilterType::NoFilter);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(frame.as_bytes())
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    let png_bytes = buf.into_inner();

    let optimized = match oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    ) {
        Ok(optimized) => optimized,
        Err(e) => {
            tracing::debug!(%e, "PNG optimization failed, using plain encoding");
            png_bytes
        }
    };

    tracing::debug!(
        width = frame.width(),
        height = frame.height(),
        bytes = optimized.len(),
        "Encoded PNG"
    );
    Ok(optimized)
}
