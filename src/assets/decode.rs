use std::sync::Arc;

use crate::{
    assets::source::ImageSource,
    foundation::core::Canvas,
    foundation::error::{ScanwipeError, ScanwipeResult},
    foundation::math::premultiply_rgba8_in_place,
};

/// A decoded source image, premultiplied RGBA8, immutable after decode.
#[derive(Clone, Debug)]
pub struct SourceImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8, tightly packed, row-major.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl SourceImage {
    /// Pixel dimensions as a canvas.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Row `y` as a premultiplied RGBA8 slice.
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.width as usize * 4;
        let start = y as usize * stride;
        &self.rgba8_premul[start..start + stride]
    }
}

/// Decode encoded image bytes and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> ScanwipeResult<SourceImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| ScanwipeError::decode(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(ScanwipeError::decode("image has zero width or height"));
    }

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(SourceImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Load and decode a source.
pub fn decode_source(src: &ImageSource) -> ScanwipeResult<SourceImage> {
    let bytes = src.load()?;
    decode_image(&bytes).map_err(|e| match e {
        ScanwipeError::Decode(msg) => {
            ScanwipeError::decode(format!("{}: {msg}", src.describe()))
        }
        other => other,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
