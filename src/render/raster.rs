use std::io::Cursor;

use crate::{
    assets::decode::SourceImage,
    foundation::core::Canvas,
    foundation::error::{ScanwipeError, ScanwipeResult},
    foundation::math::unpremultiply_rgba8_in_place,
};

/// A composited frame as RGBA8 pixels.
///
/// Pixels are **premultiplied alpha**; [`FrameRGBA::encode_png`] converts back to straight alpha.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// Copy of a source image.
    pub fn from_source(src: &SourceImage) -> Self {
        Self {
            width: src.width,
            height: src.height,
            data: src.rgba8_premul.as_ref().clone(),
        }
    }

    /// Surface dimensions.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Premultiplied pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    pub(crate) fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let stride = self.width as usize * 4;
        let start = y as usize * stride;
        &mut self.data[start..start + stride]
    }

    /// Encode as a straight-alpha PNG still.
    pub fn encode_png(&self) -> ScanwipeResult<Vec<u8>> {
        let mut straight = self.data.clone();
        unpremultiply_rgba8_in_place(&mut straight);
        let img = image::RgbaImage::from_raw(self.width, self.height, straight)
            .ok_or_else(|| ScanwipeError::render("frame buffer does not match its dimensions"))?;

        let mut out = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
            .map_err(|e| ScanwipeError::render(format!("encode frame png: {e}")))?;
        Ok(out)
    }
}
