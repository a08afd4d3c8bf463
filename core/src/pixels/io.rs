//! pixels/io.rs
//! Lossless image decode/encode at the edge of the core.
//!
//! Design notes:
//! - Inputs in any mode other than RGB8/RGBA8 are converted to RGBA8.
//! - Output is always PNG. Writing a stego buffer through a lossy encoder
//!   destroys the payload, so there is no API for it.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageFormat, ImageOutputFormat, RgbImage, RgbaImage};
use log::debug;

use crate::pixels::types::{PixelBuffer, PixelError};
use crate::utils::{extension_of, is_lossless_path};

const LOSSLESS_FORMATS: &[ImageFormat] = &[ImageFormat::Png, ImageFormat::Bmp, ImageFormat::Tiff];

impl PixelBuffer {
    /// Take ownership of a decoded image.
    pub fn from_dynamic(img: DynamicImage) -> Result<Self, PixelError> {
        let (width, height, channels, data) = match img {
            DynamicImage::ImageRgb8(rgb) => (rgb.width(), rgb.height(), 3, rgb.into_raw()),
            DynamicImage::ImageRgba8(rgba) => (rgba.width(), rgba.height(), 4, rgba.into_raw()),
            other => {
                let rgba = other.to_rgba8();
                (rgba.width(), rgba.height(), 4, rgba.into_raw())
            }
        };
        Self::new(width, height, channels, data)
    }

    /// Convert into an `image` buffer for encoding.
    pub fn to_dynamic(&self) -> Result<DynamicImage, PixelError> {
        let (w, h) = (self.width(), self.height());
        let raw = self.as_raw().to_vec();
        match self.channels() {
            3 => RgbImage::from_raw(w, h, raw)
                .map(DynamicImage::ImageRgb8)
                .ok_or(PixelError::UnsupportedLayout { channels: 3 }),
            4 => RgbaImage::from_raw(w, h, raw)
                .map(DynamicImage::ImageRgba8)
                .ok_or(PixelError::UnsupportedLayout { channels: 4 }),
            channels => Err(PixelError::UnsupportedLayout { channels }),
        }
    }
}

/// Load a cover or stego image from disk. Only lossless extensions are accepted.
pub fn load_image(path: impl AsRef<Path>) -> Result<PixelBuffer, PixelError> {
    let path = path.as_ref();
    if !is_lossless_path(path) {
        return Err(PixelError::UnsupportedFormat(
            extension_of(path).unwrap_or_else(|| "<none>".into()),
        ));
    }
    let img = image::open(path)?;
    debug!("loaded {} ({}x{})", path.display(), img.width(), img.height());
    PixelBuffer::from_dynamic(img)
}

/// Decode an in-memory image, refusing anything but PNG, BMP or TIFF.
pub fn decode_image(bytes: &[u8]) -> Result<PixelBuffer, PixelError> {
    let format = image::guess_format(bytes)?;
    if !LOSSLESS_FORMATS.contains(&format) {
        return Err(PixelError::UnsupportedFormat(format!("{:?}", format)));
    }
    let img = image::load_from_memory_with_format(bytes, format)?;
    PixelBuffer::from_dynamic(img)
}

/// Encode as PNG into memory.
pub fn encode_png(pixels: &PixelBuffer) -> Result<Vec<u8>, PixelError> {
    let img = pixels.to_dynamic()?;
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageOutputFormat::Png)?;
    Ok(out.into_inner())
}

/// Write as PNG. The path must carry a `.png` extension.
pub fn save_png(pixels: &PixelBuffer, path: impl AsRef<Path>) -> Result<(), PixelError> {
    let path = path.as_ref();
    match extension_of(path).as_deref() {
        Some("png") => {}
        other => return Err(PixelError::UnsupportedFormat(other.unwrap_or("<none>").to_string())),
    }
    pixels.to_dynamic()?.save_with_format(path, ImageFormat::Png)?;
    debug!("saved {}", path.display());
    Ok(())
}
