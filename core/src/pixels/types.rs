//! pixels/types.rs
//! Interleaved 8-bit pixel grid with at least three colour channels.

use crate::constants::RGB_CHANNELS;

/// Owned, row-major, interleaved 8-bit samples.
///
/// Channels 0..3 are R, G, B. Anything after that (alpha, extra planes) is
/// carried along untouched by the codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw samples, checking the geometry against the data length.
    pub fn new(width: u32, height: u32, channels: usize, data: Vec<u8>) -> Result<Self, PixelError> {
        if width == 0 || height == 0 {
            return Err(PixelError::Empty { width, height });
        }
        if channels < RGB_CHANNELS {
            return Err(PixelError::TooFewChannels { channels });
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(channels))
            .ok_or(PixelError::DimensionOverflow { width, height, channels })?;
        if data.len() != expected {
            return Err(PixelError::LengthMismatch { expected, actual: data.len() });
        }
        Ok(Self { width, height, channels, data })
    }

    /// Image where every pixel has the same samples.
    pub fn filled(width: u32, height: u32, pixel: &[u8]) -> Result<Self, PixelError> {
        let count = (width as usize).saturating_mul(height as usize);
        let data = pixel.repeat(count);
        Self::new(width, height, pixel.len(), data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn has_alpha(&self) -> bool {
        self.channels > RGB_CHANNELS
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Number of R, G, B samples, i.e. payload slots.
    pub fn rgb_sample_count(&self) -> usize {
        self.pixel_count() * RGB_CHANNELS
    }

    /// Samples of the pixel at (x, y), all channels. `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = (y as usize * self.width as usize + x as usize) * self.channels;
        self.data.get(start..start + self.channels)
    }

    /// R, G, B samples in raster order, skipping any further channels.
    pub fn rgb_samples(&self) -> impl Iterator<Item = u8> + '_ {
        self.data
            .chunks_exact(self.channels)
            .flat_map(|px| px[..RGB_CHANNELS].iter().copied())
    }

    /// Mutable R, G, B samples in raster order, skipping any further channels.
    pub fn rgb_samples_mut(&mut self) -> impl Iterator<Item = &mut u8> + '_ {
        self.data
            .chunks_exact_mut(self.channels)
            .flat_map(|px| px[..RGB_CHANNELS].iter_mut())
    }

    /// Every channel at index `channel` (e.g. 3 for alpha), in raster order.
    pub fn channel_plane(&self, channel: usize) -> Option<Vec<u8>> {
        if channel >= self.channels {
            return None;
        }
        Some(self.data.chunks_exact(self.channels).map(|px| px[channel]).collect())
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PixelError {
    #[error("image has no pixels: {width}x{height}")]
    Empty { width: u32, height: u32 },

    #[error("need at least 3 colour channels, got {channels}")]
    TooFewChannels { channels: usize },

    #[error("image dimensions overflow: {width}x{height}x{channels}")]
    DimensionOverflow { width: u32, height: u32, channels: usize },

    #[error("sample buffer length mismatch: expected={expected}, actual={actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Only 3 (RGB) and 4 (RGBA) channel buffers can be written to files.
    #[error("cannot encode {channels}-channel buffer as an image file")]
    UnsupportedLayout { channels: usize },

    /// Lossy or unknown container; output must stay lossless.
    #[error("unsupported image format: {0} (lossless png/bmp/tiff only)")]
    UnsupportedFormat(String),

    #[error("image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
