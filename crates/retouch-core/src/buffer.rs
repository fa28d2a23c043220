//! RGBA pixel buffer type.
//!
//! A [`PixelBuffer`] is the unit of exchange between the pipeline and its
//! external collaborators (decoders, canvas renderers, encoders). Pixels are
//! stored row-major with 4 interleaved bytes per pixel (R, G, B, A).

use crate::error::{Result, RetouchError};
use image::RgbaImage;

/// Number of bytes per RGBA pixel.
pub const CHANNELS: usize = 4;

/// An owned RGBA image whose length is guaranteed to be `width * height * 4`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Create a buffer from raw RGBA bytes.
    ///
    /// # Errors
    /// Returns [`RetouchError::InvalidDimensions`] if either dimension is zero
    /// or the byte count does not match `width * height * 4`.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        validate_dimensions(width, height, pixels.len())?;
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a buffer where every pixel has the same RGBA value.
    ///
    /// # Errors
    /// Returns [`RetouchError::InvalidDimensions`] if either dimension is zero.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self> {
        let count = width as usize * height as usize;
        let pixels = rgba.repeat(count);
        Self::new(width, height, pixels)
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Mutable RGBA bytes. The length cannot be changed through this slice.
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Consume the buffer and return its RGBA bytes.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Number of pixels (`width * height`).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Read the RGBA value at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * CHANNELS;
        let px = &self.pixels[idx..idx + CHANNELS];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Convert from an `image` crate RGBA image.
    ///
    /// # Errors
    /// Returns [`RetouchError::InvalidDimensions`] for a zero-sized image.
    pub fn from_rgba_image(img: RgbaImage) -> Result<Self> {
        let (width, height) = img.dimensions();
        Self::new(width, height, img.into_raw())
    }

    /// Convert into an `image` crate RGBA image for encoding.
    pub fn into_rgba_image(self) -> RgbaImage {
        // Length is validated at construction, so `from_raw` always succeeds.
        let img = RgbaImage::from_raw(self.width, self.height, self.pixels);
        debug_assert!(img.is_some(), "pixel length does not match dimensions");
        img.unwrap_or_else(|| RgbaImage::new(0, 0))
    }
}

impl TryFrom<RgbaImage> for PixelBuffer {
    type Error = RetouchError;

    fn try_from(img: RgbaImage) -> Result<Self> {
        Self::from_rgba_image(img)
    }
}

impl From<PixelBuffer> for RgbaImage {
    fn from(buffer: PixelBuffer) -> Self {
        buffer.into_rgba_image()
    }
}

/// Check that `len` bytes describe a non-empty `width x height` RGBA image.
pub fn validate_dimensions(width: u32, height: u32, len: usize) -> Result<()> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(CHANNELS));
    match expected {
        Some(expected) if expected > 0 && expected == len => Ok(()),
        _ => Err(RetouchError::InvalidDimensions { width, height, len }),
    }
}
