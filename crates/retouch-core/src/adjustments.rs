//! Image adjustment algorithms
//!
//! Applies the 8 continuous adjustments to RGBA pixel data.
//!
//! ## Adjustment Order
//! 1. Exposure
//! 2. Brightness
//! 3. Contrast
//! 4. Saturation (via HSL)
//! 5. Temperature
//! 6. Tint
//! 7. Sharpness (local contrast against the pixel's own channel average)
//! 8. Vignette (cosine radial falloff)
//!
//! All stages work on channel values in the 0-255 range as `f32`. Values may
//! leave that range between stages; each channel is clamped to `[0, 255]` and
//! rounded only once, after the last stage. Compared with the same formulas
//! in `f64`, a channel can come out 1 apart when its value sits within `f32`
//! error of a .5 rounding tie.

use crate::buffer::CHANNELS;
use crate::color::{hsl_to_rgb, rgb_to_hsl};
use crate::Adjustments;
use rayon::prelude::*;
use std::f32::consts::PI;

/// Pixel count at or above which rows are adjusted in parallel.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 256 * 256;

/// Precomputed geometry for the vignette stage of one image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VignetteGeometry {
    center_x: f32,
    center_y: f32,
    max_distance: f32,
}

impl VignetteGeometry {
    /// Compute the center and corner distance for a `width x height` image.
    pub fn new(width: u32, height: u32) -> Self {
        let center_x = width as f32 / 2.0;
        let center_y = height as f32 / 2.0;
        Self {
            center_x,
            center_y,
            max_distance: (center_x * center_x + center_y * center_y).sqrt(),
        }
    }

    /// Brightness multiplier for the pixel at `(x, y)`.
    ///
    /// `factor = max(0, cos(dist / max_dist * PI * vignette / 100))`. Returns
    /// 1.0 when `vignette <= 0`. Values above 100 push the first dark ring
    /// inside the image; the result there is not meant to look good.
    pub fn factor(&self, x: u32, y: u32, vignette: f32) -> f32 {
        if vignette <= 0.0 || self.max_distance == 0.0 {
            return 1.0;
        }
        let dx = x as f32 - self.center_x;
        let dy = y as f32 - self.center_y;
        let distance = (dx * dx + dy * dy).sqrt();
        ((distance / self.max_distance) * PI * (vignette / 100.0))
            .cos()
            .max(0.0)
    }
}

/// Apply all adjustments to RGBA pixel data in place.
///
/// Alpha bytes are never touched. Only complete rows of `width * 4` bytes are
/// processed. Rows are distributed over the rayon thread pool when the image
/// has at least `parallel_threshold` pixels; both paths produce identical
/// output.
///
/// # Arguments
/// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `adjustments` - The adjustment values to apply
/// * `parallel_threshold` - Minimum pixel count for row-parallel processing
pub fn apply_all_adjustments(
    pixels: &mut [u8],
    width: u32,
    height: u32,
    adjustments: &Adjustments,
    parallel_threshold: usize,
) {
    // Early exit if no adjustments
    if adjustments.is_default() || width == 0 {
        return;
    }

    let geometry = VignetteGeometry::new(width, height);
    let row_bytes = width as usize * CHANNELS;
    let pixel_count = width as usize * height as usize;

    if pixel_count >= parallel_threshold {
        pixels
            .par_chunks_exact_mut(row_bytes)
            .enumerate()
            .for_each(|(y, row)| adjust_row(row, y as u32, adjustments, &geometry));
    } else {
        for (y, row) in pixels.chunks_exact_mut(row_bytes).enumerate() {
            adjust_row(row, y as u32, adjustments, &geometry);
        }
    }
}

fn adjust_row(row: &mut [u8], y: u32, adjustments: &Adjustments, geometry: &VignetteGeometry) {
    for (x, px) in row.chunks_exact_mut(CHANNELS).enumerate() {
        let (r, g, b) = apply_adjustments_to_pixel(
            px[0] as f32,
            px[1] as f32,
            px[2] as f32,
            adjustments,
            (x as u32, y),
            geometry,
        );
        px[0] = to_channel(r);
        px[1] = to_channel(g);
        px[2] = to_channel(b);
    }
}

/// Clamp a working value to `[0, 255]` and round to the nearest integer.
#[inline]
pub fn to_channel(value: f32) -> u8 {
    value.clamp(0.0, 255.0).round() as u8
}

/// Run every adjustment stage on a single pixel.
///
/// Inputs and outputs are channel values on the 0-255 scale. The output is not
/// clamped; see [`to_channel`].
#[inline]
pub fn apply_adjustments_to_pixel(
    r: f32,
    g: f32,
    b: f32,
    adjustments: &Adjustments,
    position: (u32, u32),
    geometry: &VignetteGeometry,
) -> (f32, f32, f32) {
    let (mut r, mut g, mut b) = (r, g, b);

    (r, g, b) = apply_exposure(r, g, b, adjustments.exposure);
    (r, g, b) = apply_brightness(r, g, b, adjustments.brightness);
    (r, g, b) = apply_contrast(r, g, b, adjustments.contrast);
    (r, g, b) = apply_saturation(r, g, b, adjustments.saturation);
    (r, g, b) = apply_temperature(r, g, b, adjustments.temperature);
    (r, g, b) = apply_tint(r, g, b, adjustments.tint);
    (r, g, b) = apply_sharpness(r, g, b, adjustments.sharpness);

    if adjustments.vignette > 0.0 {
        let factor = geometry.factor(position.0, position.1, adjustments.vignette);
        (r, g, b) = (r * factor, g * factor, b * factor);
    }

    (r, g, b)
}

/// Apply exposure adjustment.
///
/// Formula: `output = input * 2^(exposure / 100)`, so +100 is one stop.
#[inline]
pub fn apply_exposure(r: f32, g: f32, b: f32, exposure: f32) -> (f32, f32, f32) {
    if exposure == 0.0 {
        return (r, g, b);
    }
    let multiplier = 2.0_f32.powf(exposure / 100.0);
    (r * multiplier, g * multiplier, b * multiplier)
}

/// Apply brightness adjustment.
///
/// Formula: `output = input * (1 + brightness / 100)`
#[inline]
pub fn apply_brightness(r: f32, g: f32, b: f32, brightness: f32) -> (f32, f32, f32) {
    if brightness == 0.0 {
        return (r, g, b);
    }
    let factor = 1.0 + brightness / 100.0;
    (r * factor, g * factor, b * factor)
}

/// Contrast multiplier for a contrast value, clamped to [-100, 100] first.
///
/// Formula: `259 * (c + 255) / (255 * (259 - c))`. The clamp keeps the
/// denominator positive.
#[inline]
pub fn contrast_factor(contrast: f32) -> f32 {
    let c = contrast.clamp(-100.0, 100.0);
    (259.0 * (c + 255.0)) / (255.0 * (259.0 - c))
}

/// Apply contrast adjustment around the 128 midpoint.
///
/// Formula: `output = factor * (input - 128) + 128`
#[inline]
pub fn apply_contrast(r: f32, g: f32, b: f32, contrast: f32) -> (f32, f32, f32) {
    if contrast == 0.0 {
        return (r, g, b);
    }
    let factor = contrast_factor(contrast);
    (
        factor * (r - 128.0) + 128.0,
        factor * (g - 128.0) + 128.0,
        factor * (b - 128.0) + 128.0,
    )
}

/// Apply saturation adjustment in HSL space.
///
/// The HSL saturation is scaled by `1 + saturation / 100` and clamped to
/// `[0, 1]`. -100 yields gray. The conversion back rounds each channel.
/// Channels are converted as they stand, so a value already pushed past 255
/// by exposure, brightness or contrast shifts the HSL lightness above 1.
#[inline]
pub fn apply_saturation(r: f32, g: f32, b: f32, saturation: f32) -> (f32, f32, f32) {
    if saturation == 0.0 {
        return (r, g, b);
    }
    let (h, s, l) = rgb_to_hsl(r, g, b);
    let s = (s * (1.0 + saturation / 100.0)).clamp(0.0, 1.0);
    hsl_to_rgb(h, s, l)
}

/// Apply temperature adjustment.
///
/// With `t = temperature / 100`:
/// - Positive (warm): red `+ t * 255`, blue `- t * 255 * 0.5`
/// - Negative (cool): red `+ t * 255 * 0.5`, blue `- t * 255`
#[inline]
pub fn apply_temperature(r: f32, g: f32, b: f32, temperature: f32) -> (f32, f32, f32) {
    if temperature == 0.0 {
        return (r, g, b);
    }
    let t = temperature / 100.0;
    let red_weight = if t > 0.0 { 1.0 } else { 0.5 };
    let blue_weight = if t < 0.0 { 1.0 } else { 0.5 };
    (r + t * 255.0 * red_weight, g, b - t * 255.0 * blue_weight)
}

/// Apply tint adjustment to the green channel.
///
/// With `tv = tint / 100`: green `+ tv * 255` when positive, `+ tv * 255 * 0.5`
/// when negative.
#[inline]
pub fn apply_tint(r: f32, g: f32, b: f32, tint: f32) -> (f32, f32, f32) {
    if tint == 0.0 {
        return (r, g, b);
    }
    let tv = tint / 100.0;
    let weight = if tv > 0.0 { 1.0 } else { 0.5 };
    (r, g + tv * 255.0 * weight, b)
}

/// Apply sharpness as a local-contrast boost.
///
/// Each channel is pushed away from the pixel's own channel average:
/// `c + (c - avg) * sharpness / 100`. Non-positive values are ignored.
#[inline]
pub fn apply_sharpness(r: f32, g: f32, b: f32, sharpness: f32) -> (f32, f32, f32) {
    if sharpness <= 0.0 {
        return (r, g, b);
    }
    let amount = sharpness / 100.0;
    let avg = (r + g + b) / 3.0;
    (
        r + (r - avg) * amount,
        g + (g - avg) * amount,
        b + (b - avg) * amount,
    )
}
