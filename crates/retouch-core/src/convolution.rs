//! Spatial convolution filters.
//!
//! Only a fixed 3x3 box blur is provided. Edge pixels (the outermost 1-pixel
//! ring) are never blurred: the kernel is evaluated for `1..width-1` and
//! `1..height-1` only, and the border keeps its input values.

use crate::buffer::{PixelBuffer, CHANNELS};

/// Weight of each tap in the 3x3 box kernel.
const BOX_WEIGHT: f32 = 1.0 / 9.0;

/// Blur an image with a 3x3 box kernel, returning a new buffer.
///
/// Each RGB channel is averaged independently; alpha is copied unchanged.
/// Images with fewer than 3 rows or columns have no interior and are returned
/// as an unmodified copy.
pub fn box_blur(src: &PixelBuffer) -> PixelBuffer {
    let mut out = src.clone();
    blur_into(src.pixels(), out.pixels_mut(), src.width(), src.height());
    out
}

/// Blur an image in place.
///
/// A snapshot of the input is taken first so that every output pixel is
/// computed from un-blurred neighbors.
pub fn box_blur_in_place(buffer: &mut PixelBuffer) {
    let (width, height) = (buffer.width(), buffer.height());
    if width < 3 || height < 3 {
        return;
    }
    let src = buffer.pixels().to_vec();
    blur_into(&src, buffer.pixels_mut(), width, height);
}

/// Write the blurred interior of `src` into `dst`. Both slices hold the same
/// `width x height` RGBA image and must not alias.
fn blur_into(src: &[u8], dst: &mut [u8], width: u32, height: u32) {
    if width < 3 || height < 3 {
        return;
    }
    let w = width as usize;
    let h = height as usize;

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let out_idx = (y * w + x) * CHANNELS;
            for c in 0..3 {
                let mut sum = 0.0f32;
                for ky in y - 1..=y + 1 {
                    let row = ky * w;
                    for kx in x - 1..=x + 1 {
                        sum += src[(row + kx) * CHANNELS + c] as f32 * BOX_WEIGHT;
                    }
                }
                dst[out_idx + c] = sum.clamp(0.0, 255.0).round() as u8;
            }
        }
    }
}
