//! Color conversion WASM bindings.
//!
//! Used by the UI for swatches and color pickers.

use retouch_core::color;
use wasm_bindgen::prelude::*;

/// Convert 8-bit RGB to HSL.
///
/// Returns `[h, s, l]`, each in 0.0-1.0.
#[wasm_bindgen]
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> Vec<f32> {
    let (h, s, l) = color::rgb8_to_hsl(r, g, b);
    vec![h, s, l]
}

/// Convert HSL (each 0.0-1.0) to 8-bit RGB.
///
/// Returns `[r, g, b]`.
#[wasm_bindgen]
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Vec<u8> {
    let (r, g, b) = color::hsl_to_rgb8(h, s, l);
    vec![r, g, b]
}
