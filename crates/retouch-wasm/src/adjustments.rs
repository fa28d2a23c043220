//! Adjustments WASM bindings.
//!
//! This module provides JavaScript bindings for the core `Adjustments` type,
//! allowing slider values to be manipulated from TypeScript, and the main
//! `process_image` entry point.

use crate::filters::FilterList;
use crate::types::JsPixelBuffer;
use retouch_core::pipeline;
use wasm_bindgen::prelude::*;

/// Adjustments wrapper for JavaScript
#[wasm_bindgen]
pub struct Adjustments {
    inner: retouch_core::Adjustments,
}

#[wasm_bindgen]
impl Adjustments {
    /// Create new adjustments with all values at zero
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: retouch_core::Adjustments::new(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn brightness(&self) -> f32 {
        self.inner.brightness
    }

    #[wasm_bindgen(setter)]
    pub fn set_brightness(&mut self, value: f32) {
        self.inner.brightness = value;
    }

    #[wasm_bindgen(getter)]
    pub fn contrast(&self) -> f32 {
        self.inner.contrast
    }

    #[wasm_bindgen(setter)]
    pub fn set_contrast(&mut self, value: f32) {
        self.inner.contrast = value;
    }

    #[wasm_bindgen(getter)]
    pub fn saturation(&self) -> f32 {
        self.inner.saturation
    }

    #[wasm_bindgen(setter)]
    pub fn set_saturation(&mut self, value: f32) {
        self.inner.saturation = value;
    }

    #[wasm_bindgen(getter)]
    pub fn exposure(&self) -> f32 {
        self.inner.exposure
    }

    #[wasm_bindgen(setter)]
    pub fn set_exposure(&mut self, value: f32) {
        self.inner.exposure = value;
    }

    #[wasm_bindgen(getter)]
    pub fn sharpness(&self) -> f32 {
        self.inner.sharpness
    }

    #[wasm_bindgen(setter)]
    pub fn set_sharpness(&mut self, value: f32) {
        self.inner.sharpness = value;
    }

    #[wasm_bindgen(getter)]
    pub fn temperature(&self) -> f32 {
        self.inner.temperature
    }

    #[wasm_bindgen(setter)]
    pub fn set_temperature(&mut self, value: f32) {
        self.inner.temperature = value;
    }

    #[wasm_bindgen(getter)]
    pub fn tint(&self) -> f32 {
        self.inner.tint
    }

    #[wasm_bindgen(setter)]
    pub fn set_tint(&mut self, value: f32) {
        self.inner.tint = value;
    }

    #[wasm_bindgen(getter)]
    pub fn vignette(&self) -> f32 {
        self.inner.vignette
    }

    #[wasm_bindgen(setter)]
    pub fn set_vignette(&mut self, value: f32) {
        self.inner.vignette = value;
    }

    /// Check if all adjustments are at zero
    pub fn is_default(&self) -> bool {
        self.inner.is_default()
    }

    /// Serialize to a plain JS object for storage
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Deserialize from a plain JS object. Missing fields default to zero.
    pub fn from_json(value: JsValue) -> Result<Adjustments, JsValue> {
        let inner: retouch_core::Adjustments =
            serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { inner })
    }
}

impl Default for Adjustments {
    fn default() -> Self {
        Self::new()
    }
}

impl Adjustments {
    pub(crate) fn from_core(inner: retouch_core::Adjustments) -> Self {
        Self { inner }
    }

    pub(crate) fn inner(&self) -> &retouch_core::Adjustments {
        &self.inner
    }
}

/// Apply adjustments and then filters to an image.
///
/// The source image is not modified; a new image is returned. Preview and
/// export should both call this so they never diverge.
///
/// # Example (TypeScript)
/// ```typescript
/// const adj = new Adjustments();
/// adj.brightness = 20;
/// adj.vignette = 40;
///
/// const filters = new FilterList();
/// filters.push("sepia", 1.0);
///
/// const result = process_image(source, adj, filters);
/// ctx.putImageData(new ImageData(new Uint8ClampedArray(result.pixels()), result.width), 0, 0);
/// ```
#[wasm_bindgen]
pub fn process_image(
    image: &JsPixelBuffer,
    adjustments: &Adjustments,
    filters: &FilterList,
) -> JsPixelBuffer {
    let result = pipeline::process(image.as_core(), adjustments.inner(), filters.as_slice());
    JsPixelBuffer::from_core(result)
}
