//! Edit session WASM bindings.
//!
//! Wraps the core `EditSession` so the browser editor keeps its state (source
//! image, sliders, filters, undo stack) in WASM memory instead of in a global
//! JavaScript object.

use crate::adjustments::Adjustments;
use crate::types::JsPixelBuffer;
use retouch_core::{EditSession, EditorConfig, Filter};
use wasm_bindgen::prelude::*;

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Editing session for one loaded image.
#[wasm_bindgen]
pub struct JsEditSession {
    inner: EditSession,
}

#[wasm_bindgen]
impl JsEditSession {
    /// Start a session with the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new(image: &JsPixelBuffer) -> JsEditSession {
        Self {
            inner: EditSession::new(image.as_core().clone()),
        }
    }

    /// Start a session with a configuration object such as
    /// `{ history_capacity: 20 }`. Missing fields use defaults.
    pub fn with_config(image: &JsPixelBuffer, config: JsValue) -> Result<JsEditSession, JsValue> {
        let config: EditorConfig = serde_wasm_bindgen::from_value(config).map_err(to_js)?;
        Ok(Self {
            inner: EditSession::with_config(image.as_core().clone(), config),
        })
    }

    /// Replace the source image, clearing edits and history.
    pub fn load(&mut self, image: &JsPixelBuffer) {
        self.inner.load(image.as_core().clone());
    }

    /// Set one slider value by name (e.g. `"brightness"`).
    pub fn set_adjustment(&mut self, name: &str, value: f32) -> Result<(), JsValue> {
        self.inner.set_adjustment_by_name(name, value).map_err(to_js)
    }

    /// Replace every slider value at once.
    pub fn set_adjustments(&mut self, adjustments: &Adjustments) {
        self.inner.set_adjustments(*adjustments.inner());
    }

    /// Current slider values.
    pub fn adjustments(&self) -> Adjustments {
        Adjustments::from_core(*self.inner.adjustments())
    }

    /// Make a single named filter the active one.
    pub fn set_filter(&mut self, name: &str, intensity: f32) -> Result<(), JsValue> {
        let filter = Filter::parse(name, intensity).map_err(to_js)?;
        self.inner.set_filter(filter);
        Ok(())
    }

    /// Append a named filter to the active list.
    pub fn push_filter(&mut self, name: &str, intensity: f32) -> Result<(), JsValue> {
        let filter = Filter::parse(name, intensity).map_err(to_js)?;
        self.inner.push_filter(filter);
        Ok(())
    }

    pub fn clear_filters(&mut self) {
        self.inner.clear_filters();
    }

    pub fn reset_adjustments(&mut self) {
        self.inner.reset_adjustments();
    }

    /// Drop all edits without recording an undo step.
    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Step back one edit.
    ///
    /// # Errors
    /// Throws when there is nothing to undo.
    pub fn undo(&mut self) -> Result<(), JsValue> {
        self.inner.undo().map_err(to_js)
    }

    #[wasm_bindgen(getter)]
    pub fn can_undo(&self) -> bool {
        self.inner.can_undo()
    }

    /// The image with all current edits applied.
    pub fn rendered(&self) -> JsPixelBuffer {
        JsPixelBuffer::from_core(self.inner.rendered().clone())
    }

    /// Full-resolution export through the preview pipeline.
    pub fn export(&self) -> JsPixelBuffer {
        JsPixelBuffer::from_core(self.inner.export())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray() -> JsPixelBuffer {
        JsPixelBuffer::new(2, 2, vec![128; 16]).unwrap()
    }

    #[test]
    fn test_set_adjustment_and_undo() {
        let mut session = JsEditSession::new(&gray());
        session.set_adjustment("brightness", 50.0).unwrap();
        assert!(session.can_undo());
        assert_eq!(session.adjustments().brightness(), 50.0);
        assert_eq!(session.rendered().pixels()[0], 192);
        // Alpha stays at the source value
        assert_eq!(session.rendered().pixels()[3], 128);

        session.undo().unwrap();
        assert!(!session.can_undo());
        assert_eq!(session.rendered().pixels(), vec![128; 16]);
    }

    #[test]
    fn test_filters_and_export() {
        let mut session = JsEditSession::new(&gray());
        session.push_filter("invert", 1.0).unwrap();
        session.push_filter("sepia", 1.0).unwrap();
        assert_eq!(session.export().pixels(), session.rendered().pixels());

        session.set_filter("invert", 1.0).unwrap();
        assert_eq!(session.rendered().pixels()[0], 127);
    }

    #[test]
    fn test_reset() {
        let mut session = JsEditSession::new(&gray());
        session.set_adjustment("contrast", 80.0).unwrap();
        session.reset();
        assert!(session.adjustments().is_default());
        assert_eq!(session.rendered().pixels(), vec![128; 16]);
    }
}
