//! Filter WASM bindings.
//!
//! Filters are built from the same lowercase tags the UI uses
//! (`grayscale`, `sepia`, `invert`, `blur`). Unknown tags throw instead of
//! being ignored.

use crate::types::JsPixelBuffer;
use retouch_core::filters::{self, Filter};
use retouch_core::RetouchError;
use wasm_bindgen::prelude::*;

/// An ordered list of filters, applied first to last.
#[wasm_bindgen]
#[derive(Default)]
pub struct FilterList {
    filters: Vec<Filter>,
}

#[wasm_bindgen]
impl FilterList {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a filter by tag.
    ///
    /// # Errors
    /// Throws for an unknown tag; the list is left unchanged.
    pub fn push(&mut self, name: &str, intensity: f32) -> Result<(), JsValue> {
        self.try_push(name, intensity)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Number of filters in the list
    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.filters.len()
    }

    /// Remove every filter
    pub fn clear(&mut self) {
        self.filters.clear();
    }

    /// Serialize to an array of `{ kind, intensity }` objects
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.filters).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Deserialize from an array of `{ kind, intensity }` objects
    pub fn from_json(value: JsValue) -> Result<FilterList, JsValue> {
        let filters: Vec<Filter> =
            serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { filters })
    }
}

impl FilterList {
    pub(crate) fn try_push(&mut self, name: &str, intensity: f32) -> Result<(), RetouchError> {
        self.filters.push(Filter::parse(name, intensity)?);
        Ok(())
    }

    pub(crate) fn as_slice(&self) -> &[Filter] {
        &self.filters
    }
}

/// Apply a single named filter to an image, returning a new image.
///
/// # Example (TypeScript)
/// ```typescript
/// const sepia = apply_filter(image, "sepia", 1.0);
/// ```
#[wasm_bindgen]
pub fn apply_filter(image: &JsPixelBuffer, name: &str, intensity: f32) -> Result<JsPixelBuffer, JsValue> {
    let filter = Filter::parse(name, intensity).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let mut out = image.as_core().clone();
    filters::apply_filter(&mut out, &filter);
    Ok(JsPixelBuffer::from_core(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use retouch_core::FilterKind;

    #[test]
    fn test_push_known_filters() {
        let mut list = FilterList::new();
        list.push("grayscale", 1.0).unwrap();
        list.push("blur", 4.0).unwrap();
        assert_eq!(list.length(), 2);
        assert_eq!(list.as_slice()[0].kind, FilterKind::Grayscale);
        assert_eq!(list.as_slice()[1], Filter::new(FilterKind::Blur, 4.0));
    }

    #[test]
    fn test_try_push_unknown_leaves_list_unchanged() {
        let mut list = FilterList::new();
        list.try_push("sepia", 1.0).unwrap();
        let err = list.try_push("vintage", 1.0).unwrap_err();
        assert_eq!(err, RetouchError::UnknownFilter("vintage".to_string()));
        assert_eq!(list.length(), 1);
    }

    #[test]
    fn test_clear() {
        let mut list = FilterList::new();
        list.try_push("invert", 1.0).unwrap();
        list.clear();
        assert_eq!(list.length(), 0);
    }

    #[test]
    fn test_apply_filter_grayscale() {
        let image = JsPixelBuffer::new(1, 1, vec![30, 60, 90, 255]).unwrap();
        let result = apply_filter(&image, "grayscale", 1.0).unwrap();
        assert_eq!(result.pixels(), vec![60, 60, 60, 255]);
        // Source untouched
        assert_eq!(image.pixels(), vec![30, 60, 90, 255]);
    }
}
