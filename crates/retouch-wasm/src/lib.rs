//! Retouch WASM - WebAssembly bindings for Retouch
//!
//! This crate provides WASM bindings to expose the retouch-core pipeline
//! to the browser editor. Image loading, canvas drawing and UI wiring stay in
//! JavaScript and exchange plain RGBA buffers with this module.
//!
//! # Module Structure
//!
//! - `adjustments` - Slider adjustments and the `process_image` entry point
//! - `filters` - Ordered filter lists and single-filter application
//! - `color` - RGB/HSL helpers
//! - `session` - Stateful editing session with undo
//! - `types` - WASM-compatible wrapper types for image data
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsPixelBuffer, JsEditSession } from '@retouch/wasm';
//!
//! await init();
//!
//! const data = ctx.getImageData(0, 0, canvas.width, canvas.height);
//! const image = new JsPixelBuffer(data.width, data.height, new Uint8Array(data.data.buffer));
//! const session = new JsEditSession(image);
//! session.set_adjustment("brightness", 20);
//! ```

use wasm_bindgen::prelude::*;

mod adjustments;
mod color;
mod filters;
mod session;
mod types;

// Re-export public types
pub use adjustments::{process_image, Adjustments};
pub use color::{hsl_to_rgb, rgb_to_hsl};
pub use filters::{apply_filter, FilterList};
pub use session::JsEditSession;
pub use types::JsPixelBuffer;

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
