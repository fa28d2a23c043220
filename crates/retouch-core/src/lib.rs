//! Retouch Core - Pixel adjustment and filter pipeline
//!
//! This crate provides the deterministic image editing core for Retouch:
//! continuous adjustments, named filters, RGB/HSL conversion and a bounded
//! undo history, all operating on plain RGBA buffers. Decoding, display and
//! UI wiring live outside this crate.

pub mod adjustments;
pub mod buffer;
pub mod color;
pub mod config;
pub mod convolution;
pub mod error;
pub mod filters;
pub mod history;
pub mod pipeline;
pub mod session;

use std::fmt;
use std::str::FromStr;

pub use buffer::PixelBuffer;
pub use config::EditorConfig;
pub use error::RetouchError;
pub use filters::{Filter, FilterKind};
pub use pipeline::{parse_filters, process, process_rgba, Pipeline};
pub use session::EditSession;

/// Continuous adjustments for image editing.
///
/// Every field is neutral at 0 and meaningful in roughly -100 to 100.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Adjustments {
    /// Brightness multiplier in percent (-100 to 100)
    pub brightness: f32,
    /// Contrast (-100 to 100, clamped)
    pub contrast: f32,
    /// HSL saturation scale in percent (-100 to 100)
    pub saturation: f32,
    /// Exposure in hundredths of a stop (-100 to 100)
    pub exposure: f32,
    /// Local contrast boost (0 to 100, negative ignored)
    pub sharpness: f32,
    /// Warm/cool shift (-100 to 100)
    pub temperature: f32,
    /// Green shift (-100 to 100)
    pub tint: f32,
    /// Radial darkening (0 to 100, negative ignored)
    pub vignette: f32,
}

impl Adjustments {
    /// Create a new Adjustments with all values at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if all values are at their defaults
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Read one adjustment by kind.
    pub fn get(&self, kind: AdjustmentKind) -> f32 {
        match kind {
            AdjustmentKind::Brightness => self.brightness,
            AdjustmentKind::Contrast => self.contrast,
            AdjustmentKind::Saturation => self.saturation,
            AdjustmentKind::Exposure => self.exposure,
            AdjustmentKind::Sharpness => self.sharpness,
            AdjustmentKind::Temperature => self.temperature,
            AdjustmentKind::Tint => self.tint,
            AdjustmentKind::Vignette => self.vignette,
        }
    }

    /// Write one adjustment by kind.
    pub fn set(&mut self, kind: AdjustmentKind, value: f32) {
        let field = match kind {
            AdjustmentKind::Brightness => &mut self.brightness,
            AdjustmentKind::Contrast => &mut self.contrast,
            AdjustmentKind::Saturation => &mut self.saturation,
            AdjustmentKind::Exposure => &mut self.exposure,
            AdjustmentKind::Sharpness => &mut self.sharpness,
            AdjustmentKind::Temperature => &mut self.temperature,
            AdjustmentKind::Tint => &mut self.tint,
            AdjustmentKind::Vignette => &mut self.vignette,
        };
        *field = value;
    }
}

/// Names of the continuous adjustments, as used by the UI sliders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentKind {
    Brightness,
    Contrast,
    Saturation,
    Exposure,
    Sharpness,
    Temperature,
    Tint,
    Vignette,
}

impl AdjustmentKind {
    /// All kinds, in pipeline order.
    pub const ALL: [AdjustmentKind; 8] = [
        AdjustmentKind::Exposure,
        AdjustmentKind::Brightness,
        AdjustmentKind::Contrast,
        AdjustmentKind::Saturation,
        AdjustmentKind::Temperature,
        AdjustmentKind::Tint,
        AdjustmentKind::Sharpness,
        AdjustmentKind::Vignette,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AdjustmentKind::Brightness => "brightness",
            AdjustmentKind::Contrast => "contrast",
            AdjustmentKind::Saturation => "saturation",
            AdjustmentKind::Exposure => "exposure",
            AdjustmentKind::Sharpness => "sharpness",
            AdjustmentKind::Temperature => "temperature",
            AdjustmentKind::Tint => "tint",
            AdjustmentKind::Vignette => "vignette",
        }
    }
}

impl fmt::Display for AdjustmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AdjustmentKind {
    type Err = RetouchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AdjustmentKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| RetouchError::UnknownAdjustment(s.to_string()))
    }
}
