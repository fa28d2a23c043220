//! Editor configuration.
//!
//! Configuration is plain data supplied by the host (typically deserialized
//! from a JSON object on the JavaScript side). Missing fields take their
//! defaults.

use serde::{Deserialize, Serialize};

use crate::adjustments::DEFAULT_PARALLEL_THRESHOLD;

/// Default number of undo snapshots kept by an edit session.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Tunables for the pipeline and edit session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum number of undo snapshots; the oldest is evicted on overflow.
    pub history_capacity: usize,
    /// Pixel count at or above which adjustments run row-parallel.
    pub parallel_threshold: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl EditorConfig {
    /// Return a copy with out-of-range values corrected.
    ///
    /// A history capacity of zero becomes one.
    pub fn validated(self) -> Self {
        Self {
            history_capacity: self.history_capacity.max(1),
            ..self
        }
    }
}
