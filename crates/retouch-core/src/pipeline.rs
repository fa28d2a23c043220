//! The pixel pipeline.
//!
//! One deterministic pass over a full image:
//! 1. The eight adjustment stages, per pixel, in fixed order
//! 2. Each filter of the filter list, in list order
//!
//! The input buffer is only borrowed; the result is a new buffer. Live preview
//! and export both go through [`Pipeline::process`], so an exported image is
//! always identical to the preview for the same parameters.

use tracing::{debug, trace};

use crate::adjustments::apply_all_adjustments;
use crate::buffer::PixelBuffer;
use crate::config::EditorConfig;
use crate::error::Result;
use crate::filters::{apply_filters, Filter};
use crate::Adjustments;

/// Pixel pipeline configured with an [`EditorConfig`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pipeline {
    config: EditorConfig,
}

impl Pipeline {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config: config.validated(),
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Run adjustments and then the filter list over `src`.
    ///
    /// Returns `src` unchanged (as a new buffer) when all adjustments are
    /// zero and `filters` is empty.
    pub fn process(
        &self,
        src: &PixelBuffer,
        adjustments: &Adjustments,
        filters: &[Filter],
    ) -> PixelBuffer {
        let span = tracing::debug_span!(
            "process",
            width = src.width(),
            height = src.height(),
            filters = filters.len()
        );
        let _enter = span.enter();

        let mut out = src.clone();
        let (width, height) = (out.width(), out.height());

        if adjustments.is_default() {
            trace!("no active adjustments");
        } else {
            debug!(?adjustments, "applying adjustments");
            apply_all_adjustments(
                out.pixels_mut(),
                width,
                height,
                adjustments,
                self.config.parallel_threshold,
            );
        }

        if !filters.is_empty() {
            debug!(?filters, "applying filters");
            apply_filters(&mut out, filters);
        }

        out
    }

    /// Validate raw RGBA bytes and run [`Pipeline::process`] over them.
    ///
    /// # Errors
    /// Returns [`crate::RetouchError::InvalidDimensions`] before any pixel is
    /// touched if `pixels` is not a `width x height` RGBA image.
    pub fn process_rgba(
        &self,
        width: u32,
        height: u32,
        pixels: &[u8],
        adjustments: &Adjustments,
        filters: &[Filter],
    ) -> Result<PixelBuffer> {
        let src = PixelBuffer::new(width, height, pixels.to_vec())?;
        Ok(self.process(&src, adjustments, filters))
    }
}

/// Run the pipeline with the default configuration.
pub fn process(src: &PixelBuffer, adjustments: &Adjustments, filters: &[Filter]) -> PixelBuffer {
    Pipeline::default().process(src, adjustments, filters)
}

/// Validate raw RGBA bytes and run the pipeline with the default configuration.
///
/// # Errors
/// Returns [`crate::RetouchError::InvalidDimensions`] on a length mismatch.
pub fn process_rgba(
    width: u32,
    height: u32,
    pixels: &[u8],
    adjustments: &Adjustments,
    filters: &[Filter],
) -> Result<PixelBuffer> {
    Pipeline::default().process_rgba(width, height, pixels, adjustments, filters)
}

/// Parse `(tag, intensity)` pairs from the UI into a filter list.
///
/// # Errors
/// Returns [`crate::RetouchError::UnknownFilter`] for the first unknown tag.
pub fn parse_filters<'a, I>(specs: I) -> Result<Vec<Filter>>
where
    I: IntoIterator<Item = (&'a str, f32)>,
{
    specs
        .into_iter()
        .map(|(name, intensity)| Filter::parse(name, intensity))
        .collect()
}
