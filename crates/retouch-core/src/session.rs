//! Caller-owned editing session.
//!
//! An [`EditSession`] holds everything an editor needs between pipeline calls:
//! the source image, the active adjustments and filters, the rendered result
//! and an undo history. Each edit re-renders from the untouched source, so the
//! rendered buffer is always `process(source, adjustments, filters)`.

use tracing::debug;

use crate::buffer::PixelBuffer;
use crate::config::EditorConfig;
use crate::error::{Result, RetouchError};
use crate::filters::Filter;
use crate::history::History;
use crate::pipeline::Pipeline;
use crate::{AdjustmentKind, Adjustments};

/// Immutable state captured before each undoable edit.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub rendered: PixelBuffer,
    pub adjustments: Adjustments,
    pub filters: Vec<Filter>,
}

/// Editing state for one image.
#[derive(Debug, Clone)]
pub struct EditSession {
    source: PixelBuffer,
    rendered: PixelBuffer,
    adjustments: Adjustments,
    filters: Vec<Filter>,
    history: History<Snapshot>,
    pipeline: Pipeline,
}

impl EditSession {
    /// Start a session on `source` with the default configuration.
    pub fn new(source: PixelBuffer) -> Self {
        Self::with_config(source, EditorConfig::default())
    }

    pub fn with_config(source: PixelBuffer, config: EditorConfig) -> Self {
        let pipeline = Pipeline::new(config);
        Self {
            rendered: source.clone(),
            source,
            adjustments: Adjustments::default(),
            filters: Vec::new(),
            history: History::new(pipeline.config().history_capacity),
            pipeline,
        }
    }

    /// Replace the source image. Adjustments, filters and history are reset.
    pub fn load(&mut self, source: PixelBuffer) {
        debug!(width = source.width(), height = source.height(), "loading image");
        self.rendered = source.clone();
        self.source = source;
        self.adjustments = Adjustments::default();
        self.filters.clear();
        self.history.clear();
    }

    pub fn source(&self) -> &PixelBuffer {
        &self.source
    }

    /// The image with all current edits applied.
    pub fn rendered(&self) -> &PixelBuffer {
        &self.rendered
    }

    pub fn adjustments(&self) -> &Adjustments {
        &self.adjustments
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Set one adjustment value and re-render.
    pub fn set_adjustment(&mut self, kind: AdjustmentKind, value: f32) {
        self.save_state();
        self.adjustments.set(kind, value);
        self.render();
    }

    /// Set an adjustment by its UI name.
    ///
    /// # Errors
    /// Returns [`RetouchError::UnknownAdjustment`] without recording an undo
    /// step if `name` is not a known adjustment.
    pub fn set_adjustment_by_name(&mut self, name: &str, value: f32) -> Result<()> {
        let kind = name.parse()?;
        self.set_adjustment(kind, value);
        Ok(())
    }

    /// Replace all adjustments at once and re-render.
    pub fn set_adjustments(&mut self, adjustments: Adjustments) {
        self.save_state();
        self.adjustments = adjustments;
        self.render();
    }

    /// Make `filter` the only active filter and re-render.
    pub fn set_filter(&mut self, filter: Filter) {
        self.save_state();
        self.filters = vec![filter];
        self.render();
    }

    /// Append `filter` to the active filter list and re-render.
    pub fn push_filter(&mut self, filter: Filter) {
        self.save_state();
        self.filters.push(filter);
        self.render();
    }

    /// Remove every active filter and re-render.
    pub fn clear_filters(&mut self) {
        self.save_state();
        self.filters.clear();
        self.render();
    }

    /// Zero every adjustment, keeping filters, and re-render.
    pub fn reset_adjustments(&mut self) {
        self.save_state();
        self.adjustments = Adjustments::default();
        self.render();
    }

    /// Drop all edits and show the source image again.
    ///
    /// This is not recorded in the history, but earlier snapshots are kept.
    pub fn reset(&mut self) {
        self.adjustments = Adjustments::default();
        self.filters.clear();
        self.rendered = self.source.clone();
    }

    /// Restore the state captured before the most recent edit.
    ///
    /// # Errors
    /// Returns [`RetouchError::NothingToUndo`] if the history is empty.
    pub fn undo(&mut self) -> Result<()> {
        let snapshot = self.history.pop().ok_or(RetouchError::NothingToUndo)?;
        debug!(remaining = self.history.len(), "undo");
        self.rendered = snapshot.rendered;
        self.adjustments = snapshot.adjustments;
        self.filters = snapshot.filters;
        Ok(())
    }

    /// Render the current edits from the source at full resolution.
    ///
    /// Uses the same pipeline as the live preview, so the result always equals
    /// [`EditSession::rendered`].
    pub fn export(&self) -> PixelBuffer {
        self.pipeline
            .process(&self.source, &self.adjustments, &self.filters)
    }

    fn save_state(&mut self) {
        let snapshot = Snapshot {
            rendered: self.rendered.clone(),
            adjustments: self.adjustments,
            filters: self.filters.clone(),
        };
        if self.history.push(snapshot).is_some() {
            debug!(capacity = self.history.capacity(), "evicted oldest undo snapshot");
        }
    }

    fn render(&mut self) {
        self.rendered = self
            .pipeline
            .process(&self.source, &self.adjustments, &self.filters);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::FilterKind;

    fn sample() -> PixelBuffer {
        let pixels: Vec<u8> = (0..(5 * 4 * 4)).map(|i| (i * 7 % 256) as u8).collect();
        PixelBuffer::new(5, 4, pixels).unwrap()
    }

    #[test]
    fn test_new_session_renders_source() {
        let session = EditSession::new(sample());
        assert_eq!(session.rendered(), &sample());
        assert!(!session.can_undo());
    }

    #[test]
    fn test_set_adjustment_renders_and_records() {
        let mut session = EditSession::new(sample());
        session.set_adjustment(AdjustmentKind::Brightness, 30.0);

        assert_eq!(session.adjustments().brightness, 30.0);
        assert_ne!(session.rendered(), &sample());
        assert_eq!(session.history_len(), 1);
    }

    #[test]
    fn test_adjustments_render_from_source() {
        // Setting the same value twice must not compound
        let mut session = EditSession::new(sample());
        session.set_adjustment(AdjustmentKind::Brightness, 30.0);
        let once = session.rendered().clone();
        session.set_adjustment(AdjustmentKind::Brightness, 30.0);
        assert_eq!(session.rendered(), &once);
    }

    #[test]
    fn test_set_adjustment_by_name_unknown() {
        let mut session = EditSession::new(sample());
        let err = session.set_adjustment_by_name("clarity", 10.0).unwrap_err();
        assert_eq!(err, RetouchError::UnknownAdjustment("clarity".to_string()));
        assert!(!session.can_undo());
    }

    #[test]
    fn test_set_filter_replaces_previous() {
        let mut session = EditSession::new(sample());
        session.set_filter(Filter::full(FilterKind::Sepia));
        session.set_filter(Filter::full(FilterKind::Invert));
        assert_eq!(session.filters(), &[Filter::full(FilterKind::Invert)]);
    }

    #[test]
    fn test_push_filter_composes() {
        let mut session = EditSession::new(sample());
        session.push_filter(Filter::full(FilterKind::Invert));
        session.push_filter(Filter::full(FilterKind::Invert));
        assert_eq!(session.filters().len(), 2);
        assert_eq!(session.rendered(), &sample());
    }

    #[test]
    fn test_undo_restores_previous_state() {
        let mut session = EditSession::new(sample());
        session.set_adjustment(AdjustmentKind::Contrast, 40.0);
        let after_contrast = session.rendered().clone();
        session.set_filter(Filter::full(FilterKind::Grayscale));

        session.undo().unwrap();
        assert_eq!(session.rendered(), &after_contrast);
        assert!(session.filters().is_empty());
        assert_eq!(session.adjustments().contrast, 40.0);

        session.undo().unwrap();
        assert_eq!(session.rendered(), &sample());
        assert!(session.adjustments().is_default());

        assert_eq!(session.undo(), Err(RetouchError::NothingToUndo));
    }

    #[test]
    fn test_history_is_bounded() {
        let config = EditorConfig {
            history_capacity: 3,
            ..EditorConfig::default()
        };
        let mut session = EditSession::with_config(sample(), config);
        for i in 1..=5 {
            session.set_adjustment(AdjustmentKind::Exposure, i as f32 * 10.0);
        }
        assert_eq!(session.history_len(), 3);

        // Oldest surviving snapshot was taken before exposure was set to 30
        session.undo().unwrap();
        session.undo().unwrap();
        session.undo().unwrap();
        assert_eq!(session.adjustments().exposure, 20.0);
        assert!(!session.can_undo());
    }

    #[test]
    fn test_huge_history_capacity_from_config() {
        let config: EditorConfig =
            serde_json::from_str(r#"{"history_capacity": 18446744073709551615}"#).unwrap();
        let mut session = EditSession::with_config(sample(), config);
        session.set_adjustment(AdjustmentKind::Tint, 15.0);
        assert_eq!(session.history_len(), 1);
        session.undo().unwrap();
        assert!(session.adjustments().is_default());
    }

    #[test]
    fn test_reset_adjustments_keeps_filters() {
        let mut session = EditSession::new(sample());
        session.set_adjustment(AdjustmentKind::Tint, 25.0);
        session.set_filter(Filter::full(FilterKind::Invert));
        session.reset_adjustments();

        assert!(session.adjustments().is_default());
        assert_eq!(session.filters().len(), 1);
        assert_eq!(session.history_len(), 3);
    }

    #[test]
    fn test_reset_restores_source_without_snapshot() {
        let mut session = EditSession::new(sample());
        session.set_adjustment(AdjustmentKind::Saturation, 50.0);
        session.set_filter(Filter::full(FilterKind::Blur));
        session.reset();

        assert_eq!(session.rendered(), &sample());
        assert!(session.filters().is_empty());
        assert_eq!(session.history_len(), 2);
    }

    #[test]
    fn test_export_matches_preview() {
        let mut session = EditSession::new(sample());
        session.set_adjustment(AdjustmentKind::Sharpness, 60.0);
        session.set_adjustment(AdjustmentKind::Vignette, 70.0);
        session.push_filter(Filter::full(FilterKind::Sepia));
        assert_eq!(&session.export(), session.rendered());
    }

    #[test]
    fn test_load_clears_everything() {
        let mut session = EditSession::new(sample());
        session.set_adjustment(AdjustmentKind::Brightness, 10.0);
        session.push_filter(Filter::full(FilterKind::Blur));

        let other = PixelBuffer::filled(3, 3, [1, 2, 3, 4]).unwrap();
        session.load(other.clone());

        assert_eq!(session.source(), &other);
        assert_eq!(session.rendered(), &other);
        assert!(session.adjustments().is_default());
        assert!(session.filters().is_empty());
        assert!(!session.can_undo());
    }
}
