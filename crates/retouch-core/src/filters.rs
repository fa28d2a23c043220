//! Named, composable filters.
//!
//! A filter list is applied in order, each filter operating on the buffer
//! produced by the previous one. Filters never touch the alpha channel.
//!
//! | Tag         | Effect                                              |
//! |-------------|-----------------------------------------------------|
//! | `grayscale` | unweighted channel average into R, G and B           |
//! | `sepia`     | fixed 3x3 color matrix, capped at 255, halves round down |
//! | `invert`    | `255 - channel`                                     |
//! | `blur`      | one 3x3 box blur pass, border left untouched        |
//!
//! For grayscale, sepia and invert the intensity blends between the input
//! and the fully filtered pixel (1.0 = full effect). Blur always runs a single
//! 3x3 pass whatever its intensity.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::buffer::{PixelBuffer, CHANNELS};
use crate::convolution::box_blur_in_place;
use crate::error::{Result, RetouchError};

/// Filter tags understood by the compositor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Grayscale,
    Sepia,
    Invert,
    Blur,
}

impl FilterKind {
    /// All filter kinds in display order.
    pub const ALL: [FilterKind; 4] = [
        FilterKind::Grayscale,
        FilterKind::Sepia,
        FilterKind::Invert,
        FilterKind::Blur,
    ];

    /// Lowercase tag used by the UI layer.
    pub fn name(self) -> &'static str {
        match self {
            FilterKind::Grayscale => "grayscale",
            FilterKind::Sepia => "sepia",
            FilterKind::Invert => "invert",
            FilterKind::Blur => "blur",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterKind {
    type Err = RetouchError;

    fn from_str(s: &str) -> Result<Self> {
        FilterKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| RetouchError::UnknownFilter(s.to_string()))
    }
}

/// One entry of a filter list: a tag plus its intensity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub kind: FilterKind,
    #[serde(default = "default_intensity")]
    pub intensity: f32,
}

fn default_intensity() -> f32 {
    1.0
}

impl Filter {
    /// Create a filter with an explicit intensity.
    pub fn new(kind: FilterKind, intensity: f32) -> Self {
        Self { kind, intensity }
    }

    /// Create a filter at full intensity.
    pub fn full(kind: FilterKind) -> Self {
        Self::new(kind, 1.0)
    }

    /// Build a filter from a UI tag.
    ///
    /// # Errors
    /// Returns [`RetouchError::UnknownFilter`] for tags other than
    /// `grayscale`, `sepia`, `invert` and `blur`.
    pub fn parse(name: &str, intensity: f32) -> Result<Self> {
        Ok(Self::new(name.parse()?, intensity))
    }
}

/// Apply every filter in `filters` to `buffer`, in list order.
pub fn apply_filters(buffer: &mut PixelBuffer, filters: &[Filter]) {
    for filter in filters {
        apply_filter(buffer, filter);
    }
}

/// Apply a single filter to `buffer` in place.
pub fn apply_filter(buffer: &mut PixelBuffer, filter: &Filter) {
    let amount = filter.intensity.clamp(0.0, 1.0);
    match filter.kind {
        FilterKind::Grayscale => map_pixels(buffer.pixels_mut(), amount, grayscale),
        FilterKind::Sepia => map_pixels(buffer.pixels_mut(), amount, sepia),
        FilterKind::Invert => map_pixels(buffer.pixels_mut(), amount, invert),
        FilterKind::Blur => box_blur_in_place(buffer),
    }
}

/// Run a per-pixel color function over RGBA data, blending by `amount`.
fn map_pixels(pixels: &mut [u8], amount: f32, f: fn(f32, f32, f32) -> (f32, f32, f32)) {
    if amount == 0.0 {
        return;
    }
    for px in pixels.chunks_exact_mut(CHANNELS) {
        let (r, g, b) = (px[0] as f32, px[1] as f32, px[2] as f32);
        let (fr, fg, fb) = f(r, g, b);
        px[0] = blend(r, fr, amount);
        px[1] = blend(g, fg, amount);
        px[2] = blend(b, fb, amount);
    }
}

#[inline]
fn blend(original: f32, filtered: f32, amount: f32) -> u8 {
    let v = if amount >= 1.0 {
        filtered
    } else {
        original + (filtered - original) * amount
    };
    v.clamp(0.0, 255.0).round() as u8
}

/// Unweighted average of the three channels.
#[inline]
pub fn grayscale(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let gray = (r + g + b) / 3.0;
    (gray, gray, gray)
}

/// Classic sepia tone matrix. Outputs are capped at 255 and rounded to the
/// nearest whole value, with exact halves rounding down; inputs are
/// non-negative so no lower bound is needed.
#[inline]
pub fn sepia(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    (
        round_half_down((0.393 * r + 0.769 * g + 0.189 * b).min(255.0)),
        round_half_down((0.349 * r + 0.686 * g + 0.168 * b).min(255.0)),
        round_half_down((0.272 * r + 0.534 * g + 0.131 * b).min(255.0)),
    )
}

/// Nearest whole value; `x.5` goes to `x`.
#[inline]
fn round_half_down(v: f32) -> f32 {
    (v - 0.5).ceil()
}

/// Channel complement.
#[inline]
pub fn invert(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    (255.0 - r, 255.0 - g, 255.0 - b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn single(r: u8, g: u8, b: u8) -> PixelBuffer {
        PixelBuffer::new(1, 1, vec![r, g, b, 200]).unwrap()
    }

    fn run(buffer: &PixelBuffer, filters: &[Filter]) -> PixelBuffer {
        let mut out = buffer.clone();
        apply_filters(&mut out, filters);
        out
    }

    // ===== Parsing =====

    #[test]
    fn test_parse_known_tags() {
        for kind in FilterKind::ALL {
            assert_eq!(kind.name().parse::<FilterKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_parse_unknown_tag() {
        assert_eq!(
            Filter::parse("emboss", 1.0).unwrap_err(),
            RetouchError::UnknownFilter("emboss".to_string())
        );
        // Tags are case sensitive and "none" is not a filter
        assert!("Sepia".parse::<FilterKind>().is_err());
        assert!("none".parse::<FilterKind>().is_err());
    }

    // ===== Grayscale =====

    #[test]
    fn test_grayscale_unweighted_average() {
        let out = run(&single(30, 60, 90), &[Filter::full(FilterKind::Grayscale)]);
        assert_eq!(out.pixels(), &[60, 60, 60, 200]);
    }

    #[test]
    fn test_grayscale_rounds() {
        // (10 + 10 + 11) / 3 = 10.33
        let out = run(&single(10, 10, 11), &[Filter::full(FilterKind::Grayscale)]);
        assert_eq!(out.pixels(), &[10, 10, 10, 200]);
    }

    // ===== Sepia =====

    #[test]
    fn test_sepia_matrix() {
        // 192.45 and 171.4 round to nearest; the exact 133.5 rounds down
        let out = run(&single(100, 150, 200), &[Filter::full(FilterKind::Sepia)]);
        assert_eq!(out.pixels(), &[192, 171, 133, 200]);
    }

    #[test]
    fn test_sepia_caps_at_255() {
        let out = run(&single(255, 255, 255), &[Filter::full(FilterKind::Sepia)]);
        // r and g overflow, b = 0.937 * 255 = 238.9
        assert_eq!(out.pixels(), &[255, 255, 239, 200]);
    }

    #[test]
    fn test_sepia_rounds_to_nearest() {
        // 24.98, 22.25 and 17.33
        let out = run(&single(10, 20, 30), &[Filter::full(FilterKind::Sepia)]);
        assert_eq!(out.pixels(), &[25, 22, 17, 200]);
    }

    #[test]
    fn test_round_half_down() {
        assert_eq!(round_half_down(133.5), 133.0);
        assert_eq!(round_half_down(133.51), 134.0);
        assert_eq!(round_half_down(24.98), 25.0);
        assert_eq!(round_half_down(22.25), 22.0);
        assert_eq!(round_half_down(200.0), 200.0);
    }

    // ===== Invert =====

    #[test]
    fn test_invert_complements() {
        let out = run(&single(0, 100, 255), &[Filter::full(FilterKind::Invert)]);
        assert_eq!(out.pixels(), &[255, 155, 0, 200]);
    }

    #[test]
    fn test_invert_half_intensity_is_mid_gray() {
        let out = run(&single(0, 255, 0), &[Filter::new(FilterKind::Invert, 0.5)]);
        // 127.5 rounds up
        assert_eq!(out.pixels(), &[128, 128, 128, 200]);
    }

    // ===== Intensity =====

    #[test]
    fn test_zero_intensity_is_noop() {
        let src = single(30, 60, 90);
        for kind in [FilterKind::Grayscale, FilterKind::Sepia, FilterKind::Invert] {
            assert_eq!(run(&src, &[Filter::new(kind, 0.0)]), src);
        }
    }

    #[test]
    fn test_intensity_clamped_above_one() {
        let src = single(30, 60, 90);
        assert_eq!(
            run(&src, &[Filter::new(FilterKind::Grayscale, 3.0)]),
            run(&src, &[Filter::full(FilterKind::Grayscale)])
        );
    }

    #[test]
    fn test_blur_ignores_intensity() {
        let mut pixels = Vec::new();
        for i in 0..25u8 {
            pixels.extend_from_slice(&[i * 10, 255 - i * 10, i, 255]);
        }
        let src = PixelBuffer::new(5, 5, pixels).unwrap();
        assert_eq!(
            run(&src, &[Filter::new(FilterKind::Blur, 8.0)]),
            run(&src, &[Filter::new(FilterKind::Blur, 1.0)])
        );
    }

    // ===== Composition =====

    #[test]
    fn test_filters_apply_in_order() {
        let src = single(30, 60, 90);
        let gray_then_invert = run(
            &src,
            &[
                Filter::full(FilterKind::Grayscale),
                Filter::full(FilterKind::Invert),
            ],
        );
        assert_eq!(gray_then_invert.pixels(), &[195, 195, 195, 200]);

        let invert_then_sepia = run(
            &src,
            &[Filter::full(FilterKind::Invert), Filter::full(FilterKind::Sepia)],
        );
        let sepia_then_invert = run(
            &src,
            &[Filter::full(FilterKind::Sepia), Filter::full(FilterKind::Invert)],
        );
        assert_ne!(invert_then_sepia, sepia_then_invert);
    }

    #[test]
    fn test_empty_list_is_identity() {
        let src = single(1, 2, 3);
        assert_eq!(run(&src, &[]), src);
    }

    // ===== Display =====

    #[test]
    fn test_filter_kind_display_names() {
        let tokens: Vec<_> = FilterKind::ALL.iter().map(|k| k.to_string()).collect();
        assert_eq!(tokens, vec!["grayscale", "sepia", "invert", "blur"]);
    }

    proptest! {
        #[test]
        fn prop_invert_is_involution(pixels in proptest::collection::vec(any::<u8>(), 4 * 12)) {
            let src = PixelBuffer::new(4, 3, pixels).unwrap();
            let twice = run(
                &src,
                &[Filter::full(FilterKind::Invert), Filter::full(FilterKind::Invert)],
            );
            prop_assert_eq!(twice, src);
        }

        #[test]
        fn prop_filters_preserve_alpha(
            pixels in proptest::collection::vec(any::<u8>(), 4 * 16),
            intensity in 0.0f32..=1.0,
        ) {
            let src = PixelBuffer::new(4, 4, pixels).unwrap();
            for kind in FilterKind::ALL {
                let out = run(&src, &[Filter::new(kind, intensity)]);
                for (a, b) in src.pixels().chunks_exact(4).zip(out.pixels().chunks_exact(4)) {
                    prop_assert_eq!(a[3], b[3]);
                }
            }
        }
    }
}
