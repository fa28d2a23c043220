//! RGB <-> HSL color space conversions.
//!
//! Channel values are expressed on the 0-255 scale used by the pixel pipeline;
//! HSL components are all normalized to 0.0-1.0 (hue is a fraction of a full
//! turn, not degrees).

/// Convert an RGB triple (0-255 scale) to HSL (each component 0.0-1.0).
///
/// Inputs outside 0-255 are not clamped. Working values pushed out of range
/// by earlier adjustment stages convert as-is, which can yield a lightness
/// above 1 or a negative saturation.
///
/// When several channels share the maximum value the hue branch is chosen in
/// channel priority order: red, then green, then blue.
#[inline]
pub fn rgb_to_hsl(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let r = r / 255.0;
    let g = g / 255.0;
    let b = b / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    // Achromatic
    if max == min {
        return (0.0, 0.0, l);
    }

    let delta = max - min;
    let s = if l > 0.5 {
        delta / (2.0 - max - min)
    } else {
        delta / (max + min)
    };

    let h = if max == r {
        (g - b) / delta + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    (h / 6.0, s, l)
}

/// Convert HSL (each component 0.0-1.0) to RGB on the 0-255 scale.
///
/// Each channel is rounded to the nearest whole value. A zero saturation
/// short-circuits to a gray of `round(l * 255)`.
#[inline]
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (f32, f32, f32) {
    if s == 0.0 {
        let v = (l * 255.0).round();
        return (v, v, v);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    let r = hue_to_rgb(p, q, h + 1.0 / 3.0);
    let g = hue_to_rgb(p, q, h);
    let b = hue_to_rgb(p, q, h - 1.0 / 3.0);

    ((r * 255.0).round(), (g * 255.0).round(), (b * 255.0).round())
}

/// Piecewise helper for [`hsl_to_rgb`]. `t` is wrapped into range with a
/// single +1 / -1 shift.
#[inline]
fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// [`rgb_to_hsl`] for 8-bit channels.
#[inline]
pub fn rgb8_to_hsl(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    rgb_to_hsl(r as f32, g as f32, b as f32)
}

/// [`hsl_to_rgb`] clamped into 8-bit channels.
#[inline]
pub fn hsl_to_rgb8(h: f32, s: f32, l: f32) -> (u8, u8, u8) {
    let (r, g, b) = hsl_to_rgb(h, s, l);
    (
        r.clamp(0.0, 255.0) as u8,
        g.clamp(0.0, 255.0) as u8,
        b.clamp(0.0, 255.0) as u8,
    )
}
