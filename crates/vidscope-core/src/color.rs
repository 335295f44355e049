//! Color model utilities shared by every analyzer.
//!
//! The incoming video uses the limited-range convention: nominal black is 16
//! and nominal white is 235, with out-of-range excursions possible on either
//! side. Channel values are expanded to full range before any luminance or
//! chroma math.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Nominal black in limited-range video.
pub const LIMITED_BLACK: u8 = 16;
/// Nominal white in limited-range video.
pub const LIMITED_WHITE: u8 = 235;

/// BT.601 U extremum for full-range 8-bit input; dividing u by this maps it
/// into [-1, 1].
pub const U_MAX: f32 = 112.0;
/// BT.601 V extremum, same role as [`U_MAX`].
pub const V_MAX: f32 = 157.0;

/// An 8-bit RGBA pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Pod, Zeroable)]
#[repr(C)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    /// Create a new pixel from RGBA components.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque pixel from RGB components.
    #[inline]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
}

/// Expand a limited-range channel value to full range.
///
/// Clamps into [16, 235], then rescales so 16 maps to 0 and 235 to 255.
/// Always produces a value in [0, 255].
#[inline]
pub fn limited_to_full(v: u8) -> u8 {
    let v = v.clamp(LIMITED_BLACK, LIMITED_WHITE);
    (((v - LIMITED_BLACK) as f32 * 255.0) / (LIMITED_WHITE - LIMITED_BLACK) as f32).round() as u8
}

/// BT.601 luma from full-range channels.
///
/// Not rounded; callers that need an integer bucket index round themselves.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> f32 {
    0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32
}

/// BT.601 color-difference components (u, v) from full-range channels.
///
/// Consumers normalize by [`U_MAX`] and [`V_MAX`] to reach a [-1, 1] plot
/// range.
#[inline]
pub fn chroma(r: u8, g: u8, b: u8) -> (f32, f32) {
    let (r, g, b) = (r as f32, g as f32, b as f32);
    let u = -0.14713 * r - 0.28886 * g + 0.436 * b;
    let v = 0.615 * r - 0.51499 * g - 0.10001 * b;
    (u, v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn limited_to_full_endpoints() {
        assert_eq!(limited_to_full(LIMITED_BLACK), 0);
        assert_eq!(limited_to_full(LIMITED_WHITE), 255);
    }

    #[test]
    fn limited_to_full_clamps_excursions() {
        assert_eq!(limited_to_full(0), 0);
        assert_eq!(limited_to_full(255), 255);
    }

    #[test]
    fn luma_extremes() {
        let w = limited_to_full(LIMITED_WHITE);
        assert!((luma(w, w, w) - 255.0).abs() < 0.5);
        let k = limited_to_full(LIMITED_BLACK);
        assert!(luma(k, k, k).abs() < 0.5);
    }

    #[test]
    fn chroma_of_gray_is_zero() {
        let (u, v) = chroma(128, 128, 128);
        assert!(u.abs() < 0.5, "u of gray should be ~0, got {u}");
        assert!(v.abs() < 0.5, "v of gray should be ~0, got {v}");
    }

    #[test]
    fn chroma_normalized_stays_in_plot_range() {
        // Primaries push chroma furthest from the origin.
        for (r, g, b) in [(255, 0, 0), (0, 255, 0), (0, 0, 255), (255, 255, 0)] {
            let (u, v) = chroma(r, g, b);
            assert!((u / U_MAX).abs() <= 1.0 + 1e-3);
            assert!((v / V_MAX).abs() <= 1.0 + 1e-3);
        }
    }

    proptest! {
        #[test]
        fn limited_to_full_is_monotonic(a in 0u8..=255, b in 0u8..=255) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(limited_to_full(lo) <= limited_to_full(hi));
        }

        #[test]
        fn luma_within_channel_bounds(r in 0u8..=255, g in 0u8..=255, b in 0u8..=255) {
            let y = luma(r, g, b);
            prop_assert!(y >= 0.0 && y <= 255.0 + 1e-3);
        }
    }
}
