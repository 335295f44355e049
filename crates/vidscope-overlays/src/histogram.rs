//! Luminance histogram overlay.
//!
//! Accumulates a 256-bucket luma histogram over the full frame and renders
//! it as bottom-anchored bars on a fixed 200x100 canvas.

use vidscope_core::{color, FrameView, Rgba8, SettingsStore};

use crate::surface::PixelSurface;
use crate::{Overlay, OverlayKind, UpdateGate, SCOPE_RATE_HZ};

const CANVAS_WIDTH: u32 = 200;
const CANVAS_HEIGHT: u32 = 100;
const BUCKETS: usize = 256;

const BACKGROUND: Rgba8 = Rgba8::new(51, 51, 51, 229);
const BAR: Rgba8 = Rgba8::opaque(249, 249, 249);

pub struct HistogramOverlay {
    gate: UpdateGate,
    counts: [u32; BUCKETS],
    surface: PixelSurface,
}

impl HistogramOverlay {
    pub fn new() -> Self {
        Self {
            gate: UpdateGate::new(SCOPE_RATE_HZ),
            counts: [0; BUCKETS],
            surface: PixelSurface::with_size(CANVAS_WIDTH, CANVAS_HEIGHT),
        }
    }

    /// Bucket counts from the last completed update.
    pub fn counts(&self) -> &[u32; BUCKETS] {
        &self.counts
    }
}

impl Default for HistogramOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl Overlay for HistogramOverlay {
    fn kind(&self) -> OverlayKind {
        OverlayKind::Histogram
    }

    fn is_enabled(&self) -> bool {
        self.gate.is_enabled()
    }

    fn set_enabled(&mut self, enabled: bool) {
        if self.gate.set_enabled(enabled) {
            self.clear();
        }
    }

    fn update(&mut self, frame: FrameView<'_>, _settings: &dyn SettingsStore) {
        if !self.gate.should_update() || frame.is_empty() {
            return;
        }

        self.counts.fill(0);
        for px in frame.pixels() {
            let r = color::limited_to_full(px.r);
            let g = color::limited_to_full(px.g);
            let b = color::limited_to_full(px.b);
            let bucket = (color::luma(r, g, b).round() as usize).min(BUCKETS - 1);
            self.counts[bucket] += 1;
        }

        // Guard the normalization against an all-zero histogram.
        let max = self.counts.iter().copied().max().unwrap_or(0).max(1);

        self.surface.fill(BACKGROUND);
        for (bucket, &count) in self.counts.iter().enumerate() {
            let bar_height = ((count as f32 / max as f32) * (CANVAS_HEIGHT - 2) as f32).round() as u32;
            if bar_height == 0 {
                continue;
            }
            let x0 = bucket as u32 * CANVAS_WIDTH / BUCKETS as u32;
            let x1 = ((bucket as u32 + 1) * CANVAS_WIDTH / BUCKETS as u32).max(x0 + 1);
            self.surface
                .fill_rect(x0, CANVAS_HEIGHT - 1 - bar_height, x1 - x0, bar_height, BAR);
        }
    }

    fn clear(&mut self) {
        self.surface.clear();
    }

    fn surface(&self) -> &PixelSurface {
        &self.surface
    }

    fn target_rate_hz(&self) -> f64 {
        self.gate.target_rate_hz()
    }
}
