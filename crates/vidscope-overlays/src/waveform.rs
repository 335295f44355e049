//! RGB waveform overlay.
//!
//! Plots per-channel levels for the top-left 200x100 window of the frame,
//! one translucent mark per channel per column sample, so overlapping marks
//! accumulate into a density plot.

use vidscope_core::{color, FrameView, Rgba8, SettingsStore};

use crate::surface::PixelSurface;
use crate::{Overlay, OverlayKind, UpdateGate, SCOPE_RATE_HZ};

const CANVAS_WIDTH: u32 = 200;
const CANVAS_HEIGHT: u32 = 100;
const MARK_ALPHA: u8 = 178;

pub struct WaveformOverlay {
    gate: UpdateGate,
    surface: PixelSurface,
}

impl WaveformOverlay {
    pub fn new() -> Self {
        Self {
            gate: UpdateGate::new(SCOPE_RATE_HZ),
            surface: PixelSurface::with_size(CANVAS_WIDTH, CANVAS_HEIGHT),
        }
    }
}

impl Default for WaveformOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl Overlay for WaveformOverlay {
    fn kind(&self) -> OverlayKind {
        OverlayKind::Waveform
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
        self.surface.clear();

        // Direct pixel-grid correspondence with the source, not scaled
        // sampling; columns beyond the frame stay empty.
        let cols = CANVAS_WIDTH.min(frame.width());
        let rows = CANVAS_HEIGHT.min(frame.height());
        for x in 0..cols {
            for y in 0..rows {
                let px = frame.pixel(x, y);
                let levels = [
                    (color::limited_to_full(px.r), Rgba8::new(255, 0, 0, MARK_ALPHA)),
                    (color::limited_to_full(px.g), Rgba8::new(0, 255, 0, MARK_ALPHA)),
                    (color::limited_to_full(px.b), Rgba8::new(0, 0, 255, MARK_ALPHA)),
                ];
                for (level, mark) in levels {
                    let mark_y = CANVAS_HEIGHT
                        - ((level as f32 / 255.0) * CANVAS_HEIGHT as f32).round() as u32;
                    // A zero level lands one row below the canvas and is
                    // discarded by the blend clip.
                    self.surface.blend(x, mark_y, mark);
                }
            }
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
