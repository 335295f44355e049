//! False-color exposure overlay.
//!
//! Replaces every pixel with the representative color of the luma band it
//! falls in, IRE-style: purple for crushed blacks through red for clipped
//! highlights.

use serde::Serialize;
use vidscope_core::{color, FrameView, SettingsStore};

use crate::surface::PixelSurface;
use crate::{Overlay, OverlayKind, UpdateGate, NATIVE_RATE_HZ};

/// One contiguous luma band of the false-color table.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LumaBand {
    /// Inclusive lower bound.
    pub min: u8,
    /// Exclusive upper bound.
    pub max: u8,
    pub color: [u8; 3],
    /// IRE label the legend bar shows.
    pub label: &'static str,
}

const fn band(min: u8, max: u8, color: [u8; 3], label: &'static str) -> LumaBand {
    LumaBand { min, max, color, label }
}

/// The 13 bands covering luma 0-255. Half-open [min, max); the last band
/// doubles as the fallback for the open top end.
pub const FALSE_COLOR_BANDS: [LumaBand; 13] = [
    band(0, 16, [48, 16, 64], "-10%"),
    band(16, 32, [0, 48, 128], "0%"),
    band(32, 48, [0, 96, 160], "10%"),
    band(48, 64, [32, 128, 160], "20%"),
    band(64, 80, [64, 160, 128], "30%"),
    band(80, 96, [64, 192, 64], "40%"),
    band(96, 112, [128, 128, 128], "50%"),
    band(112, 128, [192, 96, 96], "60%"),
    band(128, 144, [192, 192, 192], "70%"),
    band(144, 160, [255, 255, 0], "80%"),
    band(160, 176, [255, 192, 0], "90%"),
    band(176, 192, [255, 128, 0], "100%"),
    band(192, 255, [255, 0, 0], "110%"),
];

/// Band color for a luma value; the last band catches the open upper bound.
pub fn band_color(luma: f32) -> [u8; 3] {
    for band in &FALSE_COLOR_BANDS {
        if luma >= band.min as f32 && luma < band.max as f32 {
            return band.color;
        }
    }
    FALSE_COLOR_BANDS[FALSE_COLOR_BANDS.len() - 1].color
}

pub struct FalseColorOverlay {
    gate: UpdateGate,
    scale: f32,
    scratch: PixelSurface,
    surface: PixelSurface,
}

impl FalseColorOverlay {
    pub fn new() -> Self {
        Self {
            gate: UpdateGate::new(NATIVE_RATE_HZ),
            scale: 0.3,
            scratch: PixelSurface::new(),
            surface: PixelSurface::new(),
        }
    }
}

impl Default for FalseColorOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl Overlay for FalseColorOverlay {
    fn kind(&self) -> OverlayKind {
        OverlayKind::FalseColor
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
        self.scratch.downscale_from(&frame, self.scale);
        for px in self.scratch.pixels_mut() {
            let r = color::limited_to_full(px.r);
            let g = color::limited_to_full(px.g);
            let b = color::limited_to_full(px.b);
            let [fr, fg, fb] = band_color(color::luma(r, g, b));
            // Alpha is left as the source produced it.
            px.r = fr;
            px.g = fg;
            px.b = fb;
        }
        self.surface
            .blit_scaled_from(&self.scratch, frame.width(), frame.height());
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
