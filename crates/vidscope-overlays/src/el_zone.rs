//! EL Zone exposure overlay.
//!
//! Maps luminance to stop zones centered on middle gray, spanning -6 to +6
//! stops, and paints each pixel with its zone's representative color. Zones
//! snap to half stops near the center and whole stops further out.

use serde::Serialize;
use vidscope_core::{color, FrameView, SettingsStore};

use crate::surface::PixelSurface;
use crate::{Overlay, OverlayKind, UpdateGate, NATIVE_RATE_HZ};

/// One entry of the zone color map.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ZoneEntry {
    /// Stop value this entry represents.
    pub zone: f32,
    pub color: [u8; 3],
    /// Label the legend bar shows.
    pub label: &'static str,
}

const fn zone(zone: f32, color: [u8; 3], label: &'static str) -> ZoneEntry {
    ZoneEntry { zone, color, label }
}

/// Zone colors from -6 stops (black) through middle gray to +6 (white).
pub const EL_ZONE_TABLE: [ZoneEntry; 15] = [
    zone(-6.0, [0, 0, 0], "-6"),
    zone(-5.0, [32, 0, 64], "-5"),
    zone(-4.0, [0, 0, 128], "-4"),
    zone(-3.0, [0, 64, 128], "-3"),
    zone(-2.0, [0, 128, 128], "-2"),
    zone(-1.0, [0, 128, 64], "-1"),
    zone(-0.5, [64, 128, 64], "-0.5"),
    zone(0.0, [109, 109, 109], "0"),
    zone(0.5, [128, 192, 128], "0.5"),
    zone(1.0, [192, 255, 128], "1"),
    zone(2.0, [255, 255, 0], "2"),
    zone(3.0, [255, 192, 0], "3"),
    zone(4.0, [255, 128, 0], "4"),
    zone(5.0, [255, 64, 0], "5"),
    zone(6.0, [255, 255, 255], "6"),
];

/// Snap a raw zone value: half stops inside [-1, 1], whole stops outside,
/// clamped into [-6, 6].
pub fn snap_zone(zone: f32) -> f32 {
    let snapped = if (-1.0..=1.0).contains(&zone) {
        (zone * 2.0).round() / 2.0
    } else {
        zone.round()
    };
    snapped.clamp(-6.0, 6.0)
}

/// Color for a snapped zone; zones without a table entry render black.
pub fn zone_color(snapped: f32) -> [u8; 3] {
    // Compare in half-stop units so 0.5 steps match exactly.
    let key = (snapped * 2.0).round() as i32;
    EL_ZONE_TABLE
        .iter()
        .find(|e| (e.zone * 2.0).round() as i32 == key)
        .map(|e| e.color)
        .unwrap_or([0, 0, 0])
}

pub struct ElZoneOverlay {
    gate: UpdateGate,
    scale: f32,
    scratch: PixelSurface,
    surface: PixelSurface,
}

impl ElZoneOverlay {
    pub fn new() -> Self {
        Self {
            gate: UpdateGate::new(NATIVE_RATE_HZ),
            scale: 0.3,
            scratch: PixelSurface::new(),
            surface: PixelSurface::new(),
        }
    }
}

impl Default for ElZoneOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl Overlay for ElZoneOverlay {
    fn kind(&self) -> OverlayKind {
        OverlayKind::ElColor
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
            // Luminance of the limited-range values, normalized from
            // [16, 235] to [0, 1], then mapped onto [-6, 6] stops.
            let y_raw = color::luma(px.r, px.g, px.b);
            let y_norm = ((y_raw - 16.0) / 219.0).clamp(0.0, 1.0);
            let snapped = snap_zone(y_norm * 12.0 - 6.0);
            let [zr, zg, zb] = zone_color(snapped);
            px.r = zr;
            px.g = zg;
            px.b = zb;
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
