//! Zebra-stripe exposure overlay.
//!
//! Pixels whose luminance exceeds the configured threshold are painted with
//! a diagonal black/white stripe pattern; everything else stays transparent.
//! Works on a half-resolution copy and scales the result back up.

use vidscope_core::{color, int_setting, FrameView, Rgba8, SettingsStore};

use crate::surface::PixelSurface;
use crate::{Overlay, OverlayKind, UpdateGate, NATIVE_RATE_HZ};

/// Settings key for the zebra trigger level.
pub const ZEBRA_THRESHOLD_KEY: &str = "zebra-stripes-threshold";

const STRIPE_WIDTH: u32 = 4;
const STRIPE_ALPHA: u8 = 180;

pub struct ExposureOverlay {
    gate: UpdateGate,
    scale: f32,
    scratch: PixelSurface,
    surface: PixelSurface,
}

impl ExposureOverlay {
    pub const MIN_THRESHOLD: i32 = 0;
    pub const MAX_THRESHOLD: i32 = 255;
    pub const DEFAULT_THRESHOLD: i32 = 230;

    pub fn new() -> Self {
        Self {
            gate: UpdateGate::new(NATIVE_RATE_HZ),
            scale: 0.5,
            scratch: PixelSurface::new(),
            surface: PixelSurface::new(),
        }
    }
}

impl Default for ExposureOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl Overlay for ExposureOverlay {
    fn kind(&self) -> OverlayKind {
        OverlayKind::Exposure
    }

    fn is_enabled(&self) -> bool {
        self.gate.is_enabled()
    }

    fn set_enabled(&mut self, enabled: bool) {
        if self.gate.set_enabled(enabled) {
            self.clear();
        }
    }

    fn update(&mut self, frame: FrameView<'_>, settings: &dyn SettingsStore) {
        if !self.gate.should_update() || frame.is_empty() {
            return;
        }
        let threshold = int_setting(
            settings,
            ZEBRA_THRESHOLD_KEY,
            Self::DEFAULT_THRESHOLD,
            Self::MIN_THRESHOLD,
            Self::MAX_THRESHOLD,
        ) as f32;

        self.scratch.downscale_from(&frame, self.scale);
        let width = self.scratch.width();
        for (i, px) in self.scratch.pixels_mut().iter_mut().enumerate() {
            let x = i as u32 % width;
            let y = i as u32 / width;
            let r = color::limited_to_full(px.r);
            let g = color::limited_to_full(px.g);
            let b = color::limited_to_full(px.b);
            *px = if color::luma(r, g, b) > threshold {
                if ((x + y) / STRIPE_WIDTH) % 2 == 0 {
                    Rgba8::new(255, 255, 255, STRIPE_ALPHA)
                } else {
                    Rgba8::new(0, 0, 0, STRIPE_ALPHA)
                }
            } else {
                Rgba8::TRANSPARENT
            };
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
