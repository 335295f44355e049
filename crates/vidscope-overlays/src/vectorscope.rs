//! Vectorscope overlay.
//!
//! Plots chroma (u, v) of sampled pixels on a fixed square canvas: hue is
//! angle, saturation is distance from center. The graticule is a translucent
//! dark disc; everything outside it stays transparent.

use vidscope_core::{color, FrameView, Rgba8, SettingsStore};

use crate::surface::PixelSurface;
use crate::{Overlay, OverlayKind, UpdateGate, SCOPE_RATE_HZ};

const SIZE: u32 = 256;
const RADIUS_FACTOR: f32 = 0.48;
/// Every 8th pixel of the working copy is plotted.
const SAMPLE_STRIDE: usize = 8;
const SCALE: f32 = 0.5;

const BACKGROUND: Rgba8 = Rgba8::new(51, 51, 51, 229);

pub struct VectorscopeOverlay {
    gate: UpdateGate,
    scratch: PixelSurface,
    surface: PixelSurface,
}

impl VectorscopeOverlay {
    pub fn new() -> Self {
        Self {
            gate: UpdateGate::new(SCOPE_RATE_HZ),
            scratch: PixelSurface::new(),
            surface: PixelSurface::with_size(SIZE, SIZE),
        }
    }

    fn draw_graticule(&mut self) {
        let center = SIZE as f32 / 2.0;
        let radius = SIZE as f32 * RADIUS_FACTOR;
        let pixels = self.surface.pixels_mut();
        for y in 0..SIZE {
            for x in 0..SIZE {
                let dx = x as f32 - center;
                let dy = y as f32 - center;
                pixels[(y * SIZE + x) as usize] = if (dx * dx + dy * dy).sqrt() <= radius {
                    BACKGROUND
                } else {
                    Rgba8::TRANSPARENT
                };
            }
        }
    }
}

impl Default for VectorscopeOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl Overlay for VectorscopeOverlay {
    fn kind(&self) -> OverlayKind {
        OverlayKind::Vectorscope
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
        self.draw_graticule();
        self.scratch.downscale_from(&frame, SCALE);

        let center = SIZE as f32 / 2.0;
        let radius = SIZE as f32 * RADIUS_FACTOR;
        for &px in self.scratch.pixels().iter().step_by(SAMPLE_STRIDE) {
            let r = color::limited_to_full(px.r);
            let g = color::limited_to_full(px.g);
            let b = color::limited_to_full(px.b);
            let (u, v) = color::chroma(r, g, b);
            let u_norm = u / color::U_MAX;
            let v_norm = v / color::V_MAX;
            let x = (center + u_norm * radius).round();
            let y = (center - v_norm * radius).round();
            // Out-of-range plot coordinates are discarded per sample.
            if x >= 0.0 && x < SIZE as f32 && y >= 0.0 && y < SIZE as f32 {
                self.surface.put(x as u32, y as u32, Rgba8::opaque(r, g, b));
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
