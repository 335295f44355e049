//! Focus-peaking overlay.
//!
//! Runs a 3x3 Sobel convolution over a downscaled luminance plane and
//! paints gradient magnitudes above the configured threshold opaque green.
//! The one-pixel border stays transparent.

use vidscope_core::{color, int_setting, FrameView, Rgba8, SettingsStore};

use crate::surface::PixelSurface;
use crate::{Overlay, OverlayKind, UpdateGate, NATIVE_RATE_HZ};

/// Settings key for the edge-magnitude trigger level.
pub const PEAKING_THRESHOLD_KEY: &str = "focus-peaking-threshold";

const SOBEL_X: [f32; 9] = [-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0];
const SOBEL_Y: [f32; 9] = [-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0];

const PEAK_COLOR: Rgba8 = Rgba8::opaque(0, 255, 0);

/// Downscaled luminance working plane. Grow-only, like the pixel surfaces.
#[derive(Debug, Default)]
struct LumaPlane {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl LumaPlane {
    fn sample(&mut self, frame: &FrameView<'_>, scale: f32) {
        let dw = ((frame.width() as f32 * scale).floor() as u32).max(1);
        let dh = ((frame.height() as f32 * scale).floor() as u32).max(1);
        self.width = dw;
        self.height = dh;
        self.data.clear();
        self.data.resize(dw as usize * dh as usize, 0.0);
        let (fw, fh) = (frame.width(), frame.height());
        for y in 0..dh {
            let sy = (y as u64 * fh as u64 / dh as u64) as u32;
            for x in 0..dw {
                let sx = (x as u64 * fw as u64 / dw as u64) as u32;
                let px = frame.pixel(sx, sy);
                let r = color::limited_to_full(px.r);
                let g = color::limited_to_full(px.g);
                let b = color::limited_to_full(px.b);
                self.data[(y * dw + x) as usize] = color::luma(r, g, b);
            }
        }
    }
}

pub struct FocusPeakingOverlay {
    gate: UpdateGate,
    scale: f32,
    luma: LumaPlane,
    scratch: PixelSurface,
    surface: PixelSurface,
}

impl FocusPeakingOverlay {
    pub const MIN_THRESHOLD: i32 = 0;
    pub const MAX_THRESHOLD: i32 = 255;
    pub const DEFAULT_THRESHOLD: i32 = 80;

    pub fn new() -> Self {
        Self {
            gate: UpdateGate::new(NATIVE_RATE_HZ),
            scale: 0.5,
            luma: LumaPlane::default(),
            scratch: PixelSurface::new(),
            surface: PixelSurface::new(),
        }
    }
}

impl Default for FocusPeakingOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl Overlay for FocusPeakingOverlay {
    fn kind(&self) -> OverlayKind {
        OverlayKind::FocusPeaking
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
            PEAKING_THRESHOLD_KEY,
            Self::DEFAULT_THRESHOLD,
            Self::MIN_THRESHOLD,
            Self::MAX_THRESHOLD,
        ) as f32;

        self.luma.sample(&frame, self.scale);
        let (w, h) = (self.luma.width, self.luma.height);
        self.scratch.resize(w, h);

        let luma = &self.luma.data;
        let pixels = self.scratch.pixels_mut();
        for y in 1..h.saturating_sub(1) {
            for x in 1..w.saturating_sub(1) {
                let mut gx = 0.0;
                let mut gy = 0.0;
                for ky in 0..3u32 {
                    for kx in 0..3u32 {
                        let tap = luma[((y + ky - 1) * w + (x + kx - 1)) as usize];
                        let k = (ky * 3 + kx) as usize;
                        gx += tap * SOBEL_X[k];
                        gy += tap * SOBEL_Y[k];
                    }
                }
                let magnitude = (gx * gx + gy * gy).sqrt();
                if magnitude > threshold {
                    pixels[(y * w + x) as usize] = PEAK_COLOR;
                }
            }
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

#[cfg(test)]
mod tests {
    use super::*;
    use vidscope_core::{FrameBuffer, MemorySettings};

    fn run(frame: &FrameBuffer) -> FocusPeakingOverlay {
        let mut overlay = FocusPeakingOverlay::new();
        overlay.set_enabled(true);
        overlay.update(frame.view(), &MemorySettings::new());
        overlay
    }

    /// Left half black, right half white.
    fn hard_vertical_edge(width: u32, height: u32) -> FrameBuffer {
        let mut frame = FrameBuffer::new(width, height);
        let w = width;
        for (i, px) in frame.pixels_mut().iter_mut().enumerate() {
            let x = i as u32 % w;
            *px = if x < w / 2 {
                Rgba8::opaque(16, 16, 16)
            } else {
                Rgba8::opaque(235, 235, 235)
            };
        }
        frame
    }

    #[test]
    fn flat_frame_has_no_edges() {
        let frame = FrameBuffer::solid(32, 32, Rgba8::opaque(128, 128, 128));
        let overlay = run(&frame);
        assert!(overlay.surface().pixels().iter().all(|p| p.a == 0));
    }

    #[test]
    fn vertical_edge_produces_green_band() {
        let frame = hard_vertical_edge(64, 32);
        let overlay = run(&frame);
        let surface = overlay.surface();
        let edge = surface.get(32, 16).unwrap();
        assert_eq!(edge, PEAK_COLOR, "edge column should be opaque green");
        // Away from the boundary the output is transparent.
        assert_eq!(surface.get(4, 16).unwrap().a, 0);
        assert_eq!(surface.get(60, 16).unwrap().a, 0);
    }

    #[test]
    fn border_rows_stay_transparent() {
        let frame = hard_vertical_edge(64, 32);
        let overlay = run(&frame);
        let surface = overlay.surface();
        for x in 0..surface.width() {
            assert_eq!(surface.get(x, 0).unwrap().a, 0);
        }
    }

    #[test]
    fn threshold_zero_flags_gentle_gradients() {
        let settings = MemorySettings::new();
        settings.set(PEAKING_THRESHOLD_KEY, "0");
        let mut frame = FrameBuffer::new(32, 32);
        for (i, px) in frame.pixels_mut().iter_mut().enumerate() {
            let x = (i as u32 % 32) as u8;
            let v = 16 + x * 4;
            *px = Rgba8::opaque(v, v, v);
        }
        let mut overlay = FocusPeakingOverlay::new();
        overlay.set_enabled(true);
        overlay.update(frame.view(), &settings);
        assert!(overlay.surface().pixels().iter().any(|p| p.a != 0));
    }

    #[test]
    fn tiny_frame_is_harmless() {
        // Too small for an interior; must not panic and stays transparent.
        let frame = FrameBuffer::solid(2, 2, Rgba8::opaque(235, 235, 235));
        let overlay = run(&frame);
        assert!(overlay.surface().pixels().iter().all(|p| p.a == 0));
    }
}
