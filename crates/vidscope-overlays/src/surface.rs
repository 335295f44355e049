//! Pixel surfaces: per-analyzer scratch buffers and render targets.
//!
//! Every analyzer owns its surfaces exclusively. The backing allocation is
//! grow-only so a steady-state session stops allocating after the first few
//! frames; content from a previous resolution is always overwritten before
//! it is read.

use vidscope_core::{FrameView, Rgba8};

/// An owned RGBA8 raster.
#[derive(Debug, Clone, Default)]
pub struct PixelSurface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelSurface {
    /// An empty (zero-sized) surface; sized on first use.
    pub fn new() -> Self {
        Self::default()
    }

    /// A transparent surface with the given dimensions.
    pub fn with_size(width: u32, height: u32) -> Self {
        let mut surface = Self::new();
        surface.resize(width, height);
        surface
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Resize, zeroing content. The allocation only grows.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        let len = width as usize * height as usize * 4;
        self.data.clear();
        self.data.resize(len, 0);
    }

    /// Erase to fully transparent. Idempotent, safe on an empty surface.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Raw RGBA bytes, row-major.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgba8] {
        bytemuck::cast_slice(&self.data)
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Rgba8] {
        bytemuck::cast_slice_mut(&mut self.data)
    }

    /// Pixel at (x, y), or `None` outside the surface.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x < self.width && y < self.height {
            Some(self.pixels()[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// Fill the whole surface with one color.
    pub fn fill(&mut self, color: Rgba8) {
        for px in self.pixels_mut() {
            *px = color;
        }
    }

    /// Fill a rectangle, clipped to the surface.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgba8) {
        let x1 = (x + w).min(self.width);
        let y1 = (y + h).min(self.height);
        let width = self.width;
        let pixels = self.pixels_mut();
        for py in y.min(y1)..y1 {
            for px in x.min(x1)..x1 {
                pixels[(py * width + px) as usize] = color;
            }
        }
    }

    /// Store a pixel, silently ignoring out-of-bounds coordinates.
    #[inline]
    pub fn put(&mut self, x: u32, y: u32, color: Rgba8) {
        if x < self.width && y < self.height {
            let width = self.width;
            self.pixels_mut()[(y * width + x) as usize] = color;
        }
    }

    /// Source-over blend a pixel, silently ignoring out-of-bounds
    /// coordinates. Overlapping translucent marks accumulate.
    pub fn blend(&mut self, x: u32, y: u32, color: Rgba8) {
        if x >= self.width || y >= self.height {
            return;
        }
        let width = self.width;
        let dst = &mut self.pixels_mut()[(y * width + x) as usize];
        let sa = color.a as u32;
        let da = dst.a as u32;
        let out_a = sa + da * (255 - sa) / 255;
        if out_a == 0 {
            *dst = Rgba8::TRANSPARENT;
            return;
        }
        let blend_channel = |s: u8, d: u8| -> u8 {
            let s = s as u32 * sa;
            let d = d as u32 * da * (255 - sa) / 255;
            ((s + d) / out_a) as u8
        };
        *dst = Rgba8::new(
            blend_channel(color.r, dst.r),
            blend_channel(color.g, dst.g),
            blend_channel(color.b, dst.b),
            out_a as u8,
        );
    }

    /// Overwrite this surface with a nearest-neighbor downscale of `frame`.
    /// Target dimensions are `max(1, floor(dim * scale))` per axis.
    pub fn downscale_from(&mut self, frame: &FrameView<'_>, scale: f32) {
        if frame.is_empty() {
            self.resize(0, 0);
            return;
        }
        let dw = ((frame.width() as f32 * scale).floor() as u32).max(1);
        let dh = ((frame.height() as f32 * scale).floor() as u32).max(1);
        self.resize(dw, dh);
        let (fw, fh) = (frame.width(), frame.height());
        let pixels = self.pixels_mut();
        for y in 0..dh {
            let sy = (y as u64 * fh as u64 / dh as u64) as u32;
            for x in 0..dw {
                let sx = (x as u64 * fw as u64 / dw as u64) as u32;
                pixels[(y * dw + x) as usize] = frame.pixel(sx, sy);
            }
        }
    }

    /// Resize to (width, height) and cover it with a nearest-neighbor scaled
    /// copy of `src`. A no-op when either raster is zero-sized.
    pub fn blit_scaled_from(&mut self, src: &PixelSurface, width: u32, height: u32) {
        self.resize(width, height);
        if src.is_empty() || self.is_empty() {
            return;
        }
        let (sw, sh) = (src.width, src.height);
        let src_pixels = src.pixels();
        let dst_pixels: &mut [Rgba8] = bytemuck::cast_slice_mut(&mut self.data);
        for y in 0..height {
            let sy = (y as u64 * sh as u64 / height as u64) as u32;
            for x in 0..width {
                let sx = (x as u64 * sw as u64 / width as u64) as u32;
                dst_pixels[(y * width + x) as usize] = src_pixels[(sy * sw + sx) as usize];
            }
        }
    }
}
