//! The shared frame buffer and the read-only view analyzers receive.
//!
//! The scheduling loop owns one `FrameBuffer` and overwrites it in place on
//! every tick. Analyzers get a borrowed [`FrameView`] for the duration of a
//! single update call; the borrow ends with the call, so no analyzer can hold
//! onto a frame across ticks.

use crate::color::Rgba8;
use crate::error::{Result, ScopeError};

const BYTES_PER_PIXEL: usize = 4;

/// A video frame in CPU memory: width x height RGBA8, limited-range values.
#[derive(Debug, Clone, Default)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl FrameBuffer {
    /// Create a zeroed frame buffer with the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * BYTES_PER_PIXEL],
        }
    }

    /// Wrap raw RGBA bytes, validating the length against the dimensions.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        if data.len() != expected {
            return Err(ScopeError::BufferSize {
                width,
                height,
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Create a frame filled with one opaque color.
    pub fn solid(width: u32, height: u32, color: Rgba8) -> Self {
        let mut frame = Self::new(width, height);
        for px in frame.pixels_mut() {
            *px = color;
        }
        frame
    }

    /// Create a test pattern frame (eight color bars).
    pub fn test_pattern(width: u32, height: u32) -> Self {
        let mut frame = Self::new(width, height);
        frame.fill_color_bars(0);
        frame
    }

    /// Overwrite the frame with eight vertical color bars, shifted right by
    /// `phase` pixels (wrapping).
    pub fn fill_color_bars(&mut self, phase: u32) {
        const BARS: [Rgba8; 8] = [
            Rgba8::opaque(255, 255, 255), // White
            Rgba8::opaque(255, 255, 0),   // Yellow
            Rgba8::opaque(0, 255, 255),   // Cyan
            Rgba8::opaque(0, 255, 0),     // Green
            Rgba8::opaque(255, 0, 255),   // Magenta
            Rgba8::opaque(255, 0, 0),     // Red
            Rgba8::opaque(0, 0, 255),     // Blue
            Rgba8::opaque(0, 0, 0),       // Black
        ];
        let width = self.width;
        if width == 0 {
            return;
        }
        for (i, px) in self.pixels_mut().iter_mut().enumerate() {
            let x = (i as u32 % width + phase) % width;
            let bar = (x * 8 / width) as usize % 8;
            *px = BARS[bar];
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Resize in place. The backing allocation only grows; shrinking keeps
    /// capacity for the next size change. Contents are zeroed.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        let len = width as usize * height as usize * BYTES_PER_PIXEL;
        self.data.clear();
        self.data.resize(len, 0);
    }

    /// Raw RGBA bytes, row-major.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Raw RGBA bytes, mutable. Frame sources write here.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// The frame as a pixel slice.
    #[inline]
    pub fn pixels(&self) -> &[Rgba8] {
        bytemuck::cast_slice(&self.data)
    }

    /// The frame as a mutable pixel slice.
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Rgba8] {
        bytemuck::cast_slice_mut(&mut self.data)
    }

    /// Borrow a read-only view for one analyzer update call.
    #[inline]
    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }
}

/// Read-only access to the current frame for the duration of one update
/// call.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    width: u32,
    height: u32,
    data: &'a [u8],
}

impl<'a> FrameView<'a> {
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// True when the source has not produced a sized frame yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The frame as a pixel slice, row-major.
    #[inline]
    pub fn pixels(&self) -> &'a [Rgba8] {
        bytemuck::cast_slice(self.data)
    }

    /// Pixel at (x, y). Callers in hot loops guarantee bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba8 {
        self.pixels()[(y * self.width + x) as usize]
    }

    /// Pixel at (x, y), or `None` outside the frame.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x < self.width && y < self.height {
            Some(self.pixel(x, y))
        } else {
            None
        }
    }
}
