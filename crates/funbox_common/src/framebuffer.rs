use anyhow::{bail, Result};

use crate::Color;

/// Display size the pixel buffer is derived from when nothing else is given.
pub const DEFAULT_DISPLAY_WIDTH: u32 = 1920;
pub const DEFAULT_DISPLAY_HEIGHT: u32 = 1080;
/// Display pixels per buffer pixel along each axis.
pub const DEFAULT_DOWNSCALE: u32 = 12;

/// Fixed-size RGBA surface the simulation rewrites every tick.
///
/// Each `u32` holds one pixel whose bytes are R, G, B, A in memory order, which
/// is exactly the layout uploaded to the GPU as RGBA8.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            bail!("frame buffer must not be empty, got {width}x{height}");
        }
        Ok(Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
        })
    }

    /// Buffer with the display's aspect ratio, `downscale` times smaller on both
    /// axes. 1920x1080 at 12 gives 160x90.
    pub fn for_display(display_width: u32, display_height: u32, downscale: u32) -> Result<Self> {
        if downscale == 0 {
            bail!("downscale factor must be at least 1");
        }
        Self::new(display_width / downscale, display_height / downscale)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    /// Raw RGBA8 bytes, row-major from the top-left pixel.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        if x < self.width && y < self.height {
            self.pixels[(y * self.width + x) as usize] = color.to_u32();
        }
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(Color::from_u32(self.pixels[(y * self.width + x) as usize]))
        } else {
            None
        }
    }

    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color.to_u32());
    }

    /// Mutable rows, top to bottom.
    pub fn rows_mut(&mut self) -> std::slice::ChunksExactMut<'_, u32> {
        self.pixels.chunks_exact_mut(self.width as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_display_gives_160_by_90() {
        let fb = FrameBuffer::for_display(
            DEFAULT_DISPLAY_WIDTH,
            DEFAULT_DISPLAY_HEIGHT,
            DEFAULT_DOWNSCALE,
        )
        .unwrap();
        assert_eq!((fb.width(), fb.height()), (160, 90));
        assert_eq!(fb.pixels().len(), 160 * 90);
        assert_eq!(fb.as_bytes().len(), 160 * 90 * 4);
    }

    #[test]
    fn aspect_follows_display_not_a_constant() {
        let wide = FrameBuffer::for_display(2560, 1080, 8).unwrap();
        assert_eq!((wide.width(), wide.height()), (320, 135));

        let tall = FrameBuffer::for_display(1080, 1920, 12).unwrap();
        assert_eq!((tall.width(), tall.height()), (90, 160));
    }

    #[test]
    fn rejects_degenerate_sizes() {
        assert!(FrameBuffer::new(0, 10).is_err());
        assert!(FrameBuffer::for_display(1920, 1080, 0).is_err());
        assert!(FrameBuffer::for_display(8, 8, 12).is_err());
    }

    #[test]
    fn bytes_are_rgba_in_memory_order() {
        let mut fb = FrameBuffer::new(2, 1).unwrap();
        fb.set(1, 0, Color::new_rgba(1, 2, 3, 4));
        assert_eq!(&fb.as_bytes()[4..8], &[1, 2, 3, 4]);
        assert_eq!(fb.get(1, 0), Some(Color::new_rgba(1, 2, 3, 4)));
        assert_eq!(fb.get(2, 0), None);
    }

    #[test]
    fn rows_cover_every_pixel() {
        let mut fb = FrameBuffer::new(3, 2).unwrap();
        for row in fb.rows_mut() {
            row.fill(Color::RED.to_u32());
        }
        assert!(fb.pixels().iter().all(|&p| p == Color::RED.to_u32()));
    }
}
