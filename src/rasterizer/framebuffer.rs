//! Framebuffer for software rendering
//!
//! A flat `width * height` array of colors addressed by `y * width + x`.
//! Every write takes signed coordinates and is dropped when it falls outside
//! the buffer, so drawing code never has to clip before plotting.

use super::types::Color;
use crate::error::{RasterError, Result};
use std::path::Path;

pub struct Framebuffer {
    pub pixels: Vec<Color>,
    pub width: usize,
    pub height: usize,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![Color::WHITE; width * height],
            width,
            height,
        }
    }

    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            Some(y as usize * self.width + x as usize)
        } else {
            None
        }
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Blend `color` over the existing pixel with `coverage` in [0, 1]
    pub fn blend_pixel(&mut self, x: i32, y: i32, coverage: f32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = self.pixels[i].lerp(color, coverage);
        }
    }

    /// Opaque RGBA bytes, row-major, for uploading to a display texture
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_rgba()).collect()
    }

    /// Encode the current frame as an image file (format from extension)
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut img = image::RgbImage::new(self.width as u32, self.height as u32);
        for (i, c) in self.pixels.iter().enumerate() {
            let x = (i % self.width) as u32;
            let y = (i / self.width) as u32;
            img.put_pixel(x, y, image::Rgb([c.r, c.g, c.b]));
        }
        img.save(path).map_err(|source| RasterError::ImageWrite {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Count pixels that differ from `background` (handy for tests and stats)
    pub fn count_not(&self, background: Color) -> usize {
        self.pixels.iter().filter(|&&c| c != background).count()
    }
}
