//! Core types for the rasterizer

use super::math::{Vec2, Vec3};
use crate::error::{RasterError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// RGB color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };
    pub const GRAY: Color = Color { r: 128, g: 128, b: 128 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0 };
    pub const GREEN: Color = Color { r: 0, g: 255, b: 0 };
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear blend from `self` toward `other` by `t` in [0, 1]
    pub fn lerp(self, other: Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 * (1.0 - t) + b as f32 * t) as u8;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }

    /// Convert to [u8; 4] (opaque RGBA) for display upload
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

/// A mesh vertex: object-space position and texture coordinate
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vertex {
    pub pos: Vec3,
    pub uv: Vec2,
}

impl Vertex {
    pub fn new(pos: Vec3, uv: Vec2) -> Self {
        Self { pos, uv }
    }
}

/// A triangle (indices into the vertex array).
///
/// Index order is the winding: the outward normal is `cross(b - a, c - a)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    pub a: usize,
    pub b: usize,
    pub c: usize,
}

impl Triangle {
    pub fn new(a: usize, b: usize, c: usize) -> Self {
        Self { a, b, c }
    }

    pub fn indices(&self) -> [usize; 3] {
        [self.a, self.b, self.c]
    }
}

/// Texture image with wrap-around sampling
#[derive(Debug, Clone)]
pub struct Texture {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<Color>,
    pub name: String,
}

impl Texture {
    /// Solid-color texture. Zero dimensions are bumped to 1x1.
    pub fn solid(width: usize, height: usize, color: Color) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            pixels: vec![color; width * height],
            name: String::new(),
        }
    }

    /// Load texture from an image file (png, jpeg or bmp)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|source| RasterError::TextureLoad {
            path: path.to_path_buf(),
            source,
        })?;

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(Self::from_image(&img, name))
    }

    /// Convert a decoded image, dropping alpha
    pub fn from_image(img: &image::DynamicImage, name: String) -> Self {
        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        let pixels = rgb.pixels().map(|p| Color::new(p[0], p[1], p[2])).collect();

        Self {
            width: width as usize,
            height: height as usize,
            pixels,
            name,
        }
    }

    /// Create a checkerboard test texture
    pub fn checkerboard(width: usize, height: usize, color1: Color, color2: Color) -> Self {
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let checker = ((x / 4) + (y / 4)) % 2 == 0;
                pixels.push(if checker { color1 } else { color2 });
            }
        }
        Self { width, height, pixels, name: "checkerboard".to_string() }
    }

    /// Nearest-texel sample at UV with wrap-around.
    ///
    /// Negative coordinates wrap with floor, so -0.25 samples like 0.75.
    pub fn sample(&self, u: f32, v: f32) -> Color {
        if self.pixels.is_empty() {
            return Color::BLACK;
        }
        let u = u - u.floor();
        let v = v - v.floor();

        let max_x = self.width as i64 - 1;
        let max_y = self.height as i64 - 1;
        let tx = ((u * self.width as f32) as i64).clamp(0, max_x) as usize;
        let ty = ((v * self.height as f32) as i64).clamp(0, max_y) as usize;
        self.pixels[ty * self.width + tx]
    }

    /// Texel lookup with both coordinates taken modulo the texture size
    pub fn tiled(&self, x: i32, y: i32) -> Color {
        if self.pixels.is_empty() {
            return Color::BLACK;
        }
        let tx = x.rem_euclid(self.width as i32) as usize;
        let ty = y.rem_euclid(self.height as i32) as usize;
        self.pixels[ty * self.width + tx]
    }
}

/// Rasterizer settings
#[derive(Debug, Clone)]
pub struct RasterSettings {
    /// Draw triangle edges instead of textured fill
    pub wireframe: bool,
    /// Backface culling
    pub backface_cull: bool,
    /// Edge color for wireframe mode
    pub wire_color: Color,
}

impl Default for RasterSettings {
    fn default() -> Self {
        Self {
            wireframe: false,
            backface_cull: true,
            wire_color: Color::BLACK,
        }
    }
}
