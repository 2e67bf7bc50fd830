//! rasterlab: a software rasterizer
//!
//! Pixel-exact 2D primitives (DDA and Wu lines, midpoint and Wu circles,
//! active-edge-table polygon fill, Liang-Barsky clipping) and a small 3D
//! pipeline that renders a textured, rotating cylinder into an off-screen
//! [`Framebuffer`](rasterizer::Framebuffer) with perspective-correct texture
//! mapping and backface culling.
//!
//! ```
//! use rasterlab::rasterizer::{Color, Framebuffer};
//! use rasterlab::scene::Scene;
//!
//! let scene = Scene::default();
//! let mut fb = Framebuffer::new(160, 120);
//! let stats = scene.render(&mut fb);
//! assert!(stats.drawn > 0);
//! assert_ne!(fb.count_not(Color::WHITE), 0);
//! ```

pub mod config;
pub mod error;
pub mod rasterizer;
pub mod scene;

pub use error::{RasterError, Result};

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
