//! Software rasterizer
//!
//! Features:
//! - Aliased (DDA, midpoint) and antialiased (Wu) lines and circles
//! - Active-edge-table polygon fill with solid or tiled pattern sources
//! - Liang-Barsky segment clipping
//! - Model/view/projection pipeline with perspective-correct texturing
//! - Backface culling instead of a depth buffer

mod framebuffer;
mod math;
mod mesh;
mod primitives;
mod render;
mod transform;
mod types;

pub use framebuffer::*;
pub use math::*;
pub use mesh::*;
pub use primitives::*;
pub use render::*;
pub use transform::*;
pub use types::*;

/// Canvas dimensions of the 3D view
pub const CANVAS_W: usize = 640;
pub const CANVAS_H: usize = 480;
