//! Triangle rasterization and scene drawing
//!
//! There is no depth buffer. Triangles are drawn in index order and hidden
//! surfaces are removed by backface culling alone, which is only correct for
//! closed convex meshes seen from outside (see [`Mesh`]).

use super::framebuffer::Framebuffer;
use super::math::{edge_function, Vec3};
use super::mesh::Mesh;
use super::transform::{CameraVertex, Fragment, Pipeline, ViewParams};
use super::types::{RasterSettings, Texture};

/// Triangles with a smaller absolute screen area are skipped
const AREA_EPSILON: f32 = 1e-6;

/// Backface test in eye space (camera at the origin).
///
/// Returns true when the triangle's normal `cross(b - a, c - a)` points away
/// from the camera, i.e. the triangle should be culled.
pub fn back_face_cam(a: &CameraVertex, b: &CameraVertex, c: &CameraVertex) -> bool {
    let normal = face_normal(a, b, c);
    let centroid = (a.pos + b.pos + c.pos) / 3.0;
    let to_camera = -centroid;
    normal.dot(to_camera) < 0.0
}

#[inline]
fn edge(p: &Fragment, q: &Fragment, x: f32, y: f32) -> f32 {
    edge_function(p.x, p.y, q.x, q.y, x, y)
}

/// Rasterize one projected triangle.
///
/// Wireframe mode draws the three edges with Wu lines. Otherwise every pixel
/// center inside the triangle gets a perspective-correct texture sample:
/// barycentric weights blend `1/w`, `u/w` and `v/w`, and the blended `u/w`,
/// `v/w` are divided by the blended `1/w` once per pixel.
pub fn raster_triangle(
    fb: &mut Framebuffer,
    f0: &Fragment,
    f1: &Fragment,
    f2: &Fragment,
    texture: &Texture,
    settings: &RasterSettings,
) {
    if settings.wireframe {
        let color = settings.wire_color;
        for (p, q) in [(f0, f1), (f1, f2), (f2, f0)] {
            fb.draw_line_wu(p.x as i32, p.y as i32, q.x as i32, q.y as i32, color);
        }
        return;
    }

    let area = edge(f0, f1, f2.x, f2.y);
    if area.abs() < AREA_EPSILON {
        return;
    }
    if fb.width == 0 || fb.height == 0 {
        return;
    }

    // Bounding box, clamped to the framebuffer
    let min_x = f0.x.min(f1.x).min(f2.x).floor().max(0.0) as i32;
    let min_y = f0.y.min(f1.y).min(f2.y).floor().max(0.0) as i32;
    let max_x = f0.x.max(f1.x).max(f2.x).ceil().min(fb.width as f32 - 1.0) as i32;
    let max_y = f0.y.max(f1.y).max(f2.y).ceil().min(fb.height as f32 - 1.0) as i32;

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let (px, py) = (x as f32, y as f32);
            let w0 = edge(f1, f2, px, py);
            let w1 = edge(f2, f0, px, py);
            let w2 = edge(f0, f1, px, py);

            // Inside when every edge agrees with the triangle's orientation
            if w0 * area < 0.0 || w1 * area < 0.0 || w2 * area < 0.0 {
                continue;
            }

            let (w0, w1, w2) = (w0 / area, w1 / area, w2 / area);

            let inv_w = w0 * f0.inv_w + w1 * f1.inv_w + w2 * f2.inv_w;
            if inv_w == 0.0 {
                continue;
            }
            let u = (w0 * f0.u_w + w1 * f1.u_w + w2 * f2.u_w) / inv_w;
            let v = (w0 * f0.v_w + w1 * f1.v_w + w2 * f2.v_w) / inv_w;

            fb.set_pixel(x, y, texture.sample(u, v));
        }
    }
}

/// Per-frame projection of every mesh vertex
pub struct ProjectedMesh {
    pub fragments: Vec<Fragment>,
    pub camera: Vec<CameraVertex>,
}

impl ProjectedMesh {
    pub fn new(mesh: &Mesh, pipeline: &Pipeline) -> Self {
        let fragments = mesh.vertices.iter().map(|v| pipeline.project_vertex(v)).collect();
        let camera = mesh.vertices.iter().map(|v| pipeline.eye_position(v)).collect();
        Self { fragments, camera }
    }
}

/// Counters from one [`draw_scene`] call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub drawn: usize,
    pub culled: usize,
    /// Triangles touching or crossing the near plane
    pub clipped: usize,
}

/// Render `mesh` into `fb` with the given view and settings.
///
/// Projects each vertex once, then walks triangles in index order. The caller
/// clears the framebuffer; this only draws.
pub fn draw_scene(
    fb: &mut Framebuffer,
    mesh: &Mesh,
    texture: &Texture,
    params: &ViewParams,
    settings: &RasterSettings,
) -> FrameStats {
    let pipeline = Pipeline::new(params, fb.width, fb.height);
    let projected = ProjectedMesh::new(mesh, &pipeline);
    let near_z = -params.near;

    let mut stats = FrameStats::default();

    for tri in &mesh.triangles {
        let [a, b, c] = tri.indices();
        let (ca, cb, cc) = (&projected.camera[a], &projected.camera[b], &projected.camera[c]);

        // Near plane rejection (camera looks down -Z)
        if ca.pos.z > near_z || cb.pos.z > near_z || cc.pos.z > near_z {
            stats.clipped += 1;
            continue;
        }

        if settings.backface_cull && back_face_cam(ca, cb, cc) {
            stats.culled += 1;
            continue;
        }

        raster_triangle(
            fb,
            &projected.fragments[a],
            &projected.fragments[b],
            &projected.fragments[c],
            texture,
            settings,
        );
        stats.drawn += 1;
    }

    stats
}

/// Eye-space face normal of a triangle (unnormalized)
pub fn face_normal(a: &CameraVertex, b: &CameraVertex, c: &CameraVertex) -> Vec3 {
    (b.pos - a.pos).cross(c.pos - a.pos)
}
