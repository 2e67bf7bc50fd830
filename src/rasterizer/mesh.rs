//! Procedural meshes
//!
//! Every mesh built here is closed and wound so that `cross(b - a, c - a)`
//! points out of the solid. The renderer has no depth buffer and relies on
//! that for backface culling to hide the far side.

use super::math::{Vec2, Vec3};
use super::types::{Triangle, Vertex};
use crate::error::{RasterError, Result};
use std::collections::HashMap;
use std::f32::consts::TAU;

/// Default angular resolution of the cylinder
pub const CYLINDER_SLICES: usize = 40;

/// Smallest slice count that still encloses a volume
pub const MIN_SLICES: usize = 3;

/// Vertex buffer + triangle index buffer
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Closed cylinder: radius 1, height 2, centered on the origin along Y.
    ///
    /// Layout: `n + 1` side columns (bottom, top) with the last column
    /// repeating the first at `u = 1`, then the top and bottom cap centers,
    /// then `n` top rim and `n` bottom rim vertices.
    pub fn cylinder(slices: usize) -> Self {
        let n = slices.max(MIN_SLICES);
        let mut vertices = Vec::with_capacity(2 * (n + 1) + 2 + 2 * n);
        let mut triangles = Vec::with_capacity(4 * n);

        // Rim angle runs clockwise seen from +Y so the side quads below face out
        let rim = |i: usize| {
            let theta = TAU * i as f32 / n as f32;
            (theta.cos(), -theta.sin())
        };

        // Side columns
        for i in 0..=n {
            let (x, z) = rim(i);
            let u = i as f32 / n as f32;
            vertices.push(Vertex::new(Vec3::new(x, -1.0, z), Vec2::new(u, 0.0)));
            vertices.push(Vertex::new(Vec3::new(x, 1.0, z), Vec2::new(u, 1.0)));
        }

        for i in 0..n {
            let bottom_left = 2 * i;
            let top_left = 2 * i + 1;
            let bottom_right = 2 * (i + 1);
            let top_right = 2 * (i + 1) + 1;

            triangles.push(Triangle::new(bottom_left, bottom_right, top_left));
            triangles.push(Triangle::new(top_left, bottom_right, top_right));
        }

        // Cap centers
        let top_center = vertices.len();
        vertices.push(Vertex::new(Vec3::new(0.0, 1.0, 0.0), Vec2::new(0.5, 0.5)));
        let bottom_center = vertices.len();
        vertices.push(Vertex::new(Vec3::new(0.0, -1.0, 0.0), Vec2::new(0.5, 0.5)));

        // Cap rims map onto a disc of radius 0.4 in texture space
        let mut push_rim = |y: f32| {
            let start = vertices.len();
            for i in 0..n {
                let theta = TAU * i as f32 / n as f32;
                let (x, z) = rim(i);
                let uv = Vec2::new(0.5 + 0.4 * theta.cos(), 0.5 + 0.4 * theta.sin());
                vertices.push(Vertex::new(Vec3::new(x, y, z), uv));
            }
            start
        };
        let top_rim = push_rim(1.0);
        let bottom_rim = push_rim(-1.0);

        // Caps face opposite ways, so their fans are wound in opposite order
        for i in 0..n {
            let current = top_rim + i;
            let next = top_rim + (i + 1) % n;
            triangles.push(Triangle::new(top_center, current, next));
        }
        for i in 0..n {
            let current = bottom_rim + i;
            let next = bottom_rim + (i + 1) % n;
            triangles.push(Triangle::new(bottom_center, next, current));
        }

        Self { vertices, triangles }
    }

    /// Closed cube spanning -1..1 on every axis, 4 vertices per face
    pub fn cube() -> Self {
        let positions = [
            // Front face
            Vec3::new(-1.0, -1.0, 1.0),
            Vec3::new(1.0, -1.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(-1.0, 1.0, 1.0),
            // Back face
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(-1.0, 1.0, -1.0),
            Vec3::new(1.0, 1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            // Top face
            Vec3::new(-1.0, 1.0, -1.0),
            Vec3::new(-1.0, 1.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(1.0, 1.0, -1.0),
            // Bottom face
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, 1.0),
            Vec3::new(-1.0, -1.0, 1.0),
            // Right face
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(1.0, 1.0, -1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(1.0, -1.0, 1.0),
            // Left face
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(-1.0, -1.0, 1.0),
            Vec3::new(-1.0, 1.0, 1.0),
            Vec3::new(-1.0, 1.0, -1.0),
        ];

        let uvs = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut triangles = Vec::with_capacity(12);

        for face in 0..6 {
            let base = face * 4;
            for (i, uv) in uvs.iter().enumerate() {
                vertices.push(Vertex::new(positions[base + i], *uv));
            }
            triangles.push(Triangle::new(base, base + 1, base + 2));
            triangles.push(Triangle::new(base, base + 2, base + 3));
        }

        Self { vertices, triangles }
    }

    /// Check that every index is in range and the surface is closed with
    /// consistent winding.
    ///
    /// Vertices at the same position (UV seams, cap rims) are treated as one
    /// point. Each undirected edge must then be used exactly once in each
    /// direction.
    pub fn validate(&self) -> Result<()> {
        let vertex_count = self.vertices.len();
        for (t, tri) in self.triangles.iter().enumerate() {
            if let Some(&index) = tri.indices().iter().find(|&&i| i >= vertex_count) {
                return Err(RasterError::IndexOutOfRange {
                    triangle: t,
                    index,
                    vertex_count,
                });
            }
        }

        let welded = self.weld_positions();
        let mut directed: HashMap<(usize, usize), usize> = HashMap::new();
        for tri in &self.triangles {
            let [a, b, c] = tri.indices().map(|i| welded[i]);
            for edge in [(a, b), (b, c), (c, a)] {
                *directed.entry(edge).or_insert(0) += 1;
            }
        }

        for (&(a, b), &uses) in &directed {
            let reverse = directed.get(&(b, a)).copied().unwrap_or(0);
            if uses != 1 || reverse != 1 {
                return Err(RasterError::NonManifoldEdge { a, b, uses });
            }
        }

        Ok(())
    }

    /// Map each vertex to the first vertex sharing its (quantized) position
    fn weld_positions(&self) -> Vec<usize> {
        const QUANT: f32 = 1e4;
        let key = |p: Vec3| {
            (
                (p.x * QUANT).round() as i64,
                (p.y * QUANT).round() as i64,
                (p.z * QUANT).round() as i64,
            )
        };

        let mut first: HashMap<(i64, i64, i64), usize> = HashMap::new();
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, v)| *first.entry(key(v.pos)).or_insert(i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face_normal(mesh: &Mesh, tri: &Triangle) -> Vec3 {
        let a = mesh.vertices[tri.a].pos;
        let b = mesh.vertices[tri.b].pos;
        let c = mesh.vertices[tri.c].pos;
        (b - a).cross(c - a)
    }

    fn centroid(mesh: &Mesh, tri: &Triangle) -> Vec3 {
        let [a, b, c] = tri.indices().map(|i| mesh.vertices[i].pos);
        (a + b + c) / 3.0
    }

    #[test]
    fn test_cylinder_counts() {
        let mesh = Mesh::cylinder(4);
        assert_eq!(mesh.vertex_count(), 2 * (4 + 1) + 2 + 2 * 4);
        assert_eq!(mesh.vertex_count(), 20);
        assert_eq!(mesh.triangle_count(), 16);

        let mesh = Mesh::cylinder(CYLINDER_SLICES);
        assert_eq!(mesh.vertex_count(), 2 * 41 + 2 + 80);
        assert_eq!(mesh.triangle_count(), 160);
    }

    #[test]
    fn test_cylinder_clamps_slices() {
        assert_eq!(Mesh::cylinder(0).triangle_count(), 4 * MIN_SLICES);
    }

    #[test]
    fn test_cylinder_is_closed_manifold() {
        for n in [3, 4, 7, 40] {
            Mesh::cylinder(n).validate().unwrap();
        }
    }

    #[test]
    fn test_cylinder_normals_point_outward() {
        let mesh = Mesh::cylinder(16);
        for tri in &mesh.triangles {
            let n = face_normal(&mesh, tri);
            let c = centroid(&mesh, tri);
            assert!(n.dot(c) > 0.0, "inward triangle {tri:?}");
        }
    }

    #[test]
    fn test_cylinder_seam_uvs() {
        let mesh = Mesh::cylinder(8);
        // Column 0 and the duplicate column n share positions but not u
        let first = mesh.vertices[0];
        let last = mesh.vertices[2 * 8];
        assert!((first.pos - last.pos).len() < 1e-5);
        assert_eq!(first.uv.x, 0.0);
        assert_eq!(last.uv.x, 1.0);
    }

    #[test]
    fn test_cap_uvs_stay_in_disc() {
        let n = 12;
        let mesh = Mesh::cylinder(n);
        let rims = &mesh.vertices[2 * (n + 1) + 2..];
        assert_eq!(rims.len(), 2 * n);
        for v in rims {
            let du = v.uv.x - 0.5;
            let dv = v.uv.y - 0.5;
            assert!(((du * du + dv * dv).sqrt() - 0.4).abs() < 1e-5);
        }
    }

    #[test]
    fn test_cube_is_closed_and_outward() {
        let cube = Mesh::cube();
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.triangle_count(), 12);
        cube.validate().unwrap();
        for tri in &cube.triangles {
            assert!(face_normal(&cube, tri).dot(centroid(&cube, tri)) > 0.0);
        }
    }

    #[test]
    fn test_validate_catches_bad_index() {
        let mut mesh = Mesh::cylinder(4);
        mesh.triangles[0].c = 99;
        assert!(matches!(
            mesh.validate(),
            Err(RasterError::IndexOutOfRange { index: 99, .. })
        ));
    }

    #[test]
    fn test_validate_catches_open_or_flipped_surface() {
        let mut open = Mesh::cylinder(4);
        open.triangles.pop();
        assert!(matches!(open.validate(), Err(RasterError::NonManifoldEdge { .. })));

        let mut flipped = Mesh::cylinder(4);
        let t = &mut flipped.triangles[3];
        std::mem::swap(&mut t.b, &mut t.c);
        assert!(matches!(flipped.validate(), Err(RasterError::NonManifoldEdge { .. })));
    }
}
