//! Model / view / projection pipeline
//!
//! Builds `MVP = P * V * M` from the view parameters and projects mesh
//! vertices into screen-space fragments. The eye-space position used for
//! culling is kept separately from the clip-space fragment.

use super::math::{Mat4, Vec3};
use super::types::Vertex;

/// Below this |w| a vertex is treated as sitting on the camera plane
const W_EPSILON: f32 = 1e-6;

/// User-facing transform parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewParams {
    /// Rotation about X in degrees (applied first)
    pub rot_x: f32,
    /// Rotation about Y in degrees
    pub rot_y: f32,
    /// Camera distance from the origin along +Z
    pub distance: f32,
    /// Vertical field of view in degrees
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ViewParams {
    fn default() -> Self {
        Self {
            rot_x: 25.0,
            rot_y: 30.0,
            distance: 6.0,
            fov_y: 60.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Per-vertex screen data after projection
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Fragment {
    /// Screen x (pixel centers at integers)
    pub x: f32,
    /// Screen y, top-left origin
    pub y: f32,
    /// 1 / clip w
    pub inv_w: f32,
    /// u * inv_w
    pub u_w: f32,
    /// v * inv_w
    pub v_w: f32,
}

/// Eye-space vertex position, used only by the backface test
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraVertex {
    pub pos: Vec3,
}

/// Matrices for one frame
#[derive(Debug, Clone, Copy)]
pub struct Pipeline {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
    pub model_view: Mat4,
    pub mvp: Mat4,
    pub width: usize,
    pub height: usize,
}

impl Pipeline {
    pub fn new(params: &ViewParams, width: usize, height: usize) -> Self {
        let model = Mat4::rotation_y(params.rot_y) * Mat4::rotation_x(params.rot_x);
        let view = Mat4::translation(0.0, 0.0, -params.distance);

        let aspect = if height == 0 { 1.0 } else { width as f32 / height as f32 };
        let projection = Mat4::perspective(params.fov_y, aspect, params.near, params.far);

        let model_view = view * model;
        let mvp = projection * model_view;

        Self {
            model,
            view,
            projection,
            model_view,
            mvp,
            width,
            height,
        }
    }

    /// Project a vertex into a screen fragment carrying perspective data
    pub fn project_vertex(&self, v: &Vertex) -> Fragment {
        let hp = self.mvp.transform_point(v.pos);
        let max_x = self.width.saturating_sub(1) as f32;
        let max_y = self.height.saturating_sub(1) as f32;

        if hp.w.abs() < W_EPSILON {
            return Fragment {
                x: max_x * 0.5,
                y: max_y * 0.5,
                ..Fragment::default()
            };
        }

        let inv_w = 1.0 / hp.w;
        Fragment {
            x: (hp.x * inv_w * 0.5 + 0.5) * max_x,
            y: (-hp.y * inv_w * 0.5 + 0.5) * max_y,
            inv_w,
            u_w: v.uv.x * inv_w,
            v_w: v.uv.y * inv_w,
        }
    }

    /// Eye-space position of a vertex (model-view applied, no projection)
    pub fn eye_position(&self, v: &Vertex) -> CameraVertex {
        CameraVertex {
            pos: self.model_view.transform_point(v.pos).truncate(),
        }
    }
}
