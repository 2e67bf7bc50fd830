//! Scene state for the 3D view
//!
//! Owns the cached mesh, the texture and the view parameters. Setters take
//! `&mut self` and [`Scene::render`] takes `&self`, so parameter changes can
//! only happen between frames.

use crate::config::SceneConfig;
use crate::error::Result;
use crate::rasterizer::{
    draw_scene, Color, FrameStats, Framebuffer, Mesh, RasterSettings, Texture, ViewParams,
    MIN_SLICES,
};
use std::path::Path;
use tracing::{debug, info, warn};

/// Camera distance range
pub const MIN_DISTANCE: f32 = 3.0;
pub const MAX_DISTANCE: f32 = 15.0;

/// Display zoom range (applied when blitting, not by the rasterizer)
pub const MIN_ZOOM: u32 = 1;
pub const MAX_ZOOM: u32 = 8;

/// Side length of the fallback gray texture
const DEFAULT_TEXTURE_SIZE: usize = 256;

pub struct Scene {
    mesh: Mesh,
    slices: usize,
    texture: Texture,
    pub params: ViewParams,
    pub settings: RasterSettings,
    pub background: Color,
    pub auto_rotate: bool,
    zoom: u32,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(&SceneConfig::default())
    }
}

impl Scene {
    /// Build a scene from config. A texture that fails to load leaves the
    /// gray default in place.
    pub fn new(config: &SceneConfig) -> Self {
        let slices = config.slices.max(MIN_SLICES);
        let mut scene = Self {
            mesh: Mesh::cylinder(slices),
            slices,
            texture: Texture::solid(DEFAULT_TEXTURE_SIZE, DEFAULT_TEXTURE_SIZE, Color::GRAY),
            params: ViewParams {
                fov_y: config.fov_y,
                ..ViewParams::default()
            },
            settings: RasterSettings {
                wireframe: config.wireframe,
                backface_cull: config.culling,
                ..RasterSettings::default()
            },
            background: config.background,
            auto_rotate: config.auto_rotate,
            zoom: MIN_ZOOM,
        };
        scene.set_rotation(config.rot_x, config.rot_y);
        scene.set_distance(config.distance);

        if let Some(path) = &config.texture {
            scene.load_texture(path);
        }

        info!(
            slices,
            vertices = scene.mesh.vertex_count(),
            triangles = scene.mesh.triangle_count(),
            "Scene ready"
        );
        scene
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn slices(&self) -> usize {
        self.slices
    }

    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    pub fn zoom(&self) -> u32 {
        self.zoom
    }

    /// Set rotation in degrees, wrapped into [0, 360)
    pub fn set_rotation(&mut self, rot_x: f32, rot_y: f32) {
        self.params.rot_x = rot_x.rem_euclid(360.0);
        self.params.rot_y = rot_y.rem_euclid(360.0);
    }

    /// Rotate by a delta in degrees
    pub fn rotate_by(&mut self, d_x: f32, d_y: f32) {
        self.set_rotation(self.params.rot_x + d_x, self.params.rot_y + d_y);
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.params.distance = distance.clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Change tessellation. The mesh is only rebuilt when the count changes.
    pub fn set_slices(&mut self, slices: usize) {
        let slices = slices.max(MIN_SLICES);
        if slices == self.slices {
            return;
        }
        self.slices = slices;
        self.mesh = Mesh::cylinder(slices);
        debug!(slices, triangles = self.mesh.triangle_count(), "Rebuilt cylinder mesh");
    }

    /// Replace the mesh with an externally built one (slice count no longer
    /// applies). A mesh that fails [`Mesh::validate`] is rejected and the
    /// current one kept.
    pub fn set_mesh(&mut self, mesh: Mesh) -> Result<()> {
        mesh.validate()?;
        info!(
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "Replaced scene mesh"
        );
        self.mesh = mesh;
        self.slices = 0;
        Ok(())
    }

    pub fn set_wireframe(&mut self, on: bool) {
        self.settings.wireframe = on;
    }

    pub fn toggle_wireframe(&mut self) {
        self.settings.wireframe = !self.settings.wireframe;
    }

    pub fn set_culling(&mut self, on: bool) {
        self.settings.backface_cull = on;
    }

    pub fn toggle_culling(&mut self) {
        self.settings.backface_cull = !self.settings.backface_cull;
    }

    pub fn toggle_auto_rotate(&mut self) {
        self.auto_rotate = !self.auto_rotate;
    }

    pub fn set_zoom(&mut self, zoom: u32) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// One auto-rotate tick: advance Y rotation by a degree
    pub fn step_auto_rotate(&mut self) {
        if self.auto_rotate {
            self.rotate_by(0.0, 1.0);
        }
    }

    /// Load a texture from disk. On failure the current texture stays and
    /// `false` is returned.
    pub fn load_texture<P: AsRef<Path>>(&mut self, path: P) -> bool {
        match Texture::from_file(path.as_ref()) {
            Ok(tex) => {
                info!(name = %tex.name, width = tex.width, height = tex.height, "Loaded texture");
                self.texture = tex;
                true
            }
            Err(e) => {
                warn!("{}", e);
                false
            }
        }
    }

    pub fn set_texture(&mut self, texture: Texture) {
        self.texture = texture;
    }

    /// Clear `fb` and draw a complete frame
    pub fn render(&self, fb: &mut Framebuffer) -> FrameStats {
        fb.clear(self.background);
        draw_scene(fb, &self.mesh, &self.texture, &self.params, &self.settings)
    }
}
