//! Scene configuration
//!
//! Uses RON (Rusty Object Notation) for human-readable scene files. Every
//! field is optional in the file; missing ones take the defaults below.

use crate::error::{RasterError, Result};
use crate::rasterizer::{Color, CANVAS_H, CANVAS_W, CYLINDER_SLICES};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Initial state of a [`Scene`](crate::scene::Scene)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub canvas_width: usize,
    pub canvas_height: usize,
    /// Angular slices of the cylinder
    pub slices: usize,
    /// Degrees
    pub rot_x: f32,
    /// Degrees
    pub rot_y: f32,
    pub distance: f32,
    /// Vertical field of view in degrees
    pub fov_y: f32,
    pub wireframe: bool,
    pub culling: bool,
    pub auto_rotate: bool,
    pub background: Color,
    /// Texture to load at startup (gray if absent or unreadable)
    pub texture: Option<PathBuf>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_W,
            canvas_height: CANVAS_H,
            slices: CYLINDER_SLICES,
            rot_x: 25.0,
            rot_y: 30.0,
            distance: 6.0,
            fov_y: 60.0,
            wireframe: false,
            culling: true,
            auto_rotate: false,
            background: Color::WHITE,
            texture: None,
        }
    }
}

impl SceneConfig {
    /// Load a config from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| RasterError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_str(&contents)?;
        info!(path = %path.display(), "Loaded scene config");
        Ok(config)
    }

    /// Parse a config from a RON string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        Ok(ron::from_str(s)?)
    }

    /// Save the config to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .indentor("  ".to_string());

        let contents = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, contents).map_err(|source| RasterError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = SceneConfig::from_str("(canvas_width: 640)").unwrap();
        assert_eq!(config, SceneConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let config = SceneConfig::from_str(
            "(slices: 8, wireframe: true, background: (r: 10, g: 20, b: 30))",
        )
        .unwrap();
        assert_eq!(config.slices, 8);
        assert!(config.wireframe);
        assert_eq!(config.background, Color::new(10, 20, 30));
        assert_eq!(config.distance, 6.0);
    }

    #[test]
    fn test_bad_config_is_parse_error() {
        let err = SceneConfig::from_str("(slices: \"many\")").unwrap_err();
        assert!(matches!(err, RasterError::ConfigParse(_)));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("rasterlab-config-{}.ron", std::process::id()));
        let config = SceneConfig {
            slices: 12,
            rot_y: 90.0,
            texture: Some(PathBuf::from("textures/bricks.png")),
            ..SceneConfig::default()
        };
        config.save(&path).unwrap();
        let loaded = SceneConfig::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SceneConfig::load("/definitely/not/here.ron").unwrap_err();
        assert!(matches!(err, RasterError::Io { .. }));
    }
}
