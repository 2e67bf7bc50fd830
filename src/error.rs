//! Error types for resource loading and mesh validation
//!
//! The drawing routines themselves never fail: degenerate input is a no-op.
//! Everything here comes from the edges of the crate (files, configs, meshes
//! handed in from outside).

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading resources or validating meshes.
#[derive(Debug, Error)]
pub enum RasterError {
    /// Texture file could not be opened or decoded.
    #[error("Failed to load texture {path}: {source}")]
    TextureLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Framebuffer could not be encoded to an image file.
    #[error("Failed to write image {path}: {source}")]
    ImageWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Reading or writing a file failed.
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Scene config is not valid RON.
    #[error("Parse error: {0}")]
    ConfigParse(#[from] ron::error::SpannedError),

    /// Scene config could not be serialized.
    #[error("Serialize error: {0}")]
    ConfigSerialize(#[from] ron::Error),

    /// A triangle refers to a vertex that does not exist.
    #[error("Triangle {triangle} uses vertex {index}, mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        triangle: usize,
        index: usize,
        vertex_count: usize,
    },

    /// An edge is not shared by exactly two oppositely wound triangles.
    #[error("Edge {a}-{b} is not closed (used {uses} time(s) in this direction)")]
    NonManifoldEdge { a: usize, b: usize, uses: usize },
}

/// Result type for fallible rasterizer operations.
pub type Result<T> = std::result::Result<T, RasterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RasterError::IndexOutOfRange {
            triangle: 3,
            index: 42,
            vertex_count: 20,
        };
        let msg = format!("{err}");
        assert!(msg.contains("42"));
        assert!(msg.contains("20"));

        let err = RasterError::NonManifoldEdge { a: 1, b: 2, uses: 0 };
        assert!(format!("{err}").starts_with("Edge 1-2"));
    }

    #[test]
    fn test_config_parse_converts() {
        let parse = ron::from_str::<u32>("not a number").unwrap_err();
        let err: RasterError = parse.into();
        assert!(matches!(err, RasterError::ConfigParse(_)));
    }
}
