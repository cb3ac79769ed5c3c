//! Error types for scene setup.
//!
//! Tracing itself cannot fail: misses, absorption and exhausted depth
//! are ordinary outcomes. Errors only come from invalid configuration.

use thiserror::Error;

/// Invalid camera configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("vertical field of view must be in (0, 180) degrees, got {0}")]
    InvalidFieldOfView(f64),

    #[error("aspect ratio must be positive, got {0}")]
    InvalidAspectRatio(f64),

    #[error("aperture must be non-negative, got {0}")]
    NegativeAperture(f64),

    #[error("focus distance must be positive, got {0}")]
    InvalidFocusDistance(f64),

    #[error("camera orientation is degenerate (look_from == look_at or v_up parallel to view)")]
    DegenerateOrientation,

    #[error("viewport dimensions must be positive, got {width}x{height}")]
    InvalidViewport { width: f64, height: f64 },
}

/// Invalid render configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("image must be at least 2x2 pixels, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    #[error("samples per pixel must be at least 1")]
    NoSamples,

    #[error(transparent)]
    Camera(#[from] CameraError),
}
