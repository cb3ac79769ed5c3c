//! Dusk math - vector algebra, rays and random sampling.
//!
//! A single double-precision 3-vector type plays three roles: free
//! vector, point and linear RGB color. The aliases below only document
//! intent; they are the same type.

// Re-export glam for convenience
pub use glam::DVec3;

pub mod random;
pub mod vector;

mod interval;
mod ray;

pub use interval::Interval;
pub use ray::Ray;

/// 3-component vector used for directions and offsets.
pub type Vec3 = DVec3;
/// A position in world space.
pub type Point3 = DVec3;
/// Linear RGB color, components nominally in `[0, 1]`.
pub type Color = DVec3;
