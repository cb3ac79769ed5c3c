//! Dusk renderer - CPU path tracing.
//!
//! A Monte Carlo path tracer over implicit spheres: camera rays are
//! traced through a linear-scan [`Scene`], scattered by one of three
//! [`Material`] variants, and averaged per pixel into an [`Image`].

mod camera;
mod error;
mod hittable;
mod integrator;
mod material;
mod renderer;
mod sphere;

pub use camera::{Camera, CameraSettings};
pub use error::{CameraError, RenderError};
pub use hittable::{HitRecord, Hittable, Scene};
pub use integrator::{
    background, normal_color, ray_color, ray_color_iterative, IntegratorKind, T_MIN,
};
pub use material::{Dielectric, Diffuse, DiffuseModel, Material, Metal, ScatterResult};
pub use renderer::{render, render_pixel, render_scanline, scanline_rng, Image, RenderConfig};
pub use sphere::Sphere;

/// Re-export the math types used throughout the public API
pub use dusk_math::{Color, Interval, Point3, Ray, Vec3};
