//! Camera for ray generation.

use crate::CameraError;
use dusk_math::random::random_in_unit_disk;
use dusk_math::vector::{subtract, unit};
use dusk_math::{Point3, Ray, Vec3};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// User-facing camera parameters.
///
/// Turned into a [`Camera`] by [`Camera::new`], which validates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub look_from: Point3,
    pub look_at: Point3,
    pub v_up: Vec3,
    /// Vertical field of view in degrees
    pub vfov: f64,
    pub aspect_ratio: f64,
    /// Lens diameter; 0 is a pinhole
    pub aperture: f64,
    /// Distance to the plane of perfect focus, `|look_from - look_at|` if unset
    pub focus_distance: Option<f64>,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            look_from: Point3::ZERO,
            look_at: Point3::new(0.0, 0.0, -1.0),
            v_up: Vec3::Y,
            vfov: 90.0,
            aspect_ratio: 16.0 / 9.0,
            aperture: 0.0,
            focus_distance: None,
        }
    }
}

impl CameraSettings {
    /// Set camera position.
    pub fn with_position(mut self, look_from: Point3, look_at: Point3, v_up: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.v_up = v_up;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f64, aperture: f64, focus_distance: Option<f64>) -> Self {
        self.vfov = vfov;
        self.aperture = aperture;
        self.focus_distance = focus_distance;
        self
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: f64) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }
}

/// Maps fractional image-plane coordinates to world-space rays.
///
/// Every field is derived once at construction and never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    origin: Point3,
    lower_left_corner: Point3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f64,
}

impl Camera {
    /// Pinhole camera at the world origin looking down -Z, with the image
    /// plane at distance 1 and the given viewport size.
    pub fn axis_aligned(viewport_width: f64, viewport_height: f64) -> Result<Self, CameraError> {
        if !(viewport_width > 0.0 && viewport_height > 0.0) {
            return Err(CameraError::InvalidViewport {
                width: viewport_width,
                height: viewport_height,
            });
        }

        const FOCAL_LENGTH: f64 = 1.0;
        let origin = Point3::ZERO;
        let horizontal = Vec3::new(viewport_width, 0.0, 0.0);
        let vertical = Vec3::new(0.0, viewport_height, 0.0);
        let lower_left_corner = subtract(
            origin,
            &[
                horizontal / 2.0,
                vertical / 2.0,
                Vec3::new(0.0, 0.0, FOCAL_LENGTH),
            ],
        );

        Ok(Self {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
            lens_radius: 0.0,
        })
    }

    /// Oriented camera with optional defocus blur.
    pub fn new(settings: &CameraSettings) -> Result<Self, CameraError> {
        let CameraSettings {
            look_from,
            look_at,
            v_up,
            vfov,
            aspect_ratio,
            aperture,
            focus_distance,
        } = *settings;

        if !(vfov > 0.0 && vfov < 180.0) {
            return Err(CameraError::InvalidFieldOfView(vfov));
        }
        if !(aspect_ratio > 0.0 && aspect_ratio.is_finite()) {
            return Err(CameraError::InvalidAspectRatio(aspect_ratio));
        }
        if !(aperture >= 0.0 && aperture.is_finite()) {
            return Err(CameraError::NegativeAperture(aperture));
        }

        let view = look_from - look_at;
        if view.length_squared() == 0.0 {
            return Err(CameraError::DegenerateOrientation);
        }
        let focus_distance = focus_distance.unwrap_or_else(|| view.length());
        if !(focus_distance > 0.0 && focus_distance.is_finite()) {
            return Err(CameraError::InvalidFocusDistance(focus_distance));
        }

        // Viewport size on a plane at distance 1
        let h = (vfov.to_radians() / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = aspect_ratio * viewport_height;

        // Orthonormal basis: camera faces along -w
        let w = unit(view);
        let side = v_up.cross(w);
        if side.length_squared() < 1e-24 {
            return Err(CameraError::DegenerateOrientation);
        }
        let u = unit(side);
        let v = w.cross(u);

        // The image plane sits on the focus plane, so rays from anywhere
        // on the lens converge there
        let origin = look_from;
        let horizontal = focus_distance * viewport_width * u;
        let vertical = focus_distance * viewport_height * v;
        let lower_left_corner = subtract(
            origin,
            &[horizontal / 2.0, vertical / 2.0, focus_distance * w],
        );

        Ok(Self {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            w,
            lens_radius: aperture / 2.0,
        })
    }

    /// Ray through fractional image-plane coordinates `(s, t)`, with
    /// `(0, 0)` the lower-left corner and `(1, 1)` the upper-right.
    ///
    /// Only draws from `rng` when the lens has a nonzero radius.
    pub fn get_ray(&self, s: f64, t: f64, rng: &mut dyn RngCore) -> Ray {
        let offset = if self.lens_radius > 0.0 {
            let rd = self.lens_radius * random_in_unit_disk(rng);
            self.u * rd.x + self.v * rd.y
        } else {
            Vec3::ZERO
        };

        let target = self.lower_left_corner + s * self.horizontal + t * self.vertical;
        let origin = self.origin + offset;
        Ray::new(origin, target - origin)
    }

    pub fn origin(&self) -> Point3 {
        self.origin
    }

    pub fn lens_radius(&self) -> f64 {
        self.lens_radius
    }

    /// The camera's `(u, v, w)` basis; it looks along `-w`.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }
}
