//! Per-pixel sampling and the scanline render loop.

use crate::{Camera, CameraSettings, Hittable, IntegratorKind, RenderError};
use dusk_math::random::random_f64;
use dusk_math::vector::{translate, unscale_in_place};
use dusk_math::Color;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub image_width: u32,
    pub image_height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Base seed; drawn at random and logged when unset
    pub seed: Option<u64>,
    /// Trace scanlines on the rayon pool
    pub parallel: bool,
    pub integrator: IntegratorKind,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_width: 400,
            image_height: 225,
            samples_per_pixel: 100,
            max_depth: 50,
            seed: None,
            parallel: true,
            integrator: IntegratorKind::Recursive,
        }
    }
}

impl RenderConfig {
    /// Width over height.
    pub fn aspect_ratio(&self) -> f64 {
        self.image_width as f64 / self.image_height as f64
    }

    /// Reject configurations the sampling loop cannot handle.
    pub fn validate(&self) -> Result<(), RenderError> {
        // Sample coordinates divide by (width - 1) and (height - 1)
        if self.image_width < 2 || self.image_height < 2 {
            return Err(RenderError::EmptyImage {
                width: self.image_width,
                height: self.image_height,
            });
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::NoSamples);
        }
        Ok(())
    }

    /// Build a camera whose aspect ratio matches the image.
    pub fn camera(&self, settings: &CameraSettings) -> Result<Camera, RenderError> {
        let settings = settings.clone().with_aspect_ratio(self.aspect_ratio());
        Ok(Camera::new(&settings)?)
    }
}

/// A rendered image: linear colors, rows ordered top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    scanlines: Vec<Vec<Color>>,
}

impl Image {
    /// Wrap scanlines given top row first.
    pub fn from_scanlines(width: u32, height: u32, scanlines: Vec<Vec<Color>>) -> Self {
        debug_assert_eq!(scanlines.len(), height as usize);
        debug_assert!(scanlines.iter().all(|row| row.len() == width as usize));
        Self {
            width,
            height,
            scanlines,
        }
    }

    /// Get the pixel at column `x` of row `y`, with `y = 0` the top row.
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        self.scanlines[y as usize][x as usize]
    }

    /// Rows from the top of the image down.
    pub fn scanlines(&self) -> impl Iterator<Item = &[Color]> {
        self.scanlines.iter().map(Vec::as_slice)
    }
}

/// Generator for scanline `j`, derived from the render's base seed.
///
/// Each scanline owns its stream, so the result does not depend on the
/// order or thread in which scanlines are traced.
pub fn scanline_rng(seed: u64, j: u32) -> StdRng {
    StdRng::seed_from_u64(seed.wrapping_add(j as u64))
}

/// Average of `samples_per_pixel` jittered samples through pixel `(i, j)`,
/// where `j = 0` is the bottom row.
///
/// `config` must pass [`RenderConfig::validate`]; [`render`] checks this
/// once up front.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    i: u32,
    j: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    debug_assert!(
        config.validate().is_ok(),
        "render_pixel called with an invalid config"
    );
    let width_span = (config.image_width - 1) as f64;
    let height_span = (config.image_height - 1) as f64;
    let mut pixel_color = Color::ZERO;

    for _ in 0..config.samples_per_pixel {
        let s = (i as f64 + random_f64(rng)) / width_span;
        let t = (j as f64 + random_f64(rng)) / height_span;
        let ray = camera.get_ray(s, t, rng);
        translate(
            &mut pixel_color,
            config.integrator.radiance(&ray, world, config.max_depth, rng),
        );
    }

    unscale_in_place(&mut pixel_color, config.samples_per_pixel as f64);
    pixel_color
}

/// All pixels of row `j`, left to right.
pub fn render_scanline(
    camera: &Camera,
    world: &dyn Hittable,
    j: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Vec<Color> {
    (0..config.image_width)
        .map(|i| render_pixel(camera, world, i, j, config, rng))
        .collect()
}

/// Render the entire scene, top scanline (`j = height - 1`) first.
pub fn render(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
) -> Result<Image, RenderError> {
    config.validate()?;

    let seed = config.seed.unwrap_or_else(rand::random);
    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}, {:?} integrator, seed {}",
        config.image_width,
        config.image_height,
        config.samples_per_pixel,
        config.max_depth,
        config.integrator,
        seed
    );

    let start = Instant::now();
    let trace_row = |j: u32| {
        let mut rng = scanline_rng(seed, j);
        let row = render_scanline(camera, world, j, config, &mut rng);
        log::debug!("Scanline {} done", j);
        row
    };

    let scanlines: Vec<Vec<Color>> = if config.parallel {
        (0..config.image_height)
            .into_par_iter()
            .rev()
            .map(trace_row)
            .collect()
    } else {
        (0..config.image_height).rev().map(trace_row).collect()
    };

    log::info!("Rendered in {:?}", start.elapsed());

    Ok(Image::from_scanlines(
        config.image_width,
        config.image_height,
        scanlines,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Material, Scene, Sphere};
    use dusk_math::Vec3;
    use std::sync::Arc;

    fn single_sphere_scene() -> Scene {
        Scene::new().with(Sphere::new(
            Vec3::new(0.0, 0.0, -1.0),
            0.5,
            Arc::new(Material::diffuse(Color::new(0.5, 0.5, 0.5))),
        ))
    }

    fn small_config(seed: u64) -> RenderConfig {
        RenderConfig {
            image_width: 16,
            image_height: 9,
            samples_per_pixel: 1,
            max_depth: 10,
            seed: Some(seed),
            parallel: false,
            integrator: IntegratorKind::Recursive,
        }
    }

    #[test]
    fn test_seeded_render_is_reproducible() {
        let world = single_sphere_scene();
        let camera = Camera::axis_aligned(4.0, 2.25).unwrap();
        let config = small_config(1234);

        let first = render(&camera, &world, &config).unwrap();
        let second = render(&camera, &world, &config).unwrap();
        assert_eq!(first, second);

        let other = render(&camera, &world, &small_config(4321)).unwrap();
        assert_ne!(first, other);
    }

    #[test]
    fn test_parallel_matches_serial() {
        let world = single_sphere_scene();
        let camera = Camera::axis_aligned(4.0, 2.25).unwrap();
        let serial = small_config(77);
        let parallel = RenderConfig {
            parallel: true,
            ..serial.clone()
        };

        assert_eq!(
            render(&camera, &world, &serial).unwrap(),
            render(&camera, &world, &parallel).unwrap()
        );
    }

    #[test]
    fn test_rows_are_top_first() {
        let world = Scene::new();
        let camera = Camera::axis_aligned(4.0, 2.25).unwrap();
        let config = small_config(0);

        let image = render(&camera, &world, &config).unwrap();
        assert_eq!(image.scanlines().count(), 9);
        // Looking up is bluer (less red) than looking down
        assert!(image.pixel(8, 0).x < image.pixel(8, 8).x);
    }

    #[test]
    fn test_render_pixel_averages_samples() {
        // Empty scene, pinhole camera, normal integrator: every sample is
        // a background color, so the mean stays inside the gradient range
        let world = Scene::new();
        let camera = Camera::axis_aligned(2.0, 2.0).unwrap();
        let config = RenderConfig {
            samples_per_pixel: 16,
            integrator: IntegratorKind::Normals,
            ..small_config(0)
        };
        let mut rng = scanline_rng(5, 0);

        let color = render_pixel(&camera, &world, 3, 4, &config, &mut rng);
        assert!(color.x >= 0.5 && color.x <= 1.0);
        assert!(color.y >= 0.7 && color.y <= 1.0);
        assert!((color.z - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_hit_pixel_is_darker_than_sky() {
        let world = single_sphere_scene();
        let camera = Camera::axis_aligned(4.0, 2.25).unwrap();
        let config = RenderConfig {
            samples_per_pixel: 8,
            ..small_config(3)
        };
        let mut rng = scanline_rng(3, 4);

        // Center pixel looks straight at the gray sphere
        let color = render_pixel(&camera, &world, 8, 4, &config, &mut rng);
        assert!(color.length() > 0.0);
        assert!(color.z < 0.75);
    }

    #[test]
    fn test_invalid_config() {
        let world = Scene::new();
        let camera = Camera::axis_aligned(2.0, 2.0).unwrap();

        let tiny = RenderConfig {
            image_width: 1,
            ..small_config(0)
        };
        assert_eq!(
            render(&camera, &world, &tiny),
            Err(RenderError::EmptyImage {
                width: 1,
                height: 9
            })
        );

        let no_samples = RenderConfig {
            samples_per_pixel: 0,
            ..small_config(0)
        };
        assert_eq!(render(&camera, &world, &no_samples), Err(RenderError::NoSamples));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "invalid config")]
    fn test_render_pixel_rejects_single_column_image() {
        let world = Scene::new();
        let camera = Camera::axis_aligned(2.0, 2.0).unwrap();
        let config = RenderConfig {
            image_width: 1,
            image_height: 2,
            ..small_config(0)
        };
        let mut rng = scanline_rng(0, 0);
        render_pixel(&camera, &world, 0, 0, &config, &mut rng);
    }

    #[test]
    fn test_camera_uses_image_aspect() {
        let config = RenderConfig {
            image_width: 200,
            image_height: 100,
            ..RenderConfig::default()
        };
        assert_eq!(config.aspect_ratio(), 2.0);

        let bad = CameraSettings::default().with_lens(0.0, 0.0, None);
        assert!(matches!(
            config.camera(&bad),
            Err(RenderError::Camera(crate::CameraError::InvalidFieldOfView(_)))
        ));
        assert!(config.camera(&CameraSettings::default()).is_ok());
    }

    #[test]
    fn test_config_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.samples_per_pixel, 100);
        assert_eq!(config.max_depth, 50);
        assert!(config.parallel);
        assert_eq!(config.integrator, IntegratorKind::Recursive);
    }
}
