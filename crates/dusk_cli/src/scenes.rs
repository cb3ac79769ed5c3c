//! Built-in scenes and the camera description shared with scene files.

use anyhow::{bail, Result};
use dusk_math::random::{random_f64, random_f64_range, random_vec3, random_vec3_range};
use dusk_math::vector::multiply;
use dusk_renderer::{
    Camera, CameraSettings, Color, DiffuseModel, Material, Point3, RenderConfig, Scene, Sphere,
    Vec3,
};
use rand::RngCore;
use std::sync::Arc;

/// Names accepted by [`builtin`].
pub const BUILTIN_SCENES: &[&str] = &["three-spheres", "cover", "single"];

/// How to build the camera once the image size is known.
#[derive(Debug, Clone, PartialEq)]
pub enum CameraSpec {
    /// Pinhole at the origin looking down -Z; width follows the image aspect
    AxisAligned { viewport_height: f64 },
    Oriented(CameraSettings),
}

impl CameraSpec {
    pub fn build(&self, config: &RenderConfig) -> Result<Camera> {
        let camera = match self {
            CameraSpec::AxisAligned { viewport_height } => {
                Camera::axis_aligned(config.aspect_ratio() * viewport_height, *viewport_height)?
            }
            CameraSpec::Oriented(settings) => config.camera(settings)?,
        };
        Ok(camera)
    }
}

/// Everything needed to render: geometry, camera and optional render
/// settings carried by the scene itself.
pub struct SceneSetup {
    pub world: Scene,
    pub camera: CameraSpec,
    pub render: Option<RenderConfig>,
}

/// Knobs the command line can turn on built-in scenes.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinOptions {
    pub diffuse: DiffuseModel,
    pub aperture: Option<f64>,
}

/// Build a named scene. Randomized scenes draw from `rng`.
pub fn builtin(name: &str, options: BuiltinOptions, rng: &mut dyn RngCore) -> Result<SceneSetup> {
    let setup = match name {
        "three-spheres" => three_spheres(options),
        "cover" => cover(options, rng),
        "single" => single(options),
        _ => bail!(
            "unknown scene '{}', expected a .json file or one of: {}",
            name,
            BUILTIN_SCENES.join(", ")
        ),
    };
    log::info!("Built scene '{}' with {} objects", name, setup.world.len());
    Ok(setup)
}

fn sphere(center: Point3, radius: f64, material: &Arc<Material>) -> Sphere {
    Sphere::new(center, radius, Arc::clone(material))
}

/// Ground, a diffuse center ball, a hollow glass ball and a fuzzy metal ball.
fn three_spheres(options: BuiltinOptions) -> SceneSetup {
    let ground = Arc::new(Material::diffuse_with(Color::new(0.8, 0.8, 0.0), options.diffuse));
    let center = Arc::new(Material::diffuse_with(Color::new(0.1, 0.2, 0.5), options.diffuse));
    let glass = Arc::new(Material::dielectric(1.5));
    let metal = Arc::new(Material::metal(Color::new(0.8, 0.6, 0.2), 0.1));

    let world = Scene::new()
        .with(sphere(Point3::new(0.0, -100.5, -1.0), 100.0, &ground))
        .with(sphere(Point3::new(0.0, 0.0, -1.0), 0.5, &center))
        .with(sphere(Point3::new(-1.0, 0.0, -1.0), 0.5, &glass))
        // Same glass, negative radius: the inside of a bubble
        .with(sphere(Point3::new(-1.0, 0.0, -1.0), -0.45, &glass))
        .with(sphere(Point3::new(1.0, 0.0, -1.0), 0.5, &metal));

    let camera = CameraSettings::default()
        .with_position(Point3::new(-2.0, 2.0, 1.0), Point3::new(0.0, 0.0, -1.0), Vec3::Y)
        .with_lens(40.0, options.aperture.unwrap_or(0.1), None);

    SceneSetup {
        world,
        camera: CameraSpec::Oriented(camera),
        render: None,
    }
}

/// Ground plus a grid of small random balls around three large ones.
fn cover(options: BuiltinOptions, rng: &mut dyn RngCore) -> SceneSetup {
    let mut world = Scene::new();

    let ground = Arc::new(Material::diffuse_with(Color::splat(0.5), options.diffuse));
    world.add(Box::new(sphere(Point3::new(0.0, -1000.0, 0.0), 1000.0, &ground)));

    let glass = Arc::new(Material::dielectric(1.5));
    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = random_f64(rng);
            let center = Point3::new(
                a as f64 + 0.9 * random_f64(rng),
                0.2,
                b as f64 + 0.9 * random_f64(rng),
            );

            // Keep clear of the large metal ball
            if (center - Point3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let material = if choose_mat < 0.8 {
                let albedo = multiply(random_vec3(rng), random_vec3(rng));
                Arc::new(Material::diffuse_with(albedo, options.diffuse))
            } else if choose_mat < 0.95 {
                let albedo = random_vec3_range(rng, 0.5, 1.0);
                let fuzz = random_f64_range(rng, 0.0, 0.5);
                Arc::new(Material::metal(albedo, fuzz))
            } else {
                Arc::clone(&glass)
            };
            world.add(Box::new(Sphere::new(center, 0.2, material)));
        }
    }

    let brown = Arc::new(Material::diffuse_with(Color::new(0.4, 0.2, 0.1), options.diffuse));
    let mirror = Arc::new(Material::metal(Color::new(0.7, 0.6, 0.5), 0.0));
    world.add(Box::new(sphere(Point3::new(0.0, 1.0, 0.0), 1.0, &glass)));
    world.add(Box::new(sphere(Point3::new(-4.0, 1.0, 0.0), 1.0, &brown)));
    world.add(Box::new(sphere(Point3::new(4.0, 1.0, 0.0), 1.0, &mirror)));

    let camera = CameraSettings::default()
        .with_position(Point3::new(13.0, 2.0, 3.0), Point3::ZERO, Vec3::Y)
        .with_lens(20.0, options.aperture.unwrap_or(0.1), Some(10.0));

    SceneSetup {
        world,
        camera: CameraSpec::Oriented(camera),
        render: None,
    }
}

/// One gray ball in front of the axis-aligned camera.
fn single(options: BuiltinOptions) -> SceneSetup {
    let gray = Arc::new(Material::diffuse_with(Color::splat(0.5), options.diffuse));
    let world = Scene::new().with(sphere(Point3::new(0.0, 0.0, -1.0), 0.5, &gray));

    SceneSetup {
        world,
        camera: CameraSpec::AxisAligned {
            viewport_height: 2.0,
        },
        render: None,
    }
}
