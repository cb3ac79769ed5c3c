//! Radiance estimation along a single camera ray.
//!
//! Implements Monte Carlo path tracing with:
//! - Depth-bounded bouncing (recursive and iterative forms)
//! - A sky gradient as the only light source
//! - A deterministic normal-map debug mode

use crate::Hittable;
use dusk_math::vector::{lerp, multiply, unit};
use dusk_math::{Color, Interval, Ray};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Lower bound on hit parameters, so a scattered ray does not
/// re-intersect the surface it leaves (shadow acne).
pub const T_MIN: f64 = 1e-4;

const WHITE: Color = Color::ONE;
const SKY_BLUE: Color = Color::new(0.5, 0.7, 1.0);

/// Which estimator turns a camera ray into a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntegratorKind {
    #[default]
    Recursive,
    Iterative,
    /// Surface normals as colors, no bouncing
    Normals,
}

impl IntegratorKind {
    /// Color seen along `ray`.
    pub fn radiance(
        self,
        ray: &Ray,
        world: &dyn Hittable,
        max_depth: u32,
        rng: &mut dyn RngCore,
    ) -> Color {
        match self {
            IntegratorKind::Recursive => ray_color(ray, world, max_depth, rng),
            IntegratorKind::Iterative => ray_color_iterative(ray, world, max_depth, rng),
            IntegratorKind::Normals => normal_color(ray, world),
        }
    }
}

/// Sky gradient: white at the bottom, blue at the top, blended on the
/// vertical component of the unit direction.
pub fn background(ray: &Ray) -> Color {
    let unit_direction = unit(ray.direction());
    let t = 0.5 * (unit_direction.y + 1.0);
    lerp(WHITE, SKY_BLUE, t)
}

/// Compute the color seen by a ray.
///
/// Black once `depth` bounces are used up or the path is absorbed.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    // If we've exceeded max depth, return black (no light)
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = world.hit(ray, Interval::from_min(T_MIN)) else {
        return background(ray);
    };

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => multiply(
            result.attenuation,
            ray_color(&result.scattered, world, depth - 1, rng),
        ),
        None => Color::ZERO,
    }
}

/// Loop form of [`ray_color`]: same random draws in the same order.
///
/// Attenuations are folded from the last bounce back to the first, the
/// order the recursion unwinds in, so both forms agree bit for bit.
pub fn ray_color_iterative(
    ray: &Ray,
    world: &dyn Hittable,
    depth: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let mut attenuations = Vec::with_capacity(depth.min(64) as usize);
    let mut ray = *ray;

    let mut color = 'trace: {
        for _ in 0..depth {
            let Some(rec) = world.hit(&ray, Interval::from_min(T_MIN)) else {
                break 'trace background(&ray);
            };

            match rec.material.scatter(&ray, &rec, rng) {
                Some(result) => {
                    attenuations.push(result.attenuation);
                    ray = result.scattered;
                }
                None => break 'trace Color::ZERO,
            }
        }
        Color::ZERO
    };

    for &attenuation in attenuations.iter().rev() {
        color = multiply(attenuation, color);
    }
    color
}

/// Map the facing normal at the nearest hit to `[0, 1]` RGB; the
/// background on a miss.
pub fn normal_color(ray: &Ray, world: &dyn Hittable) -> Color {
    match world.hit(ray, Interval::from_min(T_MIN)) {
        Some(rec) => 0.5 * (rec.normal + Color::ONE),
        None => background(ray),
    }
}
