//! Surface scattering.
//!
//! [`Material`] is a closed set of three scattering behaviors. The
//! integrator calls [`Material::scatter`] and never needs to know which
//! variant it is talking to.

use crate::hittable::HitRecord;
use dusk_math::random::{
    random_f64, random_in_hemisphere, random_in_unit_sphere, random_unit_vector,
};
use dusk_math::vector::{add, near_zero, reflect, refract, unit};
use dusk_math::{Color, Point3, Ray, Vec3};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Outcome of a scatter event that was not absorbed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterResult {
    /// Per-channel energy kept by this bounce
    pub attenuation: Color,
    /// The continuation ray, starting at the hit point
    pub scattered: Ray,
}

/// How a diffuse surface picks its bounce target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiffuseModel {
    /// `p + n + random unit vector`: cosine-weighted, true Lambertian.
    #[default]
    Lambertian,
    /// `p + n + random point in the unit ball`: biased toward the normal.
    UniformSphere,
    /// `p + random point in the ball, flipped into the normal's hemisphere`.
    Hemisphere,
}

impl DiffuseModel {
    /// Target point for a bounce leaving `p` with normal `n`.
    pub fn target(self, p: Point3, n: Vec3, rng: &mut dyn RngCore) -> Point3 {
        match self {
            DiffuseModel::Lambertian => add(p, &[n, random_unit_vector(rng)]),
            DiffuseModel::UniformSphere => add(p, &[n, random_in_unit_sphere(rng)]),
            DiffuseModel::Hemisphere => p + random_in_hemisphere(rng, n),
        }
    }
}

/// Diffuse (matte) material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Diffuse {
    pub albedo: Color,
    pub model: DiffuseModel,
}

impl Diffuse {
    pub fn new(albedo: Color, model: DiffuseModel) -> Self {
        Self { albedo, model }
    }

    /// Always scatters.
    pub fn scatter(&self, _ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> ScatterResult {
        let target = self.model.target(rec.p, rec.normal, rng);
        let mut direction = target - rec.p;

        // The random offset cancelled the normal
        if near_zero(direction) {
            direction = rec.normal;
        }

        ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, direction),
        }
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metal {
    pub albedo: Color,
    fuzz: f64,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn new(albedo: Color, fuzz: f64) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    pub fn fuzz(&self) -> f64 {
        self.fuzz
    }

    /// Absorbs when the (fuzzed) reflection points into the surface.
    pub fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let mut reflected = reflect(unit(ray_in.direction()), rec.normal);
        if self.fuzz > 0.0 {
            reflected += self.fuzz * random_in_unit_sphere(rng);
        }

        if reflected.dot(rec.normal) <= 0.0 {
            return None;
        }

        Some(ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, reflected),
        })
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dielectric {
    /// Index of refraction
    pub refraction_index: f64,
    /// Constant attenuation; white for clear glass
    pub tint: Color,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `refraction_index`: 1.0 = air, 1.5 = glass, 2.4 = diamond
    pub fn new(refraction_index: f64) -> Self {
        Self::tinted(refraction_index, Color::ONE)
    }

    pub fn tinted(refraction_index: f64, tint: Color) -> Self {
        Self {
            refraction_index,
            tint,
        }
    }

    /// Schlick's approximation for reflectance.
    pub fn reflectance(cosine: f64, refraction_ratio: f64) -> f64 {
        let r0 = ((1.0 - refraction_ratio) / (1.0 + refraction_ratio)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }

    /// Always scatters: reflects or refracts.
    pub fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> ScatterResult {
        let refraction_ratio = if rec.front_face {
            1.0 / self.refraction_index
        } else {
            self.refraction_index
        };

        let unit_direction = unit(ray_in.direction());
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        // Total internal reflection
        let cannot_refract = refraction_ratio * sin_theta > 1.0;

        let direction = if cannot_refract
            || random_f64(rng) < Self::reflectance(cos_theta, refraction_ratio)
        {
            reflect(unit_direction, rec.normal)
        } else {
            refract(unit_direction, rec.normal, refraction_ratio)
        };

        ScatterResult {
            attenuation: self.tint,
            scattered: Ray::new(rec.p, direction),
        }
    }
}

/// A surface's scattering behavior.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    Diffuse(Diffuse),
    Metal(Metal),
    Dielectric(Dielectric),
}

impl Material {
    /// Lambertian diffuse with the given albedo.
    pub fn diffuse(albedo: Color) -> Self {
        Material::Diffuse(Diffuse::new(albedo, DiffuseModel::Lambertian))
    }

    pub fn diffuse_with(albedo: Color, model: DiffuseModel) -> Self {
        Material::Diffuse(Diffuse::new(albedo, model))
    }

    pub fn metal(albedo: Color, fuzz: f64) -> Self {
        Material::Metal(Metal::new(albedo, fuzz))
    }

    pub fn dielectric(refraction_index: f64) -> Self {
        Material::Dielectric(Dielectric::new(refraction_index))
    }

    /// Scatter an incoming ray at `rec`.
    ///
    /// Returns the attenuation and continuation ray, or `None` if the
    /// ray is absorbed.
    pub fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        match self {
            Material::Diffuse(m) => Some(m.scatter(ray_in, rec, rng)),
            Material::Metal(m) => m.scatter(ray_in, rec, rng),
            Material::Dielectric(m) => Some(m.scatter(ray_in, rec, rng)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Replays a fixed cycle of raw outputs.
    struct ScriptedRng {
        values: Vec<u64>,
        next: usize,
    }

    impl RngCore for ScriptedRng {
        fn next_u32(&mut self) -> u32 {
            self.next_u64() as u32
        }

        fn next_u64(&mut self) -> u64 {
            let v = self.values[self.next % self.values.len()];
            self.next += 1;
            v
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for chunk in dest.chunks_mut(8) {
                let bytes = self.next_u64().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    fn hit_from<'a>(ray: &Ray, t: f64, outward: Vec3, material: &'a Material) -> HitRecord<'a> {
        HitRecord::new(ray, t, ray.at(t), outward, material)
    }

    #[test]
    fn test_diffuse_degenerate_falls_back_to_normal() {
        // Raw outputs mapping to 0.5, 0.5, ~0 in [0, 1): the sample in
        // [-1, 1)^3 is (0, 0, -1 + 2^-52), whose unit vector is exactly -Z.
        let mut rng = ScriptedRng {
            values: vec![1 << 63, 1 << 63, 1 << 11],
            next: 0,
        };

        let material = Material::diffuse(Color::splat(0.5));
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let rec = hit_from(&ray, 0.5, Vec3::Z, &material);

        let result = material.scatter(&ray, &rec, &mut rng).unwrap();
        assert_eq!(result.scattered.direction(), rec.normal);
        assert_eq!(result.scattered.origin(), rec.p);
        assert_eq!(result.attenuation, Color::splat(0.5));
    }

    #[test]
    fn test_diffuse_always_scatters_outward() {
        let mut rng = StdRng::seed_from_u64(11);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        for model in [
            DiffuseModel::Lambertian,
            DiffuseModel::UniformSphere,
            DiffuseModel::Hemisphere,
        ] {
            let material = Material::diffuse_with(Color::ONE, model);
            let rec = hit_from(&ray, 0.5, Vec3::Z, &material);
            for _ in 0..500 {
                let result = material.scatter(&ray, &rec, &mut rng).unwrap();
                assert!(!near_zero(result.scattered.direction()));
                assert!(result.scattered.direction().dot(rec.normal) >= 0.0);
            }
        }
    }

    #[test]
    fn test_metal_mirror_at_normal_incidence() {
        let mut rng = StdRng::seed_from_u64(1);
        let material = Material::metal(Color::new(0.8, 0.6, 0.2), 0.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -3.0));
        let rec = hit_from(&ray, 0.5, Vec3::Z, &material);

        let result = material.scatter(&ray, &rec, &mut rng).unwrap();
        assert_eq!(result.scattered.direction(), Vec3::Z);
        assert_eq!(result.attenuation, Color::new(0.8, 0.6, 0.2));
    }

    #[test]
    fn test_metal_fuzz_clamped() {
        assert_eq!(Metal::new(Color::ONE, 3.0).fuzz(), 1.0);
        assert_eq!(Metal::new(Color::ONE, -1.0).fuzz(), 0.0);
    }

    #[test]
    fn test_metal_absorbs_grazing_reflection() {
        // The ray skims along the surface: the reflection has no normal
        // component and must not contribute.
        let mut rng = StdRng::seed_from_u64(1);
        let material = Material::metal(Color::ONE, 0.0);
        let ray = Ray::new(Vec3::new(-1.0, 0.0, 0.0), Vec3::X);
        let rec = HitRecord {
            p: Vec3::ZERO,
            normal: Vec3::Y,
            material: &material,
            t: 1.0,
            front_face: true,
        };

        assert!(material.scatter(&ray, &rec, &mut rng).is_none());
    }

    #[test]
    fn test_dielectric_index_matched_goes_straight() {
        let mut rng = StdRng::seed_from_u64(5);
        let material = Material::dielectric(1.0);

        for dir in [Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.1, 0.0, -1.0)] {
            let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), dir);
            let rec = hit_from(&ray, 1.0, Vec3::Z, &material);
            for _ in 0..200 {
                let result = material.scatter(&ray, &rec, &mut rng).unwrap();
                assert!((result.scattered.direction() - unit(dir)).length() < 1e-9);
                assert_eq!(result.attenuation, Color::ONE);
            }
        }
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        // Leaving glass at a steep angle: sin(theta) * 1.5 > 1
        let mut rng = StdRng::seed_from_u64(5);
        let material = Material::dielectric(1.5);
        let dir = unit(Vec3::new(1.0, 0.0, 1.0));
        let ray = Ray::new(Vec3::new(-1.0, 0.0, -1.0), dir);
        // Outward normal along the ray: we are inside
        let rec = hit_from(&ray, 2f64.sqrt(), Vec3::Z, &material);
        assert!(!rec.front_face);

        for _ in 0..100 {
            let result = material.scatter(&ray, &rec, &mut rng).unwrap();
            let expected = reflect(dir, rec.normal);
            assert!((result.scattered.direction() - expected).length() < 1e-12);
        }
    }

    #[test]
    fn test_schlick_reflectance() {
        // Normal incidence: r0
        let r0 = ((1.0 - 1.5f64) / (1.0 + 1.5)).powi(2);
        assert!((Dielectric::reflectance(1.0, 1.5) - r0).abs() < 1e-15);
        // Grazing: total reflection
        assert!((Dielectric::reflectance(0.0, 1.5) - 1.0).abs() < 1e-15);
        // Index matched at normal incidence reflects nothing
        assert_eq!(Dielectric::reflectance(1.0, 1.0), 0.0);
    }

    #[test]
    fn test_dielectric_tint() {
        let mut rng = StdRng::seed_from_u64(2);
        let tint = Color::new(0.9, 1.0, 0.9);
        let material = Material::Dielectric(Dielectric::tinted(1.5, tint));
        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 0.0, -1.0));
        let rec = hit_from(&ray, 1.0, Vec3::Z, &material);

        let result = material.scatter(&ray, &rec, &mut rng).unwrap();
        assert_eq!(result.attenuation, tint);
    }
}
