//! Vector algebra on top of `glam::DVec3`.
//!
//! Arithmetic (`+`, `-`, `*`, `/`, negation), `dot`, `cross`, `length`
//! and `length_squared` come straight from glam. This module adds the
//! operations the tracer needs that glam does not spell the same way.
//!
//! Everything here is pure except [`translate`] and [`unscale_in_place`],
//! which exist for pixel accumulation loops only.

use crate::Vec3;

/// Components with absolute value below this count as zero in [`near_zero`].
pub const NEAR_ZERO_EPSILON: f64 = 1e-8;

/// Sum `v` and every vector in `others`.
///
/// `add(a, &[b, c])` is `a + b + c`.
#[inline]
pub fn add(v: Vec3, others: &[Vec3]) -> Vec3 {
    others.iter().fold(v, |acc, o| acc + *o)
}

/// Subtract every vector in `others` from `v`.
///
/// `subtract(a, &[b, c])` is `a - b - c`.
#[inline]
pub fn subtract(v: Vec3, others: &[Vec3]) -> Vec3 {
    others.iter().fold(v, |acc, o| acc - *o)
}

/// Multiply every component by `s`.
#[inline]
pub fn scaled(v: Vec3, s: f64) -> Vec3 {
    v * s
}

/// Divide every component by `s`. `s` must be nonzero.
#[inline]
pub fn unscaled(v: Vec3, s: f64) -> Vec3 {
    debug_assert!(s != 0.0, "unscaled by zero");
    v / s
}

/// Component-wise (Hadamard) product, used for color attenuation.
#[inline]
pub fn multiply(a: Vec3, b: Vec3) -> Vec3 {
    a * b
}

/// Normalize `v` to unit length.
///
/// Callers must guarantee `v` has nonzero length. Debug builds assert;
/// release builds return NaN components, which every later comparison
/// treats as "no hit".
#[inline]
pub fn unit(v: Vec3) -> Vec3 {
    let len = v.length();
    debug_assert!(len > 0.0, "unit() of a zero-length vector");
    v / len
}

/// True when every component is below [`NEAR_ZERO_EPSILON`] in magnitude.
#[inline]
pub fn near_zero(v: Vec3) -> bool {
    v.x.abs() < NEAR_ZERO_EPSILON && v.y.abs() < NEAR_ZERO_EPSILON && v.z.abs() < NEAR_ZERO_EPSILON
}

/// Mirror `v` about the unit normal `n`: `v - 2 (v . n) n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract the unit vector `uv` through a surface with unit normal `n`.
///
/// `n` points against `uv`; `eta_ratio` is the incident index over the
/// transmitted index. The result is split into the components
/// perpendicular and parallel to `n` (Snell's law). Callers are
/// responsible for checking total internal reflection first.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, eta_ratio: f64) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = eta_ratio * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// Add `by` to `v` in place.
#[inline]
pub fn translate(v: &mut Vec3, by: Vec3) {
    *v += by;
}

/// Divide `v` by `s` in place. `s` must be nonzero.
#[inline]
pub fn unscale_in_place(v: &mut Vec3, s: f64) {
    debug_assert!(s != 0.0, "unscale_in_place by zero");
    *v /= s;
}

/// Linear interpolation from `a` (at `t = 0`) to `b` (at `t = 1`).
#[inline]
pub fn lerp(a: Vec3, b: Vec3, t: f64) -> Vec3 {
    (1.0 - t) * a + t * b
}
