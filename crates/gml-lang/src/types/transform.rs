//! Affine object transform kept as a forward/inverse matrix pair.
//!
//! Each operation composes on the left of `m` and on the right of `inv`, so
//! `m · inv` stays the identity without ever inverting a general matrix.

use crate::error::Error;
use crate::types::vecmat::{
    M4, Vec3, m4_identity, m4_mul, m4_mul_vec3, m4_rotate_x, m4_rotate_y, m4_rotate_z,
    m4_scale_xyz, m4_translate, m4_transpose,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    m: M4,
    inv: M4,
}

impl Default for Transform {
    fn default() -> Self {
        Self { m: m4_identity(), inv: m4_identity() }
    }
}

impl Transform {
    pub fn identity() -> Self { Self::default() }

    fn compose(&mut self, forward: M4, backward: M4) {
        self.m = m4_mul(&forward, &self.m);
        self.inv = m4_mul(&self.inv, &backward);
    }

    pub fn translate(&mut self, tx: f64, ty: f64, tz: f64) {
        self.compose(m4_translate(tx, ty, tz), m4_translate(-tx, -ty, -tz));
    }

    /// A zero factor would collapse the object and has no inverse.
    pub fn scale(&mut self, sx: f64, sy: f64, sz: f64) -> Result<(), Error> {
        if sx == 0.0 || sy == 0.0 || sz == 0.0 {
            return Err(Error::domain("scale", format!("zero scale factor ({sx}, {sy}, {sz})")));
        }
        self.compose(m4_scale_xyz(sx, sy, sz), m4_scale_xyz(1.0 / sx, 1.0 / sy, 1.0 / sz));
        Ok(())
    }

    pub fn uscale(&mut self, s: f64) -> Result<(), Error> {
        self.scale(s, s, s)
    }

    // Angles in degrees.
    pub fn rotate_x(&mut self, deg: f64) {
        let a = deg.to_radians();
        self.compose(m4_rotate_x(a), m4_rotate_x(-a));
    }

    pub fn rotate_y(&mut self, deg: f64) {
        let a = deg.to_radians();
        self.compose(m4_rotate_y(a), m4_rotate_y(-a));
    }

    pub fn rotate_z(&mut self, deg: f64) {
        let a = deg.to_radians();
        self.compose(m4_rotate_z(a), m4_rotate_z(-a));
    }

    // ─── Application ─────────────────────────────────────────────────────────

    pub fn transform_point(&self, p: Vec3) -> Vec3 { m4_mul_vec3(&self.m, p, 1.0) }
    pub fn transform_vector(&self, v: Vec3) -> Vec3 { m4_mul_vec3(&self.m, v, 0.0) }

    /// Normals go through the transposed inverse so they stay perpendicular
    /// to surfaces under non-uniform scale. The result is not normalized.
    pub fn transform_normal(&self, n: Vec3) -> Vec3 {
        m4_mul_vec3(&m4_transpose(&self.inv), n, 0.0)
    }

    pub fn inv_transform_point(&self, p: Vec3) -> Vec3 { m4_mul_vec3(&self.inv, p, 1.0) }
    pub fn inv_transform_vector(&self, v: Vec3) -> Vec3 { m4_mul_vec3(&self.inv, v, 0.0) }
}
