//! Pure vector and matrix math. No Value types, no errors.
//! Matrices are row-major: element at (row, col) = data[row * 4 + col].

use std::ops::{Add, Mul, Neg, Sub};

// ─── Vec3 ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, o: Vec3) -> f64 {
        self.x * o.x + self.y * o.y + self.z * o.z
    }

    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn normalize(self) -> Vec3 {
        self * (1.0 / self.length())
    }

    /// Component-wise product, used to tint colors.
    pub fn cmul(self, o: Vec3) -> Vec3 {
        Vec3::new(self.x * o.x, self.y * o.y, self.z * o.z)
    }

    /// Mirror `self` about the unit normal `n`.
    pub fn reflect(self, n: Vec3) -> Vec3 {
        self - n * (2.0 * self.dot(n))
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, o: Vec3) -> Vec3 { Vec3::new(self.x + o.x, self.y + o.y, self.z + o.z) }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, o: Vec3) -> Vec3 { Vec3::new(self.x - o.x, self.y - o.y, self.z - o.z) }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;
    fn mul(self, s: f64) -> Vec3 { Vec3::new(self.x * s, self.y * s, self.z * s) }
}

impl Neg for Vec3 {
    type Output = Vec3;
    fn neg(self) -> Vec3 { Vec3::new(-self.x, -self.y, -self.z) }
}

// ─── Mat4 ─────────────────────────────────────────────────────────────────────

pub type M4 = [f64; 16];

pub fn m4_identity() -> M4 {
    [1., 0., 0., 0.,
     0., 1., 0., 0.,
     0., 0., 1., 0.,
     0., 0., 0., 1.]
}

pub fn m4_mul(a: &M4, b: &M4) -> M4 {
    let mut c = [0.0f64; 16];
    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                c[i * 4 + j] += a[i * 4 + k] * b[k * 4 + j];
            }
        }
    }
    c
}

/// Apply `m` to the homogeneous vector (v, w) and drop the w component.
pub fn m4_mul_vec3(m: &M4, v: Vec3, w: f64) -> Vec3 {
    Vec3::new(
        m[ 0]*v.x + m[ 1]*v.y + m[ 2]*v.z + m[ 3]*w,
        m[ 4]*v.x + m[ 5]*v.y + m[ 6]*v.z + m[ 7]*w,
        m[ 8]*v.x + m[ 9]*v.y + m[10]*v.z + m[11]*w,
    )
}

pub fn m4_transpose(m: &M4) -> M4 {
    let mut t = [0.0f64; 16];
    for i in 0..4 {
        for j in 0..4 {
            t[i * 4 + j] = m[j * 4 + i];
        }
    }
    t
}

// ─── Mat4 graphics constructors ──────────────────────────────────────────────

pub fn m4_translate(tx: f64, ty: f64, tz: f64) -> M4 {
    [1., 0., 0., tx,
     0., 1., 0., ty,
     0., 0., 1., tz,
     0., 0., 0., 1.]
}

pub fn m4_scale_xyz(sx: f64, sy: f64, sz: f64) -> M4 {
    [sx,  0.,  0.,  0.,
     0.,  sy,  0.,  0.,
     0.,  0.,  sz,  0.,
     0.,  0.,  0.,  1.]
}

pub fn m4_rotate_x(angle: f64) -> M4 {
    let (s, c) = angle.sin_cos();
    [1., 0.,  0., 0.,
     0., c,  -s,  0.,
     0., s,   c,  0.,
     0., 0.,  0., 1.]
}

pub fn m4_rotate_y(angle: f64) -> M4 {
    let (s, c) = angle.sin_cos();
    [ c,  0., s,  0.,
      0., 1., 0., 0.,
     -s,  0., c,  0.,
      0., 0., 0., 1.]
}

pub fn m4_rotate_z(angle: f64) -> M4 {
    let (s, c) = angle.sin_cos();
    [c, -s,  0., 0.,
     s,  c,  0., 0.,
     0., 0., 1., 0.,
     0., 0., 0., 1.]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_of_orthogonal_axes_is_zero() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 1.0, 0.0);
        assert_eq!(x.dot(y), 0.0);
        assert_eq!(x.dot(x), 1.0);
    }

    #[test]
    fn normalize_gives_unit_length() {
        let v = Vec3::new(3.0, 4.0, 12.0).normalize();
        assert!((v.length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn reflect_flips_normal_component() {
        let d = Vec3::new(1.0, -1.0, 0.0);
        assert_eq!(d.reflect(Vec3::new(0.0, 1.0, 0.0)), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn translate_moves_points_not_vectors() {
        let m = m4_translate(1.0, 2.0, 3.0);
        assert_eq!(m4_mul_vec3(&m, Vec3::ZERO, 1.0), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(m4_mul_vec3(&m, Vec3::new(1.0, 0.0, 0.0), 0.0), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn transpose_twice_is_identity() {
        let m = m4_mul(&m4_rotate_x(0.3), &m4_translate(1.0, 2.0, 3.0));
        assert_eq!(m4_transpose(&m4_transpose(&m)), m);
        // row 3, column 1 of the transpose is row 1, column 3 of the original
        assert_eq!(m4_transpose(&m)[13], m[7]);
    }
}
