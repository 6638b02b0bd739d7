//! Closed-form ray intersection for the unit primitives, in object space.
//!
//! sphere:   radius 1 at the origin
//! cube:     [0,1]³
//! cylinder: radius 1 around the y axis, y in [0,1]
//! plane:    y = 0, front side +y

use std::f64::consts::TAU;

use super::{Crossing, Intersection, Primitive, Shape};
use crate::types::vecmat::Vec3;

/// Below this a direction component counts as parallel to a slab.
const PARALLEL_EPS: f64 = 1e-12;

// Cube faces.
pub const FACE_FRONT: i64 = 0;
pub const FACE_BACK: i64 = 1;
pub const FACE_LEFT: i64 = 2;
pub const FACE_RIGHT: i64 = 3;
pub const FACE_TOP: i64 = 4;
pub const FACE_BOTTOM: i64 = 5;

// Cylinder faces.
pub const FACE_SIDE: i64 = 0;
pub const FACE_CAP_TOP: i64 = 1;
pub const FACE_CAP_BOTTOM: i64 = 2;

/// Object-space crossing, `t` measured along the unit object-space direction.
#[derive(Debug, Clone, Copy)]
struct LocalHit {
    t: f64,
    face: i64,
    crossing: Crossing,
}

/// Parametric interval with the faces that bound it.
#[derive(Debug, Clone, Copy)]
struct Span {
    near: f64,
    near_face: i64,
    far: f64,
    far_face: i64,
}

impl Span {
    const ALL: Span = Span { near: f64::NEG_INFINITY, near_face: -1, far: f64::INFINITY, far_face: -1 };

    /// Tightest entry, loosest exit.
    fn clip(self, o: Span) -> Option<Span> {
        let (near, near_face) = if o.near > self.near { (o.near, o.near_face) } else { (self.near, self.near_face) };
        let (far, far_face) = if o.far < self.far { (o.far, o.far_face) } else { (self.far, self.far_face) };
        (near <= far).then_some(Span { near, near_face, far, far_face })
    }

    fn hits(self) -> Vec<LocalHit> {
        vec![
            LocalHit { t: self.near, face: self.near_face, crossing: Crossing::Entry },
            LocalHit { t: self.far, face: self.far_face, crossing: Crossing::Exit },
        ]
    }
}

/// Interval where `o + t·d` lies between two parallel planes `lo ≤ x ≤ hi`
/// along one axis. `None` when the ray runs parallel outside them.
fn slab(o: f64, d: f64, lo_face: i64, hi_face: i64) -> Option<Span> {
    if d.abs() < PARALLEL_EPS {
        return (0.0..=1.0).contains(&o).then_some(Span::ALL);
    }
    let t_lo = (0.0 - o) / d;
    let t_hi = (1.0 - o) / d;
    Some(if d > 0.0 {
        Span { near: t_lo, near_face: lo_face, far: t_hi, far_face: hi_face }
    } else {
        Span { near: t_hi, near_face: hi_face, far: t_lo, far_face: lo_face }
    })
}

// ─── Per-shape solvers ────────────────────────────────────────────────────────

fn sphere(o: Vec3, d: Vec3) -> Vec<LocalHit> {
    let b = o.dot(d);
    let c = o.dot(o) - 1.0;
    let disc = b * b - c;
    if disc < 0.0 {
        return Vec::new();
    }
    let q = disc.sqrt();
    Span { near: -b - q, near_face: 0, far: -b + q, far_face: 0 }.hits()
}

fn cube(o: Vec3, d: Vec3) -> Vec<LocalHit> {
    slab(o.x, d.x, FACE_LEFT, FACE_RIGHT)
        .and_then(|s| s.clip(slab(o.y, d.y, FACE_BOTTOM, FACE_TOP)?))
        .and_then(|s| s.clip(slab(o.z, d.z, FACE_FRONT, FACE_BACK)?))
        .map(Span::hits)
        .unwrap_or_default()
}

/// Curved side first, then clipped by the cap slab. A ray along the axis
/// only sees the caps; a ray orthogonal to it only sees the side.
fn cylinder(o: Vec3, d: Vec3) -> Vec<LocalHit> {
    let a = d.x * d.x + d.z * d.z;
    let side = if a < PARALLEL_EPS {
        if o.x * o.x + o.z * o.z > 1.0 { return Vec::new(); }
        Span::ALL
    } else {
        let b = o.x * d.x + o.z * d.z;
        let c = o.x * o.x + o.z * o.z - 1.0;
        let disc = b * b - a * c;
        if disc < 0.0 { return Vec::new(); }
        let q = disc.sqrt();
        Span { near: (-b - q) / a, near_face: FACE_SIDE, far: (-b + q) / a, far_face: FACE_SIDE }
    };
    slab(o.y, d.y, FACE_CAP_BOTTOM, FACE_CAP_TOP)
        .and_then(|caps| side.clip(caps))
        .map(Span::hits)
        .unwrap_or_default()
}

/// A zero-thickness pair at the crossing point; the exit side faces down.
fn plane(o: Vec3, d: Vec3) -> Vec<LocalHit> {
    if d.y.abs() < PARALLEL_EPS {
        return Vec::new();
    }
    let t = -o.y / d.y;
    Span { near: t, near_face: 0, far: t, far_face: 0 }.hits()
}

fn local_normal(shape: Shape, face: i64, p: Vec3) -> Vec3 {
    match (shape, face) {
        (Shape::Sphere, _)                  => p,
        (Shape::Cube, FACE_FRONT)           => Vec3::new(0.0, 0.0, -1.0),
        (Shape::Cube, FACE_BACK)            => Vec3::new(0.0, 0.0, 1.0),
        (Shape::Cube, FACE_LEFT)            => Vec3::new(-1.0, 0.0, 0.0),
        (Shape::Cube, FACE_RIGHT)           => Vec3::new(1.0, 0.0, 0.0),
        (Shape::Cube, FACE_TOP)             => Vec3::new(0.0, 1.0, 0.0),
        (Shape::Cube, _)                    => Vec3::new(0.0, -1.0, 0.0),
        (Shape::Cylinder, FACE_CAP_TOP)     => Vec3::new(0.0, 1.0, 0.0),
        (Shape::Cylinder, FACE_CAP_BOTTOM)  => Vec3::new(0.0, -1.0, 0.0),
        (Shape::Cylinder, _)                => Vec3::new(p.x, 0.0, p.z),
        (Shape::Cone, _) | (Shape::Plane, _) => Vec3::new(0.0, 1.0, 0.0),
    }
}

/// Longitude around the y axis mapped to [0, 1).
fn longitude(p: Vec3) -> f64 {
    (p.x.atan2(p.z) / TAU).rem_euclid(1.0)
}

/// Surface parameters of an object-space point on the given face.
pub fn surface_uv(shape: Shape, face: i64, p: Vec3) -> (f64, f64) {
    match (shape, face) {
        (Shape::Sphere, _) => (longitude(p), (p.y + 1.0) / 2.0),
        (Shape::Cube, FACE_FRONT | FACE_BACK) => (p.x, p.y),
        (Shape::Cube, FACE_LEFT | FACE_RIGHT) => (p.z, p.y),
        (Shape::Cube, _) => (p.x, p.z),
        (Shape::Cylinder | Shape::Cone, FACE_SIDE) => (longitude(p), p.y),
        (Shape::Cylinder | Shape::Cone, _) => ((p.x + 1.0) / 2.0, (p.z + 1.0) / 2.0),
        (Shape::Plane, _) => (p.x, p.z),
    }
}

// ─── World-space wrapper ──────────────────────────────────────────────────────

impl Primitive {
    /// Crossings of the whole line `origin + t·dir`, sorted by `t`. The ray
    /// is solved in object space with a normalized direction; dividing by
    /// that direction's original length brings `t` back to world units.
    pub fn intersect(&self, origin: Vec3, dir: Vec3) -> Vec<Intersection<'_>> {
        let o = self.transform.inv_transform_point(origin);
        let raw = self.transform.inv_transform_vector(dir);
        let len = raw.length();
        let d = raw * (1.0 / len);

        let hits = match self.shape {
            Shape::Sphere   => sphere(o, d),
            Shape::Cube     => cube(o, d),
            Shape::Cylinder => cylinder(o, d),
            Shape::Plane    => plane(o, d),
            Shape::Cone     => Vec::new(),
        };

        hits.into_iter()
            .map(|h| {
                let local = o + d * h.t;
                let t = h.t / len;
                let mut normal = local_normal(self.shape, h.face, local);
                if self.shape == Shape::Plane && h.crossing == Crossing::Exit {
                    normal = -normal;
                }
                Intersection {
                    t,
                    point: origin + dir * t,
                    local,
                    normal: self.transform.transform_normal(normal).normalize(),
                    primitive: self,
                    crossing: h.crossing,
                    face: h.face,
                }
            })
            .collect()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
