//! Scene graph: primitives carrying a surface closure and a transform, and
//! binary CSG nodes owning their two children.

pub mod csg;
pub mod light;
pub mod primitives;

use std::rc::Rc;

use crate::error::Error;
use crate::runtime::value::Closure;
use crate::types::transform::Transform;
use crate::types::vecmat::Vec3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Sphere,
    Cube,
    Cylinder,
    /// Constructible, but intersection is unsupported: it never reports hits.
    Cone,
    Plane,
}

#[derive(Debug, Clone)]
pub struct Primitive {
    pub shape: Shape,
    pub surface: Rc<Closure>,
    pub transform: Transform,
}

#[derive(Debug, Clone)]
pub enum Node {
    Primitive(Primitive),
    Union(Box<Node>, Box<Node>),
    Intersect(Box<Node>, Box<Node>),
    Difference(Box<Node>, Box<Node>),
}

/// Direction of travel through a solid's boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossing {
    Entry,
    Exit,
}

impl Crossing {
    pub fn from_inside(inside: bool) -> Self {
        if inside { Crossing::Entry } else { Crossing::Exit }
    }
}

/// One boundary crossing along a ray, in world units.
///
/// `normal` is the unit outward normal of the solid the event belongs to,
/// so it points against the ray on an entry and along it on an exit.
#[derive(Debug, Clone)]
pub struct Intersection<'a> {
    pub t: f64,
    pub point: Vec3,
    pub local: Vec3,
    pub normal: Vec3,
    pub primitive: &'a Primitive,
    pub crossing: Crossing,
    pub face: i64,
}

impl Intersection<'_> {
    /// Face id and (u, v) handed to the surface closure.
    pub fn surface_coords(&self) -> (i64, f64, f64) {
        let (u, v) = primitives::surface_uv(self.primitive.shape, self.face, self.local);
        (self.face, u, v)
    }
}

// ─────────────────────────────────────────────────────────────────────────────

impl Node {
    pub fn primitive(shape: Shape, surface: Rc<Closure>) -> Self {
        Node::Primitive(Primitive { shape, surface, transform: Transform::identity() })
    }

    pub fn translate(&mut self, tx: f64, ty: f64, tz: f64) {
        self.each_transform(&mut |t| t.translate(tx, ty, tz));
    }

    pub fn scale(&mut self, sx: f64, sy: f64, sz: f64) -> Result<(), Error> {
        let mut result = Ok(());
        self.each_transform(&mut |t| if result.is_ok() { result = t.scale(sx, sy, sz) });
        result
    }

    pub fn uscale(&mut self, s: f64) -> Result<(), Error> {
        self.scale(s, s, s)
    }

    pub fn rotate_x(&mut self, deg: f64) {
        self.each_transform(&mut |t| t.rotate_x(deg));
    }

    pub fn rotate_y(&mut self, deg: f64) {
        self.each_transform(&mut |t| t.rotate_y(deg));
    }

    pub fn rotate_z(&mut self, deg: f64) {
        self.each_transform(&mut |t| t.rotate_z(deg));
    }

    /// Transforming a CSG node transforms both operands, which is the same
    /// as composing onto each leaf's matrix.
    fn each_transform(&mut self, f: &mut dyn FnMut(&mut Transform)) {
        match self {
            Node::Primitive(p) => f(&mut p.transform),
            Node::Union(a, b) | Node::Intersect(a, b) | Node::Difference(a, b) => {
                a.each_transform(f);
                b.each_transform(f);
            }
        }
    }

    /// All crossings of the ray's full line with this node, sorted by `t`.
    pub fn intersect(&self, origin: Vec3, dir: Vec3) -> Vec<Intersection<'_>> {
        match self {
            Node::Primitive(p) => p.intersect(origin, dir),
            Node::Union(a, b) => {
                csg::combine(a.intersect(origin, dir), b.intersect(origin, dir), |x, y| x || y)
            }
            Node::Intersect(a, b) => {
                csg::combine(a.intersect(origin, dir), b.intersect(origin, dir), |x, y| x && y)
            }
            Node::Difference(a, b) => {
                csg::combine(a.intersect(origin, dir), b.intersect(origin, dir), |x, y| x && !y)
            }
        }
    }

    pub fn primitive_count(&self) -> usize {
        match self {
            Node::Primitive(_) => 1,
            Node::Union(a, b) | Node::Intersect(a, b) | Node::Difference(a, b) => {
                a.primitive_count() + b.primitive_count()
            }
        }
    }
}
