use std::rc::Rc;

use crate::runtime::env::Env;
use crate::scene::Node;
use crate::scene::light::Light;
use crate::syntax::ast::Expr;
use crate::types::vecmat::Vec3;

#[derive(Debug, Clone)]
pub enum Value {
    Integer(i64),
    Real(f64),
    Boolean(bool),
    Str(String),
    Point(Vec3),
    Array(Rc<[Value]>),
    Closure(Rc<Closure>),
    /// Owned scene graph. Cloning deep-copies the node tree, which is what
    /// gives bound geometry its copy-on-read behavior.
    Geometry(Box<Node>),
    Light(Light),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_)  => "integer",
            Value::Real(_)     => "real",
            Value::Boolean(_)  => "boolean",
            Value::Str(_)      => "string",
            Value::Point(_)    => "point",
            Value::Array(_)    => "array",
            Value::Closure(_)  => "closure",
            Value::Geometry(_) => "object",
            Value::Light(_)    => "light",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────

/// A function literal together with the environment it was created in.
pub struct Closure {
    pub env: Env,
    pub body: Rc<[Expr]>,
}

impl Closure {
    pub fn new(env: Env, body: Rc<[Expr]>) -> Self {
        Self { env, body }
    }
}

impl std::fmt::Debug for Closure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Closure")
            .field("bindings", &self.env.len())
            .field("body", &self.body)
            .finish()
    }
}
