//! Stack evaluator. Walks a token tree left to right against one operand
//! stack; the environment is threaded through as a persistent value.
//! Value operators are dispatched to `builtins`; the three that need the
//! stack or the environment (`apply`, `if`, `render`) are handled here.

use std::mem;
use std::rc::Rc;

use log::{debug, trace};

use crate::error::Error;
use crate::render::{RenderBackend, RenderJob, SurfaceProps, SurfaceShader};
use crate::runtime::builtins::{self, as_closure, as_int, as_point, as_real, type_error};
use crate::runtime::env::Env;
use crate::runtime::value::{Closure, Value};
use crate::syntax::ast::Expr;
use crate::syntax::operator::Operator;
use crate::types::vecmat::Vec3;

#[derive(Default)]
pub struct Interpreter<'a> {
    stack: Vec<Value>,
    backend: Option<&'a dyn RenderBackend>,
}

impl<'a> Interpreter<'a> {
    pub fn new() -> Self { Self::default() }

    pub fn with_backend(mut self, backend: &'a dyn RenderBackend) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn into_stack(self) -> Vec<Value> { self.stack }

    /// Evaluate a whole program in `env`, returning the environment as it
    /// stands after the last token.
    pub fn run(&mut self, program: &[Expr], env: Env) -> Result<Env, Error> {
        self.eval(program, env)
    }

    // ─── Evaluation ───────────────────────────────────────────────────────────

    fn eval(&mut self, body: &[Expr], mut env: Env) -> Result<Env, Error> {
        for expr in body {
            match expr {
                Expr::Integer(i) => self.stack.push(Value::Integer(*i)),
                Expr::Real(r)    => self.stack.push(Value::Real(*r)),
                Expr::Boolean(b) => self.stack.push(Value::Boolean(*b)),
                Expr::String(s)  => self.stack.push(Value::Str(s.clone())),
                Expr::Identifier(name) => {
                    let v = env.get(name).cloned().ok_or_else(|| Error::Name(name.clone()))?;
                    self.stack.push(v);
                }
                Expr::Binder(name) => {
                    let v = self.stack.pop().ok_or(Error::StackUnderflow("bind"))?;
                    env = env.bind(name.as_str(), v);
                }
                Expr::Function(body) => {
                    let closure = Closure::new(env.clone(), Rc::clone(body));
                    self.stack.push(Value::Closure(Rc::new(closure)));
                }
                Expr::Array(items) => {
                    let outer = mem::take(&mut self.stack);
                    let result = self.eval(items, env.clone());
                    let inner = mem::replace(&mut self.stack, outer);
                    result?;
                    self.stack.push(Value::Array(inner.into()));
                }
                Expr::Operator(op) => self.operator(*op)?,
            }
        }
        Ok(env)
    }

    fn operator(&mut self, op: Operator) -> Result<(), Error> {
        if self.stack.len() < op.arity() {
            return Err(Error::StackUnderflow(op.name()));
        }
        match op {
            Operator::Apply => {
                let closure = as_closure(op, self.pop(op)?)?;
                self.call(&closure)
            }
            Operator::If => {
                let else_branch = as_closure(op, self.pop(op)?)?;
                let then_branch = as_closure(op, self.pop(op)?)?;
                let closure = match self.pop(op)? {
                    Value::Boolean(true) => then_branch,
                    Value::Boolean(false) => else_branch,
                    other => return Err(type_error(op, "boolean", &other)),
                };
                self.call(&closure)
            }
            Operator::Render => self.render(),
            _ => {
                let args = self.stack.split_off(self.stack.len() - op.arity());
                let v = builtins::call(op, args)?;
                self.stack.push(v);
                Ok(())
            }
        }
    }

    /// Run a closure body against the current stack. Bindings it makes are
    /// dropped with its environment when it returns.
    fn call(&mut self, closure: &Closure) -> Result<(), Error> {
        self.eval(&closure.body, closure.env.clone()).map(drop)
    }

    fn pop(&mut self, op: Operator) -> Result<Value, Error> {
        self.stack.pop().ok_or(Error::StackUnderflow(op.name()))
    }

    // ─── Render ───────────────────────────────────────────────────────────────

    fn render(&mut self) -> Result<(), Error> {
        let op = Operator::Render;
        let args = self.stack.split_off(self.stack.len() - op.arity());
        let [ambient, lights, scene, depth, fov, width, height, output]: [Value; 8] =
            args.try_into().map_err(|_| Error::StackUnderflow(op.name()))?;

        let lights = match lights {
            Value::Array(items) => items
                .iter()
                .map(|l| match l {
                    Value::Light(light) => Ok(light.clone()),
                    other => Err(type_error(op, "light", other)),
                })
                .collect::<Result<Vec<_>, _>>()?,
            other => return Err(type_error(op, "array", &other)),
        };
        let scene = match scene {
            Value::Geometry(node) => *node,
            other => return Err(type_error(op, "object", &other)),
        };
        let output = match output {
            Value::Str(s) => s,
            other => return Err(type_error(op, "string", &other)),
        };
        let job = RenderJob {
            ambient: as_point(op, &ambient)?,
            lights,
            scene,
            depth: non_negative(as_int(op, &depth)?, "depth")?,
            fov: as_real(op, &fov)?,
            width: non_negative(as_int(op, &width)?, "width")?,
            height: non_negative(as_int(op, &height)?, "height")?,
            output,
        };
        let fits = job
            .width
            .checked_mul(job.height)
            .and_then(|n| n.checked_mul(mem::size_of::<Vec3>()))
            .is_some_and(|bytes| bytes <= isize::MAX as usize);
        if !fits {
            return Err(Error::domain(
                "render",
                format!("image size {}x{} is too large", job.width, job.height),
            ));
        }

        let backend = self
            .backend
            .ok_or_else(|| Error::Unsupported("render: no render backend attached".into()))?;
        debug!(
            "render {} ({}x{}, depth {}, {} lights, {} primitives)",
            job.output, job.width, job.height, job.depth, job.lights.len(), job.scene.primitive_count()
        );
        backend.render(&job, self)
    }

    fn surface_result(&mut self) -> Result<SurfaceProps, Error> {
        let n = surface_real(self.stack.pop())?;
        let ks = surface_real(self.stack.pop())?;
        let kd = surface_real(self.stack.pop())?;
        let color = match self.stack.pop() {
            Some(Value::Point(p)) => p,
            Some(other) => return Err(surface_type("point", &other)),
            None => return Err(Error::StackUnderflow("surface")),
        };
        Ok(SurfaceProps { color, kd, ks, n })
    }
}

fn surface_real(v: Option<Value>) -> Result<f64, Error> {
    match v {
        Some(Value::Real(r)) => Ok(r),
        Some(other) => Err(surface_type("real", &other)),
        None => Err(Error::StackUnderflow("surface")),
    }
}

fn surface_type(expected: &'static str, found: &Value) -> Error {
    Error::Type { op: "surface", expected, found: found.type_name() }
}

fn non_negative<T: TryFrom<i64>>(v: i64, what: &str) -> Result<T, Error> {
    T::try_from(v).map_err(|_| Error::domain("render", format!("{what} must be non-negative, got {v}")))
}

// ─── Surface evaluation ───────────────────────────────────────────────────────

impl SurfaceShader for Interpreter<'_> {
    /// Runs the closure on a private stack holding `face u v` and reads back
    /// `color kd ks n`. The caller's stack is restored either way.
    fn shade(&mut self, surface: &Closure, face: i64, u: f64, v: f64) -> Result<SurfaceProps, Error> {
        trace!("shade face {face} at ({u:.3}, {v:.3})");
        let saved = mem::replace(
            &mut self.stack,
            vec![Value::Integer(face), Value::Real(u), Value::Real(v)],
        );
        let result = self.call(surface).and_then(|_| self.surface_result());
        self.stack = saved;
        result
    }
}
