pub mod error;
pub mod render;
pub mod runtime;
pub mod scene;
pub mod syntax;
pub mod types;

pub use error::{Error, ErrorClass, ErrorCode};
pub use render::{RenderBackend, RenderJob, SurfaceProps, SurfaceShader};
pub use runtime::env::Env;
pub use runtime::value::{Closure, Value};
pub use scene::light::Light;
pub use scene::{Node, Shape};
pub use types::vecmat::Vec3;

use log::debug;

use crate::runtime::interpreter::Interpreter;
use crate::syntax::ast::Expr;

// ─── Public API types ─────────────────────────────────────────────────────────

/// A parsed GML program. Produced by `compile`.
#[derive(Debug, Clone)]
pub struct Program {
    body: Vec<Expr>,
}

/// Final state of a successful evaluation.
#[derive(Debug)]
pub struct Evaluation {
    pub env: Env,
    pub stack: Vec<Value>,
}

// ─── Public API ───────────────────────────────────────────────────────────────

/// Lex and parse source text.
pub fn compile(source: &str) -> Result<Program, Error> {
    let tokens = syntax::lexer::Lexer::new(source).tokenize()?;
    debug!("lexed {} tokens", tokens.len());
    let body = syntax::parser::Parser::new(tokens).parse()?;
    debug!("parsed {} nodes", body.iter().map(Expr::size).sum::<usize>());
    Ok(Program { body })
}

/// Compile and evaluate in one step. `render` fails with `Unsupported`
/// unless a backend is given.
pub fn evaluate(source: &str, backend: Option<&dyn RenderBackend>) -> Result<Evaluation, Error> {
    let program = compile(source)?;
    match backend {
        Some(b) => program.evaluate_with(b),
        None => program.evaluate(),
    }
}

impl Program {
    /// Evaluate with an empty environment and stack, without a render backend.
    pub fn evaluate(&self) -> Result<Evaluation, Error> {
        self.run(Interpreter::new())
    }

    pub fn evaluate_with(&self, backend: &dyn RenderBackend) -> Result<Evaluation, Error> {
        self.run(Interpreter::new().with_backend(backend))
    }

    fn run(&self, mut interp: Interpreter<'_>) -> Result<Evaluation, Error> {
        let env = interp.run(&self.body, Env::new())?;
        let stack = interp.into_stack();
        debug!("evaluation finished: {} values on the stack, {} bindings", stack.len(), env.len());
        Ok(Evaluation { env, stack })
    }
}
