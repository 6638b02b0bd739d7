use std::rc::Rc;

use crate::syntax::operator::Operator;

/// One node of a GML program. Parsing is purely structural, so the tree
/// mirrors the token stream with `{...}` and `[...]` regions nested.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Integer(i64),
    Real(f64),
    Boolean(bool),
    String(String),
    Identifier(String),
    Binder(String),
    Operator(Operator),
    /// `{ ... }`, becomes a closure when evaluated.
    Function(Rc<[Expr]>),
    /// `[ ... ]`, evaluated on a fresh stack into an array.
    Array(Vec<Expr>),
}

impl Expr {
    /// Total node count, nested bodies included.
    pub fn size(&self) -> usize {
        match self {
            Expr::Function(body) => 1 + body.iter().map(Expr::size).sum::<usize>(),
            Expr::Array(items) => 1 + items.iter().map(Expr::size).sum::<usize>(),
            _ => 1,
        }
    }
}
