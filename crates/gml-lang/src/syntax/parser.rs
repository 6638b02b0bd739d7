use crate::error::{Error, ErrorCode};
use crate::syntax::ast::Expr;
use crate::syntax::token::{Token, TokenKind};

/// Recursive-descent over the flat token list. Recursion depth follows the
/// `{`/`[` nesting depth of the input.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

/// What closes the region currently being parsed.
#[derive(Clone, Copy, PartialEq)]
enum Region {
    TopLevel,
    Function,
    Array,
}

impl Region {
    fn closer(self) -> &'static str {
        match self {
            Region::TopLevel => "end of input",
            Region::Function => "`}`",
            Region::Array    => "`]`",
        }
    }
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    pub fn parse(mut self) -> Result<Vec<Expr>, Error> {
        if self.tokens.is_empty() {
            return Err(Error::syntax(ErrorCode::P002, 1, 1, "empty program"));
        }
        self.parse_region(Region::TopLevel)
    }

    fn parse_region(&mut self, region: Region) -> Result<Vec<Expr>, Error> {
        let mut body = Vec::new();

        while let Some(tok) = self.advance() {
            let expr = match tok.kind {
                TokenKind::Integer(i)    => Expr::Integer(i),
                TokenKind::Real(r)       => Expr::Real(r),
                TokenKind::Boolean(b)    => Expr::Boolean(b),
                TokenKind::String(s)     => Expr::String(s),
                TokenKind::Identifier(n) => Expr::Identifier(n),
                TokenKind::Binder(n)     => Expr::Binder(n),
                TokenKind::Operator(op)  => Expr::Operator(op),

                TokenKind::BeginFunction => Expr::Function(self.parse_region(Region::Function)?.into()),
                TokenKind::BeginArray    => Expr::Array(self.parse_region(Region::Array)?),

                TokenKind::EndFunction if region == Region::Function => return Ok(body),
                TokenKind::EndArray    if region == Region::Array    => return Ok(body),
                TokenKind::EndFunction => return Err(unexpected_closer("}", &tok, region)),
                TokenKind::EndArray    => return Err(unexpected_closer("]", &tok, region)),
            };
            body.push(expr);
        }

        if region == Region::TopLevel {
            Ok(body)
        } else {
            let (line, column) = self.end_position();
            Err(Error::syntax(ErrorCode::P001, line, column, format!(
                "unexpected end of input, expected {}", region.closer()
            )))
        }
    }

    // ─── Helpers ─────────────────────────────────────────────────────────────

    fn advance(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() { self.pos += 1; }
        tok
    }

    fn end_position(&self) -> (usize, usize) {
        self.tokens.last().map_or((1, 1), |t| (t.line, t.column))
    }
}

fn unexpected_closer(closer: &str, tok: &Token, region: Region) -> Error {
    Error::syntax(ErrorCode::P001, tok.line, tok.column, format!(
        "unexpected `{closer}`, expected {}", region.closer()
    ))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
