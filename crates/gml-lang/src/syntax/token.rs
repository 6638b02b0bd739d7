use crate::syntax::operator::Operator;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    Integer(i64),
    Real(f64),
    Boolean(bool),
    String(String),

    // Names
    Identifier(String),
    Binder(String),   // `/name`, stored without the slash
    Operator(Operator),

    // Delimiters
    BeginFunction,    // {
    EndFunction,      // }
    BeginArray,       // [
    EndArray,         // ]
}

/// Maps a bare word to its operator or boolean token, or returns `Identifier`.
pub fn word_token(s: String) -> TokenKind {
    match s.as_str() {
        "true"  => TokenKind::Boolean(true),
        "false" => TokenKind::Boolean(false),
        _ => match Operator::from_name(&s) {
            Some(op) => TokenKind::Operator(op),
            None     => TokenKind::Identifier(s),
        },
    }
}

// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, line: usize, column: usize) -> Self {
        Self { kind, line, column }
    }
}
