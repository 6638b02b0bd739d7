use thiserror::Error as ThisError;

/// Error codes prefixed by phase: L = lexer, P = parser, R = runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Lexer
    L001, // unexpected character
    L002, // reserved word used as binder
    L003, // malformed literal

    // Parser
    P001, // unbalanced delimiter
    P002, // empty program

    // Runtime
    R001, // unbound identifier
    R002, // operand has wrong type
    R003, // array index out of range
    R004, // stack underflow
    R005, // unsupported feature
    R006, // malformed numeric input
    R007, // render backend failure
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::L001 => "L001",
            Self::L002 => "L002",
            Self::L003 => "L003",
            Self::P001 => "P001",
            Self::P002 => "P002",
            Self::R001 => "R001",
            Self::R002 => "R002",
            Self::R003 => "R003",
            Self::R004 => "R004",
            Self::R005 => "R005",
            Self::R006 => "R006",
            Self::R007 => "R007",
        }
    }
}

/// Coarse classification reported per file by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Syntax,
    Runtime,
    Subscript,
    Unsupported,
}

impl std::fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Syntax      => "syntax error",
            Self::Runtime     => "runtime error",
            Self::Subscript   => "subscript error",
            Self::Unsupported => "unimplemented feature",
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────

/// Every failure a GML program can hit. All of them abort the evaluation.
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum Error {
    #[error("[{}] {line}:{column}: {message}", .code.as_str())]
    Lex { code: ErrorCode, line: usize, column: usize, message: String },

    #[error("[{}] {line}:{column}: {message}", .code.as_str())]
    Syntax { code: ErrorCode, line: usize, column: usize, message: String },

    #[error("[R001] unbound identifier `{0}`")]
    Name(String),

    #[error("[R002] `{op}` expects {expected}, got {found}")]
    Type { op: &'static str, expected: &'static str, found: &'static str },

    #[error("[R003] index {index} out of range for array of length {len}")]
    Subscript { index: i64, len: usize },

    #[error("[R004] stack underflow in `{0}`")]
    StackUnderflow(&'static str),

    #[error("[R005] unsupported: {0}")]
    Unsupported(String),

    #[error("[R006] `{op}`: {message}")]
    Domain { op: &'static str, message: String },

    #[error("[R007] render failed: {0}")]
    Render(String),
}

impl Error {
    pub fn lex(code: ErrorCode, line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::Lex { code, line, column, message: message.into() }
    }

    pub fn syntax(code: ErrorCode, line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::Syntax { code, line, column, message: message.into() }
    }

    pub fn domain(op: &'static str, message: impl Into<String>) -> Self {
        Self::Domain { op, message: message.into() }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Lex { code, .. } | Self::Syntax { code, .. } => *code,
            Self::Name(_)           => ErrorCode::R001,
            Self::Type { .. }       => ErrorCode::R002,
            Self::Subscript { .. }  => ErrorCode::R003,
            Self::StackUnderflow(_) => ErrorCode::R004,
            Self::Unsupported(_)    => ErrorCode::R005,
            Self::Domain { .. }     => ErrorCode::R006,
            Self::Render(_)         => ErrorCode::R007,
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Lex { .. } | Self::Syntax { .. } => ErrorClass::Syntax,
            Self::Subscript { .. }                 => ErrorClass::Subscript,
            Self::Unsupported(_)                   => ErrorClass::Unsupported,
            _                                      => ErrorClass::Runtime,
        }
    }
}
