use crate::error::{Error, ErrorCode};
use crate::syntax::token::{Token, TokenKind, word_token};

pub struct Lexer<'a> {
    source: &'a [u8],
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source: source.as_bytes(), pos: 0, line: 1, column: 1 }
    }

    /// Stops at the first character run that no token pattern matches.
    pub fn tokenize(mut self) -> Result<Vec<Token>, Error> {
        let mut tokens = Vec::new();

        loop {
            self.skip_trivia();
            if self.is_at_end() { break; }
            tokens.push(self.next_token()?);
        }

        Ok(tokens)
    }

    fn next_token(&mut self) -> Result<Token, Error> {
        let line = self.line;
        let col = self.column;
        let ch = self.advance();

        let kind = match ch {
            b'{' => TokenKind::BeginFunction,
            b'}' => TokenKind::EndFunction,
            b'[' => TokenKind::BeginArray,
            b']' => TokenKind::EndArray,

            b'"' => TokenKind::String(self.read_string(line, col)?),

            b'/' => {
                if !self.peek().is_ascii_alphabetic() {
                    return Err(Error::lex(ErrorCode::L001, line, col,
                        "expected a name after `/`"));
                }
                let first = self.advance();
                let name = self.read_word(first);
                if let TokenKind::Operator(op) = word_token(name.clone()) {
                    return Err(Error::lex(ErrorCode::L002, line, col,
                        format!("`{op}` is a reserved word and cannot be bound")));
                }
                TokenKind::Binder(name)
            }

            b'-' if self.peek().is_ascii_digit() => self.read_number(ch, line, col)?,
            b'0'..=b'9' => self.read_number(ch, line, col)?,

            b'a'..=b'z' | b'A'..=b'Z' => word_token(self.read_word(ch)),

            other => {
                return Err(Error::lex(ErrorCode::L001, line, col,
                    format!("unexpected character `{}`", other as char)));
            }
        };

        Ok(Token::new(kind, line, col))
    }

    // ─── Primitives ──────────────────────────────────────────────────────────

    fn advance(&mut self) -> u8 {
        let ch = self.source[self.pos];
        self.pos += 1;
        if ch == b'\n' { self.line += 1; self.column = 1; }
        else { self.column += 1; }
        ch
    }

    fn peek(&self) -> u8 {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> u8 {
        self.source.get(self.pos + offset).copied().unwrap_or(0)
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Whitespace and `%` comments produce no tokens.
    fn skip_trivia(&mut self) {
        while !self.is_at_end() {
            match self.peek() {
                b' ' | b'\t' | b'\r' | b'\n' | 0x0b | 0x0c => { self.advance(); }
                b'%' => {
                    while !self.is_at_end() && self.peek() != b'\n' { self.advance(); }
                }
                _ => break,
            }
        }
    }

    // ─── Readers ─────────────────────────────────────────────────────────────

    fn read_string(&mut self, start_line: usize, start_col: usize) -> Result<String, Error> {
        let start = self.pos;
        loop {
            if self.is_at_end() || self.peek() == b'\n' {
                return Err(Error::lex(ErrorCode::L003, start_line, start_col,
                    "unterminated string literal"));
            }
            if self.advance() == b'"' { break; }
        }
        Ok(String::from_utf8_lossy(&self.source[start..self.pos - 1]).into_owned())
    }

    fn read_word(&mut self, first: u8) -> String {
        let mut s = String::new();
        s.push(first as char);
        while matches!(self.peek(), b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_') {
            s.push(self.advance() as char);
        }
        s
    }

    fn read_digits(&mut self, s: &mut String) {
        while self.peek().is_ascii_digit() {
            s.push(self.advance() as char);
        }
    }

    /// `-?\d+` is an Integer; a fraction `.\d+` and/or an exponent
    /// `[eE]-?\d+` makes it a Real. Each part is only consumed when it is
    /// complete, so `1.x` lexes as `1` followed by whatever `.x` is.
    fn read_number(&mut self, first: u8, line: usize, col: usize) -> Result<TokenKind, Error> {
        let mut s = String::new();
        s.push(first as char);
        self.read_digits(&mut s);

        let mut is_real = false;
        if self.peek() == b'.' && self.peek_at(1).is_ascii_digit() {
            is_real = true;
            s.push(self.advance() as char);
            self.read_digits(&mut s);
        }
        let exponent = matches!(self.peek(), b'e' | b'E')
            && (self.peek_at(1).is_ascii_digit()
                || (self.peek_at(1) == b'-' && self.peek_at(2).is_ascii_digit()));
        if exponent {
            is_real = true;
            s.push(self.advance() as char);
            if self.peek() == b'-' { s.push(self.advance() as char); }
            self.read_digits(&mut s);
        }

        let malformed = || Error::lex(ErrorCode::L003, line, col,
            format!("malformed number literal `{s}`"));
        if is_real {
            s.parse().map(TokenKind::Real).map_err(|_| malformed())
        } else {
            s.parse().map(TokenKind::Integer).map_err(|_| malformed())
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::operator::Operator;

    fn lex(src: &str) -> Vec<TokenKind> {
        Lexer::new(src).tokenize().unwrap().into_iter().map(|t| t.kind).collect()
    }

    fn lex_err(src: &str) -> Error {
        Lexer::new(src).tokenize().unwrap_err()
    }

    fn code(e: &Error) -> ErrorCode { e.code() }

    #[test]
    fn empty() {
        assert!(lex("").is_empty());
        assert!(lex("   \n\t ").is_empty());
    }

    #[test]
    fn integers() {
        assert_eq!(lex("1"), vec![TokenKind::Integer(1)]);
        assert_eq!(lex("123 321"), vec![TokenKind::Integer(123), TokenKind::Integer(321)]);
        assert_eq!(lex("-123"), vec![TokenKind::Integer(-123)]);
        assert_eq!(lex("-1-1"), vec![TokenKind::Integer(-1), TokenKind::Integer(-1)]);
    }

    #[test]
    fn reals() {
        assert_eq!(lex("1.0"), vec![TokenKind::Real(1.0)]);
        assert_eq!(lex("-1.0"), vec![TokenKind::Real(-1.0)]);
        assert_eq!(lex("1.0e12"), vec![TokenKind::Real(1.0e12)]);
        assert_eq!(lex("1e12"), vec![TokenKind::Real(1e12)]);
        assert_eq!(lex("1e-12"), vec![TokenKind::Real(1e-12)]);
        assert_eq!(lex("-1.0e-12"), vec![TokenKind::Real(-1.0e-12)]);
    }

    #[test]
    fn incomplete_exponent_is_not_consumed() {
        assert_eq!(lex("1e"), vec![TokenKind::Integer(1), TokenKind::Identifier("e".into())]);
    }

    #[test]
    fn integer_overflow_is_rejected() {
        assert_eq!(code(&lex_err("99999999999999999999")), ErrorCode::L003);
    }

    #[test]
    fn strings() {
        assert_eq!(lex(r#""test""#), vec![TokenKind::String("test".into())]);
        assert_eq!(
            lex(r#""a" "b""#),
            vec![TokenKind::String("a".into()), TokenKind::String("b".into())]
        );
    }

    #[test]
    fn unterminated_string_error() {
        assert_eq!(code(&lex_err(r#""oops"#)), ErrorCode::L003);
    }

    #[test]
    fn booleans() {
        assert_eq!(lex("true"), vec![TokenKind::Boolean(true)]);
        assert_eq!(lex("false"), vec![TokenKind::Boolean(false)]);
    }

    #[test]
    fn longest_match_wins_over_keywords() {
        assert_eq!(lex("trueish"), vec![TokenKind::Identifier("trueish".into())]);
        assert_eq!(lex("addition"), vec![TokenKind::Identifier("addition".into())]);
    }

    #[test]
    fn binders() {
        assert_eq!(lex("/x"), vec![TokenKind::Binder("x".into())]);
        assert_eq!(lex("/x-y_2"), vec![TokenKind::Binder("x-y_2".into())]);
    }

    #[test]
    fn reserved_binder_is_rejected() {
        assert_eq!(code(&lex_err("/addi")), ErrorCode::L002);
        assert_eq!(code(&lex_err("1 /sphere")), ErrorCode::L002);
    }

    #[test]
    fn bare_slash_is_rejected() {
        assert_eq!(code(&lex_err("/ x")), ErrorCode::L001);
    }

    #[test]
    fn identifiers_and_operators() {
        assert_eq!(lex("x"), vec![TokenKind::Identifier("x".into())]);
        assert_eq!(lex("x-y_2"), vec![TokenKind::Identifier("x-y_2".into())]);
        assert_eq!(lex("addi"), vec![TokenKind::Operator(Operator::AddI)]);
        assert_eq!(lex("uscale"), vec![TokenKind::Operator(Operator::UScale)]);
    }

    #[test]
    fn delimiters() {
        assert_eq!(
            lex("{1 [2 3]}"),
            vec![
                TokenKind::BeginFunction,
                TokenKind::Integer(1),
                TokenKind::BeginArray,
                TokenKind::Integer(2),
                TokenKind::Integer(3),
                TokenKind::EndArray,
                TokenKind::EndFunction,
            ]
        );
    }

    #[test]
    fn comments_skipped() {
        assert_eq!(lex("1 % apa"), vec![TokenKind::Integer(1)]);
        assert_eq!(lex("1 % apa\n2"), vec![TokenKind::Integer(1), TokenKind::Integer(2)]);
    }

    #[test]
    fn unexpected_character() {
        let e = lex_err("1 2\n  @");
        assert_eq!(e, Error::lex(ErrorCode::L001, 2, 3, "unexpected character `@`"));
    }

    #[test]
    fn lone_minus_is_rejected() {
        assert_eq!(code(&lex_err("- 1")), ErrorCode::L001);
    }

    #[test]
    fn line_and_column_tracking() {
        let tokens = Lexer::new("a\n  b").tokenize().unwrap();
        assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
        assert_eq!((tokens[1].line, tokens[1].column), (2, 3));
    }
}
