//! Lexer error types.

use std::fmt;

use awk_ir::Span;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LexErrorKind {
    /// Missing closing `"`.
    UnterminatedString,
    /// Missing closing `/` before end of line.
    UnterminatedRegex,
    /// Number literal that does not parse.
    InvalidNumber,
    /// A character no token starts with.
    UnexpectedCharacter(char),
}

impl LexError {
    #[cold]
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        LexError { kind, span }
    }
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexErrorKind::UnterminatedString => f.write_str("unterminated string"),
            LexErrorKind::UnterminatedRegex => f.write_str("unterminated regular expression"),
            LexErrorKind::InvalidNumber => f.write_str("invalid number"),
            LexErrorKind::UnexpectedCharacter(c) => write!(f, "unexpected character '{c}'"),
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for LexError {}
