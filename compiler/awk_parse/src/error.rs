//! Parse error types.

use std::fmt;

use awk_ir::{Span, TokenKind};
use awk_lexer::LexError;

/// A syntax error. Parsing stops at the first one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl ParseError {
    #[cold]
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        ParseError {
            message: message.into(),
            span,
        }
    }

    #[cold]
    pub fn unexpected(found: &TokenKind, span: Span) -> Self {
        ParseError::new(format!("syntax error: unexpected {}", describe(found)), span)
    }

    #[cold]
    pub fn expected(what: &str, found: &TokenKind, span: Span) -> Self {
        ParseError::new(format!("expected {what}, found {}", describe(found)), span)
    }
}

fn describe(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Ident(name) | TokenKind::FuncName(name) => format!("`{name}`"),
        TokenKind::Number(value) => format!("number {value}"),
        TokenKind::Str(_) | TokenKind::Regex(_) | TokenKind::Newline | TokenKind::Eof => {
            kind.display_name().to_string()
        }
        other => format!("`{}`", other.display_name()),
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::new(err.kind.to_string(), err.span)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ParseError {}
