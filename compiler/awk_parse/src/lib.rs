//! Recursive descent parser for awki.
//!
//! Produces a [`Program`] whose expressions are flat term lists. The parser
//! decides what each token means (unary or binary minus, regex or division,
//! `>` as comparison or redirection) and records operands and operators in
//! source order; precedence is applied later by the evaluator.

mod cursor;
mod error;
mod grammar;

pub use cursor::Cursor;
pub use error::ParseError;

use awk_ir::{Program, Span, TokenKind, TokenList};

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    /// Range patterns seen so far; the next range gets this id.
    ranges: usize,
    /// Inside an unparenthesised print list, where `>` redirects.
    no_gt: bool,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            ranges: 0,
            no_gt: false,
        }
    }

    #[inline]
    fn current_kind(&self) -> &'a TokenKind {
        self.cursor.current_kind()
    }

    #[inline]
    fn current_span(&self) -> Span {
        self.cursor.current_span()
    }

    #[inline]
    fn check(&self, kind: &TokenKind) -> bool {
        self.cursor.check(kind)
    }

    #[inline]
    fn advance(&mut self) {
        self.cursor.advance();
    }

    /// Consume `kind` or fail naming it.
    fn expect(&mut self, kind: &TokenKind) -> Result<(), ParseError> {
        if self.cursor.eat(kind) {
            Ok(())
        } else {
            Err(self.error_expected(&format!("`{}`", kind.display_name())))
        }
    }

    #[cold]
    fn error_expected(&self, what: &str) -> ParseError {
        ParseError::expected(what, self.current_kind(), self.current_span())
    }

    #[cold]
    fn error_unexpected(&self) -> ParseError {
        ParseError::unexpected(self.current_kind(), self.current_span())
    }

    /// Run `f` with `>` read as a comparison, as inside parentheses.
    fn with_gt_allowed<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = std::mem::replace(&mut self.no_gt, false);
        let result = f(self);
        self.no_gt = saved;
        result
    }

    /// Run `f`, rewinding the cursor if it fails.
    fn attempt<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Option<T> {
        let snapshot = self.cursor.position();
        let result = f(self);
        if result.is_err() {
            self.cursor.set_position(snapshot);
        }
        result.ok()
    }
}

/// Lex and parse program text.
#[tracing::instrument(level = "debug", skip_all)]
pub fn parse(source: &str) -> Result<Program, ParseError> {
    let tokens = awk_lexer::lex(source)?;
    tracing::trace!(tokens = tokens.len(), "lexed");
    Parser::new(&tokens).parse_program()
}

#[cfg(test)]
mod tests;
