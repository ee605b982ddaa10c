//! Token cursor for navigating the token stream.

use std::mem::discriminant;

use awk_ir::{Span, Token, TokenKind, TokenList};

const EOF: &TokenKind = &TokenKind::Eof;

/// Cursor over a token list that ends in `Eof`.
pub struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        Cursor {
            tokens: tokens.as_slice(),
            pos: 0,
        }
    }

    /// Current position, for snapshot and restore.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn set_position(&mut self, pos: usize) {
        debug_assert!(pos <= self.tokens.len(), "cursor position out of bounds");
        self.pos = pos;
    }

    #[inline]
    pub fn current_kind(&self) -> &'a TokenKind {
        self.kind_at(self.pos)
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.tokens
            .get(self.pos)
            .or(self.tokens.last())
            .map_or(Span::DUMMY, |token| token.span)
    }

    /// Kind `offset` tokens ahead; `Eof` past the end.
    pub fn peek_kind(&self, offset: usize) -> &'a TokenKind {
        self.kind_at(self.pos + offset)
    }

    fn kind_at(&self, pos: usize) -> &'a TokenKind {
        self.tokens.get(pos).map_or(EOF, |token| &token.kind)
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    /// Whether the current token has the same kind as `kind`, ignoring payloads.
    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        discriminant(self.current_kind()) == discriminant(kind)
    }

    pub fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    /// Consume the current token if it matches.
    pub fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn skip_newlines(&mut self) {
        while self.check(&TokenKind::Newline) {
            self.advance();
        }
    }

    /// Skip newlines and semicolons.
    pub fn skip_terminators(&mut self) {
        while matches!(self.current_kind(), TokenKind::Newline | TokenKind::Semicolon) {
            self.advance();
        }
    }
}
