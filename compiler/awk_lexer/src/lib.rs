//! Lexer for awki using logos.
//!
//! Newlines are significant and come through as tokens; comments and
//! backslash-newline continuations are dropped. A `/` is a division
//! operator after something that ends an operand and starts a regex
//! literal anywhere else.

mod escape;
mod lex_error;
mod raw_token;

use logos::Logos;

use awk_ir::{Name, Span, Token, TokenKind, TokenList};
use awk_value::{number::parse_integer, Value};

use crate::escape::scan_regex;
use crate::raw_token::RawToken;

pub use escape::unescape_string;
pub use lex_error::{LexError, LexErrorKind};

/// Lex program text into a `TokenList` ending in `Eof`.
pub fn lex(source: &str) -> Result<TokenList, LexError> {
    let mut result = TokenList::new();
    let mut logos = RawToken::lexer(source);

    while let Some(token_result) = logos.next() {
        let range = logos.span();
        let span = Span::from_range(range.clone());
        let slice = logos.slice();

        let Ok(raw) = token_result else {
            let c = slice.chars().next().unwrap_or('\0');
            return Err(LexError::new(LexErrorKind::UnexpectedCharacter(c), span));
        };

        let kind = match raw {
            RawToken::Comment | RawToken::LineContinuation => continue,
            RawToken::Slash | RawToken::DivAssign
                if !result.last_kind().is_some_and(TokenKind::ends_operand) =>
            {
                // `/=` here opens a regex whose text starts with `=`.
                let prefix = if raw == RawToken::DivAssign { "=" } else { "" };
                let Some((body, consumed)) = scan_regex(logos.remainder()) else {
                    let end = Span::from_range(range.start..source.len());
                    return Err(LexError::new(LexErrorKind::UnterminatedRegex, end));
                };
                logos.bump(consumed);
                let span = Span::from_range(range.start..logos.span().end);
                result.push(Token::new(TokenKind::Regex(format!("{prefix}{body}")), span));
                continue;
            }
            RawToken::Ident if logos.remainder().starts_with('(') => {
                TokenKind::FuncName(Name::from(slice))
            }
            RawToken::UnterminatedStr => {
                return Err(LexError::new(LexErrorKind::UnterminatedString, span));
            }
            RawToken::Number => convert_number(slice)
                .ok_or_else(|| LexError::new(LexErrorKind::InvalidNumber, span))?,
            _ => convert_token(raw, slice),
        };
        result.push(Token::new(kind, span));
    }

    result.push(Token::new(TokenKind::Eof, Span::from_range(source.len()..source.len())));
    Ok(result)
}

/// Numeric literals are stored in canonical form: `007` is `7`, `1.0` is `1`.
fn convert_number(slice: &str) -> Option<TokenKind> {
    if slice.bytes().all(|b| b.is_ascii_digit()) {
        if let Some(integer) = parse_integer(slice) {
            return Some(TokenKind::Number(Value::integer(integer)));
        }
    }
    slice
        .parse::<f64>()
        .ok()
        .map(|real| TokenKind::Number(Value::real(real)))
}

fn convert_token(raw: RawToken, slice: &str) -> TokenKind {
    match raw {
        RawToken::Str => {
            let body = slice.get(1..slice.len() - 1).unwrap_or_default();
            TokenKind::Str(unescape_string(body))
        }
        RawToken::Ident => TokenKind::Ident(Name::from(slice)),

        RawToken::Begin => TokenKind::Begin,
        RawToken::End => TokenKind::End,
        RawToken::Function => TokenKind::Function,
        RawToken::If => TokenKind::If,
        RawToken::Else => TokenKind::Else,
        RawToken::While => TokenKind::While,
        RawToken::For => TokenKind::For,
        RawToken::Do => TokenKind::Do,
        RawToken::Break => TokenKind::Break,
        RawToken::Continue => TokenKind::Continue,
        RawToken::Next => TokenKind::Next,
        RawToken::Exit => TokenKind::Exit,
        RawToken::Return => TokenKind::Return,
        RawToken::Delete => TokenKind::Delete,
        RawToken::In => TokenKind::In,
        RawToken::Getline => TokenKind::Getline,
        RawToken::Print => TokenKind::Print,
        RawToken::Printf => TokenKind::Printf,

        RawToken::Newline => TokenKind::Newline,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Comma => TokenKind::Comma,

        RawToken::Assign => TokenKind::Assign,
        RawToken::AddAssign => TokenKind::AddAssign,
        RawToken::SubAssign => TokenKind::SubAssign,
        RawToken::MulAssign => TokenKind::MulAssign,
        RawToken::DivAssign => TokenKind::DivAssign,
        RawToken::ModAssign => TokenKind::ModAssign,
        RawToken::PowAssign => TokenKind::PowAssign,
        RawToken::Question => TokenKind::Question,
        RawToken::Colon => TokenKind::Colon,
        RawToken::OrOr => TokenKind::OrOr,
        RawToken::AndAnd => TokenKind::AndAnd,
        RawToken::Tilde => TokenKind::Tilde,
        RawToken::NotTilde => TokenKind::NotTilde,
        RawToken::Less => TokenKind::Less,
        RawToken::LessEq => TokenKind::LessEq,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::GreaterEq => TokenKind::GreaterEq,
        RawToken::Greater => TokenKind::Greater,
        RawToken::Append => TokenKind::Append,
        RawToken::Pipe => TokenKind::Pipe,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::Caret => TokenKind::Caret,
        RawToken::Bang => TokenKind::Bang,
        RawToken::Incr => TokenKind::Incr,
        RawToken::Decr => TokenKind::Decr,
        RawToken::Dollar => TokenKind::Dollar,

        // Handled by `lex` before conversion.
        RawToken::Comment
        | RawToken::LineContinuation
        | RawToken::Number
        | RawToken::UnterminatedStr => TokenKind::Newline,
    }
}
