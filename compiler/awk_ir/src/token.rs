//! Token types produced by the lexer.

use std::fmt;

use awk_value::Value;

use crate::{Name, Span};

/// A token with its span in the source.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Token kinds.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum TokenKind {
    /// Numeric literal, already in canonical form.
    Number(Value),
    /// String literal with escapes processed.
    Str(String),
    /// Regular expression literal, without the slashes.
    Regex(String),
    Ident(Name),
    /// Identifier immediately followed by `(`.
    FuncName(Name),

    // Keywords
    Begin,
    End,
    Function,
    If,
    Else,
    While,
    For,
    Do,
    Break,
    Continue,
    Next,
    Exit,
    Return,
    Delete,
    In,
    Getline,
    Print,
    Printf,

    // Delimiters
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Semicolon,
    Comma,
    Newline,

    // Operators
    Assign,    // =
    AddAssign, // +=
    SubAssign, // -=
    MulAssign, // *=
    DivAssign, // /=
    ModAssign, // %=
    PowAssign, // ^= **=
    Question,
    Colon,
    OrOr,
    AndAnd,
    Tilde,
    NotTilde,
    Less,
    LessEq,
    EqEq,
    NotEq,
    GreaterEq,
    Greater,
    Append, // >>
    Pipe,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret, // ^ **
    Bang,
    Incr,
    Decr,
    Dollar,

    Eof,
}

impl TokenKind {
    /// Whether a `/` after this token is division rather than a regex.
    pub fn ends_operand(&self) -> bool {
        matches!(
            self,
            TokenKind::Number(_)
                | TokenKind::Str(_)
                | TokenKind::Regex(_)
                | TokenKind::Ident(_)
                | TokenKind::FuncName(_)
                | TokenKind::RParen
                | TokenKind::RBracket
                | TokenKind::Dollar
                | TokenKind::Incr
                | TokenKind::Decr
        )
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TokenKind::Number(_) => "number",
            TokenKind::Str(_) => "string",
            TokenKind::Regex(_) => "regular expression",
            TokenKind::Ident(_) => "identifier",
            TokenKind::FuncName(_) => "function name",
            TokenKind::Begin => "BEGIN",
            TokenKind::End => "END",
            TokenKind::Function => "function",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::For => "for",
            TokenKind::Do => "do",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::Next => "next",
            TokenKind::Exit => "exit",
            TokenKind::Return => "return",
            TokenKind::Delete => "delete",
            TokenKind::In => "in",
            TokenKind::Getline => "getline",
            TokenKind::Print => "print",
            TokenKind::Printf => "printf",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Semicolon => ";",
            TokenKind::Comma => ",",
            TokenKind::Newline => "newline",
            TokenKind::Assign => "=",
            TokenKind::AddAssign => "+=",
            TokenKind::SubAssign => "-=",
            TokenKind::MulAssign => "*=",
            TokenKind::DivAssign => "/=",
            TokenKind::ModAssign => "%=",
            TokenKind::PowAssign => "^=",
            TokenKind::Question => "?",
            TokenKind::Colon => ":",
            TokenKind::OrOr => "||",
            TokenKind::AndAnd => "&&",
            TokenKind::Tilde => "~",
            TokenKind::NotTilde => "!~",
            TokenKind::Less => "<",
            TokenKind::LessEq => "<=",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::GreaterEq => ">=",
            TokenKind::Greater => ">",
            TokenKind::Append => ">>",
            TokenKind::Pipe => "|",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Caret => "^",
            TokenKind::Bang => "!",
            TokenKind::Incr => "++",
            TokenKind::Decr => "--",
            TokenKind::Dollar => "$",
            TokenKind::Eof => "end of input",
        }
    }
}

/// Lexer output: tokens terminated by `Eof`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    pub fn new() -> Self {
        TokenList { tokens: Vec::new() }
    }

    #[inline]
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    /// Last pushed token kind, if any.
    pub fn last_kind(&self) -> Option<&TokenKind> {
        self.tokens.last().map(|token| &token.kind)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }
}
