//! Raw Token Definition
//!
//! The logos-derived tokenizer output before literal decoding and
//! regex/division disambiguation.

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\f\v]+")]
pub(crate) enum RawToken {
    #[regex(r"#[^\n]*")]
    Comment,

    #[regex(r"\\[ \t\r]*\n")]
    LineContinuation,

    #[token("\n")]
    Newline,

    #[token("BEGIN")]
    Begin,
    #[token("END")]
    End,
    #[token("function")]
    #[token("func")]
    Function,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("for")]
    For,
    #[token("do")]
    Do,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("next")]
    Next,
    #[token("exit")]
    Exit,
    #[token("return")]
    Return,
    #[token("delete")]
    Delete,
    #[token("in")]
    In,
    #[token("getline")]
    Getline,
    #[token("print")]
    Print,
    #[token("printf")]
    Printf,

    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,

    #[token("=")]
    Assign,
    #[token("+=")]
    AddAssign,
    #[token("-=")]
    SubAssign,
    #[token("*=")]
    MulAssign,
    #[token("/=")]
    DivAssign,
    #[token("%=")]
    ModAssign,
    #[token("^=")]
    #[token("**=")]
    PowAssign,
    #[token("?")]
    Question,
    #[token(":")]
    Colon,
    #[token("||")]
    OrOr,
    #[token("&&")]
    AndAnd,
    #[token("~")]
    Tilde,
    #[token("!~")]
    NotTilde,
    #[token("<")]
    Less,
    #[token("<=")]
    LessEq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token(">=")]
    GreaterEq,
    #[token(">")]
    Greater,
    #[token(">>")]
    Append,
    #[token("|")]
    Pipe,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("^")]
    #[token("**")]
    Caret,
    #[token("!")]
    Bang,
    #[token("++")]
    Incr,
    #[token("--")]
    Decr,
    #[token("$")]
    Dollar,

    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?")]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?")]
    Number,

    #[regex(r#""([^"\\\n]|\\(.|\n))*""#)]
    Str,

    // Loses to `Str` whenever the closing quote exists.
    #[regex(r#""([^"\\\n]|\\(.|\n))*"#)]
    UnterminatedStr,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}
