//! Program representation for awki.
//!
//! The parser produces a [`Program`]; the evaluator walks it read-only.
//! Expressions are flat term lists ([`Expr`]) whose structure is recovered
//! at run time from the [`Op`] catalog.

mod action;
mod builtin;
mod expr;
mod name;
mod op;
mod pattern;
mod program;
mod span;
mod token;

pub use action::{Action, ActionList, ListKind, Redirect, RedirectKind};
pub use builtin::Builtin;
pub use expr::{Callee, Expr, Getline, GetlineSource, LValue, Term};
pub use name::Name;
pub use op::{Arity, Assoc, Fixity, Op};
pub use pattern::{Pattern, PatternAction};
pub use program::{FunctionDef, Program};
pub use span::Span;
pub use token::{Token, TokenKind, TokenList};
