//! Flat expressions.
//!
//! An expression is the source-order sequence of its operands and
//! operators. Structure is recovered at run time from operator precedence,
//! so the tree is never built. Parenthesised groups and the lazy operands
//! of `&&`, `||` and `?:` are nested `Expr`s.

use std::fmt;

use awk_value::Value;

use crate::{Builtin, Name, Op};

/// One element of a flat expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Term {
    Value(Value),
    Var(Name),
    /// `name[subscript, ...]`
    Element { name: Name, subscript: Vec<Expr> },
    Op(Op),
    /// A nested expression evaluated only when its value is needed.
    Group(Expr),
    /// `(a, b)` on the left of `in`.
    Subscript(Vec<Expr>),
    /// A regular expression literal.
    Regex(String),
    Call { callee: Callee, args: Vec<Expr> },
    Getline(Box<Getline>),
}

impl Term {
    /// Whether this term leaves a value behind.
    #[inline]
    pub fn is_operand(&self) -> bool {
        !matches!(self, Term::Op(_))
    }
}

/// Function call target.
#[derive(Clone, Debug, PartialEq)]
pub enum Callee {
    Builtin(Builtin),
    User(Name),
}

impl fmt::Display for Callee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callee::Builtin(builtin) => write!(f, "{builtin}"),
            Callee::User(name) => write!(f, "{name}"),
        }
    }
}

/// An assignable location named in source.
#[derive(Clone, Debug, PartialEq)]
pub enum LValue {
    Var(Name),
    Element { name: Name, subscript: Vec<Expr> },
    Field(Expr),
}

/// Where `getline` reads from.
#[derive(Clone, Debug, PartialEq)]
pub enum GetlineSource {
    /// The main input.
    Main,
    /// `getline < file`
    File(Expr),
    /// `cmd | getline`
    Command(Expr),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Getline {
    /// `None` replaces `$0`.
    pub target: Option<LValue>,
    pub source: GetlineSource,
}

/// A flat term sequence.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Expr {
    terms: Vec<Term>,
    /// Whether the last pushed term left a value.
    value: bool,
}

impl Expr {
    pub fn new() -> Self {
        Expr::default()
    }

    /// Single-term expression.
    pub fn from_term(term: Term) -> Self {
        let mut expr = Expr::new();
        expr.push(term);
        expr
    }

    /// Append a term.
    ///
    /// A prefix operator following a value means the two are concatenated:
    /// `a $1` is `a` concatenated with `$1`. The concatenation is made
    /// explicit here because a prefix operator never triggers one at run
    /// time.
    pub fn push(&mut self, term: Term) {
        match &term {
            Term::Op(op) => {
                if op.is_prefix() && self.value {
                    self.terms.push(Term::Op(Op::Concat));
                }
                self.value = op.is_postfix();
            }
            _ => self.value = true,
        }
        self.terms.push(term);
    }

    #[inline]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Whether the expression currently ends with a complete operand.
    pub fn ends_with_value(&self) -> bool {
        self.value
    }

    /// Detach the terms from `at` onward as their own expression.
    ///
    /// Used for `cmd | getline`, where the command is the concatenation
    /// already parsed before the `|`.
    #[must_use]
    pub fn split_off(&mut self, at: usize) -> Expr {
        let terms = self.terms.split_off(at.min(self.terms.len()));
        self.value = self.terms.last().is_some_and(|term| match term {
            Term::Op(op) => op.is_postfix(),
            _ => true,
        });
        let value = !terms.is_empty();
        Expr { terms, value }
    }

    /// The pattern text if this is a lone regex literal.
    pub fn as_regex(&self) -> Option<&str> {
        match self.terms.as_slice() {
            [Term::Regex(pattern)] => Some(pattern),
            _ => None,
        }
    }

    /// The name if this is a lone variable reference.
    pub fn as_variable(&self) -> Option<&Name> {
        match self.terms.as_slice() {
            [Term::Var(name)] => Some(name),
            _ => None,
        }
    }
}

impl From<Term> for Expr {
    fn from(term: Term) -> Self {
        Expr::from_term(term)
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, exprs: &[Expr]) -> fmt::Result {
    for (i, expr) in exprs.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{expr}")?;
    }
    Ok(())
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Value(value) => write!(f, "{value:?}"),
            Term::Var(name) => write!(f, "{name}"),
            Term::Element { name, subscript } => {
                write!(f, "{name}[")?;
                write_list(f, subscript)?;
                f.write_str("]")
            }
            Term::Op(op) => write!(f, "{op}"),
            Term::Group(expr) => write!(f, "({expr})"),
            Term::Subscript(exprs) => {
                f.write_str("(")?;
                write_list(f, exprs)?;
                f.write_str(")")
            }
            Term::Regex(pattern) => write!(f, "/{pattern}/"),
            Term::Call { callee, args } => {
                write!(f, "{callee}(")?;
                write_list(f, args)?;
                f.write_str(")")
            }
            Term::Getline(getline) => write!(f, "{getline}"),
        }
    }
}

impl fmt::Display for LValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LValue::Var(name) => write!(f, "{name}"),
            LValue::Element { name, subscript } => {
                write!(f, "{name}[")?;
                write_list(f, subscript)?;
                f.write_str("]")
            }
            LValue::Field(index) => write!(f, "$({index})"),
        }
    }
}

impl fmt::Display for Getline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let GetlineSource::Command(command) = &self.source {
            write!(f, "({command}) | ")?;
        }
        f.write_str("getline")?;
        if let Some(target) = &self.target {
            write!(f, " {target}")?;
        }
        if let GetlineSource::File(file) = &self.source {
            write!(f, " < ({file})")?;
        }
        Ok(())
    }
}

impl fmt::Display for Expr {
    /// Terms separated by spaces, in evaluation order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{term}")?;
        }
        Ok(())
    }
}
