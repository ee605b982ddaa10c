//! Patterns and pattern-action pairs.

use std::fmt;

use crate::{ActionList, Expr};

/// Selects the records an action runs for.
#[derive(Clone, Debug, PartialEq)]
pub enum Pattern {
    /// No pattern: every record.
    All,
    Begin,
    End,
    /// `/re/`, matched against `$0`.
    Regex(String),
    Expr(Expr),
    Not(Box<Pattern>),
    And(Box<Pattern>, Box<Pattern>),
    Or(Box<Pattern>, Box<Pattern>),
    /// `start, end`. `id` indexes the interpreter's range state.
    Range {
        id: usize,
        start: Box<Pattern>,
        end: Box<Pattern>,
    },
}

impl Pattern {
    #[inline]
    pub fn is_begin(&self) -> bool {
        matches!(self, Pattern::Begin)
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        matches!(self, Pattern::End)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::All => Ok(()),
            Pattern::Begin => f.write_str("BEGIN"),
            Pattern::End => f.write_str("END"),
            Pattern::Regex(pattern) => write!(f, "/{pattern}/"),
            Pattern::Expr(expr) => write!(f, "{expr}"),
            Pattern::Not(inner) => write!(f, "!({inner})"),
            Pattern::And(left, right) => write!(f, "({left}) && ({right})"),
            Pattern::Or(left, right) => write!(f, "({left}) || ({right})"),
            Pattern::Range { start, end, .. } => write!(f, "{start}, {end}"),
        }
    }
}

/// A pattern and the statements it guards.
#[derive(Clone, Debug, PartialEq)]
pub struct PatternAction {
    pub pattern: Pattern,
    pub actions: ActionList,
}

impl fmt::Display for PatternAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.pattern)?;
        self.actions.dump(f, 0)
    }
}
