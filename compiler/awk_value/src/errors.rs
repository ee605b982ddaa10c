//! Runtime error types and the control-flow flag.
//!
//! Runtime errors are never fatal: the interpreter reports them and carries
//! on with a default value. `EvalErrorKind` keeps them matchable so callers
//! and tests can inspect what was reported without parsing messages.

use std::fmt;

/// Control-flow signal pending in the interpreter.
///
/// Exactly one is active at a time; setting a flag replaces the previous one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Flag {
    #[default]
    None,
    Break,
    Continue,
    Next,
    Return,
    Exit,
}

impl Flag {
    #[inline]
    pub fn is_set(self) -> bool {
        self != Flag::None
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Flag::None => "none",
            Flag::Break => "break",
            Flag::Continue => "continue",
            Flag::Next => "next",
            Flag::Return => "return",
            Flag::Exit => "exit",
        })
    }
}

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Control flow
    BreakOutsideLoop,
    ContinueOutsideLoop,

    // Places
    NotAVariable,
    LhsNotAVariable,
    NegativeFieldIndex { index: i64 },
    FieldIndexTooLarge { index: usize },

    // Calls
    InvalidArgCount { name: String },
    TooManyArgs { name: String },
    UnknownFunction { name: String },

    // Arithmetic
    DivisionByZero,

    // Collaborators
    InvalidRegex { pattern: String, reason: String },
    Io { target: String, reason: String },

    // Evaluation machinery
    MalformedExpression,

    Custom { message: String },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BreakOutsideLoop => write!(f, "break not in iteration"),
            Self::ContinueOutsideLoop => write!(f, "continue not in iteration"),
            Self::NotAVariable => write!(f, "value is not a variable"),
            Self::LhsNotAVariable => write!(f, "Lhs is not a variable"),
            Self::NegativeFieldIndex { index } => write!(f, "negative field index ${index}"),
            Self::FieldIndexTooLarge { index } => write!(f, "field index ${index} is too large"),
            Self::InvalidArgCount { name } => {
                write!(f, "Invalid number of arguments for '{name}'")
            }
            Self::TooManyArgs { name } => write!(f, "Too many function args for '{name}'"),
            Self::UnknownFunction { name } => write!(f, "No function '{name}'"),
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::InvalidRegex { pattern, reason } => {
                write!(f, "invalid regular expression /{pattern}/: {reason}")
            }
            Self::Io { target, reason } => write!(f, "{target}: {reason}"),
            Self::MalformedExpression => write!(f, "malformed expression"),
            Self::Custom { message } => write!(f, "{message}"),
        }
    }
}

/// A reported runtime error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Equals `kind.to_string()`.
    pub message: String,
}

impl EvalError {
    /// Create an error with just a message.
    #[cold]
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        EvalError {
            kind: EvalErrorKind::Custom {
                message: message.clone(),
            },
            message,
        }
    }

    #[cold]
    pub fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError { kind, message }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EvalError {}

#[cold]
pub fn break_outside_loop() -> EvalError {
    EvalError::from_kind(EvalErrorKind::BreakOutsideLoop)
}

#[cold]
pub fn continue_outside_loop() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ContinueOutsideLoop)
}

/// `in`, `++`/`--` or a builtin target did not resolve to a variable.
#[cold]
pub fn not_a_variable() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotAVariable)
}

/// Assignment whose left side did not resolve to a variable.
#[cold]
pub fn lhs_not_a_variable() -> EvalError {
    EvalError::from_kind(EvalErrorKind::LhsNotAVariable)
}

#[cold]
pub fn negative_field_index(index: i64) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NegativeFieldIndex { index })
}

/// `$n` or `NF` assignment past the field limit.
#[cold]
pub fn field_index_too_large(index: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::FieldIndexTooLarge { index })
}

#[cold]
pub fn invalid_arg_count(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidArgCount {
        name: name.to_string(),
    })
}

#[cold]
pub fn too_many_args(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TooManyArgs {
        name: name.to_string(),
    })
}

#[cold]
pub fn unknown_function(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownFunction {
        name: name.to_string(),
    })
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn invalid_regex(pattern: &str, reason: impl fmt::Display) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidRegex {
        pattern: pattern.to_string(),
        reason: reason.to_string(),
    })
}

#[cold]
pub fn io_error(target: &str, reason: impl fmt::Display) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Io {
        target: target.to_string(),
        reason: reason.to_string(),
    })
}

#[cold]
pub fn malformed_expression() -> EvalError {
    EvalError::from_kind(EvalErrorKind::MalformedExpression)
}
