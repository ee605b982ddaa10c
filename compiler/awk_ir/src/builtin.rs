//! Builtin function names.

use std::fmt;

/// Builtin functions, resolved by name at parse time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Builtin {
    // String
    Gsub,
    Index,
    Length,
    Match,
    Split,
    Sprintf,
    Sub,
    Substr,
    Tolower,
    Toupper,

    // Arithmetic
    Atan2,
    Cos,
    Exp,
    Int,
    Log,
    Rand,
    Sin,
    Sqrt,
    Srand,

    // I/O
    Close,
    Fflush,
    System,
}

impl Builtin {
    pub fn from_name(name: &str) -> Option<Builtin> {
        Some(match name {
            "gsub" => Builtin::Gsub,
            "index" => Builtin::Index,
            "length" => Builtin::Length,
            "match" => Builtin::Match,
            "split" => Builtin::Split,
            "sprintf" => Builtin::Sprintf,
            "sub" => Builtin::Sub,
            "substr" => Builtin::Substr,
            "tolower" => Builtin::Tolower,
            "toupper" => Builtin::Toupper,
            "atan2" => Builtin::Atan2,
            "cos" => Builtin::Cos,
            "exp" => Builtin::Exp,
            "int" => Builtin::Int,
            "log" => Builtin::Log,
            "rand" => Builtin::Rand,
            "sin" => Builtin::Sin,
            "sqrt" => Builtin::Sqrt,
            "srand" => Builtin::Srand,
            "close" => Builtin::Close,
            "fflush" => Builtin::Fflush,
            "system" => Builtin::System,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Gsub => "gsub",
            Builtin::Index => "index",
            Builtin::Length => "length",
            Builtin::Match => "match",
            Builtin::Split => "split",
            Builtin::Sprintf => "sprintf",
            Builtin::Sub => "sub",
            Builtin::Substr => "substr",
            Builtin::Tolower => "tolower",
            Builtin::Toupper => "toupper",
            Builtin::Atan2 => "atan2",
            Builtin::Cos => "cos",
            Builtin::Exp => "exp",
            Builtin::Int => "int",
            Builtin::Log => "log",
            Builtin::Rand => "rand",
            Builtin::Sin => "sin",
            Builtin::Sqrt => "sqrt",
            Builtin::Srand => "srand",
            Builtin::Close => "close",
            Builtin::Fflush => "fflush",
            Builtin::System => "system",
        }
    }

    /// Accepted argument counts, inclusive. `usize::MAX` means variadic.
    pub fn arg_range(self) -> (usize, usize) {
        match self {
            Builtin::Rand => (0, 0),
            Builtin::Length | Builtin::Srand | Builtin::Fflush => (0, 1),
            Builtin::Cos
            | Builtin::Exp
            | Builtin::Int
            | Builtin::Log
            | Builtin::Sin
            | Builtin::Sqrt
            | Builtin::Tolower
            | Builtin::Toupper
            | Builtin::Close
            | Builtin::System => (1, 1),
            Builtin::Index | Builtin::Atan2 | Builtin::Match => (2, 2),
            Builtin::Gsub | Builtin::Sub | Builtin::Split | Builtin::Substr => (2, 3),
            Builtin::Sprintf => (1, usize::MAX),
        }
    }

    pub fn accepts(self, count: usize) -> bool {
        let (min, max) = self.arg_range();
        (min..=max).contains(&count)
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
