//! Operator catalog.
//!
//! Every operator carries a fixed arity, fixity, precedence and
//! associativity. The evaluator's shunting-yard relies on these alone to
//! rebuild structure from a flat term list.

use std::fmt;

/// Associativity, used when two operators share a precedence.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Assoc {
    LeftToRight,
    RightToLeft,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Arity {
    Unary,
    Binary,
    Ternary,
}

/// Where the operator sits relative to its operand(s).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Fixity {
    Prefix,
    Postfix,
    Infix,
}

/// Operators.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    // Assignment family
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
    PowAssign,

    // Ternary halves
    Question,
    Colon,

    Or,
    And,
    In,
    Match,
    NotMatch,

    // Relational
    Less,
    LessEq,
    Equal,
    NotEqual,
    GreaterEq,
    Greater,

    /// Implicit string concatenation.
    Concat,

    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Unary
    Plus,
    Neg,
    Not,

    Pow,

    PreIncr,
    PreDecr,
    PostIncr,
    PostDecr,

    /// `$`: field reference.
    Field,
}

impl Op {
    /// Binding strength, 1 (loosest) to 15 (tightest).
    pub fn precedence(self) -> u8 {
        match self {
            Op::Assign
            | Op::AddAssign
            | Op::SubAssign
            | Op::MulAssign
            | Op::DivAssign
            | Op::ModAssign
            | Op::PowAssign => 1,
            Op::Question | Op::Colon => 2,
            Op::Or => 3,
            Op::And => 4,
            Op::In => 5,
            Op::Match | Op::NotMatch => 6,
            Op::Less | Op::LessEq | Op::Equal | Op::NotEqual | Op::GreaterEq | Op::Greater => 7,
            Op::Concat => 8,
            Op::Add | Op::Sub => 9,
            Op::Mul | Op::Div | Op::Mod => 10,
            Op::Plus | Op::Neg => 11,
            Op::Not => 12,
            Op::Pow => 13,
            Op::PreIncr | Op::PreDecr | Op::PostIncr | Op::PostDecr => 14,
            Op::Field => 15,
        }
    }

    pub fn assoc(self) -> Assoc {
        match self {
            Op::Assign
            | Op::AddAssign
            | Op::SubAssign
            | Op::MulAssign
            | Op::DivAssign
            | Op::ModAssign
            | Op::PowAssign
            | Op::Question
            | Op::Pow => Assoc::RightToLeft,
            _ => Assoc::LeftToRight,
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            Op::Question | Op::Colon => Arity::Ternary,
            Op::Plus
            | Op::Neg
            | Op::Not
            | Op::PreIncr
            | Op::PreDecr
            | Op::PostIncr
            | Op::PostDecr
            | Op::Field => Arity::Unary,
            _ => Arity::Binary,
        }
    }

    pub fn fixity(self) -> Fixity {
        match self {
            Op::Plus | Op::Neg | Op::Not | Op::PreIncr | Op::PreDecr | Op::Field => Fixity::Prefix,
            Op::PostIncr | Op::PostDecr => Fixity::Postfix,
            _ => Fixity::Infix,
        }
    }

    #[inline]
    pub fn is_prefix(self) -> bool {
        self.fixity() == Fixity::Prefix
    }

    #[inline]
    pub fn is_postfix(self) -> bool {
        self.fixity() == Fixity::Postfix
    }

    pub fn is_assignment(self) -> bool {
        self.precedence() == 1
    }

    /// Whether a pending `self` must be reduced before `incoming` is pushed.
    pub fn binds_tighter_than(self, incoming: Op) -> bool {
        let (mine, theirs) = (self.precedence(), incoming.precedence());
        mine > theirs || (mine == theirs && incoming.assoc() == Assoc::LeftToRight)
    }

    /// Source spelling. Concatenation has none.
    pub fn symbol(self) -> &'static str {
        match self {
            Op::Assign => "=",
            Op::AddAssign => "+=",
            Op::SubAssign => "-=",
            Op::MulAssign => "*=",
            Op::DivAssign => "/=",
            Op::ModAssign => "%=",
            Op::PowAssign => "^=",
            Op::Question => "?",
            Op::Colon => ":",
            Op::Or => "||",
            Op::And => "&&",
            Op::In => "in",
            Op::Match => "~",
            Op::NotMatch => "!~",
            Op::Less => "<",
            Op::LessEq => "<=",
            Op::Equal => "==",
            Op::NotEqual => "!=",
            Op::GreaterEq => ">=",
            Op::Greater => ">",
            Op::Concat => "",
            Op::Add | Op::Plus => "+",
            Op::Sub | Op::Neg => "-",
            Op::Mul => "*",
            Op::Div => "/",
            Op::Mod => "%",
            Op::Not => "!",
            Op::Pow => "^",
            Op::PreIncr | Op::PostIncr => "++",
            Op::PreDecr | Op::PostDecr => "--",
            Op::Field => "$",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Concat => f.write_str("<concat>"),
            op => f.write_str(op.symbol()),
        }
    }
}
