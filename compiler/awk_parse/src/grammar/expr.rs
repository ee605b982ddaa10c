//! Expressions.
//!
//! Each level appends to a shared [`Expr`] in source order. Only the
//! operands of `&&`, `||` and the branches of `?:` get their own nested
//! expression, so the evaluator can skip them.

use awk_ir::{Builtin, Callee, Expr, Getline, GetlineSource, LValue, Op, Term, TokenKind};
use awk_stack::ensure_sufficient_stack;
use awk_value::Value;

use crate::{ParseError, Parser};

/// Append `sub` as an operand that is only evaluated on demand.
fn push_lazy(expr: &mut Expr, sub: Expr) {
    let mut terms = sub.terms().iter();
    match (terms.next(), terms.next()) {
        (Some(term @ (Term::Value(_) | Term::Var(_) | Term::Regex(_) | Term::Group(_))), None) => {
            expr.push(term.clone());
        }
        _ => expr.push(Term::Group(sub)),
    }
}

fn assignment_op(kind: &TokenKind) -> Option<Op> {
    Some(match kind {
        TokenKind::Assign => Op::Assign,
        TokenKind::AddAssign => Op::AddAssign,
        TokenKind::SubAssign => Op::SubAssign,
        TokenKind::MulAssign => Op::MulAssign,
        TokenKind::DivAssign => Op::DivAssign,
        TokenKind::ModAssign => Op::ModAssign,
        TokenKind::PowAssign => Op::PowAssign,
        _ => return None,
    })
}

impl Parser<'_> {
    /// A full expression, assignment included.
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        let mut expr = Expr::new();
        self.expr_into(&mut expr)?;
        Ok(expr)
    }

    /// An expression binding tighter than `&&`, used as a pattern operand.
    pub(crate) fn parse_operand_expr(&mut self) -> Result<Expr, ParseError> {
        let mut expr = Expr::new();
        self.in_into(&mut expr)?;
        Ok(expr)
    }

    /// A concatenation, used for redirection targets.
    pub(crate) fn parse_concat_expr(&mut self) -> Result<Expr, ParseError> {
        let mut expr = Expr::new();
        self.concat_into(&mut expr)?;
        Ok(expr)
    }

    /// Comma-separated expressions; empty if `close` comes first.
    pub(crate) fn parse_expr_list(&mut self, close: &TokenKind) -> Result<Vec<Expr>, ParseError> {
        let mut list = Vec::new();
        self.cursor.skip_newlines();
        if self.check(close) {
            return Ok(list);
        }
        loop {
            list.push(self.parse_expr()?);
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
            self.cursor.skip_newlines();
        }
        Ok(list)
    }

    fn expr_into(&mut self, expr: &mut Expr) -> Result<(), ParseError> {
        ensure_sufficient_stack(|| {
            self.ternary_into(expr)?;
            if let Some(op) = assignment_op(self.current_kind()) {
                self.advance();
                self.cursor.skip_newlines();
                expr.push(Term::Op(op));
                self.expr_into(expr)?;
            }
            Ok(())
        })
    }

    fn ternary_into(&mut self, expr: &mut Expr) -> Result<(), ParseError> {
        self.or_into(expr)?;
        if !self.cursor.eat(&TokenKind::Question) {
            return Ok(());
        }
        self.cursor.skip_newlines();
        expr.push(Term::Op(Op::Question));
        let then = self.parse_expr()?;
        push_lazy(expr, then);

        self.cursor.skip_newlines();
        self.expect(&TokenKind::Colon)?;
        self.cursor.skip_newlines();
        expr.push(Term::Op(Op::Colon));
        let mut otherwise = Expr::new();
        self.ternary_into(&mut otherwise)?;
        push_lazy(expr, otherwise);
        Ok(())
    }

    fn or_into(&mut self, expr: &mut Expr) -> Result<(), ParseError> {
        self.and_into(expr)?;
        while self.cursor.eat(&TokenKind::OrOr) {
            self.cursor.skip_newlines();
            expr.push(Term::Op(Op::Or));
            let mut right = Expr::new();
            self.and_into(&mut right)?;
            push_lazy(expr, right);
        }
        Ok(())
    }

    fn and_into(&mut self, expr: &mut Expr) -> Result<(), ParseError> {
        self.in_into(expr)?;
        while self.cursor.eat(&TokenKind::AndAnd) {
            self.cursor.skip_newlines();
            expr.push(Term::Op(Op::And));
            let mut right = Expr::new();
            self.in_into(&mut right)?;
            push_lazy(expr, right);
        }
        Ok(())
    }

    fn in_into(&mut self, expr: &mut Expr) -> Result<(), ParseError> {
        self.match_into(expr)?;
        while self.cursor.eat(&TokenKind::In) {
            let TokenKind::Ident(array) = self.current_kind() else {
                return Err(self.error_expected("array name"));
            };
            self.advance();
            expr.push(Term::Op(Op::In));
            expr.push(Term::Var(array.clone()));
        }
        Ok(())
    }

    fn match_into(&mut self, expr: &mut Expr) -> Result<(), ParseError> {
        self.relational_into(expr)?;
        loop {
            let op = match self.current_kind() {
                TokenKind::Tilde => Op::Match,
                TokenKind::NotTilde => Op::NotMatch,
                _ => return Ok(()),
            };
            self.advance();
            expr.push(Term::Op(op));
            self.relational_into(expr)?;
        }
    }

    fn relational_into(&mut self, expr: &mut Expr) -> Result<(), ParseError> {
        self.concat_into(expr)?;
        loop {
            let op = match self.current_kind() {
                TokenKind::Less => Op::Less,
                TokenKind::LessEq => Op::LessEq,
                TokenKind::EqEq => Op::Equal,
                TokenKind::NotEq => Op::NotEqual,
                TokenKind::GreaterEq => Op::GreaterEq,
                TokenKind::Greater if !self.no_gt => Op::Greater,
                _ => return Ok(()),
            };
            self.advance();
            expr.push(Term::Op(op));
            self.concat_into(expr)?;
        }
    }

    fn concat_into(&mut self, expr: &mut Expr) -> Result<(), ParseError> {
        let start = expr.len();
        self.additive_into(expr)?;
        loop {
            if self.check(&TokenKind::Pipe)
                && matches!(self.cursor.peek_kind(1), TokenKind::Getline)
            {
                self.advance();
                self.advance();
                let command = expr.split_off(start);
                let target = self.parse_optional_lvalue()?;
                expr.push(Term::Getline(Box::new(Getline {
                    target,
                    source: GetlineSource::Command(command),
                })));
            } else if self.starts_concat_operand() {
                // The evaluator inserts the concatenation.
                self.additive_into(expr)?;
            } else {
                return Ok(());
            }
        }
    }

    fn starts_concat_operand(&self) -> bool {
        matches!(
            self.current_kind(),
            TokenKind::Number(_)
                | TokenKind::Str(_)
                | TokenKind::Ident(_)
                | TokenKind::FuncName(_)
                | TokenKind::Dollar
                | TokenKind::LParen
                | TokenKind::Incr
                | TokenKind::Decr
        )
    }

    fn additive_into(&mut self, expr: &mut Expr) -> Result<(), ParseError> {
        self.multiplicative_into(expr)?;
        loop {
            let op = match self.current_kind() {
                TokenKind::Plus => Op::Add,
                TokenKind::Minus => Op::Sub,
                _ => return Ok(()),
            };
            self.advance();
            expr.push(Term::Op(op));
            self.multiplicative_into(expr)?;
        }
    }

    fn multiplicative_into(&mut self, expr: &mut Expr) -> Result<(), ParseError> {
        self.unary_into(expr)?;
        loop {
            let op = match self.current_kind() {
                TokenKind::Star => Op::Mul,
                TokenKind::Slash => Op::Div,
                TokenKind::Percent => Op::Mod,
                _ => return Ok(()),
            };
            self.advance();
            expr.push(Term::Op(op));
            self.unary_into(expr)?;
        }
    }

    fn unary_into(&mut self, expr: &mut Expr) -> Result<(), ParseError> {
        let op = match self.current_kind() {
            TokenKind::Bang => Op::Not,
            TokenKind::Minus => Op::Neg,
            TokenKind::Plus => Op::Plus,
            _ => return self.power_into(expr),
        };
        self.advance();
        expr.push(Term::Op(op));
        ensure_sufficient_stack(|| self.unary_into(expr))
    }

    fn power_into(&mut self, expr: &mut Expr) -> Result<(), ParseError> {
        self.postfix_into(expr)?;
        if self.cursor.eat(&TokenKind::Caret) {
            expr.push(Term::Op(Op::Pow));
            // `2 ^ -1` is allowed; the chain stays flat.
            self.unary_into(expr)?;
        }
        Ok(())
    }

    fn postfix_into(&mut self, expr: &mut Expr) -> Result<(), ParseError> {
        let assignable = self.primary_into(expr)?;
        if assignable {
            let op = match self.current_kind() {
                TokenKind::Incr => Op::PostIncr,
                TokenKind::Decr => Op::PostDecr,
                _ => return Ok(()),
            };
            self.advance();
            expr.push(Term::Op(op));
        }
        Ok(())
    }

    /// Append one operand. Returns whether it can be assigned to.
    fn primary_into(&mut self, expr: &mut Expr) -> Result<bool, ParseError> {
        let span = self.current_span();
        match self.current_kind() {
            TokenKind::Dollar => {
                self.advance();
                expr.push(Term::Op(Op::Field));
                let prefix = match self.current_kind() {
                    TokenKind::Incr => Some(Op::PreIncr),
                    TokenKind::Decr => Some(Op::PreDecr),
                    TokenKind::Minus => Some(Op::Neg),
                    TokenKind::Plus => Some(Op::Plus),
                    TokenKind::Bang => Some(Op::Not),
                    _ => None,
                };
                if let Some(op) = prefix {
                    self.advance();
                    expr.push(Term::Op(op));
                }
                ensure_sufficient_stack(|| self.primary_into(expr))?;
                Ok(true)
            }
            TokenKind::Incr | TokenKind::Decr => {
                let op = if self.check(&TokenKind::Incr) {
                    Op::PreIncr
                } else {
                    Op::PreDecr
                };
                self.advance();
                expr.push(Term::Op(op));
                if !self.primary_into(expr)? {
                    return Err(ParseError::new(
                        format!("operand of `{}` is not assignable", op.symbol()),
                        span,
                    ));
                }
                Ok(false)
            }
            TokenKind::Number(value) => {
                self.advance();
                expr.push(Term::Value(value.clone()));
                Ok(false)
            }
            TokenKind::Str(text) => {
                self.advance();
                expr.push(Term::Value(Value::from(text.as_str())));
                Ok(false)
            }
            TokenKind::Regex(pattern) => {
                self.advance();
                expr.push(Term::Regex(pattern.clone()));
                Ok(false)
            }
            TokenKind::LParen => {
                self.advance();
                let list = self.with_gt_allowed(|p| p.parse_expr_list(&TokenKind::RParen))?;
                self.cursor.skip_newlines();
                self.expect(&TokenKind::RParen)?;
                let mut list = list.into_iter();
                match (list.next(), list.len()) {
                    (Some(inner), 0) => expr.push(Term::Group(inner)),
                    (Some(first), _) => {
                        if !self.check(&TokenKind::In) {
                            return Err(self.error_expected("`in` after subscript list"));
                        }
                        let mut subscript = vec![first];
                        subscript.extend(list);
                        expr.push(Term::Subscript(subscript));
                    }
                    (None, _) => return Err(ParseError::new("empty parentheses", span)),
                }
                Ok(false)
            }
            TokenKind::FuncName(name) => {
                self.advance();
                let callee = match Builtin::from_name(name) {
                    Some(builtin) => Callee::Builtin(builtin),
                    None => Callee::User(name.clone()),
                };
                let args = self.parse_call_args()?;
                expr.push(Term::Call { callee, args });
                Ok(false)
            }
            TokenKind::Ident(name) => {
                self.advance();
                if let Some(builtin) = Builtin::from_name(name) {
                    // Builtins may put a space before `(`; bare `length` means `length($0)`.
                    let args = if self.check(&TokenKind::LParen) {
                        self.parse_call_args()?
                    } else if builtin == Builtin::Length {
                        Vec::new()
                    } else {
                        return Err(ParseError::new(
                            format!("`{builtin}` needs an argument list"),
                            span,
                        ));
                    };
                    let callee = Callee::Builtin(builtin);
                    expr.push(Term::Call { callee, args });
                    return Ok(false);
                }
                if self.cursor.eat(&TokenKind::LBracket) {
                    let subscript = self.parse_subscript()?;
                    expr.push(Term::Element {
                        name: name.clone(),
                        subscript,
                    });
                } else {
                    expr.push(Term::Var(name.clone()));
                }
                Ok(true)
            }
            TokenKind::Getline => {
                self.advance();
                let target = self.parse_optional_lvalue()?;
                let source = if self.cursor.eat(&TokenKind::Less) {
                    let mut file = Expr::new();
                    self.primary_into(&mut file)?;
                    GetlineSource::File(file)
                } else {
                    GetlineSource::Main
                };
                expr.push(Term::Getline(Box::new(Getline { target, source })));
                Ok(false)
            }
            TokenKind::Minus | TokenKind::Plus | TokenKind::Bang => {
                self.unary_into(expr)?;
                Ok(false)
            }
            _ => Err(self.error_unexpected()),
        }
    }

    /// `( args )` after a function name.
    fn parse_call_args(&mut self) -> Result<Vec<Expr>, ParseError> {
        self.expect(&TokenKind::LParen)?;
        let args = self.with_gt_allowed(|p| p.parse_expr_list(&TokenKind::RParen))?;
        self.cursor.skip_newlines();
        self.expect(&TokenKind::RParen)?;
        Ok(args)
    }

    /// Subscript list after `[`, consuming the `]`.
    fn parse_subscript(&mut self) -> Result<Vec<Expr>, ParseError> {
        let subscript = self.with_gt_allowed(|p| p.parse_expr_list(&TokenKind::RBracket))?;
        if subscript.is_empty() {
            return Err(self.error_expected("subscript"));
        }
        self.cursor.skip_newlines();
        self.expect(&TokenKind::RBracket)?;
        Ok(subscript)
    }

    /// Optional `getline` target: `$expr`, `name` or `name[...]`.
    fn parse_optional_lvalue(&mut self) -> Result<Option<LValue>, ParseError> {
        match self.current_kind() {
            TokenKind::Dollar => {
                self.advance();
                let mut index = Expr::new();
                self.primary_into(&mut index)?;
                Ok(Some(LValue::Field(index)))
            }
            TokenKind::Ident(name) if Builtin::from_name(name).is_none() => {
                self.advance();
                if self.cursor.eat(&TokenKind::LBracket) {
                    let subscript = self.parse_subscript()?;
                    Ok(Some(LValue::Element {
                        name: name.clone(),
                        subscript,
                    }))
                } else {
                    Ok(Some(LValue::Var(name.clone())))
                }
            }
            _ => Ok(None),
        }
    }
}
