//! Expression evaluation on the execute stack.
//!
//! `eval_operand` opens a sub-stack, pushes every term of the flat
//! expression, reduces what is left and returns the single result. Operator
//! semantics live in `apply_unary`/`apply_binary`; arithmetic itself is in
//! `crate::operators`.

use smallvec::SmallVec;

use awk_ir::{Expr, Op, Term};
use awk_value::{
    lhs_not_a_variable, malformed_expression, negative_field_index, not_a_variable, Value,
};

use crate::operators::{arithmetic, compare, compound_base, negate, numeric, step};
use crate::stack_machine::Reduction;
use crate::{Interpreter, Operand, Place};

impl<'p> Interpreter<'p> {
    /// Evaluate `expr` to a value.
    pub(crate) fn eval(&mut self, expr: &'p Expr) -> Value {
        let operand = self.eval_operand(expr);
        self.force(operand)
    }

    /// Evaluate `expr`, leaving a place or regex result unforced.
    pub(crate) fn eval_operand(&mut self, expr: &'p Expr) -> Operand<'p> {
        tracing::trace!(depth = self.stack.depth(), %expr, "evaluate");
        self.stack.begin();
        for term in expr.terms() {
            self.push_term(term);
        }
        let result = self.finish();
        self.stack.end();
        match result {
            Operand::Group(inner) => self.eval_operand(inner),
            other => other,
        }
    }

    fn push_term(&mut self, term: &'p Term) {
        match term {
            Term::Op(op) => self.push_op(*op),
            Term::Value(value) => self.push_operand(Operand::Value(value.clone())),
            Term::Var(name) => self.push_operand(Operand::Place(Place::Scalar(name.clone()))),
            Term::Element { name, subscript } => {
                let key = self.subscript_key(subscript);
                self.push_operand(Operand::Place(Place::Element(name.clone(), key)));
            }
            Term::Group(inner) => self.push_operand(Operand::Group(inner)),
            Term::Subscript(parts) => {
                let key = self.subscript_key(parts);
                self.push_operand(Operand::Value(Value::from(key)));
            }
            Term::Regex(pattern) => self.push_operand(Operand::Regex(pattern)),
            Term::Call { callee, args } => {
                let value = self.call(callee, args);
                self.push_operand(Operand::Value(value));
            }
            Term::Getline(getline) => {
                let value = self.getline(getline);
                self.push_operand(Operand::Value(value));
            }
        }
    }

    /// Evaluate subscript expressions and join them with `SUBSEP`.
    pub(crate) fn subscript_key(&mut self, parts: &'p [Expr]) -> String {
        let values: SmallVec<[Value; 2]> = parts.iter().map(|part| self.eval(part)).collect();
        self.join_subscript(&values)
    }

    fn push_op(&mut self, op: Op) {
        if !op.is_prefix() {
            while self
                .stack
                .top()
                .is_some_and(|frame| frame.should_reduce(op))
            {
                self.unstack();
            }
        }
        if let Some(frame) = self.stack.top() {
            frame.push_op(op);
        }
    }

    fn push_operand(&mut self, operand: Operand<'p>) {
        if self.stack.top().is_some_and(|frame| frame.has_value()) {
            self.push_op(Op::Concat);
        }
        if let Some(frame) = self.stack.top() {
            frame.push_operand(operand);
        }
    }

    /// Reduce the pending operator of the current sub-stack.
    fn unstack(&mut self) {
        let Some(frame) = self.stack.top() else {
            return;
        };
        let result = match frame.take_reduction() {
            Some(Reduction::Unary(op, operand)) => self.apply_unary(op, operand),
            Some(Reduction::Binary(op, lhs, rhs)) => self.apply_binary(op, lhs, rhs),
            None => {
                self.report(malformed_expression());
                if let Some(frame) = self.stack.top() {
                    frame.reset();
                    frame.push_operand(Operand::Value(Value::empty()));
                }
                return;
            }
        };
        if let Some(frame) = self.stack.top() {
            frame.complete(result);
        }
    }

    fn finish(&mut self) -> Operand<'p> {
        while self
            .stack
            .top()
            .is_some_and(|frame| frame.has_pending_op())
        {
            self.unstack();
        }
        let Some(frame) = self.stack.top() else {
            return Operand::Value(Value::empty());
        };
        if frame.is_empty() {
            return Operand::Value(Value::empty());
        }
        match frame.take_result() {
            Some(result) => result,
            None => {
                self.report(malformed_expression());
                Operand::Value(Value::empty())
            }
        }
    }

    /// The value of an operand.
    pub(crate) fn force(&mut self, operand: Operand<'p>) -> Value {
        match operand {
            Operand::Value(value) => value,
            Operand::Null => Value::empty(),
            Operand::Place(place) => self.get_place(&place),
            Operand::Group(inner) => self.eval(inner),
            Operand::Regex(pattern) => Value::boolean(self.match_record(pattern)),
        }
    }

    /// Pattern text of an operand used as a regex.
    pub(crate) fn regex_source(&mut self, operand: Operand<'p>) -> String {
        match operand {
            Operand::Regex(pattern) => pattern.to_string(),
            other => self.force(other).into_string(),
        }
    }

    /// Whether `$0` matches `pattern`; an invalid pattern is reported and
    /// never matches.
    pub(crate) fn match_record(&mut self, pattern: &str) -> bool {
        match self.regexes.is_match(pattern, self.record.text()) {
            Ok(matched) => matched,
            Err(err) => {
                self.report(err);
                false
            }
        }
    }

    /// Field index from a value; negatives are reported and read as 0.
    pub(crate) fn field_index(&mut self, value: &Value) -> usize {
        let index = value.to_integer();
        usize::try_from(index).unwrap_or_else(|_| {
            self.report(negative_field_index(index));
            0
        })
    }

    fn arith(&mut self, op: Op, left: &Value, right: &Value) -> Value {
        arithmetic(op, left, right).unwrap_or_else(|err| {
            self.report(err);
            Value::integer(0)
        })
    }

    fn apply_unary(&mut self, op: Op, operand: Operand<'p>) -> Operand<'p> {
        let value = match op {
            Op::Plus => numeric(&self.force(operand)),
            Op::Neg => negate(&self.force(operand)),
            Op::Not => Value::boolean(!self.force(operand).to_bool()),
            Op::Field => {
                let value = self.force(operand);
                return Operand::Place(Place::Field(self.field_index(&value)));
            }
            Op::PreIncr | Op::PreDecr | Op::PostIncr | Op::PostDecr => {
                let Operand::Place(place) = operand else {
                    self.report(not_a_variable());
                    return Operand::Value(Value::integer(0));
                };
                let old = self.get_place(&place);
                let delta = if matches!(op, Op::PreIncr | Op::PostIncr) {
                    1
                } else {
                    -1
                };
                let new = step(&old, delta);
                self.assign(&place, new.clone());
                if matches!(op, Op::PreIncr | Op::PreDecr) {
                    new
                } else {
                    numeric(&old)
                }
            }
            _ => {
                self.report(malformed_expression());
                Value::empty()
            }
        };
        Operand::Value(value)
    }

    fn apply_binary(&mut self, op: Op, lhs: Operand<'p>, rhs: Operand<'p>) -> Operand<'p> {
        if op.is_assignment() {
            return self.apply_assignment(op, lhs, rhs);
        }
        let value = match op {
            Op::Question => {
                return if self.force(lhs).to_bool() {
                    rhs
                } else {
                    Operand::Null
                };
            }
            Op::Colon => return if lhs.is_null() { rhs } else { lhs },
            Op::Or => Value::boolean(self.force(lhs).to_bool() || self.force(rhs).to_bool()),
            Op::And => Value::boolean(self.force(lhs).to_bool() && self.force(rhs).to_bool()),
            Op::In => {
                let key = self.force(lhs);
                match rhs {
                    Operand::Place(Place::Scalar(name)) => Value::boolean(
                        self.env
                            .lookup(&name)
                            .is_some_and(|variable| variable.has_element(key.as_str())),
                    ),
                    _ => {
                        self.report(not_a_variable());
                        Value::integer(0)
                    }
                }
            }
            Op::Match | Op::NotMatch => {
                let text = self.force(lhs);
                let pattern = self.regex_source(rhs);
                let matched = match self.regexes.is_match(&pattern, text.as_str()) {
                    Ok(matched) => matched,
                    Err(err) => {
                        self.report(err);
                        false
                    }
                };
                Value::boolean(matched == (op == Op::Match))
            }
            Op::Less | Op::LessEq | Op::Equal | Op::NotEqual | Op::GreaterEq | Op::Greater => {
                let left = self.force(lhs);
                let right = self.force(rhs);
                compare(op, &left, &right)
            }
            Op::Concat => {
                let mut text = self.force(lhs).into_string();
                text.push_str(self.force(rhs).as_str());
                Value::from(text)
            }
            Op::Add | Op::Sub | Op::Mul | Op::Div | Op::Mod | Op::Pow => {
                let left = self.force(lhs);
                let right = self.force(rhs);
                self.arith(op, &left, &right)
            }
            _ => {
                self.report(malformed_expression());
                Value::empty()
            }
        };
        Operand::Value(value)
    }

    fn apply_assignment(&mut self, op: Op, lhs: Operand<'p>, rhs: Operand<'p>) -> Operand<'p> {
        let value = self.force(rhs);
        let Operand::Place(place) = lhs else {
            self.report(lhs_not_a_variable());
            return Operand::Value(value);
        };
        let value = match compound_base(op) {
            Some(base) => {
                let current = self.get_place(&place);
                self.arith(base, &current, &value)
            }
            None => value,
        };
        self.assign(&place, value);
        Operand::Place(place)
    }
}
