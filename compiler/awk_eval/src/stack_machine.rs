//! Operator-precedence reduction over flat expressions.
//!
//! Each expression evaluation opens a [`SubStack`] on the shared
//! [`ExecuteStack`]. Terms are pushed in source order; whenever an
//! incoming operator binds looser than the pending one, the pending one is
//! reduced first. Calls and groups forced mid-expression open their own
//! sub-stack on top, so a reduction never holds a borrow across nested
//! evaluation: it pops what it needs, computes, then pushes the result.

use awk_ir::Op;

use crate::Operand;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Slot<'p> {
    Operand(Operand<'p>),
    Op(Op),
}

/// What a single reduction step consumes.
#[derive(Debug, PartialEq)]
pub(crate) enum Reduction<'p> {
    Unary(Op, Operand<'p>),
    Binary(Op, Operand<'p>, Operand<'p>),
}

/// Evaluation state of one expression.
#[derive(Debug, Default)]
pub(crate) struct SubStack<'p> {
    slots: Vec<Slot<'p>>,
    /// Operators shadowed by `last_op`, innermost last.
    pending: Vec<Option<Op>>,
    last_op: Option<Op>,
    /// Whether the top slot holds a finished operand.
    value: bool,
}

impl<'p> SubStack<'p> {
    #[inline]
    pub(crate) fn has_value(&self) -> bool {
        self.value
    }

    #[inline]
    pub(crate) fn has_pending_op(&self) -> bool {
        self.last_op.is_some()
    }

    /// Whether `incoming` has to wait until the pending operator is reduced.
    pub(crate) fn should_reduce(&self, incoming: Op) -> bool {
        self.value
            && self
                .last_op
                .is_some_and(|last| last.binds_tighter_than(incoming))
    }

    pub(crate) fn push_op(&mut self, op: Op) {
        self.pending.push(self.last_op);
        self.last_op = Some(op);
        self.slots.push(Slot::Op(op));
        self.value = op.is_postfix();
    }

    pub(crate) fn push_operand(&mut self, operand: Operand<'p>) {
        self.slots.push(Slot::Operand(operand));
        self.value = true;
    }

    /// Pop the operands and operator of the pending operation.
    ///
    /// Accepts `[prefix-op, operand]`, `[operand, postfix-op]` and
    /// `[operand, op, operand]`; anything else leaves the stack untouched.
    pub(crate) fn take_reduction(&mut self) -> Option<Reduction<'p>> {
        let len = self.slots.len();
        let reduction = match self.slots.get(len.checked_sub(2)?..)? {
            [Slot::Op(op), Slot::Operand(_)] if op.is_prefix() => {
                let op = *op;
                let Some(Slot::Operand(operand)) = self.slots.pop() else {
                    return None;
                };
                self.slots.pop();
                Reduction::Unary(op, operand)
            }
            [Slot::Operand(_), Slot::Op(op)] if op.is_postfix() => {
                let op = *op;
                self.slots.pop();
                let Some(Slot::Operand(operand)) = self.slots.pop() else {
                    return None;
                };
                Reduction::Unary(op, operand)
            }
            [Slot::Op(op), Slot::Operand(_)] => {
                let op = *op;
                if !matches!(self.slots.get(len.checked_sub(3)?), Some(Slot::Operand(_))) {
                    return None;
                }
                let Some(Slot::Operand(rhs)) = self.slots.pop() else {
                    return None;
                };
                self.slots.pop();
                let Some(Slot::Operand(lhs)) = self.slots.pop() else {
                    return None;
                };
                Reduction::Binary(op, lhs, rhs)
            }
            _ => return None,
        };
        Some(reduction)
    }

    /// Push the result of the reduction just taken and restore the
    /// operator it shadowed.
    pub(crate) fn complete(&mut self, result: Operand<'p>) {
        self.last_op = self.pending.pop().flatten();
        self.push_operand(result);
    }

    /// Drop everything after a malformed reduction.
    pub(crate) fn reset(&mut self) {
        self.slots.clear();
        self.pending.clear();
        self.last_op = None;
        self.value = false;
    }

    /// The single remaining operand, once all operators are reduced.
    pub(crate) fn take_result(&mut self) -> Option<Operand<'p>> {
        match self.slots.as_slice() {
            [Slot::Operand(_)] => match self.slots.pop() {
                Some(Slot::Operand(operand)) => Some(operand),
                _ => None,
            },
            _ => None,
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Stack of sub-stacks, one per expression under evaluation.
#[derive(Debug, Default)]
pub(crate) struct ExecuteStack<'p> {
    frames: Vec<SubStack<'p>>,
}

impl<'p> ExecuteStack<'p> {
    pub(crate) fn begin(&mut self) {
        self.frames.push(SubStack::default());
    }

    pub(crate) fn end(&mut self) {
        self.frames.pop();
    }

    pub(crate) fn top(&mut self) -> Option<&mut SubStack<'p>> {
        self.frames.last_mut()
    }

    pub(crate) fn depth(&self) -> usize {
        self.frames.len()
    }
}
