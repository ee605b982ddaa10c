//! Function calls.

use awk_ir::{Callee, Expr, Name};
use awk_stack::ensure_sufficient_stack;
use awk_value::{too_many_args, unknown_function, Value};

use crate::{ActionBlock, Interpreter, Variable};

impl<'p> Interpreter<'p> {
    pub(crate) fn call(&mut self, callee: &'p Callee, args: &'p [Expr]) -> Value {
        match callee {
            Callee::Builtin(builtin) => self.call_builtin(*builtin, args),
            Callee::User(name) => self.call_user(name, args),
        }
    }

    /// Call a user-defined function.
    ///
    /// Arguments are bound by value, except that a bare variable name
    /// shares its element map with the parameter. Parameters without an
    /// argument start out empty and serve as locals.
    fn call_user(&mut self, name: &Name, args: &'p [Expr]) -> Value {
        let program = self.program;
        let Some(function) = program.function(name) else {
            self.report(unknown_function(name));
            return Value::empty();
        };
        if args.len() > function.params.len() {
            self.report(too_many_args(name));
            return Value::empty();
        }

        let mut block = ActionBlock::new();
        for (param, arg) in function.params.iter().zip(args) {
            let variable = match arg.as_variable() {
                Some(source) => {
                    let source = self.env.lookup_or_create(source);
                    Variable::sharing(param.clone(), source.value().clone(), source.elements())
                }
                None => Variable::with_value(param.clone(), self.eval(arg)),
            };
            block.define(variable);
        }
        for param in &function.params[args.len()..] {
            block.define(Variable::new(param.clone()));
        }

        tracing::debug!(function = %name, depth = self.env.depth() + 1, "call");
        ensure_sufficient_stack(|| {
            self.with_block(block, |scoped| {
                scoped.exec_list(&function.body);
                scoped.env.return_value().clone()
            })
        })
    }
}
