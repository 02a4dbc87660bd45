//! Executes synthesized modules in process, with the semantics the Python
//! prelude gives them. This is what allows checking the lowering against
//! [`crate::eval`] without a Python interpreter at hand.

use std::collections::HashMap;

use crate::{
    eval::{Error, MAX_CALL_DEPTH},
    runtime::{self, Record},
    synth::target::{Def, Module, Primitive, Stmt, Value},
};

type Result<T, E = Error> = std::result::Result<T, E>;

pub struct Machine<'m> {
    defs: HashMap<&'m str, &'m Def>,
}

struct Frame<'a> {
    args: &'a [u64],
    record: Record,
}

impl<'m> Machine<'m> {
    /// Later definitions rebind earlier ones, as Python's `def` does.
    pub fn new(module: &'m Module) -> Machine<'m> {
        let defs = module
            .defs
            .iter()
            .map(|def| (&*def.name, def))
            .collect();
        Machine { defs }
    }

    /// Calls the target function `name`.
    pub fn call(&self, name: &str, args: &[u64]) -> Result<u64> {
        self.invoke(name, args, 0)
    }

    fn invoke(&self, name: &str, args: &[u64], depth: usize) -> Result<u64> {
        let Some(def) = self.defs.get(name) else {
            return Err(Error::UndefinedFunction(name.to_owned()));
        };
        if def.arity != args.len() {
            return Err(Error::ArityMismatch {
                function: name.to_owned(),
                expected: def.arity,
                actual: args.len(),
            });
        }
        if depth >= MAX_CALL_DEPTH {
            return Err(Error::RecursionLimit(MAX_CALL_DEPTH));
        }

        let mut frame = Frame {
            args,
            record: Record::new(),
        };
        self.exec_block(&mut frame, &def.body, depth)?;
        self.value(&frame, &def.ret, depth)
    }

    fn exec_block(&self, frame: &mut Frame<'_>, body: &[Stmt], depth: usize) -> Result<()> {
        for stmt in body {
            match stmt {
                Stmt::NewRecord => frame.record = Record::new(),
                Stmt::Set { var, value } => {
                    let value = self.value(frame, value, depth)?;
                    frame.record.set(var, value);
                }
                Stmt::For { count, body } => {
                    let count = self.value(frame, count, depth)?;
                    for _ in 0..count {
                        self.exec_block(frame, body, depth)?;
                    }
                }
                Stmt::While { cond, body } => {
                    while self.value(frame, cond, depth)? != 0 {
                        self.exec_block(frame, body, depth)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn value(&self, frame: &Frame<'_>, value: &Value, depth: usize) -> Result<u64> {
        let value = match value {
            Value::Get(var) => frame.record.get(var),
            Value::Param(idx) => frame.args[*idx],
            Value::Int(int) => *int,
            Value::Primitive {
                primitive,
                lhs,
                rhs,
            } => {
                let lhs = self.value(frame, lhs, depth)?;
                let rhs = self.value(frame, rhs, depth)?;
                match primitive {
                    Primitive::Plus => runtime::plus(lhs, rhs).ok_or(Error::Overflow)?,
                    Primitive::Subtract => runtime::subtract(lhs, rhs),
                }
            }
            Value::Call { function, args } => {
                let args = args
                    .iter()
                    .map(|arg| self.value(frame, arg, depth))
                    .collect::<Result<Vec<_>>>()?;
                self.invoke(function, &args, depth + 1)?
            }
        };
        Ok(value)
    }
}
