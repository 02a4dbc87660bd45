use std::collections::HashMap;

use crate::{
    ast::{Assignment, Function, Loop, LoopKind, Operand, Operator, Program, Rhs, Stmt},
    runtime::{self, Record},
};

/// Maximum number of nested calls before evaluation gives up.
pub const MAX_CALL_DEPTH: usize = 256;

type Result<T, E = Error> = std::result::Result<T, E>;

/// Evaluates functions of a program directly over its AST.
pub struct Interpreter<'prog> {
    functions: HashMap<&'prog str, &'prog Function>,
}

impl<'prog> Interpreter<'prog> {
    /// Indexes the program's functions. When a name is declared more than
    /// once, the last declaration wins.
    pub fn new(program: &'prog Program) -> Interpreter<'prog> {
        let functions = program
            .functions
            .iter()
            .map(|function| (function.name.as_str(), function))
            .collect();
        Interpreter { functions }
    }

    /// Calls `name` with the given arguments, returning the final value of
    /// its `x0` variable.
    pub fn call(&self, name: &str, args: &[u64]) -> Result<u64> {
        self.invoke(name, args, 0)
    }

    fn invoke(&self, name: &str, args: &[u64], depth: usize) -> Result<u64> {
        let Some(function) = self.functions.get(name) else {
            return Err(Error::UndefinedFunction(name.to_owned()));
        };
        if function.params.len() != args.len() {
            return Err(Error::ArityMismatch {
                function: name.to_owned(),
                expected: function.params.len(),
                actual: args.len(),
            });
        }
        if depth >= MAX_CALL_DEPTH {
            return Err(Error::RecursionLimit(MAX_CALL_DEPTH));
        }

        let mut record = Record::new();
        for (param, arg) in function.params.iter().zip(args) {
            record.set(param.as_str(), *arg);
        }
        self.exec_block(&mut record, &function.body, depth)?;
        Ok(record.get("x0"))
    }

    fn exec_block(&self, record: &mut Record, body: &[Stmt], depth: usize) -> Result<()> {
        for stmt in body {
            match stmt {
                Stmt::Loop(l) => self.exec_loop(record, l, depth)?,
                Stmt::Assignment(a) => self.exec_assignment(record, a, depth)?,
            }
        }
        Ok(())
    }

    fn exec_loop(&self, record: &mut Record, l: &Loop, depth: usize) -> Result<()> {
        match l.kind {
            LoopKind::Bounded => {
                let count = record.get(l.var.as_str());
                for _ in 0..count {
                    self.exec_block(record, &l.body, depth)?;
                }
            }
            LoopKind::Conditional => {
                while record.get(l.var.as_str()) != 0 {
                    self.exec_block(record, &l.body, depth)?;
                }
            }
        }
        Ok(())
    }

    fn exec_assignment(&self, record: &mut Record, a: &Assignment, depth: usize) -> Result<()> {
        let value = match &a.value {
            Rhs::Call(call) => {
                let args: Vec<_> = call.args.iter().map(|arg| record.get(arg.as_str())).collect();
                self.invoke(call.function.as_str(), &args, depth + 1)?
            }
            Rhs::Const(value) => *value,
            Rhs::Var(var) => record.get(var.as_str()),
            Rhs::Expr(expr) => {
                let lhs = record.get(expr.lhs.as_str());
                let rhs = match &expr.rhs {
                    Operand::Var(var) => record.get(var.as_str()),
                    Operand::Int(int) => *int,
                };
                match expr.op {
                    Operator::Add => runtime::plus(lhs, rhs).ok_or(Error::Overflow)?,
                    Operator::Monus => runtime::subtract(lhs, rhs),
                }
            }
        };
        record.set(a.target.as_str(), value);
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("function {0} is not defined")]
    UndefinedFunction(String),
    #[error("function {function} takes {expected} arguments, but got {actual}")]
    ArityMismatch {
        function: String,
        expected: usize,
        actual: usize,
    },
    #[error("arithmetic overflow")]
    Overflow,
    #[error("maximum call depth of {0} exceeded")]
    RecursionLimit(usize),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_program;

    fn run(src: &str, function: &str, args: &[u64]) -> Result<u64> {
        let program = parse_program(src).expect("failed to parse");
        Interpreter::new(&program).call(function, args)
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(run("f x1 DO x0 := x1 + 1 END", "f", &[5]), Ok(6));
        assert_eq!(run("f x1 DO x0 := x1 - 7 END", "f", &[5]), Ok(0));
        assert_eq!(run("f x1 DO x0 := x1 - 2 END", "f", &[5]), Ok(3));
        assert_eq!(run("f DO x0 := 42 END", "f", &[]), Ok(42));
        assert_eq!(run("f x1 DO x0 := x1 END", "f", &[9]), Ok(9));
        assert_eq!(run("f x1 x2 DO x0 := x1 - x2 END", "f", &[2, 5]), Ok(0));
        assert_eq!(run("f x1 x2 DO x0 := x1 - x2 END", "f", &[5, 2]), Ok(3));
        assert_eq!(run("f x1 x2 DO x0 := x1 + x2 END", "f", &[5, 2]), Ok(7));
    }

    #[test]
    fn test_unassigned_variables_are_zero() {
        assert_eq!(run("f DO x3 := x7 + 0 END", "f", &[]), Ok(0));
        assert_eq!(run("f DO x0 := x7 + 2 END", "f", &[]), Ok(2));
    }

    #[test]
    fn test_bounded_loop_snapshots_count() {
        let src = "f x1 DO LOOP x1 DO x1 := x1 + 1; x0 := x0 + 1 END END";
        assert_eq!(run(src, "f", &[4]), Ok(4));
        let src = "f x1 DO LOOP x1 DO x1 := x1 - 1; x0 := x0 + 1 END END";
        assert_eq!(run(src, "f", &[4]), Ok(4));
    }

    #[test]
    fn test_conditional_loop_ignores_literal() {
        let src = "f x1 DO WHILE x1 != 5 DO x1 := x1 - 1; x0 := x0 + 1 END END";
        assert_eq!(run(src, "f", &[3]), Ok(3));
        assert_eq!(run(src, "f", &[9]), Ok(9));
        assert_eq!(run(src, "f", &[0]), Ok(0));
    }

    #[test]
    fn test_calls() {
        let src = "
            add x1 x2 DO x0 := x1 + 0; LOOP x2 DO x0 := x0 + 1 END END
            mul x1 x2 DO LOOP x2 DO x0 := add x0 x1 END END
        ";
        assert_eq!(run(src, "mul", &[6, 7]), Ok(42));
        assert_eq!(run(src, "mul", &[6, 0]), Ok(0));
    }

    #[test]
    fn test_duplicate_params_last_wins() {
        assert_eq!(run("f x1 x1 DO x0 := x1 + 0 END", "f", &[1, 2]), Ok(2));
    }

    #[test]
    fn test_later_declaration_shadows() {
        let src = "f DO x0 := 1 END f DO x0 := 2 END";
        assert_eq!(run(src, "f", &[]), Ok(2));
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            run("f DO x0 := g END", "f", &[]),
            Err(Error::UndefinedFunction("g".to_owned()))
        );
        assert_eq!(
            run("f x1 DO x0 := x1 + 1 END", "f", &[]),
            Err(Error::ArityMismatch {
                function: "f".to_owned(),
                expected: 1,
                actual: 0,
            })
        );
        assert_eq!(
            run("f DO x0 := f END", "f", &[]),
            Err(Error::RecursionLimit(MAX_CALL_DEPTH))
        );
        assert_eq!(
            run("f x1 DO x0 := x1 + 1 END", "f", &[u64::MAX]),
            Err(Error::Overflow)
        );
    }
}
