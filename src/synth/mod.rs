use std::borrow::Cow;

use crate::ast::{self, LoopKind, Operand, Operator, Rhs};

pub mod exec;
pub mod print;
pub mod target;

use target::{Def, Module, Primitive, Stmt, Value};

/// Variable holding the result of every function.
pub const RETURN_VAR: &str = "x0";

/// Names a source function can't keep in the target, since they are Python
/// keywords or would shadow (or be shadowed by) the generated support code.
const RESERVED: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield", "Data", "plus", "subtract", "range", "data", "_",
];

/// Synthesizes Python source code for the given program.
pub fn synthesize(program: &ast::Program) -> String {
    print::print_module_string(&lower(program))
}

/// Maps the source program into its target representation.
pub fn lower(program: &ast::Program) -> Module {
    let defs = program.functions.iter().map(lower_function).collect();
    Module { defs }
}

/// Returns the name under which the source function `name` is defined in
/// the target. Names which aren't valid there get a `fn_` prefix, as do names
/// already starting with it, so distinct source names never share a target
/// name.
pub fn target_name(name: &str) -> Cow<'_, str> {
    let is_param = |name: &str| {
        name.strip_prefix("arg")
            .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
    };
    let starts_with_digit = name.starts_with(|c: char| c.is_ascii_digit());
    let is_prefixed = name.starts_with("fn_");
    if starts_with_digit || is_prefixed || is_param(name) || RESERVED.contains(&name) {
        Cow::Owned(format!("fn_{name}"))
    } else {
        Cow::Borrowed(name)
    }
}

fn lower_function(function: &ast::Function) -> Def {
    let mut body = Vec::with_capacity(1 + function.params.len() + function.body.len());
    body.push(Stmt::NewRecord);
    for (idx, param) in function.params.iter().enumerate() {
        body.push(Stmt::Set {
            var: param.as_str().into(),
            value: Value::Param(idx),
        });
    }
    lower_block(&mut body, &function.body);

    log::debug!("synthesized function {}", function.name);
    Def {
        name: target_name(function.name.as_str()).into(),
        arity: function.params.len(),
        body,
        ret: Value::Get(RETURN_VAR.into()),
    }
}

fn lower_block(out: &mut Vec<Stmt>, body: &[ast::Stmt]) {
    out.extend(body.iter().map(lower_stmt));
}

fn lower_stmt(stmt: &ast::Stmt) -> Stmt {
    match stmt {
        ast::Stmt::Loop(l) => {
            let var = Value::Get(l.var.as_str().into());
            let mut body = Vec::with_capacity(l.body.len());
            lower_block(&mut body, &l.body);
            match l.kind {
                LoopKind::Bounded => Stmt::For { count: var, body },
                LoopKind::Conditional => Stmt::While { cond: var, body },
            }
        }
        ast::Stmt::Assignment(a) => Stmt::Set {
            var: a.target.as_str().into(),
            value: lower_rhs(&a.value),
        },
    }
}

fn lower_rhs(rhs: &Rhs) -> Value {
    match rhs {
        Rhs::Call(call) => Value::Call {
            function: target_name(call.function.as_str()).into(),
            args: call
                .args
                .iter()
                .map(|arg| Value::Get(arg.as_str().into()))
                .collect(),
        },
        Rhs::Const(value) => Value::Int(*value),
        Rhs::Var(var) => Value::Get(var.as_str().into()),
        Rhs::Expr(expr) => {
            let primitive = match expr.op {
                Operator::Add => Primitive::Plus,
                Operator::Monus => Primitive::Subtract,
            };
            let rhs = match &expr.rhs {
                Operand::Var(var) => Value::Get(var.as_str().into()),
                Operand::Int(int) => Value::Int(*int),
            };
            Value::Primitive {
                primitive,
                lhs: Box::new(Value::Get(expr.lhs.as_str().into())),
                rhs: Box::new(rhs),
            }
        }
    }
}
