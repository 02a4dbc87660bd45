use std::io::Write;

use crate::synth::target::{Def, Module, Stmt, Value};

const INDENT_WIDTH: usize = 4;

/// Name of the record variable inside every generated function.
pub const RECORD: &str = "data";

/// Runtime support emitted once, at the top of every module.
pub const PRELUDE: &str = "\
class Data:
    def __init__(self):
        self.vars = {}

    def get(self, name):
        return self.vars.get(name, 0)

    def set(self, name, value):
        self.vars[name] = value


def plus(a, b):
    return a + b


def subtract(a, b):
    return 0 if b > a else a - b
";

fn sp(w: &mut impl Write, i: usize) -> std::io::Result<()> {
    write!(w, "{:width$}", "", width = i * INDENT_WIDTH)
}

pub fn print_module_string(module: &Module) -> String {
    let mut buf = Vec::with_capacity(PRELUDE.len() + 256 * module.defs.len());
    print_module(&mut buf, module).unwrap();
    String::from_utf8(buf).unwrap()
}

pub fn print_module(w: &mut impl Write, module: &Module) -> std::io::Result<()> {
    w.write_all(PRELUDE.as_bytes())?;
    for def in &module.defs {
        writeln!(w)?;
        writeln!(w)?;
        print_def(w, 0, def)?;
    }
    Ok(())
}

fn print_def(w: &mut impl Write, i: usize, def: &Def) -> std::io::Result<()> {
    sp(w, i)?;
    write!(w, "def {}(", def.name)?;
    for idx in 0..def.arity {
        if idx > 0 {
            write!(w, ", ")?;
        }
        print_value(w, &Value::Param(idx))?;
    }
    writeln!(w, "):")?;
    print_block(w, i + 1, &def.body)?;
    sp(w, i + 1)?;
    write!(w, "return ")?;
    print_value(w, &def.ret)?;
    writeln!(w)
}

fn print_block(w: &mut impl Write, i: usize, body: &[Stmt]) -> std::io::Result<()> {
    for stmt in body {
        print_stmt(w, i, stmt)?;
    }
    Ok(())
}

fn print_stmt(w: &mut impl Write, i: usize, stmt: &Stmt) -> std::io::Result<()> {
    sp(w, i)?;
    match stmt {
        Stmt::NewRecord => writeln!(w, "{RECORD} = Data()")?,
        Stmt::Set { var, value } => {
            write!(w, "{RECORD}.set('{var}', ")?;
            print_value(w, value)?;
            writeln!(w, ")")?;
        }
        Stmt::For { count, body } => {
            write!(w, "for _ in range(")?;
            print_value(w, count)?;
            writeln!(w, "):")?;
            print_block(w, i + 1, body)?;
        }
        Stmt::While { cond, body } => {
            write!(w, "while ")?;
            print_value(w, cond)?;
            writeln!(w, " != 0:")?;
            print_block(w, i + 1, body)?;
        }
    }
    Ok(())
}

fn print_value(w: &mut impl Write, value: &Value) -> std::io::Result<()> {
    match value {
        Value::Get(var) => write!(w, "{RECORD}.get('{var}')"),
        Value::Param(idx) => write!(w, "arg{}", idx + 1),
        Value::Int(int) => write!(w, "{int}"),
        Value::Primitive {
            primitive,
            lhs,
            rhs,
        } => {
            write!(w, "{}(", primitive.name())?;
            print_value(w, lhs)?;
            write!(w, ", ")?;
            print_value(w, rhs)?;
            write!(w, ")")
        }
        Value::Call { function, args } => {
            write!(w, "{function}(")?;
            for (idx, arg) in args.iter().enumerate() {
                if idx > 0 {
                    write!(w, ", ")?;
                }
                print_value(w, arg)?;
            }
            write!(w, ")")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::target::Primitive;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_module_is_prelude() {
        assert_eq!(print_module_string(&Module::default()), PRELUDE);
    }

    #[test]
    fn test_nested_blocks_are_indented() {
        let module = Module {
            defs: vec![Def {
                name: "f".into(),
                arity: 0,
                body: vec![
                    Stmt::NewRecord,
                    Stmt::For {
                        count: Value::Int(3),
                        body: vec![Stmt::While {
                            cond: Value::Get("x2".into()),
                            body: vec![Stmt::Set {
                                var: "x2".into(),
                                value: Value::Primitive {
                                    primitive: Primitive::Subtract,
                                    lhs: Box::new(Value::Get("x2".into())),
                                    rhs: Box::new(Value::Int(1)),
                                },
                            }],
                        }],
                    },
                    Stmt::Set {
                        var: "x0".into(),
                        value: Value::Call {
                            function: "g".into(),
                            args: vec![Value::Get("x1".into()), Value::Int(2)],
                        },
                    },
                ],
                ret: Value::Get("x0".into()),
            }],
        };
        let printed = print_module_string(&module);
        let def = printed.strip_prefix(PRELUDE).unwrap();
        assert_eq!(
            def,
            indoc! {"


                def f():
                    data = Data()
                    for _ in range(3):
                        while data.get('x2') != 0:
                            data.set('x2', subtract(data.get('x2'), 1))
                    data.set('x0', g(data.get('x1'), 2))
                    return data.get('x0')
            "}
        );
    }
}
