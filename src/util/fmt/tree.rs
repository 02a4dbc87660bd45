use std::io::Write;

use crate::{ast::*, token::Position};

const INDENT_WIDTH: usize = 2;

pub fn print_program_string(program: &Program) -> String {
    let mut buf = Vec::with_capacity(1024);
    print_program(&mut buf, program).unwrap();
    String::from_utf8(buf).unwrap()
}

pub fn print_program(w: &mut impl Write, program: &Program) -> std::io::Result<()> {
    for function in &program.functions {
        print_function(w, 0, function)?;
    }
    Ok(())
}

fn print_function(w: &mut impl Write, i: usize, function: &Function) -> std::io::Result<()> {
    sp(w, i)?;
    write!(w, "function {}(", function.name)?;
    for (idx, param) in function.params.iter().enumerate() {
        if idx > 0 {
            write!(w, ", ")?;
        }
        write!(w, "{param}")?;
    }
    writeln!(w, ") {}", pos(function.name.pos))?;
    print_block(w, i + 1, &function.body)
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
        Stmt::Loop(l) => {
            let keyword = match l.kind {
                LoopKind::Bounded => "loop",
                LoopKind::Conditional => "while",
            };
            writeln!(w, "{keyword} {} {}", l.var, pos(l.var.pos))?;
            print_block(w, i + 1, &l.body)?;
        }
        Stmt::Assignment(a) => {
            writeln!(w, "assign {} {}", a.target, pos(a.target.pos))?;
            sp(w, i + 1)?;
            print_rhs(w, &a.value)?;
        }
    }
    Ok(())
}

fn print_rhs(w: &mut impl Write, rhs: &Rhs) -> std::io::Result<()> {
    match rhs {
        Rhs::Call(Call { function, args }) => {
            write!(w, "call {function}(")?;
            for (idx, arg) in args.iter().enumerate() {
                if idx > 0 {
                    write!(w, ", ")?;
                }
                write!(w, "{arg}")?;
            }
            writeln!(w, ")")
        }
        Rhs::Const(value) => writeln!(w, "const {value}"),
        Rhs::Var(var) => writeln!(w, "var {var}"),
        Rhs::Expr(Expr { lhs, op, rhs }) => {
            let op = match op {
                Operator::Add => "add",
                Operator::Monus => "monus",
            };
            writeln!(w, "{op} {lhs} {rhs}")
        }
    }
}

fn pos(Position { line, word }: Position) -> String {
    format!("({line}:{word})")
}

fn sp(w: &mut impl Write, i: usize) -> std::io::Result<()> {
    write!(w, "{:width$}", "", width = i * INDENT_WIDTH)
}
