// program    ::= function*
// function   ::= FUNC IDENT* 'DO' statements 'END'
// statements ::= statement (';' statement)*
// statement  ::= loop | assignment
// loop       ::= 'LOOP' IDENT 'DO' statements 'END'
//              | 'WHILE' IDENT '!=' NUM 'DO' statements 'END'
// assignment ::= IDENT ':=' (call | NUM | IDENT | expr)
// call       ::= FUNC IDENT*
// expr       ::= IDENT ('+' | '-') (IDENT | NUM)

use crate::token::Position;

#[derive(Debug, PartialEq, Eq, Default)]
pub struct Program {
    pub functions: Vec<Function>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Function {
    pub name: Name,
    /// Positional parameters. Duplicates are allowed; order matters.
    pub params: Vec<Name>,
    /// Non empty list of statements.
    pub body: Vec<Stmt>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Stmt {
    Loop(Loop),
    Assignment(Assignment),
}

#[derive(Debug, PartialEq, Eq)]
pub struct Loop {
    pub kind: LoopKind,
    pub var: Name,
    /// Non empty list of statements.
    pub body: Vec<Stmt>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoopKind {
    /// `LOOP x DO .. END`, runs as many times as `x` held on entry.
    Bounded,
    /// `WHILE x != n DO .. END`, runs while `x` is not zero. The literal `n`
    /// is not kept.
    Conditional,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Assignment {
    pub target: Name,
    pub value: Rhs,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Rhs {
    Call(Call),
    /// A bare literal, as in `x0 := 0`.
    Const(u64),
    /// A copy of another variable, as in `x0 := x1`.
    Var(Name),
    Expr(Expr),
}

#[derive(Debug, PartialEq, Eq)]
pub struct Call {
    pub function: Name,
    pub args: Vec<Name>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Expr {
    pub lhs: Name,
    pub op: Operator,
    pub rhs: Operand,
}

/// Right operand of an expression.
#[derive(Debug, PartialEq, Eq)]
pub enum Operand {
    Var(Name),
    Int(u64),
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::Var(var) => var.fmt(f),
            Operand::Int(int) => int.fmt(f),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    /// Subtraction saturating at zero.
    Monus,
}

impl Operator {
    pub const fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Monus => "-",
        }
    }
}

/// A variable or function name, along with where it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name {
    pub name: Box<str>,
    pub pos: Position,
}

impl Name {
    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
