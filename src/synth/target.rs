//! The subset of Python produced by the synthesizer.
//!
//! Every generated function follows the same shape: it creates a fresh
//! `Data` record, copies its parameters into it, runs its statements and
//! returns the record's `x0` variable. The `Data` class and the arithmetic
//! primitives live in a fixed prelude (see [`super::print::PRELUDE`]).

#[derive(Debug, PartialEq, Eq, Default)]
pub struct Module {
    pub defs: Vec<Def>,
}

/// `def name(arg1, .., argN): body; return ret`
#[derive(Debug, PartialEq, Eq)]
pub struct Def {
    pub name: Box<str>,
    /// Parameters are positional and named `arg1` to `argN`.
    pub arity: usize,
    pub body: Vec<Stmt>,
    pub ret: Value,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Stmt {
    /// `data = Data()`
    NewRecord,
    /// `data.set('var', value)`
    Set { var: Box<str>, value: Value },
    /// `for _ in range(count):`
    ///
    /// The count is evaluated once, before the first iteration.
    For { count: Value, body: Vec<Stmt> },
    /// `while cond != 0:`
    While { cond: Value, body: Vec<Stmt> },
}

#[derive(Debug, PartialEq, Eq)]
pub enum Value {
    /// `data.get('var')`
    Get(Box<str>),
    /// The parameter of the enclosing function at the given (zero-based)
    /// index.
    Param(usize),
    Int(u64),
    /// `plus(lhs, rhs)` or `subtract(lhs, rhs)`
    Primitive {
        primitive: Primitive,
        lhs: Box<Value>,
        rhs: Box<Value>,
    },
    /// `function(args...)`
    Call {
        function: Box<str>,
        args: Vec<Value>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Primitive {
    Plus,
    Subtract,
}

impl Primitive {
    pub const fn name(self) -> &'static str {
        match self {
            Primitive::Plus => "plus",
            Primitive::Subtract => "subtract",
        }
    }
}
