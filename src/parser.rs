use crate::{
    ast::{
        Assignment, Call, Expr, Function, Loop, LoopKind, Name, Operand, Operator, Program, Rhs,
        Stmt,
    },
    error::Error as CompileError,
    lexer::Lexer,
    token::{Position, Token, TokenKind},
};

type Result<T, E = CompileError> = std::result::Result<T, E>;

/// Maximum number of loops nested inside one another.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Lexes and parses the given source, stopping at the first error.
pub fn parse_program(src: &str) -> Result<Program> {
    let mut p = Parser::new(Lexer::new(src))?;
    p.parse_program()
}

/// Recursive descent parser with a single token of lookahead. Tokens are
/// pulled from the lexer as the parser advances.
struct Parser<'src> {
    lexer: Lexer<'src>,
    current: Token<'src>,
    /// Number of loops enclosing the current token.
    depth: usize,
}

impl Parser<'_> {
    fn parse_program(&mut self) -> Result<Program> {
        let mut functions = Vec::with_capacity(4);
        while self.is(TokenKind::Func) {
            functions.push(self.parse_function()?);
        }
        self.expect_any(&[TokenKind::Func, TokenKind::Eof])?;
        Ok(Program { functions })
    }

    fn parse_function(&mut self) -> Result<Function> {
        let name = self.consume(TokenKind::Func)?;
        let params = self.parse_names(TokenKind::Ident)?;
        self.consume(TokenKind::Do)?;
        let body = self.parse_statements()?;
        self.consume(TokenKind::End)?;

        log::debug!(
            "parsed function {name} ({} params, {} statements)",
            params.len(),
            body.len()
        );
        Ok(Function { name, params, body })
    }

    /// Parses `statement (';' statement)*`. The list ends at the first
    /// statement which isn't followed by a semicolon.
    fn parse_statements(&mut self) -> Result<Vec<Stmt>> {
        let mut statements = Vec::new();
        loop {
            let statement = if self.is(TokenKind::Loop) || self.is(TokenKind::While) {
                Stmt::Loop(self.parse_loop()?)
            } else {
                Stmt::Assignment(self.parse_assignment()?)
            };
            statements.push(statement);
            if !self.take(TokenKind::Semicolon)? {
                break;
            }
        }
        Ok(statements)
    }

    fn parse_loop(&mut self) -> Result<Loop> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(Error::TooDeep {
                limit: MAX_NESTING_DEPTH,
                pos: self.current.pos,
            }
            .into());
        }
        let keyword = self.advance()?;
        let kind = match keyword.kind {
            TokenKind::Loop => LoopKind::Bounded,
            TokenKind::While => LoopKind::Conditional,
            _ => unreachable!("caller checks for a loop keyword"),
        };
        let var = self.consume(TokenKind::Ident)?;
        if kind == LoopKind::Conditional {
            // The compared literal is checked for shape only: conditional
            // loops always compare against zero.
            self.consume(TokenKind::NotEq)?;
            self.consume(TokenKind::Num)?;
        }
        self.consume(TokenKind::Do)?;
        self.depth += 1;
        let body = self.parse_statements();
        self.depth -= 1;
        let body = body?;
        self.consume(TokenKind::End)?;
        Ok(Loop { kind, var, body })
    }

    fn parse_assignment(&mut self) -> Result<Assignment> {
        let target = self.consume(TokenKind::Ident)?;
        self.consume(TokenKind::Assign)?;
        let value = if self.is(TokenKind::Func) {
            let function = self.consume(TokenKind::Func)?;
            let args = self.parse_names(TokenKind::Ident)?;
            Rhs::Call(Call { function, args })
        } else if self.is(TokenKind::Num) {
            Rhs::Const(self.parse_int()?)
        } else {
            let lhs = self.consume(TokenKind::Ident)?;
            if self.is(TokenKind::Op) {
                Rhs::Expr(self.parse_expr(lhs)?)
            } else {
                Rhs::Var(lhs)
            }
        };
        Ok(Assignment { target, value })
    }

    fn parse_expr(&mut self, lhs: Name) -> Result<Expr> {
        let op_token = self.current;
        self.consume(TokenKind::Op)?;
        let op = match op_token.lexeme {
            "+" => Operator::Add,
            "-" => Operator::Monus,
            _ => unreachable!("lexer only produces `+` and `-` operators"),
        };
        self.expect_any(&[TokenKind::Ident, TokenKind::Num])?;
        let rhs = if self.is(TokenKind::Ident) {
            Operand::Var(self.consume(TokenKind::Ident)?)
        } else {
            Operand::Int(self.parse_int()?)
        };
        Ok(Expr { lhs, op, rhs })
    }

    fn parse_int(&mut self) -> Result<u64> {
        let num = self.consume(TokenKind::Num)?;
        num.name.parse::<u64>().map_err(|_| {
            Error::IntOutOfRange {
                literal: num.name.to_string(),
                pos: num.pos,
            }
            .into()
        })
    }

    /// Parses a possibly empty run of tokens of the given kind.
    fn parse_names(&mut self, kind: TokenKind) -> Result<Vec<Name>> {
        let mut names = Vec::new();
        while self.is(kind) {
            names.push(self.consume(kind)?);
        }
        Ok(names)
    }
}

impl<'src> Parser<'src> {
    /// Constructs a parser, pulling the first token.
    fn new(mut lexer: Lexer<'src>) -> Result<Parser<'src>> {
        let current = match lexer.next() {
            Some(token) => token?,
            None => unreachable!("lexer yields at least the end of input"),
        };
        Ok(Parser {
            lexer,
            current,
            depth: 0,
        })
    }

    /// Returns the current token and fetches the next one. Once the end of
    /// input is reached, it stays current.
    fn advance(&mut self) -> Result<Token<'src>> {
        let consumed = self.current;
        if let Some(next) = self.lexer.next() {
            self.current = next?;
        }
        Ok(consumed)
    }

    /// Checks whether the current token is of the given kind.
    fn is(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Advances if the current token is of the given kind, returning true.
    /// If not, returns false and doesn't advance.
    fn take(&mut self, kind: TokenKind) -> Result<bool> {
        if self.is(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Fails unless the current token is of the given kind. Doesn't advance.
    fn expect(&self, expected: TokenKind) -> Result<()> {
        if self.is(expected) {
            return Ok(());
        }
        Err(Error::Unexpected {
            expected,
            actual: self.current.kind,
            pos: self.current.pos,
        }
        .into())
    }

    /// Fails unless the current token is of one of the given kinds. Doesn't
    /// advance.
    fn expect_any(&self, expected: &'static [TokenKind]) -> Result<()> {
        if expected.iter().any(|kind| self.is(*kind)) {
            return Ok(());
        }
        Err(Error::UnexpectedAny {
            expected,
            actual: self.current.kind,
            pos: self.current.pos,
        }
        .into())
    }

    /// Advances if the current token is of the given kind, returning its
    /// lexeme as a [`Name`]. If not, fails.
    fn consume(&mut self, kind: TokenKind) -> Result<Name> {
        self.expect(kind)?;
        let token = self.advance()?;
        Ok(Name {
            name: token.lexeme.into(),
            pos: token.pos,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("expected {expected}, was {actual} (at {pos})")]
    Unexpected {
        expected: TokenKind,
        actual: TokenKind,
        pos: Position,
    },
    #[error("expected one of {}, was {actual} (at {pos})", describe_all(.expected))]
    UnexpectedAny {
        expected: &'static [TokenKind],
        actual: TokenKind,
        pos: Position,
    },
    #[error("number {literal} is out of range (at {pos})")]
    IntOutOfRange { literal: String, pos: Position },
    #[error("loops nested more than {limit} deep (at {pos})")]
    TooDeep { limit: usize, pos: Position },
}

impl Error {
    pub fn pos(&self) -> Position {
        match self {
            Error::Unexpected { pos, .. }
            | Error::UnexpectedAny { pos, .. }
            | Error::IntOutOfRange { pos, .. }
            | Error::TooDeep { pos, .. } => *pos,
        }
    }
}

fn describe_all(kinds: &[TokenKind]) -> String {
    let kinds: Vec<_> = kinds.iter().map(|kind| kind.describe()).collect();
    kinds.join(", ")
}
