use std::fmt;

#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    /// The (semicolon-stripped) word. Empty for [`TokenKind::Eof`].
    pub lexeme: &'src str,
    pub pos: Position,
}

impl<'src> Token<'src> {
    pub fn new(kind: TokenKind, lexeme: &'src str, pos: Position) -> Token<'src> {
        Token { kind, lexeme, pos }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({:?}, {:?}, {})", self.kind, self.lexeme, self.pos)
    }
}

/// Location of a token as `(line, word)`, both 1-based. The word index counts
/// whitespace-separated words within the line.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Position {
    pub line: usize,
    pub word: usize,
}

impl Position {
    pub const fn new(line: usize, word: usize) -> Position {
        Position { line, word }
    }

    /// The position right after this one, on the same line.
    pub const fn next_word(self) -> Position {
        Position {
            line: self.line,
            word: self.word + 1,
        }
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position({}:{})", self.line, self.word)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, word {}", self.line, self.word)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    While,
    Loop,
    Do,
    End,

    /// `:=`
    Assign,
    /// `!=`
    NotEq,
    /// `+` or `-`; the lexeme tells which.
    Op,
    Semicolon,

    /// Variable name, `x` followed by digits.
    Ident,
    Num,
    /// Function name: any other word made of word characters.
    Func,

    Eof,
}

impl TokenKind {
    /// How the kind is spelled in diagnostics.
    pub const fn describe(self) -> &'static str {
        match self {
            TokenKind::While => "WHILE",
            TokenKind::Loop => "LOOP",
            TokenKind::Do => "DO",
            TokenKind::End => "END",
            TokenKind::Assign => ":=",
            TokenKind::NotEq => "!=",
            TokenKind::Op => "OP",
            TokenKind::Semicolon => ";",
            TokenKind::Ident => "IDENT",
            TokenKind::Num => "NUM",
            TokenKind::Func => "FUNC",
            TokenKind::Eof => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Words which are classified by exact match, before any pattern is tried.
pub static KEYWORDS: phf::Map<&'static str, TokenKind> = phf::phf_map! {
    "WHILE" => TokenKind::While,
    "LOOP" => TokenKind::Loop,
    "DO" => TokenKind::Do,
    "END" => TokenKind::End,
    ":=" => TokenKind::Assign,
    "!=" => TokenKind::NotEq,
};
