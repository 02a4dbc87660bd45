use crate::{lexer, parser, synth, token::Position};

/// Any failure of a single compilation. Compilation stops at the first one.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] lexer::Error),
    #[error(transparent)]
    Parse(#[from] parser::Error),
}

impl Error {
    /// Where in the source the error was detected.
    pub fn pos(&self) -> Position {
        match self {
            Error::Lex(lexer::Error::UnknownSymbol { pos, .. }) => *pos,
            Error::Parse(error) => error.pos(),
        }
    }
}

/// Runs the whole pipeline, producing the target source text.
pub fn compile(src: &str) -> Result<String, Error> {
    let program = parser::parse_program(src)?;
    Ok(synth::synthesize(&program))
}
