/// The lexer takes the source input, mapping it into a lazy sequence of
/// tokens.
pub mod lexer;

/// The parser takes a sequence of tokens, mapping it into an AST.
pub mod parser;

/// The synthesizer takes an AST and maps it into Python source code with the
/// same semantics.
pub mod synth;

/// Direct evaluation of a parsed program, without going through the target
/// language.
pub mod eval;

pub mod ast;
pub mod error;
pub mod runtime;
pub mod token;

pub mod util {
    pub mod fmt {
        pub mod tree;
    }
    #[cfg(test)]
    pub(crate) mod test_utils;
}

pub use error::{compile, Error};
