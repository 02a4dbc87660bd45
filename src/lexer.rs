use std::{
    iter::Enumerate,
    str::{Lines, SplitWhitespace},
};

use crate::token::{Position, Token, TokenKind, KEYWORDS};

/// Lexes the whole input eagerly, up to and including the end-of-input token.
pub fn lex_all(src: &str) -> Result<Vec<Token<'_>>, Error> {
    Lexer::new(src).collect()
}

/// The incremental lexer.
///
/// Input is processed one word at a time: lines are split on line breaks and
/// each line on whitespace. Tokens are only produced when the iterator is
/// pulled. Exactly one [`TokenKind::Eof`] token terminates the sequence; after
/// it (or after the first error) the iterator is exhausted.
pub struct Lexer<'src> {
    lines: Enumerate<Lines<'src>>,
    words: Option<(usize, Enumerate<SplitWhitespace<'src>>)>,
    /// Semicolon split off the previous word, yet to be produced.
    pending: Option<Token<'src>>,
    /// Position of the last produced token.
    last: Option<Position>,
    done: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(src: &'src str) -> Lexer<'src> {
        Lexer {
            lines: src.lines().enumerate(),
            words: None,
            pending: None,
            last: None,
            done: false,
        }
    }

    /// Returns the next word along with its position, crossing line
    /// boundaries as needed.
    fn next_word(&mut self) -> Option<(&'src str, Position)> {
        loop {
            if let Some((line, words)) = &mut self.words {
                if let Some((word_index, word)) = words.next() {
                    return Some((word, Position::new(*line, word_index + 1)));
                }
            }
            let (line_index, line) = self.lines.next()?;
            self.words = Some((line_index + 1, line.split_whitespace().enumerate()));
        }
    }

    fn scan(&mut self) -> Result<Token<'src>, Error> {
        if let Some(semicolon) = self.pending.take() {
            return Ok(semicolon);
        }
        let Some((word, pos)) = self.next_word() else {
            let pos = self.last.map_or(Position::new(1, 1), Position::next_word);
            return Ok(Token::new(TokenKind::Eof, "", pos));
        };

        let stripped = if word.ends_with(';') {
            self.pending = Some(Token::new(TokenKind::Semicolon, ";", pos.next_word()));
            word.trim_matches(';')
        } else {
            word
        };

        match classify(stripped) {
            Some(kind) => Ok(Token::new(kind, stripped, pos)),
            None => Err(Error::UnknownSymbol {
                word: word.to_owned(),
                pos,
            }),
        }
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Result<Token<'src>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let scanned = self.scan();
        match &scanned {
            Ok(token) => {
                log::trace!("{token:?}");
                self.last = Some(token.pos);
                self.done = token.is_eof();
            }
            Err(_) => self.done = true,
        }
        Some(scanned)
    }
}

impl std::iter::FusedIterator for Lexer<'_> {}

/// Classifies a single word. Order matters: a word is tested against the
/// keywords first, then operators, variables, numbers and function names.
/// Variables and numbers use ASCII digits only, so that every NUM parses as
/// an integer; any other Unicode digit is an ordinary word character.
fn classify(word: &str) -> Option<TokenKind> {
    let is_word_char = |c: char| c.is_alphanumeric() || c == '_';
    let is_number = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    if let Some(keyword) = KEYWORDS.get(word) {
        return Some(*keyword);
    }
    let kind = match word {
        "+" | "-" => TokenKind::Op,
        _ if word.strip_prefix('x').is_some_and(is_number) => TokenKind::Ident,
        _ if is_number(word) => TokenKind::Num,
        _ if !word.is_empty() && word.chars().all(is_word_char) => TokenKind::Func,
        _ => return None,
    };
    Some(kind)
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("unknown symbol '{word}' (at {pos})")]
    UnknownSymbol { word: String, pos: Position },
}
