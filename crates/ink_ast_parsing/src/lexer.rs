//! Responsible with converting source text into a token stream

use crate::lexer::token_parsing::{parse_insignificant, parse_token};
use ink_tokens::token::Token;
use ink_tokens::LineError;
use thiserror::Error;
use tracing::{error, trace};

mod token_parsing;

/// A lexical error, located on the line it was found on
pub type ScanError = LineError<LexingError>;

#[derive(Debug, Error, PartialEq)]
pub enum LexingError {
    #[error("unexpected character {0:?}")]
    UnexpectedCharacter(char),
    #[error("unterminated string")]
    UnterminatedString,
}

/// Converts source text into tokens.
///
/// Iterating yields every token in order, ending with a single [`Eof`](ink_tokens::token::TokenKind::Eof)
/// token. Lexical errors are yielded in between and never end the stream, except an
/// unterminated string which consumes the rest of the source.
#[derive(Debug)]
pub struct Scanner<'s> {
    source: &'s str,
    offset: usize,
    line: usize,
    finished: bool,
}

/// Everything a [`Scanner`] produced
#[derive(Debug, Default)]
pub struct Scanned {
    pub tokens: Vec<Token>,
    pub errors: Vec<ScanError>,
}

impl<'s> Scanner<'s> {
    /// Creates a new scanner
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            offset: 0,
            line: 1,
            finished: false,
        }
    }

    /// Scans the whole source, logging each lexical error as it is found
    pub fn scan_tokens(self) -> Scanned {
        self.fold(Scanned::default(), |mut scanned, next| {
            match next {
                Ok(token) => scanned.tokens.push(token),
                Err(e) => {
                    error!("{e}");
                    scanned.errors.push(e);
                }
            }
            scanned
        })
    }

    fn advance(&mut self, consumed: &str) {
        self.offset += consumed.len();
        self.line += consumed.matches('\n').count();
    }

    fn next_token(&mut self) -> Option<Result<Token, ScanError>> {
        let source = self.source;
        if let Ok((_, skipped)) = parse_insignificant(&source[self.offset..]) {
            self.advance(skipped);
        }

        let rest = &source[self.offset..];
        let line = self.line;
        if rest.is_empty() {
            self.finished = true;
            return Some(Ok(Token::eof(line)));
        }

        match parse_token(rest) {
            Ok((remaining, (kind, literal))) => {
                let lexeme = &rest[..rest.len() - remaining.len()];
                self.advance(lexeme);
                trace!(?kind, lexeme, line, "scanned token");
                Some(Ok(Token::new(kind, lexeme, literal, line)))
            }
            Err(nom::Err::Failure(_)) => {
                self.advance(rest);
                Some(Err(LineError::new(
                    LexingError::UnterminatedString,
                    line,
                    None,
                )))
            }
            Err(_) => {
                let unexpected = rest.chars().next()?;
                self.offset += unexpected.len_utf8();
                Some(Err(LineError::new(
                    LexingError::UnexpectedCharacter(unexpected),
                    line,
                    None,
                )))
            }
        }
    }
}

impl Iterator for Scanner<'_> {
    type Item = Result<Token, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        self.next_token()
    }
}

/// Scans source text into tokens. Lexical errors are logged and skipped.
pub fn scan(source: &str) -> Vec<Token> {
    Scanner::new(source).scan_tokens().tokens
}
