//! Recursive descent parsing of a token stream

use ink_ast::statements::Stmt;
use ink_tokens::token::{Token, TokenKind};
use tracing::trace;

mod error;
mod expr;
mod statements;
mod types;

pub use error::*;

/// Creates the syntax tree from a token stream.
///
/// One token of lookahead is enough for everything except record instantiations,
/// which also look one token back.
///
/// # Examples
/// ```
/// # use ink_ast_parsing::lexer::scan;
/// # use ink_ast_parsing::parser::Parser;
/// let declarations = Parser::new(scan("var x = 1;")).parse().unwrap();
/// assert_eq!(declarations.len(), 1);
/// ```
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    /// Creates a new parser. A missing trailing EOF token is added.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(Token::kind) != Some(TokenKind::Eof) {
            let line = tokens.last().map(Token::line).unwrap_or(1);
            tokens.push(Token::eof(line));
        }
        Self { tokens, current: 0 }
    }

    /// Parses every top-level declaration, stopping at the first error
    pub fn parse(mut self) -> SyntaxResult<Vec<Stmt>> {
        let mut declarations = vec![];
        while !self.is_at_end() {
            trace!(line = self.peek().line(), "parsing top-level declaration");
            declarations.push(self.declaration()?);
        }
        Ok(declarations)
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    /// Looks `n` tokens back from the cursor, `previous(1)` being the last consumed token
    fn previous(&self, n: usize) -> Option<&Token> {
        self.current
            .checked_sub(n)
            .and_then(|index| self.tokens.get(index))
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind() == TokenKind::Eof
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind() == kind
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    /// Consumes the next token if it is any of `kinds`
    fn consume_if(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        kinds
            .contains(&self.peek().kind())
            .then(|| self.advance())
    }

    /// Consumes the next token, which must be of `kind`
    fn consume(&mut self, kind: TokenKind, context: &'static str) -> SyntaxResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error(ErrorKind::ExpectedToken {
                expected: kind,
                context,
            }))
        }
    }

    /// Creates an error at the next token
    fn error(&self, kind: ErrorKind) -> SyntaxError {
        SyntaxError::new(kind, self.peek())
    }
}
