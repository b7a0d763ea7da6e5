#![doc = include_str!("../README.md")]

use crate::parser::{Parser, SyntaxResult};
use ink_ast::statements::Stmt;
use tracing::{debug, error, instrument};

pub mod lexer;
pub mod parser;

/// Scans and parses source text into its top-level declarations
#[instrument(skip_all)]
pub fn parse(source: &str) -> SyntaxResult<Vec<Stmt>> {
    let tokens = lexer::scan(source);
    debug!("scanned {} tokens", tokens.len());
    let declarations = Parser::new(tokens)
        .parse()
        .inspect_err(|e| error!("{e}"))?;
    debug!("parsed {} top-level declarations", declarations.len());
    Ok(declarations)
}
