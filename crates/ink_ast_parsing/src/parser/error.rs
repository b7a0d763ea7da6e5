use ink_tokens::token::{Token, TokenKind};
use ink_tokens::LineError;

/// Represents an error occurring during parsing
#[derive(Debug, thiserror::Error)]
#[error("syntax error: {0}")]
pub struct SyntaxError(LineError<ErrorKind>);

impl SyntaxError {
    /// Creates a new error reported at a token
    pub fn new(kind: ErrorKind, at: &Token) -> Self {
        Self(LineError::new(kind, at.line(), at.to_string()))
    }

    pub fn kind(&self) -> &ErrorKind {
        self.0.error()
    }

    pub fn line(&self) -> usize {
        self.0.line()
    }
}

/// [SyntaxError] kind
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ErrorKind {
    #[error("expected '{expected}' {context}")]
    ExpectedToken {
        expected: TokenKind,
        context: &'static str,
    },
    #[error("expected an expression")]
    ExpectedExpression,
    #[error("expected a type")]
    ExpectedType,
    #[error("invalid assignment target")]
    InvalidAssignmentTarget,
    #[error("'{modifier}' can not be used before {target}")]
    IllegalModifier { modifier: TokenKind, target: String },
    #[error("annotations can not be called in a type position")]
    AnnotationCallInType,
    #[error("'await' must be followed by a call")]
    AwaitWithoutCall,
    #[error("range loops ('for .. from .. to ..') are not supported")]
    RangeLoop,
    #[error("a variable needs a type or an initializer")]
    UntypedVariable,
}

pub type SyntaxResult<T = ()> = Result<T, SyntaxError>;
