//! Errors that abort a translation

use crate::scope::ScopeError;
use thiserror::Error;

/// An error that stopped a backend from producing output
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("{backend} can not render a {node}")]
    Unsupported {
        backend: &'static str,
        node: &'static str,
    },
    #[error("unknown type '{name}' on line {line}")]
    UnknownType { name: String, line: usize },
    #[error("record '{0}' was never declared")]
    UndeclaredRecord(String),
    #[error("record '{record}' has no field '{field}'")]
    UnknownField { record: String, field: String },
    #[error("enum '{enumeration}' member '{member}' must have an integer value")]
    InvalidEnumValue { enumeration: String, member: String },
    #[error(transparent)]
    Scope(#[from] ScopeError),
}

pub type TranslateResult<T = ()> = Result<T, TranslateError>;
