//! An ink compilation error

use super::BuildInkCError;
use crate::target::Target;
use ink_ast_parsing::parser::SyntaxError;
use ink_translators::TranslateError;
use itertools::Itertools as _;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::task::JoinError;

/// The kind of error
#[derive(Debug, Error)]
pub enum InkCErrorKind {
    #[error(transparent)]
    Build(#[from] BuildInkCError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("{}", .0.iter().join("\n"))]
    Multi(Vec<InkCError>),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Translate(#[from] TranslateError),
    #[error("translation task did not finish: {0}")]
    Join(#[from] JoinError),
}

/// An error occurred while compiling ink files
#[derive(Debug, Error)]
#[error("{}{kind}", context(.path.as_ref(), .target.as_ref()))]
pub struct InkCError {
    kind: InkCErrorKind,
    path: Option<PathBuf>,
    target: Option<Target>,
}

impl InkCError {
    /// Creates a new [InkCError] using a quick constructor
    #[inline]
    pub fn new(error: impl Into<InkCErrorKind>, target: impl Into<Option<Target>>) -> Self {
        Self {
            kind: error.into(),
            path: None,
            target: target.into(),
        }
    }

    /// Attaches the source file being compiled, unless one is already known
    pub fn with_path(mut self, path: &Path) -> Self {
        if self.path.is_none() {
            self.path = Some(path.to_path_buf());
        }
        self
    }

    pub fn kind(&self) -> &InkCErrorKind {
        &self.kind
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn target(&self) -> Option<Target> {
        self.target
    }
}

fn context(path: Option<&PathBuf>, target: Option<&Target>) -> String {
    let mut context = String::new();
    if let Some(path) = path {
        context.push_str(&format!("{}: ", path.display()));
    }
    if let Some(target) = target {
        context.push_str(&format!("{target}: "));
    }
    context
}

impl<T> From<T> for InkCError
where
    InkCErrorKind: From<T>,
{
    fn from(value: T) -> Self {
        Self::new(InkCErrorKind::from(value), None)
    }
}

impl From<Vec<InkCError>> for InkCErrorKind {
    fn from(value: Vec<InkCError>) -> Self {
        InkCErrorKind::Multi(value)
    }
}

/// A type alias for general results in inkc
pub type InkCResult<T> = Result<T, InkCError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InkC;
    use test_log::test;

    #[test]
    fn context_prefixes_message() {
        let error = InkCError::new(
            io::Error::new(io::ErrorKind::NotFound, "missing"),
            Target::Rust,
        )
        .with_path(Path::new("main.ink"));
        assert_eq!(error.to_string(), "main.ink: rust: missing");
    }

    #[test]
    fn build_errors_propagate() {
        fn configure() -> InkCResult<InkC> {
            let inkc = InkC::builder().build()?;
            Ok(inkc)
        }
        let error = configure().expect_err("no targets");
        assert!(matches!(
            error.kind(),
            InkCErrorKind::Build(BuildInkCError::NoTargets)
        ));
        assert_eq!(
            error.to_string(),
            "Compilation can't occur without any targets"
        );
    }

    #[test]
    fn multi_lists_every_error() {
        let errors = vec![
            InkCError::new(io::Error::new(io::ErrorKind::Other, "first"), None),
            InkCError::new(io::Error::new(io::ErrorKind::Other, "second"), Target::Kotlin),
        ];
        let error = InkCError::from(errors);
        assert_eq!(error.to_string(), "first\nkotlin: second");
    }
}
