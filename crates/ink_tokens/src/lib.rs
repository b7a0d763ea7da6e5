#![doc = include_str!("../README.md")]

use std::fmt::{Display, Formatter};

pub mod token;

/// An error with the source line it occurred on
#[derive(Debug, thiserror::Error)]
pub struct LineError<E> {
    error: E,
    line: usize,
    near: Option<String>,
}

impl<E> LineError<E> {
    pub fn new(error: E, line: usize, near: impl Into<Option<String>>) -> Self {
        Self {
            error,
            line,
            near: near.into(),
        }
    }

    /// The error itself, without location
    pub fn error(&self) -> &E {
        &self.error
    }

    pub fn line(&self) -> usize {
        self.line
    }

    /// The source text the error was reported at, if any
    pub fn near(&self) -> Option<&str> {
        self.near.as_deref()
    }
}

impl<E: Display> Display for LineError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.error)?;
        write!(f, "  -> line {}", self.line)?;
        if let Some(near) = &self.near {
            write!(f, " at {near}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[derive(Debug, thiserror::Error)]
    #[error("bad thing")]
    struct Bad;

    #[test]
    fn display_includes_line_and_lexeme() {
        let error = LineError::new(Bad, 4, "'x'".to_string());
        assert_eq!(error.to_string(), "bad thing\n  -> line 4 at 'x'");
        let error = LineError::new(Bad, 1, None);
        assert_eq!(error.to_string(), "bad thing\n  -> line 1");
    }
}
