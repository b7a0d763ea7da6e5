#![doc = include_str!("../README.md")]

use ink_ast::expr::Expr;
use ink_ast::statements::Stmt;
use itertools::Itertools;
use tracing::{debug, instrument};

pub mod casing;
pub mod declarations;
pub mod error;
pub mod imports;
pub mod javascript;
pub mod kotlin;
pub mod literals;
pub mod rust;
pub mod scope;
pub mod types;
pub mod typescript;
pub mod writer;

pub use error::{TranslateError, TranslateResult};
pub use imports::ImportTable;
pub use javascript::{JavaScriptTranslator, ModuleFormat};
pub use kotlin::KotlinTranslator;
pub use rust::RustTranslator;
pub use typescript::TypeScriptTranslator;

/// Renders a program into a target language.
///
/// A translator is built from the program it renders and is consumed by rendering, so
/// every translation starts from a fresh import table.
pub trait Translator: Sized {
    /// Name of the target language
    const NAME: &'static str;

    /// Renders the program, returning the source together with what it imported
    fn render(self) -> TranslateResult<Translation>;

    /// Renders the program to source text
    #[instrument(skip_all, fields(backend = Self::NAME))]
    fn translate(self) -> TranslateResult<String> {
        debug!("translating to {}", Self::NAME);
        let translation = self.render()?;
        debug!(
            "finished {} translation with {} imported namespaces",
            Self::NAME,
            translation.imports.iter().count()
        );
        Ok(translation.source)
    }
}

/// The result of rendering a program
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    /// Every annotation the source references
    pub imports: ImportTable,
    /// The complete rendered source
    pub source: String,
}

impl Translation {
    /// Joins non-empty sections with a blank line between each
    pub(crate) fn assemble<I>(imports: ImportTable, sections: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let source = sections
            .into_iter()
            .map(|section| section.trim_end().to_string())
            .filter(|section| !section.is_empty())
            .join("\n\n");
        let source = if source.is_empty() {
            source
        } else {
            format!("{source}\n")
        };
        Self { imports, source }
    }
}

/// Strips redundant parentheses from a condition
pub(crate) fn unparenthesized(expr: &Expr) -> &Expr {
    match expr {
        Expr::Grouping(grouping) => unparenthesized(&grouping.inner),
        other => other,
    }
}

/// Applies a prefix operator, keeping `- -x` from collapsing into a decrement
pub(crate) fn prefixed(operator: &str, operand: &str) -> String {
    if operand.starts_with(operator) {
        format!("{operator} {operand}")
    } else {
        format!("{operator}{operand}")
    }
}

/// Names every top level function, so calls can refer to functions declared later
pub(crate) fn functions(program: &[Stmt]) -> impl Iterator<Item = &str> {
    program.iter().filter_map(|statement| match statement {
        Stmt::Function(function) => Some(function.name.lexeme()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn empty_sections_are_skipped() {
        let translation = Translation::assemble(
            ImportTable::new(),
            ["package a".to_string(), String::new(), "fun b() {\n}\n".to_string()],
        );
        assert_eq!(translation.source, "package a\n\nfun b() {\n}\n");
        let empty = Translation::assemble(ImportTable::new(), [String::new()]);
        assert_eq!(empty.source, "");
    }

    #[test]
    fn repeated_prefix_operators_stay_apart() {
        assert_eq!(prefixed("-", "x"), "-x");
        assert_eq!(prefixed("-", "-x"), "- -x");
        assert_eq!(prefixed("!", "!done"), "! !done");
        assert_eq!(prefixed("-", "(-x)"), "-(-x)");
    }
}
