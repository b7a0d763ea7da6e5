//! What the compiler generates

use ink_translators::casing::{pascal_case, snake_case};
use ink_translators::ModuleFormat;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// A language the compiler can generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    JavaScript(ModuleFormat),
    /// Declaration files for the JavaScript output
    TypeScript,
    Kotlin,
    Rust,
}

impl Target {
    /// Every target, in the order artifacts are generated
    pub const ALL: [Target; 5] = [
        Target::JavaScript(ModuleFormat::CommonJs),
        Target::JavaScript(ModuleFormat::Esm),
        Target::TypeScript,
        Target::Kotlin,
        Target::Rust,
    ];

    /// Name of the directory artifacts of this target are written to
    pub fn language(&self) -> &'static str {
        match self {
            Target::JavaScript(_) => "javascript",
            Target::TypeScript => "typescript",
            Target::Kotlin => "kotlin",
            Target::Rust => "rust",
        }
    }

    /// The file name generated for a source file with the given stem
    pub fn file_name(&self, stem: &str) -> String {
        match self {
            Target::JavaScript(format) => format!("{stem}.{format}"),
            Target::TypeScript => format!("{stem}.d.ts"),
            Target::Kotlin => format!("{}.kt", pascal_case(stem)),
            Target::Rust => format!("{}.rs", snake_case(stem)),
        }
    }
}

impl Display for Target {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::JavaScript(format) => write!(f, "{} ({format})", self.language()),
            _ => write!(f, "{}", self.language()),
        }
    }
}

/// The generated source for one target
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub target: Target,
    pub source: String,
}

impl Artifact {
    /// Where this artifact is written, relative to the output directory
    pub fn relative_path(&self, stem: &str) -> PathBuf {
        PathBuf::from(self.target.language()).join(self.target.file_name(stem))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;
    use std::path::Path;

    #[test]
    fn file_names() {
        let names = Target::ALL
            .iter()
            .map(|target| target.file_name("user_service"))
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            [
                "user_service.cjs",
                "user_service.mjs",
                "user_service.d.ts",
                "UserService.kt",
                "user_service.rs"
            ]
        );
    }

    #[test]
    fn artifacts_are_grouped_by_language() {
        let artifact = Artifact {
            target: Target::JavaScript(ModuleFormat::Esm),
            source: String::new(),
        };
        assert_eq!(
            artifact.relative_path("main"),
            Path::new("javascript").join("main.mjs")
        );
        assert_eq!(artifact.target.to_string(), "javascript (mjs)");
    }
}
