//! Responsible with compiling ink files into every configured target language

use crate::target::{Artifact, Target};
use ink_ast::statements::Stmt;
use ink_translators::{
    JavaScriptTranslator, KotlinTranslator, RustTranslator, TranslateResult, Translator,
    TypeScriptTranslator,
};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::fs;
use tokio::task::JoinSet;
use tracing::{debug, error, error_span, info, instrument, Instrument};

pub mod error;

pub use error::{InkCError, InkCErrorKind, InkCResult};

/// Responsible with compiling ink files into other languages.
///
/// Must be configured using an [InkCBuilder].
#[derive(Debug, Clone)]
pub struct InkC {
    targets: Vec<Target>,
    kotlin_package: Option<String>,
    output_directory: PathBuf,
}

impl InkC {
    /// Creates the default InkCBuilder
    #[inline]
    pub fn builder() -> InkCBuilder {
        InkCBuilder::new()
    }

    /// The targets generated, in order
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    /// Compiles ink source into one artifact per target.
    ///
    /// The source is parsed once, then every backend runs on its own blocking task.
    /// Artifacts are returned in target order. When any backend fails, every failure is
    /// returned together.
    #[instrument(skip_all)]
    pub async fn compile(&self, source: &str) -> InkCResult<Vec<Artifact>> {
        let program = Arc::new(ink_ast_parsing::parse(source)?);
        debug!("parsed {} declarations", program.len());

        let mut join_set = JoinSet::new();
        for (index, target) in self.targets.iter().copied().enumerate() {
            let program = program.clone();
            let kotlin_package = self.kotlin_package.clone();
            let span = error_span!("translate", %target);
            join_set.spawn_blocking(move || {
                span.in_scope(|| (index, target, translate(&program, target, kotlin_package)))
            });
        }

        let mut artifacts = Vec::with_capacity(self.targets.len());
        let mut errors = vec![];
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, target, Ok(source))) => {
                    artifacts.push((index, Artifact { target, source }))
                }
                Ok((_, target, Err(translate_error))) => {
                    error!("could not translate to {target}: {translate_error}");
                    errors.push(InkCError::new(translate_error, target));
                }
                Err(join_error) => errors.push(join_error.into()),
            }
        }
        if !errors.is_empty() {
            return Err(errors.into());
        }
        artifacts.sort_by_key(|(index, _)| *index);
        Ok(artifacts.into_iter().map(|(_, artifact)| artifact).collect())
    }

    /// Compiles a file, writing every artifact below the output directory.
    ///
    /// Returns the paths written.
    pub async fn compile_file(&self, path: &Path) -> InkCResult<Vec<PathBuf>> {
        let source = fs::read_to_string(path)
            .await
            .map_err(|e| InkCError::from(e).with_path(path))?;
        let artifacts = self
            .compile(&source)
            .await
            .map_err(|e| e.with_path(path))?;
        let stem = path
            .file_stem()
            .and_then(OsStr::to_str)
            .unwrap_or("main");

        let mut written = Vec::with_capacity(artifacts.len());
        for artifact in artifacts {
            let output = self.output_directory.join(artifact.relative_path(stem));
            if let Some(parent) = output.parent() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| InkCError::new(e, artifact.target).with_path(path))?;
            }
            fs::write(&output, &artifact.source)
                .await
                .map_err(|e| InkCError::new(e, artifact.target).with_path(path))?;
            info!("wrote {output:?}");
            written.push(output);
        }
        Ok(written)
    }

    /// Compiles every file at the given paths
    pub async fn compile_all(&self, paths: Vec<PathBuf>) -> InkCResult<Vec<PathBuf>> {
        let mut join_set = JoinSet::new();
        for path in paths {
            let inkc = self.clone();
            let span = error_span!("compile", path=?path);
            join_set.spawn(async move { inkc.compile_file(&path).await }.instrument(span));
        }

        let mut written = vec![];
        let mut errors = vec![];
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok(Ok(paths)) => written.extend(paths),
                Ok(Err(compile_error)) => errors.push(compile_error),
                Err(join_error) => errors.push(join_error.into()),
            }
        }
        if !errors.is_empty() {
            return Err(errors.into());
        }
        written.sort();
        Ok(written)
    }
}

fn translate(
    program: &[Stmt],
    target: Target,
    kotlin_package: Option<String>,
) -> TranslateResult<String> {
    match target {
        Target::JavaScript(format) => JavaScriptTranslator::new(program, format).translate(),
        Target::TypeScript => TypeScriptTranslator::new(program).translate(),
        Target::Kotlin => {
            let translator = KotlinTranslator::new(program);
            match kotlin_package {
                Some(package) => translator.package(package),
                None => translator,
            }
            .translate()
        }
        Target::Rust => RustTranslator::new(program).translate(),
    }
}

/// Builder for creating an [InkC] instance.
#[derive(Debug)]
pub struct InkCBuilder {
    pub targets: Vec<Target>,
    /// Package of generated Kotlin sources
    pub kotlin_package: Option<String>,
    pub output_directory: PathBuf,
}

impl InkCBuilder {
    /// Creates an InkCBuilder with default settings
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a target to generate
    pub fn target(mut self, target: Target) -> Self {
        if !self.targets.contains(&target) {
            self.targets.push(target);
        }
        self
    }

    /// Adds several targets to generate
    pub fn targets(self, targets: impl IntoIterator<Item = Target>) -> Self {
        targets.into_iter().fold(self, Self::target)
    }

    pub fn kotlin_package(mut self, package: impl Into<String>) -> Self {
        self.kotlin_package = Some(package.into());
        self
    }

    /// Sets the directory artifacts are written below
    pub fn output_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_directory = path.as_ref().to_path_buf();
        self
    }

    /// Builds an [InkC] instance from this builder
    pub fn build(self) -> Result<InkC, BuildInkCError> {
        if self.targets.is_empty() {
            return Err(BuildInkCError::NoTargets);
        }
        if let Some(package) = &self.kotlin_package {
            let valid = package.split('.').all(|segment| {
                segment
                    .chars()
                    .next()
                    .is_some_and(|first| first.is_alphabetic() || first == '_')
                    && segment.chars().all(|c| c.is_alphanumeric() || c == '_')
            });
            if !valid {
                return Err(BuildInkCError::InvalidKotlinPackage(package.clone()));
            }
        }
        Ok(InkC {
            targets: self.targets,
            kotlin_package: self.kotlin_package,
            output_directory: self.output_directory,
        })
    }
}

impl Default for InkCBuilder {
    fn default() -> Self {
        Self {
            targets: vec![],
            kotlin_package: None,
            output_directory: PathBuf::from("generated"),
        }
    }
}

/// An error occurred while building an [InkC] instance
#[derive(Debug, Error, PartialEq)]
pub enum BuildInkCError {
    #[error("Compilation can't occur without any targets")]
    NoTargets,
    #[error("{0:?} is not a valid kotlin package name")]
    InvalidKotlinPackage(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use ink_translators::ModuleFormat;
    use test_log::test;

    #[test]
    fn builder_requires_targets() {
        assert_eq!(
            InkC::builder().build().expect_err("no targets"),
            BuildInkCError::NoTargets
        );
    }

    #[test]
    fn builder_deduplicates_targets() {
        let inkc = InkC::builder()
            .targets(Target::ALL)
            .target(Target::Rust)
            .target(Target::JavaScript(ModuleFormat::Esm))
            .build()
            .expect("valid builder");
        assert_eq!(inkc.targets(), Target::ALL);
        assert_eq!(inkc.output_directory(), Path::new("generated"));
    }

    #[test]
    fn kotlin_packages_are_validated() {
        let builder = || InkC::builder().target(Target::Kotlin);
        assert!(builder().kotlin_package("org.example.app").build().is_ok());
        assert!(matches!(
            builder().kotlin_package("org..example").build(),
            Err(BuildInkCError::InvalidKotlinPackage(_))
        ));
        assert!(builder().kotlin_package("1org").build().is_err());
    }
}
