//! the args for running inkc

use crate::logging::LoggingArgs;
use inkc::{InkC, InkCBuilder, ModuleFormat, Target};
use std::path::PathBuf;

/// A language selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TargetArg {
    /// CommonJS and ES module JavaScript
    Javascript,
    /// TypeScript declarations
    Typescript,
    Kotlin,
    Rust,
    /// Every language
    All,
}

impl TargetArg {
    /// The compiler targets this selects
    pub fn targets(&self) -> Vec<Target> {
        match self {
            TargetArg::Javascript => vec![
                Target::JavaScript(ModuleFormat::CommonJs),
                Target::JavaScript(ModuleFormat::Esm),
            ],
            TargetArg::Typescript => vec![Target::TypeScript],
            TargetArg::Kotlin => vec![Target::Kotlin],
            TargetArg::Rust => vec![Target::Rust],
            TargetArg::All => Target::ALL.to_vec(),
        }
    }
}

/// The args struct
#[derive(Debug, clap::Parser)]
#[clap(author, version, about = "Compiles ink code into other languages")]
pub struct Args {
    #[command(flatten)]
    logging: LoggingArgs,

    /// Specify which source files to compile
    #[clap(required = true, value_name = "source file", value_hint = clap::ValueHint::FilePath)]
    pub files: Vec<PathBuf>,
    /// Specify which languages to generate
    #[clap(short = 't', long = "target", value_enum, default_value = "all")]
    pub targets: Vec<TargetArg>,
    /// Specify where to place generated sources
    #[clap(short = 'd', default_value = "generated")]
    pub output_directory: PathBuf,
    /// Package of the generated kotlin sources
    #[clap(long, env = "INKC_KOTLIN_PACKAGE")]
    pub kotlin_package: Option<String>,
}

impl Args {
    pub fn logging(&self) -> &LoggingArgs {
        &self.logging
    }

    /// Configures a compiler from these args
    pub fn builder(&self) -> InkCBuilder {
        let builder = InkC::builder()
            .targets(self.targets.iter().flat_map(TargetArg::targets))
            .output_directory(&self.output_directory);
        match &self.kotlin_package {
            Some(package) => builder.kotlin_package(package),
            None => builder,
        }
    }
}
