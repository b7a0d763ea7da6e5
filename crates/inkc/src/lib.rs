#![doc = include_str!("../README.md")]

mod compiler;
pub mod target;

pub use compiler::*;
pub use ink_translators::ModuleFormat;
pub use target::{Artifact, Target};
