use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A fresh directory that is removed once the test ends
pub fn target_dir() -> TempDir {
    tempfile::Builder::new()
        .prefix("inkc-")
        .tempdir()
        .expect("could not create directory")
}

/// Writes an ink source file into a directory
pub fn source_file(dir: &Path, name: &str, source: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, source).expect("could not write source file");
    path
}
