//! Error types for skip-list loading.

use std::path::PathBuf;

use thiserror::Error;

/// A skip list that cannot be used. Parse errors carry the 1-based line.
#[derive(Debug, Error)]
pub enum SkipListError {
    #[error("cannot read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: no package specified")]
    MissingPackage { line: usize },

    #[error("line {line}: empty package line")]
    EmptyPackage { line: usize },

    #[error("line {line}: too many fields on test line")]
    TooManyFields { line: usize },

    #[error("line {line}: missing test name")]
    MissingTest { line: usize },

    #[error("line {line}: invalid date on test line {text:?}: {reason}")]
    InvalidDate {
        line: usize,
        text: String,
        reason: String,
    },

    #[error("line {line}: package {package:?} already listed on line {first}")]
    DuplicatePackage {
        line: usize,
        first: usize,
        package: String,
    },

    #[error("line {line}: test {test:?} already listed for package {package:?}")]
    DuplicateTest {
        line: usize,
        package: String,
        test: String,
    },
}
