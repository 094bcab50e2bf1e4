//! Error types for the test-command boundary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("cannot start {bin}")]
    Spawn {
        bin: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{bin}: stdout was not captured")]
    MissingStdout { bin: String },

    #[error("waiting for {bin}")]
    Wait {
        bin: String,
        #[source]
        source: std::io::Error,
    },
}
