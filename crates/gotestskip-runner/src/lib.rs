//! gotestskip-runner: `go test -json` process boundary.
//! Builds the command line, spawns it with stdin and stderr connected
//! through, and exposes its stdout and exit status. No translation logic.

pub mod command;
pub mod error;

pub use command::{DEFAULT_GO_BIN, GoTestCommand, RunningTest};
pub use error::RunnerError;
