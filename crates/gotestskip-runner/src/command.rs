//! GoTestCommand builder and the running child process.

use std::process::{ExitStatus, Stdio};

use tokio::io::BufReader;
use tokio::process::{Child, ChildStdout, Command};

use crate::error::RunnerError;

pub const DEFAULT_GO_BIN: &str = "go";

/// Arguments always placed before the pass-through arguments.
const JSON_ARGS: [&str; 2] = ["test", "-json"];

/// `go test -json <args...>`.
#[derive(Debug, Clone)]
pub struct GoTestCommand {
    go_bin: String,
    args: Vec<String>,
}

impl GoTestCommand {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            go_bin: DEFAULT_GO_BIN.to_owned(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn with_go_bin(mut self, go_bin: impl Into<String>) -> Self {
        self.go_bin = go_bin.into();
        self
    }

    pub fn go_bin(&self) -> &str {
        &self.go_bin
    }

    /// Full argument vector handed to the binary.
    pub fn argv(&self) -> Vec<&str> {
        JSON_ARGS
            .iter()
            .copied()
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.go_bin);
        cmd.args(self.argv())
            .stdin(Stdio::inherit())
            .stderr(Stdio::inherit());
        cmd
    }

    /// Spawn with stdout piped for translation.
    ///
    /// The child is killed if the returned handle is dropped before
    /// [`RunningTest::wait`], so an aborted stream does not leave it running.
    pub fn spawn(&self) -> Result<RunningTest, RunnerError> {
        tracing::debug!(bin = %self.go_bin, argv = ?self.argv(), "spawning test command");
        let mut child = self
            .command()
            .stdout(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| RunnerError::Spawn {
                bin: self.go_bin.clone(),
                source,
            })?;
        let stdout = child.stdout.take().ok_or_else(|| RunnerError::MissingStdout {
            bin: self.go_bin.clone(),
        })?;
        Ok(RunningTest {
            bin: self.go_bin.clone(),
            child,
            stdout: Some(BufReader::new(stdout)),
        })
    }

    /// Run with stdout connected straight through and wait for exit.
    pub async fn run_inherited(&self) -> Result<ExitStatus, RunnerError> {
        tracing::debug!(bin = %self.go_bin, argv = ?self.argv(), "running test command untranslated");
        let mut child = self
            .command()
            .stdout(Stdio::inherit())
            .spawn()
            .map_err(|source| RunnerError::Spawn {
                bin: self.go_bin.clone(),
                source,
            })?;
        child.wait().await.map_err(|source| RunnerError::Wait {
            bin: self.go_bin.clone(),
            source,
        })
    }
}

/// A spawned test command whose stdout carries the event stream.
#[derive(Debug)]
pub struct RunningTest {
    bin: String,
    child: Child,
    stdout: Option<BufReader<ChildStdout>>,
}

impl RunningTest {
    /// The event stream. Returns `None` after the first call.
    pub fn take_stdout(&mut self) -> Option<BufReader<ChildStdout>> {
        self.stdout.take()
    }

    /// Wait for the process to exit.
    pub async fn wait(mut self) -> Result<ExitStatus, RunnerError> {
        // Close our end first so a child blocked on a full pipe can finish.
        drop(self.stdout.take());
        let status = self.child.wait().await.map_err(|source| RunnerError::Wait {
            bin: self.bin.clone(),
            source,
        })?;
        tracing::debug!(bin = %self.bin, ?status, "test command exited");
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncBufReadExt;

    #[test]
    fn default_command() {
        let cmd = GoTestCommand::new(Vec::<String>::new());
        assert_eq!(cmd.go_bin(), "go");
        assert_eq!(cmd.argv(), ["test", "-json"]);
    }

    #[test]
    fn pass_through_args_follow_json_flag() {
        let cmd = GoTestCommand::new(["-run", "TestX", "./..."]).with_go_bin("/usr/local/go/bin/go");
        assert_eq!(cmd.go_bin(), "/usr/local/go/bin/go");
        assert_eq!(cmd.argv(), ["test", "-json", "-run", "TestX", "./..."]);
    }

    #[tokio::test]
    async fn spawn_missing_binary_is_spawn_error() {
        let cmd = GoTestCommand::new(["./..."]).with_go_bin("/nonexistent/gotestskip-go");
        let err = cmd.spawn().expect_err("must fail");
        assert!(matches!(err, RunnerError::Spawn { .. }));
        assert!(err.to_string().contains("/nonexistent/gotestskip-go"));
    }

    #[tokio::test]
    async fn spawn_streams_stdout_and_reports_status() {
        // `echo` stands in for go: it prints its argv on one line.
        let cmd = GoTestCommand::new(["./pkg"]).with_go_bin("echo");
        let mut running = cmd.spawn().expect("echo must be available on the test host");
        let mut lines = running.take_stdout().expect("stdout").lines();
        assert_eq!(
            lines.next_line().await.expect("read"),
            Some("test -json ./pkg".to_owned())
        );
        assert_eq!(lines.next_line().await.expect("read"), None);
        assert!(running.take_stdout().is_none());
        let status = running.wait().await.expect("wait");
        assert!(status.success());
    }

    #[tokio::test]
    async fn run_inherited_reports_failure_status() {
        let cmd = GoTestCommand::new(Vec::<String>::new()).with_go_bin("false");
        let status = cmd.run_inherited().await.expect("false must be available");
        assert!(!status.success());
    }
}
