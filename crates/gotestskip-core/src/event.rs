//! The `go test -json` event record.
//!
//! Field names follow the test2json encoding (PascalCase, empty values
//! omitted). Fields this crate does not interpret are kept in
//! [`TestEvent::extra`] and written back out unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DecodeError;

/// Test name denoting the package as a whole.
///
/// The empty name does double duty: an event with it is about no specific
/// test, and its `output` lines are the package summary (`FAIL\n`,
/// `ok  \tpkg\t0.01s\n`). A downgraded package failure is reported as
/// [`Action::Success`], not [`Action::Pass`].
pub const PACKAGE_ROOT: &str = "";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Action {
    Start,
    Run,
    Pause,
    Cont,
    Pass,
    Bench,
    Fail,
    Output,
    Skip,
    /// Package-level pass written when a package failure is downgraded.
    Success,
    /// Anything else; carried through verbatim.
    Other(String),
}

impl Action {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Start => "start",
            Self::Run => "run",
            Self::Pause => "pause",
            Self::Cont => "cont",
            Self::Pass => "pass",
            Self::Bench => "bench",
            Self::Fail => "fail",
            Self::Output => "output",
            Self::Skip => "skip",
            Self::Success => "success",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for Action {
    fn from(s: String) -> Self {
        match s.as_str() {
            "start" => Self::Start,
            "run" => Self::Run,
            "pause" => Self::Pause,
            "cont" => Self::Cont,
            "pass" => Self::Pass,
            "bench" => Self::Bench,
            "fail" => Self::Fail,
            "output" => Self::Output,
            "skip" => Self::Skip,
            "success" => Self::Success,
            _ => Self::Other(s),
        }
    }
}

impl From<Action> for String {
    fn from(a: Action) -> Self {
        match a {
            Action::Other(s) => s,
            other => other.as_str().to_owned(),
        }
    }
}

impl Serialize for Action {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One record of the test-execution stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TestEvent {
    /// RFC 3339 timestamp, kept as written by the runner so it round-trips
    /// byte for byte.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    pub action: Action,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub package: String,
    /// Hierarchical test name (`Foo/Bar/Baz`); [`PACKAGE_ROOT`] for the package.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub test: String,
    /// Seconds, kept as the number written by the runner (`0`, not `0.0`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elapsed: Option<serde_json::Number>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub output: String,
    /// Fields not interpreted here (`FailedBuild`, `ImportPath`, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl TestEvent {
    pub fn new(action: Action, package: impl Into<String>, test: impl Into<String>) -> Self {
        Self {
            time: None,
            action,
            package: package.into(),
            test: test.into(),
            elapsed: None,
            output: String::new(),
            extra: serde_json::Map::new(),
        }
    }

    /// An `output` event carrying `line`.
    pub fn output(package: impl Into<String>, test: impl Into<String>, line: impl Into<String>) -> Self {
        let mut ev = Self::new(Action::Output, package, test);
        ev.output = line.into();
        ev
    }

    pub fn is_package_level(&self) -> bool {
        self.test == PACKAGE_ROOT
    }

    /// Decode one line of the stream. `record` is the 1-based line number,
    /// used only for error context.
    pub fn decode(line: &str, record: usize) -> Result<Self, DecodeError> {
        serde_json::from_str(line).map_err(|source| DecodeError { record, source })
    }

    /// Encode as a single JSON line, without the trailing newline.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
