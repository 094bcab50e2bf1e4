//! gotestskip-core: rewrites a `go test -json` event stream so that
//! skip-listed (known-to-fail) tests report as skipped, and parents that
//! failed only because of such a test report as passed.
//!
//! Pure library: no process IO. The stream loop lives in the runtime crate.

pub mod buffer;
pub mod error;
pub mod event;
pub mod parents;
pub mod policy;
pub mod predictable;
pub mod rewrite;
pub mod status;
pub mod translate;

pub use buffer::{EventBuffer, Flush};
pub use error::DecodeError;
pub use event::{Action, PACKAGE_ROOT, TestEvent};
pub use parents::parents;
pub use policy::{NoSkips, SkipPolicy};
pub use predictable::make_predictable;
pub use rewrite::{Verdict, rewrite_fail_output};
pub use status::{StatusTable, TestStatus};
pub use translate::Translator;
