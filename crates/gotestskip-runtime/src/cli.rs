//! CLI definition using clap derive.

use std::ffi::OsString;
use std::path::Path;

use clap::Parser;

const AFTER_HELP: &str = "\
If no skip list is given, this behaves like `go test -json ...`.

The skip list groups test names under package headings:

    somerepo.com/pkg0:
        TestX/subtest
        TestX/othertest
        TestY
    somerepo.com/pkg1:
        TestZ 2022-03-04

Skipping a test skips all its sub-tests too. With --skip-root somerepo.com
the headings above may be written as `pkg0:` and `pkg1:`.

A test marked to be skipped still runs: any failure is reported as a skip
instead. Tests that run for a very long time or panic are not helped.

A test name may be followed by a YYYY-MM-DD date recording when it was
listed; it is checked for syntax and otherwise ignored.

Under gotestsum:

    gotestsum --raw-command -- gotestskip ./...";

#[derive(Parser, Debug)]
#[command(
    name = "gotestskip",
    version,
    about = "Run `go test -json`, reporting known-to-fail tests as skipped",
    after_help = AFTER_HELP
)]
pub struct Cli {
    /// Skip-list file. Without one, go test output is passed through untouched.
    /// An empty GO_SKIP_TESTS counts as unset.
    #[arg(
        long,
        env = "GO_SKIP_TESTS",
        value_name = "PATH",
        value_parser = clap::builder::OsStringValueParser::new()
    )]
    pub skip_file: Option<OsString>,

    /// Prefix prepended to package headings in the skip list.
    #[arg(long, env = "GO_SKIP_ROOT", value_name = "PREFIX", default_value = "")]
    pub skip_root: String,

    /// Strip timestamps and durations so output is reproducible.
    #[arg(long, env = "GO_SKIP_PREDICTABLE")]
    pub predictable: bool,

    /// go binary to invoke.
    #[arg(long, env = "GOTESTSKIP_GO", value_name = "PATH", default_value = gotestskip_runner::DEFAULT_GO_BIN)]
    pub go_bin: String,

    /// Arguments passed to `go test -json`.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "GO_TEST_ARGS")]
    pub go_args: Vec<String>,
}

impl Cli {
    /// The skip list to translate with, if any. Empty counts as none.
    pub fn skip_list_path(&self) -> Option<&Path> {
        self.skip_file
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(Path::new)
    }
}
