//! Rewriting of human-readable FAIL lines inside `output` events.

use crate::event::TestEvent;

/// Verdict a FAIL line is rewritten to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Skip,
    Pass,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Skip => "SKIP",
            Self::Pass => "PASS",
        }
    }
}

const TEST_FAIL_PREFIX: &str = "--- FAIL: ";
const PACKAGE_FAIL_LINE: &str = "FAIL\n";
const PACKAGE_FAIL_PREFIX: &str = "FAIL\t";

/// Rewrites a FAIL line in `ev.output` to `to`, keeping indentation.
///
/// Package-level lines always become their passing form: the package itself
/// is never reported as skipped, only as passing because its failure came
/// from a skipped test. Lines that are not FAIL lines are left alone.
pub fn rewrite_fail_output(ev: &mut TestEvent, to: Verdict) {
    if ev.is_package_level() {
        if ev.output == PACKAGE_FAIL_LINE {
            ev.output = "PASS\n".to_owned();
        } else if let Some(rest) = ev.output.strip_prefix(PACKAGE_FAIL_PREFIX) {
            // "FAIL\tpkg\t0.01s\n" -> "ok  \tpkg\t0.01s\n"
            ev.output = format!("ok  \t{rest}");
        }
        return;
    }
    let body = ev.output.trim_start_matches(' ');
    let indent = &ev.output[..ev.output.len() - body.len()];
    if let Some(rest) = body.strip_prefix(TEST_FAIL_PREFIX) {
        ev.output = format!("{indent}--- {}: {rest}", to.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewritten(test: &str, line: &str, to: Verdict) -> String {
        let mut ev = TestEvent::output("p", test, line);
        rewrite_fail_output(&mut ev, to);
        ev.output
    }

    #[test]
    fn test_line_to_skip_keeps_indent() {
        assert_eq!(
            rewritten("TestX/sub", "    --- FAIL: TestX/sub (0.01s)\n", Verdict::Skip),
            "    --- SKIP: TestX/sub (0.01s)\n"
        );
    }

    #[test]
    fn test_line_to_pass() {
        assert_eq!(
            rewritten("TestX", "--- FAIL: TestX (0.02s)\n", Verdict::Pass),
            "--- PASS: TestX (0.02s)\n"
        );
    }

    #[test]
    fn non_fail_lines_untouched() {
        for line in ["=== RUN   TestX\n", "    x_test.go:12: boom\n", "--- PASS: TestX (0.00s)\n", ""] {
            assert_eq!(rewritten("TestX", line, Verdict::Skip), line);
        }
    }

    #[test]
    fn tab_indent_is_not_treated_as_indent() {
        assert_eq!(
            rewritten("TestX", "\t--- FAIL: TestX\n", Verdict::Skip),
            "\t--- FAIL: TestX\n"
        );
    }

    #[test]
    fn package_lines_become_pass_regardless_of_verdict() {
        assert_eq!(rewritten("", "FAIL\n", Verdict::Skip), "PASS\n");
        assert_eq!(
            rewritten("", "FAIL\texample.com/p\t0.015s\n", Verdict::Skip),
            "ok  \texample.com/p\t0.015s\n"
        );
        assert_eq!(rewritten("", "--- FAIL: TestX\n", Verdict::Skip), "--- FAIL: TestX\n");
        assert_eq!(rewritten("", "ok  \tp\t0.1s\n", Verdict::Pass), "ok  \tp\t0.1s\n");
    }
}
