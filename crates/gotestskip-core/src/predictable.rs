//! Determinism mode: strips timing so two runs of the same tests produce
//! identical streams.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Number;

use crate::event::{Action, TestEvent};

static TEST_DURATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\d+\.\d+s\)\n").expect("valid regex"));
static PACKAGE_DURATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.\d+s\n").expect("valid regex"));

/// Drops the timestamp, zeroes `Elapsed` and normalizes durations at the end
/// of output lines.
pub fn make_predictable(ev: &mut TestEvent) {
    ev.time = None;
    if let Some(elapsed) = ev.elapsed.as_mut() {
        *elapsed = Number::from(0);
    }
    if ev.action != Action::Output {
        return;
    }
    let normalized = if ev.is_package_level() {
        PACKAGE_DURATION.replace_all(&ev.output, "0.000s\n")
    } else {
        TEST_DURATION.replace_all(&ev.output, "(0.00s)\n")
    };
    if let std::borrow::Cow::Owned(s) = normalized {
        ev.output = s;
    }
}
