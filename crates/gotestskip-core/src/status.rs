//! Per-test verdict tracking across the parent/child name hierarchy.
//!
//! Every mutation walks [`parents`] of the test, so a verdict recorded for
//! `Foo/Bar` is also visible on `Foo` and on the package root.

use std::collections::HashMap;

use crate::parents::parents;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestStatus {
    /// No event has decided anything yet.
    #[default]
    Unknown,
    /// A skip-listed descendant is running; output is held back.
    Skipping,
    /// Genuinely failed, here or in a descendant. Sticky.
    Failed,
    /// A descendant failed but was reported as skipped, so a failure of this
    /// test is presumed to be a consequence of it.
    Suppressed,
}

/// Status of every test identity seen in one run, keyed by package then
/// test name.
#[derive(Debug, Default)]
pub struct StatusTable {
    packages: HashMap<String, HashMap<String, TestStatus>>,
}

impl StatusTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current status; [`TestStatus::Unknown`] if never set.
    pub fn status_of(&self, package: &str, test: &str) -> TestStatus {
        self.packages
            .get(package)
            .and_then(|tests| tests.get(test))
            .copied()
            .unwrap_or_default()
    }

    /// Marks `test` and all its ancestors failed, overriding suppression.
    pub fn mark_failed(&mut self, package: &str, test: &str) {
        self.update(package, test, |_| TestStatus::Failed);
    }

    /// Marks `test` and all its ancestors suppressed, except those already
    /// failed.
    pub fn mark_would_have_failed(&mut self, package: &str, test: &str) {
        self.update(package, test, |old| match old {
            TestStatus::Failed => TestStatus::Failed,
            _ => TestStatus::Suppressed,
        });
    }

    /// Marks `test` and its ancestors as skipping where no verdict exists yet.
    pub fn mark_skipping(&mut self, package: &str, test: &str) {
        self.update(package, test, |old| match old {
            TestStatus::Unknown => TestStatus::Skipping,
            decided => decided,
        });
    }

    fn update(&mut self, package: &str, test: &str, next: impl Fn(TestStatus) -> TestStatus) {
        let tests = self.packages.entry(package.to_owned()).or_default();
        for name in parents(test) {
            let old = tests.get(name).copied().unwrap_or_default();
            let new = next(old);
            if new != old {
                tracing::debug!(package, test = name, ?old, ?new, "status transition");
                tests.insert(name.to_owned(), new);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const PKG: &str = "example.com/pkg";

    #[test]
    fn unknown_by_default() {
        let table = StatusTable::new();
        assert_eq!(table.status_of(PKG, "TestX"), TestStatus::Unknown);
        assert_eq!(table.status_of("other", ""), TestStatus::Unknown);
    }

    #[test]
    fn mark_failed_propagates_to_root() {
        let mut table = StatusTable::new();
        table.mark_failed(PKG, "TestX/a/b");
        for name in ["TestX/a/b", "TestX/a", "TestX", ""] {
            assert_eq!(table.status_of(PKG, name), TestStatus::Failed, "{name}");
        }
        assert_eq!(table.status_of(PKG, "TestX/other"), TestStatus::Unknown);
    }

    #[test]
    fn suppression_does_not_mask_failure() {
        let mut table = StatusTable::new();
        table.mark_failed(PKG, "TestX/a");
        table.mark_would_have_failed(PKG, "TestX/b");
        assert_eq!(table.status_of(PKG, "TestX/b"), TestStatus::Suppressed);
        assert_eq!(table.status_of(PKG, "TestX"), TestStatus::Failed);
        assert_eq!(table.status_of(PKG, ""), TestStatus::Failed);
    }

    #[test]
    fn failure_overrides_suppression() {
        let mut table = StatusTable::new();
        table.mark_would_have_failed(PKG, "TestX/a");
        assert_eq!(table.status_of(PKG, "TestX"), TestStatus::Suppressed);
        table.mark_failed(PKG, "TestX/b");
        assert_eq!(table.status_of(PKG, "TestX"), TestStatus::Failed);
        assert_eq!(table.status_of(PKG, "TestX/a"), TestStatus::Suppressed);
    }

    #[test]
    fn skipping_only_fills_unknown() {
        let mut table = StatusTable::new();
        table.mark_would_have_failed(PKG, "TestX/a");
        table.mark_skipping(PKG, "TestX/b");
        assert_eq!(table.status_of(PKG, "TestX/b"), TestStatus::Skipping);
        assert_eq!(table.status_of(PKG, "TestX"), TestStatus::Suppressed);
        assert_eq!(table.status_of(PKG, ""), TestStatus::Suppressed);
    }

    #[test]
    fn suppression_replaces_skipping() {
        let mut table = StatusTable::new();
        table.mark_skipping(PKG, "TestX/a");
        assert_eq!(table.status_of(PKG, "TestX"), TestStatus::Skipping);
        table.mark_would_have_failed(PKG, "TestX/a");
        assert_eq!(table.status_of(PKG, "TestX"), TestStatus::Suppressed);
    }

    #[test]
    fn packages_are_independent() {
        let mut table = StatusTable::new();
        table.mark_failed("a", "TestX");
        assert_eq!(table.status_of("b", "TestX"), TestStatus::Unknown);
        assert_eq!(table.status_of("b", ""), TestStatus::Unknown);
    }

    #[derive(Debug, Clone, Copy)]
    enum Op {
        WouldHaveFailed,
        Skipping,
    }

    proptest! {
        #[test]
        fn failed_is_sticky(
            ops in proptest::collection::vec(
                (prop_oneof![Just(Op::WouldHaveFailed), Just(Op::Skipping)],
                 prop_oneof![Just("TestX"), Just("TestX/a"), Just("TestX/a/b"), Just("")]),
                0..16,
            )
        ) {
            let mut table = StatusTable::new();
            table.mark_failed(PKG, "TestX/a");
            for (op, test) in ops {
                match op {
                    Op::WouldHaveFailed => table.mark_would_have_failed(PKG, test),
                    Op::Skipping => table.mark_skipping(PKG, test),
                }
            }
            for name in ["TestX/a", "TestX", ""] {
                prop_assert_eq!(table.status_of(PKG, name), TestStatus::Failed);
            }
        }
    }
}
