//! The skip-policy seam between the translator and its configuration source.

use std::collections::{HashMap, HashSet};

use crate::parents::parents;

/// Answers whether a test is known to fail and should be reported skipped.
///
/// Implementations must treat a test as marked when it or any ancestor in
/// [`parents`] is listed: skipping a test skips its sub-tests too.
pub trait SkipPolicy {
    fn should_skip(&self, package: &str, test: &str) -> bool;
}

impl<T: SkipPolicy + ?Sized> SkipPolicy for &T {
    fn should_skip(&self, package: &str, test: &str) -> bool {
        (**self).should_skip(package, test)
    }
}

/// Package name to listed test names.
impl SkipPolicy for HashMap<String, HashSet<String>> {
    fn should_skip(&self, package: &str, test: &str) -> bool {
        self.get(package)
            .is_some_and(|listed| parents(test).any(|name| listed.contains(name)))
    }
}

/// Policy that skips nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSkips;

impl SkipPolicy for NoSkips {
    fn should_skip(&self, _package: &str, _test: &str) -> bool {
        false
    }
}
