//! Ancestor chains of hierarchical test names.

use std::iter::FusedIterator;

use crate::event::PACKAGE_ROOT;

/// Separator between the segments of a sub-test name.
pub const DELIM: char = '/';

/// Returns `test` followed by each ancestor obtained by truncating at the
/// last [`DELIM`], ending with the package root.
///
/// `parents("Foo/Bar/Baz")` yields `"Foo/Bar/Baz"`, `"Foo/Bar"`, `"Foo"`, `""`.
/// Every chain has one more element than `test` has delimiters, plus the
/// root, so the package root itself yields `""` twice.
pub fn parents(test: &str) -> Parents<'_> {
    Parents {
        next: Some(test),
        root_pending: true,
    }
}

/// Iterator returned by [`parents`].
#[derive(Debug, Clone)]
pub struct Parents<'a> {
    next: Option<&'a str>,
    root_pending: bool,
}

impl<'a> Iterator for Parents<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if let Some(cur) = self.next.take() {
            self.next = cur.rfind(DELIM).map(|i| &cur[..i]);
            return Some(cur);
        }
        if self.root_pending {
            self.root_pending = false;
            return Some(PACKAGE_ROOT);
        }
        None
    }
}

impl FusedIterator for Parents<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn chain(test: &str) -> Vec<&str> {
        parents(test).collect()
    }

    #[test]
    fn nested_name() {
        assert_eq!(chain("Foo/Bar/Baz"), ["Foo/Bar/Baz", "Foo/Bar", "Foo", ""]);
    }

    #[test]
    fn top_level_name() {
        assert_eq!(chain("TestY"), ["TestY", ""]);
    }

    #[test]
    fn package_root() {
        assert_eq!(chain(""), ["", ""]);
    }

    #[test]
    fn leading_and_trailing_delimiters() {
        assert_eq!(chain("/Foo"), ["/Foo", "", ""]);
        assert_eq!(chain("Foo/"), ["Foo/", "Foo", ""]);
        assert_eq!(chain("A//B"), ["A//B", "A/", "A", ""]);
    }

    proptest! {
        #[test]
        fn chain_ends_at_root(name in "[A-Za-z0-9_/#]{0,24}") {
            let c = chain(&name);
            prop_assert!(!c.is_empty());
            prop_assert_eq!(*c.last().unwrap(), "");
            prop_assert_eq!(c[0], name.as_str());
        }

        #[test]
        fn chain_length_tracks_delimiters(name in "[A-Za-z0-9_/#]{0,24}") {
            let delims = name.matches(DELIM).count();
            prop_assert_eq!(chain(&name).len(), delims + 2);
        }

        #[test]
        fn each_step_is_a_prefix(name in "[A-Za-z0-9_/]{1,24}") {
            let c = chain(&name);
            for pair in c.windows(2) {
                prop_assert!(pair[0].starts_with(pair[1]));
            }
        }
    }
}
