//! gotestskip-skiplist: loads the list of known-to-fail tests.
//!
//! The format is an indented list grouped under package headings:
//!
//! ```text
//! somerepo.com/pkg0:
//!     TestX/subtest
//!     - TestY
//! somerepo.com/pkg1:
//!     TestZ 2022-03-04
//! ```
//!
//! A heading is any line ending in `:`. Each entry names one test, optionally
//! preceded by a `-` list marker and followed by a `YYYY-MM-DD` date that is
//! validated but otherwise ignored. Blank lines and `#` comments are skipped.
//! With a root prefix such as `somerepo.com`, headings may be written relative
//! to it (`pkg0:`), and `.:` names the root package itself.

pub mod error;

use std::collections::{HashMap, HashSet};
use std::path::Path;

use chrono::NaiveDate;
use gotestskip_core::SkipPolicy;

pub use error::SkipListError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Tests to report as skipped, by package.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SkipList {
    packages: HashMap<String, HashSet<String>>,
}

impl SkipList {
    /// Read and parse the skip list at `path`.
    pub fn load(path: impl AsRef<Path>, root: &str) -> Result<Self, SkipListError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SkipListError::Io {
            path: path.to_owned(),
            source,
        })?;
        let list = Self::parse(&text, root)?;
        tracing::info!(
            path = %path.display(),
            packages = list.packages.len(),
            tests = list.len(),
            "loaded skip list"
        );
        Ok(list)
    }

    pub fn parse(text: &str, root: &str) -> Result<Self, SkipListError> {
        let mut list = Self::default();
        // package -> line of its heading
        let mut headings: HashMap<String, usize> = HashMap::new();
        let mut current: Option<String> = None;

        for (idx, raw) in text.lines().enumerate() {
            let line = idx + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            if let Some(heading) = trimmed.strip_suffix(':') {
                let heading = heading.trim_end();
                if heading.is_empty() {
                    return Err(SkipListError::EmptyPackage { line });
                }
                let package = qualify(root, heading);
                if let Some(&first) = headings.get(&package) {
                    return Err(SkipListError::DuplicatePackage {
                        line,
                        first,
                        package,
                    });
                }
                headings.insert(package.clone(), line);
                list.packages.entry(package.clone()).or_default();
                current = Some(package);
                continue;
            }

            let Some(package) = current.as_deref() else {
                return Err(SkipListError::MissingPackage { line });
            };
            let entry = match trimmed.strip_prefix('-') {
                Some(rest) => rest.trim_start(),
                None => trimmed,
            };
            let fields: Vec<&str> = entry.split_whitespace().collect();
            let test = match fields.as_slice() {
                [test] => *test,
                [test, date] => {
                    validate_date(date).map_err(|reason| SkipListError::InvalidDate {
                        line,
                        text: trimmed.to_owned(),
                        reason,
                    })?;
                    *test
                }
                [] => return Err(SkipListError::MissingTest { line }),
                _ => return Err(SkipListError::TooManyFields { line }),
            };
            let tests = list.packages.entry(package.to_owned()).or_default();
            if !tests.insert(test.to_owned()) {
                return Err(SkipListError::DuplicateTest {
                    line,
                    package: package.to_owned(),
                    test: test.to_owned(),
                });
            }
        }
        Ok(list)
    }

    /// Total number of listed tests across all packages.
    pub fn len(&self) -> usize {
        self.packages.values().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `test` itself is listed for `package` (ancestors not consulted).
    pub fn contains(&self, package: &str, test: &str) -> bool {
        self.packages
            .get(package)
            .is_some_and(|tests| tests.contains(test))
    }
}

impl SkipPolicy for SkipList {
    fn should_skip(&self, package: &str, test: &str) -> bool {
        self.packages.should_skip(package, test)
    }
}

fn qualify(root: &str, package: &str) -> String {
    let root = root.trim_end_matches('/');
    match (root, package) {
        ("", _) => package.to_owned(),
        (_, ".") => root.to_owned(),
        _ => format!("{root}/{package}"),
    }
}

fn validate_date(text: &str) -> Result<(), String> {
    let well_formed = text.len() == 10
        && text.char_indices().all(|(i, c)| match i {
            4 | 7 => c == '-',
            _ => c.is_ascii_digit(),
        });
    if !well_formed {
        return Err("expected YYYY-MM-DD".to_owned());
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map(|_| ())
        .map_err(|e| e.to_string())
}
