//! Output held back while a test's verdict is undecided.

use std::collections::HashMap;

use crate::event::TestEvent;
use crate::rewrite::{Verdict, rewrite_fail_output};

/// How a released queue is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flush {
    /// As received; the held lines describe a genuine result.
    Verbatim,
    /// With FAIL lines rewritten to PASS.
    AsPassed,
}

/// FIFO queues of saved `output` events per (package, test).
#[derive(Debug, Default)]
pub struct EventBuffer {
    packages: HashMap<String, HashMap<String, Vec<Saved>>>,
    seq: u64,
}

/// Arrival sequence lets [`EventBuffer::drain_all`] restore global order.
#[derive(Debug)]
struct Saved {
    seq: u64,
    event: TestEvent,
}

impl EventBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save(&mut self, package: &str, test: &str, event: TestEvent) {
        self.seq += 1;
        tracing::debug!(package, test, seq = self.seq, "holding output");
        self.packages
            .entry(package.to_owned())
            .or_default()
            .entry(test.to_owned())
            .or_default()
            .push(Saved {
                seq: self.seq,
                event,
            });
    }

    /// Removes and returns the queue for (package, test) in arrival order.
    pub fn flush(&mut self, package: &str, test: &str, mode: Flush) -> Vec<TestEvent> {
        let Some(saved) = self
            .packages
            .get_mut(package)
            .and_then(|tests| tests.remove(test))
        else {
            return Vec::new();
        };
        tracing::debug!(package, test, count = saved.len(), ?mode, "releasing held output");
        saved
            .into_iter()
            .map(|s| {
                let mut ev = s.event;
                if mode == Flush::AsPassed {
                    rewrite_fail_output(&mut ev, Verdict::Pass);
                }
                ev
            })
            .collect()
    }

    /// Number of events currently held.
    pub fn len(&self) -> usize {
        self.packages
            .values()
            .flat_map(HashMap::values)
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every held event, verbatim, in arrival order.
    pub fn drain_all(&mut self) -> Vec<TestEvent> {
        let mut saved: Vec<Saved> = self
            .packages
            .drain()
            .flat_map(|(_, tests)| tests.into_values().flatten())
            .collect();
        saved.sort_by_key(|s| s.seq);
        saved.into_iter().map(|s| s.event).collect()
    }
}
