//! The per-event rewrite state machine.
//!
//! A [`Translator`] consumes the runner's events one at a time and returns
//! the events to write downstream. Failures of skip-listed tests become
//! skips, and a parent failure caused only by such a skip becomes a pass.
//!
//! test2json writes a parent's `--- FAIL` line before the `fail` actions of
//! its sub-tests, so while a skip-listed descendant is running the parent's
//! output is held in an [`EventBuffer`] until the parent's verdict is known.

use crate::buffer::{EventBuffer, Flush};
use crate::event::{Action, TestEvent};
use crate::policy::SkipPolicy;
use crate::predictable::make_predictable;
use crate::rewrite::{Verdict, rewrite_fail_output};
use crate::status::{StatusTable, TestStatus};

/// One run's translation session. All state is scoped to the value.
#[derive(Debug)]
pub struct Translator<P> {
    policy: P,
    status: StatusTable,
    buffer: EventBuffer,
    predictable: bool,
    failed: bool,
}

impl<P: SkipPolicy> Translator<P> {
    pub fn new(policy: P) -> Self {
        Self {
            policy,
            status: StatusTable::new(),
            buffer: EventBuffer::new(),
            predictable: false,
            failed: false,
        }
    }

    /// Enable determinism mode for every emitted event.
    #[must_use]
    pub fn with_predictable(mut self, predictable: bool) -> Self {
        self.predictable = predictable;
        self
    }

    /// False once any emitted event kept the `fail` action.
    pub fn is_ok(&self) -> bool {
        !self.failed
    }

    pub fn status(&self) -> &StatusTable {
        &self.status
    }

    /// Translate one event, returning what to emit in order. Released
    /// held output comes before the event that released it; a held event
    /// yields nothing.
    pub fn translate(&mut self, mut ev: TestEvent) -> Vec<TestEvent> {
        let mut out = Vec::new();
        let status = self.status.status_of(&ev.package, &ev.test);

        if self.policy.should_skip(&ev.package, &ev.test) {
            match ev.action {
                Action::Fail => {
                    ev.action = Action::Skip;
                    self.status.mark_would_have_failed(&ev.package, &ev.test);
                }
                Action::Output => rewrite_fail_output(&mut ev, Verdict::Skip),
                // The parent's FAIL line precedes its sub-tests' verdicts;
                // hold the ancestors' output until they resolve.
                Action::Run => self.status.mark_skipping(&ev.package, &ev.test),
                _ => {}
            }
        } else if status == TestStatus::Suppressed {
            match ev.action {
                Action::Fail if ev.is_package_level() => ev.action = Action::Success,
                Action::Fail => ev.action = Action::Pass,
                Action::Output => rewrite_fail_output(&mut ev, Verdict::Pass),
                _ => {}
            }
            out.extend(self.buffer.flush(&ev.package, &ev.test, Flush::AsPassed));
        } else if ev.action == Action::Fail {
            self.status.mark_failed(&ev.package, &ev.test);
            out.extend(self.buffer.flush(&ev.package, &ev.test, Flush::Verbatim));
        } else if status == TestStatus::Skipping && ev.action == Action::Output {
            let (package, test) = (ev.package.clone(), ev.test.clone());
            self.buffer.save(&package, &test, ev);
            return out;
        } else if matches!(ev.action, Action::Pass | Action::Skip) {
            out.extend(self.buffer.flush(&ev.package, &ev.test, Flush::Verbatim));
        }

        if ev.action == Action::Fail {
            self.failed = true;
        }
        out.push(ev);
        self.finish_batch(out)
    }

    /// Release anything still held at end of stream, verbatim and in
    /// arrival order.
    pub fn finish(&mut self) -> Vec<TestEvent> {
        if !self.buffer.is_empty() {
            tracing::debug!(count = self.buffer.len(), "releasing output held at end of stream");
        }
        let out = self.buffer.drain_all();
        self.finish_batch(out)
    }

    fn finish_batch(&self, mut out: Vec<TestEvent>) -> Vec<TestEvent> {
        if self.predictable {
            out.iter_mut().for_each(make_predictable);
        }
        out
    }
}
