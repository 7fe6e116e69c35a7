use std::collections::VecDeque;

use crate::foundation::error::{SvgVariantsError, SvgVariantsResult};

/// Bounded-concurrency bookkeeping for one run.
///
/// Jobs are admitted while fewer than `limit` are active and queued FIFO otherwise. Every
/// completion frees exactly one slot, which the queue head takes immediately.
///
/// Invariant: `active() <= limit()` at all times.
#[derive(Debug)]
pub struct SchedulerState<J> {
    active: usize,
    pending: VecDeque<J>,
    limit: usize,
    peak: usize,
}

impl<J> SchedulerState<J> {
    /// New state with the given concurrency ceiling.
    pub fn new(limit: usize) -> SvgVariantsResult<Self> {
        if limit == 0 {
            return Err(SvgVariantsError::validation(
                "concurrency limit must be >= 1",
            ));
        }
        Ok(Self {
            active: 0,
            pending: VecDeque::new(),
            limit,
            peak: 0,
        })
    }

    /// Offer a job. Returns it back when it may start now; otherwise it is queued.
    pub fn submit(&mut self, job: J) -> Option<J> {
        if self.active < self.limit {
            self.start();
            Some(job)
        } else {
            self.pending.push_back(job);
            None
        }
    }

    /// Record that one active job reached a terminal state.
    ///
    /// Returns the queued job that takes the freed slot, if any.
    pub fn complete(&mut self) -> Option<J> {
        debug_assert!(self.active > 0, "complete() without an active job");
        self.active = self.active.saturating_sub(1);
        if self.active < self.limit {
            let next = self.pending.pop_front()?;
            self.start();
            return Some(next);
        }
        None
    }

    /// Drop every queued job, e.g. after a fatal error. Active jobs are unaffected.
    pub fn abandon_pending(&mut self) -> Vec<J> {
        self.pending.drain(..).collect()
    }

    /// `true` when nothing is active or queued: the only state the run may finish from.
    pub fn is_idle(&self) -> bool {
        self.active == 0 && self.pending.is_empty()
    }

    /// Jobs currently running.
    pub fn active(&self) -> usize {
        self.active
    }

    /// Jobs waiting for a slot.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// The concurrency ceiling.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Highest `active()` seen so far.
    pub fn peak_active(&self) -> usize {
        self.peak
    }

    fn start(&mut self) {
        self.active += 1;
        self.peak = self.peak.max(self.active);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scheduler/state.rs"]
mod tests;
