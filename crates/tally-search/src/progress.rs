// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Progress Tracking
//!
//! Workers add their node counts to a shared [`ProgressTracker`]; one of
//! them occasionally wins the rate-limit race and publishes a
//! [`ProgressSnapshot`]. The rate limit is enforced at the producer with a
//! compare-exchange on the last-emit timestamp, so progress stays lossy and
//! cheap no matter how many workers are running. Coverage is derived in
//! log10 space because the full space for 300 elements (2^300) does not fit
//! any machine integer.

use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::{Duration, Instant},
};
use tally_model::SearchSpace;

/// A point-in-time view of a running search.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSnapshot {
    /// Nodes expanded so far, across all workers.
    pub nodes_explored: u64,
    /// Wall-clock time since the run started.
    pub elapsed: Duration,
    /// Solutions confirmed so far.
    pub solutions_found: u64,
    /// Fraction of the full subset space visited, in percent. Spaces
    /// beyond 10^15 subsets report `Some(0.0)`: no realistic run makes a
    /// dent in them. `None` only for an empty space.
    pub coverage_percent: Option<f64>,
}

impl std::fmt::Display for ProgressSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} nodes, {} solutions, {:.3}s",
            self.nodes_explored,
            self.solutions_found,
            self.elapsed.as_secs_f64()
        )?;
        if let Some(percent) = self.coverage_percent {
            write!(f, ", {:.6}% covered", percent)?;
        }
        Ok(())
    }
}

/// Shared node counter plus the rate limiter for progress emission.
///
/// `add_nodes` is the per-batch hot path; `try_tick` is only called at the
/// periodic check interval and at most one caller per interval gets `true`.
#[derive(Debug)]
pub struct ProgressTracker {
    nodes: AtomicU64,
    last_emit_micros: AtomicU64,
    started: Instant,
    interval: Duration,
    space: SearchSpace,
}

impl ProgressTracker {
    /// Creates a tracker for a run over the given search space, emitting at
    /// most one snapshot per `interval`.
    pub fn new(space: SearchSpace, interval: Duration) -> Self {
        Self {
            nodes: AtomicU64::new(0),
            last_emit_micros: AtomicU64::new(0),
            started: Instant::now(),
            interval,
            space,
        }
    }

    /// Adds a worker's node batch and returns the new run-wide total.
    #[inline]
    pub fn add_nodes(&self, count: u64) -> u64 {
        self.nodes.fetch_add(count, Ordering::Relaxed) + count
    }

    /// Returns the run-wide node total.
    #[inline]
    pub fn nodes_explored(&self) -> u64 {
        self.nodes.load(Ordering::Relaxed)
    }

    /// Returns the elapsed wall-clock time of the run.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Returns `true` if the caller won the right to emit a snapshot for
    /// the current interval. At most one caller per interval wins.
    pub fn try_tick(&self) -> bool {
        let now = self.started.elapsed().as_micros() as u64;
        let last = self.last_emit_micros.load(Ordering::Relaxed);
        if now.saturating_sub(last) < self.interval.as_micros() as u64 {
            return false;
        }
        self.last_emit_micros
            .compare_exchange(last, now, Ordering::Relaxed, Ordering::Relaxed)
            .is_ok()
    }

    /// Builds a snapshot of the current state.
    pub fn snapshot(&self, solutions_found: u64) -> ProgressSnapshot {
        let nodes = self.nodes_explored();
        ProgressSnapshot {
            nodes_explored: nodes,
            elapsed: self.elapsed(),
            solutions_found,
            coverage_percent: self.space.coverage(nodes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ProgressTracker;
    use std::time::Duration;
    use tally_model::SearchSpace;

    #[test]
    fn test_add_nodes_accumulates() {
        let tracker = ProgressTracker::new(SearchSpace::of_subsets(10), Duration::ZERO);
        assert_eq!(tracker.add_nodes(5), 5);
        assert_eq!(tracker.add_nodes(3), 8);
        assert_eq!(tracker.nodes_explored(), 8);
    }

    #[test]
    fn test_zero_interval_always_ticks() {
        let tracker = ProgressTracker::new(SearchSpace::of_subsets(10), Duration::ZERO);
        assert!(tracker.try_tick());
    }

    #[test]
    fn test_long_interval_ticks_at_most_once() {
        let tracker =
            ProgressTracker::new(SearchSpace::of_subsets(10), Duration::from_secs(3600));
        // The first interval since start has not elapsed yet.
        assert!(!tracker.try_tick());
        assert!(!tracker.try_tick());
    }

    #[test]
    fn test_snapshot_reports_small_space_coverage() {
        let tracker = ProgressTracker::new(SearchSpace::of_subsets(4), Duration::ZERO);
        tracker.add_nodes(8);
        let snapshot = tracker.snapshot(2);
        assert_eq!(snapshot.nodes_explored, 8);
        assert_eq!(snapshot.solutions_found, 2);
        // 8 of 16 subsets.
        let percent = snapshot.coverage_percent.unwrap();
        assert!((percent - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_snapshot_omits_coverage_for_huge_spaces() {
        let tracker = ProgressTracker::new(SearchSpace::of_subsets(300), Duration::ZERO);
        tracker.add_nodes(1_000_000);
        assert_eq!(tracker.snapshot(0).coverage_percent, Some(0.0));
    }
}
