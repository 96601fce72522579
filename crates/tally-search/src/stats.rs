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

//! # Search Statistics
//!
//! Aggregated figures for one finished run, assembled by the driver from
//! the engine counters, the memory budget and the progress tracker. These
//! are logged at the end of a run and are not part of the event stream.

use std::time::Duration;

/// Aggregated statistics of one search run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchStatistics {
    /// Nodes expanded across all workers.
    pub nodes_explored: u64,
    /// Solutions confirmed and stored.
    pub solutions_found: u64,
    /// Subtrees cut because the remaining suffix could no longer reach the
    /// target.
    pub prunings_bound: u64,
    /// Subtrees cut because the running sum overshot the target.
    pub prunings_overshoot: u64,
    /// Deepest decision level any worker reached.
    pub max_depth: usize,
    /// Parallel tasks handed to the thread pool.
    pub tasks_spawned: u64,
    /// Highest tracked memory usage observed, in bytes.
    pub peak_memory_bytes: usize,
    /// Worker threads the pool ran with.
    pub used_threads: usize,
    /// Wall-clock duration of the run.
    pub total_time: Duration,
}

impl SearchStatistics {
    /// Returns a builder with all figures zeroed.
    #[inline]
    pub fn builder() -> SearchStatisticsBuilder {
        SearchStatisticsBuilder::new()
    }

    /// Total subtrees pruned, regardless of the reason.
    #[inline]
    pub fn prunings_total(&self) -> u64 {
        self.prunings_bound + self.prunings_overshoot
    }

    /// Nodes expanded per second, or `None` for an instantaneous run.
    pub fn nodes_per_second(&self) -> Option<f64> {
        let secs = self.total_time.as_secs_f64();
        if secs <= 0.0 {
            return None;
        }
        Some(self.nodes_explored as f64 / secs)
    }
}

impl std::fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} nodes, {} solutions, {} pruned (bound {}, overshoot {}), \
             depth {}, {} tasks, {} threads, peak {} bytes, {:.3}s",
            self.nodes_explored,
            self.solutions_found,
            self.prunings_total(),
            self.prunings_bound,
            self.prunings_overshoot,
            self.max_depth,
            self.tasks_spawned,
            self.used_threads,
            self.peak_memory_bytes,
            self.total_time.as_secs_f64()
        )
    }
}

/// Builder for [`SearchStatistics`].
#[derive(Debug, Clone, Default)]
pub struct SearchStatisticsBuilder {
    stats: SearchStatistics,
}

impl SearchStatisticsBuilder {
    /// Creates a builder with all figures zeroed.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of nodes expanded.
    #[inline]
    pub fn with_nodes_explored(mut self, nodes: u64) -> Self {
        self.stats.nodes_explored = nodes;
        self
    }

    /// Sets the number of solutions confirmed.
    #[inline]
    pub fn with_solutions_found(mut self, solutions: u64) -> Self {
        self.stats.solutions_found = solutions;
        self
    }

    /// Sets the number of bound prunings.
    #[inline]
    pub fn with_prunings_bound(mut self, prunings: u64) -> Self {
        self.stats.prunings_bound = prunings;
        self
    }

    /// Sets the number of overshoot prunings.
    #[inline]
    pub fn with_prunings_overshoot(mut self, prunings: u64) -> Self {
        self.stats.prunings_overshoot = prunings;
        self
    }

    /// Sets the deepest decision level reached.
    #[inline]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.stats.max_depth = depth;
        self
    }

    /// Sets the number of parallel tasks spawned.
    #[inline]
    pub fn with_tasks_spawned(mut self, tasks: u64) -> Self {
        self.stats.tasks_spawned = tasks;
        self
    }

    /// Sets the peak tracked memory usage.
    #[inline]
    pub fn with_peak_memory_bytes(mut self, bytes: usize) -> Self {
        self.stats.peak_memory_bytes = bytes;
        self
    }

    /// Sets the number of worker threads used.
    #[inline]
    pub fn with_used_threads(mut self, threads: usize) -> Self {
        self.stats.used_threads = threads;
        self
    }

    /// Sets the wall-clock duration of the run.
    #[inline]
    pub fn with_total_time(mut self, time: Duration) -> Self {
        self.stats.total_time = time;
        self
    }

    /// Finalizes the statistics.
    #[inline]
    pub fn build(self) -> SearchStatistics {
        self.stats
    }
}
