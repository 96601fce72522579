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

//! # Shared Run State
//!
//! Everything the engine's workers coordinate through during one run: the
//! capped solution store, the pruning counters, and the borrowed handles to
//! the stop latch, memory budget, progress tracker, event channel, and
//! monitor. All of it is shared by reference across the thread pool's
//! tasks, so every mutation goes through atomics or the store's mutex.

use crate::bounds::BoundTable;
use crossbeam_channel::Sender;
use std::sync::{
    atomic::{AtomicU64, AtomicUsize, Ordering},
    Mutex,
};
use tally_model::{Problem, Solution};
use tally_search::{
    budget::MemoryBudget,
    event::SearchEvent,
    monitor::SearchMonitor,
    progress::ProgressTracker,
    stop::{StopCause, StopCell},
};

/// The capped, order-preserving store of confirmed solutions.
///
/// Storing and publishing happen under one mutex so the stream of
/// `Solution` events matches the stored set exactly and the cap can never
/// be overrun by a racing worker. The counter mirrors the stored length for
/// lock-free reads by monitors and progress snapshots.
#[derive(Debug)]
pub struct SolutionStore {
    solutions: Mutex<Vec<Solution>>,
    count: AtomicU64,
    cap: u64,
}

impl SolutionStore {
    /// Creates a store accepting at most `cap` solutions.
    pub fn new(cap: usize) -> Self {
        Self {
            solutions: Mutex::new(Vec::new()),
            count: AtomicU64::new(0),
            cap: cap as u64,
        }
    }

    /// Attempts to store a confirmed solution and publish it on `events`.
    ///
    /// Returns `false` when the cap was already reached and the solution
    /// was discarded. The store latches the stop cell itself at the moment
    /// the capping solution lands, so a full store always implies a stop
    /// request.
    pub fn try_store(
        &self,
        solution: Solution,
        stop: &StopCell,
        events: &Sender<SearchEvent>,
    ) -> bool {
        let mut guard = self.solutions.lock().unwrap();
        if guard.len() as u64 >= self.cap {
            return false;
        }

        // Receiver may already be gone; the run still terminates normally.
        let _ = events.send(SearchEvent::Solution(solution.clone()));
        guard.push(solution);
        let len = guard.len() as u64;
        self.count.store(len, Ordering::Release);

        if len >= self.cap {
            stop.request(StopCause::SolutionCapReached);
        }
        true
    }

    /// Returns the number of stored solutions.
    #[inline]
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Acquire)
    }

    /// Returns the counter cell, for monitors that watch the count.
    #[inline]
    pub fn count_cell(&self) -> &AtomicU64 {
        &self.count
    }

    /// Returns the configured cap.
    #[inline]
    pub fn cap(&self) -> u64 {
        self.cap
    }

    /// Returns a copy of the stored solutions in discovery order.
    pub fn solutions(&self) -> Vec<Solution> {
        self.solutions.lock().unwrap().clone()
    }
}

/// Lock-free counters the workers bump while searching.
#[derive(Debug, Default)]
pub struct SearchCounters {
    prunings_bound: AtomicU64,
    prunings_overshoot: AtomicU64,
    tasks_spawned: AtomicU64,
    max_depth: AtomicUsize,
}

impl SearchCounters {
    /// Creates zeroed counters.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a subtree cut by the reachability bound.
    #[inline]
    pub fn add_pruning_bound(&self) {
        self.prunings_bound.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a subtree cut by an overshot running sum.
    #[inline]
    pub fn add_pruning_overshoot(&self) {
        self.prunings_overshoot.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a task handed to the thread pool.
    #[inline]
    pub fn add_task_spawned(&self) {
        self.tasks_spawned.fetch_add(1, Ordering::Relaxed);
    }

    /// Records the decision level a worker reached.
    #[inline]
    pub fn observe_depth(&self, depth: usize) {
        self.max_depth.fetch_max(depth, Ordering::Relaxed);
    }

    #[inline]
    pub fn prunings_bound(&self) -> u64 {
        self.prunings_bound.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn prunings_overshoot(&self) -> u64 {
        self.prunings_overshoot.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn tasks_spawned(&self) -> u64 {
        self.tasks_spawned.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth.load(Ordering::Relaxed)
    }
}

/// The borrowed coordination state one engine run operates on.
///
/// Shared by reference across all of the run's pool tasks.
#[derive(Clone, Copy)]
pub struct RunState<'a> {
    pub problem: &'a Problem,
    pub bounds: &'a BoundTable,
    pub stop: &'a StopCell,
    pub store: &'a SolutionStore,
    pub budget: &'a MemoryBudget,
    pub progress: &'a ProgressTracker,
    pub counters: &'a SearchCounters,
    pub events: &'a Sender<SearchEvent>,
    pub monitor: &'a dyn SearchMonitor,
}

impl std::fmt::Debug for RunState<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunState")
            .field("problem", self.problem)
            .field("stop", self.stop)
            .field("stored_solutions", &self.store.count())
            .field("monitor", &self.monitor.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{SearchCounters, SolutionStore};
    use crossbeam_channel::unbounded;
    use tally_model::{ElementIndex, Money, Problem, ProblemBuilder, Solution};
    use tally_search::{
        event::SearchEvent,
        stop::{StopCause, StopCell},
    };

    fn build_problem(values: &[i64], target: i64, cap: usize) -> Problem {
        let mut builder = ProblemBuilder::new();
        builder.extend_values(values.iter().map(|&c| Money::from_cents(c)));
        builder.target(Money::from_cents(target));
        builder.max_solutions(cap);
        builder.build().unwrap()
    }

    fn solution_of(problem: &Problem, indices: &[usize]) -> Solution {
        Solution::try_from_indices(
            problem,
            indices.iter().map(|&i| ElementIndex::new(i)).collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_store_publishes_and_counts() {
        let problem = build_problem(&[2_500, 2_500, 2_500], 2_500, 2);
        let store = SolutionStore::new(2);
        let stop = StopCell::new();
        let (tx, rx) = unbounded();

        assert!(store.try_store(solution_of(&problem, &[0]), &stop, &tx));
        assert_eq!(store.count(), 1);
        assert!(!stop.is_requested());

        match rx.try_recv().unwrap() {
            SearchEvent::Solution(solution) => assert_eq!(solution.indices()[0].get(), 0),
            other => panic!("expected Solution event, got {:?}", other),
        }
    }

    #[test]
    fn test_capping_store_latches_stop() {
        let problem = build_problem(&[2_500, 2_500, 2_500], 2_500, 2);
        let store = SolutionStore::new(2);
        let stop = StopCell::new();
        let (tx, rx) = unbounded();

        assert!(store.try_store(solution_of(&problem, &[0]), &stop, &tx));
        assert!(store.try_store(solution_of(&problem, &[1]), &stop, &tx));
        assert_eq!(stop.cause(), Some(StopCause::SolutionCapReached));

        // Past the cap the store rejects and publishes nothing.
        assert!(!store.try_store(solution_of(&problem, &[2]), &stop, &tx));
        assert_eq!(store.count(), 2);
        assert_eq!(rx.try_iter().count(), 2);
        assert_eq!(store.solutions().len(), 2);
    }

    #[test]
    fn test_store_survives_dropped_receiver() {
        let problem = build_problem(&[2_500], 2_500, 1);
        let store = SolutionStore::new(1);
        let stop = StopCell::new();
        let (tx, rx) = unbounded();
        drop(rx);

        assert!(store.try_store(solution_of(&problem, &[0]), &stop, &tx));
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_counters() {
        let counters = SearchCounters::new();
        counters.add_pruning_bound();
        counters.add_pruning_overshoot();
        counters.add_pruning_overshoot();
        counters.add_task_spawned();
        counters.observe_depth(5);
        counters.observe_depth(3);

        assert_eq!(counters.prunings_bound(), 1);
        assert_eq!(counters.prunings_overshoot(), 2);
        assert_eq!(counters.tasks_spawned(), 1);
        assert_eq!(counters.max_depth(), 5);
    }
}
