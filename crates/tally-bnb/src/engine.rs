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

//! # Branch-and-Bound Engine
//!
//! The recursive core. Each node decides whether the element at the current
//! search position is included or excluded; subtrees die the moment the
//! running sum overshoots the target or the remaining suffix can no longer
//! reach it. Near the root the two branches run as parallel `rayon::join`
//! tasks; below the serial cutoff the recursion stays on one worker, so
//! task overhead never dominates leaf work.
//!
//! The per-node hot path is deliberately thin: one relaxed stop-latch load,
//! one node-counter increment, and integer compares. Monitor polling and
//! progress emission happen only at the periodic check interval. Stop
//! conditions that arrive through a monitor, such as the consumer's cancel
//! flag, therefore reach the latch with a delay of up to
//! [`MONITOR_CHECK_INTERVAL`] node visits; once latched, every worker
//! observes the stop at its next node entry.

use crate::{
    bounds::BoundTable,
    state::RunState,
};
use smallvec::SmallVec;
use tally_model::{ElementIndex, Problem, Solution};
use tally_search::{
    event::SearchEvent,
    monitor::SearchCommand,
    stop::StopCause,
};

/// Below this many remaining elements the recursion stays serial.
pub const SEQUENTIAL_CUTOFF: usize = 16;

/// Past this decision depth no further tasks are forked.
pub const PARALLEL_DEPTH_LIMIT: usize = 12;

/// Monitors are polled and progress is offered every this many nodes.
pub const MONITOR_CHECK_INTERVAL: u64 = 1024;

/// The include-set of search positions along the current tree path.
/// Inline up to 32 decisions; deeper paths spill to the heap.
type PathVec = SmallVec<[u32; 32]>;

/// One run's worth of branch-and-bound over a fixed problem.
#[derive(Debug)]
pub struct BnbEngine<'a> {
    problem: &'a Problem,
    target_cents: i64,
}

impl<'a> BnbEngine<'a> {
    /// Creates an engine for the given problem.
    #[inline]
    pub fn new(problem: &'a Problem) -> Self {
        Self {
            problem,
            target_cents: problem.target().cents(),
        }
    }

    /// Builds the search ordering for this engine's problem.
    #[inline]
    pub fn bounds(&self) -> BoundTable {
        BoundTable::new(self.problem)
    }

    /// Runs the search to completion or until the stop latch fires.
    ///
    /// Call from inside the run's thread pool so `rayon::join` forks onto
    /// the pool's workers.
    pub fn run(&self, state: RunState<'_>) {
        state.monitor.on_enter_search(self.problem);
        let mut path = PathVec::new();
        self.explore(state, 0, 0, &mut path);
        state.monitor.on_exit_search();
    }

    fn explore(&self, state: RunState<'_>, pos: usize, sum_cents: i64, path: &mut PathVec) {
        if state.stop.is_requested() {
            return;
        }

        let total_nodes = state.progress.add_nodes(1);
        if total_nodes % MONITOR_CHECK_INTERVAL == 0 {
            self.periodic_check(state);
        }
        state.counters.observe_depth(pos);

        // Exact hit. Every value is strictly positive, so any superset
        // overshoots and further exclusions would only rebuild this same
        // index set; the branch ends here.
        if sum_cents == self.target_cents {
            self.emit(state, path);
            return;
        }
        if sum_cents > self.target_cents {
            state.counters.add_pruning_overshoot();
            return;
        }
        if pos == state.bounds.len() {
            return;
        }
        if !state.bounds.can_reach(pos, sum_cents, self.target_cents) {
            state.counters.add_pruning_bound();
            return;
        }

        let value = state.bounds.value(pos);
        let remaining = state.bounds.len() - pos;
        if remaining <= SEQUENTIAL_CUTOFF || pos >= PARALLEL_DEPTH_LIMIT {
            path.push(pos as u32);
            self.explore(state, pos + 1, sum_cents + value, path);
            path.pop();
            self.explore(state, pos + 1, sum_cents, path);
            return;
        }

        // Fork. The include branch needs its own copy of the path; its
        // bytes are charged against the run budget for the task's lifetime.
        let clone_bytes = (path.len() + 1) * std::mem::size_of::<u32>();
        if !state.budget.try_reserve(clone_bytes) {
            state.stop.request(StopCause::MemoryLimitReached);
            return;
        }
        state.counters.add_task_spawned();

        let mut include_path: PathVec = path.clone();
        include_path.push(pos as u32);
        rayon::join(
            || self.explore(state, pos + 1, sum_cents + value, &mut include_path),
            || self.explore(state, pos + 1, sum_cents, path),
        );
        state.budget.release(clone_bytes);
    }

    /// Verifies the current path against the problem and stores it.
    ///
    /// Verification failure here means a worker produced an index set that
    /// does not sum to the target. That is never the caller's fault, so the
    /// run aborts through the internal-error latch instead of publishing a
    /// wrong result.
    fn emit(&self, state: RunState<'_>, path: &PathVec) {
        let indices: Vec<ElementIndex> = path
            .iter()
            .map(|&pos| state.bounds.original_index(pos as usize))
            .collect();

        match Solution::try_from_indices(self.problem, indices) {
            Ok(solution) => {
                let bytes = solution.estimated_bytes();
                // Stored solutions stay charged for the rest of the run.
                if !state.budget.try_reserve(bytes) {
                    state.stop.request(StopCause::MemoryLimitReached);
                    return;
                }
                if state.store.try_store(solution.clone(), state.stop, state.events) {
                    state.monitor.on_solution_found(&solution);
                } else {
                    state.budget.release(bytes);
                }
            }
            Err(error) => {
                state
                    .stop
                    .request_internal(format!("solution verification failed: {}", error));
            }
        }
    }

    fn periodic_check(&self, state: RunState<'_>) {
        if let SearchCommand::Terminate(cause) = state.monitor.search_command() {
            state.stop.request(cause);
            return;
        }
        if state.progress.try_tick() {
            let snapshot = state.progress.snapshot(state.store.count());
            let _ = state.events.send(SearchEvent::Progress(snapshot));
        }
    }
}
