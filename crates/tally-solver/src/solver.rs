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

//! # Search Driver
//!
//! `start_search` hands a validated problem to a dedicated driver thread
//! and immediately returns a [`SearchHandle`]. The driver builds the run's
//! thread pool and coordination state, runs the engine inside the pool, and
//! finishes the event stream with exactly one `Done` event once every
//! worker has unwound. The handle is the consumer's whole surface: poll the
//! stream, cancel, or wait for the summary.

use crate::options::SearchOptions;
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread::JoinHandle,
};
use tally_bnb::{
    engine::BnbEngine,
    state::{RunState, SearchCounters, SolutionStore},
};
use tally_model::{Problem, Solution};
use tally_search::{
    budget::MemoryBudget,
    event::{DoneReason, SearchEvent},
    monitor::{
        CompositeMonitor, InterruptMonitor, LogMonitor, MemoryLimitMonitor, SolutionLimitMonitor,
    },
    progress::{ProgressSnapshot, ProgressTracker},
    stats::SearchStatistics,
    stop::StopCell,
};

/// The error type for starting a search run.
#[derive(Debug)]
pub enum SolverError {
    /// The driver thread could not be spawned.
    DriverSpawn(std::io::Error),
}

impl std::fmt::Display for SolverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverError::DriverSpawn(error) => {
                write!(f, "failed to spawn the search driver thread: {}", error)
            }
        }
    }
}

impl std::error::Error for SolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SolverError::DriverSpawn(error) => Some(error),
        }
    }
}

/// Starts a search run in the background and returns its handle.
///
/// The problem is already validated by construction, so nothing here fails
/// on input; the only error is the host refusing a thread.
pub fn start_search(problem: Problem, options: SearchOptions) -> Result<SearchHandle, SolverError> {
    let (tx, rx) = crossbeam_channel::unbounded();
    let cancel = Arc::new(AtomicBool::new(false));

    let driver_cancel = Arc::clone(&cancel);
    let driver = std::thread::Builder::new()
        .name("tally-driver".to_string())
        .spawn(move || {
            let reason = run_search(&problem, &options, &driver_cancel, &tx);
            // The final event of the stream. A dropped receiver is fine.
            let _ = tx.send(SearchEvent::Done(reason));
        })
        .map_err(SolverError::DriverSpawn)?;

    Ok(SearchHandle {
        events: rx,
        cancel,
        done: None,
        driver: Some(driver),
    })
}

/// Runs one search to its terminal state. Executed on the driver thread.
fn run_search(
    problem: &Problem,
    options: &SearchOptions,
    cancel: &AtomicBool,
    events: &Sender<SearchEvent>,
) -> DoneReason {
    let mut pool_builder = rayon::ThreadPoolBuilder::new()
        .thread_name(|i| format!("tally-worker-{}", i))
        .stack_size(options.stack_size_bytes());
    if let Some(threads) = options.thread_count() {
        pool_builder = pool_builder.num_threads(threads);
    }
    let pool = match pool_builder.build() {
        Ok(pool) => pool,
        Err(error) => {
            return DoneReason::InternalError(format!(
                "thread pool construction failed: {}",
                error
            ))
        }
    };

    let engine = BnbEngine::new(problem);
    let bounds = engine.bounds();
    let stop = StopCell::new();
    let store = SolutionStore::new(problem.max_solutions());
    let budget = MemoryBudget::new(problem.memory_limit_bytes());
    let progress = ProgressTracker::new(problem.search_space(), options.progress_interval());
    let counters = SearchCounters::new();

    let mut monitor = CompositeMonitor::with_capacity(4);
    monitor.add_monitor(InterruptMonitor::new(cancel));
    monitor.add_monitor(SolutionLimitMonitor::new(store.count_cell(), store.cap()));
    monitor.add_monitor(MemoryLimitMonitor::new(&budget));
    monitor.add_monitor(LogMonitor::new());

    let state = RunState {
        problem,
        bounds: &bounds,
        stop: &stop,
        store: &store,
        budget: &budget,
        progress: &progress,
        counters: &counters,
        events,
        monitor: &monitor,
    };

    pool.install(|| engine.run(state));

    // One last snapshot so consumers see the final node count even on runs
    // shorter than the progress interval.
    let _ = events.send(SearchEvent::Progress(progress.snapshot(store.count())));

    let stats = SearchStatistics::builder()
        .with_nodes_explored(progress.nodes_explored())
        .with_solutions_found(store.count())
        .with_prunings_bound(counters.prunings_bound())
        .with_prunings_overshoot(counters.prunings_overshoot())
        .with_max_depth(counters.max_depth())
        .with_tasks_spawned(counters.tasks_spawned())
        .with_peak_memory_bytes(budget.peak_bytes())
        .with_used_threads(pool.current_num_threads())
        .with_total_time(progress.elapsed())
        .build();
    log::info!("search run finished: {}", stats);

    DoneReason::from_stop(&stop)
}

/// Everything a finished run produced, as returned by [`SearchHandle::wait`].
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Solutions in discovery order.
    pub solutions: Vec<Solution>,
    /// Why the run ended.
    pub reason: DoneReason,
    /// The last progress snapshot seen, if any.
    pub last_progress: Option<ProgressSnapshot>,
}

/// The consumer's handle to a running (or finished) search.
///
/// Poll it for events, cancel it, or consume it with [`wait`](Self::wait).
/// Once `Done` has been observed, polling keeps returning the same `Done`
/// without blocking. Dropping a live handle cancels the run and joins the
/// driver, so no workers outlive the consumer.
#[derive(Debug)]
pub struct SearchHandle {
    events: Receiver<SearchEvent>,
    cancel: Arc<AtomicBool>,
    done: Option<DoneReason>,
    driver: Option<JoinHandle<()>>,
}

impl SearchHandle {
    /// Blocks until the next event arrives and returns it.
    pub fn poll(&mut self) -> SearchEvent {
        if let Some(reason) = &self.done {
            return SearchEvent::Done(reason.clone());
        }
        match self.events.recv() {
            Ok(SearchEvent::Done(reason)) => self.finish(reason),
            Ok(event) => event,
            // The driver hung up without its final event. That never
            // happens in a healthy run; surface it instead of hanging.
            Err(_) => self.finish(DoneReason::InternalError(
                "search driver terminated without a final event".to_string(),
            )),
        }
    }

    /// Returns the next event if one is ready, without blocking.
    pub fn try_poll(&mut self) -> Option<SearchEvent> {
        if let Some(reason) = &self.done {
            return Some(SearchEvent::Done(reason.clone()));
        }
        match self.events.try_recv() {
            Ok(SearchEvent::Done(reason)) => Some(self.finish(reason)),
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(self.finish(DoneReason::InternalError(
                "search driver terminated without a final event".to_string(),
            ))),
        }
    }

    /// Requests cancellation. Idempotent; safe after the run has finished.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once `Done` has been observed through this handle.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.done.is_some()
    }

    /// Drains the stream to its end and returns the run summary.
    pub fn wait(mut self) -> RunSummary {
        let mut solutions = Vec::new();
        let mut last_progress = None;
        loop {
            match self.poll() {
                SearchEvent::Solution(solution) => solutions.push(solution),
                SearchEvent::Progress(snapshot) => last_progress = Some(snapshot),
                SearchEvent::Done(reason) => {
                    return RunSummary {
                        solutions,
                        reason,
                        last_progress,
                    }
                }
            }
        }
    }

    fn finish(&mut self, reason: DoneReason) -> SearchEvent {
        self.done = Some(reason.clone());
        if let Some(driver) = self.driver.take() {
            let _ = driver.join();
        }
        SearchEvent::Done(reason)
    }
}

impl Drop for SearchHandle {
    fn drop(&mut self) {
        if let Some(driver) = self.driver.take() {
            self.cancel();
            let _ = driver.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{start_search, RunSummary};
    use crate::options::SearchOptions;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use std::collections::BTreeSet;
    use tally_model::{Money, Problem, ProblemBuilder, Solution};
    use tally_search::{DoneReason, SearchEvent};

    fn build_problem(values: &[i64], target: i64, cap: usize) -> Problem {
        build_problem_with_memory(values, target, cap, None)
    }

    fn build_problem_with_memory(
        values: &[i64],
        target: i64,
        cap: usize,
        memory_limit: Option<usize>,
    ) -> Problem {
        let mut builder = ProblemBuilder::new();
        builder.extend_values(values.iter().map(|&c| Money::from_cents(c)));
        builder.target(Money::from_cents(target));
        builder.max_solutions(cap);
        if let Some(limit) = memory_limit {
            builder.memory_limit_bytes(limit);
        }
        builder.build().unwrap()
    }

    fn index_sets(solutions: &[Solution]) -> BTreeSet<Vec<usize>> {
        solutions
            .iter()
            .map(|s| s.indices().iter().map(|i| i.get()).collect())
            .collect()
    }

    fn assert_all_hit_target(summary: &RunSummary, problem: &Problem) {
        for solution in &summary.solutions {
            assert_eq!(solution.total(), problem.target());
        }
    }

    #[test]
    fn test_end_to_end_finds_both_pairs() {
        let _ = env_logger::builder().is_test(true).try_init();

        let problem = build_problem(&[1_000, 2_000, 3_000, 4_000], 5_000, 5);
        let handle = start_search(problem.clone(), SearchOptions::new()).unwrap();
        let summary = handle.wait();

        assert_eq!(summary.reason, DoneReason::Completed);
        assert_eq!(
            index_sets(&summary.solutions),
            BTreeSet::from([vec![0, 3], vec![1, 2]])
        );
        assert_all_hit_target(&summary, &problem);

        // The driver always sends a final snapshot before Done.
        let progress = summary.last_progress.expect("no progress snapshot seen");
        assert!(progress.nodes_explored > 0);
        assert_eq!(progress.solutions_found, 2);
    }

    #[test]
    fn test_unreachable_target_completes_empty() {
        let problem = build_problem(&[1_000, 2_000, 3_000], 99_900, 5);
        let summary = start_search(problem, SearchOptions::new()).unwrap().wait();

        assert_eq!(summary.reason, DoneReason::Completed);
        assert!(summary.solutions.is_empty());
    }

    #[test]
    fn test_solution_cap_stops_early() {
        // 30 equal elements give 435 distinct pairs hitting the target.
        let values = vec![100i64; 30];
        let problem = build_problem(&values, 200, 3);
        let summary = start_search(problem.clone(), SearchOptions::new())
            .unwrap()
            .wait();

        assert_eq!(summary.reason, DoneReason::SolutionCapReached);
        assert_eq!(summary.solutions.len(), 3);
        assert_eq!(index_sets(&summary.solutions).len(), 3);
        assert_all_hit_target(&summary, &problem);
    }

    #[test]
    fn test_cancel_terminates_a_long_run() {
        // Every value is even and the target is odd, so the run can only
        // end by exhausting an astronomically large tree or by this cancel.
        let values = vec![200i64; 100];
        let problem = build_problem(&values, 9_999, 1_000);
        let handle = start_search(problem, SearchOptions::new()).unwrap();

        handle.cancel();
        let summary = handle.wait();

        assert_eq!(summary.reason, DoneReason::Cancelled);
        assert!(summary.solutions.is_empty());
    }

    #[test]
    fn test_tiny_memory_budget_reports_memory_limit() {
        // Not enough room to store even one solution.
        let problem = build_problem_with_memory(&[5_000], 5_000, 5, Some(8));
        let summary = start_search(problem, SearchOptions::new()).unwrap().wait();

        assert_eq!(summary.reason, DoneReason::MemoryLimitReached);
        assert!(summary.solutions.is_empty());
    }

    #[test]
    fn test_large_instance_tiny_memory_budget() {
        // Plenty of solutions exist and the cap is far away, so the byte
        // ceiling is what ends the run. Everything found until then must
        // still be exact and distinct.
        let values = vec![100i64; 120];
        let problem = build_problem_with_memory(&values, 6_000, 1_000_000, Some(4_096));
        let summary = start_search(problem.clone(), SearchOptions::new())
            .unwrap()
            .wait();

        assert_eq!(summary.reason, DoneReason::MemoryLimitReached);
        assert!(summary.solutions.len() < 1_000_000);
        assert_eq!(index_sets(&summary.solutions).len(), summary.solutions.len());
        assert_all_hit_target(&summary, &problem);
    }

    #[test]
    fn test_solution_set_is_thread_count_independent() {
        let mut rng = StdRng::seed_from_u64(42);
        let values: Vec<i64> = (0..20).map(|_| rng.gen_range(1..=500)).collect();
        // Target a known subset so at least one solution exists.
        let target = values[1] + values[4] + values[9] + values[16];
        let problem = build_problem(&values, target, 10_000);

        let serial = start_search(
            problem.clone(),
            SearchOptions::new().with_thread_count(1),
        )
        .unwrap()
        .wait();
        let parallel = start_search(
            problem.clone(),
            SearchOptions::new().with_thread_count(4),
        )
        .unwrap()
        .wait();

        assert_eq!(serial.reason, DoneReason::Completed);
        assert_eq!(parallel.reason, DoneReason::Completed);
        assert!(!serial.solutions.is_empty());
        assert_eq!(index_sets(&serial.solutions), index_sets(&parallel.solutions));
    }

    #[test]
    fn test_poll_after_done_keeps_returning_done() {
        let problem = build_problem(&[1_000, 2_000], 3_000, 5);
        let mut handle = start_search(problem, SearchOptions::new()).unwrap();

        let reason = loop {
            if let SearchEvent::Done(reason) = handle.poll() {
                break reason;
            }
        };
        assert_eq!(reason, DoneReason::Completed);
        assert!(handle.is_done());

        assert_eq!(handle.poll(), SearchEvent::Done(reason.clone()));
        assert_eq!(handle.try_poll(), Some(SearchEvent::Done(reason.clone())));

        // Cancel after completion is a no-op.
        handle.cancel();
        assert_eq!(handle.poll(), SearchEvent::Done(reason));
    }

    #[test]
    fn test_dropping_a_live_handle_does_not_hang() {
        let values = vec![200i64; 100];
        let problem = build_problem(&values, 9_999, 1_000);
        let handle = start_search(problem, SearchOptions::new()).unwrap();
        drop(handle);
    }
}
