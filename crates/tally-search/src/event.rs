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

use crate::{
    progress::ProgressSnapshot,
    stop::{StopCause, StopCell},
};
use tally_model::Solution;

/// Why a run reached its terminal state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DoneReason {
    /// The search space was exhausted; every solution up to the cap that
    /// exists was found.
    Completed,
    /// The consumer cancelled the run. Solutions confirmed before the
    /// cancel are still valid — partial success, not an error.
    Cancelled,
    /// The memory governor stopped the run; partial results stand.
    MemoryLimitReached,
    /// `max_solutions` solutions were confirmed.
    SolutionCapReached,
    /// A worker violated an internal invariant; the run was aborted rather
    /// than risking a wrong solution. Carries the diagnostic.
    InternalError(String),
}

impl DoneReason {
    /// Derives the terminal reason from a run's stop latch. A latch that
    /// was never set means the search ran to natural exhaustion.
    pub fn from_stop(stop: &StopCell) -> Self {
        match stop.cause() {
            None => DoneReason::Completed,
            Some(StopCause::Cancelled) => DoneReason::Cancelled,
            Some(StopCause::MemoryLimitReached) => DoneReason::MemoryLimitReached,
            Some(StopCause::SolutionCapReached) => DoneReason::SolutionCapReached,
            Some(StopCause::InternalError) => DoneReason::InternalError(
                stop.diagnostic()
                    .unwrap_or_else(|| "no diagnostic recorded".to_string()),
            ),
        }
    }
}

impl std::fmt::Display for DoneReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DoneReason::Completed => write!(f, "Completed"),
            DoneReason::Cancelled => write!(f, "Cancelled"),
            DoneReason::MemoryLimitReached => write!(f, "Memory limit reached"),
            DoneReason::SolutionCapReached => write!(f, "Solution cap reached"),
            DoneReason::InternalError(diagnostic) => {
                write!(f, "Internal error: {}", diagnostic)
            }
        }
    }
}

/// One event of the finite `Progress* / Solution* / Done` stream a run
/// produces.
///
/// Progress events are lossy (rate-limited and coalesced at the producer);
/// solution events are lossless; `Done` is sent exactly once, after all
/// workers have unwound.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    /// A periodic progress snapshot.
    Progress(ProgressSnapshot),
    /// A confirmed solution.
    Solution(Solution),
    /// The terminal event of the run.
    Done(DoneReason),
}

impl std::fmt::Display for SearchEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchEvent::Progress(snapshot) => write!(f, "Progress({})", snapshot),
            SearchEvent::Solution(solution) => write!(f, "{}", solution),
            SearchEvent::Done(reason) => write!(f, "Done({})", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DoneReason;
    use crate::stop::{StopCause, StopCell};

    #[test]
    fn test_unlatched_stop_means_completed() {
        let stop = StopCell::new();
        assert_eq!(DoneReason::from_stop(&stop), DoneReason::Completed);
    }

    #[test]
    fn test_each_cause_maps_to_its_reason() {
        for (cause, expected) in [
            (StopCause::Cancelled, DoneReason::Cancelled),
            (StopCause::MemoryLimitReached, DoneReason::MemoryLimitReached),
            (StopCause::SolutionCapReached, DoneReason::SolutionCapReached),
        ] {
            let stop = StopCell::new();
            stop.request(cause);
            assert_eq!(DoneReason::from_stop(&stop), expected);
        }
    }

    #[test]
    fn test_internal_error_carries_diagnostic() {
        let stop = StopCell::new();
        stop.request_internal("sum mismatch");
        match DoneReason::from_stop(&stop) {
            DoneReason::InternalError(diagnostic) => {
                assert_eq!(diagnostic, "sum mismatch");
            }
            other => panic!("expected InternalError, got {:?}", other),
        }
    }
}
