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

//! # Run-Wide Stop Latch
//!
//! A `StopCell` carries the one question every worker asks at every node:
//! "should this run keep expanding?". The answer is a single relaxed atomic
//! load. Stopping is a latch: the first cause to be requested wins, is
//! terminal for the run, and is never overwritten — there is no resume.
//!
//! Cancellation, memory exhaustion, the solution cap, and internal
//! invariant violations all funnel into the same latch so the engine has
//! exactly one cheap check, while the caller still learns the distinct
//! reason the run ended.

use std::sync::{atomic::AtomicU8, atomic::Ordering, Mutex};

/// Why a run was asked to stop expanding.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StopCause {
    /// The consumer cancelled the run.
    Cancelled,
    /// The memory governor refused a reservation.
    MemoryLimitReached,
    /// The solution store reached `max_solutions`.
    SolutionCapReached,
    /// A worker detected an internal invariant violation; the diagnostic
    /// is stored alongside the latch.
    InternalError,
}

impl std::fmt::Display for StopCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopCause::Cancelled => write!(f, "cancelled"),
            StopCause::MemoryLimitReached => write!(f, "memory limit reached"),
            StopCause::SolutionCapReached => write!(f, "solution cap reached"),
            StopCause::InternalError => write!(f, "internal invariant violation"),
        }
    }
}

const STATE_RUNNING: u8 = 0;
const STATE_CANCELLED: u8 = 1;
const STATE_MEMORY: u8 = 2;
const STATE_SOLUTION_CAP: u8 = 3;
const STATE_INTERNAL: u8 = 4;

/// A write-once stop signal shared by all workers of one run.
///
/// The hot path (`is_requested`) is a single relaxed atomic read; the
/// diagnostic side channel for internal errors is behind a mutex that is
/// only touched when a run dies, never per node.
#[derive(Debug, Default)]
pub struct StopCell {
    state: AtomicU8,
    diagnostic: Mutex<Option<String>>,
}

impl StopCell {
    /// Creates a cell in the running state.
    #[inline]
    pub fn new() -> Self {
        Self {
            state: AtomicU8::new(STATE_RUNNING),
            diagnostic: Mutex::new(None),
        }
    }

    /// Returns `true` once any stop cause has been latched.
    /// This is the per-node check and must stay a single atomic read.
    #[inline(always)]
    pub fn is_requested(&self) -> bool {
        self.state.load(Ordering::Relaxed) != STATE_RUNNING
    }

    /// Returns the latched cause, or `None` while the run is live.
    pub fn cause(&self) -> Option<StopCause> {
        match self.state.load(Ordering::Acquire) {
            STATE_RUNNING => None,
            STATE_CANCELLED => Some(StopCause::Cancelled),
            STATE_MEMORY => Some(StopCause::MemoryLimitReached),
            STATE_SOLUTION_CAP => Some(StopCause::SolutionCapReached),
            _ => Some(StopCause::InternalError),
        }
    }

    /// Latches the given cause. Returns `true` if this call won the latch,
    /// `false` if another cause was already recorded.
    pub fn request(&self, cause: StopCause) -> bool {
        let encoded = match cause {
            StopCause::Cancelled => STATE_CANCELLED,
            StopCause::MemoryLimitReached => STATE_MEMORY,
            StopCause::SolutionCapReached => STATE_SOLUTION_CAP,
            StopCause::InternalError => STATE_INTERNAL,
        };
        self.state
            .compare_exchange(
                STATE_RUNNING,
                encoded,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    /// Latches an internal invariant violation together with its
    /// diagnostic message. Returns `true` if this call won the latch.
    pub fn request_internal<M>(&self, message: M) -> bool
    where
        M: Into<String>,
    {
        let won = self.request(StopCause::InternalError);
        if won {
            let mut guard = self.diagnostic.lock().unwrap();
            *guard = Some(message.into());
        }
        won
    }

    /// Returns the diagnostic recorded with an internal-error latch.
    pub fn diagnostic(&self) -> Option<String> {
        self.diagnostic.lock().unwrap().clone()
    }
}

impl std::fmt::Display for StopCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.cause() {
            Some(cause) => write!(f, "StopCell({})", cause),
            None => write!(f, "StopCell(running)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{StopCause, StopCell};
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_initial_state_is_running() {
        let cell = StopCell::new();
        assert!(!cell.is_requested());
        assert_eq!(cell.cause(), None);
        assert_eq!(cell.diagnostic(), None);
    }

    #[test]
    fn test_first_latch_wins() {
        let cell = StopCell::new();
        assert!(cell.request(StopCause::Cancelled));
        assert!(!cell.request(StopCause::MemoryLimitReached));
        assert!(cell.is_requested());
        assert_eq!(cell.cause(), Some(StopCause::Cancelled));
    }

    #[test]
    fn test_internal_error_records_diagnostic() {
        let cell = StopCell::new();
        assert!(cell.request_internal("sum mismatch on worker 3"));
        assert_eq!(cell.cause(), Some(StopCause::InternalError));
        assert_eq!(cell.diagnostic().as_deref(), Some("sum mismatch on worker 3"));
    }

    #[test]
    fn test_internal_error_loses_to_existing_latch() {
        let cell = StopCell::new();
        assert!(cell.request(StopCause::SolutionCapReached));
        assert!(!cell.request_internal("too late"));
        assert_eq!(cell.cause(), Some(StopCause::SolutionCapReached));
        assert_eq!(cell.diagnostic(), None);
    }

    #[test]
    fn test_concurrent_latching_yields_exactly_one_winner() {
        let cell = Arc::new(StopCell::new());
        let causes = [
            StopCause::Cancelled,
            StopCause::MemoryLimitReached,
            StopCause::SolutionCapReached,
        ];

        let mut handles = Vec::new();
        for cause in causes {
            let cell = Arc::clone(&cell);
            handles.push(thread::spawn(move || cell.request(cause)));
        }

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|&won| won)
            .count();

        assert_eq!(winners, 1);
        assert!(cell.is_requested());
        assert!(cell.cause().is_some());
    }
}
