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
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    stop::StopCause,
};
use std::sync::atomic::{AtomicU64, Ordering};
use tally_model::{Problem, Solution};

/// Terminates the run once the confirmed-solution count reaches the cap.
///
/// The solution store owns the canonical counter and latches the stop cause
/// itself at the moment of the capping store, so a full run never races
/// past its cap; this monitor is the periodic backstop that reaches the
/// same verdict from the outside.
#[derive(Debug)]
pub struct SolutionLimitMonitor<'a> {
    count: &'a AtomicU64,
    limit: u64,
}

impl<'a> SolutionLimitMonitor<'a> {
    /// Creates a monitor observing the given counter against `limit`.
    #[inline]
    pub fn new(count: &'a AtomicU64, limit: u64) -> Self {
        Self { count, limit }
    }

    /// Returns the configured cap.
    #[inline]
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Returns `true` once the counter has reached the cap.
    #[inline]
    pub fn is_limit_reached(&self) -> bool {
        self.count.load(Ordering::Relaxed) >= self.limit
    }
}

impl SearchMonitor for SolutionLimitMonitor<'_> {
    fn name(&self) -> &str {
        "SolutionLimitMonitor"
    }

    fn on_enter_search(&self, _problem: &Problem) {}

    fn on_exit_search(&self) {}

    fn on_solution_found(&self, _solution: &Solution) {}

    fn search_command(&self) -> SearchCommand {
        if self.is_limit_reached() {
            SearchCommand::Terminate(StopCause::SolutionCapReached)
        } else {
            SearchCommand::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SolutionLimitMonitor;
    use crate::{
        monitor::search_monitor::{SearchCommand, SearchMonitor},
        stop::StopCause,
    };
    use std::sync::atomic::{AtomicU64, Ordering};

    #[test]
    fn test_continues_below_limit() {
        let count = AtomicU64::new(2);
        let monitor = SolutionLimitMonitor::new(&count, 3);
        assert_eq!(monitor.search_command(), SearchCommand::Continue);
    }

    #[test]
    fn test_terminates_at_limit() {
        let count = AtomicU64::new(2);
        let monitor = SolutionLimitMonitor::new(&count, 3);
        count.fetch_add(1, Ordering::Relaxed);
        assert_eq!(
            monitor.search_command(),
            SearchCommand::Terminate(StopCause::SolutionCapReached)
        );
    }
}
