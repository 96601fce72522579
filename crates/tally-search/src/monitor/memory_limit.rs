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
    budget::MemoryBudget,
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    stop::StopCause,
};
use tally_model::{Problem, Solution};

/// Terminates the run once the memory budget has refused a reservation.
///
/// The budget latches itself on the first refused reservation and the
/// refusing worker latches the stop cell directly; like the solution-limit
/// monitor this is the periodic backstop view of the same condition.
#[derive(Debug)]
pub struct MemoryLimitMonitor<'a> {
    budget: &'a MemoryBudget,
}

impl<'a> MemoryLimitMonitor<'a> {
    /// Creates a monitor observing the given budget.
    #[inline]
    pub fn new(budget: &'a MemoryBudget) -> Self {
        Self { budget }
    }
}

impl SearchMonitor for MemoryLimitMonitor<'_> {
    fn name(&self) -> &str {
        "MemoryLimitMonitor"
    }

    fn on_enter_search(&self, _problem: &Problem) {}

    fn on_exit_search(&self) {}

    fn on_solution_found(&self, _solution: &Solution) {}

    fn search_command(&self) -> SearchCommand {
        if self.budget.is_exhausted() {
            SearchCommand::Terminate(StopCause::MemoryLimitReached)
        } else {
            SearchCommand::Continue
        }
    }
}
