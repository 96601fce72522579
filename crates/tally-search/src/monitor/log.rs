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

use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};
use tally_model::{Problem, Solution};

/// Logs the lifecycle of a run through the `log` facade.
///
/// Purely observational; never terminates a run.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMonitor;

impl LogMonitor {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl SearchMonitor for LogMonitor {
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_search(&self, problem: &Problem) {
        log::info!(
            "search started: {} elements, target {}, cap {}, space {}",
            problem.num_elements(),
            problem.target(),
            problem.max_solutions(),
            problem.search_space()
        );
    }

    fn on_exit_search(&self) {
        log::info!("search finished");
    }

    fn on_solution_found(&self, solution: &Solution) {
        log::debug!("solution found: {}", solution);
    }

    fn search_command(&self) -> SearchCommand {
        SearchCommand::Continue
    }
}
