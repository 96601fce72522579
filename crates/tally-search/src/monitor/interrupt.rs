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
use std::sync::atomic::{AtomicBool, Ordering};
use tally_model::{Problem, Solution};

/// Terminates the run once an external flag is raised.
///
/// The flag is the consumer-facing cancellation handle: the search handle
/// sets it, this monitor observes it. Cancellation is level-triggered, so a
/// flag raised before the run even starts still terminates it on the first
/// poll.
#[derive(Debug)]
pub struct InterruptMonitor<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InterruptMonitor<'a> {
    /// Creates a monitor observing the given flag.
    #[inline]
    pub fn new(flag: &'a AtomicBool) -> Self {
        Self { flag }
    }

    /// Returns `true` if the flag is currently raised.
    #[inline]
    pub fn is_interrupted(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

impl SearchMonitor for InterruptMonitor<'_> {
    fn name(&self) -> &str {
        "InterruptMonitor"
    }

    fn on_enter_search(&self, _problem: &Problem) {}

    fn on_exit_search(&self) {}

    fn on_solution_found(&self, _solution: &Solution) {}

    fn search_command(&self) -> SearchCommand {
        if self.is_interrupted() {
            SearchCommand::Terminate(StopCause::Cancelled)
        } else {
            SearchCommand::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::InterruptMonitor;
    use crate::{
        monitor::search_monitor::{SearchCommand, SearchMonitor},
        stop::StopCause,
    };
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn test_continues_while_flag_is_low() {
        let flag = AtomicBool::new(false);
        let monitor = InterruptMonitor::new(&flag);
        assert_eq!(monitor.search_command(), SearchCommand::Continue);
    }

    #[test]
    fn test_terminates_once_flag_is_raised() {
        let flag = AtomicBool::new(false);
        let monitor = InterruptMonitor::new(&flag);
        flag.store(true, Ordering::Relaxed);
        assert_eq!(
            monitor.search_command(),
            SearchCommand::Terminate(StopCause::Cancelled)
        );
    }
}
