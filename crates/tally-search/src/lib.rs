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

//! Tally-Search: infrastructure shared by search engines and their hosts.
//!
//! Everything here is engine-agnostic plumbing: how a run is told to stop,
//! how its memory consumption is bounded, how observers hook into the
//! search, and how progress and statistics are reported. The enumeration
//! algorithm itself lives in `tally-bnb`; the host-facing driver in
//! `tally-solver`.
//!
//! Module map
//! - `stop`: the run-wide stop latch, the single cheap per-node check.
//! - `budget`: the memory governor (atomic usage vs. a byte ceiling).
//! - `monitor`: pluggable search observers and the composite combinator.
//! - `progress`: rate-limited progress snapshots.
//! - `event`: the event stream consumed by the caller.
//! - `stats`: per-run statistics and their builder.

pub mod budget;
pub mod event;
pub mod monitor;
pub mod progress;
pub mod stats;
pub mod stop;

pub use budget::MemoryBudget;
pub use event::{DoneReason, SearchEvent};
pub use monitor::{
    CompositeMonitor, InterruptMonitor, LogMonitor, MemoryLimitMonitor, SearchCommand,
    SearchMonitor, SolutionLimitMonitor,
};
pub use progress::{ProgressSnapshot, ProgressTracker};
pub use stats::{SearchStatistics, SearchStatisticsBuilder};
pub use stop::{StopCause, StopCell};
