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

//! # Search Monitors
//!
//! Monitors observe a run from the outside: they see the search start and
//! end, every confirmed solution, and are polled periodically for a verdict
//! on whether the run should keep going. Because workers are dynamic thread
//! pool tasks, monitors are shared by reference and must be `Send + Sync`;
//! all their state is interior.
//!
//! The built-in monitors cover the three external stop conditions
//! (cancellation, solution cap, memory limit) plus logging; the
//! [`CompositeMonitor`](composite::CompositeMonitor) fans out to any
//! combination of them.

pub mod composite;
pub mod interrupt;
pub mod log;
pub mod memory_limit;
pub mod search_monitor;
pub mod solution_limit;

pub use composite::CompositeMonitor;
pub use interrupt::InterruptMonitor;
pub use log::LogMonitor;
pub use memory_limit::MemoryLimitMonitor;
pub use search_monitor::{SearchCommand, SearchMonitor};
pub use solution_limit::SolutionLimitMonitor;
