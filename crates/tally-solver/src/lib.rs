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

//! Tally-Solver: the host-facing entry point.
//!
//! # Usage
//!
//! ```no_run
//! use tally_solver::{start_search, SearchOptions};
//! use tally_model::{Money, ProblemBuilder};
//!
//! let mut builder = ProblemBuilder::new();
//! for value in ["10.00", "20.00", "30.00", "40.00"] {
//!     builder.add_value(Money::from_decimal_str(value).unwrap());
//! }
//! builder.target(Money::from_decimal_str("50.00").unwrap());
//! builder.max_solutions(5);
//! let problem = builder.build().unwrap();
//!
//! let handle = start_search(problem, SearchOptions::new()).unwrap();
//! let summary = handle.wait();
//! for solution in &summary.solutions {
//!     println!("{}", solution);
//! }
//! println!("done: {}", summary.reason);
//! ```

pub mod options;
pub mod solver;

pub use options::SearchOptions;
pub use solver::{start_search, RunSummary, SearchHandle, SolverError};

pub use tally_model::{
    Money, MoneyError, Problem, ProblemBuilder, ProblemError, Solution, MAX_ELEMENTS,
};
pub use tally_search::{DoneReason, ProgressSnapshot, SearchEvent};
