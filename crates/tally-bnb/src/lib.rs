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

//! Tally-Bnb: the parallel branch-and-bound enumeration engine.
//!
//! # Motivation
//!
//! Enumerating every subset of up to 300 exact cent values whose sum hits a
//! target is a $2^n$ problem; what makes it tractable in practice is
//! aggressive pruning. The engine explores the binary include/exclude tree
//! over the elements sorted by descending value and cuts a subtree the
//! moment the running sum overshoots the target or the remaining suffix can
//! no longer reach it.
//!
//! # Highlights
//!
//! - Exact integer arithmetic throughout the hot path; the `i64` cent sums
//!   cannot overflow because problem construction bounds the total.
//! - Fork-join parallelism over the include/exclude branches via
//!   `rayon::join`, with a serial cutoff near the leaves so task overhead
//!   never dominates.
//! - Every candidate subset is re-verified by `Solution::try_from_indices`
//!   before it is stored or published.
//!
//! The engine knows nothing about threads beyond `rayon::join` and nothing
//! about the caller; all coordination state (stop latch, memory budget,
//! solution store, progress) is borrowed through [`state::RunState`].

pub mod bounds;
pub mod engine;
pub mod state;

pub use bounds::BoundTable;
pub use engine::BnbEngine;
pub use state::{RunState, SearchCounters, SolutionStore};
