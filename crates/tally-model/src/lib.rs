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

//! Tally-Model: the data model for exact subset-sum enumeration.
//!
//! This crate defines the validated, immutable inputs and outputs of the
//! search engine. Decimal amounts are converted once into exact fixed-point
//! integers (`Money`, cent-scaled `i64`), so every comparison downstream is
//! an exact integer equality test with no floating-point tolerance anywhere.
//!
//! Core flow
//! - Parse amounts via `money::Money` (rejects negatives and over-precision).
//! - Assemble a `problem::ProblemBuilder` and call `build` to obtain a
//!   validated `Problem`; all input validation happens here, before any
//!   search exists.
//! - The engine produces `solution::Solution` values whose index sets are
//!   strictly increasing and whose totals are re-verified on construction.
//!
//! Module map
//! - `money`: fixed-point converter and its validation errors.
//! - `index`: the strongly typed element index.
//! - `problem`: elements, the immutable problem instance, and its builder.
//! - `solution`: confirmed subsets with checked totals.
//! - `space`: log-space size of the 2^n search tree for progress reporting.

pub mod index;
pub mod money;
pub mod problem;
pub mod solution;
pub mod space;

pub use index::ElementIndex;
pub use money::{Money, MoneyError};
pub use problem::{Element, Problem, ProblemBuilder, ProblemError, MAX_ELEMENTS};
pub use solution::{Solution, SolutionError};
pub use space::SearchSpace;
