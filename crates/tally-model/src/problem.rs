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

//! The immutable subset-sum problem instance and its validating builder.
//!
//! A `Problem` is created once per run through `ProblemBuilder::build` and
//! never mutated afterwards. All input validation lives in `build`: by the
//! time a `Problem` exists, the search engine can assume positive element
//! values, a positive reachable-range target, a solution cap of at least
//! one, and a total sum that cannot overflow `i64`. The engine therefore
//! performs no checked arithmetic on its hot path.

use crate::{index::ElementIndex, money::Money, space::SearchSpace};

/// Hard ceiling on the number of elements a problem may carry.
pub const MAX_ELEMENTS: usize = 300;

/// The error type for problem construction. Reported before any search
/// starts; a run never begins on invalid input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProblemError {
    /// The element list was empty.
    NoElements,
    /// More elements than `MAX_ELEMENTS` were supplied.
    TooManyElements(usize),
    /// An element value was zero or negative.
    NonPositiveElement(ElementIndex),
    /// No target was supplied.
    MissingTarget,
    /// The target was zero or negative.
    NonPositiveTarget,
    /// The sum of all element values does not fit in an `i64`.
    SumOverflow,
    /// The solution cap was zero.
    ZeroSolutionCap,
}

impl std::fmt::Display for ProblemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProblemError::NoElements => write!(f, "the element list must not be empty"),
            ProblemError::TooManyElements(count) => {
                write!(
                    f,
                    "{} elements supplied, but at most {} are supported",
                    count, MAX_ELEMENTS
                )
            }
            ProblemError::NonPositiveElement(index) => {
                write!(f, "element {} must be strictly positive", index.get())
            }
            ProblemError::MissingTarget => write!(f, "no target sum was supplied"),
            ProblemError::NonPositiveTarget => {
                write!(f, "the target sum must be strictly positive")
            }
            ProblemError::SumOverflow => {
                write!(f, "the total of all element values overflows the fixed-point range")
            }
            ProblemError::ZeroSolutionCap => {
                write!(f, "max_solutions must be at least 1")
            }
        }
    }
}

impl std::error::Error for ProblemError {}

/// A single input element: a stable ingestion index and an exact value.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Element {
    index: ElementIndex,
    value: Money,
}

impl Element {
    /// Returns the stable 0-based ingestion index.
    #[inline]
    pub fn index(&self) -> ElementIndex {
        self.index
    }

    /// Returns the exact cent-scaled value.
    #[inline]
    pub fn value(&self) -> Money {
        self.value
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Element({}: {})", self.index.get(), self.value)
    }
}

/// The validated, immutable subset-sum instance.
///
/// Construction goes through `ProblemBuilder`; accessors never fail on a
/// built problem.
#[derive(Clone, Debug)]
pub struct Problem {
    values: Vec<Money>,
    target: Money,
    max_solutions: usize,
    memory_limit_bytes: usize,
}

impl Problem {
    /// Returns the number of elements.
    #[inline]
    pub fn num_elements(&self) -> usize {
        self.values.len()
    }

    /// Returns the value of the element at the given ingestion index.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `index` is out of bounds.
    #[inline]
    pub fn value(&self, index: ElementIndex) -> Money {
        debug_assert!(
            index.get() < self.values.len(),
            "called `Problem::value` with element index out of bounds: the len is {} but the index is {}",
            self.values.len(),
            index.get()
        );
        self.values[index.get()]
    }

    /// Returns all element values in ingestion order.
    #[inline]
    pub fn values(&self) -> &[Money] {
        &self.values
    }

    /// Iterates over all elements in ingestion order.
    pub fn elements(&self) -> impl Iterator<Item = Element> + '_ {
        self.values.iter().enumerate().map(|(i, &value)| Element {
            index: ElementIndex::new(i),
            value,
        })
    }

    /// Returns the exact target sum.
    #[inline]
    pub fn target(&self) -> Money {
        self.target
    }

    /// Returns the maximum number of solutions to enumerate.
    #[inline]
    pub fn max_solutions(&self) -> usize {
        self.max_solutions
    }

    /// Returns the caller-imposed memory ceiling in bytes.
    #[inline]
    pub fn memory_limit_bytes(&self) -> usize {
        self.memory_limit_bytes
    }

    /// Returns the sum of all element values. Cannot overflow: `build`
    /// rejects instances whose total exceeds the `i64` range.
    pub fn total_sum(&self) -> Money {
        let cents = self.values.iter().map(|v| v.cents()).sum();
        Money::from_cents(cents)
    }

    /// Returns the log-space size of the 2^n inclusion/exclusion tree.
    #[inline]
    pub fn search_space(&self) -> SearchSpace {
        SearchSpace::of_subsets(self.values.len())
    }
}

impl std::fmt::Display for Problem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Problem(elements: {}, target: {}, max_solutions: {}, memory_limit: {} bytes)",
            self.values.len(),
            self.target,
            self.max_solutions,
            self.memory_limit_bytes
        )
    }
}

/// Default memory ceiling when the caller does not impose one: 1 GiB,
/// matching the limit the original desktop host applies.
pub const DEFAULT_MEMORY_LIMIT_BYTES: usize = 1024 * 1024 * 1024;

/// Builder for `Problem`. Collects elements and limits, then validates
/// everything in `build`.
#[derive(Clone, Debug, Default)]
pub struct ProblemBuilder {
    values: Vec<Money>,
    target: Option<Money>,
    max_solutions: usize,
    memory_limit_bytes: usize,
}

impl ProblemBuilder {
    /// Creates an empty builder with a solution cap of 1 and the default
    /// memory ceiling.
    #[inline]
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            target: None,
            max_solutions: 1,
            memory_limit_bytes: DEFAULT_MEMORY_LIMIT_BYTES,
        }
    }

    /// Appends an element and returns its stable ingestion index.
    #[inline]
    pub fn add_value(&mut self, value: Money) -> ElementIndex {
        let index = ElementIndex::new(self.values.len());
        self.values.push(value);
        index
    }

    /// Appends every value from the iterator in order.
    pub fn extend_values<I>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = Money>,
    {
        self.values.extend(values);
        self
    }

    /// Sets the target sum.
    #[inline]
    pub fn target(&mut self, target: Money) -> &mut Self {
        self.target = Some(target);
        self
    }

    /// Sets the maximum number of solutions to enumerate.
    #[inline]
    pub fn max_solutions(&mut self, max_solutions: usize) -> &mut Self {
        self.max_solutions = max_solutions;
        self
    }

    /// Sets the memory ceiling in bytes.
    #[inline]
    pub fn memory_limit_bytes(&mut self, memory_limit_bytes: usize) -> &mut Self {
        self.memory_limit_bytes = memory_limit_bytes;
        self
    }

    /// Validates the collected inputs and freezes them into a `Problem`.
    pub fn build(self) -> Result<Problem, ProblemError> {
        if self.values.is_empty() {
            return Err(ProblemError::NoElements);
        }
        if self.values.len() > MAX_ELEMENTS {
            return Err(ProblemError::TooManyElements(self.values.len()));
        }
        for (i, value) in self.values.iter().enumerate() {
            if value.cents() <= 0 {
                return Err(ProblemError::NonPositiveElement(ElementIndex::new(i)));
            }
        }
        let target = self.target.ok_or(ProblemError::MissingTarget)?;
        if target.cents() <= 0 {
            return Err(ProblemError::NonPositiveTarget);
        }
        if self.max_solutions == 0 {
            return Err(ProblemError::ZeroSolutionCap);
        }

        let mut total: i64 = 0;
        for value in &self.values {
            total = total
                .checked_add(value.cents())
                .ok_or(ProblemError::SumOverflow)?;
        }

        Ok(Problem {
            values: self.values,
            target,
            max_solutions: self.max_solutions,
            memory_limit_bytes: self.memory_limit_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Problem, ProblemBuilder, ProblemError, MAX_ELEMENTS};
    use crate::{index::ElementIndex, money::Money};

    fn cents(values: &[i64]) -> Vec<Money> {
        values.iter().map(|&c| Money::from_cents(c)).collect()
    }

    fn build_problem(values: &[i64], target: i64) -> Result<Problem, ProblemError> {
        let mut builder = ProblemBuilder::new();
        builder.extend_values(cents(values));
        builder.target(Money::from_cents(target));
        builder.max_solutions(5);
        builder.build()
    }

    #[test]
    fn test_build_valid_problem() {
        let problem = build_problem(&[1_000, 2_000, 3_000, 4_000], 5_000).unwrap();
        assert_eq!(problem.num_elements(), 4);
        assert_eq!(problem.target().cents(), 5_000);
        assert_eq!(problem.max_solutions(), 5);
        assert_eq!(problem.total_sum().cents(), 10_000);
        assert_eq!(problem.value(ElementIndex::new(2)).cents(), 3_000);
    }

    #[test]
    fn test_elements_carry_stable_indices() {
        let problem = build_problem(&[500, 500, 700], 1_200).unwrap();
        let elements: Vec<_> = problem.elements().collect();
        assert_eq!(elements.len(), 3);
        // Equal values, distinct indices.
        assert_eq!(elements[0].value(), elements[1].value());
        assert_ne!(elements[0].index(), elements[1].index());
        assert_eq!(elements[2].index().get(), 2);
    }

    #[test]
    fn test_build_rejects_empty_elements() {
        let mut builder = ProblemBuilder::new();
        builder.target(Money::from_cents(100));
        assert_eq!(builder.build().unwrap_err(), ProblemError::NoElements);
    }

    #[test]
    fn test_build_rejects_too_many_elements() {
        let mut builder = ProblemBuilder::new();
        builder.extend_values((0..=MAX_ELEMENTS).map(|_| Money::from_cents(100)));
        builder.target(Money::from_cents(100));
        assert_eq!(
            builder.build().unwrap_err(),
            ProblemError::TooManyElements(MAX_ELEMENTS + 1)
        );
    }

    #[test]
    fn test_build_rejects_non_positive_element() {
        assert_eq!(
            build_problem(&[100, 0, 300], 400).unwrap_err(),
            ProblemError::NonPositiveElement(ElementIndex::new(1))
        );
        assert_eq!(
            build_problem(&[100, -50], 100).unwrap_err(),
            ProblemError::NonPositiveElement(ElementIndex::new(1))
        );
    }

    #[test]
    fn test_build_rejects_missing_or_non_positive_target() {
        let mut builder = ProblemBuilder::new();
        builder.add_value(Money::from_cents(100));
        assert_eq!(builder.build().unwrap_err(), ProblemError::MissingTarget);

        assert_eq!(
            build_problem(&[100], 0).unwrap_err(),
            ProblemError::NonPositiveTarget
        );
    }

    #[test]
    fn test_build_rejects_zero_solution_cap() {
        let mut builder = ProblemBuilder::new();
        builder.add_value(Money::from_cents(100));
        builder.target(Money::from_cents(100));
        builder.max_solutions(0);
        assert_eq!(builder.build().unwrap_err(), ProblemError::ZeroSolutionCap);
    }

    #[test]
    fn test_build_rejects_sum_overflow() {
        let mut builder = ProblemBuilder::new();
        builder.add_value(Money::from_cents(i64::MAX));
        builder.add_value(Money::from_cents(1));
        builder.target(Money::from_cents(100));
        assert_eq!(builder.build().unwrap_err(), ProblemError::SumOverflow);
    }

    #[test]
    fn test_add_value_returns_ingestion_index() {
        let mut builder = ProblemBuilder::new();
        assert_eq!(builder.add_value(Money::from_cents(1)).get(), 0);
        assert_eq!(builder.add_value(Money::from_cents(2)).get(), 1);
        assert_eq!(builder.add_value(Money::from_cents(3)).get(), 2);
    }
}
