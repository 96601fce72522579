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

use crate::{index::ElementIndex, money::Money, problem::Problem};

/// The error type for checked solution construction.
///
/// Correctness of every emitted solution is the system's core promise, so a
/// worker that assembles an index set whose values do not sum to the target
/// must fail loudly here instead of returning a wrong result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolutionError {
    /// The same element index appeared twice.
    DuplicateIndex(ElementIndex),
    /// An index does not refer to any element of the problem.
    IndexOutOfBounds(ElementIndex),
    /// The selected values do not sum to the target.
    SumMismatch { expected: Money, actual: Money },
}

impl std::fmt::Display for SolutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolutionError::DuplicateIndex(index) => {
                write!(f, "element {} was selected twice", index.get())
            }
            SolutionError::IndexOutOfBounds(index) => {
                write!(f, "element index {} is out of bounds", index.get())
            }
            SolutionError::SumMismatch { expected, actual } => {
                write!(
                    f,
                    "selected elements sum to {} but the target is {}",
                    actual, expected
                )
            }
        }
    }
}

impl std::error::Error for SolutionError {}

/// A confirmed subset: a strictly increasing set of element indices whose
/// values sum exactly to the problem target.
///
/// Instances are only produced by `Solution::try_from_indices`, which
/// re-verifies the sum against the problem, so holding a `Solution` is proof
/// of the sum invariant.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Solution {
    indices: Vec<ElementIndex>,
    total: Money,
}

impl Solution {
    /// Verifies the given index set against the problem and freezes it.
    ///
    /// Indices may arrive in any order; they are sorted into ascending
    /// ingestion order here. Duplicates, out-of-bounds indices, and sums
    /// that do not equal the target are rejected.
    pub fn try_from_indices(
        problem: &Problem,
        mut indices: Vec<ElementIndex>,
    ) -> Result<Solution, SolutionError> {
        indices.sort_unstable();
        for window in indices.windows(2) {
            if window[0] == window[1] {
                return Err(SolutionError::DuplicateIndex(window[0]));
            }
        }

        let mut total: i64 = 0;
        for &index in &indices {
            if index.get() >= problem.num_elements() {
                return Err(SolutionError::IndexOutOfBounds(index));
            }
            // Cannot overflow: the problem's total sum fits in i64.
            total += problem.value(index).cents();
        }

        let actual = Money::from_cents(total);
        if actual != problem.target() {
            return Err(SolutionError::SumMismatch {
                expected: problem.target(),
                actual,
            });
        }

        Ok(Solution {
            indices,
            total: actual,
        })
    }

    /// Returns the element indices in ascending ingestion order.
    #[inline]
    pub fn indices(&self) -> &[ElementIndex] {
        &self.indices
    }

    /// Returns the confirmed total, always equal to the problem target.
    #[inline]
    pub fn total(&self) -> Money {
        self.total
    }

    /// Returns the number of selected elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns `true` if no elements are selected.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Returns `true` if the given element is part of this solution.
    #[inline]
    pub fn contains(&self, index: ElementIndex) -> bool {
        self.indices.binary_search(&index).is_ok()
    }

    /// Estimated heap footprint in bytes, used by the memory governor when
    /// charging stored solutions against the run budget.
    #[inline]
    pub fn estimated_bytes(&self) -> usize {
        std::mem::size_of::<Solution>() + self.indices.len() * std::mem::size_of::<ElementIndex>()
    }
}

impl std::fmt::Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Solution(total: {}, indices: [", self.total)?;
        for (i, index) in self.indices.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", index.get())?;
        }
        write!(f, "])")
    }
}

#[cfg(test)]
mod tests {
    use super::{Solution, SolutionError};
    use crate::{index::ElementIndex, money::Money, problem::ProblemBuilder};

    fn ei(i: usize) -> ElementIndex {
        ElementIndex::new(i)
    }

    fn build_problem(values: &[i64], target: i64) -> crate::problem::Problem {
        let mut builder = ProblemBuilder::new();
        builder.extend_values(values.iter().map(|&c| Money::from_cents(c)));
        builder.target(Money::from_cents(target));
        builder.max_solutions(5);
        builder.build().unwrap()
    }

    #[test]
    fn test_valid_solution_sorts_indices() {
        let problem = build_problem(&[1_000, 2_000, 3_000, 4_000], 5_000);
        let solution = Solution::try_from_indices(&problem, vec![ei(3), ei(0)]).unwrap();
        assert_eq!(solution.indices(), &[ei(0), ei(3)]);
        assert_eq!(solution.total().cents(), 5_000);
        assert_eq!(solution.len(), 2);
        assert!(solution.contains(ei(3)));
        assert!(!solution.contains(ei(1)));
    }

    #[test]
    fn test_rejects_sum_mismatch() {
        let problem = build_problem(&[1_000, 2_000, 3_000, 4_000], 5_000);
        match Solution::try_from_indices(&problem, vec![ei(0), ei(1)]) {
            Err(SolutionError::SumMismatch { expected, actual }) => {
                assert_eq!(expected.cents(), 5_000);
                assert_eq!(actual.cents(), 3_000);
            }
            other => panic!("expected SumMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_duplicate_index() {
        let problem = build_problem(&[2_500, 2_500], 5_000);
        match Solution::try_from_indices(&problem, vec![ei(0), ei(0)]) {
            Err(SolutionError::DuplicateIndex(index)) => assert_eq!(index, ei(0)),
            other => panic!("expected DuplicateIndex, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_out_of_bounds_index() {
        let problem = build_problem(&[5_000], 5_000);
        match Solution::try_from_indices(&problem, vec![ei(7)]) {
            Err(SolutionError::IndexOutOfBounds(index)) => assert_eq!(index, ei(7)),
            other => panic!("expected IndexOutOfBounds, got {:?}", other),
        }
    }

    #[test]
    fn test_equal_values_distinct_indices_are_distinct_solutions() {
        let problem = build_problem(&[2_500, 2_500, 2_500], 2_500);
        let first = Solution::try_from_indices(&problem, vec![ei(0)]).unwrap();
        let second = Solution::try_from_indices(&problem, vec![ei(1)]).unwrap();
        assert_eq!(first.total(), second.total());
        assert_ne!(first, second);
    }

    #[test]
    fn test_display() {
        let problem = build_problem(&[1_000, 2_000, 3_000, 4_000], 5_000);
        let solution = Solution::try_from_indices(&problem, vec![ei(1), ei(2)]).unwrap();
        assert_eq!(
            format!("{}", solution),
            "Solution(total: 50.00, indices: [1, 2])"
        );
    }
}
