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

//! # Bound Table
//!
//! The engine does not search elements in ingestion order. Before a run,
//! the values are sorted into descending order (stable, so equal values
//! keep their relative ingestion order) and the suffix sums are
//! precomputed. Descending order makes overshoots happen high in the tree,
//! and `suffix_sum` gives the reachability bound in O(1) per node. The
//! table also keeps the mapping back to ingestion indices so emitted
//! solutions always speak the caller's index language.

use tally_model::{ElementIndex, Problem};

/// Precomputed search ordering and bounds for one problem.
#[derive(Debug, Clone)]
pub struct BoundTable {
    /// Element values in cents, descending.
    values: Vec<i64>,
    /// `original[pos]` is the ingestion index of the element at `pos`.
    original: Vec<ElementIndex>,
    /// `suffix_sums[pos]` is the sum of `values[pos..]`; one extra slot so
    /// `suffix_sums[len]` is 0.
    suffix_sums: Vec<i64>,
}

impl BoundTable {
    /// Builds the table for the given problem.
    pub fn new(problem: &Problem) -> Self {
        let mut order: Vec<(i64, ElementIndex)> = problem
            .elements()
            .map(|e| (e.value().cents(), e.index()))
            .collect();
        // Stable sort keeps equal values in ingestion order.
        order.sort_by(|a, b| b.0.cmp(&a.0));

        let values: Vec<i64> = order.iter().map(|&(v, _)| v).collect();
        let original: Vec<ElementIndex> = order.iter().map(|&(_, i)| i).collect();

        let mut suffix_sums = vec![0i64; values.len() + 1];
        for pos in (0..values.len()).rev() {
            // Cannot overflow: the problem's total sum fits in i64.
            suffix_sums[pos] = suffix_sums[pos + 1] + values[pos];
        }

        Self {
            values,
            original,
            suffix_sums,
        }
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the table is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the cent value of the element at search position `pos`.
    #[inline]
    pub fn value(&self, pos: usize) -> i64 {
        debug_assert!(
            pos < self.values.len(),
            "called `BoundTable::value` with position out of bounds: the len is {} but the position is {}",
            self.values.len(),
            pos
        );
        self.values[pos]
    }

    /// Returns the ingestion index of the element at search position `pos`.
    #[inline]
    pub fn original_index(&self, pos: usize) -> ElementIndex {
        debug_assert!(
            pos < self.original.len(),
            "called `BoundTable::original_index` with position out of bounds: the len is {} but the position is {}",
            self.original.len(),
            pos
        );
        self.original[pos]
    }

    /// Returns the sum of all values at positions `pos..`.
    #[inline]
    pub fn suffix_sum(&self, pos: usize) -> i64 {
        debug_assert!(
            pos < self.suffix_sums.len(),
            "called `BoundTable::suffix_sum` with position out of bounds: the len is {} but the position is {}",
            self.suffix_sums.len(),
            pos
        );
        self.suffix_sums[pos]
    }

    /// Returns `true` if a partial sum at position `pos` can still reach
    /// `target_cents` by including elements from the remaining suffix.
    #[inline]
    pub fn can_reach(&self, pos: usize, sum_cents: i64, target_cents: i64) -> bool {
        sum_cents + self.suffix_sum(pos) >= target_cents
    }
}

#[cfg(test)]
mod tests {
    use super::BoundTable;
    use tally_model::{Money, Problem, ProblemBuilder};

    fn build_problem(values: &[i64], target: i64) -> Problem {
        let mut builder = ProblemBuilder::new();
        builder.extend_values(values.iter().map(|&c| Money::from_cents(c)));
        builder.target(Money::from_cents(target));
        builder.build().unwrap()
    }

    #[test]
    fn test_values_are_sorted_descending() {
        let problem = build_problem(&[1_000, 4_000, 2_000, 3_000], 5_000);
        let table = BoundTable::new(&problem);
        assert_eq!(table.len(), 4);
        assert_eq!(table.value(0), 4_000);
        assert_eq!(table.value(3), 1_000);
        // Position 0 holds the element ingested at index 1.
        assert_eq!(table.original_index(0).get(), 1);
        assert_eq!(table.original_index(3).get(), 0);
    }

    #[test]
    fn test_equal_values_keep_ingestion_order() {
        let problem = build_problem(&[500, 500, 700], 1_200);
        let table = BoundTable::new(&problem);
        assert_eq!(table.original_index(0).get(), 2);
        assert_eq!(table.original_index(1).get(), 0);
        assert_eq!(table.original_index(2).get(), 1);
    }

    #[test]
    fn test_suffix_sums() {
        let problem = build_problem(&[1_000, 2_000, 3_000], 3_000);
        let table = BoundTable::new(&problem);
        // Sorted: 3000, 2000, 1000.
        assert_eq!(table.suffix_sum(0), 6_000);
        assert_eq!(table.suffix_sum(1), 3_000);
        assert_eq!(table.suffix_sum(2), 1_000);
        assert_eq!(table.suffix_sum(3), 0);
    }

    #[test]
    fn test_can_reach() {
        let problem = build_problem(&[1_000, 2_000], 3_000);
        let table = BoundTable::new(&problem);
        assert!(table.can_reach(0, 0, 3_000));
        // Only 1000 remains past position 1.
        assert!(table.can_reach(1, 2_000, 3_000));
        assert!(!table.can_reach(1, 1_500, 3_000));
        assert!(!table.can_reach(2, 2_500, 3_000));
    }
}
