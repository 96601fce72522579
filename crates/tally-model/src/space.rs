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

/// The theoretical size of the inclusion/exclusion search tree.
///
/// For `n` elements the tree has $2^n$ leaves. With `n` up to 300 this
/// exceeds any integer type (roughly $10^{90}$), so the value is stored in
/// **logarithmic space** ($\log_{10}$), which is all that progress
/// reporting needs.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, PartialOrd)]
pub struct SearchSpace {
    /// The base-10 logarithm of the number of subsets.
    log_val: f64,
}

impl SearchSpace {
    /// Calculates the subset-space size for `n` elements: $\log_{10} 2^n$.
    #[inline]
    pub fn of_subsets(num_elements: usize) -> Self {
        SearchSpace {
            log_val: num_elements as f64 * std::f64::consts::LOG10_2,
        }
    }

    /// Returns the percentage of the subset space covered by the given
    /// number of explored nodes, or `None` when the space is empty.
    ///
    /// Spaces beyond $10^{15}$ subsets report `0.0`: no realistic run makes
    /// a dent in them, and the division would lose all precision anyway.
    pub fn coverage(&self, nodes_explored: u64) -> Option<f64> {
        if self.log_val > 15.0 {
            return Some(0.0);
        }

        let total_size = 10.0_f64.powf(self.log_val);
        if total_size == 0.0 {
            return None;
        }

        Some(((nodes_explored as f64 / total_size) * 100.0).min(100.0))
    }

    /// Returns the exponent (order of magnitude) of the subset count.
    #[inline]
    pub fn exponent(&self) -> u64 {
        self.log_val.floor() as u64
    }

    /// Returns the mantissa (coefficient) of the subset count.
    #[inline]
    pub fn mantissa(&self) -> f64 {
        let fractional_part = self.log_val - self.log_val.floor();
        10.0_f64.powf(fractional_part)
    }

    /// Returns the raw log10 value. Useful for progress bars.
    #[inline]
    pub fn raw(&self) -> f64 {
        self.log_val
    }
}

impl std::fmt::Display for SearchSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} × 10^{}", self.mantissa(), self.exponent())
    }
}

impl std::fmt::Debug for SearchSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchSpace(log10={:.4})", self.log_val)
    }
}

#[cfg(test)]
mod tests {
    use super::SearchSpace;

    #[test]
    fn test_small_spaces_are_exact() {
        // 2^10 = 1024
        let space = SearchSpace::of_subsets(10);
        assert_eq!(space.exponent(), 3);
        assert!((space.mantissa() - 1.024).abs() < 1e-9);
    }

    #[test]
    fn test_coverage_of_small_space() {
        let space = SearchSpace::of_subsets(10);
        let coverage = space.coverage(512).unwrap();
        assert!((coverage - 50.0).abs() < 1e-6);
        // Never reports more than 100%.
        assert_eq!(space.coverage(1_000_000).unwrap(), 100.0);
    }

    #[test]
    fn test_huge_space_reports_zero_coverage() {
        let space = SearchSpace::of_subsets(300);
        assert_eq!(space.exponent(), 90);
        assert_eq!(space.coverage(u64::MAX).unwrap(), 0.0);
    }

    #[test]
    fn test_empty_space() {
        let space = SearchSpace::of_subsets(0);
        // 2^0 = 1 subset, one node covers it fully.
        assert_eq!(space.coverage(1).unwrap(), 100.0);
    }
}
