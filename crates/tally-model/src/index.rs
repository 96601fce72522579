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

/// A strongly typed, zero-cost index of an element at ingestion order.
///
/// Element identity is defined by this index, never by value: two elements
/// may carry the same amount but never the same index. The wrapper prevents
/// accidental mixing with positions in the engine's sorted order, which use
/// plain `usize`.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementIndex {
    index: usize,
}

impl ElementIndex {
    /// Creates a new `ElementIndex`.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self { index }
    }

    /// Returns the underlying `usize` index.
    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.index
    }
}

impl From<usize> for ElementIndex {
    #[inline(always)]
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl From<ElementIndex> for usize {
    #[inline(always)]
    fn from(index: ElementIndex) -> Self {
        index.get()
    }
}

impl std::fmt::Display for ElementIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ElementIndex({})", self.index)
    }
}

impl std::fmt::Debug for ElementIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ElementIndex({})", self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::ElementIndex;

    #[test]
    fn test_new_get_roundtrip() {
        let index = ElementIndex::new(5);
        assert_eq!(index.get(), 5);
        assert_eq!(usize::from(index), 5);
        assert_eq!(ElementIndex::from(5usize), index);
    }

    #[test]
    fn test_ordering_follows_usize() {
        let mut indices = vec![
            ElementIndex::new(3),
            ElementIndex::new(0),
            ElementIndex::new(7),
        ];
        indices.sort();
        assert_eq!(
            indices,
            vec![
                ElementIndex::new(0),
                ElementIndex::new(3),
                ElementIndex::new(7)
            ]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ElementIndex::new(42)), "ElementIndex(42)");
    }
}
