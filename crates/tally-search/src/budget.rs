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

//! # Memory Budget (Resource Governor)
//!
//! Tracks the memory attributable to one search run — stored solutions and
//! partial-path clones at spawn points — against the caller-imposed byte
//! ceiling. Reservations are optimistic `fetch_add`s that roll back on
//! overshoot, so concurrent workers can reserve without locking. A failed
//! reservation latches the budget as exhausted; the engine translates that
//! into the run's memory-limit stop cause, which the caller sees as a
//! distinct termination reason, not as a failure.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Atomic byte accounting against a fixed ceiling.
#[derive(Debug)]
pub struct MemoryBudget {
    current: AtomicUsize,
    peak: AtomicUsize,
    exhausted: AtomicBool,
    limit: usize,
}

impl MemoryBudget {
    /// Creates a budget with the given ceiling in bytes.
    #[inline]
    pub fn new(limit_bytes: usize) -> Self {
        Self {
            current: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            exhausted: AtomicBool::new(false),
            limit: limit_bytes,
        }
    }

    /// Attempts to reserve `bytes` against the ceiling.
    ///
    /// Returns `false` and leaves usage unchanged when the reservation
    /// would exceed the limit; the budget is then latched as exhausted.
    pub fn try_reserve(&self, bytes: usize) -> bool {
        let current = self.current.fetch_add(bytes, Ordering::Relaxed) + bytes;
        if current > self.limit {
            self.current.fetch_sub(bytes, Ordering::Relaxed);
            self.exhausted.store(true, Ordering::Relaxed);
            return false;
        }
        self.peak.fetch_max(current, Ordering::Relaxed);
        true
    }

    /// Releases a previously successful reservation.
    #[inline]
    pub fn release(&self, bytes: usize) {
        let previous = self.current.fetch_sub(bytes, Ordering::Relaxed);
        debug_assert!(
            previous >= bytes,
            "called `MemoryBudget::release` with more bytes than reserved: releasing {} of {}",
            bytes,
            previous
        );
    }

    /// Returns `true` once any reservation has been refused.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted.load(Ordering::Relaxed)
    }

    /// Returns the bytes currently reserved.
    #[inline]
    pub fn current_bytes(&self) -> usize {
        self.current.load(Ordering::Relaxed)
    }

    /// Returns the highest reservation level observed.
    #[inline]
    pub fn peak_bytes(&self) -> usize {
        self.peak.load(Ordering::Relaxed)
    }

    /// Returns the ceiling in bytes.
    #[inline]
    pub fn limit_bytes(&self) -> usize {
        self.limit
    }
}

impl std::fmt::Display for MemoryBudget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MemoryBudget({} / {} bytes, peak {})",
            self.current_bytes(),
            self.limit,
            self.peak_bytes()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryBudget;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_reserve_and_release() {
        let budget = MemoryBudget::new(1_000);
        assert!(budget.try_reserve(400));
        assert!(budget.try_reserve(600));
        assert_eq!(budget.current_bytes(), 1_000);
        assert_eq!(budget.peak_bytes(), 1_000);

        budget.release(600);
        assert_eq!(budget.current_bytes(), 400);
        // Peak is sticky.
        assert_eq!(budget.peak_bytes(), 1_000);
        assert!(!budget.is_exhausted());
    }

    #[test]
    fn test_overshoot_is_rolled_back_and_latched() {
        let budget = MemoryBudget::new(500);
        assert!(budget.try_reserve(400));
        assert!(!budget.try_reserve(200));
        // Failed reservation must not leak usage.
        assert_eq!(budget.current_bytes(), 400);
        assert!(budget.is_exhausted());
    }

    #[test]
    fn test_zero_limit_refuses_everything() {
        let budget = MemoryBudget::new(0);
        assert!(!budget.try_reserve(1));
        assert!(budget.is_exhausted());
        assert_eq!(budget.current_bytes(), 0);
    }

    #[test]
    fn test_concurrent_reservations_never_exceed_limit() {
        let budget = Arc::new(MemoryBudget::new(10_000));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let budget = Arc::clone(&budget);
            handles.push(thread::spawn(move || {
                let mut granted = 0usize;
                for _ in 0..100 {
                    if budget.try_reserve(100) {
                        granted += 100;
                    }
                }
                granted
            }));
        }

        let total_granted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert!(total_granted <= 10_000);
        assert_eq!(budget.current_bytes(), total_granted);
        assert!(budget.peak_bytes() <= 10_000);
    }
}
