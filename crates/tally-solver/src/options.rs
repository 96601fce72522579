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

use std::time::Duration;

/// Default worker stack size. The recursion is bounded by the element
/// count, but wide problems clone paths at every fork and the default OS
/// stack is tight on some platforms.
pub const DEFAULT_STACK_SIZE_BYTES: usize = 16 * 1024 * 1024;

/// Default minimum spacing between progress events.
pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_millis(100);

/// Runtime knobs for one search run. Everything here is about the host
/// environment; the problem itself carries its own limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    thread_count: Option<usize>,
    stack_size_bytes: usize,
    progress_interval: Duration,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchOptions {
    /// Creates options with all knobs at their defaults: one worker per
    /// logical CPU, a 16 MiB worker stack, and progress every 100 ms.
    #[inline]
    pub fn new() -> Self {
        Self {
            thread_count: None,
            stack_size_bytes: DEFAULT_STACK_SIZE_BYTES,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }

    /// Sets an explicit worker thread count.
    #[inline]
    pub fn with_thread_count(mut self, thread_count: usize) -> Self {
        self.thread_count = Some(thread_count);
        self
    }

    /// Sets the worker stack size in bytes.
    #[inline]
    pub fn with_stack_size_bytes(mut self, stack_size_bytes: usize) -> Self {
        self.stack_size_bytes = stack_size_bytes;
        self
    }

    /// Sets the minimum spacing between progress events.
    #[inline]
    pub fn with_progress_interval(mut self, progress_interval: Duration) -> Self {
        self.progress_interval = progress_interval;
        self
    }

    /// Returns the explicit thread count, or `None` for one per CPU.
    #[inline]
    pub fn thread_count(&self) -> Option<usize> {
        self.thread_count
    }

    /// Returns the worker stack size in bytes.
    #[inline]
    pub fn stack_size_bytes(&self) -> usize {
        self.stack_size_bytes
    }

    /// Returns the minimum spacing between progress events.
    #[inline]
    pub fn progress_interval(&self) -> Duration {
        self.progress_interval
    }
}

#[cfg(test)]
mod tests {
    use super::{SearchOptions, DEFAULT_PROGRESS_INTERVAL, DEFAULT_STACK_SIZE_BYTES};
    use std::time::Duration;

    #[test]
    fn test_defaults() {
        let options = SearchOptions::new();
        assert_eq!(options.thread_count(), None);
        assert_eq!(options.stack_size_bytes(), DEFAULT_STACK_SIZE_BYTES);
        assert_eq!(options.progress_interval(), DEFAULT_PROGRESS_INTERVAL);
    }

    #[test]
    fn test_with_methods() {
        let options = SearchOptions::new()
            .with_thread_count(4)
            .with_stack_size_bytes(1 << 20)
            .with_progress_interval(Duration::from_millis(10));
        assert_eq!(options.thread_count(), Some(4));
        assert_eq!(options.stack_size_bytes(), 1 << 20);
        assert_eq!(options.progress_interval(), Duration::from_millis(10));
    }
}
