//! Bounded undo history.
//!
//! A fixed-capacity stack of immutable snapshots. Pushing onto a full history
//! evicts the oldest entry; popping returns the most recent.

use std::collections::VecDeque;

/// Fixed-capacity LIFO of snapshots with oldest-first eviction.
#[derive(Debug, Clone)]
pub struct History<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T> History<T> {
    /// Create an empty history. A capacity of zero is treated as one.
    ///
    /// Storage grows with use, so a very large capacity costs nothing up
    /// front.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::new(),
            capacity,
        }
    }

    /// Record a snapshot, returning the evicted oldest entry if the history
    /// was full.
    pub fn push(&mut self, entry: T) -> Option<T> {
        let evicted = if self.entries.len() == self.capacity {
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back(entry);
        evicted
    }

    /// Remove and return the most recent snapshot.
    pub fn pop(&mut self) -> Option<T> {
        self.entries.pop_back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every snapshot.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_lifo() {
        let mut history = History::new(3);
        history.push(1);
        history.push(2);
        assert_eq!(history.pop(), Some(2));
        assert_eq!(history.pop(), Some(1));
        assert_eq!(history.pop(), None);
    }

    #[test]
    fn test_evicts_oldest_on_overflow() {
        let mut history = History::new(2);
        assert_eq!(history.push('a'), None);
        assert_eq!(history.push('b'), None);
        assert_eq!(history.push('c'), Some('a'));
        assert_eq!(history.len(), 2);
        assert_eq!(history.pop(), Some('c'));
        assert_eq!(history.pop(), Some('b'));
        assert!(history.is_empty());
    }

    #[test]
    fn test_zero_capacity_holds_one() {
        let mut history = History::new(0);
        assert_eq!(history.capacity(), 1);
        history.push(1);
        assert_eq!(history.push(2), Some(1));
        assert_eq!(history.pop(), Some(2));
        assert!(history.is_empty());
    }

    #[test]
    fn test_huge_capacity_does_not_preallocate() {
        let mut history = History::new(usize::MAX);
        assert_eq!(history.capacity(), usize::MAX);
        assert_eq!(history.push(1), None);
        assert_eq!(history.push(2), None);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_clear() {
        let mut history = History::new(4);
        history.push(1);
        history.push(2);
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.capacity(), 4);
    }
}
