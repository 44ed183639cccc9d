//! Priority frontier shared by every search.
//!
//! Entries live in a min-heap keyed by `(priority, insertion_order)`.
//! Lower priorities pop first; among equal priorities the entry pushed
//! most recently pops first (LIFO). Neighbour order is Left, Up, Right,
//! Down, so this rule decides which of several equally good cells a
//! search expands next.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

#[derive(Debug)]
struct Entry<E> {
    item: E,
    priority: i32,
    /// Monotonically increasing; higher = pushed later = pops earlier.
    seq: u64,
}

impl<E> PartialEq for Entry<E> {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.seq == other.seq
    }
}

impl<E> Eq for Entry<E> {}

impl<E> PartialOrd for Entry<E> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Entry<E> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Wrapped in Reverse for the heap: smaller priority first, then
        // larger seq first.
        self.priority
            .cmp(&other.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// A min-priority frontier with last-in-first-out tie breaking.
#[derive(Debug)]
pub struct Frontier<E> {
    heap: BinaryHeap<Reverse<Entry<E>>>,
    seq: u64,
}

impl<E> Frontier<E> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    pub fn push(&mut self, item: E, priority: i32) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Reverse(Entry {
            item,
            priority,
            seq,
        }));
    }

    pub fn pop(&mut self) -> Option<E> {
        self.heap.pop().map(|Reverse(entry)| entry.item)
    }

    /// Pop the best entry together with the priority it was pushed at.
    pub fn pop_with_priority(&mut self) -> Option<(E, i32)> {
        self.heap
            .pop()
            .map(|Reverse(entry)| (entry.item, entry.priority))
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

impl<E> Default for Frontier<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowest_priority_first() {
        let mut f = Frontier::new();
        f.push("a", 3);
        f.push("b", 1);
        f.push("c", 2);

        assert_eq!(f.pop(), Some("b"));
        assert_eq!(f.pop(), Some("c"));
        assert_eq!(f.pop(), Some("a"));
        assert_eq!(f.pop(), None);
    }

    #[test]
    fn ties_pop_most_recent_first() {
        let mut f = Frontier::new();
        f.push("first", 1);
        f.push("second", 1);
        f.push("third", 1);
        f.push("cheap", 0);

        assert_eq!(f.pop(), Some("cheap"));
        assert_eq!(f.pop(), Some("third"));
        assert_eq!(f.pop(), Some("second"));
        assert_eq!(f.pop(), Some("first"));
    }

    #[test]
    fn pop_with_priority() {
        let mut f = Frontier::new();
        f.push(42, 5);
        assert_eq!(f.len(), 1);
        assert_eq!(f.pop_with_priority(), Some((42, 5)));
        assert!(f.is_empty());
    }
}
