use std::collections::VecDeque;

use rustc_hash::FxHashSet;

/// An ordered list of out-neighbors for a single vertex.
///
/// New targets are inserted at the front in O(1), so building a list by pushing the
/// edges of a file in reverse order leaves the targets in file order. Duplicates and
/// self-loops are allowed while the list is being built; `Graph::clean` removes them.
///
/// # Panics
/// `pop_front` on an empty list panics: callers only pop lists they know to be non-empty,
/// so an empty pop means an upstream invariant is already broken.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencyList {
    items: VecDeque<usize>,
}

impl AdjacencyList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `vertex` in front of every element already in the list.
    pub fn push_front(&mut self, vertex: usize) {
        self.items.push_front(vertex);
    }

    /// Removes and returns the first element of the list.
    pub fn pop_front(&mut self) -> usize {
        self.items
            .pop_front()
            .unwrap_or_else(|| panic!("pop_front called on an empty adjacency list"))
    }

    /// Removes every occurrence of `vertex`, keeping the survivors in their order.
    /// Removing from an empty list is a no-op.
    pub fn remove_all(&mut self, vertex: usize) {
        self.items.retain(|&item| item != vertex);
    }

    /// Keeps the first occurrence of each distinct target and drops later repeats.
    pub fn dedup(&mut self) {
        let mut seen = FxHashSet::default();
        self.items.retain(|&item| seen.insert(item));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, vertex: usize) -> bool {
        self.items.contains(&vertex)
    }

    /// Returns the element at `position`, or `None` past the end of the list.
    pub fn get(&self, position: usize) -> Option<usize> {
        self.items.get(position).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.items.iter().copied()
    }
}

impl FromIterator<usize> for AdjacencyList {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod test_adjacency {
    use super::*;

    /// Front insertion reverses the push order, so the last pushed value is read first.
    #[test]
    fn test_push_front_order() {
        let mut list = AdjacencyList::new();
        list.push_front(3);
        list.push_front(2);
        list.push_front(1);

        assert_eq!(list.len(), 3);
        assert_eq!(list.iter().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(list.get(0), Some(1));
        assert_eq!(list.get(3), None);
    }

    /// Removing a value drops every copy and leaves the other values in order.
    #[test]
    fn test_remove_all_keeps_survivor_order() {
        let mut list: AdjacencyList = vec![4, 1, 4, 2, 4, 3].into_iter().collect();
        list.remove_all(4);
        assert_eq!(list.iter().collect::<Vec<_>>(), vec![1, 2, 3]);

        // Nothing to remove: the list is left untouched
        list.remove_all(9);
        assert_eq!(list.len(), 3);

        // Empty lists are allowed
        let mut empty = AdjacencyList::new();
        empty.remove_all(0);
        assert!(empty.is_empty());
    }

    /// Dedup keeps the first occurrence of each value and is idempotent.
    #[test]
    fn test_dedup() {
        let mut list: AdjacencyList = vec![5, 2, 5, 7, 2, 2].into_iter().collect();
        list.dedup();
        assert_eq!(list.iter().collect::<Vec<_>>(), vec![5, 2, 7]);

        let once = list.clone();
        list.dedup();
        assert_eq!(list, once);
    }

    #[test]
    fn test_pop_front() {
        let mut list: AdjacencyList = vec![8, 9].into_iter().collect();
        assert_eq!(list.pop_front(), 8);
        assert_eq!(list.pop_front(), 9);
        assert!(list.is_empty());
        assert!(!list.contains(8));
    }

    #[test]
    #[should_panic(expected = "empty adjacency list")]
    fn test_pop_front_empty_panics() {
        let mut list = AdjacencyList::new();
        list.pop_front();
    }
}
