use crate::error::{Error, Result};

use super::{children, parent, OpenSet};

/// Array-backed binary min-heap of `(payload, priority)` pairs.
///
/// The same payload may be queued several times with different priorities.
#[derive(Debug, Clone)]
pub struct BinaryMinHeap<T> {
    entries: Vec<(T, f64)>,
}

impl<T> Default for BinaryMinHeap<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> BinaryMinHeap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Append the entry and sift it up while it is strictly smaller than its
    /// parent.
    pub fn push(&mut self, payload: T, priority: f64) {
        self.entries.push((payload, priority));
        let mut index = self.entries.len() - 1;
        while index > 0 {
            let up = parent(index);
            if self.entries[index].1 < self.entries[up].1 {
                self.entries.swap(index, up);
                index = up;
            } else {
                break;
            }
        }
    }

    /// Remove the entry with the smallest priority.
    pub fn pop_min(&mut self) -> Result<(T, f64)> {
        if self.entries.is_empty() {
            return Err(Error::EmptyQueue);
        }
        let min = self.entries.swap_remove(0);
        self.sift_down(0);
        Ok(min)
    }

    pub fn peek_min(&self) -> Option<(&T, f64)> {
        self.entries
            .first()
            .map(|(payload, priority)| (payload, *priority))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.entries.len();
        loop {
            let (left, right) = children(index);
            let mut smallest = index;
            if left < len && self.entries[left].1 < self.entries[smallest].1 {
                smallest = left;
            }
            if right < len && self.entries[right].1 < self.entries[smallest].1 {
                smallest = right;
            }
            if smallest == index {
                break;
            }
            self.entries.swap(index, smallest);
            index = smallest;
        }
    }

    #[cfg(test)]
    fn is_heap(&self) -> bool {
        (1..self.entries.len()).all(|i| self.entries[parent(i)].1 <= self.entries[i].1)
    }
}

impl<T> OpenSet<T> for BinaryMinHeap<T> {
    fn push(&mut self, payload: T, priority: f64) {
        BinaryMinHeap::push(self, payload, priority);
    }

    fn pop_min(&mut self) -> Result<(T, f64)> {
        BinaryMinHeap::pop_min(self)
    }

    fn len(&self) -> usize {
        BinaryMinHeap::len(self)
    }
}
