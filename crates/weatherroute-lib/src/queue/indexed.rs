use std::collections::HashMap;
use std::hash::Hash;

use crate::error::{Error, Result};

use super::{children, parent, OpenSet};

/// Binary min-heap with a position index, so each payload is queued at most
/// once and can have its priority lowered in place.
#[derive(Debug, Clone)]
pub struct IndexedMinHeap<T> {
    entries: Vec<(T, f64)>,
    positions: HashMap<T, usize>,
}

impl<T> Default for IndexedMinHeap<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }
}

impl<T: Eq + Hash + Clone> IndexedMinHeap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            positions: HashMap::with_capacity(capacity),
        }
    }

    /// Queue `payload`, or lower its priority when it is already queued with a
    /// larger one. Returns `false` when an equal or better entry was kept.
    pub fn push(&mut self, payload: T, priority: f64) -> bool {
        if let Some(&index) = self.positions.get(&payload) {
            if priority < self.entries[index].1 {
                self.entries[index].1 = priority;
                self.sift_up(index);
                return true;
            }
            return false;
        }

        let index = self.entries.len();
        self.positions.insert(payload.clone(), index);
        self.entries.push((payload, priority));
        self.sift_up(index);
        true
    }

    pub fn pop_min(&mut self) -> Result<(T, f64)> {
        if self.entries.is_empty() {
            return Err(Error::EmptyQueue);
        }
        let last = self.entries.len() - 1;
        self.swap(0, last);
        let (payload, priority) = self.entries.pop().ok_or(Error::EmptyQueue)?;
        self.positions.remove(&payload);
        self.sift_down(0);
        Ok((payload, priority))
    }

    /// Current priority of a queued payload.
    pub fn priority(&self, payload: &T) -> Option<f64> {
        self.positions
            .get(payload)
            .map(|&index| self.entries[index].1)
    }

    pub fn contains(&self, payload: &T) -> bool {
        self.positions.contains_key(payload)
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
        self.positions.clear();
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let up = parent(index);
            if self.entries[index].1 < self.entries[up].1 {
                self.swap(index, up);
                index = up;
            } else {
                break;
            }
        }
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
            self.swap(index, smallest);
            index = smallest;
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.entries.swap(a, b);
        if let Some(slot) = self.positions.get_mut(&self.entries[a].0) {
            *slot = a;
        }
        if let Some(slot) = self.positions.get_mut(&self.entries[b].0) {
            *slot = b;
        }
    }

    #[cfg(test)]
    fn is_consistent(&self) -> bool {
        let ordered =
            (1..self.entries.len()).all(|i| self.entries[parent(i)].1 <= self.entries[i].1);
        let indexed = self.positions.len() == self.entries.len()
            && self
                .entries
                .iter()
                .enumerate()
                .all(|(i, (payload, _))| self.positions.get(payload) == Some(&i));
        ordered && indexed
    }
}

impl<T: Eq + Hash + Clone> OpenSet<T> for IndexedMinHeap<T> {
    fn push(&mut self, payload: T, priority: f64) {
        IndexedMinHeap::push(self, payload, priority);
    }

    fn pop_min(&mut self) -> Result<(T, f64)> {
        IndexedMinHeap::pop_min(self)
    }

    fn len(&self) -> usize {
        IndexedMinHeap::len(self)
    }
}
