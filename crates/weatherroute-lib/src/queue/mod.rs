//! Open set implementations used by the A* search.
//!
//! - [`BinaryMinHeap`] allows several live entries per payload and has no
//!   decrease-key operation.
//! - [`IndexedMinHeap`] keeps a single entry per payload and lowers its
//!   priority in place.
//!
//! Both order entries by a floating-point priority, smallest first. Relative
//! order among equal priorities is unspecified.

mod binary;
mod indexed;

pub use binary::BinaryMinHeap;
pub use indexed::IndexedMinHeap;

use crate::error::Result;

/// Min-priority queue abstraction over the two heap flavours.
pub trait OpenSet<T> {
    /// Queue `payload` with `priority`.
    fn push(&mut self, payload: T, priority: f64);

    /// Remove and return the entry with the smallest priority.
    ///
    /// Fails with [`crate::Error::EmptyQueue`] when nothing is queued.
    fn pop_min(&mut self) -> Result<(T, f64)>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[inline]
fn parent(index: usize) -> usize {
    (index - 1) / 2
}

#[inline]
fn children(index: usize) -> (usize, usize) {
    (2 * index + 1, 2 * index + 2)
}
