//! Heap, ring and stack containers built on list storage.
//!
//! Each container embeds its storage rather than extending a list type. The
//! storage is reached through [`ArrayStorage`], a small slot-level interface
//! that [`ArrayList`] and `Vec` both implement, so the heap can run on
//! either.
//!
//! - [`PriorityQueue`]: implicit binary min-heap.
//! - [`CircularQueue`]: growable ring-buffer FIFO.
//! - [`BoundedStack`]: LIFO veneer that never underflows.

mod heap;
mod queue;
mod stack;

pub use heap::PriorityQueue;
pub use queue::CircularQueue;
pub use stack::BoundedStack;

use crate::list::ArrayList;

/// Slot-level access to a contiguous, growable buffer.
///
/// Slots `0..len()` are live. Growth is left to the implementation.
pub trait ArrayStorage<T> {
    /// Returns the number of live slots.
    fn len(&self) -> usize;

    /// Returns `true` if no slot is live.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of slots the buffer holds without growing.
    fn capacity(&self) -> usize;

    /// Returns the live slots.
    fn slots(&self) -> &[T];

    /// Returns the live slots mutably.
    fn slots_mut(&mut self) -> &mut [T];

    /// Appends a slot, growing the buffer if needed.
    fn push_slot(&mut self, item: T);

    /// Removes and returns the last slot.
    fn pop_slot(&mut self) -> Option<T>;

    /// Drops every live slot.
    fn clear_slots(&mut self);

    /// Returns slot `index`.
    fn slot(&self, index: usize) -> Option<&T> {
        self.slots().get(index)
    }

    /// Returns slot `index` mutably.
    fn slot_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots_mut().get_mut(index)
    }

    /// Swaps two live slots.
    ///
    /// # Panics
    ///
    /// Panics if either index is not live.
    fn swap_slots(&mut self, first: usize, second: usize) {
        self.slots_mut().swap(first, second);
    }
}

impl<T> ArrayStorage<T> for ArrayList<T> {
    #[inline]
    fn len(&self) -> usize {
        Self::len(self)
    }

    #[inline]
    fn capacity(&self) -> usize {
        Self::capacity(self)
    }

    #[inline]
    fn slots(&self) -> &[T] {
        self.as_slice()
    }

    #[inline]
    fn slots_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }

    #[inline]
    fn push_slot(&mut self, item: T) {
        self.add(item);
    }

    #[inline]
    fn pop_slot(&mut self) -> Option<T> {
        self.pop()
    }

    #[inline]
    fn clear_slots(&mut self) {
        self.clear();
    }
}

impl<T> ArrayStorage<T> for Vec<T> {
    #[inline]
    fn len(&self) -> usize {
        Self::len(self)
    }

    #[inline]
    fn capacity(&self) -> usize {
        Self::capacity(self)
    }

    #[inline]
    fn slots(&self) -> &[T] {
        self
    }

    #[inline]
    fn slots_mut(&mut self) -> &mut [T] {
        self
    }

    #[inline]
    fn push_slot(&mut self, item: T) {
        self.push(item);
    }

    #[inline]
    fn pop_slot(&mut self) -> Option<T> {
        self.pop()
    }

    #[inline]
    fn clear_slots(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn exercise<S: ArrayStorage<i32>>(mut storage: S) {
        assert!(storage.is_empty());
        for value in 0..10 {
            storage.push_slot(value);
        }
        assert_eq!(storage.len(), 10);
        assert!(storage.capacity() >= 10);
        storage.swap_slots(0, 9);
        assert_eq!(storage.slot(0), Some(&9));
        if let Some(slot) = storage.slot_mut(9) {
            *slot = -1;
        }
        assert_eq!(storage.pop_slot(), Some(-1));
        assert_eq!(storage.slots().len(), 9);
        storage.clear_slots();
        assert!(storage.is_empty());
        assert_eq!(storage.slot(0), None);
    }

    #[rstest]
    fn test_array_list_storage() {
        exercise(ArrayList::new());
    }

    #[rstest]
    fn test_vec_storage() {
        exercise(Vec::new());
    }

    #[rstest]
    fn test_array_list_storage_doubles() {
        let mut list: ArrayList<u8> = ArrayList::new();
        for value in 0..9 {
            list.push_slot(value);
        }
        assert_eq!(ArrayStorage::capacity(&list), 16);
    }
}
