//! Binary min-heap over array storage.
//!
//! The storage is read as an implicit complete binary tree: the element at
//! position `p` has children at `2p + 1` and `2p + 2` and its parent at
//! `(p - 1) / 2`. Every element compares less than or equal to both of its
//! children.
//!
//! # Time Complexity
//!
//! | Operation         | Complexity      |
//! |-------------------|-----------------|
//! | `push`            | O(log N)        |
//! | `pop`             | O(log N)        |
//! | `peek`            | O(1)            |
//! | `update`          | O(log N)        |
//! | `from_storage`    | O(N)            |

use std::fmt;
use std::marker::PhantomData;

use super::ArrayStorage;
use crate::config::{BoundsPolicy, DEFAULT_CAPACITY};
use crate::error::IndexError;
use crate::list::ArrayList;

/// A min-priority queue.
///
/// Elements whose ordering key changes after insertion are repaired with
/// [`update`](PriorityQueue::update) at their known position.
///
/// # Examples
///
/// ```rust
/// use flatcoll::specialized::PriorityQueue;
///
/// let mut queue = PriorityQueue::new();
/// for value in [5, 1, 8, 3, 2] {
///     queue.push(value);
/// }
/// assert_eq!(queue.peek(), Some(&1));
/// assert_eq!(queue.pop(), Some(1));
/// assert_eq!(queue.pop(), Some(2));
/// assert_eq!(queue.len(), 3);
/// ```
pub struct PriorityQueue<T, S = ArrayList<T>> {
    storage: S,
    marker: PhantomData<T>,
}

impl<T: Ord> PriorityQueue<T> {
    /// Creates an empty queue with the default capacity of 8.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty queue with room for `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: ArrayList::with_capacity(capacity),
            marker: PhantomData,
        }
    }
}

impl<T: Ord, S: ArrayStorage<T>> PriorityQueue<T, S> {
    /// Builds a queue over existing storage, reordering it into a heap.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flatcoll::specialized::PriorityQueue;
    ///
    /// let queue: PriorityQueue<i32, Vec<i32>> = PriorityQueue::from_storage(vec![9, 4, 7, 1]);
    /// assert_eq!(queue.peek(), Some(&1));
    /// ```
    pub fn from_storage(storage: S) -> Self {
        let mut queue = Self {
            storage,
            marker: PhantomData,
        };
        queue.heapify();
        queue
    }

    fn heapify(&mut self) {
        for position in (0..self.storage.len() / 2).rev() {
            self.sift_down(position);
        }
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Returns `true` if the queue is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Returns the storage capacity.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// Returns the elements in heap order.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        self.storage.slots()
    }

    /// Returns the smallest element.
    #[inline]
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.storage.slot(0)
    }

    /// Adds an element and sifts it up to its place.
    pub fn push(&mut self, item: T) {
        self.storage.push_slot(item);
        let last = self.storage.len() - 1;
        self.sift_up(last);
    }

    /// Removes and returns the smallest element.
    ///
    /// The last element takes the root position and sifts down.
    pub fn pop(&mut self) -> Option<T> {
        let last = self.storage.len().checked_sub(1)?;
        self.storage.swap_slots(0, last);
        let root = self.storage.pop_slot();
        if !self.storage.is_empty() {
            self.sift_down(0);
        }
        root
    }

    /// Returns the element at heap position `index` mutably.
    ///
    /// Changing its ordering breaks the heap until
    /// [`update`](PriorityQueue::update) is called for `index`.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.storage.slot_mut(index)
    }

    /// Restores the heap around `index` after its element changed, and
    /// returns the element's new position.
    ///
    /// Sifts up first; if the element did not move, sifts down.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] if `index` is not a heap position. The misuse
    /// is logged and the heap is left unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flatcoll::specialized::PriorityQueue;
    ///
    /// let mut queue: PriorityQueue<i32> = [10, 20, 30, 40].into_iter().collect();
    /// let position = queue.as_slice().iter().position(|&value| value == 40).unwrap();
    ///
    /// *queue.get_mut(position).unwrap() = 5;
    /// assert_eq!(queue.update(position), Ok(0));
    /// assert_eq!(queue.peek(), Some(&5));
    /// ```
    pub fn update(&mut self, index: usize) -> Result<usize, IndexError> {
        let len = self.storage.len();
        if index >= len {
            return Err(BoundsPolicy::Lenient.reject(IndexError::new("update", index, len)));
        }
        let position = self.sift_up(index);
        if position == index {
            Ok(self.sift_down(index))
        } else {
            Ok(position)
        }
    }

    /// Applies `change` to the element at `index`, then restores the heap.
    ///
    /// # Errors
    ///
    /// See [`update`](PriorityQueue::update).
    pub fn update_with<F>(&mut self, index: usize, change: F) -> Result<usize, IndexError>
    where
        F: FnOnce(&mut T),
    {
        if let Some(item) = self.storage.slot_mut(index) {
            change(item);
        }
        self.update(index)
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.storage.clear_slots();
    }

    /// Returns the underlying storage in heap order.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Drains the queue into an ascending `Vec`.
    #[must_use]
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.len());
        while let Some(item) = self.pop() {
            sorted.push(item);
        }
        sorted
    }

    fn sift_up(&mut self, mut position: usize) -> usize {
        let slots = self.storage.slots_mut();
        while position > 0 {
            let parent = (position - 1) / 2;
            if slots[position] < slots[parent] {
                slots.swap(position, parent);
                position = parent;
            } else {
                break;
            }
        }
        position
    }

    fn sift_down(&mut self, mut position: usize) -> usize {
        let slots = self.storage.slots_mut();
        let len = slots.len();
        loop {
            let left = 2 * position + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let smaller = if right < len && slots[right] < slots[left] {
                right
            } else {
                left
            };
            if slots[smaller] < slots[position] {
                slots.swap(position, smaller);
                position = smaller;
            } else {
                break;
            }
        }
        position
    }
}

impl<T: Ord> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, S: Clone> Clone for PriorityQueue<T, S> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            marker: PhantomData,
        }
    }
}

impl<T: fmt::Debug, S: ArrayStorage<T>> fmt::Debug for PriorityQueue<T, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_list()
            .entries(self.storage.slots().iter())
            .finish()
    }
}

impl<T: Ord> FromIterator<T> for PriorityQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_storage(iter.into_iter().collect())
    }
}

impl<T: Ord, S: ArrayStorage<T>> Extend<T> for PriorityQueue<T, S> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

static_assertions::assert_impl_all!(PriorityQueue<i32>: Send);
