//! LIFO stack over list storage.

use std::fmt;

use super::ArrayStorage;
use crate::list::ArrayList;

/// A last-in first-out stack.
///
/// `push`, `pop` and `peek` map to append, remove-last and read-last on the
/// embedded [`ArrayList`], so growth doubles like the list. Popping or
/// peeking an empty stack yields `None`.
///
/// # Examples
///
/// ```rust
/// use flatcoll::specialized::BoundedStack;
///
/// let mut stack = BoundedStack::new();
/// stack.push(1);
/// stack.push(2);
/// assert_eq!(stack.peek(), Some(&2));
/// assert_eq!(stack.pop(), Some(2));
/// assert_eq!(stack.pop(), Some(1));
/// assert_eq!(stack.pop(), None);
/// ```
#[derive(Clone)]
pub struct BoundedStack<T> {
    items: ArrayList<T>,
}

impl<T> BoundedStack<T> {
    /// Creates an empty stack with the default capacity of 8.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: ArrayList::new(),
        }
    }

    /// Creates an empty stack with room for `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: ArrayList::with_capacity(capacity),
        }
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the stack is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the capacity.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Pushes `item` on top.
    pub fn push(&mut self, item: T) {
        self.items.push_slot(item);
    }

    /// Removes and returns the top element.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop_slot()
    }

    /// Returns the top element.
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    /// Returns the top element mutably.
    pub fn peek_mut(&mut self) -> Option<&mut T> {
        self.items.slots_mut().last_mut()
    }

    /// Returns an iterator from top to bottom.
    pub fn iter(&self) -> std::iter::Rev<std::slice::Iter<'_, T>> {
        self.items.iter().rev()
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.items.clear_slots();
    }
}

impl<T> Default for BoundedStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for BoundedStack<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for BoundedStack<T> {
    /// Pushes the elements in order; the last one ends up on top.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for BoundedStack<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.add_range(iter);
    }
}

static_assertions::assert_impl_all!(BoundedStack<String>: Send);
