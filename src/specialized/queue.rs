//! Growable ring-buffer queue.

use std::fmt;

use super::ArrayStorage;
use crate::config::DEFAULT_CAPACITY;
use crate::list::ArrayList;

/// A FIFO queue over a ring buffer.
///
/// The ring is an [`ArrayList`] whose length always equals the ring
/// capacity; vacant slots hold `None`. Exactly `len()` elements occupy the
/// slots from `head` forward to `tail`, wrapping modulo the capacity.
/// When the ring is full, [`enqueue`](CircularQueue::enqueue) doubles it and
/// lays the elements out again starting at slot 0.
///
/// # Examples
///
/// ```rust
/// use flatcoll::specialized::CircularQueue;
///
/// let mut queue = CircularQueue::with_capacity(2);
/// queue.enqueue('a');
/// queue.enqueue('b');
/// assert_eq!(queue.dequeue(), Some('a'));
///
/// queue.enqueue('c');
/// queue.enqueue('d');
/// assert_eq!(queue.capacity(), 4);
/// assert_eq!(queue.iter().collect::<String>(), "bcd");
/// ```
pub struct CircularQueue<T> {
    ring: ArrayList<Option<T>>,
    head: usize,
    tail: usize,
    count: usize,
}

impl<T> CircularQueue<T> {
    /// Creates an empty queue with the default capacity of 8.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty queue with `capacity` slots.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut ring = ArrayList::with_capacity(capacity);
        ring.add_range(std::iter::repeat_with(|| None).take(capacity));
        Self {
            ring,
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    /// Returns the number of queued elements.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if nothing is queued.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the ring capacity.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.ring.len()
    }

    #[inline]
    fn physical(&self, index: usize) -> usize {
        (self.head + index) % self.ring.len()
    }

    fn grow(&mut self) {
        let capacity = self.ring.len();
        let grown = if capacity == 0 {
            DEFAULT_CAPACITY
        } else {
            capacity * 2
        };
        tracing::trace!(from = capacity, to = grown, "growing circular queue");
        let mut ring = ArrayList::with_capacity(grown);
        for index in 0..self.count {
            let physical = self.physical(index);
            ring.push_slot(self.ring.slot_mut(physical).and_then(Option::take));
        }
        while ring.len() < grown {
            ring.push_slot(None);
        }
        self.ring = ring;
        self.head = 0;
        self.tail = self.count;
    }

    /// Appends `item` at the tail, doubling the ring first if it is full.
    pub fn enqueue(&mut self, item: T) {
        if self.count == self.ring.len() {
            self.grow();
        }
        if let Some(slot) = self.ring.slot_mut(self.tail) {
            *slot = Some(item);
        }
        self.tail = (self.tail + 1) % self.ring.len();
        self.count += 1;
    }

    /// Removes and returns the element at the head, clearing its slot.
    pub fn dequeue(&mut self) -> Option<T> {
        if self.count == 0 {
            return None;
        }
        let item = self.ring.slot_mut(self.head).and_then(Option::take);
        self.head = (self.head + 1) % self.ring.len();
        self.count -= 1;
        item
    }

    /// Returns the element at the head.
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.get(0)
    }

    /// Returns the element `index` positions behind the head.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flatcoll::specialized::CircularQueue;
    ///
    /// let mut queue: CircularQueue<i32> = (1..=3).collect();
    /// queue.dequeue();
    /// assert_eq!(queue.get(0), Some(&2));
    /// assert_eq!(queue.get(1), Some(&3));
    /// assert_eq!(queue.get(2), None);
    /// ```
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.count {
            return None;
        }
        self.ring.slot(self.physical(index)).and_then(Option::as_ref)
    }

    /// Returns an iterator from head to tail.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        (0..self.count).filter_map(move |index| self.get(index))
    }

    /// Removes every element while keeping the ring.
    pub fn clear(&mut self) {
        for slot in self.ring.slots_mut() {
            *slot = None;
        }
        self.head = 0;
        self.tail = 0;
        self.count = 0;
    }
}

impl<T> Default for CircularQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for CircularQueue<T> {
    fn clone(&self) -> Self {
        Self {
            ring: self.ring.clone(),
            head: self.head,
            tail: self.tail,
            count: self.count,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for CircularQueue<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for CircularQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

impl<T> Extend<T> for CircularQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.enqueue(item);
        }
    }
}

static_assertions::assert_impl_all!(CircularQueue<String>: Send);
