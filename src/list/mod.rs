//! Growable array-backed list.
//!
//! This module provides [`ArrayList`], a contiguous buffer of logical
//! capacity M holding N <= M live elements, with fully explicit growth:
//!
//! - When an append finds `N == M`, M doubles and the live elements move into
//!   a freshly allocated buffer of exactly M slots. The old buffer is dropped.
//! - [`ArrayList::trim_excess`] and [`ArrayList::resize`] reallocate to the
//!   exact requested size.
//! - Vacated slots are dropped immediately so their payloads are released.
//!
//! Index misuse follows the list's [`BoundsPolicy`]: by default an
//! out-of-range index is logged and the call does nothing. Reads and writes
//! through [`ArrayList::get_at`] and [`ArrayList::set_at`] are lenient by
//! definition: reading past the end clamps to the last element and writing
//! past the end grows the list.
//!
//! # Time Complexity
//!
//! | Operation          | Complexity          |
//! |--------------------|---------------------|
//! | `add`              | O(1) amortized      |
//! | `insert`           | O(N - index)        |
//! | `remove_at`        | O(N - index)        |
//! | `remove`           | O(N)                |
//! | `remove_all`       | O(N), O(1) space    |
//! | `get` / `get_at`   | O(1)                |
//! | `sort`             | O(N log N)          |
//! | `closest_index`    | O(N)                |
//!
//! # Examples
//!
//! ```rust
//! use flatcoll::list::ArrayList;
//!
//! let mut list: ArrayList<i32> = ArrayList::new();
//! for value in 0..9 {
//!     list.add(value);
//! }
//! assert_eq!(list.len(), 9);
//! assert_eq!(list.capacity(), 16);
//!
//! list.remove_at(0).unwrap();
//! assert_eq!(list.as_slice(), &[1, 2, 3, 4, 5, 6, 7, 8]);
//!
//! // Bad input does nothing.
//! assert!(list.remove_at(42).is_err());
//! assert_eq!(list.len(), 8);
//! ```

mod algebra;
mod ordered;

use std::cell::OnceCell;
use std::fmt;
use std::ops::{Index, IndexMut};
use std::slice;

use crate::config::{BoundsPolicy, DEFAULT_CAPACITY, ListConfig};
use crate::error::IndexError;
use crate::notify::{BoxedObserver, CollectionChange, Notifier, SubscriptionId};

// =============================================================================
// ArrayList Definition
// =============================================================================

/// A growable list over one contiguous, exclusively owned buffer.
///
/// `capacity()` reports the logical capacity M that drives the doubling
/// strategy; the live range `[0, len)` is exposed through
/// [`as_slice`](ArrayList::as_slice).
///
/// Borrowing iterators hold a shared borrow of the list, so the list cannot
/// be mutated while one is alive.
pub struct ArrayList<T> {
    items: Vec<T>,
    capacity: usize,
    bounds: BoundsPolicy,
    notifier: Notifier<T>,
    default_item: OnceCell<T>,
}

impl<T> ArrayList<T> {
    /// Creates an empty list with the default capacity of 8.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flatcoll::list::ArrayList;
    ///
    /// let list: ArrayList<i32> = ArrayList::new();
    /// assert!(list.is_empty());
    /// assert_eq!(list.capacity(), 8);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty list whose buffer holds exactly `capacity` slots.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_config(ListConfig::new().with_capacity(capacity))
    }

    /// Creates an empty list from a [`ListConfig`].
    #[must_use]
    pub fn from_config(config: ListConfig) -> Self {
        Self {
            items: Vec::with_capacity(config.capacity),
            capacity: config.capacity,
            bounds: config.bounds,
            notifier: Notifier::new(config.notify),
            default_item: OnceCell::new(),
        }
    }

    /// Returns the number of live elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the list holds no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the logical capacity of the backing buffer.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the bounds policy.
    #[inline]
    #[must_use]
    pub const fn bounds_policy(&self) -> BoundsPolicy {
        self.bounds
    }

    /// Sets the bounds policy.
    pub const fn set_bounds_policy(&mut self, bounds: BoundsPolicy) {
        self.bounds = bounds;
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// Returns `true` if change notifications are enabled.
    #[inline]
    #[must_use]
    pub const fn is_notify(&self) -> bool {
        self.notifier.is_enabled()
    }

    /// Enables or disables change notifications.
    pub const fn set_notify(&mut self, notify: bool) {
        self.notifier.set_enabled(notify);
    }

    /// Registers an observer. Events reach it only while notifications are
    /// enabled.
    pub fn subscribe(&mut self, observer: BoxedObserver<T>) -> SubscriptionId {
        self.notifier.subscribe(observer)
    }

    /// Removes an observer. Returns `false` if the id is unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    #[inline]
    fn notify(&mut self, change: &CollectionChange<'_, T>) {
        self.notifier.emit(change);
    }

    #[inline]
    fn notify_added(&mut self, index: usize, count: usize) {
        if self.notifier.is_active() {
            self.notifier.emit(&CollectionChange::Add {
                items: &self.items[index..index + count],
                index,
            });
        }
    }

    #[inline]
    fn notify_reset(&mut self) {
        self.notify(&CollectionChange::Reset);
    }

    // =========================================================================
    // Capacity
    // =========================================================================

    /// Moves the live elements into a new buffer of exactly `capacity` slots.
    fn reallocate(&mut self, capacity: usize) {
        debug_assert!(capacity >= self.items.len());
        tracing::trace!(from = self.capacity, to = capacity, "reallocating list buffer");
        let mut buffer = Vec::with_capacity(capacity);
        buffer.append(&mut self.items);
        self.items = buffer;
        self.capacity = capacity;
    }

    /// Doubles the capacity until it fits `required` elements.
    fn grow_for(&mut self, required: usize) {
        if required <= self.capacity {
            return;
        }
        let mut capacity = if self.capacity == 0 {
            DEFAULT_CAPACITY
        } else {
            self.capacity
        };
        while capacity < required {
            capacity *= 2;
        }
        self.reallocate(capacity);
    }

    /// Grows the capacity to fit `len() + extra` elements without changing
    /// the length.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flatcoll::list::ArrayList;
    ///
    /// let mut list: ArrayList<u8> = ArrayList::with_capacity(2);
    /// list.add(1);
    /// list.reserve(10);
    /// assert_eq!(list.capacity(), 11);
    /// assert_eq!(list.len(), 1);
    /// ```
    pub fn reserve(&mut self, extra: usize) {
        let required = self.items.len() + extra;
        if required > self.capacity {
            self.reallocate(required);
        }
    }

    /// Shrinks the buffer to exactly `len()` slots.
    pub fn trim_excess(&mut self) {
        if self.capacity != self.items.len() {
            self.reallocate(self.items.len());
        }
    }

    // =========================================================================
    // Insertion
    // =========================================================================

    /// Appends an element, doubling the capacity first if the buffer is full.
    pub fn add(&mut self, item: T) {
        let index = self.items.len();
        self.grow_for(index + 1);
        self.items.push(item);
        self.notify_added(index, 1);
    }

    /// Inserts an element at `index`, shifting the tail right by one.
    ///
    /// An index at or past the end appends instead.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flatcoll::list::ArrayList;
    ///
    /// let mut list: ArrayList<char> = ['a', 'c'].into_iter().collect();
    /// list.insert(1, 'b');
    /// list.insert(99, 'd');
    /// assert_eq!(list.as_slice(), &['a', 'b', 'c', 'd']);
    /// ```
    pub fn insert(&mut self, index: usize, item: T) {
        if index >= self.items.len() {
            self.add(item);
            return;
        }
        self.grow_for(self.items.len() + 1);
        self.items.insert(index, item);
        self.notify_added(index, 1);
    }

    /// Appends every element of `iter`.
    pub fn add_range<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let start = self.items.len();
        for item in iter {
            self.grow_for(self.items.len() + 1);
            self.items.push(item);
        }
        let added = self.items.len() - start;
        if added > 0 {
            self.notify_added(start, added);
        }
    }

    /// Inserts every element of `iter` at `index`, preserving their order.
    ///
    /// An index at or past the end appends instead.
    pub fn insert_range<I: IntoIterator<Item = T>>(&mut self, index: usize, iter: I) {
        if index >= self.items.len() {
            self.add_range(iter);
            return;
        }
        let incoming: Vec<T> = iter.into_iter().collect();
        let added = incoming.len();
        if added == 0 {
            return;
        }
        self.grow_for(self.items.len() + added);
        self.items.splice(index..index, incoming);
        self.notify_added(index, added);
    }

    /// Replaces the whole contents with `iter`.
    pub fn assign_items<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.clear();
        for item in iter {
            self.grow_for(self.items.len() + 1);
            self.items.push(item);
        }
        self.notify_reset();
    }

    // =========================================================================
    // Removal
    // =========================================================================

    /// Removes and returns the element at `index`, shifting the tail left.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] for an index past the last element; under
    /// [`BoundsPolicy::Lenient`] the misuse is logged and the list is left
    /// unchanged.
    ///
    /// # Panics
    ///
    /// Panics on an invalid index under [`BoundsPolicy::Strict`].
    #[track_caller]
    pub fn remove_at(&mut self, index: usize) -> Result<T, IndexError> {
        let len = self.items.len();
        if index >= len {
            return Err(self.bounds.reject(IndexError::new("remove_at", index, len)));
        }
        let item = self.items.remove(index);
        self.notify(&CollectionChange::Remove {
            items: slice::from_ref(&item),
            index,
        });
        Ok(item)
    }

    /// Removes `count` elements starting at `start` and returns how many were
    /// removed.
    ///
    /// `count` is clamped to the live tail, with a minimum of 1.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] if `start` is not a live index; see
    /// [`remove_at`](ArrayList::remove_at) for the policy.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flatcoll::list::ArrayList;
    ///
    /// let mut list: ArrayList<i32> = (0..6).collect();
    /// assert_eq!(list.remove_range(4, 100), Ok(2));
    /// assert_eq!(list.remove_range(1, 0), Ok(1));
    /// assert_eq!(list.as_slice(), &[0, 2, 3]);
    /// ```
    #[track_caller]
    pub fn remove_range(&mut self, start: usize, count: usize) -> Result<usize, IndexError> {
        let len = self.items.len();
        if start >= len {
            return Err(self.bounds.reject(IndexError::new("remove_range", start, len)));
        }
        let count = count.clamp(1, len - start);
        let drained = self.items.drain(start..start + count);
        if self.notifier.is_active() {
            let removed: Vec<T> = drained.collect();
            self.notifier.emit(&CollectionChange::Remove {
                items: &removed,
                index: start,
            });
        } else {
            drop(drained);
        }
        Ok(count)
    }

    /// Removes and returns the last element.
    pub fn pop(&mut self) -> Option<T> {
        let item = self.items.pop()?;
        let index = self.items.len();
        self.notify(&CollectionChange::Remove {
            items: slice::from_ref(&item),
            index,
        });
        Some(item)
    }

    /// Removes every element while keeping the capacity.
    pub fn clear(&mut self) {
        self.items.clear();
        self.notify_reset();
    }

    /// Removes every element matching `predicate` in a single pass and
    /// returns how many were removed.
    ///
    /// Survivors are compacted towards the front with a write cursor, then
    /// the tail is dropped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flatcoll::list::ArrayList;
    ///
    /// let mut list: ArrayList<i32> = (1..=10).collect();
    /// assert_eq!(list.remove_all(|value| value % 3 == 0), 3);
    /// assert_eq!(list.as_slice(), &[1, 2, 4, 5, 7, 8, 10]);
    /// ```
    pub fn remove_all<P>(&mut self, mut predicate: P) -> usize
    where
        P: FnMut(&T) -> bool,
    {
        let len = self.items.len();
        let mut write = 0;
        for read in 0..len {
            if !predicate(&self.items[read]) {
                if write != read {
                    self.items.swap(write, read);
                }
                write += 1;
            }
        }
        self.items.truncate(write);
        let removed = len - write;
        if removed > 0 {
            self.notify_reset();
        }
        removed
    }

    /// Keeps only the elements whose position is flagged in `keep`.
    pub(crate) fn retain_positions(&mut self, keep: &[bool]) -> usize {
        let mut position = 0;
        self.remove_all(|_| {
            let drop = !keep[position];
            position += 1;
            drop
        })
    }

    // =========================================================================
    // Access
    // =========================================================================

    /// Returns the element at `index`, or `None` if out of range.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// Writes through this reference are not observed by subscribers.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    /// Returns the first element.
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    /// Returns the last element.
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    /// Returns up to `count` elements starting at `start`.
    ///
    /// `count` is clamped to the live tail.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] if `start` is past the end.
    #[track_caller]
    pub fn get_range(&self, start: usize, count: usize) -> Result<&[T], IndexError> {
        let len = self.items.len();
        if start > len {
            return Err(self.bounds.reject(IndexError::new("get_range", start, len)));
        }
        let end = start + count.min(len - start);
        Ok(&self.items[start..end])
    }

    /// Returns the live range as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Returns the live range as a mutable slice.
    ///
    /// Writes through the slice are not observed by subscribers.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items
    }

    /// Returns an iterator over the live elements.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Returns a mutable iterator over the live elements.
    #[inline]
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Returns the index of the first element matching `predicate`.
    pub fn find<P>(&self, predicate: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        self.items.iter().position(predicate)
    }

    /// Returns the index of the last element matching `predicate`.
    pub fn find_last<P>(&self, predicate: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        self.items.iter().rposition(predicate)
    }

    /// Returns the first element matching `predicate`.
    pub fn search<P>(&self, mut predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.items.iter().find(|item| predicate(item))
    }

    /// Returns the last element matching `predicate`.
    pub fn search_last<P>(&self, mut predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.items.iter().rev().find(|item| predicate(item))
    }

    // =========================================================================
    // Reordering
    // =========================================================================

    /// Sorts the live range with `compare`. The sort is stable.
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> std::cmp::Ordering,
    {
        self.items.sort_by(compare);
        self.notify_reset();
    }

    /// Sorts the live range by the key extracted with `key`.
    pub fn sort_by_key<K, F>(&mut self, key: F)
    where
        F: FnMut(&T) -> K,
        K: Ord,
    {
        self.items.sort_by_key(key);
        self.notify_reset();
    }

    /// Rotates the live range by `offset` positions; positive offsets move
    /// elements towards the end.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flatcoll::list::ArrayList;
    ///
    /// let mut list: ArrayList<i32> = (1..=5).collect();
    /// list.shift(2);
    /// assert_eq!(list.as_slice(), &[4, 5, 1, 2, 3]);
    /// list.shift(-2);
    /// assert_eq!(list.as_slice(), &[1, 2, 3, 4, 5]);
    /// ```
    pub fn shift(&mut self, offset: isize) {
        let len = self.items.len();
        if len < 2 {
            return;
        }
        let modulus = isize::try_from(len).unwrap_or(isize::MAX);
        let steps = offset.rem_euclid(modulus).unsigned_abs();
        if steps == 0 {
            return;
        }
        self.items.rotate_right(steps);
        self.notify_reset();
    }

    /// Swaps the elements at `first` and `second`.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] if either index is out of range.
    #[track_caller]
    pub fn swap(&mut self, first: usize, second: usize) -> Result<(), IndexError> {
        let len = self.items.len();
        for index in [first, second] {
            if index >= len {
                return Err(self.bounds.reject(IndexError::new("swap", index, len)));
            }
        }
        if first == second {
            return Ok(());
        }
        self.items.swap(first, second);
        if self.notifier.is_active() {
            self.notifier.emit(&CollectionChange::Replace {
                old: &self.items[second],
                new: &self.items[first],
                index: first,
            });
            self.notifier.emit(&CollectionChange::Replace {
                old: &self.items[first],
                new: &self.items[second],
                index: second,
            });
        }
        Ok(())
    }

    /// Moves the element at `from` to position `to`, shifting the elements
    /// in between by one.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] if either index is out of range.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flatcoll::list::ArrayList;
    ///
    /// let mut list: ArrayList<char> = "abcde".chars().collect();
    /// list.move_item(0, 3).unwrap();
    /// assert_eq!(list.as_slice(), &['b', 'c', 'd', 'a', 'e']);
    /// ```
    #[track_caller]
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<(), IndexError> {
        let len = self.items.len();
        for index in [from, to] {
            if index >= len {
                return Err(self.bounds.reject(IndexError::new("move_item", index, len)));
            }
        }
        if from == to {
            return Ok(());
        }
        if from < to {
            self.items[from..=to].rotate_left(1);
        } else {
            self.items[to..=from].rotate_right(1);
        }
        if self.notifier.is_active() {
            self.notifier.emit(&CollectionChange::Move {
                item: &self.items[to],
                old_index: from,
                new_index: to,
            });
        }
        Ok(())
    }

    /// Shuffles the live range in place with the given random source
    /// (Fisher-Yates).
    #[cfg(feature = "shuffle")]
    pub fn shuffle_with<R>(&mut self, rng: &mut R)
    where
        R: rand::Rng + ?Sized,
    {
        for upper in (1..self.items.len()).rev() {
            let other = rng.random_range(0..=upper);
            self.items.swap(upper, other);
        }
        self.notify_reset();
    }

    /// Shuffles the live range with the thread-local random source.
    #[cfg(feature = "shuffle")]
    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::rng());
    }
}

// =============================================================================
// Element-bound operations
// =============================================================================

impl<T: PartialEq> ArrayList<T> {
    /// Returns the index of the first element equal to `item`.
    #[must_use]
    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.items.iter().position(|candidate| candidate == item)
    }

    /// Returns the index of the last element equal to `item`.
    #[must_use]
    pub fn last_index_of(&self, item: &T) -> Option<usize> {
        self.items.iter().rposition(|candidate| candidate == item)
    }

    /// Returns `true` if some element equals `item`.
    #[must_use]
    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    /// Removes the first element equal to `item`. Returns `false` if none
    /// matched.
    pub fn remove(&mut self, item: &T) -> bool {
        match self.index_of(item) {
            Some(index) => self.remove_at(index).is_ok(),
            None => false,
        }
    }
}

impl<T: Ord> ArrayList<T> {
    /// Sorts the live range ascending.
    pub fn sort(&mut self) {
        self.sort_by(Ord::cmp);
    }

    /// Sorts the live range ascending.
    pub fn sort_ascending(&mut self) {
        self.sort();
    }

    /// Sorts the live range descending.
    pub fn sort_descending(&mut self) {
        self.sort_by(|left, right| right.cmp(left));
    }
}

impl<T: Default> ArrayList<T> {
    /// Lenient read.
    ///
    /// Reading past the end returns the last element. On an empty list a
    /// default element is constructed once and returned; it is not added to
    /// the list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flatcoll::list::ArrayList;
    ///
    /// let empty: ArrayList<i32> = ArrayList::new();
    /// assert_eq!(*empty.get_at(3), 0);
    /// assert!(empty.is_empty());
    ///
    /// let list: ArrayList<i32> = [10, 20].into_iter().collect();
    /// assert_eq!(*list.get_at(1), 20);
    /// assert_eq!(*list.get_at(99), 20);
    /// ```
    pub fn get_at(&self, index: usize) -> &T {
        match self.items.get(index).or_else(|| self.items.last()) {
            Some(item) => item,
            None => self.default_item.get_or_init(T::default),
        }
    }

    /// Lenient write.
    ///
    /// Inside the live range this replaces the element and returns the old
    /// one. Past the end the list grows with default elements up to
    /// `index`, then stores `item` there.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flatcoll::list::ArrayList;
    ///
    /// let mut list: ArrayList<i32> = ArrayList::new();
    /// assert_eq!(list.set_at(3, 7), None);
    /// assert_eq!(list.as_slice(), &[0, 0, 0, 7]);
    /// assert_eq!(list.set_at(0, 1), Some(0));
    /// ```
    pub fn set_at(&mut self, index: usize, item: T) -> Option<T> {
        let len = self.items.len();
        if index < len {
            let old = std::mem::replace(&mut self.items[index], item);
            if self.notifier.is_active() {
                self.notifier.emit(&CollectionChange::Replace {
                    old: &old,
                    new: &self.items[index],
                    index,
                });
            }
            return Some(old);
        }
        self.grow_for(index + 1);
        self.items.resize_with(index, T::default);
        self.items.push(item);
        self.notify_added(len, index + 1 - len);
        None
    }

    /// Reallocates the buffer to exactly `new_len` slots, truncating or
    /// filling with default elements.
    pub fn resize(&mut self, new_len: usize) {
        self.items.truncate(new_len);
        self.reallocate(new_len);
        self.items.resize_with(new_len, T::default);
        self.notify_reset();
    }
}

impl<T: Clone> ArrayList<T> {
    /// Copies the live range into a `Vec`.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.items.clone()
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for ArrayList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for ArrayList<T> {
    /// Clones the elements, the capacity and the configuration. Observers
    /// stay with the original.
    fn clone(&self) -> Self {
        let mut items = Vec::with_capacity(self.capacity);
        items.extend_from_slice(&self.items);
        Self {
            items,
            capacity: self.capacity,
            bounds: self.bounds,
            notifier: self.notifier.clone(),
            default_item: OnceCell::new(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ArrayList<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.items.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for ArrayList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: Eq> Eq for ArrayList<T> {}

impl<T> FromIterator<T> for ArrayList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.add_range(iter);
        list
    }
}

impl<T> Extend<T> for ArrayList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add_range(iter);
    }
}

impl<T> IntoIterator for ArrayList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ArrayList<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut ArrayList<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter_mut()
    }
}

impl<T> Index<usize> for ArrayList<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `index >= len()`. Use [`ArrayList::get_at`] for the
    /// lenient read.
    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> IndexMut<usize> for ArrayList<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.items[index]
    }
}

static_assertions::assert_impl_all!(ArrayList<i32>: Send);
static_assertions::assert_not_impl_any!(ArrayList<i32>: Sync);

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for ArrayList<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
struct ArrayListVisitor<T> {
    marker: std::marker::PhantomData<T>,
}

#[cfg(feature = "serde")]
impl<'de, T> serde::de::Visitor<'de> for ArrayListVisitor<T>
where
    T: serde::Deserialize<'de>,
{
    type Value = ArrayList<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        const MAX_PREALLOCATE: usize = 4096;
        let hint = seq.size_hint().unwrap_or(0).min(MAX_PREALLOCATE);
        let mut list = ArrayList::with_capacity(hint.max(DEFAULT_CAPACITY));
        while let Some(element) = seq.next_element()? {
            list.add(element);
        }
        Ok(list)
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for ArrayList<T>
where
    T: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(ArrayListVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
