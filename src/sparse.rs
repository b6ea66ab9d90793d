//! Dense/sparse integer sets.
//!
//! [`SparseSet`] stores bounded non-negative integers in two arrays:
//!
//! - `dense[0..len)` holds the members, compacted, in insertion and swap
//!   order (not sorted);
//! - `sparse[value]` holds the position of `value` inside `dense`. The entry
//!   is meaningful only while `value` is a member.
//!
//! For every `i < len`, `sparse[dense[i]] == i`. Membership checks both
//! directions of that link, so stale `sparse` entries left behind by
//! removals or [`clear`](SparseSet::clear) never produce a false positive.
//!
//! [`SparseItemSet`] adds a payload array aligned with `dense`.
//!
//! # Time Complexity
//!
//! | Operation   | Complexity      |
//! |-------------|-----------------|
//! | `add`       | O(1) amortized  |
//! | `remove`    | O(1)            |
//! | `contains`  | O(1)            |
//! | `clear`     | O(1)            |
//!
//! # Examples
//!
//! ```rust
//! use flatcoll::sparse::SparseSet;
//!
//! let mut set = SparseSet::new();
//! set.add(5);
//! set.add(2);
//! set.remove(5);
//!
//! assert!(!set.contains(5));
//! assert!(set.contains(2));
//! assert_eq!(set.len(), 1);
//! ```

use crate::config::DEFAULT_CAPACITY;

/// Keys must stay below this bound; `sparse` needs `value + 1` slots.
pub const MAX_KEY: usize = usize::MAX - 1;

/// Capacity after growing from `capacity` to hold `value` and one more
/// member: doubled, or `value + 1` if that is larger.
fn grown_capacity(capacity: usize, value: usize) -> usize {
    capacity.saturating_mul(2).max(value.saturating_add(1))
}

fn reject_key(operation: &'static str, value: usize) {
    tracing::error!(operation, index = value, max = MAX_KEY, "key out of range, ignoring call");
}

// =============================================================================
// SparseSet
// =============================================================================

/// A set of integers with O(1) insertion, removal and membership.
///
/// Equality compares members only; dense order and stale slots are ignored.
#[derive(Debug, Clone)]
pub struct SparseSet {
    dense: Vec<usize>,
    sparse: Vec<usize>,
    count: usize,
}

impl SparseSet {
    /// Creates an empty set with the default capacity of 8.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty set holding values below `capacity` without growth.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            dense: vec![0; capacity],
            sparse: vec![0; capacity],
            count: 0,
        }
    }

    /// Returns the number of members.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if the set has no members.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the capacity, one past the largest value storable without
    /// growth.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.sparse.len()
    }

    /// Returns the members in dense order.
    #[inline]
    #[must_use]
    pub fn dense(&self) -> &[usize] {
        &self.dense[..self.count]
    }

    /// Returns an iterator over the members in dense order.
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, usize>> {
        self.dense().iter().copied()
    }

    /// Returns `true` if `value` is a member.
    #[inline]
    #[must_use]
    pub fn contains(&self, value: usize) -> bool {
        self.sparse
            .get(value)
            .is_some_and(|&position| position < self.count && self.dense[position] == value)
    }

    fn grow(&mut self, value: usize) {
        let capacity = grown_capacity(self.capacity(), value);
        tracing::trace!(from = self.capacity(), to = capacity, "growing sparse set");
        self.dense.resize(capacity, 0);
        self.sparse.resize(capacity, 0);
    }

    /// Adds `value`. Returns `false` if it was already a member.
    ///
    /// Grows both arrays when `value` is out of range or the dense array is
    /// full. A value above [`MAX_KEY`] is logged and not added.
    pub fn add(&mut self, value: usize) -> bool {
        if value > MAX_KEY {
            reject_key("add", value);
            return false;
        }
        if self.contains(value) {
            return false;
        }
        if value >= self.capacity() || self.count == self.capacity() {
            self.grow(value);
        }
        self.dense[self.count] = value;
        self.sparse[value] = self.count;
        self.count += 1;
        true
    }

    /// Adds every value of `values` that is not yet a member and returns how
    /// many were added.
    ///
    /// Each value is checked with [`contains`](SparseSet::contains) before
    /// insertion, so duplicates inside `values` are added once.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flatcoll::sparse::SparseSet;
    ///
    /// let mut set = SparseSet::with_capacity(4);
    /// assert_eq!(set.add_values([3, 100, 3, 7]), 3);
    /// assert_eq!(set.dense(), &[3, 100, 7]);
    /// ```
    pub fn add_values<I: IntoIterator<Item = usize>>(&mut self, values: I) -> usize {
        values
            .into_iter()
            .map(|value| self.add(value))
            .filter(|added| *added)
            .count()
    }

    /// Removes `value` by moving the last member into its dense position.
    /// Returns `false` if `value` was not a member.
    pub fn remove(&mut self, value: usize) -> bool {
        if !self.contains(value) {
            return false;
        }
        let position = self.sparse[value];
        let last = self.dense[self.count - 1];
        self.dense[position] = last;
        self.sparse[last] = position;
        self.count -= 1;
        true
    }

    /// Removes every member. The arrays keep their contents; the two-way
    /// link check rejects the stale entries.
    pub const fn clear(&mut self) {
        self.count = 0;
    }
}

impl PartialEq for SparseSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|value| other.contains(value))
    }
}

impl Eq for SparseSet {}

impl Default for SparseSet {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<usize> for SparseSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = Self::new();
        set.add_values(iter);
        set
    }
}

impl Extend<usize> for SparseSet {
    fn extend<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        self.add_values(iter);
    }
}

impl<'a> IntoIterator for &'a SparseSet {
    type Item = usize;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, usize>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// SparseItemSet
// =============================================================================

/// A sparse set whose members carry a payload.
///
/// Payloads live in an array aligned with the dense array, so iteration
/// visits them contiguously.
///
/// # Examples
///
/// ```rust
/// use flatcoll::sparse::SparseItemSet;
///
/// let mut positions: SparseItemSet<(f32, f32)> = SparseItemSet::new();
/// positions.add(3, (0.0, 1.0));
/// positions.add(10, (2.0, 2.0));
///
/// if positions.contains(3) {
///     positions.set_value(3, (5.0, 1.0));
/// }
/// assert_eq!(*positions.get_value(3), (5.0, 1.0));
/// assert_eq!(positions.get(4), None);
/// ```
///
/// Two sets are equal when they hold the same indices with equal payloads,
/// in any dense order.
#[derive(Debug, Clone)]
pub struct SparseItemSet<T> {
    dense: Vec<usize>,
    sparse: Vec<usize>,
    items: Vec<T>,
}

impl<T> SparseItemSet<T> {
    /// Creates an empty set with the default capacity of 8.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty set holding indices below `capacity` without growth.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            dense: vec![0; capacity],
            sparse: vec![0; capacity],
            items: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of members.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the set has no members.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the capacity.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.sparse.len()
    }

    /// Returns the member indices in dense order.
    #[inline]
    #[must_use]
    pub fn dense(&self) -> &[usize] {
        &self.dense[..self.items.len()]
    }

    /// Returns the payloads in dense order.
    #[inline]
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Returns an iterator over the payloads in dense order.
    pub fn values(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Returns an iterator over `(index, payload)` pairs in dense order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.dense().iter().copied().zip(self.items.iter())
    }

    /// Returns `true` if `index` is a member.
    #[inline]
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.sparse.get(index).is_some_and(|&position| {
            position < self.items.len() && self.dense[position] == index
        })
    }

    /// Adds `index` with `item`. If `index` is already a member its payload
    /// is replaced and the old one returned.
    ///
    /// An index above [`MAX_KEY`] is logged and `item` is handed back.
    pub fn add(&mut self, index: usize, item: T) -> Option<T> {
        if index > MAX_KEY {
            reject_key("add", index);
            return Some(item);
        }
        if self.contains(index) {
            return Some(std::mem::replace(&mut self.items[self.sparse[index]], item));
        }
        let count = self.items.len();
        if index >= self.capacity() || count == self.capacity() {
            let capacity = grown_capacity(self.capacity(), index);
            tracing::trace!(from = self.capacity(), to = capacity, "growing sparse item set");
            self.dense.resize(capacity, 0);
            self.sparse.resize(capacity, 0);
        }
        self.dense[count] = index;
        self.sparse[index] = count;
        self.items.push(item);
        None
    }

    /// Removes `index` by swap-remove and returns its payload.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if !self.contains(index) {
            return None;
        }
        let position = self.sparse[index];
        let last = self.items.len() - 1;
        let moved = self.dense[last];
        self.dense[position] = moved;
        self.sparse[moved] = position;
        Some(self.items.swap_remove(position))
    }

    /// Returns the payload of `index`, or `None` if it is not a member.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        if self.contains(index) {
            Some(&self.items[self.sparse[index]])
        } else {
            None
        }
    }

    /// Returns the payload of `index` mutably, or `None` if it is not a
    /// member.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if self.contains(index) {
            let position = self.sparse[index];
            Some(&mut self.items[position])
        } else {
            None
        }
    }

    /// Returns the payload of `index` without a membership check.
    ///
    /// Callers check [`contains`](SparseItemSet::contains) first.
    ///
    /// # Panics
    ///
    /// Panics if `index` is beyond the capacity or its stale link points
    /// past the live range. A stale link inside the live range returns
    /// another member's payload.
    #[inline]
    #[must_use]
    pub fn get_value(&self, index: usize) -> &T {
        &self.items[self.sparse[index]]
    }

    /// Overwrites the payload of `index` without a membership check and
    /// returns the old one.
    ///
    /// # Panics
    ///
    /// See [`get_value`](SparseItemSet::get_value).
    #[inline]
    pub fn set_value(&mut self, index: usize, item: T) -> T {
        let position = self.sparse[index];
        std::mem::replace(&mut self.items[position], item)
    }

    /// Removes every member and drops the payloads.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T: PartialEq> PartialEq for SparseItemSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(index, item)| other.get(index).is_some_and(|theirs| theirs == item))
    }
}

impl<T: Eq> Eq for SparseItemSet<T> {}

impl<T> Default for SparseItemSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<(usize, T)> for SparseItemSet<T> {
    fn from_iter<I: IntoIterator<Item = (usize, T)>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T> Extend<(usize, T)> for SparseItemSet<T> {
    fn extend<I: IntoIterator<Item = (usize, T)>>(&mut self, iter: I) {
        for (index, item) in iter {
            self.add(index, item);
        }
    }
}

static_assertions::assert_impl_all!(SparseSet: Send, Sync);
static_assertions::assert_impl_all!(SparseItemSet<String>: Send, Sync, Clone);
