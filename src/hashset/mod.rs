//! Open-chained hash set with free-list slot reuse.
//!
//! This module provides [`OpenHashSet`], a mutable hash set laid out as two
//! flat arrays:
//!
//! - a bucket array whose entries hold `slot_index + 1` of the chain head
//!   (`0` means the bucket is empty);
//! - a slot array of [`Slot`] records, each either live (masked hash, next
//!   link, value) or free (next free slot).
//!
//! Removal unlinks the slot from its chain and pushes it on the free list, so
//! the next insertion reuses it in O(1) without compacting anything.
//! [`OpenHashSet::trim_excess`] defragments by rebuilding into a freshly
//! sized table.
//!
//! The bucket count is always a prime. When the slot array is exhausted and
//! the free list is empty, the table grows to the next prime at or above
//! twice the element count.
//!
//! # Time Complexity
//!
//! | Operation                | Complexity           |
//! |--------------------------|----------------------|
//! | `add`                    | O(1) expected        |
//! | `contains`               | O(1) expected        |
//! | `remove`                 | O(1) expected        |
//! | `union_with`             | O(m)                 |
//! | `intersect_with_set`     | O(n), O(n*m) if comparers differ |
//! | `is_subset_of_set`       | O(n), O(n*m) if comparers differ |
//! | `trim_excess`            | O(n)                 |
//!
//! # Examples
//!
//! ```rust
//! use flatcoll::hashset::OpenHashSet;
//!
//! let mut set: OpenHashSet<i32> = OpenHashSet::new();
//! assert!(set.add(1));
//! assert!(!set.add(1));
//! assert!(set.add(2));
//!
//! assert_eq!(set.len(), 2);
//! assert!(set.contains(&1));
//! assert!(!set.contains(&3));
//! ```
//!
//! # Set Algebra
//!
//! ```rust
//! use flatcoll::hashset::OpenHashSet;
//!
//! let mut set: OpenHashSet<i32> = [1, 2, 3].into_iter().collect();
//! let other: OpenHashSet<i32> = [2, 3, 4].into_iter().collect();
//!
//! set.symmetric_except_with_set(&other);
//! assert!(set.set_equals([1, 4]));
//!
//! set.union_with([2, 3]);
//! assert!(set.is_superset_of_set(&other));
//! ```

mod comparer;
pub mod prime;

pub use comparer::{DefaultComparer, EqualityComparer, HashComparer};

#[cfg(feature = "ahash")]
pub use comparer::{AHashComparer, FixedAHashBuilder};
#[cfg(feature = "fxhash")]
pub use comparer::FxComparer;

use std::borrow::Borrow;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::HashSetConfig;
use crate::error::{CapacityError, IterationError};

/// Mask clearing the top bit of a 32-bit hash.
const HASH_MASK: u64 = 0x7FFF_FFFF;

// =============================================================================
// Slot
// =============================================================================

/// One entry of the slot array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot<T> {
    /// Holds an element and links to the next slot of its bucket chain.
    Live {
        /// Element hash masked to 31 bits.
        hash: u32,
        /// Next slot in the same bucket chain.
        next: Option<usize>,
        /// The element.
        value: T,
    },
    /// Reusable slot, linked into the free list.
    Free {
        /// Next free slot.
        next: Option<usize>,
    },
}

impl<T> Slot<T> {
    /// Returns the element of a live slot.
    #[inline]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Live { value, .. } => Some(value),
            Self::Free { .. } => None,
        }
    }

    /// Returns `true` for a live slot.
    #[inline]
    pub const fn is_live(&self) -> bool {
        matches!(self, Self::Live { .. })
    }

    #[inline]
    const fn next(&self) -> Option<usize> {
        match self {
            Self::Live { next, .. } | Self::Free { next } => *next,
        }
    }

    #[inline]
    const fn set_next(&mut self, link: Option<usize>) {
        match self {
            Self::Live { next, .. } | Self::Free { next } => *next = link,
        }
    }
}

// =============================================================================
// OpenHashSet Definition
// =============================================================================

/// A hash set over a prime-sized bucket array and a slot array with a free
/// list.
///
/// Equality is defined by the comparer `C` (by default `Hash` + `Eq` with
/// SipHash). Every structural mutation bumps a version stamp that detached
/// [`SetCursor`]s check on each step. Each set, clones included, also
/// carries its own instance id so a cursor only steps the set it came from.
pub struct OpenHashSet<T, C = DefaultComparer> {
    buckets: Vec<usize>,
    slots: Vec<Slot<T>>,
    count: usize,
    free_list: Option<usize>,
    free_count: usize,
    version: u64,
    instance: u64,
    comparer: C,
}

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(0);

fn next_instance() -> u64 {
    NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed)
}

impl<T, C: Default> OpenHashSet<T, C> {
    /// Creates an empty set. No table is allocated until the first insert.
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparer(C::default())
    }

    /// Creates an empty set with room for at least `capacity` elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flatcoll::hashset::OpenHashSet;
    ///
    /// let set: OpenHashSet<u8> = OpenHashSet::with_capacity(10);
    /// assert_eq!(set.capacity(), 11);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparer(capacity, C::default())
    }

    /// Creates an empty set from a [`HashSetConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError::Overflow`] if the configured capacity exceeds
    /// the largest table size.
    pub fn from_config(config: HashSetConfig) -> Result<Self, CapacityError> {
        config.validate()?;
        Ok(Self::with_capacity(config.capacity))
    }
}

impl<T, C> OpenHashSet<T, C> {
    /// Creates an empty set using `comparer`.
    #[must_use]
    pub fn with_comparer(comparer: C) -> Self {
        Self {
            buckets: Vec::new(),
            slots: Vec::new(),
            count: 0,
            free_list: None,
            free_count: 0,
            version: 0,
            instance: next_instance(),
            comparer,
        }
    }

    /// Creates an empty set using `comparer` with room for at least
    /// `capacity` elements.
    #[must_use]
    pub fn with_capacity_and_comparer(capacity: usize, comparer: C) -> Self {
        let mut set = Self::with_comparer(comparer);
        if capacity > 0 {
            set.initialize(capacity);
        }
        set
    }

    fn initialize(&mut self, capacity: usize) {
        let size = prime::next_prime(capacity);
        self.buckets = vec![0; size];
        self.slots = Vec::with_capacity(size);
        self.free_list = None;
        self.free_count = 0;
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if the set holds no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the table size (number of buckets and of slots).
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the comparer.
    #[inline]
    pub const fn comparer(&self) -> &C {
        &self.comparer
    }

    /// Returns the version stamp.
    #[inline]
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Returns the number of slots waiting on the free list.
    #[inline]
    #[must_use]
    pub const fn free_count(&self) -> usize {
        self.free_count
    }

    /// Returns the bucket array: `slot_index + 1` of each chain head, `0` for
    /// an empty bucket.
    #[inline]
    #[must_use]
    pub fn buckets(&self) -> &[usize] {
        &self.buckets
    }

    /// Returns the slots used so far, live and free.
    #[inline]
    #[must_use]
    pub fn slots(&self) -> &[Slot<T>] {
        &self.slots
    }

    #[inline]
    const fn bump_version(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    /// Removes every element while keeping the table.
    pub fn clear(&mut self) {
        if self.slots.is_empty() {
            return;
        }
        self.slots.clear();
        self.buckets.fill(0);
        self.free_list = None;
        self.free_count = 0;
        self.count = 0;
        self.bump_version();
    }

    /// Returns an iterator over the elements in slot order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            slots: self.slots.iter(),
            remaining: self.count,
        }
    }

    /// Returns a detached cursor positioned before the first element.
    ///
    /// Unlike [`iter`](OpenHashSet::iter) a cursor does not borrow the set;
    /// [`advance`](OpenHashSet::advance) fails once the set has been
    /// structurally modified, or when given to another set.
    #[must_use]
    pub const fn cursor(&self) -> SetCursor {
        SetCursor {
            position: 0,
            version: self.version,
            instance: self.instance,
        }
    }

    /// Steps `cursor` to the next element.
    ///
    /// # Errors
    ///
    /// Returns [`IterationError::Invalidated`] if the set changed since the
    /// cursor was created, or [`IterationError::ForeignCursor`] if the cursor
    /// belongs to another set.
    pub fn advance(&self, cursor: &mut SetCursor) -> Result<Option<&T>, IterationError> {
        if cursor.instance != self.instance {
            return Err(IterationError::ForeignCursor);
        }
        if cursor.version != self.version {
            return Err(IterationError::Invalidated {
                expected: cursor.version,
                found: self.version,
            });
        }
        while let Some(slot) = self.slots.get(cursor.position) {
            cursor.position += 1;
            if let Some(value) = slot.value() {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    /// Unlinks live slot `index` from bucket chain `bucket`, pushes it on
    /// the free list and returns its value.
    fn unlink(&mut self, bucket: usize, previous: Option<usize>, index: usize) -> T {
        let next = self.slots[index].next();
        match previous {
            None => self.buckets[bucket] = next.map_or(0, |slot| slot + 1),
            Some(previous) => self.slots[previous].set_next(next),
        }
        let freed = std::mem::replace(
            &mut self.slots[index],
            Slot::Free {
                next: self.free_list,
            },
        );
        self.count -= 1;
        self.bump_version();
        if self.count == 0 {
            self.slots.clear();
            self.buckets.fill(0);
            self.free_list = None;
            self.free_count = 0;
        } else {
            self.free_list = Some(index);
            self.free_count += 1;
        }
        match freed {
            Slot::Live { value, .. } => value,
            Slot::Free { .. } => unreachable!("unlinked slot {index} was not live"),
        }
    }
}

// =============================================================================
// Hashing Operations
// =============================================================================

impl<T, C: EqualityComparer<T>> OpenHashSet<T, C> {
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    fn hash_of(&self, value: &T) -> u32 {
        (self.comparer.hash(value) & HASH_MASK) as u32
    }

    #[inline]
    fn bucket_of(&self, hash: u32) -> usize {
        hash as usize % self.buckets.len()
    }

    /// Returns the slot index holding an element equal to `value`.
    fn find_slot(&self, value: &T) -> Option<usize> {
        if self.buckets.is_empty() {
            return None;
        }
        let hash = self.hash_of(value);
        let mut cursor = self.buckets[self.bucket_of(hash)].checked_sub(1);
        while let Some(index) = cursor {
            match &self.slots[index] {
                Slot::Live {
                    hash: slot_hash,
                    next,
                    value: candidate,
                } => {
                    if *slot_hash == hash && self.comparer.equals(candidate, value) {
                        return Some(index);
                    }
                    cursor = *next;
                }
                Slot::Free { .. } => break,
            }
        }
        None
    }

    /// Finds the chain predecessor of live slot `index` and unlinks it.
    fn remove_slot(&mut self, index: usize) -> T {
        let hash = match &self.slots[index] {
            Slot::Live { hash, .. } => *hash,
            Slot::Free { .. } => unreachable!("slot {index} is not live"),
        };
        let bucket = self.bucket_of(hash);
        let mut previous = None;
        let mut cursor = self.buckets[bucket].checked_sub(1);
        while let Some(current) = cursor {
            if current == index {
                break;
            }
            previous = Some(current);
            cursor = self.slots[current].next();
        }
        self.unlink(bucket, previous, index)
    }

    /// Rebuilds the bucket array with `size` buckets for the current slots.
    fn rehash(&mut self, size: usize) {
        tracing::trace!(from = self.buckets.len(), to = size, "rehashing hash set");
        let mut buckets = vec![0_usize; size];
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if let Slot::Live { hash, next, .. } = slot {
                let bucket = *hash as usize % size;
                *next = buckets[bucket].checked_sub(1);
                buckets[bucket] = index + 1;
            }
        }
        self.buckets = buckets;
        self.slots.reserve_exact(size - self.slots.len());
    }

    fn increase_capacity(&mut self) {
        let size = prime::expand_prime(self.count);
        self.rehash(size);
    }

    /// Adds `value`. Returns `false` if an equal element was already present.
    pub fn add(&mut self, value: T) -> bool {
        if self.buckets.is_empty() {
            self.initialize(0);
        }
        if self.find_slot(&value).is_some() {
            return false;
        }
        let hash = self.hash_of(&value);
        let index = if let Some(free) = self.free_list {
            self.free_list = self.slots[free].next();
            self.free_count -= 1;
            free
        } else {
            if self.slots.len() == self.buckets.len() {
                self.increase_capacity();
            }
            self.slots.push(Slot::Free { next: None });
            self.slots.len() - 1
        };
        let bucket = self.bucket_of(hash);
        self.slots[index] = Slot::Live {
            hash,
            next: self.buckets[bucket].checked_sub(1),
            value,
        };
        self.buckets[bucket] = index + 1;
        self.count += 1;
        self.bump_version();
        true
    }

    /// Returns `true` if an element equal to `value` is present.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.find_slot(value).is_some()
    }

    /// Returns the stored element equal to `value`.
    #[must_use]
    pub fn get(&self, value: &T) -> Option<&T> {
        self.find_slot(value)
            .and_then(|index| self.slots[index].value())
    }

    /// Removes the element equal to `value`. Returns `false` if absent.
    pub fn remove(&mut self, value: &T) -> bool {
        self.take(value).is_some()
    }

    /// Removes and returns the element equal to `value`.
    pub fn take(&mut self, value: &T) -> Option<T> {
        if self.buckets.is_empty() {
            return None;
        }
        let hash = self.hash_of(value);
        let bucket = self.bucket_of(hash);
        let mut previous = None;
        let mut cursor = self.buckets[bucket].checked_sub(1);
        while let Some(index) = cursor {
            match &self.slots[index] {
                Slot::Live {
                    hash: slot_hash,
                    next,
                    value: candidate,
                } => {
                    if *slot_hash == hash && self.comparer.equals(candidate, value) {
                        return Some(self.unlink(bucket, previous, index));
                    }
                    previous = Some(index);
                    cursor = *next;
                }
                Slot::Free { .. } => break,
            }
        }
        None
    }

    /// Keeps only the elements for which `predicate` returns `true` and
    /// returns how many were removed.
    pub fn retain<P>(&mut self, mut predicate: P) -> usize
    where
        P: FnMut(&T) -> bool,
    {
        let before = self.count;
        let mut index = 0;
        while index < self.slots.len() {
            let doomed = self.slots[index]
                .value()
                .is_some_and(|value| !predicate(value));
            if doomed {
                self.remove_slot(index);
            }
            index += 1;
        }
        before - self.count
    }

    /// Rebuilds the set into a table sized to the next prime at or above
    /// `len()`, dropping free-list gaps.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flatcoll::hashset::OpenHashSet;
    ///
    /// let mut set: OpenHashSet<i32> = (0..100).collect();
    /// set.retain(|value| *value < 5);
    /// assert_eq!(set.free_count(), 95);
    ///
    /// set.trim_excess();
    /// assert_eq!(set.free_count(), 0);
    /// assert_eq!(set.capacity(), 7);
    /// ```
    pub fn trim_excess(&mut self) {
        if self.count == 0 {
            self.buckets = Vec::new();
            self.slots = Vec::new();
            self.free_list = None;
            self.free_count = 0;
            self.bump_version();
            return;
        }
        let size = prime::next_prime(self.count);
        let mut slots = Vec::with_capacity(size);
        slots.extend(
            std::mem::take(&mut self.slots)
                .into_iter()
                .filter(Slot::is_live),
        );
        self.slots = slots;
        self.free_list = None;
        self.free_count = 0;
        self.rehash(size);
        self.bump_version();
    }

    // =========================================================================
    // Mutating Set Algebra
    // =========================================================================

    /// Adds every element of `other`.
    pub fn union_with<I: IntoIterator<Item = T>>(&mut self, other: I) {
        for value in other {
            self.add(value);
        }
    }

    /// Removes every element that also occurs in `other`.
    pub fn except_with<I, B>(&mut self, other: I)
    where
        I: IntoIterator<Item = B>,
        B: Borrow<T>,
    {
        if self.count == 0 {
            return;
        }
        for value in other {
            self.remove(value.borrow());
        }
    }

    /// Keeps only the elements that also occur in `other`.
    pub fn intersect_with<I, B>(&mut self, other: I)
    where
        I: IntoIterator<Item = B>,
        B: Borrow<T>,
    {
        if self.count == 0 {
            return;
        }
        let mut found = vec![false; self.slots.len()];
        for value in other {
            if let Some(index) = self.find_slot(value.borrow()) {
                found[index] = true;
            }
        }
        self.retain_marked(&found);
    }

    /// Keeps only the elements that also occur in `other`.
    ///
    /// When both sets share the same comparer each element is probed in
    /// `other` directly; otherwise every element is searched for in `other`
    /// using this set's comparer.
    pub fn intersect_with_set(&mut self, other: &Self) {
        if self.count == 0 {
            return;
        }
        if other.is_empty() {
            self.clear();
            return;
        }
        if self.comparer.same_as(&other.comparer) {
            let found: Vec<bool> = self
                .slots
                .iter()
                .map(|slot| slot.value().is_some_and(|value| other.contains(value)))
                .collect();
            self.retain_marked(&found);
        } else {
            let found: Vec<bool> = self
                .slots
                .iter()
                .map(|slot| {
                    slot.value()
                        .is_some_and(|value| self.contains_by_search(other, value))
                })
                .collect();
            self.retain_marked(&found);
        }
    }

    fn retain_marked(&mut self, keep: &[bool]) {
        // Removing the last element truncates `slots`, hence the re-check.
        let mut index = 0;
        while index < self.slots.len() {
            if self.slots[index].is_live() && !keep[index] {
                self.remove_slot(index);
            }
            index += 1;
        }
    }

    /// Element-wise search of `other` under this set's comparer.
    fn contains_by_search(&self, other: &Self, value: &T) -> bool {
        other
            .iter()
            .any(|candidate| self.comparer.equals(candidate, value))
    }

    /// Keeps the elements present in exactly one of `self` and `other`.
    ///
    /// Duplicates within `other` count once.
    pub fn symmetric_except_with<I>(&mut self, other: I)
    where
        I: IntoIterator<Item = T>,
        C: Clone,
    {
        let mut incoming = Self::with_comparer(self.comparer.clone());
        incoming.union_with(other);
        for value in incoming {
            if !self.remove(&value) {
                self.add(value);
            }
        }
    }

    /// Keeps the elements present in exactly one of `self` and `other`.
    pub fn symmetric_except_with_set(&mut self, other: &Self)
    where
        T: Clone,
        C: Clone,
    {
        if self.comparer.same_as(&other.comparer) {
            for value in other {
                if !self.remove(value) {
                    self.add(value.clone());
                }
            }
        } else {
            self.symmetric_except_with(other.iter().cloned());
        }
    }

    // =========================================================================
    // Set Predicates
    // =========================================================================

    /// Counts distinct elements of `self` found in `other` and whether
    /// `other` holds anything `self` lacks.
    fn check_unique_and_unfound<I, B>(&self, other: I, stop_on_unfound: bool) -> (usize, bool)
    where
        I: IntoIterator<Item = B>,
        B: Borrow<T>,
    {
        let mut found = vec![false; self.slots.len()];
        let mut unique = 0;
        let mut unfound = false;
        for value in other {
            match self.find_slot(value.borrow()) {
                Some(index) => {
                    if !found[index] {
                        found[index] = true;
                        unique += 1;
                    }
                }
                None => {
                    unfound = true;
                    if stop_on_unfound {
                        break;
                    }
                }
            }
        }
        (unique, unfound)
    }

    /// Returns `true` if every element of `self` occurs in `other`.
    pub fn is_subset_of<I, B>(&self, other: I) -> bool
    where
        I: IntoIterator<Item = B>,
        B: Borrow<T>,
    {
        if self.count == 0 {
            return true;
        }
        let (unique, _) = self.check_unique_and_unfound(other, false);
        unique == self.count
    }

    /// Returns `true` if every element of `self` occurs in `other` and
    /// `other` holds at least one more.
    pub fn is_proper_subset_of<I, B>(&self, other: I) -> bool
    where
        I: IntoIterator<Item = B>,
        B: Borrow<T>,
    {
        let (unique, unfound) = self.check_unique_and_unfound(other, false);
        unique == self.count && unfound
    }

    /// Returns `true` if every element of `other` occurs in `self`.
    pub fn is_superset_of<I, B>(&self, other: I) -> bool
    where
        I: IntoIterator<Item = B>,
        B: Borrow<T>,
    {
        other
            .into_iter()
            .all(|value| self.contains(value.borrow()))
    }

    /// Returns `true` if every element of `other` occurs in `self` and
    /// `self` holds at least one more.
    pub fn is_proper_superset_of<I, B>(&self, other: I) -> bool
    where
        I: IntoIterator<Item = B>,
        B: Borrow<T>,
    {
        if self.count == 0 {
            return false;
        }
        let (unique, unfound) = self.check_unique_and_unfound(other, true);
        !unfound && unique < self.count
    }

    /// Returns `true` if `self` and `other` share at least one element.
    pub fn overlaps<I, B>(&self, other: I) -> bool
    where
        I: IntoIterator<Item = B>,
        B: Borrow<T>,
    {
        if self.count == 0 {
            return false;
        }
        other
            .into_iter()
            .any(|value| self.contains(value.borrow()))
    }

    /// Returns `true` if `self` and `other` hold the same elements,
    /// ignoring duplicates in `other`.
    pub fn set_equals<I, B>(&self, other: I) -> bool
    where
        I: IntoIterator<Item = B>,
        B: Borrow<T>,
    {
        let (unique, unfound) = self.check_unique_and_unfound(other, true);
        !unfound && unique == self.count
    }

    /// Returns `true` if every element of `self` occurs in `other`.
    ///
    /// With a shared comparer the element counts are compared first and
    /// each element is probed in `other`; otherwise `other` is searched
    /// element by element.
    pub fn is_subset_of_set(&self, other: &Self) -> bool {
        if self.count == 0 {
            return true;
        }
        if self.comparer.same_as(&other.comparer) {
            self.count <= other.count && self.iter().all(|value| other.contains(value))
        } else {
            self.iter()
                .all(|value| self.contains_by_search(other, value))
        }
    }

    /// Returns `true` if `self` is a subset of `other` and `other` holds at
    /// least one more element.
    pub fn is_proper_subset_of_set(&self, other: &Self) -> bool {
        if self.comparer.same_as(&other.comparer) {
            self.count < other.count && self.is_subset_of_set(other)
        } else {
            self.is_subset_of_set(other) && other.iter().any(|value| !self.contains(value))
        }
    }

    /// Returns `true` if every element of `other` occurs in `self`.
    pub fn is_superset_of_set(&self, other: &Self) -> bool {
        if other.count == 0 {
            return true;
        }
        if self.comparer.same_as(&other.comparer) && other.count > self.count {
            return false;
        }
        other.iter().all(|value| self.contains(value))
    }

    /// Returns `true` if `self` is a superset of `other` and holds at least
    /// one more element.
    pub fn is_proper_superset_of_set(&self, other: &Self) -> bool {
        if self.count == 0 {
            return false;
        }
        if self.comparer.same_as(&other.comparer) {
            other.count < self.count && self.is_superset_of_set(other)
        } else {
            self.is_superset_of_set(other)
                && self
                    .iter()
                    .any(|value| !self.contains_by_search(other, value))
        }
    }

    /// Returns `true` if `self` and `other` share at least one element.
    pub fn overlaps_set(&self, other: &Self) -> bool {
        if self.count == 0 || other.count == 0 {
            return false;
        }
        other.iter().any(|value| self.contains(value))
    }

    /// Returns `true` if `self` and `other` hold the same elements.
    pub fn set_equals_set(&self, other: &Self) -> bool {
        if self.comparer.same_as(&other.comparer) {
            self.count == other.count && self.iter().all(|value| other.contains(value))
        } else {
            self.is_subset_of_set(other) && self.is_superset_of_set(other)
        }
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Detached iteration position; see [`OpenHashSet::cursor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetCursor {
    position: usize,
    version: u64,
    instance: u64,
}

/// Borrowing iterator over an [`OpenHashSet`].
pub struct Iter<'a, T> {
    slots: std::slice::Iter<'a, Slot<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if let Some(value) = slot.value() {
                self.remaining -= 1;
                return Some(value);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

/// Owning iterator over an [`OpenHashSet`].
pub struct IntoIter<T> {
    slots: std::vec::IntoIter<Slot<T>>,
    remaining: usize,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if let Slot::Live { value, .. } = slot {
                self.remaining -= 1;
                return Some(value);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T, C> IntoIterator for OpenHashSet<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            slots: self.slots.into_iter(),
            remaining: self.count,
        }
    }
}

impl<'a, T, C> IntoIterator for &'a OpenHashSet<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T, C: Default> Default for OpenHashSet<T, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, C: Clone> Clone for OpenHashSet<T, C> {
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets.clone(),
            slots: self.slots.clone(),
            count: self.count,
            free_list: self.free_list,
            free_count: self.free_count,
            version: self.version,
            instance: next_instance(),
            comparer: self.comparer.clone(),
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for OpenHashSet<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl<T, C: EqualityComparer<T>> PartialEq for OpenHashSet<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.set_equals_set(other)
    }
}

impl<T, C: EqualityComparer<T>> Eq for OpenHashSet<T, C> {}

impl<T, C: EqualityComparer<T> + Default> FromIterator<T> for OpenHashSet<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.union_with(iter);
        set
    }
}

impl<T, C: EqualityComparer<T>> Extend<T> for OpenHashSet<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.union_with(iter);
    }
}

static_assertions::assert_impl_all!(OpenHashSet<String>: Send, Sync, Clone);

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize, C> serde::Serialize for OpenHashSet<T, C> {
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
struct OpenHashSetVisitor<T, C> {
    marker: std::marker::PhantomData<(T, C)>,
}

#[cfg(feature = "serde")]
impl<'de, T, C> serde::de::Visitor<'de> for OpenHashSetVisitor<T, C>
where
    T: serde::Deserialize<'de>,
    C: EqualityComparer<T> + Default,
{
    type Value = OpenHashSet<T, C>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        const MAX_PREALLOCATE: usize = 4096;
        let capacity = seq.size_hint().unwrap_or(0).min(MAX_PREALLOCATE);
        let mut set = OpenHashSet::with_capacity(capacity);
        while let Some(element) = seq.next_element()? {
            set.add(element);
        }
        Ok(set)
    }
}

#[cfg(feature = "serde")]
impl<'de, T, C> serde::Deserialize<'de> for OpenHashSet<T, C>
where
    T: serde::Deserialize<'de>,
    C: EqualityComparer<T> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(OpenHashSetVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    /// Integers equal modulo `modulus`; comparers with different moduli are
    /// not interchangeable.
    #[derive(Debug, Clone, Copy)]
    struct ModuloComparer {
        modulus: i32,
    }

    impl EqualityComparer<i32> for ModuloComparer {
        fn hash(&self, value: &i32) -> u64 {
            u64::from(value.rem_euclid(self.modulus).unsigned_abs())
        }

        fn equals(&self, left: &i32, right: &i32) -> bool {
            left.rem_euclid(self.modulus) == right.rem_euclid(self.modulus)
        }

        fn same_as(&self, other: &Self) -> bool {
            self.modulus == other.modulus
        }
    }

    /// Every value hashes alike, forcing one long chain.
    #[derive(Debug, Clone, Copy, Default)]
    struct CollidingComparer;

    impl EqualityComparer<i32> for CollidingComparer {
        fn hash(&self, _value: &i32) -> u64 {
            7
        }

        fn equals(&self, left: &i32, right: &i32) -> bool {
            left == right
        }

        fn same_as(&self, _other: &Self) -> bool {
            true
        }
    }

    fn modulo_set(modulus: i32, values: &[i32]) -> OpenHashSet<i32, ModuloComparer> {
        let mut set = OpenHashSet::with_comparer(ModuloComparer { modulus });
        set.union_with(values.iter().copied());
        set
    }

    /// Every live slot is reachable from exactly one bucket chain and every
    /// free slot from the free list.
    fn assert_structure<T, C>(set: &OpenHashSet<T, C>) {
        let mut reached = vec![0_usize; set.slots.len()];
        for &head in &set.buckets {
            let mut cursor = head.checked_sub(1);
            while let Some(index) = cursor {
                assert!(set.slots[index].is_live());
                reached[index] += 1;
                cursor = set.slots[index].next();
            }
        }
        let mut cursor = set.free_list;
        let mut free = 0;
        while let Some(index) = cursor {
            assert!(!set.slots[index].is_live());
            reached[index] += 1;
            free += 1;
            cursor = set.slots[index].next();
        }
        assert!(reached.iter().all(|&count| count == 1));
        assert_eq!(free, set.free_count);
        assert_eq!(set.slots.len() - free, set.count);
        assert!(set.count <= set.capacity());
    }

    // =========================================================================
    // Basic Operations
    // =========================================================================

    #[rstest]
    fn test_add_is_idempotent() {
        let mut set: OpenHashSet<i32> = OpenHashSet::new();
        assert!(set.add(1));
        assert!(!set.add(1));
        assert!(set.add(2));
        assert_eq!(set.len(), 2);
        assert!(set.contains(&1));
        assert!(!set.contains(&3));
        assert_structure(&set);
    }

    #[rstest]
    fn test_first_add_allocates_smallest_prime() {
        let mut set: OpenHashSet<i32> = OpenHashSet::new();
        assert_eq!(set.capacity(), 0);
        set.add(1);
        assert_eq!(set.capacity(), 3);
    }

    #[rstest]
    fn test_growth_follows_expand_prime() {
        let mut set: OpenHashSet<i32> = OpenHashSet::new();
        for value in 0..4 {
            set.add(value);
        }
        assert_eq!(set.capacity(), 7);
        for value in 4..8 {
            set.add(value);
        }
        assert_eq!(set.capacity(), 17);
        assert_structure(&set);
    }

    #[rstest]
    fn test_remove_pushes_free_list_and_reuses_slot() {
        let mut set: OpenHashSet<i32> = (0..5).collect();
        assert!(set.remove(&2));
        assert!(!set.contains(&2));
        assert_eq!(set.free_count(), 1);
        assert!(!set.slots()[2].is_live());
        assert_structure(&set);

        set.add(42);
        assert_eq!(set.free_count(), 0);
        assert_eq!(set.slots()[2].value(), Some(&42));
        assert_structure(&set);
    }

    #[rstest]
    fn test_remove_last_element_resets_slots() {
        let mut set: OpenHashSet<i32> = (0..3).collect();
        for value in 0..3 {
            set.remove(&value);
        }
        assert!(set.is_empty());
        assert!(set.slots().is_empty());
        assert_eq!(set.free_count(), 0);
        assert!(set.buckets().iter().all(|&head| head == 0));
    }

    #[rstest]
    fn test_remove_releases_value() {
        let shared = std::rc::Rc::new(5);
        let mut set: OpenHashSet<std::rc::Rc<i32>> = OpenHashSet::new();
        set.add(std::rc::Rc::clone(&shared));
        set.add(std::rc::Rc::new(6));
        assert_eq!(std::rc::Rc::strong_count(&shared), 2);
        set.remove(&shared);
        assert_eq!(std::rc::Rc::strong_count(&shared), 1);
    }

    #[rstest]
    fn test_collisions_chain_and_unlink() {
        let mut set: OpenHashSet<i32, CollidingComparer> = OpenHashSet::new();
        for value in 0..10 {
            set.add(value);
        }
        assert_structure(&set);
        for value in [0, 9, 5] {
            assert!(set.remove(&value));
            assert_structure(&set);
        }
        let mut remaining: Vec<i32> = set.iter().copied().collect();
        remaining.sort_unstable();
        assert_eq!(remaining, vec![1, 2, 3, 4, 6, 7, 8]);
    }

    #[rstest]
    fn test_get_and_take() {
        let mut set: OpenHashSet<String> = OpenHashSet::new();
        set.add("alpha".to_string());
        assert_eq!(set.get(&"alpha".to_string()).map(String::as_str), Some("alpha"));
        assert_eq!(set.take(&"alpha".to_string()), Some("alpha".to_string()));
        assert_eq!(set.take(&"alpha".to_string()), None);
    }

    #[rstest]
    fn test_trim_excess_compacts() {
        let mut set: OpenHashSet<i32> = (0..50).collect();
        set.retain(|value| value % 10 == 0);
        assert_eq!(set.len(), 5);
        set.trim_excess();
        assert_eq!(set.capacity(), 7);
        assert_eq!(set.slots().len(), 5);
        assert_structure(&set);
        for value in [0, 10, 20, 30, 40] {
            assert!(set.contains(&value));
        }
        set.clear();
        set.trim_excess();
        assert_eq!(set.capacity(), 0);
    }

    #[rstest]
    fn test_clear() {
        let mut set: OpenHashSet<i32> = (0..10).collect();
        let capacity = set.capacity();
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.capacity(), capacity);
        assert!(!set.contains(&1));
        assert!(set.add(1));
    }

    // =========================================================================
    // Cursor
    // =========================================================================

    #[rstest]
    fn test_cursor_walks_all_elements() {
        let set: OpenHashSet<i32> = (0..5).collect();
        let mut cursor = set.cursor();
        let mut seen = Vec::new();
        while let Ok(Some(value)) = set.advance(&mut cursor) {
            seen.push(*value);
        }
        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
    }

    #[rstest]
    fn test_cursor_invalidated_by_remove() {
        let mut set: OpenHashSet<i32> = (0..5).collect();
        let mut cursor = set.cursor();
        assert_eq!(set.advance(&mut cursor), Ok(Some(&0)));
        let version = set.version();
        set.remove(&3);
        assert_eq!(
            set.advance(&mut cursor),
            Err(IterationError::Invalidated {
                expected: version,
                found: version + 1,
            })
        );
    }

    #[rstest]
    fn test_cursor_rejected_by_clone_at_same_version() {
        let set: OpenHashSet<i32> = (0..5).collect();
        let copy = set.clone();
        assert_eq!(copy.version(), set.version());

        let mut cursor = set.cursor();
        assert_eq!(copy.advance(&mut cursor), Err(IterationError::ForeignCursor));
        assert_eq!(set.advance(&mut cursor), Ok(Some(&0)));

        let other: OpenHashSet<i32> = (0..5).collect();
        assert_eq!(other.advance(&mut cursor), Err(IterationError::ForeignCursor));
    }

    #[rstest]
    fn test_failed_mutations_keep_version() {
        let mut set: OpenHashSet<i32> = (0..5).collect();
        let version = set.version();
        set.add(1);
        set.remove(&99);
        assert_eq!(set.version(), version);
    }

    // =========================================================================
    // Set Algebra
    // =========================================================================

    #[rstest]
    fn test_union_then_superset() {
        let mut set: OpenHashSet<i32> = [1, 2].into_iter().collect();
        let other: OpenHashSet<i32> = [2, 3, 4].into_iter().collect();
        set.union_with(other.iter().copied());
        assert!(set.is_superset_of_set(&other));
        assert!(set.is_proper_superset_of_set(&other));
        assert!(other.is_proper_subset_of_set(&set));
    }

    #[rstest]
    fn test_intersect_with_iter() {
        let mut set: OpenHashSet<i32> = (0..10).collect();
        set.intersect_with([3, 5, 5, 11]);
        assert!(set.set_equals([3, 5]));
        assert_structure(&set);
    }

    #[rstest]
    fn test_intersect_with_empty_set_clears() {
        let mut set: OpenHashSet<i32> = (0..10).collect();
        set.intersect_with_set(&OpenHashSet::new());
        assert!(set.is_empty());
    }

    #[rstest]
    fn test_except_with() {
        let mut set: OpenHashSet<i32> = (0..5).collect();
        let other: OpenHashSet<i32> = [1, 3, 7].into_iter().collect();
        set.except_with(&other);
        assert!(set.set_equals([0, 2, 4]));
    }

    #[rstest]
    fn test_symmetric_except_with_duplicates_in_other() {
        let mut set: OpenHashSet<i32> = [1, 2, 3].into_iter().collect();
        set.symmetric_except_with([3, 4, 4]);
        assert!(set.set_equals([1, 2, 4]));
    }

    #[rstest]
    #[case(&[], &[1], true, true)]
    #[case(&[1, 2], &[1, 2], true, false)]
    #[case(&[1, 2], &[1, 2, 3], true, true)]
    #[case(&[1, 4], &[1, 2, 3], false, false)]
    fn test_subset_predicates(
        #[case] left: &[i32],
        #[case] right: &[i32],
        #[case] subset: bool,
        #[case] proper: bool,
    ) {
        let left_set: OpenHashSet<i32> = left.iter().copied().collect();
        let right_set: OpenHashSet<i32> = right.iter().copied().collect();
        assert_eq!(left_set.is_subset_of_set(&right_set), subset);
        assert_eq!(left_set.is_subset_of(right), subset);
        assert_eq!(left_set.is_proper_subset_of_set(&right_set), proper);
        assert_eq!(left_set.is_proper_subset_of(right), proper);
        assert_eq!(right_set.is_superset_of_set(&left_set), subset);
        assert_eq!(right_set.is_superset_of(left), subset);
        assert_eq!(right_set.is_proper_superset_of_set(&left_set), proper);
        assert_eq!(right_set.is_proper_superset_of(left), proper);
    }

    #[rstest]
    fn test_overlaps() {
        let set: OpenHashSet<i32> = (0..3).collect();
        assert!(set.overlaps([2, 9]));
        assert!(!set.overlaps([7, 9]));
        let other: OpenHashSet<i32> = [2].into_iter().collect();
        assert!(set.overlaps_set(&other));
        assert!(!OpenHashSet::<i32>::new().overlaps_set(&other));
    }

    #[rstest]
    fn test_set_equals_ignores_order_and_duplicates() {
        let set: OpenHashSet<i32> = [3, 1, 2].into_iter().collect();
        assert!(set.set_equals([1, 2, 3, 3]));
        assert!(!set.set_equals([1, 2]));
        assert!(!set.set_equals([1, 2, 3, 4]));
        let other: OpenHashSet<i32> = (1..=3).collect();
        assert_eq!(set, other);
    }

    // =========================================================================
    // Mismatched Comparers
    // =========================================================================

    #[rstest]
    fn test_intersect_with_set_different_comparers() {
        let mut set = modulo_set(10, &[1, 2, 3]);
        let other = modulo_set(5, &[6, 8]);
        set.intersect_with_set(&other);
        let mut remaining: Vec<i32> = set.iter().copied().collect();
        remaining.sort_unstable();
        assert_eq!(remaining, Vec::<i32>::new());

        let mut set = modulo_set(10, &[1, 2, 3]);
        let other = modulo_set(5, &[11, 3]);
        set.intersect_with_set(&other);
        let mut remaining: Vec<i32> = set.iter().copied().collect();
        remaining.sort_unstable();
        assert_eq!(remaining, vec![1, 3]);
    }

    #[rstest]
    fn test_subset_with_different_comparers() {
        let small = modulo_set(10, &[1, 2]);
        let large = modulo_set(3, &[11, 12, 4]);
        assert!(small.is_subset_of_set(&large));
        assert!(small.is_proper_subset_of_set(&large));
        assert!(large.is_superset_of_set(&small));
        assert!(!small.set_equals_set(&large));
    }

    #[rstest]
    fn test_same_comparer_detection() {
        let first = modulo_set(10, &[1]);
        let second = modulo_set(10, &[11]);
        assert!(first.comparer().same_as(second.comparer()));
        assert!(first.set_equals_set(&second));
    }

    #[rstest]
    fn test_from_config_rejects_oversized_capacity() {
        let config = HashSetConfig::new().with_capacity(usize::MAX);
        assert!(OpenHashSet::<i32>::from_config(config).is_err());
    }
}
