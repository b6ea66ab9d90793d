//! Error types for the containers.
//!
//! Nothing in this crate fails for capacity reasons: every container grows
//! on demand. The errors here describe misuse that the containers tolerate
//! (an out-of-range index is logged and ignored) or detect (a hash-set cursor
//! that outlived a structural change).

use thiserror::Error;

/// An index did not address a live element.
///
/// Returned by index-checked mutations such as
/// [`ArrayList::remove_at`](crate::list::ArrayList::remove_at). Under the
/// default [`BoundsPolicy::Lenient`](crate::config::BoundsPolicy::Lenient)
/// the operation has already been logged and skipped when this is returned,
/// so callers that rely on "bad input does nothing" may simply ignore it.
///
/// # Examples
///
/// ```rust
/// use flatcoll::error::IndexError;
///
/// let error = IndexError::new("remove_at", 7, 3);
/// assert_eq!(
///     error.to_string(),
///     "remove_at: index 7 is out of range for length 3"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{operation}: index {index} is out of range for length {len}")]
pub struct IndexError {
    /// Name of the operation that rejected the index.
    pub operation: &'static str,
    /// The offending index.
    pub index: usize,
    /// Number of live elements at the time of the call.
    pub len: usize,
}

impl IndexError {
    /// Creates a new `IndexError`.
    #[inline]
    #[must_use]
    pub const fn new(operation: &'static str, index: usize, len: usize) -> Self {
        Self {
            operation,
            index,
            len,
        }
    }
}

/// A detached cursor observed a structural change of its container.
///
/// # Examples
///
/// ```rust
/// use flatcoll::hashset::OpenHashSet;
/// use flatcoll::error::IterationError;
///
/// let mut set: OpenHashSet<i32> = [1, 2, 3].into_iter().collect();
/// let mut cursor = set.cursor();
/// assert!(set.advance(&mut cursor).is_ok());
///
/// set.add(4);
/// assert!(matches!(
///     set.advance(&mut cursor),
///     Err(IterationError::Invalidated { .. })
/// ));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IterationError {
    /// The container's version stamp changed after the cursor was created.
    #[error("collection was modified during iteration (expected version {expected}, found {found})")]
    Invalidated {
        /// Version recorded when the cursor was created.
        expected: u64,
        /// Version of the container at the time of the step.
        found: u64,
    },
    /// The cursor was created by a different container instance.
    #[error("cursor belongs to another collection")]
    ForeignCursor,
}

/// A requested capacity cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CapacityError {
    /// The capacity exceeds what the prime table (or `usize`) can address.
    #[error("capacity {requested} exceeds the maximum of {maximum}")]
    Overflow {
        /// Requested capacity.
        requested: usize,
        /// Largest supported capacity.
        maximum: usize,
    },
}

/// Unified error type for the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// See [`IndexError`].
    #[error(transparent)]
    Index(#[from] IndexError),
    /// See [`IterationError`].
    #[error(transparent)]
    Iteration(#[from] IterationError),
    /// See [`CapacityError`].
    #[error(transparent)]
    Capacity(#[from] CapacityError),
}
