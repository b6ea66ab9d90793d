//! # flatcoll
//!
//! Array-backed containers with inspectable storage and explicit growth.
//!
//! ## Overview
//!
//! Every container owns one or a few flat arrays and documents exactly when
//! they grow, shrink or reuse slots:
//!
//! - **[`ArrayList`](list::ArrayList)**: growable list that doubles its
//!   capacity, with lenient index handling and change notifications
//! - **[`OpenHashSet`](hashset::OpenHashSet)**: open-chained hash set over
//!   prime-sized buckets, with free-list slot reuse and full set algebra
//! - **[`SparseSet`](sparse::SparseSet)** and
//!   **[`SparseItemSet`](sparse::SparseItemSet)**: dense/sparse integer sets
//!   with O(1) swap-remove
//! - **[`PriorityQueue`](specialized::PriorityQueue)**,
//!   **[`CircularQueue`](specialized::CircularQueue)**,
//!   **[`BoundedStack`](specialized::BoundedStack)**: heap, ring and stack
//!   built on list storage
//!
//! The containers are single-threaded: no locking, no atomics.
//!
//! ## Feature Flags
//!
//! - `shuffle` (default): `ArrayList::shuffle` via `rand`
//! - `serde`: `Serialize`/`Deserialize` for the containers and configs
//! - `fxhash`: `FxComparer` for `OpenHashSet`
//! - `ahash`: `AHashComparer` for `OpenHashSet`
//! - `full`: Enable all features
//!
//! ## Logging
//!
//! Rejected indices are reported through `tracing` at error level; buffer
//! growth and rehashing at trace level. The crate installs no subscriber.
//!
//! ## Example
//!
//! ```rust
//! use flatcoll::prelude::*;
//!
//! let mut list: ArrayList<i32> = (0..9).collect();
//! assert_eq!(list.capacity(), 16);
//!
//! let mut seen: OpenHashSet<i32> = OpenHashSet::new();
//! list.remove_all(|value| !seen.add(*value % 3));
//! assert_eq!(list.as_slice(), &[0, 1, 2]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports the containers, their configuration and error types.
///
/// # Usage
///
/// ```rust
/// use flatcoll::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{BoundsPolicy, HashSetConfig, ListConfig};
    pub use crate::error::{CapacityError, CollectionError, IndexError, IterationError};
    pub use crate::hashset::{EqualityComparer, OpenHashSet};
    pub use crate::list::ArrayList;
    pub use crate::notify::{BoxedObserver, ChangeObserver, CollectionChange, Property};
    pub use crate::sparse::{SparseItemSet, SparseSet};
    pub use crate::specialized::{ArrayStorage, BoundedStack, CircularQueue, PriorityQueue};
}

pub mod config;
pub mod error;
pub mod hashset;
pub mod list;
pub mod notify;
pub mod sparse;
pub mod specialized;
