//! Construction-time configuration.
//!
//! Containers are created with an explicit or default initial capacity.
//! [`ListConfig`] additionally selects the change-notification mode and the
//! [`BoundsPolicy`] applied to out-of-range indices. With the `serde`
//! feature enabled both configs can be loaded from a host application's own
//! configuration files.
//!
//! # Examples
//!
//! ```rust
//! use flatcoll::config::{BoundsPolicy, ListConfig};
//! use flatcoll::list::ArrayList;
//!
//! let config = ListConfig::new()
//!     .with_capacity(32)
//!     .with_notify(true)
//!     .with_bounds(BoundsPolicy::Lenient);
//!
//! let list: ArrayList<u32> = ArrayList::from_config(config);
//! assert_eq!(list.capacity(), 32);
//! assert!(list.is_notify());
//! ```

use crate::error::{CapacityError, IndexError};
use crate::hashset::prime;

/// Capacity used when none is given.
pub const DEFAULT_CAPACITY: usize = 8;

// =============================================================================
// BoundsPolicy
// =============================================================================

/// What to do when an operation receives an index outside the live range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BoundsPolicy {
    /// Log the misuse at error level and leave the container untouched.
    #[default]
    Lenient,
    /// Panic with the [`IndexError`] message.
    Strict,
}

impl BoundsPolicy {
    /// Applies the policy to a rejected index and hands the error back.
    ///
    /// # Panics
    ///
    /// Panics under [`BoundsPolicy::Strict`].
    #[track_caller]
    pub(crate) fn reject(self, error: IndexError) -> IndexError {
        match self {
            Self::Lenient => {
                tracing::error!(
                    operation = error.operation,
                    index = error.index,
                    len = error.len,
                    "index out of range, ignoring call"
                );
                error
            }
            Self::Strict => panic!("{error}"),
        }
    }
}

// =============================================================================
// ListConfig
// =============================================================================

/// Configuration for [`ArrayList`](crate::list::ArrayList) and the
/// containers built on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ListConfig {
    /// Initial capacity of the backing buffer.
    pub capacity: usize,
    /// Whether change notifications are raised.
    pub notify: bool,
    /// Handling of out-of-range indices.
    pub bounds: BoundsPolicy,
}

impl ListConfig {
    /// Returns the default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            notify: false,
            bounds: BoundsPolicy::Lenient,
        }
    }

    /// Sets the initial capacity.
    #[must_use]
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Enables or disables change notifications.
    #[must_use]
    pub const fn with_notify(mut self, notify: bool) -> Self {
        self.notify = notify;
        self
    }

    /// Sets the bounds policy.
    #[must_use]
    pub const fn with_bounds(mut self, bounds: BoundsPolicy) -> Self {
        self.bounds = bounds;
        self
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// HashSetConfig
// =============================================================================

/// Configuration for [`OpenHashSet`](crate::hashset::OpenHashSet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HashSetConfig {
    /// Minimum number of slots; rounded up to the next table prime.
    pub capacity: usize,
}

impl HashSetConfig {
    /// Returns the default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self { capacity: 0 }
    }

    /// Sets the minimum capacity.
    #[must_use]
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Checks that the capacity can be served by the prime table.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError::Overflow`] if no table size can hold
    /// `capacity` slots.
    pub const fn validate(&self) -> Result<(), CapacityError> {
        if self.capacity > prime::MAX_PRIME_CAPACITY {
            return Err(CapacityError::Overflow {
                requested: self.capacity,
                maximum: prime::MAX_PRIME_CAPACITY,
            });
        }
        Ok(())
    }
}

impl Default for HashSetConfig {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_list_config_deserialize_partial() {
        let config: ListConfig = serde_json::from_str(r#"{"notify": true}"#).unwrap();
        assert_eq!(config.capacity, DEFAULT_CAPACITY);
        assert!(config.notify);
    }

    #[rstest]
    fn test_bounds_policy_snake_case() {
        let json = serde_json::to_string(&BoundsPolicy::Strict).unwrap();
        assert_eq!(json, r#""strict""#);
    }
}
