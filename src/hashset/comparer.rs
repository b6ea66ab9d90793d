//! Equality comparers for [`OpenHashSet`](super::OpenHashSet).
//!
//! A comparer defines what "equal" means for a set: how elements hash and
//! when two of them are the same. Set-algebra fast paths rely on both
//! operands agreeing on that definition, which
//! [`EqualityComparer::same_as`] reports.
//!
//! The built-in comparers wrap deterministic hashers:
//!
//! | Comparer          | Hasher                    | Feature   |
//! |-------------------|---------------------------|-----------|
//! | [`DefaultComparer`] | std `DefaultHasher` (SipHash, zero keys) | - |
//! | `FxComparer`      | `rustc_hash::FxHasher`    | `fxhash`  |
//! | `AHashComparer`   | `ahash` with fixed seeds  | `ahash`   |

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{BuildHasher, BuildHasherDefault, Hash};
use std::marker::PhantomData;

/// Hashing and equality for the elements of a set.
pub trait EqualityComparer<T: ?Sized> {
    /// Hashes `value`. Equal values must produce equal hashes.
    fn hash(&self, value: &T) -> u64;

    /// Returns `true` if `left` and `right` are the same element.
    fn equals(&self, left: &T, right: &T) -> bool;

    /// Returns `true` if `other` defines exactly the same equality.
    fn same_as(&self, other: &Self) -> bool;
}

// =============================================================================
// HashComparer
// =============================================================================

/// Comparer using `Hash` + `Eq` with a stateless hasher builder `S`.
///
/// Every instance of the same `HashComparer<S>` type is interchangeable.
pub struct HashComparer<S = BuildHasherDefault<DefaultHasher>> {
    marker: PhantomData<fn() -> S>,
}

/// `Hash` + `Eq` with the standard library's SipHash.
pub type DefaultComparer = HashComparer<BuildHasherDefault<DefaultHasher>>;

/// `Hash` + `Eq` with `FxHasher`.
#[cfg(feature = "fxhash")]
pub type FxComparer = HashComparer<rustc_hash::FxBuildHasher>;

/// `Hash` + `Eq` with `ahash` under fixed seeds.
#[cfg(feature = "ahash")]
pub type AHashComparer = HashComparer<FixedAHashBuilder>;

impl<S> HashComparer<S> {
    /// Creates the comparer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            marker: PhantomData,
        }
    }
}

impl<T, S> EqualityComparer<T> for HashComparer<S>
where
    T: Hash + Eq + ?Sized,
    S: BuildHasher + Default,
{
    #[inline]
    fn hash(&self, value: &T) -> u64 {
        S::default().hash_one(value)
    }

    #[inline]
    fn equals(&self, left: &T, right: &T) -> bool {
        left == right
    }

    #[inline]
    fn same_as(&self, _other: &Self) -> bool {
        true
    }
}

impl<S> Default for HashComparer<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Clone for HashComparer<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for HashComparer<S> {}

impl<S> fmt::Debug for HashComparer<S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("HashComparer")
    }
}

// =============================================================================
// Fixed-seed ahash
// =============================================================================

/// `ahash` builder with compile-time seeds, so every instance hashes alike.
#[cfg(feature = "ahash")]
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedAHashBuilder;

#[cfg(feature = "ahash")]
impl BuildHasher for FixedAHashBuilder {
    type Hasher = ahash::AHasher;

    fn build_hasher(&self) -> Self::Hasher {
        const SEEDS: [u64; 4] = [
            0x243F_6A88_85A3_08D3,
            0x1319_8A2E_0370_7344,
            0xA409_3822_299F_31D0,
            0x082E_FA98_EC4E_6C89,
        ];
        ahash::RandomState::with_seeds(SEEDS[0], SEEDS[1], SEEDS[2], SEEDS[3]).build_hasher()
    }
}
