//! Prime table sizes for [`OpenHashSet`](super::OpenHashSet).
//!
//! Bucket counts are always prime so that `hash % buckets` spreads keys well
//! even for hash functions with weak low bits.

/// Largest supported table size (the largest prime below `i32::MAX - 64`).
pub const MAX_PRIME_CAPACITY: usize = 0x7FFF_FFC3;

/// Table sizes roughly 1.2x apart, used before falling back to a search.
const PRIMES: [usize; 72] = [
    3, 7, 11, 17, 23, 29, 37, 47, 59, 71, 89, 107, 131, 163, 197, 239, 293, 353, 431, 521, 631, 761,
    919, 1103, 1327, 1597, 1931, 2333, 2801, 3371, 4049, 4861, 5839, 7013, 8419, 10103, 12143,
    14591, 17519, 21023, 25229, 30293, 36353, 43627, 52361, 62851, 75431, 90523, 108_631, 130_363,
    156_437, 187_751, 225_307, 270_371, 324_449, 389_357, 467_237, 560_689, 672_827, 807_403,
    968_897, 1_162_687, 1_395_263, 1_674_319, 2_009_191, 2_411_033, 2_893_249, 3_471_899,
    4_166_287, 4_999_559, 5_999_471, 7_199_369,
];

/// Returns `true` if `candidate` is prime.
#[must_use]
pub const fn is_prime(candidate: usize) -> bool {
    if candidate < 2 {
        return false;
    }
    if candidate % 2 == 0 {
        return candidate == 2;
    }
    let mut divisor = 3;
    while divisor <= candidate / divisor {
        if candidate % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}

/// Returns the smallest table size that is at least `minimum`.
///
/// # Examples
///
/// ```rust
/// use flatcoll::hashset::prime::next_prime;
///
/// assert_eq!(next_prime(0), 3);
/// assert_eq!(next_prime(8), 11);
/// assert_eq!(next_prime(11), 11);
/// ```
#[must_use]
pub fn next_prime(minimum: usize) -> usize {
    if let Some(&prime) = PRIMES.iter().find(|&&prime| prime >= minimum) {
        return prime;
    }
    let mut candidate = minimum | 1;
    while candidate < MAX_PRIME_CAPACITY {
        if is_prime(candidate) {
            return candidate;
        }
        candidate += 2;
    }
    MAX_PRIME_CAPACITY
}

/// Returns the table size to grow to when `count` slots are exhausted: the
/// next prime at or above `2 * count`, capped at [`MAX_PRIME_CAPACITY`].
#[must_use]
pub fn expand_prime(count: usize) -> usize {
    let doubled = count.saturating_mul(2);
    if doubled > MAX_PRIME_CAPACITY && count < MAX_PRIME_CAPACITY {
        return MAX_PRIME_CAPACITY;
    }
    next_prime(doubled)
}
