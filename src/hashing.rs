//! Polynomial rolling hash and the bucket bounds check.

use crate::error::{TableError, TableResult};

const MULTIPLIER: u128 = 31;

/// Bucket index of `text` for a table of `capacity` buckets.
///
/// Folds the UTF-16 code units of `text` as `h = (31 * h + c) % capacity`,
/// reducing at every step so the accumulator stays below `capacity`. The
/// result depends on the capacity, so every index must be recomputed after
/// the table grows.
pub fn rolling_hash(text: &str, capacity: usize) -> usize {
    debug_assert!(capacity > 0, "capacity must be non-zero");
    let modulus = capacity as u128;
    let mut h: u128 = 0;
    for unit in text.encode_utf16() {
        h = (MULTIPLIER * h + u128::from(unit)) % modulus;
    }
    // h < capacity, which is a usize
    h as usize
}

/// Rejects an index that does not address one of `capacity` buckets.
pub fn check_index(index: usize, capacity: usize) -> TableResult<usize> {
    if index < capacity {
        Ok(index)
    } else {
        Err(TableError::IndexOutOfRange { index, capacity })
    }
}
