// Copyright (c) 2025-present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! # Teddy Fingerprint Tables
//!
//! Builds the data the Teddy prefix filter runs on:
//!
//! - **Buckets**: groups of needles sharing one bit of an 8-bit mask.
//! - **Fingerprint tables**: for each of the first `N` prefix positions, a
//!   16-entry table indexed by the low nibble of a byte and a 16-entry table
//!   indexed by its high nibble. Each entry is the set of buckets that have
//!   *some* needle with a byte of that nibble at that position.
//!
//! ## Lookup
//!
//! ```text
//! mask(p, b) = low[p][b & 0xF] & high[p][b >> 4]
//! candidate  = mask(0, b0) & mask(1, b1) & ... & mask(N-1, bN-1)
//! ```
//!
//! Splitting a byte into nibbles keeps each table at 16 entries, which is
//! exactly one `pshufb`/`tbl` register. The split means a bucket can match a
//! byte none of its needles contain (its nibbles came from two different
//! needles); those false positives are rejected by verification. A bucket
//! never fails to match a byte one of its needles does contain.
//!
//! ## Example
//!
//! ```rust
//! use simdneedle::teddy_buckets::{bucketize, FingerprintTable};
//!
//! let needles: Vec<Box<[u16]>> = ["foo", "bar"]
//!     .iter()
//!     .map(|s| s.encode_utf16().collect())
//!     .collect();
//! let buckets = bucketize(needles, 3, false);
//! let table = FingerprintTable::<3>::build(&buckets, false);
//!
//! assert_ne!(table.candidate(&[b'f', b'o', b'o']), 0);
//! assert_eq!(table.candidate(&[b'x', b'y', b'z']), 0);
//! ```

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;

/// Number of buckets; one bit each in a `u8` lane.
pub const MAX_BUCKETS: usize = 8;

/// Longest prefix the filter supports.
pub const MAX_PREFIX_LEN: usize = 3;

/// Needles sharing one filter bit.
pub type Bucket = Box<[Box<[u16]>]>;

// ============================================================================
// Bucket Assignment
// ============================================================================

/// Assigns one needle per bucket. Requires at most [`MAX_BUCKETS`] needles.
pub fn one_per_bucket(needles: Vec<Box<[u16]>>) -> Vec<Bucket> {
    debug_assert!(needles.len() <= MAX_BUCKETS);
    needles
        .into_iter()
        .map(|needle| vec![needle].into_boxed_slice())
        .collect()
}

/// Groups needles into at most [`MAX_BUCKETS`] buckets.
///
/// Needles with the same `prefix_len`-unit prefix (compared case-insensitively
/// when `ignore_case` is set) always share a bucket. Prefix groups are then
/// placed largest first into whichever bucket currently holds the fewest
/// needles. Empty buckets are dropped, so the result has between 1 and 8 buckets for
/// any non-empty input.
///
/// Every needle must be at least `prefix_len` units long.
pub fn bucketize(needles: Vec<Box<[u16]>>, prefix_len: usize, ignore_case: bool) -> Vec<Bucket> {
    debug_assert!((1..=MAX_PREFIX_LEN).contains(&prefix_len));

    let mut groups: Vec<Vec<Box<[u16]>>> = Vec::with_capacity(needles.len());
    let mut group_of: HashMap<[u16; MAX_PREFIX_LEN], usize> = HashMap::with_capacity(needles.len());

    for needle in needles {
        let key = prefix_key(&needle, prefix_len, ignore_case);
        match group_of.entry(key) {
            Entry::Occupied(slot) => groups[*slot.get()].push(needle),
            Entry::Vacant(slot) => {
                slot.insert(groups.len());
                groups.push(vec![needle]);
            }
        }
    }

    // Stable sort keeps first-seen order among equal sizes.
    groups.sort_by(|a, b| b.len().cmp(&a.len()));

    let mut buckets: Vec<Vec<Box<[u16]>>> = (0..MAX_BUCKETS).map(|_| Vec::new()).collect();
    for group in groups {
        let target = (0..MAX_BUCKETS)
            .min_by_key(|&b| buckets[b].len())
            .unwrap_or(0);
        buckets[target].extend(group);
    }
    buckets.retain(|bucket| !bucket.is_empty());

    tracing::trace!(
        sizes = ?buckets.iter().map(Vec::len).collect::<Vec<_>>(),
        "assigned needles to buckets"
    );

    buckets.into_iter().map(Vec::into_boxed_slice).collect()
}

fn prefix_key(needle: &[u16], prefix_len: usize, ignore_case: bool) -> [u16; MAX_PREFIX_LEN] {
    let mut key = [0u16; MAX_PREFIX_LEN];
    for (slot, &unit) in key.iter_mut().zip(needle.iter().take(prefix_len)) {
        *slot = if ignore_case && unit < 0x80 {
            (unit as u8).to_ascii_uppercase() as u16
        } else {
            unit
        };
    }
    key
}

// ============================================================================
// Fingerprint Table
// ============================================================================

/// Nibble lookup tables for an `N`-unit prefix filter.
#[derive(Clone, PartialEq, Eq)]
pub struct FingerprintTable<const N: usize> {
    low: [[u8; 16]; N],
    high: [[u8; 16]; N],
}

impl<const N: usize> FingerprintTable<N> {
    /// Builds the tables for `buckets`. Bucket `i` owns bit `1 << i`.
    ///
    /// Every needle must be at least `N` units long with ASCII units in its
    /// first `N` positions. With `ignore_case`, both ASCII cases of every
    /// prefix byte are registered.
    pub fn build(buckets: &[Bucket], ignore_case: bool) -> Self {
        debug_assert!(buckets.len() <= MAX_BUCKETS);

        let mut table = Self {
            low: [[0u8; 16]; N],
            high: [[0u8; 16]; N],
        };

        for (bucket_index, bucket) in buckets.iter().enumerate() {
            let bit = 1u8 << bucket_index;
            for needle in bucket.iter() {
                debug_assert!(needle.len() >= N);
                for (position, &unit) in needle.iter().take(N).enumerate() {
                    debug_assert!(unit < 0x80, "non-ASCII prefix unit {unit:#06x}");
                    let byte = unit as u8;
                    if ignore_case {
                        table.set(position, byte.to_ascii_uppercase(), bit);
                        table.set(position, byte.to_ascii_lowercase(), bit);
                    } else {
                        table.set(position, byte, bit);
                    }
                }
            }
        }

        table
    }

    #[inline]
    fn set(&mut self, position: usize, byte: u8, bit: u8) {
        self.low[position][(byte & 0x0F) as usize] |= bit;
        self.high[position][(byte >> 4) as usize] |= bit;
    }

    /// Buckets that may have `byte` at prefix `position`.
    #[inline(always)]
    pub fn mask(&self, position: usize, byte: u8) -> u8 {
        self.low[position][(byte & 0x0F) as usize] & self.high[position][(byte >> 4) as usize]
    }

    /// Buckets whose prefix may start with `window`.
    #[inline(always)]
    pub fn candidate(&self, window: &[u8; N]) -> u8 {
        let mut mask = 0xFF;
        for (position, &byte) in window.iter().enumerate() {
            mask &= self.mask(position, byte);
        }
        mask
    }

    /// Low-nibble table for `position`.
    pub fn low(&self, position: usize) -> &[u8; 16] {
        &self.low[position]
    }

    /// High-nibble table for `position`.
    pub fn high(&self, position: usize) -> &[u8; 16] {
        &self.high[position]
    }
}

impl<const N: usize> fmt::Debug for FingerprintTable<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("FingerprintTable");
        s.field("prefix_len", &N);
        for position in 0..N {
            s.field("low", &format_args!("{:02X?}", self.low[position]));
            s.field("high", &format_args!("{:02X?}", self.high[position]));
        }
        s.finish()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn needles(list: &[&str]) -> Vec<Box<[u16]>> {
        list.iter().map(|s| s.encode_utf16().collect()).collect()
    }

    fn window<const N: usize>(s: &str) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(&s.as_bytes()[..N]);
        out
    }

    // ========================================================================
    // Bucket Assignment
    // ========================================================================

    #[test]
    fn test_one_per_bucket() {
        let buckets = one_per_bucket(needles(&["abc", "def", "ghi"]));
        assert_eq!(buckets.len(), 3);
        assert!(buckets.iter().all(|b| b.len() == 1));
    }

    #[test]
    fn test_bucketize_never_exceeds_eight() {
        let list: Vec<String> = (0..100).map(|i| format!("n{i:03}x")).collect();
        let refs: Vec<&str> = list.iter().map(String::as_str).collect();
        let buckets = bucketize(needles(&refs), 3, false);

        assert!(!buckets.is_empty() && buckets.len() <= MAX_BUCKETS);
        assert_eq!(buckets.iter().map(|b| b.len()).sum::<usize>(), 100);
    }

    #[test]
    fn test_bucketize_keeps_every_needle_once() {
        let input = needles(&["alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta", "iota", "kappa"]);
        let mut expected: Vec<Box<[u16]>> = input.clone();
        let buckets = bucketize(input, 3, false);

        let mut actual: Vec<Box<[u16]>> = buckets.iter().flat_map(|b| b.iter().cloned()).collect();
        expected.sort();
        actual.sort();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_bucketize_groups_shared_prefixes() {
        let buckets = bucketize(needles(&["abcd", "abce", "xyz1", "ABCf"]), 3, true);

        let bucket_of = |needle: &str| {
            let units: Vec<u16> = needle.encode_utf16().collect();
            buckets
                .iter()
                .position(|b| b.iter().any(|n| **n == *units))
                .expect("needle assigned")
        };
        assert_eq!(bucket_of("abcd"), bucket_of("abce"));
        assert_eq!(bucket_of("abcd"), bucket_of("ABCf"));
        assert_ne!(bucket_of("abcd"), bucket_of("xyz1"));
    }

    #[test]
    fn test_bucketize_spreads_distinct_prefixes() {
        let list: Vec<String> = (0..16).map(|i| format!("{}{}x", (b'a' + i) as char, i)).collect();
        let refs: Vec<&str> = list.iter().map(String::as_str).collect();
        let buckets = bucketize(needles(&refs), 2, false);

        assert_eq!(buckets.len(), MAX_BUCKETS);
        assert!(buckets.iter().all(|b| b.len() == 2));
    }

    // ========================================================================
    // Fingerprint Table
    // ========================================================================

    #[test]
    fn test_table_matches_own_prefixes() {
        let buckets = one_per_bucket(needles(&["foo", "bar", "baz"]));
        let table = FingerprintTable::<3>::build(&buckets, false);

        assert_eq!(table.candidate(&window("foo")), 0b001);
        assert_eq!(table.candidate(&window("bar")) & 0b010, 0b010);
        assert_eq!(table.candidate(&window("baz")) & 0b100, 0b100);
        assert_eq!(table.candidate(&window("FOO")), 0);
    }

    #[test]
    fn test_table_ignore_case_sets_both_variants() {
        let buckets = one_per_bucket(needles(&["Foo", "b@r"]));
        let table = FingerprintTable::<3>::build(&buckets, true);

        for text in ["foo", "FOO", "fOo", "Foo"] {
            assert_eq!(table.candidate(&window(text)) & 1, 1, "{text}");
        }
        assert_eq!(table.candidate(&window("B@R")) & 2, 2);
    }

    #[test]
    fn test_table_non_ascii_marker_never_matches() {
        let buckets = bucketize(needles(&["ab", "cd", "\u{7f}\u{7f}"]), 2, false);
        let table = FingerprintTable::<2>::build(&buckets, false);

        for byte in 0x80..=0xFFu8 {
            assert_eq!(table.mask(0, byte), 0);
            assert_eq!(table.mask(1, byte), 0);
        }
    }

    #[test]
    fn test_table_nibble_false_positive_is_possible() {
        // "a" = 0x61, "r" = 0x72: nibble split also admits 0x62 ('b') and 0x71 ('q').
        let buckets = vec![needles(&["ax", "rx"]).into_boxed_slice()];
        let table = FingerprintTable::<2>::build(&buckets, false);
        assert_eq!(table.candidate(&window("bx")), 1);
    }

    #[test]
    fn test_table_debug_output() {
        let buckets = one_per_bucket(needles(&["ab"]));
        let table = FingerprintTable::<2>::build(&buckets, false);
        let debug = format!("{table:?}");
        assert!(debug.contains("prefix_len: 2"));
    }
}
