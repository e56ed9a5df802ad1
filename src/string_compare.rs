// Copyright (c) 2025-present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! # Ordinal String Comparison
//!
//! Exact and ordinal-ignore-case comparison of UTF-16 code unit slices. These
//! routines are the last-mile check after the Teddy prefix filter and the
//! whole engine of the single-needle and fallback searchers, so every search
//! strategy agrees on what "equal" means.
//!
//! ## Ignore-Case Semantics
//!
//! Two code units are equal when their [ordinal uppercase] forms are equal.
//! When *both* inputs hold a well-formed surrogate pair at the same offset,
//! the pairs are uppercased together and compared as one character.
//!
//! [ordinal uppercase]: crate::ordinal_casing::to_upper_ordinal

use std::fmt;

use crate::ordinal_casing::{
    is_high_surrogate, is_low_surrogate, surrogate_to_upper, to_upper_ascii, to_upper_ordinal,
};

/// Returns `true` if `a` and `b` are equal under ordinal ignore-case rules.
///
/// Slices of different length are never equal.
///
/// ```rust
/// use simdneedle::string_compare::equals_ordinal_ignore_case;
///
/// let a: Vec<u16> = "Grüße".encode_utf16().collect();
/// let b: Vec<u16> = "GRÜßE".encode_utf16().collect();
/// assert!(equals_ordinal_ignore_case(&a, &b));
/// ```
pub fn equals_ordinal_ignore_case(a: &[u16], b: &[u16]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let len = a.len();
    let mut i = 0;
    while i < len {
        let (x, y) = (a[i], b[i]);

        // Both ASCII: table lookup only.
        if (x | y) < 0x80 {
            if to_upper_ascii(x) != to_upper_ascii(y) {
                return false;
            }
            i += 1;
            continue;
        }

        if is_high_surrogate(x)
            && is_high_surrogate(y)
            && i + 1 < len
            && is_low_surrogate(a[i + 1])
            && is_low_surrogate(b[i + 1])
        {
            if surrogate_to_upper(x, a[i + 1]) != surrogate_to_upper(y, b[i + 1]) {
                return false;
            }
            i += 2;
            continue;
        }

        if x != y && to_upper_ordinal(x) != to_upper_ordinal(y) {
            return false;
        }
        i += 1;
    }

    true
}

/// Returns `true` if `haystack` begins with `needle` (exact comparison).
#[inline]
pub fn starts_with_ordinal(haystack: &[u16], needle: &[u16]) -> bool {
    haystack.len() >= needle.len() && haystack[..needle.len()] == *needle
}

/// Returns `true` if `haystack` begins with `needle` under ordinal
/// ignore-case rules.
///
/// A haystack shorter than the needle never matches.
#[inline]
pub fn starts_with_ordinal_ignore_case(haystack: &[u16], needle: &[u16]) -> bool {
    haystack.len() >= needle.len() && equals_ordinal_ignore_case(&haystack[..needle.len()], needle)
}

/// Index of the first exact occurrence of `needle` in `haystack`.
///
/// An empty needle matches at offset 0.
///
/// ```rust
/// use simdneedle::string_compare::index_of_ordinal;
///
/// let haystack: Vec<u16> = "xxabcxx".encode_utf16().collect();
/// let needle: Vec<u16> = "abc".encode_utf16().collect();
/// assert_eq!(index_of_ordinal(&haystack, &needle), Some(2));
/// ```
pub fn index_of_ordinal(haystack: &[u16], needle: &[u16]) -> Option<usize> {
    let Some((&first, rest)) = needle.split_first() else {
        return Some(0);
    };
    if haystack.len() < needle.len() {
        return None;
    }

    let last_start = haystack.len() - needle.len();
    let mut pos = 0;
    while pos <= last_start {
        // Skip ahead to the next occurrence of the first unit.
        match haystack[pos..=last_start].iter().position(|&u| u == first) {
            Some(offset) => pos += offset,
            None => return None,
        }
        if haystack[pos + 1..pos + needle.len()] == *rest {
            return Some(pos);
        }
        pos += 1;
    }

    None
}

/// Index of the first ordinal ignore-case occurrence of `needle` in
/// `haystack`.
///
/// An empty needle matches at offset 0.
pub fn index_of_ordinal_ignore_case(haystack: &[u16], needle: &[u16]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    if haystack.len() < needle.len() {
        return None;
    }

    (0..=haystack.len() - needle.len())
        .find(|&pos| equals_ordinal_ignore_case(&haystack[pos..pos + needle.len()], needle))
}

/// Returns `true` if `haystack` begins with `needle`, comparing ASCII letters
/// without regard to case and every other unit exactly.
///
/// Agrees with [`starts_with_ordinal_ignore_case`] whenever `needle` is all
/// ASCII, because no unit outside ASCII has an ordinal uppercase inside it.
#[inline]
pub fn starts_with_ascii_ignore_case(haystack: &[u16], needle: &[u16]) -> bool {
    haystack.len() >= needle.len()
        && haystack
            .iter()
            .zip(needle)
            .all(|(&h, &n)| h == n || to_upper_ascii(h) == to_upper_ascii(n))
}

/// Index of the first occurrence of `needle` in `haystack` under
/// [`starts_with_ascii_ignore_case`] rules.
///
/// An empty needle matches at offset 0.
pub fn index_of_ascii_ignore_case(haystack: &[u16], needle: &[u16]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    if haystack.len() < needle.len() {
        return None;
    }

    (0..=haystack.len() - needle.len())
        .find(|&pos| starts_with_ascii_ignore_case(&haystack[pos..], needle))
}

// ============================================================================
// Compile-Time Case Selection
// ============================================================================

/// How a comparison treats letter case, as reported by matchers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseFolding {
    /// Code units compare exactly.
    Exact,
    /// ASCII letters compare without case, everything else exactly.
    Ascii,
    /// Full ordinal ignore-case comparison.
    Ordinal,
}

impl fmt::Display for CaseFolding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CaseFolding::Exact => "exact",
            CaseFolding::Ascii => "ascii-ignore-case",
            CaseFolding::Ordinal => "ignore-case",
        })
    }
}

/// Case sensitivity chosen at compile time.
///
/// Searchers are generic over this trait so the comparison mode is resolved by
/// monomorphization rather than by a branch inside the scan loop.
pub trait CaseSensitivity: Send + Sync + 'static {
    /// `true` when ASCII letters compare without case.
    const IGNORE_CASE: bool;

    /// The comparison this marker performs.
    const FOLDING: CaseFolding;

    /// Prefix check under this mode.
    fn starts_with(haystack: &[u16], needle: &[u16]) -> bool;

    /// First occurrence under this mode.
    fn index_of(haystack: &[u16], needle: &[u16]) -> Option<usize>;
}

/// Exact code unit comparison.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseSensitive;

/// Ordinal ignore-case comparison.
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreCase;

/// Ignore-case comparison of ASCII letters only. Equivalent to
/// [`IgnoreCase`] for all-ASCII needles and cheaper per unit.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsciiIgnoreCase;

impl CaseSensitivity for CaseSensitive {
    const IGNORE_CASE: bool = false;
    const FOLDING: CaseFolding = CaseFolding::Exact;

    #[inline(always)]
    fn starts_with(haystack: &[u16], needle: &[u16]) -> bool {
        starts_with_ordinal(haystack, needle)
    }

    #[inline]
    fn index_of(haystack: &[u16], needle: &[u16]) -> Option<usize> {
        index_of_ordinal(haystack, needle)
    }
}

impl CaseSensitivity for IgnoreCase {
    const IGNORE_CASE: bool = true;
    const FOLDING: CaseFolding = CaseFolding::Ordinal;

    #[inline(always)]
    fn starts_with(haystack: &[u16], needle: &[u16]) -> bool {
        starts_with_ordinal_ignore_case(haystack, needle)
    }

    #[inline]
    fn index_of(haystack: &[u16], needle: &[u16]) -> Option<usize> {
        index_of_ordinal_ignore_case(haystack, needle)
    }
}

impl CaseSensitivity for AsciiIgnoreCase {
    const IGNORE_CASE: bool = true;
    const FOLDING: CaseFolding = CaseFolding::Ascii;

    #[inline(always)]
    fn starts_with(haystack: &[u16], needle: &[u16]) -> bool {
        starts_with_ascii_ignore_case(haystack, needle)
    }

    #[inline]
    fn index_of(haystack: &[u16], needle: &[u16]) -> Option<usize> {
        index_of_ascii_ignore_case(haystack, needle)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
