// Copyright (c) 2025-present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! # Fallback Searchers
//!
//! Linear searchers used when the Teddy prefix filter does not apply:
//!
//! - [`SingleStringSearcher`]: exactly one needle, searched directly.
//! - [`MultiStringFallback`]: tries every needle at every position. This is
//!   the reference behavior all other strategies must reproduce.
//! - [`EmptyStringMatcher`] and [`NoValuesMatcher`] for the degenerate sets.
//!
//! [`reference_index_of_any`] exposes the naive algorithm directly so tests
//! and the fuzz harness can cross-check compiled matchers against it.

use std::fmt;
use std::marker::PhantomData;

use crate::search_values::{CaseMode, MultiStringMatcher};
use crate::string_compare::{CaseSensitive, CaseSensitivity, IgnoreCase};

// ============================================================================
// Single Needle
// ============================================================================

/// Searches for a single needle under the case mode `C`.
pub struct SingleStringSearcher<C: CaseSensitivity> {
    needle: Box<[u16]>,
    _case: PhantomData<C>,
}

impl<C: CaseSensitivity> SingleStringSearcher<C> {
    pub fn new(needle: Box<[u16]>) -> Self {
        debug_assert!(!needle.is_empty());
        Self {
            needle,
            _case: PhantomData,
        }
    }
}

impl<C: CaseSensitivity> MultiStringMatcher for SingleStringSearcher<C> {
    #[inline]
    fn index_of_any(&self, haystack: &[u16]) -> Option<usize> {
        C::index_of(haystack, &self.needle)
    }
}

impl<C: CaseSensitivity> fmt::Debug for SingleStringSearcher<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingleStringSearcher")
            .field("needle", &String::from_utf16_lossy(&self.needle))
            .field("ignore_case", &C::IGNORE_CASE)
            .finish()
    }
}

// ============================================================================
// Naive Multi-Needle
// ============================================================================

/// Tries every needle at every haystack position, left to right.
pub struct MultiStringFallback<C: CaseSensitivity> {
    needles: Box<[Box<[u16]>]>,
    _case: PhantomData<C>,
}

impl<C: CaseSensitivity> MultiStringFallback<C> {
    pub fn new(needles: Vec<Box<[u16]>>) -> Self {
        Self {
            needles: needles.into_boxed_slice(),
            _case: PhantomData,
        }
    }
}

impl<C: CaseSensitivity> MultiStringMatcher for MultiStringFallback<C> {
    fn index_of_any(&self, haystack: &[u16]) -> Option<usize> {
        naive_index_of_any::<C, _>(haystack, &self.needles)
    }
}

impl<C: CaseSensitivity> fmt::Debug for MultiStringFallback<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiStringFallback")
            .field("needles", &self.needles.len())
            .field("ignore_case", &C::IGNORE_CASE)
            .finish()
    }
}

fn naive_index_of_any<C: CaseSensitivity, N: AsRef<[u16]>>(
    haystack: &[u16],
    needles: &[N],
) -> Option<usize> {
    // `..=` so an empty needle still matches an empty haystack.
    (0..=haystack.len()).find(|&i| {
        let rest = &haystack[i..];
        needles.iter().any(|n| C::starts_with(rest, n.as_ref()))
    })
}

/// Naive leftmost search over an arbitrary needle list.
///
/// This is the semantic reference for [`StringSearchValues`]: for every
/// needle set and haystack, a compiled matcher returns exactly what this
/// function returns.
///
/// ```rust
/// use simdneedle::CaseMode;
/// use simdneedle::fallback::reference_index_of_any;
///
/// let haystack: Vec<u16> = "xbcdxabcx".encode_utf16().collect();
/// let needles: Vec<Vec<u16>> = ["abc", "bcd"]
///     .iter()
///     .map(|s| s.encode_utf16().collect())
///     .collect();
/// assert_eq!(reference_index_of_any(&haystack, &needles, CaseMode::Exact), Some(1));
/// ```
///
/// [`StringSearchValues`]: crate::StringSearchValues
pub fn reference_index_of_any<N: AsRef<[u16]>>(
    haystack: &[u16],
    needles: &[N],
    case_mode: CaseMode,
) -> Option<usize> {
    match case_mode {
        CaseMode::Exact => naive_index_of_any::<CaseSensitive, _>(haystack, needles),
        CaseMode::OrdinalIgnoreCase => naive_index_of_any::<IgnoreCase, _>(haystack, needles),
    }
}

// ============================================================================
// Degenerate Sets
// ============================================================================

/// Needle set containing the empty string: matches at offset 0 of any
/// haystack.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyStringMatcher;

impl MultiStringMatcher for EmptyStringMatcher {
    #[inline]
    fn index_of_any(&self, _haystack: &[u16]) -> Option<usize> {
        Some(0)
    }
}

/// Needle set with no needles: never matches.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoValuesMatcher;

impl MultiStringMatcher for NoValuesMatcher {
    #[inline]
    fn index_of_any(&self, _haystack: &[u16]) -> Option<usize> {
        None
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16(s: &str) -> Box<[u16]> {
        s.encode_utf16().collect()
    }

    fn needles(list: &[&str]) -> Vec<Box<[u16]>> {
        list.iter().map(|s| utf16(s)).collect()
    }

    #[test]
    fn test_single_exact() {
        let searcher = SingleStringSearcher::<CaseSensitive>::new(utf16("abc"));
        assert_eq!(searcher.index_of_any(&utf16("xxabcxx")), Some(2));
        assert_eq!(searcher.index_of_any(&utf16("xxABCxx")), None);
        assert_eq!(searcher.index_of_any(&[]), None);
    }

    #[test]
    fn test_single_ignore_case() {
        let searcher = SingleStringSearcher::<IgnoreCase>::new(utf16("ABC"));
        assert_eq!(searcher.index_of_any(&utf16("xxabcxx")), Some(2));
    }

    #[test]
    fn test_multi_leftmost_wins() {
        let fallback = MultiStringFallback::<CaseSensitive>::new(needles(&["abc", "bcd"]));
        assert_eq!(fallback.index_of_any(&utf16("xbcdxabcx")), Some(1));
    }

    #[test]
    fn test_multi_overlapping_needles() {
        let fallback = MultiStringFallback::<CaseSensitive>::new(needles(&["aaaa", "aaaab"]));
        assert_eq!(fallback.index_of_any(&utf16("aaaab")), Some(0));
    }

    #[test]
    fn test_multi_not_found() {
        let fallback = MultiStringFallback::<IgnoreCase>::new(needles(&["zzz", "yy"]));
        assert_eq!(fallback.index_of_any(&utf16("abc")), None);
    }

    #[test]
    fn test_multi_ignore_case_non_ascii() {
        let fallback = MultiStringFallback::<IgnoreCase>::new(needles(&["ÉTÉ", "x"]));
        assert_eq!(fallback.index_of_any(&utf16("un été")), Some(3));
    }

    #[test]
    fn test_reference_empty_needle_matches_empty_haystack() {
        let list = needles(&[""]);
        assert_eq!(reference_index_of_any(&[], &list, CaseMode::Exact), Some(0));
    }

    #[test]
    fn test_reference_no_needles() {
        let list: Vec<Box<[u16]>> = Vec::new();
        assert_eq!(
            reference_index_of_any(&utf16("abc"), &list, CaseMode::OrdinalIgnoreCase),
            None
        );
    }

    #[test]
    fn test_degenerate_matchers() {
        assert_eq!(EmptyStringMatcher.index_of_any(&[]), Some(0));
        assert_eq!(EmptyStringMatcher.index_of_any(&utf16("abc")), Some(0));
        assert_eq!(NoValuesMatcher.index_of_any(&utf16("abc")), None);
    }
}
