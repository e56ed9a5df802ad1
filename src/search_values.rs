// Copyright (c) 2025-present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! # Precompiled Multi-String Search
//!
//! [`StringSearchValues`] analyzes a set of needles once and picks the
//! cheapest matcher that reproduces the naive leftmost search:
//!
//! | Needle set                                         | Strategy              |
//! |----------------------------------------------------|-----------------------|
//! | no needles                                         | `NoValues`            |
//! | contains the empty string                          | `EmptyString`         |
//! | one distinct needle                                | `SingleString`        |
//! | all needles have length >= 2 and ASCII prefixes    | `Teddy`               |
//! | anything else                                      | `MultiStringFallback` |
//!
//! Teddy uses a 3-unit prefix when every needle has at least three units and
//! a 2-unit prefix otherwise. With more than eight needles they are grouped
//! into at most eight buckets.
//!
//! Under ignore-case, Teddy picks its start and verify comparisons
//! separately. The prefix filter matches exactly when no prefix holds an ASCII
//! letter. Candidates are verified with the ASCII-only comparison when every
//! needle is ASCII, and with full ordinal ignore-case otherwise.
//!
//! Needles are deduplicated under the active case mode before analysis, so
//! `["abc", "ABC"]` with ordinal ignore-case compiles to a single-needle
//! search.
//!
//! ## Example
//!
//! ```rust
//! use simdneedle::{CaseFolding, Comparison, StringSearchValues, Strategy};
//!
//! let values = StringSearchValues::new(&["error", "warning", "fatal"], Comparison::OrdinalIgnoreCase)?;
//! assert_eq!(
//!     values.strategy(),
//!     Strategy::Teddy {
//!         prefix_len: 3,
//!         bucketized: false,
//!         start: CaseFolding::Ascii,
//!         verify: CaseFolding::Ascii,
//!     }
//! );
//! assert_eq!(values.index_of_any_str("build: WARNING: unused"), Some(7));
//! assert_eq!(values.index_of_any_str("all good"), None);
//! # Ok::<(), simdneedle::SearchError>(())
//! ```

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

use crate::fallback::{EmptyStringMatcher, MultiStringFallback, NoValuesMatcher, SingleStringSearcher};
use crate::ordinal_casing::to_upper_ordinal_utf16;
use crate::string_compare::{
    AsciiIgnoreCase, CaseFolding, CaseSensitive, CaseSensitivity, IgnoreCase,
};
use crate::teddy_buckets::{MAX_BUCKETS, bucketize, one_per_bucket};
use crate::teddy_scanner::TeddyMatcher;

/// A compiled matcher for one needle set.
///
/// Implementations return the smallest haystack offset at which any needle
/// starts, or `None`.
pub trait MultiStringMatcher: fmt::Debug + Send + Sync {
    fn index_of_any(&self, haystack: &[u16]) -> Option<usize>;
}

/// How needles are compared against the haystack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CaseMode {
    /// Code-unit equality.
    #[default]
    Exact,
    /// Equality after simple ordinal uppercasing of both sides.
    OrdinalIgnoreCase,
}

impl CaseMode {
    pub fn ignores_case(self) -> bool {
        matches!(self, CaseMode::OrdinalIgnoreCase)
    }
}

/// String comparison kinds a caller may request.
///
/// Only the two ordinal kinds are supported; culture-aware kinds are rejected
/// by [`StringSearchValues::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    Ordinal,
    OrdinalIgnoreCase,
    CurrentCulture,
    CurrentCultureIgnoreCase,
    InvariantCulture,
    InvariantCultureIgnoreCase,
}

impl Comparison {
    /// Case mode for the ordinal kinds, `None` for culture-aware ones.
    pub fn case_mode(self) -> Option<CaseMode> {
        match self {
            Comparison::Ordinal => Some(CaseMode::Exact),
            Comparison::OrdinalIgnoreCase => Some(CaseMode::OrdinalIgnoreCase),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Comparison::Ordinal => "ordinal",
            Comparison::OrdinalIgnoreCase => "ordinal-ignore-case",
            Comparison::CurrentCulture => "current-culture",
            Comparison::CurrentCultureIgnoreCase => "current-culture-ignore-case",
            Comparison::InvariantCulture => "invariant-culture",
            Comparison::InvariantCultureIgnoreCase => "invariant-culture-ignore-case",
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Comparison {
    type Err = SearchError;

    /// Parses kebab-case names such as `ordinal-ignore-case`, ignoring ASCII
    /// case and accepting `_` in place of `-`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        [
            Comparison::Ordinal,
            Comparison::OrdinalIgnoreCase,
            Comparison::CurrentCulture,
            Comparison::CurrentCultureIgnoreCase,
            Comparison::InvariantCulture,
            Comparison::InvariantCultureIgnoreCase,
        ]
        .into_iter()
        .find(|c| c.name() == normalized)
        .ok_or_else(|| SearchError::UnknownComparison(s.to_string()))
    }
}

/// The matcher chosen for a needle set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    NoValues,
    EmptyString,
    SingleString,
    /// Teddy prefix filter. `start` is how the filter matches the first
    /// `prefix_len` units and `verify` the comparison candidates are
    /// confirmed with.
    Teddy {
        prefix_len: usize,
        bucketized: bool,
        start: CaseFolding,
        verify: CaseFolding,
    },
    MultiStringFallback,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::NoValues => f.write_str("no values"),
            Strategy::EmptyString => f.write_str("empty string"),
            Strategy::SingleString => f.write_str("single string"),
            Strategy::Teddy {
                prefix_len,
                bucketized,
                start,
                verify,
            } => write!(
                f,
                "teddy (prefix {prefix_len}, {}, start {start}, verify {verify})",
                if *bucketized { "bucketized" } else { "one needle per bucket" }
            ),
            Strategy::MultiStringFallback => f.write_str("multi-string fallback"),
        }
    }
}

// ============================================================================
// Compiled Search Values
// ============================================================================

/// An immutable, precompiled set of needles.
///
/// Safe to share between threads; every search keeps its state on the stack.
#[derive(Debug)]
pub struct StringSearchValues {
    case_mode: CaseMode,
    strategy: Strategy,
    needle_count: usize,
    matcher: Box<dyn MultiStringMatcher>,
}

impl StringSearchValues {
    /// Compiles `needles` for the given comparison kind.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnsupportedComparison`] for culture-aware
    /// comparison kinds.
    pub fn new<S: AsRef<str>>(needles: &[S], comparison: Comparison) -> Result<Self, SearchError> {
        let case_mode = comparison
            .case_mode()
            .ok_or(SearchError::UnsupportedComparison(comparison))?;
        Ok(Self::with_case_mode(needles, case_mode))
    }

    /// Compiles `needles` for an explicit case mode.
    pub fn with_case_mode<S: AsRef<str>>(needles: &[S], case_mode: CaseMode) -> Self {
        let mut units = Vec::with_capacity(needles.len());
        for needle in needles {
            units.push(needle.as_ref().encode_utf16().collect::<Box<[u16]>>());
        }
        Self::compile(units, case_mode)
    }

    /// Compiles needles given as raw UTF-16, which may contain unpaired
    /// surrogates.
    pub fn from_utf16(needles: &[&[u16]], case_mode: CaseMode) -> Self {
        let mut units = Vec::with_capacity(needles.len());
        for needle in needles {
            units.push(Box::<[u16]>::from(*needle));
        }
        Self::compile(units, case_mode)
    }

    fn compile(needles: Vec<Box<[u16]>>, case_mode: CaseMode) -> Self {
        let needles = dedupe(needles, case_mode);
        let needle_count = needles.len();

        let (strategy, matcher) = match case_mode {
            CaseMode::Exact => select::<CaseSensitive>(needles),
            CaseMode::OrdinalIgnoreCase => select::<IgnoreCase>(needles),
        };

        debug!(
            strategy = %strategy,
            needles = needle_count,
            case_mode = ?case_mode,
            "compiled search values"
        );

        Self {
            case_mode,
            strategy,
            needle_count,
            matcher,
        }
    }

    /// Offset of the leftmost needle occurrence in `haystack`.
    ///
    /// When several needles start at the same offset, that offset is
    /// returned regardless of which needle matched.
    #[inline]
    pub fn index_of_any(&self, haystack: &[u16]) -> Option<usize> {
        self.matcher.index_of_any(haystack)
    }

    #[inline]
    pub fn contains_any(&self, haystack: &[u16]) -> bool {
        self.index_of_any(haystack).is_some()
    }

    /// Searches a UTF-8 string. The returned offset counts UTF-16 code units.
    pub fn index_of_any_str(&self, haystack: &str) -> Option<usize> {
        let units: Vec<u16> = haystack.encode_utf16().collect();
        self.index_of_any(&units)
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn case_mode(&self) -> CaseMode {
        self.case_mode
    }

    /// Number of distinct needles after deduplication.
    pub fn len(&self) -> usize {
        self.needle_count
    }

    pub fn is_empty(&self) -> bool {
        self.needle_count == 0
    }
}

// ============================================================================
// Strategy Selection
// ============================================================================

/// Removes later duplicates, comparing uppercase forms under ignore-case.
fn dedupe(needles: Vec<Box<[u16]>>, case_mode: CaseMode) -> Vec<Box<[u16]>> {
    let mut seen: HashSet<Vec<u16>> = HashSet::with_capacity(needles.len());
    let mut unique = Vec::with_capacity(needles.len());

    for needle in needles {
        let key = if case_mode.ignores_case() {
            to_upper_ordinal_utf16(&needle)
        } else {
            needle.to_vec()
        };
        if seen.insert(key) {
            unique.push(needle);
        }
    }

    unique
}

/// Prefix length Teddy would use for `needles`, if it applies.
fn teddy_prefix_len(needles: &[Box<[u16]>]) -> Option<usize> {
    if needles.len() < 2 {
        return None;
    }

    let shortest = needles.iter().map(|n| n.len()).min()?;
    if shortest < 2 {
        return None;
    }
    let prefix_len = shortest.min(3);

    needles
        .iter()
        .all(|n| n[..prefix_len].iter().all(|&u| u < 0x80))
        .then_some(prefix_len)
}

fn select<C: CaseSensitivity>(needles: Vec<Box<[u16]>>) -> (Strategy, Box<dyn MultiStringMatcher>) {
    if needles.is_empty() {
        return (Strategy::NoValues, Box::new(NoValuesMatcher));
    }
    if needles.iter().any(|n| n.is_empty()) {
        return (Strategy::EmptyString, Box::new(EmptyStringMatcher));
    }
    if needles.len() == 1 {
        let needle = needles.into_iter().next().unwrap_or_default();
        return (
            Strategy::SingleString,
            Box::new(SingleStringSearcher::<C>::new(needle)),
        );
    }

    if let Some(prefix_len) = teddy_prefix_len(&needles) {
        let bucketized = needles.len() > MAX_BUCKETS;
        let (start, verify) = teddy_case_folding::<C>(&needles, prefix_len);
        let teddy = build_teddy(needles, prefix_len, bucketized, start, verify);
        return (
            Strategy::Teddy {
                prefix_len,
                bucketized,
                start,
                verify,
            },
            teddy,
        );
    }

    (
        Strategy::MultiStringFallback,
        Box::new(MultiStringFallback::<C>::new(needles)),
    )
}

/// Start and verify comparisons for a Teddy matcher under case mode `C`.
fn teddy_case_folding<C: CaseSensitivity>(
    needles: &[Box<[u16]>],
    prefix_len: usize,
) -> (CaseFolding, CaseFolding) {
    if !C::IGNORE_CASE {
        return (CaseFolding::Exact, CaseFolding::Exact);
    }

    let prefix_has_letter = needles.iter().any(|n| {
        n[..prefix_len]
            .iter()
            .any(|&u| u < 0x80 && (u as u8).is_ascii_alphabetic())
    });
    let all_ascii = needles.iter().all(|n| n.iter().all(|&u| u < 0x80));

    let start = if prefix_has_letter {
        CaseFolding::Ascii
    } else {
        CaseFolding::Exact
    };
    let verify = if all_ascii {
        CaseFolding::Ascii
    } else {
        CaseFolding::Ordinal
    };
    (start, verify)
}

/// Builds the Teddy matcher for needles [`teddy_prefix_len`] accepted.
fn build_teddy(
    needles: Vec<Box<[u16]>>,
    prefix_len: usize,
    bucketized: bool,
    start: CaseFolding,
    verify: CaseFolding,
) -> Box<dyn MultiStringMatcher> {
    use CaseFolding::{Ascii, Exact, Ordinal};

    match (start, verify) {
        // An exact verify only confirms exact prefixes, so an exact filter
        // suffices whatever `start` says.
        (_, Exact) => {
            build_teddy_with::<CaseSensitive, CaseSensitive>(needles, prefix_len, bucketized)
        }
        (Exact, Ascii) => {
            build_teddy_with::<CaseSensitive, AsciiIgnoreCase>(needles, prefix_len, bucketized)
        }
        (Exact, Ordinal) => {
            build_teddy_with::<CaseSensitive, IgnoreCase>(needles, prefix_len, bucketized)
        }
        (_, Ascii) => {
            build_teddy_with::<AsciiIgnoreCase, AsciiIgnoreCase>(needles, prefix_len, bucketized)
        }
        (_, Ordinal) => {
            build_teddy_with::<AsciiIgnoreCase, IgnoreCase>(needles, prefix_len, bucketized)
        }
    }
}

fn build_teddy_with<S: CaseSensitivity, C: CaseSensitivity>(
    needles: Vec<Box<[u16]>>,
    prefix_len: usize,
    bucketized: bool,
) -> Box<dyn MultiStringMatcher> {
    debug_assert!(matches!(prefix_len, 2 | 3), "prefix_len {prefix_len}");

    match (prefix_len, bucketized) {
        (2, false) => Box::new(TeddyMatcher::<S, C, 2, false>::from_eligible(one_per_bucket(
            needles,
        ))),
        (2, true) => Box::new(TeddyMatcher::<S, C, 2, true>::from_eligible(bucketize(
            needles,
            2,
            S::IGNORE_CASE,
        ))),
        (_, false) => Box::new(TeddyMatcher::<S, C, 3, false>::from_eligible(one_per_bucket(
            needles,
        ))),
        (_, true) => Box::new(TeddyMatcher::<S, C, 3, true>::from_eligible(bucketize(
            needles,
            3,
            S::IGNORE_CASE,
        ))),
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Errors raised while configuring a [`StringSearchValues`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Only ordinal comparisons can be precompiled.
    #[error("unsupported comparison kind: {0} (expected ordinal or ordinal-ignore-case)")]
    UnsupportedComparison(Comparison),

    #[error("unknown comparison kind: {0:?}")]
    UnknownComparison(String),
}

// ============================================================================
// Unit Tests
// ============================================================================
