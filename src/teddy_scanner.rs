// Copyright (c) 2025-present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! # Teddy Multi-Needle Scanner
//!
//! Vectorized prefix filter for small sets of needles, followed by exact
//! verification of every candidate.
//!
//! ## Algorithm
//!
//! For each block of 16 haystack positions starting at offset `o`:
//!
//! 1. For every prefix position `p < N`, load the 16 code units at `o + p`,
//!    fold them to bytes and look up the bucket mask of each lane in the
//!    nibble tables of [`FingerprintTable`].
//! 2. AND the `N` masks lane-wise. A nonzero lane `i` means some bucket has a
//!    needle whose first `N` units may match at `o + i`.
//! 3. Visit candidate lanes in increasing order and verify every needle of
//!    every hit bucket against the full haystack. The first success is the
//!    leftmost match, because blocks and lanes are visited left to right.
//!
//! Positions that cannot fill a whole block are handled by a scalar loop
//! running the same lookup, AND and verify steps one position at a time.
//!
//! ## Start and Remainder Case
//!
//! A matcher carries two case parameters. `S` decides how the fingerprint
//! tables treat the first `N` units: an ignore-case `S` sets both ASCII
//! cases of every prefix letter. `C` is the comparison that verifies each
//! candidate over the whole needle. The selector picks [`CaseSensitive`]
//! for `S` when no prefix holds a letter, and [`AsciiIgnoreCase`] for `C`
//! when every needle is ASCII.
//!
//! [`CaseSensitive`]: crate::string_compare::CaseSensitive
//! [`AsciiIgnoreCase`]: crate::string_compare::AsciiIgnoreCase
//!
//! ## Folding Code Units to Bytes
//!
//! Only ASCII units can start a Teddy-accelerated needle, so the filter works
//! on bytes. ASCII units (`< 0x80`) keep their value. Every other unit folds
//! to `0x80`, whose high nibble is in no table. No unit outside ASCII has an
//! ordinal uppercase inside it, so the fold is the same in every case mode.
//!
//! ## Platform Support
//!
//! - **x86_64**: SSSE3 (`pshufb`), detected at runtime
//! - **aarch64**: NEON (`tbl`), always available
//! - **Other platforms**: scalar loop
//!
//! Both SIMD paths run one block-scan loop written against the private
//! `Vector` trait; only the trait implementations differ per platform.
//!
//! ## Thread Safety
//!
//! A [`TeddyMatcher`] is immutable after construction; [`TeddyMatcher::find`]
//! keeps all scan state on the stack and can be called from any number of
//! threads at once.

// Allow unsafe operations in unsafe functions (Rust 2024 compatibility)
#![allow(unsafe_op_in_unsafe_fn)]

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

#[cfg(target_arch = "aarch64")]
use std::arch::aarch64::*;

use std::fmt;
use std::marker::PhantomData;

use crate::search_values::MultiStringMatcher;
use crate::string_compare::CaseSensitivity;
use crate::teddy_buckets::{Bucket, FingerprintTable, MAX_BUCKETS, MAX_PREFIX_LEN};

/// Positions examined per SIMD block.
const LANES: usize = 16;

/// Byte every non-ASCII code unit becomes.
const NON_ASCII: u8 = 0x80;

/// Teddy matcher over `N`-unit prefixes.
///
/// - `S` selects how the filter matches the first `N` units.
/// - `C` selects the comparison that verifies candidates.
/// - `N` is the prefix length (2 or 3).
/// - `BUCKETIZED` is `false` when every bucket holds exactly one needle, which
///   lets verification skip the per-bucket loop.
pub struct TeddyMatcher<S, C, const N: usize, const BUCKETIZED: bool>
where
    S: CaseSensitivity,
    C: CaseSensitivity,
{
    table: FingerprintTable<N>,
    buckets: Box<[Bucket]>,
    _case: PhantomData<(S, C)>,
}

impl<S, C, const N: usize, const BUCKETIZED: bool> TeddyMatcher<S, C, N, BUCKETIZED>
where
    S: CaseSensitivity,
    C: CaseSensitivity,
{
    /// Creates a matcher for pre-assigned `buckets`.
    ///
    /// Returns `None` if the buckets cannot be represented by the filter:
    /// no buckets or more than eight, an empty bucket, a bucket with several
    /// needles when `BUCKETIZED` is `false`, a needle shorter than `N`, or a
    /// non-ASCII unit among a needle's first `N`. A case-sensitive `S` paired
    /// with an ignore-case `C` also rejects ASCII letters in the prefix.
    pub fn new(buckets: Vec<Bucket>) -> Option<Self> {
        Self::is_eligible(&buckets).then(|| Self::from_eligible(buckets))
    }

    /// Creates a matcher for buckets the caller has already validated.
    pub(crate) fn from_eligible(buckets: Vec<Bucket>) -> Self {
        debug_assert!(Self::is_eligible(&buckets), "ineligible Teddy buckets");

        let table = FingerprintTable::build(&buckets, S::IGNORE_CASE);
        Self {
            table,
            buckets: buckets.into_boxed_slice(),
            _case: PhantomData,
        }
    }

    fn is_eligible(buckets: &[Bucket]) -> bool {
        if !(2..=MAX_PREFIX_LEN).contains(&N) {
            return false;
        }
        if buckets.is_empty() || buckets.len() > MAX_BUCKETS {
            return false;
        }

        buckets.iter().all(|bucket| {
            !bucket.is_empty()
                && (BUCKETIZED || bucket.len() == 1)
                && bucket.iter().all(|needle| {
                    needle.len() >= N && needle[..N].iter().all(|&u| Self::is_prefix_unit(u))
                })
        })
    }

    /// Whether `unit` can sit in a needle prefix under this `S`/`C` pairing.
    fn is_prefix_unit(unit: u16) -> bool {
        if unit >= 0x80 {
            return false;
        }
        // An exact filter under ignore-case verification would miss the
        // other case of a letter.
        S::IGNORE_CASE || !C::IGNORE_CASE || !(unit as u8).is_ascii_alphabetic()
    }

    /// The fingerprint tables this matcher filters with.
    pub fn table(&self) -> &FingerprintTable<N> {
        &self.table
    }

    /// Number of buckets in use.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Finds the leftmost needle occurrence, using SIMD when available.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use simdneedle::string_compare::CaseSensitive;
    /// use simdneedle::teddy_buckets::one_per_bucket;
    /// use simdneedle::teddy_scanner::TeddyMatcher;
    ///
    /// let needles: Vec<Box<[u16]>> = ["abc", "bcd"]
    ///     .iter()
    ///     .map(|s| s.encode_utf16().collect())
    ///     .collect();
    /// let teddy = TeddyMatcher::<CaseSensitive, CaseSensitive, 3, false>::new(
    ///     one_per_bucket(needles),
    /// )
    /// .unwrap();
    ///
    /// let haystack: Vec<u16> = "xbcdxabcx".encode_utf16().collect();
    /// assert_eq!(teddy.find(&haystack), Some(1));
    /// ```
    pub fn find(&self, haystack: &[u16]) -> Option<usize> {
        #[cfg(target_arch = "x86_64")]
        {
            if is_x86_feature_detected!("ssse3") {
                return unsafe { self.find_ssse3(haystack) };
            }
        }

        #[cfg(target_arch = "aarch64")]
        {
            return unsafe { self.find_neon(haystack) };
        }

        #[allow(unreachable_code)]
        self.find_scalar(haystack)
    }

    /// Scalar-only search. Always agrees with [`find`](Self::find).
    pub fn find_scalar(&self, haystack: &[u16]) -> Option<usize> {
        self.scan_scalar(haystack, 0)
    }

    /// Filter result for the window starting at `position`: the set of
    /// buckets whose needles may start there. Zero when fewer than `N` units
    /// remain.
    pub fn candidate_mask(&self, haystack: &[u16], position: usize) -> u8 {
        if position >= haystack.len() || haystack.len() - position < N {
            return 0;
        }
        let mut window = [0u8; N];
        for (p, byte) in window.iter_mut().enumerate() {
            *byte = fold_unit(haystack[position + p]);
        }
        self.table.candidate(&window)
    }

    // ========================================================================
    // Verification
    // ========================================================================

    /// Checks every needle of every bucket in `mask` at `position`.
    #[inline(always)]
    fn verify(&self, haystack: &[u16], position: usize, mask: u8) -> bool {
        let rest = &haystack[position..];
        let mut bits = mask;
        while bits != 0 {
            let bucket = &self.buckets[bits.trailing_zeros() as usize];
            bits &= bits - 1;

            if BUCKETIZED {
                if bucket.iter().any(|needle| C::starts_with(rest, needle)) {
                    return true;
                }
            } else if C::starts_with(rest, &bucket[0]) {
                return true;
            }
        }
        false
    }

    // ========================================================================
    // Scalar Implementation
    // ========================================================================

    /// Scans every start position from `start` up to the last one with `N`
    /// units remaining.
    fn scan_scalar(&self, haystack: &[u16], start: usize) -> Option<usize> {
        if haystack.len() < N {
            return None;
        }

        let last = haystack.len() - N;
        let mut position = start;
        while position <= last {
            let mut window = [0u8; N];
            for (p, byte) in window.iter_mut().enumerate() {
                *byte = fold_unit(haystack[position + p]);
            }

            let mask = self.table.candidate(&window);
            if mask != 0 && self.verify(haystack, position, mask) {
                return Some(position);
            }
            position += 1;
        }

        None
    }

    // ========================================================================
    // SIMD Block Scan
    // ========================================================================

    /// Block scan shared by every SIMD backend.
    ///
    /// # Safety
    ///
    /// The CPU must support the instructions `V` is implemented with. Only
    /// call from a function carrying the matching `target_feature`.
    #[cfg_attr(
        not(any(target_arch = "x86_64", target_arch = "aarch64")),
        allow(dead_code)
    )]
    #[inline(always)]
    unsafe fn scan_blocks<V: Vector>(&self, haystack: &[u16]) -> Option<usize> {
        let len = haystack.len();
        if len < LANES + N - 1 {
            return self.scan_scalar(haystack, 0);
        }

        let mut low = [V::splat(0); N];
        let mut high = [V::splat(0); N];
        for p in 0..N {
            low[p] = V::load_table(self.table.low(p));
            high[p] = V::load_table(self.table.high(p));
        }

        let ptr = haystack.as_ptr();
        let mut offset = 0;

        // Each iteration reads units offset..offset + LANES + N - 1.
        while offset + LANES + N - 1 <= len {
            let mut candidates = V::splat(0xFF);
            for p in 0..N {
                let bytes = V::load_folded(ptr.add(offset + p));
                candidates = candidates.and(bytes.lookup(low[p], high[p]));
            }

            if !candidates.is_zero() {
                let mut lanes = [0u8; LANES];
                candidates.store(&mut lanes);

                for (lane, &mask) in lanes.iter().enumerate() {
                    if mask != 0 && self.verify(haystack, offset + lane, mask) {
                        return Some(offset + lane);
                    }
                }
            }

            offset += LANES;
        }

        self.scan_scalar(haystack, offset)
    }

    /// SSSE3 block scan.
    ///
    /// # Safety
    ///
    /// Requires SSSE3. Caller must verify via
    /// `is_x86_feature_detected!("ssse3")` before calling.
    #[cfg(target_arch = "x86_64")]
    #[target_feature(enable = "ssse3")]
    unsafe fn find_ssse3(&self, haystack: &[u16]) -> Option<usize> {
        self.scan_blocks::<__m128i>(haystack)
    }

    /// NEON block scan.
    ///
    /// # Safety
    ///
    /// Requires NEON support (always available on ARM64).
    #[cfg(target_arch = "aarch64")]
    #[target_feature(enable = "neon")]
    unsafe fn find_neon(&self, haystack: &[u16]) -> Option<usize> {
        self.scan_blocks::<uint8x16_t>(haystack)
    }
}

impl<S, C, const N: usize, const BUCKETIZED: bool> MultiStringMatcher
    for TeddyMatcher<S, C, N, BUCKETIZED>
where
    S: CaseSensitivity,
    C: CaseSensitivity,
{
    #[inline]
    fn index_of_any(&self, haystack: &[u16]) -> Option<usize> {
        self.find(haystack)
    }
}

impl<S, C, const N: usize, const BUCKETIZED: bool> fmt::Debug for TeddyMatcher<S, C, N, BUCKETIZED>
where
    S: CaseSensitivity,
    C: CaseSensitivity,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TeddyMatcher")
            .field("prefix_len", &N)
            .field("bucketized", &BUCKETIZED)
            .field("start", &S::FOLDING)
            .field("verify", &C::FOLDING)
            .field(
                "bucket_sizes",
                &self.buckets.iter().map(|b| b.len()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

// ============================================================================
// Code Unit Folding
// ============================================================================

/// Folds one UTF-16 code unit to the byte the filter looks up.
#[inline(always)]
fn fold_unit(unit: u16) -> u8 {
    if unit < 0x80 { unit as u8 } else { NON_ASCII }
}

// ============================================================================
// Vector Backends
// ============================================================================

/// A 16-lane byte vector the block scan is written against.
///
/// Methods are `#[inline(always)]` rather than `#[target_feature]`; the two
/// cannot be combined. They inherit the feature set of the `find_*` entry
/// point they are inlined into.
#[cfg_attr(
    not(any(target_arch = "x86_64", target_arch = "aarch64")),
    allow(dead_code)
)]
trait Vector: Copy {
    /// Every lane set to `byte`.
    unsafe fn splat(byte: u8) -> Self;

    /// Loads a 16-entry nibble table.
    unsafe fn load_table(table: &[u8; 16]) -> Self;

    /// Loads 16 code units from `ptr` and folds each to a byte as
    /// [`fold_unit`] does.
    ///
    /// `ptr` must be valid for reading 16 `u16` values.
    unsafe fn load_folded(ptr: *const u16) -> Self;

    /// Looks up every lane's low nibble in `low` and its high nibble in
    /// `high`, and ANDs the two results.
    unsafe fn lookup(self, low: Self, high: Self) -> Self;

    unsafe fn and(self, other: Self) -> Self;

    /// `true` when every lane is zero.
    unsafe fn is_zero(self) -> bool;

    unsafe fn store(self, out: &mut [u8; 16]);
}

#[cfg(target_arch = "x86_64")]
impl Vector for __m128i {
    #[inline(always)]
    unsafe fn splat(byte: u8) -> __m128i {
        _mm_set1_epi8(byte as i8)
    }

    #[inline(always)]
    unsafe fn load_table(table: &[u8; 16]) -> __m128i {
        _mm_loadu_si128(table.as_ptr() as *const __m128i)
    }

    #[inline(always)]
    unsafe fn load_folded(ptr: *const u16) -> __m128i {
        let first = fold_units_sse(_mm_loadu_si128(ptr as *const __m128i));
        let second = fold_units_sse(_mm_loadu_si128(ptr.add(8) as *const __m128i));
        // All folded values are <= 0x80, so unsigned saturation never kicks in.
        _mm_packus_epi16(first, second)
    }

    #[inline(always)]
    unsafe fn lookup(self, low: __m128i, high: __m128i) -> __m128i {
        let nibble_mask = _mm_set1_epi8(0x0F);
        let lo = _mm_and_si128(self, nibble_mask);
        let hi = _mm_and_si128(_mm_srli_epi16(self, 4), nibble_mask);
        _mm_and_si128(_mm_shuffle_epi8(low, lo), _mm_shuffle_epi8(high, hi))
    }

    #[inline(always)]
    unsafe fn and(self, other: __m128i) -> __m128i {
        _mm_and_si128(self, other)
    }

    #[inline(always)]
    unsafe fn is_zero(self) -> bool {
        _mm_movemask_epi8(_mm_cmpeq_epi8(self, _mm_setzero_si128())) == 0xFFFF
    }

    #[inline(always)]
    unsafe fn store(self, out: &mut [u8; 16]) {
        _mm_storeu_si128(out.as_mut_ptr() as *mut __m128i, self);
    }
}

/// Vector form of [`fold_unit`] over eight 16-bit lanes.
#[cfg(target_arch = "x86_64")]
#[inline(always)]
unsafe fn fold_units_sse(units: __m128i) -> __m128i {
    let ascii = _mm_cmpeq_epi16(
        _mm_and_si128(units, _mm_set1_epi16(0xFF80u16 as i16)),
        _mm_setzero_si128(),
    );
    _mm_or_si128(
        _mm_and_si128(ascii, units),
        _mm_andnot_si128(ascii, _mm_set1_epi16(NON_ASCII as i16)),
    )
}

#[cfg(target_arch = "aarch64")]
impl Vector for uint8x16_t {
    #[inline(always)]
    unsafe fn splat(byte: u8) -> uint8x16_t {
        vdupq_n_u8(byte)
    }

    #[inline(always)]
    unsafe fn load_table(table: &[u8; 16]) -> uint8x16_t {
        vld1q_u8(table.as_ptr())
    }

    #[inline(always)]
    unsafe fn load_folded(ptr: *const u16) -> uint8x16_t {
        let first = fold_units_neon(vld1q_u16(ptr));
        let second = fold_units_neon(vld1q_u16(ptr.add(8)));
        vcombine_u8(vmovn_u16(first), vmovn_u16(second))
    }

    #[inline(always)]
    unsafe fn lookup(self, low: uint8x16_t, high: uint8x16_t) -> uint8x16_t {
        let lo = vandq_u8(self, vdupq_n_u8(0x0F));
        let hi = vshrq_n_u8::<4>(self);
        vandq_u8(vqtbl1q_u8(low, lo), vqtbl1q_u8(high, hi))
    }

    #[inline(always)]
    unsafe fn and(self, other: uint8x16_t) -> uint8x16_t {
        vandq_u8(self, other)
    }

    #[inline(always)]
    unsafe fn is_zero(self) -> bool {
        vmaxvq_u8(self) == 0
    }

    #[inline(always)]
    unsafe fn store(self, out: &mut [u8; 16]) {
        vst1q_u8(out.as_mut_ptr(), self);
    }
}

/// Vector form of [`fold_unit`] over eight 16-bit lanes.
#[cfg(target_arch = "aarch64")]
#[inline(always)]
unsafe fn fold_units_neon(units: uint16x8_t) -> uint16x8_t {
    let ascii = vcltq_u16(units, vdupq_n_u16(0x80));
    vbslq_u16(ascii, units, vdupq_n_u16(NON_ASCII as u16))
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::string_compare::{AsciiIgnoreCase, CaseSensitive, IgnoreCase};
    use crate::teddy_buckets::{bucketize, one_per_bucket};

    fn utf16(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    fn needles(list: &[&str]) -> Vec<Box<[u16]>> {
        list.iter().map(|s| s.encode_utf16().collect()).collect()
    }

    type Exact<const N: usize, const B: bool> = TeddyMatcher<CaseSensitive, CaseSensitive, N, B>;

    fn exact3(list: &[&str]) -> Exact<3, false> {
        TeddyMatcher::new(one_per_bucket(needles(list))).expect("eligible needles")
    }

    fn bucketized_ignore_case3(
        list: &[&str],
    ) -> TeddyMatcher<AsciiIgnoreCase, IgnoreCase, 3, true> {
        TeddyMatcher::new(bucketize(needles(list), 3, true)).expect("eligible needles")
    }

    /// Asserts SIMD, scalar and naive answers agree.
    fn check<S: CaseSensitivity, C: CaseSensitivity, const N: usize, const B: bool>(
        teddy: &TeddyMatcher<S, C, N, B>,
        list: &[&str],
        haystack: &[u16],
    ) -> Option<usize> {
        let found = teddy.find(haystack);
        assert_eq!(found, teddy.find_scalar(haystack), "SIMD/scalar mismatch");

        let reference = (0..=haystack.len()).find(|&i| {
            list.iter()
                .any(|n| C::starts_with(&haystack[i..], &utf16(n)))
        });
        assert_eq!(found, reference, "reference mismatch");
        found
    }

    // ========================================================================
    // Construction
    // ========================================================================

    #[test]
    fn test_new_rejects_short_needles() {
        let buckets = one_per_bucket(needles(&["abc", "de"]));
        assert!(Exact::<3, false>::new(buckets).is_none());
    }

    #[test]
    fn test_new_rejects_non_ascii_prefix() {
        let buckets = one_per_bucket(needles(&["abc", "éab"]));
        assert!(Exact::<3, false>::new(buckets).is_none());
    }

    #[test]
    fn test_new_allows_non_ascii_suffix() {
        let buckets = one_per_bucket(needles(&["abcé", "xyz"]));
        assert!(Exact::<3, false>::new(buckets).is_some());
    }

    #[test]
    fn test_new_rejects_shared_bucket_when_not_bucketized() {
        let buckets = vec![needles(&["abc", "abd"]).into_boxed_slice()];
        assert!(Exact::<3, false>::new(buckets.clone()).is_none());
        assert!(Exact::<3, true>::new(buckets).is_some());
    }

    #[test]
    fn test_new_rejects_empty() {
        assert!(Exact::<2, true>::new(Vec::new()).is_none());
    }

    #[test]
    fn test_new_rejects_unsupported_prefix_len() {
        let buckets = one_per_bucket(needles(&["abcd", "efgh"]));
        assert!(Exact::<4, false>::new(buckets.clone()).is_none());
        assert!(Exact::<1, false>::new(buckets).is_none());
    }

    // ========================================================================
    // Scanning
    // ========================================================================

    #[test]
    fn test_find_leftmost() {
        let list = ["abc", "bcd"];
        let teddy = exact3(&list);
        assert_eq!(check(&teddy, &list, &utf16("xbcdxabcx")), Some(1));
    }

    #[test]
    fn test_find_not_found() {
        let list = ["abc", "bcd"];
        let teddy = exact3(&list);
        assert_eq!(check(&teddy, &list, &utf16("")), None);
        assert_eq!(check(&teddy, &list, &utf16("ab")), None);
        assert_eq!(check(&teddy, &list, &utf16("zzzzzzzzzzzzzzzzzzzzzzzzzzzzzz")), None);
    }

    #[test]
    fn test_find_in_every_lane_and_tail() {
        let list = ["needle", "thread"];
        let teddy = exact3(&list);
        for offset in 0..70 {
            let mut text = "-".repeat(offset);
            text.push_str("thread");
            text.push_str(&"-".repeat(5));
            assert_eq!(check(&teddy, &list, &utf16(&text)), Some(offset), "offset {offset}");
        }
    }

    #[test]
    fn test_needle_cut_off_at_end_is_not_a_match() {
        let list = ["abcdef", "zzz"];
        let teddy = exact3(&list);
        for len in 16..40 {
            let mut text = "-".repeat(len);
            text.push_str("abcde");
            assert_eq!(check(&teddy, &list, &utf16(&text)), None);
        }
    }

    #[test]
    fn test_false_positive_rejected() {
        // 'b' shares nibbles with 'a'/'r'; the candidate must fail verification.
        let buckets = vec![needles(&["axx", "rxx"]).into_boxed_slice()];
        let teddy = Exact::<3, true>::new(buckets).expect("eligible");
        let haystack = utf16("bxxbxxbxxbxxbxxbxxbxxrxx");
        assert_ne!(teddy.candidate_mask(&haystack, 0), 0);
        assert_eq!(check(&teddy, &["axx", "rxx"], &haystack), Some(21));
    }

    #[test]
    fn test_ignore_case_prefix_and_suffix() {
        let list = ["Hello", "WORLD", "abc", "xyz1", "qwerty", "zebra", "mouse", "house", "grape"];
        let teddy = bucketized_ignore_case3(&list);
        assert_eq!(check(&teddy, &list, &utf16("........ ........ hElLo")), Some(18));
        assert_eq!(check(&teddy, &list, &utf16("the GRAPES of wrath")), Some(4));
    }

    #[test]
    fn test_ignore_case_dotless_i_and_long_s_stay_distinct() {
        let list = ["kiss", "zzz"];
        let ascii = TeddyMatcher::<AsciiIgnoreCase, AsciiIgnoreCase, 3, false>::new(
            one_per_bucket(needles(&list)),
        )
        .expect("eligible");
        let ordinal = TeddyMatcher::<AsciiIgnoreCase, IgnoreCase, 3, false>::new(one_per_bucket(
            needles(&list),
        ))
        .expect("eligible");

        for text in ["Kıſs", "kıss", "KIſS", "ſſſſſſſſſſſſſſſſſſſſkıſſ"] {
            assert_eq!(check(&ascii, &list, &utf16(text)), None, "{text}");
            assert_eq!(check(&ordinal, &list, &utf16(text)), None, "{text}");
        }

        let text = format!("{}Kıſs KISS", "ı".repeat(20));
        assert_eq!(check(&ascii, &list, &utf16(&text)), Some(25));
        assert_eq!(check(&ordinal, &list, &utf16(&text)), Some(25));
    }

    #[test]
    fn test_exact_does_not_fold() {
        let list = ["six", "ink"];
        let teddy = exact3(&list);
        let text = format!("{}ſix ınk", "-".repeat(20));
        assert_eq!(check(&teddy, &list, &utf16(&text)), None);
    }

    #[test]
    fn test_non_ascii_haystack_units() {
        let list = ["abc", "def"];
        let teddy = exact3(&list);
        // U+0161 and U+8061 both have low byte 0x61 ('a').
        let mut haystack = vec![0x0161u16, 0x8061, b'b' as u16, b'c' as u16];
        haystack.extend(utf16("----------------------abc"));
        assert_eq!(check(&teddy, &list, &haystack), Some(26));
    }

    #[test]
    fn test_prefix_len_two() {
        let list = ["ab", "xyz", "cd"];
        let buckets = one_per_bucket(needles(&list));
        let teddy = Exact::<2, false>::new(buckets).expect("eligible");
        assert_eq!(check(&teddy, &list, &utf16("----------------------cd")), Some(22));
        assert_eq!(check(&teddy, &list, &utf16("--------x-y-z--xyz")), Some(15));
        assert_eq!(check(&teddy, &list, &utf16("c")), None);
    }

    #[test]
    fn test_bucketized_shared_prefix_collisions() {
        let list = ["abAA", "abBB", "abCC", "abDD", "abEE", "abFF", "abGG", "abHH", "abII", "abJJ"];
        let buckets = bucketize(needles(&list), 2, false);
        let teddy = Exact::<2, true>::new(buckets).expect("eligible");

        let text = "abXX abYY ab abZZ abab abGG abAA";
        assert_eq!(check(&teddy, &list, &utf16(text)), Some(23));
    }

    #[test]
    fn test_every_occurrence_is_a_candidate() {
        let list = [
            "alpha", "Beta", "gamma", "DELTA", "epsilon", "zeta", "eta", "theta", "iota", "kappa",
            "lambda", "mu",
        ];
        let buckets = bucketize(needles(&list), 2, true);
        let teddy = TeddyMatcher::<AsciiIgnoreCase, AsciiIgnoreCase, 2, true>::new(buckets).expect("eligible");

        for needle in list {
            for variant in [needle.to_lowercase(), needle.to_uppercase()] {
                let haystack = utf16(&format!("..{variant}.."));
                let mask = teddy.candidate_mask(&haystack, 2);
                assert_ne!(mask, 0, "{variant} filtered out");
            }
        }
    }

    #[test]
    fn test_candidate_mask_bounds() {
        let teddy = exact3(&["abc", "xyz"]);
        let haystack = utf16("xxabc");
        assert_ne!(teddy.candidate_mask(&haystack, 2), 0);
        assert_eq!(teddy.candidate_mask(&haystack, 3), 0);
        assert_eq!(teddy.candidate_mask(&haystack, 10), 0);
    }

    #[test]
    fn test_fold_unit() {
        assert_eq!(fold_unit(b'a' as u16), b'a');
        assert_eq!(fold_unit(0x7F), 0x7F);
        assert_eq!(fold_unit(0x0131), NON_ASCII);
        assert_eq!(fold_unit(0x017F), NON_ASCII);
        assert_eq!(fold_unit(0x00E9), NON_ASCII);
        assert_eq!(fold_unit(0xFFFF), NON_ASCII);
    }

    // ========================================================================
    // Start and Remainder Case
    // ========================================================================

    #[test]
    fn test_new_rejects_exact_start_with_letters_under_ignore_case() {
        let letters = one_per_bucket(needles(&["abc", "123"]));
        assert!(
            TeddyMatcher::<CaseSensitive, IgnoreCase, 3, false>::new(letters.clone()).is_none()
        );
        assert!(TeddyMatcher::<AsciiIgnoreCase, IgnoreCase, 3, false>::new(letters).is_some());

        let symbols = one_per_bucket(needles(&["123é", "#$%Ω"]));
        assert!(TeddyMatcher::<CaseSensitive, IgnoreCase, 3, false>::new(symbols).is_some());
    }

    #[test]
    fn test_exact_start_with_ordinal_verify() {
        let list = ["123é", "#$%Ω"];
        let teddy = TeddyMatcher::<CaseSensitive, IgnoreCase, 3, false>::new(one_per_bucket(
            needles(&list),
        ))
        .expect("eligible");
        assert_eq!(check(&teddy, &list, &utf16("xx123É")), Some(2));
        assert_eq!(check(&teddy, &list, &utf16("------------------#$%ω")), Some(18));
        assert_eq!(check(&teddy, &list, &utf16("------------------123e")), None);
    }

    #[test]
    fn test_ascii_start_with_ordinal_verify_non_ascii_suffix() {
        let list = ["abcé", "xyzΩ"];
        let teddy = TeddyMatcher::<AsciiIgnoreCase, IgnoreCase, 3, false>::new(one_per_bucket(
            needles(&list),
        ))
        .expect("eligible");
        assert_eq!(check(&teddy, &list, &utf16("--ABCÉ")), Some(2));
        assert_eq!(check(&teddy, &list, &utf16("--------------------XyZω")), Some(20));
        assert_eq!(check(&teddy, &list, &utf16("--------------------abce")), None);
    }

    #[test]
    fn test_debug_output() {
        let teddy = exact3(&["abc", "xyz"]);
        let debug = format!("{teddy:?}");
        assert!(debug.contains("prefix_len: 3"));
        assert!(debug.contains("bucketized: false"));
        assert!(debug.contains("start: Exact"));

        let teddy = bucketized_ignore_case3(&["abc", "xyz"]);
        let debug = format!("{teddy:?}");
        assert!(debug.contains("start: Ascii"));
        assert!(debug.contains("verify: Ordinal"));
    }
}
