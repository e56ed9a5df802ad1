// Copyright (c) 2025-present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! # Ordinal Casing
//!
//! Culture-invariant, simple (one-to-one) uppercase mapping over UTF-16 code
//! units. This is the casing used by every ignore-case comparison in the
//! crate.
//!
//! ## Mapping Rules
//!
//! - **ASCII** (`0x00..=0x7F`): `a..=z` map to `A..=Z`, everything else maps
//!   to itself. Served from a 128-entry table with no branching.
//! - **Basic Multilingual Plane**: the Unicode *simple* uppercase mapping.
//!   Characters whose full mapping expands to several characters (for example
//!   `ß` -> `SS`) keep their simple mapping, which is usually themselves.
//!   Dotless `ı` (U+0131) and long `ſ` (U+017F) map to themselves, so no
//!   unit outside ASCII uppercases into ASCII.
//! - **Supplementary planes**: a well-formed surrogate pair is decoded,
//!   uppercased as a scalar value and re-encoded. Lone surrogates map to
//!   themselves.
//!
//! The BMP table is built once on first use from the Unicode data shipped with
//! `core` and is shared by all threads afterwards.
//!
//! ## Example
//!
//! ```rust
//! use simdneedle::ordinal_casing::{surrogate_to_upper, to_upper_ordinal};
//!
//! assert_eq!(to_upper_ordinal('a' as u16), 'A' as u16);
//! assert_eq!(to_upper_ordinal(0x00E9), 0x00C9); // é -> É
//!
//! // DESERET SMALL LETTER LONG I -> DESERET CAPITAL LETTER LONG I
//! assert_eq!(surrogate_to_upper(0xD801, 0xDC28), (0xD801, 0xDC00));
//! ```

use once_cell::sync::Lazy;

// ============================================================================
// Surrogate Helpers
// ============================================================================

const HIGH_SURROGATE_START: u16 = 0xD800;
const HIGH_SURROGATE_END: u16 = 0xDBFF;
const LOW_SURROGATE_START: u16 = 0xDC00;
const LOW_SURROGATE_END: u16 = 0xDFFF;

/// Returns `true` if `unit` is a UTF-16 high (leading) surrogate.
#[inline]
pub fn is_high_surrogate(unit: u16) -> bool {
    (HIGH_SURROGATE_START..=HIGH_SURROGATE_END).contains(&unit)
}

/// Returns `true` if `unit` is a UTF-16 low (trailing) surrogate.
#[inline]
pub fn is_low_surrogate(unit: u16) -> bool {
    (LOW_SURROGATE_START..=LOW_SURROGATE_END).contains(&unit)
}

// ============================================================================
// ASCII Fast Path
// ============================================================================

/// Uppercase table for the ASCII range.
static ASCII_UPPER: [u8; 128] = {
    let mut table = [0u8; 128];
    let mut i = 0;
    while i < 128 {
        let c = i as u8;
        table[i] = if c.is_ascii_lowercase() { c - 0x20 } else { c };
        i += 1;
    }
    table
};

/// Uppercases an ASCII code unit. Units outside the ASCII range are returned
/// unchanged.
#[inline]
pub fn to_upper_ascii(unit: u16) -> u16 {
    if unit < 0x80 {
        ASCII_UPPER[unit as usize] as u16
    } else {
        unit
    }
}

// ============================================================================
// Basic Multilingual Plane Table
// ============================================================================

/// Characters whose full uppercase mapping expands to several characters but
/// whose simple mapping is a single, different character (Greek letters with
/// ypogegrammeni).
const EXPANDING_SIMPLE_UPPER: &[(u16, u16)] = &[
    (0x1F80, 0x1F88),
    (0x1F81, 0x1F89),
    (0x1F82, 0x1F8A),
    (0x1F83, 0x1F8B),
    (0x1F84, 0x1F8C),
    (0x1F85, 0x1F8D),
    (0x1F86, 0x1F8E),
    (0x1F87, 0x1F8F),
    (0x1F90, 0x1F98),
    (0x1F91, 0x1F99),
    (0x1F92, 0x1F9A),
    (0x1F93, 0x1F9B),
    (0x1F94, 0x1F9C),
    (0x1F95, 0x1F9D),
    (0x1F96, 0x1F9E),
    (0x1F97, 0x1F9F),
    (0x1FA0, 0x1FA8),
    (0x1FA1, 0x1FA9),
    (0x1FA2, 0x1FAA),
    (0x1FA3, 0x1FAB),
    (0x1FA4, 0x1FAC),
    (0x1FA5, 0x1FAD),
    (0x1FA6, 0x1FAE),
    (0x1FA7, 0x1FAF),
    (0x1FB3, 0x1FBC),
    (0x1FC3, 0x1FCC),
    (0x1FF3, 0x1FFC),
];

/// LATIN SMALL LETTER DOTLESS I.
const DOTLESS_I: u16 = 0x0131;

/// LATIN SMALL LETTER LONG S.
const LONG_S: u16 = 0x017F;

static BMP_UPPER: Lazy<Box<[u16]>> = Lazy::new(build_bmp_table);

fn build_bmp_table() -> Box<[u16]> {
    let mut table: Vec<u16> = Vec::with_capacity(0x1_0000);

    for unit in 0..=0xFFFFu32 {
        let upper = char::from_u32(unit)
            .and_then(simple_upper_scalar)
            .filter(|&c| (c as u32) <= 0xFFFF)
            .map_or(unit as u16, |c| c as u16);
        table.push(upper);
    }

    for &(lower, upper) in EXPANDING_SIMPLE_UPPER {
        table[lower as usize] = upper;
    }

    // Ordinal casing leaves dotless i and long s unchanged.
    table[DOTLESS_I as usize] = DOTLESS_I;
    table[LONG_S as usize] = LONG_S;

    table.into_boxed_slice()
}

/// Simple uppercase of a scalar value, or `None` when the full mapping is not
/// one-to-one.
fn simple_upper_scalar(c: char) -> Option<char> {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => Some(u),
        _ => None,
    }
}

/// Ordinal uppercase of a single UTF-16 code unit.
///
/// Surrogate code units are returned unchanged; use [`surrogate_to_upper`]
/// to case a full pair.
///
/// # Examples
///
/// ```rust
/// use simdneedle::ordinal_casing::to_upper_ordinal;
///
/// assert_eq!(to_upper_ordinal('z' as u16), 'Z' as u16);
/// assert_eq!(to_upper_ordinal(0x03C9), 0x03A9); // ω -> Ω
/// assert_eq!(to_upper_ordinal(0x00DF), 0x00DF); // ß has no simple mapping
/// ```
#[inline]
pub fn to_upper_ordinal(unit: u16) -> u16 {
    if unit < 0x80 {
        ASCII_UPPER[unit as usize] as u16
    } else {
        BMP_UPPER[unit as usize]
    }
}

// ============================================================================
// Surrogate Pairs
// ============================================================================

/// Ordinal uppercase of a surrogate pair.
///
/// If `(high, low)` is not a well-formed pair, or the character has no simple
/// uppercase mapping in the supplementary planes, the pair is returned
/// unchanged.
pub fn surrogate_to_upper(high: u16, low: u16) -> (u16, u16) {
    if !is_high_surrogate(high) || !is_low_surrogate(low) {
        return (high, low);
    }

    let scalar = 0x1_0000 + (((high as u32) - 0xD800) << 10) + ((low as u32) - 0xDC00);
    let upper = char::from_u32(scalar).and_then(simple_upper_scalar);

    match upper {
        Some(c) if (c as u32) > 0xFFFF => {
            let mut buf = [0u16; 2];
            c.encode_utf16(&mut buf);
            (buf[0], buf[1])
        }
        _ => (high, low),
    }
}

// ============================================================================
// Bulk Conversion
// ============================================================================

/// Uppercases `source` into `destination`, handling surrogate pairs jointly.
///
/// Returns the number of code units written, which is always `source.len()`.
///
/// # Panics
///
/// Panics if `destination` is shorter than `source`.
pub fn to_upper_ordinal_into(source: &[u16], destination: &mut [u16]) -> usize {
    assert!(
        destination.len() >= source.len(),
        "destination too small: need {}, have {}",
        source.len(),
        destination.len()
    );

    let mut i = 0;
    while i < source.len() {
        let unit = source[i];
        if is_high_surrogate(unit) && i + 1 < source.len() && is_low_surrogate(source[i + 1]) {
            let (h, l) = surrogate_to_upper(unit, source[i + 1]);
            destination[i] = h;
            destination[i + 1] = l;
            i += 2;
        } else {
            destination[i] = to_upper_ordinal(unit);
            i += 1;
        }
    }

    source.len()
}

/// Allocating variant of [`to_upper_ordinal_into`].
///
/// ```rust
/// use simdneedle::ordinal_casing::to_upper_ordinal_utf16;
///
/// let text: Vec<u16> = "straße".encode_utf16().collect();
/// let upper = to_upper_ordinal_utf16(&text);
/// assert_eq!(String::from_utf16(&upper).unwrap(), "STRAßE");
/// ```
pub fn to_upper_ordinal_utf16(source: &[u16]) -> Vec<u16> {
    let mut output = vec![0u16; source.len()];
    to_upper_ordinal_into(source, &mut output);
    output
}

// ============================================================================
// Unit Tests
// ============================================================================
