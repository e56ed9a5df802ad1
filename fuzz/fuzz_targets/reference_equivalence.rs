// Copyright (c) 2025-present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Compiled matcher vs naive reference fuzzing.
//!
//! Input layout: one flag byte (bit 0 selects ignore-case), then UTF-16LE
//! code units of the form `needle,needle,...\nhaystack`. The haystack is
//! searched inside a buffer whose surrounding units repeat the needles, so
//! any read outside the slice would change the result.

#![no_main]

use libfuzzer_sys::fuzz_target;
use simdneedle::fallback::reference_index_of_any;
use simdneedle::{CaseMode, StringSearchValues};

const COMMA: u16 = b',' as u16;
const NEWLINE: u16 = b'\n' as u16;

fuzz_target!(|data: &[u8]| {
    let Some((&flags, rest)) = data.split_first() else {
        return;
    };
    let case_mode = if flags & 1 == 1 {
        CaseMode::OrdinalIgnoreCase
    } else {
        CaseMode::Exact
    };

    let units: Vec<u16> = rest
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    let Some(split) = units.iter().position(|&u| u == NEWLINE) else {
        return;
    };
    let (needle_units, haystack) = (&units[..split], &units[split + 1..]);

    let needles: Vec<&[u16]> = needle_units.split(|&u| u == COMMA).collect();
    let values = StringSearchValues::from_utf16(&needles, case_mode);

    let expected = reference_index_of_any(haystack, &needles, case_mode);
    assert_eq!(
        values.index_of_any(haystack),
        expected,
        "mismatch for strategy {:?} ({} needles, haystack length {})",
        values.strategy(),
        needles.len(),
        haystack.len()
    );

    // Surround the haystack with poison built from the needles themselves.
    let poison: Vec<u16> = needles.iter().flat_map(|n| n.iter().copied()).collect();
    let mut padded = Vec::with_capacity(poison.len() * 2 + haystack.len());
    padded.extend_from_slice(&poison);
    padded.extend_from_slice(haystack);
    padded.extend_from_slice(&poison);

    let slice = &padded[poison.len()..poison.len() + haystack.len()];
    assert_eq!(
        values.index_of_any(slice),
        expected,
        "result changed when surrounded by poison"
    );
});
