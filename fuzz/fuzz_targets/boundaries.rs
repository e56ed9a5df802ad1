// Copyright (c) 2025-present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! SIMD block boundary fuzzing.
//!
//! Places a needle at fuzzer-chosen offsets in haystacks whose lengths sit
//! around multiples of the 16-lane block width, where the SIMD loop hands
//! over to the scalar tail.

#![no_main]

use libfuzzer_sys::fuzz_target;
use simdneedle::fallback::reference_index_of_any;
use simdneedle::{CaseMode, StringSearchValues};

/// SIMD-relevant boundary lengths to test
const BOUNDARY_LENGTHS: &[usize] = &[
    0, 1, 2, 3, // Shorter than any prefix
    15, 16, 17, 18, // First block (16 lanes + prefix overlap)
    31, 32, 33, 34, // Two blocks
    63, 64, 65, 66, // Four blocks
    127, 128, 129, 130, // Eight blocks
];

const NEEDLES: [&str; 3] = ["fuzz", "Teddy", "xyz"];
const MANY_NEEDLES: [&str; 10] = [
    "fuzz", "Teddy", "xyz", "block", "lane", "tail", "nibble", "mask", "bucket", "shuffle",
];

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let which = data[0] as usize;
    let offset_seed = data[1] as usize;

    for &target_len in BOUNDARY_LENGTHS {
        for list in [&NEEDLES[..], &MANY_NEEDLES[..]] {
            let needle = list[which % list.len()];
            let haystack = generate_haystack(&data[2..], target_len, needle, offset_seed);
            let needles: Vec<Vec<u16>> = list.iter().map(|s| s.encode_utf16().collect()).collect();

            for case_mode in [CaseMode::Exact, CaseMode::OrdinalIgnoreCase] {
                let values = StringSearchValues::with_case_mode(list, case_mode);
                assert_eq!(
                    values.index_of_any(&haystack),
                    reference_index_of_any(&haystack, &needles, case_mode),
                    "mismatch at boundary {} ({:?})",
                    target_len,
                    case_mode
                );
            }
        }
    }
});

/// Filler from the input (mapped to `-`, `.` and digits) with `needle`
/// written at an offset derived from `seed` when it fits.
fn generate_haystack(seed: &[u8], len: usize, needle: &str, offset_seed: usize) -> Vec<u16> {
    let mut haystack: Vec<u16> = (0..len)
        .map(|i| {
            let byte = seed.get(i % seed.len().max(1)).copied().unwrap_or(0);
            match byte % 4 {
                0 => b'-' as u16,
                1 => b'.' as u16,
                _ => (b'0' + byte % 10) as u16,
            }
        })
        .collect();

    let units: Vec<u16> = needle.encode_utf16().collect();
    if units.len() <= len {
        let offset = offset_seed % (len - units.len() + 1);
        haystack[offset..offset + units.len()].copy_from_slice(&units);
    }

    haystack
}
