// Copyright (c) 2025-present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! SIMD vs scalar Teddy equivalence fuzzing.
//!
//! Builds every Teddy variant from fuzzer-chosen ASCII needles and checks
//! that the SIMD scan and the scalar scan agree on arbitrary UTF-16 input,
//! including non-ASCII units whose low byte is an ASCII letter.

#![no_main]

use libfuzzer_sys::fuzz_target;
use simdneedle::string_compare::{AsciiIgnoreCase, CaseSensitive, CaseSensitivity, IgnoreCase};
use simdneedle::teddy_buckets::{bucketize, one_per_bucket};
use simdneedle::teddy_scanner::TeddyMatcher;

/// Units that exercise the folding paths.
const SPECIAL_UNITS: [u16; 6] = [0x0131, 0x017F, 0x0161, 0x8061, 0xD801, 0xDC00];

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }

    let needle_count = 2 + (data[0] as usize % 15);
    let needle_len = 3 + (data[1] as usize % 6);
    let body = &data[2..];

    // Needles drawn from a small alphabet so the haystack hits them often.
    let needles: Vec<Box<[u16]>> = (0..needle_count)
        .map(|i| {
            (0..needle_len)
                .map(|j| {
                    let byte = body[(i * needle_len + j) % body.len()];
                    (b'a' + byte % 4) as u16
                })
                .collect()
        })
        .collect();

    let haystack: Vec<u16> = body
        .iter()
        .map(|&b| match b >> 6 {
            0 => (b'a' + b % 4) as u16,
            1 => (b'A' + b % 4) as u16,
            2 => SPECIAL_UNITS[b as usize % SPECIAL_UNITS.len()],
            _ => b as u16,
        })
        .collect();

    check::<CaseSensitive, CaseSensitive>(&needles, &haystack);
    check::<AsciiIgnoreCase, AsciiIgnoreCase>(&needles, &haystack);
    check::<AsciiIgnoreCase, IgnoreCase>(&needles, &haystack);
});

fn check<S: CaseSensitivity, C: CaseSensitivity>(needles: &[Box<[u16]>], haystack: &[u16]) {
    let owned = needles.to_vec();

    if needles.len() <= 8 {
        let teddy = TeddyMatcher::<S, C, 3, false>::new(one_per_bucket(owned.clone()));
        if let Some(teddy) = teddy {
            assert_eq!(teddy.find(haystack), teddy.find_scalar(haystack), "N=3 one per bucket");
        }
        let teddy = TeddyMatcher::<S, C, 2, false>::new(one_per_bucket(owned.clone()));
        if let Some(teddy) = teddy {
            assert_eq!(teddy.find(haystack), teddy.find_scalar(haystack), "N=2 one per bucket");
        }
    }

    let teddy = TeddyMatcher::<S, C, 3, true>::new(bucketize(owned.clone(), 3, S::IGNORE_CASE));
    if let Some(teddy) = teddy {
        assert_eq!(teddy.find(haystack), teddy.find_scalar(haystack), "N=3 bucketized");
    }
    let teddy = TeddyMatcher::<S, C, 2, true>::new(bucketize(owned, 2, S::IGNORE_CASE));
    if let Some(teddy) = teddy {
        assert_eq!(teddy.find(haystack), teddy.find_scalar(haystack), "N=2 bucketized");
    }
}
