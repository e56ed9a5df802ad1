// Copyright (c) 2025-present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Property tests comparing compiled needle sets against the naive reference
//! search.

use std::ops::RangeInclusive;

use proptest::collection::vec;
use proptest::prelude::*;
use simdneedle::fallback::reference_index_of_any;
use simdneedle::{CaseMode, StringSearchValues, Strategy as Selected};

/// Code unit sequences the generated text is built from. Includes dotless i
/// and long s (which look like ASCII letters but only match themselves), a
/// non-ASCII letter pair, Deseret surrogate pairs and lone surrogates.
const TOKENS: &[&[u16]] = &[
    &[0x61],            // a
    &[0x62],            // b
    &[0x41],            // A
    &[0x42],            // B
    &[0x69],            // i
    &[0x49],            // I
    &[0x73],            // s
    &[0x53],            // S
    &[0x2D],            // -
    &[0x0131],          // dotless i
    &[0x017F],          // long s
    &[0x00E9],          // e acute
    &[0x00C9],          // E acute
    &[0x00DF],          // sharp s
    &[0xD801, 0xDC00],  // Deseret capital long I
    &[0xD801, 0xDC28],  // Deseret small long I
    &[0xD801],          // lone high surrogate
    &[0xDC28],          // lone low surrogate
];

const ASCII_TOKENS: &[&[u16]] = &[&[0x61], &[0x62], &[0x69], &[0x41], &[0x42], &[0x53]];

fn text(
    tokens: &'static [&'static [u16]],
    len: RangeInclusive<usize>,
) -> impl Strategy<Value = Vec<u16>> {
    vec(prop::sample::select(tokens), len).prop_map(|parts| parts.concat())
}

fn case_mode() -> impl Strategy<Value = CaseMode> {
    prop_oneof![Just(CaseMode::Exact), Just(CaseMode::OrdinalIgnoreCase)]
}

fn compile(needles: &[Vec<u16>], case_mode: CaseMode) -> StringSearchValues {
    let refs: Vec<&[u16]> = needles.iter().map(|n| n.as_slice()).collect();
    StringSearchValues::from_utf16(&refs, case_mode)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn matches_reference_mixed_alphabet(
        needles in vec(text(TOKENS, 1..=8), 1..=32),
        haystack in text(TOKENS, 0..=128),
        case_mode in case_mode(),
    ) {
        let values = compile(&needles, case_mode);
        prop_assert_eq!(
            values.index_of_any(&haystack),
            reference_index_of_any(&haystack, &needles, case_mode),
            "strategy {:?}", values.strategy()
        );
    }

    #[test]
    fn matches_reference_teddy_eligible(
        needles in vec(text(ASCII_TOKENS, 2..=8), 2..=24),
        haystack in text(TOKENS, 0..=256),
        case_mode in case_mode(),
    ) {
        let values = compile(&needles, case_mode);
        let is_teddy = matches!(values.strategy(), Selected::Teddy { .. });
        let is_single = values.strategy() == Selected::SingleString;
        prop_assert!(is_teddy || is_single, "unexpected strategy {:?}", values.strategy());

        prop_assert_eq!(
            values.index_of_any(&haystack),
            reference_index_of_any(&haystack, &needles, case_mode)
        );
    }

    #[test]
    fn subslice_ignores_surrounding_units(
        needles in vec(text(ASCII_TOKENS, 2..=6), 2..=12),
        haystack in text(TOKENS, 0..=96),
        case_mode in case_mode(),
    ) {
        let values = compile(&needles, case_mode);
        let poison: Vec<u16> = needles.concat();

        let mut padded = poison.clone();
        padded.extend_from_slice(&haystack);
        padded.extend_from_slice(&poison);
        let slice = &padded[poison.len()..poison.len() + haystack.len()];

        prop_assert_eq!(values.index_of_any(slice), values.index_of_any(&haystack));
    }

    #[test]
    fn str_offsets_count_utf16_units(
        prefix in "[a-m\u{e9}\u{10400}]{0,40}",
        case_mode in case_mode(),
    ) {
        let values = StringSearchValues::with_case_mode(&["needle", "thread"], case_mode);
        let haystack = format!("{prefix}needle");
        let expected = prefix.encode_utf16().count();
        prop_assert_eq!(values.index_of_any_str(&haystack), Some(expected));
    }
}

#[test]
fn test_dotless_i_and_long_s_never_match_ascii() {
    let cases: [(&[&str], &str); 5] = [
        (&["kiss", "zzz"], "Kıſs"),
        (&["I"], "ı"),
        (&["s", "x"], "ſı ſ"),
        (&["sun", "moon", "six"], "ſun ſix"),
        (&["mississippi", "kiss"], "Mıſſıssippı kıſſ"),
    ];
    for (needles, haystack) in cases {
        let values = StringSearchValues::with_case_mode(needles, CaseMode::OrdinalIgnoreCase);
        assert_eq!(values.index_of_any_str(haystack), None, "{needles:?} in {haystack}");
    }
}

#[test]
fn test_repeated_construction_is_deterministic() {
    let needles = ["alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta", "iota"];
    let first = StringSearchValues::with_case_mode(&needles, CaseMode::OrdinalIgnoreCase);
    let second = StringSearchValues::with_case_mode(&needles, CaseMode::OrdinalIgnoreCase);
    assert_eq!(first.strategy(), second.strategy());

    let haystack: Vec<u16> = "the GAMMA ray and the beta particle".encode_utf16().collect();
    assert_eq!(first.index_of_any(&haystack), Some(4));
    assert_eq!(second.index_of_any(&haystack), Some(4));
}
