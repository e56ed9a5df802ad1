// Copyright (c) 2025-present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! # simdneedle
//!
//! Precompiled multi-needle substring search over UTF-16 text using SIMD
//! instructions, with automatic fallback to scalar implementations.
//!
//! ## Features
//!
//! - **Leftmost match semantics**: the result is always the smallest offset at
//!   which any needle starts, identical to trying every needle at every offset
//! - **Ordinal and ordinal ignore-case** comparison, including surrogate pairs
//! - **Teddy prefix filter** with 2- or 3-unit fingerprints and up to 8 buckets
//! - **SIMD acceleration** on x86_64 (SSSE3) and ARM64 (NEON)
//! - **Strategy selection** per needle set: single needle, Teddy or a naive
//!   fallback, chosen once at construction
//! - **Thread-safe**: compiled needle sets are immutable and `Send + Sync`
//!
//! ## Quick Start
//!
//! ```rust
//! use simdneedle::{Comparison, StringSearchValues};
//!
//! let values = StringSearchValues::new(&["abc", "bcd"], Comparison::Ordinal)?;
//! let haystack: Vec<u16> = "xbcdxabcx".encode_utf16().collect();
//! assert_eq!(values.index_of_any(&haystack), Some(1));
//! # Ok::<(), simdneedle::SearchError>(())
//! ```
//!
//! ## Ignoring Case
//!
//! Ignore-case comparison uppercases both sides with simple, one-to-one
//! mappings. `ß` does not match `SS`, and `ſ` (long s) and `ı` (dotless i)
//! only match themselves:
//!
//! ```rust
//! use simdneedle::{CaseMode, StringSearchValues};
//!
//! let values = StringSearchValues::with_case_mode(&["STRASSE", "sun"], CaseMode::OrdinalIgnoreCase);
//! assert_eq!(values.index_of_any_str("die Straße"), None);
//! assert_eq!(values.index_of_any_str("ſun"), None);
//! assert_eq!(values.index_of_any_str("ſun SUN"), Some(4));
//! ```
//!
//! ## Inspecting the Strategy
//!
//! ```rust
//! use simdneedle::{CaseMode, StringSearchValues, Strategy};
//!
//! let values = StringSearchValues::with_case_mode(&["a", "bc"], CaseMode::Exact);
//! assert_eq!(values.strategy(), Strategy::MultiStringFallback);
//! ```
//!
//! ## Logging
//!
//! Construction emits a `tracing` event at `debug` level naming the selected
//! strategy. Searching never logs.
//!
//! See the [`search_values`], [`teddy_scanner`], [`teddy_buckets`],
//! [`fallback`], [`string_compare`] and [`ordinal_casing`] modules for the
//! complete API.

pub mod fallback;
pub mod ordinal_casing;
pub mod search_values;
pub mod string_compare;
pub mod teddy_buckets;
pub mod teddy_scanner;

pub use search_values::{CaseMode, Comparison, SearchError, Strategy, StringSearchValues};
pub use string_compare::CaseFolding;
