// Copyright (c) 2025-present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

use std::process::ExitCode;

use simdneedle::{Comparison, StringSearchValues};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: simdneedle <comparison> <needle[,needle...]> <haystack>...";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 3 {
        eprintln!("{USAGE}");
        eprintln!("comparisons: ordinal, ordinal-ignore-case");
        return ExitCode::from(2);
    }

    let values = match args[0]
        .parse::<Comparison>()
        .and_then(|comparison| StringSearchValues::new(&split_needles(&args[1]), comparison))
    {
        Ok(values) => values,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
    };

    println!("Multi-needle search ({} distinct needles)\n", values.len());
    println!("Architecture: {}", std::env::consts::ARCH);

    #[cfg(target_arch = "x86_64")]
    println!("SSSE3 support: {}", is_x86_feature_detected!("ssse3"));

    println!("Strategy: {}", values.strategy());
    println!("\n{}\n", "=".repeat(80));

    let mut any_found = false;
    for haystack in &args[2..] {
        match values.index_of_any_str(haystack) {
            Some(offset) => {
                any_found = true;
                println!("{offset:>6}  {haystack}");
            }
            None => println!("{:>6}  {haystack}", "-"),
        }
    }

    if any_found {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

/// Splits a comma-separated needle list. An empty argument yields the empty
/// needle, which matches everywhere.
fn split_needles(list: &str) -> Vec<&str> {
    list.split(',').collect()
}
