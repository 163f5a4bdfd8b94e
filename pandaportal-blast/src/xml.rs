//! Parser for BLAST `-outfmt 5` XML reports.
//!
//! Walks every `Hit` element across all iterations and keeps only the
//! first `Hsp` (the best alignment block) per hit. A hit with no alignment
//! blocks contributes identifier, description, and length with numeric
//! fields left at zero.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

use crate::models::Hit;

pub fn parse_report_file(path: &Path) -> Result<Vec<Hit>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Could not read BLAST report '{}'", path.display()))?;
    parse_report(&text)
}

pub fn parse_report(xml: &str) -> Result<Vec<Hit>> {
    let report: BlastOutputXml =
        quick_xml::de::from_str(xml).map_err(|e| anyhow!("Malformed BLAST XML: {e}"))?;

    Ok(report
        .iterations
        .iterations
        .into_iter()
        .flat_map(|iteration| {
            iteration
                .hits
                .map(|wrapper| wrapper.hits)
                .unwrap_or_default()
        })
        .map(hit_from_xml)
        .collect())
}

fn hit_from_xml(hit: HitXml) -> Hit {
    let mut out = Hit {
        hit_id: hit.id.unwrap_or_default(),
        hit_def: hit.def.unwrap_or_default(),
        accession: hit.accession,
        length: hit.len.unwrap_or(0),
        ..Hit::default()
    };

    if let Some(hsp) = hit.hsps.and_then(|wrapper| wrapper.hsps.into_iter().next()) {
        out.score = hsp.bit_score.unwrap_or(0.0);
        out.evalue = hsp.evalue.unwrap_or_default();

        let align_len = hsp.align_len.filter(|len| *len > 0).unwrap_or(1);
        out.identity = hsp.identity.unwrap_or(0) as f64 / align_len as f64 * 100.0;

        // Minus-strand alignments report from > to; normalize so start <= end.
        (out.query_start, out.query_end) =
            ordered(hsp.query_from.unwrap_or(0), hsp.query_to.unwrap_or(0));
        (out.hit_start, out.hit_end) = ordered(hsp.hit_from.unwrap_or(0), hsp.hit_to.unwrap_or(0));

        out.alignment = hsp.qseq.unwrap_or_default();
    }

    out
}

fn ordered(a: u64, b: u64) -> (u64, u64) {
    if a <= b { (a, b) } else { (b, a) }
}

#[derive(Debug, Deserialize)]
struct BlastOutputXml {
    #[serde(rename = "BlastOutput_iterations")]
    iterations: IterationsXml,
}

#[derive(Debug, Default, Deserialize)]
struct IterationsXml {
    #[serde(rename = "Iteration", default)]
    iterations: Vec<IterationXml>,
}

#[derive(Debug, Deserialize)]
struct IterationXml {
    #[serde(rename = "Iteration_hits")]
    hits: Option<IterationHitsXml>,
}

#[derive(Debug, Default, Deserialize)]
struct IterationHitsXml {
    #[serde(rename = "Hit", default)]
    hits: Vec<HitXml>,
}

#[derive(Debug, Deserialize)]
struct HitXml {
    #[serde(rename = "Hit_id")]
    id: Option<String>,
    #[serde(rename = "Hit_def")]
    def: Option<String>,
    #[serde(rename = "Hit_accession")]
    accession: Option<String>,
    #[serde(rename = "Hit_len")]
    len: Option<u64>,
    #[serde(rename = "Hit_hsps")]
    hsps: Option<HspsXml>,
}

#[derive(Debug, Default, Deserialize)]
struct HspsXml {
    #[serde(rename = "Hsp", default)]
    hsps: Vec<HspXml>,
}

#[derive(Debug, Deserialize)]
struct HspXml {
    #[serde(rename = "Hsp_bit-score")]
    bit_score: Option<f64>,
    #[serde(rename = "Hsp_evalue")]
    evalue: Option<String>,
    #[serde(rename = "Hsp_query-from")]
    query_from: Option<u64>,
    #[serde(rename = "Hsp_query-to")]
    query_to: Option<u64>,
    #[serde(rename = "Hsp_hit-from")]
    hit_from: Option<u64>,
    #[serde(rename = "Hsp_hit-to")]
    hit_to: Option<u64>,
    #[serde(rename = "Hsp_identity")]
    identity: Option<u64>,
    #[serde(rename = "Hsp_align-len")]
    align_len: Option<u64>,
    #[serde(rename = "Hsp_qseq")]
    qseq: Option<String>,
}
