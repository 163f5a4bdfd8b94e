//! End-to-end tests for the degraded search path through the public API.
//!
//! These drive the real service wiring (system process runner, JSON-lines
//! job log) against a tool that cannot succeed, which is exactly the
//! situation on a host without the aligner installed: the submission must
//! still answer with a completed, fully-shaped result.

use std::collections::HashSet;
use std::fs;
use std::thread;

use pandaportal_blast::{BlastService, SearchRequest, synthesize_hits, xml};
use pandaportal_core::Settings;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::tempdir;

/// A program name no host resolves, forcing the tool-unavailable path.
const MISSING_TOOL: &str = "pandaportal-test-missing-blastn";

fn test_settings(dir: &std::path::Path) -> Settings {
    Settings {
        blast_db_dir: dir.join("blast_db"),
        temp_dir: dir.join("tmp"),
        genome_data_dir: dir.join("genomes"),
        job_log: dir.join("jobs.jsonl"),
        ..Settings::default()
    }
}

fn missing_tool_request(query: &str, num_results: u32) -> SearchRequest {
    let mut request = SearchRequest::new(query);
    request.program = MISSING_TOOL.to_string();
    request.num_results = num_results;
    request
}

#[test]
fn example_scenario_missing_tool() {
    let dir = tempdir().unwrap();
    let service = BlastService::new(&test_settings(dir.path())).unwrap();

    let result = service
        .submit("user-1", &missing_tool_request("ACGTACGTACGT", 3))
        .unwrap();

    assert_eq!(result.query_length, 12);
    assert_eq!(result.results.len(), 3);
    for hit in &result.results {
        assert!((80.0..=100.0).contains(&hit.identity), "identity {}", hit.identity);
        assert!(hit.query_end <= 12, "query_end {}", hit.query_end);
        assert!(hit.query_start <= hit.query_end);
        assert!(hit.hit_start <= hit.hit_end);
    }

    // Exactly one job record was appended, and the scratch dir is clean.
    let log = fs::read_to_string(dir.path().join("jobs.jsonl")).unwrap();
    assert_eq!(log.lines().count(), 1);
    assert_eq!(fs::read_dir(dir.path().join("tmp")).unwrap().count(), 0);
}

#[test]
fn concurrent_submissions_never_collide() {
    let dir = tempdir().unwrap();
    let service = BlastService::new(&test_settings(dir.path())).unwrap();

    let job_ids: Vec<String> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = &service;
                scope.spawn(move || {
                    service
                        .submit("user-1", &missing_tool_request("ACGTACGT", 2))
                        .unwrap()
                        .job_id
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let distinct: HashSet<&String> = job_ids.iter().collect();
    assert_eq!(distinct.len(), job_ids.len(), "job id collision: {job_ids:?}");

    // Eight submissions, eight records, no scratch leftovers.
    let log = fs::read_to_string(dir.path().join("jobs.jsonl")).unwrap();
    assert_eq!(log.lines().count(), 8);
    assert_eq!(fs::read_dir(dir.path().join("tmp")).unwrap().count(), 0);
}

#[test]
fn synthesized_hits_carry_every_real_path_field() {
    // Shape parity: a caller must not be able to distinguish the two paths
    // structurally. Serialize one hit from each and compare key sets.
    let report = r#"<?xml version="1.0"?>
<BlastOutput>
  <BlastOutput_iterations>
    <Iteration>
      <Iteration_hits>
        <Hit>
          <Hit_id>chr1</Hit_id>
          <Hit_def>Ailuropoda melanoleuca chromosome 1</Hit_def>
          <Hit_accession>NC_009087</Hit_accession>
          <Hit_len>100000</Hit_len>
          <Hit_hsps>
            <Hsp>
              <Hsp_bit-score>90.1</Hsp_bit-score>
              <Hsp_evalue>2e-20</Hsp_evalue>
              <Hsp_query-from>1</Hsp_query-from>
              <Hsp_query-to>12</Hsp_query-to>
              <Hsp_hit-from>10</Hsp_hit-from>
              <Hsp_hit-to>21</Hsp_hit-to>
              <Hsp_identity>11</Hsp_identity>
              <Hsp_align-len>12</Hsp_align-len>
              <Hsp_qseq>ACGTACGTACGT</Hsp_qseq>
            </Hsp>
          </Hit_hsps>
        </Hit>
      </Iteration_hits>
    </Iteration>
  </BlastOutput_iterations>
</BlastOutput>"#;

    let real = xml::parse_report(report).unwrap().remove(0);
    let synthesized =
        synthesize_hits(&mut StdRng::seed_from_u64(3), "ACGTACGTACGT", 1).remove(0);

    let keys = |hit| -> HashSet<String> {
        match serde_json::to_value(hit).unwrap() {
            serde_json::Value::Object(map) => map.keys().cloned().collect(),
            other => panic!("hit serialized to {other:?}"),
        }
    };

    let real_keys = keys(real);
    let synthesized_keys = keys(synthesized);
    assert!(
        real_keys.is_subset(&synthesized_keys),
        "real-only fields: {:?}",
        real_keys.difference(&synthesized_keys).collect::<Vec<_>>()
    );
}

#[test]
fn empty_query_rejected_without_side_effects() {
    let dir = tempdir().unwrap();
    let service = BlastService::new(&test_settings(dir.path())).unwrap();

    service
        .submit("user-1", &missing_tool_request(">only a header\n", 3))
        .unwrap_err();

    assert!(!dir.path().join("jobs.jsonl").exists());
    assert_eq!(fs::read_dir(dir.path().join("tmp")).unwrap().count(), 0);
}

#[test]
fn disabled_fallback_turns_degradation_into_an_error() {
    let dir = tempdir().unwrap();
    let mut settings = test_settings(dir.path());
    settings.blast_fallback = false;
    let service = BlastService::new(&settings).unwrap();

    let err = service
        .submit("user-1", &missing_tool_request("ACGT", 3))
        .unwrap_err();
    assert!(err.to_string().contains("fallback is disabled"), "{err}");

    // A surfaced failure records nothing.
    assert!(!dir.path().join("jobs.jsonl").exists());
}
