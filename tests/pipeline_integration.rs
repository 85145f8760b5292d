//! End-to-end pipeline tests
//!
//! Writes domain and peak files to a temp directory, runs the full merge and
//! checks both output files.

use fast_tadmerge::core::{MergeConfig, MissingPeaksPolicy, TadMergeError};
use fast_tadmerge::pipeline::{run, PipelineOptions};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn options(dir: &TempDir, domain_files: Vec<PathBuf>, peak_file: Option<PathBuf>) -> PipelineOptions {
    PipelineOptions {
        domain_files,
        peak_file,
        outdir: dir.path().to_path_buf(),
        config: MergeConfig::default(),
    }
}

#[test]
fn test_merge_two_files() {
    let dir = TempDir::new().unwrap();
    let d1 = write_file(dir.path(), "tads_a.bed", "chr1\t0\t100000\nchr1\t100000\t300000\n");
    let d2 = write_file(
        dir.path(),
        "tads_b.bed",
        "chr1\t0\t300000\nchr1\t100000\t300000\nchr2\t0\t50000\n",
    );

    let opts = options(&dir, vec![d1, d2], None);
    let stats = run(&opts).unwrap();

    assert_eq!(stats.input_sets, 2);
    assert_eq!(stats.input_records, 5);
    assert_eq!(stats.merged, 4);
    assert_eq!(stats.domains, 4);

    let merged = fs::read_to_string(opts.merged_domains_path()).unwrap();
    assert_eq!(
        merged,
        "chr1\t0\t100000\tID_1\n\
         chr1\t0\t300000\tID_2\n\
         chr1\t100000\t300000\tID_3\n\
         chr2\t0\t50000\tID_4\n"
    );

    let relations = fs::read_to_string(opts.relation_list_path()).unwrap();
    assert_eq!(relations, "chr1\tID_2\tID_1\nchr1\tID_2\tID_3\n");
    assert_eq!(stats.edges, 1);
    assert_eq!(stats.relations, 2);
}

#[test]
fn test_tolerance_from_config() {
    let dir = TempDir::new().unwrap();
    let d1 = write_file(dir.path(), "a.bed", "chr1\t0\t100000\n");
    let d2 = write_file(dir.path(), "b.bed", "chr1\t5000\t95000\n");

    let mut opts = options(&dir, vec![d1, d2], None);
    opts.config.tolerance = 10_000;
    let stats = run(&opts).unwrap();
    assert_eq!(stats.merged, 1);

    let merged = fs::read_to_string(opts.merged_domains_path()).unwrap();
    assert_eq!(merged, "chr1\t5000\t95000\tID_1\n");
    assert_eq!(fs::read_to_string(opts.relation_list_path()).unwrap(), "");
}

#[test]
fn test_peak_filter_removes_unsupported_domains() {
    let dir = TempDir::new().unwrap();
    let d1 = write_file(
        dir.path(),
        "tads.bed",
        "chr1\t0\t400000\nchr1\t100000\t200000\nchr1\t200000\t300000\n",
    );
    let peaks = write_file(
        dir.path(),
        "ctcf.bed",
        "chr1\t1500\t1800\nchr1\t205000\t205300\n",
    );

    let opts = options(&dir, vec![d1], Some(peaks));
    let stats = run(&opts).unwrap();

    assert_eq!(stats.bin_size, Some(100_000));
    assert_eq!(stats.merged, 3);
    assert_eq!(stats.removed_by_peaks, 0);

    let mut opts = opts;
    opts.config.bin_size = Some(10_000);
    let stats = run(&opts).unwrap();
    assert_eq!(stats.removed_by_peaks, 1);
    assert_eq!(stats.domains, 2);

    let merged = fs::read_to_string(opts.merged_domains_path()).unwrap();
    assert_eq!(merged, "chr1\t0\t400000\tID_1\nchr1\t200000\t300000\tID_3\n");
    let relations = fs::read_to_string(opts.relation_list_path()).unwrap();
    assert_eq!(relations, "chr1\tID_1\tID_3\n");
}

#[test]
fn test_peak_filter_missing_chromosome_policy() {
    let dir = TempDir::new().unwrap();
    let d1 = write_file(dir.path(), "tads.bed", "chr1\t0\t100000\nchr2\t0\t100000\n");
    let peaks = write_file(dir.path(), "ctcf.bed", "chr1\t100\t200\n");

    let mut opts = options(&dir, vec![d1], Some(peaks));
    let stats = run(&opts).unwrap();
    assert_eq!(stats.removed_by_peaks, 1);
    assert_eq!(stats.domains, 1);

    opts.config.missing_peaks = MissingPeaksPolicy::KeepDomains;
    let stats = run(&opts).unwrap();
    assert_eq!(stats.removed_by_peaks, 0);
    assert_eq!(stats.domains, 2);
}

#[test]
fn test_all_domains_filtered_is_empty_input() {
    let dir = TempDir::new().unwrap();
    let d1 = write_file(dir.path(), "tads.bed", "chr1\t0\t100000\n");
    let peaks = write_file(dir.path(), "ctcf.bed", "chr2\t100\t200\n");

    let opts = options(&dir, vec![d1], Some(peaks));
    assert!(matches!(run(&opts), Err(TadMergeError::EmptyInput(_))));
}

#[test]
fn test_missing_input_file() {
    let dir = TempDir::new().unwrap();
    let opts = options(&dir, vec![dir.path().join("missing.bed")], None);

    let err = run(&opts).unwrap_err();
    assert!(matches!(err, TadMergeError::Io { .. }));
    assert!(err.to_string().contains("missing.bed"));
    assert!(!opts.merged_domains_path().exists());
}

#[test]
fn test_malformed_input_aborts() {
    let dir = TempDir::new().unwrap();
    let d1 = write_file(dir.path(), "a.bed", "chr1\t0\t100000\n");
    let d2 = write_file(dir.path(), "b.bed", "chr1\t0\n");

    let opts = options(&dir, vec![d1, d2], None);
    let err = run(&opts).unwrap_err();
    assert!(matches!(err, TadMergeError::MalformedRecord { line: 1, .. }));
    assert!(err.to_string().contains("b.bed"));
}

#[test]
fn test_invalid_config_rejected() {
    let dir = TempDir::new().unwrap();
    let d1 = write_file(dir.path(), "a.bed", "chr1\t0\t100000\n");

    let mut opts = options(&dir, vec![d1], None);
    opts.config.percent = -1.0;
    assert!(matches!(run(&opts), Err(TadMergeError::InvalidConfig(_))));
}

#[test]
fn test_no_domain_files() {
    let dir = TempDir::new().unwrap();
    let opts = options(&dir, vec![], None);
    assert!(matches!(run(&opts), Err(TadMergeError::EmptyInput(_))));
}
