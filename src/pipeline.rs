//! End-to-end merge run
//!
//! Loader(s) -> reducer -> optional peak filter -> relationship builder ->
//! exporter. Each stage consumes the full output of the previous one.

use crate::core::config::MergeConfig;
use crate::core::error::{Result, TadMergeError};
use crate::core::merge::reduce_domain_sets;
use crate::core::peaks::{aggregate_peaks, filter_by_peaks};
use crate::core::relation::build_relations;
use crate::formats::bed::load_domain_file;
use crate::formats::hierarchy::{
    export_domains, export_relations, MERGED_DOMAINS_FILE, RELATION_LIST_FILE,
};
use log::info;
use std::path::PathBuf;

/// Inputs and settings of one run
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Domain files, merged left to right
    pub domain_files: Vec<PathBuf>,
    /// Optional peak file enabling the boundary filter
    pub peak_file: Option<PathBuf>,
    /// Directory receiving the output files
    pub outdir: PathBuf,
    pub config: MergeConfig,
}

/// Run statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub input_sets: usize,
    pub input_records: usize,
    pub merged: usize,
    pub removed_by_peaks: usize,
    pub domains: usize,
    pub edges: usize,
    pub relations: usize,
    /// Bin size used by the peak filter
    pub bin_size: Option<u64>,
}

impl PipelineOptions {
    pub fn merged_domains_path(&self) -> PathBuf {
        self.outdir.join(MERGED_DOMAINS_FILE)
    }

    pub fn relation_list_path(&self) -> PathBuf {
        self.outdir.join(RELATION_LIST_FILE)
    }
}

/// Execute the full pipeline and write both output files
pub fn run(options: &PipelineOptions) -> Result<MergeStats> {
    let config = &options.config;
    config.validate()?;

    if options.domain_files.is_empty() {
        return Err(TadMergeError::EmptyInput("no domain files given".to_string()));
    }

    let mut stats = MergeStats {
        input_sets: options.domain_files.len(),
        ..Default::default()
    };

    let mut sets = Vec::with_capacity(options.domain_files.len());
    let mut resolution: Option<u64> = None;
    for path in &options.domain_files {
        let loaded = load_domain_file(path)?;
        info!("Loaded {} domains from {}", loaded.set.len(), path.display());
        stats.input_records += loaded.set.len();
        resolution = match (resolution, loaded.resolution) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        sets.push(loaded.set);
    }

    let mut domains = reduce_domain_sets(&sets, config.tolerance)?;
    stats.merged = domains.len();

    if let Some(peak_file) = &options.peak_file {
        let bin_size = config.bin_size.or(resolution).ok_or_else(|| {
            TadMergeError::InvalidConfig(
                "cannot infer a peak bin size from the domain files; set one explicitly"
                    .to_string(),
            )
        })?;
        stats.bin_size = Some(bin_size);

        let peaks = load_domain_file(peak_file)?;
        info!(
            "Loaded {} peaks from {}, binning at {} bp",
            peaks.set.len(),
            peak_file.display(),
            bin_size
        );
        let bins = aggregate_peaks(&peaks.set, bin_size, config.min_peaks);
        let filtered = filter_by_peaks(&mut domains, &bins, config.missing_peaks);
        stats.removed_by_peaks = filtered.removed;
    }
    stats.domains = domains.len();

    export_domains(&options.merged_domains_path(), &domains)?;

    let forest = build_relations(&domains, config.percent)?;
    stats.edges = forest.edge_count();
    stats.relations = export_relations(&options.relation_list_path(), &forest)?;

    Ok(stats)
}
