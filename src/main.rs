//! FastTadMerge CLI entry point
//!
//! Merges TAD domain files into `mergedDomains.bed` and `relationList.bed`.

use anyhow::Context;
use clap::Parser;
use fast_tadmerge::core::{MergeConfig, MissingPeaksPolicy, DEFAULT_PERCENT};
use fast_tadmerge::pipeline::{self, PipelineOptions};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "fast-tadmerge")]
#[command(about = "Merge TAD domain files into one consolidated set and a parent/child hierarchy")]
#[command(version)]
#[command(author = "FastTadMerge Contributors")]
struct Cli {
    /// Domain file of the first matrix
    #[arg(short = 'd', long = "domain1")]
    domain1: PathBuf,

    /// Further domain files, merged in the given order
    #[arg(short = 'l', long = "domainList", num_args = 1..)]
    domain_list: Vec<PathBuf>,

    /// Minimum boundary difference for two TADs to count as separate domains
    #[arg(short = 'v', long = "value", default_value = "0")]
    value: u64,

    /// Fraction of a TAD's span that must be covered for two TADs to be related
    #[arg(short = 'p', long = "percent", default_value_t = DEFAULT_PERCENT)]
    percent: f64,

    /// CTCF peak file; enables removal of domains without peak support
    #[arg(short = 'c', long = "ctcfFile")]
    ctcf_file: Option<PathBuf>,

    /// Minimum number of peaks a bin needs to support a boundary
    #[arg(short = 'm', long = "minPeak", default_value = "1")]
    min_peak: u32,

    /// Peak bin size (default: inferred from the domain files)
    #[arg(long = "binSize")]
    bin_size: Option<u64>,

    /// Keep domains on chromosomes without any peak instead of removing them
    #[arg(long = "keepUnpeakedChroms")]
    keep_unpeaked_chroms: bool,

    /// Output directory
    #[arg(short = 'o', long = "outdir", default_value = ".")]
    outdir: PathBuf,
}

impl Cli {
    fn into_options(self) -> PipelineOptions {
        let missing_peaks = if self.keep_unpeaked_chroms {
            MissingPeaksPolicy::KeepDomains
        } else {
            MissingPeaksPolicy::RemoveDomains
        };

        let mut domain_files = vec![self.domain1];
        domain_files.extend(self.domain_list);

        PipelineOptions {
            domain_files,
            peak_file: self.ctcf_file,
            outdir: self.outdir,
            config: MergeConfig {
                tolerance: self.value,
                percent: self.percent,
                min_peaks: self.min_peak,
                bin_size: self.bin_size,
                missing_peaks,
            },
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();

    let options = cli.into_options();
    std::fs::create_dir_all(&options.outdir)
        .with_context(|| format!("Failed to create output directory {:?}", options.outdir))?;

    eprintln!(
        "Merging {} domain files -> {:?}",
        options.domain_files.len(),
        options.outdir
    );
    let stats = pipeline::run(&options).context("Domain merge failed")?;

    eprintln!("\n=== Merge Statistics ===");
    eprintln!("Input sets:      {}", stats.input_sets);
    eprintln!("Input domains:   {}", stats.input_records);
    eprintln!("Merged domains:  {}", stats.merged);
    if let Some(bin_size) = stats.bin_size {
        eprintln!("Peak bin size:   {}", bin_size);
        eprintln!("Removed (peaks): {}", stats.removed_by_peaks);
    }
    eprintln!("Final domains:   {}", stats.domains);
    eprintln!("Parent edges:    {}", stats.edges);
    eprintln!("Relations:       {}", stats.relations);
    eprintln!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());

    Ok(())
}
