//! Peak aggregation and boundary filtering
//!
//! Point features (e.g. CTCF peaks) are counted in fixed-width bins aligned
//! to multiples of the bin size. A consolidated domain whose start boundary
//! is not covered by a bin with enough peaks is removed.

use crate::core::config::MissingPeaksPolicy;
use crate::core::domain::{ChromGroups, ConsolidatedDomain, ConsolidatedDomainSet, DomainSet};
use log::{debug, info, warn};

/// A window `[bin_start, bin_end)` holding `count` peaks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeakBin {
    pub bin_start: u64,
    pub bin_end: u64,
    pub count: u32,
}

/// Peak bins grouped by chromosome
pub type PeakBins = ChromGroups<PeakBin>;

/// Outcome of the boundary filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub checked: usize,
    pub removed: usize,
    /// Chromosomes with domains but no peak records
    pub chroms_without_peaks: Vec<String>,
}

/// Count sorted peak positions into bins of `bin_size`
///
/// Only bins with at least `min_peaks` peaks are emitted. Positions past the
/// current window skip forward a whole number of bins at once.
pub fn bin_positions(positions: &[u64], bin_size: u64, min_peaks: u32) -> Vec<PeakBin> {
    let mut bins = Vec::new();
    let Some(&first) = positions.first() else {
        return bins;
    };
    if bin_size == 0 {
        return bins;
    }

    let mut left = first - first % bin_size;
    let mut count = 0u32;

    for &pos in positions {
        if pos < left + bin_size {
            count += 1;
            continue;
        }
        if count >= min_peaks {
            bins.push(PeakBin {
                bin_start: left,
                bin_end: left + bin_size,
                count,
            });
        }
        left += (pos - left) / bin_size * bin_size;
        count = 1;
    }

    if count >= min_peaks {
        bins.push(PeakBin {
            bin_start: left,
            bin_end: left + bin_size,
            count,
        });
    }
    bins
}

/// Aggregate a loaded peak set into per-chromosome bins
///
/// Peak positions are the records' start coordinates. Every chromosome with
/// peak records gets a group, even when none of its bins reaches `min_peaks`.
pub fn aggregate_peaks(peaks: &DomainSet, bin_size: u64, min_peaks: u32) -> PeakBins {
    let mut bins = PeakBins::new();
    for group in peaks.groups() {
        let positions: Vec<u64> = group.items.iter().map(|p| p.start).collect();
        let chrom_bins = bin_positions(&positions, bin_size, min_peaks);
        debug!(
            "{}: {} peaks in {} bins of {} bp",
            group.chrom,
            positions.len(),
            chrom_bins.len(),
            bin_size
        );
        bins.push_group(&group.chrom, chrom_bins);
    }
    bins
}

/// Whether a start boundary has peak support, walking `cursor` forward over `bins`
fn boundary_supported(start: u64, bins: &[PeakBin], cursor: &mut usize) -> bool {
    while *cursor < bins.len() && bins[*cursor].bin_end < start {
        *cursor += 1;
    }
    bins.get(*cursor).is_some_and(|bin| bin.bin_start <= start)
}

/// Keep the domains of one chromosome whose start is covered by a bin
fn filter_chrom(domains: &mut Vec<ConsolidatedDomain>, bins: &[PeakBin]) -> usize {
    let before = domains.len();
    let mut cursor = 0;
    domains.retain(|d| boundary_supported(d.start(), bins, &mut cursor));
    before - domains.len()
}

/// Remove domains whose start boundary has no supporting peak bin
///
/// Mutates `domains` in place; surviving domains keep their ids.
pub fn filter_by_peaks(
    domains: &mut ConsolidatedDomainSet,
    bins: &PeakBins,
    missing: MissingPeaksPolicy,
) -> FilterStats {
    let mut stats = FilterStats {
        checked: domains.len(),
        ..Default::default()
    };

    domains.retain_groups(|chrom, items| match bins.get(chrom) {
        Some(chrom_bins) => stats.removed += filter_chrom(items, chrom_bins),
        None => {
            warn!("No peaks on {} ({} domains)", chrom, items.len());
            stats.chroms_without_peaks.push(chrom.to_string());
            if missing == MissingPeaksPolicy::RemoveDomains {
                stats.removed += items.len();
                items.clear();
            }
        }
    });

    info!(
        "Peak filter removed {} of {} domains",
        stats.removed, stats.checked
    );
    stats
}
