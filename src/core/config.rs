//! Run configuration
//!
//! Knobs consumed by the merge, relationship and peak-filter stages.
//! The CLI fills these in; library callers can start from `Default`.

use crate::core::error::{Result, TadMergeError};

/// Number of leading records sampled when inferring a file's resolution
pub const RESOLUTION_SAMPLE_SIZE: usize = 20;

/// Default overlap fraction for relationship classification
pub const DEFAULT_PERCENT: f64 = 0.5;

/// What to do with domains on a chromosome that has no peaks at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingPeaksPolicy {
    /// Treat the chromosome as having no boundary support anywhere
    #[default]
    RemoveDomains,
    /// Leave the chromosome's domains untouched
    KeepDomains,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MergeConfig {
    /// Maximum boundary difference still treated as the same boundary
    pub tolerance: u64,
    /// Fraction of a domain's span used by the overlap rule
    pub percent: f64,
    /// Minimum number of peaks a bin needs to be emitted
    pub min_peaks: u32,
    /// Peak bin width; inferred from the domain files when `None`
    pub bin_size: Option<u64>,
    pub missing_peaks: MissingPeaksPolicy,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            tolerance: 0,
            percent: DEFAULT_PERCENT,
            min_peaks: 1,
            bin_size: None,
            missing_peaks: MissingPeaksPolicy::default(),
        }
    }
}

impl MergeConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.percent.is_finite() || self.percent < 0.0 {
            return Err(TadMergeError::InvalidConfig(format!(
                "percent must be a non-negative number, got {}",
                self.percent
            )));
        }
        if self.min_peaks == 0 {
            return Err(TadMergeError::InvalidConfig(
                "minimum peak count must be at least 1".to_string(),
            ));
        }
        if self.bin_size == Some(0) {
            return Err(TadMergeError::InvalidConfig(
                "bin size must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
