//! Core domain consolidation functionality
//!
//! This module contains the domain data model, the pairwise merger and
//! multi-set reducer, the relationship builder and the peak-based
//! boundary filter.

pub mod config;
pub mod domain;
pub mod error;
pub mod io;
pub mod merge;
pub mod peaks;
pub mod relation;

pub use config::{MergeConfig, MissingPeaksPolicy, DEFAULT_PERCENT, RESOLUTION_SAMPLE_SIZE};
pub use domain::{
    ChromGroup, ChromGroups, ConsolidatedDomain, ConsolidatedDomainSet, DomainId, DomainSet,
    IntervalRecord,
};
pub use error::{RecordParseError, Result, TadMergeError};
pub use merge::{domain_set_from_tuples, merge_chrom, merge_pair, reduce_domain_sets};
pub use peaks::{aggregate_peaks, bin_positions, filter_by_peaks, FilterStats, PeakBin, PeakBins};
pub use relation::{
    build_relations, classify_pair, relate_chrom, ChromRelations, RelationEdge, RelationForest,
    RelationKind,
};
