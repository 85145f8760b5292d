//! FastTadMerge - consolidate TAD calls into one domain hierarchy
//!
//! Merges several domain annotation sets (e.g. TADs called at different
//! resolutions) into one consolidated set, relates the merged domains as
//! parents and children, and optionally drops domains whose start boundary
//! has no supporting CTCF peak.
//!
//! # Example
//!
//! ```ignore
//! use fast_tadmerge::{load_domain_file, reduce_domain_sets, build_relations};
//! use std::path::Path;
//!
//! let d1 = load_domain_file(Path::new("tads_10kb.bed"))?.set;
//! let d2 = load_domain_file(Path::new("tads_25kb.bed"))?.set;
//!
//! let domains = reduce_domain_sets(&[d1, d2], 10_000)?;
//! let forest = build_relations(&domains, 0.5)?;
//! ```

pub mod core;
pub mod formats;
pub mod pipeline;

// Re-export commonly used types
pub use crate::core::{
    build_relations, filter_by_peaks, merge_pair, reduce_domain_sets, ConsolidatedDomainSet,
    DomainId, DomainSet, IntervalRecord, MergeConfig, MissingPeaksPolicy, RelationForest, Result,
    TadMergeError,
};
pub use crate::formats::{load_domain_file, LoadedDomains};
pub use crate::pipeline::{run, MergeStats, PipelineOptions};
