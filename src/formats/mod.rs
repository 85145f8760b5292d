//! File format adapters
//!
//! Tab-separated domain/peak input and the two hierarchy output files.

pub mod bed;
pub mod hierarchy;

pub use bed::{load_domain_file, load_domains_from_reader, parse_interval_line, LoadedDomains};
pub use hierarchy::{
    export_domains, export_relations, write_domains, write_relations, MERGED_DOMAINS_FILE,
    RELATION_LIST_FILE,
};
