//! Hierarchy output
//!
//! Writes the consolidated domains (`chrom start end ID_<n>`) and the
//! relationship list (`chrom parent_id child_id`, one line per child).

use crate::core::domain::ConsolidatedDomainSet;
use crate::core::error::{Result, TadMergeError};
use crate::core::io::create_writer;
use crate::core::relation::RelationForest;
use log::warn;
use std::io::{self, Write};
use std::path::Path;

/// Default file name for the consolidated domains
pub const MERGED_DOMAINS_FILE: &str = "mergedDomains.bed";

/// Default file name for the relationship list
pub const RELATION_LIST_FILE: &str = "relationList.bed";

/// Write one line per consolidated domain
pub fn write_domains<W: Write>(writer: &mut W, domains: &ConsolidatedDomainSet) -> io::Result<usize> {
    let mut lines = 0;
    for domain in domains.iter() {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}",
            domain.chrom(),
            domain.start(),
            domain.end(),
            domain.id
        )?;
        lines += 1;
    }
    Ok(lines)
}

/// Write one line per (parent, child) pair
pub fn write_relations<W: Write>(writer: &mut W, forest: &RelationForest) -> io::Result<usize> {
    let mut lines = 0;
    for edge in forest.edges() {
        for child in edge.children {
            writeln!(writer, "{}\t{}\t{}", edge.chrom, edge.parent, child)?;
            lines += 1;
        }
    }
    Ok(lines)
}

/// Write the consolidated domain file
pub fn export_domains(path: &Path, domains: &ConsolidatedDomainSet) -> Result<usize> {
    if domains.is_empty() {
        return Err(TadMergeError::EmptyInput(
            "no consolidated domains to export".to_string(),
        ));
    }
    let mut writer = create_writer(path)?;
    let lines = write_domains(&mut writer, domains).map_err(|e| TadMergeError::io(path, e))?;
    writer.flush().map_err(|e| TadMergeError::io(path, e))?;
    Ok(lines)
}

/// Write the relationship file; an empty forest yields an empty file
pub fn export_relations(path: &Path, forest: &RelationForest) -> Result<usize> {
    if forest.is_empty() {
        warn!("No domain relationships found; {} will be empty", path.display());
    }
    let mut writer = create_writer(path)?;
    let lines = write_relations(&mut writer, forest).map_err(|e| TadMergeError::io(path, e))?;
    writer.flush().map_err(|e| TadMergeError::io(path, e))?;
    Ok(lines)
}
