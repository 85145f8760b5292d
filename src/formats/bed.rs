//! Domain/peak file loader
//!
//! Reads tab-separated `chrom start end [...]` files into chromosome-grouped
//! record sets. Only the first three fields are interpreted; anything after
//! them is ignored. Blank lines and `#`/`track`/`browser` headers are skipped.

use crate::core::config::RESOLUTION_SAMPLE_SIZE;
use crate::core::domain::{DomainSet, IntervalRecord};
use crate::core::error::{RecordParseError, Result, TadMergeError};
use crate::core::io::{open_reader, LineIterator};
use log::{debug, warn};
use memchr::memchr;
use std::collections::HashSet;
use std::io::BufRead;
use std::path::Path;

/// A parsed annotation file
#[derive(Debug, Clone)]
pub struct LoadedDomains {
    pub set: DomainSet,
    /// Smallest bin size inferred from the leading records, if any
    pub resolution: Option<u64>,
}

/// True for lines that carry no record
pub fn is_skippable(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || trimmed.starts_with('#')
        || trimmed.starts_with("track")
        || trimmed.starts_with("browser")
}

/// Split the first three tab-separated fields off a line
fn leading_fields(line: &[u8]) -> std::result::Result<[&[u8]; 3], RecordParseError> {
    let mut fields: [&[u8]; 3] = [&[]; 3];
    let mut rest = line;
    for (i, field) in fields.iter_mut().enumerate() {
        match memchr(b'\t', rest) {
            Some(tab) => {
                *field = &rest[..tab];
                rest = &rest[tab + 1..];
            }
            None if i == 2 => {
                *field = rest;
            }
            None => {
                return Err(RecordParseError::TooFewFields { expected: 3, found: i + 1 });
            }
        }
    }
    Ok(fields)
}

fn parse_coord(field: &[u8], name: &'static str) -> std::result::Result<u64, RecordParseError> {
    let text = std::str::from_utf8(field).map_err(|_| RecordParseError::InvalidUtf8(name))?;
    text.trim()
        .parse()
        .map_err(|_| RecordParseError::InvalidNumber(name, text.to_string()))
}

/// Parse one `chrom<TAB>start<TAB>end[<TAB>...]` line
pub fn parse_interval_line(line: &str) -> std::result::Result<IntervalRecord, RecordParseError> {
    if line.is_empty() {
        return Err(RecordParseError::EmptyLine);
    }
    let [chrom, start, end] = leading_fields(line.as_bytes())?;

    let chrom = std::str::from_utf8(chrom).map_err(|_| RecordParseError::InvalidUtf8("chrom"))?;
    let start = parse_coord(start, "start")?;
    let end = parse_coord(end, "end")?;
    if end < start {
        return Err(RecordParseError::InvertedInterval { start, end });
    }

    Ok(IntervalRecord::new(chrom, start, end))
}

/// Estimate the bin size a boundary value was generated with
///
/// The least significant nonzero digit is kept along with the trailing
/// zeros, e.g. `1_250_000 -> 50_000`. Zero carries no information.
pub fn boundary_resolution(value: u64) -> Option<u64> {
    if value == 0 {
        return None;
    }
    let mut rest = value;
    let mut scale = 1u64;
    while rest % 10 == 0 {
        rest /= 10;
        scale *= 10;
    }
    Some(rest % 10 * scale)
}

/// Smallest boundary resolution over the first records of a file
pub fn min_resolution<'a, I>(records: I) -> Option<u64>
where
    I: IntoIterator<Item = &'a IntervalRecord>,
{
    records
        .into_iter()
        .take(RESOLUTION_SAMPLE_SIZE)
        .flat_map(|r| [r.start, r.end])
        .filter_map(boundary_resolution)
        .min()
}

/// Load records from any buffered reader; `source` names the input in errors
pub fn load_domains_from_reader<R: BufRead>(reader: R, source: &Path) -> Result<LoadedDomains> {
    let mut lines = LineIterator::new(reader);
    let mut set = DomainSet::new();
    let mut sample = Vec::with_capacity(RESOLUTION_SAMPLE_SIZE);
    let mut reopened: HashSet<String> = HashSet::new();
    let mut line_number = 0;

    while let Some(line) = lines.next_line() {
        line_number += 1;
        let line = line.map_err(|e| TadMergeError::io(source, e))?;
        if is_skippable(line) {
            continue;
        }

        let record = parse_interval_line(line)
            .map_err(|e| TadMergeError::malformed(source, line_number, e))?;

        if set.last_chrom() != Some(record.chrom.as_str())
            && set.contains_chrom(&record.chrom)
            && reopened.insert(record.chrom.clone())
        {
            warn!(
                "{}: records for {} are not contiguous (line {}); grouping them together",
                source.display(),
                record.chrom,
                line_number
            );
        }

        if sample.len() < RESOLUTION_SAMPLE_SIZE {
            sample.push(record.clone());
        }
        let chrom = record.chrom.clone();
        set.push(&chrom, record);
    }

    let resolution = min_resolution(&sample);
    debug!(
        "Loaded {} records on {} chromosomes from {} (resolution {:?})",
        set.len(),
        set.groups().len(),
        source.display(),
        resolution
    );
    Ok(LoadedDomains { set, resolution })
}

/// Load a domain or peak annotation file (plain, gzip or bzip2)
pub fn load_domain_file(path: &Path) -> Result<LoadedDomains> {
    let reader = open_reader(path)?;
    load_domains_from_reader(reader, path)
}
