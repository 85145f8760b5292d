//! Domain set merging
//!
//! Two chromosome-grouped, start-sorted domain sets are merged with a
//! two-cursor walk per chromosome. An element is kept when its start or end
//! differs from the opposing cursor's element by more than the tolerance;
//! otherwise it is a near-duplicate and dropped. Cursor movement depends only
//! on the start comparison, so the tolerance never changes the walk itself.
//! A record identical to one already emitted is never emitted twice.

use crate::core::domain::{ConsolidatedDomainSet, DomainSet, IntervalRecord};
use crate::core::error::{Result, TadMergeError};
use log::{debug, info};

/// True if an identical record sits in the equal-start tail of `merged`
fn already_emitted(merged: &[IntervalRecord], record: &IntervalRecord) -> bool {
    merged
        .iter()
        .rev()
        .take_while(|r| r.start == record.start)
        .any(|r| r.end == record.end)
}

/// Merge the records of a single chromosome
///
/// Equal starts are resolved in favour of `d1`. Once either side is
/// exhausted the remainder of the other is appended without the tolerance
/// test; exact copies of emitted records are still skipped.
pub fn merge_chrom(d1: &[IntervalRecord], d2: &[IntervalRecord], tolerance: u64) -> Vec<IntervalRecord> {
    let mut merged: Vec<IntervalRecord> = Vec::with_capacity(d1.len() + d2.len());
    let (mut pos1, mut pos2) = (0, 0);

    while pos1 < d1.len() && pos2 < d2.len() {
        let (a, b) = (&d1[pos1], &d2[pos2]);
        let distinct = !a.same_boundaries(b, tolerance);

        let candidate = if a.start <= b.start {
            pos1 += 1;
            a
        } else {
            pos2 += 1;
            b
        };
        if distinct && !already_emitted(&merged, candidate) {
            merged.push(candidate.clone());
        }
    }

    for record in d1[pos1..].iter().chain(&d2[pos2..]) {
        if !already_emitted(&merged, record) {
            merged.push(record.clone());
        }
    }
    merged
}

/// Merge two domain sets chromosome by chromosome
///
/// Output chromosomes follow `d1`'s order, then chromosomes only present in
/// `d2` in `d2`'s order.
pub fn merge_pair(d1: &DomainSet, d2: &DomainSet, tolerance: u64) -> DomainSet {
    let mut merged = DomainSet::new();

    for group in d1.groups() {
        let other = d2.get(&group.chrom).unwrap_or(&[]);
        merged.push_group(&group.chrom, merge_chrom(&group.items, other, tolerance));
    }
    for group in d2.groups() {
        if !d1.contains_chrom(&group.chrom) {
            merged.push_group(&group.chrom, group.items.clone());
        }
    }

    debug!(
        "Merged {} + {} records into {} (tolerance {})",
        d1.len(),
        d2.len(),
        merged.len(),
        tolerance
    );
    merged
}

/// Fold `merge_pair` left to right over all sets, then assign `ID_<n>`
/// identifiers in the final order
pub fn reduce_domain_sets(sets: &[DomainSet], tolerance: u64) -> Result<ConsolidatedDomainSet> {
    let (first, rest) = sets
        .split_first()
        .ok_or_else(|| TadMergeError::EmptyInput("no domain sets to merge".to_string()))?;

    let merged = rest
        .iter()
        .fold(first.clone(), |acc, next| merge_pair(&acc, next, tolerance));

    if merged.is_empty() {
        return Err(TadMergeError::EmptyInput(
            "merged domain set contains no records".to_string(),
        ));
    }

    info!(
        "Reduced {} domain sets ({} records) to {} domains",
        sets.len(),
        sets.iter().map(DomainSet::len).sum::<usize>(),
        merged.len()
    );
    Ok(ConsolidatedDomainSet::assign_ids(merged))
}

/// Build a set from `(chrom, start, end)` triples; handy for callers that
/// already hold coordinates in memory
pub fn domain_set_from_tuples<S: AsRef<str>>(tuples: &[(S, u64, u64)]) -> DomainSet {
    DomainSet::from_records(
        tuples
            .iter()
            .map(|(chrom, start, end)| IntervalRecord::new(chrom.as_ref(), *start, *end)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(tuples: &[(&str, u64, u64)]) -> DomainSet {
        domain_set_from_tuples(tuples)
    }

    fn coords(set: &DomainSet) -> Vec<(String, u64, u64)> {
        set.iter().map(|r| (r.chrom.clone(), r.start, r.end)).collect()
    }

    #[test]
    fn test_identical_single_domain_collapses() {
        let d1 = set(&[("chr1", 0, 100)]);
        let d2 = set(&[("chr1", 0, 100)]);

        let consolidated = reduce_domain_sets(&[d1, d2], 0).unwrap();
        let out: Vec<(String, u64, u64, String)> = consolidated
            .iter()
            .map(|d| (d.chrom().to_string(), d.start(), d.end(), d.id.to_string()))
            .collect();
        assert_eq!(out, vec![("chr1".to_string(), 0, 100, "ID_1".to_string())]);
    }

    #[test]
    fn test_near_boundaries_collapse_within_tolerance() {
        let d1 = set(&[("chr1", 0, 100), ("chr1", 100, 200)]);
        let d2 = set(&[("chr1", 0, 95), ("chr1", 105, 200)]);

        let merged = merge_pair(&d1, &d2, 10);
        assert_eq!(
            coords(&merged),
            vec![("chr1".to_string(), 0, 95), ("chr1".to_string(), 105, 200)]
        );
    }

    #[test]
    fn test_boundaries_beyond_tolerance_are_all_kept() {
        let d1 = set(&[("chr1", 0, 100), ("chr1", 100, 200)]);
        let d2 = set(&[("chr1", 0, 50), ("chr1", 50, 200)]);

        let merged = merge_pair(&d1, &d2, 10);
        assert_eq!(merged.len(), 4);
        let starts: Vec<u64> = merged.iter().map(|r| r.start).collect();
        assert_eq!(starts, vec![0, 0, 50, 100]);
    }

    #[test]
    fn test_tie_goes_to_first_set() {
        let d1 = set(&[("chr1", 0, 300)]);
        let d2 = set(&[("chr1", 0, 100), ("chr1", 100, 300)]);

        let merged = merge_pair(&d1, &d2, 0);
        assert_eq!(
            coords(&merged),
            vec![
                ("chr1".to_string(), 0, 300),
                ("chr1".to_string(), 0, 100),
                ("chr1".to_string(), 100, 300),
            ]
        );
    }

    #[test]
    fn test_self_merge_with_equal_starts_drops_copies() {
        let d = set(&[("chr1", 0, 10), ("chr1", 0, 10), ("chr1", 0, 20), ("chr1", 5, 30)]);

        let merged = merge_pair(&d, &d, 0);
        assert_eq!(
            coords(&merged),
            vec![
                ("chr1".to_string(), 0, 20),
                ("chr1".to_string(), 0, 10),
                ("chr1".to_string(), 5, 30),
            ]
        );
    }

    #[test]
    fn test_exhausted_side_appends_remainder() {
        let d1 = set(&[("chr1", 0, 100)]);
        let d2 = set(&[("chr1", 200, 300), ("chr1", 300, 400)]);

        let merged = merge_pair(&d1, &d2, 0);
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn test_chromosome_order() {
        let d1 = set(&[("chr2", 0, 100), ("chr1", 0, 100)]);
        let d2 = set(&[("chr3", 0, 100), ("chr1", 0, 100)]);

        let merged = merge_pair(&d1, &d2, 0);
        let chroms: Vec<&str> = merged.chroms().collect();
        assert_eq!(chroms, vec!["chr2", "chr1", "chr3"]);
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn test_empty_side() {
        let d1 = set(&[("chr1", 0, 100)]);
        let merged = merge_pair(&d1, &DomainSet::new(), 0);
        assert_eq!(coords(&merged), coords(&d1));

        let merged = merge_pair(&DomainSet::new(), &d1, 0);
        assert_eq!(coords(&merged), coords(&d1));
    }

    #[test]
    fn test_reduce_three_sets() {
        let d0 = set(&[("chr1", 0, 100)]);
        let d1 = set(&[("chr1", 0, 100), ("chr1", 100, 200)]);
        let d2 = set(&[("chr1", 100, 200), ("chr2", 0, 50)]);

        let consolidated = reduce_domain_sets(&[d0, d1, d2], 0).unwrap();
        let ids: Vec<u64> = consolidated.iter().map(|d| d.id.number()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(consolidated.groups().len(), 2);
    }

    #[test]
    fn test_reduce_single_set_only_tags() {
        let d0 = set(&[("chr1", 0, 100), ("chr1", 0, 100)]);
        let consolidated = reduce_domain_sets(&[d0], 0).unwrap();
        assert_eq!(consolidated.len(), 2);
    }

    #[test]
    fn test_reduce_empty_input() {
        assert!(matches!(reduce_domain_sets(&[], 0), Err(TadMergeError::EmptyInput(_))));
        assert!(matches!(
            reduce_domain_sets(&[DomainSet::new(), DomainSet::new()], 0),
            Err(TadMergeError::EmptyInput(_))
        ));
    }
}
