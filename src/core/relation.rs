//! Domain relationship forest
//!
//! Classifies pairs of consolidated domains on the same chromosome as
//! overlapping or nested and collects parent -> children edges.
//!
//! For each domain `A` the candidates `B` are the domains following it, up
//! to the first one starting past `A.end`. Two rules are tried in order:
//!
//! 1. Overlap: with `half = span(A) * percent`, the pair overlaps when
//!    `A.end - half > B.start` and `A.end + half <= B.end`. The longer
//!    domain becomes the parent.
//! 2. Containment: `A.start <= B.start` and `A.end >= B.end` makes `A` the
//!    parent of `B`.

use crate::core::domain::{ConsolidatedDomain, ConsolidatedDomainSet, DomainId};
use crate::core::error::{Result, TadMergeError};
use log::{debug, info};
use std::collections::BTreeMap;

/// How a pair of domains is related
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    Overlap,
    Containment,
}

/// One parent domain and all domains classified as its children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationEdge<'a> {
    pub chrom: &'a str,
    pub parent: DomainId,
    pub children: &'a [DomainId],
}

/// Edges of one chromosome keyed by parent id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChromRelations {
    pub chrom: String,
    edges: BTreeMap<DomainId, Vec<DomainId>>,
}

impl ChromRelations {
    pub fn new(chrom: impl Into<String>) -> Self {
        Self {
            chrom: chrom.into(),
            edges: BTreeMap::new(),
        }
    }

    /// Register `child` under `parent`, appending to an existing edge
    pub fn add(&mut self, parent: DomainId, child: DomainId) {
        self.edges.entry(parent).or_default().push(child);
    }

    /// Children of `parent` in discovery order
    pub fn children(&self, parent: DomainId) -> Option<&[DomainId]> {
        self.edges.get(&parent).map(Vec::as_slice)
    }

    /// Edges ordered by ascending parent id
    pub fn edges(&self) -> impl Iterator<Item = RelationEdge<'_>> {
        self.edges.iter().map(move |(parent, children)| RelationEdge {
            chrom: &self.chrom,
            parent: *parent,
            children: children.as_slice(),
        })
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Parent -> children edges for all chromosomes, in consolidated set order
#[derive(Debug, Clone, Default)]
pub struct RelationForest {
    chroms: Vec<ChromRelations>,
}

impl RelationForest {
    pub fn chroms(&self) -> &[ChromRelations] {
        &self.chroms
    }

    pub fn get(&self, chrom: &str) -> Option<&ChromRelations> {
        self.chroms.iter().find(|c| c.chrom == chrom)
    }

    pub fn edges(&self) -> impl Iterator<Item = RelationEdge<'_>> {
        self.chroms.iter().flat_map(|c| c.edges())
    }

    /// Number of parent edges
    pub fn edge_count(&self) -> usize {
        self.chroms.iter().map(ChromRelations::edge_count).sum()
    }

    /// Number of (parent, child) pairs
    pub fn pair_count(&self) -> usize {
        self.edges().map(|e| e.children.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.chroms.iter().all(ChromRelations::is_empty)
    }
}

/// Classify an ordered pair, `a` preceding `b` in the sequence.
/// Returns the kind plus `(parent, child)` ids on a match.
pub fn classify_pair(
    a: &ConsolidatedDomain,
    b: &ConsolidatedDomain,
    percent: f64,
) -> Option<(RelationKind, DomainId, DomainId)> {
    let (a_start, a_end) = (a.start() as f64, a.end() as f64);
    let (b_start, b_end) = (b.start() as f64, b.end() as f64);
    let half = (a_end - a_start) * percent;

    if a_end - half > b_start && a_end + half <= b_end {
        if a.span() > b.span() {
            Some((RelationKind::Overlap, a.id, b.id))
        } else {
            Some((RelationKind::Overlap, b.id, a.id))
        }
    } else if a.start() <= b.start() && a.end() >= b.end() {
        Some((RelationKind::Containment, a.id, b.id))
    } else {
        None
    }
}

/// Build the relationships of one chromosome's domains
pub fn relate_chrom(chrom: &str, domains: &[ConsolidatedDomain], percent: f64) -> ChromRelations {
    let mut relations = ChromRelations::new(chrom);

    for (i, a) in domains.iter().enumerate() {
        for b in &domains[i + 1..] {
            if b.start() > a.end() {
                break;
            }
            if let Some((kind, parent, child)) = classify_pair(a, b, percent) {
                debug!("{}: {} -> {} ({:?})", chrom, parent, child, kind);
                relations.add(parent, child);
            }
        }
    }
    relations
}

/// Build the relationship forest over a consolidated set, one chromosome at a time
pub fn build_relations(domains: &ConsolidatedDomainSet, percent: f64) -> Result<RelationForest> {
    if domains.is_empty() {
        return Err(TadMergeError::EmptyInput(
            "no consolidated domains to relate".to_string(),
        ));
    }

    let chroms: Vec<ChromRelations> = domains
        .groups()
        .iter()
        .map(|group| relate_chrom(&group.chrom, &group.items, percent))
        .filter(|relations| !relations.is_empty())
        .collect();
    let forest = RelationForest { chroms };

    info!(
        "Built {} relation edges ({} parent/child pairs) over {} domains",
        forest.edge_count(),
        forest.pair_count(),
        domains.len()
    );
    Ok(forest)
}
