//! Domain data model
//!
//! Interval records, chromosome-grouped record sets and the id-tagged
//! consolidated domain set produced by the reducer.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// A genomic interval: chromosome, 0-based start, end
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IntervalRecord {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
}

impl IntervalRecord {
    pub fn new(chrom: impl Into<String>, start: u64, end: u64) -> Self {
        Self {
            chrom: chrom.into(),
            start,
            end,
        }
    }

    /// Length of the interval
    pub fn span(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    /// True when both boundaries are within `tolerance` of `other`'s
    pub fn same_boundaries(&self, other: &IntervalRecord, tolerance: u64) -> bool {
        self.start.abs_diff(other.start) <= tolerance && self.end.abs_diff(other.end) <= tolerance
    }
}

/// Items of one chromosome, in input order
#[derive(Debug, Clone, PartialEq)]
pub struct ChromGroup<T> {
    pub chrom: String,
    pub items: Vec<T>,
}

/// Records grouped by chromosome key
///
/// Chromosomes keep the order in which they were first seen; items inside a
/// group keep insertion order. Nothing is ever re-sorted.
#[derive(Debug, Clone)]
pub struct ChromGroups<T> {
    groups: Vec<ChromGroup<T>>,
    index: HashMap<String, usize>,
}

impl<T> Default for ChromGroups<T> {
    fn default() -> Self {
        Self {
            groups: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> ChromGroups<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item to its chromosome's group, opening the group if needed
    pub fn push(&mut self, chrom: &str, item: T) {
        match self.index.get(chrom) {
            Some(&idx) => self.groups[idx].items.push(item),
            None => {
                self.index.insert(chrom.to_string(), self.groups.len());
                self.groups.push(ChromGroup {
                    chrom: chrom.to_string(),
                    items: vec![item],
                });
            }
        }
    }

    /// Append a whole group; items are added to an existing group of the same name
    pub fn push_group(&mut self, chrom: &str, items: Vec<T>) {
        match self.index.get(chrom) {
            Some(&idx) => self.groups[idx].items.extend(items),
            None => {
                self.index.insert(chrom.to_string(), self.groups.len());
                self.groups.push(ChromGroup {
                    chrom: chrom.to_string(),
                    items,
                });
            }
        }
    }

    /// Name of the most recently opened chromosome group
    pub fn last_chrom(&self) -> Option<&str> {
        self.groups.last().map(|g| g.chrom.as_str())
    }

    pub fn contains_chrom(&self, chrom: &str) -> bool {
        self.index.contains_key(chrom)
    }

    pub fn get(&self, chrom: &str) -> Option<&[T]> {
        self.index.get(chrom).map(|&idx| self.groups[idx].items.as_slice())
    }

    pub fn groups(&self) -> &[ChromGroup<T>] {
        &self.groups
    }

    pub fn chroms(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.chrom.as_str())
    }

    /// All items in group order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.groups.iter().flat_map(|g| g.items.iter())
    }

    /// Total number of items across all chromosomes
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|g| g.items.is_empty())
    }

    /// Apply `f` to each group, keeping only the items it retains.
    /// Empty groups are dropped afterwards.
    pub fn retain_groups<F>(&mut self, mut f: F)
    where
        F: FnMut(&str, &mut Vec<T>),
    {
        for group in &mut self.groups {
            f(&group.chrom, &mut group.items);
        }
        self.groups.retain(|g| !g.items.is_empty());
        self.index = self
            .groups
            .iter()
            .enumerate()
            .map(|(i, g)| (g.chrom.clone(), i))
            .collect();
    }

    pub fn into_groups(self) -> Vec<ChromGroup<T>> {
        self.groups
    }
}

impl<T> FromIterator<ChromGroup<T>> for ChromGroups<T> {
    fn from_iter<I: IntoIterator<Item = ChromGroup<T>>>(iter: I) -> Self {
        let mut groups = ChromGroups::new();
        for group in iter {
            groups.push_group(&group.chrom, group.items);
        }
        groups
    }
}

/// One loaded annotation source
pub type DomainSet = ChromGroups<IntervalRecord>;

impl DomainSet {
    /// Build a set from records, grouping by chromosome in first-seen order
    pub fn from_records<I: IntoIterator<Item = IntervalRecord>>(records: I) -> Self {
        let mut set = DomainSet::new();
        for record in records {
            let chrom = record.chrom.clone();
            set.push(&chrom, record);
        }
        set
    }
}

/// Sequential domain identifier, rendered as `ID_<n>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DomainId(pub u64);

impl DomainId {
    pub const PREFIX: &'static str = "ID_";

    pub fn number(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DomainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}

impl FromStr for DomainId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix(Self::PREFIX)
            .and_then(|n| n.parse().ok())
            .map(DomainId)
            .ok_or_else(|| format!("not a domain id: '{}'", s))
    }
}

/// A merged domain carrying its assigned identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsolidatedDomain {
    pub id: DomainId,
    pub record: IntervalRecord,
}

impl ConsolidatedDomain {
    pub fn chrom(&self) -> &str {
        &self.record.chrom
    }

    pub fn start(&self) -> u64 {
        self.record.start
    }

    pub fn end(&self) -> u64 {
        self.record.end
    }

    pub fn span(&self) -> u64 {
        self.record.span()
    }
}

/// The reducer's output: chromosome-grouped domains with ids `ID_1..`
/// strictly increasing in sequence order
#[derive(Debug, Clone, Default)]
pub struct ConsolidatedDomainSet {
    groups: ChromGroups<ConsolidatedDomain>,
}

impl ConsolidatedDomainSet {
    /// Tag every record with `ID_<n>` in its current order, n starting at 1
    pub fn assign_ids(set: DomainSet) -> Self {
        let mut next = 1u64;
        let groups = set
            .into_groups()
            .into_iter()
            .map(|group| {
                let items = group
                    .items
                    .into_iter()
                    .map(|record| {
                        let id = DomainId(next);
                        next += 1;
                        ConsolidatedDomain { id, record }
                    })
                    .collect();
                ChromGroup {
                    chrom: group.chrom,
                    items,
                }
            })
            .collect();
        Self { groups }
    }

    pub fn groups(&self) -> &[ChromGroup<ConsolidatedDomain>] {
        self.groups.groups()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConsolidatedDomain> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Remove domains per chromosome; ids of survivors are unchanged
    pub fn retain_groups<F>(&mut self, f: F)
    where
        F: FnMut(&str, &mut Vec<ConsolidatedDomain>),
    {
        self.groups.retain_groups(f);
    }
}
