//! Tree Indexer
//!
//! Applies the active-status filter and groups the surviving records by
//! parent id. Records whose parent did not survive the filter are promoted to
//! roots so nothing silently disappears from the table.

use crate::error::ApiError;
use crate::store::Record;
use crate::types::{RecordId, ROOT_PARENT};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Narrowing of records by their `isActive` flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveFilter {
    #[default]
    All,
    #[serde(rename = "true")]
    Active,
    #[serde(rename = "false")]
    Inactive,
}

impl ActiveFilter {
    /// Wire form used in query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActiveFilter::All => "all",
            ActiveFilter::Active => "true",
            ActiveFilter::Inactive => "false",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "all" => Some(ActiveFilter::All),
            "true" => Some(ActiveFilter::Active),
            "false" => Some(ActiveFilter::Inactive),
            _ => None,
        }
    }

    /// Keep iff no narrowing, or the stringified flag equals the filter value.
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            ActiveFilter::All => true,
            filter => record.is_active.to_string() == filter.as_str(),
        }
    }
}

impl fmt::Display for ActiveFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActiveFilter {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            ApiError::InvalidCommand(format!(
                "Unknown active filter: {} (must be 'all', 'true' or 'false')",
                s
            ))
        })
    }
}

/// Parent index over the filtered record set.
///
/// Children lists keep the filtered (input) order; records are borrowed, never copied.
#[derive(Debug, Clone, Default)]
pub struct TreeIndex<'a> {
    children: HashMap<RecordId, Vec<&'a Record>>,
    roots: Vec<&'a Record>,
    filtered_len: usize,
}

impl<'a> TreeIndex<'a> {
    pub fn build(records: &'a [Record], filter: ActiveFilter) -> Self {
        let mut children: HashMap<RecordId, Vec<&'a Record>> = HashMap::new();
        let mut present: HashSet<RecordId> = HashSet::new();
        let mut filtered: Vec<&'a Record> = Vec::new();

        for record in records.iter().filter(|r| filter.matches(r)) {
            children.entry(record.parent_id).or_default().push(record);
            present.insert(record.id);
            filtered.push(record);
        }

        let roots: Vec<&'a Record> = filtered
            .iter()
            .copied()
            .filter(|r| r.parent_id == ROOT_PARENT || !present.contains(&r.parent_id))
            .collect();

        debug!(
            filter = %filter,
            total = records.len(),
            filtered = filtered.len(),
            roots = roots.len(),
            "Indexed records"
        );

        Self {
            children,
            roots,
            filtered_len: filtered.len(),
        }
    }

    /// Roots in filtered order, including promoted orphans.
    pub fn roots(&self) -> &[&'a Record] {
        &self.roots
    }

    /// Direct children of `id`; empty when it has none.
    pub fn children(&self, id: RecordId) -> &[&'a Record] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_children(&self, id: RecordId) -> bool {
        !self.children(id).is_empty()
    }

    /// Number of records that passed the filter
    pub fn filtered_len(&self) -> usize {
        self.filtered_len
    }

    /// Iterate every (parent id, children) group.
    pub fn groups(&self) -> impl Iterator<Item = (RecordId, &[&'a Record])> {
        self.children.iter().map(|(id, list)| (*id, list.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(records: &[&Record]) -> Vec<RecordId> {
        records.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_groups_children_in_input_order() {
        let records = vec![
            Record::new(1, 0, "a"),
            Record::new(2, 1, "b"),
            Record::new(3, 0, "c"),
            Record::new(4, 1, "d"),
        ];
        let index = TreeIndex::build(&records, ActiveFilter::All);

        assert_eq!(ids(index.roots()), vec![1, 3]);
        assert_eq!(ids(index.children(1)), vec![2, 4]);
        assert!(index.children(3).is_empty());
        assert!(index.has_children(1));
        assert!(!index.has_children(2));
        assert_eq!(index.filtered_len(), 4);
    }

    #[test]
    fn test_orphans_promoted_after_filtering() {
        let records = vec![
            Record::new(1, 0, "parent").with_active(false),
            Record::new(2, 1, "child").with_active(true),
            Record::new(3, 2, "grandchild").with_active(true),
        ];
        let index = TreeIndex::build(&records, ActiveFilter::Active);

        assert_eq!(ids(index.roots()), vec![2]);
        assert_eq!(ids(index.children(2)), vec![3]);
    }

    #[test]
    fn test_dangling_parent_is_root() {
        let records = vec![Record::new(5, 99, "orphan")];
        let index = TreeIndex::build(&records, ActiveFilter::All);
        assert_eq!(ids(index.roots()), vec![5]);
    }

    #[test]
    fn test_filter_predicate() {
        let records = vec![
            Record::new(1, 0, "on").with_active(true),
            Record::new(2, 0, "off").with_active(false),
        ];
        assert_eq!(ids(TreeIndex::build(&records, ActiveFilter::Inactive).roots()), vec![2]);
        assert_eq!(ids(TreeIndex::build(&records, ActiveFilter::Active).roots()), vec![1]);
        assert_eq!(TreeIndex::build(&records, ActiveFilter::All).filtered_len(), 2);
    }

    #[test]
    fn test_empty_input() {
        let index = TreeIndex::build(&[], ActiveFilter::All);
        assert!(index.roots().is_empty());
        assert_eq!(index.groups().count(), 0);
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!("true".parse::<ActiveFilter>().unwrap(), ActiveFilter::Active);
        assert_eq!(ActiveFilter::parse("false"), Some(ActiveFilter::Inactive));
        assert_eq!(ActiveFilter::parse("yes"), None);
        assert!("TRUE".parse::<ActiveFilter>().is_err());
        assert_eq!(ActiveFilter::Inactive.to_string(), "false");
    }
}
