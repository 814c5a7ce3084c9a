//! Batch selection and per-owner buckets
//!
//! This module picks the records a run processes and groups the rows bound
//! for each owner until they are flushed.

use crate::domain::{ExportRow, OwnerName, SourceEntry};
use std::collections::HashMap;

/// Selects the records processed by one run
#[derive(Debug, Clone, Copy)]
pub struct BatchSelector {
    limit: usize,
}

impl BatchSelector {
    /// Create a selector taking at most `limit` records
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    /// Maximum number of records per run
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Pending entries in sheet order, at most `limit` of them
    ///
    /// Records with any status are skipped without counting against the
    /// limit.
    pub fn select(&self, entries: Vec<SourceEntry>) -> Vec<SourceEntry> {
        entries
            .into_iter()
            .filter(|entry| entry.record.is_pending())
            .take(self.limit)
            .collect()
    }
}

/// Rows accumulated for one owner, with the source rows they came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerBucket {
    /// Destination owner
    pub owner: OwnerName,
    /// Rows in accumulation order
    pub rows: Vec<ExportRow>,
    /// Source row number of each entry in `rows`
    pub source_rows: Vec<usize>,
}

impl OwnerBucket {
    fn new(owner: OwnerName) -> Self {
        Self {
            owner,
            rows: Vec::new(),
            source_rows: Vec::new(),
        }
    }

    /// Number of buffered rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether nothing is buffered
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Numbers the rows for a sheet whose last occupied row is `last_row`
    ///
    /// Numbering continues from the sheet's data-row count: a header-only
    /// sheet starts at 0, a sheet with ten data rows at 10.
    pub fn assign_sequence_numbers(&mut self, last_row: usize) {
        let start = (last_row.max(1) - 1) as u64;
        for (offset, row) in self.rows.iter_mut().enumerate() {
            row.sequence_number = start + offset as u64;
        }
    }
}

/// Owner buckets in first-seen order
#[derive(Debug, Clone, Default)]
pub struct OwnerBuckets {
    buckets: Vec<OwnerBucket>,
    index: HashMap<OwnerName, usize>,
}

impl OwnerBuckets {
    /// Create an empty set of buckets
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffers a row for `owner`
    pub fn push(&mut self, owner: &OwnerName, source_row: usize, row: ExportRow) {
        let position = match self.index.get(owner) {
            Some(position) => *position,
            None => {
                self.buckets.push(OwnerBucket::new(owner.clone()));
                self.index.insert(owner.clone(), self.buckets.len() - 1);
                self.buckets.len() - 1
            }
        };

        let bucket = &mut self.buckets[position];
        bucket.rows.push(row);
        bucket.source_rows.push(source_row);
    }

    /// Total buffered rows across owners
    pub fn total_rows(&self) -> usize {
        self.buckets.iter().map(OwnerBucket::len).sum()
    }

    /// Number of owners with buffered rows
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Whether no rows are buffered
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Consumes the set, yielding buckets in first-seen order
    pub fn into_buckets(self) -> Vec<OwnerBucket> {
        self.buckets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LeadRecord;

    fn entry(row_number: usize, status: &str) -> SourceEntry {
        SourceEntry::new(
            row_number,
            LeadRecord {
                name: format!("lead {row_number}"),
                status: status.to_string(),
                ..Default::default()
            },
        )
    }

    fn owner(name: &str) -> OwnerName {
        OwnerName::new(name).unwrap()
    }

    #[test]
    fn test_select_skips_terminal_and_respects_limit() {
        let entries = vec![
            entry(2, "05/01/2024"),
            entry(3, ""),
            entry(4, "DDD_NAO_MAPEADO"),
            entry(5, ""),
            entry(6, " "),
            entry(7, ""),
        ];

        let selected = BatchSelector::new(3).select(entries);
        let rows: Vec<usize> = selected.iter().map(|e| e.row_number).collect();
        assert_eq!(rows, vec![3, 5, 7]);
    }

    #[test]
    fn test_select_nothing_pending() {
        let entries = vec![entry(2, "x"), entry(3, "y")];
        assert!(BatchSelector::new(10).select(entries).is_empty());
        assert!(BatchSelector::new(10).select(Vec::new()).is_empty());
    }

    #[test]
    fn test_buckets_keep_first_seen_order() {
        let mut buckets = OwnerBuckets::new();
        buckets.push(&owner("B"), 2, ExportRow::default());
        buckets.push(&owner("A"), 3, ExportRow::default());
        buckets.push(&owner("B"), 4, ExportRow::default());

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets.total_rows(), 3);

        let buckets = buckets.into_buckets();
        assert_eq!(buckets[0].owner.as_str(), "B");
        assert_eq!(buckets[0].source_rows, vec![2, 4]);
        assert_eq!(buckets[1].owner.as_str(), "A");
        assert_eq!(buckets[1].source_rows, vec![3]);
    }

    #[test]
    fn test_assign_sequence_numbers() {
        let mut buckets = OwnerBuckets::new();
        for row in 2..5 {
            buckets.push(&owner("A"), row, ExportRow::default());
        }
        let mut bucket = buckets.into_buckets().remove(0);

        bucket.assign_sequence_numbers(11);
        let numbers: Vec<u64> = bucket.rows.iter().map(|r| r.sequence_number).collect();
        assert_eq!(numbers, vec![10, 11, 12]);

        bucket.assign_sequence_numbers(1);
        assert_eq!(bucket.rows[0].sequence_number, 0);

        bucket.assign_sequence_numbers(0);
        assert_eq!(bucket.rows[0].sequence_number, 0);
    }
}
