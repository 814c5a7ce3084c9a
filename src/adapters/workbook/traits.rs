//! Sink abstraction traits
//!
//! This module defines the traits that sink adapters must implement to work
//! with the export engine. Row numbers are absolute and 1-based; row 1 of
//! every sheet is its header.

use crate::domain::{ExportRow, OwnerName, Result, SourceEntry};
use async_trait::async_trait;

/// Source sheet holding captured leads
#[async_trait]
pub trait SourceSheet: Send + Sync {
    /// Name of the source sheet, for logs
    fn name(&self) -> &str;

    /// Reads every data row below the header
    ///
    /// Entries come back in sheet order. Fully blank rows are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the sheet is missing or cannot be read.
    async fn read_records(&self) -> Result<Vec<SourceEntry>>;

    /// Writes `status` into the status cell of `row_number`
    ///
    /// Only an empty status cell is written. Returns `Ok(false)` and leaves
    /// the row untouched when the cell already holds a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the row does not exist or the write fails.
    async fn mark_status(&self, row_number: usize, status: &str) -> Result<bool>;
}

/// Collection of per-owner destination sheets
#[async_trait]
pub trait DestinationBook: Send + Sync {
    /// Whether the owner's destination sheet exists
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup itself fails.
    async fn has_sheet(&self, owner: &OwnerName) -> Result<bool>;

    /// Last occupied row of the owner's sheet, header included
    ///
    /// # Errors
    ///
    /// Returns an error if the sheet is missing or cannot be read.
    async fn last_row(&self, owner: &OwnerName) -> Result<usize>;

    /// Appends `rows` as one contiguous block starting at `at_row`
    ///
    /// `at_row` must be the sheet's next free row; any other value is
    /// rejected without writing, so a stale `last_row` can never overwrite
    /// existing rows.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::SinkError::PositionMismatch`] when `at_row`
    /// is not the next free row, or an error if the write fails.
    async fn append_rows(&self, owner: &OwnerName, at_row: usize, rows: &[ExportRow])
        -> Result<()>;
}
