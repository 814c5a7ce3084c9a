//! Export summary and reporting
//!
//! This module defines structures for tracking and reporting export results.

use std::collections::BTreeMap;
use std::time::Duration;

/// Summary of an export run
#[derive(Debug, Clone, Default)]
pub struct ExportSummary {
    /// Pending records picked up by the run
    pub total_selected: usize,

    /// Rows appended to destination sheets
    pub total_exported: usize,

    /// Rows appended per owner
    pub per_owner_counts: BTreeMap<String, usize>,

    /// Reserved-range assignments per fair pool member
    pub fair_pool_distribution: BTreeMap<String, usize>,

    /// Records marked as unmapped area codes
    pub unmapped: usize,

    /// Records marked as missing a destination sheet
    pub destination_missing: usize,

    /// Status writes refused because the cell was already set
    pub status_conflicts: usize,

    /// Errors encountered during the run
    pub errors: Vec<ExportError>,

    /// A sink failure stopped the run early
    pub aborted: bool,

    /// A shutdown signal stopped the run before every bucket was flushed
    pub interrupted: bool,

    /// Nothing was written
    pub dry_run: bool,

    /// Duration of the run
    pub duration: Duration,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Add an error
    pub fn add_error(&mut self, error: ExportError) {
        self.errors.push(error);
    }

    /// Records rows appended for an owner
    pub fn record_exported(&mut self, owner: &str, count: usize) {
        self.total_exported += count;
        *self.per_owner_counts.entry(owner.to_string()).or_insert(0) += count;
    }

    /// Records the run ending on a sink failure
    pub fn abort(&mut self, error: ExportError) {
        self.aborted = true;
        self.add_error(error);
    }

    /// Whether any record ended unmapped, without a destination, or in conflict
    pub fn has_record_failures(&self) -> bool {
        self.unmapped > 0 || self.destination_missing > 0 || self.status_conflicts > 0
    }

    /// Check if the run finished cleanly
    pub fn is_successful(&self) -> bool {
        !self.aborted && !self.interrupted && self.errors.is_empty() && !self.has_record_failures()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            total_selected = self.total_selected,
            total_exported = self.total_exported,
            unmapped = self.unmapped,
            destination_missing = self.destination_missing,
            status_conflicts = self.status_conflicts,
            per_owner = ?self.per_owner_counts,
            fair_pool = ?self.fair_pool_distribution,
            aborted = self.aborted,
            interrupted = self.interrupted,
            dry_run = self.dry_run,
            duration_ms = self.duration.as_millis() as u64,
            "Export completed"
        );

        if !self.errors.is_empty() {
            tracing::warn!(
                error_count = self.errors.len(),
                "Export completed with errors"
            );
            for error in &self.errors {
                tracing::warn!(
                    error_type = ?error.error_type,
                    message = %error.message,
                    context = error.context.as_deref().unwrap_or(""),
                    "Export error"
                );
            }
        }
    }
}

/// Type of export error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportErrorType {
    /// Area code resolved to no owner
    Routing,
    /// Owner has no destination sheet
    DestinationMissing,
    /// Status cell already held a value
    StatusConflict,
    /// Reading from a sink failed
    Read,
    /// Writing to a sink failed
    Write,
    /// Unknown error
    Unknown,
}

/// Export error with context
#[derive(Debug, Clone)]
pub struct ExportError {
    /// Type of error
    pub error_type: ExportErrorType,

    /// Error message
    pub message: String,

    /// Optional context (e.g., owner, source row)
    pub context: Option<String>,
}

impl ExportError {
    /// Create a new export error
    pub fn new(error_type: ExportErrorType, message: String) -> Self {
        Self {
            error_type,
            message,
            context: None,
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: String) -> Self {
        self.context = Some(context);
        self
    }
}
