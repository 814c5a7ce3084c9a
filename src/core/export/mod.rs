//! Export orchestration and batch processing
//!
//! This module provides the core export logic, including:
//! - Selection of pending records and per-owner buckets
//! - Export coordination and orchestration
//! - Summary and reporting

pub mod batch;
pub mod coordinator;
pub mod summary;

pub use batch::{BatchSelector, OwnerBucket, OwnerBuckets};
pub use coordinator::ExportCoordinator;
pub use summary::{ExportError, ExportErrorType, ExportSummary};
