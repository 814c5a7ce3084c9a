//! Sink abstraction layer
//!
//! This module provides the trait-based abstraction over the source sheet
//! and the owner destination sheets, allowing the export engine to work with
//! different backends (JSON workbook, PostgreSQL, in-memory).

pub mod data;
pub mod factory;
pub mod memory;
pub mod traits;

pub use data::WorkbookData;
pub use factory::{create_sinks, Sinks};
pub use memory::MemoryWorkbook;
pub use traits::{DestinationBook, SourceSheet};
