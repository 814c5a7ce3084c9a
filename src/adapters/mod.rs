//! External system integrations for the lead router.
//!
//! This module provides adapters for the systems that hold the sheets:
//!
//! - [`workbook`] - Sink abstraction layer (trait-based) and in-memory sheets
//! - [`json`] - JSON file workbook implementation
//! - [`postgresql`] - PostgreSQL implementation
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate external dependencies and
//! enable testing with in-memory implementations. The export engine only sees
//! the [`workbook::SourceSheet`] and [`workbook::DestinationBook`] traits.
//!
//! # Example
//!
//! ```rust
//! use lead_router::adapters::workbook::{DestinationBook, MemoryWorkbook, WorkbookData};
//! use lead_router::domain::OwnerName;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut data = WorkbookData::new();
//! data.add_source_sheet("leads");
//! data.add_destination_sheet("HEDER");
//!
//! let workbook = MemoryWorkbook::from_data("leads", data);
//! let owner = OwnerName::new("HEDER")?;
//! assert_eq!(workbook.last_row(&owner).await?, 1);
//! # Ok(())
//! # }
//! ```

pub mod json;
pub mod postgresql;
pub mod workbook;
