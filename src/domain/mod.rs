//! Domain models and types for the lead router.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`AreaCode`], [`OwnerName`])
//! - **Domain models** ([`LeadRecord`], [`LeadStatus`], [`ExportRow`])
//! - **Error types** ([`RouterError`], [`SinkError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Owner names address destination sheets, so they get their own type:
//!
//! ```rust
//! use lead_router::domain::{AreaCode, OwnerName};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let owner = OwnerName::new("HEDER")?;
//! let code = AreaCode::new(41);
//! assert_eq!(format!("{owner}:{code}"), "HEDER:41");
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod export_row;
pub mod ids;
pub mod lead;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{RouterError, SinkError};
pub use export_row::{ExportRow, EXPORT_COLUMNS, RESERVED_COLUMNS};
pub use ids::{AreaCode, OwnerName};
pub use lead::{
    LeadRecord, LeadStatus, SourceEntry, SOURCE_COLUMNS, STATUS_DESTINATION_NOT_FOUND,
    STATUS_UNMAPPED_AREA_CODE,
};
pub use result::Result;
