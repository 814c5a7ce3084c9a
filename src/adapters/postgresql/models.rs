//! PostgreSQL row mapping
//!
//! Source rows are read as text columns and run through the same cell parser
//! as workbook rows, so both backends classify identical input identically.

use crate::domain::{ExportRow, LeadRecord, Result, SinkError, SourceEntry};
use serde_json::Value;
use tokio_postgres::Row;

/// Column list of `lead_sources`, in source column order after `row_number`
pub const LEAD_SOURCE_COLUMNS: &str =
    "row_number, name, phone, area_code, submitted_at, alt_name, region, tag, status";

/// Insert statement for one destination row
pub const INSERT_DESTINATION_ROW: &str = r#"
    INSERT INTO destination_rows (
        sheet, row_number, sequence_number, display_name, formatted_phone,
        region, state_code, source_tag, submitted_at, deadline, owner_label
    )
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
"#;

/// Converts a `lead_sources` row into a source entry
pub fn source_entry_from_row(row: &Row) -> Result<SourceEntry> {
    let read_failed = |e: tokio_postgres::Error| SinkError::ReadFailed(e.to_string());

    let row_number: i32 = row.try_get("row_number").map_err(read_failed)?;
    let row_number = usize::try_from(row_number).map_err(|_| {
        SinkError::InvalidFormat(format!("negative source row number {row_number}"))
    })?;

    let mut cells = Vec::with_capacity(8);
    for column in [
        "name",
        "phone",
        "area_code",
        "submitted_at",
        "alt_name",
        "region",
        "tag",
        "status",
    ] {
        let value: String = row.try_get(column).map_err(read_failed)?;
        cells.push(Value::String(value));
    }

    Ok(SourceEntry::new(row_number, LeadRecord::from_cells(&cells)))
}

/// Converts a row number into the database column type
pub fn row_number_param(row_number: usize) -> Result<i32> {
    Ok(i32::try_from(row_number).map_err(|_| {
        SinkError::InvalidFormat(format!("row number {row_number} exceeds column range"))
    })?)
}

/// Converts a sequence number into the database column type
pub fn sequence_param(row: &ExportRow) -> Result<i64> {
    Ok(i64::try_from(row.sequence_number).map_err(|_| {
        SinkError::InvalidFormat(format!(
            "sequence number {} exceeds column range",
            row.sequence_number
        ))
    })?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_number_param() {
        assert_eq!(row_number_param(2).unwrap(), 2);
        assert!(row_number_param(usize::MAX).is_err());
    }

    #[test]
    fn test_sequence_param() {
        let row = ExportRow {
            sequence_number: 41,
            ..Default::default()
        };
        assert_eq!(sequence_param(&row).unwrap(), 41);

        let row = ExportRow {
            sequence_number: u64::MAX,
            ..Default::default()
        };
        assert!(sequence_param(&row).is_err());
    }

    #[test]
    fn test_insert_statement_binds_every_column() {
        assert!(INSERT_DESTINATION_ROW.contains("$11"));
        assert!(!INSERT_DESTINATION_ROW.contains("$12"));
    }
}
