//! PostgreSQL adapter implementing the sink traits
//!
//! The source sheet is the `lead_sources` table and every destination sheet
//! is a `destination_sheets` entry with its rows in `destination_rows`.

use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::adapters::postgresql::models::{
    row_number_param, sequence_param, source_entry_from_row, INSERT_DESTINATION_ROW,
    LEAD_SOURCE_COLUMNS,
};
use crate::adapters::workbook::traits::{DestinationBook, SourceSheet};
use crate::domain::{ExportRow, OwnerName, Result, SinkError, SourceEntry};
use async_trait::async_trait;
use std::sync::Arc;

/// Name reported for the source table
pub const SOURCE_TABLE: &str = "lead_sources";

const LAST_ROW_QUERY: &str = r#"
    SELECT s.header_rows,
           (SELECT MAX(r.row_number) FROM destination_rows r WHERE r.sheet = s.name)
    FROM destination_sheets s
    WHERE s.name = $1
"#;

/// PostgreSQL implementation of the sink traits
pub struct PostgreSQLAdapter {
    client: Arc<PostgreSQLClient>,
}

impl PostgreSQLAdapter {
    /// Create a new PostgreSQL adapter
    pub fn new(client: PostgreSQLClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

fn last_row_from(header_rows: i32, max_row: Option<i32>) -> usize {
    let last = max_row.unwrap_or(header_rows).max(header_rows);
    usize::try_from(last).unwrap_or(0)
}

#[async_trait]
impl SourceSheet for PostgreSQLAdapter {
    fn name(&self) -> &str {
        SOURCE_TABLE
    }

    async fn read_records(&self) -> Result<Vec<SourceEntry>> {
        let client = self.client.get_connection().await?;
        let query = format!("SELECT {LEAD_SOURCE_COLUMNS} FROM {SOURCE_TABLE} ORDER BY row_number");

        let rows = client
            .query(query.as_str(), &[])
            .await
            .map_err(|e| SinkError::ReadFailed(format!("Failed to read lead sources: {}", e)))?;

        let mut entries = Vec::with_capacity(rows.len());
        for row in &rows {
            let entry = source_entry_from_row(row)?;
            let blank = entry.record.to_cells().iter().all(|cell| {
                cell.as_str().map(|s| s.trim().is_empty()).unwrap_or(false)
            });
            if !blank {
                entries.push(entry);
            }
        }

        tracing::debug!(count = entries.len(), "Read lead sources from PostgreSQL");
        Ok(entries)
    }

    async fn mark_status(&self, row_number: usize, status: &str) -> Result<bool> {
        let client = self.client.get_connection().await?;
        let row_param = row_number_param(row_number)?;

        let updated = client
            .execute(
                "UPDATE lead_sources SET status = $2 WHERE row_number = $1 AND status = ''",
                &[&row_param, &status],
            )
            .await
            .map_err(|e| SinkError::WriteFailed(format!("Failed to write status: {}", e)))?;

        if updated == 1 {
            return Ok(true);
        }

        let exists = client
            .query_opt(
                "SELECT 1 FROM lead_sources WHERE row_number = $1",
                &[&row_param],
            )
            .await
            .map_err(|e| SinkError::ReadFailed(format!("Failed to check source row: {}", e)))?;

        match exists {
            Some(_) => Ok(false),
            None => Err(SinkError::RowOutOfRange {
                sheet: SOURCE_TABLE.to_string(),
                row: row_number,
            }
            .into()),
        }
    }
}

#[async_trait]
impl DestinationBook for PostgreSQLAdapter {
    async fn has_sheet(&self, owner: &OwnerName) -> Result<bool> {
        let client = self.client.get_connection().await?;
        let row = client
            .query_opt(
                "SELECT 1 FROM destination_sheets WHERE name = $1",
                &[&owner.as_str()],
            )
            .await
            .map_err(|e| SinkError::ReadFailed(format!("Failed to look up sheet: {}", e)))?;
        Ok(row.is_some())
    }

    async fn last_row(&self, owner: &OwnerName) -> Result<usize> {
        let client = self.client.get_connection().await?;
        let row = client
            .query_opt(LAST_ROW_QUERY, &[&owner.as_str()])
            .await
            .map_err(|e| SinkError::ReadFailed(format!("Failed to read last row: {}", e)))?
            .ok_or_else(|| SinkError::SheetNotFound(owner.to_string()))?;

        let header_rows: i32 = row
            .try_get(0)
            .map_err(|e| SinkError::ReadFailed(e.to_string()))?;
        let max_row: Option<i32> = row
            .try_get(1)
            .map_err(|e| SinkError::ReadFailed(e.to_string()))?;

        Ok(last_row_from(header_rows, max_row))
    }

    async fn append_rows(
        &self,
        owner: &OwnerName,
        at_row: usize,
        rows: &[ExportRow],
    ) -> Result<()> {
        let write_failed = |e: tokio_postgres::Error| SinkError::WriteFailed(e.to_string());

        let mut connection = self.client.get_connection().await?;
        let client: &mut tokio_postgres::Client = &mut connection;
        let transaction = client.transaction().await.map_err(write_failed)?;

        // Serializes concurrent appends to the same sheet
        let sheet = transaction
            .query_opt(
                "SELECT header_rows FROM destination_sheets WHERE name = $1 FOR UPDATE",
                &[&owner.as_str()],
            )
            .await
            .map_err(write_failed)?
            .ok_or_else(|| SinkError::SheetNotFound(owner.to_string()))?;
        let header_rows: i32 = sheet.try_get(0).map_err(write_failed)?;

        let max_row: Option<i32> = transaction
            .query_one(
                "SELECT MAX(row_number) FROM destination_rows WHERE sheet = $1",
                &[&owner.as_str()],
            )
            .await
            .map_err(write_failed)?
            .try_get(0)
            .map_err(write_failed)?;

        let expected = last_row_from(header_rows, max_row) + 1;
        if at_row != expected {
            return Err(SinkError::PositionMismatch {
                sheet: owner.to_string(),
                expected,
                requested: at_row,
            }
            .into());
        }

        let statement = transaction
            .prepare(INSERT_DESTINATION_ROW)
            .await
            .map_err(write_failed)?;

        for (offset, row) in rows.iter().enumerate() {
            let row_number = row_number_param(at_row + offset)?;
            let sequence_number = sequence_param(row)?;
            transaction
                .execute(
                    &statement,
                    &[
                        &owner.as_str(),
                        &row_number,
                        &sequence_number,
                        &row.display_name,
                        &row.formatted_phone,
                        &row.region,
                        &row.state_code,
                        &row.source_tag,
                        &row.submitted_at,
                        &row.deadline,
                        &row.owner_label,
                    ],
                )
                .await
                .map_err(write_failed)?;
        }

        transaction.commit().await.map_err(write_failed)?;

        tracing::debug!(
            sheet = %owner,
            at_row,
            count = rows.len(),
            "Appended destination rows"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_row_from() {
        assert_eq!(last_row_from(1, None), 1);
        assert_eq!(last_row_from(1, Some(12)), 12);
        assert_eq!(last_row_from(3, None), 3);
        assert_eq!(last_row_from(0, None), 0);
    }
}
