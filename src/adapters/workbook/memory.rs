//! In-process workbook
//!
//! Holds every sheet in memory. Used by tests and by dry runs against
//! fixtures; nothing is persisted.

use super::data::WorkbookData;
use super::traits::{DestinationBook, SourceSheet};
use crate::domain::{ExportRow, OwnerName, Result, SourceEntry};
use async_trait::async_trait;
use tokio::sync::Mutex;

/// Workbook kept entirely in memory
///
/// Implements both sink traits over one shared [`WorkbookData`], so a single
/// instance can serve as source and destination of a run.
#[derive(Debug)]
pub struct MemoryWorkbook {
    source_sheet: String,
    data: Mutex<WorkbookData>,
}

impl MemoryWorkbook {
    /// Creates a workbook with an empty source sheet named `source_sheet`
    pub fn new(source_sheet: impl Into<String>) -> Self {
        let source_sheet = source_sheet.into();
        let mut data = WorkbookData::new();
        data.add_source_sheet(&source_sheet);
        Self::from_data(source_sheet, data)
    }

    /// Wraps existing workbook data
    pub fn from_data(source_sheet: impl Into<String>, data: WorkbookData) -> Self {
        Self {
            source_sheet: source_sheet.into(),
            data: Mutex::new(data),
        }
    }

    /// Copy of the current workbook contents
    pub async fn snapshot(&self) -> WorkbookData {
        self.data.lock().await.clone()
    }
}

#[async_trait]
impl SourceSheet for MemoryWorkbook {
    fn name(&self) -> &str {
        &self.source_sheet
    }

    async fn read_records(&self) -> Result<Vec<SourceEntry>> {
        Ok(self.data.lock().await.read_source(&self.source_sheet)?)
    }

    async fn mark_status(&self, row_number: usize, status: &str) -> Result<bool> {
        Ok(self
            .data
            .lock()
            .await
            .mark_status(&self.source_sheet, row_number, status)?)
    }
}

#[async_trait]
impl DestinationBook for MemoryWorkbook {
    async fn has_sheet(&self, owner: &OwnerName) -> Result<bool> {
        Ok(self.data.lock().await.has_sheet(owner.as_str()))
    }

    async fn last_row(&self, owner: &OwnerName) -> Result<usize> {
        Ok(self.data.lock().await.last_row(owner.as_str())?)
    }

    async fn append_rows(
        &self,
        owner: &OwnerName,
        at_row: usize,
        rows: &[ExportRow],
    ) -> Result<()> {
        Ok(self
            .data
            .lock()
            .await
            .append_rows(owner.as_str(), at_row, rows)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LeadRecord, RouterError, SinkError};

    #[tokio::test]
    async fn test_memory_workbook_round() {
        let workbook = MemoryWorkbook::new("leads");
        {
            let mut data = workbook.data.lock().await;
            data.add_destination_sheet("HEDER");
            data.push_lead(
                "leads",
                &LeadRecord {
                    name: "Ana".to_string(),
                    ..Default::default()
                },
            )
            .unwrap();
        }

        let owner = OwnerName::new("HEDER").unwrap();
        assert!(workbook.has_sheet(&owner).await.unwrap());
        assert_eq!(workbook.last_row(&owner).await.unwrap(), 1);

        workbook
            .append_rows(&owner, 2, &[ExportRow::default()])
            .await
            .unwrap();
        assert_eq!(workbook.last_row(&owner).await.unwrap(), 2);

        assert!(workbook.mark_status(2, "05/01/2024").await.unwrap());
        let entries = workbook.read_records().await.unwrap();
        assert_eq!(entries[0].record.status, "05/01/2024");
    }

    #[tokio::test]
    async fn test_missing_destination_sheet() {
        let workbook = MemoryWorkbook::new("leads");
        let owner = OwnerName::new("NINGUEM").unwrap();

        assert!(!workbook.has_sheet(&owner).await.unwrap());
        let err = workbook.last_row(&owner).await.unwrap_err();
        assert!(matches!(
            err,
            RouterError::Sink(SinkError::SheetNotFound(_))
        ));
    }
}
