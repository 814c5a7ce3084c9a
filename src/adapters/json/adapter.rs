//! JSON workbook adapter implementing the sink traits
//!
//! The whole workbook lives in one JSON file. Every mutation is applied to a
//! copy, written to a temporary file in the same directory, and renamed over
//! the original, so the file on disk always holds a complete workbook.

use crate::adapters::workbook::data::WorkbookData;
use crate::adapters::workbook::traits::{DestinationBook, SourceSheet};
use crate::domain::{ExportRow, OwnerName, Result, RouterError, SinkError, SourceEntry};
use async_trait::async_trait;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::sync::Mutex;

/// Workbook persisted as a JSON file
#[derive(Debug)]
pub struct JsonWorkbook {
    path: PathBuf,
    source_sheet: String,
    data: Mutex<WorkbookData>,
}

impl JsonWorkbook {
    /// Opens an existing workbook file
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable or not a workbook.
    pub fn open(path: impl AsRef<Path>, source_sheet: impl Into<String>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let contents = fs::read_to_string(&path).map_err(|e| {
            SinkError::ConnectionFailed(format!(
                "Failed to open workbook {}: {}",
                path.display(),
                e
            ))
        })?;

        let data: WorkbookData = serde_json::from_str(&contents).map_err(|e| {
            SinkError::InvalidFormat(format!("Workbook {} is malformed: {}", path.display(), e))
        })?;

        tracing::debug!(
            path = %path.display(),
            sheets = data.sheets.len(),
            "Opened JSON workbook"
        );

        Ok(Self {
            path,
            source_sheet: source_sheet.into(),
            data: Mutex::new(data),
        })
    }

    /// Creates a workbook file holding `data`
    ///
    /// # Errors
    ///
    /// Returns an error if the file already exists or cannot be written.
    pub fn create(
        path: impl AsRef<Path>,
        source_sheet: impl Into<String>,
        data: WorkbookData,
    ) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if path.exists() {
            return Err(RouterError::Io(format!(
                "Workbook {} already exists",
                path.display()
            )));
        }

        persist(&path, &data)?;
        tracing::info!(path = %path.display(), "Created JSON workbook");

        Ok(Self {
            path,
            source_sheet: source_sheet.into(),
            data: Mutex::new(data),
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Copy of the current workbook contents
    pub async fn snapshot(&self) -> WorkbookData {
        self.data.lock().await.clone()
    }

    /// Applies `change` to a copy of the data, persists it, then commits it
    async fn mutate<T>(
        &self,
        change: impl FnOnce(&mut WorkbookData) -> std::result::Result<T, SinkError>,
    ) -> Result<T> {
        let mut guard = self.data.lock().await;
        let mut updated = guard.clone();
        let outcome = change(&mut updated)?;
        persist(&self.path, &updated)?;
        *guard = updated;
        Ok(outcome)
    }
}

/// Writes the workbook atomically next to its final location
fn persist(path: &Path, data: &WorkbookData) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut file = NamedTempFile::new_in(&dir).map_err(|e| write_failed(path, e))?;
    serde_json::to_writer_pretty(&mut file, data).map_err(|e| write_failed(path, e))?;
    file.write_all(b"\n").map_err(|e| write_failed(path, e))?;
    file.as_file()
        .sync_all()
        .map_err(|e| write_failed(path, e))?;
    file.persist(path).map_err(|e| write_failed(path, e.error))?;
    Ok(())
}

fn write_failed(path: &Path, error: impl std::fmt::Display) -> SinkError {
    SinkError::WriteFailed(format!("{}: {}", path.display(), error))
}

#[async_trait]
impl SourceSheet for JsonWorkbook {
    fn name(&self) -> &str {
        &self.source_sheet
    }

    async fn read_records(&self) -> Result<Vec<SourceEntry>> {
        Ok(self.data.lock().await.read_source(&self.source_sheet)?)
    }

    async fn mark_status(&self, row_number: usize, status: &str) -> Result<bool> {
        let mut guard = self.data.lock().await;
        let mut updated = guard.clone();
        if !updated.mark_status(&self.source_sheet, row_number, status)? {
            return Ok(false);
        }
        persist(&self.path, &updated)?;
        *guard = updated;
        Ok(true)
    }
}

#[async_trait]
impl DestinationBook for JsonWorkbook {
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
        self.mutate(|data| data.append_rows(owner.as_str(), at_row, rows))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LeadRecord;
    use tempfile::TempDir;

    fn seeded() -> WorkbookData {
        let mut data = WorkbookData::new();
        data.add_source_sheet("leads");
        data.add_destination_sheet("HEDER");
        data.push_lead(
            "leads",
            &LeadRecord {
                name: "Ana".to_string(),
                ..Default::default()
            },
        )
        .unwrap();
        data
    }

    #[tokio::test]
    async fn test_create_then_open() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("book.json");

        JsonWorkbook::create(&path, "leads", seeded()).unwrap();
        let reopened = JsonWorkbook::open(&path, "leads").unwrap();
        assert_eq!(reopened.read_records().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_refuses_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("book.json");
        JsonWorkbook::create(&path, "leads", seeded()).unwrap();
        assert!(JsonWorkbook::create(&path, "leads", seeded()).is_err());
    }

    #[tokio::test]
    async fn test_mutations_are_persisted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("book.json");
        let workbook = JsonWorkbook::create(&path, "leads", seeded()).unwrap();
        let owner = OwnerName::new("HEDER").unwrap();

        workbook
            .append_rows(&owner, 2, &[ExportRow::default()])
            .await
            .unwrap();
        assert!(workbook.mark_status(2, "05/01/2024").await.unwrap());

        let reopened = JsonWorkbook::open(&path, "leads").unwrap();
        assert_eq!(reopened.last_row(&owner).await.unwrap(), 2);
        assert_eq!(
            reopened.read_records().await.unwrap()[0].record.status,
            "05/01/2024"
        );
    }

    #[tokio::test]
    async fn test_rejected_append_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("book.json");
        let workbook = JsonWorkbook::create(&path, "leads", seeded()).unwrap();
        let before = fs::read_to_string(&path).unwrap();

        let owner = OwnerName::new("HEDER").unwrap();
        assert!(workbook
            .append_rows(&owner, 7, &[ExportRow::default()])
            .await
            .is_err());

        assert_eq!(fs::read_to_string(&path).unwrap(), before);
        assert_eq!(workbook.last_row(&owner).await.unwrap(), 1);
    }

    #[test]
    fn test_open_missing_or_malformed() {
        let dir = TempDir::new().unwrap();
        assert!(JsonWorkbook::open(dir.path().join("nope.json"), "leads").is_err());

        let path = dir.path().join("bad.json");
        fs::write(&path, "not json").unwrap();
        let err = JsonWorkbook::open(&path, "leads").unwrap_err();
        assert!(err.to_string().contains("malformed"));
    }
}
