//! Plain workbook data shared by the file-backed and in-memory sinks

use crate::domain::lead::STATUS_COLUMN;
use crate::domain::{
    ExportRow, LeadRecord, SinkError, SourceEntry, EXPORT_COLUMNS, SOURCE_COLUMNS,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Sheets of a workbook, each a list of rows of cells
///
/// Serialized as `{"sheets": {"<name>": [[cell, ...], ...]}}`. The first row
/// of a sheet is its header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkbookData {
    /// Sheets keyed by name
    #[serde(default)]
    pub sheets: BTreeMap<String, Vec<Vec<Value>>>,
}

impl WorkbookData {
    /// Creates an empty workbook
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an empty source sheet with the standard header
    pub fn add_source_sheet(&mut self, name: &str) {
        self.add_sheet(name, header_row(&SOURCE_COLUMNS));
    }

    /// Adds an empty destination sheet with the standard header
    pub fn add_destination_sheet(&mut self, name: &str) {
        self.add_sheet(name, header_row(&EXPORT_COLUMNS));
    }

    /// Adds a sheet holding only `header`; existing sheets are kept
    pub fn add_sheet(&mut self, name: &str, header: Vec<Value>) {
        self.sheets
            .entry(name.to_string())
            .or_insert_with(|| vec![header]);
    }

    /// Whether a sheet with this name exists
    pub fn has_sheet(&self, name: &str) -> bool {
        self.sheets.contains_key(name)
    }

    /// Rows of a sheet, header first
    pub fn rows(&self, name: &str) -> Option<&[Vec<Value>]> {
        self.sheets.get(name).map(Vec::as_slice)
    }

    /// Appends a lead to a source sheet, returning its row number
    pub fn push_lead(&mut self, sheet: &str, record: &LeadRecord) -> Result<usize, SinkError> {
        let rows = self
            .sheets
            .get_mut(sheet)
            .ok_or_else(|| SinkError::SourceNotFound(sheet.to_string()))?;
        rows.push(record.to_cells());
        Ok(rows.len())
    }

    /// Last occupied row, header included
    pub fn last_row(&self, sheet: &str) -> Result<usize, SinkError> {
        self.sheets
            .get(sheet)
            .map(Vec::len)
            .ok_or_else(|| SinkError::SheetNotFound(sheet.to_string()))
    }

    /// Appends rows as one block, rejecting any position but the next free row
    pub fn append_rows(
        &mut self,
        sheet: &str,
        at_row: usize,
        rows: &[ExportRow],
    ) -> Result<(), SinkError> {
        let existing = self
            .sheets
            .get_mut(sheet)
            .ok_or_else(|| SinkError::SheetNotFound(sheet.to_string()))?;

        let expected = existing.len() + 1;
        if at_row != expected {
            return Err(SinkError::PositionMismatch {
                sheet: sheet.to_string(),
                expected,
                requested: at_row,
            });
        }

        existing.extend(rows.iter().map(ExportRow::to_cells));
        Ok(())
    }

    /// Reads the data rows of a source sheet
    pub fn read_source(&self, sheet: &str) -> Result<Vec<SourceEntry>, SinkError> {
        let rows = self
            .sheets
            .get(sheet)
            .ok_or_else(|| SinkError::SourceNotFound(sheet.to_string()))?;

        Ok(rows
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, cells)| !is_blank_row(cells))
            .map(|(index, cells)| SourceEntry::new(index + 1, LeadRecord::from_cells(cells)))
            .collect())
    }

    /// Writes a status into an empty status cell
    ///
    /// Returns `Ok(false)` when the cell is already occupied.
    pub fn mark_status(
        &mut self,
        sheet: &str,
        row_number: usize,
        status: &str,
    ) -> Result<bool, SinkError> {
        let rows = self
            .sheets
            .get_mut(sheet)
            .ok_or_else(|| SinkError::SourceNotFound(sheet.to_string()))?;

        if row_number < 2 || row_number > rows.len() {
            return Err(SinkError::RowOutOfRange {
                sheet: sheet.to_string(),
                row: row_number,
            });
        }

        let cells = &mut rows[row_number - 1];
        if cells.len() <= STATUS_COLUMN {
            cells.resize(STATUS_COLUMN + 1, Value::String(String::new()));
        }

        let current = crate::domain::lead::cell_to_string(&cells[STATUS_COLUMN]);
        if !current.is_empty() {
            return Ok(false);
        }

        cells[STATUS_COLUMN] = Value::String(status.to_string());
        Ok(true)
    }
}

fn header_row(columns: &[&str]) -> Vec<Value> {
    columns
        .iter()
        .map(|column| Value::String((*column).to_string()))
        .collect()
}

fn is_blank_row(cells: &[Value]) -> bool {
    cells
        .iter()
        .all(|cell| crate::domain::lead::cell_to_string(cell).trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AreaCode;
    use serde_json::json;

    fn lead(name: &str, code: u32) -> LeadRecord {
        LeadRecord {
            name: name.to_string(),
            phone: format!("({code}) 99999-0000"),
            area_code: Some(AreaCode::new(code)),
            ..Default::default()
        }
    }

    #[test]
    fn test_read_source_assigns_absolute_rows() {
        let mut data = WorkbookData::new();
        data.add_source_sheet("leads");
        data.push_lead("leads", &lead("Ana", 21)).unwrap();
        data.push_lead("leads", &lead("Bia", 11)).unwrap();

        let entries = data.read_source("leads").unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].row_number, 2);
        assert_eq!(entries[1].row_number, 3);
        assert_eq!(entries[1].record.name, "Bia");
    }

    #[test]
    fn test_read_source_skips_blank_rows() {
        let mut data = WorkbookData::new();
        data.add_source_sheet("leads");
        data.sheets
            .get_mut("leads")
            .unwrap()
            .push(vec![json!(""), json!(null)]);
        data.push_lead("leads", &lead("Ana", 21)).unwrap();

        let entries = data.read_source("leads").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].row_number, 3);
    }

    #[test]
    fn test_missing_source_sheet() {
        let data = WorkbookData::new();
        assert!(matches!(
            data.read_source("leads"),
            Err(SinkError::SourceNotFound(_))
        ));
    }

    #[test]
    fn test_append_rows_requires_next_free_row() {
        let mut data = WorkbookData::new();
        data.add_destination_sheet("HEDER");
        assert_eq!(data.last_row("HEDER").unwrap(), 1);

        let rows = vec![ExportRow::default(), ExportRow::default()];
        let err = data.append_rows("HEDER", 1, &rows).unwrap_err();
        assert!(matches!(
            err,
            SinkError::PositionMismatch {
                expected: 2,
                requested: 1,
                ..
            }
        ));

        data.append_rows("HEDER", 2, &rows).unwrap();
        assert_eq!(data.last_row("HEDER").unwrap(), 3);
    }

    #[test]
    fn test_mark_status_never_overwrites() {
        let mut data = WorkbookData::new();
        data.add_source_sheet("leads");
        let row = data.push_lead("leads", &lead("Ana", 21)).unwrap();

        assert!(data.mark_status("leads", row, "05/01/2024").unwrap());
        assert!(!data.mark_status("leads", row, "06/01/2024").unwrap());

        let entries = data.read_source("leads").unwrap();
        assert_eq!(entries[0].record.status, "05/01/2024");
    }

    #[test]
    fn test_mark_status_keeps_whitespace_status() {
        let mut data = WorkbookData::new();
        data.add_source_sheet("leads");
        let mut record = lead("Ana", 21);
        record.status = " ".to_string();
        let row = data.push_lead("leads", &record).unwrap();

        assert!(!data.mark_status("leads", row, "05/01/2024").unwrap());
        assert_eq!(data.read_source("leads").unwrap()[0].record.status, " ");
    }

    #[test]
    fn test_mark_status_pads_short_rows() {
        let mut data = WorkbookData::new();
        data.add_source_sheet("leads");
        data.sheets
            .get_mut("leads")
            .unwrap()
            .push(vec![json!("Ana"), json!("21 99999-0000"), json!(21)]);

        assert!(data.mark_status("leads", 2, "DDD_NAO_MAPEADO").unwrap());
        let rows = data.rows("leads").unwrap();
        assert_eq!(rows[1].len(), SOURCE_COLUMNS.len());
    }

    #[test]
    fn test_mark_status_rejects_header_and_missing_rows() {
        let mut data = WorkbookData::new();
        data.add_source_sheet("leads");
        assert!(data.mark_status("leads", 1, "x").is_err());
        assert!(data.mark_status("leads", 2, "x").is_err());
    }

    #[test]
    fn test_serialized_shape() {
        let mut data = WorkbookData::new();
        data.add_sheet("S", vec![json!("h")]);
        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(value, json!({"sheets": {"S": [["h"]]}}));
    }
}
