//! Lead record domain model
//!
//! A [`LeadRecord`] is the immutable snapshot of one source row, read once
//! per run. Its status cell drives the per-record state machine:
//! `Pending → {Exported(date) | UnmappedAreaCode | DestinationNotFound}`.

use super::ids::AreaCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Status value written for records whose area code has no owner
pub const STATUS_UNMAPPED_AREA_CODE: &str = "DDD_NAO_MAPEADO";

/// Status value written for records whose owner has no destination sheet
pub const STATUS_DESTINATION_NOT_FOUND: &str = "ABA_NAO_ENCONTRADA";

/// Source sheet column headers, in column order
pub const SOURCE_COLUMNS: [&str; 8] = [
    "name",
    "phone",
    "areaCode",
    "submittedAt",
    "altName",
    "region",
    "tag",
    "status",
];

/// Zero-based index of the status column in the source sheet
pub const STATUS_COLUMN: usize = 7;

/// Processing status of a source record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeadStatus {
    /// Status cell empty: not yet picked up
    Pending,
    /// Exported on the given date (or any other non-empty marker)
    Exported(String),
    /// Area code resolved to no owner
    UnmappedAreaCode,
    /// Owner resolved but its destination sheet is missing
    DestinationNotFound,
}

impl LeadStatus {
    /// Interprets a raw status cell
    ///
    /// Only an empty cell is pending; whitespace counts as content. The two
    /// failure markers map to their variants; anything else is treated as
    /// exported and therefore terminal.
    pub fn from_cell(raw: &str) -> Self {
        if raw.is_empty() {
            return LeadStatus::Pending;
        }
        match raw.trim() {
            STATUS_UNMAPPED_AREA_CODE => LeadStatus::UnmappedAreaCode,
            STATUS_DESTINATION_NOT_FOUND => LeadStatus::DestinationNotFound,
            _ => LeadStatus::Exported(raw.to_string()),
        }
    }

    /// Returns the cell value representing this status
    pub fn as_cell(&self) -> &str {
        match self {
            LeadStatus::Pending => "",
            LeadStatus::Exported(date) => date,
            LeadStatus::UnmappedAreaCode => STATUS_UNMAPPED_AREA_CODE,
            LeadStatus::DestinationNotFound => STATUS_DESTINATION_NOT_FOUND,
        }
    }

    /// Whether no further processing will happen for this record
    pub fn is_terminal(&self) -> bool {
        !matches!(self, LeadStatus::Pending)
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeadStatus::Pending => write!(f, "PENDING"),
            other => write!(f, "{}", other.as_cell()),
        }
    }
}

/// One lead as captured in the source sheet
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LeadRecord {
    /// Lead name
    pub name: String,
    /// Fallback display name (e.g. messaging profile name)
    pub alt_name: String,
    /// Free-form phone number
    pub phone: String,
    /// Area code, if the cell held a leading integer
    pub area_code: Option<AreaCode>,
    /// Submission date as captured (may be empty)
    pub submitted_at: String,
    /// Free-text region
    pub region: String,
    /// Free-text tag; a configured marker identifies the traffic source
    pub tag: String,
    /// Raw status cell
    pub status: String,
}

impl LeadRecord {
    /// Builds a record from a row of cells in [`SOURCE_COLUMNS`] order
    ///
    /// Missing trailing cells are treated as empty.
    pub fn from_cells(cells: &[Value]) -> Self {
        let cell = |index: usize| cells.get(index).map(cell_to_string).unwrap_or_default();
        let area_code_raw = cell(2);

        Self {
            name: cell(0),
            phone: cell(1),
            area_code: AreaCode::parse_lenient(&area_code_raw),
            submitted_at: cell(3),
            alt_name: cell(4),
            region: cell(5),
            tag: cell(6),
            status: cell(STATUS_COLUMN),
        }
    }

    /// Returns the row cells in [`SOURCE_COLUMNS`] order
    pub fn to_cells(&self) -> Vec<Value> {
        vec![
            Value::String(self.name.clone()),
            Value::String(self.phone.clone()),
            self.area_code
                .map(|code| Value::from(code.value()))
                .unwrap_or(Value::String(String::new())),
            Value::String(self.submitted_at.clone()),
            Value::String(self.alt_name.clone()),
            Value::String(self.region.clone()),
            Value::String(self.tag.clone()),
            Value::String(self.status.clone()),
        ]
    }

    /// Typed view of the status cell
    pub fn lead_status(&self) -> LeadStatus {
        LeadStatus::from_cell(&self.status)
    }

    /// Whether the record is still waiting to be exported
    pub fn is_pending(&self) -> bool {
        self.status.is_empty()
    }
}

/// A source record together with its absolute sheet row number
///
/// Row 1 is the header, so the first data row is row 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    /// Absolute row number in the source sheet
    pub row_number: usize,
    /// The record read from that row
    pub record: LeadRecord,
}

impl SourceEntry {
    /// Creates a new source entry
    pub fn new(row_number: usize, record: LeadRecord) -> Self {
        Self { row_number, record }
    }
}

/// Renders a cell value as text
///
/// Integral numbers drop their fractional part so that `21.0` reads as `21`.
pub fn cell_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}
