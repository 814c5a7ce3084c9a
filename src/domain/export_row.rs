//! Destination row domain model

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Number of blank trailing columns kept for future use
pub const RESERVED_COLUMNS: usize = 5;

/// Destination sheet column headers, in column order
pub const EXPORT_COLUMNS: [&str; 14] = [
    "sequenceNumber",
    "displayName",
    "formattedPhone",
    "region",
    "stateCode",
    "sourceTag",
    "submittedAt",
    "deadline",
    "resolvedOwnerLabel",
    "reserved1",
    "reserved2",
    "reserved3",
    "reserved4",
    "reserved5",
];

/// A row appended to an owner's destination sheet
///
/// Rows are built with a placeholder sequence number; the coordinator assigns
/// the real one at flush time, once the sheet's current size is known.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExportRow {
    /// Per-owner sequence number
    pub sequence_number: u64,
    /// Lead name, or its fallback
    pub display_name: String,
    /// Normalized phone number
    pub formatted_phone: String,
    /// Region as captured
    pub region: String,
    /// State code derived from the area code
    pub state_code: String,
    /// Traffic source label, or empty
    pub source_tag: String,
    /// Submission date as captured
    pub submitted_at: String,
    /// Follow-up deadline (`dd/MM/yyyy`)
    pub deadline: String,
    /// Published label of the owner
    pub owner_label: String,
}

impl ExportRow {
    /// Returns the row cells in [`EXPORT_COLUMNS`] order, reserved columns blank
    pub fn to_cells(&self) -> Vec<Value> {
        let mut cells = vec![
            Value::from(self.sequence_number),
            Value::String(self.display_name.clone()),
            Value::String(self.formatted_phone.clone()),
            Value::String(self.region.clone()),
            Value::String(self.state_code.clone()),
            Value::String(self.source_tag.clone()),
            Value::String(self.submitted_at.clone()),
            Value::String(self.deadline.clone()),
            Value::String(self.owner_label.clone()),
        ];
        cells.extend(std::iter::repeat(Value::String(String::new())).take(RESERVED_COLUMNS));
        cells
    }
}
