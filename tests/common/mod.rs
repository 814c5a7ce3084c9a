//! Shared fixtures for integration tests

#![allow(dead_code)]

use lead_router::adapters::workbook::{MemoryWorkbook, Sinks, WorkbookData};
use lead_router::config::{parse_config, RouterConfig};
use lead_router::core::export::ExportCoordinator;
use lead_router::domain::lead::{cell_to_string, STATUS_COLUMN};
use lead_router::domain::{AreaCode, LeadRecord};
use std::sync::Arc;
use tokio::sync::watch;

pub const SOURCE_SHEET: &str = "leads";
pub const EXPORT_DATE: &str = "10/01/2024";

pub const CONFIG: &str = r#"
sink_target = "workbook"

[workbook]
path = "unused.json"

[logging]
local_enabled = false
"#;

pub fn config() -> RouterConfig {
    parse_config(CONFIG).unwrap()
}

pub fn lead(name: &str, code: u32) -> LeadRecord {
    LeadRecord {
        name: name.to_string(),
        phone: format!("({code}) 99876-5432"),
        area_code: Some(AreaCode::new(code)),
        submitted_at: "2024-01-01".to_string(),
        ..Default::default()
    }
}

pub fn workbook_data(leads: &[LeadRecord], sheets: &[&str]) -> WorkbookData {
    let mut data = WorkbookData::new();
    data.add_source_sheet(SOURCE_SHEET);
    for sheet in sheets {
        data.add_destination_sheet(sheet);
    }
    for record in leads {
        data.push_lead(SOURCE_SHEET, record).unwrap();
    }
    data
}

pub fn memory_workbook(leads: &[LeadRecord], sheets: &[&str]) -> Arc<MemoryWorkbook> {
    Arc::new(MemoryWorkbook::from_data(
        SOURCE_SHEET,
        workbook_data(leads, sheets),
    ))
}

pub fn sinks(workbook: &Arc<MemoryWorkbook>) -> Sinks {
    Sinks {
        source: workbook.clone(),
        destinations: workbook.clone(),
    }
}

pub fn coordinator(sinks: Sinks) -> ExportCoordinator {
    let (_tx, rx) = watch::channel(false);
    ExportCoordinator::new(&config(), sinks, rx)
        .unwrap()
        .with_export_date(EXPORT_DATE)
}

pub fn status_of(data: &WorkbookData, row: usize) -> String {
    let cells = &data.rows(SOURCE_SHEET).unwrap()[row - 1];
    cells.get(STATUS_COLUMN).map(cell_to_string).unwrap_or_default()
}

/// Data rows of a destination sheet, header excluded
pub fn data_rows(data: &WorkbookData, sheet: &str) -> Vec<Vec<serde_json::Value>> {
    data.rows(sheet).unwrap()[1..].to_vec()
}
