//! Status command implementation
//!
//! This module implements the `status` command for displaying the source
//! sheet's status breakdown and the size of every owner's destination sheet.

use crate::adapters::workbook::{create_sinks, DestinationBook};
use crate::config::load_config;
use crate::core::routing::RoutingTable;
use crate::domain::{LeadStatus, OwnerName, SourceEntry};
use clap::Args;
use std::collections::BTreeMap;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Also list the export dates found in the source sheet
    #[arg(long)]
    pub by_date: bool,
}

/// Counts of source records per status
#[derive(Debug, Default, PartialEq, Eq)]
pub struct StatusBreakdown {
    /// Records with an empty status cell
    pub pending: usize,
    /// Records carrying an export date, keyed by that date
    pub exported: BTreeMap<String, usize>,
    /// Records marked with an unmapped area code
    pub unmapped: usize,
    /// Records whose owner had no destination sheet
    pub destination_missing: usize,
}

impl StatusBreakdown {
    /// Tallies the status of every entry
    pub fn from_entries(entries: &[SourceEntry]) -> Self {
        let mut breakdown = Self::default();
        for entry in entries {
            match entry.record.lead_status() {
                LeadStatus::Pending => breakdown.pending += 1,
                LeadStatus::Exported(date) => *breakdown.exported.entry(date).or_insert(0) += 1,
                LeadStatus::UnmappedAreaCode => breakdown.unmapped += 1,
                LeadStatus::DestinationNotFound => breakdown.destination_missing += 1,
            }
        }
        breakdown
    }

    /// Total exported records across all dates
    pub fn total_exported(&self) -> usize {
        self.exported.values().sum()
    }
}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Checking export status");

        println!("📊 Export Status");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {}", e);
                return Ok(2); // Configuration error exit code
            }
        };

        let table = match RoutingTable::from_config(&config.routing) {
            Ok(t) => t,
            Err(e) => {
                println!("❌ Invalid routing tables");
                println!("   Error: {}", e);
                return Ok(2);
            }
        };

        let sinks = match create_sinks(&config).await {
            Ok(s) => s,
            Err(e) => {
                println!("❌ Failed to connect to sink");
                println!("   Error: {}", e);
                return Ok(4); // Connection error exit code
            }
        };

        let entries = match sinks.source.read_records().await {
            Ok(entries) => entries,
            Err(e) => {
                println!("❌ Failed to read source sheet '{}'", sinks.source.name());
                println!("   Error: {}", e);
                return Ok(5); // Fatal error exit code
            }
        };

        let breakdown = StatusBreakdown::from_entries(&entries);
        println!("Source sheet '{}': {} record(s)", sinks.source.name(), entries.len());
        println!("  Pending: {}", breakdown.pending);
        println!("  Exported: {}", breakdown.total_exported());
        println!("  Unmapped area code: {}", breakdown.unmapped);
        println!("  Destination missing: {}", breakdown.destination_missing);

        if self.by_date && !breakdown.exported.is_empty() {
            println!();
            println!("{:<20} {:<10}", "Export Date", "Count");
            println!("{}", "-".repeat(30));
            for (date, count) in &breakdown.exported {
                println!("{:<20} {:<10}", date, count);
            }
        }

        println!();
        println!("{:<20} {:<20} {:<10}", "Owner", "Label", "Data Rows");
        println!("{}", "-".repeat(50));

        for owner in table.all_owners() {
            let rows = match destination_rows(sinks.destinations.as_ref(), &owner).await {
                Ok(Some(rows)) => rows.to_string(),
                Ok(None) => "❌ no sheet".to_string(),
                Err(e) => {
                    println!("❌ Failed to inspect sheet '{}'", owner);
                    println!("   Error: {}", e);
                    return Ok(5);
                }
            };
            println!("{:<20} {:<20} {:<10}", owner.as_str(), table.label_for(&owner), rows);
        }

        println!();
        Ok(0)
    }
}

/// Data rows below the header of an owner's sheet, or `None` without a sheet
async fn destination_rows(
    destinations: &dyn DestinationBook,
    owner: &OwnerName,
) -> crate::domain::Result<Option<usize>> {
    if !destinations.has_sheet(owner).await? {
        return Ok(None);
    }
    let last_row = destinations.last_row(owner).await?;
    Ok(Some(last_row.saturating_sub(1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::workbook::{MemoryWorkbook, WorkbookData};
    use crate::domain::LeadRecord;

    fn entry(row_number: usize, status: &str) -> SourceEntry {
        SourceEntry::new(
            row_number,
            LeadRecord {
                name: format!("lead {row_number}"),
                status: status.to_string(),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_status_args_defaults() {
        let args = StatusArgs { by_date: false };
        assert!(!args.by_date);
    }

    #[test]
    fn test_breakdown_counts_each_status() {
        let entries = vec![
            entry(2, ""),
            entry(3, "10/01/2024"),
            entry(4, "10/01/2024"),
            entry(5, "11/01/2024"),
            entry(6, "DDD_NAO_MAPEADO"),
            entry(7, "ABA_NAO_ENCONTRADA"),
            entry(8, "   "),
        ];

        let breakdown = StatusBreakdown::from_entries(&entries);

        assert_eq!(breakdown.pending, 2);
        assert_eq!(breakdown.total_exported(), 3);
        assert_eq!(breakdown.exported.get("10/01/2024"), Some(&2));
        assert_eq!(breakdown.unmapped, 1);
        assert_eq!(breakdown.destination_missing, 1);
    }

    #[tokio::test]
    async fn test_destination_rows() {
        let mut data = WorkbookData::new();
        data.add_source_sheet("Leads");
        data.add_destination_sheet("JHONNY");
        let workbook = MemoryWorkbook::from_data("Leads", data);

        let jhonny = OwnerName::new("JHONNY").unwrap();
        let ungaro = OwnerName::new("UNGARO").unwrap();

        assert_eq!(destination_rows(&workbook, &jhonny).await.unwrap(), Some(0));
        assert_eq!(destination_rows(&workbook, &ungaro).await.unwrap(), None);
    }
}
