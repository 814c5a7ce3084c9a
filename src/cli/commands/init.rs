//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file and, optionally, an empty JSON workbook laid out for
//! the configured owners.

use crate::adapters::json::JsonWorkbook;
use crate::adapters::workbook::WorkbookData;
use crate::config::RoutingConfig;
use crate::core::routing::RoutingTable;
use clap::Args;
use std::fs;
use std::path::Path;

/// Source sheet name used by the generated files
const SAMPLE_SOURCE_SHEET: &str = "leads";

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "lead-router.toml")]
    pub output: String,

    /// Also create an empty JSON workbook at this path
    #[arg(long)]
    pub workbook: Option<String>,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing lead router configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        let workbook_path = self.workbook.as_deref().unwrap_or("leads.json");
        let config_content = Self::generate_config(workbook_path);

        if let Err(e) = fs::write(&self.output, config_content) {
            println!("❌ Failed to write configuration file");
            println!("   Error: {}", e);
            return Ok(5); // Fatal error exit code
        }
        println!("✅ Configuration file created: {}", self.output);

        if let Some(path) = &self.workbook {
            match Self::create_sample_workbook(path) {
                Ok(sheets) => {
                    println!("✅ Workbook created: {path} ({sheets} sheet(s))");
                }
                Err(e) => {
                    println!("❌ Failed to create workbook");
                    println!("   Error: {}", e);
                    return Ok(5);
                }
            }
        }

        println!();
        println!("Next steps:");
        println!("  1. Edit {} with your owners and area codes", self.output);
        println!("  2. Set sink_target to 'workbook' or 'postgresql'");
        println!("  3. For PostgreSQL, export LEAD_ROUTER_DSN with the connection string");
        println!("  4. Validate configuration: lead-router validate-config");
        println!("  5. Run export: lead-router export");
        println!();
        Ok(0)
    }

    /// Creates a workbook with the source sheet and one sheet per owner
    ///
    /// Returns the number of sheets written.
    fn create_sample_workbook(path: &str) -> crate::domain::Result<usize> {
        let table = RoutingTable::from_config(&RoutingConfig::default())?;

        let mut data = WorkbookData::new();
        data.add_source_sheet(SAMPLE_SOURCE_SHEET);
        for owner in table.all_owners() {
            data.add_destination_sheet(owner.as_str());
        }
        let sheets = data.sheets.len();

        JsonWorkbook::create(path, SAMPLE_SOURCE_SHEET, data)?;
        Ok(sheets)
    }

    /// Generate the sample configuration
    fn generate_config(workbook_path: &str) -> String {
        format!(
            r#"# Lead Router Configuration File
# Routes pending leads to owner sheets by area code

# ============================================================================
# Application Configuration
# ============================================================================
[application]
# Log level: trace, debug, info, warn, error
log_level = "info"

# Dry run mode: classify and number rows without writing anything
dry_run = false

# ============================================================================
# Export Configuration
# ============================================================================
[export]
# Maximum number of pending records processed per run
batch_size = 100

# Days added to the submission date to compute the follow-up deadline
date_offset_days = 4

# Records whose tag equals the marker are labelled as coming from that source
source_tag_marker = "VINDO DO QG"
source_tag_label = "QG"

# ============================================================================
# Routing Configuration
# ============================================================================
# Omit the [routing] section to use the built-in tables. Declaring it
# replaces them as a whole.
#
# [routing]
# # Area codes shared across the fair pool
# reserved_range = {{ start = 11, end = 19 }}
#
# # Owners sharing the reserved range; order breaks ties
# fair_pool = ["UNGARO", "MURALHA", "VICTÃO", "JULIÃO", "KATCHAU"]
#
# # Published labels for owner keys
# aliases = {{ JHONNY = "JHONY", MURALHA = "DIGÃO" }}
#
# # Fixed assignments, matched in order
# [[routing.owners]]
# name = "JHONNY"
# area_codes = [27, 28, 21, 22, 24]

# ============================================================================
# Sink Configuration
# ============================================================================
# Sink target: "workbook" or "postgresql"
sink_target = "workbook"

[workbook]
# JSON workbook holding the source sheet and one sheet per owner
path = "{workbook_path}"
source_sheet = "{SAMPLE_SOURCE_SHEET}"

# [postgresql]
# connection_string = "${{LEAD_ROUTER_DSN}}"
# max_connections = 4
# connection_timeout_seconds = 30
# statement_timeout_seconds = 60
#
# Tables are created on first connection; see migrations/001_initial_schema.sql

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable local file logging
local_enabled = true

# Local log file directory
local_path = "/var/log/lead-router"

# Log rotation: daily, hourly or never
local_rotation = "daily"

# Number of rotated log files kept
local_max_files = 14
"#
        )
    }
}
