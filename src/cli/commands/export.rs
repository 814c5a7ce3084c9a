//! Export command implementation
//!
//! This module implements the `export` command: one run of routing pending
//! leads into their owners' destination sheets.

use crate::adapters::workbook::create_sinks;
use crate::config::load_config;
use crate::core::export::{ExportCoordinator, ExportSummary};
use clap::Args;
use tokio::sync::watch;

/// Number of errors printed before the rest are summarized
const MAX_PRINTED_ERRORS: usize = 10;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Dry run mode - classify and number rows without writing to any sink
    #[arg(long)]
    pub dry_run: bool,

    /// Override the number of pending records processed in this run
    #[arg(long)]
    pub batch_size: Option<usize>,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        if let Some(batch_size) = self.batch_size {
            if batch_size == 0 {
                eprintln!("--batch-size must be greater than 0");
                return Ok(2);
            }
            tracing::info!(batch_size, "Overriding batch size from CLI");
            config.export.batch_size = batch_size;
        }

        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }
        let dry_run = config.application.dry_run;

        if dry_run {
            tracing::info!("Dry run mode enabled - no data will be written");
            println!("🔍 DRY RUN MODE - No data will be written to any sheet");
            println!();
        }

        // Confirmation prompt (unless --yes or dry-run)
        if !self.yes && !dry_run {
            println!("Export Configuration:");
            println!("  Sink: {:?}", config.sink_target);
            println!("  Batch size: {}", config.export.batch_size);
            println!("  Fair pool: {}", config.routing.fair_pool.join(", "));
            println!("  Fixed owners: {}", config.routing.owners.len());
            println!();
            print!("Proceed with export? [y/N]: ");
            use std::io::{self, Write};
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Export cancelled.");
                return Ok(0);
            }
        }

        tracing::info!("Opening sinks");
        let sinks = match create_sinks(&config).await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Failed to open sinks");
                eprintln!("Failed to connect to sink: {e}");
                return Ok(4); // Connection error exit code
            }
        };

        let coordinator = match ExportCoordinator::new(&config, sinks, shutdown_signal) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create export coordinator");
                eprintln!("Failed to initialize export: {e}");
                return Ok(2);
            }
        };

        println!("🚀 Starting export...");
        println!();

        let summary = match coordinator.run().await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        print_summary(&summary);

        let exit_code = exit_code_for(&summary);
        match exit_code {
            130 => {
                println!("⚠️  Export interrupted. Unflushed records stay pending.");
                println!("   Run the same command to continue.");
                tracing::info!("Export interrupted by user signal");
            }
            5 => println!("❌ Export aborted on a sink failure. Flushed owners stay committed."),
            1 => println!("⚠️  Export completed with per-record failures"),
            _ => println!("✅ Export completed successfully!"),
        }

        Ok(exit_code)
    }
}

/// Maps a finished run to the process exit code
pub fn exit_code_for(summary: &ExportSummary) -> i32 {
    if summary.interrupted {
        130 // SIGINT exit code (standard Unix convention)
    } else if summary.aborted {
        5
    } else if summary.has_record_failures() {
        1
    } else {
        0
    }
}

fn print_summary(summary: &ExportSummary) {
    println!();
    println!("📊 Export Summary:");
    println!("  Selected: {}", summary.total_selected);
    if summary.dry_run {
        println!("  Would export: {}", summary.total_exported);
    } else {
        println!("  Exported: {}", summary.total_exported);
    }
    println!("  Unmapped area code: {}", summary.unmapped);
    println!("  Destination missing: {}", summary.destination_missing);
    println!("  Status conflicts: {}", summary.status_conflicts);
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());

    if !summary.per_owner_counts.is_empty() {
        println!();
        println!("  Per owner:");
        for (owner, count) in &summary.per_owner_counts {
            println!("    {owner:<20} {count}");
        }
    }

    if !summary.fair_pool_distribution.is_empty() {
        println!();
        println!("  Fair pool distribution:");
        for (owner, count) in &summary.fair_pool_distribution {
            println!("    {owner:<20} {count}");
        }
    }
    println!();

    if !summary.errors.is_empty() {
        println!("⚠️  Errors encountered:");
        for error in summary.errors.iter().take(MAX_PRINTED_ERRORS) {
            println!("  - {:?}: {}", error.error_type, error.message);
            if let Some(context) = &error.context {
                println!("    Context: {context}");
            }
        }
        if summary.errors.len() > MAX_PRINTED_ERRORS {
            println!(
                "  ... and {} more errors",
                summary.errors.len() - MAX_PRINTED_ERRORS
            );
        }
        println!();
    }
}
