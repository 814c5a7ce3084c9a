//! Core business logic for the lead router.
//!
//! This module contains the routing rules, field normalization and the
//! export orchestration.
//!
//! # Modules
//!
//! - [`normalize`] - Pure field normalization (phone, deadline, region)
//! - [`routing`] - Area code to owner resolution with fair distribution
//! - [`export`] - Batch selection, export coordination and summaries
//!
//! # Export Workflow
//!
//! The typical export run:
//!
//! 1. **Read**: Load every source row once
//! 2. **Select**: Keep up to `batch_size` rows with an empty status
//! 3. **Resolve**: Map each area code to an owner, or mark the row unmapped
//! 4. **Check**: Probe each owner's destination sheet once, or mark the row
//! 5. **Flush**: Append each owner's rows in one block, numbered from the
//!    sheet's current size
//! 6. **Mark**: Write the export date into the exported source rows
//! 7. **Report**: Log the export summary
//!
//! # Example
//!
//! ```rust,no_run
//! use lead_router::adapters::workbook::create_sinks;
//! use lead_router::config::load_config;
//! use lead_router::core::export::ExportCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Load configuration
//! let config = load_config("lead-router.toml")?;
//!
//! // Create shutdown signal
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!
//! // Open the sinks and create the coordinator
//! let sinks = create_sinks(&config).await?;
//! let coordinator = ExportCoordinator::new(&config, sinks, shutdown_rx)?;
//!
//! // Execute export
//! let summary = coordinator.run().await?;
//!
//! println!("Selected: {}", summary.total_selected);
//! println!("Exported: {}", summary.total_exported);
//! println!("Unmapped: {}", summary.unmapped);
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod normalize;
pub mod routing;
