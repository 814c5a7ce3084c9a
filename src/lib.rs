// Lead Router - Lead Routing & Batch Export Tool
// Copyright (c) 2025 Lead Router Contributors
// Licensed under the MIT License

//! # Lead Router - Lead Routing & Idempotent Batch Export
//!
//! Lead Router reads incoming sales leads from a source sheet, assigns each
//! one to an owner by the phone's area code, and appends normalized rows to
//! that owner's destination sheet.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Routing** area codes to owners through a fixed table, with a reserved
//!   range spread evenly across a fair pool
//! - **Normalizing** names, phones, deadlines, regions and source tags
//! - **Exporting** in batches with one append per owner and continuous
//!   sequence numbers
//! - **Marking** every processed source row so reruns never export it again
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (routing, normalization, export)
//! - [`adapters`] - Source and destination sinks (memory, JSON file, PostgreSQL)
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lead_router::adapters::workbook::create_sinks;
//! use lead_router::config::load_config;
//! use lead_router::core::export::ExportCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("lead-router.toml")?;
//!     let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!
//!     let sinks = create_sinks(&config).await?;
//!     let coordinator = ExportCoordinator::new(&config, sinks, shutdown_rx)?;
//!     let summary = coordinator.run().await?;
//!
//!     println!("Exported {} of {} leads", summary.total_exported, summary.total_selected);
//!     Ok(())
//! }
//! ```
//!
//! ## Routing
//!
//! ```rust
//! use lead_router::config::RoutingConfig;
//! use lead_router::core::routing::{OwnerResolver, RoutingTable};
//! use lead_router::domain::AreaCode;
//! use std::sync::Arc;
//!
//! let table = RoutingTable::from_config(&RoutingConfig::default()).unwrap();
//! let resolver = OwnerResolver::new(Arc::new(table));
//! let mut counter = resolver.new_counter();
//!
//! let owner = resolver.resolve(AreaCode::new(21), &mut counter).unwrap();
//! assert_eq!(owner.as_str(), "JHONNY");
//!
//! let first = resolver.resolve(AreaCode::new(11), &mut counter).unwrap();
//! let second = resolver.resolve(AreaCode::new(11), &mut counter).unwrap();
//! assert_ne!(first, second);
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return [`domain::Result`], backed by
//! [`domain::RouterError`]. Records that cannot be routed are not errors:
//! they receive a terminal status and the run continues.
//!
//! ## Logging
//!
//! Lead Router uses structured logging with the `tracing` crate; see
//! [`logging::init_logging`].

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
