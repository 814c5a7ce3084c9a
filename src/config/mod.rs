//! Configuration management for the lead router.
//!
//! This module provides TOML-based configuration loading, parsing, and
//! validation.
//!
//! # Overview
//!
//! The lead router uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `LEAD_ROUTER_*` environment overrides
//! - Default values for optional settings, including the routing tables
//! - Validation on load, routing tables included
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use lead_router::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("lead-router.toml")?;
//!
//! println!("Batch size: {}", config.export.batch_size);
//! println!("Fair pool: {:?}", config.routing.fair_pool);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level and dry-run default
//! - [`ExportConfig`] - Batch size, deadline offset, source tag marker
//! - [`RoutingConfig`] - Owner table, fair pool, reserved range, aliases
//! - [`WorkbookConfig`] - JSON workbook sink
//! - [`PostgreSQLConfig`] - PostgreSQL sink
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! sink_target = "postgresql"
//!
//! [export]
//! batch_size = 100
//! date_offset_days = 4
//!
//! [routing]
//! fair_pool = ["ANA", "BIA"]
//!
//! [[routing.owners]]
//! name = "CARLOS"
//! area_codes = [21, 22, 24]
//!
//! [postgresql]
//! connection_string = "${LEAD_ROUTER_DSN}"
//! ```
//!
//! A `[routing]` section replaces the built-in routing tables as a whole.

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, ExportConfig, LoggingConfig, OwnerRule, PostgreSQLConfig, ReservedRange,
    RouterConfig, RoutingConfig, SinkTarget, WorkbookConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
