//! PostgreSQL sink
//!
//! This module stores the source sheet and the owner destination sheets in
//! PostgreSQL tables.

pub mod adapter;
pub mod client;
pub mod models;

pub use adapter::PostgreSQLAdapter;
pub use client::PostgreSQLClient;
