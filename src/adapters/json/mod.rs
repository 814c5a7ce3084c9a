//! JSON file workbook
//!
//! Stores the source sheet and every destination sheet in a single JSON
//! document. Suited to single-operator deployments and local testing.

pub mod adapter;

pub use adapter::JsonWorkbook;
