//! Sink factory
//!
//! Builds the source and destination sinks selected by `sink_target`.

use crate::adapters::json::JsonWorkbook;
use crate::adapters::postgresql::{PostgreSQLAdapter, PostgreSQLClient};
use crate::adapters::workbook::traits::{DestinationBook, SourceSheet};
use crate::config::schema::{RouterConfig, SinkTarget};
use crate::domain::{Result, RouterError};
use std::sync::Arc;

/// Source and destination handles for one run
pub struct Sinks {
    /// Source sheet
    pub source: Arc<dyn SourceSheet>,
    /// Destination sheets
    pub destinations: Arc<dyn DestinationBook>,
}

/// Create the sinks selected by the configuration
///
/// Both handles share one underlying adapter.
///
/// # Errors
///
/// Returns an error if the selected section is missing or the backend
/// cannot be opened.
pub async fn create_sinks(config: &RouterConfig) -> Result<Sinks> {
    match config.sink_target {
        SinkTarget::Workbook => {
            let workbook_config = config.workbook.as_ref().ok_or_else(|| {
                RouterError::Configuration(
                    "workbook configuration is required when sink_target = 'workbook'".to_string(),
                )
            })?;

            tracing::info!(path = %workbook_config.path, "Opening JSON workbook");
            let workbook = Arc::new(JsonWorkbook::open(
                &workbook_config.path,
                workbook_config.source_sheet.clone(),
            )?);

            Ok(Sinks {
                source: workbook.clone(),
                destinations: workbook,
            })
        }
        SinkTarget::PostgreSQL => {
            let pg_config = config.postgresql.as_ref().ok_or_else(|| {
                RouterError::Configuration(
                    "postgresql configuration is required when sink_target = 'postgresql'"
                        .to_string(),
                )
            })?;

            tracing::info!("Creating PostgreSQL client");
            let client = PostgreSQLClient::new(pg_config.clone())?;
            client.test_connection().await?;
            client.ensure_schema().await?;
            let adapter = Arc::new(PostgreSQLAdapter::new(client));

            Ok(Sinks {
                source: adapter.clone(),
                destinations: adapter,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::workbook::data::WorkbookData;
    use crate::config::parse_config;
    use crate::config::schema::WorkbookConfig;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_create_workbook_sinks() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("book.json");
        let mut data = WorkbookData::new();
        data.add_source_sheet("leads");
        JsonWorkbook::create(&path, "leads", data).unwrap();

        let mut config = parse_config("sink_target = \"workbook\"\n[workbook]\npath = \"x\"\n")
            .unwrap();
        config.workbook = Some(WorkbookConfig {
            path: path.display().to_string(),
            source_sheet: "leads".to_string(),
        });

        let sinks = create_sinks(&config).await.unwrap();
        assert_eq!(sinks.source.name(), "leads");
        assert!(sinks.source.read_records().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_workbook_sinks_missing_file() {
        let dir = TempDir::new().unwrap();
        let mut config = parse_config("sink_target = \"workbook\"\n[workbook]\npath = \"x\"\n")
            .unwrap();
        config.workbook = Some(WorkbookConfig {
            path: dir.path().join("missing.json").display().to_string(),
            source_sheet: "leads".to_string(),
        });

        assert!(create_sinks(&config).await.is_err());
    }
}
