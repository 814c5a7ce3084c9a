//! Export coordinator - main orchestrator for the export process
//!
//! This module coordinates one export run: it selects pending source records,
//! resolves their owners, groups the resulting rows per owner, appends each
//! group to the owner's destination sheet and only then marks the source rows
//! as exported.

use crate::adapters::workbook::{DestinationBook, Sinks, SourceSheet};
use crate::config::schema::{ExportConfig, RouterConfig};
use crate::core::export::batch::{BatchSelector, OwnerBucket, OwnerBuckets};
use crate::core::export::summary::{ExportError, ExportErrorType, ExportSummary};
use crate::core::normalize::{
    compute_deadline, display_name, format_export_date, format_phone, region_for_area_code,
    source_tag,
};
use crate::core::routing::{OwnerLoadCounter, OwnerResolver, RoutingTable};
use crate::domain::{
    ExportRow, LeadRecord, OwnerName, Result, RouterError, SourceEntry,
    STATUS_DESTINATION_NOT_FOUND, STATUS_UNMAPPED_AREA_CODE,
};
use chrono::Local;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;

/// Sink failure that ends the run, with what was being done
struct SinkFailure {
    error_type: ExportErrorType,
    error: RouterError,
    context: String,
}

impl SinkFailure {
    fn read(error: RouterError, context: String) -> Self {
        Self {
            error_type: ExportErrorType::Read,
            error,
            context,
        }
    }

    fn write(error: RouterError, context: String) -> Self {
        Self {
            error_type: ExportErrorType::Write,
            error,
            context,
        }
    }
}

type Step<T> = std::result::Result<T, SinkFailure>;

/// Export coordinator
pub struct ExportCoordinator {
    export: ExportConfig,
    dry_run: bool,
    resolver: OwnerResolver,
    source: Arc<dyn SourceSheet>,
    destinations: Arc<dyn DestinationBook>,
    shutdown_signal: watch::Receiver<bool>,
    export_date: Option<String>,
}

impl ExportCoordinator {
    /// Create a new export coordinator
    ///
    /// # Errors
    ///
    /// Returns an error if the routing tables are invalid.
    pub fn new(
        config: &RouterConfig,
        sinks: Sinks,
        shutdown_signal: watch::Receiver<bool>,
    ) -> Result<Self> {
        let table = RoutingTable::from_config(&config.routing)?;
        table.log_coverage_gaps();

        Ok(Self {
            export: config.export.clone(),
            dry_run: config.application.dry_run,
            resolver: OwnerResolver::new(Arc::new(table)),
            source: sinks.source,
            destinations: sinks.destinations,
            shutdown_signal,
            export_date: None,
        })
    }

    /// Override dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Override the number of records processed per run
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.export.batch_size = batch_size;
        self
    }

    /// Fix the status value written for exported records
    ///
    /// Defaults to today's local date.
    pub fn with_export_date(mut self, export_date: impl Into<String>) -> Self {
        self.export_date = Some(export_date.into());
        self
    }

    /// Execute one export run
    ///
    /// Sink failures after the initial read stop the run; everything flushed
    /// before the failure stays committed, and the returned summary is marked
    /// `aborted`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the source sheet cannot be read.
    pub async fn run(&self) -> Result<ExportSummary> {
        let start_time = Instant::now();
        let mut summary = ExportSummary {
            dry_run: self.dry_run,
            ..ExportSummary::new()
        };

        let entries = self.source.read_records().await?;
        let selected = BatchSelector::new(self.export.batch_size).select(entries);

        if selected.is_empty() {
            tracing::info!(source = self.source.name(), "No pending records to export");
            return Ok(summary.with_duration(start_time.elapsed()));
        }

        summary.total_selected = selected.len();
        tracing::info!(
            source = self.source.name(),
            selected = selected.len(),
            batch_size = self.export.batch_size,
            dry_run = self.dry_run,
            "Starting export run"
        );

        let export_date = self
            .export_date
            .clone()
            .unwrap_or_else(|| format_export_date(Local::now()));
        let mut counter = self.resolver.new_counter();

        let outcome = match self.classify(&selected, &mut counter, &mut summary).await {
            Ok(buckets) => self.flush_all(buckets, &export_date, &mut summary).await,
            Err(failure) => Err(failure),
        };
        summary.fair_pool_distribution = counter.snapshot();

        if let Err(failure) = outcome {
            crate::log_error_with_context!(
                failure.error,
                failure.context,
                "Sink failure, aborting remaining run"
            );
            summary.abort(
                ExportError::new(failure.error_type, failure.error.to_string())
                    .with_context(failure.context),
            );
        }

        summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();

        Ok(summary)
    }

    /// Resolves every selected record and buffers the exportable ones
    async fn classify(
        &self,
        selected: &[SourceEntry],
        counter: &mut OwnerLoadCounter,
        summary: &mut ExportSummary,
    ) -> Step<OwnerBuckets> {
        let mut buckets = OwnerBuckets::new();
        let mut destination_cache: HashMap<OwnerName, bool> = HashMap::new();

        for entry in selected {
            let record = &entry.record;
            let owner = record
                .area_code
                .and_then(|code| self.resolver.resolve(code, counter));

            let Some(owner) = owner else {
                let area_code = record
                    .area_code
                    .map(|code| code.to_string())
                    .unwrap_or_default();
                tracing::warn!(
                    row = entry.row_number,
                    area_code = %area_code,
                    "Area code has no owner"
                );
                summary.unmapped += 1;
                summary.add_error(
                    ExportError::new(
                        ExportErrorType::Routing,
                        format!("Area code '{area_code}' has no owner"),
                    )
                    .with_context(format!("row={}", entry.row_number)),
                );
                self.write_status(entry.row_number, STATUS_UNMAPPED_AREA_CODE, summary)
                    .await?;
                continue;
            };

            let exists = match destination_cache.get(&owner) {
                Some(exists) => *exists,
                None => {
                    let exists = self
                        .destinations
                        .has_sheet(&owner)
                        .await
                        .map_err(|e| SinkFailure::read(e, format!("owner={owner}")))?;
                    if !exists {
                        tracing::warn!(owner = %owner, "Destination sheet not found");
                    }
                    destination_cache.insert(owner.clone(), exists);
                    exists
                }
            };

            if !exists {
                summary.destination_missing += 1;
                summary.add_error(
                    ExportError::new(
                        ExportErrorType::DestinationMissing,
                        format!("Destination sheet '{owner}' not found"),
                    )
                    .with_context(format!("row={}", entry.row_number)),
                );
                self.write_status(entry.row_number, STATUS_DESTINATION_NOT_FOUND, summary)
                    .await?;
                continue;
            }

            let row = self.build_row(record, &owner);
            buckets.push(&owner, entry.row_number, row);
        }

        tracing::debug!(
            owners = buckets.len(),
            rows = buckets.total_rows(),
            "Classified selected records"
        );
        Ok(buckets)
    }

    /// Normalizes a record into its destination row
    ///
    /// The sequence number is left at zero until flush time.
    fn build_row(&self, record: &LeadRecord, owner: &OwnerName) -> ExportRow {
        ExportRow {
            sequence_number: 0,
            display_name: display_name(&record.name, &record.alt_name),
            formatted_phone: format_phone(&record.phone),
            region: record.region.clone(),
            state_code: record
                .area_code
                .map(region_for_area_code)
                .unwrap_or_default()
                .to_string(),
            source_tag: source_tag(
                &record.tag,
                &self.export.source_tag_marker,
                &self.export.source_tag_label,
            ),
            submitted_at: record.submitted_at.clone(),
            deadline: compute_deadline(&record.submitted_at, self.export.date_offset_days),
            owner_label: self.resolver.label_for(owner).to_string(),
        }
    }

    /// Flushes buckets in first-seen order until done or asked to stop
    async fn flush_all(
        &self,
        buckets: OwnerBuckets,
        export_date: &str,
        summary: &mut ExportSummary,
    ) -> Step<()> {
        let buckets = buckets.into_buckets();
        let total = buckets.len();

        for (index, mut bucket) in buckets.into_iter().enumerate() {
            if *self.shutdown_signal.borrow() {
                tracing::warn!(
                    remaining_owners = total - index,
                    "Shutdown requested, leaving remaining records pending"
                );
                summary.interrupted = true;
                break;
            }

            self.flush_bucket(&mut bucket, export_date, summary).await?;
        }

        Ok(())
    }

    /// Appends one owner's rows, then marks their source rows
    async fn flush_bucket(
        &self,
        bucket: &mut OwnerBucket,
        export_date: &str,
        summary: &mut ExportSummary,
    ) -> Step<()> {
        let owner = bucket.owner.clone();

        let last_row = self
            .destinations
            .last_row(&owner)
            .await
            .map_err(|e| SinkFailure::read(e, format!("owner={owner}")))?;
        bucket.assign_sequence_numbers(last_row);
        let at_row = last_row + 1;
        let first_sequence = bucket.rows.first().map(|row| row.sequence_number);

        if self.dry_run {
            tracing::info!(
                owner = %owner,
                at_row,
                count = bucket.len(),
                first_sequence = ?first_sequence,
                "DRY RUN: Would append rows to destination"
            );
            summary.record_exported(owner.as_str(), bucket.len());
            return Ok(());
        }

        self.destinations
            .append_rows(&owner, at_row, &bucket.rows)
            .await
            .map_err(|e| SinkFailure::write(e, format!("owner={owner}, at_row={at_row}")))?;

        summary.record_exported(owner.as_str(), bucket.len());
        tracing::info!(
            owner = %owner,
            at_row,
            count = bucket.len(),
            first_sequence = ?first_sequence,
            "Appended rows to destination"
        );

        for row_number in &bucket.source_rows {
            self.write_status(*row_number, export_date, summary).await?;
        }

        Ok(())
    }

    /// Writes a status into an empty source status cell
    async fn write_status(
        &self,
        row_number: usize,
        status: &str,
        summary: &mut ExportSummary,
    ) -> Step<()> {
        if self.dry_run {
            tracing::debug!(row = row_number, status, "DRY RUN: Would write status");
            return Ok(());
        }

        let written = self
            .source
            .mark_status(row_number, status)
            .await
            .map_err(|e| SinkFailure::write(e, format!("row={row_number}")))?;

        if !written {
            tracing::warn!(
                row = row_number,
                status,
                "Status cell already set, leaving it unchanged"
            );
            summary.status_conflicts += 1;
            summary.add_error(
                ExportError::new(
                    ExportErrorType::StatusConflict,
                    format!("Status cell already set, '{status}' not written"),
                )
                .with_context(format!("row={row_number}")),
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::workbook::{MemoryWorkbook, WorkbookData};
    use crate::config::parse_config;
    use crate::domain::lead::{cell_to_string, STATUS_COLUMN};
    use crate::domain::AreaCode;
    use serde_json::Value;

    const CONFIG: &str = r#"
sink_target = "workbook"

[workbook]
path = "unused.json"
"#;

    fn lead(name: &str, code: Option<u32>) -> LeadRecord {
        LeadRecord {
            name: name.to_string(),
            phone: "(21) 99876-5432".to_string(),
            area_code: code.map(AreaCode::new),
            submitted_at: "2024-01-01".to_string(),
            tag: "vindo do qg".to_string(),
            ..Default::default()
        }
    }

    fn workbook(leads: &[LeadRecord], sheets: &[&str]) -> Arc<MemoryWorkbook> {
        let mut data = WorkbookData::new();
        data.add_source_sheet("leads");
        for sheet in sheets {
            data.add_destination_sheet(sheet);
        }
        for record in leads {
            data.push_lead("leads", record).unwrap();
        }
        Arc::new(MemoryWorkbook::from_data("leads", data))
    }

    fn coordinator(workbook: &Arc<MemoryWorkbook>) -> ExportCoordinator {
        let config = parse_config(CONFIG).unwrap();
        let (_tx, rx) = watch::channel(false);
        let sinks = Sinks {
            source: workbook.clone(),
            destinations: workbook.clone(),
        };
        ExportCoordinator::new(&config, sinks, rx)
            .unwrap()
            .with_export_date("10/01/2024")
    }

    fn status_of(data: &WorkbookData, row: usize) -> String {
        let cells = &data.rows("leads").unwrap()[row - 1];
        cell_to_string(&cells[STATUS_COLUMN])
    }

    #[tokio::test]
    async fn test_run_exports_fixed_owner_row() {
        let workbook = workbook(&[lead("Maria", Some(21))], &["JHONNY"]);
        let summary = coordinator(&workbook).run().await.unwrap();

        assert_eq!(summary.total_selected, 1);
        assert_eq!(summary.total_exported, 1);
        assert_eq!(summary.per_owner_counts.get("JHONNY"), Some(&1));
        assert!(summary.is_successful());

        let data = workbook.snapshot().await;
        let rows = data.rows("JHONNY").unwrap();
        assert_eq!(rows.len(), 2);
        let exported = &rows[1];
        assert_eq!(exported[0], Value::from(0u64));
        assert_eq!(exported[1], Value::String("Maria".to_string()));
        assert_eq!(exported[2], Value::String("55 (21) 99876-5432".to_string()));
        assert_eq!(exported[4], Value::String("RJ".to_string()));
        assert_eq!(exported[5], Value::String("QG".to_string()));
        assert_eq!(exported[7], Value::String("05/01/2024".to_string()));
        assert_eq!(exported[8], Value::String("JHONY".to_string()));
        assert_eq!(status_of(&data, 2), "10/01/2024");
    }

    #[tokio::test]
    async fn test_run_with_nothing_pending_writes_nothing() {
        let mut done = lead("Ana", Some(21));
        done.status = "01/01/2024".to_string();
        let workbook = workbook(&[done], &["JHONNY"]);
        let before = workbook.snapshot().await;

        let summary = coordinator(&workbook).run().await.unwrap();

        assert_eq!(summary.total_selected, 0);
        assert_eq!(workbook.snapshot().await, before);
    }

    #[tokio::test]
    async fn test_run_marks_unmapped_and_missing_destination() {
        let workbook = workbook(
            &[lead("Sem DDD", None), lead("Longe", Some(99999)), lead("Sul", Some(48))],
            &[],
        );
        let summary = coordinator(&workbook).run().await.unwrap();

        assert_eq!(summary.unmapped, 2);
        assert_eq!(summary.destination_missing, 1);
        assert_eq!(summary.total_exported, 0);
        assert!(!summary.aborted);

        let data = workbook.snapshot().await;
        assert_eq!(status_of(&data, 2), STATUS_UNMAPPED_AREA_CODE);
        assert_eq!(status_of(&data, 3), STATUS_UNMAPPED_AREA_CODE);
        assert_eq!(status_of(&data, 4), STATUS_DESTINATION_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_dry_run_leaves_workbook_untouched() {
        let workbook = workbook(
            &[lead("A", Some(21)), lead("B", Some(99999)), lead("C", Some(11))],
            &["JHONNY", "UNGARO"],
        );
        let before = workbook.snapshot().await;

        let summary = coordinator(&workbook)
            .with_dry_run(true)
            .run()
            .await
            .unwrap();

        assert!(summary.dry_run);
        assert_eq!(summary.total_exported, 2);
        assert_eq!(summary.unmapped, 1);
        assert_eq!(workbook.snapshot().await, before);
    }

    #[tokio::test]
    async fn test_shutdown_before_flush_leaves_records_pending() {
        let workbook = workbook(&[lead("A", Some(21))], &["JHONNY"]);
        let config = parse_config(CONFIG).unwrap();
        let (tx, rx) = watch::channel(false);
        tx.send(true).unwrap();
        let sinks = Sinks {
            source: workbook.clone(),
            destinations: workbook.clone(),
        };

        let summary = ExportCoordinator::new(&config, sinks, rx)
            .unwrap()
            .run()
            .await
            .unwrap();

        assert!(summary.interrupted);
        assert_eq!(summary.total_exported, 0);
        let data = workbook.snapshot().await;
        assert_eq!(status_of(&data, 2), "");
        assert_eq!(data.rows("JHONNY").unwrap().len(), 1);
    }

    struct RoutingWarnings(Arc<std::sync::atomic::AtomicUsize>);

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for RoutingWarnings {
        fn on_event(
            &self,
            event: &tracing::Event<'_>,
            _ctx: tracing_subscriber::layer::Context<'_, S>,
        ) {
            let metadata = event.metadata();
            if *metadata.level() == tracing::Level::WARN
                && metadata.target() == "lead_router::core::routing::table"
            {
                self.0.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            }
        }
    }

    #[test]
    fn test_coverage_gaps_logged_once_per_export() {
        use tracing_subscriber::layer::SubscriberExt;

        let warnings = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(RoutingWarnings(warnings.clone()));

        tracing::subscriber::with_default(subscriber, || {
            let config = parse_config(&format!(
                "{CONFIG}\n[routing]\nfair_pool = [\"A\"]\n\n[[routing.owners]]\nname = \"SUL\"\narea_codes = [48]\n"
            ))
            .unwrap();
            let workbook = workbook(&[], &["SUL"]);
            let (_tx, rx) = watch::channel(false);
            let sinks = Sinks {
                source: workbook.clone(),
                destinations: workbook,
            };
            ExportCoordinator::new(&config, sinks, rx).unwrap();
        });

        assert_eq!(warnings.load(std::sync::atomic::Ordering::SeqCst), 1);
    }
}
