pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

use crate::application::capture::{CaptureUseCase, CycleOutcome};
use crate::application::pipeline::SnapshotPipeline;
use crate::domain::error::DomainError;
use crate::domain::ports::clock::Clock;
use crate::domain::ports::config_source::ConfigSource;
use crate::domain::ports::quote_source::QuoteSource;
use crate::domain::ports::snapshot_store::SnapshotStore;
use crate::domain::values::schedule::{next_run, upcoming, NextRun};
use crate::domain::values::time_table::TimeTable;
use crate::infrastructure::clock::SystemClock;
use crate::infrastructure::config::EnvConfigSource;
use crate::infrastructure::providers::metals_api::MetalsApiSource;
use crate::infrastructure::sqlite::migrations::run_migrations;
use crate::infrastructure::sqlite::snapshot_repo::SqliteSnapshotStore;
use rusqlite::Connection;
use std::sync::Arc;
use tokio::sync::watch;

pub struct MetalSnap {
    config: Arc<dyn ConfigSource>,
    clock: Arc<dyn Clock>,
    capture: CaptureUseCase,
    pipeline: SnapshotPipeline,
}

impl MetalSnap {
    pub fn new(db_path: &str) -> Result<Self, DomainError> {
        let conn = Connection::open(db_path)
            .map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| DomainError::Database(format!("WAL error: {e}")))?;
        run_migrations(&conn)?;

        Ok(Self::with_providers(
            Arc::new(MetalsApiSource::new()),
            Arc::new(SqliteSnapshotStore::new(conn)),
            Arc::new(EnvConfigSource),
            Arc::new(SystemClock),
        ))
    }

    pub fn with_providers(
        quotes: Arc<dyn QuoteSource>,
        store: Arc<dyn SnapshotStore>,
        config: Arc<dyn ConfigSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let capture = CaptureUseCase::new(quotes, store, clock.clone());
        let pipeline = SnapshotPipeline::new(config.clone(), clock.clone(), capture.clone());
        Self {
            config,
            clock,
            capture,
            pipeline,
        }
    }

    /// Drives the scheduled capture loop until `shutdown` fires.
    pub async fn run(&self, shutdown: watch::Receiver<bool>) -> Result<(), DomainError> {
        self.pipeline.run(shutdown).await
    }

    /// Captures a snapshot immediately, using the slot the next scheduled
    /// run would use.
    pub async fn run_once(&self) -> Result<CycleOutcome, DomainError> {
        let config = self.config.current();
        let table = TimeTable::parse(&config.times)?;
        let next = next_run(self.clock.now_local(), &table);
        self.capture.execute(&next.slot, &config).await
    }

    /// The next `count` scheduled fire instants.
    pub fn upcoming(&self, count: usize) -> Result<Vec<NextRun>, DomainError> {
        let config = self.config.current();
        let table = TimeTable::parse(&config.times)?;
        Ok(upcoming(self.clock.now_local(), &table, count))
    }
}
