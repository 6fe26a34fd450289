use crate::domain::entities::schedule_state::ScheduleState;
use crate::domain::entities::snapshot::Snapshot;
use crate::domain::error::DomainError;
use crate::domain::ports::clock::Clock;
use crate::domain::ports::config_source::ServiceConfig;
use crate::domain::ports::quote_source::{QuoteSource, METAL_SYMBOLS};
use crate::domain::ports::snapshot_store::{InsertOutcome, SnapshotStore};
use std::sync::Arc;
use tracing::{info, warn};

/// Outcome of a single fetch-and-persist cycle.
#[derive(Debug, Clone)]
pub enum CycleOutcome {
    Captured(Snapshot),
    /// A snapshot for this (date, slot) already exists; nothing was written.
    AlreadyCaptured,
}

/// One capture cycle: fetch, map, persist. Duplicate-slot inserts are a
/// benign no-op; every other failure is returned for the caller to log.
#[derive(Clone)]
pub struct CaptureUseCase {
    quotes: Arc<dyn QuoteSource>,
    store: Arc<dyn SnapshotStore>,
    clock: Arc<dyn Clock>,
}

impl CaptureUseCase {
    pub fn new(
        quotes: Arc<dyn QuoteSource>,
        store: Arc<dyn SnapshotStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            quotes,
            store,
            clock,
        }
    }

    pub async fn execute(
        &self,
        slot: &str,
        config: &ServiceConfig,
    ) -> Result<CycleOutcome, DomainError> {
        if config.api_key.trim().is_empty() {
            return Err(DomainError::Config(
                "api_key is empty; set METALSNAP_API_KEY".to_string(),
            ));
        }

        let quote = self
            .quotes
            .latest(&config.api_key, "USD", &METAL_SYMBOLS)
            .await?;
        let snapshot = Snapshot::from_quote(&quote, slot, self.clock.now_utc())?;

        let outcome = self.store.insert_snapshot(&snapshot)?;
        self.store
            .upsert_schedule_state(&ScheduleState::for_cycle(slot, self.clock.now_utc()))?;

        match outcome {
            InsertOutcome::Inserted => {
                info!(
                    slot,
                    source = %snapshot.source,
                    taken_at = %snapshot.taken_at_utc,
                    "snapshot captured"
                );
                Ok(CycleOutcome::Captured(snapshot))
            }
            InsertOutcome::DuplicateSlot => {
                warn!(
                    slot,
                    date = %snapshot.taken_on(),
                    "snapshot already exists for this slot today; skipping"
                );
                Ok(CycleOutcome::AlreadyCaptured)
            }
        }
    }
}
