use crate::application::capture::{CaptureUseCase, CycleOutcome};
use crate::domain::error::DomainError;
use crate::domain::ports::clock::Clock;
use crate::domain::ports::config_source::ConfigSource;
use crate::domain::values::schedule::next_run;
use crate::domain::values::time_table::TimeTable;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{error, info};

/// The long-lived capture driver: wait until due, fetch, persist, repeat.
///
/// Exactly one cycle is ever in flight and the next fire instant is computed
/// only after the previous cycle finishes, so wall-clock time advances
/// monotonically across cycles. The only suspension point is the wait, which
/// races the injected clock against the shutdown channel.
pub struct SnapshotPipeline {
    config: Arc<dyn ConfigSource>,
    clock: Arc<dyn Clock>,
    capture: CaptureUseCase,
}

impl SnapshotPipeline {
    pub fn new(
        config: Arc<dyn ConfigSource>,
        clock: Arc<dyn Clock>,
        capture: CaptureUseCase,
    ) -> Self {
        Self {
            config,
            clock,
            capture,
        }
    }

    /// Runs until `shutdown` fires. Returns `Err` only when the very first
    /// configuration read is unusable; later cycle failures are logged and
    /// the loop keeps scheduling. Panics are not caught: an unanticipated
    /// fault terminates the process instead of looping in a degraded state.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> Result<(), DomainError> {
        info!("snapshot pipeline started");
        let mut last_table: Option<TimeTable> = None;

        loop {
            if *shutdown.borrow() {
                info!("snapshot pipeline stopped (shutdown requested)");
                return Ok(());
            }

            let config = self.config.current();
            let table = match TimeTable::parse(&config.times) {
                Ok(table) => {
                    last_table = Some(table.clone());
                    table
                }
                Err(e) => match last_table.clone() {
                    // a live edit broke the schedule; keep the previous one
                    Some(table) => {
                        error!(error = %e, "invalid schedule in configuration; keeping previous times");
                        table
                    }
                    None => return Err(e),
                },
            };

            let now = self.clock.now_local();
            let next = next_run(now, &table);
            let delay = (next.fire_at - now).to_std().unwrap_or(Duration::ZERO);
            info!(
                slot = %next.slot,
                fire_at = %next.fire_at,
                delay_secs = delay.as_secs(),
                "next capture scheduled"
            );

            tokio::select! {
                _ = self.clock.wait(delay) => {}
                _ = shutdown.changed() => {
                    info!("snapshot pipeline stopped (shutdown requested)");
                    return Ok(());
                }
            }

            match self.capture.execute(&next.slot, &config).await {
                Ok(CycleOutcome::Captured(_)) | Ok(CycleOutcome::AlreadyCaptured) => {}
                Err(e) => {
                    // cycle abandoned; the next one is scheduled normally,
                    // never an immediate retry of the same slot
                    error!(slot = %next.slot, error = %e, "capture cycle failed");
                }
            }
        }
    }
}
