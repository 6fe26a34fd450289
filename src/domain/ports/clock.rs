use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use std::time::Duration;

/// Injected time source. Scheduling runs on local wall-clock time (the
/// configured times are local times of day), persisted instants on UTC.
/// Tests drive the full pipeline on virtual time through this trait.
#[async_trait]
pub trait Clock: Send + Sync {
    fn now_local(&self) -> NaiveDateTime;

    fn now_utc(&self) -> DateTime<Utc>;

    /// Suspend for `duration`. The pipeline races this against its shutdown
    /// signal, so implementations only need to sleep.
    async fn wait(&self, duration: Duration);
}
