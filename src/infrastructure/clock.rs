use crate::domain::ports::clock::Clock;
use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDateTime, Utc};
use std::time::Duration;

/// Real wall-clock time and a real tokio sleep.
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now_local(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }

    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
