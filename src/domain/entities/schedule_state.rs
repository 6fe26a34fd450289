use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Singleton metadata row (id fixed = 1) recording which of the first two
/// configured times the most recent cycle used. Only the pipeline writes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleState {
    pub morning_time: String,
    pub evening_time: String,
    pub updated_at_utc: DateTime<Utc>,
}

impl ScheduleState {
    /// Labels for the cycle that just ran: the column matching the cycle's
    /// slot gets its name, the other stays empty.
    pub fn for_cycle(slot: &str, updated_at_utc: DateTime<Utc>) -> Self {
        Self {
            morning_time: if slot == "morning" {
                "morning".to_string()
            } else {
                String::new()
            },
            evening_time: if slot == "evening" {
                "evening".to_string()
            } else {
                String::new()
            },
            updated_at_utc,
        }
    }
}
