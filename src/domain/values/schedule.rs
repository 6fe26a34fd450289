//! Next-fire computation and slot labeling.
//!
//! The slot label is part of the persisted uniqueness key: index 0 and 1 of
//! the table map to "morning"/"evening", anything else (including every entry
//! of a single-time table) maps to "t_HHMM".

use crate::domain::values::time_table::TimeTable;
use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct NextRun {
    pub fire_at: NaiveDateTime,
    pub slot: String,
}

/// Earliest today-occurrence at or after `now`; if every occurrence has
/// already passed, the earliest table entry tomorrow. The boundary is
/// inclusive, so a cycle due exactly now runs now rather than tomorrow.
pub fn next_run(now: NaiveDateTime, table: &TimeTable) -> NextRun {
    let today = now.date();
    let next_today = table
        .times()
        .iter()
        .copied()
        .find(|t| today.and_time(*t) >= now);

    match next_today {
        Some(time) => NextRun {
            fire_at: today.and_time(time),
            slot: slot_label(table, time),
        },
        None => {
            let first = table.first();
            NextRun {
                fire_at: today.and_time(first) + Duration::days(1),
                slot: slot_label(table, first),
            }
        }
    }
}

pub fn slot_label(table: &TimeTable, time: NaiveTime) -> String {
    if table.times().len() >= 2 {
        match table.position_of(time) {
            Some(0) => return "morning".to_string(),
            Some(1) => return "evening".to_string(),
            _ => {}
        }
    }
    format!("t_{}", time.format("%H%M"))
}

/// The next `count` fire instants, for schedule previews.
pub fn upcoming(now: NaiveDateTime, table: &TimeTable, count: usize) -> Vec<NextRun> {
    let mut runs = Vec::with_capacity(count);
    let mut cursor = now;
    for _ in 0..count {
        let next = next_run(cursor, table);
        // times have minute resolution, so a minute past the fire instant is
        // strictly inside the next interval
        cursor = next.fire_at + Duration::minutes(1);
        runs.push(next);
    }
    runs
}
