use crate::domain::entities::schedule_state::ScheduleState;
use crate::domain::entities::snapshot::Snapshot;
use crate::domain::error::DomainError;
use crate::domain::ports::snapshot_store::{InsertOutcome, SnapshotStore};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Mutex;

/// SQLite-backed snapshot store. The (taken_at_date, run_slot) UNIQUE index
/// is the sole duplicate guard; constraint violations on insert are reported
/// as `DuplicateSlot`, never as errors.
///
/// Prices travel as TEXT-encoded decimals so the stored values keep their
/// full precision.
pub struct SqliteSnapshotStore {
    conn: Mutex<Connection>,
}

impl SqliteSnapshotStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn row_to_snapshot(row: &rusqlite::Row) -> Result<Snapshot, rusqlite::Error> {
        Ok(Snapshot {
            taken_at_utc: get_datetime(row, 0)?,
            run_slot: row.get(1)?,
            base_currency: row.get(2)?,
            usd_per_xau: get_decimal(row, 3)?,
            usd_per_xag: get_decimal(row, 4)?,
            usd_per_xpt: get_decimal(row, 5)?,
            usd_per_xpd: get_decimal(row, 6)?,
            xau_per_usd: get_decimal(row, 7)?,
            xag_per_usd: get_decimal(row, 8)?,
            xpt_per_usd: get_decimal(row, 9)?,
            xpd_per_usd: get_decimal(row, 10)?,
            source: row.get(11)?,
        })
    }
}

fn encode_instant(instant: DateTime<Utc>) -> String {
    // second precision, trailing Z; SQLite's date() understands this form,
    // which the generated taken_at_date column depends on
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn get_datetime(row: &rusqlite::Row, idx: usize) -> Result<DateTime<Utc>, rusqlite::Error> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

fn get_decimal(row: &rusqlite::Row, idx: usize) -> Result<Decimal, rusqlite::Error> {
    let raw: String = row.get(idx)?;
    Decimal::from_str(&raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

const SNAPSHOT_COLUMNS: &str = "taken_at_utc, run_slot, base_currency, \
     usd_per_xau, usd_per_xag, usd_per_xpt, usd_per_xpd, \
     xau_per_usd, xag_per_usd, xpt_per_usd, xpd_per_usd, source";

impl SnapshotStore for SqliteSnapshotStore {
    fn insert_snapshot(&self, snapshot: &Snapshot) -> Result<InsertOutcome, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let result = conn.execute(
            "INSERT INTO snapshots (taken_at_utc, run_slot, base_currency,
                usd_per_xau, usd_per_xag, usd_per_xpt, usd_per_xpd,
                xau_per_usd, xag_per_usd, xpt_per_usd, xpd_per_usd, source)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                encode_instant(snapshot.taken_at_utc),
                snapshot.run_slot,
                snapshot.base_currency,
                snapshot.usd_per_xau.to_string(),
                snapshot.usd_per_xag.to_string(),
                snapshot.usd_per_xpt.to_string(),
                snapshot.usd_per_xpd.to_string(),
                snapshot.xau_per_usd.to_string(),
                snapshot.xag_per_usd.to_string(),
                snapshot.xpt_per_usd.to_string(),
                snapshot.xpd_per_usd.to_string(),
                snapshot.source,
            ],
        );

        match result {
            Ok(_) => Ok(InsertOutcome::Inserted),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == ErrorCode::ConstraintViolation =>
            {
                Ok(InsertOutcome::DuplicateSlot)
            }
            Err(e) => Err(DomainError::Database(e.to_string())),
        }
    }

    fn upsert_schedule_state(&self, state: &ScheduleState) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;

        conn.execute(
            "INSERT INTO schedule_state (id, morning_time, evening_time, updated_at_utc)
             VALUES (1, ?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
                morning_time = excluded.morning_time,
                evening_time = excluded.evening_time,
                updated_at_utc = excluded.updated_at_utc",
            params![
                state.morning_time,
                state.evening_time,
                encode_instant(state.updated_at_utc),
            ],
        )
        .map_err(|e| DomainError::Database(e.to_string()))?;
        Ok(())
    }

    fn latest_snapshot(&self) -> Result<Option<Snapshot>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;

        conn.query_row(
            &format!("SELECT {SNAPSHOT_COLUMNS} FROM snapshots ORDER BY id DESC LIMIT 1"),
            [],
            Self::row_to_snapshot,
        )
        .optional()
        .map_err(|e| DomainError::Database(e.to_string()))
    }

    fn schedule_state(&self) -> Result<Option<ScheduleState>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;

        conn.query_row(
            "SELECT morning_time, evening_time, updated_at_utc FROM schedule_state WHERE id = 1",
            [],
            |row| {
                Ok(ScheduleState {
                    morning_time: row.get(0)?,
                    evening_time: row.get(1)?,
                    updated_at_utc: get_datetime(row, 2)?,
                })
            },
        )
        .optional()
        .map_err(|e| DomainError::Database(e.to_string()))
    }
}
