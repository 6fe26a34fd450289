use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<(), String> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS snapshots (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            taken_at_utc TEXT NOT NULL,
            taken_at_date TEXT GENERATED ALWAYS AS (date(taken_at_utc)) STORED,
            run_slot TEXT NOT NULL,
            base_currency TEXT NOT NULL DEFAULT 'USD',
            usd_per_xau TEXT NOT NULL,
            usd_per_xag TEXT NOT NULL,
            usd_per_xpt TEXT NOT NULL,
            usd_per_xpd TEXT NOT NULL,
            xau_per_usd TEXT NOT NULL,
            xag_per_usd TEXT NOT NULL,
            xpt_per_usd TEXT NOT NULL,
            xpd_per_usd TEXT NOT NULL,
            source TEXT NOT NULL
        );

        CREATE UNIQUE INDEX IF NOT EXISTS ux_snapshots_date_slot
            ON snapshots(taken_at_date, run_slot);

        CREATE TABLE IF NOT EXISTS schedule_state (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            morning_time TEXT NOT NULL DEFAULT '',
            evening_time TEXT NOT NULL DEFAULT '',
            updated_at_utc TEXT NOT NULL
        );
        ",
    )
    .map_err(|e| format!("Migration failed: {e}"))
}
