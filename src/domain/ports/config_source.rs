/// Configuration snapshot consumed once per cycle. The pipeline re-reads it
/// on every iteration, so schedule edits take effect without a restart.
#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    /// Provider credential. Required before a live fetch is attempted.
    pub api_key: String,
    /// Raw "HH:MM" strings; parsed into a TimeTable each cycle.
    pub times: Vec<String>,
    /// Legacy switch kept for configuration compatibility; configured times
    /// always take precedence and this flag is ignored.
    pub use_database_schedule: bool,
}

pub trait ConfigSource: Send + Sync {
    fn current(&self) -> ServiceConfig;
}
