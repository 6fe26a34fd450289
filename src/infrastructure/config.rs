use crate::domain::ports::config_source::{ConfigSource, ServiceConfig};

/// Reads the service configuration from environment variables on every call,
/// so schedule edits are picked up by the next cycle without a restart.
///
/// - `METALSNAP_API_KEY`: provider credential
/// - `METALSNAP_TIMES`: comma-separated "HH:MM" list (empty uses the default schedule)
/// - `METALSNAP_USE_DB_SCHEDULE`: legacy flag, parsed but ignored
pub struct EnvConfigSource;

impl ConfigSource for EnvConfigSource {
    fn current(&self) -> ServiceConfig {
        let times = std::env::var("METALSNAP_TIMES")
            .map(|v| v.split(',').map(|s| s.to_string()).collect())
            .unwrap_or_default();

        ServiceConfig {
            api_key: std::env::var("METALSNAP_API_KEY").unwrap_or_default(),
            times,
            use_database_schedule: std::env::var("METALSNAP_USE_DB_SCHEDULE")
                .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "on" | "ON"))
                .unwrap_or(false),
        }
    }
}
