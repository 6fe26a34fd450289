pub mod schedule_state;
pub mod snapshot;
