use crate::domain::entities::schedule_state::ScheduleState;
use crate::domain::entities::snapshot::Snapshot;
use crate::domain::error::DomainError;

/// Outcome of an insert attempt against the (date, slot) uniqueness key.
/// A duplicate is not an error: the row the constraint protects already
/// exists, which is the desired end state either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    DuplicateSlot,
}

/// Persistence boundary. Uniqueness is enforced here, never by an
/// application-level check-then-insert; adapters translate their backend's
/// constraint-violation errors into `DuplicateSlot`.
pub trait SnapshotStore: Send + Sync {
    fn insert_snapshot(&self, snapshot: &Snapshot) -> Result<InsertOutcome, DomainError>;

    /// Writes the singleton schedule-state row (id = 1), creating it on the
    /// first cycle and updating it in place after.
    fn upsert_schedule_state(&self, state: &ScheduleState) -> Result<(), DomainError>;

    fn latest_snapshot(&self) -> Result<Option<Snapshot>, DomainError>;

    fn schedule_state(&self) -> Result<Option<ScheduleState>, DomainError>;
}
