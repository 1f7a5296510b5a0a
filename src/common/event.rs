use chrono::{DateTime, Utc};

/// Something that happened during a run, reported by the party that owns it.
pub trait DomainEvent: Send + Sync + Clone {
    fn event_type(&self) -> &'static str;
    /// Identifier of the run, worker or object the event belongs to.
    fn source_id(&self) -> String;
    fn occurred_at(&self) -> DateTime<Utc>;
}
