use super::job::JobResult;
use crate::common::DomainEvent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reported by a worker to the orchestrator over the worker's own channel.
/// `slot` is the job's position inside the worker's assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BatchEvent {
    JobStarted {
        run_id: Uuid,
        worker_index: usize,
        slot: usize,
        timestamp: DateTime<Utc>,
    },
    JobFinished {
        run_id: Uuid,
        worker_index: usize,
        slot: usize,
        result: JobResult,
        timestamp: DateTime<Utc>,
    },
    /// Follows `JobFinished` once the input of a successful job was deleted.
    InputRemoved {
        run_id: Uuid,
        worker_index: usize,
        slot: usize,
        timestamp: DateTime<Utc>,
    },
}

impl DomainEvent for BatchEvent {
    fn event_type(&self) -> &'static str {
        match self {
            BatchEvent::JobStarted { .. } => "JobStarted",
            BatchEvent::JobFinished { .. } => "JobFinished",
            BatchEvent::InputRemoved { .. } => "InputRemoved",
        }
    }

    fn source_id(&self) -> String {
        match self {
            BatchEvent::JobStarted { run_id, worker_index, .. }
            | BatchEvent::JobFinished { run_id, worker_index, .. }
            | BatchEvent::InputRemoved { run_id, worker_index, .. } => format!("{}/{}", run_id, worker_index),
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            BatchEvent::JobStarted { timestamp, .. } => *timestamp,
            BatchEvent::JobFinished { timestamp, .. } => *timestamp,
            BatchEvent::InputRemoved { timestamp, .. } => *timestamp,
        }
    }
}
