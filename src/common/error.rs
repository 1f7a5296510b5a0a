use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TopologyError {
    #[error("Cannot sort an empty line list")]
    EmptyTopology,

    #[error("No line with a single connection found: the lines form a loop or are disconnected")]
    NoTerminus,

    #[error("Cannot define a path: {reason} ({})", .lines.join(", "))]
    AmbiguousTopology { reason: String, lines: Vec<String> },
}

impl TopologyError {
    /// Names of the lines that made the topology ambiguous, if any.
    pub fn offending_lines(&self) -> &[String] {
        match self {
            TopologyError::AmbiguousTopology { lines, .. } => lines,
            _ => &[],
        }
    }
}

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Invalid batch input: {reason}")]
    JobValidation { reason: String },

    #[error("Failed to list input files in {dir}: {source}")]
    Discovery {
        dir: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Report error: {0}")]
    Report(String),
}

/// Why a single job did not succeed. Recorded on the job's result, never raised.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum JobExecutionFailure {
    #[error("engine error: {0}")]
    Engine(String),

    #[error("simulation did not complete successfully")]
    Unsuccessful,

    #[error("executor panicked: {0}")]
    Panicked(String),

    #[error("worker was terminated before the job finished")]
    TimedOut,

    #[error("worker stopped unexpectedly: {0}")]
    WorkerCrashed(String),
}

#[derive(Error, Debug)]
pub enum ExecutorError {
    #[error("Failed to start engine process: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("Engine error: {0}")]
    Engine(String),

    #[error("Failed to remove input: {0}")]
    Cleanup(#[source] std::io::Error),
}

#[derive(Error, Debug)]
pub enum LoadCaseError {
    #[error("Load case matrix is empty: {axis} has no values")]
    EmptyMatrix { axis: &'static str },

    #[error("Unknown wave type: {0}")]
    UnknownWaveType(String),

    #[error("Failed to write load case {name}: {reason}")]
    Write { name: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Group not found: {0}")]
    GroupNotFound(String),
}

pub type TopologyResult<T> = Result<T, TopologyError>;
pub type BatchResult<T> = Result<T, BatchError>;
pub type LoadCaseResult<T> = Result<T, LoadCaseError>;
