use crate::common::JobExecutionFailure;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One input artifact to be processed by the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Job {
    pub file_path: PathBuf,
    /// Position in the original, ordered job list.
    pub index: usize,
}

impl Job {
    pub fn new(index: usize, file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            index,
        }
    }

    /// File name for progress output, falling back to the full path.
    pub fn display_name(&self) -> String {
        self.file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file_path.display().to_string())
    }
}

/// Number jobs in the order the paths are given.
pub fn jobs_from_paths<I, P>(paths: I) -> Vec<Job>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    paths.into_iter().enumerate().map(|(i, p)| Job::new(i, p)).collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExecutionOutcome {
    pub completed_successfully: bool,
    pub result_artifact_path: Option<PathBuf>,
}

impl ExecutionOutcome {
    pub fn completed(result_artifact_path: Option<PathBuf>) -> Self {
        Self {
            completed_successfully: true,
            result_artifact_path,
        }
    }

    pub fn incomplete() -> Self {
        Self {
            completed_successfully: false,
            result_artifact_path: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobResult {
    pub job: Job,
    pub succeeded: bool,
    pub failure: Option<JobExecutionFailure>,
    pub result_artifact_path: Option<PathBuf>,
    /// The input file was deleted after a successful run.
    pub input_removed: bool,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl JobResult {
    pub fn success(job: Job, result_artifact_path: Option<PathBuf>, started_at: DateTime<Utc>) -> Self {
        Self {
            job,
            succeeded: true,
            failure: None,
            result_artifact_path,
            input_removed: false,
            started_at: Some(started_at),
            finished_at: Some(Utc::now()),
        }
    }

    pub fn failed(job: Job, failure: JobExecutionFailure, started_at: Option<DateTime<Utc>>) -> Self {
        Self {
            job,
            succeeded: false,
            failure: Some(failure),
            result_artifact_path: None,
            input_removed: false,
            started_at,
            finished_at: started_at.map(|_| Utc::now()),
        }
    }

    pub fn error_message(&self) -> Option<String> {
        self.failure.as_ref().map(|f| f.to_string())
    }

    pub fn file_path(&self) -> &Path {
        &self.job.file_path
    }
}
