use super::job::JobResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Outcome of one worker slot, scoped to the jobs it was assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerReport {
    pub worker_index: usize,
    pub assigned: usize,
    pub failed: usize,
    pub failed_jobs: Vec<PathBuf>,
    /// The worker was force-terminated at the deadline.
    pub timed_out: bool,
    pub results: Vec<JobResult>,
}

impl WorkerReport {
    pub fn from_results(worker_index: usize, results: Vec<JobResult>, timed_out: bool) -> Self {
        let failed_jobs: Vec<PathBuf> = results
            .iter()
            .filter(|r| !r.succeeded)
            .map(|r| r.job.file_path.clone())
            .collect();
        Self {
            worker_index,
            assigned: results.len(),
            failed: failed_jobs.len(),
            failed_jobs,
            timed_out,
            results,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub total_jobs: usize,
    pub failed_jobs: usize,
    /// Failed inputs in worker order, then job order within each worker.
    pub failed_job_list: Vec<PathBuf>,
    /// Jobs per worker slot, including slots that received nothing.
    pub assignment_sizes: Vec<usize>,
    pub workers: Vec<WorkerReport>,
}

impl BatchSummary {
    /// Merge per-worker reports. `reports` must already be in worker order.
    pub fn merge(
        run_id: Uuid,
        started_at: DateTime<Utc>,
        assignment_sizes: Vec<usize>,
        reports: Vec<WorkerReport>,
    ) -> Self {
        let total_jobs = reports.iter().map(|r| r.assigned).sum();
        let failed_jobs = reports.iter().map(|r| r.failed).sum();
        let failed_job_list = reports.iter().flat_map(|r| r.failed_jobs.iter().cloned()).collect();
        Self {
            run_id,
            started_at,
            finished_at: Utc::now(),
            total_jobs,
            failed_jobs,
            failed_job_list,
            assignment_sizes,
            workers: reports,
        }
    }

    pub fn results(&self) -> impl Iterator<Item = &JobResult> {
        self.workers.iter().flat_map(|w| w.results.iter())
    }

    pub fn succeeded_jobs(&self) -> usize {
        self.total_jobs - self.failed_jobs
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed_jobs == 0
    }
}
