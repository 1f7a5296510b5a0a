use super::events::BatchEvent;
use super::executor::DynExecutor;
use super::job::{Job, JobResult};
use super::partition::{chunk_size, partition, WorkerAssignment};
use super::summary::{BatchSummary, WorkerReport};
use crate::common::{BatchError, BatchResult, DomainEvent, JobExecutionFailure};
use crate::domains::logger::DynLogger;
use chrono::Utc;
use std::any::Any;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::{timeout_at, Instant};
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct RunnerOptions {
    pub worker_count: usize,
    /// Delete each input after it ran successfully.
    pub delete_on_success: bool,
    /// How long to wait for all workers before force-terminating the rest.
    /// `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Accept an empty job list instead of rejecting it.
    pub allow_empty: bool,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self {
            worker_count: default_worker_count(),
            delete_on_success: false,
            timeout: None,
            allow_empty: false,
        }
    }
}

/// One less than the available cores, but at least one.
pub fn default_worker_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get().saturating_sub(1))
        .unwrap_or(1)
        .max(1)
}

/// Runs independent jobs on a fixed pool of workers and collects the outcome.
///
/// Every non-empty assignment gets its own worker, and all workers are started
/// before the first one is awaited. A job failure is recorded on its result and
/// never reaches the caller; only invalid input is returned as an error.
pub struct BatchRunner {
    executor: DynExecutor,
    logger: DynLogger,
    options: RunnerOptions,
}

impl BatchRunner {
    pub fn new(executor: DynExecutor, logger: DynLogger, options: RunnerOptions) -> Self {
        Self {
            executor,
            logger,
            options,
        }
    }

    pub fn options(&self) -> &RunnerOptions {
        &self.options
    }

    pub fn validate(&self, jobs: &[Job]) -> BatchResult<()> {
        if self.options.worker_count < 1 {
            return Err(BatchError::JobValidation {
                reason: format!("worker count must be at least 1, got {}", self.options.worker_count),
            });
        }
        if jobs.is_empty() && !self.options.allow_empty {
            return Err(BatchError::JobValidation {
                reason: "no jobs to run".to_string(),
            });
        }
        Ok(())
    }

    pub async fn run(&self, jobs: Vec<Job>) -> BatchResult<BatchSummary> {
        self.validate(&jobs)?;

        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let worker_count = self.options.worker_count;
        let assignments = partition(&jobs, worker_count)?;

        self.logger.info("BATCH SIMULATION");
        self.logger.info("================================");
        self.logger.info(&format!("Number of jobs: {}", jobs.len()));
        self.logger.info(&format!("Number of workers: {}", worker_count));
        self.logger.info(&format!("Jobs per worker: {}", chunk_size(jobs.len(), worker_count)));
        self.logger.info("--------------------------------");
        debug!(%run_id, jobs = jobs.len(), workers = worker_count, "starting batch run");

        let launched: Vec<LaunchedWorker> = assignments
            .iter()
            .filter(|a| !a.is_empty())
            .map(|a| self.launch(run_id, a.clone()))
            .collect();

        let deadline = self.options.timeout.map(|t| Instant::now() + t);
        let mut reports = Vec::with_capacity(launched.len());
        for worker in launched {
            reports.push(join_worker(worker, deadline, &self.logger).await);
        }

        let sizes = assignments.iter().map(|a| a.len()).collect();
        let summary = BatchSummary::merge(run_id, started_at, sizes, reports);
        self.log_summary(&summary);
        Ok(summary)
    }

    fn launch(&self, run_id: Uuid, assignment: WorkerAssignment) -> LaunchedWorker {
        let (events, receiver) = mpsc::unbounded_channel();
        let worker = Worker {
            run_id,
            index: assignment.worker_index,
            worker_count: self.options.worker_count,
            jobs: assignment.jobs.clone(),
            executor: self.executor.clone(),
            logger: self.logger.clone(),
            delete_on_success: self.options.delete_on_success,
            events,
        };
        LaunchedWorker {
            assignment,
            handle: tokio::spawn(worker.run()),
            events: receiver,
        }
    }

    fn log_summary(&self, summary: &BatchSummary) {
        let failed: Vec<String> = summary
            .failed_job_list
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        self.logger.info("");
        self.logger.info(&format!("TOTAL NUMBER OF JOBS: {}", summary.total_jobs));
        self.logger.info(&format!("NUMBER OF JOBS WITH ERROR: {}", summary.failed_jobs));
        self.logger.info(&format!("LIST OF JOBS WITH ERROR: [{}]", failed.join(", ")));
    }
}

struct LaunchedWorker {
    assignment: WorkerAssignment,
    handle: JoinHandle<()>,
    events: mpsc::UnboundedReceiver<BatchEvent>,
}

enum WorkerExit {
    Finished,
    TimedOut,
    Crashed(String),
}

async fn join_worker(mut worker: LaunchedWorker, deadline: Option<Instant>, logger: &DynLogger) -> WorkerReport {
    let index = worker.assignment.worker_index;
    let joined = match deadline {
        Some(deadline) => match timeout_at(deadline, &mut worker.handle).await {
            Ok(joined) => Some(joined),
            Err(_) => None,
        },
        None => Some((&mut worker.handle).await),
    };

    let exit = match joined {
        Some(Ok(())) => WorkerExit::Finished,
        Some(Err(e)) => WorkerExit::Crashed(join_error_message(e)),
        None => {
            worker.handle.abort();
            let _ = (&mut worker.handle).await;
            logger.error(&format!("Worker {}: terminated after the deadline", index + 1));
            warn!(worker = index, "worker force-terminated");
            WorkerExit::TimedOut
        }
    };

    // The worker is gone, so everything it reported is already buffered.
    let mut finished: Vec<Option<JobResult>> = vec![None; worker.assignment.len()];
    while let Ok(event) = worker.events.try_recv() {
        debug!(event = event.event_type(), source = %event.source_id(), at = %event.occurred_at(), "worker event");
        match event {
            BatchEvent::JobFinished { slot, result, .. } => {
                if let Some(entry) = finished.get_mut(slot) {
                    *entry = Some(result);
                }
            }
            BatchEvent::InputRemoved { slot, .. } => {
                if let Some(Some(result)) = finished.get_mut(slot) {
                    result.input_removed = true;
                }
            }
            BatchEvent::JobStarted { .. } => {}
        }
    }

    let results: Vec<JobResult> = worker
        .assignment
        .jobs
        .iter()
        .zip(finished)
        .map(|(job, result)| {
            result.unwrap_or_else(|| {
                let failure = match &exit {
                    WorkerExit::TimedOut => JobExecutionFailure::TimedOut,
                    WorkerExit::Crashed(msg) => JobExecutionFailure::WorkerCrashed(msg.clone()),
                    WorkerExit::Finished => JobExecutionFailure::WorkerCrashed("no result reported".to_string()),
                };
                JobResult::failed(job.clone(), failure, None)
            })
        })
        .collect();

    WorkerReport::from_results(index, results, matches!(exit, WorkerExit::TimedOut))
}

/// One worker slot: runs its jobs strictly in order.
struct Worker {
    run_id: Uuid,
    index: usize,
    worker_count: usize,
    jobs: Vec<Job>,
    executor: DynExecutor,
    logger: DynLogger,
    delete_on_success: bool,
    events: mpsc::UnboundedSender<BatchEvent>,
}

impl Worker {
    fn tag(&self) -> String {
        format!("Worker {}/{}", self.index + 1, self.worker_count)
    }

    async fn run(self) {
        let total = self.jobs.len();
        for (slot, job) in self.jobs.iter().enumerate() {
            let _ = self.events.send(BatchEvent::JobStarted {
                run_id: self.run_id,
                worker_index: self.index,
                slot,
                timestamp: Utc::now(),
            });
            self.logger.info(&format!(
                "{}: running \"{}\" ({}/{}) ...",
                self.tag(),
                job.display_name(),
                slot + 1,
                total
            ));

            let result = self.run_job(job).await;

            if result.succeeded {
                let percent = (slot + 1) as f64 / total as f64 * 100.0;
                self.logger.info(&format!(
                    "{}: \"{}\" ({}/{}) completed ({:.1}%)",
                    self.tag(),
                    job.display_name(),
                    slot + 1,
                    total,
                    percent
                ));
            } else {
                self.logger.error(&format!(
                    "{}: \"{}\" failed: {}",
                    self.tag(),
                    job.display_name(),
                    result.error_message().unwrap_or_default()
                ));
            }

            let remove_input = self.delete_on_success && result.succeeded;
            let _ = self.events.send(BatchEvent::JobFinished {
                run_id: self.run_id,
                worker_index: self.index,
                slot,
                result,
                timestamp: Utc::now(),
            });

            // reported before cleanup starts
            if remove_input && self.remove_input(job).await {
                let _ = self.events.send(BatchEvent::InputRemoved {
                    run_id: self.run_id,
                    worker_index: self.index,
                    slot,
                    timestamp: Utc::now(),
                });
            }
        }
    }

    /// Delete the input of a successful job in its own task. Any failure,
    /// including a panic, is logged and otherwise ignored.
    async fn remove_input(&self, job: &Job) -> bool {
        let executor = self.executor.clone();
        let path = job.file_path.clone();
        let mut task = JobTask(tokio::spawn(async move { executor.cleanup(&path).await }));

        let problem = match task.join().await {
            Ok(Ok(())) => return true,
            Ok(Err(e)) => e.to_string(),
            Err(e) => join_error_message(e),
        };
        self.logger.warn(&format!(
            "{}: could not remove \"{}\": {}",
            self.tag(),
            job.display_name(),
            problem
        ));
        false
    }

    async fn run_job(&self, job: &Job) -> JobResult {
        let started_at = Utc::now();
        let executor = self.executor.clone();
        let path = job.file_path.clone();
        let mut task = JobTask(tokio::spawn(async move { executor.run(&path).await }));

        match task.join().await {
            Ok(Ok(outcome)) if outcome.completed_successfully => {
                JobResult::success(job.clone(), outcome.result_artifact_path, started_at)
            }
            Ok(Ok(_)) => JobResult::failed(job.clone(), JobExecutionFailure::Unsuccessful, Some(started_at)),
            Ok(Err(e)) => JobResult::failed(job.clone(), JobExecutionFailure::Engine(e.to_string()), Some(started_at)),
            Err(e) if e.is_panic() => JobResult::failed(
                job.clone(),
                JobExecutionFailure::Panicked(join_error_message(e)),
                Some(started_at),
            ),
            Err(e) => JobResult::failed(
                job.clone(),
                JobExecutionFailure::WorkerCrashed(join_error_message(e)),
                Some(started_at),
            ),
        }
    }
}

/// Aborts the job task when the owning worker is dropped mid-run.
struct JobTask<T>(JoinHandle<T>);

impl<T> JobTask<T> {
    async fn join(&mut self) -> Result<T, JoinError> {
        (&mut self.0).await
    }
}

impl<T> Drop for JobTask<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

fn join_error_message(e: JoinError) -> String {
    if e.is_panic() {
        panic_message(e.into_panic())
    } else {
        e.to_string()
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
