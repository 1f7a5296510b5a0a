use async_trait::async_trait;
use offshore_runner::adapters::outbound::init_noop_logger;
use offshore_runner::domains::batch::{
    jobs_from_paths, BatchRunner, DynExecutor, ExecutionOutcome, Job, JobExecutor, RunnerOptions,
};
use offshore_runner::domains::logger::{DynLogger, RunLogger};
use offshore_runner::{BatchError, ExecutorError, JobExecutionFailure};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::tempdir;
use tokio::sync::Barrier;

/// Succeeds unless told otherwise for a given file name.
#[derive(Default)]
struct ScriptedExecutor {
    fail: HashSet<String>,
    error: HashSet<String>,
    panic: HashSet<String>,
    hang: HashSet<String>,
    barrier: Option<Arc<Barrier>>,
    failing_cleanup: bool,
    panicking_cleanup: bool,
    slow_cleanup: Option<Duration>,
    calls: Mutex<Vec<PathBuf>>,
}

impl ScriptedExecutor {
    fn file_name(path: &Path) -> String {
        path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default()
    }
}

#[async_trait]
impl JobExecutor for ScriptedExecutor {
    async fn run(&self, file_path: &Path) -> Result<ExecutionOutcome, ExecutorError> {
        self.calls.lock().unwrap().push(file_path.to_path_buf());
        let name = Self::file_name(file_path);

        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }
        if self.hang.contains(&name) {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        if self.panic.contains(&name) {
            panic!("engine crashed on {}", name);
        }
        if self.error.contains(&name) {
            return Err(ExecutorError::Engine(format!("license not available for {}", name)));
        }
        if self.fail.contains(&name) {
            return Ok(ExecutionOutcome::incomplete());
        }
        Ok(ExecutionOutcome::completed(Some(file_path.with_extension("sim"))))
    }

    async fn cleanup(&self, file_path: &Path) -> Result<(), ExecutorError> {
        if let Some(delay) = self.slow_cleanup {
            tokio::time::sleep(delay).await;
        }
        if self.panicking_cleanup {
            panic!("cleanup blew up");
        }
        if self.failing_cleanup {
            return Err(ExecutorError::Cleanup(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "file is locked",
            )));
        }
        tokio::fs::remove_file(file_path).await.map_err(ExecutorError::Cleanup)
    }
}

struct Capture {
    messages: Mutex<Vec<String>>,
}

impl Capture {
    fn new() -> Arc<Self> {
        Arc::new(Self { messages: Mutex::new(Vec::new()) })
    }

    fn contains(&self, needle: &str) -> bool {
        self.messages.lock().unwrap().iter().any(|m| m.contains(needle))
    }
}

impl RunLogger for Capture {
    fn info(&self, msg: &str) { self.messages.lock().unwrap().push(format!("INFO:{}", msg)); }
    fn warn(&self, msg: &str) { self.messages.lock().unwrap().push(format!("WARN:{}", msg)); }
    fn error(&self, msg: &str) { self.messages.lock().unwrap().push(format!("ERR:{}", msg)); }
}

fn jobs(n: usize) -> Vec<Job> {
    jobs_from_paths((0..n).map(|i| format!("cases/LC{}.dat", i)))
}

fn names(list: &[&str]) -> HashSet<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn options(workers: usize) -> RunnerOptions {
    RunnerOptions {
        worker_count: workers,
        delete_on_success: false,
        timeout: None,
        allow_empty: false,
    }
}

fn runner(executor: ScriptedExecutor, logger: DynLogger, options: RunnerOptions) -> BatchRunner {
    BatchRunner::new(Arc::new(executor) as DynExecutor, logger, options)
}

#[tokio::test]
async fn test_seven_jobs_on_three_workers_with_one_failure() {
    let capture = Capture::new();
    let executor = ScriptedExecutor {
        fail: names(&["LC5.dat"]),
        ..Default::default()
    };
    let jobs = jobs(7);
    let summary = runner(executor, capture.clone(), options(3)).run(jobs.clone()).await.unwrap();

    assert_eq!(summary.assignment_sizes, vec![3, 3, 1]);
    assert_eq!(summary.total_jobs, 7);
    assert_eq!(summary.failed_jobs, 1);
    assert_eq!(summary.failed_job_list, vec![jobs[5].file_path.clone()]);
    assert_eq!(summary.workers.len(), 3);
    assert_eq!(summary.workers[1].failed, 1);

    let failed: Vec<_> = summary.results().filter(|r| !r.succeeded).collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].failure, Some(JobExecutionFailure::Unsuccessful));

    assert!(capture.contains("TOTAL NUMBER OF JOBS: 7"));
    assert!(capture.contains("NUMBER OF JOBS WITH ERROR: 1"));
    assert!(capture.contains("LC5.dat"));
}

#[tokio::test]
async fn test_all_jobs_succeed_in_merge_order() {
    let jobs = jobs(10);
    let summary = runner(ScriptedExecutor::default(), init_noop_logger(), options(4))
        .run(jobs.clone())
        .await
        .unwrap();

    assert!(summary.all_succeeded());
    assert_eq!(summary.succeeded_jobs(), 10);
    assert!(summary.failed_job_list.is_empty());

    // merge order is worker order, then job order, which for contiguous chunks is input order
    let order: Vec<Job> = summary.results().map(|r| r.job.clone()).collect();
    assert_eq!(order, jobs);
    assert!(summary.results().all(|r| r.result_artifact_path.is_some()));
}

#[tokio::test]
async fn test_engine_error_is_recorded_not_raised() {
    let executor = ScriptedExecutor {
        error: names(&["LC1.dat"]),
        ..Default::default()
    };
    let summary = runner(executor, init_noop_logger(), options(2)).run(jobs(3)).await.unwrap();

    assert_eq!(summary.failed_jobs, 1);
    let result = summary.results().find(|r| !r.succeeded).unwrap();
    assert!(result.error_message().unwrap().contains("license not available"));
}

#[tokio::test]
async fn test_panicking_job_does_not_stop_its_worker() {
    let executor = ScriptedExecutor {
        panic: names(&["LC1.dat"]),
        ..Default::default()
    };
    let summary = runner(executor, init_noop_logger(), options(1)).run(jobs(3)).await.unwrap();

    let results: Vec<_> = summary.results().collect();
    assert_eq!(results.len(), 3);
    assert!(results[0].succeeded);
    assert!(results[2].succeeded);
    match &results[1].failure {
        Some(JobExecutionFailure::Panicked(msg)) => assert!(msg.contains("engine crashed")),
        other => panic!("expected a panic failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_hanging_worker_is_terminated_at_the_deadline() {
    let executor = ScriptedExecutor {
        hang: names(&["LC2.dat"]),
        ..Default::default()
    };
    let opts = RunnerOptions {
        timeout: Some(Duration::from_millis(200)),
        ..options(2)
    };
    // [LC0, LC1] and [LC2, LC3]: the second worker hangs on its first job
    let summary = runner(executor, init_noop_logger(), opts).run(jobs(4)).await.unwrap();

    assert_eq!(summary.total_jobs, 4);
    assert_eq!(summary.failed_jobs, 2);
    assert!(!summary.workers[0].timed_out);
    assert!(summary.workers[1].timed_out);
    for result in &summary.workers[1].results {
        assert_eq!(result.failure, Some(JobExecutionFailure::TimedOut));
    }
}

#[tokio::test]
async fn test_all_workers_run_concurrently() {
    // every job waits for the other two workers to arrive
    let executor = ScriptedExecutor {
        barrier: Some(Arc::new(Barrier::new(3))),
        ..Default::default()
    };
    let opts = RunnerOptions {
        timeout: Some(Duration::from_secs(10)),
        ..options(3)
    };
    let summary = runner(executor, init_noop_logger(), opts).run(jobs(3)).await.unwrap();
    assert!(summary.all_succeeded());
}

#[tokio::test]
async fn test_empty_assignments_start_no_worker() {
    let executor = Arc::new(ScriptedExecutor::default());
    let runner = BatchRunner::new(executor.clone(), init_noop_logger(), options(5));
    let summary = runner.run(jobs(2)).await.unwrap();

    assert_eq!(summary.assignment_sizes, vec![1, 1, 0, 0, 0]);
    assert_eq!(summary.workers.len(), 2);
    assert_eq!(executor.calls.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_successful_inputs_are_deleted() {
    let dir = tempdir().unwrap();
    let paths: Vec<PathBuf> = (0..3).map(|i| dir.path().join(format!("LC{}.dat", i))).collect();
    for p in &paths {
        std::fs::write(p, "case").unwrap();
    }
    let executor = ScriptedExecutor {
        fail: names(&["LC1.dat"]),
        ..Default::default()
    };
    let opts = RunnerOptions {
        delete_on_success: true,
        ..options(2)
    };
    let summary = runner(executor, init_noop_logger(), opts)
        .run(jobs_from_paths(paths.clone()))
        .await
        .unwrap();

    assert!(!paths[0].exists());
    assert!(paths[1].exists());
    assert!(!paths[2].exists());
    let removed: Vec<bool> = summary.results().map(|r| r.input_removed).collect();
    assert_eq!(removed, vec![true, false, true]);
}

#[tokio::test]
async fn test_cleanup_failure_is_only_a_warning() {
    let capture = Capture::new();
    let executor = ScriptedExecutor {
        failing_cleanup: true,
        ..Default::default()
    };
    let opts = RunnerOptions {
        delete_on_success: true,
        ..options(1)
    };
    let summary = runner(executor, capture.clone(), opts).run(jobs(2)).await.unwrap();

    assert!(summary.all_succeeded());
    assert!(summary.results().all(|r| !r.input_removed));
    assert!(capture.contains("WARN:"));
    assert!(capture.contains("Failed to remove input: file is locked"));
}

#[tokio::test]
async fn test_panicking_cleanup_keeps_the_job_and_its_siblings() {
    let capture = Capture::new();
    let executor = Arc::new(ScriptedExecutor {
        panicking_cleanup: true,
        ..Default::default()
    });
    let opts = RunnerOptions {
        delete_on_success: true,
        ..options(1)
    };
    let runner = BatchRunner::new(executor.clone(), capture.clone(), opts);
    let summary = runner.run(jobs(3)).await.unwrap();

    assert!(summary.all_succeeded());
    assert_eq!(summary.failed_jobs, 0);
    assert!(summary.results().all(|r| r.succeeded && !r.input_removed));
    assert_eq!(executor.calls.lock().unwrap().len(), 3);
    assert!(capture.contains("cleanup blew up"));
}

#[tokio::test]
async fn test_deadline_during_cleanup_keeps_the_success() {
    let executor = ScriptedExecutor {
        slow_cleanup: Some(Duration::from_secs(5)),
        ..Default::default()
    };
    let opts = RunnerOptions {
        delete_on_success: true,
        timeout: Some(Duration::from_millis(200)),
        ..options(1)
    };
    let summary = runner(executor, init_noop_logger(), opts).run(jobs(2)).await.unwrap();

    let results: Vec<_> = summary.results().collect();
    assert!(summary.workers[0].timed_out);
    assert!(results[0].succeeded);
    assert!(!results[0].input_removed);
    assert_eq!(results[0].failure, None);
    // the second job never started before the deadline
    assert_eq!(results[1].failure, Some(JobExecutionFailure::TimedOut));
    assert_eq!(summary.failed_job_list, vec![results[1].job.file_path.clone()]);
}

#[tokio::test]
async fn test_invalid_input_is_rejected_before_running() {
    let zero_workers = runner(ScriptedExecutor::default(), init_noop_logger(), options(0));
    assert!(matches!(
        zero_workers.run(jobs(3)).await,
        Err(BatchError::JobValidation { .. })
    ));

    let no_jobs = runner(ScriptedExecutor::default(), init_noop_logger(), options(2));
    assert!(matches!(no_jobs.run(Vec::new()).await, Err(BatchError::JobValidation { .. })));

    let opts = RunnerOptions {
        allow_empty: true,
        ..options(2)
    };
    let summary = runner(ScriptedExecutor::default(), init_noop_logger(), opts)
        .run(Vec::new())
        .await
        .unwrap();
    assert_eq!(summary.total_jobs, 0);
    assert_eq!(summary.assignment_sizes, vec![0, 0]);
}
