use std::path::Path;
use std::sync::Arc;

use crate::common::{BatchError, BatchResult};
use crate::domains::batch::{BatchRunner, BatchSummary, ExecutorProvider, JobSource, RunnerOptions};
use crate::domains::logger::DynLogger;
use tracing::info;

/// Entry point for a batch run over a directory of input files.
pub struct BatchService {
    job_source: Arc<dyn JobSource>,
    engine: Arc<dyn ExecutorProvider>,
    logger: DynLogger,
    options: RunnerOptions,
}

impl BatchService {
    pub fn new(
        job_source: Arc<dyn JobSource>,
        engine: Arc<dyn ExecutorProvider>,
        logger: DynLogger,
        options: RunnerOptions,
    ) -> Self {
        Self {
            job_source,
            engine,
            logger,
            options,
        }
    }

    /// Discover the inputs in `input_dir` and run them on `workers` workers,
    /// writing results into `output_dir`.
    pub async fn run(
        &self,
        input_dir: &Path,
        output_dir: &Path,
        workers: usize,
        delete_on_success: bool,
    ) -> BatchResult<BatchSummary> {
        tokio::fs::create_dir_all(output_dir)
            .await
            .map_err(|source| BatchError::Discovery {
                dir: output_dir.display().to_string(),
                source,
            })?;

        let jobs = self.job_source.list_jobs(input_dir)?;
        info!(dir = %input_dir.display(), jobs = jobs.len(), "inputs discovered");

        let options = RunnerOptions {
            worker_count: workers,
            delete_on_success,
            ..self.options.clone()
        };
        let runner = BatchRunner::new(self.engine.executor_for(output_dir), self.logger.clone(), options);
        runner.run(jobs).await
    }
}
