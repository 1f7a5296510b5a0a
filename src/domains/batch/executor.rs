use super::job::ExecutionOutcome;
use crate::common::ExecutorError;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

/// Port to the simulation engine: process one input artifact.
#[async_trait]
pub trait JobExecutor: Send + Sync + 'static {
    async fn run(&self, file_path: &Path) -> Result<ExecutionOutcome, ExecutorError>;

    /// Remove the input after a successful run.
    async fn cleanup(&self, file_path: &Path) -> Result<(), ExecutorError> {
        tokio::fs::remove_file(file_path).await.map_err(ExecutorError::Cleanup)
    }
}

pub type DynExecutor = Arc<dyn JobExecutor>;

/// Builds the executor for a run writing its results to `output_dir`.
pub trait ExecutorProvider: Send + Sync {
    fn executor_for(&self, output_dir: &Path) -> DynExecutor;
}

impl<F> ExecutorProvider for F
where
    F: Fn(&Path) -> DynExecutor + Send + Sync,
{
    fn executor_for(&self, output_dir: &Path) -> DynExecutor {
        self(output_dir)
    }
}
