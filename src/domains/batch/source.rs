use super::job::Job;
use crate::common::BatchResult;
use std::path::Path;

/// Port for finding the input artifacts of a batch.
pub trait JobSource: Send + Sync {
    fn list_jobs(&self, input_dir: &Path) -> BatchResult<Vec<Job>>;
}
