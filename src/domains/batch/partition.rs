use super::job::Job;
use crate::common::{BatchError, BatchResult};
use serde::{Deserialize, Serialize};

/// Jobs handed to one worker slot, in execution order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkerAssignment {
    pub worker_index: usize,
    pub jobs: Vec<Job>,
}

impl WorkerAssignment {
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }
}

/// `ceil(jobs / workers)`, the size of every slice but the last.
pub fn chunk_size(job_count: usize, worker_count: usize) -> usize {
    if worker_count == 0 {
        return 0;
    }
    job_count.div_ceil(worker_count)
}

/// Split `jobs` into exactly `worker_count` contiguous, order-preserving slices.
///
/// With no more jobs than workers every job gets its own slot and the rest
/// stay empty. Otherwise slices hold `chunk_size` jobs each and the last one
/// takes the remainder. Slices that would start past the end are empty.
pub fn partition(jobs: &[Job], worker_count: usize) -> BatchResult<Vec<WorkerAssignment>> {
    if worker_count < 1 {
        return Err(BatchError::JobValidation {
            reason: format!("worker count must be at least 1, got {}", worker_count),
        });
    }

    let total = jobs.len();
    let slices: Vec<&[Job]> = if total <= worker_count {
        (0..worker_count)
            .map(|i| if i < total { &jobs[i..i + 1] } else { &jobs[total..] })
            .collect()
    } else {
        let chunk = chunk_size(total, worker_count);
        (0..worker_count)
            .map(|i| {
                let start = (i * chunk).min(total);
                let end = if i + 1 == worker_count { total } else { ((i + 1) * chunk).min(total) };
                &jobs[start..end]
            })
            .collect()
    };

    Ok(slices
        .into_iter()
        .enumerate()
        .map(|(worker_index, slice)| WorkerAssignment {
            worker_index,
            jobs: slice.to_vec(),
        })
        .collect())
}
