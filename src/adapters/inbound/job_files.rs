use crate::common::{BatchError, BatchResult};
use crate::domains::batch::{jobs_from_paths, Job, JobSource};
use std::fs;
use std::path::{Path, PathBuf};

/// Lists regular files with a given extension, sorted by file name.
pub struct FilesystemJobSource {
    extension: String,
}

impl FilesystemJobSource {
    pub fn new(extension: &str) -> Self {
        Self {
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    fn matches(&self, path: &Path) -> bool {
        path.extension()
            .map(|e| e.to_string_lossy().eq_ignore_ascii_case(&self.extension))
            .unwrap_or(false)
    }
}

impl JobSource for FilesystemJobSource {
    fn list_jobs(&self, input_dir: &Path) -> BatchResult<Vec<Job>> {
        let discovery = |source| BatchError::Discovery {
            dir: input_dir.display().to_string(),
            source,
        };

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in fs::read_dir(input_dir).map_err(discovery)? {
            let path = entry.map_err(discovery)?.path();
            if path.is_file() && self.matches(&path) {
                paths.push(path);
            }
        }
        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(jobs_from_paths(paths))
    }
}

/// Jobs for every `extension` file directly inside `dir`, sorted by file name.
pub fn discover_jobs(dir: &Path, extension: &str) -> BatchResult<Vec<Job>> {
    FilesystemJobSource::new(extension).list_jobs(dir)
}
