use crate::common::{BatchError, BatchResult};
use crate::domains::batch::BatchSummary;
use std::path::Path;

/// Persist the batch summary as pretty-printed JSON.
pub async fn write_summary_json(path: &Path, summary: &BatchSummary) -> BatchResult<()> {
    let body = serde_json::to_string_pretty(summary).map_err(|e| BatchError::Report(e.to_string()))?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| BatchError::Report(format!("{}: {}", parent.display(), e)))?;
    }
    tokio::fs::write(path, body)
        .await
        .map_err(|e| BatchError::Report(format!("{}: {}", path.display(), e)))
}
