use super::matrix::LoadCase;
use crate::common::LoadCaseResult;
use std::path::Path;

/// Port to the engine side: persist the model for one load case at `path`.
pub trait CaseWriter: Send + Sync {
    fn write_case(&self, case: &LoadCase, path: &Path) -> LoadCaseResult<()>;
}
