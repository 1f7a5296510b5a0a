use crate::common::{LoadCaseError, LoadCaseResult};
use crate::domains::loadcases::{CaseWriter, LoadCase};
use std::fs;
use std::path::Path;

/// Writes each case's environment as JSON, for engines driven by a wrapper
/// script that applies it to a base model.
pub struct JsonCaseWriter;

impl CaseWriter for JsonCaseWriter {
    fn write_case(&self, case: &LoadCase, path: &Path) -> LoadCaseResult<()> {
        let body = serde_json::to_string_pretty(case)?;
        fs::write(path, body).map_err(|e| LoadCaseError::Write {
            name: case.name.clone(),
            reason: e.to_string(),
        })
    }
}
