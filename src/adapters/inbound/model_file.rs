use crate::domains::lines::ModelNode;
use anyhow::{Context, Result};
use std::path::Path;

/// Read a model browser tree exported as JSON (an array of nodes).
pub fn load_model_json(path: &Path) -> Result<Vec<ModelNode>> {
    let content = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let nodes: Vec<ModelNode> =
        serde_json::from_str(&content).with_context(|| format!("parsing model tree in {}", path.display()))?;
    Ok(nodes)
}
