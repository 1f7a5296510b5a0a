//! Expand a load case matrix into one case file per combination.
//!
//! Usage: `generate-cases <matrix.toml|matrix.json> <out_dir>`

use anyhow::{bail, Context};
use offshore_runner::adapters::outbound::JsonCaseWriter;
use offshore_runner::domains::loadcases::{generate_load_cases, LoadCaseMatrix};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn read_matrix(path: &Path) -> anyhow::Result<LoadCaseMatrix> {
    let content = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let matrix = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&content)?,
        _ => toml::from_str(&content)?,
    };
    Ok(matrix)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [matrix_path, out_dir] = args.as_slice() else {
        bail!("usage: generate-cases <matrix.toml|matrix.json> <out_dir>");
    };

    let matrix = read_matrix(Path::new(matrix_path))?;
    let out_dir = PathBuf::from(out_dir);
    let rows = generate_load_cases(&matrix, &out_dir, &JsonCaseWriter)?;

    println!("{} load cases written to {}", rows.len(), out_dir.display());
    Ok(())
}
