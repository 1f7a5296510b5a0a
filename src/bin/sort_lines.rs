//! Print the lines of a model (or of one group) in path order.
//!
//! Usage: `sort-lines <model.json> [group] [--subgroups]`

use anyhow::{bail, Context};
use offshore_runner::adapters::inbound::load_model_json;
use offshore_runner::domains::lines::{lines_in, sort_path, unconnected_constraints, ConnectionGraph, LineAccessor};
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let include_subgroups = match args.iter().position(|a| a == "--subgroups") {
        Some(i) => {
            args.remove(i);
            true
        }
        None => false,
    };
    let Some(model) = args.first().map(PathBuf::from) else {
        bail!("usage: sort-lines <model.json> [group] [--subgroups]");
    };
    let group = args.get(1).map(String::as_str);

    let nodes = load_model_json(&model)?;
    let lines = lines_in(&nodes, group, include_subgroups)?;
    if lines.is_empty() {
        bail!("no lines found in {}", model.display());
    }

    let path = sort_path(&lines).with_context(|| format!("sorting lines of {}", model.display()))?;
    for (i, line) in path.iter().enumerate() {
        println!("{:>3}  {}  ({:.2} m)", i + 1, line.name(), line.total_length());
    }

    if path.len() < lines.len() {
        let components = ConnectionGraph::build(&lines).component_count();
        warn!(
            sorted = path.len(),
            total = lines.len(),
            components,
            "not all lines are connected into one path"
        );
    }

    for name in unconnected_constraints(&nodes) {
        warn!(constraint = name, "constraint is not connected to any line");
    }
    Ok(())
}
