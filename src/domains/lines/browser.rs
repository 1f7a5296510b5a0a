use super::types::Line;
use crate::common::ModelError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One entry of a model's object browser. Groups nest arbitrarily deep.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ModelNode {
    Group { name: String, children: Vec<ModelNode> },
    Line(Line),
    Constraint { name: String },
    Other { name: String },
}

impl ModelNode {
    pub fn name(&self) -> &str {
        match self {
            ModelNode::Group { name, .. } => name,
            ModelNode::Line(line) => &line.name,
            ModelNode::Constraint { name } => name,
            ModelNode::Other { name } => name,
        }
    }

    fn children(&self) -> &[ModelNode] {
        match self {
            ModelNode::Group { children, .. } => children,
            _ => &[],
        }
    }
}

/// Depth-first search for a group by name.
fn find_group<'a>(roots: &'a [ModelNode], group: &str) -> Option<&'a ModelNode> {
    let mut stack: Vec<&ModelNode> = roots.iter().rev().collect();
    while let Some(node) = stack.pop() {
        if matches!(node, ModelNode::Group { .. }) && node.name() == group {
            return Some(node);
        }
        stack.extend(node.children().iter().rev());
    }
    None
}

/// Flatten the browser tree in pre-order.
///
/// With `group` set, only that group's members are returned; nested groups are
/// entered only when `include_subgroups` is true. Without a group the whole
/// tree is flattened.
pub fn flatten<'a>(
    roots: &'a [ModelNode],
    group: Option<&str>,
    include_subgroups: bool,
) -> Result<Vec<&'a ModelNode>, ModelError> {
    let (start, recurse): (&[ModelNode], bool) = match group {
        Some(name) => {
            let node = find_group(roots, name).ok_or_else(|| ModelError::GroupNotFound(name.to_string()))?;
            (node.children(), include_subgroups)
        }
        None => (roots, true),
    };

    let mut out = Vec::new();
    let mut stack: Vec<&ModelNode> = start.iter().rev().collect();
    while let Some(node) = stack.pop() {
        out.push(node);
        if recurse {
            stack.extend(node.children().iter().rev());
        }
    }
    Ok(out)
}

pub fn lines_in<'a>(
    roots: &'a [ModelNode],
    group: Option<&str>,
    include_subgroups: bool,
) -> Result<Vec<&'a Line>, ModelError> {
    Ok(flatten(roots, group, include_subgroups)?
        .into_iter()
        .filter_map(|node| match node {
            ModelNode::Line(line) => Some(line),
            _ => None,
        })
        .collect())
}

pub fn select_by_name<'a, S: AsRef<str>>(lines: &[&'a Line], names: &[S]) -> Vec<&'a Line> {
    lines
        .iter()
        .copied()
        .filter(|line| names.iter().any(|n| n.as_ref() == line.name))
        .collect()
}

/// Constraints that no line end is connected to, in browser order.
pub fn unconnected_constraints(roots: &[ModelNode]) -> Vec<&str> {
    let nodes = flatten(roots, None, true).unwrap_or_default();

    let referenced: HashSet<&str> = nodes
        .iter()
        .copied()
        .filter_map(|node| match node {
            ModelNode::Line(line) => Some(line),
            _ => None,
        })
        .flat_map(|line| [line.end_a.connection.object_name(), line.end_b.connection.object_name()])
        .flatten()
        .collect();

    nodes
        .into_iter()
        .filter(|node| matches!(node, ModelNode::Constraint { .. }))
        .map(|node| node.name())
        .filter(|name| !referenced.contains(name))
        .collect()
}
