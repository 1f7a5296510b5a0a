use super::connectivity::{connection, Contact};
use super::types::{End, EndFilter, LineAccessor};
use crate::common::{TopologyError, TopologyResult};
use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};
use tracing::debug;

/// Undirected interconnection graph of a line set. Node weights are indices
/// into the caller's slice; each edge stores the contact oriented from its
/// stored source node.
pub struct ConnectionGraph {
    graph: UnGraph<usize, Contact>,
}

impl ConnectionGraph {
    pub fn build<L: LineAccessor>(lines: &[L]) -> Self {
        let mut graph = UnGraph::with_capacity(lines.len(), lines.len());
        let nodes: Vec<NodeIndex> = (0..lines.len()).map(|i| graph.add_node(i)).collect();

        for i in 0..lines.len() {
            for j in (i + 1)..lines.len() {
                if let Some(contact) = connection(&lines[i], &lines[j], EndFilter::Both) {
                    graph.add_edge(nodes[i], nodes[j], contact);
                }
            }
        }

        Self { graph }
    }

    pub fn line_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of other lines the line at `index` is connected to.
    pub fn degree(&self, index: usize) -> usize {
        self.graph.neighbors(NodeIndex::new(index)).count()
    }

    pub fn neighbors(&self, index: usize) -> Vec<usize> {
        let mut out: Vec<usize> = self
            .graph
            .neighbors(NodeIndex::new(index))
            .map(|n| self.graph[n])
            .collect();
        out.sort_unstable();
        out
    }

    /// Contact between two lines, seen from the line at `from`.
    pub fn contact(&self, from: usize, to: usize) -> Option<Contact> {
        let edge = self.graph.find_edge(NodeIndex::new(from), NodeIndex::new(to))?;
        let (source, _) = self.graph.edge_endpoints(edge)?;
        let contact = *self.graph.edge_weight(edge)?;
        if source.index() == from {
            Some(contact)
        } else {
            Some(Contact {
                first: contact.second,
                second: contact.first,
            })
        }
    }

    /// Number of connected groups; a sortable set has exactly one.
    pub fn component_count(&self) -> usize {
        connected_components(&self.graph)
    }
}

/// Sort interconnected lines into path order, first line to last.
///
/// Consecutive lines in the result touch each other, and each line is left
/// through the end opposite the one it was entered from. Which of the two
/// termini the path starts from is not defined; the reversed result is equally
/// valid. A result shorter than the input means the set was disconnected.
pub fn sort_path<L: LineAccessor>(lines: &[L]) -> TopologyResult<Vec<&L>> {
    match lines.len() {
        0 => return Err(TopologyError::EmptyTopology),
        1 => return Ok(vec![&lines[0]]),
        _ => {}
    }

    let graph = ConnectionGraph::build(lines);

    let branches: Vec<String> = (0..lines.len())
        .filter(|&i| graph.degree(i) > 2)
        .map(|i| lines[i].name().to_string())
        .collect();
    if !branches.is_empty() {
        return Err(TopologyError::AmbiguousTopology {
            reason: "lines with more than two connections".to_string(),
            lines: branches,
        });
    }

    let termini: Vec<(usize, End)> = (0..lines.len())
        .filter(|&i| graph.degree(i) == 1)
        .filter_map(|i| {
            let neighbor = *graph.neighbors(i).first()?;
            graph.contact(i, neighbor).map(|c| (i, c.first))
        })
        .collect();

    if termini.len() > 2 {
        return Err(TopologyError::AmbiguousTopology {
            reason: "more than two lines with a single connection".to_string(),
            lines: termini.iter().map(|(i, _)| lines[*i].name().to_string()).collect(),
        });
    }

    let (start, start_end) = *termini.first().ok_or(TopologyError::NoTerminus)?;
    debug!(start = lines[start].name(), end = %start_end, "sorting line path");

    let mut placed = vec![false; lines.len()];
    placed[start] = true;
    let mut path = vec![&lines[start]];
    let mut current = start;
    let mut free_end = start_end;

    loop {
        let candidates: Vec<(usize, Contact)> = (0..lines.len())
            .filter(|&j| !placed[j])
            .filter_map(|j| connection(&lines[current], &lines[j], EndFilter::Only(free_end)).map(|c| (j, c)))
            .collect();

        match candidates.as_slice() {
            [] => break,
            [(next, contact)] => {
                placed[*next] = true;
                path.push(&lines[*next]);
                current = *next;
                free_end = contact.second.other();
            }
            many => {
                return Err(TopologyError::AmbiguousTopology {
                    reason: format!("{} of {} touches more than one line", free_end, lines[current].name()),
                    lines: many.iter().map(|(j, _)| lines[*j].name().to_string()).collect(),
                });
            }
        }
    }

    if path.len() != lines.len() {
        debug!(placed = path.len(), total = lines.len(), "line set is not fully connected");
    }

    Ok(path)
}

/// Whether `path` is a chain: each line touches the next, and every inner line
/// is left through the end opposite the one it was entered from.
pub fn is_valid_path<L: LineAccessor>(path: &[L]) -> bool {
    let mut filter = EndFilter::Both;
    for pair in path.windows(2) {
        match connection(&pair[0], &pair[1], filter) {
            Some(contact) => filter = EndFilter::Only(contact.second.other()),
            None => return false,
        }
    }
    true
}
