//! Import cycle detection
//!
//! Depth-first search over the dependency graph with three-coloring
//! (unvisited / on-stack / done). A back edge to an on-stack node reports a
//! cycle, reconstructed through parent pointers and closed by repeating the
//! back-edge target: `[v, ..., u, v]`. The search uses an explicit work
//! stack so pathological graphs cannot blow the call stack.
//!
//! Structurally identical cycles reached through different entry points are
//! not deduplicated; each report still points at a real defect.

use super::DependencyGraph;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;

/// Hard cap on reconstructed cycle length.
const MAX_CYCLE_LEN: usize = 50;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Color {
    OnStack,
    Done,
}

struct Frame {
    node: PathBuf,
    neighbors: Vec<PathBuf>,
    next: usize,
}

/// Find all import cycles in the graph.
///
/// Every node with outgoing edges is used as a DFS root once, so cycles are
/// collected across all weakly-connected components. A self-loop comes back
/// as the two-element walk `[v, v]`.
pub fn find_cycles(graph: &DependencyGraph) -> Vec<Vec<PathBuf>> {
    let mut color: HashMap<PathBuf, Color> = HashMap::new();
    let mut parent: HashMap<PathBuf, PathBuf> = HashMap::new();
    let mut cycles: Vec<Vec<PathBuf>> = Vec::new();

    let neighbors_of = |node: &PathBuf| -> Vec<PathBuf> {
        graph
            .get(node)
            .map(|t| t.iter().cloned().collect())
            .unwrap_or_default()
    };

    for root in graph.keys() {
        if color.contains_key(root) {
            continue;
        }

        let mut stack: Vec<Frame> = vec![Frame {
            node: root.clone(),
            neighbors: neighbors_of(root),
            next: 0,
        }];
        color.insert(root.clone(), Color::OnStack);

        while let Some(frame) = stack.last_mut() {
            if frame.next >= frame.neighbors.len() {
                color.insert(frame.node.clone(), Color::Done);
                stack.pop();
                continue;
            }

            let v = frame.neighbors[frame.next].clone();
            frame.next += 1;
            let u = frame.node.clone();

            match color.get(&v) {
                None => {
                    parent.insert(v.clone(), u);
                    color.insert(v.clone(), Color::OnStack);
                    let nbrs = neighbors_of(&v);
                    stack.push(Frame {
                        node: v,
                        neighbors: nbrs,
                        next: 0,
                    });
                }
                Some(Color::OnStack) => {
                    // Back edge: walk parent pointers from u up to v.
                    let mut cycle = vec![v.clone()];
                    let mut cur = Some(u);
                    while let Some(node) = cur {
                        if node == v || cycle.len() >= MAX_CYCLE_LEN {
                            break;
                        }
                        cur = parent.get(&node).cloned();
                        cycle.push(node);
                    }
                    cycle.push(v);
                    cycle.reverse();
                    cycles.push(cycle);
                }
                Some(Color::Done) => {}
            }
        }
    }

    debug!("cycle detection found {} cycles", cycles.len());
    cycles
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet};

    fn graph_of(edges: &[(&str, &str)]) -> DependencyGraph {
        let mut graph: DependencyGraph = BTreeMap::new();
        for (src, dst) in edges {
            graph
                .entry(PathBuf::from(src))
                .or_insert_with(BTreeSet::new)
                .insert(PathBuf::from(dst));
        }
        graph
    }

    #[test]
    fn test_triangle_reports_one_cycle() {
        let graph = graph_of(&[("a.py", "b.py"), ("b.py", "c.py"), ("c.py", "a.py")]);
        let cycles = find_cycles(&graph);
        assert_eq!(cycles.len(), 1);

        let cycle = &cycles[0];
        // Closed walk: first and last node match, three distinct members.
        assert_eq!(cycle.first(), cycle.last());
        assert_eq!(cycle.len(), 4);
        for name in ["a.py", "b.py", "c.py"] {
            assert!(cycle.contains(&PathBuf::from(name)), "missing {name}");
        }
    }

    #[test]
    fn test_linear_chain_has_no_cycles() {
        let graph = graph_of(&[("a.py", "b.py"), ("b.py", "c.py")]);
        assert!(find_cycles(&graph).is_empty());
    }

    #[test]
    fn test_self_loop_is_trivial_cycle() {
        let graph = graph_of(&[("a.js", "a.js")]);
        let cycles = find_cycles(&graph);
        assert_eq!(cycles.len(), 1);
        assert_eq!(
            cycles[0],
            vec![PathBuf::from("a.js"), PathBuf::from("a.js")]
        );
    }

    #[test]
    fn test_cycles_found_across_components() {
        let graph = graph_of(&[
            ("a.py", "b.py"),
            ("b.py", "a.py"),
            ("x.ts", "y.ts"),
            ("y.ts", "x.ts"),
            ("lone.js", "leaf.js"),
        ]);
        let cycles = find_cycles(&graph);
        assert_eq!(cycles.len(), 2);
    }

    #[test]
    fn test_diamond_without_back_edge_is_clean() {
        // a -> b, a -> c, b -> d, c -> d: d is reached twice but on-stack
        // discipline must not call it a cycle.
        let graph = graph_of(&[
            ("a.py", "b.py"),
            ("a.py", "c.py"),
            ("b.py", "d.py"),
            ("c.py", "d.py"),
        ]);
        assert!(find_cycles(&graph).is_empty());
    }
}
