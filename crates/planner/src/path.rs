use crate::graph::Graph;
use model::core::identifiers::SourceIndex;
use std::collections::{HashSet, VecDeque};
use tracing::trace;

/// Breadth-first search for the shortest chain of sources joining `anchor`
/// to `target`, both ends included.
///
/// Neighbours are expanded in edge declaration order, so among several
/// shortest chains the one using the earliest declared joins wins. Returns
/// `None` when `target` cannot be reached from `anchor`.
pub fn shortest_path(
    graph: &Graph,
    anchor: SourceIndex,
    target: SourceIndex,
) -> Option<Vec<SourceIndex>> {
    // early exit if anchor or target missing
    if !graph.contains(anchor) || !graph.contains(target) {
        return None;
    }

    let mut visited: HashSet<SourceIndex> = HashSet::new();
    let mut queue: VecDeque<Vec<SourceIndex>> = VecDeque::new();

    visited.insert(anchor);
    queue.push_back(vec![anchor]);

    while let Some(path) = queue.pop_front() {
        let last = *path.last()?;
        if last == target {
            return Some(path);
        }

        for (next, edge) in graph.neighbors(last) {
            if visited.insert(next) {
                trace!("Visiting {} from {} over edge {}", next, last, edge.id);

                let mut new_path = path.clone();
                new_path.push(next);
                queue.push_back(new_path);
            }
        }
    }

    // no route found
    None
}

/// Sources reachable from `anchor`, in breadth-first order.
pub fn reachable(graph: &Graph, anchor: SourceIndex) -> Vec<SourceIndex> {
    if !graph.contains(anchor) {
        return Vec::new();
    }

    let mut visited = HashSet::from([anchor]);
    let mut order = vec![anchor];
    let mut cursor = 0;

    while let Some(&node) = order.get(cursor) {
        cursor += 1;
        for (next, _) in graph.neighbors(node) {
            if visited.insert(next) {
                order.push(next);
            }
        }
    }

    order
}
