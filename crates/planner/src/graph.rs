use model::{
    core::identifiers::{Alias, SourceIndex},
    view::{
        condition::{ColumnRef, JoinCondition, Operand},
        spec::ViewSpec,
    },
};
use std::collections::HashMap;
use tracing::trace;

/// One column equality of a join edge, oriented as it was declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPair {
    pub left: ColumnRef,
    pub right: ColumnRef,
}

impl ColumnPair {
    /// Column this pair uses on `source`, if `source` is one of its ends.
    pub fn column_of(&self, source: SourceIndex) -> Option<&str> {
        if self.left.source == source {
            Some(&self.left.column)
        } else if self.right.source == source {
            Some(&self.right.column)
        } else {
            None
        }
    }
}

/// All column equalities declared between one pair of sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub id: usize,
    /// Ends ordered by declaration position.
    pub ends: (SourceIndex, SourceIndex),
    pub pairs: Vec<ColumnPair>,
}

impl Edge {
    pub fn other(&self, node: SourceIndex) -> Option<SourceIndex> {
        match self.ends {
            (a, b) if a == node => Some(b),
            (a, b) if b == node => Some(a),
            _ => None,
        }
    }

    /// `(column on from, column on to)` for every pair of the edge.
    pub fn columns_between(
        &self,
        from: SourceIndex,
        to: SourceIndex,
    ) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .filter_map(move |p| Some((p.column_of(from)?, p.column_of(to)?)))
    }
}

/// A condition that is not a join between two sources: a comparison with a
/// literal, or a comparison between two columns of the same source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guard {
    pub owner: SourceIndex,
    pub condition: JoinCondition,
}

impl Guard {
    pub fn has_literal(&self) -> bool {
        self.condition.literals().next().is_some()
    }
}

/// Undirected join multigraph of a view. Nodes are the view's sources.
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: Vec<Alias>,
    edges: Vec<Edge>,
    adjacency: Vec<Vec<usize>>,
    lookup: HashMap<(SourceIndex, SourceIndex), usize>,
    guards: Vec<Guard>,
}

impl Graph {
    /// Groups every column-to-column condition between the same two sources
    /// into a single edge and keeps the remaining conditions as guards of the
    /// source they constrain. Edges are numbered in declaration order.
    pub fn build(view: &ViewSpec) -> Self {
        let mut graph = Graph {
            nodes: view.aliases().cloned().collect(),
            edges: Vec::new(),
            adjacency: vec![Vec::new(); view.sources.len()],
            lookup: HashMap::new(),
            guards: Vec::new(),
        };

        for source in &view.sources {
            for condition in &source.conditions {
                match (&condition.left, &condition.right) {
                    (Operand::Reference(l), Operand::Reference(r)) if l.source != r.source => {
                        graph.add_pair(ColumnPair {
                            left: l.clone(),
                            right: r.clone(),
                        });
                    }
                    _ => {
                        // literal comparisons and same-source comparisons
                        let owner = condition
                            .references()
                            .next()
                            .map(|r| r.source)
                            .unwrap_or(source.index);

                        graph.guards.push(Guard {
                            owner,
                            condition: condition.clone(),
                        });
                    }
                }
            }
        }

        trace!(
            "Built join graph for `{}`: {} nodes, {} edges, {} guards",
            view.name,
            graph.nodes.len(),
            graph.edges.len(),
            graph.guards.len()
        );

        graph
    }

    fn add_pair(&mut self, pair: ColumnPair) {
        let (a, b) = (pair.left.source, pair.right.source);
        let key = (a.min(b), a.max(b));

        let id = match self.lookup.get(&key) {
            Some(id) => *id,
            None => {
                let id = self.edges.len();
                self.edges.push(Edge {
                    id,
                    ends: key,
                    pairs: Vec::new(),
                });
                self.lookup.insert(key, id);
                self.adjacency[key.0.get()].push(id);
                self.adjacency[key.1.get()].push(id);
                id
            }
        };

        self.edges[id].pairs.push(pair);
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains(&self, node: SourceIndex) -> bool {
        node.get() < self.nodes.len()
    }

    pub fn alias(&self, node: SourceIndex) -> Option<&Alias> {
        self.nodes.get(node.get())
    }

    pub fn index_of(&self, alias: &str) -> Option<SourceIndex> {
        self.nodes
            .iter()
            .position(|a| a.as_str() == alias)
            .map(SourceIndex::new)
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge_between(&self, a: SourceIndex, b: SourceIndex) -> Option<&Edge> {
        self.lookup
            .get(&(a.min(b), a.max(b)))
            .map(|id| &self.edges[*id])
    }

    /// Neighbours of `node` with the edge leading to them, in edge
    /// declaration order.
    pub fn neighbors(&self, node: SourceIndex) -> impl Iterator<Item = (SourceIndex, &Edge)> {
        self.adjacency
            .get(node.get())
            .into_iter()
            .flatten()
            .filter_map(move |id| {
                let edge = &self.edges[*id];
                edge.other(node).map(|n| (n, edge))
            })
    }

    pub fn guards(&self) -> &[Guard] {
        &self.guards
    }

    pub fn guards_of(&self, node: SourceIndex) -> impl Iterator<Item = &Guard> {
        self.guards.iter().filter(move |g| g.owner == node)
    }
}
