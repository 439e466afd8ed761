use crate::{
    graph::{Graph, Guard},
    shortcut::Route,
};
use model::core::identifiers::SourceIndex;
use std::collections::HashMap;
use tracing::debug;

/// Sources that make it into a slice, with their new positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Survivors {
    order: Vec<SourceIndex>,
    positions: HashMap<SourceIndex, SourceIndex>,
}

impl Survivors {
    pub fn new(order: Vec<SourceIndex>) -> Self {
        let positions = order
            .iter()
            .enumerate()
            .map(|(pos, node)| (*node, SourceIndex::new(pos)))
            .collect();

        Self { order, positions }
    }

    pub fn from_route(route: &Route) -> Self {
        Self::new(route.sources())
    }

    pub fn contains(&self, node: SourceIndex) -> bool {
        self.positions.contains_key(&node)
    }

    /// Position of `node` in the slice.
    pub fn position(&self, node: SourceIndex) -> Option<SourceIndex> {
        self.positions.get(&node).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = SourceIndex> + '_ {
        self.order.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Guards carried into the slice: exactly those whose owning source
/// survives. A guard is copied whole or not at all.
pub fn retain<'g>(graph: &'g Graph, survivors: &Survivors) -> Vec<&'g Guard> {
    let (kept, dropped): (Vec<&Guard>, Vec<&Guard>) = graph
        .guards()
        .iter()
        .partition(|guard| survivors.contains(guard.owner));

    if !dropped.is_empty() {
        debug!(
            "Dropping {} guard(s) of sources eliminated from the slice",
            dropped.len()
        );
    }

    kept
}
