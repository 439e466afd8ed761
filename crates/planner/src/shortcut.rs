use crate::graph::Graph;
use model::{core::identifiers::SourceIndex, view::spec::ViewSpec};
use tracing::debug;

/// Target column read from a column the anchor already stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    pub target_column: String,
    pub anchor_column: String,
}

/// Zero-join replacement for a route from `anchor` to `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcut {
    pub anchor: SourceIndex,
    pub target: SourceIndex,
    pub renames: Vec<Rename>,
}

/// How the values requested from the target are reached from the anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The anchor is the target.
    Local(SourceIndex),
    /// The anchor carries every requested target column itself.
    Shortcut(Shortcut),
    /// Join chain from the anchor (first) to the target (last).
    Join(Vec<SourceIndex>),
}

impl Route {
    /// Sources kept by this route, in the order they appear in the slice.
    pub fn sources(&self) -> Vec<SourceIndex> {
        match self {
            Route::Local(anchor) => vec![*anchor],
            Route::Shortcut(shortcut) => vec![shortcut.anchor],
            Route::Join(path) => path.clone(),
        }
    }

    /// Where the target's `column` is read from: a source of the route and
    /// one of its columns.
    pub fn locate(&self, column: &str) -> Option<(SourceIndex, String)> {
        match self {
            Route::Local(anchor) => Some((*anchor, column.to_string())),
            Route::Shortcut(shortcut) => shortcut
                .renames
                .iter()
                .find(|r| r.target_column == column)
                .map(|r| (shortcut.anchor, r.anchor_column.clone())),
            Route::Join(path) => path.last().map(|t| (*t, column.to_string())),
        }
    }
}

/// Looks for a direct edge between `anchor` and `target` whose column pairs
/// store every one of `needed` on the anchor side.
///
/// Every pair of the edge must carry a requested column: a pair the slice
/// would not read still constrains the join and cannot be dropped.
///
/// The edge does not have to be part of any discovered path: a view may
/// declare its joins through an intermediate source while also relating the
/// anchor and the target directly.
pub fn find_shortcut(
    graph: &Graph,
    view: &ViewSpec,
    anchor: SourceIndex,
    target: SourceIndex,
    needed: &[&str],
) -> Option<Shortcut> {
    if anchor == target || needed.is_empty() {
        return None;
    }

    let edge = graph.edge_between(anchor, target)?;
    let anchor_schema = &view.source(anchor)?.schema;

    let absorbed = edge
        .columns_between(anchor, target)
        .all(|(anchor_column, target_column)| {
            needed.contains(&target_column) && anchor_schema.has_column(anchor_column)
        });
    if !absorbed {
        return None;
    }

    let renames = needed
        .iter()
        .map(|column| {
            edge.columns_between(anchor, target)
                .find(|(_, target_column)| target_column == column)
                .filter(|(anchor_column, _)| anchor_schema.has_column(anchor_column))
                .map(|(anchor_column, target_column)| Rename {
                    target_column: target_column.to_string(),
                    anchor_column: anchor_column.to_string(),
                })
        })
        .collect::<Option<Vec<_>>>()?;

    Some(Shortcut {
        anchor,
        target,
        renames,
    })
}

/// Picks the cheapest route for a breadth-first `path` from the anchor to
/// the target.
///
/// A path of one source is already minimal. Otherwise a shortcut, when one
/// exists and `allow_shortcut` is set, reduces the slice to the anchor alone;
/// since `path` is a shortest path no other candidate can have fewer sources.
pub fn optimize(
    graph: &Graph,
    view: &ViewSpec,
    path: Vec<SourceIndex>,
    needed: &[&str],
    allow_shortcut: bool,
) -> Route {
    let (anchor, target) = match (path.first(), path.last()) {
        (Some(a), Some(t)) if path.len() > 1 => (*a, *t),
        (Some(a), _) => return Route::Local(*a),
        (None, _) => return Route::Join(path),
    };

    if allow_shortcut {
        if let Some(shortcut) = find_shortcut(graph, view, anchor, target, needed) {
            debug!(
                "Shortcut from `{}` to `{}` replaces {} join(s)",
                view.sources[anchor.get()].alias,
                view.sources[target.get()].alias,
                path.len() - 1
            );
            return Route::Shortcut(shortcut);
        }
    }

    Route::Join(path)
}
