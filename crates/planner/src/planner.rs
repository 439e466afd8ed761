use crate::{
    config::PlannerConfig,
    error::PlanError,
    graph::Graph,
    literals::{self, Survivors},
    path::{reachable, shortest_path},
    shortcut,
    slice::{SliceMode, build_slice},
};
use model::{
    core::identifiers::{Alias, SourceIndex},
    view::spec::ViewSpec,
};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Key-path slice planned for one source of a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPathPlan {
    pub anchor: Alias,
    /// `None` when changes of the anchor cannot affect the view.
    pub slice: Option<ViewSpec>,
}

/// Plans minimal re-join slices for changes arriving on a view's sources.
///
/// Planning is a pure function of its arguments: nothing is cached and the
/// input view is never modified, so one planner can be shared freely.
#[derive(Debug, Clone, Default)]
pub struct Planner {
    config: PlannerConfig,
}

impl Planner {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Slice recovering the MAIN primary key for a row changed in `anchor`.
    pub fn generate_key_path(
        &self,
        view: &ViewSpec,
        anchor: &str,
    ) -> Result<Option<ViewSpec>, PlanError> {
        self.plan(view, anchor, &SliceMode::KeyPath)
    }

    /// Slice reading `fields` of the MAIN source for a row changed in
    /// `anchor`. An empty `fields` selects every column.
    pub fn extract_fields(
        &self,
        view: &ViewSpec,
        anchor: &str,
        fields: &[&str],
    ) -> Result<Option<ViewSpec>, PlanError> {
        let main = view
            .main()
            .ok_or_else(|| {
                PlanError::InvalidArgument(format!("view `{}` has no sources", view.name))
            })?
            .alias
            .clone();
        self.extract_fields_from(view, anchor, main.as_str(), fields)
    }

    /// Slice reading `fields` of `target` for a row changed in `anchor`. An
    /// empty `fields` selects every column of `target`.
    pub fn extract_fields_from(
        &self,
        view: &ViewSpec,
        anchor: &str,
        target: &str,
        fields: &[&str],
    ) -> Result<Option<ViewSpec>, PlanError> {
        let target = resolve_alias(view, target, "target")?;
        let mode = SliceMode::FieldExtract {
            target,
            fields: fields.iter().map(|f| f.to_string()).collect(),
        };

        self.plan(view, anchor, &mode)
    }

    /// Slice recovering the view's overridden key for a row changed in
    /// `anchor`.
    pub fn extract_keys_reverse(
        &self,
        view: &ViewSpec,
        anchor: &str,
    ) -> Result<Option<ViewSpec>, PlanError> {
        self.plan(view, anchor, &SliceMode::ComputedKey)
    }

    /// Key-path slices for every source of `view`, in declaration order.
    pub fn key_paths(&self, view: &ViewSpec) -> Result<Vec<KeyPathPlan>, PlanError> {
        let graph = Graph::build(view);
        let connected: HashSet<SourceIndex> =
            reachable(&graph, SourceIndex::MAIN).into_iter().collect();

        view.sources
            .iter()
            .map(|source| {
                let slice = if connected.contains(&source.index) {
                    self.generate_key_path(view, source.alias.as_str())?
                } else {
                    warn!(
                        "Source `{}` of view `{}` is not joined to its MAIN source",
                        source.alias, view.name
                    );
                    None
                };

                Ok(KeyPathPlan {
                    anchor: source.alias.clone(),
                    slice,
                })
            })
            .collect()
    }

    /// Plans the slice `mode` asks for, starting from the source `anchor`.
    pub fn plan(
        &self,
        view: &ViewSpec,
        anchor: &str,
        mode: &SliceMode,
    ) -> Result<Option<ViewSpec>, PlanError> {
        let anchor = resolve_alias(view, anchor, "anchor")?;
        let request = mode.request(view)?;

        let graph = Graph::build(view);
        let Some(path) = shortest_path(&graph, anchor, request.target) else {
            debug!(
                "No join path from `{}` to `{}` in view `{}`",
                view.sources[anchor.get()].alias,
                view.sources[request.target.get()].alias,
                view.name
            );
            return Ok(None);
        };

        let route = shortcut::optimize(&graph, view, path, &request.needed(), self.config.shortcuts);
        let survivors = Survivors::from_route(&route);
        let kept = literals::retain(&graph, &survivors);

        let slice = build_slice(view, &graph, &route, &survivors, &kept, &request)?;

        debug!(
            "Planned slice of `{}` from `{}`: {} source(s), {} guard(s)",
            view.name,
            view.sources[anchor.get()].alias,
            slice.sources.len(),
            kept.len()
        );

        Ok(Some(slice))
    }
}

fn resolve_alias(view: &ViewSpec, alias: &str, role: &str) -> Result<SourceIndex, PlanError> {
    view.index_of(alias).ok_or_else(|| {
        PlanError::InvalidArgument(format!(
            "{role} alias `{alias}` is not a source of view `{}`",
            view.name
        ))
    })
}
