//! Incremental view path planner.
//!
//! Given a view joining several sources and the source a row change arrived
//! on, the planner computes the smallest view ("slice") that maps the changed
//! row back to what has to be recomputed: the key of the affected view row,
//! or selected fields of another source.

pub mod config;
pub mod error;
pub mod graph;
pub mod literals;
pub mod path;
pub mod planner;
pub mod shortcut;
pub mod slice;

pub use crate::{
    config::PlannerConfig,
    error::PlanError,
    planner::{KeyPathPlan, Planner},
    slice::{SliceMode, fingerprint},
};

use model::view::spec::ViewSpec;

/// [`Planner::generate_key_path`] with the default configuration.
pub fn generate_key_path(view: &ViewSpec, anchor: &str) -> Result<Option<ViewSpec>, PlanError> {
    Planner::default().generate_key_path(view, anchor)
}

/// [`Planner::extract_fields`] with the default configuration.
pub fn extract_fields(
    view: &ViewSpec,
    anchor: &str,
    fields: &[&str],
) -> Result<Option<ViewSpec>, PlanError> {
    Planner::default().extract_fields(view, anchor, fields)
}

/// [`Planner::extract_keys_reverse`] with the default configuration.
pub fn extract_keys_reverse(view: &ViewSpec, anchor: &str) -> Result<Option<ViewSpec>, PlanError> {
    Planner::default().extract_keys_reverse(view, anchor)
}
