use thiserror::Error;

/// Failures of a planning call. "No path" is not an error: it is reported as
/// `Ok(None)`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    /// Rejected before any graph work begins.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("field `{field}` does not exist in source `{alias}`")]
    UnknownField { alias: String, field: String },

    /// The chosen route does not agree with the join graph it came from.
    #[error("inconsistent route: {0}")]
    BrokenRoute(String),
}
