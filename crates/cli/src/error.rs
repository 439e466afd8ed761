use model::ViewError;
use planner::PlanError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read or write a file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid view definition: {0}")]
    View(#[from] ViewError),

    #[error("Planning failed: {0}")]
    Plan(#[from] PlanError),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),
}
