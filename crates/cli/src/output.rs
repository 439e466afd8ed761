use crate::error::CliError;
use model::ViewSpec;
use planner::fingerprint;
use serde::Serialize;

/// Planner answer for one anchor.
#[derive(Debug, Serialize)]
pub struct SliceReport {
    pub anchor: String,
    /// Absent when the anchor has no join path to the target.
    pub fingerprint: Option<String>,
    pub slice: Option<ViewSpec>,
}

impl SliceReport {
    pub fn new(anchor: &str, slice: Option<ViewSpec>) -> Result<Self, CliError> {
        let fingerprint = slice.as_ref().map(fingerprint).transpose()?;

        Ok(Self {
            anchor: anchor.to_string(),
            fingerprint,
            slice,
        })
    }
}

pub fn write_report<T: Serialize>(report: &T, path: Option<&str>) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(report)?;

    match path {
        Some(path) => std::fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
