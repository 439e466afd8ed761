use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic type tag of a column as reported by schema discovery.
///
/// The planner never interprets it; it is carried through so a slice's
/// schemas stay identical to the ones of the view it was cut from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataType(String);

impl DataType {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DataType {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
