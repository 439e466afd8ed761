use crate::{
    core::{
        identifiers::{Alias, SourceIndex},
        schema::TableSchema,
    },
    view::condition::JoinCondition,
};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinMode {
    Main,
    Inner,
    Left,
}

impl fmt::Display for JoinMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinMode::Main => write!(f, "MAIN"),
            JoinMode::Inner => write!(f, "INNER"),
            JoinMode::Left => write!(f, "LEFT"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinSource {
    pub index: SourceIndex,
    pub table: String,
    pub alias: Alias,
    pub mode: JoinMode,
    pub schema: TableSchema,

    /// Conditions declared together with this source. They only reference
    /// this source and sources declared before it.
    pub conditions: Vec<JoinCondition>,
}
