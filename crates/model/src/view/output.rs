use crate::view::condition::{ColumnRef, Literal};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputSource {
    Reference(ColumnRef),
    /// Opaque expression, optionally bound to one declared literal.
    Computation {
        expression: String,
        literal: Option<Literal>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputColumn {
    pub name: String,
    pub source: OutputSource,
}

impl OutputColumn {
    pub fn reference(name: impl Into<String>, column: ColumnRef) -> Self {
        Self {
            name: name.into(),
            source: OutputSource::Reference(column),
        }
    }

    pub fn is_computed(&self) -> bool {
        matches!(self.source, OutputSource::Computation { .. })
    }
}
