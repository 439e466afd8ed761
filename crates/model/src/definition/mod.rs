//! Alias-based view definitions.
//!
//! This is the shape produced by the view DSL parser and schema resolver, and
//! the JSON format accepted by the command line. Sources and conditions name
//! each other by alias; [`ViewDefinition::resolve`] validates the definition
//! and turns it into an index-based [`ViewSpec`](crate::view::spec::ViewSpec).

use crate::{
    core::schema::TableSchema,
    view::{condition::Literal, source::JoinMode},
};
use serde::{Deserialize, Serialize};

pub mod builder;
pub mod resolve;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewDefinition {
    pub name: String,
    pub sources: Vec<SourceDefinition>,
    #[serde(default)]
    pub columns: Vec<ColumnDefinition>,
    #[serde(default)]
    pub filter: Option<String>,
    #[serde(default)]
    pub literals: Vec<Literal>,
    #[serde(default)]
    pub key: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDefinition {
    pub alias: String,
    pub table: String,
    pub mode: JoinMode,
    pub schema: TableSchema,
    #[serde(default)]
    pub conditions: Vec<ConditionDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionDefinition {
    pub left: OperandDefinition,
    pub right: OperandDefinition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperandDefinition {
    Reference { alias: String, column: String },
    /// Refers to a declared literal by its identity.
    Literal { id: String },
}

impl OperandDefinition {
    pub fn column(alias: &str, column: &str) -> Self {
        OperandDefinition::Reference {
            alias: alias.to_string(),
            column: column.to_string(),
        }
    }

    pub fn literal(id: &str) -> Self {
        OperandDefinition::Literal { id: id.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    pub name: String,
    pub source: ColumnSourceDefinition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnSourceDefinition {
    Reference {
        alias: String,
        column: String,
    },
    Computation {
        expression: String,
        #[serde(default)]
        literal: Option<String>,
    },
}

impl ViewDefinition {
    pub fn from_json(json: &str) -> Result<Self, crate::error::ViewError> {
        Ok(serde_json::from_str(json)?)
    }
}
