use crate::core::data_type::DataType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: DataType,
}

/// Resolved schema of a table taking part in a view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub name: String,

    /// Primary-key column names, in key order. Never empty once validated.
    pub primary_key: Vec<String>,

    /// Columns in discovery order.
    pub columns: Vec<Column>,
}

impl TableSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            primary_key: Vec::new(),
            columns: Vec::new(),
        }
    }

    pub fn with_column(mut self, name: &str, data_type: impl Into<DataType>) -> Self {
        self.columns.push(Column {
            name: name.to_string(),
            data_type: data_type.into(),
        });
        self
    }

    pub fn with_key(mut self, columns: &[&str]) -> Self {
        self.primary_key = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }
}
