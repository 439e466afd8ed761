use crate::{
    core::identifiers::{Alias, SourceIndex},
    view::{
        condition::Literal,
        output::OutputColumn,
        source::JoinSource,
    },
};
use serde::Serialize;

/// A schema-resolved view definition.
///
/// Sources live in one arena ordered by declaration; everything that points
/// at a source does so through its [`SourceIndex`]. Resolving a
/// [`ViewDefinition`](crate::definition::ViewDefinition) checks the
/// structural invariants; a value assembled by hand is not checked and may
/// even have no sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewSpec {
    pub name: String,
    pub sources: Vec<JoinSource>,
    pub columns: Vec<OutputColumn>,
    pub filter: Option<String>,
    pub literals: Vec<Literal>,

    /// Output column names forming the view key when it differs from the
    /// MAIN table's primary key (e.g. partly computed keys).
    pub key_override: Option<Vec<String>>,
}

impl ViewSpec {
    pub fn main(&self) -> Option<&JoinSource> {
        self.sources.first()
    }

    pub fn source(&self, index: SourceIndex) -> Option<&JoinSource> {
        self.sources.get(index.get())
    }

    pub fn source_by_alias(&self, alias: &str) -> Option<&JoinSource> {
        self.sources.iter().find(|s| s.alias.as_str() == alias)
    }

    pub fn index_of(&self, alias: &str) -> Option<SourceIndex> {
        self.source_by_alias(alias).map(|s| s.index)
    }

    pub fn aliases(&self) -> impl Iterator<Item = &Alias> {
        self.sources.iter().map(|s| &s.alias)
    }

    pub fn column(&self, name: &str) -> Option<&OutputColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn literal(&self, id: &str) -> Option<&Literal> {
        self.literals.iter().find(|l| l.id == id)
    }

    /// Output columns named by the key override, in override order.
    pub fn key_columns(&self) -> Option<Vec<&OutputColumn>> {
        self.key_override
            .as_ref()
            .map(|names| names.iter().filter_map(|n| self.column(n)).collect())
    }

    pub fn condition_count(&self) -> usize {
        self.sources.iter().map(|s| s.conditions.len()).sum()
    }
}
