use crate::{
    core::schema::TableSchema,
    definition::{
        ColumnDefinition, ColumnSourceDefinition, ConditionDefinition, OperandDefinition,
        SourceDefinition, ViewDefinition,
    },
    error::ViewError,
    view::{condition::Literal, source::JoinMode, spec::ViewSpec},
};

/// Fluent construction of a [`ViewDefinition`].
///
/// Conditions are attached to the most recently declared source, mirroring
/// how a view declares `JOIN x ON ...` clauses.
#[derive(Debug, Clone)]
pub struct ViewBuilder {
    definition: ViewDefinition,
}

impl ViewBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            definition: ViewDefinition {
                name: name.to_string(),
                sources: Vec::new(),
                columns: Vec::new(),
                filter: None,
                literals: Vec::new(),
                key: None,
            },
        }
    }

    pub fn main(self, alias: &str, schema: TableSchema) -> Self {
        self.source(alias, JoinMode::Main, schema)
    }

    pub fn inner(self, alias: &str, schema: TableSchema) -> Self {
        self.source(alias, JoinMode::Inner, schema)
    }

    pub fn left(self, alias: &str, schema: TableSchema) -> Self {
        self.source(alias, JoinMode::Left, schema)
    }

    pub fn source(mut self, alias: &str, mode: JoinMode, schema: TableSchema) -> Self {
        self.definition.sources.push(SourceDefinition {
            alias: alias.to_string(),
            table: schema.name.clone(),
            mode,
            schema,
            conditions: Vec::new(),
        });
        self
    }

    /// `left_alias.left_column = right_alias.right_column`
    pub fn on(
        self,
        left_alias: &str,
        left_column: &str,
        right_alias: &str,
        right_column: &str,
    ) -> Self {
        self.condition(
            OperandDefinition::column(left_alias, left_column),
            OperandDefinition::column(right_alias, right_column),
        )
    }

    /// `alias.column = <literal>`
    pub fn on_literal(self, alias: &str, column: &str, literal_id: &str) -> Self {
        self.condition(
            OperandDefinition::column(alias, column),
            OperandDefinition::literal(literal_id),
        )
    }

    pub fn condition(mut self, left: OperandDefinition, right: OperandDefinition) -> Self {
        if let Some(source) = self.definition.sources.last_mut() {
            source.conditions.push(ConditionDefinition { left, right });
        }
        self
    }

    pub fn literal(mut self, id: &str, value: &str) -> Self {
        self.definition.literals.push(Literal::new(id, value));
        self
    }

    pub fn column(mut self, name: &str, alias: &str, column: &str) -> Self {
        self.definition.columns.push(ColumnDefinition {
            name: name.to_string(),
            source: ColumnSourceDefinition::Reference {
                alias: alias.to_string(),
                column: column.to_string(),
            },
        });
        self
    }

    pub fn computed(mut self, name: &str, expression: &str, literal: Option<&str>) -> Self {
        self.definition.columns.push(ColumnDefinition {
            name: name.to_string(),
            source: ColumnSourceDefinition::Computation {
                expression: expression.to_string(),
                literal: literal.map(str::to_string),
            },
        });
        self
    }

    pub fn filter(mut self, expression: &str) -> Self {
        self.definition.filter = Some(expression.to_string());
        self
    }

    pub fn key(mut self, columns: &[&str]) -> Self {
        self.definition.key = Some(columns.iter().map(|c| c.to_string()).collect());
        self
    }

    pub fn definition(self) -> ViewDefinition {
        self.definition
    }

    pub fn build(self) -> Result<ViewSpec, ViewError> {
        self.definition.resolve()
    }
}
