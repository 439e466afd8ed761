use crate::{
    core::{
        identifiers::{Alias, SourceIndex},
        schema::TableSchema,
    },
    definition::{
        ColumnDefinition, ColumnSourceDefinition, ConditionDefinition, OperandDefinition,
        SourceDefinition, ViewDefinition,
    },
    error::ViewError,
    view::{
        condition::{ColumnRef, JoinCondition, Literal, Operand},
        output::{OutputColumn, OutputSource},
        source::{JoinMode, JoinSource},
        spec::ViewSpec,
    },
};
use std::collections::HashMap;

impl ViewDefinition {
    /// Validates the definition and resolves every alias to its source index.
    pub fn resolve(&self) -> Result<ViewSpec, ViewError> {
        Resolver::new(self)?.resolve()
    }
}

impl TryFrom<ViewDefinition> for ViewSpec {
    type Error = ViewError;

    fn try_from(definition: ViewDefinition) -> Result<Self, Self::Error> {
        definition.resolve()
    }
}

/// Alias and literal symbol table for one definition.
struct Resolver<'a> {
    definition: &'a ViewDefinition,
    aliases: HashMap<&'a str, SourceIndex>,
    literals: HashMap<&'a str, &'a Literal>,
}

impl<'a> Resolver<'a> {
    fn new(definition: &'a ViewDefinition) -> Result<Self, ViewError> {
        let mut aliases = HashMap::new();
        for (i, source) in definition.sources.iter().enumerate() {
            if aliases
                .insert(source.alias.as_str(), SourceIndex::new(i))
                .is_some()
            {
                return Err(ViewError::DuplicateAlias(source.alias.clone()));
            }
        }

        let mut literals = HashMap::new();
        for literal in &definition.literals {
            if literals.insert(literal.id.as_str(), literal).is_some() {
                return Err(ViewError::DuplicateLiteral(literal.id.clone()));
            }
        }

        Ok(Self {
            definition,
            aliases,
            literals,
        })
    }

    fn resolve(&self) -> Result<ViewSpec, ViewError> {
        self.check_modes()?;

        let sources = self
            .definition
            .sources
            .iter()
            .enumerate()
            .map(|(i, source)| self.resolve_source(SourceIndex::new(i), source))
            .collect::<Result<Vec<_>, _>>()?;

        let columns = self
            .definition
            .columns
            .iter()
            .map(|column| self.resolve_column(column))
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(key) = &self.definition.key {
            if let Some(missing) = key.iter().find(|k| !columns.iter().any(|c| &c.name == *k)) {
                return Err(ViewError::UnknownKeyColumn(missing.clone()));
            }
        }

        Ok(ViewSpec {
            name: self.definition.name.clone(),
            sources,
            columns,
            filter: self.definition.filter.clone(),
            literals: self.definition.literals.clone(),
            key_override: self.definition.key.clone(),
        })
    }

    fn check_modes(&self) -> Result<(), ViewError> {
        let sources = &self.definition.sources;
        let first = sources
            .first()
            .ok_or_else(|| ViewError::NoSources(self.definition.name.clone()))?;

        if first.mode != JoinMode::Main {
            return Err(ViewError::MainNotFirst(first.alias.clone()));
        }

        if let Some(extra) = sources.iter().skip(1).find(|s| s.mode == JoinMode::Main) {
            return Err(ViewError::ExtraMain(extra.alias.clone()));
        }

        Ok(())
    }

    fn resolve_source(
        &self,
        index: SourceIndex,
        source: &SourceDefinition,
    ) -> Result<JoinSource, ViewError> {
        check_schema(&source.schema)?;

        let conditions = source
            .conditions
            .iter()
            .map(|condition| self.resolve_condition(index, source, condition))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(JoinSource {
            index,
            table: source.table.clone(),
            alias: Alias::new(source.alias.clone()),
            mode: source.mode,
            schema: source.schema.clone(),
            conditions,
        })
    }

    fn resolve_condition(
        &self,
        owner: SourceIndex,
        source: &SourceDefinition,
        condition: &ConditionDefinition,
    ) -> Result<JoinCondition, ViewError> {
        let side = |operand: &OperandDefinition| -> Result<Operand, ViewError> {
            match operand {
                OperandDefinition::Reference { alias, column } => {
                    let column = self.resolve_reference(alias, column)?;
                    if column.source > owner {
                        return Err(ViewError::ForwardReference {
                            owner: source.alias.clone(),
                            referenced: alias.clone(),
                        });
                    }
                    Ok(Operand::Reference(column))
                }
                OperandDefinition::Literal { id } => Ok(Operand::Literal(self.literal(id)?)),
            }
        };

        Ok(JoinCondition::new(
            side(&condition.left)?,
            side(&condition.right)?,
        ))
    }

    fn resolve_column(&self, column: &ColumnDefinition) -> Result<OutputColumn, ViewError> {
        let source = match &column.source {
            ColumnSourceDefinition::Reference { alias, column } => {
                OutputSource::Reference(self.resolve_reference(alias, column)?)
            }
            ColumnSourceDefinition::Computation {
                expression,
                literal,
            } => OutputSource::Computation {
                expression: expression.clone(),
                literal: literal.as_deref().map(|id| self.literal(id)).transpose()?,
            },
        };

        Ok(OutputColumn {
            name: column.name.clone(),
            source,
        })
    }

    fn resolve_reference(&self, alias: &str, column: &str) -> Result<ColumnRef, ViewError> {
        let index = *self
            .aliases
            .get(alias)
            .ok_or_else(|| ViewError::UnknownAlias(alias.to_string()))?;

        let schema = &self.definition.sources[index.get()].schema;
        if !schema.has_column(column) {
            return Err(ViewError::UnknownColumn {
                alias: alias.to_string(),
                column: column.to_string(),
            });
        }

        Ok(ColumnRef::new(index, column))
    }

    fn literal(&self, id: &str) -> Result<Literal, ViewError> {
        self.literals
            .get(id)
            .map(|l| (*l).clone())
            .ok_or_else(|| ViewError::UndeclaredLiteral(id.to_string()))
    }
}

fn check_schema(schema: &TableSchema) -> Result<(), ViewError> {
    if schema.primary_key.is_empty() {
        return Err(ViewError::EmptyPrimaryKey(schema.name.clone()));
    }

    if let Some(missing) = schema.primary_key.iter().find(|k| !schema.has_column(k)) {
        return Err(ViewError::MissingKeyColumn {
            table: schema.name.clone(),
            column: missing.clone(),
        });
    }

    Ok(())
}
