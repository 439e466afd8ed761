use crate::{
    error::PlanError,
    graph::{Graph, Guard},
    literals::Survivors,
    shortcut::Route,
};
use model::{
    core::identifiers::SourceIndex,
    view::{
        condition::{ColumnRef, JoinCondition, Literal, Operand},
        output::{OutputColumn, OutputSource},
        source::{JoinMode, JoinSource},
        spec::ViewSpec,
    },
};
use std::collections::HashSet;

/// What a slice has to produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SliceMode {
    /// Primary key of the MAIN source.
    KeyPath,
    /// Named columns of `target`; an empty list means every column and a
    /// repeated name is projected once.
    FieldExtract {
        target: SourceIndex,
        fields: Vec<String>,
    },
    /// The view's key override. Computed key columns are copied as they
    /// are, referenced ones are routed like any other column.
    ComputedKey,
}

/// One output column of a slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    /// Output `name` holds the target's `column`.
    Column { name: String, column: String },
    /// Output column taken verbatim from the view.
    Copied(OutputColumn),
}

/// Target source and output columns a [`SliceMode`] resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub target: SourceIndex,
    pub projections: Vec<Projection>,
}

impl Request {
    /// Distinct target columns the route has to provide.
    pub fn needed(&self) -> Vec<&str> {
        let mut needed: Vec<&str> = Vec::new();
        for projection in &self.projections {
            if let Projection::Column { column, .. } = projection
                && !needed.contains(&column.as_str())
            {
                needed.push(column);
            }
        }
        needed
    }
}

impl SliceMode {
    /// Resolves the mode against `view`, validating requested fields.
    pub fn request(&self, view: &ViewSpec) -> Result<Request, PlanError> {
        match self {
            SliceMode::KeyPath => Ok(Request {
                target: SourceIndex::MAIN,
                projections: view
                    .main()
                    .ok_or_else(|| no_sources(view))?
                    .schema
                    .primary_key
                    .iter()
                    .map(|key| Projection::Column {
                        name: key.clone(),
                        column: key.clone(),
                    })
                    .collect(),
            }),
            SliceMode::FieldExtract { target, fields } => {
                let source = view.source(*target).ok_or_else(|| {
                    PlanError::InvalidArgument(format!("no source at position {target}"))
                })?;

                let projections = if fields.is_empty() {
                    source
                        .schema
                        .column_names()
                        .map(|c| Projection::Column {
                            name: c.to_string(),
                            column: c.to_string(),
                        })
                        .collect()
                } else {
                    let mut seen = HashSet::new();
                    fields
                        .iter()
                        .filter(|field| seen.insert(field.as_str()))
                        .map(|field| {
                            if !source.schema.has_column(field) {
                                return Err(PlanError::UnknownField {
                                    alias: source.alias.to_string(),
                                    field: field.clone(),
                                });
                            }
                            Ok(Projection::Column {
                                name: field.clone(),
                                column: field.clone(),
                            })
                        })
                        .collect::<Result<Vec<_>, _>>()?
                };

                Ok(Request {
                    target: *target,
                    projections,
                })
            }
            SliceMode::ComputedKey => computed_key_request(view),
        }
    }
}

fn no_sources(view: &ViewSpec) -> PlanError {
    PlanError::InvalidArgument(format!("view `{}` has no sources", view.name))
}

fn computed_key_request(view: &ViewSpec) -> Result<Request, PlanError> {
    let names = view.key_override.as_ref().ok_or_else(|| {
        PlanError::InvalidArgument(format!("view `{}` declares no key override", view.name))
    })?;

    if names.is_empty() {
        return Err(PlanError::InvalidArgument(format!(
            "key override of view `{}` names no columns",
            view.name
        )));
    }

    let mut target: Option<SourceIndex> = None;
    let mut projections = Vec::with_capacity(names.len());

    for name in names {
        let column = view.column(name).ok_or_else(|| {
            PlanError::InvalidArgument(format!("key column `{name}` is not an output column"))
        })?;

        match &column.source {
            OutputSource::Computation { .. } => projections.push(Projection::Copied(column.clone())),
            OutputSource::Reference(reference) => {
                match target {
                    Some(t) if t != reference.source => {
                        return Err(PlanError::InvalidArgument(format!(
                            "key columns of view `{}` reference more than one source",
                            view.name
                        )));
                    }
                    _ => target = Some(reference.source),
                }

                projections.push(Projection::Column {
                    name: column.name.clone(),
                    column: reference.column.clone(),
                });
            }
        }
    }

    Ok(Request {
        target: target.unwrap_or(SourceIndex::MAIN),
        projections,
    })
}

/// Assembles the slice for `route`.
///
/// Sources keep their aliases, tables and schemas; the first one becomes
/// MAIN and every other one an INNER join. Each joined source carries the
/// column pairs of the edge leading to it followed by its retained guards,
/// all re-targeted to the new positions.
pub fn build_slice(
    view: &ViewSpec,
    graph: &Graph,
    route: &Route,
    survivors: &Survivors,
    kept: &[&Guard],
    request: &Request,
) -> Result<ViewSpec, PlanError> {
    let mut sources: Vec<JoinSource> = Vec::with_capacity(survivors.len());
    let mut previous: Option<SourceIndex> = None;

    for node in survivors.iter() {
        let original = view
            .source(node)
            .ok_or_else(|| PlanError::BrokenRoute(format!("no source at position {node}")))?;
        let position = SourceIndex::new(sources.len());
        let mut conditions = Vec::new();

        if let (Route::Join(_), Some(prev)) = (route, previous) {
            let edge = graph.edge_between(prev, node).ok_or_else(|| {
                PlanError::BrokenRoute(format!("no join between {prev} and {node}"))
            })?;

            for pair in &edge.pairs {
                let condition = JoinCondition::new(
                    Operand::Reference(pair.left.clone()),
                    Operand::Reference(pair.right.clone()),
                );
                conditions.push(retarget(&condition, survivors)?);
            }
        }

        for guard in kept.iter().filter(|g| g.owner == node) {
            conditions.push(retarget(&guard.condition, survivors)?);
        }

        sources.push(JoinSource {
            index: position,
            table: original.table.clone(),
            alias: original.alias.clone(),
            mode: if position.is_main() {
                JoinMode::Main
            } else {
                JoinMode::Inner
            },
            schema: original.schema.clone(),
            conditions,
        });
        previous = Some(node);
    }

    let columns = request
        .projections
        .iter()
        .map(|projection| project(projection, route, survivors))
        .collect::<Result<Vec<_>, _>>()?;

    let literals = collect_literals(&sources, &columns);

    Ok(ViewSpec {
        name: view.name.clone(),
        sources,
        columns,
        filter: None,
        literals,
        key_override: None,
    })
}

fn project(
    projection: &Projection,
    route: &Route,
    survivors: &Survivors,
) -> Result<OutputColumn, PlanError> {
    match projection {
        Projection::Column { name, column } => {
            let (node, source_column) = route
                .locate(column)
                .ok_or_else(|| PlanError::BrokenRoute(format!("column `{column}` is not routed")))?;
            let position = survivors.position(node).ok_or_else(|| {
                PlanError::BrokenRoute(format!("column `{column}` is read from a dropped source"))
            })?;

            Ok(OutputColumn::reference(
                name.clone(),
                ColumnRef::new(position, source_column),
            ))
        }
        Projection::Copied(column) => Ok(column.clone()),
    }
}

fn retarget(condition: &JoinCondition, survivors: &Survivors) -> Result<JoinCondition, PlanError> {
    if let Some(missing) = condition
        .references()
        .find(|r| !survivors.contains(r.source))
    {
        return Err(PlanError::BrokenRoute(format!(
            "condition references dropped source {}",
            missing.source
        )));
    }

    Ok(condition.retarget(|s| survivors.position(s).unwrap_or(s)))
}

/// Literals used by the slice, first use first, one entry per identity.
fn collect_literals(sources: &[JoinSource], columns: &[OutputColumn]) -> Vec<Literal> {
    let from_conditions = sources
        .iter()
        .flat_map(|s| s.conditions.iter())
        .flat_map(|c| c.literals());
    let from_columns = columns.iter().filter_map(|c| match &c.source {
        OutputSource::Computation { literal, .. } => literal.as_ref(),
        OutputSource::Reference(_) => None,
    });

    let mut literals: Vec<Literal> = Vec::new();
    for literal in from_conditions.chain(from_columns) {
        if !literals.iter().any(|l| l.id == literal.id) {
            literals.push(literal.clone());
        }
    }
    literals
}

/// Stable digest of a slice, identical for structurally equal slices.
pub fn fingerprint(slice: &ViewSpec) -> Result<String, serde_json::Error> {
    let serialized = serde_json::to_string(slice)?;
    Ok(format!("{:x}", md5::compute(serialized)))
}
