use crate::core::identifiers::SourceIndex;
use serde::{Deserialize, Serialize};

/// A column of one join source, addressed by the source's position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnRef {
    pub source: SourceIndex,
    pub column: String,
}

impl ColumnRef {
    pub fn new(source: SourceIndex, column: impl Into<String>) -> Self {
        Self {
            source,
            column: column.into(),
        }
    }
}

/// Constant declared by a view. `id` is the stable name used when the
/// constant is re-emitted (e.g. as a bind parameter).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    pub id: String,
    pub value: String,
}

impl Literal {
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }
}

/// One side of a join condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operand {
    Reference(ColumnRef),
    Literal(Literal),
}

impl Operand {
    pub fn as_reference(&self) -> Option<&ColumnRef> {
        match self {
            Operand::Reference(r) => Some(r),
            Operand::Literal(_) => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Operand::Reference(_) => None,
            Operand::Literal(l) => Some(l),
        }
    }
}

/// Equality predicate `left = right` attached to the source that declared it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinCondition {
    pub left: Operand,
    pub right: Operand,
}

impl JoinCondition {
    pub fn new(left: Operand, right: Operand) -> Self {
        Self { left, right }
    }

    /// Both sides reference columns of two different sources.
    pub fn is_join(&self) -> bool {
        matches!(
            (&self.left, &self.right),
            (Operand::Reference(l), Operand::Reference(r)) if l.source != r.source
        )
    }

    pub fn references(&self) -> impl Iterator<Item = &ColumnRef> {
        [&self.left, &self.right]
            .into_iter()
            .filter_map(Operand::as_reference)
    }

    pub fn literals(&self) -> impl Iterator<Item = &Literal> {
        [&self.left, &self.right]
            .into_iter()
            .filter_map(Operand::as_literal)
    }

    /// Rewrites every referenced source position through `map`.
    pub fn retarget(&self, map: impl Fn(SourceIndex) -> SourceIndex) -> JoinCondition {
        let side = |operand: &Operand| match operand {
            Operand::Reference(r) => Operand::Reference(ColumnRef::new(map(r.source), &r.column)),
            Operand::Literal(l) => Operand::Literal(l.clone()),
        };

        JoinCondition {
            left: side(&self.left),
            right: side(&self.right),
        }
    }
}
