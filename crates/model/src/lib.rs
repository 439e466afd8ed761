//! Data model of incrementally maintained views: table schemas, join
//! sources, join conditions, literals and output columns.

pub mod core;
pub mod definition;
pub mod error;
pub mod view;

pub use crate::{
    core::{
        data_type::DataType,
        identifiers::{Alias, SourceIndex},
        schema::{Column, TableSchema},
    },
    definition::{ViewDefinition, builder::ViewBuilder},
    error::ViewError,
    view::{
        condition::{ColumnRef, JoinCondition, Literal, Operand},
        output::{OutputColumn, OutputSource},
        source::{JoinMode, JoinSource},
        spec::ViewSpec,
    },
};
