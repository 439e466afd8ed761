use thiserror::Error;

/// Reasons a view definition cannot be resolved into a [`ViewSpec`](crate::view::spec::ViewSpec).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("view `{0}` declares no sources")]
    NoSources(String),

    #[error("first source `{0}` must be the MAIN source")]
    MainNotFirst(String),

    #[error("source `{0}` is declared MAIN but only the first source may be")]
    ExtraMain(String),

    #[error("duplicate alias `{0}`")]
    DuplicateAlias(String),

    #[error("unknown alias `{0}`")]
    UnknownAlias(String),

    #[error("condition on `{owner}` references `{referenced}`, which is declared later")]
    ForwardReference { owner: String, referenced: String },

    #[error("column `{column}` does not exist in `{alias}`")]
    UnknownColumn { alias: String, column: String },

    #[error("table `{0}` has no primary key")]
    EmptyPrimaryKey(String),

    #[error("primary key column `{column}` is missing from table `{table}`")]
    MissingKeyColumn { table: String, column: String },

    #[error("literal `{0}` is not declared by the view")]
    UndeclaredLiteral(String),

    #[error("literal `{0}` is declared twice")]
    DuplicateLiteral(String),

    #[error("key override names unknown output column `{0}`")]
    UnknownKeyColumn(String),

    #[error("failed to decode view definition: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for ViewError {
    fn from(err: serde_json::Error) -> Self {
        ViewError::Decode(err.to_string())
    }
}
