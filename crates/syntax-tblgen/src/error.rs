use std::path::PathBuf;

use crate::dispatch::{Action, Target};

/// The schema is unreadable or inconsistent with what the generator expects.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("failed to read schema {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed schema: {0}")]
    Json(#[from] serde_json::Error),
    #[error("`{referenced_by}` refers to unknown class `{class}`")]
    UnknownClass {
        referenced_by: String,
        class: String,
    },
    #[error("`{record}.{field}` refers to unknown definition `{def}`")]
    UnknownDef {
        record: String,
        field: String,
        def: String,
    },
    #[error("`{record}` has no field `{field}`")]
    MissingField { record: String, field: String },
    #[error("`{record}.{field}` is not a {expected}")]
    FieldType {
        record: String,
        field: String,
        expected: &'static str,
    },
    #[error("`{name}` in `{record}` is not usable as a Rust identifier")]
    InvalidName { record: String, name: String },
    #[error("`{record}` does not derive from any syntax category")]
    Uncategorized { record: String },
}

/// Generation was refused or failed. Nothing is emitted when this is returned.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    #[error("{0} is an unknown category")]
    UnknownCategory(String),
    #[error("{action} generation for {target} is not implemented yet")]
    NotImplemented { target: Target, action: Action },
    #[error("invalid runtime crate path `{path}`: {source}")]
    RuntimePath {
        path: String,
        #[source]
        source: syn::Error,
    },
    #[error("generated code for `{node}` does not parse: {source}")]
    Unparsable {
        node: String,
        #[source]
        source: syn::Error,
    },
    #[error(transparent)]
    Schema(#[from] SchemaError),
}
