//! Error types for the content type schema

use thiserror::Error;

use crate::types::{BaseContentType, DataType, FieldKind};

/// Result type for schema operations
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Errors raised while building fields, field sets and content types.
///
/// Every variant is a deterministic validation failure detected at
/// construction or attachment time. None of them are worth retrying.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A required attribute was absent or empty
    #[error("missing required attribute: {attribute}")]
    MissingAttribute { attribute: &'static str },

    /// The data type is not in the accepted set of the field kind
    #[error("field '{variable}': data type {data_type} is not accepted by {kind}")]
    InvalidDataType {
        variable: String,
        data_type: DataType,
        kind: FieldKind,
    },

    /// The variable is not a valid identifier
    #[error("invalid variable name: '{variable}'")]
    InvalidVariableName { variable: String },

    /// More than one field of a one-per-content-type kind
    #[error("only one {kind} is allowed per content type")]
    DuplicateOnePerContentTypeField { kind: FieldKind },

    /// Two fields share a variable
    #[error("duplicate field variable: {variable}")]
    DuplicateVariable { variable: String },

    /// Two fields share a sort order
    #[error("duplicate sort order: {sort_order}")]
    DuplicateSortOrder { sort_order: i32 },

    /// No sort order is left after the highest one in the set
    #[error("no sort order available after {sort_order}")]
    SortOrderOverflow { sort_order: i32 },

    /// A vanity URL action value outside the closed set of codes
    #[error("unknown vanity url action: '{value}'")]
    UnknownAction { value: String },

    /// No content type variant exists for the base type
    #[error("unsupported base content type: {base_type:?}")]
    UnsupportedBaseType { base_type: BaseContentType },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}
