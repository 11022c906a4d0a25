//! Schema-level errors

use thiserror::Error;

/// Errors raised while validating an entity or rendering its schema
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Entity type name is not a valid GraphQL type identifier
    #[error("invalid entity type name '{0}': must be UpperCamel, alphanumeric")]
    InvalidTypeName(String),

    /// Field name is not a valid GraphQL field identifier
    #[error("invalid field name '{0}': must start lowercase, alphanumeric")]
    InvalidFieldName(String),

    /// Two fields share a name
    #[error("duplicate field '{0}'")]
    DuplicateField(String),

    /// A declared field collides with the identifier field
    #[error("field '{0}' collides with the entity identifier field")]
    IdFieldCollision(String),

    /// Declared fields may not use the Id kind; the identifier is implicit
    #[error("field '{0}' declares the Id kind; the identifier field is implicit")]
    ExplicitIdField(String),

    /// Entity has no identifier field name
    #[error("entity '{0}' has an empty identifier field name")]
    MissingIdField(String),
}
