//! Stack assembly errors

use crate::resource::ResourceId;
use cirrus_schema::Operation;
use thiserror::Error;

/// Errors raised during stack construction or validation
#[derive(Debug, Error)]
pub enum StackError {
    /// Two resources share a logical id
    #[error("duplicate logical id '{0}'")]
    DuplicateLogicalId(String),

    /// Dependency edge names a resource the builder never saw
    #[error("unknown resource {0}")]
    UnknownResource(ResourceId),

    /// A resource may not depend on itself
    #[error("resource {0} depends on itself")]
    SelfDependency(ResourceId),

    /// The same dependency edge was declared twice
    #[error("dependency {dependency} -> {dependent} already declared")]
    DuplicateDependency {
        dependency: ResourceId,
        dependent: ResourceId,
    },

    /// Edge would make the dependency graph cyclic
    #[error("dependency {dependency} -> {dependent} would create a cycle")]
    CycleDetected {
        dependency: ResourceId,
        dependent: ResourceId,
    },

    /// Stack declares resolvers but no schema document resource
    #[error("stack '{0}' has no schema resource")]
    MissingSchema(String),

    /// A stack carries exactly one schema document
    #[error("stack '{0}' declares more than one schema resource")]
    MultipleSchemas(String),

    /// Resolver lacks an ordering path from the schema resource
    #[error("resolver '{0}' is not ordered after the schema document")]
    ResolverBeforeSchema(String),

    /// Resolver mapping references a field the schema never declares
    #[error("resolver '{resolver}' references undeclared field '{field}'")]
    UndeclaredField { resolver: String, field: String },

    /// Two resolvers bind the same operation
    #[error("operation {0} is bound by more than one resolver")]
    DuplicateResolver(Operation),

    /// A declared operation has no resolver
    #[error("operation {0} has no resolver")]
    MissingResolver(Operation),

    /// Entity failed schema validation
    #[error(transparent)]
    Schema(#[from] cirrus_schema::SchemaError),

    /// Template serialization failure
    #[error("template serialization: {0}")]
    Serialization(#[from] serde_json::Error),
}
