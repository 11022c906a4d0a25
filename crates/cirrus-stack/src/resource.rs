//! Resource model
//!
//! Resources are static declarations: a kind, a logical id, and a bag of
//! provider properties. Dependency edges live in the builder's graph, not
//! on the resource itself, until validation materializes them.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Builder-scoped resource handle
///
/// Assigned sequentially at insertion; stable for the life of one builder
/// and cheap to copy into the dependency graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResourceId(u32);

impl ResourceId {
    #[inline]
    #[must_use]
    pub(crate) const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Positional index within the builder
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of infrastructure resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    /// API-key-authenticated GraphQL endpoint
    GraphqlApi,
    /// Schema document attached to the API
    ApiSchema,
    /// Static API key (dev-grade: no scopes, no rotation)
    ApiKey,
    /// Key-value table backing the entity
    Table,
    /// Service-assumable access role
    Role,
    /// Binding between API, table, and role
    DataSource,
    /// One operation's resolver
    Resolver,
}

impl ResourceKind {
    /// Provider type identifier emitted into templates
    #[inline]
    #[must_use]
    pub const fn type_id(self) -> &'static str {
        match self {
            Self::GraphqlApi => "graphql-api",
            Self::ApiSchema => "api-schema",
            Self::ApiKey => "api-key",
            Self::Table => "table",
            Self::Role => "role",
            Self::DataSource => "data-source",
            Self::Resolver => "resolver",
        }
    }
}

/// One declared resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub(crate) id: ResourceId,
    pub(crate) logical_id: String,
    pub(crate) kind: ResourceKind,
    pub(crate) properties: JsonValue,
}

impl Resource {
    /// Builder-scoped handle
    #[inline]
    #[must_use]
    pub fn id(&self) -> ResourceId {
        self.id
    }

    /// Logical id within the stack
    #[inline]
    #[must_use]
    pub fn logical_id(&self) -> &str {
        &self.logical_id
    }

    /// Resource kind
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Provider properties
    #[inline]
    #[must_use]
    pub fn properties(&self) -> &JsonValue {
        &self.properties
    }
}

/// Reference token for another resource's attribute, resolved by the
/// provisioning engine at apply time.
#[must_use]
pub(crate) fn reference(logical_id: &str, attribute: &str) -> String {
    format!("${{{logical_id}.{attribute}}}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_tokens_are_engine_resolvable() {
        assert_eq!(reference("ItemsTable", "arn"), "${ItemsTable.arn}");
    }

    #[test]
    fn kind_type_ids_are_distinct() {
        let kinds = [
            ResourceKind::GraphqlApi,
            ResourceKind::ApiSchema,
            ResourceKind::ApiKey,
            ResourceKind::Table,
            ResourceKind::Role,
            ResourceKind::DataSource,
            ResourceKind::Resolver,
        ];
        let mut ids: Vec<_> = kinds.iter().map(|k| k.type_id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), kinds.len());
    }
}
