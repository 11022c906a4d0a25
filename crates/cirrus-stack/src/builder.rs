//! Stack builder (construction phase) and validated stack
//!
//! Usage:
//! ```rust,ignore
//! let mut builder = StackBuilder::new("Dev-ItemApi");
//! let api = builder.add_resource("Api", ResourceKind::GraphqlApi, props)?;
//! let schema = builder.add_schema("Schema", document)?;
//! builder.depends_on(schema, api)?;
//! let validated: ValidatedStack = builder.validate()?;
//! ```

use crate::error::StackError;
use crate::resource::{Resource, ResourceId, ResourceKind};
use crate::template::DeploymentTemplate;
use cirrus_schema::{Operation, ResolverMapping, SchemaDocument};
use petgraph::algo::{has_path_connecting, is_cyclic_directed, toposort};
use petgraph::graphmap::DiGraphMap;
use petgraph::Direction;
use serde_json::json;
use tracing::{debug, info};

/// Builder for one stack's resources and dependency edges
pub struct StackBuilder {
    stack_name: String,
    resources: Vec<Resource>,
    graph: DiGraphMap<ResourceId, ()>,
    schema: Option<(ResourceId, SchemaDocument)>,
    resolvers: Vec<(ResourceId, ResolverMapping)>,
}

impl StackBuilder {
    /// Create a new builder for the named stack
    #[must_use]
    pub fn new(stack_name: impl Into<String>) -> Self {
        Self {
            stack_name: stack_name.into(),
            resources: Vec::new(),
            graph: DiGraphMap::new(),
            schema: None,
            resolvers: Vec::new(),
        }
    }

    /// Stack name
    #[inline]
    #[must_use]
    pub fn stack_name(&self) -> &str {
        &self.stack_name
    }

    /// Number of declared resources
    #[inline]
    #[must_use]
    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    /// Number of dependency edges
    #[inline]
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Declare a resource
    ///
    /// # Errors
    /// Rejects duplicate logical ids.
    pub fn add_resource(
        &mut self,
        logical_id: impl Into<String>,
        kind: ResourceKind,
        properties: serde_json::Value,
    ) -> Result<ResourceId, StackError> {
        let logical_id = logical_id.into();
        if self.resources.iter().any(|r| r.logical_id == logical_id) {
            return Err(StackError::DuplicateLogicalId(logical_id));
        }
        let id = ResourceId::new(u32::try_from(self.resources.len()).unwrap_or(u32::MAX));
        debug!(stack = %self.stack_name, resource = %logical_id, kind = kind.type_id(), "add resource");
        self.resources.push(Resource {
            id,
            logical_id,
            kind,
            properties,
        });
        self.graph.add_node(id);
        Ok(id)
    }

    /// Declare the stack's schema document resource
    ///
    /// # Errors
    /// A stack carries exactly one schema; a second call is rejected.
    pub fn add_schema(
        &mut self,
        logical_id: impl Into<String>,
        document: SchemaDocument,
    ) -> Result<ResourceId, StackError> {
        if self.schema.is_some() {
            return Err(StackError::MultipleSchemas(self.stack_name.clone()));
        }
        let properties = json!({ "definition": document.sdl() });
        let id = self.add_resource(logical_id, ResourceKind::ApiSchema, properties)?;
        self.schema = Some((id, document));
        Ok(id)
    }

    /// Declare a resolver resource for one operation's mapping
    ///
    /// The caller still wires dependency edges; validation enforces that an
    /// ordering path from the schema exists.
    ///
    /// # Errors
    /// Rejects duplicate logical ids.
    pub fn add_resolver(
        &mut self,
        logical_id: impl Into<String>,
        mapping: ResolverMapping,
        extra_properties: serde_json::Value,
    ) -> Result<ResourceId, StackError> {
        let mut properties = json!({
            "type_name": mapping.type_name(),
            "field_name": mapping.field_name(),
            "request_mapping_template": mapping.request_template().body(),
            "response_mapping_template": mapping.response_template().body(),
        });
        if let (Some(obj), Some(extra)) = (properties.as_object_mut(), extra_properties.as_object())
        {
            for (k, v) in extra {
                obj.insert(k.clone(), v.clone());
            }
        }
        let id = self.add_resource(logical_id, ResourceKind::Resolver, properties)?;
        self.resolvers.push((id, mapping));
        Ok(id)
    }

    /// Declare that `dependent` deploys only after `dependency`
    ///
    /// # Errors
    /// Rejects unknown resources, self-loops, duplicate edges, and any edge
    /// that would make the graph cyclic.
    pub fn depends_on(
        &mut self,
        dependent: ResourceId,
        dependency: ResourceId,
    ) -> Result<(), StackError> {
        if !self.graph.contains_node(dependent) {
            return Err(StackError::UnknownResource(dependent));
        }
        if !self.graph.contains_node(dependency) {
            return Err(StackError::UnknownResource(dependency));
        }
        if dependent == dependency {
            return Err(StackError::SelfDependency(dependent));
        }
        if self.graph.contains_edge(dependency, dependent) {
            return Err(StackError::DuplicateDependency {
                dependency,
                dependent,
            });
        }

        self.graph.add_edge(dependency, dependent, ());
        if is_cyclic_directed(&self.graph) {
            self.graph.remove_edge(dependency, dependent);
            return Err(StackError::CycleDetected {
                dependency,
                dependent,
            });
        }
        Ok(())
    }

    /// Validate the stack, producing a deployable ordering
    ///
    /// # Errors
    /// - resolvers without a schema resource, or an operation bound twice
    ///   or not at all
    /// - a resolver with no ordering path from the schema
    /// - a mapping referencing a field the schema never declares
    pub fn validate(self) -> Result<ValidatedStack, StackError> {
        let deploy_order = toposort(&self.graph, None).map_err(|cycle| {
            // Unreachable when edges came through depends_on; kept for parity
            // with direct graph mutation during tests.
            StackError::CycleDetected {
                dependency: cycle.node_id(),
                dependent: cycle.node_id(),
            }
        })?;

        if !self.resolvers.is_empty() || self.schema.is_some() {
            let (schema_id, document) = self
                .schema
                .as_ref()
                .ok_or_else(|| StackError::MissingSchema(self.stack_name.clone()))?;

            let mut bound: Vec<Operation> = Vec::with_capacity(self.resolvers.len());
            for (resolver_id, mapping) in &self.resolvers {
                let logical = self.logical_of(*resolver_id);

                if bound.contains(&mapping.operation()) {
                    return Err(StackError::DuplicateResolver(mapping.operation()));
                }
                bound.push(mapping.operation());

                if !has_path_connecting(&self.graph, *schema_id, *resolver_id, None) {
                    return Err(StackError::ResolverBeforeSchema(logical.to_string()));
                }

                if !document.declares_field(mapping.type_name(), mapping.field_name()) {
                    return Err(StackError::UndeclaredField {
                        resolver: logical.to_string(),
                        field: format!("{}.{}", mapping.type_name(), mapping.field_name()),
                    });
                }
                for field in mapping.referenced_fields() {
                    if !document.declares_field(document.entity_type(), field) {
                        return Err(StackError::UndeclaredField {
                            resolver: logical.to_string(),
                            field: field.clone(),
                        });
                    }
                }
            }
            for op in Operation::ALL {
                if !bound.contains(&op) {
                    return Err(StackError::MissingResolver(op));
                }
            }
        }

        // Direct dependencies per resource, ordered by insertion for
        // deterministic templates.
        let depends_on = self
            .resources
            .iter()
            .map(|r| {
                let mut deps: Vec<ResourceId> = self
                    .graph
                    .neighbors_directed(r.id, Direction::Incoming)
                    .collect();
                deps.sort_unstable();
                deps.iter().map(|d| self.logical_of(*d).to_string()).collect()
            })
            .collect();

        info!(
            stack = %self.stack_name,
            resources = self.resources.len(),
            edges = self.graph.edge_count(),
            "stack validated"
        );

        Ok(ValidatedStack {
            stack_name: self.stack_name,
            resources: self.resources,
            deploy_order,
            depends_on,
            schema: self.schema.map(|(_, doc)| doc),
        })
    }

    fn logical_of(&self, id: ResourceId) -> &str {
        &self.resources[id.index()].logical_id
    }
}

/// A stack whose structure passed validation
///
/// Immutable; the only things it can do are answer queries and render a
/// [`DeploymentTemplate`].
#[derive(Debug, Clone)]
pub struct ValidatedStack {
    stack_name: String,
    resources: Vec<Resource>,
    deploy_order: Vec<ResourceId>,
    depends_on: Vec<Vec<String>>,
    schema: Option<SchemaDocument>,
}

impl ValidatedStack {
    /// Stack name
    #[inline]
    #[must_use]
    pub fn stack_name(&self) -> &str {
        &self.stack_name
    }

    /// Declared resources in insertion order
    #[inline]
    #[must_use]
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Resource lookup by handle
    #[inline]
    #[must_use]
    pub fn resource(&self, id: ResourceId) -> &Resource {
        &self.resources[id.index()]
    }

    /// Direct dependencies of a resource, as logical ids
    #[inline]
    #[must_use]
    pub fn dependencies_of(&self, id: ResourceId) -> &[String] {
        &self.depends_on[id.index()]
    }

    /// Topological deployment order
    #[inline]
    #[must_use]
    pub fn deploy_order(&self) -> &[ResourceId] {
        &self.deploy_order
    }

    /// The stack's schema document, if one was declared
    #[inline]
    #[must_use]
    pub fn schema_document(&self) -> Option<&SchemaDocument> {
        self.schema.as_ref()
    }

    /// Resolver resources in insertion order
    #[must_use]
    pub fn resolvers(&self) -> Vec<&Resource> {
        self.resources
            .iter()
            .filter(|r| r.kind == ResourceKind::Resolver)
            .collect()
    }

    /// Render the deployment template
    #[must_use]
    pub fn to_template(&self) -> DeploymentTemplate {
        DeploymentTemplate::from_stack(self)
    }
}
