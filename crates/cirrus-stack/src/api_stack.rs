//! Canonical API stack assembly
//!
//! One entity, one environment scope, one isolated stack instance: the
//! GraphQL API with its key and schema, the backing table, a scoped access
//! role, the data-source binding, and the three resolvers. Resources and
//! edges are deterministic functions of the entity, so identical inputs
//! always assemble identical stacks.

use crate::builder::{StackBuilder, ValidatedStack};
use crate::error::StackError;
use crate::resource::{reference, ResourceKind};
use cirrus_schema::{Entity, ResolverMapping, SchemaDocument};
use serde_json::json;
use tracing::debug;

/// Assembler for one environment's API stack
pub struct ApiStack;

impl ApiStack {
    /// Environment-qualified stack name (`Dev-ItemApi`)
    #[must_use]
    pub fn stack_name(entity: &Entity, scope: &str) -> String {
        format!("{scope}-{}Api", entity.name())
    }

    /// Assemble and validate the stack for one environment scope
    ///
    /// Dependency order declared here is the one concurrency-adjacent
    /// invariant of the whole system: every resolver deploys only after
    /// the schema document, because resolver validation on the provider
    /// side reads fields the schema must already have registered.
    ///
    /// # Errors
    /// Returns [`StackError`] if the entity is invalid or any stack
    /// invariant fails (the latter would be a construction bug here, not
    /// caller misuse).
    pub fn assemble(entity: &Entity, scope: &str) -> Result<ValidatedStack, StackError> {
        let document = SchemaDocument::for_entity(entity)?;
        let collection = format!("{}s", entity.name());
        let mut builder = StackBuilder::new(Self::stack_name(entity, scope));

        let api = builder.add_resource(
            "Api",
            ResourceKind::GraphqlApi,
            json!({
                "name": format!("{}-api", collection.to_lowercase()),
                "authentication": { "type": "API_KEY" },
            }),
        )?;

        let schema = builder.add_schema("Schema", document)?;
        builder.depends_on(schema, api)?;

        // Single static key, no scopes, no expiry. Dev-grade posture.
        let api_key = builder.add_resource(
            "ApiKey",
            ResourceKind::ApiKey,
            json!({
                "api": reference("Api", "id"),
                "description": format!("{collection} API dev key"),
            }),
        )?;
        builder.depends_on(api_key, api)?;

        let table_logical = format!("{collection}Table");
        let table = builder.add_resource(
            table_logical.clone(),
            ResourceKind::Table,
            json!({
                "partition_key": { "name": entity.id_field(), "type": "S" },
                "billing_mode": "PAY_PER_REQUEST",
                "stream": { "view_type": "NEW_IMAGE" },
                "removal_policy": "DESTROY",
            }),
        )?;

        // Scoped to the one table and the three store operations the
        // resolvers issue. The role references the table's ARN, so it
        // deploys after the table.
        let role = builder.add_resource(
            format!("{table_logical}Role"),
            ResourceKind::Role,
            json!({
                "assumed_by": { "service": "appsync.amazonaws.com" },
                "policy": {
                    "actions": ["dynamodb:Scan", "dynamodb:PutItem", "dynamodb:DeleteItem"],
                    "resources": [reference(&table_logical, "arn")],
                },
            }),
        )?;
        builder.depends_on(role, table)?;

        let data_source = builder.add_resource(
            format!("{collection}DataSource"),
            ResourceKind::DataSource,
            json!({
                "api": reference("Api", "id"),
                "type": "AMAZON_DYNAMODB",
                "table": reference(&table_logical, "name"),
                "role": reference(&format!("{table_logical}Role"), "arn"),
            }),
        )?;
        builder.depends_on(data_source, api)?;
        builder.depends_on(data_source, table)?;
        builder.depends_on(data_source, role)?;

        for mapping in ResolverMapping::all_for_entity(entity) {
            let logical = format!(
                "{}{}Resolver",
                mapping.type_name(),
                capitalize(mapping.field_name())
            );
            debug!(stack = %builder.stack_name(), resolver = %logical, "bind resolver");
            let resolver = builder.add_resolver(
                logical,
                mapping,
                json!({
                    "api": reference("Api", "id"),
                    "data_source": reference(&format!("{collection}DataSource"), "name"),
                }),
            )?;
            builder.depends_on(resolver, schema)?;
            builder.depends_on(resolver, data_source)?;
        }

        builder.validate()
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
