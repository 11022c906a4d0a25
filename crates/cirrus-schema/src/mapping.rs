//! Resolver mapping templates
//!
//! Each [`Operation`] gets a pure `(request, response)` template pair. The
//! request template rewrites schema field arguments into the backing
//! store's native operation format; the response template passes the
//! store's result back unmodified. No validation logic lives in templates:
//! argument presence is the query-language runtime's job, enforced through
//! the schema's `!` annotations.

use crate::document::Operation;
use crate::entity::Entity;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// One rendered transformation template body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingTemplate(String);

impl MappingTemplate {
    /// Wrap a rendered template body
    #[inline]
    #[must_use]
    pub fn from_body(body: impl Into<String>) -> Self {
        Self(body.into())
    }

    /// Template text
    #[inline]
    #[must_use]
    pub fn body(&self) -> &str {
        &self.0
    }
}

/// Request/response transformation pair binding one operation to the
/// backing store
///
/// - list-all performs an unconditional `Scan`: no filter and no pagination
///   token, so result size is unbounded (known limitation, kept because the
///   schema shape carries no page token)
/// - create performs `PutItem` with a server-generated key; the client
///   never supplies the identifier
/// - delete performs `DeleteItem` keyed verbatim on the identifier
///   argument, with no existence precondition: deleting an absent key
///   succeeds silently
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverMapping {
    operation: Operation,
    request_template: MappingTemplate,
    response_template: MappingTemplate,
    referenced_fields: Vec<String>,
}

impl ResolverMapping {
    /// Build the mapping for one operation of an entity
    #[must_use]
    pub fn for_operation(operation: Operation, entity: &Entity) -> Self {
        let (request, referenced_fields) = match operation {
            Operation::ListAll => (scan_request(), Vec::new()),
            Operation::Create => (
                put_request(entity),
                entity.field_names().into_iter().map(str::to_string).collect(),
            ),
            Operation::Delete => (delete_request(entity), vec![entity.id_field().to_string()]),
        };
        let response = match operation {
            Operation::ListAll => result_list_response(),
            Operation::Create | Operation::Delete => result_item_response(),
        };
        Self {
            operation,
            request_template: request,
            response_template: response,
            referenced_fields,
        }
    }

    /// The three mappings for an entity, in canonical operation order
    #[must_use]
    pub fn all_for_entity(entity: &Entity) -> Vec<Self> {
        Operation::ALL
            .iter()
            .map(|op| Self::for_operation(*op, entity))
            .collect()
    }

    /// Bound operation
    #[inline]
    #[must_use]
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Parent type of the bound schema field
    #[inline]
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.operation.type_name()
    }

    /// Bound schema field name
    #[inline]
    #[must_use]
    pub fn field_name(&self) -> &'static str {
        self.operation.field_name()
    }

    /// Request transformation template
    #[inline]
    #[must_use]
    pub fn request_template(&self) -> &MappingTemplate {
        &self.request_template
    }

    /// Response transformation template
    #[inline]
    #[must_use]
    pub fn response_template(&self) -> &MappingTemplate {
        &self.response_template
    }

    /// Entity fields the request template touches
    ///
    /// The stack assembler checks each of these against the schema document
    /// before synthesis; a dangling reference never reaches the engine.
    #[inline]
    #[must_use]
    pub fn referenced_fields(&self) -> &[String] {
        &self.referenced_fields
    }
}

fn scan_request() -> MappingTemplate {
    MappingTemplate::from_body(r#"{"version" : "2017-02-28", "operation" : "Scan"}"#)
}

fn put_request(entity: &Entity) -> MappingTemplate {
    let mut body = String::new();
    let _ = writeln!(body, "{{");
    let _ = writeln!(body, "  \"version\": \"2017-02-28\",");
    let _ = writeln!(body, "  \"operation\": \"PutItem\",");
    let _ = writeln!(body, "  \"key\": {{");
    let _ = writeln!(
        body,
        "    \"{}\": $util.dynamodb.toDynamoDBJson($util.autoId())",
        entity.id_field()
    );
    let _ = writeln!(body, "  }},");
    let _ = writeln!(body, "  \"attributeValues\": {{");
    let mut fields = entity.fields().iter().peekable();
    while let Some(field) = fields.next() {
        let comma = if fields.peek().is_some() { "," } else { "" };
        let _ = writeln!(
            body,
            "    \"{name}\": $util.dynamodb.toDynamoDBJson($ctx.args.{name}){comma}",
            name = field.name
        );
    }
    let _ = writeln!(body, "  }}");
    let _ = write!(body, "}}");
    MappingTemplate::from_body(body)
}

fn delete_request(entity: &Entity) -> MappingTemplate {
    let mut body = String::new();
    let _ = writeln!(body, "{{");
    let _ = writeln!(body, "  \"version\": \"2017-02-28\",");
    let _ = writeln!(body, "  \"operation\": \"DeleteItem\",");
    let _ = writeln!(body, "  \"key\": {{");
    let _ = writeln!(
        body,
        "    \"{id}\": $util.dynamodb.toDynamoDBJson($ctx.args.{id})",
        id = entity.id_field()
    );
    let _ = writeln!(body, "  }}");
    let _ = write!(body, "}}");
    MappingTemplate::from_body(body)
}

fn result_list_response() -> MappingTemplate {
    MappingTemplate::from_body("$util.toJson($ctx.result.items)")
}

fn result_item_response() -> MappingTemplate {
    MappingTemplate::from_body("$util.toJson($ctx.result)")
}
