//! Schema document rendering
//!
//! Projects an [`Entity`] into SDL: one object type, one `Query` type with
//! `all`, one `Mutation` type with `save` and `delete`. The document always
//! declares exactly these three operations. Resolver mappings are checked
//! against the rendered document before anything reaches the provisioning
//! engine, so a dangling field reference fails at synthesis time.

use crate::entity::Entity;
use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// The fixed set of schema operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// `Query.all` — unconditional full-collection read
    ListAll,
    /// `Mutation.save` — create with a server-generated identifier
    Create,
    /// `Mutation.delete` — idempotent delete by identifier
    Delete,
}

impl Operation {
    /// Canonical ordered set of operations
    pub const ALL: [Self; 3] = [Self::ListAll, Self::Create, Self::Delete];

    /// Schema field name this operation binds to
    #[inline]
    #[must_use]
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::ListAll => "all",
            Self::Create => "save",
            Self::Delete => "delete",
        }
    }

    /// Parent type of the bound field
    #[inline]
    #[must_use]
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::ListAll => "Query",
            Self::Create | Self::Delete => "Mutation",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.type_name(), self.field_name())
    }
}

/// Rendered schema document for one entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDocument {
    entity_type: String,
    entity_fields: Vec<String>,
    sdl: String,
}

impl SchemaDocument {
    /// Render the schema document for an entity
    ///
    /// Object type fields carry `!` per their declared requiredness; the
    /// identifier is always `ID!`. `save` arguments are always non-null
    /// (create needs every declared field), `delete` takes the identifier.
    ///
    /// # Errors
    /// Returns [`SchemaError`] if the entity fails validation.
    pub fn for_entity(entity: &Entity) -> Result<Self, SchemaError> {
        entity.validate()?;

        let name = entity.name();
        let mut sdl = String::new();

        let _ = writeln!(sdl, "type {name} {{");
        let _ = writeln!(sdl, "  {}: ID!", entity.id_field());
        for field in entity.fields() {
            let bang = if field.required { "!" } else { "" };
            let _ = writeln!(sdl, "  {}: {}{bang}", field.name, field.kind.graphql_type());
        }
        let _ = writeln!(sdl, "}}");
        let _ = writeln!(sdl);

        let _ = writeln!(sdl, "type Query {{");
        let _ = writeln!(sdl, "  all: [{name}]");
        let _ = writeln!(sdl, "}}");
        let _ = writeln!(sdl);

        let save_args = entity
            .fields()
            .iter()
            .map(|f| format!("{}: {}!", f.name, f.kind.graphql_type()))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(sdl, "type Mutation {{");
        if save_args.is_empty() {
            let _ = writeln!(sdl, "  save: {name}");
        } else {
            let _ = writeln!(sdl, "  save({save_args}): {name}");
        }
        let _ = writeln!(sdl, "  delete({}: ID!): {name}", entity.id_field());
        let _ = writeln!(sdl, "}}");

        Ok(Self {
            entity_type: name.to_string(),
            entity_fields: entity
                .field_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
            sdl,
        })
    }

    /// The rendered SDL text
    #[inline]
    #[must_use]
    pub fn sdl(&self) -> &str {
        &self.sdl
    }

    /// Entity object type name
    #[inline]
    #[must_use]
    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    /// Operations the document declares (always exactly three)
    #[inline]
    #[must_use]
    pub fn operations(&self) -> &'static [Operation] {
        &Operation::ALL
    }

    /// Whether `type_name.field_name` exists in the document
    #[must_use]
    pub fn declares_field(&self, type_name: &str, field_name: &str) -> bool {
        if type_name == self.entity_type {
            return self.entity_fields.iter().any(|f| f == field_name);
        }
        Operation::ALL
            .iter()
            .any(|op| op.type_name() == type_name && op.field_name() == field_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Field, FieldKind};
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_item_schema() {
        let doc = SchemaDocument::for_entity(&Entity::item()).unwrap();
        let expected = "\
type Item {
  itemsId: ID!
  name: String
}

type Query {
  all: [Item]
}

type Mutation {
  save(name: String!): Item
  delete(itemsId: ID!): Item
}
";
        assert_eq!(doc.sdl(), expected);
    }

    #[test]
    fn declares_exactly_three_operations() {
        let doc = SchemaDocument::for_entity(&Entity::item()).unwrap();
        assert_eq!(doc.operations().len(), 3);
        assert!(doc.declares_field("Query", "all"));
        assert!(doc.declares_field("Mutation", "save"));
        assert!(doc.declares_field("Mutation", "delete"));
        assert!(!doc.declares_field("Query", "get"));
        assert!(!doc.declares_field("Subscription", "all"));
    }

    #[test]
    fn declares_entity_fields() {
        let doc = SchemaDocument::for_entity(&Entity::item()).unwrap();
        assert!(doc.declares_field("Item", "itemsId"));
        assert!(doc.declares_field("Item", "name"));
        assert!(!doc.declares_field("Item", "missing"));
    }

    #[test]
    fn required_field_renders_bang() {
        let entity =
            Entity::new("Widget", "widgetId").field(Field::new("label", FieldKind::String).required());
        let doc = SchemaDocument::for_entity(&entity).unwrap();
        assert!(doc.sdl().contains("label: String!"));
    }

    #[test]
    fn invalid_entity_is_rejected() {
        let entity = Entity::new("bad", "itemsId");
        assert!(SchemaDocument::for_entity(&entity).is_err());
    }

    #[test]
    fn operation_display_is_type_qualified() {
        assert_eq!(Operation::ListAll.to_string(), "Query.all");
        assert_eq!(Operation::Create.to_string(), "Mutation.save");
        assert_eq!(Operation::Delete.to_string(), "Mutation.delete");
    }
}
