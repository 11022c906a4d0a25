//! Entity model
//!
//! An [`Entity`] is the single business object a stack manages. It carries
//! an implicit server-generated identifier field plus a list of declared
//! scalar fields. The identifier is immutable once assigned; uniqueness is
//! the backing table's key constraint, not ours.

use crate::error::SchemaError;
use serde::{Deserialize, Serialize};

/// Scalar kind of a declared field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Opaque unique identifier (implicit; rejected on declared fields)
    Id,
    /// UTF-8 string
    String,
    /// Signed integer
    Int,
    /// Double-precision float
    Float,
    /// Boolean
    Boolean,
}

impl FieldKind {
    /// GraphQL scalar name for this kind
    #[inline]
    #[must_use]
    pub const fn graphql_type(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::String => "String",
            Self::Int => "Int",
            Self::Float => "Float",
            Self::Boolean => "Boolean",
        }
    }
}

/// One declared entity field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field name (lowerCamel GraphQL identifier)
    pub name: String,
    /// Scalar kind
    pub kind: FieldKind,
    /// Whether the field is required on create (`!` in SDL)
    #[serde(default)]
    pub required: bool,
}

impl Field {
    /// Create a new optional field
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
        }
    }

    /// Mark the field required on create
    #[inline]
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// The business object managed by one stack instance
///
/// # Invariants
/// - `id_field` is server-generated on create and immutable afterwards
/// - declared fields never shadow `id_field`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    name: String,
    id_field: String,
    #[serde(default)]
    fields: Vec<Field>,
}

impl Entity {
    /// Create a new entity with the given type name and identifier field
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, id_field: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id_field: id_field.into(),
            fields: Vec::new(),
        }
    }

    /// The default shipped entity: `Item` keyed by `itemsId` with an
    /// optional `name` string field.
    #[inline]
    #[must_use]
    pub fn item() -> Self {
        Self::new("Item", "itemsId").field(Field::new("name", FieldKind::String))
    }

    /// Add a declared field
    #[inline]
    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Entity type name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identifier field name
    #[inline]
    #[must_use]
    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    /// Declared fields, excluding the identifier
    #[inline]
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// All field names the rendered object type declares, identifier first
    #[must_use]
    pub fn field_names(&self) -> Vec<&str> {
        std::iter::once(self.id_field.as_str())
            .chain(self.fields.iter().map(|f| f.name.as_str()))
            .collect()
    }

    /// Validate naming and uniqueness invariants
    ///
    /// # Errors
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if !is_type_name(&self.name) {
            return Err(SchemaError::InvalidTypeName(self.name.clone()));
        }
        if self.id_field.is_empty() {
            return Err(SchemaError::MissingIdField(self.name.clone()));
        }
        if !is_field_name(&self.id_field) {
            return Err(SchemaError::InvalidFieldName(self.id_field.clone()));
        }

        let mut seen = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            if !is_field_name(&field.name) {
                return Err(SchemaError::InvalidFieldName(field.name.clone()));
            }
            if field.kind == FieldKind::Id {
                return Err(SchemaError::ExplicitIdField(field.name.clone()));
            }
            if field.name == self.id_field {
                return Err(SchemaError::IdFieldCollision(field.name.clone()));
            }
            if seen.contains(&field.name.as_str()) {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }
            seen.push(&field.name);
        }
        Ok(())
    }
}

fn is_type_name(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_alphanumeric())
}

fn is_field_name(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
