//! Cirrus Schema
//!
//! Entity definitions and their projection into a GraphQL schema document
//! plus store-native resolver mapping templates.
//!
//! # Core Concepts
//!
//! - [`Entity`]: the single business object a stack manages
//! - [`SchemaDocument`]: rendered SDL exposing `all` / `save` / `delete`
//! - [`Operation`]: the fixed set of schema operations
//! - [`ResolverMapping`]: request/response template pair per operation
//!
//! # Example
//!
//! ```rust
//! use cirrus_schema::{Entity, SchemaDocument, ResolverMapping};
//!
//! let entity = Entity::item();
//! let doc = SchemaDocument::for_entity(&entity).unwrap();
//! assert!(doc.sdl().contains("type Query"));
//!
//! let mappings = ResolverMapping::all_for_entity(&entity);
//! assert_eq!(mappings.len(), 3);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod document;
mod entity;
mod error;
mod mapping;

pub use document::{Operation, SchemaDocument};
pub use entity::{Entity, Field, FieldKind};
pub use error::SchemaError;
pub use mapping::{MappingTemplate, ResolverMapping};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
