//! Cirrus Stack
//!
//! Two-phase assembly of one environment's infrastructure resources.
//!
//! Construction phase: [`StackBuilder`] collects resources and dependency
//! edges, rejecting structural misuse (cycles, self-loops, duplicate ids)
//! at insertion time. Validation phase: [`StackBuilder::validate`] produces
//! a [`ValidatedStack`] only when every cross-resource invariant holds, the
//! load-bearing one being schema-before-resolvers: a resolver references
//! schema fields that must already exist in the provider's view, so every
//! resolver must be ordered after the schema document.
//!
//! [`ApiStack::assemble`] is the canonical construction: API, schema, API
//! key, table, access role, data-source binding, and the three resolvers.
//!
//! Nothing here performs resource creation. The output is a static
//! [`DeploymentTemplate`] applied atomically by an external provisioning
//! engine; a declared-order violation fails that apply as a whole, leaving
//! no partial resolver state.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod api_stack;
mod builder;
mod error;
mod resource;
mod template;

pub use api_stack::ApiStack;
pub use builder::{StackBuilder, ValidatedStack};
pub use error::StackError;
pub use resource::{Resource, ResourceId, ResourceKind};
pub use template::{DeploymentTemplate, TemplateResource};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
