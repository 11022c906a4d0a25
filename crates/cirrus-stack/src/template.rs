//! Deployment template synthesis
//!
//! A [`DeploymentTemplate`] is the static JSON document handed to the
//! external provisioning engine. Resources appear in deployment order and
//! carry their direct dependencies as logical ids; the engine applies the
//! whole document atomically.

use crate::builder::ValidatedStack;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// One resource entry in a template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateResource {
    /// Provider type identifier
    #[serde(rename = "type")]
    pub type_id: String,
    /// Provider properties
    pub properties: JsonValue,
    /// Logical ids this resource deploys after
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
}

/// Rendered deployment template for one stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentTemplate {
    /// Stack name
    pub stack: String,
    /// Resources keyed by logical id, in deployment order
    pub resources: IndexMap<String, TemplateResource>,
}

impl DeploymentTemplate {
    /// Render a validated stack
    #[must_use]
    pub fn from_stack(stack: &ValidatedStack) -> Self {
        let mut resources = IndexMap::with_capacity(stack.resources().len());
        for id in stack.deploy_order() {
            let resource = stack.resource(*id);
            resources.insert(
                resource.logical_id().to_string(),
                TemplateResource {
                    type_id: resource.kind().type_id().to_string(),
                    properties: resource.properties().clone(),
                    depends_on: stack.dependencies_of(*id).to_vec(),
                },
            );
        }
        Self {
            stack: stack.stack_name().to_string(),
            resources,
        }
    }

    /// Canonical JSON bytes (deterministic for identical stacks)
    ///
    /// # Errors
    /// Returns error if serialization fails.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Pretty-printed JSON for files and stdout
    ///
    /// # Errors
    /// Returns error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Position of a logical id in deployment order
    #[must_use]
    pub fn position_of(&self, logical_id: &str) -> Option<usize> {
        self.resources.get_index_of(logical_id)
    }
}
