//! App manifest
//!
//! The YAML definition (`cirrus.yaml`) the CLI loads: app name, entity
//! shape, source revision, synth commands, and deploy environments. Shared
//! with tests so both drive the same loader.

use crate::environment::Environment;
use crate::error::{ManifestError, PipelineError};
use crate::pipeline::{Pipeline, PipelineBuilder};
use crate::stage::{SourceSpec, SynthSpec};
use cirrus_schema::{Entity, Field, FieldKind};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One declared entity field in the manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSpec {
    /// Field name
    pub name: String,
    /// Scalar kind
    #[serde(rename = "type")]
    pub kind: FieldKind,
    /// Required on create
    #[serde(default)]
    pub required: bool,
}

/// Entity shape declared by the manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntitySpec {
    /// Entity type name
    pub name: String,
    /// Identifier field name
    pub id_field: String,
    /// Declared fields
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

impl EntitySpec {
    /// Materialize the entity model
    #[must_use]
    pub fn to_entity(&self) -> Entity {
        let mut entity = Entity::new(&self.name, &self.id_field);
        for spec in &self.fields {
            let mut field = Field::new(&spec.name, spec.kind);
            if spec.required {
                field = field.required();
            }
            entity = entity.field(field);
        }
        entity
    }
}

/// The full app manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppManifest {
    /// App (and pipeline) name
    pub name: String,
    /// Entity shape
    pub entity: EntitySpec,
    /// Source revision to track
    pub source: SourceSpec,
    /// Synth stage commands
    #[serde(default)]
    pub synth: SynthSpec,
    /// Deploy environments in stage order
    pub environments: Vec<Environment>,
}

impl AppManifest {
    /// Parse a manifest from YAML text
    ///
    /// # Errors
    /// Returns error on malformed YAML or unknown fields (which includes
    /// any attempt to inline a credential value).
    pub fn from_yaml(yaml: &str) -> Result<Self, ManifestError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a manifest from disk
    ///
    /// # Errors
    /// Returns error on read or parse failure.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    /// Materialize the entity model
    #[must_use]
    pub fn entity(&self) -> Entity {
        self.entity.to_entity()
    }

    /// Build the validated pipeline definition
    ///
    /// # Errors
    /// Returns error if stage or environment constraints fail.
    pub fn pipeline(&self) -> Result<Pipeline, PipelineError> {
        let mut builder = PipelineBuilder::new(&self.name)
            .source(self.source.clone())?
            .synth(self.synth.clone())?;
        for environment in &self.environments {
            builder = builder.deploy(environment.clone())?;
        }
        builder.build()
    }

    /// Validate everything the manifest declares
    ///
    /// Checks the entity, the pipeline shape, and every environment's
    /// assembled stack, so a `check` run fails exactly when a `synth` run
    /// would.
    ///
    /// # Errors
    /// Returns the first failure found.
    pub fn validate(&self) -> Result<(), ManifestError> {
        let entity = self.entity();
        entity.validate()?;
        let pipeline = self.pipeline()?;
        pipeline
            .synthesize(&entity)
            .map_err(ManifestError::Pipeline)?;
        Ok(())
    }
}
