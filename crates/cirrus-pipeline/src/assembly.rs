//! Cloud assembly
//!
//! The synth stage's output: one deployment template per environment plus
//! a manifest binding stack names to content hashes. The assembly is the
//! artifact every deploy stage consumes.

use crate::environment::Environment;
use crate::error::PipelineError;
use crate::hash::ContentHash;
use crate::stage::ArtifactName;
use cirrus_stack::DeploymentTemplate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// One stack's entry in the assembly manifest
///
/// Carries the full deploy target binding: the external engine applies the
/// template into exactly this account/region pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackEntry {
    /// Target environment name
    pub environment: String,
    /// Target account identifier
    pub account: String,
    /// Target region
    pub region: String,
    /// Stack name
    pub stack: String,
    /// Blake3 hash of the canonical template JSON
    pub template_hash: ContentHash,
}

/// Manifest describing a synthesized assembly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssemblyManifest {
    /// Owning pipeline
    pub pipeline: String,
    /// Artifact name deploy stages consume
    pub artifact: ArtifactName,
    /// Stack entries in deploy-stage order
    pub stacks: Vec<StackEntry>,
}

/// Synthesized cloud assembly: manifest plus templates
#[derive(Debug, Clone, PartialEq)]
pub struct CloudAssembly {
    manifest: AssemblyManifest,
    templates: Vec<DeploymentTemplate>,
}

impl CloudAssembly {
    /// Build an assembly from per-environment templates
    ///
    /// # Errors
    /// Returns error if a template cannot be serialized for hashing.
    pub fn new(
        pipeline: String,
        templates: Vec<(Environment, DeploymentTemplate)>,
    ) -> Result<Self, PipelineError> {
        let mut stacks = Vec::with_capacity(templates.len());
        let mut bodies = Vec::with_capacity(templates.len());
        for (environment, template) in templates {
            let template_hash = ContentHash::compute_serializable(&template)?;
            stacks.push(StackEntry {
                environment: environment.name,
                account: environment.account,
                region: environment.region,
                stack: template.stack.clone(),
                template_hash,
            });
            bodies.push(template);
        }
        Ok(Self {
            manifest: AssemblyManifest {
                pipeline,
                artifact: ArtifactName::cloud_assembly(),
                stacks,
            },
            templates: bodies,
        })
    }

    /// Assembly manifest
    #[inline]
    #[must_use]
    pub fn manifest(&self) -> &AssemblyManifest {
        &self.manifest
    }

    /// Templates in deploy-stage order
    #[inline]
    #[must_use]
    pub fn templates(&self) -> &[DeploymentTemplate] {
        &self.templates
    }

    /// Template for one environment, if it exists
    #[must_use]
    pub fn template_for(&self, environment: &str) -> Option<&DeploymentTemplate> {
        self.manifest
            .stacks
            .iter()
            .position(|e| e.environment == environment)
            .map(|i| &self.templates[i])
    }

    /// Write `manifest.json` plus one `<stack>.template.json` per stack
    ///
    /// # Errors
    /// Returns error on serialization or filesystem failure.
    pub fn write_to(&self, dir: &Path) -> Result<(), PipelineError> {
        std::fs::create_dir_all(dir)?;
        let manifest_path = dir.join("manifest.json");
        std::fs::write(&manifest_path, serde_json::to_string_pretty(&self.manifest)?)?;
        for (entry, template) in self.manifest.stacks.iter().zip(&self.templates) {
            let path = dir.join(format!("{}.template.json", entry.stack));
            std::fs::write(&path, template.to_json_pretty()?)?;
        }
        info!(
            dir = %dir.display(),
            stacks = self.templates.len(),
            "wrote cloud assembly"
        );
        Ok(())
    }
}
