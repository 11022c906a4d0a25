//! Pipeline definition and synthesis
//!
//! Usage:
//! ```rust,ignore
//! let pipeline = PipelineBuilder::new("GraphQLAPIPipeline")
//!     .source(source_spec)?
//!     .synth(SynthSpec::default())?
//!     .deploy(Environment::new("Dev", "111111111111", "us-east-1"))?
//!     .build()?;
//! let assembly = pipeline.synthesize(&entity)?;
//! ```

use crate::assembly::CloudAssembly;
use crate::environment::Environment;
use crate::error::PipelineError;
use crate::stage::{ArtifactName, SourceSpec, Stage, SynthSpec};
use cirrus_schema::Entity;
use cirrus_stack::ApiStack;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Builder for a linear delivery pipeline
pub struct PipelineBuilder {
    name: String,
    source: Option<SourceSpec>,
    synth: Option<SynthSpec>,
    deploys: Vec<Environment>,
}

impl PipelineBuilder {
    /// Create a builder for the named pipeline
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: None,
            synth: None,
            deploys: Vec::new(),
        }
    }

    /// Declare the source stage
    ///
    /// # Errors
    /// A pipeline has exactly one source; a second call is rejected.
    pub fn source(mut self, spec: SourceSpec) -> Result<Self, PipelineError> {
        if self.source.is_some() {
            return Err(PipelineError::DuplicateStage("source"));
        }
        self.source = Some(spec);
        Ok(self)
    }

    /// Declare the synth stage
    ///
    /// # Errors
    /// A pipeline has exactly one synth; a second call is rejected.
    pub fn synth(mut self, spec: SynthSpec) -> Result<Self, PipelineError> {
        if self.synth.is_some() {
            return Err(PipelineError::DuplicateStage("synth"));
        }
        self.synth = Some(spec);
        Ok(self)
    }

    /// Append a deploy stage for one environment
    ///
    /// # Errors
    /// Rejects a second deploy targeting the same environment name.
    pub fn deploy(mut self, environment: Environment) -> Result<Self, PipelineError> {
        if self.deploys.iter().any(|e| e.name == environment.name) {
            return Err(PipelineError::DuplicateEnvironment(environment.name));
        }
        self.deploys.push(environment);
        Ok(self)
    }

    /// Validate stage ordering and artifact wiring, producing the pipeline
    ///
    /// # Errors
    /// Requires exactly one source, one synth, and at least one deploy.
    pub fn build(self) -> Result<Pipeline, PipelineError> {
        let source = self
            .source
            .ok_or_else(|| PipelineError::MissingSource(self.name.clone()))?;
        let synth = self
            .synth
            .ok_or_else(|| PipelineError::MissingSynth(self.name.clone()))?;
        if self.deploys.is_empty() {
            return Err(PipelineError::NoDeployTargets(self.name));
        }

        let mut stages = Vec::with_capacity(2 + self.deploys.len());
        stages.push(Stage::Source(source));
        stages.push(Stage::Synth(synth));
        stages.extend(self.deploys.into_iter().map(Stage::Deploy));

        verify_artifact_flow(&stages)?;
        Ok(Pipeline {
            name: self.name,
            stages,
        })
    }
}

/// A validated linear pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    name: String,
    stages: Vec<Stage>,
}

impl Pipeline {
    /// Pipeline name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stages in execution order
    #[inline]
    #[must_use]
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Deploy environments in stage order
    #[must_use]
    pub fn environments(&self) -> Vec<&Environment> {
        self.stages
            .iter()
            .filter_map(|s| match s {
                Stage::Deploy(env) => Some(env),
                _ => None,
            })
            .collect()
    }

    /// Synthesize the cloud assembly: one stack instance per environment
    ///
    /// Synthesis is pure and deterministic; identical inputs yield
    /// byte-identical assemblies, hashes included. Each stack entry keeps
    /// its environment's account/region binding, so the deploy stage always
    /// targets the declared pair.
    ///
    /// # Errors
    /// Returns [`PipelineError`] if any environment's stack fails assembly
    /// or validation.
    pub fn synthesize(&self, entity: &Entity) -> Result<CloudAssembly, PipelineError> {
        let mut templates = Vec::new();
        for environment in self.environments() {
            let stack = ApiStack::assemble(entity, &environment.name)?;
            info!(
                pipeline = %self.name,
                environment = %environment,
                stack = %stack.stack_name(),
                "synthesized stack"
            );
            templates.push((environment.clone(), stack.to_template()));
        }
        CloudAssembly::new(self.name.clone(), templates)
    }
}

/// Check that each stage's input is its predecessor's output
fn verify_artifact_flow(stages: &[Stage]) -> Result<(), PipelineError> {
    let mut produced: Option<ArtifactName> = None;
    for stage in stages {
        if let Some(needed) = stage.consumes() {
            if produced.as_ref() != Some(&needed) {
                return Err(PipelineError::ArtifactMismatch {
                    stage: stage.name(),
                    expected: produced.map_or_else(|| "none".to_string(), |a| a.to_string()),
                    found: needed.to_string(),
                });
            }
        }
        if let Some(output) = stage.produces() {
            produced = Some(output);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source_spec() -> SourceSpec {
        SourceSpec {
            owner: "ehelbig1".into(),
            repo: "graphql-api".into(),
            branch: "main".into(),
            token_secret: "github-token".into(),
        }
    }

    fn dev() -> Environment {
        Environment::new("Dev", "111111111111", "us-east-1")
    }

    #[test]
    fn builds_source_synth_deploy() {
        let pipeline = PipelineBuilder::new("GraphQLAPIPipeline")
            .source(source_spec())
            .unwrap()
            .synth(SynthSpec::default())
            .unwrap()
            .deploy(dev())
            .unwrap()
            .build()
            .unwrap();
        let names: Vec<_> = pipeline.stages().iter().map(Stage::name).collect();
        assert_eq!(names, ["Source", "Synth", "Deploy-Dev"]);
    }

    #[test]
    fn missing_stages_are_rejected() {
        assert!(matches!(
            PipelineBuilder::new("p").build(),
            Err(PipelineError::MissingSource(_))
        ));
        assert!(matches!(
            PipelineBuilder::new("p").source(source_spec()).unwrap().build(),
            Err(PipelineError::MissingSynth(_))
        ));
        assert!(matches!(
            PipelineBuilder::new("p")
                .source(source_spec())
                .unwrap()
                .synth(SynthSpec::default())
                .unwrap()
                .build(),
            Err(PipelineError::NoDeployTargets(_))
        ));
    }

    #[test]
    fn duplicate_environment_is_rejected() {
        let result = PipelineBuilder::new("p")
            .source(source_spec())
            .unwrap()
            .synth(SynthSpec::default())
            .unwrap()
            .deploy(dev())
            .unwrap()
            .deploy(dev());
        assert!(matches!(
            result,
            Err(PipelineError::DuplicateEnvironment(name)) if name == "Dev"
        ));
    }

    #[test]
    fn duplicate_source_is_rejected() {
        let result = PipelineBuilder::new("p")
            .source(source_spec())
            .unwrap()
            .source(source_spec());
        assert!(matches!(result, Err(PipelineError::DuplicateStage("source"))));
    }

    #[test]
    fn artifact_flow_verifies() {
        // Deploy before synth produced anything.
        let stages = vec![Stage::Deploy(dev())];
        assert!(matches!(
            verify_artifact_flow(&stages),
            Err(PipelineError::ArtifactMismatch { .. })
        ));
    }
}
