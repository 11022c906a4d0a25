//! Pipeline and manifest errors

use thiserror::Error;

/// Errors raised while building a pipeline or synthesizing its assembly
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Source or synth stage declared twice
    #[error("{0} stage declared twice")]
    DuplicateStage(&'static str),

    /// Pipeline has no source stage
    #[error("pipeline '{0}' has no source stage")]
    MissingSource(String),

    /// Pipeline has no synth stage
    #[error("pipeline '{0}' has no synth stage")]
    MissingSynth(String),

    /// Pipeline declares no deploy environment
    #[error("pipeline '{0}' declares no deploy environment")]
    NoDeployTargets(String),

    /// Two deploy stages target the same environment name
    #[error("environment '{0}' is targeted by more than one deploy stage")]
    DuplicateEnvironment(String),

    /// A stage's input artifact does not match its predecessor's output
    #[error("stage '{stage}' consumes artifact '{found}', expected '{expected}'")]
    ArtifactMismatch {
        stage: String,
        expected: String,
        found: String,
    },

    /// Stack assembly failure for one environment
    #[error(transparent)]
    Stack(#[from] cirrus_stack::StackError),

    /// Assembly serialization failure
    #[error("assembly serialization: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Assembly output failure
    #[error("assembly output: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while loading or validating an app manifest
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Manifest file could not be read
    #[error("manifest read: {0}")]
    Io(#[from] std::io::Error),

    /// Manifest is not valid YAML for the expected shape
    #[error("manifest parse: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Entity definition failed schema validation
    #[error(transparent)]
    Schema(#[from] cirrus_schema::SchemaError),

    /// Pipeline definition failed validation
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// Named environment does not exist in the manifest
    #[error("unknown environment '{0}'")]
    UnknownEnvironment(String),
}
