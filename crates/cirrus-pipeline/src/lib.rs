//! Cirrus Pipeline
//!
//! Linear delivery pipeline definition: fetch a source revision, synthesize
//! the cloud assembly, deploy one isolated stack instance per environment.
//!
//! # Core Concepts
//!
//! - [`Stage`]: source / synth / deploy, strictly sequential
//! - [`ArtifactName`]: each stage's output is the exact input of the next
//! - [`Pipeline`]: validated stage sequence; [`Pipeline::synthesize`]
//!   produces the [`CloudAssembly`]
//! - [`AppManifest`]: the YAML definition the CLI and tests share
//!
//! The pipeline definition is static. Stage execution, retries, and
//! deployment history belong to the external pipeline engine; a failed
//! stage halts the run and leaves prior stages' deployed state unchanged.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod assembly;
mod environment;
mod error;
mod hash;
mod manifest;
mod pipeline;
mod stage;

pub use assembly::{AssemblyManifest, CloudAssembly, StackEntry};
pub use environment::Environment;
pub use error::{ManifestError, PipelineError};
pub use hash::ContentHash;
pub use manifest::{AppManifest, EntitySpec, FieldSpec};
pub use pipeline::{Pipeline, PipelineBuilder};
pub use stage::{ArtifactName, SourceSpec, Stage, SynthSpec};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
