//! Pipeline stages and artifact wiring
//!
//! Stages execute strictly sequentially. Each stage's output artifact is
//! the exact input of its successor: source produces `source`, synth
//! consumes `source` and produces `cloud-assembly`, every deploy stage
//! consumes `cloud-assembly`.

use crate::environment::Environment;
use serde::{Deserialize, Serialize};

/// Named artifact flowing between stages
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactName(String);

impl ArtifactName {
    /// The fetched source tree
    #[inline]
    #[must_use]
    pub fn source() -> Self {
        Self("source".to_string())
    }

    /// The synthesized cloud assembly
    #[inline]
    #[must_use]
    pub fn cloud_assembly() -> Self {
        Self("cloud-assembly".to_string())
    }

    /// Artifact name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source revision to fetch
///
/// `token_secret` names a credential in the external secret store; the
/// value is resolved at apply time and never appears in any document this
/// crate emits. `deny_unknown_fields` keeps literal token values (e.g. a
/// `token:` key) out of the manifest entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceSpec {
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Branch to track
    #[serde(default = "default_branch")]
    pub branch: String,
    /// Name of the externally resolved access token
    pub token_secret: String,
}

fn default_branch() -> String {
    "main".to_string()
}

/// Build commands producing the cloud assembly from fetched source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SynthSpec {
    /// Commands run in order
    pub commands: Vec<String>,
}

impl Default for SynthSpec {
    fn default() -> Self {
        Self {
            commands: vec!["cirrus synth --app cirrus.yaml --out assembly".to_string()],
        }
    }
}

/// One pipeline stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum Stage {
    /// Fetch the source revision
    Source(SourceSpec),
    /// Synthesize the cloud assembly
    Synth(SynthSpec),
    /// Deploy the assembly into one environment
    Deploy(Environment),
}

impl Stage {
    /// Stage display name
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Source(_) => "Source".to_string(),
            Self::Synth(_) => "Synth".to_string(),
            Self::Deploy(env) => format!("Deploy-{}", env.name),
        }
    }

    /// Artifact this stage consumes, if any
    #[must_use]
    pub fn consumes(&self) -> Option<ArtifactName> {
        match self {
            Self::Source(_) => None,
            Self::Synth(_) => Some(ArtifactName::source()),
            Self::Deploy(_) => Some(ArtifactName::cloud_assembly()),
        }
    }

    /// Artifact this stage produces, if any
    #[must_use]
    pub fn produces(&self) -> Option<ArtifactName> {
        match self {
            Self::Source(_) => Some(ArtifactName::source()),
            Self::Synth(_) => Some(ArtifactName::cloud_assembly()),
            Self::Deploy(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_spec_rejects_literal_tokens() {
        let yaml = "owner: acme\nrepo: api\ntoken_secret: github-token\ntoken: hunter2\n";
        assert!(serde_yaml::from_str::<SourceSpec>(yaml).is_err());
    }

    #[test]
    fn branch_defaults_to_main() {
        let yaml = "owner: acme\nrepo: api\ntoken_secret: github-token\n";
        let spec: SourceSpec = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(spec.branch, "main");
    }

    #[test]
    fn artifact_flow_is_source_then_assembly() {
        let source = Stage::Source(SourceSpec {
            owner: "acme".into(),
            repo: "api".into(),
            branch: "main".into(),
            token_secret: "github-token".into(),
        });
        let synth = Stage::Synth(SynthSpec::default());
        assert_eq!(source.produces(), synth.consumes());
        assert_eq!(synth.produces(), Some(ArtifactName::cloud_assembly()));
    }
}
