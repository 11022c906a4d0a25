//! Subcommand implementations

use anyhow::Context;
use cirrus_pipeline::{AppManifest, ManifestError};
use std::path::Path;
use tracing::info;

/// Validate the manifest, the pipeline, and every environment's stack
///
/// # Errors
/// Returns the first validation failure.
pub fn check(app: &Path) -> anyhow::Result<()> {
    let manifest = load(app)?;
    manifest.validate()?;
    println!(
        "ok: {} ({} environment{})",
        manifest.name,
        manifest.environments.len(),
        if manifest.environments.len() == 1 { "" } else { "s" }
    );
    Ok(())
}

/// Synthesize the cloud assembly into `out`
///
/// # Errors
/// Returns error on validation or filesystem failure.
pub fn synth(app: &Path, out: &Path) -> anyhow::Result<()> {
    let manifest = load(app)?;
    let pipeline = manifest.pipeline()?;
    let assembly = pipeline.synthesize(&manifest.entity())?;
    assembly.write_to(out)?;
    for entry in &assembly.manifest().stacks {
        println!("{}  {}", entry.template_hash.short(), entry.stack);
    }
    info!(out = %out.display(), "assembly written");
    Ok(())
}

/// Print one environment's deployment template to stdout
///
/// # Errors
/// Returns error if the environment is not declared in the manifest.
pub fn template(app: &Path, environment: &str) -> anyhow::Result<()> {
    let manifest = load(app)?;
    let pipeline = manifest.pipeline()?;
    let assembly = pipeline.synthesize(&manifest.entity())?;
    let template = assembly
        .template_for(environment)
        .ok_or_else(|| ManifestError::UnknownEnvironment(environment.to_string()))?;
    println!("{}", template.to_json_pretty()?);
    Ok(())
}

fn load(app: &Path) -> anyhow::Result<AppManifest> {
    AppManifest::load(app).with_context(|| format!("loading manifest {}", app.display()))
}
