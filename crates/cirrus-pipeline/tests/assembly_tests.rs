use cirrus_pipeline::AppManifest;
use pretty_assertions::assert_eq;

const MANIFEST: &str = "\
name: GraphQLAPIPipeline
entity:
  name: Item
  id_field: itemsId
  fields:
    - name: name
      type: string
source:
  owner: ehelbig1
  repo: graphql-api
  token_secret: github-token
environments:
  - name: Dev
    account: '111111111111'
    region: us-east-1
  - name: Staging
    account: '222222222222'
    region: us-east-1
";

#[test]
fn synthesizes_one_stack_per_environment() {
    let manifest = AppManifest::from_yaml(MANIFEST).unwrap();
    let pipeline = manifest.pipeline().unwrap();
    let assembly = pipeline.synthesize(&manifest.entity()).unwrap();

    let stacks: Vec<_> = assembly
        .manifest()
        .stacks
        .iter()
        .map(|e| e.stack.as_str())
        .collect();
    assert_eq!(stacks, ["Dev-ItemApi", "Staging-ItemApi"]);
    assert_eq!(assembly.manifest().artifact.as_str(), "cloud-assembly");
}

#[test]
fn environments_share_no_resources() {
    let manifest = AppManifest::from_yaml(MANIFEST).unwrap();
    let assembly = manifest
        .pipeline()
        .unwrap()
        .synthesize(&manifest.entity())
        .unwrap();

    let dev = assembly.template_for("Dev").unwrap();
    let staging = assembly.template_for("Staging").unwrap();
    assert_ne!(dev.stack, staging.stack);
    // Same structure per environment, distinct stack instances.
    assert_eq!(
        dev.resources.keys().collect::<Vec<_>>(),
        staging.resources.keys().collect::<Vec<_>>()
    );
}

#[test]
fn deploy_targets_are_bound_into_the_assembly() {
    let manifest = AppManifest::from_yaml(MANIFEST).unwrap();
    let assembly = manifest
        .pipeline()
        .unwrap()
        .synthesize(&manifest.entity())
        .unwrap();

    let dev = &assembly.manifest().stacks[0];
    assert_eq!(dev.account, "111111111111");
    assert_eq!(dev.region, "us-east-1");
    let staging = &assembly.manifest().stacks[1];
    assert_eq!(staging.account, "222222222222");

    // Same definition pointed at different accounts/regions must produce a
    // distinguishable assembly, or the engine would deploy into the wrong
    // target without noticing.
    let moved = MANIFEST
        .replace("'111111111111'", "'333333333333'")
        .replace("us-east-1", "eu-west-1");
    let other = AppManifest::from_yaml(&moved).unwrap();
    let relocated = other
        .pipeline()
        .unwrap()
        .synthesize(&other.entity())
        .unwrap();
    assert_ne!(assembly.manifest(), relocated.manifest());
}

#[test]
fn synthesis_is_deterministic_across_runs() {
    let manifest = AppManifest::from_yaml(MANIFEST).unwrap();
    let a = manifest
        .pipeline()
        .unwrap()
        .synthesize(&manifest.entity())
        .unwrap();
    let b = manifest
        .pipeline()
        .unwrap()
        .synthesize(&manifest.entity())
        .unwrap();
    assert_eq!(a.manifest(), b.manifest());
}

#[test]
fn writes_manifest_and_templates() {
    let manifest = AppManifest::from_yaml(MANIFEST).unwrap();
    let assembly = manifest
        .pipeline()
        .unwrap()
        .synthesize(&manifest.entity())
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    assembly.write_to(dir.path()).unwrap();

    assert!(dir.path().join("manifest.json").is_file());
    assert!(dir.path().join("Dev-ItemApi.template.json").is_file());
    assert!(dir.path().join("Staging-ItemApi.template.json").is_file());

    // Round-trip: the written manifest parses back to the same value.
    let text = std::fs::read_to_string(dir.path().join("manifest.json")).unwrap();
    let parsed: cirrus_pipeline::AssemblyManifest = serde_json::from_str(&text).unwrap();
    assert_eq!(&parsed, assembly.manifest());
}

#[test]
fn credential_values_never_reach_the_assembly() {
    let manifest = AppManifest::from_yaml(MANIFEST).unwrap();
    let assembly = manifest
        .pipeline()
        .unwrap()
        .synthesize(&manifest.entity())
        .unwrap();
    for template in assembly.templates() {
        let text = template.to_json_pretty().unwrap();
        // Only the secret name lives in the pipeline definition; templates
        // carry no credential material at all.
        assert!(!text.contains("github-token"));
        assert!(!text.contains("token"));
    }
}
