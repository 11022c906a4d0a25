use cirrus_cli::commands;
use std::path::PathBuf;

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
";

fn write_manifest(dir: &tempfile::TempDir, yaml: &str) -> PathBuf {
    let path = dir.path().join("cirrus.yaml");
    std::fs::write(&path, yaml).unwrap();
    path
}

#[test]
fn check_accepts_the_shipped_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let app = write_manifest(&dir, MANIFEST);
    commands::check(&app).unwrap();
}

#[test]
fn check_rejects_a_broken_entity() {
    let dir = tempfile::tempdir().unwrap();
    let app = write_manifest(&dir, &MANIFEST.replace("name: Item", "name: item"));
    assert!(commands::check(&app).is_err());
}

#[test]
fn check_rejects_a_missing_manifest() {
    let dir = tempfile::tempdir().unwrap();
    assert!(commands::check(&dir.path().join("absent.yaml")).is_err());
}

#[test]
fn synth_writes_the_assembly() {
    let dir = tempfile::tempdir().unwrap();
    let app = write_manifest(&dir, MANIFEST);
    let out = dir.path().join("assembly");
    commands::synth(&app, &out).unwrap();

    let manifest: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out.join("manifest.json")).unwrap()).unwrap();
    assert_eq!(manifest["pipeline"], "GraphQLAPIPipeline");
    assert_eq!(manifest["stacks"][0]["stack"], "Dev-ItemApi");

    let template: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(out.join("Dev-ItemApi.template.json")).unwrap(),
    )
    .unwrap();
    assert!(template["resources"]["Schema"]["properties"]["definition"]
        .as_str()
        .unwrap()
        .contains("type Mutation"));
}

#[test]
fn template_requires_a_declared_environment() {
    let dir = tempfile::tempdir().unwrap();
    let app = write_manifest(&dir, MANIFEST);
    commands::template(&app, "Dev").unwrap();
    assert!(commands::template(&app, "Prod").is_err());
}
