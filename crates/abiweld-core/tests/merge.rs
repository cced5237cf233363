use std::fs;
use std::path::Path;

use abiweld_core::{Bindings, ErrorPolicy, Merger, ProjectConfig, ProjectDir};
use serde_json::{json, Value};

fn write_artifact(root: &Path, name: &str, content: &str) {
    let dir = root.join("out").join(format!("{}.sol", name));
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(format!("{}.json", name)), content).unwrap();
}

fn fixture() -> tempfile::TempDir {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();

    write_artifact(
        root,
        "A",
        &json!({"abi": [{"type": "function", "name": "f"}]}).to_string(),
    );
    write_artifact(
        root,
        "B",
        &json!({"abi": [
            {"type": "error", "name": "E1"},
            {"type": "event", "name": "Ev"}
        ]})
        .to_string(),
    );
    write_artifact(
        root,
        "IDiamondProxy",
        &json!({"abi": [
            {"type": "error", "name": "E2"},
            {"type": "function", "name": "g"}
        ]})
        .to_string(),
    );

    tmp
}

fn read_output(root: &Path) -> Value {
    let content = fs::read_to_string(root.join("out/abi.json")).unwrap();
    serde_json::from_str(&content).unwrap()
}

#[test]
fn merges_proxy_in_full_and_errors_from_the_rest() {
    let tmp = fixture();
    let project = ProjectDir::at(tmp.path());
    let config = ProjectConfig::load(&project).unwrap();

    let report = Merger::new(&project, &config).unwrap().run().unwrap();

    assert_eq!(report.merged_count(), 3);
    assert_eq!(
        read_output(tmp.path()),
        json!([
            {"type": "error", "name": "E1"},
            {"type": "error", "name": "E2"},
            {"type": "function", "name": "g"}
        ])
    );
}

#[test]
fn invalid_json_is_skipped_and_reported() {
    let tmp = fixture();
    write_artifact(tmp.path(), "Broken", "{ \"abi\": [");

    let project = ProjectDir::at(tmp.path());
    let config = ProjectConfig::default();
    let report = Merger::new(&project, &config).unwrap().run().unwrap();

    assert_eq!(report.skipped_count(), 1);
    assert_eq!(read_output(tmp.path()).as_array().unwrap().len(), 3);
}

#[test]
fn fail_fast_leaves_previous_output_untouched() {
    let tmp = fixture();
    let project = ProjectDir::at(tmp.path());
    let config = ProjectConfig::default();

    Merger::new(&project, &config).unwrap().run().unwrap();
    let before = fs::read_to_string(tmp.path().join("out/abi.json")).unwrap();

    write_artifact(tmp.path(), "Broken", "not json");
    let result = Merger::new(&project, &config)
        .unwrap()
        .with_error_policy(ErrorPolicy::Fail)
        .run();

    assert!(result.is_err());
    assert_eq!(
        fs::read_to_string(tmp.path().join("out/abi.json")).unwrap(),
        before
    );
}

#[test]
fn rerunning_is_byte_identical() {
    let tmp = fixture();
    let project = ProjectDir::at(tmp.path());
    let config = ProjectConfig::default();

    Merger::new(&project, &config).unwrap().run().unwrap();
    let first = fs::read(tmp.path().join("out/abi.json")).unwrap();

    let report = Merger::new(&project, &config).unwrap().run().unwrap();
    let second = fs::read(tmp.path().join("out/abi.json")).unwrap();

    assert_eq!(first, second);
    // The previous output is never scanned as an artifact
    assert_eq!(report.artifacts.len(), 3);
}

#[test]
fn config_file_drives_merge_and_bindings() {
    let tmp = fixture();
    let root = tmp.path();

    fs::write(
        root.join("abiweld.toml"),
        r#"
[merge]
output = "merged.json"
default_strategy = { kinds = ["error", "event"] }
rules = []

[exports]
deployments = "deployments.json"
abi = "merged"
"#,
    )
    .unwrap();
    fs::write(
        root.join("deployments.json"),
        r#"{"local": {"chainId": 31337, "contracts": [
            {"name": "DiamondProxy", "onChain": {"address": "0x5fbdb2315678afecb367f032d93f642f64180aa3"}}
        ]}}"#,
    )
    .unwrap();

    let project = ProjectDir::at(root);
    let config = ProjectConfig::load(&project).unwrap();
    let report = Merger::new(&project, &config).unwrap().run().unwrap();

    assert_eq!(report.output, root.join("out/merged.json"));

    let bindings = Bindings::load(&project, &config).unwrap();
    let names: Vec<_> = bindings.abi.iter().filter_map(|f| f.name()).collect();
    assert_eq!(names, vec!["E1", "Ev", "E2"]);
    assert!(bindings.address_of("local", "DiamondProxy").unwrap().is_some());
}

#[test]
fn missing_artifacts_dir_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let project = ProjectDir::at(tmp.path());

    let result = Merger::new(&project, &ProjectConfig::default())
        .unwrap()
        .run();

    assert!(matches!(
        result,
        Err(abiweld_core::Error::ArtifactsDirNotFound(_))
    ));
}
