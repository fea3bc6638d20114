use std::fs;

use super::declaration::Outcome;
use super::gate::{Gate, OutputArtifact};

fn artifact(path: std::path::PathBuf, contents: &str) -> OutputArtifact {
    OutputArtifact {
        path,
        contents: contents.to_string(),
    }
}

#[test]
fn completed_outcome_writes_everything() {
    let dir = tempfile::tempdir().unwrap();
    let artifacts = vec![
        artifact(dir.path().join("out/a.json"), "{}"),
        artifact(dir.path().join("out/nested/b.json"), "{\"x\":1}"),
    ];

    let written = Gate::commit(Outcome::Completed, artifacts).unwrap();
    assert_eq!(written.len(), 2);
    assert_eq!(fs::read_to_string(dir.path().join("out/a.json")).unwrap(), "{}");
    assert_eq!(
        fs::read_to_string(dir.path().join("out/nested/b.json")).unwrap(),
        "{\"x\":1}"
    );
}

#[test]
fn skipped_outcome_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let artifacts = vec![
        artifact(dir.path().join("a.json"), "{}"),
        artifact(dir.path().join("b.json"), "{}"),
    ];

    let written = Gate::commit(Outcome::Skipped, artifacts).unwrap();
    assert!(written.is_empty());
    assert!(!dir.path().join("a.json").exists());
    assert!(!dir.path().join("b.json").exists());
}

#[test]
fn empty_artifact_set_commits_cleanly() {
    let written = Gate::commit(Outcome::Completed, Vec::new()).unwrap();
    assert!(written.is_empty());
}
