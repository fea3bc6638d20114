use std::fs;
use std::path::Path;

use indoc::indoc;

use crate::config::{CompilerConfig, OutputEntry, Profile, ProjectConfig, TypeSelection};
use crate::emit::Outcome;
use crate::pipeline::generate;
use crate::Error;

fn entry(output_file: &str, types: TypeSelection) -> OutputEntry {
    OutputEntry {
        output_file: output_file.into(),
        types,
        profile: Profile::Standard,
    }
}

fn project(root: &Path, entries: Vec<(&str, OutputEntry)>) -> ProjectConfig {
    ProjectConfig {
        include: vec!["**/*.dcl".to_string()],
        exclude: Vec::new(),
        compiler: CompilerConfig::new(root),
        entries: entries
            .into_iter()
            .map(|(name, e)| (name.to_string(), e))
            .collect(),
    }
}

#[test]
fn generate_writes_schema_and_declaration_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("main.dcl"),
        indoc! {r#"
            export interface Config {
              name: string;
              port?: number;
            }
        "#},
    )
    .unwrap();

    let config = project(
        dir.path(),
        vec![("app", entry("app.schema.json", TypeSelection::One("Config".into())))],
    );
    let report = generate(&config).unwrap();

    assert_eq!(report.outcome, Outcome::Completed);
    assert!(!report.has_failures());

    let schema_path = dir.path().join("generated/app.schema.json");
    let decl_path = dir.path().join("generated/types/main.d.dcl");
    assert!(report.written.contains(&schema_path));
    assert!(report.written.contains(&decl_path));

    let schema: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&schema_path).unwrap()).unwrap();
    assert_eq!(schema["$ref"], "#/definitions/Config");
    assert_eq!(
        schema["definitions"]["Config"]["properties"]["name"]["type"],
        "string"
    );
    assert_eq!(schema["definitions"]["Config"]["required"], serde_json::json!(["name"]));

    let decl = fs::read_to_string(&decl_path).unwrap();
    assert!(decl.contains("export interface Config {"));
}

#[test]
fn failed_entry_is_recorded_and_siblings_still_write() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("main.dcl"),
        "export interface Config { name: string; }\n",
    )
    .unwrap();

    let config = project(
        dir.path(),
        vec![
            ("bad", entry("bad.schema.json", TypeSelection::One("Missing".into()))),
            ("good", entry("good.schema.json", TypeSelection::One("Config".into()))),
        ],
    );
    let report = generate(&config).unwrap();

    assert!(report.has_failures());
    let bad = &report.entries[0];
    assert_eq!(bad.name, "bad");
    assert!(bad.error.as_deref().unwrap().contains("Missing"));
    assert!(!bad.output_file.exists());

    let good = &report.entries[1];
    assert!(good.error.is_none());
    assert!(report.written.contains(&good.output_file));
    assert!(good.output_file.exists());
}

#[test]
fn disabled_declaration_pass_withholds_every_artifact() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("main.dcl"),
        "export interface Config { name: string; }\n",
    )
    .unwrap();

    let mut config = project(
        dir.path(),
        vec![("app", entry("app.schema.json", TypeSelection::One("Config".into())))],
    );
    config.compiler.declaration = false;
    let report = generate(&config).unwrap();

    assert_eq!(report.outcome, Outcome::Skipped);
    assert!(report.written.is_empty());
    assert!(!dir.path().join("generated/app.schema.json").exists());
    // Extraction itself still ran, only the commit was withheld.
    assert!(report.entries[0].error.is_none());
}

#[test]
fn compilation_errors_abort_before_any_write() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("main.dcl"),
        "export interface Config { handler: Ghost; }\n",
    )
    .unwrap();

    let config = project(
        dir.path(),
        vec![("app", entry("app.schema.json", TypeSelection::One("Config".into())))],
    );
    let err = generate(&config).unwrap_err();

    assert!(matches!(err, Error::Compilation(_)));
    assert!(!dir.path().join("generated").exists());
}

#[test]
fn warnings_survive_into_the_report() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("main.dcl"),
        "export interface Config { extra: any; }\n",
    )
    .unwrap();

    let config = project(
        dir.path(),
        vec![("app", entry("app.schema.json", TypeSelection::One("Config".into())))],
    );
    let report = generate(&config).unwrap();

    assert!(!report.has_failures());
    assert!(report.warnings.iter().any(|w| w.contains("any")));
}

#[test]
fn previously_generated_artifacts_are_not_reloaded_as_sources() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("main.dcl"),
        "export interface Config { name: string; }\n",
    )
    .unwrap();

    let config = project(
        dir.path(),
        vec![("app", entry("app.schema.json", TypeSelection::One("Config".into())))],
    );
    generate(&config).unwrap();
    // The first run leaves generated/types/main.d.dcl behind. A second run
    // must not pick it up, which would duplicate every declaration.
    let report = generate(&config).unwrap();

    assert!(!report.has_failures());
    assert_eq!(report.outcome, Outcome::Completed);
}

#[test]
fn generate_runs_from_a_loaded_manifest() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("src")).unwrap();
    fs::write(
        dir.path().join("src/main.dcl"),
        "export interface Config { name: string; }\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("schemik.json"),
        indoc! {r#"
            {
              "include": ["**/*.dcl"],
              "compiler": { "rootDir": "src", "outDir": "out" },
              "entries": {
                "app": { "outputFile": "app.schema.json", "types": "Config" }
              }
            }
        "#},
    )
    .unwrap();

    let config = ProjectConfig::load(&dir.path().join("schemik.json")).unwrap();
    let report = generate(&config).unwrap();

    assert!(!report.has_failures());
    assert!(dir.path().join("out/app.schema.json").exists());
    assert!(dir.path().join("out/types/main.d.dcl").exists());
}
