use std::fs;

use indoc::indoc;

use crate::config::CompilerConfig;
use crate::parser::{parse, Root};
use crate::program::load_program;

use super::declaration::{emit_declarations, print_declarations, Outcome};
use super::redact::redact_private_members;

fn print_redacted(source: &str) -> String {
    let parse = parse(source);
    assert!(parse.diagnostics().is_empty());
    let redacted = redact_private_members(&parse.syntax());
    print_declarations(&Root::cast(redacted).unwrap())
}

#[test]
fn private_members_are_quoted_in_declarations() {
    let printed = print_redacted(indoc! {"
    /** Credentials. */
    export interface Creds {
      user: string;
      #token: string;
    }
    "});

    insta::assert_snapshot!(printed, @r##"
    /** Credentials. */
    export interface Creds {
      user: string;
      "#token": string;
    }
    "##);
}

#[test]
fn redaction_preserves_member_count_and_shape() {
    let source = "interface A { a: string; #b: number; c: boolean; }";
    let parse = parse(source);
    let redacted = redact_private_members(&parse.syntax());

    let original = parse.root();
    let rewritten = Root::cast(redacted).unwrap();
    let count = |root: &Root| -> usize {
        root.decls()
            .filter_map(|d| match d {
                crate::parser::Decl::Interface(it) => it.body(),
                _ => None,
            })
            .map(|b| b.members().count())
            .sum()
    };
    assert_eq!(count(&original), count(&rewritten));
    // Everything except the private name is byte-identical.
    assert_eq!(
        rewritten.as_cst().text().to_string(),
        source.replace("#b", "\"#b\"")
    );
}

#[test]
fn printed_declarations_reparse_cleanly() {
    let printed = print_redacted(indoc! {r#"
    import { Retry } from "./common";
    export interface Config {
      retry: Retry;
      #cache: string;
      mode: "dev" | "prod";
      points: [number, number];
      onEvent: (name: string) => void;
    }
    "#});

    let reparse = parse(&printed);
    assert!(reparse.diagnostics().is_empty(), "{printed}");
}

#[test]
fn printer_normalizes_formatting() {
    let printed = print_redacted("export type Handler=(msg:string)=>void;");
    insta::assert_snapshot!(printed, @"export type Handler = (msg: string) => void;");
}

#[test]
fn pass_emits_one_artifact_per_module() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("main.dcl"),
        indoc! {r#"
        import { Retry } from "./common";
        export interface Config { retry: Retry; }
        "#},
    )
    .unwrap();
    fs::write(
        dir.path().join("common.dcl"),
        "export interface Retry { max: number; }",
    )
    .unwrap();

    let config = CompilerConfig::new(dir.path());
    let program = load_program(&[dir.path().join("main.dcl")], &config).unwrap();
    let (outcome, artifacts) = emit_declarations(&program, &config);

    assert_eq!(outcome, Outcome::Completed);
    let mut paths: Vec<_> = artifacts.iter().map(|a| a.path.clone()).collect();
    paths.sort();
    assert_eq!(
        paths,
        [
            dir.path().join("generated/types/common.d.dcl"),
            dir.path().join("generated/types/main.d.dcl"),
        ]
    );
}

#[test]
fn disabled_declaration_output_skips_the_pass() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("main.dcl"), "export type T = string;").unwrap();

    let config = CompilerConfig {
        declaration: false,
        ..CompilerConfig::new(dir.path())
    };
    let program = load_program(&[dir.path().join("main.dcl")], &config).unwrap();
    let (outcome, artifacts) = emit_declarations(&program, &config);

    assert_eq!(outcome, Outcome::Skipped);
    assert!(artifacts.is_empty());
}

#[test]
fn library_files_produce_no_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let libs = tempfile::tempdir().unwrap();
    fs::write(libs.path().join("std.dcl"), "export interface D { m: number; }").unwrap();
    fs::write(dir.path().join("main.dcl"), "export interface C { d: D; }").unwrap();

    let config = CompilerConfig {
        libs: vec![libs.path().join("std.dcl")],
        ..CompilerConfig::new(dir.path())
    };
    let program = load_program(&[dir.path().join("main.dcl")], &config).unwrap();
    let (_, artifacts) = emit_declarations(&program, &config);

    assert_eq!(artifacts.len(), 1);
    assert!(artifacts[0].path.ends_with("main.d.dcl"));
}
