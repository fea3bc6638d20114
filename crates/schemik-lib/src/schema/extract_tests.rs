use indoc::indoc;

use crate::program::Program;
use crate::Error;

use super::{extract, ExtractOptions, FunctionPolicy, SchemaDocument, TypeRequest};

fn compile(source: &str) -> Program {
    Program::from_source("test.dcl", source).unwrap()
}

fn pretty(doc: &SchemaDocument) -> String {
    serde_json::to_string_pretty(doc).unwrap()
}

#[test]
fn object_with_optional_member() {
    let program = compile("export interface Config { a: string; b?: number; }");
    let doc = extract(
        &program,
        &TypeRequest::names(["Config"]),
        &ExtractOptions::standard(),
    )
    .unwrap();

    insta::assert_snapshot!(pretty(&doc), @r##"
    {
      "$schema": "http://json-schema.org/draft-07/schema#",
      "$ref": "#/definitions/Config",
      "definitions": {
        "Config": {
          "type": "object",
          "properties": {
            "a": {
              "type": "string"
            },
            "b": {
              "type": "number"
            }
          },
          "required": [
            "a"
          ],
          "additionalProperties": false
        }
      }
    }
    "##);
}

#[test]
fn undefined_admission_removes_from_required() {
    let program = compile("export interface A { a: string | undefined; b: string; }");
    let doc = extract(
        &program,
        &TypeRequest::names(["A"]),
        &ExtractOptions::standard(),
    )
    .unwrap();

    let definition = &doc.definitions["A"];
    assert_eq!(definition.required, ["b"]);
    assert_eq!(definition.properties["a"].ty, Some("string"));
}

#[test]
fn boolean_or_object_member() {
    let program = compile(indoc! {"
    export interface Build {
      minify: boolean | ({ enabled?: boolean } & { level: number });
    }
    "});
    let doc = extract(
        &program,
        &TypeRequest::names(["Build"]),
        &ExtractOptions::standard(),
    )
    .unwrap();

    insta::assert_snapshot!(pretty(&doc), @r##"
    {
      "$schema": "http://json-schema.org/draft-07/schema#",
      "$ref": "#/definitions/Build",
      "definitions": {
        "Build": {
          "type": "object",
          "properties": {
            "minify": {
              "anyOf": [
                {
                  "type": "boolean"
                },
                {
                  "type": "object",
                  "properties": {
                    "enabled": {
                      "type": "boolean"
                    },
                    "level": {
                      "type": "number"
                    }
                  },
                  "required": [
                    "level"
                  ],
                  "additionalProperties": false
                }
              ]
            }
          },
          "required": [
            "minify"
          ],
          "additionalProperties": false
        }
      }
    }
    "##);
}

#[test]
fn shared_named_type_is_defined_once() {
    let program = compile(indoc! {"
    export interface Point { x: number; y: number; }
    export interface Line { from: Point; to: Point; }
    "});
    let doc = extract(
        &program,
        &TypeRequest::names(["Line"]),
        &ExtractOptions::standard(),
    )
    .unwrap();

    assert_eq!(doc.definitions.len(), 2);
    let line = &doc.definitions["Line"];
    assert_eq!(
        line.properties["from"].reference.as_deref(),
        Some("#/definitions/Point")
    );
    assert_eq!(
        line.properties["to"].reference.as_deref(),
        Some("#/definitions/Point")
    );
}

#[test]
fn literal_union_collapses_to_enum() {
    let program = compile(r#"export type Mode = "light" | "dark";"#);
    let doc = extract(
        &program,
        &TypeRequest::names(["Mode"]),
        &ExtractOptions::standard(),
    )
    .unwrap();

    let expected: Vec<serde_json::Value> = vec!["light".into(), "dark".into()];
    assert_eq!(doc.definitions["Mode"].enum_values, expected);
}

#[test]
fn recursive_type_terminates_with_a_ref() {
    let program = compile("export interface Node { value: string; next?: Node; }");
    let doc = extract(
        &program,
        &TypeRequest::names(["Node"]),
        &ExtractOptions::standard(),
    )
    .unwrap();

    let node = &doc.definitions["Node"];
    assert_eq!(
        node.properties["next"].reference.as_deref(),
        Some("#/definitions/Node")
    );
    assert_eq!(node.required, ["value"]);
}

#[test]
fn inlined_profile_expands_named_types_in_place() {
    let program = compile(indoc! {"
    export interface Inner { x: number; }
    export interface Outer { inner: Inner; }
    "});
    let doc = extract(
        &program,
        &TypeRequest::names(["Outer"]),
        &ExtractOptions::inlined(),
    )
    .unwrap();

    assert!(doc.definitions.is_empty());
    assert_eq!(doc.root.ty, Some("object"));
    let inner = &doc.root.properties["inner"];
    assert!(inner.reference.is_none());
    assert_eq!(inner.properties["x"].ty, Some("number"));
}

#[test]
fn inlined_profile_still_refs_on_cycles() {
    let program = compile("export interface Node { next?: Node; }");
    let doc = extract(
        &program,
        &TypeRequest::names(["Node"]),
        &ExtractOptions::inlined(),
    )
    .unwrap();

    assert_eq!(
        doc.root.properties["next"].reference.as_deref(),
        Some("#/definitions/Node")
    );
    // The forced definition must exist for the ref to resolve.
    assert!(doc.definitions.contains_key("Node"));
}

#[test]
fn strict_profile_bounds_tuples() {
    let program = compile("export type Point = [number, number];");
    let doc = extract(
        &program,
        &TypeRequest::names(["Point"]),
        &ExtractOptions::strict(),
    )
    .unwrap();

    let point = &doc.definitions["Point"];
    assert_eq!(point.min_items, Some(2));
    assert_eq!(point.max_items, Some(2));
}

#[test]
fn loose_tuples_have_no_bounds() {
    let program = compile("export type Point = [number, number];");
    let doc = extract(
        &program,
        &TypeRequest::names(["Point"]),
        &ExtractOptions::standard(),
    )
    .unwrap();

    let point = &doc.definitions["Point"];
    assert_eq!(point.min_items, None);
    assert_eq!(point.max_items, None);
}

#[test]
fn strict_profile_tags_discriminated_unions() {
    let program = compile(indoc! {r#"
    export interface Circle { kind: "circle"; radius: number; }
    export interface Square { kind: "square"; size: number; }
    export type Shape = Circle | Square;
    "#});
    let doc = extract(
        &program,
        &TypeRequest::names(["Shape"]),
        &ExtractOptions::strict(),
    )
    .unwrap();

    let shape = &doc.definitions["Shape"];
    assert_eq!(shape.one_of.len(), 2);
    assert_eq!(
        shape.discriminator.as_ref().map(|d| d.property_name.as_str()),
        Some("kind")
    );
}

#[test]
fn standard_profile_uses_any_of_for_unions() {
    let program = compile(indoc! {r#"
    export interface Circle { kind: "circle"; radius: number; }
    export interface Square { kind: "square"; size: number; }
    export type Shape = Circle | Square;
    "#});
    let doc = extract(
        &program,
        &TypeRequest::names(["Shape"]),
        &ExtractOptions::standard(),
    )
    .unwrap();

    let shape = &doc.definitions["Shape"];
    assert_eq!(shape.any_of.len(), 2);
    assert!(shape.discriminator.is_none());
}

#[test]
fn private_members_never_reach_the_schema() {
    let program = compile("export interface Creds { user: string; #token: string; }");
    let doc = extract(
        &program,
        &TypeRequest::names(["Creds"]),
        &ExtractOptions::standard(),
    )
    .unwrap();

    let creds = &doc.definitions["Creds"];
    assert_eq!(creds.properties.len(), 1);
    assert!(creds.properties.contains_key("user"));
    assert_eq!(creds.required, ["user"]);
}

#[test]
fn hidden_functions_are_omitted() {
    let program = compile("export interface Hooks { name: string; onBuild: (msg: string) => void; }");
    let doc = extract(
        &program,
        &TypeRequest::names(["Hooks"]),
        &ExtractOptions::standard(),
    )
    .unwrap();

    let hooks = &doc.definitions["Hooks"];
    assert!(!hooks.properties.contains_key("onBuild"));
    assert_eq!(hooks.required, ["name"]);
}

#[test]
fn failing_on_functions_names_the_member() {
    let program = compile("export interface Hooks { onBuild: (msg: string) => void; }");
    let options = ExtractOptions {
        functions: FunctionPolicy::Fail,
        ..ExtractOptions::standard()
    };
    let err = extract(&program, &TypeRequest::names(["Hooks"]), &options).unwrap_err();
    assert!(err.to_string().contains("onBuild"));
}

#[test]
fn extended_doc_tags_become_schema_keywords() {
    let program = compile(indoc! {"
    /** Build configuration. */
    export interface Config {
      /**
       * Maximum retry count.
       * @default 3
       * @title Retries
       * @deprecated
       * @examples 5
       */
      retries: number;
    }
    "});
    let doc = extract(
        &program,
        &TypeRequest::names(["Config"]),
        &ExtractOptions::standard(),
    )
    .unwrap();

    let config = &doc.definitions["Config"];
    assert_eq!(config.description.as_deref(), Some("Build configuration."));

    let retries = &config.properties["retries"];
    assert_eq!(retries.description.as_deref(), Some("Maximum retry count."));
    assert_eq!(retries.default, Some(3.into()));
    assert_eq!(retries.title.as_deref(), Some("Retries"));
    assert!(retries.deprecated);
    assert_eq!(retries.examples, [serde_json::Value::from(5)]);
}

#[test]
fn basic_doc_policy_keeps_descriptions_only() {
    let program = compile(indoc! {"
    export interface Config {
      /**
       * Maximum retry count.
       * @default 3
       */
      retries: number;
    }
    "});
    let doc = extract(
        &program,
        &TypeRequest::names(["Config"]),
        &ExtractOptions::inlined(),
    )
    .unwrap();

    let retries = &doc.root.properties["retries"];
    assert_eq!(retries.description.as_deref(), Some("Maximum retry count."));
    assert_eq!(retries.default, None);
}

#[test]
fn properties_sort_lexicographically_by_default() {
    let program = compile("export interface C { zeta: string; alpha: string; mid: string; }");
    let doc = extract(
        &program,
        &TypeRequest::names(["C"]),
        &ExtractOptions::standard(),
    )
    .unwrap();

    let keys: Vec<_> = doc.definitions["C"].properties.keys().collect();
    assert_eq!(keys, ["alpha", "mid", "zeta"]);
    assert_eq!(doc.definitions["C"].required, ["alpha", "mid", "zeta"]);
}

#[test]
fn unsorted_properties_keep_declaration_order() {
    let program = compile("export interface C { zeta: string; alpha: string; }");
    let options = ExtractOptions {
        sort_props: false,
        ..ExtractOptions::standard()
    };
    let doc = extract(&program, &TypeRequest::names(["C"]), &options).unwrap();

    let keys: Vec<_> = doc.definitions["C"].properties.keys().collect();
    assert_eq!(keys, ["zeta", "alpha"]);
}

#[test]
fn wildcard_takes_every_exported_type() {
    let program = compile(indoc! {"
    export interface A { x: string; }
    export interface B { y: string; }
    interface Internal { z: string; }
    "});
    let doc = extract(&program, &TypeRequest::wildcard(), &ExtractOptions::standard()).unwrap();

    assert!(doc.definitions.contains_key("A"));
    assert!(doc.definitions.contains_key("B"));
    assert!(!doc.definitions.contains_key("Internal"));
    assert!(doc.root.reference.is_none());
}

#[test]
fn unresolved_request_fails_with_the_name() {
    let program = compile("export interface A { x: string; }");
    let err = extract(
        &program,
        &TypeRequest::names(["Missing"]),
        &ExtractOptions::standard(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::UnresolvedType(name) if name == "Missing"));
}

#[test]
fn extraction_is_deterministic() {
    let program = compile(indoc! {"
    export interface Point { x: number; y: number; }
    export interface Line { from: Point; to: Point; }
    "});
    let request = TypeRequest::names(["Line"]);
    let options = ExtractOptions::standard();

    let first = pretty(&extract(&program, &request, &options).unwrap());
    let second = pretty(&extract(&program, &request, &options).unwrap());
    assert_eq!(first, second);
}
