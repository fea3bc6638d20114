use indoc::indoc;

use super::{parse, unquote, Decl, TypeExpr};

#[test]
fn decl_names_and_export_flags() {
    let parse = parse(indoc! {r#"
    export interface Config { a: string; }
    type Internal = number;
    "#});
    let root = parse.root();
    let decls: Vec<Decl> = root.decls().collect();
    assert_eq!(decls.len(), 2);

    assert_eq!(decls[0].name().unwrap().text(), "Config");
    assert!(decls[0].is_exported());
    assert_eq!(decls[1].name().unwrap().text(), "Internal");
    assert!(!decls[1].is_exported());
}

#[test]
fn member_names_unquote_and_keep_private_prefix() {
    let parse = parse(indoc! {r#"
    interface Creds {
      user: string;
      #token: string;
      "api key"?: string;
    }
    "#});
    let root = parse.root();
    let Some(Decl::Interface(it)) = root.decls().next() else {
        panic!("expected an interface");
    };
    let members: Vec<_> = it.body().unwrap().members().collect();

    assert_eq!(members[0].name().unwrap(), "user");
    assert!(!members[0].is_private());

    assert_eq!(members[1].name().unwrap(), "#token");
    assert!(members[1].is_private());

    assert_eq!(members[2].name().unwrap(), "api key");
    assert!(members[2].is_optional());
    assert!(!members[2].is_private());
}

#[test]
fn optionality_is_per_member_not_per_type() {
    let parse = parse("interface A { a?: string; b: string | undefined; }");
    let Some(Decl::Interface(it)) = parse.root().decls().next() else {
        panic!("expected an interface");
    };
    let members: Vec<_> = it.body().unwrap().members().collect();
    assert!(members[0].is_optional());
    // `b` is not `?`-marked; undefined-admission is a shape concern.
    assert!(!members[1].is_optional());
}

#[test]
fn doc_comments_attach_to_decls_and_members() {
    let parse = parse(indoc! {r#"
    /** Top-level settings. */
    export interface Config {
      /** Entry point path. */
      entry: string;
      retries: number;
    }
    "#});
    let Some(Decl::Interface(it)) = parse.root().decls().next() else {
        panic!("expected an interface");
    };
    assert_eq!(it.doc().unwrap().text(), "/** Top-level settings. */");

    let members: Vec<_> = it.body().unwrap().members().collect();
    assert_eq!(members[0].doc().unwrap().text(), "/** Entry point path. */");
    assert!(members[1].doc().is_none());
}

#[test]
fn import_names_and_module_path() {
    let parse = parse(r#"import { Retry, Timeout } from "./common";"#);
    let import = parse.root().imports().next().unwrap();
    let names: Vec<String> = import.names().map(|t| t.text().to_string()).collect();
    assert_eq!(names, ["Retry", "Timeout"]);
    assert_eq!(import.module_path().unwrap(), "./common");
}

#[test]
fn extends_clause_names_the_base() {
    let parse = parse("interface B extends A { x: string; }");
    let Some(Decl::Interface(it)) = parse.root().decls().next() else {
        panic!("expected an interface");
    };
    assert_eq!(it.extends().unwrap().name().unwrap().text(), "A");
}

#[test]
fn alias_type_expression_casts() {
    let parse = parse("type T = string | [number, boolean];");
    let Some(Decl::Alias(alias)) = parse.root().decls().next() else {
        panic!("expected an alias");
    };
    let Some(TypeExpr::Union(union)) = alias.ty() else {
        panic!("expected a union");
    };
    let variants: Vec<_> = union.variants().collect();
    assert_eq!(variants.len(), 2);
    assert!(matches!(variants[0], TypeExpr::Ref(_)));
    assert!(matches!(variants[1], TypeExpr::Tuple(_)));
}

#[test]
fn unquote_handles_escapes() {
    assert_eq!(unquote(r#""plain""#), "plain");
    assert_eq!(unquote(r#""a \"b\" c""#), "a \"b\" c");
    assert_eq!(unquote(r#""line\nbreak""#), "line\nbreak");
}
