use super::cst::SyntaxKind;
use super::lexer::{lex, token_text};

fn kinds(source: &str) -> Vec<SyntaxKind> {
    lex(source)
        .iter()
        .map(|t| t.kind)
        .filter(|k| !k.is_trivia())
        .collect()
}

#[test]
fn punctuation_and_keywords() {
    use SyntaxKind::*;
    assert_eq!(
        kinds("export interface Config { a?: string; }"),
        vec![
            KwExport, KwInterface, Id, BraceOpen, Id, Question, Colon, Id, Semi, BraceClose
        ]
    );
}

#[test]
fn arrow_wins_over_equals() {
    use SyntaxKind::*;
    assert_eq!(kinds("= =>"), vec![Equals, Arrow]);
}

#[test]
fn private_identifier() {
    let tokens = lex("#cache: string");
    assert_eq!(tokens[0].kind, SyntaxKind::PrivateId);
    assert_eq!(token_text("#cache: string", &tokens[0]), "#cache");
}

#[test]
fn string_literal_with_escapes() {
    let source = r#""a \"quoted\" path""#;
    let tokens = lex(source);
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, SyntaxKind::StringLiteral);
    assert_eq!(token_text(source, &tokens[0]), source);
}

#[test]
fn numbers_including_negative_and_decimal() {
    use SyntaxKind::*;
    assert_eq!(kinds("1 -2 3.5"), vec![NumberLiteral, NumberLiteral, NumberLiteral]);
}

#[test]
fn doc_comment_is_distinct_from_block_comment() {
    let source = "/** doc */ /* plain */";
    let tokens = lex(source);
    assert_eq!(tokens[0].kind, SyntaxKind::DocComment);
    assert_eq!(tokens[2].kind, SyntaxKind::BlockComment);
}

#[test]
fn keywords_are_not_identifiers() {
    use SyntaxKind::*;
    assert_eq!(kinds("type typeof"), vec![KwType, Id]);
}

#[test]
fn unrecognized_runs_coalesce_into_one_garbage_token() {
    let source = "a @@@ b";
    let tokens = lex(source);
    let garbage: Vec<_> = tokens
        .iter()
        .filter(|t| t.kind == SyntaxKind::Garbage)
        .collect();
    assert_eq!(garbage.len(), 1);
    assert_eq!(token_text(source, garbage[0]), "@@@");
}
