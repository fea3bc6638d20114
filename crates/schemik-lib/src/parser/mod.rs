//! Parser infrastructure for the declaration language.
//!
//! # Architecture
//!
//! The parser produces a lossless concrete syntax tree (CST) via Rowan's
//! green tree builder. Key decisions follow rust-analyzer-style parsing:
//!
//! - Zero-copy lexing: tokens carry spans, text sliced only when building tree nodes
//! - Trivia buffering: whitespace/comments collected, then attached as leading trivia
//! - Checkpoint-based wrapping: retroactively wrap nodes for unions and array postfix
//! - Explicit recovery sets: per-production sets determine when to bail vs consume
//!
//! The parser is resilient - it always produces a tree. Diagnostics are
//! returned separately; Error nodes in the tree mark recovery points.

pub mod ast;
pub mod cst;
pub mod lexer;

mod core;
mod grammar;

#[cfg(test)]
mod ast_tests;
#[cfg(test)]
mod lexer_tests;

pub use ast::{Decl, Member, ObjectType, Root, TypeExpr, unquote};
pub use cst::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

use crate::diagnostics::Diagnostics;
use core::Parser;
use lexer::lex;

/// Parse result containing the green tree.
///
/// The tree is always complete - diagnostics are returned separately.
#[derive(Debug, Clone)]
pub struct Parse {
    cst: rowan::GreenNode,
    diagnostics: Diagnostics,
}

impl Parse {
    /// Creates a typed view over the immutable green tree.
    /// This is cheap - SyntaxNode is a thin wrapper with parent pointers.
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.cst.clone())
    }

    pub fn root(&self) -> Root {
        Root::cast(self.syntax()).expect("parser always produces Root")
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Indented tree of non-trivia nodes and tokens, for tests and debugging.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        dump_node(&self.syntax(), 0, &mut out);
        out
    }
}

/// Main entry point. Always succeeds; malformed input is reflected in the
/// returned diagnostics and Error nodes.
pub fn parse(source: &str) -> Parse {
    let mut parser = Parser::new(source, lex(source));
    parser.parse_root();
    let (cst, diagnostics) = parser.finish();
    Parse { cst, diagnostics }
}

fn dump_node(node: &SyntaxNode, depth: usize, out: &mut String) {
    use std::fmt::Write;

    writeln!(out, "{}{:?}", "  ".repeat(depth), node.kind()).unwrap();
    for child in node.children_with_tokens() {
        match child {
            SyntaxElement::Node(n) => dump_node(&n, depth + 1, out),
            SyntaxElement::Token(t) => {
                if !t.kind().is_trivia() {
                    writeln!(
                        out,
                        "{}{:?} {:?}",
                        "  ".repeat(depth + 1),
                        t.kind(),
                        t.text()
                    )
                    .unwrap();
                }
            }
        }
    }
}
