//! Tree rewriting for emission.
//!
//! The parse tree is lossless, so emission-time changes are expressed as
//! token substitutions over a rebuilt green tree rather than string
//! surgery. [`rewrite_tokens`] is the generic walk; redaction is the one
//! rewrite the declaration pass needs.

use rowan::{GreenNodeBuilder, Language, NodeOrToken};

use crate::parser::cst::DclLang;
use crate::parser::{SyntaxKind, SyntaxNode, SyntaxToken};

/// Rebuilds a tree, substituting any token for which `replace` returns a
/// new kind and text. Everything else is copied verbatim, trivia included.
pub fn rewrite_tokens<F>(node: &SyntaxNode, mut replace: F) -> SyntaxNode
where
    F: FnMut(&SyntaxToken) -> Option<(SyntaxKind, String)>,
{
    let mut builder = GreenNodeBuilder::new();
    rewrite_node(node, &mut builder, &mut replace);
    SyntaxNode::new_root(builder.finish())
}

fn rewrite_node<F>(node: &SyntaxNode, builder: &mut GreenNodeBuilder<'_>, replace: &mut F)
where
    F: FnMut(&SyntaxToken) -> Option<(SyntaxKind, String)>,
{
    builder.start_node(DclLang::kind_to_raw(node.kind()));
    for child in node.children_with_tokens() {
        match child {
            NodeOrToken::Node(child) => rewrite_node(&child, builder, replace),
            NodeOrToken::Token(token) => match replace(&token) {
                Some((kind, text)) => builder.token(DclLang::kind_to_raw(kind), &text),
                None => builder.token(DclLang::kind_to_raw(token.kind()), token.text()),
            },
        }
    }
    builder.finish_node();
}

/// Renames every private member to a quoted string literal carrying the
/// same `#`-prefixed text, so the emitted declaration stays structurally
/// identical while the name stops being a private identifier.
pub fn redact_private_members(root: &SyntaxNode) -> SyntaxNode {
    rewrite_tokens(root, |token| {
        if token.kind() != SyntaxKind::PrivateId {
            return None;
        }
        if token.parent().map(|p| p.kind()) != Some(SyntaxKind::Member) {
            return None;
        }
        Some((SyntaxKind::StringLiteral, format!("\"{}\"", token.text())))
    })
}
