//! Deterministic schema formatting.
//!
//! Formatting is a pure function of document, style, and output path. The
//! same inputs always produce the same bytes, so generated files are
//! stable across runs and machines.

mod style;


use std::path::Path;

use serde::Serialize;
use tracing::error;

use crate::schema::SchemaDocument;

pub use style::{Style, StyleResolver, STYLE_FILE_NAME};

/// Renders a schema document as pretty-printed JSON under the style
/// governing `output_path`.
pub fn format_document(
    document: &SchemaDocument,
    output_path: &Path,
    styles: &StyleResolver,
) -> String {
    let style = styles.resolve(output_path);
    let indent = " ".repeat(style.indent_width);
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    if let Err(e) = document.serialize(&mut serializer) {
        // Schema documents have string keys and finite numbers only, so
        // serialization failing means a bug upstream.
        error!(%e, "schema serialization failed, emitting compact form");
        return serde_json::to_string(document).unwrap_or_default();
    }
    let mut text = String::from_utf8(out).unwrap_or_default();
    if style.final_newline {
        text.push('\n');
    }
    text
}
