//! Schemik: JSON Schema generation from typed configuration declarations.
//!
//! A `.dcl` source tree describes the configuration surface of a project as
//! interfaces and type aliases. Schemik compiles that tree into an in-memory
//! program, resolves the requested type names, and derives one JSON Schema
//! document per configured output entry.
//!
//! # Example
//!
//! ```
//! use schemik_lib::program::Program;
//! use schemik_lib::schema::{extract, ExtractOptions, TypeRequest};
//!
//! let program = Program::from_source(
//!     "config.dcl",
//!     r#"export interface Config { entry: string; retries?: number; }"#,
//! )
//! .expect("single-file programs with valid source always load");
//!
//! let doc = extract(
//!     &program,
//!     &TypeRequest::names(["Config"]),
//!     &ExtractOptions::standard(),
//! )
//! .unwrap();
//! assert!(doc.definitions.contains_key("Config"));
//! ```

pub mod config;
pub mod diagnostics;
pub mod emit;
pub mod format;
pub mod parser;
pub mod pipeline;
#[cfg(test)]
mod pipeline_tests;
pub mod program;
pub mod schema;

pub use diagnostics::{Diagnostics, FileDiagnostics, Severity};

/// Errors surfaced by program loading, extraction, and emission.
///
/// `Configuration` and `Compilation` abort the whole invocation before any
/// artifact is written. `UnresolvedType` is scoped to a single output entry;
/// sibling entries still proceed.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid roots, paths, or glob results. Raised before any compilation.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// One or more source files failed to parse, resolve, or type-check.
    #[error("compilation failed with {} errors across {} files", total_errors(.0), .0.len())]
    Compilation(Vec<FileDiagnostics>),

    /// A requested type name did not resolve to exactly one declaration.
    #[error("type `{0}` does not resolve to exactly one declaration in the program")]
    UnresolvedType(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn total_errors(failures: &[FileDiagnostics]) -> usize {
    failures.iter().map(|f| f.diagnostics.error_count()).sum()
}

/// Result type for schemik operations.
pub type Result<T> = std::result::Result<T, Error>;
