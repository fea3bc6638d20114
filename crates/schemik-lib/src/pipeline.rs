//! The generation pipeline.
//!
//! One invocation is: discover roots, load and check the program, run the
//! declaration pass, extract and format every configured entry, then
//! commit all artifacts through the gate. Entries are independent: a
//! failed entry is recorded and the rest proceed.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::ProjectConfig;
use crate::emit::{self, Gate, Outcome, OutputArtifact};
use crate::format::{format_document, StyleResolver};
use crate::program::{expand_roots, load_program};
use crate::schema::{extract, ExtractOptions, TypeRequest};
use crate::Result;

/// What one [`generate`] run did.
#[derive(Debug)]
pub struct GenerateReport {
    pub outcome: Outcome,
    /// Paths actually written, in commit order.
    pub written: Vec<PathBuf>,
    pub entries: Vec<EntryReport>,
    /// Rendered per-file warnings that survived loading.
    pub warnings: Vec<String>,
}

impl GenerateReport {
    pub fn has_failures(&self) -> bool {
        self.entries.iter().any(|e| e.error.is_some())
    }
}

#[derive(Debug)]
pub struct EntryReport {
    pub name: String,
    pub output_file: PathBuf,
    /// Set when this entry failed; other entries are unaffected.
    pub error: Option<String>,
}

/// Runs a full generation for a project configuration.
pub fn generate(config: &ProjectConfig) -> Result<GenerateReport> {
    let compiler = &config.compiler;
    let roots = expand_roots(compiler, &config.include, &config.exclude)?;
    info!(files = roots.len(), root = %compiler.root_dir.display(), "loading program");
    let program = load_program(&roots, compiler)?;

    let (outcome, mut artifacts) = emit::emit_declarations(&program, compiler);
    let styles = StyleResolver::new(&compiler.root_dir);

    let mut entries = Vec::with_capacity(config.entries.len());
    for (name, entry) in &config.entries {
        let request = if entry.types.is_wildcard() {
            TypeRequest::Wildcard
        } else {
            TypeRequest::names(entry.types.names().iter().cloned())
        };
        let options = ExtractOptions::from(entry.profile);
        let output_path = compiler.out_dir.join(&entry.output_file);
        debug!(entry = %name, output = %output_path.display(), "extracting entry");

        let error = match extract(&program, &request, &options) {
            Ok(document) => {
                artifacts.push(OutputArtifact {
                    contents: format_document(&document, &output_path, &styles),
                    path: output_path.clone(),
                });
                None
            }
            Err(e) => Some(e.to_string()),
        };
        entries.push(EntryReport {
            name: name.clone(),
            output_file: output_path,
            error,
        });
    }

    let written = Gate::commit(outcome, artifacts)?;
    info!(written = written.len(), "generation finished");

    Ok(GenerateReport {
        outcome,
        written,
        entries,
        warnings: program.warnings().iter().map(|w| w.render()).collect(),
    })
}
