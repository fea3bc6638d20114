//! Program loading and name resolution.
//!
//! A [`Program`] is a set of parsed declaration files with a symbol table
//! over their named declarations. Loading is all-or-nothing: any file with
//! error diagnostics fails the whole load with [`Error::Compilation`], so a
//! program in hand is always internally consistent. Warnings survive the
//! load and are carried on the program for callers to surface.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::config::CompilerConfig;
use crate::diagnostics::FileDiagnostics;
use crate::parser::{self, Decl, Parse, Root};
use crate::{Error, Result};

mod checker;
mod loader;
mod lower;
pub mod shape;


pub use loader::{expand_roots, load_program};
pub use shape::{DocInfo, DocTag, LiteralValue, MemberShape, ObjectShape, TypeShape};

/// Type names resolved without a declaration in scope.
pub const BUILTIN_TYPES: &[&str] = &[
    "string",
    "number",
    "integer",
    "boolean",
    "null",
    "undefined",
    "void",
    "any",
    "unknown",
];

/// One parsed declaration file.
#[derive(Debug)]
pub struct SourceFile {
    pub path: PathBuf,
    pub text: String,
    pub parse: Parse,
    /// Ambient library file, visible to every other file without imports.
    pub is_lib: bool,
}

impl SourceFile {
    pub fn root(&self) -> Root {
        self.parse.root()
    }

    pub fn decls(&self) -> impl Iterator<Item = Decl> {
        self.root().decls().collect::<Vec<_>>().into_iter()
    }

    pub fn decl(&self, name: &str) -> Option<Decl> {
        self.decls()
            .find(|d| d.name().is_some_and(|t| t.text() == name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Symbol {
    pub file: usize,
    pub exported: bool,
}

/// A loaded, checked set of declaration files.
#[derive(Debug)]
pub struct Program {
    files: Vec<SourceFile>,
    symbols: IndexMap<String, Symbol>,
    warnings: Vec<FileDiagnostics>,
}

impl Program {
    /// Assembles a program from parsed files, running all semantic checks.
    /// Files must be in load order with library files first.
    pub(crate) fn assemble(files: Vec<SourceFile>, config: &CompilerConfig) -> Result<Self> {
        let (symbols, reports) = checker::check(&files, config);

        let mut failures = Vec::new();
        let mut warnings = Vec::new();
        for report in reports {
            if report.diagnostics.has_errors() {
                failures.push(report);
            } else if !report.diagnostics.is_empty() {
                warnings.push(report);
            }
        }
        if !failures.is_empty() {
            return Err(Error::Compilation(failures));
        }

        Ok(Self {
            files,
            symbols,
            warnings,
        })
    }

    /// Compiles a single in-memory source, using default compiler settings.
    /// Convenient for tests and small embeddings; imports cannot resolve
    /// without a root directory and will be reported as errors.
    pub fn from_source(path: impl Into<PathBuf>, source: &str) -> Result<Self> {
        let path = path.into();
        let config = CompilerConfig::new(path.parent().unwrap_or(Path::new(".")).to_path_buf());
        let file = SourceFile {
            text: source.to_string(),
            parse: parser::parse(source),
            path,
            is_lib: false,
        };
        Self::assemble(vec![file], &config)
    }

    pub fn files(&self) -> impl Iterator<Item = &SourceFile> {
        self.files.iter()
    }

    pub fn file(&self, path: &Path) -> Option<&SourceFile> {
        self.files.iter().find(|f| f.path == path)
    }

    /// Warnings that survived loading, grouped per file.
    pub fn warnings(&self) -> &[FileDiagnostics] {
        &self.warnings
    }

    /// Looks up a declaration by name anywhere in the program.
    pub fn resolve(&self, name: &str) -> Option<(&SourceFile, Decl)> {
        let symbol = self.symbols.get(name)?;
        let file = &self.files[symbol.file];
        let decl = file.decl(name)?;
        Some((file, decl))
    }

    pub fn is_exported(&self, name: &str) -> bool {
        self.symbols.get(name).is_some_and(|s| s.exported)
    }

    /// All declaration names in load order.
    pub fn declared_names(&self) -> impl Iterator<Item = &str> {
        self.symbols.keys().map(String::as_str)
    }

    /// The effective shape of a named declaration.
    pub fn shape_of(&self, name: &str) -> Result<TypeShape> {
        let (_, decl) = self
            .resolve(name)
            .ok_or_else(|| Error::UnresolvedType(name.to_string()))?;
        Ok(lower::lower_decl(self, &decl))
    }

    /// Documentation attached to a named declaration, if any.
    pub fn doc_of(&self, name: &str) -> Option<DocInfo> {
        let (_, decl) = self.resolve(name)?;
        let token = match &decl {
            Decl::Interface(it) => it.doc(),
            Decl::Alias(alias) => alias.doc(),
        }?;
        Some(DocInfo::parse(token.text()))
    }
}
