//! File discovery and program loading.
//!
//! Root files come from include/exclude glob patterns under the project
//! root. Imports are followed transitively from the roots; a missing import
//! target is not a load error here, the checker reports it against the
//! importing file so the message carries a source span.

use std::collections::VecDeque;
use std::fs;
use std::path::{Component, Path, PathBuf};

use indexmap::IndexSet;
use tracing::debug;

use crate::config::{CompilerConfig, ModuleResolution, DEFAULT_EXCLUDES};
use crate::parser;
use crate::{Error, Result};

use super::{Program, SourceFile};

/// Expands include patterns under the configured root, dropping anything
/// matched by an exclude pattern, by the built-in defaults, or living under
/// the output directory. The result is sorted and deduplicated so discovery
/// order never depends on the filesystem.
pub fn expand_roots(
    config: &CompilerConfig,
    include: &[String],
    exclude: &[String],
) -> Result<Vec<PathBuf>> {
    let root_dir = config.root_dir.as_path();
    let out_dir = normalize(&config.out_dir);
    let declaration_dir = normalize(&config.declaration_dir());
    let mut exclude_patterns = Vec::new();
    for pattern in exclude.iter().map(String::as_str).chain(DEFAULT_EXCLUDES.iter().copied()) {
        let compiled = glob::Pattern::new(pattern)
            .map_err(|e| Error::Configuration(format!("invalid exclude pattern `{pattern}`: {e}")))?;
        exclude_patterns.push(compiled);
    }

    let mut roots = IndexSet::new();
    for pattern in include {
        let full = root_dir.join(pattern);
        let paths = glob::glob(&full.to_string_lossy())
            .map_err(|e| Error::Configuration(format!("invalid include pattern `{pattern}`: {e}")))?;
        for entry in paths {
            let path = entry.map_err(|e| Error::Io(e.into()))?;
            if !path.is_file() {
                continue;
            }
            let path = normalize(&path);
            if path.starts_with(&out_dir) || path.starts_with(&declaration_dir) {
                continue;
            }
            let relative = path.strip_prefix(root_dir).unwrap_or(&path);
            if exclude_patterns.iter().any(|p| p.matches_path(relative)) {
                continue;
            }
            roots.insert(path);
        }
    }

    let mut roots: Vec<_> = roots.into_iter().collect();
    roots.sort();
    Ok(roots)
}

/// Parses the root files and everything they import, then assembles and
/// checks the program. Library files from the compiler config are loaded
/// first and are visible to every file without imports.
pub fn load_program(roots: &[PathBuf], config: &CompilerConfig) -> Result<Program> {
    if roots.is_empty() {
        return Err(Error::Configuration(
            "no input files to compile".to_string(),
        ));
    }
    for root in roots {
        if !root.exists() {
            return Err(Error::Configuration(format!(
                "input file `{}` does not exist",
                root.display()
            )));
        }
        if root.is_absolute()
            && config.root_dir.is_absolute()
            && !normalize(root).starts_with(normalize(&config.root_dir))
        {
            return Err(Error::Configuration(format!(
                "input file `{}` is outside the project root `{}`",
                root.display(),
                config.root_dir.display()
            )));
        }
    }

    let mut files = Vec::new();
    let mut loaded: IndexSet<PathBuf> = IndexSet::new();
    let mut queue: VecDeque<(PathBuf, bool)> = VecDeque::new();
    for lib in &config.libs {
        queue.push_back((normalize(lib), true));
    }
    for root in roots {
        queue.push_back((normalize(root), false));
    }

    while let Some((path, is_lib)) = queue.pop_front() {
        if !loaded.insert(path.clone()) {
            continue;
        }
        debug!(path = %path.display(), is_lib, "loading declaration file");
        let text = fs::read_to_string(&path)?;
        let parse = parser::parse(&text);

        for import in parse.root().imports() {
            if let Some(spec) = import.module_path() {
                let target = resolve_module(&spec, &path, config);
                if target.is_file() {
                    queue.push_back((target, false));
                }
            }
        }

        files.push(SourceFile {
            path,
            text,
            parse,
            is_lib,
        });
    }

    Program::assemble(files, config)
}

/// Maps an import specifier to the file it names. The `.dcl` extension is
/// implied when the specifier has none.
pub(crate) fn resolve_module(spec: &str, importer: &Path, config: &CompilerConfig) -> PathBuf {
    let base = match config.module_resolution {
        ModuleResolution::Relative => importer.parent().unwrap_or(Path::new("")),
        ModuleResolution::RootRelative => config.root_dir.as_path(),
    };
    let mut target = base.join(spec);
    if target.extension().is_none() {
        target.set_extension("dcl");
    }
    normalize(&target)
}

/// Lexical path cleanup: drops `.` components and folds `..` into its
/// parent where one is known. No filesystem access.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(
                    out.components().next_back(),
                    Some(Component::Normal(_))
                ) && out.pop();
                if !popped {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}
