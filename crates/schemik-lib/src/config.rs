//! Compiler configuration and the `schemik.json` project manifest.
//!
//! Every knob that affects output is explicit here. There are no
//! environment-derived defaults: the same configuration applied to the same
//! source tree yields byte-identical artifacts.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Patterns that are never treated as program roots, even when the include
/// globs match them. The configured output directory is excluded as well.
pub const DEFAULT_EXCLUDES: &[&str] = &[
    "**/*.test.dcl",
    "**/vendor/**",
    "**/docs/**",
    "**/.*/**",
];

/// How import specifiers are resolved to files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModuleResolution {
    /// Relative to the importing file (`./utils` next to the importer).
    #[default]
    Relative,
    /// Relative to the configured root directory.
    RootRelative,
}

/// Syntax level the source tree is allowed to use.
///
/// Private members (`#name`) are a `Modern` feature; under `Legacy` they are
/// a compile error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LanguageLevel {
    Legacy,
    #[default]
    Modern,
}

/// All knobs needed to build a program deterministically.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompilerConfig {
    /// Directory all roots must live under. Import resolution and glob
    /// expansion are anchored here.
    pub root_dir: PathBuf,

    /// Directory generated artifacts are written to.
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    #[serde(default)]
    pub module_resolution: ModuleResolution,

    /// Whether the declaration-emission pass produces `.d.dcl` artifacts.
    /// When false the pass reports a skipped outcome and nothing is written.
    #[serde(default = "default_true")]
    pub declaration: bool,

    /// Where emitted declarations go. Defaults to `<outDir>/types`.
    #[serde(default)]
    pub declaration_dir: Option<PathBuf>,

    #[serde(default)]
    pub language_level: LanguageLevel,

    /// Ambient declaration files loaded into every program before the roots.
    /// Their exported types are in scope without imports.
    #[serde(default)]
    pub libs: Vec<PathBuf>,

    /// Promote warnings (empty interfaces, `any` usage) to errors.
    #[serde(default)]
    pub strict: bool,
}

fn default_true() -> bool {
    true
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("generated")
}

impl CompilerConfig {
    /// Minimal configuration rooted at `root_dir`, artifacts under
    /// `<root_dir>/generated`.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        let root_dir = root_dir.into();
        let out_dir = root_dir.join("generated");
        Self {
            root_dir,
            out_dir,
            module_resolution: ModuleResolution::default(),
            declaration: true,
            declaration_dir: None,
            language_level: LanguageLevel::default(),
            libs: Vec::new(),
            strict: false,
        }
    }

    pub fn declaration_dir(&self) -> PathBuf {
        self.declaration_dir
            .clone()
            .unwrap_or_else(|| self.out_dir.join("types"))
    }
}

/// One configured output: a schema file derived from one or more type names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OutputEntry {
    /// Destination path, relative to the output directory.
    pub output_file: PathBuf,

    /// Requested type names, or `"*"` for every exported type.
    pub types: TypeSelection,

    /// Extraction profile. Defaults to `standard`.
    #[serde(default)]
    pub profile: Profile,
}

/// `"Config"`, `["A", "B"]`, or `"*"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeSelection {
    One(String),
    Many(Vec<String>),
}

impl TypeSelection {
    pub fn is_wildcard(&self) -> bool {
        matches!(self, TypeSelection::One(s) if s == "*")
    }

    pub fn names(&self) -> &[String] {
        match self {
            TypeSelection::One(name) => std::slice::from_ref(name),
            TypeSelection::Many(names) => names,
        }
    }
}

/// Named extraction profiles.
///
/// The extraction configuration admits many near-duplicate combinations;
/// these three are the supported ones. See `ExtractOptions` for the exact
/// flag values each profile selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Profile {
    /// Shared types collapse to `$ref`, root via `$ref`, docs captured.
    #[default]
    Standard,
    /// Everything inlined; for consumers that cannot follow references.
    Inlined,
    /// Exact tuples, discriminated unions, function members are errors.
    Strict,
}

/// The `schemik.json` project manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProjectConfig {
    /// Include globs, expanded against the compiler root directory.
    pub include: Vec<String>,

    /// Extra exclude globs, merged with [`DEFAULT_EXCLUDES`].
    #[serde(default)]
    pub exclude: Vec<String>,

    pub compiler: CompilerConfig,

    /// Logical entry name to output description. Order is preserved and
    /// determines processing and reporting order.
    pub entries: IndexMap<String, OutputEntry>,
}

impl ProjectConfig {
    /// Reads and parses a manifest. Paths inside the manifest stay relative
    /// to the manifest's own directory.
    pub fn load(path: &Path) -> crate::Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            crate::Error::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        let mut config: ProjectConfig = serde_json::from_str(&text).map_err(|e| {
            crate::Error::Configuration(format!("invalid manifest {}: {e}", path.display()))
        })?;

        if let Some(base) = path.parent() {
            config.compiler.root_dir = base.join(&config.compiler.root_dir);
            config.compiler.out_dir = base.join(&config.compiler.out_dir);
            if let Some(dir) = config.compiler.declaration_dir.take() {
                config.compiler.declaration_dir = Some(base.join(dir));
            }
            config.compiler.libs = config
                .compiler
                .libs
                .iter()
                .map(|lib| base.join(lib))
                .collect();
        }

        Ok(config)
    }
}
