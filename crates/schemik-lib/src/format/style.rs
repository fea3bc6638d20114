//! Formatting style discovery.
//!
//! A `.skmfmt.json` file anywhere between an output file and the project
//! root configures how that output is formatted. The nearest file wins. A
//! malformed style file is never fatal: it logs a warning and the default
//! style applies.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

pub const STYLE_FILE_NAME: &str = ".skmfmt.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Style {
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,
    #[serde(default = "default_final_newline")]
    pub final_newline: bool,
}

fn default_indent_width() -> usize {
    2
}

fn default_final_newline() -> bool {
    true
}

impl Default for Style {
    fn default() -> Self {
        Self {
            indent_width: default_indent_width(),
            final_newline: default_final_newline(),
        }
    }
}

/// Finds the style governing a given output path.
pub struct StyleResolver {
    root: PathBuf,
}

impl StyleResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Walks from the output file's directory up to the project root,
    /// returning the first style file found, or the default.
    pub fn resolve(&self, output_path: &Path) -> Style {
        let mut dir = output_path.parent();
        while let Some(current) = dir {
            let candidate = current.join(STYLE_FILE_NAME);
            if candidate.is_file() {
                return load_style(&candidate);
            }
            if current == self.root {
                break;
            }
            dir = current.parent();
        }
        Style::default()
    }
}

fn load_style(path: &Path) -> Style {
    let parsed = fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|text| serde_json::from_str(&text).map_err(|e| e.to_string()));
    match parsed {
        Ok(style) => style,
        Err(reason) => {
            warn!(path = %path.display(), %reason, "malformed style file, using defaults");
            Style::default()
        }
    }
}
