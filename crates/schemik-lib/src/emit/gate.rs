//! All-or-nothing artifact commit.
//!
//! Outputs are accumulated in memory as [`OutputArtifact`]s and written in
//! one pass, and only when the declaration pass completed. No artifact is
//! ever partially written: a run either commits every artifact or touches
//! nothing.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::Result;

use super::declaration::Outcome;

/// A finished output: where it goes and exactly what goes there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputArtifact {
    pub path: PathBuf,
    pub contents: String,
}

pub struct Gate;

impl Gate {
    /// Writes every artifact when the pass completed, creating parent
    /// directories as needed. A skipped pass withholds everything and
    /// returns an empty list.
    pub fn commit(outcome: Outcome, artifacts: Vec<OutputArtifact>) -> Result<Vec<PathBuf>> {
        if outcome == Outcome::Skipped {
            for artifact in &artifacts {
                warn!(path = %artifact.path.display(), "artifact withheld, pass was skipped");
            }
            return Ok(Vec::new());
        }

        let mut written = Vec::with_capacity(artifacts.len());
        for artifact in artifacts {
            if let Some(parent) = artifact.path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&artifact.path, &artifact.contents)?;
            debug!(path = %artifact.path.display(), "artifact written");
            written.push(artifact.path);
        }
        Ok(written)
    }
}
