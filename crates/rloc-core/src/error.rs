//! Error types for runfiles discovery

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while establishing a runfiles strategy
#[derive(Debug, Error)]
pub enum RunfilesError {
    /// No manifest or directory could be found
    #[error("no runfiles environment found (searched: {})", display_paths(.searched))]
    NoRunfilesEnvironment { searched: Vec<PathBuf> },

    /// The manifest named by the environment could not be read
    #[error("failed to read runfiles manifest {path}: {source}")]
    ManifestRead {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "nothing".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
