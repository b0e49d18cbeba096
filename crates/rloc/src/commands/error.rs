//! Error types for command execution

use std::path::PathBuf;
use thiserror::Error;

/// Command execution errors
#[derive(Debug, Error)]
pub enum CommandError {
    /// No runfiles strategy could be established
    #[error("failed to create runfiles: {0}")]
    Runfiles(#[from] rloc_core::RunfilesError),

    /// The runfile path has no mapping
    #[error("failed to locate runfile: {path}")]
    UnresolvedPath { path: String },

    /// The resolved location could not be read
    #[error("failed to read file {}: {source}", .path.display())]
    ReadFailure {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Writing to stdout failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_path_names_the_path() {
        let err = CommandError::UnresolvedPath {
            path: "missing/path.txt".to_string(),
        };
        assert_eq!(err.to_string(), "failed to locate runfile: missing/path.txt");
    }

    #[test]
    fn test_runfiles_error_is_wrapped() {
        let err: CommandError = rloc_core::RunfilesError::NoRunfilesEnvironment {
            searched: vec![],
        }
        .into();
        assert!(err.to_string().starts_with("failed to create runfiles: "));
    }

    #[test]
    fn test_read_failure_includes_io_detail() {
        let err = CommandError::ReadFailure {
            path: PathBuf::from("/sandbox/run/pkg/file.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/sandbox/run/pkg/file.txt"));
        assert!(msg.contains("No such file"));
    }
}
