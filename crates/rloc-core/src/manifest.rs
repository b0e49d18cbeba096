//! Runfiles manifest parsing
//!
//! A manifest is a newline-delimited list of `<runfile path> <absolute path>`
//! records. The first space separates the key from the value, so values may
//! themselves contain spaces. There is no escaping, no comment syntax and no
//! header.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::RunfilesError;

/// In-memory mapping from runfile path to on-disk location
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: HashMap<String, PathBuf>,
}

impl Manifest {
    /// Parse manifest text.
    ///
    /// Later records for the same key replace earlier ones. Blank lines and
    /// malformed records are skipped.
    pub fn parse(contents: &str) -> Self {
        Self::parse_bytes(contents.as_bytes())
    }

    /// Parse raw manifest bytes.
    ///
    /// Each line is decoded on its own, so a record that is not valid UTF-8
    /// is skipped like any other malformed record.
    pub fn parse_bytes(contents: &[u8]) -> Self {
        let mut entries = HashMap::new();

        for (index, raw) in contents.split(|&b| b == b'\n').enumerate() {
            let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
            if raw.is_empty() {
                continue;
            }

            let Ok(line) = std::str::from_utf8(raw) else {
                warn!(
                    line_number = index + 1,
                    "Skipping manifest record that is not valid UTF-8: {:?}",
                    String::from_utf8_lossy(raw)
                );
                continue;
            };

            match line.split_once(' ') {
                Some((key, value)) if !key.is_empty() && !value.trim().is_empty() => {
                    entries.insert(key.to_string(), PathBuf::from(value));
                }
                _ => {
                    warn!(line_number = index + 1, "Skipping malformed manifest record: {line:?}");
                }
            }
        }

        Self { entries }
    }

    /// Read and parse a manifest file.
    ///
    /// Failing to read the file is fatal; malformed records inside it are not.
    pub fn load(path: &Path) -> Result<Self, RunfilesError> {
        let contents = std::fs::read(path).map_err(|source| RunfilesError::ManifestRead {
            path: path.to_path_buf(),
            source,
        })?;
        let manifest = Self::parse_bytes(&contents);
        debug!(
            "Loaded {} runfiles entries from {}",
            manifest.len(),
            path.display()
        );
        Ok(manifest)
    }

    /// Exact-match lookup
    pub fn get(&self, rlocationpath: &str) -> Option<&Path> {
        self.entries.get(rlocationpath).map(PathBuf::as_path)
    }

    /// Number of distinct runfile paths
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
