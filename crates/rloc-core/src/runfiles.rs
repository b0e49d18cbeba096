//! Runfiles strategy discovery and path resolution

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;

use tracing::debug;

use crate::env::{MANIFEST_FILE_VAR, RUNFILES_DIR_VAR, RunfilesEnv};
use crate::error::RunfilesError;
use crate::manifest::Manifest;

const MANIFEST_SUFFIX: &str = ".runfiles_manifest";
const RUNFILES_SUFFIX: &str = ".runfiles";
const MANIFEST_IN_DIR: &str = "MANIFEST";

/// How runfile paths are turned into filesystem paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Exact-match lookup in a loaded manifest
    Manifest { path: PathBuf, manifest: Manifest },
    /// Concatenation onto a runfiles root, existence unchecked
    Directory { root: PathBuf },
}

/// Which strategy variant is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    Manifest,
    Directory,
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyKind::Manifest => write!(f, "manifest"),
            StrategyKind::Directory => write!(f, "directory"),
        }
    }
}

/// Resolver for runfile paths
///
/// A `Runfiles` value holds exactly one [`Strategy`], chosen when it is
/// constructed and never re-evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Runfiles {
    strategy: Strategy,
}

impl Runfiles {
    /// Discover runfiles from the current process environment.
    pub fn create() -> Result<Self, RunfilesError> {
        Self::from_env(&RunfilesEnv::from_process())
    }

    /// Process-wide runfiles, created on first use.
    ///
    /// The outcome of the first construction is kept for the lifetime of the
    /// process; a failure is returned again on every later call.
    pub fn shared() -> Result<&'static Runfiles, &'static RunfilesError> {
        static SHARED: OnceLock<Result<Runfiles, RunfilesError>> = OnceLock::new();
        SHARED.get_or_init(Self::create).as_ref()
    }

    /// Discover runfiles from an explicit environment snapshot.
    ///
    /// Checks run in a fixed order and the first usable one wins:
    /// manifest variable, directory variables, then files next to each
    /// candidate executable.
    pub fn from_env(env: &RunfilesEnv) -> Result<Self, RunfilesError> {
        if let Some(path) = &env.manifest_file {
            debug!("Using runfiles manifest from {MANIFEST_FILE_VAR}: {}", path.display());
            return Self::from_manifest_file(path);
        }

        for root in [&env.runfiles_dir, &env.test_srcdir].into_iter().flatten() {
            if root.is_dir() {
                debug!("Using runfiles directory {}", root.display());
                return Ok(Self::from_directory(root));
            }
            debug!("Ignoring missing runfiles directory {}", root.display());
        }

        let mut searched = Vec::new();
        for exe in &env.executables {
            if let Some(runfiles) = Self::adjacent_to(exe, &mut searched)? {
                return Ok(runfiles);
            }
        }

        Err(RunfilesError::NoRunfilesEnvironment { searched })
    }

    /// Manifest strategy backed by the file at `path`.
    pub fn from_manifest_file(path: &Path) -> Result<Self, RunfilesError> {
        let manifest = Manifest::load(path)?;
        Ok(Self {
            strategy: Strategy::Manifest {
                path: path.to_path_buf(),
                manifest,
            },
        })
    }

    /// Directory strategy rooted at `root`.
    pub fn from_directory(root: impl Into<PathBuf>) -> Self {
        Self {
            strategy: Strategy::Directory { root: root.into() },
        }
    }

    fn adjacent_to(
        exe: &Path,
        searched: &mut Vec<PathBuf>,
    ) -> Result<Option<Self>, RunfilesError> {
        let manifest = with_suffix(exe, MANIFEST_SUFFIX);
        let dir = with_suffix(exe, RUNFILES_SUFFIX);
        let dir_manifest = dir.join(MANIFEST_IN_DIR);

        for candidate in [&manifest, &dir_manifest] {
            searched.push(candidate.clone());
            if candidate.is_file() {
                debug!("Found runfiles manifest next to executable: {}", candidate.display());
                return Self::from_manifest_file(candidate).map(Some);
            }
        }

        searched.push(dir.clone());
        if dir.is_dir() {
            debug!("Found runfiles directory next to executable: {}", dir.display());
            return Ok(Some(Self::from_directory(dir)));
        }

        // The executable may itself be a runfile of another binary.
        if let Some(root) = enclosing_runfiles_dir(exe) {
            debug!("Executable is inside runfiles directory {}", root.display());
            return Ok(Some(Self::from_directory(root)));
        }

        Ok(None)
    }

    /// Resolve a runfile path.
    ///
    /// Returns `None` for empty input or when the path has no location under
    /// the active strategy. Never touches the filesystem.
    pub fn rlocation(&self, rlocationpath: impl AsRef<str>) -> Option<PathBuf> {
        let rlocationpath = rlocationpath.as_ref();
        if rlocationpath.is_empty() {
            return None;
        }

        match &self.strategy {
            Strategy::Manifest { manifest, .. } => {
                manifest.get(rlocationpath).map(Path::to_path_buf)
            }
            Strategy::Directory { root } => join_under(root, rlocationpath),
        }
    }

    /// The strategy chosen at construction
    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Which strategy variant is active, for diagnostics
    pub fn strategy_kind(&self) -> StrategyKind {
        match self.strategy {
            Strategy::Manifest { .. } => StrategyKind::Manifest,
            Strategy::Directory { .. } => StrategyKind::Directory,
        }
    }

    /// Environment variables that let a child process find these runfiles.
    pub fn env_vars(&self) -> Vec<(&'static str, PathBuf)> {
        match &self.strategy {
            Strategy::Manifest { path, .. } => {
                let mut vars = vec![(MANIFEST_FILE_VAR, path.clone())];
                if let Some(dir) = runfiles_dir_for_manifest(path) {
                    vars.push((RUNFILES_DIR_VAR, dir));
                }
                vars
            }
            Strategy::Directory { root } => vec![(RUNFILES_DIR_VAR, root.clone())],
        }
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

fn enclosing_runfiles_dir(exe: &Path) -> Option<PathBuf> {
    exe.ancestors()
        .skip(1)
        .find(|dir| {
            dir.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(RUNFILES_SUFFIX))
        })
        .map(Path::to_path_buf)
}

/// `<x>.runfiles_manifest` and `<x>.runfiles/MANIFEST` both sit beside a
/// `<x>.runfiles` tree.
fn runfiles_dir_for_manifest(manifest: &Path) -> Option<PathBuf> {
    let name = manifest.file_name()?.to_str()?;

    if name == MANIFEST_IN_DIR {
        let parent = manifest.parent()?;
        let parent_name = parent.file_name()?.to_str()?;
        return parent_name
            .ends_with(RUNFILES_SUFFIX)
            .then(|| parent.to_path_buf());
    }

    let stem = name.strip_suffix(MANIFEST_SUFFIX)?;
    Some(manifest.with_file_name(format!("{stem}{RUNFILES_SUFFIX}")))
}

fn join_under(root: &Path, rlocationpath: &str) -> Option<PathBuf> {
    let relative = Path::new(rlocationpath);
    if relative.has_root()
        || relative
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
    {
        debug!("Rejecting runfile path that escapes the root: {rlocationpath}");
        return None;
    }

    let mut path = root.to_path_buf();
    for segment in rlocationpath.split('/') {
        if segment.is_empty() || segment == "." {
            continue;
        }
        path.push(segment);
    }
    Some(path)
}
