//! Snapshot of the environment that runfiles discovery reads
//!
//! Discovery never consults `std::env` directly. Everything it needs is
//! captured here once, so the chosen strategy stays pinned for the lifetime of
//! the process even if the environment changes afterwards.
//!
//! # Precedence
//!
//! 1. `RUNFILES_MANIFEST_FILE`
//! 2. `RUNFILES_DIR`
//! 3. `TEST_SRCDIR`
//! 4. Files next to the running executable
//!
//! Variables that are unset, empty or whitespace-only are all treated as
//! unset.

use std::path::PathBuf;

/// Names a manifest file mapping runfile paths to absolute paths
pub const MANIFEST_FILE_VAR: &str = "RUNFILES_MANIFEST_FILE";

/// Names the root of a runfiles directory tree
pub const RUNFILES_DIR_VAR: &str = "RUNFILES_DIR";

/// Test runners export the runfiles root under this name
pub const TEST_SRCDIR_VAR: &str = "TEST_SRCDIR";

/// Inputs to runfiles discovery
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunfilesEnv {
    /// Value of `RUNFILES_MANIFEST_FILE`
    pub manifest_file: Option<PathBuf>,
    /// Value of `RUNFILES_DIR`
    pub runfiles_dir: Option<PathBuf>,
    /// Value of `TEST_SRCDIR`
    pub test_srcdir: Option<PathBuf>,
    /// Candidate paths of the running executable, most specific first
    pub executables: Vec<PathBuf>,
}

impl RunfilesEnv {
    /// Capture the current process environment.
    ///
    /// Executable candidates are `argv[0]` (which keeps symlinked launcher
    /// paths intact) followed by `std::env::current_exe()`.
    pub fn from_process() -> Self {
        let mut executables = Vec::new();

        if let Some(arg0) = std::env::args_os().next() {
            let arg0 = PathBuf::from(arg0);
            if arg0.components().count() > 1 || arg0.is_file() {
                executables.push(arg0);
            }
        }

        if let Ok(exe) = std::env::current_exe() {
            if !executables.contains(&exe) {
                executables.push(exe);
            }
        }

        Self {
            manifest_file: non_empty_var(MANIFEST_FILE_VAR),
            runfiles_dir: non_empty_var(RUNFILES_DIR_VAR),
            test_srcdir: non_empty_var(TEST_SRCDIR_VAR),
            executables,
        }
    }

    /// An environment with no indicators and the given executable path.
    pub fn for_executable(exe: impl Into<PathBuf>) -> Self {
        Self {
            executables: vec![exe.into()],
            ..Self::default()
        }
    }
}

fn non_empty_var(name: &str) -> Option<PathBuf> {
    let value = std::env::var_os(name)?;
    let text = value.to_string_lossy();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.len() == text.len() {
        Some(PathBuf::from(value))
    } else {
        Some(PathBuf::from(trimmed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn with_var<F: FnOnce()>(name: &str, value: Option<&str>, f: F) {
        let original = env::var_os(name);
        unsafe {
            match value {
                Some(v) => env::set_var(name, v),
                None => env::remove_var(name),
            }
        }

        f();

        // Restore
        unsafe {
            match original {
                Some(v) => env::set_var(name, v),
                None => env::remove_var(name),
            }
        }
    }

    #[test]
    #[serial]
    fn test_manifest_var_captured() {
        with_var(MANIFEST_FILE_VAR, Some("/tmp/MANIFEST"), || {
            let env = RunfilesEnv::from_process();
            assert_eq!(env.manifest_file, Some(PathBuf::from("/tmp/MANIFEST")));
        });
    }

    #[test]
    #[serial]
    fn test_empty_var_is_unset() {
        with_var(MANIFEST_FILE_VAR, Some(""), || {
            let env = RunfilesEnv::from_process();
            assert_eq!(env.manifest_file, None);
        });
    }

    #[test]
    #[serial]
    fn test_whitespace_var_is_unset() {
        with_var(RUNFILES_DIR_VAR, Some("   "), || {
            let env = RunfilesEnv::from_process();
            assert_eq!(env.runfiles_dir, None);
        });
    }

    #[test]
    #[serial]
    fn test_surrounding_whitespace_trimmed() {
        with_var(TEST_SRCDIR_VAR, Some("  /sandbox/run  "), || {
            let env = RunfilesEnv::from_process();
            assert_eq!(env.test_srcdir, Some(PathBuf::from("/sandbox/run")));
        });
    }

    #[test]
    #[serial]
    fn test_snapshot_is_not_affected_by_later_changes() {
        with_var(RUNFILES_DIR_VAR, Some("/first"), || {
            let env = RunfilesEnv::from_process();
            unsafe { env::set_var(RUNFILES_DIR_VAR, "/second") };
            assert_eq!(env.runfiles_dir, Some(PathBuf::from("/first")));
        });
    }

    #[test]
    #[serial]
    fn test_current_exe_is_a_candidate() {
        let env = RunfilesEnv::from_process();
        let exe = env::current_exe().unwrap();
        assert!(env.executables.contains(&exe));
    }

    #[test]
    fn test_for_executable_has_no_indicators() {
        let env = RunfilesEnv::for_executable("/bin/tool");
        assert_eq!(env.manifest_file, None);
        assert_eq!(env.runfiles_dir, None);
        assert_eq!(env.test_srcdir, None);
        assert_eq!(env.executables, vec![PathBuf::from("/bin/tool")]);
    }
}
