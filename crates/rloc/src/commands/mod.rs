//! CLI argument parsing and execution

use std::io::Write;

use anyhow::Result;
use clap::Parser;
use rloc_core::Runfiles;
use tracing::debug;

mod error;

use error::CommandError;

/// rloc - Resolve a runfile path and print its contents
#[derive(Parser, Debug)]
#[command(
    name = "rloc",
    version,
    about = "Resolve a runfile path and print its contents",
    long_about = "Locates a file packaged as a runfile of this binary, using \
                  RUNFILES_MANIFEST_FILE, RUNFILES_DIR or files next to the executable, \
                  and writes its contents to stdout",
    after_help = "Example: rloc workspace/path/to/file.txt"
)]
pub struct Cli {
    /// The runfile path to locate (e.g. "workspace/path/to/file.txt")
    runfile_path: String,
}

impl Cli {
    /// Execute the lookup and print the resolved file
    pub fn execute(self) -> Result<()> {
        let contents = self.read_runfile()?;

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&contents).map_err(CommandError::Io)?;
        stdout.flush().map_err(CommandError::Io)?;
        Ok(())
    }

    fn read_runfile(&self) -> Result<Vec<u8>, CommandError> {
        let runfiles = Runfiles::create()?;
        debug!("Using {} runfiles strategy", runfiles.strategy_kind());

        let path = runfiles
            .rlocation(&self.runfile_path)
            .ok_or_else(|| CommandError::UnresolvedPath {
                path: self.runfile_path.clone(),
            })?;
        debug!("Resolved {} to {}", self.runfile_path, path.display());

        std::fs::read(&path).map_err(|source| CommandError::ReadFailure { path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_exactly_one_argument() {
        assert!(Cli::try_parse_from(["rloc"]).is_err());
        assert!(Cli::try_parse_from(["rloc", "a/b.txt", "c/d.txt"]).is_err());
    }

    #[test]
    fn test_parses_runfile_path() {
        let cli = Cli::try_parse_from(["rloc", "workspace/pkg/file.txt"]).unwrap();
        assert_eq!(cli.runfile_path, "workspace/pkg/file.txt");
    }

    #[test]
    fn test_command_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
