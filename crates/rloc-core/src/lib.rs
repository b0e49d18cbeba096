//! Core runfiles resolution for rloc
//!
//! A build produces data files ("runfiles") alongside a binary, either as a
//! directory tree mirroring their logical paths or as a manifest mapping each
//! logical path to an absolute location. This crate discovers which layout is
//! available at run time and resolves logical paths against it.
//!
//! ```no_run
//! use rloc_core::Runfiles;
//!
//! # fn example() -> Result<(), rloc_core::RunfilesError> {
//! let runfiles = Runfiles::create()?;
//! if let Some(path) = runfiles.rlocation("my_workspace/data/config.txt") {
//!     println!("{}", path.display());
//! }
//! # Ok(())
//! # }
//! ```

pub mod env;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod runfiles;

pub use env::RunfilesEnv;
pub use error::RunfilesError;
pub use manifest::Manifest;
pub use runfiles::{Runfiles, Strategy, StrategyKind};
