//! rloc - Resolve a runfile path and print the file it points to
//!
//! A thin CLI over `rloc-core`: discovers the runfiles of the running binary,
//! resolves one logical path and writes the resolved file's bytes to stdout.

use clap::Parser;
use clap::error::ErrorKind;

mod commands;

use commands::Cli;

fn main() {
    rloc_core::logging::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    if let Err(e) = cli.execute() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
