//! kicad-new-project: scaffolds a new KiCad project.
//!
//! Takes a single filename prefix and writes the project descriptor, an
//! empty schematic and board, the library tables and the library
//! directory skeleton. Existing files at the target paths are overwritten
//! without confirmation.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use kicad_process_automation::logging;
use kicad_process_automation::project;

/// Scaffold a new KiCad project.
///
/// The prefix names the project: `hardware/mainboard` creates
/// `hardware/mainboard.kicad_pro` and friends, with the library tables
/// and `libraries/` skeleton next to them.
#[derive(Parser, Debug)]
#[command(name = "kicad-new-project")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Filename prefix for the new project (directory plus base name)
    #[arg(value_name = "PATH_PREFIX")]
    prefix: PathBuf,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    // clap's own exit code for bad invocations is 2; the contract here is
    // usage on stderr and exit code 1.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    logging::init_tracing(logging::log_level(args.verbose, args.quiet));

    match project::create_project(&args.prefix, Path::new(".")) {
        Ok(created) => {
            println!(
                "Created project '{}' in {}",
                created.paths.name,
                created.paths.dir.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Failed to create project");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
