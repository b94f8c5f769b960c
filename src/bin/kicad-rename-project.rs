//! kicad-rename-project: renames an existing KiCad project in place.
//!
//! Takes the path to a `.kicad_pro` file and a new name, then renames
//! matching files across the project directory and rewrites occurrences
//! of the old name inside text files. Binary files are skipped.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use kicad_process_automation::logging;
use kicad_process_automation::rename::RenameRequest;

/// Rename a KiCad project, its files and their cross references.
#[derive(Parser, Debug)]
#[command(name = "kicad-rename-project")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the *.kicad_pro file of the project to rename
    #[arg(value_name = "PROJECT_FILE")]
    project_file: PathBuf,

    /// New name for the project (no spaces)
    #[arg(value_name = "NEW_NAME")]
    new_name: String,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
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

    let request = match RenameRequest::new(&args.project_file, &args.new_name) {
        Ok(request) => request,
        Err(e) => {
            error!(error = %e, "Invalid rename request");
            return ExitCode::FAILURE;
        }
    };

    let old_name = request.old_name().to_string();
    match request.execute() {
        Ok(summary) => {
            println!(
                "Renamed '{}' to '{}' ({} files renamed, {} files rewritten)",
                old_name, args.new_name, summary.files_renamed, summary.files_rewritten
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Failed to rename project");
            ExitCode::FAILURE
        }
    }
}
