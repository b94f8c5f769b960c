//! Scaffolds a new project onto disk.
//!
//! A scaffold run is a single straight-line sequence: derive paths,
//! generate the sheet identifier, create the library directories, then
//! write every file. Existing files at the target paths are overwritten
//! without confirmation, and a failed write aborts the run where it is;
//! partial output is an accepted limitation rather than a transaction.

use std::fs;
use std::path::Path;

use tracing::{debug, info};
use uuid::Uuid;

use super::descriptor::ProjectDescriptor;
use super::paths::ProjectPaths;
use super::{board, libtable, schematic};
use crate::error::{Error, Result};

/// Ignore patterns for KiCad backup, cache and lock artifacts, written to
/// the invocation directory.
const GITIGNORE: &str = "\
# KiCad backup, cache and lock artifacts
*-backups/
*.kicad_pro-bak
*.kicad_sch-bak
*.kicad_pcb-bak
*.kicad_prl
_autosave-*
fp-info-cache
*.lck
~*.lck
";

/// Outcome of a scaffold run, for logging and tests.
#[derive(Debug)]
pub struct ScaffoldedProject {
    /// Derived project paths.
    pub paths: ProjectPaths,
    /// The identifier shared by the descriptor sheet list and the
    /// schematic.
    pub sheet_uuid: Uuid,
}

/// Creates a new project at `prefix`.
///
/// `invocation_dir` is where the top-level `.gitignore` lands; the CLI
/// passes the current working directory.
///
/// # Errors
///
/// Returns an error for an unusable prefix, a failed directory creation,
/// or a failed file write. Writes already performed are not rolled back.
pub fn create_project(prefix: &Path, invocation_dir: &Path) -> Result<ScaffoldedProject> {
    let paths = ProjectPaths::from_prefix(prefix)?;
    let sheet_uuid = Uuid::new_v4();

    info!(
        project = %paths.name,
        dir = %paths.dir.display(),
        "Creating new KiCad project"
    );

    bootstrap_directories(&paths)?;

    let descriptor = ProjectDescriptor::new(&paths.name, sheet_uuid);
    write_file(&paths.descriptor, &descriptor.to_json()?)?;
    write_file(&paths.schematic, &schematic::schematic_document(sheet_uuid))?;
    write_file(&paths.board, &board::board_document())?;
    write_file(&paths.sym_lib_table, &libtable::sym_lib_table(&paths.name))?;
    write_file(&paths.fp_lib_table, &libtable::fp_lib_table(&paths.name))?;
    write_file(&paths.symbol_lib, &libtable::symbol_library())?;
    write_file(&invocation_dir.join(".gitignore"), GITIGNORE)?;

    info!(project = %paths.name, "Project created");

    Ok(ScaffoldedProject { paths, sheet_uuid })
}

/// Ensures the library directories exist and keeps the empty ones under
/// version control with `.gitignore` marker files.
///
/// Safe to re-run; `create_dir_all` tolerates existing directories.
fn bootstrap_directories(paths: &ProjectPaths) -> Result<()> {
    for dir in [&paths.libraries_dir, &paths.footprints_dir, &paths.models_dir] {
        fs::create_dir_all(dir).map_err(|source| Error::CreateDir {
            path: dir.clone(),
            source,
        })?;
        debug!(dir = %dir.display(), "Directory ready");
    }

    // Empty leaf directories would otherwise be dropped by git.
    write_file(&paths.footprints_dir.join(".gitignore"), "")?;
    write_file(&paths.models_dir.join(".gitignore"), "")?;
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|source| Error::WriteFile {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = contents.len(), "Wrote file");
    Ok(())
}
