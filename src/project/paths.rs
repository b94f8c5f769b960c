//! Output path derivation for a scaffolded project.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Every path a scaffold run touches, derived once from the filename prefix.
///
/// For a prefix `foo/bar` the project name is `bar` (directory components
/// stripped) and the project directory is `foo`. A bare prefix `bar` places
/// the project in the current directory.
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    /// Project name, the base name of the prefix.
    pub name: String,
    /// Directory the project lives in.
    pub dir: PathBuf,
    /// `<prefix>.kicad_pro`
    pub descriptor: PathBuf,
    /// `<prefix>.kicad_sch`
    pub schematic: PathBuf,
    /// `<prefix>.kicad_pcb`
    pub board: PathBuf,
    /// `<dir>/sym-lib-table`
    pub sym_lib_table: PathBuf,
    /// `<dir>/fp-lib-table`
    pub fp_lib_table: PathBuf,
    /// `<dir>/libraries`
    pub libraries_dir: PathBuf,
    /// `<dir>/libraries/<name>.kicad_sym`
    pub symbol_lib: PathBuf,
    /// `<dir>/libraries/footprints`
    pub footprints_dir: PathBuf,
    /// `<dir>/libraries/3D`
    pub models_dir: PathBuf,
}

impl ProjectPaths {
    /// Derives all output paths from the supplied filename prefix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPrefix`] when the prefix has no base name,
    /// e.g. an empty path or `..`.
    pub fn from_prefix(prefix: &Path) -> Result<Self> {
        let name = prefix
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| Error::InvalidPrefix {
                path: prefix.to_path_buf(),
            })?
            .to_string();

        let dir = match prefix.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let libraries_dir = dir.join("libraries");

        Ok(Self {
            descriptor: dir.join(format!("{name}.kicad_pro")),
            schematic: dir.join(format!("{name}.kicad_sch")),
            board: dir.join(format!("{name}.kicad_pcb")),
            sym_lib_table: dir.join("sym-lib-table"),
            fp_lib_table: dir.join("fp-lib-table"),
            symbol_lib: libraries_dir.join(format!("{name}.kicad_sym")),
            footprints_dir: libraries_dir.join("footprints"),
            models_dir: libraries_dir.join("3D"),
            libraries_dir,
            dir,
            name,
        })
    }
}
