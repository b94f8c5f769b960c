//! kicad-process-automation: CLI tools for bootstrapping and maintaining
//! KiCad projects.
//!
//! Each binary is a thin wrapper over this library, one tool per binary:
//!
//! - **`kicad-new-project`**: scaffolds a project from a filename prefix:
//!   descriptor, empty schematic and board, library tables, library
//!   directories and ignore files.
//! - **`kicad-rename-project`**: renames an existing project, rewriting
//!   file names and text-file contents across the project directory.
//!
//! Export and panelization run in CI through `kicad-cli`, an external
//! collaborator; nothing here drives it.
//!
//! # Modules
//!
//! - [`error`] — Error types
//! - [`logging`] — Shared tracing setup for the binaries
//! - [`project`] — Path derivation and document generation for scaffolding
//! - [`rename`] — In-place project rename
//! - [`sexpr`] — S-expression model and writer for the KiCad text formats

pub mod error;
pub mod logging;
pub mod project;
pub mod rename;
pub mod sexpr;
