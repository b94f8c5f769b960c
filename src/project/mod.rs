//! Project scaffolding: path derivation and the generated documents.

pub mod board;
pub mod descriptor;
pub mod libtable;
pub mod paths;
pub mod scaffold;
pub mod schematic;

pub use paths::ProjectPaths;
pub use scaffold::{create_project, ScaffoldedProject};
