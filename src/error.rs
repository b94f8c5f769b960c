//! Error types for KiCad project operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for project operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while scaffolding or renaming a project.
#[derive(Debug, Error)]
pub enum Error {
    /// The filename prefix has no usable base name (e.g. an empty path or `..`).
    #[error("invalid filename prefix: {path}")]
    InvalidPrefix {
        /// The prefix as supplied on the command line.
        path: PathBuf,
    },

    /// The supplied project file is not a `.kicad_pro` file.
    #[error("not a KiCad project file: {path}")]
    NotAProjectFile {
        /// Path to the offending file.
        path: PathBuf,
    },

    /// The new project name contains whitespace, which KiCad library
    /// nicknames do not support.
    #[error("project name must not contain spaces: {name:?}")]
    SpacesInName {
        /// The rejected name.
        name: String,
    },

    /// Failed to create a directory.
    #[error("failed to create directory: {path}")]
    CreateDir {
        /// Path to the directory.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to write a file.
    #[error("failed to write file: {path}")]
    WriteFile {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to read a file.
    #[error("failed to read file: {path}")]
    ReadFile {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to rename a file.
    #[error("failed to rename {from} to {to}")]
    RenameFile {
        /// Original path.
        from: PathBuf,
        /// New path.
        to: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to serialise the project descriptor to JSON.
    #[error("failed to serialise project descriptor")]
    Serialise {
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The project directory path could not be turned into a glob pattern.
    #[error("unusable project directory path: {path}")]
    ScanPattern {
        /// Directory that was being scanned.
        path: PathBuf,
        /// Underlying pattern error.
        #[source]
        source: glob::PatternError,
    },

    /// Failed to walk the project directory.
    #[error("failed to scan project directory: {path}")]
    Scan {
        /// Directory that was being scanned.
        path: PathBuf,
        /// Underlying glob error.
        #[source]
        source: glob::GlobError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_prefix_display() {
        let error = Error::InvalidPrefix {
            path: PathBuf::from("some/dir/"),
        };
        let msg = error.to_string();
        assert!(msg.contains("invalid filename prefix"));
        assert!(msg.contains("some/dir/"));
    }

    #[test]
    fn spaces_in_name_display() {
        let error = Error::SpacesInName {
            name: "new name".to_string(),
        };
        assert!(error.to_string().contains("new name"));
    }

    #[test]
    fn write_file_carries_source() {
        use std::error::Error as _;
        let error = Error::WriteFile {
            path: PathBuf::from("/tmp/x.kicad_pro"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(error.source().is_some());
    }
}
