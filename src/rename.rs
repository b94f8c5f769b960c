//! Renames an existing project in place.
//!
//! Given a `.kicad_pro` file and a new name, every file under the project
//! directory whose name contains the old project name is renamed, and
//! word-boundary-delimited occurrences of the old name inside text files
//! are rewritten. Binary files are left alone: `.zip`/`.step`/`.stp` by
//! extension, anything else by a NUL byte in the leading 32 KiB.
//!
//! The word-boundary rule keeps `myproj_v2` or `oldmyproj` untouched when
//! renaming `myproj`; only occurrences whose neighbours are non-word
//! characters (or the string edges) are replaced. That matches how the
//! name appears in KiCad files: quoted, or joined to an extension by a
//! dot.

use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;
use regex::Regex;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Leading bytes sniffed for the NUL check.
const BINARY_SNIFF_LEN: usize = 32 * 1024;

/// File extensions never rewritten, regardless of content.
const BINARY_EXTENSIONS: &[&str] = &["zip", "step", "stp"];

/// A validated rename request.
#[derive(Debug)]
pub struct RenameRequest {
    project_dir: PathBuf,
    old_name: String,
    new_name: String,
}

/// Counts of what a rename touched, for logging and tests.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RenameSummary {
    /// Files whose name was rewritten.
    pub files_renamed: usize,
    /// Files whose contents were rewritten.
    pub files_rewritten: usize,
}

impl RenameRequest {
    /// Validates the project file and the new name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAProjectFile`] unless `project_file` ends in
    /// `.kicad_pro`, and [`Error::SpacesInName`] if `new_name` contains
    /// whitespace.
    pub fn new(project_file: &Path, new_name: &str) -> Result<Self> {
        if project_file.extension().and_then(|e| e.to_str()) != Some("kicad_pro") {
            return Err(Error::NotAProjectFile {
                path: project_file.to_path_buf(),
            });
        }
        if new_name.chars().any(char::is_whitespace) {
            return Err(Error::SpacesInName {
                name: new_name.to_string(),
            });
        }

        let old_name = project_file
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::NotAProjectFile {
                path: project_file.to_path_buf(),
            })?
            .to_string();

        let project_dir = match project_file.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };

        Ok(Self {
            project_dir,
            old_name,
            new_name: new_name.to_string(),
        })
    }

    /// The name being replaced, the stem of the project file.
    #[must_use]
    pub fn old_name(&self) -> &str {
        &self.old_name
    }

    /// Performs the rename across the project directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory walk, a file rename, or a file
    /// rewrite fails. Files already processed are not rolled back.
    pub fn execute(&self) -> Result<RenameSummary> {
        info!(
            old = %self.old_name,
            new = %self.new_name,
            dir = %self.project_dir.display(),
            "Renaming project"
        );

        let mut summary = RenameSummary::default();

        // Collect up front; we rename files while walking.
        let pattern = format!("{}/**/*", Pattern::escape(&self.project_dir.to_string_lossy()));
        let mut files = Vec::new();
        for entry in glob::glob(&pattern).map_err(|source| Error::ScanPattern {
            path: self.project_dir.clone(),
            source,
        })? {
            let path = entry.map_err(|source| Error::Scan {
                path: self.project_dir.clone(),
                source,
            })?;
            if path.is_file() {
                files.push(path);
            }
        }

        for path in files {
            let path = self.rename_file(path, &mut summary)?;
            if !is_binary(&path)? {
                self.rewrite_contents(&path, &mut summary)?;
            }
        }

        info!(
            renamed = summary.files_renamed,
            rewritten = summary.files_rewritten,
            "Rename complete"
        );
        Ok(summary)
    }

    /// Renames a single file if its name contains the old project name.
    fn rename_file(&self, path: PathBuf, summary: &mut RenameSummary) -> Result<PathBuf> {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            return Ok(path);
        };
        if !file_name.contains(&self.old_name) {
            return Ok(path);
        }

        let new_file_name = file_name.replace(&self.old_name, &self.new_name);
        let new_path = path.with_file_name(new_file_name);
        fs::rename(&path, &new_path).map_err(|source| Error::RenameFile {
            from: path.clone(),
            to: new_path.clone(),
            source,
        })?;
        debug!(from = %path.display(), to = %new_path.display(), "Renamed file");
        summary.files_renamed += 1;
        Ok(new_path)
    }

    /// Rewrites word-boundary-delimited occurrences of the old name.
    fn rewrite_contents(&self, path: &Path, summary: &mut RenameSummary) -> Result<()> {
        let bytes = fs::read(path).map_err(|source| Error::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        // Invalid UTF-8 slipped past the NUL sniff; treat as binary.
        let Ok(content) = String::from_utf8(bytes) else {
            return Ok(());
        };

        let rewritten = replace_delimited(&content, &self.old_name, &self.new_name);
        if rewritten != content {
            fs::write(path, rewritten).map_err(|source| Error::WriteFile {
                path: path.to_path_buf(),
                source,
            })?;
            debug!(path = %path.display(), "Rewrote contents");
            summary.files_rewritten += 1;
        }
        Ok(())
    }
}

/// Replaces occurrences of `old` whose neighbours are non-word characters
/// or the string edges.
fn replace_delimited(content: &str, old: &str, new: &str) -> String {
    // The pattern itself is just the escaped name; boundaries are checked
    // on the neighbouring bytes so adjacent occurrences are all caught.
    let re = match Regex::new(&regex::escape(old)) {
        Ok(re) => re,
        Err(_) => return content.to_string(),
    };

    let is_word = |b: u8| b.is_ascii_alphanumeric() || b == b'_';
    let bytes = content.as_bytes();

    let mut out = String::with_capacity(content.len());
    let mut last = 0;
    for m in re.find_iter(content) {
        let left_ok = m.start() == 0 || !is_word(bytes[m.start() - 1]);
        let right_ok = m.end() == bytes.len() || !is_word(bytes[m.end()]);
        if left_ok && right_ok {
            out.push_str(&content[last..m.start()]);
            out.push_str(new);
            last = m.end();
        }
    }
    out.push_str(&content[last..]);
    out
}

/// Binary check: known binary extension, or a NUL byte in the leading
/// 32 KiB.
fn is_binary(path: &Path) -> Result<bool> {
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        let ext = ext.to_ascii_lowercase();
        if BINARY_EXTENSIONS.contains(&ext.as_str()) {
            return Ok(true);
        }
    }

    let bytes = fs::read(path).map_err(|source| Error::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let sniff = &bytes[..bytes.len().min(BINARY_SNIFF_LEN)];
    Ok(sniff.contains(&0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_project_file() {
        let result = RenameRequest::new(Path::new("board.kicad_pcb"), "newname");
        assert!(matches!(result, Err(Error::NotAProjectFile { .. })));
    }

    #[test]
    fn rejects_spaces_in_new_name() {
        let result = RenameRequest::new(Path::new("proj.kicad_pro"), "new name");
        assert!(matches!(result, Err(Error::SpacesInName { .. })));
    }

    #[test]
    fn derives_old_name_from_stem() {
        let request = RenameRequest::new(Path::new("some/dir/oldproj.kicad_pro"), "new").unwrap();
        assert_eq!(request.old_name(), "oldproj");
    }

    #[test]
    fn replace_respects_word_boundaries() {
        let content = "myproj \"myproj.kicad_sym\" myproj_v2 oldmyproj myproj";
        let result = replace_delimited(content, "myproj", "renamed");
        assert_eq!(
            result,
            "renamed \"renamed.kicad_sym\" myproj_v2 oldmyproj renamed"
        );
    }

    #[test]
    fn replace_handles_adjacent_occurrences() {
        let result = replace_delimited("a a a", "a", "b");
        assert_eq!(result, "b b b");
    }

    #[test]
    fn replace_handles_regex_metacharacters() {
        let result = replace_delimited("foo.bar (foo.bar)", "foo.bar", "x");
        // `foo.bar` must match literally, and `fooXbar` must not.
        assert_eq!(result, "x (x)");
        assert_eq!(replace_delimited("fooXbar", "foo.bar", "x"), "fooXbar");
    }
}
