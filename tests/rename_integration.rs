//! Integration tests for in-place project renaming.

use std::path::Path;

use tempfile::TempDir;

use kicad_process_automation::project::create_project;
use kicad_process_automation::rename::RenameRequest;

/// Creates a temporary directory inside `.tmp/` for test isolation.
/// The directory is automatically cleaned up when the returned `TempDir` is dropped.
///
/// Converts to an absolute path to avoid issues with parallel test execution.
fn test_temp_dir() -> TempDir {
    let tmp_root = Path::new(".tmp");
    std::fs::create_dir_all(tmp_root).expect("Failed to create .tmp directory");
    let tmp_root = tmp_root
        .canonicalize()
        .expect("Failed to canonicalize .tmp path");
    tempfile::tempdir_in(&tmp_root).expect("Failed to create temp dir")
}

/// Scaffolds a project named `oldproj` and returns its directory.
fn scaffolded_project(temp_dir: &TempDir) -> std::path::PathBuf {
    let prefix = temp_dir.path().join("hw/oldproj");
    create_project(&prefix, temp_dir.path()).unwrap();
    temp_dir.path().join("hw")
}

#[test]
fn renames_project_files_and_references() {
    let temp_dir = test_temp_dir();
    let dir = scaffolded_project(&temp_dir);

    let request = RenameRequest::new(&dir.join("oldproj.kicad_pro"), "newproj").unwrap();
    let summary = request.execute().unwrap();

    // Descriptor, schematic, board and symbol library all carried the name.
    assert!(summary.files_renamed >= 4);
    assert!(!dir.join("oldproj.kicad_pro").exists());
    assert!(dir.join("newproj.kicad_pro").is_file());
    assert!(dir.join("newproj.kicad_sch").is_file());
    assert!(dir.join("newproj.kicad_pcb").is_file());
    assert!(dir.join("libraries/newproj.kicad_sym").is_file());

    let sym_table = std::fs::read_to_string(dir.join("sym-lib-table")).unwrap();
    assert!(sym_table.contains("(name \"newproj\")"));
    assert!(sym_table.contains("${KIPRJMOD}/libraries/newproj.kicad_sym"));
    assert!(!sym_table.contains("oldproj"));

    let descriptor = std::fs::read_to_string(dir.join("newproj.kicad_pro")).unwrap();
    assert!(descriptor.contains("newproj.kicad_pro"));
    assert!(!descriptor.contains("oldproj"));
}

#[test]
fn word_joined_occurrences_survive() {
    let temp_dir = test_temp_dir();
    let dir = scaffolded_project(&temp_dir);
    std::fs::write(
        dir.join("notes.txt"),
        "oldproj is fine but oldproj_v2 and my_oldproj stay\n",
    )
    .unwrap();

    let request = RenameRequest::new(&dir.join("oldproj.kicad_pro"), "newproj").unwrap();
    request.execute().unwrap();

    let notes = std::fs::read_to_string(dir.join("notes.txt")).unwrap();
    assert_eq!(notes, "newproj is fine but oldproj_v2 and my_oldproj stay\n");
}

#[test]
fn binary_files_are_left_alone() {
    let temp_dir = test_temp_dir();
    let dir = scaffolded_project(&temp_dir);

    // Extension-based skip: STEP model text happens to mention the name.
    std::fs::write(dir.join("libraries/3D/housing.step"), "oldproj body\n").unwrap();
    // Content-based skip: NUL byte marks the file binary.
    std::fs::write(dir.join("blob.dat"), b"oldproj\x00oldproj").unwrap();

    let request = RenameRequest::new(&dir.join("oldproj.kicad_pro"), "newproj").unwrap();
    request.execute().unwrap();

    assert_eq!(
        std::fs::read_to_string(dir.join("libraries/3D/housing.step")).unwrap(),
        "oldproj body\n"
    );
    assert_eq!(
        std::fs::read(dir.join("blob.dat")).unwrap(),
        b"oldproj\x00oldproj"
    );
}

#[test]
fn binary_file_names_are_still_renamed() {
    let temp_dir = test_temp_dir();
    let dir = scaffolded_project(&temp_dir);
    std::fs::write(dir.join("libraries/3D/oldproj.step"), [0u8, 1, 2]).unwrap();

    let request = RenameRequest::new(&dir.join("oldproj.kicad_pro"), "newproj").unwrap();
    request.execute().unwrap();

    assert!(!dir.join("libraries/3D/oldproj.step").exists());
    assert!(dir.join("libraries/3D/newproj.step").is_file());
}

#[test]
fn rename_keeps_descriptor_and_schematic_referential() {
    let temp_dir = test_temp_dir();
    let dir = scaffolded_project(&temp_dir);

    let request = RenameRequest::new(&dir.join("oldproj.kicad_pro"), "newproj").unwrap();
    request.execute().unwrap();

    let descriptor = std::fs::read_to_string(dir.join("newproj.kicad_pro")).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&descriptor).unwrap();
    let sheet_uuid = doc["sheets"][0][0].as_str().unwrap();

    let schematic = std::fs::read_to_string(dir.join("newproj.kicad_sch")).unwrap();
    assert!(schematic.contains(&format!("(uuid \"{sheet_uuid}\")")));
}
