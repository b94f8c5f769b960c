//! Library tables and the empty project symbol library.
//!
//! The tables tell KiCad where the project-local libraries live, relative
//! to the project directory via the `${KIPRJMOD}` path variable. Both
//! tables name their single library after the project.

use crate::sexpr::Sexpr;

/// Format version of the library table files.
const TABLE_VERSION: i64 = 7;

/// Format version of the empty symbol library container.
const SYMBOL_LIB_VERSION: i64 = 20231120;

/// Builds the `sym-lib-table` mapping the project symbol library.
#[must_use]
pub fn sym_lib_table(project_name: &str) -> String {
    table(
        "sym_lib_table",
        project_name,
        &format!("${{KIPRJMOD}}/libraries/{project_name}.kicad_sym"),
    )
}

/// Builds the `fp-lib-table` mapping the project footprint library.
#[must_use]
pub fn fp_lib_table(project_name: &str) -> String {
    table(
        "fp_lib_table",
        project_name,
        "${KIPRJMOD}/libraries/footprints",
    )
}

fn table(tag: &str, name: &str, uri: &str) -> String {
    Sexpr::tagged(
        tag,
        vec![
            Sexpr::tagged("version", vec![Sexpr::Int(TABLE_VERSION)]),
            Sexpr::tagged(
                "lib",
                vec![
                    Sexpr::tagged("name", vec![Sexpr::str(name)]),
                    Sexpr::tagged("type", vec![Sexpr::str("KiCad")]),
                    Sexpr::tagged("uri", vec![Sexpr::str(uri)]),
                    Sexpr::tagged("options", vec![Sexpr::str("")]),
                    Sexpr::tagged("descr", vec![Sexpr::str("")]),
                ],
            ),
        ],
    )
    .to_document()
}

/// Builds the empty `.kicad_sym` symbol library container.
#[must_use]
pub fn symbol_library() -> String {
    Sexpr::tagged(
        "kicad_symbol_lib",
        vec![
            Sexpr::tagged("version", vec![Sexpr::Int(SYMBOL_LIB_VERSION)]),
            Sexpr::tagged("generator", vec![Sexpr::str("kicad_symbol_editor")]),
        ],
    )
    .to_document()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sym_table_references_project_library() {
        let text = sym_lib_table("myproj");
        assert!(text.contains("(name \"myproj\")"));
        assert!(text.contains("(uri \"${KIPRJMOD}/libraries/myproj.kicad_sym\")"));
        assert!(text.contains("(type \"KiCad\")"));
    }

    #[test]
    fn fp_table_references_footprints_dir() {
        let text = fp_lib_table("myproj");
        assert!(text.starts_with("(fp_lib_table"));
        assert!(text.contains("(name \"myproj\")"));
        assert!(text.contains("(uri \"${KIPRJMOD}/libraries/footprints\")"));
    }

    #[test]
    fn library_name_is_base_name_only() {
        // The caller passes the derived project name, never a path; a name
        // with a separator would produce a broken nickname.
        let text = sym_lib_table("myproj");
        assert!(!text.contains("(name \"b/myproj\")"));
    }

    #[test]
    fn symbol_library_is_empty_container() {
        let text = symbol_library();
        assert!(text.starts_with("(kicad_symbol_lib"));
        assert!(text.contains("(generator \"kicad_symbol_editor\")"));
        assert!(!text.contains("(symbol "));
    }
}
