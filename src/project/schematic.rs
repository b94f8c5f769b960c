//! The empty `.kicad_sch` root schematic.

use uuid::Uuid;

use crate::sexpr::Sexpr;

/// File format version written into the header.
const FORMAT_VERSION: i64 = 20231120;

/// Builds the empty root schematic.
///
/// `sheet_uuid` is the project-wide generated identifier; the same value
/// appears in the descriptor's sheet list. The schematic has an empty
/// symbol library section and a single sheet instance at path `/`.
#[must_use]
pub fn schematic_document(sheet_uuid: Uuid) -> String {
    Sexpr::tagged(
        "kicad_sch",
        vec![
            Sexpr::tagged("version", vec![Sexpr::Int(FORMAT_VERSION)]),
            Sexpr::tagged("generator", vec![Sexpr::str("eeschema")]),
            Sexpr::tagged("uuid", vec![Sexpr::str(sheet_uuid.to_string())]),
            Sexpr::tagged("paper", vec![Sexpr::str("A4")]),
            Sexpr::tagged("lib_symbols", vec![]),
            Sexpr::tagged(
                "sheet_instances",
                vec![Sexpr::tagged(
                    "path",
                    vec![
                        Sexpr::str("/"),
                        Sexpr::tagged("page", vec![Sexpr::str("1")]),
                    ],
                )],
            ),
        ],
    )
    .to_document()
}
