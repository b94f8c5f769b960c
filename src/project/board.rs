//! The empty `.kicad_pcb` board file.
//!
//! The layer stack and the `setup` block reproduce what pcbnew writes for
//! a new two-layer board: the full standard layer set, default solder mask
//! and paste clearances, and the stock plot parameters. The only net is
//! the unconnected net `0`.

use crate::sexpr::Sexpr;

/// File format version written into the header.
const FORMAT_VERSION: i64 = 20231014;

/// The standard KiCad layer stack for a two-layer board.
///
/// Entries are (ordinal, canonical name, type, optional user name).
const LAYERS: &[(i64, &str, &str, Option<&str>)] = &[
    (0, "F.Cu", "signal", None),
    (31, "B.Cu", "signal", None),
    (32, "B.Adhes", "user", Some("B.Adhesive")),
    (33, "F.Adhes", "user", Some("F.Adhesive")),
    (34, "B.Paste", "user", None),
    (35, "F.Paste", "user", None),
    (36, "B.SilkS", "user", Some("B.Silkscreen")),
    (37, "F.SilkS", "user", Some("F.Silkscreen")),
    (38, "B.Mask", "user", None),
    (39, "F.Mask", "user", None),
    (40, "Dwgs.User", "user", Some("User.Drawings")),
    (41, "Cmts.User", "user", Some("User.Comments")),
    (42, "Eco1.User", "user", Some("User.Eco1")),
    (43, "Eco2.User", "user", Some("User.Eco2")),
    (44, "Edge.Cuts", "user", None),
    (45, "Margin", "user", None),
    (46, "B.CrtYd", "user", Some("B.Courtyard")),
    (47, "F.CrtYd", "user", Some("F.Courtyard")),
    (48, "B.Fab", "user", None),
    (49, "F.Fab", "user", None),
];

/// Builds the empty board document.
#[must_use]
pub fn board_document() -> String {
    Sexpr::tagged(
        "kicad_pcb",
        vec![
            Sexpr::tagged("version", vec![Sexpr::Int(FORMAT_VERSION)]),
            Sexpr::tagged("generator", vec![Sexpr::str("pcbnew")]),
            Sexpr::tagged(
                "general",
                vec![
                    Sexpr::tagged("thickness", vec![Sexpr::Float(1.6)]),
                    Sexpr::tagged("legacy_teardrops", vec![Sexpr::sym("no")]),
                ],
            ),
            Sexpr::tagged("paper", vec![Sexpr::str("A4")]),
            layers(),
            setup(),
            Sexpr::tagged("net", vec![Sexpr::Int(0), Sexpr::str("")]),
        ],
    )
    .to_document()
}

fn layers() -> Sexpr {
    let rows = LAYERS
        .iter()
        .map(|&(ordinal, name, kind, user_name)| {
            let mut row = vec![Sexpr::Int(ordinal), Sexpr::str(name), Sexpr::sym(kind)];
            if let Some(user) = user_name {
                row.push(Sexpr::str(user));
            }
            Sexpr::list(row)
        })
        .collect();
    Sexpr::tagged("layers", rows)
}

fn setup() -> Sexpr {
    Sexpr::tagged(
        "setup",
        vec![
            Sexpr::tagged("pad_to_mask_clearance", vec![Sexpr::Int(0)]),
            Sexpr::tagged(
                "allow_soldermask_bridges_in_footprints",
                vec![Sexpr::sym("no")],
            ),
            plot_params(),
        ],
    )
}

/// Stock pcbnew plot parameters.
fn plot_params() -> Sexpr {
    fn flag(tag: &str, value: bool) -> Sexpr {
        Sexpr::tagged(tag, vec![Sexpr::sym(if value { "true" } else { "false" })])
    }
    fn int(tag: &str, value: i64) -> Sexpr {
        Sexpr::tagged(tag, vec![Sexpr::Int(value)])
    }

    Sexpr::tagged(
        "pcbplotparams",
        vec![
            Sexpr::tagged("layerselection", vec![Sexpr::sym("0x00010fc_ffffffff")]),
            Sexpr::tagged("plot_on_all_layers_selection", vec![Sexpr::sym("0x0000000_00000000")]),
            flag("disableapertmacros", false),
            flag("usegerberextensions", false),
            flag("usegerberattributes", true),
            flag("usegerberadvancedattributes", true),
            flag("creategerberjobfile", true),
            int("dashed_line_dash_ratio", 12),
            int("dashed_line_gap_ratio", 3),
            int("svgprecision", 4),
            flag("plotframeref", false),
            int("viasonmask", 0),
            int("mode", 1),
            flag("useauxorigin", false),
            int("hpglpennumber", 1),
            int("hpglpenspeed", 20),
            int("hpglpendiameter", 15),
            flag("pdf_front_fp_property_popups", true),
            flag("pdf_back_fp_property_popups", true),
            flag("dxfpolygonmode", true),
            flag("dxfimperialunits", true),
            flag("dxfusepcbnewfont", true),
            flag("psnegative", false),
            flag("psa4output", false),
            flag("plotreference", true),
            flag("plotvalue", true),
            flag("plotfptext", true),
            flag("plotinvisibletext", false),
            flag("sketchpadsonfab", false),
            flag("subtractmaskfromsilk", false),
            int("outputformat", 1),
            flag("mirror", false),
            int("drillshape", 1),
            int("scaleselection", 1),
            Sexpr::tagged("outputdirectory", vec![Sexpr::str("")]),
        ],
    )
}
