//! The `.kicad_pro` project descriptor.
//!
//! KiCad stores project settings as a JSON document with alphabetically
//! sorted keys. The descriptor is modelled here as plain serde structures
//! (fields declared in key order) and serialised with `serde_json`, so the
//! generated file is a pure function of the project name and the sheet
//! identifier rather than a string template.
//!
//! The values mirror what KiCad itself writes for a freshly created
//! project: default board design rules, the stock ERC severity table and
//! pin conflict map, the `Default` net class, and the grouped-by-value BOM
//! preset. The only variable parts are `meta.filename` and the single
//! `sheets` entry, which carries the generated sheet identifier and the
//! root sheet name `Stammblatt`.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Name KiCad shows for the root schematic sheet.
pub const ROOT_SHEET_NAME: &str = "Stammblatt";

/// Top-level structure of a `.kicad_pro` file.
///
/// Field order matches the alphabetical key order KiCad writes.
#[derive(Debug, Serialize)]
pub struct ProjectDescriptor {
    board: BoardSection,
    boards: Vec<Value>,
    cvpcb: CvpcbSection,
    erc: ErcSection,
    libraries: LibrariesSection,
    meta: Meta,
    net_settings: NetSettings,
    pcbnew: PcbnewSection,
    schematic: SchematicSection,
    sheets: Vec<(String, String)>,
    text_variables: Map<String, Value>,
}

impl ProjectDescriptor {
    /// Builds the descriptor for a new project.
    ///
    /// `sheet_uuid` must be the same identifier that the generated
    /// schematic carries in its `uuid` field, so that the descriptor's
    /// sheet list and the schematic stay mutually referential.
    #[must_use]
    pub fn new(project_name: &str, sheet_uuid: Uuid) -> Self {
        Self {
            board: BoardSection::default(),
            boards: Vec::new(),
            cvpcb: CvpcbSection::default(),
            erc: ErcSection::default(),
            libraries: LibrariesSection::default(),
            meta: Meta {
                filename: format!("{project_name}.kicad_pro"),
                version: 1,
            },
            net_settings: NetSettings::default(),
            pcbnew: PcbnewSection::default(),
            schematic: SchematicSection::default(),
            sheets: vec![(sheet_uuid.to_string(), ROOT_SHEET_NAME.to_string())],
            text_variables: Map::new(),
        }
    }

    /// Serialises the descriptor to pretty-printed JSON with a trailing
    /// newline.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialise`] if JSON serialisation fails.
    pub fn to_json(&self) -> Result<String> {
        let mut text = serde_json::to_string_pretty(self)
            .map_err(|source| Error::Serialise { source })?;
        text.push('\n');
        Ok(text)
    }
}

#[derive(Debug, Default, Serialize)]
struct BoardSection {
    #[serde(rename = "3dviewports")]
    viewports_3d: Vec<Value>,
    design_settings: DesignSettings,
    layer_presets: Vec<Value>,
    viewports: Vec<Value>,
}

#[derive(Debug, Default, Serialize)]
struct DesignSettings {
    defaults: Map<String, Value>,
    diff_pair_dimensions: Vec<Value>,
    drc_exclusions: Vec<Value>,
    rules: DesignRules,
    track_widths: Vec<Value>,
    via_dimensions: Vec<Value>,
}

/// Stock KiCad board design rules.
#[derive(Debug, Serialize)]
struct DesignRules {
    max_error: f64,
    min_clearance: f64,
    min_connection: f64,
    min_copper_edge_clearance: f64,
    min_hole_clearance: f64,
    min_hole_to_hole: f64,
    min_microvia_diameter: f64,
    min_microvia_drill: f64,
    min_resolved_spokes: u32,
    min_silk_clearance: f64,
    min_text_height: f64,
    min_text_thickness: f64,
    min_through_hole_diameter: f64,
    min_track_width: f64,
    min_via_annular_width: f64,
    min_via_diameter: f64,
    solder_mask_to_copper_clearance: f64,
    use_height_for_length_calcs: bool,
}

impl Default for DesignRules {
    fn default() -> Self {
        Self {
            max_error: 0.005,
            min_clearance: 0.0,
            min_connection: 0.0,
            min_copper_edge_clearance: 0.5,
            min_hole_clearance: 0.25,
            min_hole_to_hole: 0.25,
            min_microvia_diameter: 0.2,
            min_microvia_drill: 0.1,
            min_resolved_spokes: 2,
            min_silk_clearance: 0.0,
            min_text_height: 0.8,
            min_text_thickness: 0.08,
            min_through_hole_diameter: 0.3,
            min_track_width: 0.0,
            min_via_annular_width: 0.1,
            min_via_diameter: 0.5,
            solder_mask_to_copper_clearance: 0.0,
            use_height_for_length_calcs: true,
        }
    }
}

#[derive(Debug, Default, Serialize)]
struct CvpcbSection {
    equivalence_files: Vec<Value>,
}

#[derive(Debug, Serialize)]
struct ErcSection {
    erc_exclusions: Vec<Value>,
    meta: VersionMeta,
    pin_map: Vec<Vec<u8>>,
    rule_severities: IndexMap<String, String>,
}

impl Default for ErcSection {
    fn default() -> Self {
        Self {
            erc_exclusions: Vec::new(),
            meta: VersionMeta { version: 0 },
            pin_map: pin_conflict_map(),
            rule_severities: rule_severities(),
        }
    }
}

/// The stock 12x12 pin conflict matrix.
///
/// Rows and columns are electrical pin types; 0 = ok, 1 = warning,
/// 2 = error.
fn pin_conflict_map() -> Vec<Vec<u8>> {
    vec![
        vec![0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 2],
        vec![0, 2, 0, 1, 0, 0, 1, 0, 2, 2, 2, 2],
        vec![0, 0, 0, 0, 0, 0, 1, 0, 1, 0, 1, 2],
        vec![0, 1, 0, 0, 0, 0, 1, 1, 2, 1, 1, 2],
        vec![0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 2],
        vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2],
        vec![1, 1, 1, 1, 1, 0, 1, 1, 1, 1, 1, 2],
        vec![0, 0, 0, 1, 0, 0, 1, 0, 0, 0, 0, 2],
        vec![0, 2, 1, 2, 0, 0, 1, 0, 2, 2, 2, 2],
        vec![0, 2, 0, 1, 0, 0, 1, 0, 2, 0, 0, 2],
        vec![0, 2, 1, 1, 0, 0, 1, 0, 2, 0, 0, 2],
        vec![2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2],
    ]
}

/// The stock ERC severity table, in the order KiCad writes it.
fn rule_severities() -> IndexMap<String, String> {
    const SEVERITIES: &[(&str, &str)] = &[
        ("bus_definition_conflict", "error"),
        ("bus_entry_needed", "error"),
        ("bus_to_bus_conflict", "error"),
        ("bus_to_net_conflict", "error"),
        ("conflicting_netclasses", "error"),
        ("different_unit_footprint", "error"),
        ("different_unit_net", "error"),
        ("duplicate_reference", "error"),
        ("duplicate_sheet_names", "error"),
        ("endpoint_off_grid", "warning"),
        ("extra_units", "error"),
        ("global_label_dangling", "warning"),
        ("hier_label_mismatch", "error"),
        ("label_dangling", "error"),
        ("lib_symbol_issues", "warning"),
        ("missing_bidi_pin", "warning"),
        ("missing_input_pin", "warning"),
        ("missing_power_pin", "error"),
        ("missing_unit", "warning"),
        ("multiple_net_names", "warning"),
        ("net_not_bus_member", "warning"),
        ("no_connect_connected", "warning"),
        ("no_connect_dangling", "warning"),
        ("pin_not_connected", "error"),
        ("pin_not_driven", "error"),
        ("pin_to_pin", "warning"),
        ("power_pin_not_driven", "error"),
        ("similar_labels", "warning"),
        ("simulation_model_issue", "ignore"),
        ("unannotated", "error"),
        ("unit_value_mismatch", "error"),
        ("unresolved_variable", "error"),
        ("wire_dangling", "error"),
    ];

    SEVERITIES
        .iter()
        .map(|&(rule, severity)| (rule.to_string(), severity.to_string()))
        .collect()
}

#[derive(Debug, Default, Serialize)]
struct LibrariesSection {
    pinned_footprint_libs: Vec<Value>,
    pinned_symbol_libs: Vec<Value>,
}

#[derive(Debug, Serialize)]
struct Meta {
    filename: String,
    version: u32,
}

#[derive(Debug, Serialize)]
struct VersionMeta {
    version: u32,
}

#[derive(Debug, Serialize)]
struct NetSettings {
    classes: Vec<NetClass>,
    meta: VersionMeta,
    net_colors: Option<Value>,
    netclass_assignments: Option<Value>,
    netclass_patterns: Vec<Value>,
}

impl Default for NetSettings {
    fn default() -> Self {
        Self {
            classes: vec![NetClass::default()],
            meta: VersionMeta { version: 3 },
            net_colors: None,
            netclass_assignments: None,
            netclass_patterns: Vec::new(),
        }
    }
}

/// The `Default` net class with stock routing-rule values.
#[derive(Debug, Serialize)]
struct NetClass {
    bus_width: u32,
    clearance: f64,
    diff_pair_gap: f64,
    diff_pair_via_gap: f64,
    diff_pair_width: f64,
    line_style: u32,
    microvia_diameter: f64,
    microvia_drill: f64,
    name: String,
    pcb_color: String,
    schematic_color: String,
    track_width: f64,
    via_diameter: f64,
    via_drill: f64,
    wire_width: u32,
}

impl Default for NetClass {
    fn default() -> Self {
        Self {
            bus_width: 12,
            clearance: 0.2,
            diff_pair_gap: 0.25,
            diff_pair_via_gap: 0.25,
            diff_pair_width: 0.2,
            line_style: 0,
            microvia_diameter: 0.3,
            microvia_drill: 0.1,
            name: "Default".to_string(),
            pcb_color: "rgba(0, 0, 0, 0.000)".to_string(),
            schematic_color: "rgba(0, 0, 0, 0.000)".to_string(),
            track_width: 0.25,
            via_diameter: 0.8,
            via_drill: 0.4,
            wire_width: 6,
        }
    }
}

#[derive(Debug, Default, Serialize)]
struct PcbnewSection {
    last_paths: LastPaths,
    page_layout_descr_file: String,
}

#[derive(Debug, Default, Serialize)]
struct LastPaths {
    gencad: String,
    idf: String,
    netlist: String,
    plot: String,
    pos_files: String,
    specctra_dsn: String,
    step: String,
    svg: String,
    vrml: String,
}

#[derive(Debug, Serialize)]
struct SchematicSection {
    annotate_start_num: u32,
    bom_export_filename: String,
    bom_fmt_presets: Vec<Value>,
    bom_fmt_settings: BomFmtSettings,
    bom_presets: Vec<Value>,
    bom_settings: BomSettings,
    connection_grid_size: f64,
    drawing: DrawingSettings,
    legacy_lib_dir: String,
    legacy_lib_list: Vec<Value>,
    meta: VersionMeta,
    net_format_name: String,
    page_layout_descr_file: String,
    plot_directory: String,
    spice_current_sheet_as_root: bool,
    spice_external_command: String,
    spice_model_current_sheet_as_root: bool,
    spice_save_all_currents: bool,
    spice_save_all_dissipations: bool,
    spice_save_all_voltages: bool,
    subpart_first_id: u32,
    subpart_id_separator: u32,
}

impl Default for SchematicSection {
    fn default() -> Self {
        Self {
            annotate_start_num: 0,
            bom_export_filename: String::new(),
            bom_fmt_presets: Vec::new(),
            bom_fmt_settings: BomFmtSettings::default(),
            bom_presets: Vec::new(),
            bom_settings: BomSettings::default(),
            connection_grid_size: 50.0,
            drawing: DrawingSettings::default(),
            legacy_lib_dir: String::new(),
            legacy_lib_list: Vec::new(),
            meta: VersionMeta { version: 1 },
            net_format_name: String::new(),
            page_layout_descr_file: String::new(),
            plot_directory: String::new(),
            spice_current_sheet_as_root: false,
            spice_external_command: "spice \"%I\"".to_string(),
            spice_model_current_sheet_as_root: true,
            spice_save_all_currents: false,
            spice_save_all_dissipations: false,
            spice_save_all_voltages: false,
            subpart_first_id: 65,
            subpart_id_separator: 0,
        }
    }
}

/// CSV output preset for the schematic BOM exporter.
#[derive(Debug, Serialize)]
struct BomFmtSettings {
    field_delimiter: String,
    keep_line_breaks: bool,
    keep_tabs: bool,
    name: String,
    ref_delimiter: String,
    ref_range_delimiter: String,
    string_delimiter: String,
}

impl Default for BomFmtSettings {
    fn default() -> Self {
        Self {
            field_delimiter: ",".to_string(),
            keep_line_breaks: false,
            keep_tabs: false,
            name: "CSV".to_string(),
            ref_delimiter: ",".to_string(),
            ref_range_delimiter: String::new(),
            string_delimiter: "\"".to_string(),
        }
    }
}

/// The stock "Grouped By Value" BOM preset.
#[derive(Debug, Serialize)]
struct BomSettings {
    exclude_dnp: bool,
    fields_ordered: Vec<BomField>,
    filter_string: String,
    group_symbols: bool,
    name: String,
    sort_asc: bool,
    sort_field: String,
}

impl Default for BomSettings {
    fn default() -> Self {
        Self {
            exclude_dnp: false,
            fields_ordered: vec![
                BomField::new("Reference", "Reference", false),
                BomField::new("Value", "Value", true),
                BomField::new("Datasheet", "Datasheet", true),
                BomField::new("Footprint", "Footprint", true),
                BomField::new("Qty", "${QUANTITY}", false),
                BomField::new("DNP", "${DNP}", true),
            ],
            filter_string: String::new(),
            group_symbols: true,
            name: "Grouped By Value".to_string(),
            sort_asc: true,
            sort_field: "Reference".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct BomField {
    group_by: bool,
    label: String,
    name: String,
    show: bool,
}

impl BomField {
    fn new(label: &str, name: &str, group_by: bool) -> Self {
        Self {
            group_by,
            label: label.to_string(),
            name: name.to_string(),
            show: true,
        }
    }
}

#[derive(Debug, Serialize)]
struct DrawingSettings {
    dashed_lines_dash_length_ratio: f64,
    dashed_lines_gap_length_ratio: f64,
    default_line_thickness: f64,
    default_text_size: f64,
    field_names: Vec<Value>,
    intersheets_ref_own_page: bool,
    intersheets_ref_prefix: String,
    intersheets_ref_short: bool,
    intersheets_ref_show: bool,
    intersheets_ref_suffix: String,
    junction_size_choice: u32,
    label_size_ratio: f64,
    operating_point_overlay_i_precision: u32,
    operating_point_overlay_i_range: String,
    operating_point_overlay_v_precision: u32,
    operating_point_overlay_v_range: String,
    overbar_offset_ratio: f64,
    pin_symbol_size: f64,
    text_offset_ratio: f64,
}

impl Default for DrawingSettings {
    fn default() -> Self {
        Self {
            dashed_lines_dash_length_ratio: 12.0,
            dashed_lines_gap_length_ratio: 3.0,
            default_line_thickness: 6.0,
            default_text_size: 50.0,
            field_names: Vec::new(),
            intersheets_ref_own_page: false,
            intersheets_ref_prefix: String::new(),
            intersheets_ref_short: false,
            intersheets_ref_show: false,
            intersheets_ref_suffix: String::new(),
            junction_size_choice: 3,
            label_size_ratio: 0.375,
            operating_point_overlay_i_precision: 3,
            operating_point_overlay_i_range: "~A".to_string(),
            operating_point_overlay_v_precision: 3,
            operating_point_overlay_v_range: "~V".to_string(),
            overbar_offset_ratio: 1.23,
            pin_symbol_size: 25.0,
            text_offset_ratio: 0.15,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(name: &str, uuid: Uuid) -> Value {
        let json = ProjectDescriptor::new(name, uuid).to_json().unwrap();
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn sheet_entry_carries_uuid_and_root_name() {
        let uuid = Uuid::new_v4();
        let doc = render("myproj", uuid);
        assert_eq!(
            doc["sheets"],
            serde_json::json!([[uuid.to_string(), "Stammblatt"]])
        );
    }

    #[test]
    fn meta_filename_uses_project_name() {
        let doc = render("myproj", Uuid::new_v4());
        assert_eq!(doc["meta"]["filename"], "myproj.kicad_pro");
        assert_eq!(doc["meta"]["version"], 1);
    }

    #[test]
    fn erc_severity_table_complete() {
        let doc = render("x", Uuid::new_v4());
        let severities = doc["erc"]["rule_severities"].as_object().unwrap();
        assert_eq!(severities.len(), 33);
        assert_eq!(severities["pin_not_connected"], "error");
        assert_eq!(severities["similar_labels"], "warning");
        assert_eq!(severities["simulation_model_issue"], "ignore");
    }

    #[test]
    fn pin_map_is_square() {
        let doc = render("x", Uuid::new_v4());
        let rows = doc["erc"]["pin_map"].as_array().unwrap();
        assert_eq!(rows.len(), 12);
        assert!(rows.iter().all(|r| r.as_array().unwrap().len() == 12));
    }

    #[test]
    fn default_net_class_present() {
        let doc = render("x", Uuid::new_v4());
        let classes = doc["net_settings"]["classes"].as_array().unwrap();
        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0]["name"], "Default");
        assert!((classes[0]["clearance"].as_f64().unwrap() - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn bom_preset_groups_by_value() {
        let doc = render("x", Uuid::new_v4());
        let bom = &doc["schematic"]["bom_settings"];
        assert_eq!(bom["name"], "Grouped By Value");
        let fields = bom["fields_ordered"].as_array().unwrap();
        assert_eq!(fields[0]["name"], "Reference");
        assert_eq!(fields[4]["name"], "${QUANTITY}");
    }

    #[test]
    fn same_inputs_render_identically() {
        let uuid = Uuid::new_v4();
        let a = ProjectDescriptor::new("p", uuid).to_json().unwrap();
        let b = ProjectDescriptor::new("p", uuid).to_json().unwrap();
        assert_eq!(a, b);
    }
}
