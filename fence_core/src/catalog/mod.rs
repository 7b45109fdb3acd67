//! # Product Catalog
//!
//! The catalog is the read-only table of everything a calculator may be
//! asked for: allowed heights, panel and gate widths, pipe diameters,
//! price per foot by color and diameter, fixed fence-line constants, and
//! the default selection for each calculator.
//!
//! A `Catalog` is an ordinary value. Calculations take it by reference, so
//! tests and alternate price books can pass their own. For callers that
//! want one process-wide instance, [`Catalog::shared`] builds the standard
//! catalog once and hands out `&'static` references.
//!
//! ## Example
//!
//! ```rust
//! use fence_core::catalog::{Catalog, FrameDiameter};
//! use fence_core::units::Dollars;
//!
//! let catalog = Catalog::standard();
//! let price = catalog.gate_pipe.price_per_foot("black", FrameDiameter::Two);
//! assert_eq!(price, Some(Dollars(2.85)));
//! ```

pub mod gate_pipe;

pub use gate_pipe::{FrameDiameter, GateLeafArrangement, DOUBLE_GATE_CENTER_GAP_IN};

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{Dollars, Feet, Inches};

/// Schema version written into catalog files
pub const CATALOG_SCHEMA_VERSION: &str = "1.0";

static STANDARD_CATALOG: Lazy<Catalog> = Lazy::new(Catalog::standard);

/// Tolerance when matching a numeric selection against a catalog list
const MEMBER_TOLERANCE: f64 = 1e-9;

/// A selectable width, kept as the exact string value the catalog lists
/// together with its display label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidthOption {
    /// Width in feet as a string, e.g. "8"
    pub value: String,
    /// Display label, e.g. "8 ft (2 x 4ft)"
    pub label: String,
}

impl WidthOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        WidthOption {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Single- and double-leaf gate widths offered for one fence family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateWidthOptions {
    pub single: Vec<WidthOption>,
    pub double: Vec<WidthOption>,
}

impl GateWidthOptions {
    /// Label for a single-gate width, falling back to "{value} ft"
    pub fn single_label(&self, value: &str) -> String {
        label_or_feet(&self.single, value)
    }

    /// Label for a double-gate width, falling back to "{value} ft"
    pub fn double_label(&self, value: &str) -> String {
        label_or_feet(&self.double, value)
    }

    pub fn has_single(&self, value: &str) -> bool {
        self.single.iter().any(|o| o.value == value)
    }

    pub fn has_double(&self, value: &str) -> bool {
        self.double.iter().any(|o| o.value == value)
    }
}

fn label_or_feet(options: &[WidthOption], value: &str) -> String {
    options
        .iter()
        .find(|o| o.value == value)
        .map(|o| o.label.clone())
        .unwrap_or_else(|| format!("{} ft", value))
}

/// Chain-link fence grade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainlinkFenceType {
    /// Selection value, e.g. "residential"
    pub value: String,
    /// Line pipe weight, e.g. "SS20 WT"
    pub pipe_weight: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainlinkCatalog {
    pub fence_types: Vec<ChainlinkFenceType>,
    /// Fabric description printed on the take-off
    pub fabric_type: String,
}

impl ChainlinkCatalog {
    pub fn pipe_weight(&self, fence_type: &str) -> Option<&str> {
        self.fence_types
            .iter()
            .find(|t| t.value == fence_type)
            .map(|t| t.pipe_weight.as_str())
    }
}

/// Frame finish option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameColorOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatePipeCatalog {
    pub frame_diameters: Vec<FrameDiameter>,
    pub gate_types: Vec<GateLeafArrangement>,
    pub frame_colors: Vec<FrameColorOption>,
    pub barrier_hinge_heights: Vec<Inches>,
    pub barrier_latch_heights: Vec<Inches>,
    /// Price per foot of pipe, keyed by color value then diameter
    pub pricing: BTreeMap<String, BTreeMap<FrameDiameter, f64>>,
}

impl GatePipeCatalog {
    /// Price per foot for a color/diameter pair, `None` when unpriced
    pub fn price_per_foot(&self, color: &str, diameter: FrameDiameter) -> Option<Dollars> {
        self.pricing
            .get(color)
            .and_then(|by_diameter| by_diameter.get(&diameter))
            .map(|&price| Dollars(price))
    }

    pub fn has_color(&self, color: &str) -> bool {
        self.frame_colors.iter().any(|c| c.value == color)
    }
}

/// Panel widths for pre-built panel systems (vinyl, aluminum)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelCatalog {
    pub panel_widths: Vec<Feet>,
}

/// Picket board width with its nominal label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PicketWidthOption {
    pub value: Inches,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WoodCatalog {
    pub post_spacings: Vec<Feet>,
    pub picket_widths: Vec<PicketWidthOption>,
    pub rail_counts: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitRailCatalog {
    pub rails_per_section: Vec<u32>,
    pub post_spacings: Vec<Feet>,
    pub gates: GateWidthOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallFieldCatalog {
    pub backstop_heights: Vec<Feet>,
    pub backstop_widths: Vec<Feet>,
    pub fence_heights: Vec<Feet>,
}

/// Fixed material constants shared by every chain-link style take-off
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FenceLineConstants {
    /// Maximum spacing between chain-link line posts
    pub line_post_spacing: Feet,
    /// Length of one roll of fabric
    pub fabric_roll_length: Feet,
    /// Tallest fabric sold on a single roll
    pub fabric_roll_max_height: Feet,
    /// Length of one top-rail stick
    pub top_rail_stick_length: Feet,
    /// Tie wires per foot of fabric
    pub tie_wires_per_foot: f64,
    /// Hog rings per foot of bottom tension wire
    pub hog_rings_per_foot: f64,
    /// Length of one coil of tension wire
    pub tension_wire_coil_length: Feet,
}

impl Default for FenceLineConstants {
    fn default() -> Self {
        FenceLineConstants {
            line_post_spacing: Feet(10.0),
            fabric_roll_length: Feet(50.0),
            fabric_roll_max_height: Feet(12.0),
            top_rail_stick_length: Feet(21.0),
            tie_wires_per_foot: 1.5,
            hog_rings_per_foot: 1.0,
            tension_wire_coil_length: Feet(1000.0),
        }
    }
}

// ============================================================================
// Defaults
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainlinkDefaults {
    pub fence_height: Feet,
    pub fence_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatePipeDefaults {
    pub frame_diameter: FrameDiameter,
    pub gate_type: GateLeafArrangement,
    pub frame_color: String,
    pub barrier_hinge_height: Inches,
    pub barrier_latch_height: Inches,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelFenceDefaults {
    pub fence_height: Feet,
    pub panel_width: Feet,
    pub single_gate_width: String,
    pub double_gate_width: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WoodDefaults {
    pub fence_height: Feet,
    pub post_spacing: Feet,
    pub picket_width: Inches,
    pub num_rails: u32,
    pub single_gate_width: String,
    pub double_gate_width: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitRailDefaults {
    pub rails_per_section: u32,
    pub post_spacing: Feet,
    pub ends: u32,
    pub single_gate_width: String,
    pub double_gate_width: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallFieldDefaults {
    pub backstop_height: Feet,
    pub backstop_width: Feet,
    pub sideline_length: Feet,
    pub homerun_length: Feet,
    pub fence_height: Feet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PicketDefaults {
    pub picket_width: Inches,
    pub section_width: Feet,
    pub section_height: Feet,
    pub num_rails: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CantileverDefaults {
    pub opening_size: Feet,
    pub gate_height: Feet,
    pub include_diagonal_brace: bool,
}

/// Default selection for every calculator. Each value must be a member of
/// the matching catalog table; [`Catalog::validate`] enforces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Defaults {
    pub chainlink: ChainlinkDefaults,
    pub gate_pipe: GatePipeDefaults,
    pub vinyl: PanelFenceDefaults,
    pub wood: WoodDefaults,
    pub aluminum: PanelFenceDefaults,
    pub split_rail: SplitRailDefaults,
    pub ball_field: BallFieldDefaults,
    pub picket: PicketDefaults,
    pub cantilever: CantileverDefaults,
}

// ============================================================================
// Catalog
// ============================================================================

/// The complete product catalog.
///
/// ## JSON Shape (abridged)
///
/// ```json
/// {
///   "schema_version": "1.0",
///   "fence_heights": [3.0, 4.0, 5.0, 6.0],
///   "gate_pipe": {
///     "frame_diameters": ["1 3/8″", "1 5/8″", "2″"],
///     "pricing": { "galvanized": { "1 3/8″": 0.74 } }
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub schema_version: String,
    /// Fence heights offered for the panel and chain-link families
    pub fence_heights: Vec<Feet>,
    pub chainlink: ChainlinkCatalog,
    pub gate_pipe: GatePipeCatalog,
    pub vinyl: PanelCatalog,
    pub wood: WoodCatalog,
    pub aluminum: PanelCatalog,
    pub split_rail: SplitRailCatalog,
    /// Gate widths shared by vinyl, wood and aluminum
    pub generic_gates: GateWidthOptions,
    pub ball_field: BallFieldCatalog,
    #[serde(default)]
    pub constants: FenceLineConstants,
    pub defaults: Defaults,
}

impl Catalog {
    /// Build the standard catalog shipped with the estimator
    pub fn standard() -> Self {
        let mut pricing = BTreeMap::new();
        pricing.insert(
            "galvanized".to_string(),
            BTreeMap::from([
                (FrameDiameter::OneThreeEighths, 0.74),
                (FrameDiameter::OneFiveEighths, 0.87),
                (FrameDiameter::Two, 1.44),
            ]),
        );
        pricing.insert(
            "black".to_string(),
            BTreeMap::from([
                (FrameDiameter::OneThreeEighths, 1.04),
                (FrameDiameter::OneFiveEighths, 1.54),
                (FrameDiameter::Two, 2.85),
            ]),
        );

        let generic_gates = GateWidthOptions {
            single: vec![
                WidthOption::new("3", "3 ft"),
                WidthOption::new("4", "4 ft"),
                WidthOption::new("5", "5 ft"),
            ],
            double: vec![
                WidthOption::new("6", "6 ft (2 x 3ft)"),
                WidthOption::new("8", "8 ft (2 x 4ft)"),
                WidthOption::new("10", "10 ft (2 x 5ft)"),
            ],
        };

        let split_rail_gates = GateWidthOptions {
            single: vec![
                WidthOption::new("3", "3 ft"),
                WidthOption::new("4", "4 ft"),
                WidthOption::new("5", "5 ft"),
                WidthOption::new("6", "6 ft"),
            ],
            double: vec![
                WidthOption::new("6", "6 ft (2 x 3ft)"),
                WidthOption::new("8", "8 ft (2 x 4ft)"),
                WidthOption::new("10", "10 ft (2 x 5ft)"),
                WidthOption::new("12", "12 ft (2 x 6ft)"),
            ],
        };

        Catalog {
            schema_version: CATALOG_SCHEMA_VERSION.to_string(),
            fence_heights: feet_list(&[3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]),
            chainlink: ChainlinkCatalog {
                fence_types: vec![
                    ChainlinkFenceType {
                        value: "residential".to_string(),
                        pipe_weight: "SS20 WT".to_string(),
                    },
                    ChainlinkFenceType {
                        value: "commercial".to_string(),
                        pipe_weight: "SS40 WT".to_string(),
                    },
                ],
                fabric_type: "9ga wire".to_string(),
            },
            gate_pipe: GatePipeCatalog {
                frame_diameters: FrameDiameter::ALL.to_vec(),
                gate_types: GateLeafArrangement::ALL.to_vec(),
                frame_colors: vec![
                    FrameColorOption {
                        value: "galvanized".to_string(),
                        label: "Galvanized".to_string(),
                    },
                    FrameColorOption {
                        value: "black".to_string(),
                        label: "Black".to_string(),
                    },
                ],
                barrier_hinge_heights: inches_list(&[36.0, 42.0]),
                barrier_latch_heights: inches_list(&[24.0, 30.0]),
                pricing,
            },
            vinyl: PanelCatalog {
                panel_widths: feet_list(&[6.0, 8.0]),
            },
            wood: WoodCatalog {
                post_spacings: feet_list(&[6.0, 7.0, 8.0]),
                picket_widths: vec![
                    PicketWidthOption {
                        value: Inches(3.5),
                        label: "1x4 (3.5″)".to_string(),
                    },
                    PicketWidthOption {
                        value: Inches(5.5),
                        label: "1x6 (5.5″)".to_string(),
                    },
                ],
                rail_counts: vec![2, 3],
            },
            aluminum: PanelCatalog {
                panel_widths: feet_list(&[6.0, 8.0]),
            },
            split_rail: SplitRailCatalog {
                rails_per_section: vec![2, 3, 4],
                post_spacings: feet_list(&[10.0]),
                gates: split_rail_gates,
            },
            generic_gates,
            ball_field: BallFieldCatalog {
                backstop_heights: feet_list(&[10.0, 12.0, 14.0, 16.0]),
                backstop_widths: feet_list(&[10.0, 20.0, 30.0]),
                fence_heights: feet_list(&[4.0, 6.0, 8.0, 10.0]),
            },
            constants: FenceLineConstants::default(),
            defaults: Defaults {
                chainlink: ChainlinkDefaults {
                    fence_height: Feet(3.0),
                    fence_type: "residential".to_string(),
                },
                gate_pipe: GatePipeDefaults {
                    frame_diameter: FrameDiameter::OneThreeEighths,
                    gate_type: GateLeafArrangement::Single,
                    frame_color: "galvanized".to_string(),
                    barrier_hinge_height: Inches(36.0),
                    barrier_latch_height: Inches(24.0),
                },
                vinyl: PanelFenceDefaults {
                    fence_height: Feet(3.0),
                    panel_width: Feet(8.0),
                    single_gate_width: "3".to_string(),
                    double_gate_width: "6".to_string(),
                },
                wood: WoodDefaults {
                    fence_height: Feet(3.0),
                    post_spacing: Feet(8.0),
                    picket_width: Inches(3.5),
                    num_rails: 2,
                    single_gate_width: "3".to_string(),
                    double_gate_width: "6".to_string(),
                },
                aluminum: PanelFenceDefaults {
                    fence_height: Feet(3.0),
                    panel_width: Feet(6.0),
                    single_gate_width: "3".to_string(),
                    double_gate_width: "6".to_string(),
                },
                split_rail: SplitRailDefaults {
                    rails_per_section: 2,
                    post_spacing: Feet(10.0),
                    ends: 2,
                    single_gate_width: "3".to_string(),
                    double_gate_width: "6".to_string(),
                },
                ball_field: BallFieldDefaults {
                    backstop_height: Feet(12.0),
                    backstop_width: Feet(20.0),
                    sideline_length: Feet(150.0),
                    homerun_length: Feet(200.0),
                    fence_height: Feet(4.0),
                },
                picket: PicketDefaults {
                    picket_width: Inches(3.5),
                    section_width: Feet(8.0),
                    section_height: Feet(6.0),
                    num_rails: 2,
                },
                cantilever: CantileverDefaults {
                    opening_size: Feet(20.0),
                    gate_height: Feet(6.0),
                    include_diagonal_brace: true,
                },
            },
        }
    }

    /// Process-wide standard catalog, built on first use
    pub fn shared() -> &'static Catalog {
        &STANDARD_CATALOG
    }

    /// Label for a picket width, e.g. "1x4 (3.5″)"
    pub fn picket_label(&self, width: Inches) -> Option<&str> {
        self.wood
            .picket_widths
            .iter()
            .find(|p| same_length(p.value.0, width.0))
            .map(|p| p.label.as_str())
    }

    /// Check that every default selection is a member of its table and
    /// that tables are non-empty where a calculator depends on them.
    pub fn validate(&self) -> CalcResult<()> {
        let d = &self.defaults;

        require_feet("fence_heights", &self.fence_heights, d.chainlink.fence_height)?;
        if self.chainlink.pipe_weight(&d.chainlink.fence_type).is_none() {
            return Err(CalcError::catalog_entry_not_found(
                "chainlink.fence_types",
                d.chainlink.fence_type.clone(),
            ));
        }

        if !self.gate_pipe.frame_diameters.contains(&d.gate_pipe.frame_diameter) {
            return Err(CalcError::catalog_entry_not_found(
                "gate_pipe.frame_diameters",
                d.gate_pipe.frame_diameter.label(),
            ));
        }
        if !self.gate_pipe.gate_types.contains(&d.gate_pipe.gate_type) {
            return Err(CalcError::catalog_entry_not_found(
                "gate_pipe.gate_types",
                d.gate_pipe.gate_type.label(),
            ));
        }
        if !self.gate_pipe.has_color(&d.gate_pipe.frame_color) {
            return Err(CalcError::catalog_entry_not_found(
                "gate_pipe.frame_colors",
                d.gate_pipe.frame_color.clone(),
            ));
        }
        require_inches(
            "gate_pipe.barrier_hinge_heights",
            &self.gate_pipe.barrier_hinge_heights,
            d.gate_pipe.barrier_hinge_height,
        )?;
        require_inches(
            "gate_pipe.barrier_latch_heights",
            &self.gate_pipe.barrier_latch_heights,
            d.gate_pipe.barrier_latch_height,
        )?;

        require_feet("fence_heights", &self.fence_heights, d.vinyl.fence_height)?;
        require_feet("vinyl.panel_widths", &self.vinyl.panel_widths, d.vinyl.panel_width)?;
        require_gate_defaults("generic_gates", &self.generic_gates, &d.vinyl.single_gate_width, &d.vinyl.double_gate_width)?;

        require_feet("fence_heights", &self.fence_heights, d.wood.fence_height)?;
        require_feet("wood.post_spacings", &self.wood.post_spacings, d.wood.post_spacing)?;
        if self.picket_label(d.wood.picket_width).is_none() {
            return Err(CalcError::catalog_entry_not_found(
                "wood.picket_widths",
                d.wood.picket_width.0.to_string(),
            ));
        }
        if !self.wood.rail_counts.contains(&d.wood.num_rails) {
            return Err(CalcError::catalog_entry_not_found(
                "wood.rail_counts",
                d.wood.num_rails.to_string(),
            ));
        }
        require_gate_defaults("generic_gates", &self.generic_gates, &d.wood.single_gate_width, &d.wood.double_gate_width)?;

        require_feet("fence_heights", &self.fence_heights, d.aluminum.fence_height)?;
        require_feet("aluminum.panel_widths", &self.aluminum.panel_widths, d.aluminum.panel_width)?;
        require_gate_defaults(
            "generic_gates",
            &self.generic_gates,
            &d.aluminum.single_gate_width,
            &d.aluminum.double_gate_width,
        )?;

        if !self.split_rail.rails_per_section.contains(&d.split_rail.rails_per_section) {
            return Err(CalcError::catalog_entry_not_found(
                "split_rail.rails_per_section",
                d.split_rail.rails_per_section.to_string(),
            ));
        }
        require_feet("split_rail.post_spacings", &self.split_rail.post_spacings, d.split_rail.post_spacing)?;
        require_gate_defaults(
            "split_rail.gates",
            &self.split_rail.gates,
            &d.split_rail.single_gate_width,
            &d.split_rail.double_gate_width,
        )?;

        require_feet("ball_field.backstop_heights", &self.ball_field.backstop_heights, d.ball_field.backstop_height)?;
        require_feet("ball_field.backstop_widths", &self.ball_field.backstop_widths, d.ball_field.backstop_width)?;
        require_feet("ball_field.fence_heights", &self.ball_field.fence_heights, d.ball_field.fence_height)?;

        if self.picket_label(d.picket.picket_width).is_none() {
            return Err(CalcError::catalog_entry_not_found(
                "wood.picket_widths",
                d.picket.picket_width.0.to_string(),
            ));
        }

        let c = &self.constants;
        for (name, value) in [
            ("constants.line_post_spacing", c.line_post_spacing.0),
            ("constants.fabric_roll_length", c.fabric_roll_length.0),
            ("constants.fabric_roll_max_height", c.fabric_roll_max_height.0),
            ("constants.top_rail_stick_length", c.top_rail_stick_length.0),
            ("constants.tension_wire_coil_length", c.tension_wire_coil_length.0),
        ] {
            if value <= 0.0 {
                return Err(CalcError::invalid_input(name, value.to_string(), "Must be positive"));
            }
        }

        Ok(())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::standard()
    }
}

fn feet_list(values: &[f64]) -> Vec<Feet> {
    values.iter().copied().map(Feet).collect()
}

fn inches_list(values: &[f64]) -> Vec<Inches> {
    values.iter().copied().map(Inches).collect()
}

/// Compare two catalog lengths
pub(crate) fn same_length(a: f64, b: f64) -> bool {
    (a - b).abs() < MEMBER_TOLERANCE
}

/// True when `value` is one of the listed lengths
pub(crate) fn contains_feet(list: &[Feet], value: Feet) -> bool {
    list.iter().any(|v| same_length(v.0, value.0))
}

pub(crate) fn contains_inches(list: &[Inches], value: Inches) -> bool {
    list.iter().any(|v| same_length(v.0, value.0))
}

fn require_feet(table: &str, list: &[Feet], value: Feet) -> CalcResult<()> {
    if contains_feet(list, value) {
        Ok(())
    } else {
        Err(CalcError::catalog_entry_not_found(table, value.0.to_string()))
    }
}

fn require_inches(table: &str, list: &[Inches], value: Inches) -> CalcResult<()> {
    if contains_inches(list, value) {
        Ok(())
    } else {
        Err(CalcError::catalog_entry_not_found(table, value.0.to_string()))
    }
}

fn require_gate_defaults(table: &str, gates: &GateWidthOptions, single: &str, double: &str) -> CalcResult<()> {
    if !gates.has_single(single) {
        return Err(CalcError::catalog_entry_not_found(format!("{}.single", table), single));
    }
    if !gates.has_double(double) {
        return Err(CalcError::catalog_entry_not_found(format!("{}.double", table), double));
    }
    Ok(())
}
