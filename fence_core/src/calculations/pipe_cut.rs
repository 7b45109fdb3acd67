//! # Gate Frame Pipe Cuts
//!
//! Cut list and pipe cost for a welded swing-gate frame.
//!
//! ## Sizing
//!
//! The width is either the rough opening between gate posts (`opening`
//! mode) or the finished frame width (`frame` mode):
//!
//! ```text
//! opening mode: frame width   = opening - deduction - center gap
//! frame mode:   rough opening = frame + deduction + center gap
//! leaf width  = frame width / leaves
//! horizontals = leaf width - corner fitting deduction
//! uprights    = frame height
//! ```
//!
//! The deduction is the hinge and latch clearance for the tube diameter;
//! double leaves also leave a 1″ center gap.
//!
//! ## Bracing (standard leaves)
//!
//! - Horizontal brace when the frame is taller than 48″ and requested:
//!   `leaf width - 2 x OD`
//! - Two vertical braces when the leaf is wider than 60″ and requested:
//!   `(height - 2 x OD - OD if horizontal brace) / 2` each
//!
//! ## Barrier Leaves
//!
//! A barrier leaf is tapered: its hinge side is taller than its latch
//! side, and the top rail runs straight between them.
//!
//! ```text
//! top rail        = hypot(leaf width, hinge - latch)
//! diagonal brace  = hypot(leaf width, hinge)
//! midpoint brace  = latch + (hinge - latch) / 2
//! ```
//!
//! The top rail can be no longer than the two uprights laid end to end,
//! which caps a barrier leaf at `2 x sqrt(hinge x latch)` wide.
//!
//! ## Example
//!
//! ```rust
//! use fence_core::calculations::pipe_cut::{calculate, PipeCutInput};
//! use fence_core::catalog::{Catalog, FrameDiameter, GateLeafArrangement};
//! use fence_core::units::Inches;
//!
//! let catalog = Catalog::standard();
//! let mut input = PipeCutInput::from_defaults("Drive gate", Inches(96.0), Inches(48.0), &catalog);
//! input.frame_diameter = FrameDiameter::OneFiveEighths;
//! input.gate_type = GateLeafArrangement::Double;
//!
//! let result = calculate(&input, &catalog);
//! assert_eq!(result.frame_width, Inches(91.5));
//! assert_eq!(result.leaf_width, Inches(45.75));
//! assert_eq!(result.horizontals_length, Inches(42.25));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{contains_inches, Catalog, FrameDiameter, GateLeafArrangement};
use crate::errors::{CalcError, CalcResult};
use crate::units::{round2, Dollars, Feet, Inches};

/// Frames taller than this get a horizontal brace when requested
pub const HORIZONTAL_BRACE_MIN_HEIGHT_IN: f64 = 48.0;

/// Leaves wider than this get vertical braces when requested
pub const VERTICAL_BRACE_MIN_LEAF_WIDTH_IN: f64 = 60.0;

/// Posts hung on either side of the opening
pub const GATE_POSTS_PER_OPENING: u32 = 2;

/// How the entered width is read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizingMode {
    /// Width is the rough opening; the frame is derived
    #[default]
    Opening,
    /// Width is the finished frame; the rough opening is derived
    Frame,
}

/// Input for a gate frame.
///
/// `gate_height` sizes standard leaves. Barrier leaves use
/// `hinge_side_height` and `latch_side_height` instead.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Drive gate",
///   "mode": "opening",
///   "gate_width": 96.0,
///   "gate_height": 48.0,
///   "frame_diameter": "1 5/8″",
///   "gate_type": "Double",
///   "frame_color": "galvanized"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipeCutInput {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub mode: SizingMode,
    pub gate_width: Inches,
    #[serde(default)]
    pub gate_height: Inches,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hinge_side_height: Option<Inches>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latch_side_height: Option<Inches>,
    pub frame_diameter: FrameDiameter,
    pub gate_type: GateLeafArrangement,
    pub frame_color: String,
    #[serde(default)]
    pub horizontal_brace: bool,
    #[serde(default)]
    pub vertical_brace: bool,
}

impl PipeCutInput {
    /// Standard leaf with the catalog's default diameter, arrangement and
    /// color. Barrier arrangements also pick up the default barrier heights.
    pub fn from_defaults(label: impl Into<String>, gate_width: Inches, gate_height: Inches, catalog: &Catalog) -> Self {
        let defaults = &catalog.defaults.gate_pipe;
        let barrier = defaults.gate_type.is_barrier();
        PipeCutInput {
            label: label.into(),
            mode: SizingMode::Opening,
            gate_width,
            gate_height,
            hinge_side_height: barrier.then_some(defaults.barrier_hinge_height),
            latch_side_height: barrier.then_some(defaults.barrier_latch_height),
            frame_diameter: defaults.frame_diameter,
            gate_type: defaults.gate_type,
            frame_color: defaults.frame_color.clone(),
            horizontal_brace: false,
            vertical_brace: false,
        }
    }

    /// Switch to a barrier arrangement with the given side heights
    pub fn barrier(mut self, double: bool, hinge_side: Inches, latch_side: Inches) -> Self {
        self.gate_type = if double {
            GateLeafArrangement::DoubleBarrier
        } else {
            GateLeafArrangement::Barrier
        };
        self.hinge_side_height = Some(hinge_side);
        self.latch_side_height = Some(latch_side);
        self
    }

    /// Finished frame width and rough opening, in that order
    pub fn frame_and_opening(&self) -> (Inches, Inches) {
        let allowance = self.frame_diameter.opening_deduction() + self.gate_type.center_gap();
        match self.mode {
            SizingMode::Opening => (self.gate_width - allowance, self.gate_width),
            SizingMode::Frame => (self.gate_width, self.gate_width + allowance),
        }
    }

    /// Widest barrier leaf whose top rail stays within `hinge + latch`
    pub fn max_barrier_leaf_width(hinge: Inches, latch: Inches) -> Inches {
        Inches(2.0 * (hinge.0 * latch.0).max(0.0).sqrt())
    }

    pub fn leaf_width(&self) -> Inches {
        let (frame, _) = self.frame_and_opening();
        frame / f64::from(self.gate_type.leaf_count())
    }

    pub fn validate(&self, catalog: &Catalog) -> CalcResult<()> {
        let pipe = &catalog.gate_pipe;

        if !self.gate_width.0.is_finite() || self.gate_width.0 <= 0.0 {
            return Err(CalcError::invalid_input(
                "gate_width",
                self.gate_width.0.to_string(),
                "Gate width must be positive",
            ));
        }
        if !pipe.frame_diameters.contains(&self.frame_diameter) {
            return Err(CalcError::invalid_input(
                "frame_diameter",
                self.frame_diameter.label(),
                "Frame diameter is not offered in the catalog",
            ));
        }
        if !pipe.gate_types.contains(&self.gate_type) {
            return Err(CalcError::invalid_input(
                "gate_type",
                self.gate_type.label(),
                "Gate type is not offered in the catalog",
            ));
        }
        if self.frame_color.trim().is_empty() {
            return Err(CalcError::missing_field("frame_color"));
        }
        if !pipe.has_color(&self.frame_color) {
            return Err(CalcError::invalid_input(
                "frame_color",
                self.frame_color.clone(),
                "Frame color is not offered in the catalog",
            ));
        }

        if self.gate_type.is_barrier() {
            let hinge = self
                .hinge_side_height
                .ok_or_else(|| CalcError::missing_field("hinge_side_height"))?;
            let latch = self
                .latch_side_height
                .ok_or_else(|| CalcError::missing_field("latch_side_height"))?;
            if !contains_inches(&pipe.barrier_hinge_heights, hinge) {
                return Err(CalcError::invalid_input(
                    "hinge_side_height",
                    hinge.0.to_string(),
                    "Hinge side height is not offered in the catalog",
                ));
            }
            if !contains_inches(&pipe.barrier_latch_heights, latch) {
                return Err(CalcError::invalid_input(
                    "latch_side_height",
                    latch.0.to_string(),
                    "Latch side height is not offered in the catalog",
                ));
            }
            if latch.0 > hinge.0 {
                return Err(CalcError::invalid_input(
                    "latch_side_height",
                    latch.0.to_string(),
                    "Latch side cannot be taller than the hinge side",
                ));
            }
            let max_leaf = Self::max_barrier_leaf_width(hinge, latch);
            if self.leaf_width().0 > max_leaf.0 {
                return Err(CalcError::invalid_input(
                    "gate_width",
                    self.gate_width.0.to_string(),
                    format!("Barrier leaf cannot be wider than {:.2}″ for these side heights", max_leaf.0),
                ));
            }
        } else if !self.gate_height.0.is_finite() || self.gate_height.0 <= 0.0 {
            return Err(CalcError::invalid_input(
                "gate_height",
                self.gate_height.0.to_string(),
                "Gate height must be positive",
            ));
        }

        let (frame, _) = self.frame_and_opening();
        if frame.0 <= 0.0 {
            return Err(CalcError::invalid_input(
                "gate_width",
                self.gate_width.0.to_string(),
                "Opening is too narrow for the frame clearances",
            ));
        }
        if self.leaf_width().0 <= self.frame_diameter.corner_fitting_deduction().0 {
            return Err(CalcError::invalid_input(
                "gate_width",
                self.gate_width.0.to_string(),
                "Leaf is too narrow for the corner fittings",
            ));
        }
        Ok(())
    }
}

/// A frame member on the cut list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameMember {
    Horizontal,
    Upright,
    HorizontalBrace,
    VerticalBrace,
    BottomRail,
    TopRail,
    HingeUpright,
    LatchUpright,
    DiagonalBrace,
    MidpointBrace,
}

impl FrameMember {
    pub fn label(&self) -> &'static str {
        match self {
            FrameMember::Horizontal => "Horizontals",
            FrameMember::Upright => "Uprights",
            FrameMember::HorizontalBrace => "Horizontal brace",
            FrameMember::VerticalBrace => "Vertical braces",
            FrameMember::BottomRail => "Bottom rail",
            FrameMember::TopRail => "Top rail (tapered)",
            FrameMember::HingeUpright => "Hinge-side upright",
            FrameMember::LatchUpright => "Latch-side upright",
            FrameMember::DiagonalBrace => "Diagonal brace",
            FrameMember::MidpointBrace => "Midpoint vertical brace",
        }
    }
}

impl fmt::Display for FrameMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One line of the cut list. `quantity` is per leaf.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CutListEntry {
    pub member: FrameMember,
    pub quantity: u32,
    pub length: Inches,
}

impl CutListEntry {
    fn new(member: FrameMember, quantity: u32, length: Inches) -> Self {
        CutListEntry {
            member,
            quantity,
            length: length.rounded(),
        }
    }

    /// Pipe used by this line for one leaf
    pub fn total_length(&self) -> Inches {
        self.length * f64::from(self.quantity)
    }
}

/// Gate frame cut list and pricing. All lengths in inches, rounded to
/// 0.01″.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipeCutResult {
    pub frame_width: Inches,
    /// Opening between the gate posts
    pub rough_opening: Inches,
    pub leaf_width: Inches,
    pub leafs: u32,
    /// Horizontal members (the bottom rail on a barrier leaf)
    pub horizontals_length: Inches,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uprights_length: Option<Inches>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizontal_brace_length: Option<Inches>,
    /// Each of the two vertical brace pieces
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical_brace_length: Option<Inches>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_rail_length: Option<Inches>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hinge_upright_length: Option<Inches>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latch_upright_length: Option<Inches>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagonal_brace_length: Option<Inches>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub midpoint_brace_length: Option<Inches>,
    pub cut_list: Vec<CutListEntry>,
    /// Pipe across all leaves, in feet
    pub total_pipe_length: Feet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_foot: Option<Dollars>,
    /// Absent when the catalog has no price for the color and diameter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<Dollars>,
    pub post_count: u32,
    /// Center-to-center span the posts are set at (the rough opening)
    pub post_spacing: Inches,
}

impl PipeCutResult {
    fn empty(frame_width: Inches, rough_opening: Inches, leaf_width: Inches, leafs: u32, horizontals: Inches) -> Self {
        PipeCutResult {
            frame_width: frame_width.rounded(),
            rough_opening: rough_opening.rounded(),
            leaf_width: leaf_width.rounded(),
            leafs,
            horizontals_length: horizontals.rounded(),
            uprights_length: None,
            horizontal_brace_length: None,
            vertical_brace_length: None,
            top_rail_length: None,
            hinge_upright_length: None,
            latch_upright_length: None,
            diagonal_brace_length: None,
            midpoint_brace_length: None,
            cut_list: Vec::new(),
            total_pipe_length: Feet(0.0),
            price_per_foot: None,
            total_cost: None,
            post_count: GATE_POSTS_PER_OPENING,
            post_spacing: rough_opening.rounded(),
        }
    }

    /// Length for a member on the cut list, if present
    pub fn member_length(&self, member: FrameMember) -> Option<Inches> {
        self.cut_list.iter().find(|e| e.member == member).map(|e| e.length)
    }
}

/// Cut list for a standard rectangular leaf
fn standard_leaf(input: &PipeCutInput, result: &mut PipeCutResult, leaf_width: Inches, horizontals: Inches) {
    let height = input.gate_height;
    let od = input.frame_diameter.outside_diameter();

    result.cut_list.push(CutListEntry::new(FrameMember::Horizontal, 2, horizontals));
    result.cut_list.push(CutListEntry::new(FrameMember::Upright, 2, height));
    result.uprights_length = Some(height.rounded());

    let has_horizontal_brace = input.horizontal_brace && height.0 > HORIZONTAL_BRACE_MIN_HEIGHT_IN;
    if has_horizontal_brace {
        let brace = (leaf_width - od * 2.0).non_negative();
        result.cut_list.push(CutListEntry::new(FrameMember::HorizontalBrace, 1, brace));
        result.horizontal_brace_length = Some(brace.rounded());
    }

    if input.vertical_brace && leaf_width.0 > VERTICAL_BRACE_MIN_LEAF_WIDTH_IN {
        let allowance = if has_horizontal_brace { od } else { Inches(0.0) };
        let piece = ((height - od * 2.0 - allowance) / 2.0).non_negative();
        result.cut_list.push(CutListEntry::new(FrameMember::VerticalBrace, 2, piece));
        result.vertical_brace_length = Some(piece.rounded());
    }
}

/// Cut list for a tapered barrier leaf
fn barrier_leaf(input: &PipeCutInput, result: &mut PipeCutResult, leaf_width: Inches, horizontals: Inches) {
    let hinge = input.hinge_side_height.unwrap_or(input.gate_height);
    let latch = input.latch_side_height.unwrap_or(hinge);
    let rise = (hinge - latch).non_negative();

    let top_rail = Inches(leaf_width.0.hypot(rise.0));
    let diagonal = Inches(leaf_width.0.hypot(hinge.0));
    let midpoint = latch + rise / 2.0;

    result.cut_list.push(CutListEntry::new(FrameMember::BottomRail, 1, horizontals));
    result.cut_list.push(CutListEntry::new(FrameMember::TopRail, 1, top_rail));
    result.cut_list.push(CutListEntry::new(FrameMember::HingeUpright, 1, hinge));
    result.cut_list.push(CutListEntry::new(FrameMember::LatchUpright, 1, latch));
    result.cut_list.push(CutListEntry::new(FrameMember::DiagonalBrace, 1, diagonal));
    result.cut_list.push(CutListEntry::new(FrameMember::MidpointBrace, 1, midpoint));

    result.top_rail_length = Some(top_rail.rounded());
    result.hinge_upright_length = Some(hinge.rounded());
    result.latch_upright_length = Some(latch.rounded());
    result.diagonal_brace_length = Some(diagonal.rounded());
    result.midpoint_brace_length = Some(midpoint.rounded());
}

/// Calculate the cut list and cost for a gate frame. Expects an input
/// that passed [`PipeCutInput::validate`].
pub fn calculate(input: &PipeCutInput, catalog: &Catalog) -> PipeCutResult {
    let leafs = input.gate_type.leaf_count();
    let (frame_width, rough_opening) = input.frame_and_opening();
    let leaf_width = input.leaf_width();
    let horizontals = (leaf_width - input.frame_diameter.corner_fitting_deduction()).non_negative();

    let mut result = PipeCutResult::empty(frame_width, rough_opening, leaf_width, leafs, horizontals);
    if input.gate_type.is_barrier() {
        barrier_leaf(input, &mut result, leaf_width, horizontals);
    } else {
        standard_leaf(input, &mut result, leaf_width, horizontals);
    }

    let per_leaf: Inches = result.cut_list.iter().map(CutListEntry::total_length).sum();
    let total_pipe = Feet::from(per_leaf * f64::from(leafs));
    result.total_pipe_length = total_pipe.rounded();

    result.price_per_foot = catalog.gate_pipe.price_per_foot(&input.frame_color, input.frame_diameter);
    result.total_cost = result.price_per_foot.map(|price| Dollars(round2(total_pipe.0 * price.0)));
    if result.price_per_foot.is_none() {
        tracing::warn!(
            color = %input.frame_color,
            diameter = %input.frame_diameter,
            "no pipe price for color and diameter, cost omitted"
        );
    }

    tracing::debug!(
        label = %input.label,
        frame_in = frame_width.0,
        leaf_in = leaf_width.0,
        members = result.cut_list.len(),
        pipe_ft = result.total_pipe_length.0,
        "gate frame calculated"
    );

    result
}
