//! # Ball Field
//!
//! Chain-link take-off for a ball field: the backstop behind home plate
//! and the perimeter fence line down both sidelines and across the
//! outfield.
//!
//! ## Backstop
//!
//! A center panel with a wing on each side, each wing as long as the
//! center is wide. The two outer wing posts are ends; the two posts where
//! the wings meet the center are corners. The backstop carries a top rail
//! and a mid brace rail.
//!
//! ## Fence Line
//!
//! `2 x sideline + homerun` feet of fence with line posts every 10 ft. The
//! two sideline-to-outfield junctions are its terminal posts and take
//! corner hardware.

use serde::{Deserialize, Serialize};

use super::{ceil_count, validate_length, MAX_RUN_LENGTH_FT};
use super::chainlink::{fabric_rolls, tie_wires, top_rail_sticks, TerminalHardware};
use crate::catalog::{contains_feet, Catalog, FenceLineConstants};
use crate::errors::{CalcError, CalcResult};
use crate::layout::{layout_posts, sections_for};
use crate::units::Feet;

const BACKSTOP_ENDS: u32 = 2;
const BACKSTOP_CORNERS: u32 = 2;
const BACKSTOP_RAILS: u32 = 2;
const FENCE_LINE_CORNERS: u32 = 2;
const FENCE_LINE_RAILS: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallFieldInput {
    #[serde(default)]
    pub label: String,
    pub backstop_height: Feet,
    /// Width of the center panel
    pub backstop_width: Feet,
    /// Each sideline, home plate to the outfield corner
    pub sideline_length: Feet,
    /// Outfield fence, corner to corner
    pub homerun_length: Feet,
    pub fence_height: Feet,
}

impl BallFieldInput {
    pub fn from_defaults(label: impl Into<String>, catalog: &Catalog) -> Self {
        let defaults = &catalog.defaults.ball_field;
        BallFieldInput {
            label: label.into(),
            backstop_height: defaults.backstop_height,
            backstop_width: defaults.backstop_width,
            sideline_length: defaults.sideline_length,
            homerun_length: defaults.homerun_length,
            fence_height: defaults.fence_height,
        }
    }

    /// Footage of the perimeter fence line
    pub fn fence_line_footage(&self) -> Feet {
        self.sideline_length * 2.0 + self.homerun_length
    }

    pub fn validate(&self, catalog: &Catalog) -> CalcResult<()> {
        let table = &catalog.ball_field;
        for (field, list, value) in [
            ("backstop_height", &table.backstop_heights, self.backstop_height),
            ("backstop_width", &table.backstop_widths, self.backstop_width),
            ("fence_height", &table.fence_heights, self.fence_height),
        ] {
            if !contains_feet(list, value) {
                return Err(CalcError::invalid_input(
                    field,
                    value.0.to_string(),
                    "Size is not offered in the catalog",
                ));
            }
        }
        for (field, value) in [("sideline_length", self.sideline_length), ("homerun_length", self.homerun_length)] {
            validate_length(field, value, MAX_RUN_LENGTH_FT)?;
        }
        Ok(())
    }
}

/// Quantities shared by the backstop and the fence line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FabricRun {
    pub total_footage: Feet,
    pub line_posts: u32,
    pub terminal_posts: u32,
    pub fabric_rolls: u32,
    pub top_rail_sticks: u32,
    pub tie_wires: u32,
    pub loop_caps: u32,
    #[serde(flatten)]
    pub terminal_hardware: Option<TerminalHardware>,
    /// One per brace band per rail
    pub rail_ends: u32,
    pub hog_rings: u32,
    pub tension_wire_coils: u32,
}

impl FabricRun {
    fn new(
        footage: Feet,
        height: Feet,
        line_posts: u32,
        ends: u32,
        corners: u32,
        rails: u32,
        constants: &FenceLineConstants,
    ) -> Self {
        let terminal_hardware = TerminalHardware::derive(ends, corners, height);
        let brace_bands = terminal_hardware.map_or(0, |hw| hw.brace_bands);
        FabricRun {
            total_footage: footage.rounded(),
            line_posts,
            terminal_posts: ends.saturating_add(corners),
            fabric_rolls: fabric_rolls(footage, height, constants),
            top_rail_sticks: top_rail_sticks(footage, constants),
            tie_wires: tie_wires(footage, constants),
            loop_caps: line_posts,
            terminal_hardware,
            rail_ends: brace_bands.saturating_mul(rails),
            hog_rings: ceil_count(footage.0 * constants.hog_rings_per_foot),
            tension_wire_coils: ceil_count(footage.0 / constants.tension_wire_coil_length.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackstopResult {
    pub center_width: Feet,
    pub wing_length: Feet,
    pub main_posts: u32,
    pub wing_posts: u32,
    /// Sticks for the mid brace rail, same count as the top rail
    pub brace_rail_sticks: u32,
    #[serde(flatten)]
    pub run: FabricRun,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallFieldResult {
    pub backstop: BackstopResult,
    /// Absent when the field has no sideline or outfield fence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fence_line: Option<FabricRun>,
}

fn backstop(input: &BallFieldInput, constants: &FenceLineConstants) -> BackstopResult {
    let center = input.backstop_width;
    let wing = center;
    let footage = center + wing * 2.0;
    let spacing = constants.line_post_spacing;

    let main_posts = sections_for(center, spacing).saturating_add(1);
    let wing_posts = sections_for(wing, spacing).saturating_mul(2);
    let terminals = BACKSTOP_ENDS + BACKSTOP_CORNERS;
    let line_posts = main_posts.saturating_add(wing_posts).saturating_sub(terminals);

    let run = FabricRun::new(
        footage,
        input.backstop_height,
        line_posts,
        BACKSTOP_ENDS,
        BACKSTOP_CORNERS,
        BACKSTOP_RAILS,
        constants,
    );

    BackstopResult {
        center_width: center,
        wing_length: wing,
        main_posts,
        wing_posts,
        brace_rail_sticks: run.top_rail_sticks,
        run,
    }
}

fn fence_line(input: &BallFieldInput, constants: &FenceLineConstants) -> Option<FabricRun> {
    let footage = input.fence_line_footage();
    if footage.0 <= 0.0 {
        return None;
    }
    let layout = layout_posts(footage, constants.line_post_spacing, 0, FENCE_LINE_CORNERS);
    Some(FabricRun::new(
        footage,
        input.fence_height,
        layout.line_posts,
        0,
        FENCE_LINE_CORNERS,
        FENCE_LINE_RAILS,
        constants,
    ))
}

pub fn calculate(input: &BallFieldInput, catalog: &Catalog) -> BallFieldResult {
    let constants = &catalog.constants;
    let result = BallFieldResult {
        backstop: backstop(input, constants),
        fence_line: fence_line(input, constants),
    };

    tracing::debug!(
        label = %input.label,
        backstop_ft = result.backstop.run.total_footage.0,
        fence_line_ft = result.fence_line.as_ref().map_or(0.0, |f| f.total_footage.0),
        "ball field calculated"
    );

    result
}
