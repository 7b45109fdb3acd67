//! # Chain-Link Fence
//!
//! Material take-off for a straight chain-link run: line posts, fabric,
//! top rail, tie wires, and the tension hardware at terminal posts.
//!
//! The fabric and terminal-hardware formulas here are shared with the
//! backstop and cantilever calculators.
//!
//! ## Terminal Hardware
//!
//! | Item          | Per end | Per corner |
//! |---------------|---------|------------|
//! | Brace bands   | 1       | 2          |
//! | Tension bars  | 1       | 2          |
//! | Tension bands | height (ft) per terminal post |
//! | Post caps     | 1 per terminal post           |
//!
//! ## Example
//!
//! ```rust
//! use fence_core::calculations::chainlink::{calculate, ChainlinkInput};
//! use fence_core::catalog::Catalog;
//! use fence_core::units::Feet;
//!
//! let catalog = Catalog::standard();
//! let input = ChainlinkInput::from_defaults("Back yard", Feet(100.0), 2, 1, &catalog);
//! input.validate(&catalog).unwrap();
//!
//! let result = calculate(&input, &catalog);
//! assert_eq!(result.fabric_rolls, 2);
//! assert_eq!(result.interior_line_posts, 8);
//! ```

use serde::{Deserialize, Serialize};

use super::{ceil_count, validate_run_length, validate_terminals};
use crate::catalog::{contains_feet, Catalog, FenceLineConstants};
use crate::errors::{CalcError, CalcResult};
use crate::layout::layout_posts;
use crate::units::Feet;

/// Input for a chain-link run.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Back yard",
///   "fence_length": 100.0,
///   "fence_height": 4.0,
///   "fence_type": "residential",
///   "ends": 2,
///   "corners": 1
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainlinkInput {
    #[serde(default)]
    pub label: String,
    pub fence_length: Feet,
    pub fence_height: Feet,
    /// Fence grade, e.g. "residential"
    pub fence_type: String,
    #[serde(default)]
    pub ends: u32,
    #[serde(default)]
    pub corners: u32,
}

impl ChainlinkInput {
    /// Build an input with the catalog's default height and grade
    pub fn from_defaults(label: impl Into<String>, fence_length: Feet, ends: u32, corners: u32, catalog: &Catalog) -> Self {
        let defaults = &catalog.defaults.chainlink;
        ChainlinkInput {
            label: label.into(),
            fence_length,
            fence_height: defaults.fence_height,
            fence_type: defaults.fence_type.clone(),
            ends,
            corners,
        }
    }

    pub fn validate(&self, catalog: &Catalog) -> CalcResult<()> {
        validate_run_length(self.fence_length)?;
        validate_terminals(self.ends, self.corners)?;
        if !contains_feet(&catalog.fence_heights, self.fence_height) {
            return Err(CalcError::invalid_input(
                "fence_height",
                self.fence_height.0.to_string(),
                "Fence height is not offered in the catalog",
            ));
        }
        if self.fence_type.trim().is_empty() {
            return Err(CalcError::missing_field("fence_type"));
        }
        if catalog.chainlink.pipe_weight(&self.fence_type).is_none() {
            return Err(CalcError::invalid_input(
                "fence_type",
                self.fence_type.clone(),
                "Unknown chain-link fence type",
            ));
        }
        Ok(())
    }
}

/// Tension hardware for the terminal posts of a chain-link run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalHardware {
    pub brace_bands: u32,
    pub tension_bars: u32,
    pub tension_bands: u32,
    pub nuts_and_bolts: u32,
    pub post_caps: u32,
}

impl TerminalHardware {
    /// Derive terminal hardware, `None` when the run has no terminal posts.
    ///
    /// Corners take double brace bands and tension bars. Tension bands run
    /// one per foot of fence height on every terminal post.
    pub fn derive(ends: u32, corners: u32, fence_height: Feet) -> Option<Self> {
        let terminal_posts = ends.saturating_add(corners);
        if terminal_posts == 0 {
            return None;
        }

        let doubled = ends.saturating_add(corners.saturating_mul(2));
        let bands_per_post = fence_height.0.max(0.0).floor() as u32;
        let tension_bands = bands_per_post.saturating_mul(terminal_posts);

        Some(TerminalHardware {
            brace_bands: doubled,
            tension_bars: doubled,
            tension_bands,
            nuts_and_bolts: tension_bands.saturating_add(doubled),
            post_caps: terminal_posts,
        })
    }
}

/// Rolls of fabric for `footage` of fence.
///
/// Fabric taller than a roll is hung in courses, each course a full set
/// of rolls.
pub fn fabric_rolls(footage: Feet, fence_height: Feet, constants: &FenceLineConstants) -> u32 {
    let rolls_per_course = ceil_count(footage.0 / constants.fabric_roll_length.0);
    let courses = ceil_count(fence_height.0 / constants.fabric_roll_max_height.0).max(1);
    rolls_per_course.saturating_mul(courses)
}

/// Top-rail sticks for `footage` of fence
pub fn top_rail_sticks(footage: Feet, constants: &FenceLineConstants) -> u32 {
    ceil_count(footage.0 / constants.top_rail_stick_length.0)
}

/// Tie wires for `footage` of fabric
pub fn tie_wires(footage: Feet, constants: &FenceLineConstants) -> u32 {
    ceil_count(footage.0 * constants.tie_wires_per_foot)
}

/// Chain-link take-off.
///
/// Base quantities are always present; terminal hardware only when the
/// run has at least one end or corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainlinkResult {
    pub interior_line_posts: u32,
    pub fabric_type: String,
    pub fabric_footage: Feet,
    pub fabric_rolls: u32,
    pub top_rail_sticks: u32,
    pub tie_wires: u32,
    /// One per line post
    pub loop_caps: u32,
    /// Absent when the catalog lists no weight for the fence type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipe_weight: Option<String>,
    #[serde(flatten)]
    pub terminal_hardware: Option<TerminalHardware>,
    pub ends: u32,
    pub corners: u32,
}

/// Calculate a chain-link take-off. Expects an input that passed
/// [`ChainlinkInput::validate`].
pub fn calculate(input: &ChainlinkInput, catalog: &Catalog) -> ChainlinkResult {
    let constants = &catalog.constants;
    let layout = layout_posts(input.fence_length, constants.line_post_spacing, input.ends, input.corners);

    let pipe_weight = catalog.chainlink.pipe_weight(&input.fence_type).map(str::to_string);
    if pipe_weight.is_none() {
        tracing::warn!(fence_type = %input.fence_type, "no pipe weight for fence type, field omitted");
    }

    let footage = input.fence_length.non_negative();
    let result = ChainlinkResult {
        interior_line_posts: layout.line_posts,
        fabric_type: catalog.chainlink.fabric_type.clone(),
        fabric_footage: footage,
        fabric_rolls: fabric_rolls(footage, input.fence_height, constants),
        top_rail_sticks: top_rail_sticks(footage, constants),
        tie_wires: tie_wires(footage, constants),
        loop_caps: layout.line_posts,
        pipe_weight,
        terminal_hardware: TerminalHardware::derive(input.ends, input.corners, input.fence_height),
        ends: input.ends,
        corners: input.corners,
    };

    tracing::debug!(
        label = %input.label,
        line_posts = result.interior_line_posts,
        rolls = result.fabric_rolls,
        "chain-link calculated"
    );

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_input() -> ChainlinkInput {
        ChainlinkInput {
            label: "Test".to_string(),
            fence_length: Feet(100.0),
            fence_height: Feet(4.0),
            fence_type: "commercial".to_string(),
            ends: 2,
            corners: 1,
        }
    }

    #[test]
    fn test_chainlink_takeoff() {
        let catalog = Catalog::standard();
        let result = calculate(&test_input(), &catalog);

        // 10 sections, 11 slots, 3 terminals
        assert_eq!(result.interior_line_posts, 8);
        assert_eq!(result.loop_caps, 8);
        assert_eq!(result.fabric_footage, Feet(100.0));
        assert_eq!(result.fabric_rolls, 2);
        assert_eq!(result.top_rail_sticks, 5);
        assert_eq!(result.tie_wires, 150);
        assert_eq!(result.pipe_weight.as_deref(), Some("SS40 WT"));
        assert_eq!(result.fabric_type, "9ga wire");
    }

    #[test]
    fn test_terminal_hardware() {
        let catalog = Catalog::standard();
        let result = calculate(&test_input(), &catalog);
        let hw = result.terminal_hardware.unwrap();

        assert_eq!(hw.brace_bands, 4);
        assert_eq!(hw.tension_bars, 4);
        assert_eq!(hw.tension_bands, 12);
        assert_eq!(hw.nuts_and_bolts, 16);
        assert_eq!(hw.post_caps, 3);
    }

    #[test]
    fn test_no_terminals_omits_hardware() {
        let catalog = Catalog::standard();
        let mut input = test_input();
        input.ends = 0;
        input.corners = 0;
        let result = calculate(&input, &catalog);

        assert!(result.terminal_hardware.is_none());
        assert_eq!(result.interior_line_posts, 11);

        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("brace_bands"));
        assert!(!json.contains("post_caps"));
    }

    #[test]
    fn test_hardware_flattens_into_result() {
        let catalog = Catalog::standard();
        let result = calculate(&test_input(), &catalog);
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["brace_bands"], 4);
        assert_eq!(value["ends"], 2);

        let parsed: ChainlinkResult = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, result);
    }

    #[test]
    fn test_zero_length() {
        let catalog = Catalog::standard();
        let mut input = test_input();
        input.fence_length = Feet(0.0);
        let result = calculate(&input, &catalog);

        assert_eq!(result.interior_line_posts, 0);
        assert_eq!(result.fabric_rolls, 0);
        assert_eq!(result.top_rail_sticks, 0);
        assert_eq!(result.tie_wires, 0);
    }

    #[test]
    fn test_tall_fabric_needs_two_courses() {
        let constants = FenceLineConstants::default();
        assert_eq!(fabric_rolls(Feet(100.0), Feet(12.0), &constants), 2);
        assert_eq!(fabric_rolls(Feet(100.0), Feet(14.0), &constants), 4);
    }

    #[test]
    fn test_validation() {
        let catalog = Catalog::standard();
        assert!(test_input().validate(&catalog).is_ok());

        let mut bad_type = test_input();
        bad_type.fence_type = "industrial".to_string();
        assert!(bad_type.validate(&catalog).is_err());

        let mut bad_height = test_input();
        bad_height.fence_height = Feet(4.5);
        assert!(bad_height.validate(&catalog).is_err());

        let mut negative = test_input();
        negative.fence_length = Feet(-10.0);
        assert!(negative.validate(&catalog).unwrap_err().is_validation());
    }

    #[test]
    fn test_from_defaults() {
        let catalog = Catalog::standard();
        let input = ChainlinkInput::from_defaults("Default", Feet(40.0), 2, 0, &catalog);
        assert_eq!(input.fence_height, Feet(3.0));
        assert_eq!(input.fence_type, "residential");
        assert!(input.validate(&catalog).is_ok());
    }

    #[test]
    fn test_unknown_fence_type_omits_pipe_weight() {
        let catalog = Catalog::standard();
        let mut input = test_input();
        input.fence_type = "industrial".to_string();
        let result = calculate(&input, &catalog);

        assert_eq!(result.pipe_weight, None);
        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("pipe_weight"));
    }

    #[test]
    fn test_huge_run_rejected_before_calculation() {
        let catalog = Catalog::standard();
        let input = ChainlinkInput::from_defaults("Huge", Feet(1.0e11), 2, 0, &catalog);
        let err = input.validate(&catalog).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let mut terminals = test_input();
        terminals.corners = u32::MAX;
        assert!(terminals.validate(&catalog).unwrap_err().is_validation());
    }

    #[test]
    fn test_hardware_saturates() {
        let hw = TerminalHardware::derive(u32::MAX, u32::MAX, Feet(10.0)).unwrap();
        assert_eq!(hw.post_caps, u32::MAX);
        assert_eq!(hw.brace_bands, u32::MAX);
        assert_eq!(hw.tension_bands, u32::MAX);
        assert_eq!(hw.nuts_and_bolts, u32::MAX);

        // An unvalidated huge run still calculates
        let catalog = Catalog::standard();
        let input = ChainlinkInput::from_defaults("Huge", Feet(1.0e11), 2, 0, &catalog);
        let result = calculate(&input, &catalog);
        assert_eq!(result.interior_line_posts, u32::MAX - 2);
    }
}
