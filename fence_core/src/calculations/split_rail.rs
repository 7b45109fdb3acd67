//! # Split Rail Fence
//!
//! Sections, posts and rails for a split rail run, plus the wood gate
//! hardware (screw hook and eye sets, loop latches, drop rods). Split rail
//! has its own gate widths, up to 6 ft single and 12 ft double.

use serde::{Deserialize, Serialize};

use super::{positive, validate_selection};
use crate::catalog::Catalog;
use crate::errors::{CalcError, CalcResult};
use crate::gates::{GateSummary, GatedRun};
use crate::layout::layout_posts;
use crate::units::Feet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitRailInput {
    #[serde(default)]
    pub label: String,
    #[serde(flatten)]
    pub run: GatedRun,
    pub rails_per_section: u32,
    pub post_spacing: Feet,
}

impl SplitRailInput {
    /// Defaults include two ends, the usual open-ended split rail run
    pub fn from_defaults(label: impl Into<String>, fence_length: Feet, catalog: &Catalog) -> Self {
        let defaults = &catalog.defaults.split_rail;
        SplitRailInput {
            label: label.into(),
            run: GatedRun::new(fence_length, defaults.ends, 0),
            rails_per_section: defaults.rails_per_section,
            post_spacing: defaults.post_spacing,
        }
    }

    pub fn validate(&self, catalog: &Catalog) -> CalcResult<()> {
        self.run.validate(&catalog.split_rail.gates)?;
        if !catalog.split_rail.rails_per_section.contains(&self.rails_per_section) {
            return Err(CalcError::invalid_input(
                "rails_per_section",
                self.rails_per_section.to_string(),
                "Rails per section is not offered in the catalog",
            ));
        }
        validate_selection("post_spacing", &catalog.split_rail.post_spacings, self.post_spacing)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SplitRailResult {
    #[serde(flatten)]
    pub gates: GateSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_sections: Option<u32>,
    /// One post per slot along the fence plus the gate posts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_posts: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_rails: Option<u32>,
    pub user_specified_ends: u32,
    pub user_specified_corners: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screw_hook_and_eye_sets: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loop_latches: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wood_drop_rods: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

pub fn calculate(input: &SplitRailInput, catalog: &Catalog) -> SplitRailResult {
    let plan = input.run.plan();
    let gates = &plan.gates;

    let mut result = SplitRailResult {
        gates: input.run.summary(&plan, &catalog.split_rail.gates),
        user_specified_ends: input.run.ends,
        user_specified_corners: input.run.corners,
        screw_hook_and_eye_sets: positive(gates.hinge_sets()),
        loop_latches: positive(gates.latches()),
        wood_drop_rods: positive(gates.drop_rods()),
        notes: plan.notes(),
        ..Default::default()
    };

    if plan.gate_only {
        result.num_posts = positive(gates.gate_post_count);
        return result;
    }

    let layout = layout_posts(plan.effective_length, input.post_spacing, input.run.ends, input.run.corners);
    // Ends and corners occupy slots, they never add posts beyond them
    let num_posts = layout.post_slots().saturating_add(gates.gate_post_count);

    result.num_sections = positive(layout.sections);
    result.num_posts = positive(num_posts);
    result.num_rails = positive(layout.sections.saturating_mul(input.rails_per_section));

    tracing::debug!(label = %input.label, sections = layout.sections, num_posts, "split rail calculated");
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_rail_run() {
        let catalog = Catalog::standard();
        let mut input = SplitRailInput::from_defaults("Pasture", Feet(200.0), &catalog);
        input.rails_per_section = 3;
        let result = calculate(&input, &catalog);

        assert_eq!(result.num_sections, Some(20));
        assert_eq!(result.num_posts, Some(21));
        assert_eq!(result.num_rails, Some(60));
        assert_eq!(result.user_specified_ends, 2);
        assert_eq!(result.user_specified_corners, 0);
        assert_eq!(result.screw_hook_and_eye_sets, None);
    }

    #[test]
    fn test_posts_follow_slots_when_terminals_outnumber_them() {
        let catalog = Catalog::standard();
        let mut input = SplitRailInput::from_defaults("Stub", Feet(10.0), &catalog);
        input.post_spacing = Feet(10.0);
        input.run.corners = 3;
        let result = calculate(&input, &catalog);

        // One section has two post slots, however many terminals were named
        assert_eq!(result.num_sections, Some(1));
        assert_eq!(result.num_posts, Some(2));
        assert_eq!(result.user_specified_corners, 3);

        input.run = input.run.with_single_gate("4", 1);
        input.run.fence_length = Feet(14.0);
        assert_eq!(calculate(&input, &catalog).num_posts, Some(4));
    }

    #[test]
    fn test_split_rail_gates() {
        let catalog = Catalog::standard();
        let mut input = SplitRailInput::from_defaults("Pasture", Feet(100.0), &catalog);
        input.run = input.run.with_single_gate("6", 1).with_double_gate("12", 1);
        assert!(input.validate(&catalog).is_ok());

        let result = calculate(&input, &catalog);
        // 82 ft left: 9 sections, 10 posts, plus 4 gate posts
        assert_eq!(result.num_sections, Some(9));
        assert_eq!(result.num_posts, Some(14));
        assert_eq!(result.num_rails, Some(18));
        assert_eq!(result.screw_hook_and_eye_sets, Some(3));
        assert_eq!(result.loop_latches, Some(2));
        assert_eq!(result.wood_drop_rods, Some(1));
        assert_eq!(result.gates.double_gate_widths, Some(vec!["12 ft (2 x 6ft)".to_string()]));
    }

    #[test]
    fn test_split_rail_gate_only_echoes_terminals() {
        let catalog = Catalog::standard();
        let mut input = SplitRailInput::from_defaults("Drive", Feet(12.0), &catalog);
        input.run = input.run.with_double_gate("12", 1);
        let result = calculate(&input, &catalog);

        assert_eq!(result.num_sections, None);
        assert_eq!(result.num_posts, Some(2));
        assert_eq!(result.user_specified_ends, 2);
        assert!(result.notes.is_some());
    }

    #[test]
    fn test_split_rail_rejects_generic_only_widths() {
        let catalog = Catalog::standard();
        let mut input = SplitRailInput::from_defaults("Pasture", Feet(100.0), &catalog);
        input.run = input.run.with_single_gate("7", 1);
        assert!(input.validate(&catalog).is_err());

        let mut bad_rails = SplitRailInput::from_defaults("Pasture", Feet(100.0), &catalog);
        bad_rails.rails_per_section = 5;
        assert!(bad_rails.validate(&catalog).is_err());
    }
}
