//! # Aluminum Panel Fence
//!
//! Panels, posts and post caps for an ornamental aluminum run. Gate
//! openings come out of the run first; gate hardware ships with the gate.

use serde::{Deserialize, Serialize};

use super::{positive, validate_fence_height, validate_selection};
use crate::catalog::Catalog;
use crate::errors::CalcResult;
use crate::gates::{GateSummary, GatedRun};
use crate::layout::layout_posts;
use crate::units::Feet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AluminumInput {
    #[serde(default)]
    pub label: String,
    #[serde(flatten)]
    pub run: GatedRun,
    pub fence_height: Feet,
    pub panel_width: Feet,
}

impl AluminumInput {
    pub fn from_defaults(label: impl Into<String>, run: GatedRun, catalog: &Catalog) -> Self {
        let defaults = &catalog.defaults.aluminum;
        AluminumInput {
            label: label.into(),
            run,
            fence_height: defaults.fence_height,
            panel_width: defaults.panel_width,
        }
    }

    pub fn validate(&self, catalog: &Catalog) -> CalcResult<()> {
        self.run.validate(&catalog.generic_gates)?;
        validate_fence_height(catalog, self.fence_height)?;
        validate_selection("panel_width", &catalog.aluminum.panel_widths, self.panel_width)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AluminumResult {
    #[serde(flatten)]
    pub gates: GateSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_panels: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_line_posts: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_terminal_posts: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_posts: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_caps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

pub fn calculate(input: &AluminumInput, catalog: &Catalog) -> AluminumResult {
    let plan = input.run.plan();
    let gate_posts = plan.gates.gate_post_count;

    let mut result = AluminumResult {
        gates: input.run.summary(&plan, &catalog.generic_gates),
        notes: plan.notes(),
        ..Default::default()
    };

    if plan.gate_only {
        result.total_posts = positive(gate_posts);
        result.post_caps = positive(gate_posts);
        return result;
    }

    let layout = layout_posts(plan.effective_length, input.panel_width, input.run.ends, input.run.corners);
    let total_posts = layout.total_posts().saturating_add(gate_posts);

    result.num_panels = positive(layout.sections);
    result.num_line_posts = positive(layout.line_posts);
    result.num_terminal_posts = positive(layout.terminal_posts);
    result.total_posts = positive(total_posts);
    result.post_caps = positive(total_posts);

    tracing::debug!(label = %input.label, panels = layout.sections, total_posts, "aluminum calculated");
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aluminum_run() {
        let catalog = Catalog::standard();
        let input = AluminumInput::from_defaults("Front", GatedRun::new(Feet(60.0), 2, 0), &catalog);
        let result = calculate(&input, &catalog);

        // Default 6 ft panels
        assert_eq!(result.num_panels, Some(10));
        assert_eq!(result.num_line_posts, Some(9));
        assert_eq!(result.num_terminal_posts, Some(2));
        assert_eq!(result.total_posts, Some(11));
        assert_eq!(result.post_caps, Some(11));
    }

    #[test]
    fn test_aluminum_with_gate() {
        let catalog = Catalog::standard();
        let run = GatedRun::new(Feet(60.0), 2, 0).with_single_gate("5", 2);
        let input = AluminumInput::from_defaults("Front", run, &catalog);
        let result = calculate(&input, &catalog);

        // 50 ft left: 9 panels, 10 slots
        assert_eq!(result.num_panels, Some(9));
        assert_eq!(result.gates.gate_posts, Some(4));
        assert_eq!(result.total_posts, Some(14));
        assert_eq!(result.gates.num_single_gates, Some(2));
    }

    #[test]
    fn test_aluminum_gate_only() {
        let catalog = Catalog::standard();
        let run = GatedRun::new(Feet(4.0), 2, 0).with_single_gate("4", 1);
        let input = AluminumInput::from_defaults("Walk gate", run, &catalog);
        let result = calculate(&input, &catalog);

        assert_eq!(result.num_panels, None);
        assert_eq!(result.total_posts, Some(2));
        assert!(result.notes.is_some());
    }

    #[test]
    fn test_zero_length_without_gates_is_empty() {
        let catalog = Catalog::standard();
        let input = AluminumInput::from_defaults("Nothing", GatedRun::new(Feet(0.0), 2, 0), &catalog);
        let result = calculate(&input, &catalog);
        assert_eq!(result, AluminumResult::default());
    }
}
