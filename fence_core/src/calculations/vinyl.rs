//! # Vinyl Panel Fence
//!
//! Panels, posts, post caps and stainless gate hardware for a vinyl run.
//! Gate openings come out of the run before the panels are laid out.
//!
//! ## Gate Hardware
//!
//! - SS PVC hinge sets: 1 per single gate, 2 per double gate
//! - SS PVC latches: 1 per opening
//! - SS drop rods: 1 per double gate

use serde::{Deserialize, Serialize};

use super::{positive, validate_fence_height, validate_selection};
use crate::catalog::Catalog;
use crate::errors::CalcResult;
use crate::gates::{GateSummary, GatedRun};
use crate::layout::layout_posts;
use crate::units::Feet;

/// Input for a vinyl panel run.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Pool side",
///   "fence_length": 120.0,
///   "fence_height": 6.0,
///   "panel_width": 8.0,
///   "ends": 2,
///   "corners": 1,
///   "single_gates": [{ "width": "4", "quantity": 1 }],
///   "double_gates": []
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VinylInput {
    #[serde(default)]
    pub label: String,
    #[serde(flatten)]
    pub run: GatedRun,
    pub fence_height: Feet,
    pub panel_width: Feet,
}

impl VinylInput {
    /// Build an input with the catalog's default height and panel width
    pub fn from_defaults(label: impl Into<String>, run: GatedRun, catalog: &Catalog) -> Self {
        let defaults = &catalog.defaults.vinyl;
        VinylInput {
            label: label.into(),
            run,
            fence_height: defaults.fence_height,
            panel_width: defaults.panel_width,
        }
    }

    pub fn validate(&self, catalog: &Catalog) -> CalcResult<()> {
        self.run.validate(&catalog.generic_gates)?;
        validate_fence_height(catalog, self.fence_height)?;
        validate_selection("panel_width", &catalog.vinyl.panel_widths, self.panel_width)
    }
}

/// Vinyl take-off. Every field is optional; zero quantities are omitted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VinylResult {
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
    pub ss_pvc_hinges: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ss_pvc_latches: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ss_drop_rods: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

pub fn calculate(input: &VinylInput, catalog: &Catalog) -> VinylResult {
    let plan = input.run.plan();
    let gates = &plan.gates;

    let mut result = VinylResult {
        gates: input.run.summary(&plan, &catalog.generic_gates),
        ss_pvc_hinges: positive(gates.hinge_sets()),
        ss_pvc_latches: positive(gates.latches()),
        ss_drop_rods: positive(gates.drop_rods()),
        notes: plan.notes(),
        ..Default::default()
    };

    if plan.gate_only {
        result.total_posts = positive(gates.gate_post_count);
        result.post_caps = positive(gates.gate_post_count);
        return result;
    }

    let layout = layout_posts(plan.effective_length, input.panel_width, input.run.ends, input.run.corners);
    let total_posts = layout.total_posts().saturating_add(gates.gate_post_count);

    result.num_panels = positive(layout.sections);
    result.num_line_posts = positive(layout.line_posts);
    result.num_terminal_posts = positive(layout.terminal_posts);
    result.total_posts = positive(total_posts);
    result.post_caps = positive(total_posts);

    tracing::debug!(label = %input.label, panels = layout.sections, total_posts, "vinyl calculated");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gates::GATE_ONLY_NOTE;

    fn test_input(run: GatedRun) -> VinylInput {
        VinylInput {
            label: "Test".to_string(),
            run,
            fence_height: Feet(6.0),
            panel_width: Feet(8.0),
        }
    }

    #[test]
    fn test_run_without_gates() {
        let catalog = Catalog::standard();
        let result = calculate(&test_input(GatedRun::new(Feet(100.0), 2, 0)), &catalog);

        assert_eq!(result.num_panels, Some(13));
        assert_eq!(result.num_line_posts, Some(12));
        assert_eq!(result.num_terminal_posts, Some(2));
        assert_eq!(result.total_posts, Some(14));
        assert_eq!(result.post_caps, Some(14));
        assert_eq!(result.gates.gate_posts, None);
        assert_eq!(result.ss_pvc_hinges, None);
        assert_eq!(result.notes, None);
    }

    #[test]
    fn test_run_with_gates() {
        let catalog = Catalog::standard();
        let run = GatedRun::new(Feet(100.0), 2, 1)
            .with_single_gate("4", 1)
            .with_double_gate("8", 1);
        let result = calculate(&test_input(run), &catalog);

        // 88 ft left: 11 panels, 12 slots, 3 terminals
        assert_eq!(result.num_panels, Some(11));
        assert_eq!(result.num_line_posts, Some(9));
        assert_eq!(result.num_terminal_posts, Some(3));
        assert_eq!(result.gates.gate_posts, Some(4));
        assert_eq!(result.total_posts, Some(16));
        assert_eq!(result.ss_pvc_hinges, Some(3));
        assert_eq!(result.ss_pvc_latches, Some(2));
        assert_eq!(result.ss_drop_rods, Some(1));
        assert_eq!(result.gates.total_gate_linear_footage, Some(Feet(12.0)));
        assert_eq!(result.gates.single_gate_widths, Some(vec!["4 ft".to_string()]));
    }

    #[test]
    fn test_gate_consumes_run() {
        let catalog = Catalog::standard();
        let run = GatedRun::new(Feet(10.0), 2, 0).with_double_gate("10", 1);
        let result = calculate(&test_input(run), &catalog);

        assert_eq!(result.gates.gate_posts, Some(2));
        assert_eq!(result.total_posts, Some(2));
        assert_eq!(result.post_caps, Some(2));
        assert_eq!(result.num_panels, None);
        assert_eq!(result.num_line_posts, None);
        assert_eq!(result.num_terminal_posts, None);
        assert_eq!(result.ss_drop_rods, Some(1));
        assert_eq!(result.notes.as_deref(), Some(GATE_ONLY_NOTE));
    }

    #[test]
    fn test_sparse_json() {
        let catalog = Catalog::standard();
        let result = calculate(&test_input(GatedRun::new(Feet(16.0), 2, 0)), &catalog);
        let json = serde_json::to_string(&result).unwrap();

        assert!(json.contains("\"num_panels\":2"));
        assert!(!json.contains("gate_posts"));
        assert!(!json.contains("notes"));
        assert!(!json.contains("null"));
    }

    #[test]
    fn test_validation() {
        let catalog = Catalog::standard();
        assert!(test_input(GatedRun::new(Feet(50.0), 2, 0)).validate(&catalog).is_ok());

        let mut bad_panel = test_input(GatedRun::new(Feet(50.0), 2, 0));
        bad_panel.panel_width = Feet(7.0);
        assert!(bad_panel.validate(&catalog).is_err());

        let bad_gate = test_input(GatedRun::new(Feet(50.0), 2, 0).with_double_gate("12", 1));
        assert!(bad_gate.validate(&catalog).is_err());
    }

    #[test]
    fn test_input_json_is_flat() {
        let json = r#"{
            "label": "Pool side",
            "fence_length": 120.0,
            "fence_height": 6.0,
            "panel_width": 8.0,
            "ends": 2,
            "single_gates": [{ "width": "4", "quantity": 1 }]
        }"#;
        let input: VinylInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.run.fence_length, Feet(120.0));
        assert_eq!(input.run.corners, 0);
        assert_eq!(input.run.single_gates.len(), 1);
    }
}
