//! # Wood Privacy Fence
//!
//! Sections, posts, pickets, rails and concrete for a stick-built wood
//! run. Gate openings come out of the run first.
//!
//! ## Formulas
//!
//! ```text
//! sections            = ceil(effective / post spacing)
//! pickets             = ceil(effective * 12 / picket width)
//! pickets per section = ceil(post spacing * 12 / picket width)
//! rail length (ft)    = sections * post spacing * rails
//! 2x4x8 backers       = sections * rails
//! concrete bags       = total posts
//! ```

use serde::{Deserialize, Serialize};

use super::{ceil_count, positive, positive_feet, validate_fence_height, validate_selection};
use crate::catalog::Catalog;
use crate::errors::{CalcError, CalcResult};
use crate::gates::{GateSummary, GatedRun};
use crate::layout::layout_posts;
use crate::units::{Feet, Inches};

/// Input for a wood run.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Side yard",
///   "fence_length": 96.0,
///   "fence_height": 6.0,
///   "post_spacing": 8.0,
///   "picket_width": 5.5,
///   "num_rails": 3,
///   "ends": 2,
///   "double_gates": [{ "width": "10", "quantity": 1 }]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WoodInput {
    #[serde(default)]
    pub label: String,
    #[serde(flatten)]
    pub run: GatedRun,
    pub fence_height: Feet,
    pub post_spacing: Feet,
    /// Picket face width
    pub picket_width: Inches,
    pub num_rails: u32,
}

impl WoodInput {
    pub fn from_defaults(label: impl Into<String>, run: GatedRun, catalog: &Catalog) -> Self {
        let defaults = &catalog.defaults.wood;
        WoodInput {
            label: label.into(),
            run,
            fence_height: defaults.fence_height,
            post_spacing: defaults.post_spacing,
            picket_width: defaults.picket_width,
            num_rails: defaults.num_rails,
        }
    }

    pub fn validate(&self, catalog: &Catalog) -> CalcResult<()> {
        self.run.validate(&catalog.generic_gates)?;
        validate_fence_height(catalog, self.fence_height)?;
        validate_selection("post_spacing", &catalog.wood.post_spacings, self.post_spacing)?;
        if catalog.picket_label(self.picket_width).is_none() {
            return Err(CalcError::invalid_input(
                "picket_width",
                self.picket_width.0.to_string(),
                "Picket width is not offered in the catalog",
            ));
        }
        if !catalog.wood.rail_counts.contains(&self.num_rails) {
            return Err(CalcError::invalid_input(
                "num_rails",
                self.num_rails.to_string(),
                "Rail count is not offered in the catalog",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WoodResult {
    #[serde(flatten)]
    pub gates: GateSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_sections: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_line_posts: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_terminal_posts: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_posts: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_pickets: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickets_per_section: Option<u32>,
    /// Nominal picket label, e.g. "1x6 (5.5″)"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picket_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_rail_length: Option<Feet>,
    /// 2x4x8' rail boards
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backers: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bags_of_concrete: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

pub fn calculate(input: &WoodInput, catalog: &Catalog) -> WoodResult {
    let plan = input.run.plan();
    let gate_posts = plan.gates.gate_post_count;

    let mut result = WoodResult {
        gates: input.run.summary(&plan, &catalog.generic_gates),
        notes: plan.notes(),
        ..Default::default()
    };

    if plan.gate_only {
        result.total_posts = positive(gate_posts);
        result.bags_of_concrete = positive(gate_posts);
        return result;
    }

    let layout = layout_posts(plan.effective_length, input.post_spacing, input.run.ends, input.run.corners);
    let total_posts = layout.total_posts().saturating_add(gate_posts);
    let picket_in = input.picket_width.0;

    let num_pickets = if picket_in > 0.0 {
        ceil_count(plan.effective_length.0 * 12.0 / picket_in)
    } else {
        0
    };
    let pickets_per_section = if picket_in > 0.0 && layout.sections > 0 {
        ceil_count(input.post_spacing.0 * 12.0 / picket_in)
    } else {
        0
    };
    let rails = f64::from(layout.sections.saturating_mul(input.num_rails));

    result.num_sections = positive(layout.sections);
    result.num_line_posts = positive(layout.line_posts);
    result.num_terminal_posts = positive(layout.terminal_posts);
    result.total_posts = positive(total_posts);
    result.num_pickets = positive(num_pickets);
    result.pickets_per_section = positive(pickets_per_section);
    result.picket_size = (num_pickets > 0)
        .then(|| catalog.picket_label(input.picket_width).map(str::to_string))
        .flatten();
    result.total_rail_length = positive_feet(input.post_spacing * rails);
    result.backers = positive(layout.sections.saturating_mul(input.num_rails));
    result.bags_of_concrete = positive(total_posts);

    tracing::debug!(label = %input.label, sections = layout.sections, num_pickets, "wood calculated");
    result
}
