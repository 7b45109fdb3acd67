//! # Gate Aggregation
//!
//! Sums the single- and double-leaf gate entries of a run into total
//! opening footage, opening counts and gate posts, and works out how much
//! of the run is left for fence once the openings are taken out.
//!
//! Every opening, single or double, is framed by exactly two posts. The
//! two leaves of a double gate meet in the middle without a center post.
//!
//! ## Example
//!
//! ```rust
//! use fence_core::gates::{aggregate_gates, GateEntry};
//! use fence_core::units::Feet;
//!
//! let singles = vec![GateEntry::new("4", 2)];
//! let doubles = vec![GateEntry::new("10", 1)];
//! let gates = aggregate_gates(&singles, &doubles);
//!
//! assert_eq!(gates.total_linear_footage, Feet(18.0));
//! assert_eq!(gates.total_openings, 3);
//! assert_eq!(gates.gate_post_count, 6);
//! assert_eq!(gates.effective_run_length(Feet(100.0)), Feet(82.0));
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::{
    positive, validate_count, validate_run_length, validate_terminals, MAX_GATE_OPENINGS,
};
use crate::catalog::GateWidthOptions;
use crate::errors::{CalcError, CalcResult};
use crate::units::Feet;

/// Note attached to a result whose whole run is taken up by gates
pub const GATE_ONLY_NOTE: &str = "Calculation primarily for gate(s). Fence length covered by gate(s).";

/// One line of gates on a run: `quantity` openings of the same width.
///
/// The width stays a string so the exact catalog value (and through it the
/// display label) survives the round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateEntry {
    /// Opening width in feet, as listed in the catalog (e.g. "8")
    pub width: String,
    /// Number of openings of this width (at least 1)
    pub quantity: u32,
}

impl GateEntry {
    pub fn new(width: impl Into<String>, quantity: u32) -> Self {
        GateEntry {
            width: width.into(),
            quantity,
        }
    }

    /// Parsed opening width, `None` when the string is not a number
    pub fn width_ft(&self) -> Option<Feet> {
        self.width.trim().parse::<f64>().ok().map(Feet)
    }

    /// Footage taken out of the run by this entry
    pub fn linear_footage(&self) -> Feet {
        match self.width_ft() {
            Some(width) => width * f64::from(self.quantity),
            None => {
                tracing::warn!(width = %self.width, "unparseable gate width counted as 0 ft");
                Feet(0.0)
            }
        }
    }
}

/// Totals across all gate entries of a run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GateAggregate {
    pub total_linear_footage: Feet,
    pub total_single_openings: u32,
    pub total_double_openings: u32,
    pub total_openings: u32,
    /// Two posts per opening
    pub gate_post_count: u32,
}

impl GateAggregate {
    pub fn has_gates(&self) -> bool {
        self.total_openings > 0
    }

    /// Run length left for fence, never negative
    pub fn effective_run_length(&self, run_length: Feet) -> Feet {
        (run_length - self.total_linear_footage).non_negative()
    }

    /// True when the gates consume the entire run
    pub fn is_gate_only(&self, run_length: Feet) -> bool {
        self.has_gates() && self.effective_run_length(run_length).0 <= 0.0
    }

    /// Hinge sets: one per single leaf, two per double opening
    pub fn hinge_sets(&self) -> u32 {
        self.total_single_openings
            .saturating_add(self.total_double_openings.saturating_mul(2))
    }

    /// One latch per opening
    pub fn latches(&self) -> u32 {
        self.total_openings
    }

    /// One drop rod per double opening
    pub fn drop_rods(&self) -> u32 {
        self.total_double_openings
    }
}

/// Aggregate single- and double-leaf gate entries.
pub fn aggregate_gates(single_entries: &[GateEntry], double_entries: &[GateEntry]) -> GateAggregate {
    let total_single_openings = total_quantity(single_entries);
    let total_double_openings = total_quantity(double_entries);
    let total_linear_footage: Feet = single_entries
        .iter()
        .chain(double_entries)
        .map(GateEntry::linear_footage)
        .sum();
    let total_openings = total_single_openings.saturating_add(total_double_openings);

    GateAggregate {
        total_linear_footage,
        total_single_openings,
        total_double_openings,
        total_openings,
        gate_post_count: total_openings.saturating_mul(2),
    }
}

/// Openings across `entries`, saturating at `u32::MAX`
fn total_quantity(entries: &[GateEntry]) -> u32 {
    entries.iter().fold(0u32, |total, g| total.saturating_add(g.quantity))
}

/// A run of fence with gates cut into it.
///
/// Flattened into the gate-aware family inputs, so their JSON carries
/// `fence_length`, `ends`, `corners`, `single_gates` and `double_gates`
/// at the top level.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GatedRun {
    /// Total run length including gate openings
    pub fence_length: Feet,
    /// Terminal posts that are not corners
    #[serde(default)]
    pub ends: u32,
    /// Corner posts
    #[serde(default)]
    pub corners: u32,
    #[serde(default)]
    pub single_gates: Vec<GateEntry>,
    #[serde(default)]
    pub double_gates: Vec<GateEntry>,
}

/// Outcome of taking the gate openings out of a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunPlan {
    pub gates: GateAggregate,
    /// Length left for fence
    pub effective_length: Feet,
    /// Gates take up the whole run; no fence layout is done
    pub gate_only: bool,
}

impl RunPlan {
    /// Explanatory note for a gate-only run
    pub fn notes(&self) -> Option<String> {
        self.gate_only.then(|| GATE_ONLY_NOTE.to_string())
    }
}

impl GatedRun {
    pub fn new(fence_length: Feet, ends: u32, corners: u32) -> Self {
        GatedRun {
            fence_length,
            ends,
            corners,
            single_gates: Vec::new(),
            double_gates: Vec::new(),
        }
    }

    pub fn with_single_gate(mut self, width: impl Into<String>, quantity: u32) -> Self {
        self.single_gates.push(GateEntry::new(width, quantity));
        self
    }

    pub fn with_double_gate(mut self, width: impl Into<String>, quantity: u32) -> Self {
        self.double_gates.push(GateEntry::new(width, quantity));
        self
    }

    /// Check the run length and every gate entry against `options`
    pub fn validate(&self, options: &GateWidthOptions) -> CalcResult<()> {
        validate_run_length(self.fence_length)?;
        validate_terminals(self.ends, self.corners)?;
        validate_gate_entries("single_gates", &self.single_gates, options, false)?;
        validate_gate_entries("double_gates", &self.double_gates, options, true)?;

        let openings = total_quantity(&self.single_gates).saturating_add(total_quantity(&self.double_gates));
        validate_count("gate openings", openings, 0, MAX_GATE_OPENINGS)
    }

    /// Aggregate the gates and work out what is left of the run
    pub fn plan(&self) -> RunPlan {
        let gates = aggregate_gates(&self.single_gates, &self.double_gates);
        let effective_length = gates.effective_run_length(self.fence_length);
        let gate_only = gates.is_gate_only(self.fence_length);

        tracing::debug!(
            run_ft = self.fence_length.0,
            gate_ft = gates.total_linear_footage.0,
            effective_ft = effective_length.0,
            gate_only,
            "run planned"
        );

        RunPlan {
            gates,
            effective_length,
            gate_only,
        }
    }

    pub fn summary(&self, plan: &RunPlan, options: &GateWidthOptions) -> GateSummary {
        GateSummary::new(&plan.gates, &self.single_gates, &self.double_gates, options)
    }
}

/// Gate echo carried on every gate-aware family result.
///
/// All fields are sparse: a run without gates carries none of them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GateSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_single_gates: Option<u32>,
    /// Display labels of the single-gate widths, in entry order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub single_gate_widths: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_double_gates: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub double_gate_widths: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gate_posts: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_gate_openings: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_gate_linear_footage: Option<Feet>,
}

impl GateSummary {
    pub fn new(
        aggregate: &GateAggregate,
        single_entries: &[GateEntry],
        double_entries: &[GateEntry],
        options: &GateWidthOptions,
    ) -> Self {
        let single_labels: Vec<String> = single_entries.iter().map(|g| options.single_label(&g.width)).collect();
        let double_labels: Vec<String> = double_entries.iter().map(|g| options.double_label(&g.width)).collect();

        GateSummary {
            num_single_gates: positive(aggregate.total_single_openings),
            single_gate_widths: (aggregate.total_single_openings > 0).then_some(single_labels),
            num_double_gates: positive(aggregate.total_double_openings),
            double_gate_widths: (aggregate.total_double_openings > 0).then_some(double_labels),
            gate_posts: positive(aggregate.gate_post_count),
            total_gate_openings: positive(aggregate.total_openings),
            total_gate_linear_footage: (aggregate.total_linear_footage.0 > 0.0)
                .then_some(aggregate.total_linear_footage),
        }
    }
}

/// Check a list of gate entries against the widths a family offers.
///
/// `double_leaf` selects which width list the entries are checked against.
pub fn validate_gate_entries(
    field: &str,
    entries: &[GateEntry],
    options: &GateWidthOptions,
    double_leaf: bool,
) -> CalcResult<()> {
    for (i, entry) in entries.iter().enumerate() {
        let entry_field = format!("{}[{}]", field, i);
        validate_count(&format!("{}.quantity", entry_field), entry.quantity, 1, MAX_GATE_OPENINGS)?;
        if entry.width.trim().is_empty() {
            return Err(CalcError::missing_field(format!("{}.width", entry_field)));
        }
        if entry.width_ft().is_none() {
            return Err(CalcError::invalid_input(
                format!("{}.width", entry_field),
                entry.width.clone(),
                "Gate width must be a number of feet",
            ));
        }
        let offered = if double_leaf {
            options.has_double(&entry.width)
        } else {
            options.has_single(&entry.width)
        };
        if !offered {
            return Err(CalcError::invalid_input(
                format!("{}.width", entry_field),
                entry.width.clone(),
                "Gate width is not offered in the catalog",
            ));
        }
    }
    Ok(())
}
