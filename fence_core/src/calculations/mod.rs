//! # Estimator Calculations
//!
//! One module per calculator. Each follows the same pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable), with `validate`
//! - `*Result` - Take-off (JSON-serializable, sparse where quantities can be zero)
//! - `calculate(input, catalog) -> *Result` - Pure, total calculation
//!
//! Validation is the only fallible step. Once an input validates, its
//! `calculate` always returns a result.
//!
//! ## Available Calculations
//!
//! - [`chainlink`] - Chain-link run with terminal hardware
//! - [`vinyl`] / [`aluminum`] - Panel fences with gates
//! - [`wood`] - Stick-built wood fence with gates
//! - [`split_rail`] - Split rail fence with wood gate hardware
//! - [`picket`] / [`lakeland`] - Picket sections and the Lakeland Two kit
//! - [`pipe_cut`] - Swing gate frame cut list and pipe cost
//! - [`cantilever`] - Cantilever slide gate
//! - [`ball_field`] - Backstop and perimeter fence line

pub mod aluminum;
pub mod ball_field;
pub mod cantilever;
pub mod chainlink;
pub mod lakeland;
pub mod picket;
pub mod pipe_cut;
pub mod split_rail;
pub mod vinyl;
pub mod wood;

use serde::{Deserialize, Serialize};

use crate::catalog::{contains_feet, Catalog};
use crate::errors::{CalcError, CalcResult};
use crate::units::Feet;

// Re-export commonly used types
pub use aluminum::{AluminumInput, AluminumResult};
pub use ball_field::{BallFieldInput, BallFieldResult};
pub use cantilever::{CantileverInput, CantileverResult};
pub use chainlink::{ChainlinkInput, ChainlinkResult};
pub use lakeland::{LakelandTwoInput, LakelandTwoResult};
pub use picket::{PicketInput, PicketResult};
pub use pipe_cut::{PipeCutInput, PipeCutResult};
pub use split_rail::{SplitRailInput, SplitRailResult};
pub use vinyl::{VinylInput, VinylResult};
pub use wood::{WoodInput, WoodResult};

/// Enum wrapper for every calculator input.
///
/// Tagged by `type`, so a calculation reads from JSON as
/// `{ "type": "PipeCut", "gate_width": 96.0, ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    Chainlink(ChainlinkInput),
    Vinyl(VinylInput),
    Wood(WoodInput),
    Aluminum(AluminumInput),
    SplitRail(SplitRailInput),
    Picket(PicketInput),
    LakelandTwo(LakelandTwoInput),
    PipeCut(PipeCutInput),
    Cantilever(CantileverInput),
    BallField(BallFieldInput),
}

/// Result of evaluating a [`CalculationItem`], tagged the same way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationOutput {
    Chainlink(ChainlinkResult),
    Vinyl(VinylResult),
    Wood(WoodResult),
    Aluminum(AluminumResult),
    SplitRail(SplitRailResult),
    Picket(PicketResult),
    LakelandTwo(LakelandTwoResult),
    PipeCut(PipeCutResult),
    Cantilever(CantileverResult),
    BallField(BallFieldResult),
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::Chainlink(i) => &i.label,
            CalculationItem::Vinyl(i) => &i.label,
            CalculationItem::Wood(i) => &i.label,
            CalculationItem::Aluminum(i) => &i.label,
            CalculationItem::SplitRail(i) => &i.label,
            CalculationItem::Picket(i) => &i.label,
            CalculationItem::LakelandTwo(i) => &i.label,
            CalculationItem::PipeCut(i) => &i.label,
            CalculationItem::Cantilever(i) => &i.label,
            CalculationItem::BallField(i) => &i.label,
        }
    }

    /// Calculator name as shown to the invoicing service
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::Chainlink(_) => "Chainlink",
            CalculationItem::Vinyl(_) => "Vinyl",
            CalculationItem::Wood(_) => "Wood",
            CalculationItem::Aluminum(_) => "Aluminum",
            CalculationItem::SplitRail(_) => "Split Rail",
            CalculationItem::Picket(_) => "Picket",
            CalculationItem::LakelandTwo(_) => "Lakeland Two",
            CalculationItem::PipeCut(_) => "Pipe Cut",
            CalculationItem::Cantilever(_) => "Cantilever Gate",
            CalculationItem::BallField(_) => "Ball Field",
        }
    }

    /// Check the input against the catalog
    pub fn validate(&self, catalog: &Catalog) -> CalcResult<()> {
        match self {
            CalculationItem::Chainlink(i) => i.validate(catalog),
            CalculationItem::Vinyl(i) => i.validate(catalog),
            CalculationItem::Wood(i) => i.validate(catalog),
            CalculationItem::Aluminum(i) => i.validate(catalog),
            CalculationItem::SplitRail(i) => i.validate(catalog),
            CalculationItem::Picket(i) => i.validate(catalog),
            CalculationItem::LakelandTwo(i) => i.validate(),
            CalculationItem::PipeCut(i) => i.validate(catalog),
            CalculationItem::Cantilever(i) => i.validate(),
            CalculationItem::BallField(i) => i.validate(catalog),
        }
    }

    /// Run the calculation without validating first
    pub fn calculate(&self, catalog: &Catalog) -> CalculationOutput {
        match self {
            CalculationItem::Chainlink(i) => CalculationOutput::Chainlink(chainlink::calculate(i, catalog)),
            CalculationItem::Vinyl(i) => CalculationOutput::Vinyl(vinyl::calculate(i, catalog)),
            CalculationItem::Wood(i) => CalculationOutput::Wood(wood::calculate(i, catalog)),
            CalculationItem::Aluminum(i) => CalculationOutput::Aluminum(aluminum::calculate(i, catalog)),
            CalculationItem::SplitRail(i) => CalculationOutput::SplitRail(split_rail::calculate(i, catalog)),
            CalculationItem::Picket(i) => CalculationOutput::Picket(picket::calculate(i)),
            CalculationItem::LakelandTwo(i) => CalculationOutput::LakelandTwo(lakeland::calculate(i)),
            CalculationItem::PipeCut(i) => CalculationOutput::PipeCut(pipe_cut::calculate(i, catalog)),
            CalculationItem::Cantilever(i) => CalculationOutput::Cantilever(cantilever::calculate(i, catalog)),
            CalculationItem::BallField(i) => CalculationOutput::BallField(ball_field::calculate(i, catalog)),
        }
    }

    /// Validate, then calculate
    pub fn evaluate(&self, catalog: &Catalog) -> CalcResult<CalculationOutput> {
        self.validate(catalog)?;
        tracing::debug!(calc_type = self.calc_type(), label = self.label(), "evaluating");
        Ok(self.calculate(catalog))
    }
}

impl CalculationOutput {
    /// Explanatory note on a gate-only run
    pub fn notes(&self) -> Option<&str> {
        match self {
            CalculationOutput::Vinyl(r) => r.notes.as_deref(),
            CalculationOutput::Wood(r) => r.notes.as_deref(),
            CalculationOutput::Aluminum(r) => r.notes.as_deref(),
            CalculationOutput::SplitRail(r) => r.notes.as_deref(),
            _ => None,
        }
    }
}

// ============================================================================
// Shared helpers
// ============================================================================

/// `Some(n)` for positive counts, the sparse-result rule
pub(crate) fn positive(n: u32) -> Option<u32> {
    (n > 0).then_some(n)
}

pub(crate) fn positive_feet(length: Feet) -> Option<Feet> {
    (length.0 > 0.0).then(|| length.rounded())
}

/// `ceil(x)` as a count, zero for non-positive or non-finite input
pub(crate) fn ceil_count(x: f64) -> u32 {
    if x.is_finite() && x > 0.0 {
        x.ceil() as u32
    } else {
        0
    }
}

/// Longest run, sideline or outfield accepted, in feet
pub const MAX_RUN_LENGTH_FT: f64 = 100_000.0;

/// Most end or corner posts accepted on one run
pub const MAX_TERMINAL_POSTS: u32 = 10_000;

/// Most gate openings accepted on one run, singles and doubles together
pub const MAX_GATE_OPENINGS: u32 = 1_000;

/// Most sections accepted by the picket and kit calculators
pub const MAX_SECTIONS: u32 = 100_000;

/// Longest single span accepted: a picket section side, a gate opening
pub const MAX_SPAN_FT: f64 = 100.0;

/// Most rails accepted per section
pub const MAX_RAILS: u32 = 100;

pub(crate) fn validate_run_length(length: Feet) -> CalcResult<()> {
    validate_length("fence_length", length, MAX_RUN_LENGTH_FT)
}

/// Finite, non-negative and at most `max` feet
pub(crate) fn validate_length(field: &str, length: Feet, max: f64) -> CalcResult<()> {
    if !length.0.is_finite() || length.0 < 0.0 {
        return Err(CalcError::invalid_input(
            field,
            length.0.to_string(),
            "Length must be a non-negative number of feet",
        ));
    }
    if length.0 > max {
        return Err(CalcError::invalid_input(
            field,
            length.0.to_string(),
            format!("Length cannot exceed {} ft", max),
        ));
    }
    Ok(())
}

/// Count within `min..=max`
pub(crate) fn validate_count(field: &str, value: u32, min: u32, max: u32) -> CalcResult<()> {
    if value < min || value > max {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            format!("Must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

/// Ends and corners of a run
pub(crate) fn validate_terminals(ends: u32, corners: u32) -> CalcResult<()> {
    validate_count("ends", ends, 0, MAX_TERMINAL_POSTS)?;
    validate_count("corners", corners, 0, MAX_TERMINAL_POSTS)
}

pub(crate) fn validate_fence_height(catalog: &Catalog, height: Feet) -> CalcResult<()> {
    validate_selection("fence_height", &catalog.fence_heights, height)
}

/// Check that `value` is one of the catalog's listed lengths
pub(crate) fn validate_selection(field: &str, options: &[Feet], value: Feet) -> CalcResult<()> {
    if contains_feet(options, value) {
        Ok(())
    } else {
        Err(CalcError::invalid_input(
            field,
            value.0.to_string(),
            "Value is not offered in the catalog",
        ))
    }
}
