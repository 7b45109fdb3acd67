//! # Cantilever Slide Gate
//!
//! Frame, rollers and posts for a cantilever gate. Each leaf carries a
//! counterbalance tail half as long as the opening it covers, so the frame
//! is 1.5x the leaf opening.
//!
//! ```text
//! leaf opening   = opening / leaves
//! counterbalance = 0.5 * leaf opening
//! frame length   = leaf opening + counterbalance
//! uprights       = floor(frame length / 4) + 1 per leaf
//! diagonal brace = hypot(4, gate height), leaf openings over 20 ft only
//! ```
//!
//! ## Example
//!
//! ```rust
//! use fence_core::calculations::cantilever::{calculate, CantileverInput};
//! use fence_core::catalog::Catalog;
//!
//! let catalog = Catalog::standard();
//! let input = CantileverInput::from_defaults("Yard gate", &catalog);
//! let result = calculate(&input, &catalog);
//! assert_eq!(result.counter_balance_length.0, 10.0);
//! assert_eq!(result.total_frame_length.0, 30.0);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use super::chainlink::tie_wires;
use super::{validate_length, MAX_SPAN_FT};
use crate::catalog::Catalog;
use crate::errors::{CalcError, CalcResult};
use crate::units::Feet;

/// Counterbalance tail as a fraction of the leaf opening
pub const COUNTERBALANCE_RATIO: f64 = 0.5;

/// Nominal spacing between frame uprights
pub const UPRIGHT_SPACING_FT: f64 = 4.0;

/// Leaf openings wider than this may take a diagonal brace
pub const DIAGONAL_BRACE_MIN_OPENING_FT: f64 = 20.0;

pub const ROLLERS_PER_LEAF: u32 = 4;
pub const ROLLER_POSTS_PER_LEAF: u32 = 2;
pub const RAILS_PER_LEAF: u32 = 2;
pub const TENSION_BARS_PER_LEAF: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CantileverGateType {
    #[default]
    Single,
    /// Two leaves meeting in the middle of the opening
    Double,
}

impl CantileverGateType {
    pub fn leaf_count(&self) -> u32 {
        match self {
            CantileverGateType::Single => 1,
            CantileverGateType::Double => 2,
        }
    }
}

impl fmt::Display for CantileverGateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CantileverGateType::Single => write!(f, "Single"),
            CantileverGateType::Double => write!(f, "Double"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CantileverInput {
    #[serde(default)]
    pub label: String,
    /// Full opening between catch posts
    pub opening_size: Feet,
    pub gate_height: Feet,
    #[serde(default)]
    pub gate_type: CantileverGateType,
    #[serde(default)]
    pub include_diagonal_brace: bool,
}

impl CantileverInput {
    pub fn from_defaults(label: impl Into<String>, catalog: &Catalog) -> Self {
        let defaults = &catalog.defaults.cantilever;
        CantileverInput {
            label: label.into(),
            opening_size: defaults.opening_size,
            gate_height: defaults.gate_height,
            gate_type: CantileverGateType::Single,
            include_diagonal_brace: defaults.include_diagonal_brace,
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        if !self.opening_size.0.is_finite() || self.opening_size.0 <= 0.0 {
            return Err(CalcError::invalid_input(
                "opening_size",
                self.opening_size.0.to_string(),
                "Opening size must be positive",
            ));
        }
        if !self.gate_height.0.is_finite() || self.gate_height.0 <= 0.0 {
            return Err(CalcError::invalid_input(
                "gate_height",
                self.gate_height.0.to_string(),
                "Gate height must be positive",
            ));
        }
        validate_length("opening_size", self.opening_size, MAX_SPAN_FT)?;
        validate_length("gate_height", self.gate_height, MAX_SPAN_FT)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CantileverResult {
    pub leafs: u32,
    pub leaf_opening: Feet,
    pub counter_balance_length: Feet,
    pub total_frame_length: Feet,
    /// Top and bottom rails across all leaves
    pub rails: u32,
    pub rail_length: Feet,
    pub uprights_per_leaf: u32,
    pub total_uprights: u32,
    pub upright_length: Feet,
    pub upright_spacing: Feet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagonal_braces: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagonal_brace_length: Option<Feet>,
    /// Rails, uprights and braces across all leaves
    pub total_frame_pipe: Feet,
    pub rollers: u32,
    pub roller_posts: u32,
    /// Roller posts on a leaf are set one counterbalance length apart
    pub roller_post_spacing: Feet,
    pub catch_posts: u32,
    pub fabric_footage: Feet,
    pub tension_bars: u32,
    pub tie_wires: u32,
}

pub fn calculate(input: &CantileverInput, catalog: &Catalog) -> CantileverResult {
    let leafs = input.gate_type.leaf_count();
    let leaves = f64::from(leafs);

    let leaf_opening = input.opening_size / leaves;
    let counter_balance = leaf_opening * COUNTERBALANCE_RATIO;
    let frame_length = leaf_opening + counter_balance;

    // `as` saturates, so a non-finite frame cannot wrap the count
    let uprights_per_leaf = ((frame_length.0 / UPRIGHT_SPACING_FT).floor().max(0.0) as u32).saturating_add(1);
    let total_uprights = uprights_per_leaf.saturating_mul(leafs);
    let rails = RAILS_PER_LEAF * leafs;

    let braced = input.include_diagonal_brace && leaf_opening.0 > DIAGONAL_BRACE_MIN_OPENING_FT;
    let diagonal = braced.then(|| Feet(UPRIGHT_SPACING_FT.hypot(input.gate_height.0)));

    let frame_pipe = frame_length * f64::from(rails)
        + input.gate_height * f64::from(total_uprights)
        + diagonal.map_or(Feet(0.0), |d| d * leaves);
    let fabric = frame_length * leaves;

    if braced {
        tracing::debug!(leaf_opening_ft = leaf_opening.0, "diagonal brace added");
    }

    CantileverResult {
        leafs,
        leaf_opening: leaf_opening.rounded(),
        counter_balance_length: counter_balance.rounded(),
        total_frame_length: frame_length.rounded(),
        rails,
        rail_length: frame_length.rounded(),
        uprights_per_leaf,
        total_uprights,
        upright_length: input.gate_height.rounded(),
        upright_spacing: Feet(UPRIGHT_SPACING_FT),
        diagonal_braces: braced.then_some(leafs),
        diagonal_brace_length: diagonal.map(Feet::rounded),
        total_frame_pipe: frame_pipe.rounded(),
        rollers: ROLLERS_PER_LEAF * leafs,
        roller_posts: ROLLER_POSTS_PER_LEAF * leafs,
        roller_post_spacing: counter_balance.rounded(),
        catch_posts: leafs,
        fabric_footage: fabric.rounded(),
        tension_bars: TENSION_BARS_PER_LEAF * leafs,
        tie_wires: tie_wires(fabric, &catalog.constants),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_input(opening: f64, height: f64, gate_type: CantileverGateType) -> CantileverInput {
        CantileverInput {
            label: "Test".to_string(),
            opening_size: Feet(opening),
            gate_height: Feet(height),
            gate_type,
            include_diagonal_brace: true,
        }
    }

    #[test]
    fn test_single_twenty_foot_scenario() {
        let catalog = Catalog::standard();
        let result = calculate(&test_input(20.0, 6.0, CantileverGateType::Single), &catalog);

        assert_eq!(result.counter_balance_length, Feet(10.0));
        assert_eq!(result.total_frame_length, Feet(30.0));
        // Exactly 20 ft is not over the threshold
        assert_eq!(result.diagonal_braces, None);
        assert_eq!(result.diagonal_brace_length, None);
        assert_eq!(result.uprights_per_leaf, 8);
        assert_eq!(result.rails, 2);
        assert_eq!(result.rollers, 4);
        assert_eq!(result.roller_posts, 2);
        assert_eq!(result.roller_post_spacing, Feet(10.0));
        assert_eq!(result.catch_posts, 1);
        assert_eq!(result.fabric_footage, Feet(30.0));
        assert_eq!(result.tension_bars, 2);
        assert_eq!(result.tie_wires, 45);
        // 2 x 30 rails + 8 x 6 uprights
        assert_eq!(result.total_frame_pipe, Feet(108.0));
    }

    #[test]
    fn test_wide_single_gets_brace() {
        let catalog = Catalog::standard();
        let result = calculate(&test_input(24.0, 6.0, CantileverGateType::Single), &catalog);

        assert_eq!(result.diagonal_braces, Some(1));
        // hypot(4, 6)
        assert_eq!(result.diagonal_brace_length, Some(Feet(7.21)));
        assert_eq!(result.total_frame_length, Feet(36.0));
        assert_eq!(result.uprights_per_leaf, 10);
    }

    #[test]
    fn test_brace_opt_out() {
        let catalog = Catalog::standard();
        let mut input = test_input(24.0, 6.0, CantileverGateType::Single);
        input.include_diagonal_brace = false;
        assert_eq!(calculate(&input, &catalog).diagonal_braces, None);
    }

    #[test]
    fn test_double_gate_splits_opening() {
        let catalog = Catalog::standard();
        let result = calculate(&test_input(40.0, 8.0, CantileverGateType::Double), &catalog);

        assert_eq!(result.leafs, 2);
        assert_eq!(result.leaf_opening, Feet(20.0));
        assert_eq!(result.total_frame_length, Feet(30.0));
        // Each leaf is only 20 ft: no brace
        assert_eq!(result.diagonal_braces, None);
        assert_eq!(result.total_uprights, 16);
        assert_eq!(result.rails, 4);
        assert_eq!(result.rollers, 8);
        assert_eq!(result.roller_posts, 4);
        assert_eq!(result.catch_posts, 2);
        assert_eq!(result.fabric_footage, Feet(60.0));
        assert_eq!(result.tie_wires, 90);
    }

    #[test]
    fn test_validation() {
        assert!(test_input(20.0, 6.0, CantileverGateType::Single).validate().is_ok());
        assert!(test_input(0.0, 6.0, CantileverGateType::Single).validate().is_err());
        assert!(test_input(20.0, -1.0, CantileverGateType::Single).validate().is_err());
        assert!(test_input(100.0, 6.0, CantileverGateType::Double).validate().is_ok());
        let err = test_input(1.0e12, 6.0, CantileverGateType::Single).validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_unvalidated_huge_opening_saturates() {
        let catalog = Catalog::standard();
        let result = calculate(&test_input(1.0e12, 6.0, CantileverGateType::Double), &catalog);
        assert_eq!(result.uprights_per_leaf, u32::MAX);
        assert_eq!(result.total_uprights, u32::MAX);
        assert_eq!(result.tie_wires, u32::MAX);
    }
}
