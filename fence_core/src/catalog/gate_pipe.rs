//! Gate Frame Pipe Sizes
//!
//! Frame tube diameters and leaf arrangements for welded chain-link gate
//! frames, with the fitting allowances each diameter carries.
//!
//! ## Deductions
//!
//! | Diameter | OD (in) | Hinge + latch clearance | Corner fittings (both ends) |
//! |----------|---------|-------------------------|-----------------------------|
//! | 1 3/8″   | 1.375   | 3.0                     | 3.0 (2 x 1.5)               |
//! | 1 5/8″   | 1.625   | 3.5                     | 3.5 (2 x 1.75)              |
//! | 2″       | 2.0     | 4.0                     | 4.0 (2 x 2.0)               |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::units::Inches;

/// Gap left between the two leaves of a double gate
pub const DOUBLE_GATE_CENTER_GAP_IN: f64 = 1.0;

/// Gate frame tube diameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum FrameDiameter {
    /// 1 3/8″ OD
    #[default]
    #[serde(rename = "1 3/8″", alias = "1 3/8\"", alias = "1-3/8")]
    OneThreeEighths,
    /// 1 5/8″ OD
    #[serde(rename = "1 5/8″", alias = "1 5/8\"", alias = "1-5/8")]
    OneFiveEighths,
    /// 2″ OD
    #[serde(rename = "2″", alias = "2\"", alias = "2")]
    Two,
}

impl FrameDiameter {
    /// All diameters in catalog order
    pub const ALL: [FrameDiameter; 3] = [
        FrameDiameter::OneThreeEighths,
        FrameDiameter::OneFiveEighths,
        FrameDiameter::Two,
    ];

    /// Catalog label, e.g. "1 5/8″"
    pub fn label(&self) -> &'static str {
        match self {
            FrameDiameter::OneThreeEighths => "1 3/8″",
            FrameDiameter::OneFiveEighths => "1 5/8″",
            FrameDiameter::Two => "2″",
        }
    }

    /// Outside diameter of the tube
    pub fn outside_diameter(&self) -> Inches {
        match self {
            FrameDiameter::OneThreeEighths => Inches(1.375),
            FrameDiameter::OneFiveEighths => Inches(1.625),
            FrameDiameter::Two => Inches(2.0),
        }
    }

    /// Hinge + latch clearance taken out of the rough opening
    pub fn opening_deduction(&self) -> Inches {
        match self {
            FrameDiameter::OneThreeEighths => Inches(3.0),
            FrameDiameter::OneFiveEighths => Inches(3.5),
            FrameDiameter::Two => Inches(4.0),
        }
    }

    /// Allowance for a single corner fitting
    pub fn corner_fitting_allowance(&self) -> Inches {
        match self {
            FrameDiameter::OneThreeEighths => Inches(1.5),
            FrameDiameter::OneFiveEighths => Inches(1.75),
            FrameDiameter::Two => Inches(2.0),
        }
    }

    /// Deduction on a horizontal member: a corner fitting at each end
    pub fn corner_fitting_deduction(&self) -> Inches {
        self.corner_fitting_allowance() * 2.0
    }
}

impl fmt::Display for FrameDiameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Leaf arrangement of a swing gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GateLeafArrangement {
    #[default]
    Single,
    Double,
    /// Tapered leaf with unequal hinge-side and latch-side heights
    Barrier,
    #[serde(rename = "Double Barrier", alias = "DoubleBarrier")]
    DoubleBarrier,
}

impl GateLeafArrangement {
    pub const ALL: [GateLeafArrangement; 4] = [
        GateLeafArrangement::Single,
        GateLeafArrangement::Double,
        GateLeafArrangement::Barrier,
        GateLeafArrangement::DoubleBarrier,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            GateLeafArrangement::Single => "Single",
            GateLeafArrangement::Double => "Double",
            GateLeafArrangement::Barrier => "Barrier",
            GateLeafArrangement::DoubleBarrier => "Double Barrier",
        }
    }

    /// Number of leaves hung in the opening
    pub fn leaf_count(&self) -> u32 {
        match self {
            GateLeafArrangement::Single | GateLeafArrangement::Barrier => 1,
            GateLeafArrangement::Double | GateLeafArrangement::DoubleBarrier => 2,
        }
    }

    pub fn is_barrier(&self) -> bool {
        matches!(self, GateLeafArrangement::Barrier | GateLeafArrangement::DoubleBarrier)
    }

    /// Gap where two leaves meet (zero for single leaves)
    pub fn center_gap(&self) -> Inches {
        if self.leaf_count() > 1 {
            Inches(DOUBLE_GATE_CENTER_GAP_IN)
        } else {
            Inches(0.0)
        }
    }
}

impl fmt::Display for GateLeafArrangement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deductions() {
        assert_eq!(FrameDiameter::OneThreeEighths.opening_deduction(), Inches(3.0));
        assert_eq!(FrameDiameter::OneFiveEighths.opening_deduction(), Inches(3.5));
        assert_eq!(FrameDiameter::Two.opening_deduction(), Inches(4.0));

        assert_eq!(FrameDiameter::OneThreeEighths.corner_fitting_deduction(), Inches(3.0));
        assert_eq!(FrameDiameter::OneFiveEighths.corner_fitting_deduction(), Inches(3.5));
        assert_eq!(FrameDiameter::Two.corner_fitting_deduction(), Inches(4.0));
    }

    #[test]
    fn test_leaf_counts() {
        assert_eq!(GateLeafArrangement::Single.leaf_count(), 1);
        assert_eq!(GateLeafArrangement::Double.leaf_count(), 2);
        assert_eq!(GateLeafArrangement::Barrier.leaf_count(), 1);
        assert_eq!(GateLeafArrangement::DoubleBarrier.leaf_count(), 2);
        assert_eq!(GateLeafArrangement::Double.center_gap(), Inches(1.0));
        assert_eq!(GateLeafArrangement::Barrier.center_gap(), Inches(0.0));
    }

    #[test]
    fn test_diameter_serialization() {
        let json = serde_json::to_string(&FrameDiameter::OneFiveEighths).unwrap();
        assert_eq!(json, "\"1 5/8″\"");
        let parsed: FrameDiameter = serde_json::from_str("\"1 5/8\\\"\"").unwrap();
        assert_eq!(parsed, FrameDiameter::OneFiveEighths);
    }

    #[test]
    fn test_arrangement_serialization() {
        let json = serde_json::to_string(&GateLeafArrangement::DoubleBarrier).unwrap();
        assert_eq!(json, "\"Double Barrier\"");
        let parsed: GateLeafArrangement = serde_json::from_str("\"Barrier\"").unwrap();
        assert!(parsed.is_barrier());
    }
}
