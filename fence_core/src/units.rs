//! # Unit Types
//!
//! Type-safe wrappers for the two length scales the estimator works in,
//! plus money. Fence runs, panels and cantilever frames are measured in
//! feet; gate-frame pipe members are measured in inches. Keeping them in
//! distinct newtypes makes passing one where the other is expected a
//! compile error.
//!
//! ## Example
//!
//! ```rust
//! use fence_core::units::{Feet, Inches};
//!
//! let run = Feet(12.0);
//! let run_inches: Inches = run.into();
//! assert_eq!(run_inches.0, 144.0);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};
use std::str::FromStr;

use crate::errors::CalcError;

// ============================================================================
// Length Units
// ============================================================================

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

impl From<Feet> for Inches {
    fn from(ft: Feet) -> Self {
        Inches(ft.0 * 12.0)
    }
}

impl From<Inches> for Feet {
    fn from(inches: Inches) -> Self {
        Feet(inches.0 / 12.0)
    }
}

// ============================================================================
// Money
// ============================================================================

/// Amount in US dollars
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dollars(pub f64);

impl fmt::Display for Dollars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

/// Round to 2 decimal places, the precision of every reported length and cost.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }

            /// Copy rounded to 2 decimal places
            pub fn rounded(self) -> Self {
                Self(round2(self.0))
            }

            /// Clamp negative values to zero
            pub fn non_negative(self) -> Self {
                Self(self.0.max(0.0))
            }
        }
    };
}

impl_arithmetic!(Feet);
impl_arithmetic!(Inches);
impl_arithmetic!(Dollars);

impl std::iter::Sum for Inches {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Inches(iter.map(|i| i.0).sum())
    }
}

impl std::iter::Sum for Feet {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Feet(iter.map(|f| f.0).sum())
    }
}

// ============================================================================
// Unit Converter
// ============================================================================

/// Length units offered by the quick unit converter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LengthUnit {
    #[serde(rename = "ft")]
    Feet,
    #[serde(rename = "m")]
    Meters,
    #[serde(rename = "in")]
    Inches,
    #[serde(rename = "cm")]
    Centimeters,
}

impl LengthUnit {
    pub const ALL: [LengthUnit; 4] = [
        LengthUnit::Feet,
        LengthUnit::Meters,
        LengthUnit::Inches,
        LengthUnit::Centimeters,
    ];

    /// Short symbol ("ft", "m", "in", "cm")
    pub fn symbol(&self) -> &'static str {
        match self {
            LengthUnit::Feet => "ft",
            LengthUnit::Meters => "m",
            LengthUnit::Inches => "in",
            LengthUnit::Centimeters => "cm",
        }
    }

    /// Display label, e.g. "Feet (ft)"
    pub fn label(&self) -> &'static str {
        match self {
            LengthUnit::Feet => "Feet (ft)",
            LengthUnit::Meters => "Meters (m)",
            LengthUnit::Inches => "Inches (in)",
            LengthUnit::Centimeters => "Centimeters (cm)",
        }
    }

    /// Multiplier converting a value in `self` to a value in `to`.
    ///
    /// These are the shop's published factors, not derived from one base
    /// unit, so `m -> ft` is 3.28084 rather than 1 / 0.3048.
    pub fn factor_to(&self, to: LengthUnit) -> f64 {
        use LengthUnit::*;
        match (*self, to) {
            (a, b) if a == b => 1.0,
            (Feet, Meters) => 0.3048,
            (Feet, Inches) => 12.0,
            (Feet, Centimeters) => 30.48,
            (Meters, Feet) => 3.28084,
            (Meters, Inches) => 39.3701,
            (Meters, Centimeters) => 100.0,
            (Inches, Feet) => 1.0 / 12.0,
            (Inches, Meters) => 0.0254,
            (Inches, Centimeters) => 2.54,
            (Centimeters, Feet) => 1.0 / 30.48,
            (Centimeters, Meters) => 0.01,
            (Centimeters, Inches) => 1.0 / 2.54,
            _ => 1.0,
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for LengthUnit {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LengthUnit::ALL
            .into_iter()
            .find(|u| u.symbol().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CalcError::invalid_input("unit", s, "Expected one of ft, m, in, cm"))
    }
}

/// Convert a length between units. Same-unit conversion returns the input.
pub fn convert(value: f64, from: LengthUnit, to: LengthUnit) -> f64 {
    if from == to {
        return value;
    }
    value * from.factor_to(to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feet_to_inches() {
        let ft = Feet(10.0);
        let inches: Inches = ft.into();
        assert_eq!(inches.0, 120.0);
    }

    #[test]
    fn test_inches_to_feet() {
        let inches = Inches(546.0);
        let ft: Feet = inches.into();
        assert_eq!(ft.0, 45.5);
    }

    #[test]
    fn test_arithmetic() {
        let a = Inches(10.0);
        let b = Inches(5.0);
        assert_eq!((a + b).0, 15.0);
        assert_eq!((a - b).0, 5.0);
        assert_eq!((a * 2.0).0, 20.0);
        assert_eq!((a / 2.0).0, 5.0);
        assert_eq!((b - a).non_negative().0, 0.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(42.254_9), 42.25);
        assert_eq!(round2(1.005_1), 1.01);
        assert_eq!(Inches(45.678).rounded(), Inches(45.68));
    }

    #[test]
    fn test_sum() {
        let total: Inches = [Inches(1.5), Inches(2.5), Inches(3.0)].into_iter().sum();
        assert_eq!(total, Inches(7.0));
    }

    #[test]
    fn test_dollars_display() {
        assert_eq!(Dollars(32.5).to_string(), "$32.50");
    }

    #[test]
    fn test_serialization() {
        let ft = Feet(12.5);
        let json = serde_json::to_string(&ft).unwrap();
        assert_eq!(json, "12.5");

        let roundtrip: Feet = serde_json::from_str(&json).unwrap();
        assert_eq!(ft, roundtrip);
    }

    #[test]
    fn test_convert() {
        assert!((convert(1.0, LengthUnit::Feet, LengthUnit::Meters) - 0.3048).abs() < 1e-12);
        assert!((convert(2.0, LengthUnit::Meters, LengthUnit::Centimeters) - 200.0).abs() < 1e-12);
        assert!((convert(25.4, LengthUnit::Centimeters, LengthUnit::Inches) - 10.0).abs() < 1e-9);
        assert_eq!(convert(7.25, LengthUnit::Inches, LengthUnit::Inches), 7.25);
    }

    #[test]
    fn test_unit_parse() {
        assert_eq!("FT".parse::<LengthUnit>().unwrap(), LengthUnit::Feet);
        assert_eq!(" cm ".parse::<LengthUnit>().unwrap(), LengthUnit::Centimeters);
        assert!("yd".parse::<LengthUnit>().is_err());
    }

    #[test]
    fn test_unit_serialization() {
        let json = serde_json::to_string(&LengthUnit::Inches).unwrap();
        assert_eq!(json, "\"in\"");
    }
}
