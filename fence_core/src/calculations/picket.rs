//! # Picket Sections
//!
//! Pickets and backer rails for a number of identical fence sections,
//! hung either vertically (classic privacy) or horizontally (modern
//! slat style). Optional unit prices turn the counts into a cost.
//!
//! ```text
//! span                = section width (vertical) or height (horizontal)
//! pickets per section = ceil(span * 12 / picket width)
//! total pickets       = pickets per section * sections
//! backers             = rails * sections
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ceil_count, positive, validate_count, validate_length, MAX_RAILS, MAX_SECTIONS, MAX_SPAN_FT};
use crate::catalog::Catalog;
use crate::errors::{CalcError, CalcResult};
use crate::units::{round2, Dollars, Feet, Inches};

/// Which way the pickets run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PicketOrientation {
    /// Pickets stand upright across the section width
    #[default]
    Vertical,
    /// Pickets lie flat, stacked up the section height
    Horizontal,
}

impl fmt::Display for PicketOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PicketOrientation::Vertical => write!(f, "Vertical"),
            PicketOrientation::Horizontal => write!(f, "Horizontal"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PicketInput {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub orientation: PicketOrientation,
    pub picket_width: Inches,
    pub section_width: Feet,
    pub section_height: Feet,
    pub num_sections: u32,
    pub num_rails: u32,
    /// Price of one picket, ignored unless positive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picket_price: Option<Dollars>,
    /// Price of one backer rail, ignored unless positive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backer_price: Option<Dollars>,
}

impl PicketInput {
    pub fn from_defaults(label: impl Into<String>, num_sections: u32, catalog: &Catalog) -> Self {
        let defaults = &catalog.defaults.picket;
        PicketInput {
            label: label.into(),
            orientation: PicketOrientation::Vertical,
            picket_width: defaults.picket_width,
            section_width: defaults.section_width,
            section_height: defaults.section_height,
            num_sections,
            num_rails: defaults.num_rails,
            picket_price: None,
            backer_price: None,
        }
    }

    /// Length the pickets have to cover in one section
    pub fn span(&self) -> Feet {
        match self.orientation {
            PicketOrientation::Vertical => self.section_width,
            PicketOrientation::Horizontal => self.section_height,
        }
    }

    pub fn validate(&self, catalog: &Catalog) -> CalcResult<()> {
        if catalog.picket_label(self.picket_width).is_none() {
            return Err(CalcError::invalid_input(
                "picket_width",
                self.picket_width.0.to_string(),
                "Picket width is not offered in the catalog",
            ));
        }
        for (field, value) in [("section_width", self.section_width), ("section_height", self.section_height)] {
            if !value.0.is_finite() || value.0 <= 0.0 {
                return Err(CalcError::invalid_input(field, value.0.to_string(), "Must be positive"));
            }
            validate_length(field, value, MAX_SPAN_FT)?;
        }
        if self.num_sections < 1 {
            return Err(CalcError::invalid_input(
                "num_sections",
                self.num_sections.to_string(),
                "At least one section is required",
            ));
        }
        validate_count("num_sections", self.num_sections, 1, MAX_SECTIONS)?;
        if self.num_rails < 1 {
            return Err(CalcError::invalid_input(
                "num_rails",
                self.num_rails.to_string(),
                "At least one rail is required",
            ));
        }
        validate_count("num_rails", self.num_rails, 1, MAX_RAILS)?;
        for (field, price) in [("picket_price", self.picket_price), ("backer_price", self.backer_price)] {
            if let Some(p) = price {
                if !p.0.is_finite() || p.0 < 0.0 {
                    return Err(CalcError::invalid_input(field, p.0.to_string(), "Price cannot be negative"));
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PicketResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickets_per_section: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pickets: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backers: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picket_cost: Option<Dollars>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backer_cost: Option<Dollars>,
    /// Present when at least one of the costs is
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<Dollars>,
}

/// Cost of `count` items, absent unless the price is positive
fn priced(count: u32, price: Option<Dollars>) -> Option<Dollars> {
    price
        .filter(|p| p.0 > 0.0)
        .map(|p| Dollars(round2(p.0 * f64::from(count))))
}

pub fn calculate(input: &PicketInput) -> PicketResult {
    let picket_in = input.picket_width.0;
    let pickets_per_section = if picket_in > 0.0 {
        ceil_count(input.span().0 * 12.0 / picket_in)
    } else {
        0
    };
    let total_pickets = pickets_per_section.saturating_mul(input.num_sections);
    let backers = input.num_rails.saturating_mul(input.num_sections);

    let picket_cost = priced(total_pickets, input.picket_price);
    let backer_cost = priced(backers, input.backer_price);
    let total_cost = match (picket_cost, backer_cost) {
        (None, None) => None,
        (a, b) => Some(Dollars(round2(
            a.map_or(0.0, |d| d.0) + b.map_or(0.0, |d| d.0),
        ))),
    };

    tracing::debug!(
        label = %input.label,
        orientation = %input.orientation,
        pickets_per_section,
        total_pickets,
        "pickets calculated"
    );

    PicketResult {
        pickets_per_section: positive(pickets_per_section),
        total_pickets: positive(total_pickets),
        backers: positive(backers),
        picket_cost,
        backer_cost,
        total_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_input() -> PicketInput {
        PicketInput {
            label: "Test".to_string(),
            orientation: PicketOrientation::Vertical,
            picket_width: Inches(5.5),
            section_width: Feet(8.0),
            section_height: Feet(6.0),
            num_sections: 10,
            num_rails: 3,
            picket_price: None,
            backer_price: None,
        }
    }

    #[test]
    fn test_vertical_pickets() {
        let result = calculate(&test_input());
        // 96 / 5.5 = 17.45
        assert_eq!(result.pickets_per_section, Some(18));
        assert_eq!(result.total_pickets, Some(180));
        assert_eq!(result.backers, Some(30));
        assert_eq!(result.total_cost, None);
    }

    #[test]
    fn test_horizontal_pickets_span_height() {
        let mut input = test_input();
        input.orientation = PicketOrientation::Horizontal;
        let result = calculate(&input);
        // 72 / 5.5 = 13.09
        assert_eq!(result.pickets_per_section, Some(14));
        assert_eq!(result.total_pickets, Some(140));
    }

    #[test]
    fn test_costs_only_when_priced() {
        let mut input = test_input();
        input.picket_price = Some(Dollars(2.25));
        input.backer_price = Some(Dollars(0.0));
        let result = calculate(&input);

        assert_eq!(result.picket_cost, Some(Dollars(405.0)));
        assert_eq!(result.backer_cost, None);
        assert_eq!(result.total_cost, Some(Dollars(405.0)));

        input.backer_price = Some(Dollars(6.5));
        let result = calculate(&input);
        assert_eq!(result.backer_cost, Some(Dollars(195.0)));
        assert_eq!(result.total_cost, Some(Dollars(600.0)));
    }

    #[test]
    fn test_from_defaults_and_validation() {
        let catalog = Catalog::standard();
        let input = PicketInput::from_defaults("Default", 4, &catalog);
        assert!(input.validate(&catalog).is_ok());
        // 1x4 at 8 ft: 96 / 3.5 = 27.43
        assert_eq!(calculate(&input).pickets_per_section, Some(28));

        let mut no_sections = input.clone();
        no_sections.num_sections = 0;
        assert!(no_sections.validate(&catalog).is_err());

        let mut negative_price = input;
        negative_price.picket_price = Some(Dollars(-1.0));
        assert!(negative_price.validate(&catalog).is_err());
    }

    #[test]
    fn test_orientation_serialization() {
        let json = serde_json::to_string(&PicketOrientation::Horizontal).unwrap();
        assert_eq!(json, "\"horizontal\"");
        let input: PicketInput = serde_json::from_str(
            r#"{"picket_width": 3.5, "section_width": 8.0, "section_height": 6.0, "num_sections": 2, "num_rails": 2}"#,
        )
        .unwrap();
        assert_eq!(input.orientation, PicketOrientation::Vertical);
    }

    #[test]
    fn test_oversized_counts_rejected_and_saturate() {
        let catalog = Catalog::standard();
        let mut input = PicketInput::from_defaults("Huge", u32::MAX, &catalog);
        input.num_rails = u32::MAX;
        let err = input.validate(&catalog).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let mut wide = PicketInput::from_defaults("Wide", 1, &catalog);
        wide.section_width = Feet(1.0e9);
        assert!(wide.validate(&catalog).unwrap_err().is_validation());

        let result = calculate(&input);
        assert_eq!(result.total_pickets, Some(u32::MAX));
        assert_eq!(result.backers, Some(u32::MAX));
    }
}
