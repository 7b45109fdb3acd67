//! Lakeland Two panel kit: every section takes 13 pickets, 2 rails and
//! 2 U-channels.

use serde::{Deserialize, Serialize};

use super::{validate_count, MAX_SECTIONS};
use crate::errors::{CalcError, CalcResult};

pub const PICKETS_PER_SECTION: u32 = 13;
pub const RAILS_PER_SECTION: u32 = 2;
pub const U_CHANNELS_PER_SECTION: u32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LakelandTwoInput {
    #[serde(default)]
    pub label: String,
    pub num_sections: u32,
}

impl LakelandTwoInput {
    pub fn validate(&self) -> CalcResult<()> {
        if self.num_sections < 1 {
            return Err(CalcError::invalid_input(
                "num_sections",
                self.num_sections.to_string(),
                "Number of sections must be at least 1",
            ));
        }
        validate_count("num_sections", self.num_sections, 1, MAX_SECTIONS)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LakelandTwoResult {
    pub pickets: u32,
    pub rails: u32,
    pub u_channels: u32,
}

pub fn calculate(input: &LakelandTwoInput) -> LakelandTwoResult {
    LakelandTwoResult {
        pickets: input.num_sections.saturating_mul(PICKETS_PER_SECTION),
        rails: input.num_sections.saturating_mul(RAILS_PER_SECTION),
        u_channels: input.num_sections.saturating_mul(U_CHANNELS_PER_SECTION),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kit_counts() {
        let input = LakelandTwoInput {
            label: String::new(),
            num_sections: 4,
        };
        assert!(input.validate().is_ok());
        let result = calculate(&input);
        assert_eq!(result.pickets, 52);
        assert_eq!(result.rails, 8);
        assert_eq!(result.u_channels, 8);
    }

    #[test]
    fn test_zero_sections_rejected() {
        let input = LakelandTwoInput {
            label: String::new(),
            num_sections: 0,
        };
        assert!(input.validate().unwrap_err().is_validation());
    }

    #[test]
    fn test_huge_kit_rejected_and_saturates() {
        let input = LakelandTwoInput {
            label: String::new(),
            num_sections: u32::MAX / 2,
        };
        assert_eq!(input.validate().unwrap_err().error_code(), "INVALID_INPUT");
        let result = calculate(&input);
        assert_eq!(result.pickets, u32::MAX);
        assert_eq!(result.rails, u32::MAX - 1);
    }
}
