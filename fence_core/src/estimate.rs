//! # Estimate Payload
//!
//! The wrapper handed to the invoicing service. It carries the calculator
//! name, the inputs, the results and an RFC 3339 timestamp:
//!
//! ```json
//! {
//!   "calculatorType": "Pipe Cut",
//!   "inputs": { "type": "PipeCut", "gate_width": 96.0, "...": "..." },
//!   "results": { "type": "PipeCut", "frame_width": 91.5, "...": "..." },
//!   "timestamp": "2025-06-01T14:30:00Z"
//! }
//! ```
//!
//! Sending the payload is the caller's job. This module only guarantees
//! that it serializes and reads back without loss.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculations::{CalculationItem, CalculationOutput};
use crate::catalog::Catalog;
use crate::errors::CalcResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimatePayload {
    pub calculator_type: String,
    pub inputs: CalculationItem,
    pub results: CalculationOutput,
    pub timestamp: DateTime<Utc>,
}

impl EstimatePayload {
    /// Wrap an already evaluated item, stamped with the current time
    pub fn new(inputs: CalculationItem, results: CalculationOutput) -> Self {
        EstimatePayload {
            calculator_type: inputs.calc_type().to_string(),
            inputs,
            results,
            timestamp: Utc::now(),
        }
    }

    /// Validate and evaluate `item`, then wrap the result
    pub fn evaluate(item: CalculationItem, catalog: &Catalog) -> CalcResult<Self> {
        let results = item.evaluate(catalog)?;
        let payload = EstimatePayload::new(item, results);
        tracing::info!(
            calculator = %payload.calculator_type,
            label = payload.inputs.label(),
            "estimate ready for invoicing"
        );
        Ok(payload)
    }

    pub fn to_json(&self) -> CalcResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> CalcResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{
        BallFieldInput, CantileverInput, ChainlinkInput, PipeCutInput, SplitRailInput, WoodInput,
    };
    use crate::gates::GatedRun;
    use crate::units::{Feet, Inches};

    fn test_payload(item: CalculationItem) -> EstimatePayload {
        EstimatePayload::evaluate(item, &Catalog::standard()).unwrap()
    }

    #[test]
    fn test_camel_case_keys() {
        let catalog = Catalog::standard();
        let item = CalculationItem::PipeCut(PipeCutInput::from_defaults(
            "Drive",
            Inches(96.0),
            Inches(48.0),
            &catalog,
        ));
        let value = serde_json::to_value(test_payload(item)).unwrap();

        assert_eq!(value["calculatorType"], "Pipe Cut");
        assert_eq!(value["inputs"]["type"], "PipeCut");
        assert_eq!(value["results"]["type"], "PipeCut");
        assert!(value["timestamp"].is_string());
        assert!(value.get("calculator_type").is_none());
    }

    #[test]
    fn test_lossless_for_every_family() {
        let catalog = Catalog::standard();
        let items = vec![
            CalculationItem::Chainlink(ChainlinkInput::from_defaults("Back", Feet(100.0), 2, 1, &catalog)),
            CalculationItem::Wood(WoodInput::from_defaults(
                "Side",
                GatedRun::new(Feet(64.0), 2, 0).with_single_gate("4", 1),
                &catalog,
            )),
            CalculationItem::SplitRail(SplitRailInput::from_defaults("Pasture", Feet(200.0), &catalog)),
            CalculationItem::Cantilever(CantileverInput::from_defaults("Slide", &catalog)),
            CalculationItem::BallField(BallFieldInput::from_defaults("Field 1", &catalog)),
        ];

        for item in items {
            let payload = test_payload(item);
            let json = payload.to_json().unwrap();
            let back = EstimatePayload::from_json(&json).unwrap();
            assert_eq!(back, payload);
            // Serializing again yields the same document
            assert_eq!(back.to_json().unwrap(), json);
        }
    }

    #[test]
    fn test_invalid_item_is_not_wrapped() {
        let catalog = Catalog::standard();
        let mut input = ChainlinkInput::from_defaults("Bad", Feet(100.0), 2, 0, &catalog);
        input.fence_height = Feet(3.5);
        let err = EstimatePayload::evaluate(CalculationItem::Chainlink(input), &catalog).unwrap_err();
        assert!(err.is_validation());
    }
}
