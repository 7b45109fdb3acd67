//! # fence_core - Fence and Gate Material Estimating Engine
//!
//! `fence_core` turns a customer's fence description (run length, height,
//! terminal posts, gates, material family) into a bill of materials. Gate
//! frames get a cut list and pipe cost. All inputs and outputs are
//! JSON-serializable so results can be handed to an invoicing service
//! unchanged.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Catalog-Driven**: Product tables are an explicit value passed by reference
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use fence_core::calculations::{CalculationItem, CalculationOutput, VinylInput};
//! use fence_core::catalog::Catalog;
//! use fence_core::gates::GatedRun;
//! use fence_core::units::Feet;
//!
//! let catalog = Catalog::standard();
//! let run = GatedRun::new(Feet(100.0), 2, 1).with_single_gate("4", 1);
//! let item = CalculationItem::Vinyl(VinylInput::from_defaults("Backyard", run, &catalog));
//!
//! let output = item.evaluate(&catalog)?;
//! if let CalculationOutput::Vinyl(result) = &output {
//!     assert_eq!(result.num_panels, Some(12));
//! }
//!
//! // Serialize to JSON for storage or transmission
//! let json = serde_json::to_string_pretty(&output)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - One calculator per fence family, plus gate frames
//! - [`catalog`] - Product tables, defaults and pricing
//! - [`layout`] - Post layout along a straight run
//! - [`gates`] - Gate aggregation and gate-aware runs
//! - [`estimate`] - Invoicing payload
//! - [`units`] - Type-safe unit wrappers and the length converter
//! - [`errors`] - Structured error types
//! - [`file_io`] - Catalog and item files with atomic saves

pub mod calculations;
pub mod catalog;
pub mod errors;
pub mod estimate;
pub mod file_io;
pub mod gates;
pub mod layout;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{CalculationItem, CalculationOutput};
pub use catalog::Catalog;
pub use errors::{CalcError, CalcResult};
pub use estimate::EstimatePayload;
pub use file_io::{load_catalog, load_item, save_catalog};
