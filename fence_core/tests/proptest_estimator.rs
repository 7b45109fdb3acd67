//! Property-based tests for the estimating engine.
//!
//! Run with: cargo test -p fence_core --test proptest_estimator

use fence_core::calculations::pipe_cut::{self, PipeCutInput, SizingMode, VERTICAL_BRACE_MIN_LEAF_WIDTH_IN};
use fence_core::calculations::{
    CalculationItem, ChainlinkInput, SplitRailInput, VinylInput, WoodInput,
};
use fence_core::catalog::{Catalog, FrameDiameter, GateLeafArrangement};
use fence_core::gates::GatedRun;
use fence_core::layout::layout_posts;
use fence_core::units::{convert, Feet, Inches, LengthUnit};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn arb_diameter() -> impl Strategy<Value = FrameDiameter> {
    prop_oneof![
        Just(FrameDiameter::OneThreeEighths),
        Just(FrameDiameter::OneFiveEighths),
        Just(FrameDiameter::Two),
    ]
}

fn arb_standard_type() -> impl Strategy<Value = GateLeafArrangement> {
    prop_oneof![Just(GateLeafArrangement::Single), Just(GateLeafArrangement::Double)]
}

/// Run lengths on a quarter-foot grid
fn arb_run_length() -> impl Strategy<Value = Feet> {
    (0u32..4000).prop_map(|q| Feet(f64::from(q) / 4.0))
}

/// Gate widths on a quarter-inch grid
fn arb_gate_width() -> impl Strategy<Value = Inches> {
    (144u32..640).prop_map(|q| Inches(f64::from(q) / 4.0))
}

fn arb_gate_height() -> impl Strategy<Value = Inches> {
    (96u32..384).prop_map(|q| Inches(f64::from(q) / 4.0))
}

fn standard_gate(
    width: Inches,
    height: Inches,
    diameter: FrameDiameter,
    gate_type: GateLeafArrangement,
) -> PipeCutInput {
    let mut input = PipeCutInput::from_defaults("Prop", width, height, Catalog::shared());
    input.frame_diameter = diameter;
    input.gate_type = gate_type;
    input.horizontal_brace = true;
    input.vertical_brace = true;
    input
}

// =============================================================================
// Run layout
// =============================================================================

proptest! {
    #[test]
    fn line_posts_never_decrease_with_length(
        length in arb_run_length(),
        extra in arb_run_length(),
        spacing in prop_oneof![Just(6.0), Just(8.0), Just(10.0)],
        ends in 0u32..4,
        corners in 0u32..4,
    ) {
        let shorter = layout_posts(length, Feet(spacing), ends, corners);
        let longer = layout_posts(length + extra, Feet(spacing), ends, corners);
        prop_assert!(longer.line_posts >= shorter.line_posts);
        prop_assert!(longer.sections >= shorter.sections);
    }

    #[test]
    fn layout_counts_every_post_slot(
        length in arb_run_length(),
        ends in 0u32..4,
        corners in 0u32..4,
    ) {
        let layout = layout_posts(length, Feet(10.0), ends, corners);
        if layout.sections > 0 {
            prop_assert!(layout.total_posts() >= layout.sections + 1);
        } else {
            prop_assert!(layout.is_empty());
        }
    }

    #[test]
    fn chainlink_line_posts_monotonic(length in arb_run_length(), extra in arb_run_length()) {
        let catalog = Catalog::shared();
        let shorter = CalculationItem::Chainlink(ChainlinkInput::from_defaults("A", length, 2, 1, catalog));
        let longer = CalculationItem::Chainlink(ChainlinkInput::from_defaults("B", length + extra, 2, 1, catalog));

        let (shorter, longer) = match (shorter.calculate(catalog), longer.calculate(catalog)) {
            (
                fence_core::CalculationOutput::Chainlink(a),
                fence_core::CalculationOutput::Chainlink(b),
            ) => (a, b),
            _ => return Err(TestCaseError::fail("wrong output family")),
        };
        prop_assert!(longer.interior_line_posts >= shorter.interior_line_posts);
        prop_assert!(longer.fabric_rolls >= shorter.fabric_rolls);
    }
}

// =============================================================================
// Purity
// =============================================================================

proptest! {
    #[test]
    fn evaluation_is_idempotent(
        length in arb_run_length(),
        ends in 0u32..3,
        corners in 0u32..3,
        singles in proptest::option::of(1u32..3),
        doubles in proptest::option::of(1u32..2),
    ) {
        let catalog = Catalog::shared();
        let mut run = GatedRun::new(length, ends, corners);
        if let Some(quantity) = singles {
            run = run.with_single_gate("4", quantity);
        }
        if let Some(quantity) = doubles {
            run = run.with_double_gate("8", quantity);
        }
        let items = [
            CalculationItem::Vinyl(VinylInput::from_defaults("V", run.clone(), catalog)),
            CalculationItem::Wood(WoodInput::from_defaults("W", run, catalog)),
            CalculationItem::SplitRail(SplitRailInput::from_defaults("S", length, catalog)),
        ];

        for item in &items {
            prop_assert!(item.validate(catalog).is_ok(), "generated item is invalid: {:?}", item);
            let first = serde_json::to_string(&item.calculate(catalog)).unwrap();
            let second = serde_json::to_string(&item.calculate(catalog)).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}

// =============================================================================
// Gate frames
// =============================================================================

proptest! {
    #[test]
    fn barrier_top_rail_obeys_triangle_inequality(
        opening in arb_gate_width(),
        diameter in arb_diameter(),
        hinge in prop_oneof![Just(Inches(36.0)), Just(Inches(42.0))],
        latch in prop_oneof![Just(Inches(24.0)), Just(Inches(30.0))],
        double in any::<bool>(),
    ) {
        let catalog = Catalog::shared();
        let width = if double { opening * 2.0 } else { opening };
        let mut input = PipeCutInput::from_defaults("Barrier", width, hinge, catalog)
            .barrier(double, hinge, latch);
        input.frame_diameter = diameter;

        let max_leaf = PipeCutInput::max_barrier_leaf_width(hinge, latch);
        if input.leaf_width().0 > max_leaf.0 {
            prop_assert!(input.validate(catalog).is_err());
            return Ok(());
        }
        prop_assert!(input.validate(catalog).is_ok());

        let result = pipe_cut::calculate(&input, catalog);
        let top_rail = result.top_rail_length.unwrap().0;
        prop_assert!(top_rail >= (hinge.0 - latch.0).abs());
        // Half a hundredth for rounding at the widest leaf
        prop_assert!(top_rail <= hinge.0 + latch.0 + 0.005);
    }

    #[test]
    fn frame_mode_reproduces_opening_mode(
        width in arb_gate_width(),
        height in arb_gate_height(),
        diameter in arb_diameter(),
        gate_type in arb_standard_type(),
    ) {
        let catalog = Catalog::shared();
        let opening_input = standard_gate(width, height, diameter, gate_type);
        prop_assume!(opening_input.validate(catalog).is_ok());
        let (frame, _) = opening_input.frame_and_opening();

        let mut frame_input = opening_input.clone();
        frame_input.mode = SizingMode::Frame;
        frame_input.gate_width = frame;

        let from_opening = pipe_cut::calculate(&opening_input, catalog);
        let from_frame = pipe_cut::calculate(&frame_input, catalog);

        prop_assert_eq!(&from_opening.cut_list, &from_frame.cut_list);
        prop_assert_eq!(from_opening.frame_width, from_frame.frame_width);
        prop_assert!((from_opening.rough_opening.0 - from_frame.rough_opening.0).abs() < 0.011);
        prop_assert_eq!(from_opening.total_pipe_length, from_frame.total_pipe_length);
    }

    #[test]
    fn gate_members_survive_unit_round_trip(
        width in arb_gate_width(),
        height in arb_gate_height(),
        diameter in arb_diameter(),
        gate_type in arb_standard_type(),
    ) {
        let catalog = Catalog::shared();
        let input = standard_gate(width, height, diameter, gate_type);
        prop_assume!(input.validate(catalog).is_ok());
        // A leaf sitting exactly on the brace threshold may cross it after conversion
        prop_assume!(input.leaf_width().0 != VERTICAL_BRACE_MIN_LEAF_WIDTH_IN);
        let result = pipe_cut::calculate(&input, catalog);

        // Re-derive the member lengths from the same width entered in feet
        let width_ft = Feet::from(input.gate_width);
        let height_ft = Feet(convert(input.gate_height.0, LengthUnit::Inches, LengthUnit::Feet));
        let mut converted = input.clone();
        converted.gate_width = Inches::from(width_ft);
        converted.gate_height = Inches(convert(height_ft.0, LengthUnit::Feet, LengthUnit::Inches));
        let again = pipe_cut::calculate(&converted, catalog);

        prop_assert_eq!(result.cut_list.len(), again.cut_list.len());
        for (a, b) in result.cut_list.iter().zip(&again.cut_list) {
            prop_assert_eq!(a.member, b.member);
            prop_assert!((a.length.0 - b.length.0).abs() < 0.011);
        }
    }
}

// =============================================================================
// Gate-only runs
// =============================================================================

proptest! {
    #[test]
    fn gate_consuming_run_reports_gates_only(width in prop_oneof![Just(3u32), Just(4), Just(5)]) {
        let catalog = Catalog::shared();
        let run = GatedRun::new(Feet(f64::from(width)), 2, 0).with_single_gate(width.to_string(), 1);
        let item = CalculationItem::Vinyl(VinylInput::from_defaults("Gate", run, catalog));
        let output = item.evaluate(catalog).unwrap();

        prop_assert!(output.notes().is_some_and(|n| !n.is_empty()));
        match output {
            fence_core::CalculationOutput::Vinyl(result) => {
                prop_assert_eq!(result.gates.gate_posts, Some(2));
                prop_assert_eq!(result.num_panels, None);
                prop_assert_eq!(result.num_line_posts, None);
                prop_assert_eq!(result.num_terminal_posts, None);
            }
            _ => return Err(TestCaseError::fail("wrong output family")),
        }
    }
}
