//! Plain-text rendering of calculation results.
//!
//! Pipe-cut results get a cut list table. Every other family is rendered
//! from its JSON form, so absent quantities stay absent in the report too.

use std::fmt::Write as _;

use fence_core::calculations::{CalculationItem, CalculationOutput, PipeCutResult};
use serde_json::Value;

const RULE: &str = "═══════════════════════════════════════";

pub fn render(item: &CalculationItem, output: &CalculationOutput) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "  {} ESTIMATE", item.calc_type().to_uppercase());
    if !item.label().is_empty() {
        let _ = writeln!(out, "  {}", item.label());
    }
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out);

    match output {
        CalculationOutput::PipeCut(result) => render_pipe_cut(&mut out, result),
        other => match serde_json::to_value(other) {
            Ok(value) => render_value(&mut out, &value, 1),
            Err(e) => {
                let _ = writeln!(out, "  (unable to render result: {})", e);
            }
        },
    }

    if let Some(note) = output.notes() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Note: {}", note);
    }
    out
}

fn render_pipe_cut(out: &mut String, result: &PipeCutResult) {
    let _ = writeln!(out, "Frame:");
    let _ = writeln!(out, "  Rough opening:  {:.2}\"", result.rough_opening.0);
    let _ = writeln!(out, "  Frame width:    {:.2}\"", result.frame_width.0);
    let _ = writeln!(out, "  Leaf width:     {:.2}\" x {}", result.leaf_width.0, result.leafs);
    let _ = writeln!(out);
    let _ = writeln!(out, "Cut list (per leaf):");
    for entry in &result.cut_list {
        let _ = writeln!(
            out,
            "  {:<22} {:>2} @ {:>7.2}\"",
            entry.member.label(),
            entry.quantity,
            entry.length.0
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Pipe:  {:.2} ft", result.total_pipe_length.0);
    match (result.price_per_foot, result.total_cost) {
        (Some(price), Some(cost)) => {
            let _ = writeln!(out, "Cost:  {} ({}/ft)", cost, price);
        }
        _ => {
            let _ = writeln!(out, "Cost:  no price listed for this pipe");
        }
    }
    let _ = writeln!(
        out,
        "Posts: {} set {:.2}\" apart",
        result.post_count, result.post_spacing.0
    );
}

fn render_value(out: &mut String, value: &Value, depth: usize) {
    let indent = "  ".repeat(depth);
    let Value::Object(map) = value else {
        let _ = writeln!(out, "{}{}", indent, scalar(value));
        return;
    };

    for (key, field) in map {
        if key == "type" || key == "notes" {
            continue;
        }
        let name = key.replace('_', " ");
        match field {
            Value::Object(_) => {
                let _ = writeln!(out, "{}{}:", indent, name);
                render_value(out, field, depth + 1);
            }
            Value::Array(items) => {
                let joined: Vec<String> = items.iter().map(scalar).collect();
                let _ = writeln!(out, "{}{:<28} {}", indent, name, joined.join(", "));
            }
            _ => {
                let _ = writeln!(out, "{}{:<28} {}", indent, name, scalar(field));
            }
        }
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fence_core::calculations::LakelandTwoInput;
    use fence_core::catalog::Catalog;

    #[test]
    fn test_render_generic_family() {
        let catalog = Catalog::standard();
        let item = CalculationItem::LakelandTwo(LakelandTwoInput {
            label: "Kit".to_string(),
            num_sections: 3,
        });
        let output = item.evaluate(&catalog).unwrap();
        let text = render(&item, &output);

        assert!(text.contains("LAKELAND TWO ESTIMATE"));
        assert!(text.contains("u channels"));
        assert!(text.contains("39"));
        assert!(!text.contains("type"));
    }

    #[test]
    fn test_render_pipe_cut() {
        let item = crate::demo_item();
        let output = item.evaluate(&Catalog::standard()).unwrap();
        let text = render(&item, &output);

        assert!(text.contains("Cut list (per leaf):"));
        assert!(text.contains("$26.17"));
    }
}
