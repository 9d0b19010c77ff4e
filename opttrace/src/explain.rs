// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Human-readable rendering of optimizer traces
//!
//! Plans are stored flat; rendering rebuilds the tree through
//! [`FlatPlan::rebuild`] and draws it with box connectors.

use crate::trace::logical::LogicalOptimizeTracer;
use crate::trace::optimize::OptimizeTracer;
use crate::trace::physical::PhysicalOptimizeTracer;
use crate::trace::plan::{FlatPlan, PlanTrace};

/// Format a complete optimizer trace for display
pub fn format_trace(tracer: &OptimizeTracer) -> String {
    let mut output = String::new();

    output.push_str("Optimizer Trace\n");
    output.push_str(&"=".repeat(50));
    output.push('\n');
    output.push_str(&format!(
        "Path: {} | Final plan nodes: {}\n\n",
        if tracer.is_fast_plan {
            "fast plan"
        } else {
            "full optimization"
        },
        tracer.final_plan.len()
    ));

    output.push_str("Final Plan\n");
    output.push_str(&"-".repeat(30));
    output.push('\n');
    output.push_str(&format_plan_tree(&tracer.final_plan));
    output.push('\n');

    if let Some(logical) = &tracer.logical {
        output.push_str(&format_logical(logical));
    }
    if let Some(physical) = &tracer.physical {
        output.push_str(&format_physical(physical));
    }

    output
}

/// Format one flat plan as a tree. Falls back to a flat listing when the
/// plan cannot be rebuilt.
pub fn format_plan_tree(plan: &FlatPlan) -> String {
    if plan.is_empty() {
        return "(empty)\n".to_string();
    }
    let mut output = String::new();
    match plan.rebuild() {
        Ok(root) => format_plan_node(&root, &mut output, "", true, true),
        Err(e) => {
            log::warn!("Rendering plan as a flat list: {}", e);
            for node in plan {
                output.push_str(&format!("{}\n", node_label(node)));
            }
        }
    }
    output
}

fn format_plan_node(
    node: &PlanTrace,
    output: &mut String,
    prefix: &str,
    is_last: bool,
    is_root: bool,
) {
    let connector = if is_root {
        ""
    } else if is_last {
        "└── "
    } else {
        "├── "
    };
    output.push_str(&format!("{}{}{}\n", prefix, connector, node_label(node)));

    let child_prefix = if is_root {
        String::new()
    } else if is_last {
        format!("{}    ", prefix)
    } else {
        format!("{}│   ", prefix)
    };
    for (i, child) in node.children.iter().enumerate() {
        let is_last_child = i == node.children.len() - 1;
        format_plan_node(child, output, &child_prefix, is_last_child, false);
    }
}

fn node_label(node: &PlanTrace) -> String {
    let mut label = format!("{} cost: {:.2}", node.codec_name(), node.cost);
    if !node.explain_info.is_empty() {
        label.push_str(&format!(" [{}]", node.explain_info));
    }
    label
}

/// Format the logical rewrite phase
pub fn format_logical(logical: &LogicalOptimizeTracer) -> String {
    let mut output = String::new();

    output.push_str("Logical Optimization\n");
    output.push_str(&"-".repeat(30));
    output.push('\n');

    if logical.steps.is_empty() {
        output.push_str("No rule changed the plan\n");
    }
    for rule in &logical.steps {
        output.push_str(&format!(
            "{}. {} ({} steps, {} nodes before)\n",
            rule.index,
            rule.rule_name,
            rule.steps.len(),
            rule.before.len()
        ));
        for step in &rule.steps {
            output.push_str(&format!(
                "   {}) {}: {} ({})\n",
                step.index,
                crate::trace::plan::codec_plan_name(&step.tp, step.id),
                step.action,
                step.reason
            ));
        }
    }

    output.push_str("\nRewritten Plan:\n");
    output.push_str(&format_plan_tree(&logical.final_logical_plan));
    output.push('\n');
    output
}

/// Format the physical optimization phase
pub fn format_physical(physical: &PhysicalOptimizeTracer) -> String {
    let mut output = String::new();

    output.push_str("Physical Optimization\n");
    output.push_str(&"-".repeat(30));
    output.push('\n');
    output.push_str(&format!("Candidates: {}\n", physical.candidates.len()));

    for candidate in physical.candidates.values() {
        let marker = if candidate.plan.selected { "*" } else { " " };
        let mapping = if candidate.has_mapping() {
            format!(" <- {}", candidate.mapping_logical_plan)
        } else {
            String::new()
        };
        output.push_str(&format!(
            " {} {} cost: {:.2}{}\n",
            marker,
            candidate.plan.codec_name(),
            candidate.plan.cost,
            mapping
        ));
    }

    if !physical.physical_plan_cost_details.is_empty() {
        output.push_str("\nCost Details:\n");
        for detail in physical.physical_plan_cost_details.values() {
            output.push_str(&format!(
                "  {}",
                crate::trace::plan::codec_plan_name(detail.plan_type(), detail.plan_id())
            ));
            if !detail.desc().is_empty() {
                output.push_str(&format!(": {}", detail.desc()));
            }
            output.push('\n');
            for (key, value) in detail.params() {
                output.push_str(&format!("    {} = {}\n", key, value));
            }
        }
    }

    output.push_str("\nChosen Physical Plan:\n");
    output.push_str(&format_plan_tree(&physical.final_plan));
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::cost_detail::PhysicalPlanCostDetail;
    use crate::trace::physical::CandidatePlanTrace;

    fn join_plan() -> PlanTrace {
        PlanTrace::new(4, "HashJoin")
            .with_cost(12.0)
            .with_child(
                PlanTrace::new(2, "Selection")
                    .with_info("gt(a, 1)")
                    .with_child(PlanTrace::new(1, "TableScan")),
            )
            .with_child(PlanTrace::new(3, "TableScan"))
    }

    #[test]
    fn test_format_plan_tree_draws_connectors() {
        let text = format_plan_tree(&join_plan().flatten());
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "HashJoin_4 cost: 12.00");
        assert_eq!(lines[1], "├── Selection_2 cost: 0.00 [gt(a, 1)]");
        assert_eq!(lines[2], "│   └── TableScan_1 cost: 0.00");
        assert_eq!(lines[3], "└── TableScan_3 cost: 0.00");
    }

    #[test]
    fn test_format_plan_tree_falls_back_to_list() {
        let mut broken = PlanTrace::new(2, "Limit");
        broken.children_id = vec![7];
        let text = format_plan_tree(&FlatPlan::new(vec![broken]));
        assert_eq!(text, "Limit_2 cost: 0.00\n");
        assert_eq!(format_plan_tree(&FlatPlan::default()), "(empty)\n");
    }

    #[test]
    fn test_format_trace_sections() {
        let mut tracer = OptimizeTracer::new();
        let plan = join_plan();

        if let Some(logical) = tracer.logical.as_mut() {
            logical
                .begin_rule(0, "predicate_push_down", &plan)
                .append_step(2, "Selection", "pushed down", "moved below join");
            logical.record_final_logical_plan(&plan);
        }
        if let Some(physical) = tracer.physical.as_mut() {
            physical.append_candidate(CandidatePlanTrace::new(
                PlanTrace::new(4, "HashJoin").with_cost(12.0),
                "Join_4",
            ));
            physical.append_candidate(CandidatePlanTrace::unmapped(PlanTrace::new(
                8,
                "MergeJoin",
            )));
            let mut detail = PhysicalPlanCostDetail::new(4, "HashJoin");
            detail.add_param("build_rows", 10).set_desc("build + probe");
            physical.append_cost_detail(detail);
            physical.record_final_plan_trace(&plan);
        }
        tracer.record_final_plan(&plan);

        let text = format_trace(&tracer);
        assert!(text.contains("Path: full optimization"));
        assert!(text.contains("0. predicate_push_down (1 steps, 4 nodes before)"));
        assert!(text.contains("0) Selection_2: moved below join (pushed down)"));
        assert!(text.contains(" * HashJoin_4 cost: 12.00 <- Join_4"));
        assert!(text.contains("   MergeJoin_8 cost: 0.00"));
        assert!(text.contains("HashJoin_4: build + probe"));
        assert!(text.contains("build_rows = 10"));
    }
}
