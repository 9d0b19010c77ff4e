// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Logical rewrite tracing
//!
//! One [`LogicalRuleOptimizeTracer`] is recorded per rule application. The
//! optimizer opens a rule with [`LogicalOptimizeTracer::begin_rule`], which
//! snapshots the plan and returns a [`RuleStepRecorder`]; the rule logs its
//! changes through that recorder. The recorder mutably borrows the tracer, so
//! steps can only ever be appended to the rule that is currently open.

use crate::trace::plan::{FlatPlan, PlanId, PlanTrace};
use serde::{Deserialize, Serialize};

/// Trace of the whole logical optimization phase
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogicalOptimizeTracer {
    #[serde(rename = "final")]
    pub final_logical_plan: FlatPlan,
    pub steps: Vec<LogicalRuleOptimizeTracer>,
}

impl LogicalOptimizeTracer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot `before` and open a new rule application.
    ///
    /// `index` is the position of this application among all rules the
    /// optimizer attempts, whether or not they end up producing steps. The
    /// previously open rule, if any, is closed by this call.
    pub fn begin_rule(
        &mut self,
        index: usize,
        name: impl Into<String>,
        before: &PlanTrace,
    ) -> RuleStepRecorder<'_> {
        let rule = LogicalRuleOptimizeTracer::before_optimize(index, name.into(), before);
        log::trace!("Begin rule {} ({}) on {}", rule.rule_name, index, before.codec_name());

        let position = self.steps.len();
        self.steps.push(rule);
        RuleStepRecorder {
            rule: &mut self.steps[position],
        }
    }

    /// Record the plan produced by the rewrite phase and drop every rule
    /// application that produced no steps. Surviving rules keep the index
    /// they were given when they began.
    pub fn record_final_logical_plan(&mut self, final_plan: &PlanTrace) {
        self.final_logical_plan = final_plan.flatten();
        self.remove_useless_step();
    }

    fn remove_useless_step(&mut self) {
        let before = self.steps.len();
        self.steps.retain(|rule| !rule.steps.is_empty());
        log::debug!(
            "Logical trace finalized: kept {} of {} rule applications",
            self.steps.len(),
            before
        );
    }
}

/// Trace of one rule application: the plan before the rule ran and the
/// steps it performed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogicalRuleOptimizeTracer {
    pub index: usize,
    pub before: FlatPlan,
    #[serde(rename = "name")]
    pub rule_name: String,
    pub steps: Vec<LogicalRuleOptimizeTraceStep>,
}

impl LogicalRuleOptimizeTracer {
    fn before_optimize(index: usize, rule_name: String, before: &PlanTrace) -> Self {
        Self {
            index,
            before: before.flatten(),
            rule_name,
            steps: Vec::new(),
        }
    }
}

/// One atomic change made by a rule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogicalRuleOptimizeTraceStep {
    pub action: String,
    pub reason: String,
    pub id: PlanId,
    #[serde(rename = "type")]
    pub tp: String,
    /// Position within the owning rule's step list
    pub index: usize,
}

/// Handle to the rule application currently open on a [`LogicalOptimizeTracer`]
#[derive(Debug)]
pub struct RuleStepRecorder<'a> {
    rule: &'a mut LogicalRuleOptimizeTracer,
}

impl RuleStepRecorder<'_> {
    /// Append a step to the open rule. Steps are numbered from 0 per rule.
    pub fn append_step(
        &mut self,
        id: PlanId,
        tp: impl Into<String>,
        reason: impl Into<String>,
        action: impl Into<String>,
    ) {
        let index = self.rule.steps.len();
        self.rule.steps.push(LogicalRuleOptimizeTraceStep {
            action: action.into(),
            reason: reason.into(),
            id,
            tp: tp.into(),
            index,
        });
    }

    pub fn index(&self) -> usize {
        self.rule.index
    }

    pub fn rule_name(&self) -> &str {
        &self.rule.rule_name
    }

    pub fn step_count(&self) -> usize {
        self.rule.steps.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan() -> PlanTrace {
        PlanTrace::new(3, "Projection").with_child(PlanTrace::new(1, "DataSource"))
    }

    #[test]
    fn test_steps_are_numbered_per_rule() {
        let mut tracer = LogicalOptimizeTracer::new();

        let mut rule = tracer.begin_rule(0, "predicate_push_down", &plan());
        rule.append_step(2, "Selection", "pushed to DataSource", "removed");
        rule.append_step(1, "DataSource", "received predicate", "added condition");
        assert_eq!(rule.step_count(), 2);

        let mut rule = tracer.begin_rule(1, "column_prune", &plan());
        rule.append_step(3, "Projection", "column b unused", "pruned b");

        let first: Vec<_> = tracer.steps[0].steps.iter().map(|s| s.index).collect();
        assert_eq!(first, vec![0, 1]);
        assert_eq!(tracer.steps[1].steps[0].index, 0);
        assert_eq!(tracer.steps[1].steps[0].tp, "Projection");
    }

    #[test]
    fn test_begin_rule_snapshots_flattened_plan() {
        let mut tracer = LogicalOptimizeTracer::new();
        let rule = tracer.begin_rule(4, "max_min_eliminate", &plan());
        assert_eq!(rule.index(), 4);
        assert_eq!(rule.rule_name(), "max_min_eliminate");

        let before = &tracer.steps[0].before;
        assert_eq!(before.ids().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(before.root().unwrap().children_id, vec![1]);
    }

    #[test]
    fn test_finalize_prunes_rules_without_steps_and_keeps_index() {
        let mut tracer = LogicalOptimizeTracer::new();

        tracer.begin_rule(0, "R1", &plan());
        let mut rule = tracer.begin_rule(1, "R2", &plan());
        rule.append_step(1, "DataSource", "a", "b");
        rule.append_step(3, "Projection", "c", "d");
        tracer.begin_rule(2, "R3", &plan());

        tracer.record_final_logical_plan(&plan());

        assert_eq!(tracer.steps.len(), 1);
        assert_eq!(tracer.steps[0].rule_name, "R2");
        assert_eq!(tracer.steps[0].index, 1);
        assert_eq!(tracer.final_logical_plan.len(), 2);
    }

    #[test]
    fn test_second_final_logical_plan_replaces_first() {
        let mut tracer = LogicalOptimizeTracer::new();
        tracer
            .begin_rule(0, "R1", &plan())
            .append_step(1, "DataSource", "a", "b");

        tracer.record_final_logical_plan(&plan());
        tracer.record_final_logical_plan(&PlanTrace::new(8, "TableDual"));

        assert_eq!(tracer.final_logical_plan.ids().collect::<Vec<_>>(), vec![8]);
        assert_eq!(tracer.steps.len(), 1);
        assert_eq!(tracer.steps[0].rule_name, "R1");
    }

    #[test]
    fn test_recorder_can_be_passed_to_rule() {
        fn eliminate_projection(plan: &PlanTrace, recorder: &mut RuleStepRecorder<'_>) {
            recorder.append_step(plan.id, plan.tp.clone(), "projection is identity", "eliminated");
        }

        let mut tracer = LogicalOptimizeTracer::new();
        let plan = plan();
        let mut recorder = tracer.begin_rule(0, "projection_eliminate", &plan);
        eliminate_projection(&plan, &mut recorder);

        assert_eq!(tracer.steps[0].steps[0].action, "eliminated");
    }

    #[test]
    fn test_serialized_field_names() {
        let mut tracer = LogicalOptimizeTracer::new();
        tracer
            .begin_rule(0, "join_reorder", &plan())
            .append_step(3, "Join", "cheaper order", "swapped");
        tracer.record_final_logical_plan(&plan());

        let json = serde_json::to_value(&tracer).unwrap();
        assert!(json["final"].is_array());
        let rule = &json["steps"][0];
        assert_eq!(rule["name"], "join_reorder");
        assert_eq!(rule["index"], 0);
        assert!(rule["before"].is_array());
        let step = &rule["steps"][0];
        assert_eq!(step["type"], "Join");
        assert_eq!(step["action"], "swapped");
        assert_eq!(step["reason"], "cheaper order");
        assert_eq!(step["id"], 3);
        assert_eq!(step["index"], 0);
    }
}
