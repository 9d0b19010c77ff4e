// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Physical optimization tracing
//!
//! Candidates are keyed by plan id. When the final physical plan is recorded,
//! every candidate whose id appears in it is marked as selected.

use crate::trace::cost_detail::PhysicalPlanCostDetail;
use crate::trace::plan::{FlatPlan, PlanId, PlanTrace};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Trace of the whole physical optimization phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicalOptimizeTracer {
    #[serde(rename = "costs", default)]
    pub physical_plan_cost_details: BTreeMap<PlanId, PhysicalPlanCostDetail>,
    /// The chosen physical plan
    #[serde(rename = "final", default)]
    pub final_plan: FlatPlan,
    #[serde(default)]
    pub candidates: BTreeMap<PlanId, CandidatePlanTrace>,
    #[serde(skip, default = "default_record_cost_details")]
    record_cost_details: bool,
}

fn default_record_cost_details() -> bool {
    true
}

impl PhysicalOptimizeTracer {
    pub fn new() -> Self {
        Self {
            physical_plan_cost_details: BTreeMap::new(),
            final_plan: FlatPlan::default(),
            candidates: BTreeMap::new(),
            record_cost_details: true,
        }
    }

    /// Tracer that discards cost details passed to [`Self::append_cost_detail`]
    pub fn without_cost_details() -> Self {
        Self {
            record_cost_details: false,
            ..Self::new()
        }
    }

    /// Insert or replace a candidate keyed by its plan id.
    ///
    /// A candidate without a mapping logical plan never replaces one that has
    /// a mapping.
    pub fn append_candidate(&mut self, candidate: CandidatePlanTrace) {
        let id = candidate.plan.id;
        if let Some(old) = self.candidates.get(&id) {
            if old.has_mapping() && !candidate.has_mapping() {
                log::trace!(
                    "Keeping candidate {} mapped to {}",
                    old.plan.codec_name(),
                    old.mapping_logical_plan
                );
                return;
            }
            log::trace!("Replacing candidate {}", old.plan.codec_name());
        }
        self.candidates.insert(id, candidate);
    }

    /// Store how the cost of a plan was computed, replacing any previous
    /// detail for the same plan id
    pub fn append_cost_detail(&mut self, detail: PhysicalPlanCostDetail) {
        if !self.record_cost_details {
            return;
        }
        self.physical_plan_cost_details
            .insert(detail.plan_id(), detail);
    }

    /// Record the chosen physical plan and mark the selected candidates
    pub fn record_final_plan_trace(&mut self, root: &PlanTrace) {
        self.final_plan = root.flatten();
        self.build_candidates_info();
    }

    fn build_candidates_info(&mut self) {
        if self.candidates.is_empty() {
            return;
        }
        let final_ids = self.final_plan.id_set();
        let mut selected = 0;
        for (id, candidate) in self.candidates.iter_mut() {
            if final_ids.contains(id) {
                candidate.plan.selected = true;
                selected += 1;
            }
        }
        log::debug!(
            "Physical trace finalized: {} of {} candidates selected",
            selected,
            self.candidates.len()
        );
    }

    /// Candidates that are part of the final plan, in id order
    pub fn selected_candidates(&self) -> impl Iterator<Item = &CandidatePlanTrace> {
        self.candidates
            .values()
            .filter(|candidate| candidate.plan.selected)
    }
}

// `record_cost_details` is recording behavior, not trace content
impl PartialEq for PhysicalOptimizeTracer {
    fn eq(&self, other: &Self) -> bool {
        self.physical_plan_cost_details == other.physical_plan_cost_details
            && self.final_plan == other.final_plan
            && self.candidates == other.candidates
    }
}

impl Default for PhysicalOptimizeTracer {
    fn default() -> Self {
        Self::new()
    }
}

/// A physical candidate plus the logical plan it implements
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidatePlanTrace {
    #[serde(flatten)]
    pub plan: PlanTrace,
    /// Empty when the candidate has no known logical provenance
    #[serde(rename = "mapping", default)]
    pub mapping_logical_plan: String,
}

impl CandidatePlanTrace {
    pub fn new(plan: PlanTrace, mapping_logical_plan: impl Into<String>) -> Self {
        Self {
            plan,
            mapping_logical_plan: mapping_logical_plan.into(),
        }
    }

    /// Candidate with no logical provenance
    pub fn unmapped(plan: PlanTrace) -> Self {
        Self::new(plan, String::new())
    }

    pub fn has_mapping(&self) -> bool {
        !self.mapping_logical_plan.is_empty()
    }
}
