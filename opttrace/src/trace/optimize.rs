// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Top-level optimizer trace

use crate::config::TraceConfig;
use crate::trace::logical::LogicalOptimizeTracer;
use crate::trace::physical::PhysicalOptimizeTracer;
use crate::trace::plan::{FlatPlan, PlanTrace};
use serde::{Deserialize, Serialize};

/// Trace of one optimization run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizeTracer {
    /// Absent when the rewrite phase was not traced
    pub logical: Option<LogicalOptimizeTracer>,
    /// Absent when the physical phase was not traced
    pub physical: Option<PhysicalOptimizeTracer>,
    /// The plan that is actually executed
    #[serde(rename = "final", default)]
    pub final_plan: FlatPlan,
    /// Whether `final_plan` came from the fast plan path
    #[serde(rename = "isFastPlan", default)]
    pub is_fast_plan: bool,
}

impl OptimizeTracer {
    /// Tracer with both phase tracers attached
    pub fn new() -> Self {
        Self::with_config(&TraceConfig::default())
    }

    /// Tracer with the phase tracers the config asks for
    pub fn with_config(config: &TraceConfig) -> Self {
        let physical = if config.physical_enabled() {
            Some(if config.record_cost_details {
                PhysicalOptimizeTracer::new()
            } else {
                PhysicalOptimizeTracer::without_cost_details()
            })
        } else {
            None
        };
        Self {
            logical: config.logical_enabled().then(LogicalOptimizeTracer::new),
            physical,
            final_plan: FlatPlan::default(),
            is_fast_plan: false,
        }
    }

    /// Record a plan produced by the fast plan path, which skips logical and
    /// physical optimization
    pub fn set_fast_plan(&mut self, final_plan: &PlanTrace) {
        self.final_plan = final_plan.flatten();
        self.is_fast_plan = true;
        log::debug!("Recorded fast plan {}", final_plan.codec_name());
    }

    /// Record the plan produced by the full optimization pipeline
    pub fn record_final_plan(&mut self, final_plan: &PlanTrace) {
        self.final_plan = final_plan.flatten();
        log::debug!(
            "Recorded final plan {} ({} nodes)",
            final_plan.codec_name(),
            self.final_plan.len()
        );
    }

    /// Record the chosen physical plan on the physical tracer, if there is one
    pub fn record_final_physical_plan(&mut self, root: &PlanTrace) {
        if let Some(physical) = self.physical.as_mut() {
            physical.record_final_plan_trace(root);
        }
    }

    /// Record the final rewritten plan on the logical tracer, if there is one
    pub fn record_final_logical_plan(&mut self, root: &PlanTrace) {
        if let Some(logical) = self.logical.as_mut() {
            logical.record_final_logical_plan(root);
        }
    }
}

impl Default for OptimizeTracer {
    fn default() -> Self {
        Self::new()
    }
}
