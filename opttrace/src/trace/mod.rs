// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Optimizer trace data model
//!
//! This module holds the trace records produced while a query is optimized:
//! plan snapshots, logical rule applications, physical candidates, cost
//! details and cardinality estimation samples. Plan trees cross the export
//! boundary only through [`PlanTrace::flatten`].
//!
//! None of the tracers are synchronized. Each one belongs to the single
//! optimization run that created it.

pub mod ce;
pub mod cost_detail;
pub mod logical;
pub mod optimize;
pub mod physical;
pub mod plan;

pub use ce::{dedup_ce_trace, CETraceRecord};
pub use cost_detail::{CostParam, PhysicalPlanCostDetail};
pub use logical::{
    LogicalOptimizeTracer, LogicalRuleOptimizeTraceStep, LogicalRuleOptimizeTracer,
    RuleStepRecorder,
};
pub use optimize::OptimizeTracer;
pub use physical::{CandidatePlanTrace, PhysicalOptimizeTracer};
pub use plan::{codec_plan_name, to_flatten_plan_trace, FlatPlan, PlanId, PlanTrace};
