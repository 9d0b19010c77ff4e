// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! OptTrace - structured execution traces for query optimizers
//!
//! OptTrace records what a query optimizer did while it ran, so the run can be
//! inspected afterwards without re-running or instrumenting the optimizer.
//!
//! # Features
//!
//! - **Logical rule traces**: a snapshot of the plan before every rewrite rule
//!   and the atomic steps the rule performed
//! - **Physical candidate traces**: every candidate physical plan considered,
//!   with the ones that made it into the final plan marked as selected
//! - **Cost details**: per-plan parameter bags describing how a cost was computed
//! - **Cardinality estimation samples**: deduplicated CE records
//! - **Flat export**: plan trees are flattened into id-addressed sequences that
//!   serialize directly to JSON
//!
//! # Usage
//!
//! The optimizer owns an [`OptimizeTracer`] for the duration of one run:
//!
//! ```ignore
//! let mut tracer = OptimizeTracer::with_config(&TraceConfig::default());
//! if let Some(logical) = tracer.logical.as_mut() {
//!     let mut rule = logical.begin_rule(0, "column_prune", &plan);
//!     rule.append_step(3, "Projection", "column a unused", "removed column a");
//!     logical.record_final_logical_plan(&plan);
//! }
//! tracer.record_final_plan(&plan);
//! let json = tracer.to_json(&TraceConfig::default())?;
//! ```

pub mod config;
pub mod error;
pub mod explain;
pub mod export;
pub mod trace;

pub use config::TraceConfig;
pub use error::TraceError;
pub use trace::{
    codec_plan_name, dedup_ce_trace, to_flatten_plan_trace, CETraceRecord, CandidatePlanTrace,
    CostParam, FlatPlan, LogicalOptimizeTracer, LogicalRuleOptimizeTraceStep,
    LogicalRuleOptimizeTracer, OptimizeTracer, PhysicalOptimizeTracer, PhysicalPlanCostDetail,
    PlanId, PlanTrace, RuleStepRecorder,
};

/// OptTrace version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// OptTrace crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
