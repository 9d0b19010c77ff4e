// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! JSON export and import of finished traces

use crate::config::TraceConfig;
use crate::error::TraceError;
use crate::trace::ce::CETraceRecord;
use crate::trace::optimize::OptimizeTracer;
use crate::trace::plan::{FlatPlan, PlanTrace};
use std::fs;
use std::path::Path;

impl OptimizeTracer {
    /// Encode the trace as JSON.
    ///
    /// JSON has no representation for NaN or infinity, so a trace holding a
    /// non-finite cost or cost parameter is rejected instead of being written
    /// in a form that cannot be read back.
    pub fn to_json(&self, config: &TraceConfig) -> Result<String, TraceError> {
        self.check_finite_costs()?;
        let json = if config.pretty_json {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    fn check_finite_costs(&self) -> Result<(), TraceError> {
        check_flat_plan(&self.final_plan, "final plan")?;
        if let Some(logical) = &self.logical {
            check_flat_plan(&logical.final_logical_plan, "final logical plan")?;
            for rule in &logical.steps {
                check_flat_plan(&rule.before, &rule.rule_name)?;
            }
        }
        if let Some(physical) = &self.physical {
            check_flat_plan(&physical.final_plan, "final physical plan")?;
            for candidate in physical.candidates.values() {
                check_plan_cost(&candidate.plan, "candidates")?;
            }
            for detail in physical.physical_plan_cost_details.values() {
                let non_finite = detail.params().iter().find(|(_, v)| !v.is_finite());
                if let Some((key, value)) = non_finite {
                    return Err(TraceError::invalid_trace(format!(
                        "cost detail of plan {} has non-finite param {} = {}",
                        detail.plan_id(),
                        key,
                        value
                    )));
                }
            }
        }
        Ok(())
    }

    /// Decode a trace previously produced by [`Self::to_json`]
    pub fn from_json(json: &str) -> Result<Self, TraceError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the trace to a JSON file
    pub fn write_to_file<P: AsRef<Path>>(
        &self,
        path: P,
        config: &TraceConfig,
    ) -> Result<(), TraceError> {
        let json = self.to_json(config)?;
        fs::write(path.as_ref(), json)?;
        log::debug!("Wrote optimizer trace to {}", path.as_ref().display());
        Ok(())
    }

    /// Read a trace from a JSON file
    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self, TraceError> {
        let content = fs::read_to_string(path.as_ref())?;
        let tracer = Self::from_json(&content)?;
        log::debug!("Read optimizer trace from {}", path.as_ref().display());
        Ok(tracer)
    }
}

fn check_flat_plan(plan: &FlatPlan, location: &str) -> Result<(), TraceError> {
    plan.iter().try_for_each(|node| check_plan_cost(node, location))
}

fn check_plan_cost(node: &PlanTrace, location: &str) -> Result<(), TraceError> {
    if node.cost.is_finite() {
        return Ok(());
    }
    Err(TraceError::invalid_trace(format!(
        "plan {} in {} has non-finite cost {}",
        node.codec_name(),
        location,
        node.cost
    )))
}

/// Read a JSON array of CE records. Table ids are not exported, so they come
/// back as 0.
pub fn read_ce_records<P: AsRef<Path>>(path: P) -> Result<Vec<CETraceRecord>, TraceError> {
    let content = fs::read_to_string(path.as_ref())?;
    Ok(serde_json::from_str(&content)?)
}

/// Encode CE records as a JSON array
pub fn ce_records_to_json(
    records: &[CETraceRecord],
    config: &TraceConfig,
) -> Result<String, TraceError> {
    let json = if config.pretty_json {
        serde_json::to_string_pretty(records)?
    } else {
        serde_json::to_string(records)?
    };
    Ok(json)
}
