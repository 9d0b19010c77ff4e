// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Trace configuration

use crate::error::TraceError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Controls which tracers are created for an optimization run and how the
/// finished trace is exported
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    /// Enable/disable tracing entirely
    pub enabled: bool,

    /// Create a logical rewrite tracer
    pub trace_logical: bool,

    /// Create a physical candidate tracer
    pub trace_physical: bool,

    /// Keep per-plan cost details in the physical tracer
    pub record_cost_details: bool,

    /// Indent exported JSON
    pub pretty_json: bool,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            trace_logical: true,
            trace_physical: true,
            record_cost_details: true,
            pretty_json: true,
        }
    }
}

impl TraceConfig {
    /// No tracers at all; only the final plan is recorded
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Trace rewrite rules only
    pub fn logical_only() -> Self {
        Self {
            trace_physical: false,
            record_cost_details: false,
            ..Self::default()
        }
    }

    /// Trace physical candidates and costs only
    pub fn physical_only() -> Self {
        Self {
            trace_logical: false,
            ..Self::default()
        }
    }

    /// Whether a logical tracer should be created
    pub fn logical_enabled(&self) -> bool {
        self.enabled && self.trace_logical
    }

    /// Whether a physical tracer should be created
    pub fn physical_enabled(&self) -> bool {
        self.enabled && self.trace_physical
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, TraceError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config = serde_json::from_str(&content)?;
        log::debug!("Loaded trace config from {}", path.as_ref().display());
        Ok(config)
    }
}
