// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Error types for trace export and import
//!
//! Recording a trace never fails. Errors only arise at the edges: encoding a
//! finished trace, reading one back, or rebuilding a plan tree from a flat
//! plan that did not come from this crate.

use thiserror::Error;

/// Errors that can occur while exporting or importing traces
#[derive(Error, Debug)]
pub enum TraceError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid trace: {0}")]
    InvalidTrace(String),
}

impl TraceError {
    /// Create an invalid trace error
    pub fn invalid_trace<S: Into<String>>(msg: S) -> Self {
        Self::InvalidTrace(msg.into())
    }
}
