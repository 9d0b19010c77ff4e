// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Cardinality estimation samples

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// An expression and the row count the estimator produced for it
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CETraceRecord {
    /// Not exported, but still part of record identity
    #[serde(skip)]
    pub table_id: i64,
    pub table_name: String,
    #[serde(rename = "type")]
    pub tp: String,
    pub expr: String,
    pub row_count: u64,
}

/// Deduplicate CE records by full-value equality, keeping the first
/// occurrence of each record in its original position
pub fn dedup_ce_trace(records: &[CETraceRecord]) -> Vec<CETraceRecord> {
    let mut exists: HashSet<&CETraceRecord> = HashSet::with_capacity(records.len());
    let ret: Vec<CETraceRecord> = records
        .iter()
        .filter(|rec| exists.insert(*rec))
        .cloned()
        .collect();
    log::trace!(
        "Deduplicated {} CE records into {}",
        records.len(),
        ret.len()
    );
    ret
}
