// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Cost details for physical plans
//!
//! A [`PhysicalPlanCostDetail`] is a parameter bag the cost model fills in while
//! computing the cost of one plan. It is correlated with plan traces only by
//! plan id.

use crate::trace::plan::PlanId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A value recorded in a cost detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CostParam {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<CostParam>),
    Nested(BTreeMap<String, CostParam>),
}

impl CostParam {
    /// False if any float in this value is NaN or infinite
    pub fn is_finite(&self) -> bool {
        match self {
            CostParam::Float(v) => v.is_finite(),
            CostParam::List(items) => items.iter().all(CostParam::is_finite),
            CostParam::Nested(map) => map.values().all(CostParam::is_finite),
            _ => true,
        }
    }
}

impl fmt::Display for CostParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CostParam::Bool(b) => write!(f, "{}", b),
            CostParam::Int(i) => write!(f, "{}", i),
            CostParam::Float(v) => write!(f, "{}", v),
            CostParam::Text(s) => write!(f, "{}", s),
            CostParam::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            CostParam::Nested(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<bool> for CostParam {
    fn from(v: bool) -> Self {
        CostParam::Bool(v)
    }
}

impl From<i32> for CostParam {
    fn from(v: i32) -> Self {
        CostParam::Int(v as i64)
    }
}

impl From<i64> for CostParam {
    fn from(v: i64) -> Self {
        CostParam::Int(v)
    }
}

impl From<u32> for CostParam {
    fn from(v: u32) -> Self {
        CostParam::Int(v as i64)
    }
}

impl From<u64> for CostParam {
    fn from(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(v) => CostParam::Int(v),
            Err(_) => CostParam::Float(v as f64),
        }
    }
}

impl From<usize> for CostParam {
    fn from(v: usize) -> Self {
        CostParam::Int(v as i64)
    }
}

impl From<f32> for CostParam {
    fn from(v: f32) -> Self {
        CostParam::Float(f64::from(v))
    }
}

impl From<f64> for CostParam {
    fn from(v: f64) -> Self {
        CostParam::Float(v)
    }
}

impl From<&str> for CostParam {
    fn from(v: &str) -> Self {
        CostParam::Text(v.to_string())
    }
}

impl From<String> for CostParam {
    fn from(v: String) -> Self {
        CostParam::Text(v)
    }
}

impl From<Vec<CostParam>> for CostParam {
    fn from(v: Vec<CostParam>) -> Self {
        CostParam::List(v)
    }
}

impl From<BTreeMap<String, CostParam>> for CostParam {
    fn from(v: BTreeMap<String, CostParam>) -> Self {
        CostParam::Nested(v)
    }
}

/// How the cost of one physical plan was computed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalPlanCostDetail {
    id: PlanId,
    #[serde(rename = "type")]
    tp: String,
    #[serde(default)]
    params: BTreeMap<String, CostParam>,
    #[serde(default)]
    desc: String,
}

impl PhysicalPlanCostDetail {
    /// Create a cost detail for a plan
    pub fn new(id: PlanId, tp: impl Into<String>) -> Self {
        Self {
            id,
            tp: tp.into(),
            params: BTreeMap::new(),
            desc: String::new(),
        }
    }

    /// Insert or overwrite a parameter
    pub fn add_param(&mut self, key: impl Into<String>, value: impl Into<CostParam>) -> &mut Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn set_desc(&mut self, desc: impl Into<String>) {
        self.desc = desc.into();
    }

    pub fn plan_id(&self) -> PlanId {
        self.id
    }

    pub fn plan_type(&self) -> &str {
        &self.tp
    }

    /// Whether a parameter has been recorded under `key`
    pub fn exists(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    pub fn param(&self, key: &str) -> Option<&CostParam> {
        self.params.get(key)
    }

    pub fn params(&self) -> &BTreeMap<String, CostParam> {
        &self.params
    }

    pub fn desc(&self) -> &str {
        &self.desc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_param_chains() {
        let mut detail = PhysicalPlanCostDetail::new(7, "TableFullScan");
        detail
            .add_param("rows", 10000)
            .add_param("row_size", 32.5)
            .add_param("scan_factor", "tidb_opt_scan_factor");
        detail.set_desc("rows * log(row_size) * scan_factor");

        assert_eq!(detail.plan_id(), 7);
        assert_eq!(detail.plan_type(), "TableFullScan");
        assert_eq!(detail.param("rows"), Some(&CostParam::Int(10000)));
        assert_eq!(detail.desc(), "rows * log(row_size) * scan_factor");
    }

    #[test]
    fn test_exists_tracks_inserted_keys() {
        let mut detail = PhysicalPlanCostDetail::new(1, "Sort");
        assert!(!detail.exists("rows"));

        detail.add_param("rows", 3);
        assert!(detail.exists("rows"));
        assert!(!detail.exists("cpu_factor"));

        detail.add_param("rows", 4);
        assert_eq!(detail.params().len(), 1);
        assert_eq!(detail.param("rows"), Some(&CostParam::Int(4)));
    }

    #[test]
    fn test_nested_params_serialize_as_plain_json() {
        let mut inner = BTreeMap::new();
        inner.insert("cpu".to_string(), CostParam::from(1.5));
        inner.insert("keep_order".to_string(), CostParam::from(true));

        let mut detail = PhysicalPlanCostDetail::new(2, "HashAgg");
        detail
            .add_param("factors", inner)
            .add_param("keys", vec![CostParam::from("a"), CostParam::from("b")]);

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["id"], 2);
        assert_eq!(json["type"], "HashAgg");
        assert_eq!(json["params"]["factors"]["cpu"], 1.5);
        assert_eq!(json["params"]["factors"]["keep_order"], true);
        assert_eq!(json["params"]["keys"], serde_json::json!(["a", "b"]));

        let back: PhysicalPlanCostDetail = serde_json::from_value(json).unwrap();
        assert_eq!(back, detail);
    }

    #[test]
    fn test_unsigned_and_single_precision_params() {
        assert_eq!(CostParam::from(42u64), CostParam::Int(42));
        assert_eq!(CostParam::from(i64::MAX as u64), CostParam::Int(i64::MAX));
        assert_eq!(CostParam::from(u64::MAX), CostParam::Float(u64::MAX as f64));
        assert_eq!(CostParam::from(0.5f32), CostParam::Float(0.5));

        let mut detail = PhysicalPlanCostDetail::new(3, "TableRangeScan");
        let row_count: u64 = 1_000;
        detail.add_param("rows", row_count);
        assert_eq!(detail.param("rows"), Some(&CostParam::Int(1_000)));
    }

    #[test]
    fn test_is_finite_checks_nested_values() {
        assert!(CostParam::from(1.5).is_finite());
        assert!(!CostParam::from(f64::NAN).is_finite());

        let mut inner = BTreeMap::new();
        inner.insert("cpu".to_string(), CostParam::from(f64::INFINITY));
        assert!(!CostParam::List(vec![CostParam::from(inner)]).is_finite());
        assert!(CostParam::List(vec![CostParam::from("x"), CostParam::from(1)]).is_finite());
    }

    #[test]
    fn test_display() {
        let value = CostParam::List(vec![CostParam::Int(1), CostParam::Text("x".into())]);
        assert_eq!(value.to_string(), "[1, x]");
    }
}
