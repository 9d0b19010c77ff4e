// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Plan trace nodes and the tree-to-flat-list transformation
//!
//! The optimizer hands over plans as owned trees of [`PlanTrace`]. Before a
//! plan is stored in any tracer it is flattened into a [`FlatPlan`]: a
//! post-order sequence in which every node refers to its children by id.

use crate::error::TraceError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Plan identifier, assigned by the optimizer and unique within one trace session
pub type PlanId = i64;

/// Trace information for one plan node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanTrace {
    pub id: PlanId,
    #[serde(rename = "type")]
    pub tp: String,
    /// Owned children; never exported
    #[serde(skip)]
    pub children: Vec<PlanTrace>,
    /// Child ids, filled in by flattening
    #[serde(rename = "children")]
    pub children_id: Vec<PlanId>,
    pub cost: f64,
    /// Only meaningful for physical candidates
    pub selected: bool,
    #[serde(rename = "property")]
    pub proper_type: String,
    #[serde(rename = "info")]
    pub explain_info: String,
}

impl PlanTrace {
    /// Create a leaf node
    pub fn new(id: PlanId, tp: impl Into<String>) -> Self {
        Self {
            id,
            tp: tp.into(),
            ..Self::default()
        }
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.explain_info = info.into();
        self
    }

    pub fn with_property(mut self, property: impl Into<String>) -> Self {
        self.proper_type = property.into();
        self
    }

    pub fn with_child(mut self, child: PlanTrace) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = PlanTrace>) -> Self {
        self.children.extend(children);
        self
    }

    /// Number of nodes in the tree rooted at this node
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(PlanTrace::node_count).sum::<usize>()
    }

    /// Display label of the form `<type>_<id>`
    pub fn codec_name(&self) -> String {
        codec_plan_name(&self.tp, self.id)
    }

    /// Flatten the tree rooted at this node.
    ///
    /// Every descendant of a node is emitted before the node itself, so the
    /// root ends up last. Each emitted node drops its owned children and keeps
    /// their ids in `children_id`, in the original order.
    pub fn flatten(&self) -> FlatPlan {
        let mut flatten = Vec::with_capacity(self.node_count());
        flatten_plan_trace(self, &mut flatten);
        FlatPlan(flatten)
    }

    /// Copy of the exported fields only. `selected` and `proper_type` are
    /// left at their defaults.
    fn sanitized(&self) -> PlanTrace {
        PlanTrace {
            id: self.id,
            tp: self.tp.clone(),
            children: Vec::new(),
            children_id: Vec::new(),
            cost: self.cost,
            selected: false,
            proper_type: String::new(),
            explain_info: self.explain_info.clone(),
        }
    }
}

/// Transform a plan tree into its flattened form
pub fn to_flatten_plan_trace(root: &PlanTrace) -> FlatPlan {
    root.flatten()
}

fn flatten_plan_trace(node: &PlanTrace, flatten: &mut Vec<PlanTrace>) {
    let mut new_node = node.sanitized();
    if node.children.is_empty() {
        flatten.push(new_node);
        return;
    }
    new_node.children_id = node.children.iter().map(|child| child.id).collect();
    for child in &node.children {
        flatten_plan_trace(child, flatten);
    }
    flatten.push(new_node);
}

/// Returns `<type>_<id>` for display
pub fn codec_plan_name(tp: &str, id: PlanId) -> String {
    format!("{}_{}", tp, id)
}

/// A flattened plan: nodes in post-order, children addressed by id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlatPlan(Vec<PlanTrace>);

impl FlatPlan {
    pub fn new(nodes: Vec<PlanTrace>) -> Self {
        Self(nodes)
    }

    pub fn nodes(&self) -> &[PlanTrace] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The root is always the last node
    pub fn root(&self) -> Option<&PlanTrace> {
        self.0.last()
    }

    pub fn ids(&self) -> impl Iterator<Item = PlanId> + '_ {
        self.0.iter().map(|node| node.id)
    }

    pub fn id_set(&self) -> HashSet<PlanId> {
        self.ids().collect()
    }

    pub fn get(&self, id: PlanId) -> Option<&PlanTrace> {
        self.0.iter().find(|node| node.id == id)
    }

    pub fn contains(&self, id: PlanId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlanTrace> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<PlanTrace> {
        self.0
    }

    /// Rebuild the owned tree from child ids.
    ///
    /// This is the inverse of [`PlanTrace::flatten`] for plans read back from
    /// an export. Every child must appear before its parent and be claimed by
    /// exactly one parent.
    pub fn rebuild(&self) -> Result<PlanTrace, TraceError> {
        let root_id = self
            .root()
            .map(|root| root.id)
            .ok_or_else(|| TraceError::invalid_trace("flat plan is empty"))?;

        let mut built: HashMap<PlanId, PlanTrace> = HashMap::with_capacity(self.0.len());
        let mut seen: HashSet<PlanId> = HashSet::with_capacity(self.0.len());
        for node in &self.0 {
            if !seen.insert(node.id) {
                return Err(TraceError::invalid_trace(format!(
                    "duplicate plan id {}",
                    node.id
                )));
            }
            let mut rebuilt = node.clone();
            rebuilt.children = node
                .children_id
                .iter()
                .map(|child_id| {
                    built.remove(child_id).ok_or_else(|| {
                        TraceError::invalid_trace(format!(
                            "plan {} refers to child {} which is not emitted before it",
                            node.id, child_id
                        ))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            built.insert(node.id, rebuilt);
        }

        let root = built
            .remove(&root_id)
            .ok_or_else(|| TraceError::invalid_trace("root was claimed as a child"))?;
        if !built.is_empty() {
            let mut orphans: Vec<_> = built.keys().copied().collect();
            orphans.sort_unstable();
            return Err(TraceError::invalid_trace(format!(
                "plans {:?} are not reachable from root {}",
                orphans, root_id
            )));
        }
        Ok(root)
    }
}

impl From<Vec<PlanTrace>> for FlatPlan {
    fn from(nodes: Vec<PlanTrace>) -> Self {
        Self(nodes)
    }
}

impl<'a> IntoIterator for &'a FlatPlan {
    type Item = &'a PlanTrace;
    type IntoIter = std::slice::Iter<'a, PlanTrace>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
