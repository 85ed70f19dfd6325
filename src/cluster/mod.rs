//! Cluster partitioning and coordinator ranking

pub mod detection;
pub mod metrics;

pub use detection::{analyze, analyze_with, find_clusters, DisjointSets};

use serde::Serialize;

use crate::graph::ReasonCounts;

/// Interpretation of one cluster
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClusterKind {
    /// A single account with no shared-attribute links
    Isolated,

    /// Linked accounts; the member with the highest degree centrality is
    /// nominated for manual review
    Clustered { coordinator: String, score: f64 },
}

/// Derived view of one connected cluster of accounts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterReport {
    /// 1-based position in the report sequence
    pub index: usize,

    /// Member account ids, sorted
    pub members: Vec<String>,

    #[serde(flatten)]
    pub kind: ClusterKind,

    /// Induced links / possible links
    pub density: f64,

    /// Links inside the cluster by reason
    pub links: ReasonCounts,
}

impl ClusterReport {
    pub fn size(&self) -> usize {
        self.members.len()
    }

    pub fn is_isolated(&self) -> bool {
        matches!(self.kind, ClusterKind::Isolated)
    }

    pub fn coordinator(&self) -> Option<(&str, f64)> {
        match &self.kind {
            ClusterKind::Isolated => None,
            ClusterKind::Clustered { coordinator, score } => Some((coordinator.as_str(), *score)),
        }
    }
}
