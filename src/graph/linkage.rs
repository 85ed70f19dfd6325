//! Immutable account linkage graph

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use crate::graph::index::AttributeKind;

/// Why two accounts are linked. Ordered weakest first, so `max` picks the
/// stronger reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LinkReason {
    /// Accounts seen behind the same IP address
    SharedIp,
    /// Accounts seen on the same device
    SharedDevice,
}

impl LinkReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkReason::SharedIp => "shared_ip",
            LinkReason::SharedDevice => "shared_device",
        }
    }

    pub fn is_strong(&self) -> bool {
        matches!(self, LinkReason::SharedDevice)
    }
}

impl fmt::Display for LinkReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An attribute bucket that was too large to link pairwise
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OversizedBucket {
    pub attribute: AttributeKind,
    pub value: String,
    pub size: usize,
}

/// One undirected edge, reported once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkEdge<'a> {
    pub source: &'a str,
    pub target: &'a str,
    pub reason: LinkReason,
}

/// Edge totals per reason
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReasonCounts {
    pub shared_device: usize,
    pub shared_ip: usize,
}

impl ReasonCounts {
    pub fn record(&mut self, reason: LinkReason) {
        match reason {
            LinkReason::SharedDevice => self.shared_device += 1,
            LinkReason::SharedIp => self.shared_ip += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.shared_device + self.shared_ip
    }
}

/// Compressed adjacency representation of the undirected linkage graph.
///
/// Every edge is stored once under each endpoint; `reasons` runs parallel to
/// `neighbors`. Neighbor ranges are sorted so lookups can binary search.
/// Only [`GraphBuilder`](crate::graph::GraphBuilder) can construct one.
#[derive(Debug, Clone)]
pub struct LinkageGraph {
    node_ids: Vec<String>,

    index: HashMap<String, u32>,

    /// offsets[i] to offsets[i+1] is the neighbor range of node i
    offsets: Vec<usize>,

    neighbors: Vec<u32>,

    reasons: Vec<LinkReason>,

    oversized_buckets: Vec<OversizedBucket>,
}

impl LinkageGraph {
    pub(crate) fn from_parts(
        node_ids: Vec<String>,
        index: HashMap<String, u32>,
        offsets: Vec<usize>,
        neighbors: Vec<u32>,
        reasons: Vec<LinkReason>,
        oversized_buckets: Vec<OversizedBucket>,
    ) -> Self {
        debug_assert_eq!(offsets.len(), node_ids.len() + 1);
        debug_assert_eq!(neighbors.len(), reasons.len());
        Self {
            node_ids,
            index,
            offsets,
            neighbors,
            reasons,
            oversized_buckets,
        }
    }

    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.neighbors.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.node_ids.is_empty()
    }

    /// Account ids in insertion order (node index order)
    pub fn node_ids(&self) -> &[String] {
        &self.node_ids
    }

    pub fn node_id(&self, node: u32) -> &str {
        &self.node_ids[node as usize]
    }

    pub fn index_of(&self, account_id: &str) -> Option<u32> {
        self.index.get(account_id).copied()
    }

    fn range(&self, node: u32) -> std::ops::Range<usize> {
        let node = node as usize;
        self.offsets[node]..self.offsets[node + 1]
    }

    /// Neighbors of a node with the reason of each link
    pub fn neighbors(&self, node: u32) -> impl Iterator<Item = (u32, LinkReason)> + '_ {
        let range = self.range(node);
        self.neighbors[range.clone()]
            .iter()
            .copied()
            .zip(self.reasons[range].iter().copied())
    }

    pub fn degree(&self, node: u32) -> usize {
        self.range(node).len()
    }

    pub fn edge_reason(&self, a: u32, b: u32) -> Option<LinkReason> {
        let range = self.range(a);
        let start = range.start;
        self.neighbors[range]
            .binary_search(&b)
            .ok()
            .map(|pos| self.reasons[start + pos])
    }

    pub fn has_edge(&self, a: u32, b: u32) -> bool {
        self.edge_reason(a, b).is_some()
    }

    /// Reason of the link between two accounts, looked up by id
    pub fn link_between(&self, a: &str, b: &str) -> Option<LinkReason> {
        let a = self.index_of(a)?;
        let b = self.index_of(b)?;
        self.edge_reason(a, b)
    }

    /// Every undirected edge once, lower node index first
    pub fn edges(&self) -> impl Iterator<Item = LinkEdge<'_>> + '_ {
        (0..self.node_count() as u32).flat_map(move |src| {
            self.neighbors(src)
                .filter(move |&(dst, _)| src < dst)
                .map(move |(dst, reason)| LinkEdge {
                    source: self.node_id(src),
                    target: self.node_id(dst),
                    reason,
                })
        })
    }

    pub fn reason_counts(&self) -> ReasonCounts {
        let mut counts = ReasonCounts::default();
        for edge in self.edges() {
            counts.record(edge.reason);
        }
        counts
    }

    /// Buckets skipped during construction because they exceeded the size cap
    pub fn oversized_buckets(&self) -> &[OversizedBucket] {
        &self.oversized_buckets
    }
}
