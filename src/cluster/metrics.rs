//! Cluster statistics and centrality

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::graph::{LinkageGraph, ReasonCounts};

/// Degree centrality of each member within the cluster's induced subgraph:
/// degree / (size - 1). A singleton scores 0.
pub fn degree_centrality(graph: &LinkageGraph, members: &[u32]) -> Vec<(u32, f64)> {
    let n = members.len();
    if n <= 1 {
        return members.iter().map(|&node| (node, 0.0)).collect();
    }

    let member_set: HashSet<u32> = members.iter().copied().collect();
    let denominator = (n - 1) as f64;

    members
        .iter()
        .map(|&node| {
            let degree = graph
                .neighbors(node)
                .filter(|(dst, _)| member_set.contains(dst))
                .count();
            (node, degree as f64 / denominator)
        })
        .collect()
}

/// Members ordered by descending centrality; equal scores fall back to the
/// lexicographically smaller account id
pub fn rank_by_centrality(graph: &LinkageGraph, members: &[u32]) -> Vec<(u32, f64)> {
    let mut ranked = degree_centrality(graph, members);
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| graph.node_id(a.0).cmp(graph.node_id(b.0)))
    });
    ranked
}

/// Highest-ranked member and its score, or `None` for an empty member list
pub fn select_coordinator(graph: &LinkageGraph, members: &[u32]) -> Option<(u32, f64)> {
    rank_by_centrality(graph, members).into_iter().next()
}

/// Count induced links per reason
pub fn cluster_links(graph: &LinkageGraph, members: &[u32]) -> ReasonCounts {
    let member_set: HashSet<u32> = members.iter().copied().collect();
    let mut counts = ReasonCounts::default();

    for &src in members {
        for (dst, reason) in graph.neighbors(src) {
            // Each undirected link is seen from both ends
            if src < dst && member_set.contains(&dst) {
                counts.record(reason);
            }
        }
    }

    counts
}

/// Calculate density (actual links / potential links)
pub fn cluster_density(graph: &LinkageGraph, members: &[u32]) -> f64 {
    let n = members.len();
    if n <= 1 {
        return 1.0; // By convention, singleton clusters have density 1
    }

    let potential = (n * (n - 1) / 2) as f64;
    cluster_links(graph, members).total() as f64 / potential
}
