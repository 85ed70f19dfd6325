//! Cluster detection and per-cluster analysis

use rayon::prelude::*;
use std::collections::HashMap;

use crate::cluster::metrics::{cluster_density, cluster_links, select_coordinator};
use crate::cluster::{ClusterKind, ClusterReport};
use crate::config::AnalyzerConfig;
use crate::graph::LinkageGraph;

/// Union-Find over node indices for connected component analysis
pub struct DisjointSets {
    parent: Vec<u32>,

    /// Set size, only meaningful at roots
    size: Vec<u32>,
}

impl DisjointSets {
    pub fn new(count: usize) -> Self {
        Self {
            parent: (0..count as u32).collect(),
            size: vec![1; count],
        }
    }

    /// Find the root of the set containing x, compressing the path
    pub fn find(&mut self, x: u32) -> u32 {
        let mut root = x;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }

        let mut node = x;
        while node != root {
            let next = self.parent[node as usize];
            self.parent[node as usize] = root;
            node = next;
        }

        root
    }

    /// Merge the sets containing x and y, smaller under larger
    pub fn union(&mut self, x: u32, y: u32) {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return;
        }

        let (big, small) = if self.size[root_x as usize] >= self.size[root_y as usize] {
            (root_x, root_y)
        } else {
            (root_y, root_x)
        };
        self.parent[small as usize] = big;
        self.size[big as usize] += self.size[small as usize];
    }
}

/// Partition the graph into connected clusters regardless of link reason.
///
/// Members of each cluster are sorted by account id and clusters are ordered
/// by their smallest member id, so the output is stable for a given graph.
pub fn find_clusters(graph: &LinkageGraph) -> Vec<Vec<u32>> {
    let node_count = graph.node_count();
    let mut sets = DisjointSets::new(node_count);

    for node in 0..node_count as u32 {
        for (dst, _) in graph.neighbors(node) {
            if node < dst {
                sets.union(node, dst);
            }
        }
    }

    let mut components: HashMap<u32, Vec<u32>> = HashMap::new();
    for node in 0..node_count as u32 {
        let root = sets.find(node);
        components.entry(root).or_default().push(node);
    }

    let mut clusters: Vec<Vec<u32>> = components.into_values().collect();
    for members in &mut clusters {
        members.sort_by(|&a, &b| graph.node_id(a).cmp(graph.node_id(b)));
    }
    // Clusters are disjoint, so first members never tie
    clusters.sort_by(|a, b| graph.node_id(a[0]).cmp(graph.node_id(b[0])));

    log::debug!("Partitioned {} accounts into {} clusters", node_count, clusters.len());

    clusters
}

/// Analyze every cluster with the default configuration
pub fn analyze(graph: &LinkageGraph) -> Vec<ClusterReport> {
    analyze_with(graph, &AnalyzerConfig::default())
}

/// Partition the graph, then interpret each cluster.
///
/// Partitioning finishes before any per-cluster work; clusters are then
/// analyzed in parallel and collected in partition order.
pub fn analyze_with(graph: &LinkageGraph, config: &AnalyzerConfig) -> Vec<ClusterReport> {
    let clusters: Vec<Vec<u32>> = find_clusters(graph)
        .into_iter()
        .filter(|members| members.len() >= config.min_cluster_size)
        .collect();

    log::info!(
        "Analyzing {} clusters with {} or more members",
        clusters.len(),
        config.min_cluster_size
    );

    clusters
        .par_iter()
        .enumerate()
        .map(|(pos, members)| report_cluster(graph, pos + 1, members))
        .collect()
}

fn report_cluster(graph: &LinkageGraph, index: usize, members: &[u32]) -> ClusterReport {
    let kind = if members.len() == 1 {
        ClusterKind::Isolated
    } else {
        match select_coordinator(graph, members) {
            Some((node, score)) => ClusterKind::Clustered {
                coordinator: graph.node_id(node).to_string(),
                score,
            },
            None => ClusterKind::Isolated,
        }
    };

    ClusterReport {
        index,
        members: members.iter().map(|&node| graph.node_id(node).to_string()).collect(),
        kind,
        density: cluster_density(graph, members),
        links: cluster_links(graph, members),
    }
}
