//! Linkage graph construction

use itertools::Itertools;
use std::collections::{BTreeMap, HashMap};

use crate::config::BuildConfig;
use crate::data::{validate_records, AccountRecord, RawRecord};
use crate::error::Result;
use crate::graph::{AttributeIndex, AttributeKind, LinkReason, LinkageGraph, OversizedBucket};

/// Builder for incrementally constructing a LinkageGraph
pub struct GraphBuilder {
    /// Mapping from account ids to node indices
    id_to_index: HashMap<String, u32>,

    /// Account ids by node index
    node_ids: Vec<String>,

    /// Neighbor -> reason for each node, kept sorted by neighbor
    adjacency: Vec<BTreeMap<u32, LinkReason>>,

    oversized_buckets: Vec<OversizedBucket>,
}

impl GraphBuilder {
    /// Create a new graph builder with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id_to_index: HashMap::with_capacity(capacity),
            node_ids: Vec::with_capacity(capacity),
            adjacency: Vec::with_capacity(capacity),
            oversized_buckets: Vec::new(),
        }
    }

    /// Get or create the node for an account id. Re-inserting is a no-op.
    pub fn get_or_create_node(&mut self, id: &str) -> u32 {
        if let Some(&idx) = self.id_to_index.get(id) {
            return idx;
        }

        let idx = self.node_ids.len() as u32;
        self.id_to_index.insert(id.to_string(), idx);
        self.node_ids.push(id.to_string());
        self.adjacency.push(BTreeMap::new());

        idx
    }

    /// Link two nodes. An existing link keeps the stronger of its reason and
    /// `reason`, so a device link is never demoted. Self-pairs are ignored.
    pub fn link(&mut self, a: u32, b: u32, reason: LinkReason) {
        if a == b {
            return;
        }

        let merged = self.adjacency[a as usize]
            .get(&b)
            .map_or(reason, |&existing| existing.max(reason));

        self.adjacency[a as usize].insert(b, merged);
        self.adjacency[b as usize].insert(a, merged);
    }

    /// Link every unordered pair inside each bucket of `index`
    pub fn link_buckets(&mut self, index: &AttributeIndex, config: &BuildConfig) {
        let reason = index.kind().link_reason();
        let mut linked_buckets = 0usize;

        for (value, members) in index.buckets() {
            if members.len() < 2 {
                continue;
            }

            if let Some(cap) = config.max_bucket_size {
                if members.len() > cap {
                    log::warn!(
                        "Skipping {} bucket {:?}: {} accounts exceeds cap of {}",
                        index.kind(),
                        value,
                        members.len(),
                        cap
                    );
                    self.oversized_buckets.push(OversizedBucket {
                        attribute: index.kind(),
                        value: value.to_string(),
                        size: members.len(),
                    });
                    continue;
                }
            }

            for (&a, &b) in members.iter().tuple_combinations() {
                self.link(a, b, reason);
            }
            linked_buckets += 1;
        }

        log::debug!("Linked {} shared {} buckets", linked_buckets, index.kind());
    }

    /// Build the compressed graph
    pub fn build(self) -> LinkageGraph {
        let entry_count: usize = self.adjacency.iter().map(|list| list.len()).sum();

        let mut offsets = Vec::with_capacity(self.node_ids.len() + 1);
        let mut neighbors = Vec::with_capacity(entry_count);
        let mut reasons = Vec::with_capacity(entry_count);

        offsets.push(0);
        for list in &self.adjacency {
            // BTreeMap iteration is already sorted by neighbor
            for (&dst, &reason) in list {
                neighbors.push(dst);
                reasons.push(reason);
            }
            offsets.push(neighbors.len());
        }

        LinkageGraph::from_parts(
            self.node_ids,
            self.id_to_index,
            offsets,
            neighbors,
            reasons,
            self.oversized_buckets,
        )
    }
}

/// Build the linkage graph from validated records.
///
/// Device links are added before IP links; since `link` only ever
/// strengthens, a pair sharing both ends up as `shared_device`.
pub fn build(records: &[AccountRecord], config: &BuildConfig) -> LinkageGraph {
    let mut builder = GraphBuilder::with_capacity(records.len());
    let mut devices = AttributeIndex::new(AttributeKind::Device);
    let mut ips = AttributeIndex::new(AttributeKind::Ip);

    for record in records {
        let idx = builder.get_or_create_node(record.account_id());
        devices.insert(record.device_id(), idx);
        ips.insert(record.ip_address(), idx);
    }

    builder.link_buckets(&devices, config);
    builder.link_buckets(&ips, config);

    let graph = builder.build();
    log::info!(
        "Built linkage graph with {} accounts and {} links",
        graph.node_count(),
        graph.edge_count()
    );

    graph
}

/// Validate raw rows, then build. No graph is produced if any row is malformed.
pub fn build_from_rows(rows: &[RawRecord], config: &BuildConfig) -> Result<LinkageGraph> {
    let records = validate_records(rows)?;
    Ok(build(&records, config))
}
