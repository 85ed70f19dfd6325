//! Attribute value to account buckets, used only while building the graph

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::graph::LinkReason;

/// Which record attribute an index is keyed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    Device,
    Ip,
}

impl AttributeKind {
    /// Reason carried by links derived from this attribute
    pub fn link_reason(&self) -> LinkReason {
        match self {
            AttributeKind::Device => LinkReason::SharedDevice,
            AttributeKind::Ip => LinkReason::SharedIp,
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeKind::Device => f.write_str("device"),
            AttributeKind::Ip => f.write_str("ip"),
        }
    }
}

/// Buckets of node indices sharing an attribute value.
///
/// Buckets iterate in first-seen order of their value and members keep
/// insertion order without repeats, so fixtures build reproducibly.
#[derive(Debug, Clone)]
pub struct AttributeIndex {
    kind: AttributeKind,
    positions: HashMap<String, usize>,
    buckets: Vec<(String, Vec<u32>)>,

    /// (bucket position, node) pairs already stored
    seen: HashSet<(usize, u32)>,
}

impl AttributeIndex {
    pub fn new(kind: AttributeKind) -> Self {
        Self {
            kind,
            positions: HashMap::new(),
            buckets: Vec::new(),
            seen: HashSet::new(),
        }
    }

    pub fn kind(&self) -> AttributeKind {
        self.kind
    }

    pub fn insert(&mut self, value: &str, node: u32) {
        let pos = match self.positions.get(value) {
            Some(&pos) => pos,
            None => {
                self.positions.insert(value.to_string(), self.buckets.len());
                self.buckets.push((value.to_string(), Vec::new()));
                self.buckets.len() - 1
            }
        };

        // Duplicate rows for one account must not repeat it in the bucket
        if self.seen.insert((pos, node)) {
            self.buckets[pos].1.push(node);
        }
    }

    pub fn bucket(&self, value: &str) -> Option<&[u32]> {
        self.positions
            .get(value)
            .map(|&pos| self.buckets[pos].1.as_slice())
    }

    pub fn buckets(&self) -> impl Iterator<Item = (&str, &[u32])> + '_ {
        self.buckets
            .iter()
            .map(|(value, members)| (value.as_str(), members.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buckets_keep_first_seen_order() {
        let mut index = AttributeIndex::new(AttributeKind::Ip);
        index.insert("I2", 0);
        index.insert("I1", 1);
        index.insert("I2", 2);

        let values: Vec<_> = index.buckets().map(|(value, _)| value).collect();
        assert_eq!(values, vec!["I2", "I1"]);
        assert_eq!(index.bucket("I2"), Some(&[0, 2][..]));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_repeated_member_is_stored_once() {
        let mut index = AttributeIndex::new(AttributeKind::Device);
        index.insert("D1", 3);
        index.insert("D1", 3);
        index.insert("D1", 1);
        assert_eq!(index.bucket("D1"), Some(&[3, 1][..]));
    }

    #[test]
    fn test_large_bucket_with_repeats_keeps_order() {
        let mut index = AttributeIndex::new(AttributeKind::Ip);
        for round in 0..3 {
            for node in (0..5_000u32).rev() {
                index.insert("10.0.0.1", node);
                if round == 0 && node % 2 == 0 {
                    index.insert("10.0.0.2", node);
                }
            }
        }

        let shared = index.bucket("10.0.0.1").unwrap();
        assert_eq!(shared.len(), 5_000);
        assert_eq!(shared[0], 4_999);
        assert_eq!(shared[4_999], 0);
        assert_eq!(index.bucket("10.0.0.2").unwrap().len(), 2_500);
    }

    #[test]
    fn test_kind_maps_to_reason() {
        assert_eq!(AttributeKind::Device.link_reason(), LinkReason::SharedDevice);
        assert_eq!(AttributeKind::Ip.link_reason(), LinkReason::SharedIp);
    }
}
