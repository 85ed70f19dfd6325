//! Core library functions for the mule link analyzer
//!
//! Accounts that share a device or an IP address are linked into a graph,
//! the graph is split into connected clusters, and the most connected member
//! of each cluster is nominated as a possible coordinator.

pub mod cluster;
pub mod config;
pub mod data;
pub mod error;
pub mod graph;
pub mod report;
pub mod storage;
pub mod viz;

pub use cluster::{analyze, analyze_with, ClusterKind, ClusterReport};
pub use data::{AccountRecord, RawRecord};
pub use error::LinkageError;
pub use graph::{build, build_from_rows, LinkReason, LinkageGraph};
