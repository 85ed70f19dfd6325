//! Linkage graph representation and construction

pub mod builder;
pub mod index;
pub mod linkage;

pub use builder::{build, build_from_rows, GraphBuilder};
pub use index::{AttributeIndex, AttributeKind};
pub use linkage::{LinkEdge, LinkReason, LinkageGraph, OversizedBucket, ReasonCounts};
