//! Graphviz DOT export

use anyhow::Result;
use petgraph::dot::{Config, Dot};
use petgraph::graph::{NodeIndex, UnGraph};
use std::io::Write;

use crate::graph::{LinkReason, LinkageGraph};
use crate::viz::{edge_style, GraphRenderer};

/// Writes an undirected DOT graph, styling each edge by its link reason
pub struct DotRenderer;

impl DotRenderer {
    fn to_petgraph(graph: &LinkageGraph) -> UnGraph<&str, LinkReason> {
        let mut g = UnGraph::with_capacity(graph.node_count(), graph.edge_count());

        let nodes: Vec<NodeIndex> = graph
            .node_ids()
            .iter()
            .map(|id| g.add_node(id.as_str()))
            .collect();

        for node in 0..graph.node_count() as u32 {
            for (dst, reason) in graph.neighbors(node) {
                if node < dst {
                    g.add_edge(nodes[node as usize], nodes[dst as usize], reason);
                }
            }
        }

        g
    }
}

impl GraphRenderer for DotRenderer {
    fn render(&self, graph: &LinkageGraph, out: &mut dyn Write) -> Result<()> {
        let g = Self::to_petgraph(graph);
        let dot = Dot::with_attr_getters(
            &g,
            &[Config::EdgeNoLabel],
            &|_, edge| format!("style={} tooltip=\"{}\"", edge_style(*edge.weight()), edge.weight()),
            &|_, _| String::new(),
        );
        writeln!(out, "{}", dot)?;
        Ok(())
    }
}
